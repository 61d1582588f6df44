//! Input checks that run before the planner and the redistributor.

use crate::domain::model::{Group, Hole, Player, ScoreEntry, TagNumber};
use crate::domain::roster::RosterSnapshot;
use crate::utils::error::{LeagueError, Result};
use crate::utils::validation::{validate_hole, validate_holes, validate_non_empty_string};
use std::collections::{HashMap, HashSet};

/// Every start must be on the course.
pub fn validate_groups(groups: &[Group], total_holes: u32) -> Result<()> {
    if groups.is_empty() {
        return Err(LeagueError::ValidationError {
            message: "At least one group is required".to_string(),
        });
    }
    for group in groups {
        validate_non_empty_string("groups.name", &group.name)?;
        validate_hole(&format!("groups.{}.start", group.name), group.start, total_holes)?;
    }
    Ok(())
}

/// Pairs of groups that share a starting hole, one error per extra group.
pub fn duplicate_starts(groups: &[Group]) -> Vec<LeagueError> {
    let mut first_on: HashMap<Hole, &str> = HashMap::new();
    let mut duplicates = Vec::new();

    for group in groups {
        match first_on.get(&group.start) {
            Some(first) => duplicates.push(LeagueError::DuplicateStartingHole {
                hole: group.start,
                first: first.to_string(),
                second: group.name.clone(),
            }),
            None => {
                first_on.insert(group.start, &group.name);
            }
        }
    }

    duplicates
}

pub fn validate_ctp_holes(holes: &[Hole], total_holes: u32) -> Result<()> {
    validate_holes("ctp.holes", holes, total_holes)
}

/// Names present and unique; incoming tags within `1..=max_tag` and held once.
pub fn validate_players(players: &[Player], max_tag: u32) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut holders: HashMap<TagNumber, &str> = HashMap::new();

    for player in players {
        validate_non_empty_string("players.name", &player.name)?;
        if !seen.insert(player.name.as_str()) {
            return Err(LeagueError::DuplicatePlayerName {
                name: player.name.clone(),
            });
        }
        if let Some(tag) = player.tag_in {
            if tag == 0 || tag > max_tag {
                return Err(LeagueError::InvalidTagNumber {
                    player: player.name.clone(),
                    tag,
                    max_tag,
                });
            }
            if let Some(holder) = holders.insert(tag, &player.name) {
                return Err(LeagueError::DuplicateTag {
                    tag,
                    holder: holder.to_string(),
                    claimant: player.name.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Tonight's incoming tags must not still belong to a roster player who is
/// not on the sheet.
pub fn validate_roster_holders(players: &[Player], snapshot: &RosterSnapshot) -> Result<()> {
    let playing: HashSet<&str> = players.iter().map(|p| p.name.as_str()).collect();
    let held: HashMap<TagNumber, &str> = snapshot
        .players
        .iter()
        .filter(|r| !playing.contains(r.name.as_str()))
        .filter_map(|r| r.tag.map(|tag| (tag, r.name.as_str())))
        .collect();

    for player in players {
        let Some(tag) = player.tag_in else { continue };
        if let Some(holder) = held.get(&tag) {
            return Err(LeagueError::DuplicateTag {
                tag,
                holder: holder.to_string(),
                claimant: player.name.clone(),
            });
        }
    }

    Ok(())
}

/// Score entries for every player, or the names still missing a score.
pub fn finalize_scores(players: &[Player]) -> Result<Vec<ScoreEntry>> {
    let missing: Vec<String> = players
        .iter()
        .filter(|p| p.raw_score.is_none())
        .map(|p| p.name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(LeagueError::IncompleteScores { players: missing });
    }

    Ok(players
        .iter()
        .enumerate()
        .filter_map(|(index, p)| p.raw_score.map(|raw_score| ScoreEntry { index, raw_score }))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_starts_reported() {
        let groups = vec![
            Group::new("A", 1),
            Group::new("B", 7),
            Group::new("C", 1),
        ];
        let duplicates = duplicate_starts(&groups);
        assert_eq!(duplicates.len(), 1);
        match &duplicates[0] {
            LeagueError::DuplicateStartingHole { hole, first, second } => {
                assert_eq!(*hole, 1);
                assert_eq!(first, "A");
                assert_eq!(second, "C");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_validate_groups() {
        assert!(validate_groups(&[Group::new("A", 1)], 24).is_ok());
        assert!(validate_groups(&[], 24).is_err());
        assert!(matches!(
            validate_groups(&[Group::new("A", 25)], 24),
            Err(LeagueError::InvalidHoleRange { hole: 25, .. })
        ));
    }

    #[test]
    fn test_validate_players() {
        let ok = vec![Player::new("Ana").with_tag(75), Player::new("Bo")];
        assert!(validate_players(&ok, 75).is_ok());

        let zero_tag = vec![Player::new("Ana").with_tag(0)];
        assert!(matches!(
            validate_players(&zero_tag, 75),
            Err(LeagueError::InvalidTagNumber { tag: 0, .. })
        ));

        let dup = vec![Player::new("Ana"), Player::new("Ana")];
        assert!(matches!(
            validate_players(&dup, 75),
            Err(LeagueError::DuplicatePlayerName { .. })
        ));
    }

    #[test]
    fn test_shared_incoming_tag_rejected() {
        let players = vec![
            Player::new("Ana").with_tag(3).with_score(50),
            Player::new("Bo").with_tag(3).with_score(55),
        ];
        match validate_players(&players, 75) {
            Err(LeagueError::DuplicateTag { tag, holder, claimant }) => {
                assert_eq!(tag, 3);
                assert_eq!(holder, "Ana");
                assert_eq!(claimant, "Bo");
            }
            other => panic!("expected DuplicateTag, got {:?}", other),
        }
    }

    #[test]
    fn test_tag_held_by_absent_roster_player_rejected() {
        let snapshot: RosterSnapshot = serde_json::from_str(
            r#"{"players":[{"name":"Ana","tag":4},{"name":"Cy","tag":9}]}"#,
        )
        .unwrap();

        // Ana is playing, so her old tag is back in the pool
        let ok = vec![Player::new("Bo").with_tag(4), Player::new("Ana")];
        assert!(validate_roster_holders(&ok, &snapshot).is_ok());

        let taken = vec![Player::new("Bo").with_tag(9)];
        assert!(matches!(
            validate_roster_holders(&taken, &snapshot),
            Err(LeagueError::DuplicateTag { tag: 9, .. })
        ));
    }

    #[test]
    fn test_finalize_scores_blocks_partial_sheet() {
        let players = vec![Player::new("Ana").with_score(54), Player::new("Bo")];
        match finalize_scores(&players) {
            Err(LeagueError::IncompleteScores { players }) => assert_eq!(players, vec!["Bo"]),
            other => panic!("expected IncompleteScores, got {:?}", other),
        }

        let complete = vec![Player::new("Ana").with_score(54), Player::new("Bo").with_score(50)];
        let entries = finalize_scores(&complete).unwrap();
        assert_eq!(entries[1], ScoreEntry { index: 1, raw_score: 50 });
    }
}
