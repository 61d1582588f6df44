use crate::domain::model::{Player, TagNumber, TagResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SNAPSHOT_KEY: &str = "league_players";

/// A player as remembered between league nights.
///
/// `tag` is the tag the player left with, which is the tag they bring in
/// next time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterRecord {
    pub name: String,
    #[serde(default)]
    pub handicap: Option<f64>,
    #[serde(default)]
    pub tag: Option<TagNumber>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub players: Vec<RosterRecord>,
}

impl RosterSnapshot {
    pub fn find(&self, name: &str) -> Option<&RosterRecord> {
        self.players.iter().find(|r| r.name == name)
    }

    /// Fills blank handicap and tag fields from the record with the same name.
    pub fn fill_player(&self, player: &mut Player) {
        if let Some(record) = self.find(&player.name) {
            if player.handicap.is_none() {
                player.handicap = record.handicap;
            }
            if player.tag_in.is_none() {
                player.tag_in = record.tag;
            }
        }
    }

    /// Snapshot for the next night: tonight's players with their new tags,
    /// followed by roster entries who did not play tonight.
    pub fn roll_forward(&self, results: &[TagResult], saved_at: DateTime<Utc>) -> Self {
        let mut players: Vec<RosterRecord> = results
            .iter()
            .map(|r| RosterRecord {
                name: r.name.clone(),
                handicap: r.handicap,
                tag: r.new_tag,
            })
            .collect();

        for record in &self.players {
            if !results.iter().any(|r| r.name == record.name) {
                players.push(record.clone());
            }
        }

        Self {
            saved_at: Some(saved_at),
            players,
        }
    }
}
