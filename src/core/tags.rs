//! Weekly bag tag redistribution.
//!
//! Tags turned in tonight form a pool of interchangeable numbered slots. The
//! best raw score takes the lowest number in the pool, the next score the next
//! number, and so on until the pool runs out.

use crate::domain::model::{Player, ScoreEntry, TagAssignment, TagChange, TagEntrant, TagNumber, TagResult};
use std::collections::HashMap;

/// Tags in circulation, lowest first. Duplicates are kept.
pub fn tag_pool<I>(tags: I) -> Vec<TagNumber>
where
    I: IntoIterator<Item = Option<TagNumber>>,
{
    let mut pool: Vec<TagNumber> = tags.into_iter().flatten().collect();
    pool.sort_unstable();
    pool
}

/// Lowest raw score first. Equal scores keep their input order.
pub fn rank_entries(entries: &[ScoreEntry]) -> Vec<ScoreEntry> {
    let mut ranked = entries.to_vec();
    ranked.sort_by_key(|e| e.raw_score);
    ranked
}

/// Assigns tags in rank order. Only the entries' own incoming tags form the pool.
pub fn redistribute(
    entries: &[ScoreEntry],
    tag_in: &HashMap<usize, Option<TagNumber>>,
) -> Vec<TagAssignment> {
    let pool = tag_pool(entries.iter().map(|e| tag_in.get(&e.index).copied().flatten()));
    redistribute_with_pool(entries, &pool)
}

/// Assigns from an externally supplied pool. Excess tags go unused.
pub fn redistribute_with_pool(entries: &[ScoreEntry], pool: &[TagNumber]) -> Vec<TagAssignment> {
    let mut pool = pool.to_vec();
    pool.sort_unstable();

    rank_entries(entries)
        .into_iter()
        .enumerate()
        .map(|(rank, entry)| TagAssignment {
            index: entry.index,
            new_tag: pool.get(rank).copied(),
        })
        .collect()
}

/// New tag for every entrant, in input order.
pub fn redistribute_tags(players: &[TagEntrant]) -> Vec<Option<TagNumber>> {
    let entries: Vec<ScoreEntry> = players
        .iter()
        .enumerate()
        .map(|(index, p)| ScoreEntry {
            index,
            raw_score: p.raw_score,
        })
        .collect();
    let tag_in: HashMap<usize, Option<TagNumber>> = players
        .iter()
        .enumerate()
        .map(|(index, p)| (index, p.tag_in))
        .collect();

    let mut new_tags = vec![None; players.len()];
    for assignment in redistribute(&entries, &tag_in) {
        new_tags[assignment.index] = assignment.new_tag;
    }
    new_tags
}

/// Ranked result lines for `players`, scored by `entries`.
pub fn tag_results(players: &[Player], entries: &[ScoreEntry]) -> Vec<TagResult> {
    let tag_in: HashMap<usize, Option<TagNumber>> = entries
        .iter()
        .filter_map(|e| players.get(e.index).map(|p| (e.index, p.tag_in)))
        .collect();
    let scores: HashMap<usize, i32> = entries.iter().map(|e| (e.index, e.raw_score)).collect();

    redistribute(entries, &tag_in)
        .into_iter()
        .enumerate()
        .filter_map(|(rank, assignment)| {
            let player = players.get(assignment.index)?;
            let raw_score = *scores.get(&assignment.index)?;
            Some(TagResult {
                rank: rank + 1,
                name: player.name.clone(),
                raw_score,
                handicap: player.handicap,
                net_score: Some(player.net_of(raw_score)),
                old_tag: player.tag_in,
                new_tag: assignment.new_tag,
                change: TagChange::between(player.tag_in, assignment.new_tag),
            })
        })
        .collect()
}
