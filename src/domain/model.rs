use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Position on the course, numbered from 1.
pub type Hole = u32;
/// Bag tag number. Lower is better.
pub type TagNumber = u32;
/// Position of a group in the input order.
pub type GroupIndex = usize;

pub const DEFAULT_TOTAL_HOLES: u32 = 24;
pub const MAX_TAG: TagNumber = 75;
pub const CANONICAL_CTP_COUNT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub start: Hole,
}

impl Group {
    pub fn new(name: impl Into<String>, start: Hole) -> Self {
        Self {
            name: name.into(),
            start,
        }
    }
}

/// How flag duties are handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum FlagPolicy {
    /// Nearest group ahead of the hole brings the flag, farthest picks it up.
    #[default]
    Positional,
    /// Round-robin over a shuffled group order.
    LoadBalanced,
}

impl std::fmt::Display for FlagPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlagPolicy::Positional => write!(f, "positional"),
            FlagPolicy::LoadBalanced => write!(f, "load-balanced"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleDuty {
    pub hole: Hole,
    pub bring_out: GroupIndex,
    pub pick_up: GroupIndex,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagPlan {
    pub bring_out: BTreeMap<GroupIndex, BTreeSet<Hole>>,
    pub pick_up: BTreeMap<GroupIndex, BTreeSet<Hole>>,
    /// One entry per CTP hole, in the order the holes were given.
    pub duties: Vec<HoleDuty>,
}

impl FlagPlan {
    pub fn is_empty(&self) -> bool {
        self.duties.is_empty()
    }

    pub fn duty_for(&self, hole: Hole) -> Option<&HoleDuty> {
        self.duties.iter().find(|d| d.hole == hole)
    }

    pub fn bring_out_holes(&self, group: GroupIndex) -> Vec<Hole> {
        self.bring_out
            .get(&group)
            .map(|holes| holes.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn pick_up_holes(&self, group: GroupIndex) -> Vec<Hole> {
        self.pick_up
            .get(&group)
            .map(|holes| holes.iter().copied().collect())
            .unwrap_or_default()
    }

    pub(crate) fn push(&mut self, duty: HoleDuty) {
        self.bring_out
            .entry(duty.bring_out)
            .or_default()
            .insert(duty.hole);
        self.pick_up.entry(duty.pick_up).or_default().insert(duty.hole);
        self.duties.push(duty);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub handicap: Option<f64>,
    pub tag_in: Option<TagNumber>,
    pub raw_score: Option<i32>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handicap: None,
            tag_in: None,
            raw_score: None,
        }
    }

    pub fn with_handicap(mut self, handicap: f64) -> Self {
        self.handicap = Some(handicap);
        self
    }

    pub fn with_tag(mut self, tag: TagNumber) -> Self {
        self.tag_in = Some(tag);
        self
    }

    pub fn with_score(mut self, raw_score: i32) -> Self {
        self.raw_score = Some(raw_score);
        self
    }

    /// `raw_score` less this player's handicap. A missing handicap counts as zero.
    pub fn net_of(&self, raw_score: i32) -> f64 {
        f64::from(raw_score) - self.handicap.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreEntry {
    pub index: usize,
    pub raw_score: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagEntrant {
    pub raw_score: i32,
    pub tag_in: Option<TagNumber>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagAssignment {
    pub index: usize,
    pub new_tag: Option<TagNumber>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "by", rename_all = "lowercase")]
pub enum TagChange {
    Gained(u32),
    Lost(u32),
    Unchanged,
}

impl TagChange {
    pub fn between(old: Option<TagNumber>, new: Option<TagNumber>) -> Self {
        match (old, new) {
            (Some(old), Some(new)) if new < old => TagChange::Gained(old - new),
            (Some(old), Some(new)) if new > old => TagChange::Lost(new - old),
            _ => TagChange::Unchanged,
        }
    }
}

impl std::fmt::Display for TagChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagChange::Gained(by) => write!(f, "Gained {}", by),
            TagChange::Lost(by) => write!(f, "Lost {}", by),
            TagChange::Unchanged => write!(f, "-"),
        }
    }
}

/// One ranked line of the tag results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagResult {
    pub rank: usize,
    pub name: String,
    pub raw_score: i32,
    pub handicap: Option<f64>,
    pub net_score: Option<f64>,
    pub old_tag: Option<TagNumber>,
    pub new_tag: Option<TagNumber>,
    pub change: TagChange,
}
