use crate::domain::model::{FlagPlan, FlagPolicy, Group, Hole, Player, TagResult};
use crate::domain::roster::RosterSnapshot;
use serde::{Deserialize, Serialize};

/// Everything gathered before any computation happens.
#[derive(Debug, Clone, PartialEq)]
pub struct NightInput {
    pub total_holes: u32,
    pub groups: Vec<Group>,
    pub requested_ctps: Vec<Hole>,
    pub players: Vec<Player>,
    pub snapshot: RosterSnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum CtpSelection {
    Requested { holes: Vec<Hole> },
    Random { holes: Vec<Hole>, reason: String },
}

impl CtpSelection {
    pub fn holes(&self) -> &[Hole] {
        match self {
            CtpSelection::Requested { holes } | CtpSelection::Random { holes, .. } => holes,
        }
    }

    pub fn is_random(&self) -> bool {
        matches!(self, CtpSelection::Random { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightResult {
    pub total_holes: u32,
    pub groups: Vec<Group>,
    pub policy: FlagPolicy,
    pub ctp: CtpSelection,
    pub flags: FlagPlan,
    pub tags: Vec<TagResult>,
    pub snapshot: RosterSnapshot,
}
