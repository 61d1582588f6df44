pub mod engine;
pub mod flags;
pub mod form;
pub mod holes;
pub mod night;
pub mod shuffle;
pub mod tags;

pub use crate::domain::model::{FlagPlan, FlagPolicy, Group, Hole, Player, TagNumber, TagResult};
pub use crate::domain::night::{CtpSelection, NightInput, NightResult};
pub use crate::domain::ports::{ConfigProvider, KeyValueStore, Pipeline, Shuffler, Storage};
pub use crate::utils::error::Result;
