pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FileKeyValueStore, LocalStorage, MemoryKeyValueStore};
pub use config::TomlConfig;
pub use crate::core::engine::{NightEngine, NightOutcome};
pub use crate::core::flags::plan_flags;
pub use crate::core::night::LeaguePipeline;
pub use crate::core::shuffle::{InputOrder, RngShuffler};
pub use crate::core::tags::redistribute_tags;
pub use utils::error::{LeagueError, Result};
