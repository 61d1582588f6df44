use crate::domain::model::{FlagPolicy, Group, Hole};
use crate::domain::night::{NightInput, NightResult};
use crate::utils::error::Result;

/// File sink for export output.
pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

/// Single string-keyed store backing the roster snapshot.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Source of randomness for the load-balanced policy and CTP fallback.
pub trait Shuffler {
    fn shuffle<T>(&mut self, items: &mut [T]);
}

pub trait ConfigProvider {
    fn total_holes(&self) -> u32;
    fn groups(&self) -> &[Group];
    fn ctp_holes(&self) -> &[Hole];
    fn ctp_count(&self) -> usize;
    fn flag_policy(&self) -> FlagPolicy;
    fn strict_starts(&self) -> bool;
    fn max_tag(&self) -> u32;
    /// Score sheet CSV; `None` plans flags only.
    fn scores_path(&self) -> Option<&str>;
    fn snapshot_key(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    /// Archive name when the export is zipped.
    fn archive_name(&self) -> Option<&str>;
}

pub trait Pipeline {
    fn extract(&mut self) -> Result<NightInput>;
    fn transform(&mut self, input: NightInput) -> Result<NightResult>;
    fn load(&mut self, result: &NightResult) -> Result<String>;
}
