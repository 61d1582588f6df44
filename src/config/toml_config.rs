use crate::app::export::OUTPUT_FORMATS;
use crate::domain::model::{
    FlagPolicy, Group, Hole, CANONICAL_CTP_COUNT, DEFAULT_TOTAL_HOLES, MAX_TAG,
};
use crate::domain::ports::ConfigProvider;
use crate::domain::roster::DEFAULT_SNAPSHOT_KEY;
use crate::utils::error::{LeagueError, Result};
use crate::utils::validation::{
    validate_allowed_values, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub league: LeagueInfo,
    #[serde(default)]
    pub course: CourseConfig,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub ctp: CtpConfig,
    #[serde(default)]
    pub flags: FlagsConfig,
    #[serde(default)]
    pub tags: TagsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseConfig {
    pub total_holes: Option<u32>,
    pub strict_starts: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CtpConfig {
    pub holes: Option<Vec<Hole>>,
    /// Required number of distinct holes; 0 accepts any in-range list.
    pub count: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlagsConfig {
    pub policy: Option<FlagPolicy>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagsConfig {
    pub max_tag: Option<u32>,
    pub scores_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub snapshot_file: Option<String>,
    pub snapshot_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: String,
}

const EMPTY_HOLES: &[Hole] = &[];

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LeagueError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LeagueError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SCORES_FILE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LeagueError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("league.name", &self.league.name)?;
        validate_positive_number("course.total_holes", self.total_holes() as usize, 1)?;
        validate_range("tags.max_tag", self.max_tag(), 1, MAX_TAG)?;

        if self.groups.is_empty() {
            return Err(LeagueError::MissingConfigError {
                field: "groups".to_string(),
            });
        }
        for group in &self.groups {
            validate_non_empty_string("groups.name", &group.name)?;
            validate_range("groups.start", group.start, 1, self.total_holes())?;
        }

        if let Some(scores) = &self.tags.scores_file {
            validate_path("tags.scores_file", scores)?;
        }
        validate_path("storage.snapshot_file", self.snapshot_file())?;
        validate_non_empty_string("storage.snapshot_key", self.snapshot_key())?;
        validate_path("output.path", &self.output.path)?;
        validate_allowed_values("output.formats", &self.output.formats, &OUTPUT_FORMATS)?;

        if let Some(compression) = &self.output.compression {
            if compression.enabled {
                validate_path("output.compression.filename", &compression.filename)?;
            }
        }

        Ok(())
    }

    pub fn total_holes(&self) -> u32 {
        self.course.total_holes.unwrap_or(DEFAULT_TOTAL_HOLES)
    }

    pub fn strict_starts(&self) -> bool {
        self.course.strict_starts.unwrap_or(false)
    }

    pub fn ctp_count(&self) -> usize {
        self.ctp.count.unwrap_or(CANONICAL_CTP_COUNT)
    }

    pub fn flag_policy(&self) -> FlagPolicy {
        self.flags.policy.unwrap_or_default()
    }

    pub fn seed(&self) -> Option<u64> {
        self.flags.seed
    }

    pub fn max_tag(&self) -> u32 {
        self.tags.max_tag.unwrap_or(MAX_TAG)
    }

    pub fn snapshot_file(&self) -> &str {
        self.storage
            .snapshot_file
            .as_deref()
            .unwrap_or("league-state.json")
    }

    pub fn snapshot_key(&self) -> &str {
        self.storage
            .snapshot_key
            .as_deref()
            .unwrap_or(DEFAULT_SNAPSHOT_KEY)
    }

    pub fn output_path(&self) -> &str {
        &self.output.path
    }

    pub fn compression_enabled(&self) -> bool {
        self.output
            .compression
            .as_ref()
            .map(|c| c.enabled)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn total_holes(&self) -> u32 {
        self.total_holes()
    }

    fn groups(&self) -> &[Group] {
        &self.groups
    }

    fn ctp_holes(&self) -> &[Hole] {
        self.ctp.holes.as_deref().unwrap_or(EMPTY_HOLES)
    }

    fn ctp_count(&self) -> usize {
        self.ctp_count()
    }

    fn flag_policy(&self) -> FlagPolicy {
        self.flag_policy()
    }

    fn strict_starts(&self) -> bool {
        self.strict_starts()
    }

    fn max_tag(&self) -> u32 {
        self.max_tag()
    }

    fn scores_path(&self) -> Option<&str> {
        self.tags.scores_file.as_deref()
    }

    fn snapshot_key(&self) -> &str {
        self.snapshot_key()
    }

    fn output_path(&self) -> &str {
        self.output_path()
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn archive_name(&self) -> Option<&str> {
        self.output
            .compression
            .as_ref()
            .filter(|c| c.enabled)
            .map(|c| c.filename.as_str())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[league]
name = "Tuesday Doubles"

[course]
total_holes = 24

[[groups]]
name = "Aces"
start = 1

[[groups]]
name = "Birdies"
start = 7

[ctp]
holes = [2, 4, 6, 8, 10, 12, 14, 16, 18, 20]

[flags]
policy = "load-balanced"
seed = 42

[output]
path = "./night-output"
formats = ["csv", "text"]
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.league.name, "Tuesday Doubles");
        assert_eq!(config.groups.len(), 2);
        assert_eq!(config.groups[1], Group::new("Birdies", 7));
        assert_eq!(config.flag_policy(), FlagPolicy::LoadBalanced);
        assert_eq!(config.seed(), Some(42));
        assert_eq!(ConfigProvider::ctp_holes(&config).len(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();
        assert_eq!(config.ctp_count(), 10);
        assert_eq!(config.max_tag(), 75);
        assert!(!config.strict_starts());
        assert_eq!(config.snapshot_key(), "league_players");
        assert_eq!(config.snapshot_file(), "league-state.json");
        assert_eq!(ConfigProvider::archive_name(&config), None);
        assert_eq!(ConfigProvider::scores_path(&config), None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LEAGUE_NIGHT_TEST_SCORES", "week7.csv");

        let content = format!("{}\n[tags]\nscores_file = \"${{LEAGUE_NIGHT_TEST_SCORES}}\"\n", BASIC);
        let config = TomlConfig::from_toml_str(&content).unwrap();
        assert_eq!(config.tags.scores_file.as_deref(), Some("week7.csv"));

        std::env::remove_var("LEAGUE_NIGHT_TEST_SCORES");
    }

    #[test]
    fn test_config_validation() {
        let bad_start = BASIC.replace("start = 7", "start = 30");
        let config = TomlConfig::from_toml_str(&bad_start).unwrap();
        assert!(config.validate().is_err());

        let bad_format = BASIC.replace("[\"csv\", \"text\"]", "[\"html\"]");
        let config = TomlConfig::from_toml_str(&bad_format).unwrap();
        assert!(config.validate().is_err());

        let too_many_tags = format!("{}\n[tags]\nmax_tag = 120\n", BASIC);
        let config = TomlConfig::from_toml_str(&too_many_tags).unwrap();
        assert!(matches!(
            config.validate(),
            Err(LeagueError::InvalidConfigValueError { field, .. }) if field == "tags.max_tag"
        ));
    }

    #[test]
    fn test_unknown_policy_is_a_parse_error() {
        let content = BASIC.replace("load-balanced", "fastest");
        assert!(matches!(
            TomlConfig::from_toml_str(&content),
            Err(LeagueError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.league.name, "Tuesday Doubles");
    }
}
