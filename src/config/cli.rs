use crate::domain::model::{FlagPolicy, Group, Hole, DEFAULT_TOTAL_HOLES, MAX_TAG};
use crate::domain::roster::DEFAULT_SNAPSHOT_KEY;
use crate::utils::error::{LeagueError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, validate_range, Validate};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "league-night")]
#[command(about = "CTP flag duties and bag tag redistribution for league night")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Write logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Assign bring-out and pick-up duties for the CTP flags
    Flags(FlagsArgs),
    /// Rank a score sheet and hand out bag tags
    Tags(TagsArgs),
}

#[derive(Debug, Clone, Args)]
pub struct FlagsArgs {
    /// Starting hole of each group, in group order
    #[arg(long, value_delimiter = ',', required = true)]
    pub starts: Vec<Hole>,

    /// CTP holes
    #[arg(long, value_delimiter = ',')]
    pub ctps: Vec<Hole>,

    /// Group names, matched to --starts by position
    #[arg(long, value_delimiter = ',')]
    pub names: Vec<String>,

    #[arg(long, default_value_t = DEFAULT_TOTAL_HOLES)]
    pub holes: u32,

    /// Required number of distinct CTP holes; 0 takes --ctps as given
    #[arg(long, default_value_t = 0)]
    pub ctp_count: usize,

    #[arg(long, value_enum, default_value_t = FlagPolicy::Positional)]
    pub policy: FlagPolicy,

    /// Seed for the load-balanced shuffle and random CTP holes
    #[arg(long)]
    pub seed: Option<u64>,

    /// Refuse groups that share a starting hole
    #[arg(long)]
    pub strict_starts: bool,

    /// Print CSV instead of a table
    #[arg(long)]
    pub csv: bool,
}

#[derive(Debug, Clone, Args)]
pub struct TagsArgs {
    /// Score sheet with header name,handicap,tag_in,score
    #[arg(long)]
    pub scores: String,

    /// Key-value file holding the roster snapshot
    #[arg(long)]
    pub snapshot: Option<String>,

    #[arg(long, default_value = DEFAULT_SNAPSHOT_KEY)]
    pub key: String,

    /// Save the new tags back to the snapshot
    #[arg(long, requires = "snapshot")]
    pub save: bool,

    #[arg(long, default_value_t = MAX_TAG)]
    pub max_tag: u32,

    /// Print CSV instead of the ranked list
    #[arg(long)]
    pub csv: bool,
}

impl FlagsArgs {
    /// Groups named from --names, or "Group N" where a name is missing.
    pub fn groups(&self) -> Vec<Group> {
        self.starts
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let name = self
                    .names
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("Group {}", i + 1));
                Group::new(name, start)
            })
            .collect()
    }
}

impl Validate for FlagsArgs {
    fn validate(&self) -> Result<()> {
        validate_positive_number("holes", self.holes as usize, 1)?;
        if self.ctps.is_empty() && self.ctp_count == 0 {
            return Err(LeagueError::MissingConfigError {
                field: "ctps".to_string(),
            });
        }
        if self.names.len() > self.starts.len() {
            return Err(LeagueError::InvalidConfigValueError {
                field: "names".to_string(),
                value: self.names.join(","),
                reason: format!("{} names for {} groups", self.names.len(), self.starts.len()),
            });
        }
        Ok(())
    }
}

impl Validate for TagsArgs {
    fn validate(&self) -> Result<()> {
        validate_path("scores", &self.scores)?;
        if let Some(snapshot) = &self.snapshot {
            validate_path("snapshot", snapshot)?;
        }
        validate_range("max_tag", self.max_tag, 1, MAX_TAG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags_command() {
        let config = CliConfig::parse_from([
            "league-night",
            "flags",
            "--starts",
            "1,7,13,19",
            "--ctps",
            "4",
            "--names",
            "Aces,Birdies",
            "--policy",
            "load-balanced",
        ]);

        match config.command {
            Command::Flags(args) => {
                assert_eq!(args.starts, vec![1, 7, 13, 19]);
                assert_eq!(args.policy, FlagPolicy::LoadBalanced);
                assert_eq!(args.holes, 24);
                let groups = args.groups();
                assert_eq!(groups[1].name, "Birdies");
                assert_eq!(groups[2].name, "Group 3");
                assert!(args.validate().is_ok());
            }
            other => panic!("expected flags command, got {:?}", other),
        }
    }

    #[test]
    fn test_flags_without_ctps_is_invalid() {
        let config = CliConfig::parse_from(["league-night", "flags", "--starts", "1"]);
        let Command::Flags(args) = config.command else {
            panic!("expected flags command");
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_max_tag_is_capped() {
        let config =
            CliConfig::parse_from(["league-night", "tags", "--scores", "s.csv", "--max-tag", "50"]);
        let Command::Tags(args) = config.command else {
            panic!("expected tags command");
        };
        assert!(args.validate().is_ok());

        let config =
            CliConfig::parse_from(["league-night", "tags", "--scores", "s.csv", "--max-tag", "76"]);
        let Command::Tags(args) = config.command else {
            panic!("expected tags command");
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_save_requires_snapshot() {
        let parsed = CliConfig::try_parse_from(["league-night", "tags", "--scores", "s.csv", "--save"]);
        assert!(parsed.is_err());
    }
}
