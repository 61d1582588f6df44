use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Hole {hole} in '{field}' is outside the course (1..={total_holes})")]
    InvalidHoleRange {
        field: String,
        hole: u32,
        total_holes: u32,
    },

    #[error("Groups '{first}' and '{second}' both start on hole {hole}")]
    DuplicateStartingHole {
        hole: u32,
        first: String,
        second: String,
    },

    #[error("Missing raw scores for: {}", .players.join(", "))]
    IncompleteScores { players: Vec<String> },

    #[error("Tag {tag} for player '{player}' is outside 1..={max_tag}")]
    InvalidTagNumber {
        player: String,
        tag: u32,
        max_tag: u32,
    },

    #[error("Player name '{name}' appears more than once")]
    DuplicatePlayerName { name: String },

    #[error("Tag {tag} is claimed by both '{holder}' and '{claimant}'")]
    DuplicateTag {
        tag: u32,
        holder: String,
        claimant: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Format,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LeagueError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LeagueError::IoError(_) | LeagueError::ZipError(_) => ErrorCategory::Io,
            LeagueError::CsvError(_) | LeagueError::SerializationError(_) => ErrorCategory::Format,
            LeagueError::ConfigError { .. }
            | LeagueError::ConfigValidationError { .. }
            | LeagueError::InvalidConfigValueError { .. }
            | LeagueError::MissingConfigError { .. } => ErrorCategory::Configuration,
            LeagueError::ValidationError { .. }
            | LeagueError::InvalidHoleRange { .. }
            | LeagueError::DuplicateStartingHole { .. }
            | LeagueError::IncompleteScores { .. }
            | LeagueError::InvalidTagNumber { .. }
            | LeagueError::DuplicatePlayerName { .. }
            | LeagueError::DuplicateTag { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LeagueError::DuplicateStartingHole { .. } | LeagueError::IncompleteScores { .. } => {
                ErrorSeverity::Medium
            }
            LeagueError::IoError(_) | LeagueError::ZipError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LeagueError::IoError(e) => format!("Could not read or write a file: {}", e),
            LeagueError::ZipError(e) => format!("Could not build the export archive: {}", e),
            LeagueError::CsvError(e) => format!("The score sheet could not be read: {}", e),
            LeagueError::SerializationError(e) => {
                format!("The saved roster could not be read: {}", e)
            }
            LeagueError::IncompleteScores { players } => format!(
                "Enter a raw score for every player before finalizing tags ({} missing)",
                players.len()
            ),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LeagueError::IoError(_) => "Check that the paths exist and are writable",
            LeagueError::ZipError(_) => "Disable output compression or free up disk space",
            LeagueError::CsvError(_) => {
                "Use the header 'name,handicap,tag_in,score' and leave unknown cells blank"
            }
            LeagueError::SerializationError(_) => {
                "Delete or repair the snapshot file; it will be recreated on the next save"
            }
            LeagueError::ConfigError { .. }
            | LeagueError::ConfigValidationError { .. }
            | LeagueError::InvalidConfigValueError { .. }
            | LeagueError::MissingConfigError { .. } => {
                "Review the configuration file against league-night.example.toml"
            }
            LeagueError::ValidationError { .. } => "Correct the input and run again",
            LeagueError::InvalidHoleRange { .. } => {
                "Hole numbers start at 1 and cannot exceed course.total_holes"
            }
            LeagueError::DuplicateStartingHole { .. } => {
                "Give every group its own starting hole, or set course.strict_starts = false"
            }
            LeagueError::IncompleteScores { .. } => "Fill in the score column for every player",
            LeagueError::InvalidTagNumber { .. } => {
                "Leave the tag_in cell blank for players without a tag"
            }
            LeagueError::DuplicatePlayerName { .. } => {
                "Player names are matched against the roster; make them unique"
            }
            LeagueError::DuplicateTag { .. } => {
                "Each tag has one holder; check the tag_in column against the saved roster"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
