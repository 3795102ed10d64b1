use thiserror::Error;

/// Exit status for malformed command lines and rejected values.
pub const PARSE_FAILURE_STATUS: i32 = -1;

/// Exit status for values that parsed but failed validation.
pub const VALIDATION_FAILURE_STATUS: i32 = -2;

/// Errors that can occur while declaring, parsing or dispatching options.
///
/// Each variant maps to a process exit status through
/// [`CliError::exit_status`].
#[derive(Error, Debug)]
pub enum CliError {
    /// An option id, short flag or long flag was declared twice.
    ///
    /// Reported when the option is added, before anything is parsed.
    #[error("Duplicate option: {0}")]
    DuplicateOption(String),

    /// An option was declared without a short or long flag.
    ///
    /// Such an option would be parsed as a positional and never dispatched.
    #[error("Option '{0}' needs a short or long flag")]
    UnflaggedOption(String),

    /// The command line did not match the declared options.
    #[error(transparent)]
    Parse(#[from] clap::Error),

    /// `--help` or `--version` was requested; carries the rendered text.
    #[error("{0}")]
    Informational(String),

    /// A fetched option value could not be decoded.
    #[error("Invalid value '{value}' for '{option}': {reason}")]
    InvalidValue {
        /// Option id
        option: String,
        /// Raw value from the command line
        value: String,
        /// Decoder message
        reason: String,
    },

    /// A fetched option value decoded but was rejected by its validator.
    #[error("Value '{value}' is not accepted for '{option}'")]
    Validation {
        /// Option id
        option: String,
        /// Raw value from the command line
        value: String,
    },

    /// An option that needs a value was matched without one.
    #[error("Missing value for '{option}'")]
    MissingValue {
        /// Option id
        option: String,
    },

    /// The post-parse check rejected the parsed options.
    #[error("Options rejected after parsing")]
    Rejected,

    /// No handler is registered under the name.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// An initializer failed for a reason of its own.
    #[error("Option '{option}' failed: {details}")]
    Initializer {
        /// Option id
        option: String,
        /// Failure details
        details: String,
    },
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_status(&self) -> i32 {
        match self {
            CliError::Informational(_) => 0,
            CliError::Validation { .. } => VALIDATION_FAILURE_STATUS,
            _ => PARSE_FAILURE_STATUS,
        }
    }
}

/// One declared option that appeared on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionMatch {
    /// Option id as declared.
    pub id: String,

    /// Raw values in the order given. Empty for flags.
    pub values: Vec<String>,

    /// Position of the first occurrence among the arguments.
    pub index: usize,
}

impl OptionMatch {
    /// First raw value, if any.
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

/// Result of parsing: matched options in argument order plus leftover
/// positional inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInvocation {
    /// Options that came from the command line, ordered by first occurrence.
    pub matched: Vec<OptionMatch>,

    /// Positional arguments not consumed by any option.
    pub inputs: Vec<String>,
}
