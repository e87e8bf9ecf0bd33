use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Browser session could not be started: {0}")]
    SessionError(#[from] fantoccini::error::NewSessionError),

    #[error("Browser command failed: {0}")]
    BrowserError(#[from] fantoccini::error::CmdError),

    #[error("Element not found: {locator}")]
    ElementNotFound { locator: String },

    #[error("Browser capability query failed: {message}")]
    CapabilityError { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid date range: {end} precedes {start}")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("Nothing to write: {message}")]
    EmptyOutput { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Browser,
    Configuration,
    Data,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScraperError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScraperError::SessionError(_)
            | ScraperError::BrowserError(_)
            | ScraperError::ElementNotFound { .. }
            | ScraperError::CapabilityError { .. } => ErrorCategory::Browser,
            ScraperError::ConfigError { .. } | ScraperError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            ScraperError::InvalidDateRange { .. } | ScraperError::EmptyOutput { .. } => {
                ErrorCategory::Data
            }
            ScraperError::CsvError(_)
            | ScraperError::IoError(_)
            | ScraperError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ScraperError::ElementNotFound { .. }
            | ScraperError::CapabilityError { .. }
            | ScraperError::InvalidDateRange { .. } => ErrorSeverity::Low,
            ScraperError::BrowserError(_) | ScraperError::EmptyOutput { .. } => {
                ErrorSeverity::Medium
            }
            ScraperError::CsvError(_)
            | ScraperError::SerializationError(_)
            | ScraperError::ConfigError { .. }
            | ScraperError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            ScraperError::SessionError(_) | ScraperError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScraperError::SessionError(_) => {
                "Could not start a browser session. Is a WebDriver server running?".to_string()
            }
            ScraperError::EmptyOutput { .. } => {
                "No results were collected, so there is nothing to write.".to_string()
            }
            ScraperError::IoError(e) => format!("Could not write the output file: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Browser => {
                "Start chromedriver (port 9515) or geckodriver (port 4444) and check --webdriver-url"
            }
            ErrorCategory::Configuration => "Check the command line flags and the TOML settings file",
            ErrorCategory::Data => "Pass at least one scientist name or pick the txt/json format",
            ErrorCategory::Output => "Check that the output path is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScraperError>;
