use super::toml_config::TomlConfig;
use crate::domain::model::{OutputFormat, RunOptions};
use crate::utils::error::{Result, ScraperError};
use crate::utils::text::parse_names;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "scientist-bot")]
#[command(about = "Retrieve information about scientists from Wikipedia.")]
pub struct CliConfig {
    /// The scientists to search for separated by comma ',' i.e. 'Albert Einstein, Isaac Newton, Marie Curie'
    pub scientists: String,

    /// Run the browser in headless mode
    #[arg(short = 'H', long)]
    pub headless: bool,

    /// Run bot in silent mode (no terminal output)
    #[arg(short = 'S', long)]
    pub silent: bool,

    /// Path for a file to output the results to
    #[arg(short = 'o', long = "output_path", visible_alias = "output-path")]
    pub output_path: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Path to a TOML settings file
    #[arg(short = 'c', long)]
    pub config: Option<String>,

    /// WebDriver endpoint, overrides the settings file
    #[arg(long)]
    pub webdriver_url: Option<String>,

    #[arg(short = 'v', long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage after each scientist")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// Requested names, de-duplicated in the order given.
    pub fn scientist_names(&self) -> Vec<String> {
        parse_names(&self.scientists)
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            silent: self.silent,
            output_path: self.output_path.as_ref().map(PathBuf::from),
            format: self.format,
        }
    }

    /// Loads the settings file (or defaults) and applies command line overrides.
    pub fn load_settings(&self) -> Result<TomlConfig> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(url) = &self.webdriver_url {
            tracing::debug!("🔧 WebDriver URL overridden to: {}", url);
            settings.browser.webdriver_url = url.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.scientist_names().is_empty() {
            return Err(ScraperError::InvalidConfigValueError {
                field: "scientists".to_string(),
                value: self.scientists.clone(),
                reason: "At least one scientist name is required".to_string(),
            });
        }

        if let Some(path) = &self.output_path {
            validation::validate_path("output_path", path)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_silent_and_headless() {
        let config =
            CliConfig::try_parse_from(["scientist-bot", "Albert Einstein", "-H", "-S", "-f", "txt"])
                .unwrap();

        assert!(config.headless);
        assert!(config.silent);
        assert_eq!(config.format, OutputFormat::Txt);
        assert_eq!(config.scientist_names(), vec!["Albert Einstein"]);
        assert!(config.run_options().output_path.is_none());
    }

    #[test]
    fn test_parse_output_path_and_dedupe_names() {
        let config = CliConfig::try_parse_from([
            "scientist-bot",
            "Albert Einstein,   Albert   Einstein, Fake  Doctorine   ",
            "--output_path",
            "/tmp/output.txt",
            "--format",
            "txt",
        ])
        .unwrap();

        assert!(!config.headless);
        assert!(!config.silent);
        assert_eq!(
            config.scientist_names(),
            vec!["Albert Einstein", "Fake Doctorine"]
        );
        assert_eq!(
            config.run_options().output_path,
            Some(PathBuf::from("/tmp/output.txt"))
        );
        assert!(!config.log_json);

        let config = CliConfig::try_parse_from([
            "scientist-bot",
            "Marie Curie",
            "--output-path",
            "results/curie",
            "--log-json",
        ])
        .unwrap();

        assert!(config.log_json);
        assert_eq!(
            config.run_options().output_path,
            Some(PathBuf::from("results/curie"))
        );
    }

    #[test]
    fn test_format_defaults_to_csv() {
        let config = CliConfig::try_parse_from(["scientist-bot", "Marie Curie"]).unwrap();
        assert_eq!(config.format, OutputFormat::Csv);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = CliConfig::try_parse_from(["scientist-bot", "Marie Curie", "-f", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_names_fail_validation() {
        let config = CliConfig::try_parse_from(["scientist-bot", " , ,"]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_webdriver_url_override() {
        let mut settings_file = NamedTempFile::new().unwrap();
        settings_file
            .write_all(b"[browser]\nwebdriver_url = \"http://localhost:4444\"\n")
            .unwrap();

        let path = settings_file.path().to_str().unwrap();
        let config = CliConfig::try_parse_from([
            "scientist-bot",
            "Marie Curie",
            "--config",
            path,
            "--webdriver-url",
            "http://grid:4444",
        ])
        .unwrap();

        let settings = config.load_settings().unwrap();
        assert_eq!(settings.browser.webdriver_url, "http://grid:4444");
    }
}
