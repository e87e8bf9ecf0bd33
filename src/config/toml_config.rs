use crate::utils::error::{Result, ScraperError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BOT_NAME: &str = "Wilson";
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";
// 固定英文站，避免頁面混用語言
pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/";
pub const DEFAULT_IMPLICIT_WAIT_SECONDS: u64 = 3;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub bot: BotSection,
    pub browser: BrowserSection,
    pub site: SiteSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotSection {
    pub name: String,
}

impl Default for BotSection {
    fn default() -> Self {
        Self {
            name: DEFAULT_BOT_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    #[default]
    Chrome,
    Firefox,
}

impl BrowserKind {
    pub fn name(self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chrome",
            BrowserKind::Firefox => "firefox",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSection {
    pub kind: BrowserKind,
    pub webdriver_url: String,
    pub implicit_wait_seconds: u64,
}

impl Default for BrowserSection {
    fn default() -> Self {
        Self {
            kind: BrowserKind::default(),
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            implicit_wait_seconds: DEFAULT_IMPLICIT_WAIT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub base_url: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScraperError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScraperError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${WEBDRIVER_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScraperError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn implicit_wait(&self) -> Duration {
        Duration::from_secs(self.browser.implicit_wait_seconds)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("bot.name", &self.bot.name)?;
        validation::validate_url("browser.webdriver_url", &self.browser.webdriver_url)?;
        validation::validate_range(
            "browser.implicit_wait_seconds",
            self.browser.implicit_wait_seconds,
            1,
            60,
        )?;
        validation::validate_url("site.base_url", &self.site.base_url)?;
        Ok(())
    }
}
