use crate::core::extractor::PersonExtractor;
use crate::core::writer::OutputWriter;
use crate::domain::model::{PersonResult, RunOptions};
use crate::domain::ports::Browser;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::io::Write;
use std::path::PathBuf;

/// Runs the extractor over every requested name and hands the results to
/// the output writer.
pub struct ScientistBot<B: Browser> {
    bot_name: String,
    extractor: PersonExtractor<B>,
    writer: OutputWriter,
    monitor: SystemMonitor,
}

impl<B: Browser> ScientistBot<B> {
    pub fn new(bot_name: impl Into<String>, extractor: PersonExtractor<B>) -> Self {
        Self {
            bot_name: bot_name.into(),
            extractor,
            writer: OutputWriter::new(),
            monitor: SystemMonitor::default(),
        }
    }

    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        self.monitor = SystemMonitor::new(enabled);
        self
    }

    pub fn with_writer(mut self, writer: OutputWriter) -> Self {
        self.writer = writer;
        self
    }

    /// Asks a short-lived headless browser which browser it is.
    pub async fn browser_name(&self) -> String {
        let browser = self.extractor.browser();
        let fallback = browser.configured_name().to_string();

        let mut session = match browser.open(true).await {
            Ok(session) => session,
            Err(e) => {
                tracing::debug!("Browser name lookup failed: {}", e);
                return fallback;
            }
        };
        let name = session.browser_name().await;
        if let Err(e) = session.close().await {
            tracing::warn!("Failed to close browser session: {}", e);
        }

        name.unwrap_or_else(|e| {
            tracing::debug!("Browser name lookup failed: {}", e);
            fallback
        })
    }

    pub async fn run<W: Write>(
        &self,
        names: &[String],
        options: &RunOptions,
        console: &mut W,
    ) -> Result<Option<PathBuf>> {
        if !options.silent {
            self.say_hello(console)?;
        }

        let browser_name = if options.silent || names.is_empty() {
            None
        } else {
            Some(self.browser_name().await)
        };

        let mut people: Vec<PersonResult> = Vec::with_capacity(names.len());
        for name in names {
            if let Some(browser_name) = &browser_name {
                explain_functionality(console, name, browser_name)?;
            }

            tracing::info!("🔍 Looking up {}", name);
            let result = self.extractor.extract(name).await;
            if result.found {
                tracing::info!("✅ Found {}", name);
            } else {
                tracing::warn!("❌ {} not found: {}", name, result.errors.join("; "));
            }
            self.monitor.log_stats(&format!("After {}", name));

            people.push(result);
        }

        let written = self.writer.write(
            console,
            &people,
            options.format,
            options.output_path.as_deref(),
            options.silent,
        )?;

        self.monitor.log_final_stats();

        if !options.silent {
            writeln!(console, "Goodbye!\n")?;
        }

        Ok(written)
    }

    fn say_hello<W: Write>(&self, console: &mut W) -> Result<()> {
        writeln!(console, "Hello, my name is {}.\n", self.bot_name)?;
        Ok(())
    }
}

fn explain_functionality<W: Write>(console: &mut W, name: &str, browser_name: &str) -> Result<()> {
    writeln!(
        console,
        "To obtain the information about {name} I'll open a web browser and search Wikipedia for you.\n\
         Then I'll show the birth date, the death date (if any), the age and the first paragraph of the article.\n\
         The steps are:\n\
         1. Open the {browser_name} browser and navigate to Wikipedia.\n\
         2. Search for {name}.\n\
         3. Look for the required information on the {name} page.\n\
         4. Close the browser.\n\
         5. Output the collected information in this terminal.\n"
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{FakeBrowser, FakePage};
    use crate::domain::model::OutputFormat;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn bot(page: FakePage) -> (ScientistBot<FakeBrowser>, FakeBrowser) {
        let browser = FakeBrowser::new(page);
        let handle = browser.clone();
        let extractor = PersonExtractor::new(browser, "https://en.wikipedia.org/", true);
        let writer = OutputWriter::with_today(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        (ScientistBot::new("Testerson", extractor).with_writer(writer), handle)
    }

    #[tokio::test]
    async fn test_run_prints_greeting_and_records() {
        let (bot, browser) = bot(FakePage::einstein());
        let options = RunOptions::default();
        let mut console = Vec::new();

        let written = bot
            .run(&["Albert Einstein".to_string()], &options, &mut console)
            .await
            .unwrap();

        assert!(written.is_none());
        let printed = String::from_utf8(console).unwrap();
        assert!(printed.starts_with("Hello, my name is Testerson.\n"));
        assert!(printed.contains("1. Open the chrome browser and navigate to Wikipedia."));
        assert!(printed.contains("Age: 76"));
        assert!(printed.trim_end().ends_with("Goodbye!"));

        // one session for the browser name, one for the lookup
        assert_eq!(browser.opened(), 2);
        assert_eq!(browser.closed(), 2);
    }

    #[tokio::test]
    async fn test_run_silent_writes_file_only() {
        let dir = TempDir::new().unwrap();
        let (bot, browser) = bot(FakePage::einstein());
        let options = RunOptions {
            silent: true,
            output_path: Some(dir.path().join("people")),
            format: OutputFormat::Json,
        };
        let mut console = Vec::new();

        let written = bot
            .run(&["Albert Einstein".to_string()], &options, &mut console)
            .await
            .unwrap()
            .unwrap();

        assert!(console.is_empty());
        assert_eq!(written, dir.path().join("people.json"));
        assert_eq!(browser.opened(), 1);

        let records: Vec<PersonResult> =
            serde_json::from_str(&std::fs::read_to_string(&written).unwrap()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].age, Some(76));
    }

    #[tokio::test]
    async fn test_run_keeps_going_after_failed_lookup() {
        let (bot, _) = bot(FakePage::einstein());
        let dir = TempDir::new().unwrap();
        let options = RunOptions {
            silent: true,
            output_path: Some(dir.path().join("out.json")),
            format: OutputFormat::Json,
        };
        let names = vec!["Fake Doctorine".to_string(), "Albert Einstein".to_string()];

        let written = bot
            .run(&names, &options, &mut Vec::new())
            .await
            .unwrap()
            .unwrap();

        let records: Vec<PersonResult> =
            serde_json::from_str(&std::fs::read_to_string(written).unwrap()).unwrap();
        assert_eq!(records[0].name, "Fake Doctorine");
        assert!(!records[0].found);
        assert_eq!(records[0].errors, vec!["Scientist not found".to_string()]);
        assert_eq!(records[1].name, "Albert Einstein");
        assert!(records[1].found);
    }

    #[tokio::test]
    async fn test_run_empty_csv_is_fatal() {
        let dir = TempDir::new().unwrap();
        let (bot, _) = bot(FakePage::einstein());
        let options = RunOptions {
            silent: true,
            output_path: Some(dir.path().join("empty.csv")),
            format: OutputFormat::Csv,
        };

        let result = bot.run(&[], &options, &mut Vec::new()).await;

        assert!(result.is_err());
        assert!(!dir.path().join("empty.csv").exists());
    }

    #[tokio::test]
    async fn test_browser_name_falls_back_to_configured() {
        let page = FakePage {
            browser_name: None,
            ..FakePage::einstein()
        };
        let (bot, browser) = bot(page);

        assert_eq!(bot.browser_name().await, "chrome");
        assert_eq!(browser.closed(), 1);
    }
}
