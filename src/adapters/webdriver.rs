use crate::config::toml_config::{BrowserKind, TomlConfig};
use crate::domain::ports::{Browser, BrowserSession};
use crate::utils::error::{Result, ScraperError};
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{json, Map, Value};
use std::time::Duration;

/// Opens sessions against a running WebDriver server (chromedriver, geckodriver).
#[derive(Debug, Clone)]
pub struct WebDriverBrowser {
    webdriver_url: String,
    kind: BrowserKind,
    implicit_wait: Duration,
}

impl WebDriverBrowser {
    pub fn new(webdriver_url: impl Into<String>, kind: BrowserKind, implicit_wait: Duration) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            kind,
            implicit_wait,
        }
    }

    pub fn from_config(config: &TomlConfig) -> Self {
        Self::new(
            config.browser.webdriver_url.clone(),
            config.browser.kind,
            config.implicit_wait(),
        )
    }

    fn capabilities(&self, headless: bool) -> Map<String, Value> {
        build_capabilities(self.kind, headless)
    }
}

pub(crate) fn build_capabilities(kind: BrowserKind, headless: bool) -> Map<String, Value> {
    let mut caps = Map::new();
    caps.insert("browserName".to_string(), json!(kind.name()));

    match kind {
        BrowserKind::Chrome => {
            let mut args = vec!["--no-sandbox"];
            if headless {
                args.extend(["--headless=new", "--disable-gpu", "--disable-dev-shm-usage"]);
            }
            caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
        }
        BrowserKind::Firefox => {
            let args: Vec<&str> = if headless { vec!["--headless"] } else { vec![] };
            caps.insert("moz:firefoxOptions".to_string(), json!({ "args": args }));
        }
    }

    caps
}

/// Maps a `navigator.userAgent` string to the `BrowserKind` that produced it.
pub(crate) fn browser_from_user_agent(user_agent: &str) -> Option<BrowserKind> {
    if user_agent.contains("Firefox/") {
        Some(BrowserKind::Firefox)
    } else if user_agent.contains("Chrome/") {
        // 也涵蓋 HeadlessChrome/
        Some(BrowserKind::Chrome)
    } else {
        None
    }
}

#[async_trait]
impl Browser for WebDriverBrowser {
    async fn open(&self, headless: bool) -> Result<Box<dyn BrowserSession>> {
        tracing::debug!(
            "Connecting to {} WebDriver at {} (headless: {})",
            self.kind.name(),
            self.webdriver_url,
            headless
        );

        let client = ClientBuilder::native()
            .capabilities(self.capabilities(headless))
            .connect(&self.webdriver_url)
            .await?;

        let session = WebDriverSession {
            client,
            closed: false,
        };
        let timeouts = TimeoutConfiguration::new(None, None, Some(self.implicit_wait));
        if let Err(e) = session.client.update_timeouts(timeouts).await {
            // 設定失敗時不留下孤兒瀏覽器
            let _ = session.client.clone().close().await;
            return Err(e.into());
        }

        Ok(Box::new(session))
    }

    fn configured_name(&self) -> &str {
        self.kind.name()
    }
}

pub struct WebDriverSession {
    client: Client,
    closed: bool,
}

impl WebDriverSession {
    async fn find(&self, locator: &str) -> Result<Element> {
        self.client
            .find(Locator::XPath(locator))
            .await
            .map_err(|e| match e {
                e if e.is_no_such_element() => ScraperError::ElementNotFound {
                    locator: locator.to_string(),
                },
                other => ScraperError::BrowserError(other),
            })
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    async fn goto(&mut self, url: &str) -> Result<()> {
        self.client.goto(url).await?;
        Ok(())
    }

    async fn input_text(&mut self, locator: &str, text: &str) -> Result<()> {
        let input = self.find(locator).await?;
        input.clear().await?;
        input.send_keys(text).await?;
        Ok(())
    }

    async fn click(&mut self, locator: &str) -> Result<()> {
        let button = self.find(locator).await?;
        button.click().await?;
        Ok(())
    }

    async fn current_url(&mut self) -> Result<String> {
        Ok(self.client.current_url().await?.to_string())
    }

    async fn text(&mut self, locator: &str) -> Result<String> {
        let element = self.find(locator).await?;
        Ok(element.text().await?)
    }

    async fn text_contents(&mut self, locator: &str) -> Result<Vec<String>> {
        let elements = self.client.find_all(Locator::XPath(locator)).await?;
        let mut contents = Vec::with_capacity(elements.len());
        for element in elements {
            contents.push(element.prop("textContent").await?.unwrap_or_default());
        }
        Ok(contents)
    }

    async fn browser_name(&mut self) -> Result<String> {
        let user_agent = self
            .client
            .execute("return navigator.userAgent;", vec![])
            .await?;
        let user_agent = user_agent.as_str().unwrap_or_default();
        tracing::debug!("User agent: {}", user_agent);

        browser_from_user_agent(user_agent)
            .map(|kind| kind.name().to_string())
            .ok_or_else(|| ScraperError::CapabilityError {
                message: format!("Unrecognised user agent: {}", user_agent),
            })
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.client.clone().close().await?;
        Ok(())
    }
}
