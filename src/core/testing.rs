//! Scripted in-memory browser for unit tests.

use crate::core::extractor::{
    biography_row_xpath, FIRST_PARAGRAPH_XPATH, SEARCH_BUTTON_XPATH, SEARCH_INPUT_XPATH,
};
use crate::domain::ports::{Browser, BrowserSession};
use crate::utils::error::{Result, ScraperError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// What the fake browser shows after a search.
#[derive(Debug, Clone, Default)]
pub struct FakePage {
    pub fail_open: bool,
    pub fail_goto: bool,
    pub fail_current_url: bool,
    pub fail_input: bool,
    pub fail_click: bool,
    pub landing_url: String,
    pub paragraph: Option<String>,
    pub born: Vec<String>,
    pub died: Vec<String>,
    pub browser_name: Option<String>,
}

impl FakePage {
    pub fn einstein() -> Self {
        Self {
            landing_url: "https://en.wikipedia.org/wiki/Albert_Einstein".to_string(),
            paragraph: Some("Albert Einstein was a theoretical physicist...".to_string()),
            born: vec!["1879-03-14".to_string()],
            died: vec!["1955-04-18".to_string()],
            browser_name: Some("chrome".to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
struct Calls {
    opened: usize,
    closed: usize,
    typed: Vec<String>,
}

#[derive(Clone)]
pub struct FakeBrowser {
    page: FakePage,
    calls: Arc<Mutex<Calls>>,
}

impl FakeBrowser {
    pub fn new(page: FakePage) -> Self {
        Self {
            page,
            calls: Arc::new(Mutex::new(Calls::default())),
        }
    }

    pub fn opened(&self) -> usize {
        self.calls.lock().unwrap().opened
    }

    pub fn closed(&self) -> usize {
        self.calls.lock().unwrap().closed
    }

    pub fn typed(&self) -> Vec<String> {
        self.calls.lock().unwrap().typed.clone()
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    async fn open(&self, _headless: bool) -> Result<Box<dyn BrowserSession>> {
        if self.page.fail_open {
            return Err(ScraperError::ConfigError {
                message: "no WebDriver listening".to_string(),
            });
        }
        self.calls.lock().unwrap().opened += 1;
        Ok(Box::new(FakeSession {
            page: self.page.clone(),
            calls: Arc::clone(&self.calls),
            url: String::new(),
        }))
    }

    fn configured_name(&self) -> &str {
        "chrome"
    }
}

struct FakeSession {
    page: FakePage,
    calls: Arc<Mutex<Calls>>,
    url: String,
}

fn not_found(locator: &str) -> ScraperError {
    ScraperError::ElementNotFound {
        locator: locator.to_string(),
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn goto(&mut self, url: &str) -> Result<()> {
        if self.page.fail_goto {
            return Err(ScraperError::CapabilityError {
                message: "connection refused".to_string(),
            });
        }
        self.url = url.to_string();
        Ok(())
    }

    async fn input_text(&mut self, locator: &str, text: &str) -> Result<()> {
        if self.page.fail_input || locator != SEARCH_INPUT_XPATH {
            return Err(not_found(locator));
        }
        self.calls.lock().unwrap().typed.push(text.to_string());
        Ok(())
    }

    async fn click(&mut self, locator: &str) -> Result<()> {
        if self.page.fail_click || locator != SEARCH_BUTTON_XPATH {
            return Err(not_found(locator));
        }
        self.url = self.page.landing_url.clone();
        Ok(())
    }

    async fn current_url(&mut self) -> Result<String> {
        if self.page.fail_current_url {
            return Err(ScraperError::CapabilityError {
                message: "window closed".to_string(),
            });
        }
        Ok(self.url.clone())
    }

    async fn text(&mut self, locator: &str) -> Result<String> {
        match (&self.page.paragraph, locator == FIRST_PARAGRAPH_XPATH) {
            (Some(paragraph), true) => Ok(paragraph.clone()),
            _ => Err(not_found(locator)),
        }
    }

    async fn text_contents(&mut self, locator: &str) -> Result<Vec<String>> {
        if locator == biography_row_xpath("born") {
            Ok(self.page.born.clone())
        } else if locator == biography_row_xpath("died") {
            Ok(self.page.died.clone())
        } else {
            Ok(Vec::new())
        }
    }

    async fn browser_name(&mut self) -> Result<String> {
        self.page
            .browser_name
            .clone()
            .ok_or_else(|| ScraperError::CapabilityError {
                message: "unknown".to_string(),
            })
    }

    async fn close(&mut self) -> Result<()> {
        self.calls.lock().unwrap().closed += 1;
        Ok(())
    }
}
