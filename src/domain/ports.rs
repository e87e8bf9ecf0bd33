use crate::utils::error::Result;
use async_trait::async_trait;

/// One open browser window. Locators are XPath expressions.
#[async_trait]
pub trait BrowserSession: Send {
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Clears the matched input and types `text` into it.
    async fn input_text(&mut self, locator: &str, text: &str) -> Result<()>;

    async fn click(&mut self, locator: &str) -> Result<()>;

    async fn current_url(&mut self) -> Result<String>;

    /// Visible text of the first match; `ElementNotFound` when nothing matches.
    async fn text(&mut self, locator: &str) -> Result<String>;

    /// `textContent` of every match, in document order. May be empty.
    async fn text_contents(&mut self, locator: &str) -> Result<Vec<String>>;

    /// Browser name as reported by the running browser.
    async fn browser_name(&mut self) -> Result<String>;

    async fn close(&mut self) -> Result<()>;
}

/// Opens browser sessions.
#[async_trait]
pub trait Browser: Send + Sync {
    async fn open(&self, headless: bool) -> Result<Box<dyn BrowserSession>>;

    /// Name to show when the running browser cannot be asked.
    fn configured_name(&self) -> &str;
}
