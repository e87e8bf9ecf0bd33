use crate::domain::model::PersonResult;
use crate::domain::ports::{Browser, BrowserSession};
use crate::utils::dates::parse_date;
use crate::utils::error::{Result, ScraperError};
use crate::utils::text::clean_extra_spaces;
use chrono::{Local, NaiveDate};

pub const SEARCH_INPUT_XPATH: &str = "//input[@id='searchInput']";
pub const SEARCH_BUTTON_XPATH: &str = "//button[text()='Search']";
pub const FIRST_PARAGRAPH_XPATH: &str =
    "//div[@class='mw-parser-output']/p[not(@class='mw-empty-elt')][1]";

pub const SEARCH_NOT_FOUND: &str = "Search bar or button not found, possible layout problem";
pub const SCIENTIST_NOT_FOUND: &str = "Scientist not found";
pub const PARAGRAPH_NOT_FOUND: &str = "First paragraph not found, check xpath locator and layout";
pub const INVALID_LIFESPAN: &str = "Death date precedes birth date, age not computed";

const ASCII_UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ASCII_LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// XPath of every `span` in the biography infobox row whose header reads
/// `identifier` ("Born", "Died", ...), compared case-insensitively and with
/// surrounding whitespace ignored.
pub fn biography_row_xpath(identifier: &str) -> String {
    format!(
        r#"//table[@class="infobox biography vcard"]/tbody/tr/th[translate(normalize-space(text()), "{}", "{}")="{}"]/..//span"#,
        ASCII_UPPERCASE,
        ASCII_LOWERCASE,
        identifier.to_lowercase()
    )
}

/// True when at least one space separated part of `name` appears in `url`.
pub fn url_contains_name(name: &str, url: &str) -> bool {
    let url = url.to_lowercase();
    clean_extra_spaces(name)
        .split(' ')
        .filter(|part| !part.is_empty())
        .any(|part| url.contains(&part.to_lowercase()))
}

/// Whole years between `birth` and `death` (or `today`), counted as
/// `floor(days / 365)`.
pub fn calculate_age(birth: NaiveDate, death: Option<NaiveDate>, today: NaiveDate) -> Result<u32> {
    let end = death.unwrap_or(today);
    if end < birth {
        return Err(ScraperError::InvalidDateRange { start: birth, end });
    }
    let days = (end - birth).num_days();
    Ok((days / 365) as u32)
}

/// Looks up one person on the encyclopedia through a fresh browser session.
pub struct PersonExtractor<B: Browser> {
    browser: B,
    base_url: String,
    headless: bool,
}

impl<B: Browser> PersonExtractor<B> {
    pub fn new(browser: B, base_url: impl Into<String>, headless: bool) -> Self {
        Self {
            browser,
            base_url: base_url.into(),
            headless,
        }
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    /// Never fails: every problem ends up in `PersonResult::errors`.
    pub async fn extract(&self, name: &str) -> PersonResult {
        let mut result = PersonResult::new(name);

        let mut session = match self.browser.open(self.headless).await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Could not open browser for '{}': {}", name, e);
                result.push_error(format!("Browser could not be opened: {}", e));
                return result;
            }
        };

        self.scrape(session.as_mut(), &mut result).await;

        // 無論 scrape 從哪裡返回都要關閉瀏覽器
        if let Err(e) = session.close().await {
            tracing::warn!("Failed to close browser session for '{}': {}", name, e);
        }

        result
    }

    async fn scrape(&self, session: &mut dyn BrowserSession, result: &mut PersonResult) {
        if let Err(e) = session.goto(&self.base_url).await {
            tracing::warn!("Could not reach {}: {}", self.base_url, e);
            result.push_error(format!("Search page could not be reached: {}", e));
            return;
        }

        if let Err(e) = search(session, &result.name).await {
            tracing::debug!("Search failed for '{}': {}", result.name, e);
            result.push_error(SEARCH_NOT_FOUND);
            return;
        }

        let landing_url = match session.current_url().await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Could not read landing page URL: {}", e);
                String::new()
            }
        };
        tracing::debug!("Landing page for '{}': {}", result.name, landing_url);

        if !url_contains_name(&result.name, &landing_url) {
            result.push_error(SCIENTIST_NOT_FOUND);
            return;
        }

        result.found = true;

        match session.text(FIRST_PARAGRAPH_XPATH).await {
            Ok(paragraph) => result.first_paragraph = Some(paragraph),
            Err(e) => {
                tracing::debug!("First paragraph lookup failed: {}", e);
                result.push_error(PARAGRAPH_NOT_FOUND);
            }
        }

        let death_date = extract_date(session, "died").await;
        result.death_date = death_date;

        if let Some(birth_date) = extract_date(session, "born").await {
            result.birth_date = Some(birth_date);
            match calculate_age(birth_date, death_date, Local::now().date_naive()) {
                Ok(age) => result.age = Some(age),
                Err(e) => {
                    tracing::warn!("{}: {}", result.name, e);
                    result.push_error(INVALID_LIFESPAN);
                }
            }
        }
    }
}

async fn search(session: &mut dyn BrowserSession, name: &str) -> Result<()> {
    session.input_text(SEARCH_INPUT_XPATH, name).await?;
    session.click(SEARCH_BUTTON_XPATH).await
}

/// Parses the first span of the infobox row; a missing row is not an error.
async fn extract_date(session: &mut dyn BrowserSession, identifier: &str) -> Option<NaiveDate> {
    match session.text_contents(&biography_row_xpath(identifier)).await {
        Ok(contents) => contents.first().and_then(|text| parse_date(text)),
        Err(e) => {
            tracing::warn!("Lookup of '{}' row failed: {}", identifier, e);
            None
        }
    }
}
