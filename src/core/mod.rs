pub mod bot;
pub mod extractor;
pub mod formatter;
#[cfg(test)]
pub(crate) mod testing;
pub mod writer;

pub use crate::domain::model::{OutputFormat, PersonResult, RunOptions};
pub use crate::domain::ports::{Browser, BrowserSession};
pub use crate::utils::error::Result;
