// Adapters layer: concrete implementations of the domain ports.

pub mod webdriver;

pub use webdriver::{WebDriverBrowser, WebDriverSession};
