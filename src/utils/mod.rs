pub mod dates;
pub mod error;
pub mod logger;
pub mod monitor;
pub mod text;
pub mod validation;
