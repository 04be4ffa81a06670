pub mod config;
pub mod cursor;
pub mod error;
pub mod report;
pub mod token;
