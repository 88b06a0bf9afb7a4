pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod platform;
pub mod report;
pub mod scan;
pub mod util;

pub use error::{Error, Result};
