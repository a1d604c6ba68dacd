#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod model;

pub use config::{ConfigError, LearningConfig};
pub use error::Error;
