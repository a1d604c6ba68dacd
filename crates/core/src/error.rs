use thiserror::Error;

use crate::config::ConfigError;
use crate::model::{CatalogError, QuizError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
