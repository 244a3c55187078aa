/// Boxed cause carried by wrapped failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("Invalid resource: {locator}: {source}")]
    InvalidResource {
        locator: String,
        #[source]
        source: BoxError,
    },
    #[error("Invalid resource location: {0}")]
    InvalidLocation(String),
    #[error("Only the firstborn may create siblings (loader {id})")]
    NotFirstborn { id: u32 },
    #[error("Loader {id} has no parent loader to join")]
    NoParent { id: u32 },
    #[error("Compiled unit not found: {0}")]
    UnitNotFound(String),
    #[error("Unable to materialize {name}: {source}")]
    Materialize {
        name: String,
        #[source]
        source: BoxError,
    },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LoaderError {
    pub fn invalid_resource(locator: impl ToString, source: impl Into<BoxError>) -> Self {
        LoaderError::InvalidResource {
            locator: locator.to_string(),
            source: source.into(),
        }
    }

    /// True for the "looked everywhere, found nothing" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoaderError::UnitNotFound(_))
    }
}

pub type LoaderResult<T> = std::result::Result<T, LoaderError>;
