use thiserror::Error;

/// Core errors for the metrics collector
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to collect {category} metrics: {source}")]
    Collection {
        category: String,
        #[source]
        source: Box<CoreError>,
    },

    #[error("Metric source unavailable ({path}): {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("System information error: {0}")]
    SystemInfo(String),

    #[error("Series name must not be empty")]
    EmptySeriesName,

    #[error("Row has {actual} values but series {series} has {expected} columns")]
    RowWidth {
        series: String,
        expected: usize,
        actual: usize,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Feature not supported on this platform: {0}")]
    UnsupportedPlatform(String),

    #[cfg(all(target_os = "linux", feature = "linux_procfs"))]
    #[error("Procfs error: {0}")]
    Procfs(#[from] procfs::ProcError),
}

pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Wrap a source failure with the metric category it was collecting.
    pub fn collection<S: Into<String>>(category: S, source: CoreError) -> Self {
        Self::Collection {
            category: category.into(),
            source: Box::new(source),
        }
    }

    pub fn source_unavailable<S: Into<String>>(path: S, source: std::io::Error) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    pub fn system_info<S: Into<String>>(msg: S) -> Self {
        Self::SystemInfo(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn unsupported_platform<S: Into<String>>(msg: S) -> Self {
        Self::UnsupportedPlatform(msg.into())
    }

    /// Category name for collection failures, `None` for every other kind.
    pub fn category(&self) -> Option<&str> {
        match self {
            Self::Collection { category, .. } => Some(category),
            _ => None,
        }
    }
}
