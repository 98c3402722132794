use thiserror::Error;

/// Errors raised while rendering series or writing them to the sink
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid sink host {host:?}: {reason}")]
    InvalidHost { host: String, reason: String },

    #[error("Failed to connect to sink at {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Sink rejected write of {series} series: status={status}, body={body}")]
    Write {
        series: usize,
        status: u16,
        body: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    pub fn invalid_host<H: Into<String>, R: Into<String>>(host: H, reason: R) -> Self {
        Self::InvalidHost {
            host: host.into(),
            reason: reason.into(),
        }
    }
}
