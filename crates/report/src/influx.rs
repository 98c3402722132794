//! InfluxDB 0.8 HTTP sink.
//!
//! Series are written in one `POST /db/<database>/series` request whose body
//! is a JSON array of `{"name", "columns", "points"}` objects.

use crate::{
    error::{ReportError, Result},
    Connector, Sink,
};
use reqwest::{blocking::Client, Url};
use serde::Serialize;
use sysflux_core::{SinkConfig, Series, Value};

/// Wire representation of one series
#[derive(Debug, Serialize)]
struct SeriesPayload<'a> {
    name: &'a str,
    columns: &'a [String],
    points: &'a [Vec<Value>],
}

impl<'a> From<&'a Series> for SeriesPayload<'a> {
    fn from(series: &'a Series) -> Self {
        Self {
            name: series.name(),
            columns: series.columns(),
            points: series.rows(),
        }
    }
}

pub struct InfluxClient {
    http: Client,
    series_url: Url,
    username: String,
    password: String,
}

impl InfluxClient {
    /// Build a client for the configured server.
    ///
    /// No request is made here; an unreachable server surfaces on the first write.
    pub fn connect(config: &SinkConfig) -> Result<Self> {
        let series_url = series_url(&config.host, &config.database)?;
        let http = Client::builder()
            .user_agent(concat!("sysflux/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            series_url,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Endpoint the series are posted to, without credentials
    pub fn series_url(&self) -> &Url {
        &self.series_url
    }
}

impl Sink for InfluxClient {
    fn write(&mut self, series: &[Series]) -> Result<()> {
        if series.is_empty() {
            tracing::debug!("No series to write");
            return Ok(());
        }

        let payload: Vec<SeriesPayload<'_>> = series.iter().map(SeriesPayload::from).collect();

        let response = self
            .http
            .post(self.series_url.clone())
            .query(&[("u", self.username.as_str()), ("p", self.password.as_str())])
            .json(&payload)
            .send()
            .map_err(|e| {
                // The request URL carries the credentials in its query string
                let e = e.without_url();
                if e.is_connect() {
                    ReportError::Connect {
                        url: self.series_url.to_string(),
                        source: e,
                    }
                } else {
                    ReportError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|e| format!("[Failed to read response body: {}]", e));
            return Err(ReportError::Write {
                series: series.len(),
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(count = series.len(), url = %self.series_url, "Wrote series to InfluxDB");
        Ok(())
    }
}

/// Connects to InfluxDB over HTTP
#[derive(Debug, Default, Clone, Copy)]
pub struct InfluxConnector;

impl Connector for InfluxConnector {
    fn connect(&self, config: &SinkConfig) -> Result<Box<dyn Sink>> {
        Ok(Box::new(InfluxClient::connect(config)?))
    }
}

/// `http://<host>/db/<database>/series`; a scheme already present in `host` is kept
fn series_url(host: &str, database: &str) -> Result<Url> {
    let host = host.trim();
    if host.is_empty() {
        return Err(ReportError::invalid_host(host, "host is empty"));
    }

    let base = if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    };

    let mut url = Url::parse(&base).map_err(|e| ReportError::invalid_host(host, e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| ReportError::invalid_host(host, "host cannot be used as a base URL"))?
        .pop_if_empty()
        .extend(["db", database, "series"]);

    Ok(url)
}
