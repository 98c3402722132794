pub mod error;
pub mod influx;
pub mod table;

pub use error::{ReportError, Result};
pub use influx::{InfluxClient, InfluxConnector};
pub use table::render;

use std::io::Write;
use sysflux_core::{Series, SinkConfig};

/// Destination accepting a batch of series in a single write
pub trait Sink {
    /// Write every series at once; the batch either succeeds or fails as a whole
    fn write(&mut self, series: &[Series]) -> Result<()>;
}

/// Opens a [`Sink`] from its connection settings
pub trait Connector {
    fn connect(&self, config: &SinkConfig) -> Result<Box<dyn Sink>>;
}

/// Print and/or ship the collected series.
///
/// The text view is written to `out` when no sink is configured or when
/// `verbose` is set. It happens before the sink is contacted, so a sink
/// failure never suppresses it. With a sink configured, all series go out in
/// one write and any connect or write failure is returned.
pub fn report<W: Write + ?Sized>(
    out: &mut W,
    series: &[Series],
    sink: Option<&SinkConfig>,
    verbose: bool,
    connector: &dyn Connector,
) -> Result<()> {
    if sink.is_none() || verbose {
        render(out, series)?;
    }

    if let Some(config) = sink {
        tracing::debug!(
            host = %config.host,
            database = %config.database,
            count = series.len(),
            "Writing series to sink"
        );
        let mut client = connector.connect(config)?;
        client.write(series)?;
    }

    Ok(())
}
