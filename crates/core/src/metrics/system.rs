use crate::{
    error::{CoreError, Result},
    model::{series_name, Series, Value, LOAD_COLUMNS, UPTIME_COLUMNS},
    platform::MetricSource,
};

pub const UPTIME_CATEGORY: &str = "uptime";
pub const LOAD_CATEGORY: &str = "load";

pub fn collect_uptime(source: &dyn MetricSource, prefix: &str) -> Result<Series> {
    let length = source
        .uptime()
        .map_err(|e| CoreError::collection(UPTIME_CATEGORY, e))?;

    let mut series = Series::new(series_name(prefix, UPTIME_CATEGORY), UPTIME_COLUMNS)?;
    series.push_row(vec![Value::Float(length)])?;

    Ok(series)
}

pub fn collect_load(source: &dyn MetricSource, prefix: &str) -> Result<Series> {
    let load = source
        .load_average()
        .map_err(|e| CoreError::collection(LOAD_CATEGORY, e))?;

    let mut series = Series::new(series_name(prefix, LOAD_CATEGORY), LOAD_COLUMNS)?;
    series.push_row(vec![
        Value::Float(load.one),
        Value::Float(load.five),
        Value::Float(load.fifteen),
    ])?;

    Ok(series)
}
