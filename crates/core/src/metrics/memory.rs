use crate::{
    error::{CoreError, Result},
    model::{series_name, Series, MEM_COLUMNS, SWAP_COLUMNS},
    platform::MetricSource,
};

pub const MEM_CATEGORY: &str = "mem";
pub const SWAP_CATEGORY: &str = "swap";

pub fn collect_memory(source: &dyn MetricSource, prefix: &str) -> Result<Series> {
    let mem = source
        .memory()
        .map_err(|e| CoreError::collection(MEM_CATEGORY, e))?;

    let mut series = Series::new(series_name(prefix, MEM_CATEGORY), MEM_COLUMNS)?;
    series.push_row(vec![
        mem.free.into(),
        mem.used.into(),
        mem.actual_free.into(),
        mem.actual_used.into(),
        mem.total.into(),
    ])?;

    Ok(series)
}

pub fn collect_swap(source: &dyn MetricSource, prefix: &str) -> Result<Series> {
    let swap = source
        .swap()
        .map_err(|e| CoreError::collection(SWAP_CATEGORY, e))?;

    let mut series = Series::new(series_name(prefix, SWAP_CATEGORY), SWAP_COLUMNS)?;
    series.push_row(vec![swap.free.into(), swap.used.into(), swap.total.into()])?;

    Ok(series)
}
