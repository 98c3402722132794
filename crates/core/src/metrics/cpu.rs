use crate::{
    error::{CoreError, Result},
    model::{series_name, CpuTimes, Series, Value, CPU_COLUMNS},
    platform::MetricSource,
};

pub const CATEGORY: &str = "cpu";

/// Collect the aggregate CPU row followed by one row per logical CPU
pub fn collect(source: &dyn MetricSource, prefix: &str) -> Result<Series> {
    let stats = source
        .cpu_times()
        .map_err(|e| CoreError::collection(CATEGORY, e))?;

    let mut series = Series::new(series_name(prefix, CATEGORY), CPU_COLUMNS)?;
    series.push_row(cpu_row("cpu".to_string(), &stats.aggregate))?;

    for (index, cpu) in stats.per_cpu.iter().enumerate() {
        series.push_row(cpu_row(format!("cpu{}", index), cpu))?;
    }

    Ok(series)
}

fn cpu_row(id: String, cpu: &CpuTimes) -> Vec<Value> {
    vec![
        Value::Str(id),
        cpu.user.into(),
        cpu.nice.into(),
        cpu.sys.into(),
        cpu.idle.into(),
        cpu.wait.into(),
        cpu.total().into(),
    ]
}
