use crate::diagram::Diagram;
use crate::models::{Month, Series};
use crate::store::{ChartData, FieldUpdate};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// One CSV row: `month,temperature,precipitation`. Empty cells are unset.
#[derive(Debug, Deserialize)]
struct MonthRow {
    month: Month,
    temperature: Option<f64>,
    precipitation: Option<f64>,
}

/// Read field updates from CSV with header `month,temperature,precipitation`.
///
/// Months may be names or numbers and appear in any order; missing rows and
/// empty cells leave the current value alone.
pub fn read_updates_csv<R: Read>(reader: R) -> Result<Vec<FieldUpdate>> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut out = Vec::new();
    for (line, row) in rdr.deserialize::<MonthRow>().enumerate() {
        let row = row.with_context(|| format!("bad CSV record {}", line + 1))?;
        out.push(FieldUpdate {
            month: row.month,
            series: Series::Temperature,
            value: row.temperature,
        });
        out.push(FieldUpdate {
            month: row.month,
            series: Series::Precipitation,
            value: row.precipitation,
        });
    }
    Ok(out)
}

/// Load CSV updates on top of `base`.
pub fn load_csv<P: AsRef<Path>>(path: P, base: ChartData) -> Result<ChartData> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let updates = read_updates_csv(file)?;
    let mut data = base;
    data.apply(&updates)
        .with_context(|| format!("applying {}", path.display()))?;
    Ok(data)
}

/// Load a complete data set from JSON:
/// `{"temperature": [..12], "precipitation": [..12], "station": {..}}`.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<ChartData> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let data: ChartData = serde_json::from_reader(file)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(data)
}

/// Write the data as CSV, one row per month.
pub fn write_csv<W: Write>(data: &ChartData, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.serialize(("month", "temperature", "precipitation"))?;
    for month in Month::ALL {
        wtr.serialize((
            month.name(),
            data.temperature().get(month),
            data.precipitation().get(month),
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the data as a CSV template.
pub fn save_csv<P: AsRef<Path>>(data: &ChartData, path: P) -> Result<()> {
    let f = File::create(path)?;
    write_csv(data, f)
}

/// Save the diagram geometry as pretty JSON.
pub fn save_json<P: AsRef<Path>>(diagram: &Diagram, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(diagram)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
