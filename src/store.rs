//! The chart's input data and how it gets updated.

use serde::{Deserialize, Serialize};

use crate::diagram::Diagram;
use crate::error::ClimographError;
use crate::models::{ChartConfig, Month, MonthlySeries, Series, Station};

/// Built-in example temperatures (°C).
pub const DEFAULT_TEMPERATURES: [f64; 12] = [
    8.0, 9.0, 10.0, 13.0, 18.0, 21.0, 23.0, 22.0, 20.0, 15.0, 10.5, 7.0,
];

/// Built-in example precipitation (mm).
pub const DEFAULT_PRECIPITATION: [f64; 12] = [
    80.0, 90.0, 70.0, 66.0, 58.0, 36.0, 17.0, 24.0, 60.0, 120.0, 110.0, 96.0,
];

/// One input field. `value: None` means the field was never filled in and
/// the previous value stays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldUpdate {
    pub month: Month,
    pub series: Series,
    pub value: Option<f64>,
}

/// Everything that survives between rebuilds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawChartData")]
pub struct ChartData {
    temperature: MonthlySeries,
    precipitation: MonthlySeries,
    #[serde(skip_serializing_if = "Option::is_none")]
    station: Option<Station>,
}

#[derive(Deserialize)]
struct RawChartData {
    temperature: MonthlySeries,
    precipitation: MonthlySeries,
    #[serde(default)]
    station: Option<Station>,
}

impl TryFrom<RawChartData> for ChartData {
    type Error = ClimographError;

    fn try_from(raw: RawChartData) -> Result<Self, Self::Error> {
        let mut data = ChartData::new(raw.temperature, raw.precipitation)?;
        data.station = raw.station;
        Ok(data)
    }
}

impl Default for ChartData {
    fn default() -> Self {
        Self {
            temperature: MonthlySeries::new(DEFAULT_TEMPERATURES),
            precipitation: MonthlySeries::new(DEFAULT_PRECIPITATION),
            station: None,
        }
    }
}

impl ChartData {
    /// Both series must be finite everywhere.
    pub fn new(
        temperature: MonthlySeries,
        precipitation: MonthlySeries,
    ) -> Result<Self, ClimographError> {
        for (series, values) in [
            (Series::Temperature, &temperature),
            (Series::Precipitation, &precipitation),
        ] {
            if let Some(month) = values.first_non_finite() {
                return Err(ClimographError::NonFiniteValue { series, month });
            }
        }
        Ok(Self {
            temperature,
            precipitation,
            station: None,
        })
    }

    /// Convenience for plain slices; wrong lengths are rejected.
    pub fn from_slices(
        temperature: &[f64],
        precipitation: &[f64],
    ) -> Result<Self, ClimographError> {
        Self::new(
            MonthlySeries::from_slice(temperature)?,
            MonthlySeries::from_slice(precipitation)?,
        )
    }

    pub fn temperature(&self) -> &MonthlySeries {
        &self.temperature
    }

    pub fn precipitation(&self) -> &MonthlySeries {
        &self.precipitation
    }

    pub fn series(&self, series: Series) -> &MonthlySeries {
        match series {
            Series::Temperature => &self.temperature,
            Series::Precipitation => &self.precipitation,
        }
    }

    pub fn station(&self) -> Option<&Station> {
        self.station.as_ref()
    }

    /// Apply a batch of field updates. Unset fields are skipped. If any value
    /// is not finite, nothing is applied.
    pub fn apply(&mut self, updates: &[FieldUpdate]) -> Result<usize, ClimographError> {
        if let Some(bad) = updates
            .iter()
            .find(|u| u.value.is_some_and(|v| !v.is_finite()))
        {
            return Err(ClimographError::NonFiniteValue {
                series: bad.series,
                month: bad.month,
            });
        }

        let mut applied = 0;
        for update in updates {
            let Some(value) = update.value else {
                continue;
            };
            let target = match update.series {
                Series::Temperature => &mut self.temperature,
                Series::Precipitation => &mut self.precipitation,
            };
            target.set(update.month, value);
            applied += 1;
        }
        log::debug!("applied {applied} of {} field updates", updates.len());
        Ok(applied)
    }

    pub fn set_station(&mut self, station: Station) {
        self.station = Some(station);
    }

    /// Set the location name, keeping any known elevation.
    pub fn set_location(&mut self, name: &str) {
        self.station.get_or_insert_with(Station::default).name = name.to_string();
    }

    /// Set the elevation from user text such as `"236"`.
    pub fn set_elevation(&mut self, text: &str) -> Result<(), ClimographError> {
        let elevation_m = text
            .trim()
            .parse::<i32>()
            .map_err(|_| ClimographError::InvalidElevation(text.to_string()))?;
        self.station.get_or_insert_with(Station::default).elevation_m = elevation_m;
        Ok(())
    }

    /// Recompute the whole diagram from the current data.
    pub fn rebuild(&self, config: &ChartConfig) -> Diagram {
        Diagram::rebuild(self, config)
    }
}
