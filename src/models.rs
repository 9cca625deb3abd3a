use crate::error::ClimographError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of values in a monthly series.
pub const MONTHS: usize = 12;

/// Calendar month, January first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; MONTHS] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Zero-based index (January = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Month> {
        Self::ALL.get(idx).copied()
    }

    pub fn name(self) -> &'static str {
        ENGLISH[self.index()]
    }
}

const ENGLISH: [&str; MONTHS] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const GERMAN: [&str; MONTHS] = [
    "januar",
    "februar",
    "märz",
    "april",
    "mai",
    "juni",
    "juli",
    "august",
    "september",
    "oktober",
    "november",
    "dezember",
];

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts 1-based numbers (`"3"`), English or German names (`"March"`, `"März"`)
/// and three-letter English abbreviations (`"mar"`), case-insensitive.
impl FromStr for Month {
    type Err = ClimographError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if let Ok(n) = t.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(Month::from_index)
                .ok_or_else(|| ClimographError::UnknownMonth(s.to_string()));
        }
        let lower = t.to_lowercase();
        let hit = ENGLISH
            .iter()
            .position(|name| {
                let name = name.to_ascii_lowercase();
                name == lower || (lower.len() == 3 && name.starts_with(&lower))
            })
            .or_else(|| GERMAN.iter().position(|name| *name == lower))
            .or_else(|| (lower == "maerz").then_some(2));
        hit.and_then(Month::from_index)
            .ok_or_else(|| ClimographError::UnknownMonth(s.to_string()))
    }
}

impl Serialize for Month {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Months may be written as a name or as a 1-based number.
impl<'de> Deserialize<'de> for Month {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        struct MonthVisitor;

        impl<'de> Visitor<'de> for MonthVisitor {
            type Value = Month;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a month name or a number between 1 and 12")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                (v as usize)
                    .checked_sub(1)
                    .and_then(Month::from_index)
                    .ok_or_else(|| E::custom(format!("month number out of range: {v}")))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if v < 1 {
                    return Err(E::custom(format!("month number out of range: {v}")));
                }
                self.visit_u64(v as u64)
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                s.parse::<Month>().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(MonthVisitor)
    }
}

/// Which of the two curves a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Series {
    /// Degrees Celsius, signed.
    Temperature,
    /// Millimetres per month; compressed above 100 mm when drawn.
    Precipitation,
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Series::Temperature => f.write_str("temperature"),
            Series::Precipitation => f.write_str("precipitation"),
        }
    }
}

/// Exactly twelve values, January first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct MonthlySeries([f64; MONTHS]);

impl MonthlySeries {
    pub const fn new(values: [f64; MONTHS]) -> Self {
        Self(values)
    }

    /// Build from a slice, rejecting anything that isn't twelve values long.
    pub fn from_slice(values: &[f64]) -> Result<Self, ClimographError> {
        let arr: [f64; MONTHS] = values.try_into().map_err(|_| ClimographError::SeriesLength {
            expected: MONTHS,
            found: values.len(),
        })?;
        Ok(Self(arr))
    }

    pub fn get(&self, month: Month) -> f64 {
        self.0[month.index()]
    }

    pub fn set(&mut self, month: Month, value: f64) {
        self.0[month.index()] = value;
    }

    pub fn values(&self) -> &[f64; MONTHS] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// First month whose value is NaN or infinite.
    pub fn first_non_finite(&self) -> Option<Month> {
        self.0
            .iter()
            .position(|v| !v.is_finite())
            .and_then(Month::from_index)
    }
}

impl std::ops::Index<usize> for MonthlySeries {
    type Output = f64;

    fn index(&self, idx: usize) -> &f64 {
        &self.0[idx]
    }
}

impl TryFrom<Vec<f64>> for MonthlySeries {
    type Error = ClimographError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_slice(&values)
    }
}

impl From<MonthlySeries> for Vec<f64> {
    fn from(s: MonthlySeries) -> Self {
        s.0.to_vec()
    }
}

/// Weather station the data belongs to; only feeds the location label.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    /// Metres above sea level.
    pub elevation_m: i32,
}

/// Width and height of the chart area in drawing units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawSpaceSize {
    pub width: f64,
    pub height: f64,
}

impl Default for DrawSpaceSize {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 600.0,
        }
    }
}

/// Fixed per-diagram settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub size: DrawSpaceSize,
    /// Emit geometry for intervals that stay humid or dry throughout.
    pub draw_full: bool,
    /// Emit geometry for intervals where the curves cross.
    pub draw_partial: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            size: DrawSpaceSize::default(),
            draw_full: true,
            draw_partial: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_parsing_accepts_numbers_names_and_abbreviations() {
        assert_eq!("1".parse::<Month>().unwrap(), Month::January);
        assert_eq!("12".parse::<Month>().unwrap(), Month::December);
        assert_eq!("october".parse::<Month>().unwrap(), Month::October);
        assert!("Okt".parse::<Month>().is_err());
        assert_eq!("Oktober".parse::<Month>().unwrap(), Month::October);
        assert_eq!("MÄRZ".parse::<Month>().unwrap(), Month::March);
        assert_eq!("sep".parse::<Month>().unwrap(), Month::September);
        assert!("0".parse::<Month>().is_err());
        assert!("13".parse::<Month>().is_err());
        assert!("ju".parse::<Month>().is_err());
    }

    #[test]
    fn series_length_is_enforced() {
        let err = MonthlySeries::from_slice(&[1.0; 11]).unwrap_err();
        assert_eq!(
            err,
            ClimographError::SeriesLength {
                expected: 12,
                found: 11
            }
        );
        assert!(MonthlySeries::from_slice(&[0.0; 12]).is_ok());
    }

    #[test]
    fn series_json_shape_is_a_plain_array() {
        let s = MonthlySeries::new([1.0; 12]);
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.starts_with('['));
        let back: MonthlySeries = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
        assert!(serde_json::from_str::<MonthlySeries>("[1.0, 2.0]").is_err());
    }

    #[test]
    fn month_deserializes_from_name_or_number() {
        let m: Month = serde_json::from_str("5").unwrap();
        assert_eq!(m, Month::May);
        let m: Month = serde_json::from_str("\"June\"").unwrap();
        assert_eq!(m, Month::June);
        assert!(serde_json::from_str::<Month>("0").is_err());
    }
}
