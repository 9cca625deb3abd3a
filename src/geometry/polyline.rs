//! The temperature and precipitation curves and the month guides.

use glam::DVec2;
use serde::Serialize;

use super::COMPRESSION_THRESHOLD;
use super::mapper::{CoordinateMapper, compression_breakpoint, crosses_threshold};
use crate::models::{MONTHS, MonthlySeries, Series};

/// A data curve as drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataLine {
    pub series: Series,
    pub points: Vec<DVec2>,
    /// Position in `points` of each month's own value; these get the point
    /// markers; inserted breakpoints do not.
    pub data_indices: [usize; MONTHS],
}

impl DataLine {
    /// Vertices of the twelve monthly values, skipping inserted breakpoints.
    pub fn markers(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.data_indices.iter().map(|&i| self.points[i])
    }
}

/// Twelve vertices, one per month.
pub fn temperature_line(mapper: &CoordinateMapper, temps: &MonthlySeries) -> DataLine {
    let points = temps
        .iter()
        .enumerate()
        .map(|(i, v)| mapper.to_vertex(i as f64, v, Series::Temperature))
        .collect();
    DataLine {
        series: Series::Temperature,
        points,
        data_indices: std::array::from_fn(|i| i),
    }
}

/// Twelve vertices plus one extra vertex on the threshold wherever the line
/// crosses 100 mm, so the kink in the compressed scale is drawn as a corner.
pub fn precipitation_line(mapper: &CoordinateMapper, precs: &MonthlySeries) -> DataLine {
    let mut points = Vec::with_capacity(MONTHS + 2);
    let mut data_indices = [0usize; MONTHS];

    for i in 0..MONTHS {
        data_indices[i] = points.len();
        points.push(mapper.to_vertex(i as f64, precs[i], Series::Precipitation));

        if i + 1 < MONTHS && crosses_threshold(precs[i], precs[i + 1]) {
            let t = compression_breakpoint(precs[i], precs[i + 1]);
            points.push(mapper.to_vertex(
                i as f64 + t,
                COMPRESSION_THRESHOLD,
                Series::Precipitation,
            ));
        }
    }

    DataLine {
        series: Series::Precipitation,
        points,
        data_indices,
    }
}

/// Vertical guide through one month, spanning both curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthAxis {
    pub from: DVec2,
    pub to: DVec2,
}

/// Month guides run from the zero line (or the temperature, if below zero) up
/// to whichever curve is higher. Temperatures are doubled onto the
/// precipitation scale rather than halving precipitation, which would break
/// the compression.
pub fn month_axes(
    mapper: &CoordinateMapper,
    temps: &MonthlySeries,
    precs: &MonthlySeries,
) -> Vec<MonthAxis> {
    (0..MONTHS)
        .map(|i| {
            let m = i as f64;
            let doubled = temps[i] * 2.0;
            MonthAxis {
                from: mapper.to_vertex(m, doubled.min(0.0), Series::Precipitation),
                to: mapper.to_vertex(m, doubled.max(precs[i]), Series::Precipitation),
            }
        })
        .collect()
}
