//! Value axis planning.

use glam::{DVec2, dvec2};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::geometry::CoordinateMapper;
use crate::models::MonthlySeries;

/// At most this many 10-unit steps above zero; beyond that precipitation is
/// compressed anyway.
const MAX_UPPER_STEPS: i32 = 6;

/// Inset of the horizontal grid lines from the chart edges.
const GRID_INSET: f64 = 5.0;

/// Value-axis layout shared by both curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleContext {
    /// Number of 10-unit divisions (always ≥ 1).
    pub num_steps: u32,
    /// Lowest tick in units of 10 (°C) or 20 (mm).
    pub lowest_step: i32,
}

impl ScaleContext {
    /// Step indices from `lowest_step` upwards, `num_steps` of them.
    pub fn steps(&self) -> impl Iterator<Item = i32> {
        let lo = self.lowest_step;
        lo..lo + self.num_steps as i32
    }
}

/// Plan the value axis from both series.
///
/// Extremes are seeded at zero so the zero line is always on the axis.
/// Precipitation is halved first, matching how it is drawn. The low side
/// takes the larger of the two minima, so a negative tick only appears when
/// both curves dip below zero.
pub fn compute_scale(temps: &MonthlySeries, precs: &MonthlySeries) -> ScaleContext {
    let (mut highest_temp, mut lowest_temp) = (0.0_f64, 0.0_f64);
    let (mut highest_prec, mut lowest_prec) = (0.0_f64, 0.0_f64);

    for (temp, prec) in temps.iter().zip(precs.iter()) {
        let prec = prec * 0.5;
        highest_temp = highest_temp.max(temp);
        lowest_temp = lowest_temp.min(temp);
        highest_prec = highest_prec.max(prec);
        lowest_prec = lowest_prec.min(prec);
    }

    debug!("highest temperature: {highest_temp}, lowest temperature: {lowest_temp}");
    debug!("highest precipitation: {highest_prec}, lowest precipitation: {lowest_prec}");

    let highest = highest_temp.max(highest_prec);
    let lowest = lowest_temp.max(lowest_prec);

    let lowest_step = (lowest / 10.0).floor() as i32;
    let upper = MAX_UPPER_STEPS.min((highest / 10.0).ceil() as i32);
    let num_steps = (upper + lowest_step + 1).max(1) as u32;

    ScaleContext {
        num_steps,
        lowest_step,
    }
}

/// One labelled value-axis step with its grid line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    pub step: i32,
    /// Label on the temperature (left) axis, in °C.
    pub temperature_label: i64,
    /// Label on the precipitation (right) axis, in mm.
    pub precipitation_label: i64,
    /// Anchor of the temperature label (right-aligned).
    pub temperature_anchor: DVec2,
    /// Anchor of the precipitation label (left-aligned).
    pub precipitation_anchor: DVec2,
    pub grid_from: DVec2,
    pub grid_to: DVec2,
    /// The zero line, drawn heavier.
    pub baseline: bool,
}

impl AxisTick {
    pub fn labels(&self) -> (String, String) {
        (
            self.temperature_label.to_string(),
            self.precipitation_label.to_string(),
        )
    }
}

/// Ticks for every step of `scale`, lowest first.
pub fn axis_ticks(scale: &ScaleContext, mapper: &CoordinateMapper) -> Vec<AxisTick> {
    let width = mapper.size().width;
    scale
        .steps()
        .map(|step| {
            let y = mapper.value_axis_y(step);
            AxisTick {
                step,
                temperature_label: i64::from(step) * 10,
                precipitation_label: i64::from(step) * 20,
                temperature_anchor: dvec2(0.0, y),
                precipitation_anchor: dvec2(width, y),
                grid_from: dvec2(GRID_INSET, y),
                grid_to: dvec2(width - GRID_INSET, y),
                baseline: step == 0,
            }
        })
        .collect()
}
