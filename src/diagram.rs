//! One full rebuild: data in, geometry out.

use serde::Serialize;

use crate::geometry::{
    AreaMeshes, CoordinateMapper, DataLine, MonthAxis, build_area_meshes, month_axes,
    precipitation_line, temperature_line,
};
use crate::models::{ChartConfig, DrawSpaceSize};
use crate::scale::{AxisTick, ScaleContext, axis_ticks, compute_scale};
use crate::stats::{Summary, summarize};
use crate::store::ChartData;

/// Everything a renderer needs to draw one climate diagram.
///
/// A rebuild replaces the previous diagram wholesale; reconciling already
/// drawn objects against the new one is up to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagram {
    pub size: DrawSpaceSize,
    pub scale: ScaleContext,
    pub ticks: Vec<AxisTick>,
    pub temperature_line: DataLine,
    pub precipitation_line: DataLine,
    pub month_axes: Vec<MonthAxis>,
    pub meshes: AreaMeshes,
    pub summary: Summary,
}

impl Diagram {
    pub fn rebuild(data: &ChartData, config: &ChartConfig) -> Self {
        let temps = data.temperature();
        let precs = data.precipitation();

        let scale = compute_scale(temps, precs);
        log::debug!("scale: {} steps from {}", scale.num_steps, scale.lowest_step);
        let mapper = CoordinateMapper::new(config.size, scale);

        Self {
            size: config.size,
            scale,
            ticks: axis_ticks(&scale, &mapper),
            temperature_line: temperature_line(&mapper, temps),
            precipitation_line: precipitation_line(&mapper, precs),
            month_axes: month_axes(&mapper, temps, precs),
            meshes: build_area_meshes(&mapper, temps, precs, config),
            summary: summarize(temps, precs, data.station()),
        }
    }

    /// Every vertex in the diagram, for bounds checks and the like.
    pub fn vertices(&self) -> impl Iterator<Item = glam::DVec2> + '_ {
        let ticks = self
            .ticks
            .iter()
            .flat_map(|t| [t.temperature_anchor, t.precipitation_anchor, t.grid_from, t.grid_to]);
        let axes = self.month_axes.iter().flat_map(|a| [a.from, a.to]);
        ticks
            .chain(self.temperature_line.points.iter().copied())
            .chain(self.precipitation_line.points.iter().copied())
            .chain(axes)
            .chain(self.meshes.humid.vertices.iter().copied())
            .chain(self.meshes.dry.vertices.iter().copied())
            .chain(self.meshes.very_humid.vertices.iter().copied())
    }
}
