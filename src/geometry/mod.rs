//! Diagram geometry: coordinate mapping, curves and area meshes.
//!
//! - [`mapper`]: data → drawing space, with precipitation compressed above 100 mm
//! - [`intersect`]: where the temperature and precipitation lines cross
//! - [`area`]: humid / dry / very humid triangle meshes
//! - [`polyline`]: the two data curves and the month guides

pub mod area;
pub mod intersect;
pub mod mapper;
pub mod polyline;

/// Precipitation (mm) above which the scale is compressed.
pub const COMPRESSION_THRESHOLD: f64 = 100.0;

pub use area::{AreaKind, AreaMesh, AreaMeshes, IntervalCase, Triangle, build_area_meshes};
pub use mapper::{CoordinateMapper, compression_breakpoint, crosses_threshold};
pub use polyline::{DataLine, MonthAxis, month_axes, precipitation_line, temperature_line};
