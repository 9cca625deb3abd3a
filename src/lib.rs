//! climograph
//!
//! A small Rust library that computes the geometry of a Walter-Lieth climate
//! diagram from twelve monthly temperatures and precipitation sums. Pairs with
//! the `climograph` CLI, which writes the geometry as JSON.
//!
//! ### Features
//! - Shared value axis: 10 °C per step on the left, 20 mm per step on the right
//! - Precipitation above 100 mm compressed 5:1
//! - Temperature and precipitation polylines, with a corner where the
//!   precipitation curve enters or leaves the compressed range
//! - Triangle meshes for the humid, dry and very humid areas
//! - Mean temperature and yearly precipitation labels
//!
//! ### Example
//! ```
//! use climograph::{ChartConfig, ChartData};
//!
//! let data = ChartData::default();
//! let diagram = data.rebuild(&ChartConfig::default());
//! assert_eq!(diagram.scale.num_steps, 7);
//! assert_eq!(diagram.temperature_line.points.len(), 12);
//! println!("{} humid triangles", diagram.meshes.humid.triangle_count());
//! ```

pub mod diagram;
pub mod error;
pub mod geometry;
pub mod models;
pub mod scale;
pub mod stats;
pub mod storage;
pub mod store;

pub use diagram::Diagram;
pub use error::ClimographError;
pub use models::{ChartConfig, DrawSpaceSize, Month, MonthlySeries, Series, Station};
pub use store::{ChartData, FieldUpdate};
