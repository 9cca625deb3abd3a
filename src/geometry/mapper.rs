//! Data space → drawing space.

use glam::{DVec2, dvec2};

use super::COMPRESSION_THRESHOLD;
use crate::models::{DrawSpaceSize, MONTHS, Series};
use crate::scale::ScaleContext;

/// Share of the base scale left to precipitation above the threshold (5:1).
const COMPRESSION_FACTOR: f64 = 0.2;

/// Maps (month, value) pairs onto the chart area for one scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    size: DrawSpaceSize,
    num_steps: u32,
}

impl CoordinateMapper {
    pub fn new(size: DrawSpaceSize, scale: ScaleContext) -> Self {
        Self {
            size,
            num_steps: scale.num_steps,
        }
    }

    pub fn size(&self) -> DrawSpaceSize {
        self.size
    }

    /// Drawing x of a (possibly fractional) month position; months sit in the
    /// middle of their column.
    #[inline]
    pub fn month_x(&self, month_position: f64) -> f64 {
        (self.size.width / MONTHS as f64) * (month_position + 0.5)
    }

    /// Drawing units per data unit below the threshold.
    #[inline]
    pub fn unit_space(&self) -> f64 {
        self.size.height / (self.num_steps as f64 * 10.0)
    }

    /// Drawing y of a value-axis step (`step * 10` °C, `step * 20` mm).
    #[inline]
    pub fn value_axis_y(&self, step: i32) -> f64 {
        self.size.height / self.num_steps as f64 * step as f64
    }

    /// Convert one data value to a vertex.
    ///
    /// Temperatures map linearly. Precipitation above 100 mm is compressed 5:1
    /// and the whole precipitation value is halved, so 20 mm lines up with 10 °C.
    /// Factors are applied to the value before the drawing scale and `y`
    /// saturates at the `f64` range, so any finite value gives a finite vertex.
    pub fn to_vertex(&self, month_position: f64, value: f64, series: Series) -> DVec2 {
        let unit = self.unit_space();

        let y = match series {
            Series::Temperature => unit * value,
            Series::Precipitation => {
                let capped = value.min(COMPRESSION_THRESHOLD);
                let excess = (value - COMPRESSION_THRESHOLD).max(0.0);
                unit * (capped * 0.5) + unit * (excess * (COMPRESSION_FACTOR * 0.5))
            }
        };
        dvec2(self.month_x(month_position), y.clamp(-f64::MAX, f64::MAX))
    }
}

/// True when exactly one of the two values is below the threshold and the
/// other above it.
#[inline]
pub fn crosses_threshold(value1: f64, value2: f64) -> bool {
    (value1 < COMPRESSION_THRESHOLD && value2 > COMPRESSION_THRESHOLD)
        || (value1 > COMPRESSION_THRESHOLD && value2 < COMPRESSION_THRESHOLD)
}

/// Fraction in `(0, 1)` along `value1 → value2` where the straight line
/// between them hits the threshold.
///
/// Only meaningful when [`crosses_threshold`] holds. The rising and falling
/// forms are kept separate so both directions round the same way they always
/// have. Operands are halved so a span wider than `f64::MAX` stays finite.
pub fn compression_breakpoint(value1: f64, value2: f64) -> f64 {
    let (limit, a, b) = (COMPRESSION_THRESHOLD * 0.5, value1 * 0.5, value2 * 0.5);
    if value1 < value2 {
        (limit - a) / (b - a)
    } else {
        1.0 - (limit - b) / (a - b)
    }
}
