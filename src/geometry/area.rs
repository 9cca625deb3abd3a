//! Humid, dry and very humid areas between the two curves.
//!
//! Each month-to-month interval is classified by which curve is on top at
//! either end, then turned into a small triangle fan. Builders return the
//! triangles they produce and [`build_area_meshes`] merges them.

use glam::{DVec2, dvec2};
use log::debug;
use serde::Serialize;

use super::COMPRESSION_THRESHOLD;
use super::intersect::intersect;
use super::mapper::{CoordinateMapper, compression_breakpoint, crosses_threshold};
use crate::models::{ChartConfig, MONTHS, MonthlySeries, Series};

/// Three vertices in winding order.
pub type Triangle = [DVec2; 3];

/// Which of the three meshes a triangle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaKind {
    Humid,
    Dry,
    VeryHumid,
}

/// Flat triangle list. Every triangle carries its own three vertices and the
/// index buffer is simply `0..vertices.len()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AreaMesh {
    pub vertices: Vec<DVec2>,
    pub indices: Vec<u32>,
}

impl AreaMesh {
    pub fn push_triangle(&mut self, tri: Triangle) {
        for v in tri {
            self.indices.push(self.vertices.len() as u32);
            self.vertices.push(v);
        }
    }

    pub fn extend_triangles<I: IntoIterator<Item = Triangle>>(&mut self, tris: I) {
        for tri in tris {
            self.push_triangle(tri);
        }
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.vertices.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// The three area meshes of one diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AreaMeshes {
    pub humid: AreaMesh,
    pub dry: AreaMesh,
    pub very_humid: AreaMesh,
}

impl AreaMeshes {
    pub fn get(&self, kind: AreaKind) -> &AreaMesh {
        match kind {
            AreaKind::Humid => &self.humid,
            AreaKind::Dry => &self.dry,
            AreaKind::VeryHumid => &self.very_humid,
        }
    }

    fn get_mut(&mut self, kind: AreaKind) -> &mut AreaMesh {
        match kind {
            AreaKind::Humid => &mut self.humid,
            AreaKind::Dry => &mut self.dry,
            AreaKind::VeryHumid => &mut self.very_humid,
        }
    }

    fn merge(&mut self, geometry: IntervalGeometry) {
        for (kind, tris) in geometry.parts {
            self.get_mut(kind).extend_triangles(tris);
        }
    }
}

/// One month-to-month interval, clamped to non-negative values.
///
/// Areas never extend below the zero line, so both curves are clamped here
/// (and only here).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Index of the earlier month (0..=10).
    pub month: usize,
    pub cur_temp: f64,
    pub cur_prec: f64,
    pub next_temp: f64,
    pub next_prec: f64,
}

impl Interval {
    /// The interval from `month` to `month + 1`.
    ///
    /// # Panics
    ///
    /// If `month` is not in `0..=10`; December has no following month.
    pub fn new(month: usize, temps: &MonthlySeries, precs: &MonthlySeries) -> Self {
        Self {
            month,
            cur_temp: temps[month].max(0.0),
            cur_prec: precs[month].max(0.0),
            next_temp: temps[month + 1].max(0.0),
            next_prec: precs[month + 1].max(0.0),
        }
    }

    fn start(&self) -> f64 {
        self.month as f64
    }

    fn end(&self) -> f64 {
        self.month as f64 + 1.0
    }
}

/// Which curve is on top at a single month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Balance {
    Humid,
    Dry,
    Even,
}

fn balance(temp: f64, prec: f64) -> Balance {
    let half = prec * 0.5;
    if half > temp {
        Balance::Humid
    } else if half < temp {
        Balance::Dry
    } else {
        Balance::Even
    }
}

/// The four ways an interval can look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalCase {
    /// Precipitation above temperature at both ends.
    FullHumid,
    /// Temperature above precipitation at both ends.
    FullDry,
    /// Curves cross, humid first.
    HumidToDry,
    /// Curves cross, dry first.
    DryToHumid,
}

impl IntervalCase {
    /// A month where both curves touch takes the side of its neighbour; two
    /// touching ends count as humid.
    pub fn classify(interval: &Interval) -> Self {
        let cur = balance(interval.cur_temp, interval.cur_prec);
        let next = balance(interval.next_temp, interval.next_prec);
        match (cur, next) {
            (Balance::Humid, Balance::Dry) => IntervalCase::HumidToDry,
            (Balance::Dry, Balance::Humid) => IntervalCase::DryToHumid,
            (Balance::Dry, _) | (_, Balance::Dry) => IntervalCase::FullDry,
            _ => IntervalCase::FullHumid,
        }
    }

    pub fn is_transition(self) -> bool {
        matches!(self, IntervalCase::HumidToDry | IntervalCase::DryToHumid)
    }
}

/// Output of the full-area builder: the humid or dry body plus whatever lies
/// above the threshold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FullArea {
    pub base: Vec<Triangle>,
    pub very_humid: Vec<Triangle>,
}

/// Area of an interval where one curve stays on top.
///
/// Produces a quad (6 vertices) below the threshold, plus a second quad when
/// both ends reach past it. An interval crossing the threshold is split at
/// the breakpoint into three base triangles and one very humid triangle; the
/// rising and falling cases are mirror images.
pub fn full_area(mapper: &CoordinateMapper, iv: &Interval) -> FullArea {
    let prec = |m: f64, v: f64| mapper.to_vertex(m, v, Series::Precipitation);
    let temp = |m: f64, v: f64| mapper.to_vertex(m, v, Series::Temperature);
    let (i, j) = (iv.start(), iv.end());
    let (cur, next) = (iv.cur_prec, iv.next_prec);
    let limit = COMPRESSION_THRESHOLD;

    let mut out = FullArea::default();

    if !crosses_threshold(cur, next) {
        let (cur_capped, next_capped) = (cur.min(limit), next.min(limit));
        out.base.push([
            prec(i, cur_capped),
            temp(i, iv.cur_temp),
            prec(j, next_capped),
        ]);
        out.base.push([
            temp(i, iv.cur_temp),
            temp(j, iv.next_temp),
            prec(j, next_capped),
        ]);

        if cur >= limit && next >= limit && (cur > limit || next > limit) {
            out.very_humid.push([prec(i, cur), prec(i, limit), prec(j, next)]);
            out.very_humid.push([prec(i, limit), prec(j, limit), prec(j, next)]);
        }
    } else if cur < next {
        let bx = i + compression_breakpoint(cur, next);

        out.base.push([temp(i, iv.cur_temp), prec(j, limit), temp(j, iv.next_temp)]);
        out.base.push([prec(j, limit), prec(i, cur), temp(i, iv.cur_temp)]);
        out.base.push([prec(bx, limit), prec(j, limit), prec(i, cur)]);

        out.very_humid.push([prec(bx, limit), prec(j, limit), prec(j, next)]);
    } else {
        let bx = i + compression_breakpoint(cur, next);

        out.base.push([temp(i, iv.cur_temp), prec(j, next), temp(j, iv.next_temp)]);
        out.base.push([prec(i, limit), prec(j, next), temp(i, iv.cur_temp)]);
        out.base.push([prec(bx, limit), prec(i, limit), prec(j, next)]);

        out.very_humid.push([prec(bx, limit), prec(i, limit), prec(i, cur)]);
    }

    out
}

/// Output of the separated-area builder: one triangle either side of the
/// crossing point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparatedArea {
    pub first: Triangle,
    pub second: Triangle,
    /// Where the temperature line meets the halved precipitation line.
    pub crossing: DVec2,
}

/// Area of an interval where the curves cross.
pub fn separated_area(mapper: &CoordinateMapper, iv: &Interval) -> SeparatedArea {
    let (i, j) = (iv.start(), iv.end());

    let prec_start = dvec2(i, iv.cur_prec * 0.5);
    let prec_dir = dvec2(j, iv.next_prec * 0.5) - prec_start;
    let temp_start = dvec2(i, iv.cur_temp);
    let temp_dir = dvec2(j, iv.next_temp) - temp_start;

    let hit = intersect(prec_start, prec_dir, temp_start, temp_dir);
    let crossing = mapper.to_vertex(hit.x, hit.y, Series::Temperature);

    SeparatedArea {
        first: [
            mapper.to_vertex(i, iv.cur_prec, Series::Precipitation),
            mapper.to_vertex(i, iv.cur_temp, Series::Temperature),
            crossing,
        ],
        second: [
            mapper.to_vertex(j, iv.next_prec, Series::Precipitation),
            mapper.to_vertex(j, iv.next_temp, Series::Temperature),
            crossing,
        ],
        crossing,
    }
}

/// Triangles one interval contributes, grouped by target mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalGeometry {
    pub case: IntervalCase,
    pub parts: Vec<(AreaKind, Vec<Triangle>)>,
}

impl IntervalGeometry {
    /// Number of vertices this interval adds to `kind`.
    pub fn vertex_count(&self, kind: AreaKind) -> usize {
        self.parts
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, tris)| tris.len() * 3)
            .sum()
    }
}

/// Classify one interval and build its triangles, or `None` when the
/// corresponding draw flag is off.
pub fn triangulate_interval(
    mapper: &CoordinateMapper,
    iv: &Interval,
    config: &ChartConfig,
) -> Option<IntervalGeometry> {
    let case = IntervalCase::classify(iv);
    debug!(
        "interval {}: temperature {} -> {}, precipitation {} -> {}: {:?}",
        iv.month, iv.cur_temp, iv.next_temp, iv.cur_prec, iv.next_prec, case
    );

    let parts = match case {
        IntervalCase::FullHumid | IntervalCase::FullDry if config.draw_full => {
            let target = if case == IntervalCase::FullHumid {
                AreaKind::Humid
            } else {
                AreaKind::Dry
            };
            let area = full_area(mapper, iv);
            vec![
                (target, area.base),
                (AreaKind::VeryHumid, area.very_humid),
            ]
        }
        IntervalCase::HumidToDry | IntervalCase::DryToHumid if config.draw_partial => {
            let (first, second) = if case == IntervalCase::HumidToDry {
                (AreaKind::Humid, AreaKind::Dry)
            } else {
                (AreaKind::Dry, AreaKind::Humid)
            };
            let area = separated_area(mapper, iv);
            vec![(first, vec![area.first]), (second, vec![area.second])]
        }
        _ => return None,
    };

    Some(IntervalGeometry { case, parts })
}

/// Build all three meshes for a diagram, interval by interval.
pub fn build_area_meshes(
    mapper: &CoordinateMapper,
    temps: &MonthlySeries,
    precs: &MonthlySeries,
    config: &ChartConfig,
) -> AreaMeshes {
    let mut meshes = AreaMeshes::default();
    for month in 0..MONTHS - 1 {
        let iv = Interval::new(month, temps, precs);
        if let Some(geometry) = triangulate_interval(mapper, &iv, config) {
            meshes.merge(geometry);
        }
    }
    debug!(
        "area meshes: humid {} dry {} very humid {} vertices",
        meshes.humid.vertices.len(),
        meshes.dry.vertices.len(),
        meshes.very_humid.vertices.len()
    );
    meshes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DrawSpaceSize;
    use crate::scale::ScaleContext;

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(
            DrawSpaceSize {
                width: 120.0,
                height: 700.0,
            },
            ScaleContext {
                num_steps: 7,
                lowest_step: 0,
            },
        )
    }

    fn iv(cur_temp: f64, cur_prec: f64, next_temp: f64, next_prec: f64) -> Interval {
        Interval {
            month: 3,
            cur_temp,
            cur_prec,
            next_temp,
            next_prec,
        }
    }

    #[test]
    fn classification_covers_all_four_cases() {
        assert_eq!(IntervalCase::classify(&iv(10.0, 80.0, 12.0, 70.0)), IntervalCase::FullHumid);
        assert_eq!(IntervalCase::classify(&iv(20.0, 10.0, 25.0, 30.0)), IntervalCase::FullDry);
        assert_eq!(IntervalCase::classify(&iv(10.0, 40.0, 20.0, 20.0)), IntervalCase::HumidToDry);
        assert_eq!(IntervalCase::classify(&iv(20.0, 20.0, 10.0, 40.0)), IntervalCase::DryToHumid);
    }

    #[test]
    fn touching_ends_follow_the_other_end() {
        assert_eq!(IntervalCase::classify(&iv(10.0, 20.0, 10.0, 40.0)), IntervalCase::FullHumid);
        assert_eq!(IntervalCase::classify(&iv(10.0, 20.0, 30.0, 40.0)), IntervalCase::FullDry);
        assert_eq!(IntervalCase::classify(&iv(10.0, 20.0, 15.0, 30.0)), IntervalCase::FullHumid);
    }

    #[test]
    fn quad_below_threshold() {
        let area = full_area(&mapper(), &iv(10.0, 80.0, 12.0, 70.0));
        assert_eq!(area.base.len(), 2);
        assert!(area.very_humid.is_empty());
        // month 3 → x 35, month 4 → x 45
        assert_eq!(area.base[0], [dvec2(35.0, 400.0), dvec2(35.0, 100.0), dvec2(45.0, 350.0)]);
        assert_eq!(area.base[1], [dvec2(35.0, 100.0), dvec2(45.0, 120.0), dvec2(45.0, 350.0)]);
    }

    #[test]
    fn both_ends_above_threshold_add_a_very_humid_quad() {
        let area = full_area(&mapper(), &iv(15.0, 120.0, 10.0, 110.0));
        assert_eq!(area.base.len(), 2);
        assert_eq!(area.very_humid.len(), 2);
        // base is capped at 100 mm
        assert_eq!(area.base[0][0], dvec2(35.0, 500.0));
        let top = [dvec2(35.0, 520.0), dvec2(35.0, 500.0), dvec2(45.0, 510.0)];
        let bottom = [dvec2(35.0, 500.0), dvec2(45.0, 500.0), dvec2(45.0, 510.0)];
        assert_eq!(area.very_humid, vec![top, bottom]);
    }

    #[test]
    fn rising_crossing_splits_at_the_breakpoint() {
        let area = full_area(&mapper(), &iv(20.0, 60.0, 15.0, 120.0));
        assert_eq!(area.base.len(), 3);
        assert_eq!(area.very_humid.len(), 1);
        let bx = 10.0 * (3.0 + 40.0 / 60.0 + 0.5);
        assert!((area.very_humid[0][0].x - bx).abs() < 1e-9);
        assert_eq!(area.very_humid[0][0].y, 500.0);
        assert_eq!(area.very_humid[0][1], dvec2(45.0, 500.0));
        assert_eq!(area.very_humid[0][2], dvec2(45.0, 520.0));
        assert_eq!(area.base[1], [dvec2(45.0, 500.0), dvec2(35.0, 300.0), dvec2(35.0, 200.0)]);
    }

    #[test]
    fn falling_crossing_mirrors_the_rising_one() {
        let area = full_area(&mapper(), &iv(10.0, 110.0, 7.0, 96.0));
        assert_eq!(area.base.len(), 3);
        assert_eq!(area.very_humid.len(), 1);
        assert_eq!(area.very_humid[0][1], dvec2(35.0, 500.0));
        assert_eq!(area.very_humid[0][2], dvec2(35.0, 510.0));
        assert_eq!(area.base[0], [dvec2(35.0, 100.0), dvec2(45.0, 480.0), dvec2(45.0, 70.0)]);
    }

    #[test]
    fn exact_threshold_is_not_a_crossing() {
        let area = full_area(&mapper(), &iv(10.0, 100.0, 10.0, 130.0));
        assert_eq!(area.base.len(), 2);
        assert_eq!(area.very_humid.len(), 2);

        let area = full_area(&mapper(), &iv(10.0, 100.0, 10.0, 100.0));
        assert_eq!(area.base.len(), 2);
        assert!(area.very_humid.is_empty());
    }

    #[test]
    fn separated_area_meets_at_the_crossing() {
        // halved precipitation 20 → 10 against temperature 10 → 20: cross at 3.5 / 15 °C
        let area = separated_area(&mapper(), &iv(10.0, 40.0, 20.0, 20.0));
        assert_eq!(area.crossing, dvec2(40.0, 150.0));
        assert_eq!(area.first, [dvec2(35.0, 200.0), dvec2(35.0, 100.0), dvec2(40.0, 150.0)]);
        assert_eq!(area.second, [dvec2(45.0, 100.0), dvec2(45.0, 200.0), dvec2(40.0, 150.0)]);
    }

    #[test]
    fn flags_suppress_their_cases() {
        let m = mapper();
        let full_off = ChartConfig {
            draw_full: false,
            ..ChartConfig::default()
        };
        let partial_off = ChartConfig {
            draw_partial: false,
            ..ChartConfig::default()
        };
        let humid = iv(10.0, 80.0, 12.0, 70.0);
        let crossing = iv(10.0, 40.0, 20.0, 20.0);

        assert!(triangulate_interval(&m, &humid, &full_off).is_none());
        assert!(triangulate_interval(&m, &crossing, &full_off).is_some());
        assert!(triangulate_interval(&m, &humid, &partial_off).is_some());
        assert!(triangulate_interval(&m, &crossing, &partial_off).is_none());
    }

    #[test]
    fn dry_to_humid_swaps_targets() {
        let config = ChartConfig::default();
        let geo = triangulate_interval(&mapper(), &iv(20.0, 20.0, 10.0, 40.0), &config).unwrap();
        assert_eq!(geo.case, IntervalCase::DryToHumid);
        assert_eq!(geo.parts[0].0, AreaKind::Dry);
        assert_eq!(geo.parts[1].0, AreaKind::Humid);
        assert_eq!(geo.vertex_count(AreaKind::Dry), 3);
        assert_eq!(geo.vertex_count(AreaKind::Humid), 3);
        assert_eq!(geo.vertex_count(AreaKind::VeryHumid), 0);
    }

    #[test]
    fn november_is_the_last_interval_start() {
        let s = MonthlySeries::new([1.0; MONTHS]);
        assert_eq!(Interval::new(10, &s, &s).month, 10);
    }

    #[test]
    #[should_panic]
    fn december_has_no_interval() {
        let s = MonthlySeries::new([1.0; MONTHS]);
        Interval::new(11, &s, &s);
    }

    #[test]
    fn mesh_indices_are_sequential() {
        let mut mesh = AreaMesh::default();
        mesh.push_triangle([DVec2::ZERO, DVec2::X, DVec2::Y]);
        mesh.push_triangle([DVec2::ONE, DVec2::X, DVec2::Y]);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.triangles().nth(1).unwrap()[0], DVec2::ONE);
    }
}
