use climograph::geometry::{CoordinateMapper, compression_breakpoint, crosses_threshold};
use climograph::models::{DrawSpaceSize, Series};
use climograph::scale::ScaleContext;

fn mapper(num_steps: u32) -> CoordinateMapper {
    CoordinateMapper::new(
        DrawSpaceSize {
            width: 400.0,
            height: 600.0,
        },
        ScaleContext {
            num_steps,
            lowest_step: 0,
        },
    )
}

fn straddling_pairs() -> Vec<(f64, f64)> {
    let below = [0.0, 12.5, 50.0, 87.0, 99.0, 99.999];
    let above = [100.001, 101.0, 120.0, 180.5, 350.0, 1000.0];
    let mut out = Vec::new();
    for &b in &below {
        for &a in &above {
            out.push((b, a));
            out.push((a, b));
        }
    }
    out
}

#[test]
fn breakpoint_interpolates_to_exactly_the_threshold() {
    for (v1, v2) in straddling_pairs() {
        assert!(crosses_threshold(v1, v2));
        let t = compression_breakpoint(v1, v2);
        assert!(t > 0.0 && t < 1.0, "t = {t} for {v1} → {v2}");
        let at = v1 + (v2 - v1) * t;
        assert!((at - 100.0).abs() < 1e-9, "{v1} → {v2} gives {at}");
    }
}

#[test]
fn both_directions_agree_on_the_crossing_point() {
    for (v1, v2) in straddling_pairs() {
        let forward = compression_breakpoint(v1, v2);
        let backward = compression_breakpoint(v2, v1);
        assert!((forward + backward - 1.0).abs() < 1e-12);
    }
}

#[test]
fn threshold_height_does_not_depend_on_direction() {
    let m = mapper(7);
    let expected = m.to_vertex(0.0, 100.0, Series::Precipitation).y;
    for (i, (v1, v2)) in straddling_pairs().into_iter().enumerate() {
        let month = (i % 11) as f64;
        let t = compression_breakpoint(v1, v2);
        let p = m.to_vertex(month + t, 100.0, Series::Precipitation);
        assert_eq!(p.y, expected);
    }
}

#[test]
fn compression_flattens_values_above_100mm() {
    let m = mapper(7);
    let y = |v: f64| m.to_vertex(3.0, v, Series::Precipitation).y;
    let below = y(90.0) - y(80.0);
    let above = y(130.0) - y(120.0);
    assert!((below / above - 5.0).abs() < 1e-9);

    // 20 mm of precipitation lines up with 10 °C
    let t = m.to_vertex(3.0, 10.0, Series::Temperature).y;
    assert!((y(20.0) - t).abs() < 1e-9);
}

#[test]
fn mapper_is_total() {
    for steps in [1, 3, 7] {
        let m = mapper(steps);
        for v in [-1e6, -40.0, 0.0, 99.5, 100.0, 100.5, 1e6] {
            for s in [Series::Temperature, Series::Precipitation] {
                let p = m.to_vertex(5.25, v, s);
                assert!(p.is_finite());
            }
        }
    }
}
