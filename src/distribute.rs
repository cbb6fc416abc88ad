use std::f64::consts::PI;

// metres per degree of latitude on a spherical earth
pub const METERS_PER_DEGREE: f64 = 111_320.0;

// radial fraction of the first and last point
const INNER: f64 = 0.25;
const OUTER: f64 = 0.75;

/// Spreads `n` points around a center, returned as `(lat, lng)` pairs.
///
/// Point `i` sits at `i / n` of a full turn clockwise from north, at a
/// distance interpolated linearly from 25% of `radius` (first point) to 75%
/// (last point). Offsets are converted back to degrees with a flat
/// approximation and rounded to six decimal places. A single point is placed
/// on the center itself, unrounded.
pub fn distribute_within_circle(
    center_lat: f64,
    center_lng: f64,
    radius: f64,
    n: usize,
) -> Vec<(f64, f64)> {
    match n {
        0 => return Vec::new(),
        1 => return vec![(center_lat, center_lng)],
        _ => {}
    }

    let meters_per_degree_lng = METERS_PER_DEGREE * center_lat.to_radians().cos();
    let mut points = Vec::with_capacity(n);
    for i in 0..n {
        let angle = (i as f64 / n as f64) * 2.0 * PI;
        let frac = INNER + (OUTER - INNER) * (i as f64 / (n - 1) as f64);
        let r = radius * frac;

        let dy = angle.cos() * r;
        let dx = angle.sin() * r;

        let lat = center_lat + dy / METERS_PER_DEGREE;
        let lng = center_lng + dx / meters_per_degree_lng;
        points.push((round(lat), round(lng)));
    }
    points
}

/// Rounds to six decimal places (about 0.11m of latitude).
pub fn round(x: f64) -> f64 {
    (x * 1e6).round() / 1e6
}

#[cfg(test)]
mod tests {
    use geo::{HaversineDistance, Point};

    use super::*;

    const LAT: f64 = 31.2;
    const LNG: f64 = 121.5;

    // planar (north, east) offset in metres, the inverse of the projection
    fn offset(lat: f64, lng: f64) -> (f64, f64) {
        let dy = (lat - LAT) * METERS_PER_DEGREE;
        let dx = (lng - LNG) * METERS_PER_DEGREE * LAT.to_radians().cos();
        (dy, dx)
    }

    #[test]
    fn returns_one_point_per_record() {
        for n in 0..50 {
            assert_eq!(distribute_within_circle(LAT, LNG, 30.0, n).len(), n);
        }
    }

    #[test]
    fn single_point_is_center() {
        assert_eq!(distribute_within_circle(LAT, LNG, 30.0, 0), vec![]);
        assert_eq!(
            distribute_within_circle(31.123456789, 121.987654321, 30.0, 1),
            vec![(31.123456789, 121.987654321)]
        );
    }

    #[test]
    fn three_points() {
        let points = distribute_within_circle(LAT, LNG, 30.0, 3);
        // 7.5m due north
        assert_eq!(points[0], (31.200067, 121.5));
        // 15m at 120 degrees, 22.5m at 240 degrees
        assert_eq!(points[1].0, 31.199933);
        assert!(points[1].1 > LNG);
        assert!(points[2].0 < points[1].0);
        assert!(points[2].1 < LNG);
    }

    #[test]
    fn radial_fraction_runs_from_quarter_to_three_quarters() {
        let radius = 100.0;
        for n in [2, 3, 7, 20] {
            let points = distribute_within_circle(LAT, LNG, radius, n);
            let (first, last) = (points[0], points[n - 1]);

            let (dy, dx) = offset(first.0, first.1);
            assert!((dy.hypot(dx) - 0.25 * radius).abs() < 0.1, "n={n}");

            let (dy, dx) = offset(last.0, last.1);
            assert!((dy.hypot(dx) - 0.75 * radius).abs() < 0.1, "n={n}");

            for (i, (lat, lng)) in points.iter().enumerate() {
                let expected = radius * (0.25 + 0.5 * i as f64 / (n - 1) as f64);
                let (dy, dx) = offset(*lat, *lng);
                assert!((dy.hypot(dx) - expected).abs() < 0.1, "n={n} i={i}");
            }
        }
    }

    #[test]
    fn angles_are_evenly_spaced() {
        for n in [2, 5, 12] {
            let points = distribute_within_circle(LAT, LNG, 200.0, n);
            let mut angles = Vec::new();
            for (i, (lat, lng)) in points.iter().enumerate() {
                let (dy, dx) = offset(*lat, *lng);
                let angle = dx.atan2(dy).to_degrees().rem_euclid(360.0);
                let expected = 360.0 * i as f64 / n as f64;
                assert!((angle - expected).abs() < 0.5, "n={n} i={i} {angle}");
                angles.push(angle);
            }
            for (i, a) in angles.iter().enumerate() {
                for b in &angles[i + 1..] {
                    assert!((a - b).abs() > 1.0);
                }
            }
        }
    }

    #[test]
    fn points_stay_inside_radius() {
        let center = Point::new(LNG, LAT);
        for radius in [5.0, 24.0, 40.0, 500.0] {
            for n in 2..30 {
                for (lat, lng) in distribute_within_circle(LAT, LNG, radius, n) {
                    let d = Point::new(lng, lat).haversine_distance(&center);
                    assert!(d <= radius, "radius={radius} n={n} d={d}");
                }
            }
        }
    }

    #[test]
    fn deterministic() {
        assert_eq!(
            distribute_within_circle(-33.86, 151.21, 48.0, 9),
            distribute_within_circle(-33.86, 151.21, 48.0, 9)
        );
    }

    #[test]
    fn rounds_to_six_places() {
        assert_eq!(round(31.2000673741), 31.200067);
        assert_eq!(round(-12.3456789), -12.345679);
        assert_eq!(round(121.5), 121.5);
    }
}
