use crate::constants::*;
use crate::types::*;

/// Spherical description of a vector: horizontal bearing from +X toward +Z,
/// angle above the XZ plane, and distance from the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphericalCoords {
    pub range: f32,
    pub azimuth: f32,
    pub elevation: f32,
}

pub fn cartesian_to_spherical(v: &Vec3) -> SphericalCoords {
    SphericalCoords {
        range: v.norm(),
        azimuth: v.z.atan2(v.x),
        elevation: v.y.atan2(v.x.hypot(v.z)),
    }
}

pub fn spherical_to_cartesian(range: f32, azimuth: f32, elevation: f32) -> Vec3 {
    Vec3::new(
        range * elevation.cos() * azimuth.cos(),
        range * elevation.sin(),
        range * elevation.cos() * azimuth.sin(),
    )
}

/// A proposed vector is usable only if every component is finite and the
/// magnitude is clearly above zero.
pub fn vector_is_valid(v: &Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite() && v.norm() > MIN_VECTOR_NORM
}

/// Points of the azimuth arc, swept in the XZ plane from the +X axis to
/// `azimuth` at radius `radius`. Built by explicit angle sweep.
pub fn azimuth_arc_points(azimuth: f32, radius: f32, segments: usize) -> Vec<Vec3> {
    let step = azimuth / segments as f32;
    (0..=segments)
        .map(|i| {
            let t = step * i as f32;
            Vec3::new(t.cos() * radius, 0.0, t.sin() * radius)
        })
        .collect()
}

/// Points of the elevation arc, swept from the horizontal bearing up to
/// `elevation` in the vertical plane spanned by the bearing and +Y.
pub fn elevation_arc_points(azimuth: f32, elevation: f32, radius: f32, segments: usize) -> Vec<Vec3> {
    let bearing = Vec3::new(azimuth.cos(), 0.0, azimuth.sin());
    let step = elevation / segments as f32;
    (0..=segments)
        .map(|i| {
            let t = step * i as f32;
            (bearing * t.cos() + Vec3::y() * t.sin()) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn assert_close(a: f32, b: f32, tol: f32) {
        assert!((a - b).abs() <= tol, "{a} != {b} (tol {tol})");
    }

    #[test]
    fn spherical_of_3_4_0() {
        let s = cartesian_to_spherical(&Vec3::new(3.0, 4.0, 0.0));
        assert_close(s.range, 5.0, 1e-6);
        assert_close(s.azimuth, 0.0, 1e-6);
        assert_close(s.elevation.to_degrees(), 53.13, 0.01);
    }

    #[test]
    fn cartesian_of_range_10_azimuth_90() {
        let v = spherical_to_cartesian(10.0, FRAC_PI_2, 0.0);
        assert_close(v.x, 0.0, 1e-5);
        assert_close(v.y, 0.0, 1e-5);
        assert_close(v.z, 10.0, 1e-5);
    }

    #[test]
    fn round_trip_reproduces_cartesian() {
        let samples = [
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-4.5, 0.25, 1.75),
            Vec3::new(0.001, -0.002, 0.003),
            Vec3::new(-100.0, -250.0, 75.0),
            Vec3::new(0.0, 5.0, 0.0),
        ];
        for v in samples {
            let s = cartesian_to_spherical(&v);
            let back = spherical_to_cartesian(s.range, s.azimuth, s.elevation);
            let tol = 1e-5 * v.norm().max(1.0);
            assert_close(back.x, v.x, tol);
            assert_close(back.y, v.y, tol);
            assert_close(back.z, v.z, tol);
        }
    }

    #[test]
    fn validation_rejects_degenerate_and_non_finite() {
        assert!(vector_is_valid(&Vec3::new(1.0, 1.0, 1.0)));
        assert!(!vector_is_valid(&Vec3::zeros()));
        assert!(!vector_is_valid(&Vec3::new(1e-10, 0.0, 0.0)));
        assert!(!vector_is_valid(&Vec3::new(f32::NAN, 0.0, 1.0)));
        assert!(!vector_is_valid(&Vec3::new(0.0, f32::INFINITY, 1.0)));
    }

    #[test]
    fn azimuth_arc_spans_requested_angle() {
        let pts = azimuth_arc_points(FRAC_PI_2, 2.0, 8);
        assert_eq!(pts.len(), 9);
        assert_close(pts[0].x, 2.0, 1e-6);
        assert_close(pts[0].z, 0.0, 1e-6);
        let last = pts.last().unwrap();
        assert_close(last.x, 0.0, 1e-6);
        assert_close(last.z, 2.0, 1e-6);
        for p in &pts {
            assert_close(p.y, 0.0, 1e-6);
            assert_close(p.norm(), 2.0, 1e-5);
        }
    }

    #[test]
    fn elevation_arc_ends_on_the_vector_direction() {
        let az = PI / 3.0;
        let el = PI / 4.0;
        let pts = elevation_arc_points(az, el, 1.5, 16);
        let last = pts.last().unwrap();
        let expected = spherical_to_cartesian(1.5, az, el);
        assert_close(last.x, expected.x, 1e-5);
        assert_close(last.y, expected.y, 1e-5);
        assert_close(last.z, expected.z, 1e-5);
        for p in &pts {
            assert_close(p.norm(), 1.5, 1e-5);
        }
    }
}
