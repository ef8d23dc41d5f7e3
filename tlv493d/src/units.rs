//! Physical units and field angles, derived from a cached [`Sample`].

use core::f64::consts::PI;

use crate::types::Sample;

/// mT per LSB for the field channels.
pub const FIELD_SCALE_MT: f64 = 0.098;
/// °C per LSB. No reference offset is applied, so the result tracks
/// temperature changes but is not an absolute reading.
pub const TEMP_SCALE_C: f64 = 1.1;

pub fn temperature(sample: &Sample) -> f64 {
    f64::from(sample.t) * TEMP_SCALE_C
}

pub fn field(raw: i16) -> f64 {
    f64::from(raw) * FIELD_SCALE_MT
}

/// Length of the field vector in mT.
pub fn magnitude(sample: &Sample) -> f64 {
    let (x, y, z) = (field(sample.x), field(sample.y), field(sample.z));
    libm::sqrt(x * x + y * y + z * z)
}

/// atan(num / den) in degrees, moved into the left half plane when `den` is negative.
///
/// The result lies in (-90, 270]. A zero denominator is not guarded: the
/// quotient becomes ±inf (so ±90°) or NaN when both are zero.
fn planar_angle(num: i16, den: i16) -> f64 {
    let mut angle = libm::atan(f64::from(num) / f64::from(den)) * 180.0 / PI;
    if den < 0 {
        angle += 180.0;
    }
    angle
}

/// Angle of the field around the X axis, measured in the Y/Z plane.
pub fn angle_x(sample: &Sample) -> f64 {
    planar_angle(sample.z, sample.y)
}

/// Angle of the field around the Y axis, measured in the Z/X plane.
pub fn angle_y(sample: &Sample) -> f64 {
    planar_angle(sample.x, sample.z)
}

/// Angle of the field around the Z axis, measured in the X/Y plane.
pub fn angle_z(sample: &Sample) -> f64 {
    planar_angle(sample.y, sample.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        libm::fabs(a - b) < EPS
    }

    #[test]
    fn test_unit_scales() {
        let s = Sample::new(1000, -1000, 0, 100);
        assert!(close(field(s.x), 98.0));
        assert!(close(field(s.y), -98.0));
        assert!(close(temperature(&s), 110.0));
    }

    #[test]
    fn test_angle_quadrants() {
        assert!(close(angle_x(&Sample::new(0, 1, 1, 0)), 45.0));
        assert!(close(angle_x(&Sample::new(0, -1, 0, 0)), 180.0));
        assert!(close(angle_x(&Sample::new(0, -1, -1, 0)), 225.0));
        assert!(close(angle_y(&Sample::new(1, 0, -1, 0)), 135.0));
        assert!(close(angle_z(&Sample::new(1, 1, 0, 0)), 45.0));
        assert!(close(angle_z(&Sample::new(-1, 1, 0, 0)), 135.0));
    }

    #[test]
    fn test_angle_zero_denominator() {
        // 5 / 0 is +inf, atan(+inf) is a quarter turn
        assert!(close(angle_x(&Sample::new(0, 0, 5, 0)), 90.0));
        assert!(close(angle_x(&Sample::new(0, 0, -5, 0)), -90.0));
        assert!(angle_z(&Sample::new(0, 0, 0, 0)).is_nan());
    }

    #[test]
    fn test_magnitude() {
        let s = Sample::new(300, 400, 0, 0);
        assert!(close(magnitude(&s), 49.0));
    }
}
