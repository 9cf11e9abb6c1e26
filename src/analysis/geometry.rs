//! Joint angle and distance math over 2D image-space points.

use crate::models::Keypoint;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<&Keypoint> for Point {
    fn from(kp: &Keypoint) -> Self {
        Self { x: kp.x, y: kp.y }
    }
}

/// Angle at vertex `b` formed by the rays b->a and b->c, in whole degrees
/// within [0,180]. Reflex angles are reflected back (360 - angle).
///
/// Non-finite coordinates propagate to a NaN result; callers treat such
/// measurements as invalid rather than guarding every input.
pub fn angle_at(a: Point, b: Point, c: Point) -> f32 {
    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let mut angle = radians.to_degrees().abs();
    if angle > 180.0 {
        angle = 360.0 - angle;
    }
    angle.round()
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f32 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Reference point straight down the y axis from `p`. Measuring a body
/// segment against it reports how upright the segment is: in image space
/// (y down) an upright torso reads ~180. The offset magnitude is arbitrary;
/// only the direction matters.
pub fn vertical_reference(p: Point) -> Point {
    Point::new(p.x, p.y + 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_line_is_180() {
        let angle = angle_at(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        );
        assert_eq!(angle, 180.0);
    }

    #[test]
    fn perpendicular_rays_are_90() {
        let angle = angle_at(
            Point::new(1.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
        );
        assert_eq!(angle, 90.0);
    }

    #[test]
    fn reflex_angles_reflect_into_range() {
        // Rays at -170 and +170 degrees: the raw difference is 340.
        let a = Point::new(-0.94, -0.17);
        let b = Point::new(0.0, 0.0);
        let c = Point::new(-0.94, 0.17);
        assert_eq!(angle_at(a, b, c), 20.0);
    }

    #[test]
    fn angle_is_symmetric_and_in_range() {
        let points = [
            (Point::new(0.2, 0.9), Point::new(0.5, 0.5), Point::new(0.8, 0.1)),
            (Point::new(1.0, 0.0), Point::new(0.0, 0.0), Point::new(-0.3, 0.7)),
            (Point::new(0.1, 0.1), Point::new(0.4, 0.6), Point::new(0.9, 0.2)),
        ];
        for (a, b, c) in points {
            let forward = angle_at(a, b, c);
            let backward = angle_at(c, b, a);
            assert_eq!(forward, backward);
            assert!((0.0..=180.0).contains(&forward));
        }
    }

    #[test]
    fn nan_inputs_propagate() {
        let angle = angle_at(
            Point::new(f32::NAN, 0.0),
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
        );
        assert!(angle.is_nan());
    }

    #[test]
    fn distance_is_euclidean() {
        let d = distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!((d - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn upright_segment_measures_180_against_vertical_reference() {
        let hip = Point::new(0.5, 0.5);
        let shoulder = Point::new(0.5, 0.2);
        assert_eq!(angle_at(vertical_reference(hip), hip, shoulder), 180.0);
    }
}
