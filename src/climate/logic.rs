use bevy::math::{Vec2, Vec3};

/// Pointer movement to world movement for the earth drag.
const DRAG_SPEED: f32 = 0.03;

/// Two presses within this window count as a double click.
const DOUBLE_CLICK_SECONDS: f64 = 0.3;

/// Distance along `direction` to the nearest intersection with the
/// sphere, if the ray hits it. `direction` must be normalized.
pub fn ray_sphere_hit(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = center - origin;
    let projection = to_center.dot(direction);
    let closest_sq = to_center.length_squared() - projection * projection;
    let radius_sq = radius * radius;
    if closest_sq > radius_sq {
        return None;
    }
    let half_chord = (radius_sq - closest_sq).sqrt();
    let near = projection - half_chord;
    let far = projection + half_chord;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        // Origin is inside the sphere
        Some(far)
    } else {
        None
    }
}

/// Distance from a point to a line segment, all in screen space.
pub fn point_segment_distance(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let length_sq = ab.length_squared();
    if length_sq < f32::EPSILON {
        return (point - a).length();
    }
    let t = ((point - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    (point - (a + ab * t)).length()
}

/// New earth position after a pointer drag, kept inside the scene bounds.
/// Screen-space y grows downward, so a downward drag lowers the earth.
pub fn drag_earth_position(
    current: Vec3,
    cursor_delta: Vec2,
    bound_x: f32,
    bound_y: f32,
) -> Vec3 {
    Vec3::new(
        (current.x + cursor_delta.x * DRAG_SPEED).clamp(-bound_x, bound_x),
        (current.y - cursor_delta.y * DRAG_SPEED).clamp(-bound_y, bound_y),
        current.z,
    )
}

pub fn is_double_click(previous_press_seconds: f64, now_seconds: f64) -> bool {
    now_seconds - previous_press_seconds < DOUBLE_CLICK_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn ray_through_center_hits_at_near_surface() {
        let hit = ray_sphere_hit(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, Vec3::ZERO, 2.0);
        assert!((hit.unwrap() - 8.0).abs() < 1e-4);
    }

    #[test]
    fn grazing_ray_still_hits() {
        let hit = ray_sphere_hit(
            Vec3::new(1.99, 0.0, 10.0),
            Vec3::NEG_Z,
            Vec3::ZERO,
            2.0,
        );
        assert!(hit.is_some());
    }

    #[rstest]
    #[case(Vec3::new(2.5, 0.0, 10.0), Vec3::NEG_Z)] // passes beside the sphere
    #[case(Vec3::new(0.0, 0.0, 10.0), Vec3::Z)] // points away from it
    fn misses_return_none(#[case] origin: Vec3, #[case] direction: Vec3) {
        assert_eq!(ray_sphere_hit(origin, direction, Vec3::ZERO, 2.0), None);
    }

    #[test]
    fn origin_inside_sphere_hits_the_far_wall() {
        let hit = ray_sphere_hit(Vec3::ZERO, Vec3::X, Vec3::ZERO, 2.0);
        assert!((hit.unwrap() - 2.0).abs() < 1e-4);
    }

    #[rstest]
    #[case(Vec2::new(5.0, 3.0), 3.0)] // perpendicular drop onto the middle
    #[case(Vec2::new(-4.0, 0.0), 4.0)] // clamps to the a endpoint
    #[case(Vec2::new(13.0, 4.0), 5.0)] // clamps to the b endpoint
    #[case(Vec2::new(7.0, 0.0), 0.0)] // on the segment
    fn segment_distance(#[case] point: Vec2, #[case] expected: f32) {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        assert!((point_segment_distance(point, a, b) - expected).abs() < 1e-4);
    }

    #[test]
    fn degenerate_segment_measures_to_the_point() {
        let a = Vec2::new(2.0, 2.0);
        assert!((point_segment_distance(Vec2::new(2.0, 5.0), a, a) - 3.0).abs() < 1e-4);
    }

    #[test]
    fn drag_moves_with_screen_direction() {
        let next = drag_earth_position(Vec3::ZERO, Vec2::new(100.0, 50.0), 60.0, 30.0);
        assert!((next.x - 3.0).abs() < 1e-4);
        assert!((next.y + 1.5).abs() < 1e-4);
        assert_eq!(next.z, 0.0);
    }

    #[rstest]
    #[case(Vec2::new(1e6, 0.0), 60.0, 0.0)]
    #[case(Vec2::new(-1e6, 0.0), -60.0, 0.0)]
    #[case(Vec2::new(0.0, 1e6), 0.0, -30.0)]
    #[case(Vec2::new(0.0, -1e6), 0.0, 30.0)]
    fn drag_clamps_to_bounds(
        #[case] delta: Vec2,
        #[case] expected_x: f32,
        #[case] expected_y: f32,
    ) {
        let next = drag_earth_position(Vec3::new(-25.0, -15.0, 0.0), delta, 60.0, 30.0);
        assert!((next.x - expected_x).abs() < 1e-4);
        assert!((next.y - expected_y).abs() < 1e-4);
    }

    #[rstest]
    #[case(10.0, 10.2, true)]
    #[case(10.0, 10.31, false)]
    #[case(0.0, 5.0, false)]
    fn double_click_window(#[case] previous: f64, #[case] now: f64, #[case] expected: bool) {
        assert_eq!(is_double_click(previous, now), expected);
    }
}
