#[cfg(test)]
mod tests {
    use crate::geometry::{
        angle_at, evaluate, evaluate_points, GeometryResult, LandmarkRoles, PoseThresholds,
        TrackedPoints, DEGENERATE_ANGLE_DEG,
    };
    use crate::types::{BoundingBox, HandDetection, Point2D};

    // =========================================================================
    // Helpers
    // Hand layout: 21 points; only 4 (thumb tip), 17 (little base), 20 (little tip) matter.
    // =========================================================================

    fn hand_with(thumb: Point2D, little_tip: Point2D, little_base: Point2D, bbox: BoundingBox) -> HandDetection {
        let mut points = vec![Point2D::new(0.0, 0.0); 21];
        points[4] = thumb;
        points[17] = little_base;
        points[20] = little_tip;
        let mut hand = HandDetection::from_points(&points, 1.0);
        hand.bbox = bbox;
        hand
    }

    fn tall_box() -> BoundingBox {
        BoundingBox::new(0.0, 0.0, 200.0, 200.0)
    }

    // =========================================================================
    // Distance
    // =========================================================================

    #[test]
    fn test_coincident_tips_give_zero_distance() {
        let tip = Point2D::new(100.0, 50.0);
        let hand = hand_with(tip, tip, Point2D::new(120.0, 120.0), tall_box());
        let result = evaluate(&hand, &LandmarkRoles::default());
        assert_eq!(result.normalized_distance, 0.0);

        // With the distance test trivially passing, the angle decides.
        let t = PoseThresholds::default();
        assert_eq!(t.is_touching(&result), result.angle_degrees < t.angle_degrees);
    }

    #[test]
    fn test_distance_is_scaled_by_box_height() {
        let hand = hand_with(
            Point2D::new(0.0, 0.0),
            Point2D::new(30.0, 40.0),
            Point2D::new(60.0, 80.0),
            BoundingBox::new(0.0, 0.0, 10.0, 100.0),
        );
        let result = evaluate(&hand, &LandmarkRoles::default());
        assert!((result.normalized_distance - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_flat_box_never_touches() {
        for height in [0.0_f32, -5.0] {
            let tip = Point2D::new(10.0, 10.0);
            let hand = hand_with(tip, tip, Point2D::new(30.0, 30.0), BoundingBox::new(0.0, 50.0, 100.0, 50.0 + height));
            let result = evaluate(&hand, &LandmarkRoles::default());
            assert!(result.normalized_distance.is_infinite());
            assert!(!PoseThresholds::default().is_touching(&result), "height {} touched", height);
        }
    }

    // =========================================================================
    // Angle
    // =========================================================================

    #[test]
    fn test_base_on_either_tip_is_degenerate() {
        let thumb = Point2D::new(10.0, 0.0);
        let little = Point2D::new(0.0, 10.0);

        let r = evaluate_points(
            &TrackedPoints { thumb_tip: thumb, little_tip: little, little_base: little },
            &tall_box(),
        );
        assert_eq!(r.angle_degrees, DEGENERATE_ANGLE_DEG);

        let r = evaluate_points(
            &TrackedPoints { thumb_tip: thumb, little_tip: little, little_base: thumb },
            &tall_box(),
        );
        assert_eq!(r.angle_degrees, DEGENERATE_ANGLE_DEG);
    }

    #[test]
    fn test_right_angle() {
        let angle = angle_at(Point2D::new(0.0, 0.0), Point2D::new(5.0, 0.0), Point2D::new(0.0, 7.0));
        assert!((angle - 90.0).abs() < 1e-4, "got {}", angle);
    }

    #[test]
    fn test_parallel_vectors_give_zero_angle() {
        // Collinear rays must give 0, never NaN.
        let angle = angle_at(Point2D::new(0.0, 0.0), Point2D::new(3.0, 3.0), Point2D::new(1.0, 1.0));
        assert!(!angle.is_nan());
        assert!(angle.abs() < 1e-3);
    }

    #[test]
    fn test_extreme_magnitudes_stay_in_range() {
        let o = Point2D::new(0.0, 0.0);

        let tiny = angle_at(o, Point2D::new(1e-25, 0.0), Point2D::new(1e-25, 0.0));
        assert!(!tiny.is_nan(), "tiny vectors gave NaN");
        assert!(tiny.abs() < 1e-3, "got {}", tiny);

        let huge = angle_at(o, Point2D::new(3e19, 3e19), Point2D::new(3e19, 3e19));
        assert!(!huge.is_nan(), "huge vectors gave NaN");
        assert!(huge.abs() < 1e-3, "got {}", huge);

        let huge_right = angle_at(o, Point2D::new(3e19, 0.0), Point2D::new(0.0, 3e19));
        assert!((huge_right - 90.0).abs() < 1e-3, "got {}", huge_right);

        // Offsets that overflow to infinity count as degenerate.
        let overflow = angle_at(Point2D::new(-3e38, 0.0), Point2D::new(3e38, 0.0), Point2D::new(0.0, 1.0));
        assert_eq!(overflow, DEGENERATE_ANGLE_DEG);
    }

    #[test]
    fn test_extreme_hand_result_is_finite() {
        let hand = hand_with(
            Point2D::new(3e19, 3e19),
            Point2D::new(3e19, 3e19),
            Point2D::new(0.0, 0.0),
            tall_box(),
        );
        let result = evaluate(&hand, &LandmarkRoles::default());
        assert!((0.0..=180.0).contains(&result.angle_degrees), "got {}", result.angle_degrees);
    }

    #[test]
    fn test_opposite_vectors_give_straight_angle() {
        let angle = angle_at(Point2D::new(0.0, 0.0), Point2D::new(-4.0, 0.0), Point2D::new(9.0, 0.0));
        assert!((angle - 180.0).abs() < 1e-4);
    }

    // =========================================================================
    // Predicate
    // =========================================================================

    #[test]
    fn test_pinched_hand_touches() {
        // Little finger points up from its base, thumb tip sits right next to the little tip.
        let hand = hand_with(
            Point2D::new(105.0, 52.0),
            Point2D::new(100.0, 50.0),
            Point2D::new(100.0, 150.0),
            tall_box(),
        );
        let result = evaluate(&hand, &LandmarkRoles::default());
        assert!(result.normalized_distance < 0.25);
        assert!(result.angle_degrees < 60.0);
        assert!(PoseThresholds::default().is_touching(&result));
    }

    #[test]
    fn test_open_hand_does_not_touch() {
        let hand = hand_with(
            Point2D::new(10.0, 150.0),
            Point2D::new(190.0, 20.0),
            Point2D::new(170.0, 140.0),
            tall_box(),
        );
        let result = evaluate(&hand, &LandmarkRoles::default());
        assert!(!PoseThresholds::default().is_touching(&result));
    }

    #[test]
    fn test_thresholds_are_strict() {
        let t = PoseThresholds { distance: 0.25, angle_degrees: 60.0 };
        assert!(!t.is_touching(&GeometryResult { normalized_distance: 0.25, angle_degrees: 10.0 }));
        assert!(!t.is_touching(&GeometryResult { normalized_distance: 0.1, angle_degrees: 60.0 }));
        assert!(t.is_touching(&GeometryResult { normalized_distance: 0.249, angle_degrees: 59.9 }));
    }

    #[test]
    fn test_missing_landmarks_do_not_touch() {
        let hand = HandDetection::from_points(&[Point2D::new(1.0, 1.0); 5], 1.0);
        let result = evaluate(&hand, &LandmarkRoles::default());
        assert_eq!(result, GeometryResult::NOT_TOUCHING);
    }

    #[test]
    fn test_custom_roles() {
        // Index tip (8) used in place of the thumb tip.
        let mut points = vec![Point2D::new(0.0, 0.0); 21];
        points[8] = Point2D::new(101.0, 50.0);
        points[20] = Point2D::new(100.0, 50.0);
        points[17] = Point2D::new(100.0, 150.0);
        let mut hand = HandDetection::from_points(&points, 1.0);
        hand.bbox = tall_box();

        let roles = LandmarkRoles { thumb_tip: 8, ..LandmarkRoles::default() };
        assert!(PoseThresholds::default().is_touching(&evaluate(&hand, &roles)));
        assert!(!PoseThresholds::default().is_touching(&evaluate(&hand, &LandmarkRoles::default())));
    }
}
