use super::*;

#[test]
fn fps_rejects_zero_terms() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert!(matches!(
        Fps { num: 0, den: 1 }.validate(),
        Err(ReelError::Precondition(_))
    ));
}

#[test]
fn fps_round_conversion_matches_hold_budgets() {
    let fps = Fps::integer(10).unwrap();
    assert_eq!(fps.secs_to_frames_round(1.0).unwrap(), 10);
    assert_eq!(fps.secs_to_frames_round(0.25).unwrap(), 3);
    assert_eq!(fps.secs_to_frames_round(0.0).unwrap(), 0);

    let ntsc = Fps::new(30000, 1001).unwrap();
    assert_eq!(
        ntsc.secs_to_frames_round(ntsc.frames_to_secs(123)).unwrap(),
        123
    );
}

#[test]
fn huge_durations_are_rejected_instead_of_saturating() {
    let fps = Fps::integer(10).unwrap();
    assert!(matches!(
        fps.secs_to_frames_round(1e300),
        Err(ReelError::Precondition(_))
    ));
    assert!(fps.secs_to_frames_round(f64::INFINITY).is_err());
    assert!(fps.secs_to_frames_round(1e6).is_ok());
}

#[test]
fn frame_duration_is_reciprocal() {
    let fps = Fps::integer(25).unwrap();
    assert_eq!(fps.frame_duration(), Duration::from_millis(40));
}

#[test]
fn canvas_rgb8_len_and_validation() {
    assert_eq!(Canvas::new(4, 2).unwrap().rgb8_len(), 24);
    assert!(Canvas::new(0, 2).is_err());
}
