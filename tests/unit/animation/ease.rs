use super::*;

#[test]
fn endpoints_are_exact_for_every_curve() {
    let curves = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InSine,
        Ease::OutSine,
        Ease::InOutSine,
    ];
    for c in curves {
        assert!(c.apply(0.0).abs() < 1e-12, "{c:?} at 0");
        assert!((c.apply(1.0) - 1.0).abs() < 1e-12, "{c:?} at 1");
    }
}

#[test]
fn input_is_clamped_before_easing() {
    assert_eq!(Ease::InCubic.apply(-3.0), 0.0);
    assert_eq!(Ease::InCubic.apply(7.5), 1.0);
}

#[test]
fn linear_is_identity_inside_range() {
    assert_eq!(Ease::Linear.apply(0.25), 0.25);
    assert_eq!(Ease::Linear.apply(0.75), 0.75);
}

#[test]
fn in_out_quad_is_symmetric_about_midpoint() {
    let lo = Ease::InOutQuad.apply(0.25);
    let hi = Ease::InOutQuad.apply(0.75);
    assert!((lo + hi - 1.0).abs() < 1e-12);
    assert!((Ease::InOutQuad.apply(0.5) - 0.5).abs() < 1e-12);
}

#[test]
fn names_round_trip_through_from_name() {
    assert_eq!(Ease::from_name("linear"), Some(Ease::Linear));
    assert_eq!(Ease::from_name("in_out_cubic"), Some(Ease::InOutCubic));
    assert_eq!(Ease::from_name("out_sine"), Some(Ease::OutSine));
    assert_eq!(Ease::from_name("bounce"), None);
}

#[test]
fn serde_uses_snake_case_names() {
    let e: Ease = serde_json::from_str("\"in_out_sine\"").unwrap();
    assert_eq!(e, Ease::InOutSine);
    assert_eq!(serde_json::to_string(&Ease::OutQuad).unwrap(), "\"out_quad\"");
}
