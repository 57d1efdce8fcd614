use super::*;
use crate::animation::field::Field;
use crate::foundation::core::{Rgba, Vec2};
use crate::timeline::state::TextAlign;

#[derive(Default)]
struct Recording {
    position: Option<Vec2>,
    rotation: Option<Vec3>,
    scale: Option<Vec2>,
    pivot: Option<Vec2>,
    size: Option<Vec2>,
    opacity: Option<f64>,
    tint: Option<Rgba>,
    layer: Option<u8>,
    order: Option<i32>,
    text: Option<String>,
    font_size: Option<f64>,
    align: Option<TextAlign>,
    letter_spacing: Option<f64>,
    font_weight: Option<u32>,
    points: Option<Vec<Vec3>>,
    width: Option<f64>,
    colors: Option<(Rgba, Rgba)>,
    cleared: u32,
}

impl CanvasNode for Recording {
    fn set_position(&mut self, p: Vec2) {
        self.position = Some(p);
    }
    fn set_rotation(&mut self, r: Vec3) {
        self.rotation = Some(r);
    }
    fn set_scale(&mut self, s: Vec2) {
        self.scale = Some(s);
    }
    fn set_pivot(&mut self, p: Vec2) {
        self.pivot = Some(p);
    }
    fn set_size(&mut self, s: Vec2) {
        self.size = Some(s);
    }
    fn set_opacity(&mut self, o: f64) {
        self.opacity = Some(o);
    }
    fn set_tint(&mut self, t: Rgba) {
        self.tint = Some(t);
    }
    fn set_layer(&mut self, l: u8) {
        self.layer = Some(l);
    }
    fn set_order(&mut self, o: i32) {
        self.order = Some(o);
    }
    fn clear(&mut self) {
        self.cleared += 1;
    }
}

impl TextNode for Recording {
    fn set_text(&mut self, t: &str) {
        self.text = Some(t.to_owned());
    }
    fn set_font_size(&mut self, s: f64) {
        self.font_size = Some(s);
    }
    fn set_alignment(&mut self, a: TextAlign) {
        self.align = Some(a);
    }
    fn set_letter_spacing(&mut self, s: f64) {
        self.letter_spacing = Some(s);
    }
    fn set_font_weight(&mut self, w: u32) {
        self.font_weight = Some(w);
    }
}

impl LineNode for Recording {
    fn set_points(&mut self, p: &[Vec3]) {
        self.points = Some(p.to_vec());
    }
    fn set_width(&mut self, w: f64) {
        self.width = Some(w);
    }
    fn set_colors(&mut self, s: Rgba, e: Rgba) {
        self.colors = Some((s, e));
    }
    fn set_opacity(&mut self, o: f64) {
        self.opacity = Some(o);
    }
    fn set_layer(&mut self, l: u8) {
        self.layer = Some(l);
    }
    fn set_order(&mut self, o: i32) {
        self.order = Some(o);
    }
    fn clear(&mut self) {
        self.cleared += 1;
    }
}

fn vp() -> Viewport {
    Viewport::new(100.0, 100.0).unwrap()
}

#[test]
fn unset_fields_leave_the_target_untouched() {
    let from = CanvasState {
        opacity: Field::Explicit(0.5),
        ..Default::default()
    };
    let to = CanvasState::default();
    let mut node = Recording::default();
    apply_canvas(&from, &to, 0.5, vp(), &mut node);

    assert_eq!(node.opacity, Some(0.5));
    assert_eq!(node.position, None);
    assert_eq!(node.tint, None);
    assert_eq!(node.size, None);
}

#[test]
fn set_fields_lerp_toward_the_next_state() {
    let from = CanvasState {
        position: Field::Explicit(Vec2::new(0.0, 0.0)),
        opacity: Field::Explicit(0.0),
        ..Default::default()
    };
    let to = CanvasState {
        position: Field::Explicit(Vec2::new(10.0, 20.0)),
        opacity: Field::Explicit(1.0),
        ..Default::default()
    };
    let mut node = Recording::default();
    apply_canvas(&from, &to, 0.5, vp(), &mut node);

    assert_eq!(node.position, Some(Vec2::new(5.0, 10.0)));
    assert_eq!(node.opacity, Some(0.5));
}

#[test]
fn fields_unset_in_to_hold_from_value() {
    let from = CanvasState {
        opacity: Field::Inherited(0.8),
        ..Default::default()
    };
    let to = CanvasState::default();
    for eased in [0.0, 0.25, 0.99, 1.0] {
        let mut node = Recording::default();
        apply_canvas(&from, &to, eased, vp(), &mut node);
        assert_eq!(node.opacity, Some(0.8));
    }
}

#[test]
fn fill_viewport_forces_size_and_suppresses_explicit_size() {
    let from = CanvasState {
        fill_viewport: Field::Explicit(true),
        size: Field::Explicit(Vec2::new(10.0, 10.0)),
        ..Default::default()
    };
    let to = CanvasState {
        size: Field::Explicit(Vec2::new(50.0, 50.0)),
        ..Default::default()
    };
    let mut node = Recording::default();
    apply_canvas(&from, &to, 0.5, vp(), &mut node);
    assert_eq!(node.size, Some(Vec2::new(100.0, 100.0)));
}

#[test]
fn opacity_composes_multiplicatively_with_tint_alpha() {
    let from = CanvasState {
        opacity: Field::Explicit(0.5),
        tint: Field::Explicit(Rgba::rgba(1.0, 0.0, 0.0, 0.8)),
        ..Default::default()
    };
    let to = from.clone();
    let mut node = Recording::default();
    apply_canvas(&from, &to, 0.0, vp(), &mut node);

    assert_eq!(node.opacity, Some(0.5));
    let tint = node.tint.unwrap();
    assert!((tint.a - 0.4).abs() < 1e-12);
    assert_eq!(tint.r, 1.0);
}

#[test]
fn layer_and_order_snap_from_the_segment_start() {
    let from = CanvasState {
        layer: Field::Explicit(1),
        order: Field::Explicit(-5),
        ..Default::default()
    };
    let to = CanvasState {
        layer: Field::Explicit(2),
        order: Field::Explicit(10),
        ..Default::default()
    };
    let mut node = Recording::default();
    apply_canvas(&from, &to, 0.9, vp(), &mut node);
    assert_eq!(node.layer, Some(1));
    assert_eq!(node.order, Some(-5));
}

#[test]
fn text_snaps_strings_and_eases_metrics() {
    let from = TextState {
        text: Field::Explicit("READY".to_owned()),
        font_size: Field::Explicit(10.0),
        align: Field::Explicit(TextAlign::Center),
        font_weight: Field::Explicit(700),
        ..Default::default()
    };
    let to = TextState {
        text: Field::Explicit("GO".to_owned()),
        font_size: Field::Explicit(20.0),
        ..Default::default()
    };
    let mut node = Recording::default();
    apply_text(&from, &to, 0.5, vp(), &mut node);

    assert_eq!(node.text.as_deref(), Some("READY"));
    assert_eq!(node.font_size, Some(15.0));
    assert_eq!(node.align, Some(TextAlign::Center));
    assert_eq!(node.font_weight, Some(700));
}

#[test]
fn line_points_lerp_index_wise() {
    let from = LineState {
        points: Field::Explicit(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        ]),
        ..Default::default()
    };
    let to = LineState {
        points: Field::Explicit(vec![
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ]),
        ..Default::default()
    };
    let mut node = Recording::default();
    apply_line(&from, &to, 0.25, &mut node);

    let pts = node.points.unwrap();
    assert_eq!(pts[0], Vec3::new(0.0, 0.25, 0.0));
    assert_eq!(pts[1], Vec3::new(1.0, 0.25, 0.0));
}

#[test]
fn line_extra_points_hold_when_to_is_shorter() {
    let from = LineState {
        points: Field::Explicit(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ]),
        ..Default::default()
    };
    let to = LineState {
        points: Field::Explicit(vec![Vec3::new(0.0, 4.0, 0.0)]),
        ..Default::default()
    };
    let mut node = Recording::default();
    apply_line(&from, &to, 0.5, &mut node);

    let pts = node.points.unwrap();
    assert_eq!(pts.len(), 3);
    assert_eq!(pts[0], Vec3::new(0.0, 2.0, 0.0));
    assert_eq!(pts[1], Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(pts[2], Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn note_override_eases_values_and_snaps_style_codes() {
    let from = NoteState {
        position: Field::Explicit(Vec2::new(0.0, 0.0)),
        alpha_mul: Field::Explicit(1.0),
        hold_direction: Field::Explicit(1),
        hold_style: Field::Explicit(2),
        ..Default::default()
    };
    let to = NoteState {
        position: Field::Explicit(Vec2::new(1.0, 0.0)),
        alpha_mul: Field::Explicit(0.0),
        hold_direction: Field::Explicit(3),
        ..Default::default()
    };
    let o = eval_note(&from, &to, 0.5);

    assert_eq!(o.position, Some(Vec2::new(0.5, 0.0)));
    assert_eq!(o.alpha_mul, Some(0.5));
    assert_eq!(o.hold_direction, Some(1));
    assert_eq!(o.hold_style, Some(2));
    assert_eq!(o.rotation, None);
    assert_eq!(o.color, None);
}
