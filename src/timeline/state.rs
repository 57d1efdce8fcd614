use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::animation::ease::Ease;
use crate::animation::field::Field;
use crate::foundation::core::{Rgba, Vec2, Vec3, Viewport};
use crate::timeline::raw;

/// The closed set of stage-object kinds a storyboard can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// A canvas-anchored image.
    Sprite,
    /// A canvas-anchored text box.
    Text,
    /// A world-space polyline.
    Line,
    /// A canvas-anchored video surface.
    Video,
    /// A binding onto a live gameplay note's override slot.
    NoteBinding,
}

impl StageKind {
    /// Look up a kind by its authored name.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sprite" => Self::Sprite,
            "text" => Self::Text,
            "line" => Self::Line,
            "video" => Self::Video,
            "note_binding" | "noteBinding" | "note" => Self::NoteBinding,
            _ => return None,
        })
    }
}

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Align glyphs to the left edge.
    #[default]
    Left,
    /// Center glyphs on the anchor.
    Center,
    /// Align glyphs to the right edge.
    Right,
}

impl TextAlign {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "left" => Self::Left,
            "center" => Self::Center,
            "right" => Self::Right,
            _ => return None,
        })
    }
}

/// One resolved state's contribution to the inheritance pass.
///
/// `carried()` produces the copy that seeds the next keyframe (explicit
/// fields demote to inherited); `apply()` overwrites exactly the fields
/// present in one raw keyframe, performing all unit conversion on the way in
/// so nothing downstream re-interprets authored units.
pub(crate) trait ResolveState: Clone + Default {
    fn carried(&self) -> Self;
    fn apply(&mut self, fields: &Map<String, Value>, vp: Viewport);
}

/// Shared canvas-anchored properties of sprite, text, and video objects.
///
/// Positions and sizes are stored in pixels (mapped from normalized canvas
/// space at resolve time); rotations in radians.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub(crate) struct CanvasState {
    pub(crate) position: Field<Vec2>,
    pub(crate) rotation: Field<Vec3>,
    pub(crate) scale: Field<Vec2>,
    pub(crate) pivot: Field<Vec2>,
    pub(crate) size: Field<Vec2>,
    pub(crate) fill_viewport: Field<bool>,
    pub(crate) opacity: Field<f64>,
    pub(crate) tint: Field<Rgba>,
    pub(crate) layer: Field<u8>,
    pub(crate) order: Field<i32>,
    pub(crate) ease: Field<Ease>,
}

impl CanvasState {
    pub(crate) fn carried(&self) -> Self {
        Self {
            position: self.position.carried(),
            rotation: self.rotation.carried(),
            scale: self.scale.carried(),
            pivot: self.pivot.carried(),
            size: self.size.carried(),
            fill_viewport: self.fill_viewport.carried(),
            opacity: self.opacity.carried(),
            tint: self.tint.carried(),
            layer: self.layer.carried(),
            order: self.order.carried(),
            ease: self.ease.carried(),
        }
    }

    pub(crate) fn apply(&mut self, fields: &Map<String, Value>, vp: Viewport) {
        if let Some(p) = raw::vec2_field(fields, &["position"]) {
            self.position.set(vp.map_point(p));
        }
        if let Some(r) = raw::vec3_field(fields, &["rotation"]) {
            self.rotation.set(degrees_to_radians(r));
        }
        if let Some(s) = raw::vec2_field(fields, &["scale"]) {
            self.scale.set(s);
        }
        if let Some(p) = raw::vec2_field(fields, &["pivot"]) {
            self.pivot.set(p);
        }
        if let Some(s) = raw::vec2_field(fields, &["size"]) {
            self.size.set(vp.map_size(s));
        }
        if let Some(f) = raw::field::<bool>(fields, &["fill", "fill_viewport", "fillViewport"]) {
            self.fill_viewport.set(f);
        }
        if let Some(o) = raw::field::<f64>(fields, &["opacity"]) {
            self.opacity.set(o);
        }
        if let Some(c) = raw::color_field(fields, &["tint", "color"]) {
            self.tint.set(c);
        }
        if let Some(l) = raw::field::<i64>(fields, &["layer"]) {
            // Out-of-range layers are sanitized, not rejected.
            self.layer.set(l.clamp(0, 2) as u8);
        }
        if let Some(o) = raw::field::<i64>(fields, &["order", "draw_order", "drawOrder"]) {
            self.order.set(o.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32);
        }
        if let Some(e) = raw::ease_field(fields, &["ease"]) {
            self.ease.set(e);
        }
    }

    /// Easing selector for the segment leaving this state.
    pub(crate) fn ease(&self) -> Ease {
        self.ease.get().unwrap_or_default()
    }
}

fn degrees_to_radians(v: Vec3) -> Vec3 {
    Vec3::new(v.x.to_radians(), v.y.to_radians(), v.z.to_radians())
}

/// Resolved state of a sprite object.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub(crate) struct SpriteState {
    pub(crate) canvas: CanvasState,
    pub(crate) source: Field<String>,
}

impl ResolveState for SpriteState {
    fn carried(&self) -> Self {
        Self {
            canvas: self.canvas.carried(),
            source: self.source.carried(),
        }
    }

    fn apply(&mut self, fields: &Map<String, Value>, vp: Viewport) {
        self.canvas.apply(fields, vp);
        if let Some(s) = raw::field::<String>(fields, &["image", "source", "src"]) {
            self.source.set(s);
        }
    }
}

/// Resolved state of a text object.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub(crate) struct TextState {
    pub(crate) canvas: CanvasState,
    pub(crate) text: Field<String>,
    /// Pixels, mapped from normalized height at resolve time.
    pub(crate) font_size: Field<f64>,
    pub(crate) align: Field<TextAlign>,
    /// Pixels, mapped from normalized height at resolve time.
    pub(crate) letter_spacing: Field<f64>,
    pub(crate) font_weight: Field<u32>,
}

impl ResolveState for TextState {
    fn carried(&self) -> Self {
        Self {
            canvas: self.canvas.carried(),
            text: self.text.carried(),
            font_size: self.font_size.carried(),
            align: self.align.carried(),
            letter_spacing: self.letter_spacing.carried(),
            font_weight: self.font_weight.carried(),
        }
    }

    fn apply(&mut self, fields: &Map<String, Value>, vp: Viewport) {
        self.canvas.apply(fields, vp);
        if let Some(t) = raw::field::<String>(fields, &["text"]) {
            self.text.set(t);
        }
        if let Some(s) = raw::field::<f64>(fields, &["font_size", "fontSize"]) {
            self.font_size.set(s * vp.height);
        }
        if let Some(name) = raw::field::<String>(fields, &["align", "alignment"]) {
            match TextAlign::from_name(&name) {
                Some(a) => self.align.set(a),
                None => warn!(align = name, "dropping unknown text alignment"),
            }
        }
        if let Some(s) = raw::field::<f64>(fields, &["letter_spacing", "letterSpacing"]) {
            self.letter_spacing.set(s * vp.height);
        }
        if let Some(w) = raw::field::<u32>(fields, &["font_weight", "fontWeight"]) {
            self.font_weight.set(w);
        }
    }
}

/// Resolved state of a world-space polyline object.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub(crate) struct LineState {
    /// World-space points; a keyframe's list replaces the carry wholesale.
    pub(crate) points: Field<Vec<Vec3>>,
    pub(crate) width: Field<f64>,
    pub(crate) color_start: Field<Rgba>,
    pub(crate) color_end: Field<Rgba>,
    pub(crate) opacity: Field<f64>,
    pub(crate) layer: Field<u8>,
    pub(crate) order: Field<i32>,
    pub(crate) ease: Field<Ease>,
}

impl LineState {
    pub(crate) fn ease(&self) -> Ease {
        self.ease.get().unwrap_or_default()
    }
}

impl ResolveState for LineState {
    fn carried(&self) -> Self {
        Self {
            points: self.points.carried(),
            width: self.width.carried(),
            color_start: self.color_start.carried(),
            color_end: self.color_end.carried(),
            opacity: self.opacity.carried(),
            layer: self.layer.carried(),
            order: self.order.carried(),
            ease: self.ease.carried(),
        }
    }

    fn apply(&mut self, fields: &Map<String, Value>, _vp: Viewport) {
        if let Some(pts) = raw::field::<Vec<Vec3>>(fields, &["points"]) {
            self.points.set(pts);
        }
        if let Some(w) = raw::field::<f64>(fields, &["width", "stroke_width", "strokeWidth"]) {
            self.width.set(w);
        }
        if let Some(c) = raw::color_field(fields, &["color_start", "colorStart", "color"]) {
            self.color_start.set(c);
        }
        if let Some(c) = raw::color_field(fields, &["color_end", "colorEnd"]) {
            self.color_end.set(c);
        }
        if let Some(o) = raw::field::<f64>(fields, &["opacity"]) {
            self.opacity.set(o);
        }
        if let Some(l) = raw::field::<i64>(fields, &["layer"]) {
            self.layer.set(l.clamp(0, 2) as u8);
        }
        if let Some(o) = raw::field::<i64>(fields, &["order", "draw_order", "drawOrder"]) {
            self.order.set(o.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32);
        }
        if let Some(e) = raw::ease_field(fields, &["ease"]) {
            self.ease.set(e);
        }
    }
}

/// Resolved state of a video object.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub(crate) struct VideoState {
    pub(crate) canvas: CanvasState,
    pub(crate) source: Field<String>,
}

impl ResolveState for VideoState {
    fn carried(&self) -> Self {
        Self {
            canvas: self.canvas.carried(),
            source: self.source.carried(),
        }
    }

    fn apply(&mut self, fields: &Map<String, Value>, vp: Viewport) {
        self.canvas.apply(fields, vp);
        if let Some(s) = raw::field::<String>(fields, &["video", "source", "src"]) {
            self.source.set(s);
        }
    }
}

/// Resolved state of a note-binding object.
///
/// Position/size/offset stay in normalized note-space; the gameplay side owns
/// the mapping onto the playfield. The note id is immutable once captured.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub(crate) struct NoteState {
    pub(crate) note: Field<String>,
    pub(crate) position: Field<Vec2>,
    pub(crate) rotation: Field<Vec3>,
    pub(crate) color: Field<Rgba>,
    pub(crate) size: Field<Vec2>,
    pub(crate) offset: Field<Vec2>,
    pub(crate) scale_mul: Field<f64>,
    pub(crate) alpha_mul: Field<f64>,
    /// Raw style code, swapped atomically, never eased.
    pub(crate) hold_direction: Field<i32>,
    /// Raw style code, swapped atomically, never eased.
    pub(crate) hold_style: Field<i32>,
    pub(crate) ease: Field<Ease>,
}

impl NoteState {
    pub(crate) fn ease(&self) -> Ease {
        self.ease.get().unwrap_or_default()
    }
}

impl ResolveState for NoteState {
    fn carried(&self) -> Self {
        Self {
            note: self.note.carried(),
            position: self.position.carried(),
            rotation: self.rotation.carried(),
            color: self.color.carried(),
            size: self.size.carried(),
            offset: self.offset.carried(),
            scale_mul: self.scale_mul.carried(),
            alpha_mul: self.alpha_mul.carried(),
            hold_direction: self.hold_direction.carried(),
            hold_style: self.hold_style.carried(),
            ease: self.ease.carried(),
        }
    }

    fn apply(&mut self, fields: &Map<String, Value>, _vp: Viewport) {
        if let Some(id) = raw::field::<String>(fields, &["note", "note_id", "noteId"]) {
            match self.note.value() {
                None => self.note.set(id),
                Some(existing) if *existing != id => {
                    warn!(note = id, "ignoring note id change after first keyframe");
                }
                Some(_) => {}
            }
        }
        if let Some(p) = raw::vec2_field(fields, &["position"]) {
            self.position.set(p);
        }
        if let Some(r) = raw::vec3_field(fields, &["rotation"]) {
            self.rotation.set(degrees_to_radians(r));
        }
        if let Some(c) = raw::color_field(fields, &["color", "tint"]) {
            self.color.set(c);
        }
        if let Some(s) = raw::vec2_field(fields, &["size"]) {
            self.size.set(s);
        }
        if let Some(o) = raw::vec2_field(fields, &["offset"]) {
            self.offset.set(o);
        }
        if let Some(m) = raw::field::<f64>(fields, &["scale_mul", "scaleMul"]) {
            self.scale_mul.set(m);
        }
        if let Some(m) = raw::field::<f64>(fields, &["alpha_mul", "alphaMul"]) {
            self.alpha_mul.set(m);
        }
        if let Some(d) = raw::field::<i32>(fields, &["hold_direction", "holdDirection"]) {
            self.hold_direction.set(d);
        }
        if let Some(s) = raw::field::<i32>(fields, &["hold_style", "holdStyle"]) {
            self.hold_style.set(s);
        }
        if let Some(e) = raw::ease_field(fields, &["ease"]) {
            self.ease.set(e);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/state.rs"]
mod tests;
