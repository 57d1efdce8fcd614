//! Per-kind easing application.
//!
//! Pure functions from `(From, To, eased progress)` onto a render target.
//! For every field set in `From`: interpolable values lerp toward `To`'s
//! value, holding `From`'s when `To` leaves the field unset; non-interpolable
//! values snap to `From`. Fields unset in `From` leave the target untouched.

use crate::animation::field::Lerp;
use crate::foundation::core::{Vec3, Viewport};
use crate::render::binding::NoteOverride;
use crate::render::target::{CanvasNode, LineNode, TextNode};
use crate::timeline::state::{CanvasState, LineState, NoteState, TextState};

pub(crate) fn apply_canvas(
    from: &CanvasState,
    to: &CanvasState,
    eased: f64,
    vp: Viewport,
    node: &mut dyn CanvasNode,
) {
    if let Some(p) = from.position.eased_toward(&to.position, eased) {
        node.set_position(p);
    }
    if let Some(r) = from.rotation.eased_toward(&to.rotation, eased) {
        node.set_rotation(r);
    }
    if let Some(s) = from.scale.eased_toward(&to.scale, eased) {
        node.set_scale(s);
    }
    if let Some(p) = from.pivot.eased_toward(&to.pivot, eased) {
        node.set_pivot(p);
    }

    // Fill-to-viewport snaps and suppresses explicit size for the frame.
    if from.fill_viewport.get() == Some(true) {
        node.set_size(vp.bounds());
    } else if let Some(s) = from.size.eased_toward(&to.size, eased) {
        node.set_size(s);
    }

    let opacity = from.opacity.eased_toward(&to.opacity, eased);
    if let Some(o) = opacity {
        node.set_opacity(o);
    }
    if let Some(tint) = from.tint.eased_toward(&to.tint, eased) {
        // Opacity composes multiplicatively with tint alpha when both are set.
        match opacity {
            Some(o) => node.set_tint(tint.with_alpha_scaled(o)),
            None => node.set_tint(tint),
        }
    }

    // Integer snaps, re-applied every update since the target may have been
    // recreated underneath us.
    if let Some(l) = from.layer.get() {
        node.set_layer(l);
    }
    if let Some(o) = from.order.get() {
        node.set_order(o);
    }
}

pub(crate) fn apply_text(
    from: &TextState,
    to: &TextState,
    eased: f64,
    vp: Viewport,
    node: &mut dyn TextNode,
) {
    apply_canvas(&from.canvas, &to.canvas, eased, vp, node);

    // Strings and discrete styles snap to the segment start.
    if let Some(text) = from.text.value() {
        node.set_text(text);
    }
    if let Some(a) = from.align.get() {
        node.set_alignment(a);
    }
    if let Some(w) = from.font_weight.get() {
        node.set_font_weight(w);
    }

    if let Some(s) = from.font_size.eased_toward(&to.font_size, eased) {
        node.set_font_size(s);
    }
    if let Some(s) = from.letter_spacing.eased_toward(&to.letter_spacing, eased) {
        node.set_letter_spacing(s);
    }
}

pub(crate) fn apply_line(from: &LineState, to: &LineState, eased: f64, node: &mut dyn LineNode) {
    if let Some(from_pts) = from.points.value() {
        let to_pts: &[Vec3] = to.points.value().map_or(&[], |v| v.as_slice());
        let pts: Vec<Vec3> = from_pts
            .iter()
            .enumerate()
            .map(|(i, a)| {
                // Indices past the shorter list hold their value.
                let b = to_pts.get(i).unwrap_or(a);
                Vec3::lerp(a, b, eased)
            })
            .collect();
        node.set_points(&pts);
    }

    if let Some(w) = from.width.eased_toward(&to.width, eased) {
        node.set_width(w);
    }
    match (
        from.color_start.eased_toward(&to.color_start, eased),
        from.color_end.eased_toward(&to.color_end, eased),
    ) {
        (Some(start), Some(end)) => node.set_colors(start, end),
        (Some(start), None) => node.set_colors(start, start),
        (None, Some(end)) => node.set_colors(end, end),
        (None, None) => {}
    }
    if let Some(o) = from.opacity.eased_toward(&to.opacity, eased) {
        node.set_opacity(o);
    }
    if let Some(l) = from.layer.get() {
        node.set_layer(l);
    }
    if let Some(o) = from.order.get() {
        node.set_order(o);
    }
}

/// Compute the override fields for a note binding at eased progress.
pub(crate) fn eval_note(from: &NoteState, to: &NoteState, eased: f64) -> NoteOverride {
    NoteOverride {
        position: from.position.eased_toward(&to.position, eased),
        rotation: from.rotation.eased_toward(&to.rotation, eased),
        color: from.color.eased_toward(&to.color, eased),
        size: from.size.eased_toward(&to.size, eased),
        offset: from.offset.eased_toward(&to.offset, eased),
        scale_mul: from.scale_mul.eased_toward(&to.scale_mul, eased),
        alpha_mul: from.alpha_mul.eased_toward(&to.alpha_mul, eased),
        // Raw style codes snap to the segment start.
        hold_direction: from.hold_direction.get(),
        hold_style: from.hold_style.get(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/easer.rs"]
mod tests;
