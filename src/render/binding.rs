//! The narrow contract through which a note binding touches live gameplay
//! state.
//!
//! The gameplay subsystem owns its note entities at all times; the engine
//! only reads a transform and writes the documented override slot. A note
//! that is not currently alive is not an error: the binding's anchor holds
//! the last known transform and writes become no-ops.

use crate::foundation::core::{Rgba, Vec2, Vec3};

/// Override fields a storyboard may write onto a live note.
///
/// Every field is optional; `None` leaves the note's own value in place.
/// Positions, sizes, and offsets are in normalized note-space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoteOverride {
    /// Position override in note-space.
    pub position: Option<Vec2>,
    /// Rotation override (Euler radians).
    pub rotation: Option<Vec3>,
    /// Color override.
    pub color: Option<Rgba>,
    /// Size override in note-space.
    pub size: Option<Vec2>,
    /// Additional positional offset in note-space.
    pub offset: Option<Vec2>,
    /// Multiplier on the note's own scale.
    pub scale_mul: Option<f64>,
    /// Multiplier on the note's own alpha.
    pub alpha_mul: Option<f64>,
    /// Raw hold-direction code; swapped atomically, never eased.
    pub hold_direction: Option<i32>,
    /// Raw hold-style code; swapped atomically, never eased.
    pub hold_style: Option<i32>,
}

/// A live gameplay note reachable from the storyboard.
pub trait NoteEntity {
    /// The note's current world transform (read once per frame).
    fn world_transform(&self) -> Vec3;
    /// Write the storyboard's override fields into the note's override slot.
    fn write_override(&mut self, fields: &NoteOverride);
}

/// Lookup into the judgement/gameplay subsystem.
pub trait NoteRegistry {
    /// Whether the chart contains a note with this id at all.
    ///
    /// Checked once at load time; a storyboard object referencing an id the
    /// chart never produces is a configuration error.
    fn contains(&self, note_id: &str) -> bool;

    /// The live entity for `note_id`, if it is currently alive (spawned and
    /// not yet cleared).
    fn entity(&mut self, note_id: &str) -> Option<&mut dyn NoteEntity>;
}

/// Proxy transform tracking a live note across spawn/clear gaps.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Anchor {
    transform: Vec3,
}

impl Anchor {
    /// Update from a live entity's transform.
    pub(crate) fn track(&mut self, transform: Vec3) {
        self.transform = transform;
    }

    /// Last known transform (zero until the note first appears).
    pub(crate) fn transform(&self) -> Vec3 {
        self.transform
    }
}
