//! Stageline is a declarative storyboard timeline engine for rhythm-game clients.
//!
//! A storyboard is a JSON-authored set of stage objects (sprites, text, lines,
//! videos, and bindings to live gameplay notes), each driven by a sparse,
//! inheriting keyframe timeline locked to the song's playback clock. The
//! engine computes per-frame values and pushes them onto host-owned render
//! targets; it never draws anything itself.
//!
//! The public API is storyboard-oriented:
//!
//! - Parse and resolve a document with [`Storyboard::load`]
//! - Drive it once per frame with [`Storyboard::update`]
//! - Tear it down with [`Storyboard::dispose`] (also run on drop)
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod timeline;

/// Host-facing render-target and gameplay-binding contracts.
pub mod render;
/// Storyboard orchestrator.
pub mod storyboard;

pub use crate::foundation::core::{Point, Rgba, Timed, Vec2, Vec3, Viewport};
pub use crate::foundation::error::{StageError, StageResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::field::Field;
pub use crate::render::binding::{NoteEntity, NoteOverride, NoteRegistry};
pub use crate::render::target::{
    CanvasNode, HostLayer, LineNode, NodeLoad, NodePoll, SpriteNode, TextNode, VideoNode,
};
pub use crate::storyboard::Storyboard;
pub use crate::timeline::state::{StageKind, TextAlign};
