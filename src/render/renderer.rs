use std::fmt;

use tracing::{debug, trace, warn};

use crate::foundation::core::{Timed, Viewport};
use crate::foundation::error::{StageError, StageResult};
use crate::render::binding::{Anchor, NoteRegistry};
use crate::render::easer;
use crate::render::target::{HostLayer, LineNode, NodeLoad, NodePoll, SpriteNode, TextNode, VideoNode};
use crate::timeline::raw::StageObjectDef;
use crate::timeline::resolve::resolve;
use crate::timeline::schedule::Cursor;
use crate::timeline::state::{
    LineState, NoteState, SpriteState, StageKind, TextState, VideoState,
};

/// Renderer lifecycle.
///
/// `Uninitialized -> Initializing -> Ready -> Disposed`, with `Failed` as the
/// terminal parking state for configuration and resource errors. A renderer
/// that is not `Ready` is skipped by the storyboard without error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    Uninitialized,
    Initializing,
    Ready,
    Failed,
    Disposed,
}

type SpriteLoad = Box<dyn NodeLoad<Node = Box<dyn SpriteNode>>>;
type VideoLoad = Box<dyn NodeLoad<Node = Box<dyn VideoNode>>>;

enum Payload {
    Sprite {
        states: Vec<Timed<SpriteState>>,
        source: String,
        load: Option<SpriteLoad>,
        node: Option<Box<dyn SpriteNode>>,
    },
    Text {
        states: Vec<Timed<TextState>>,
        node: Option<Box<dyn TextNode>>,
    },
    Line {
        states: Vec<Timed<LineState>>,
        node: Option<Box<dyn LineNode>>,
    },
    Video {
        states: Vec<Timed<VideoState>>,
        source: String,
        load: Option<VideoLoad>,
        node: Option<Box<dyn VideoNode>>,
    },
    Note {
        states: Vec<Timed<NoteState>>,
        note_id: String,
        anchor: Anchor,
    },
}

/// One stage object's renderer: resolved states, lifecycle, and the owned
/// render target (or binding anchor).
pub(crate) struct StageRenderer {
    id: String,
    vp: Viewport,
    phase: Phase,
    cursor: Cursor,
    payload: Payload,
}

impl StageRenderer {
    /// Resolve an object definition into an `Uninitialized` renderer.
    ///
    /// Configuration errors (unknown kind, bad keyframe ordering, required
    /// field never set, note id unknown to the chart) surface here so the
    /// storyboard can drop just this object.
    pub(crate) fn build(
        def: &StageObjectDef,
        vp: Viewport,
        notes: &dyn NoteRegistry,
    ) -> StageResult<Self> {
        let kind = StageKind::from_name(&def.kind).ok_or_else(|| {
            StageError::config(format!(
                "stage object \"{}\" has unknown kind \"{}\"",
                def.id, def.kind
            ))
        })?;

        let payload = match kind {
            StageKind::Sprite => {
                let states: Vec<Timed<SpriteState>> = resolve(&def.id, &def.keyframes, vp)?;
                let source = required_source(&def.id, &states, |s| &s.source, "image")?;
                Payload::Sprite {
                    states,
                    source,
                    load: None,
                    node: None,
                }
            }
            StageKind::Text => Payload::Text {
                states: resolve(&def.id, &def.keyframes, vp)?,
                node: None,
            },
            StageKind::Line => Payload::Line {
                states: resolve(&def.id, &def.keyframes, vp)?,
                node: None,
            },
            StageKind::Video => {
                let states: Vec<Timed<VideoState>> = resolve(&def.id, &def.keyframes, vp)?;
                let source = required_source(&def.id, &states, |s| &s.source, "video")?;
                Payload::Video {
                    states,
                    source,
                    load: None,
                    node: None,
                }
            }
            StageKind::NoteBinding => {
                let states: Vec<Timed<NoteState>> = resolve(&def.id, &def.keyframes, vp)?;
                // First keyframe's note field, else the authored parent id.
                let note_id = states
                    .first()
                    .and_then(|s| s.value.note.cloned())
                    .or_else(|| def.parent_id.clone())
                    .ok_or_else(|| {
                        StageError::config(format!(
                            "note binding \"{}\" never names a target note",
                            def.id
                        ))
                    })?;
                if !notes.contains(&note_id) {
                    return Err(StageError::config(format!(
                        "note binding \"{}\" references note \"{note_id}\" not present in the chart",
                        def.id
                    )));
                }
                Payload::Note {
                    states,
                    note_id,
                    anchor: Anchor::default(),
                }
            }
        };

        Ok(Self {
            id: def.id.clone(),
            vp,
            phase: Phase::Uninitialized,
            cursor: Cursor::new(),
            payload,
        })
    }

    pub(crate) fn id(&self) -> &str {
        &self.id
    }

    #[cfg(test)]
    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    /// Begin resource acquisition (or go straight to `Ready` for kinds whose
    /// targets are created synchronously).
    pub(crate) fn begin(&mut self, host: &mut dyn HostLayer) {
        if self.phase != Phase::Uninitialized {
            return;
        }
        match &mut self.payload {
            Payload::Sprite { source, load, .. } => {
                *load = Some(host.load_sprite(source));
                self.phase = Phase::Initializing;
            }
            Payload::Video { source, load, .. } => {
                *load = Some(host.load_video(source));
                self.phase = Phase::Initializing;
            }
            Payload::Text { node, .. } => {
                let mut n = host.create_text();
                n.clear();
                *node = Some(n);
                self.phase = Phase::Ready;
            }
            Payload::Line { node, .. } => {
                let mut n = host.create_line();
                n.clear();
                *node = Some(n);
                self.phase = Phase::Ready;
            }
            Payload::Note { .. } => {
                self.phase = Phase::Ready;
            }
        }
        debug!(id = %self.id, phase = ?self.phase, "stage renderer began");
    }

    /// Per-frame update at playback time `t` (seconds).
    ///
    /// While `Initializing`, polls the pending load and otherwise does
    /// nothing; a renderer that is `Failed` or `Disposed` is a no-op.
    pub(crate) fn update(&mut self, t: f64, notes: &mut dyn NoteRegistry) {
        if self.phase == Phase::Initializing {
            self.poll_load();
        }
        if self.phase != Phase::Ready {
            return;
        }

        match &mut self.payload {
            Payload::Sprite { states, node, .. } => {
                if let Some(node) = node {
                    let b = self.cursor.locate(states, t, |s| s.canvas.ease());
                    easer::apply_canvas(
                        &b.from.value.canvas,
                        &b.to.value.canvas,
                        b.eased,
                        self.vp,
                        node.as_mut(),
                    );
                }
            }
            Payload::Text { states, node } => {
                if let Some(node) = node {
                    let b = self.cursor.locate(states, t, |s| s.canvas.ease());
                    easer::apply_text(&b.from.value, &b.to.value, b.eased, self.vp, node.as_mut());
                }
            }
            Payload::Line { states, node } => {
                if let Some(node) = node {
                    let b = self.cursor.locate(states, t, |s| s.ease());
                    easer::apply_line(&b.from.value, &b.to.value, b.eased, node.as_mut());
                }
            }
            Payload::Video { states, node, .. } => {
                if let Some(node) = node {
                    let b = self.cursor.locate(states, t, |s| s.canvas.ease());
                    easer::apply_canvas(
                        &b.from.value.canvas,
                        &b.to.value.canvas,
                        b.eased,
                        self.vp,
                        node.as_mut(),
                    );
                }
            }
            Payload::Note {
                states,
                note_id,
                anchor,
            } => {
                let b = self.cursor.locate(states, t, |s| s.ease());
                let fields = easer::eval_note(&b.from.value, &b.to.value, b.eased);
                match notes.entity(note_id) {
                    Some(entity) => {
                        anchor.track(entity.world_transform());
                        entity.write_override(&fields);
                    }
                    None => {
                        // Not currently alive: anchor holds, write is a no-op.
                        trace!(
                            id = %self.id,
                            note = %note_id,
                            last_transform = ?anchor.transform(),
                            "bound note not alive"
                        );
                    }
                }
            }
        }
    }

    fn poll_load(&mut self) {
        let polled = match &mut self.payload {
            Payload::Sprite { load, node, .. } => poll_into(load, node),
            Payload::Video { load, node, .. } => poll_into(load, node),
            _ => return,
        };
        match polled {
            LoadStep::Pending => {}
            LoadStep::Ready => {
                self.clear();
                self.phase = Phase::Ready;
                debug!(id = %self.id, "stage renderer ready");
            }
            LoadStep::Failed(msg) => {
                self.phase = Phase::Failed;
                warn!(
                    id = %self.id,
                    error = %StageError::resource(msg),
                    "stage renderer failed to acquire its target; object will be absent"
                );
            }
        }
    }

    /// Reset the render target to its inert default. Idempotent; a renderer
    /// without a target yet is a no-op.
    pub(crate) fn clear(&mut self) {
        match &mut self.payload {
            Payload::Sprite { node, .. } => {
                if let Some(n) = node {
                    n.clear();
                }
            }
            Payload::Text { node, .. } => {
                if let Some(n) = node {
                    n.clear();
                }
            }
            Payload::Line { node, .. } => {
                if let Some(n) = node {
                    n.clear();
                }
            }
            Payload::Video { node, .. } => {
                if let Some(n) = node {
                    n.clear();
                }
            }
            Payload::Note { .. } => {}
        }
    }

    /// Release the render target and any in-flight load. Idempotent; safe
    /// from any phase, including renderers that never reached `Ready`.
    pub(crate) fn dispose(&mut self) {
        if self.phase == Phase::Disposed {
            return;
        }
        match &mut self.payload {
            Payload::Sprite { load, node, .. } => {
                // Dropping a pending load cancels it.
                *load = None;
                *node = None;
            }
            Payload::Video { load, node, .. } => {
                *load = None;
                *node = None;
            }
            Payload::Text { node, .. } => *node = None,
            Payload::Line { node, .. } => *node = None,
            Payload::Note { .. } => {}
        }
        self.phase = Phase::Disposed;
        debug!(id = %self.id, "stage renderer disposed");
    }
}

// The payload holds boxed host nodes, so Debug is hand-written.
impl fmt::Debug for StageRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageRenderer")
            .field("id", &self.id)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

enum LoadStep {
    Pending,
    Ready,
    Failed(String),
}

fn poll_into<N>(load: &mut Option<Box<dyn NodeLoad<Node = N>>>, node: &mut Option<N>) -> LoadStep {
    let Some(pending) = load.as_mut() else {
        return LoadStep::Failed("no pending load".to_owned());
    };
    match pending.poll() {
        NodePoll::Pending => LoadStep::Pending,
        NodePoll::Ready(n) => {
            *node = Some(n);
            *load = None;
            LoadStep::Ready
        }
        NodePoll::Failed(msg) => {
            *load = None;
            LoadStep::Failed(msg)
        }
    }
}

/// The asset source for a sprite/video object: the first resolved state that
/// sets it wins, matching the note-id capture. A source that changes in a
/// later keyframe is not re-loaded.
fn required_source<S, F>(
    id: &str,
    states: &[Timed<S>],
    source_of: F,
    what: &str,
) -> StageResult<String>
where
    F: Fn(&S) -> &crate::animation::field::Field<String>,
{
    let source = states
        .iter()
        .find_map(|s| source_of(&s.value).cloned())
        .ok_or_else(|| {
            StageError::config(format!(
                "stage object \"{id}\" never sets a {what} source in any keyframe"
            ))
        })?;
    if states
        .iter()
        .filter_map(|s| source_of(&s.value).value())
        .any(|s| *s != source)
    {
        warn!(
            id = %id,
            source = %source,
            "{what} source changes across keyframes; only the first is loaded"
        );
    }
    Ok(source)
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
