//! The storyboard orchestrator: owns every stage object's renderer and
//! drives them once per frame from the host game loop's playback clock.

use std::fmt;

use tracing::warn;

use crate::foundation::core::Viewport;
use crate::foundation::error::{StageError, StageResult};
use crate::render::binding::NoteRegistry;
use crate::render::renderer::StageRenderer;
use crate::render::target::HostLayer;
use crate::timeline::raw::{DocumentDef, StageObjectDef};

/// A loaded storyboard: one renderer per surviving stage object, updated in
/// registration order.
///
/// Per-object parse and configuration failures are contained at load time
/// (the object is dropped with a warning); only an unparseable top-level
/// document fails the load itself, degrading to "no storyboard for this
/// song" on the caller's side.
pub struct Storyboard {
    vp: Viewport,
    renderers: Vec<StageRenderer>,
}

impl Storyboard {
    /// Parse, resolve, and begin a storyboard document.
    ///
    /// `notes` is consulted for chart membership of note-binding targets;
    /// `host` supplies render-target nodes (image/video acquisition may keep
    /// suspending across the first few frames).
    #[tracing::instrument(skip_all, fields(viewport = ?vp))]
    pub fn load(
        json: &str,
        vp: Viewport,
        host: &mut dyn HostLayer,
        notes: &dyn NoteRegistry,
    ) -> StageResult<Self> {
        let doc: DocumentDef =
            serde_json::from_str(json).map_err(|e| StageError::document(e.to_string()))?;

        let mut board = Self {
            vp,
            renderers: Vec::with_capacity(doc.objects.len()),
        };
        for value in doc.objects {
            let Some(def) = StageObjectDef::from_value(value) else {
                continue;
            };
            board.add(&def, host, notes);
        }
        Ok(board)
    }

    /// Add one stage object from its raw JSON value.
    ///
    /// Returns `true` when the object was accepted; failures are logged and
    /// leave the rest of the storyboard untouched.
    pub fn add_object(
        &mut self,
        object: serde_json::Value,
        host: &mut dyn HostLayer,
        notes: &dyn NoteRegistry,
    ) -> bool {
        match StageObjectDef::from_value(object) {
            Some(def) => self.add(&def, host, notes),
            None => false,
        }
    }

    fn add(&mut self, def: &StageObjectDef, host: &mut dyn HostLayer, notes: &dyn NoteRegistry) -> bool {
        if self.renderers.iter().any(|r| r.id() == def.id) {
            warn!(id = %def.id, "dropping stage object with duplicate id");
            return false;
        }
        match StageRenderer::build(def, self.vp, notes) {
            Ok(mut renderer) => {
                renderer.begin(host);
                self.renderers.push(renderer);
                true
            }
            Err(e) => {
                warn!(id = %def.id, error = %e, "dropping stage object");
                false
            }
        }
    }

    /// Remove (and dispose) the stage object with `id`.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.renderers.iter().position(|r| r.id() == id) {
            Some(i) => {
                let mut renderer = self.renderers.remove(i);
                renderer.dispose();
                true
            }
            None => false,
        }
    }

    /// Drive every renderer for playback time `t` (seconds).
    ///
    /// `t` may move forward, jump backward on seek/retry, or stand still;
    /// renderers still acquiring resources are skipped without error.
    pub fn update(&mut self, t: f64, notes: &mut dyn NoteRegistry) {
        for renderer in &mut self.renderers {
            renderer.update(t, notes);
        }
    }

    /// Tear the storyboard down: cancel in-flight acquisitions and dispose
    /// every renderer, including ones that never reached readiness.
    ///
    /// Idempotent; also run on drop.
    pub fn dispose(&mut self) {
        for renderer in &mut self.renderers {
            renderer.dispose();
        }
    }

    /// Number of live stage objects.
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    /// `true` when no stage object survived loading.
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

// Renderers hold boxed host nodes, so Debug is hand-written.
impl fmt::Debug for Storyboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storyboard")
            .field("vp", &self.vp)
            .field("objects", &self.renderers.len())
            .finish()
    }
}

impl Drop for Storyboard {
    fn drop(&mut self) {
        self.dispose();
    }
}
