//=========================================================================
// Scene Record
//=========================================================================
//
// Identity and ownership of one loaded scene on the navigation stack.
//
// The record owns the scene's root controller exclusively. When the
// underlying scene is unloaded while the record stays on the stack
// (uncached bury), the controller is released; the retained payload lets
// a reloaded controller be re-initialized on return.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{SceneLifecycle, ScenePayload};

//=== SceneRecord =========================================================

/// One entry in the navigation stack: a loaded scene, its controller and
/// the payload it was created with.
pub struct SceneRecord {
    id: String,
    controller: Option<Box<dyn SceneLifecycle>>,
    payload: Option<ScenePayload>,
    cached: bool,
}

impl SceneRecord {
    pub(crate) fn new(
        id: String,
        controller: Option<Box<dyn SceneLifecycle>>,
        payload: Option<ScenePayload>,
        cached: bool,
    ) -> Self {
        Self {
            id,
            controller,
            payload,
            cached,
        }
    }

    /// Stable identifier of the scene, also the loader key.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether burying this frame keeps its scene loaded.
    pub fn is_cached(&self) -> bool {
        self.cached
    }

    /// Whether the record currently owns a live controller.
    ///
    /// False once the scene was unloaded out from under a buried,
    /// uncached frame; the controller is rebuilt when the frame is
    /// revealed again.
    pub fn has_controller(&self) -> bool {
        self.controller.is_some()
    }

    pub(crate) fn controller_mut(&mut self) -> Option<&mut (dyn SceneLifecycle + 'static)> {
        self.controller.as_deref_mut()
    }

    /// Drops the controller; the underlying scene is going away.
    pub(crate) fn release_controller(&mut self) {
        self.controller = None;
    }

    /// Adopts a freshly built controller after a reload.
    pub(crate) fn bind_controller(&mut self, controller: Box<dyn SceneLifecycle>) {
        self.controller = Some(controller);
    }

    /// Runs `on_create` on the owned controller, delivering the retained
    /// payload.
    pub(crate) fn create_controller(&mut self) {
        if let Some(controller) = &mut self.controller {
            controller.on_create(self.payload.as_ref());
        }
    }
}

//=== Tests ===============================================================
