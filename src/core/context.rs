//=========================================================================
// Stage Context
//=========================================================================
//
// Shared collaborator container for transitions.
//
// Bundles everything a transition touches besides the stack itself:
// - loader: the engine backend for scene resource operations
// - screens: registry of loading screen handles
// - requests: queue of transitions scheduled by scene content
// - bootstrap scene: the engine's startup scene, unloaded by the first
//   push from an empty stack
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::loader::{LoadPriority, SceneLoader};
use crate::core::loading_screen::LoadingScreenRegistry;
use crate::core::scene::TransitionQueue;

//=== StageContext ========================================================

/// Shared context passed into the navigation stack each tick.
///
/// Constructed once around an engine loader backend; initialized exactly
/// once (the initialization applies the background loading priority to
/// the loader).
pub struct StageContext {
    /// Engine backend for load/unload/activation operations.
    pub loader: Box<dyn SceneLoader>,

    /// Loading screens available to transitions.
    pub screens: LoadingScreenRegistry,

    /// Transition requests queued by scene content, drained at the tick
    /// boundary.
    pub requests: TransitionQueue,

    /// Startup scene consumed (unloaded) by the first push from an
    /// empty stack.
    pub(crate) bootstrap_scene: Option<String>,

    initialized: bool,
}

impl StageContext {
    /// Creates an uninitialized context around an engine loader.
    pub fn new(loader: Box<dyn SceneLoader>) -> Self {
        Self {
            loader,
            screens: LoadingScreenRegistry::new(),
            requests: TransitionQueue::new(),
            bootstrap_scene: None,
            initialized: false,
        }
    }

    //--- Initialization ---------------------------------------------------

    /// One-time initialization: applies the background loading priority.
    ///
    /// Repeat calls are ignored with a warning; the initialized flag
    /// only ever moves from false to true.
    pub fn init(&mut self, priority: LoadPriority) {
        if self.initialized {
            warn!("Stage context is already initialized");
            return;
        }

        debug!("Initializing stage context (loading priority: {:?})", priority);
        self.loader.set_loading_priority(priority);
        self.initialized = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    //--- Bootstrap Scene --------------------------------------------------

    /// Names the scene the engine started with.
    ///
    /// The first push from an empty stack unloads it; a stack
    /// bootstrapped with a force-set instead wraps that scene as a
    /// managed frame and the name stays in place.
    pub fn set_bootstrap_scene(&mut self, scene_id: impl Into<String>) {
        self.bootstrap_scene = Some(scene_id.into());
    }

    /// Scene name the first push will unload, if still pending.
    pub fn bootstrap_scene(&self) -> Option<&str> {
        self.bootstrap_scene.as_deref()
    }
}

//=== Tests ===============================================================
