//=========================================================================
// Scene Loader Interface
//=========================================================================
//
// Core-to-engine interface for scene resource operations.
//
// Defines the contract between the orchestrator and the engine backend
// that actually loads, unloads and activates scene resources. Backends
// are swappable without changing core code; the core only ever drives
// this trait by polling once per tick.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::scene::SceneLifecycle;

//=== Activation Gate =====================================================

/// Progress value at which an additive load parks until its activation
/// gate is opened.
///
/// Loaders report monotonically increasing progress capped at this value;
/// only after [`SceneLoader::open_activation_gate`] is called does the
/// load proceed to completion. Omitting the gate call leaves the load
/// parked forever, so the constant is part of the contract rather than a
/// backend detail.
pub const ACTIVATION_GATE_THRESHOLD: f32 = 0.9;

//=== Tickets =============================================================

/// Identifies one in-flight additive load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(pub u64);

/// Identifies one in-flight unload or release-unused operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkTicket(pub u64);

//=== LoadProgress ========================================================

/// Snapshot of an additive load, polled once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadProgress {
    /// Progress in `[0, 1]`, capped at [`ACTIVATION_GATE_THRESHOLD`]
    /// until the activation gate opens.
    pub progress: f32,

    /// True once the scene is fully loaded and activated.
    pub done: bool,
}

//=== LoadPriority ========================================================

/// Background loading priority applied to the engine's loader thread.
///
/// Set exactly once when the stage context is initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPriority {
    Low,
    Normal,
    High,
}

//=== SceneRoot ===========================================================

/// One root object of a loaded scene, as reported by the loader.
///
/// The orchestrator requires exactly one root per scene, and that root
/// must carry a lifecycle controller. Both conditions are checked after
/// every load; content that breaks either aborts the transition with a
/// structural violation.
pub struct SceneRoot {
    /// Display name of the root object, used in diagnostics.
    pub name: String,

    /// The root's lifecycle controller, if it has one.
    pub controller: Option<Box<dyn SceneLifecycle>>,
}

//=== SceneLoader =========================================================

/// Engine backend for scene resource operations.
///
/// All asynchronous operations follow the same shape: a `begin_*` call
/// returns a ticket, and the matching poll method reports completion.
/// The orchestrator polls once per tick and suspends the transition
/// until the operation reports done. Nothing here blocks.
///
/// # Activation gate protocol
///
/// [`poll_load`](Self::poll_load) reports progress capped at
/// [`ACTIVATION_GATE_THRESHOLD`]. The load finishes only after
/// [`open_activation_gate`](Self::open_activation_gate) is called for
/// its ticket.
pub trait SceneLoader: Send {
    /// Applies the background loading priority. Called once at context
    /// initialization.
    fn set_loading_priority(&mut self, priority: LoadPriority);

    /// Begins loading `scene_id` additively alongside whatever is
    /// already loaded.
    fn begin_load(&mut self, scene_id: &str) -> LoadTicket;

    /// Reports the current state of an additive load.
    fn poll_load(&mut self, ticket: LoadTicket) -> LoadProgress;

    /// Permits a parked load to finish activating.
    fn open_activation_gate(&mut self, ticket: LoadTicket);

    /// Begins unloading `scene_id`.
    fn begin_unload(&mut self, scene_id: &str) -> WorkTicket;

    /// Begins releasing resources no longer referenced by any loaded
    /// scene.
    fn begin_release_unused(&mut self) -> WorkTicket;

    /// Reports whether an unload or release operation has finished.
    fn poll_work(&mut self, ticket: WorkTicket) -> bool;

    /// Marks `scene_id` as the engine's active scene.
    fn set_active_scene(&mut self, scene_id: &str);

    /// Transfers ownership of the scene's root objects to the caller.
    fn take_scene_roots(&mut self, scene_id: &str) -> Vec<SceneRoot>;

    /// Activates or deactivates the scene's root object without loading
    /// or unloading anything. Used when a cached frame is buried or
    /// revealed.
    fn set_root_active(&mut self, scene_id: &str, active: bool);
}
