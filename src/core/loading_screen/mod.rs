//=========================================================================
// Loading Screen System
//=========================================================================
//
// Transient overlay resources that hide transitions in progress.
//
// Architecture:
//   LoadingScreenRegistry
//     └─ screens: HashMap<String, LoadingScreenHandle>
//          └─ driver: Box<dyn LoadingScreen>   (the concrete visual)
//
// The handle owns the open/close state machine, the minimum-display-time
// guarantee and the observer notifications; the driver only animates.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::time::Duration;

//=== Module Declarations =================================================

mod handle;
mod registry;

//=== Public API ==========================================================

pub use handle::{LoadingScreenHandle, ObserverId, ScreenState};
pub use registry::LoadingScreenRegistry;

//=== Screen Configuration ================================================

/// Opaque per-transition configuration handed to a screen driver before
/// it opens. Interpreted only by the concrete screen.
pub type ScreenConfigData = Box<dyn Any + Send>;

//=== AnimationStatus =====================================================

/// Result of advancing a screen animation by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    /// The animation needs more ticks.
    Running,

    /// The animation has finished.
    Complete,
}

//=== ScreenEvent =========================================================

/// Notifications fired by a loading screen handle.
///
/// Observers receive events in subscription order:
/// `WillOpen` → `Opened` → `WillClose` → `Closed` across one
/// open/close cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    /// The screen is about to start opening; its visual is now active.
    WillOpen,

    /// The open animation finished; the screen fully covers the view.
    Opened,

    /// The screen is about to start closing.
    WillClose,

    /// The close animation finished; the visual has been deactivated.
    Closed,
}

//=== LoadingScreen Trait ==================================================

/// Concrete overlay visual driven by a [`LoadingScreenHandle`].
///
/// Implementations render the actual overlay; the handle decides when to
/// animate and enforces the minimum display time. Animations are advanced
/// one tick at a time with the frame's elapsed duration.
///
/// There is no failure path here: a screen is always assumed to succeed
/// at opening and closing.
pub trait LoadingScreen: Send {
    /// Receives the caller's per-transition configuration before the
    /// screen opens. Default ignores it.
    fn configure(&mut self, _data: Option<&ScreenConfigData>) {}

    /// Activates or deactivates the overlay's visual resource.
    fn set_visible(&mut self, visible: bool);

    /// Advances the open animation by one tick.
    fn animate_open(&mut self, dt: Duration) -> AnimationStatus;

    /// Advances the close animation by one tick.
    fn animate_close(&mut self, dt: Duration) -> AnimationStatus;

    /// Advisory load-progress display in percent (0–100). Default is a
    /// no-op; screens with a progress readout render it.
    fn set_load_percentage(&mut self, _percent: f32) {}
}
