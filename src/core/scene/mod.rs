//=========================================================================
// Scene System
//=========================================================================
//
// Stack-based scene lifecycle orchestration.
//
// Architecture:
//   NavigationStack
//     ├─ frames: Vec<SceneRecord>        (last = active)
//     └─ transition: Option<Transition>  (at most one in flight)
//
// Flow:
//   push()/pop()/force_set_active() → tick() advances the transition
//   one cooperative step per render frame
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Module Declarations =================================================

mod navigation;
mod record;
mod transition;

//=== Public API ==========================================================

pub use navigation::NavigationStack;
pub use record::SceneRecord;
pub use transition::{
    PopRequest, PushRequest, TransitionConfig, TransitionQueue, TransitionRequest,
};

//=== Scene Payload =======================================================

/// Opaque data handed to a scene controller at creation time.
///
/// Owned by the frame that carries it and read-only to the core; the
/// record retains it so a controller rebuilt after a reload receives the
/// same data again.
pub type ScenePayload = Box<dyn Any + Send>;

//=== Hook Polling ========================================================

/// Result of polling a suspending lifecycle hook.
///
/// Hooks are polled once per tick until they report [`HookPoll::Ready`];
/// a `Pending` result suspends the transition for the rest of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPoll {
    /// The hook has more work to do; poll again next tick.
    Pending,

    /// The hook has finished; the transition may advance.
    Ready,
}

//=== Scene Lifecycle Trait ===============================================

/// Lifecycle contract implemented by every scene's root controller.
///
/// The orchestrator drives these hooks in a fixed order around each
/// transition: `will_disable` → (screen opens) → `on_disabled` on the
/// outgoing scene, then `on_create` → `will_enable` → (screen closes) →
/// `on_enabled` on the incoming one.
///
/// # Minimal Implementation
///
/// Only `on_create` is required. The four suspending hooks default to an
/// immediate [`HookPoll::Ready`]:
///
/// ```rust
/// # use proscenium::core::scene::{SceneLifecycle, ScenePayload};
/// struct Hud;
///
/// impl SceneLifecycle for Hud {
///     fn on_create(&mut self, _payload: Option<&ScenePayload>) {}
/// }
/// ```
pub trait SceneLifecycle: Send {
    /// Called exactly once when the controller is bound to a frame,
    /// before any other hook. Delivers the frame's payload.
    fn on_create(&mut self, payload: Option<&ScenePayload>);

    /// Polled before the loading screen starts closing over this scene.
    fn will_enable(&mut self) -> HookPoll {
        HookPoll::Ready
    }

    /// Polled after the loading screen has fully closed and the scene is
    /// visible.
    fn on_enabled(&mut self) -> HookPoll {
        HookPoll::Ready
    }

    /// Polled before the loading screen starts opening over this scene.
    fn will_disable(&mut self) -> HookPoll {
        HookPoll::Ready
    }

    /// Polled once the loading screen fully hides this scene.
    fn on_disabled(&mut self) -> HookPoll {
        HookPoll::Ready
    }
}
