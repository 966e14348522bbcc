//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use proscenium::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime facade
pub use crate::director::{Director, DirectorBuilder};

// Navigation stack and transitions
pub use crate::core::scene::{
    HookPoll, NavigationStack, PopRequest, PushRequest, SceneLifecycle, ScenePayload,
    SceneRecord, TransitionConfig, TransitionQueue, TransitionRequest,
};

// Loading screens
pub use crate::core::loading_screen::{
    AnimationStatus, LoadingScreen, LoadingScreenHandle, LoadingScreenRegistry, ObserverId,
    ScreenConfigData, ScreenEvent, ScreenState,
};

// Loader seam
pub use crate::core::loader::{
    LoadPriority, LoadProgress, LoadTicket, SceneLoader, SceneRoot, WorkTicket,
    ACTIVATION_GATE_THRESHOLD,
};

// Context and errors
pub use crate::core::context::StageContext;
pub use crate::core::error::{RootViolation, TransitionError};
