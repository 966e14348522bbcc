//=========================================================================
// Director
//
// Top-level facade owning the stage context and the navigation stack.
//
// Architecture:
// ```text
//     DirectorBuilder  ──build(loader)──>  Director  ──tick(dt)──> [host loop]
//         │                                   │
//         ├─ with_bootstrap_scene()           ├─ drains queued requests
//         └─ with_loading_priority()          └─ advances the transition
// ```
//
// The director never runs on its own: the host render loop calls
// `tick(dt)` once per frame, which first drains transition requests
// queued by scene content and then advances the in-flight transition by
// one cooperative step.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::context::StageContext;
use crate::core::error::TransitionError;
use crate::core::loader::{LoadPriority, SceneLoader};
use crate::core::loading_screen::LoadingScreenHandle;
use crate::core::scene::{
    NavigationStack, PopRequest, PushRequest, SceneLifecycle, ScenePayload, SceneRecord,
    TransitionConfig, TransitionRequest,
};

//=== DirectorBuilder =====================================================

/// Builder for configuring and constructing a [`Director`].
///
/// # Default Values
///
/// - **Bootstrap scene**: none (nothing is unloaded on the first push)
/// - **Loading priority**: [`LoadPriority::Normal`]
///
/// # Examples
///
/// ```no_run
/// use proscenium::DirectorBuilder;
/// use proscenium::core::loader::LoadPriority;
/// # fn engine_loader() -> Box<dyn proscenium::core::loader::SceneLoader> { unimplemented!() }
///
/// let director = DirectorBuilder::new()
///     .with_bootstrap_scene("Boot")
///     .with_loading_priority(LoadPriority::Low)
///     .build(engine_loader());
/// ```
pub struct DirectorBuilder {
    bootstrap_scene: Option<String>,
    loading_priority: LoadPriority,
}

impl DirectorBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bootstrap_scene: None,
            loading_priority: LoadPriority::Normal,
        }
    }

    /// Names the scene the engine started with; the first push from an
    /// empty stack unloads it.
    pub fn with_bootstrap_scene(mut self, scene_id: impl Into<String>) -> Self {
        self.bootstrap_scene = Some(scene_id.into());
        self
    }

    /// Sets the background loading priority applied to the loader once
    /// at build time.
    pub fn with_loading_priority(mut self, priority: LoadPriority) -> Self {
        self.loading_priority = priority;
        self
    }

    /// Builds the director around an engine loader backend and performs
    /// the one-time context initialization.
    pub fn build(self, loader: Box<dyn SceneLoader>) -> Director {
        info!(
            "Building director (loading priority: {:?}, bootstrap scene: {:?})",
            self.loading_priority, self.bootstrap_scene
        );

        let mut context = StageContext::new(loader);
        if let Some(scene_id) = self.bootstrap_scene {
            context.set_bootstrap_scene(scene_id);
        }
        context.init(self.loading_priority);

        Director {
            context,
            stack: NavigationStack::new(),
        }
    }
}

impl Default for DirectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Director ============================================================

/// Scene-transition orchestrator runtime.
///
/// Owns the [`StageContext`] and the [`NavigationStack`] and wires them
/// together each frame. Create via [`DirectorBuilder`].
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use proscenium::{DirectorBuilder, PushRequest};
/// # fn engine_loader() -> Box<dyn proscenium::core::loader::SceneLoader> { unimplemented!() }
///
/// let mut director = DirectorBuilder::new().build(engine_loader());
/// // register loading screens, then:
/// director.push(PushRequest::new("level1", "fade")).unwrap();
///
/// // inside the render loop:
/// if let Err(err) = director.tick(Duration::from_millis(16)) {
///     eprintln!("transition aborted: {err}");
/// }
/// ```
pub struct Director {
    context: StageContext,
    stack: NavigationStack,
}

impl Director {
    //--- Registration -----------------------------------------------------

    /// Registers a loading screen for transitions to resolve by id.
    pub fn register_loading_screen(&mut self, handle: LoadingScreenHandle) {
        self.context.screens.register(handle);
    }

    //--- Accessors --------------------------------------------------------

    /// The shared context (loader, screens, request queue).
    pub fn context(&self) -> &StageContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut StageContext {
        &mut self.context
    }

    /// The frame on top of the stack, if any.
    pub fn active_frame(&self) -> Option<&SceneRecord> {
        self.stack.active_frame()
    }

    /// Id of the active scene, if any.
    pub fn active_scene(&self) -> Option<&str> {
        self.stack.active_frame().map(SceneRecord::id)
    }

    /// Current stack depth.
    pub fn frame_count(&self) -> usize {
        self.stack.frame_count()
    }

    /// True while a transition is in flight.
    pub fn is_transitioning(&self) -> bool {
        self.stack.is_transitioning()
    }

    //--- Transitions ------------------------------------------------------

    /// Schedules a push transition. See [`NavigationStack::push`].
    pub fn push(&mut self, request: PushRequest) -> Result<(), TransitionError> {
        self.stack.push(&mut self.context, request)
    }

    /// Schedules a pop transition. See [`NavigationStack::pop`].
    pub fn pop(&mut self, request: PopRequest) -> Result<(), TransitionError> {
        self.stack.pop(&mut self.context, request)
    }

    /// Bootstraps the stack around an already-present scene. See
    /// [`NavigationStack::force_set_active`].
    pub fn force_set_active(
        &mut self,
        scene_id: impl Into<String>,
        controller: Box<dyn SceneLifecycle>,
        payload: Option<ScenePayload>,
        config: TransitionConfig,
    ) -> Result<(), TransitionError> {
        self.stack
            .force_set_active(&mut self.context, scene_id, controller, payload, config)
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the orchestrator by one frame.
    ///
    /// 1. Drains transition requests queued by scene content; rejected
    ///    requests (busy stack, unknown screen, underflow) are logged
    ///    and dropped.
    /// 2. Advances the in-flight transition by one cooperative step,
    ///    returning the error that aborted it, if any.
    pub fn tick(&mut self, dt: Duration) -> Result<(), TransitionError> {
        for request in self.context.requests.take() {
            let result = match request {
                TransitionRequest::Push(request) => self.stack.push(&mut self.context, request),
                TransitionRequest::Pop(request) => self.stack.pop(&mut self.context, request),
            };
            if let Err(err) = result {
                warn!("Queued transition dropped: {}", err);
            }
        }

        self.stack.tick(&mut self.context, dt)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::core::loader::{LoadProgress, LoadTicket, SceneRoot, WorkTicket};
    use crate::core::loading_screen::{AnimationStatus, LoadingScreen};
    use crate::core::scene::{HookPoll, ScenePayload, SceneLifecycle};

    const DT: Duration = Duration::from_millis(16);

    //--- Mocks ------------------------------------------------------------

    /// Loader whose operations complete on their first poll.
    struct InstantLoader {
        roots: Arc<Mutex<HashMap<String, Vec<SceneRoot>>>>,
        priority: Arc<Mutex<Option<LoadPriority>>>,
        next_ticket: u64,
    }

    impl SceneLoader for InstantLoader {
        fn set_loading_priority(&mut self, priority: LoadPriority) {
            *self.priority.lock().unwrap() = Some(priority);
        }

        fn begin_load(&mut self, _scene_id: &str) -> LoadTicket {
            self.next_ticket += 1;
            LoadTicket(self.next_ticket)
        }

        fn poll_load(&mut self, _ticket: LoadTicket) -> LoadProgress {
            LoadProgress {
                progress: 1.0,
                done: true,
            }
        }

        fn open_activation_gate(&mut self, _ticket: LoadTicket) {}

        fn begin_unload(&mut self, _scene_id: &str) -> WorkTicket {
            self.next_ticket += 1;
            WorkTicket(self.next_ticket)
        }

        fn begin_release_unused(&mut self) -> WorkTicket {
            self.next_ticket += 1;
            WorkTicket(self.next_ticket)
        }

        fn poll_work(&mut self, _ticket: WorkTicket) -> bool {
            true
        }

        fn set_active_scene(&mut self, _scene_id: &str) {}

        fn take_scene_roots(&mut self, scene_id: &str) -> Vec<SceneRoot> {
            self.roots
                .lock()
                .unwrap()
                .remove(scene_id)
                .unwrap_or_default()
        }

        fn set_root_active(&mut self, _scene_id: &str, _active: bool) {}
    }

    struct InstantScreen;

    impl LoadingScreen for InstantScreen {
        fn set_visible(&mut self, _visible: bool) {}

        fn animate_open(&mut self, _dt: Duration) -> AnimationStatus {
            AnimationStatus::Complete
        }

        fn animate_close(&mut self, _dt: Duration) -> AnimationStatus {
            AnimationStatus::Complete
        }
    }

    struct SilentController;

    impl SceneLifecycle for SilentController {
        fn on_create(&mut self, _payload: Option<&ScenePayload>) {}

        fn will_enable(&mut self) -> HookPoll {
            HookPoll::Ready
        }
    }

    fn director_with_screen() -> (Director, Arc<Mutex<HashMap<String, Vec<SceneRoot>>>>) {
        let roots = Arc::new(Mutex::new(HashMap::new()));
        let loader = InstantLoader {
            roots: Arc::clone(&roots),
            priority: Arc::new(Mutex::new(None)),
            next_ticket: 0,
        };
        let mut director = DirectorBuilder::new().build(Box::new(loader));
        director.register_loading_screen(LoadingScreenHandle::new(
            "fade",
            Duration::ZERO,
            Box::new(InstantScreen),
        ));
        (director, roots)
    }

    fn script_root(roots: &Arc<Mutex<HashMap<String, Vec<SceneRoot>>>>, scene: &str) {
        roots.lock().unwrap().insert(
            scene.to_string(),
            vec![SceneRoot {
                name: "Root".to_string(),
                controller: Some(Box::new(SilentController)),
            }],
        );
    }

    fn run_to_idle(director: &mut Director) {
        for _ in 0..100 {
            if !director.is_transitioning() {
                return;
            }
            director.tick(DT).expect("transition failed unexpectedly");
        }
        panic!("transition did not settle within 100 ticks");
    }

    //--- Builder ----------------------------------------------------------

    #[test]
    fn builder_defaults() {
        let builder = DirectorBuilder::new();
        assert!(builder.bootstrap_scene.is_none());
        assert_eq!(builder.loading_priority, LoadPriority::Normal);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let builder = DirectorBuilder::new()
            .with_bootstrap_scene("Boot")
            .with_loading_priority(LoadPriority::High);

        assert_eq!(builder.bootstrap_scene.as_deref(), Some("Boot"));
        assert_eq!(builder.loading_priority, LoadPriority::High);
    }

    #[test]
    fn build_initializes_the_context() {
        let priority = Arc::new(Mutex::new(None));
        let loader = InstantLoader {
            roots: Arc::new(Mutex::new(HashMap::new())),
            priority: Arc::clone(&priority),
            next_ticket: 0,
        };

        let director = DirectorBuilder::new()
            .with_bootstrap_scene("Boot")
            .with_loading_priority(LoadPriority::Low)
            .build(Box::new(loader));

        assert!(director.context().is_initialized());
        assert_eq!(director.context().bootstrap_scene(), Some("Boot"));
        assert_eq!(*priority.lock().unwrap(), Some(LoadPriority::Low));
    }

    //--- Facade -----------------------------------------------------------

    #[test]
    fn push_runs_through_the_facade() {
        let (mut director, roots) = director_with_screen();
        script_root(&roots, "level1");

        director
            .push(PushRequest::new("level1", "fade"))
            .expect("push scheduled");
        run_to_idle(&mut director);

        assert_eq!(director.frame_count(), 1);
        assert_eq!(director.active_scene(), Some("level1"));
    }

    #[test]
    fn queued_requests_are_drained_at_the_tick_boundary() {
        let (mut director, roots) = director_with_screen();
        script_root(&roots, "level1");

        director
            .context_mut()
            .requests
            .push(TransitionRequest::Push(PushRequest::new("level1", "fade")));
        assert!(!director.is_transitioning());

        director.tick(DT).expect("tick");
        assert!(director.is_transitioning());
        run_to_idle(&mut director);
        assert_eq!(director.active_scene(), Some("level1"));
    }

    #[test]
    fn conflicting_queued_requests_are_dropped_not_fatal() {
        let (mut director, roots) = director_with_screen();
        script_root(&roots, "level1");

        // The pop is rejected (busy after the push is accepted) and the
        // tick still succeeds.
        director
            .context_mut()
            .requests
            .push(TransitionRequest::Push(PushRequest::new("level1", "fade")));
        director
            .context_mut()
            .requests
            .push(TransitionRequest::Pop(PopRequest::new("fade")));

        director.tick(DT).expect("tick");
        run_to_idle(&mut director);

        assert_eq!(director.frame_count(), 1);
        assert_eq!(director.active_scene(), Some("level1"));
    }

    #[test]
    fn force_set_active_bootstraps_through_the_facade() {
        let (mut director, _roots) = director_with_screen();

        director
            .force_set_active(
                "Boot",
                Box::new(SilentController),
                None,
                TransitionConfig::new("fade"),
            )
            .expect("force-set scheduled");
        run_to_idle(&mut director);

        assert_eq!(director.frame_count(), 1);
        assert_eq!(director.active_scene(), Some("Boot"));
    }
}
