//=========================================================================
// Navigation Stack
//=========================================================================
//
// Owns the ordered stack of scene records and runs transitions.
//
// Each transition is a cooperative state machine advanced one step per
// tick. Suspension points are phases that return without advancing:
// waiting on a lifecycle hook, a screen animation, a load/unload ticket
// or the release of unused resources.
//
// At most one transition runs at a time; scheduling a second one while
// the first is in flight is rejected with a busy error.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, error, warn};

//=== Internal Dependencies ===============================================

use crate::core::context::StageContext;
use crate::core::error::{RootViolation, TransitionError};
use crate::core::loader::{LoadTicket, SceneLoader, WorkTicket, ACTIVATION_GATE_THRESHOLD};
use crate::core::loading_screen::LoadingScreenHandle;
use super::{
    HookPoll, PopRequest, PushRequest, SceneLifecycle, ScenePayload, SceneRecord,
    TransitionConfig,
};

//=== Transition State ====================================================

/// Operation-specific state of the in-flight transition.
enum TransitionOp {
    /// Loading a new scene onto the stack.
    Push {
        payload: Option<ScenePayload>,
        cached: bool,
    },

    /// Discarding the popped frame and reactivating the one beneath it.
    Pop {
        outgoing: SceneRecord,
        reloaded: bool,
    },

    /// Wrapping an already-present scene; bootstrap path.
    ForceSet,
}

impl TransitionOp {
    fn name(&self) -> &'static str {
        match self {
            Self::Push { .. } => "push",
            Self::Pop { .. } => "pop",
            Self::ForceSet => "force-set",
        }
    }
}

/// Where the transition currently waits.
///
/// Phases advance strictly forward; a phase that cannot advance this
/// tick suspends the transition until the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
enum TransitionPhase {
    /// Polling `will_disable` on the outgoing controller.
    WillDisable,

    /// Waiting for the loading screen to report fully open.
    OpeningScreen,

    /// Polling `on_disabled`; the scene is now hidden behind the screen.
    Disabling,

    /// Driving an additive load: forward progress below the activation
    /// gate threshold, open the gate once it is reached, wait for done.
    Loading(LoadTicket),

    /// Waiting for a scene unload (buried, bootstrap or popped).
    Unloading(WorkTicket),

    /// Waiting for unused resources to be released.
    ReleasingUnused(WorkTicket),

    /// Polling `will_enable` on the incoming controller.
    WillEnable,

    /// Waiting for the loading screen to report fully closed.
    ClosingScreen,

    /// Polling `on_enabled`; the transition ends when it reports ready.
    Enabling,
}

struct Transition {
    op: TransitionOp,
    phase: TransitionPhase,
    screen_id: String,
    /// Push: the scene being loaded. Pop: the scene being revealed.
    scene_id: String,
    gate_opened: bool,
}

//=== NavigationStack =====================================================

/// Stack of loaded scenes with orchestrated push/pop transitions.
///
/// The stack never runs on its own: the host render loop calls
/// [`tick`](Self::tick) once per frame and the in-flight transition
/// advances as far as it can. Between transitions,
/// [`active_frame`](Self::active_frame) is the scene on top.
pub struct NavigationStack {
    frames: Vec<SceneRecord>,
    transition: Option<Transition>,
}

impl NavigationStack {
    //--- Construction -----------------------------------------------------

    /// Creates an empty stack with no transition in flight.
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            transition: None,
        }
    }

    //--- Accessors --------------------------------------------------------

    /// The top of the stack, or none before the first transition.
    pub fn active_frame(&self) -> Option<&SceneRecord> {
        self.frames.last()
    }

    /// Current stack depth.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// True while a transition is in flight.
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    //--- Scheduling -------------------------------------------------------

    /// Schedules a push: load `scene_id` additively and make it the new
    /// top frame.
    ///
    /// Fails before any engine mutation if the loading screen does not
    /// resolve or a transition is already in flight.
    pub fn push(
        &mut self,
        ctx: &mut StageContext,
        request: PushRequest,
    ) -> Result<(), TransitionError> {
        if self.transition.is_some() {
            warn!(
                "Push of scene '{}' rejected: a transition is already in flight",
                request.scene_id
            );
            return Err(TransitionError::TransitionInFlight);
        }

        let PushRequest {
            scene_id,
            payload,
            cached,
            screen: config,
        } = request;

        let Some(screen) = ctx.screens.resolve(&config.screen_id) else {
            warn!(
                "Push of scene '{}' aborted: loading screen '{}' is not registered",
                scene_id, config.screen_id
            );
            return Err(TransitionError::UnresolvedLoadingScreen(config.screen_id));
        };
        screen.configure(config.data.as_ref());

        debug!(
            "Scheduling push of scene '{}' behind loading screen '{}'",
            scene_id, config.screen_id
        );
        self.transition = Some(Transition {
            op: TransitionOp::Push { payload, cached },
            phase: TransitionPhase::WillDisable,
            screen_id: config.screen_id,
            scene_id,
            gate_opened: false,
        });
        Ok(())
    }

    /// Schedules a pop: discard the top frame and reactivate the frame
    /// beneath it.
    ///
    /// Refused with no state change when fewer than two frames exist.
    /// The popped frame leaves the stack immediately; its scene is
    /// unloaded as the transition runs.
    pub fn pop(
        &mut self,
        ctx: &mut StageContext,
        request: PopRequest,
    ) -> Result<(), TransitionError> {
        if self.transition.is_some() {
            warn!("Pop rejected: a transition is already in flight");
            return Err(TransitionError::TransitionInFlight);
        }

        if self.frames.len() < 2 {
            warn!(
                "Pop refused: the stack holds {} frame(s)",
                self.frames.len()
            );
            return Err(TransitionError::StackUnderflow);
        }

        let config = request.screen;
        let Some(screen) = ctx.screens.resolve(&config.screen_id) else {
            warn!(
                "Pop aborted: loading screen '{}' is not registered",
                config.screen_id
            );
            return Err(TransitionError::UnresolvedLoadingScreen(config.screen_id));
        };
        screen.configure(config.data.as_ref());

        let revealed_id = self.frames[self.frames.len() - 2].id().to_string();
        let Some(outgoing) = self.frames.pop() else {
            return Err(TransitionError::StackUnderflow);
        };

        debug!(
            "Scheduling pop of scene '{}', revealing '{}'",
            outgoing.id(),
            revealed_id
        );
        self.transition = Some(Transition {
            op: TransitionOp::Pop {
                outgoing,
                reloaded: false,
            },
            phase: TransitionPhase::WillDisable,
            screen_id: config.screen_id,
            scene_id: revealed_id,
            gate_opened: false,
        });
        Ok(())
    }

    /// Wraps an already-instantiated controller as the new top frame,
    /// bypassing loading entirely.
    ///
    /// Used to bootstrap the first managed scene: the screen is forced
    /// open without animation, and the disable/unload phases are
    /// skipped. `scene_id` names the scene that is already present so
    /// later transitions can unload it.
    pub fn force_set_active(
        &mut self,
        ctx: &mut StageContext,
        scene_id: impl Into<String>,
        controller: Box<dyn SceneLifecycle>,
        payload: Option<ScenePayload>,
        config: TransitionConfig,
    ) -> Result<(), TransitionError> {
        if self.transition.is_some() {
            warn!("Force-set rejected: a transition is already in flight");
            return Err(TransitionError::TransitionInFlight);
        }

        let scene_id = scene_id.into();
        let Some(screen) = ctx.screens.resolve(&config.screen_id) else {
            warn!(
                "Force-set of scene '{}' aborted: loading screen '{}' is not registered",
                scene_id, config.screen_id
            );
            return Err(TransitionError::UnresolvedLoadingScreen(config.screen_id));
        };
        screen.configure(config.data.as_ref());
        screen.force_open();

        debug!("Force-setting active scene '{}'", scene_id);
        self.frames.push(SceneRecord::new(
            scene_id.clone(),
            Some(controller),
            payload,
            false,
        ));
        if let Some(record) = self.frames.last_mut() {
            record.create_controller();
        }

        self.transition = Some(Transition {
            op: TransitionOp::ForceSet,
            phase: TransitionPhase::WillEnable,
            screen_id: config.screen_id,
            scene_id,
            gate_opened: false,
        });
        Ok(())
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the in-flight transition by one cooperative step.
    ///
    /// Returns the error that aborted the transition, if any; already
    /// applied engine mutations are not rolled back.
    pub fn tick(&mut self, ctx: &mut StageContext, dt: Duration) -> Result<(), TransitionError> {
        let Some(mut tr) = self.transition.take() else {
            return Ok(());
        };

        let Some(screen) = ctx.screens.resolve(&tr.screen_id) else {
            error!(
                "Loading screen '{}' vanished mid-transition; aborting",
                tr.screen_id
            );
            return Err(TransitionError::UnresolvedLoadingScreen(tr.screen_id));
        };

        // Drive the overlay before evaluating the phase.
        screen.tick(dt);

        loop {
            match tr.phase {
                TransitionPhase::WillDisable => {
                    if let Some(controller) = outgoing_controller(&mut self.frames, &mut tr.op) {
                        if controller.will_disable() == HookPoll::Pending {
                            break;
                        }
                    }
                    screen.open();
                    tr.phase = TransitionPhase::OpeningScreen;
                }

                TransitionPhase::OpeningScreen => {
                    if !screen.is_open() {
                        break;
                    }
                    tr.phase = TransitionPhase::Disabling;
                }

                TransitionPhase::Disabling => {
                    if let Some(controller) = outgoing_controller(&mut self.frames, &mut tr.op) {
                        if controller.on_disabled() == HookPoll::Pending {
                            break;
                        }
                    }
                    // The outgoing scene is hidden; engine mutation may begin.
                    tr.phase = match &mut tr.op {
                        TransitionOp::Push { .. } => {
                            debug!("Loading scene '{}' additively", tr.scene_id);
                            TransitionPhase::Loading(ctx.loader.begin_load(&tr.scene_id))
                        }
                        TransitionOp::Pop { outgoing, reloaded } => {
                            let needs_reload = self
                                .frames
                                .last()
                                .map(|frame| !frame.has_controller())
                                .unwrap_or(false);
                            if needs_reload {
                                debug!("Reloading scene '{}' revealed by pop", tr.scene_id);
                                *reloaded = true;
                                TransitionPhase::Loading(ctx.loader.begin_load(&tr.scene_id))
                            } else {
                                TransitionPhase::Unloading(ctx.loader.begin_unload(outgoing.id()))
                            }
                        }
                        TransitionOp::ForceSet => unreachable!("force-set starts at will-enable"),
                    };
                }

                TransitionPhase::Loading(ticket) => {
                    let status = ctx.loader.poll_load(ticket);
                    if !status.done {
                        if status.progress < ACTIVATION_GATE_THRESHOLD {
                            screen.set_load_percentage(status.progress * 100.0);
                        } else if !tr.gate_opened {
                            debug!("Opening activation gate for scene '{}'", tr.scene_id);
                            ctx.loader.open_activation_gate(ticket);
                            tr.gate_opened = true;
                        }
                        break;
                    }

                    tr.phase = match &mut tr.op {
                        TransitionOp::Push { .. } => {
                            if let Some(previous) = self.frames.last_mut() {
                                if previous.is_cached() {
                                    // Buried but cached: hide without unloading.
                                    ctx.loader.set_root_active(previous.id(), false);
                                    TransitionPhase::ReleasingUnused(
                                        ctx.loader.begin_release_unused(),
                                    )
                                } else {
                                    previous.release_controller();
                                    TransitionPhase::Unloading(
                                        ctx.loader.begin_unload(previous.id()),
                                    )
                                }
                            } else if let Some(bootstrap) = ctx.bootstrap_scene.take() {
                                debug!("First push: unloading bootstrap scene '{}'", bootstrap);
                                TransitionPhase::Unloading(ctx.loader.begin_unload(&bootstrap))
                            } else {
                                TransitionPhase::ReleasingUnused(ctx.loader.begin_release_unused())
                            }
                        }
                        TransitionOp::Pop { outgoing, .. } => {
                            // Pop always destroys the popped resource.
                            TransitionPhase::Unloading(ctx.loader.begin_unload(outgoing.id()))
                        }
                        TransitionOp::ForceSet => unreachable!("force-set never loads"),
                    };
                }

                TransitionPhase::Unloading(ticket) => {
                    if !ctx.loader.poll_work(ticket) {
                        break;
                    }
                    tr.phase = TransitionPhase::ReleasingUnused(ctx.loader.begin_release_unused());
                }

                TransitionPhase::ReleasingUnused(ticket) => {
                    if !ctx.loader.poll_work(ticket) {
                        break;
                    }
                    if let Err(err) =
                        adopt(&mut self.frames, ctx.loader.as_mut(), screen, &tr.scene_id, &mut tr.op)
                    {
                        error!("{} transition aborted: {}", tr.op.name(), err);
                        screen.force_close();
                        return Err(err);
                    }
                    tr.phase = TransitionPhase::WillEnable;
                }

                TransitionPhase::WillEnable => {
                    if let Some(controller) =
                        self.frames.last_mut().and_then(|frame| frame.controller_mut())
                    {
                        if controller.will_enable() == HookPoll::Pending {
                            break;
                        }
                    }
                    screen.close();
                    tr.phase = TransitionPhase::ClosingScreen;
                }

                TransitionPhase::ClosingScreen => {
                    if !screen.is_closed() {
                        break;
                    }
                    tr.phase = TransitionPhase::Enabling;
                }

                TransitionPhase::Enabling => {
                    if let Some(controller) =
                        self.frames.last_mut().and_then(|frame| frame.controller_mut())
                    {
                        if controller.on_enabled() == HookPoll::Pending {
                            break;
                        }
                    }
                    debug!(
                        "{} transition complete; active scene is '{}'",
                        tr.op.name(),
                        self.frames.last().map(|f| f.id()).unwrap_or("<none>")
                    );
                    return Ok(());
                }
            }
        }

        self.transition = Some(tr);
        Ok(())
    }
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new()
    }
}

//=== Internal Helpers ====================================================

/// Controller whose disable hooks run for this transition: the popped
/// frame for a pop, otherwise the current top of the stack.
fn outgoing_controller<'a>(
    frames: &'a mut [SceneRecord],
    op: &'a mut TransitionOp,
) -> Option<&'a mut (dyn SceneLifecycle + 'static)> {
    match op {
        TransitionOp::Pop { outgoing, .. } => outgoing.controller_mut(),
        _ => frames.last_mut().and_then(|frame| frame.controller_mut()),
    }
}

/// Makes the target scene active and binds its controller.
///
/// Push: builds and pushes the new record. Pop: rebinds (after a reload)
/// or reactivates the revealed frame's root.
fn adopt(
    frames: &mut Vec<SceneRecord>,
    loader: &mut dyn SceneLoader,
    screen: &mut LoadingScreenHandle,
    scene_id: &str,
    op: &mut TransitionOp,
) -> Result<(), TransitionError> {
    match op {
        TransitionOp::Push { payload, cached } => {
            loader.set_active_scene(scene_id);
            let controller = take_single_root(loader, scene_id)?;
            frames.push(SceneRecord::new(
                scene_id.to_string(),
                Some(controller),
                payload.take(),
                *cached,
            ));
            screen.set_load_percentage(100.0);
            if let Some(record) = frames.last_mut() {
                record.create_controller();
            }
        }
        TransitionOp::Pop { reloaded, .. } => {
            let Some(revealed) = frames.last_mut() else {
                unreachable!("pop transition always reveals a frame")
            };
            loader.set_active_scene(revealed.id());
            if *reloaded {
                let controller = take_single_root(loader, revealed.id())?;
                revealed.bind_controller(controller);
                screen.set_load_percentage(100.0);
                revealed.create_controller();
            } else {
                loader.set_root_active(revealed.id(), true);
            }
        }
        TransitionOp::ForceSet => unreachable!("force-set adopts at schedule time"),
    }
    Ok(())
}

/// Typed single-root query: exactly one root, carrying a controller.
/// Fails closed with a structural violation otherwise.
fn take_single_root(
    loader: &mut dyn SceneLoader,
    scene_id: &str,
) -> Result<Box<dyn SceneLifecycle>, TransitionError> {
    let mut roots = loader.take_scene_roots(scene_id);

    if roots.len() > 1 {
        return Err(TransitionError::StructuralViolation {
            scene: scene_id.to_string(),
            violation: RootViolation::RootCount(roots.len()),
        });
    }
    let Some(root) = roots.pop() else {
        return Err(TransitionError::StructuralViolation {
            scene: scene_id.to_string(),
            violation: RootViolation::RootCount(0),
        });
    };

    match root.controller {
        Some(controller) => Ok(controller),
        None => Err(TransitionError::StructuralViolation {
            scene: scene_id.to_string(),
            violation: RootViolation::MissingController(root.name),
        }),
    }
}

//=== Tests ===============================================================
