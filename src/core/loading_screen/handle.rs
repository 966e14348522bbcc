//=========================================================================
// Loading Screen Handle
//=========================================================================
//
// Lifecycle wrapper around one overlay resource.
//
// State machine:
//   Closed → Opening → Open → Closing → Closed
//
// Closed and Open are stable; Opening and Closing advance one tick at a
// time, driven by the underlying animation. Close is additionally gated
// by the minimum display time, measured from the moment the screen
// reported fully open.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::warn;

//=== Internal Dependencies ===============================================

use super::{AnimationStatus, LoadingScreen, ScreenConfigData, ScreenEvent};

//=== ScreenState =========================================================

/// Current position in the open/close lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    Closed,
    Opening,
    Open,
    Closing,
}

//=== ObserverId ==========================================================

/// Token returned by [`LoadingScreenHandle::subscribe`], accepted by
/// [`LoadingScreenHandle::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type ObserverFn = Box<dyn FnMut(ScreenEvent) + Send>;

//=== LoadingScreenHandle =================================================

/// Long-lived wrapper around one loading screen, reused across many
/// transitions.
///
/// Only the transient state (animation progress, elapsed display time)
/// resets per transition; the handle itself stays registered for the
/// life of the registry.
pub struct LoadingScreenHandle {
    id: String,
    min_display_time: Duration,
    state: ScreenState,
    since_opened: Duration,
    driver: Box<dyn LoadingScreen>,
    observers: Vec<(ObserverId, ObserverFn)>,
    next_observer: u64,
}

impl LoadingScreenHandle {
    //--- Construction -----------------------------------------------------

    /// Wraps `driver` with the given identity and minimum display time.
    pub fn new(
        id: impl Into<String>,
        min_display_time: Duration,
        driver: Box<dyn LoadingScreen>,
    ) -> Self {
        Self {
            id: id.into(),
            min_display_time,
            state: ScreenState::Closed,
            since_opened: Duration::ZERO,
            driver,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    //--- Accessors --------------------------------------------------------

    /// Registry key of this screen.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    /// True once the open animation has finished.
    pub fn is_open(&self) -> bool {
        self.state == ScreenState::Open
    }

    /// True once the close animation has finished.
    pub fn is_closed(&self) -> bool {
        self.state == ScreenState::Closed
    }

    /// Floor on how long the screen stays visible once fully open.
    pub fn min_display_time(&self) -> Duration {
        self.min_display_time
    }

    //--- Observers --------------------------------------------------------

    /// Adds an observer; observers fire in subscription order.
    pub fn subscribe(&mut self, observer: impl FnMut(ScreenEvent) + Send + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns false if the token is unknown.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    fn emit(&mut self, event: ScreenEvent) {
        for (_, observer) in &mut self.observers {
            observer(event);
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Forwards the caller's per-transition configuration to the driver.
    pub fn configure(&mut self, data: Option<&ScreenConfigData>) {
        self.driver.configure(data);
    }

    /// Activates the visual and starts the open animation.
    pub fn open(&mut self) {
        if self.state != ScreenState::Closed {
            warn!(
                "Loading screen '{}' cannot open from state {:?}",
                self.id, self.state
            );
            return;
        }

        self.driver.set_visible(true);
        self.emit(ScreenEvent::WillOpen);
        self.state = ScreenState::Opening;
    }

    /// Starts the close animation once the minimum display time has
    /// elapsed.
    pub fn close(&mut self) {
        if self.state != ScreenState::Open {
            warn!(
                "Loading screen '{}' cannot close from state {:?}",
                self.id, self.state
            );
            return;
        }

        self.emit(ScreenEvent::WillClose);
        self.state = ScreenState::Closing;
    }

    /// Opens immediately, skipping the animation. Bootstrap path only.
    pub fn force_open(&mut self) {
        self.driver.set_visible(true);
        self.emit(ScreenEvent::WillOpen);
        self.emit(ScreenEvent::Opened);
        self.since_opened = Duration::ZERO;
        self.state = ScreenState::Open;
    }

    /// Closes immediately, skipping the animation and the minimum
    /// display time. Bootstrap path only.
    pub fn force_close(&mut self) {
        self.emit(ScreenEvent::WillClose);
        self.emit(ScreenEvent::Closed);
        self.driver.set_visible(false);
        self.state = ScreenState::Closed;
    }

    /// Forwards a load-progress display update to the driver.
    pub fn set_load_percentage(&mut self, percent: f32) {
        self.driver.set_load_percentage(percent.clamp(0.0, 100.0));
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the transient state by one tick.
    pub fn tick(&mut self, dt: Duration) {
        match self.state {
            ScreenState::Closed => {}
            ScreenState::Opening => {
                if self.driver.animate_open(dt) == AnimationStatus::Complete {
                    self.emit(ScreenEvent::Opened);
                    self.since_opened = Duration::ZERO;
                    self.state = ScreenState::Open;
                }
            }
            ScreenState::Open => {
                self.since_opened += dt;
            }
            ScreenState::Closing => {
                self.since_opened += dt;

                // Wait out the remaining display budget before animating.
                if self.since_opened < self.min_display_time {
                    return;
                }

                if self.driver.animate_close(dt) == AnimationStatus::Complete {
                    self.emit(ScreenEvent::Closed);
                    self.driver.set_visible(false);
                    self.state = ScreenState::Closed;
                }
            }
        }
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Driver whose animations take a fixed number of ticks.
    struct CountingDriver {
        open_ticks: u32,
        close_ticks: u32,
        visible: bool,
        percent: f32,
    }

    impl CountingDriver {
        fn new(open_ticks: u32, close_ticks: u32) -> Self {
            Self {
                open_ticks,
                close_ticks,
                visible: false,
                percent: 0.0,
            }
        }
    }

    impl LoadingScreen for CountingDriver {
        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }

        fn animate_open(&mut self, _dt: Duration) -> AnimationStatus {
            if self.open_ticks > 0 {
                self.open_ticks -= 1;
            }
            if self.open_ticks == 0 {
                AnimationStatus::Complete
            } else {
                AnimationStatus::Running
            }
        }

        fn animate_close(&mut self, _dt: Duration) -> AnimationStatus {
            if self.close_ticks > 0 {
                self.close_ticks -= 1;
            }
            if self.close_ticks == 0 {
                AnimationStatus::Complete
            } else {
                AnimationStatus::Running
            }
        }

        fn set_load_percentage(&mut self, percent: f32) {
            self.percent = percent;
        }
    }

    const DT: Duration = Duration::from_millis(16);

    fn handle(min_display: Duration, open_ticks: u32, close_ticks: u32) -> LoadingScreenHandle {
        LoadingScreenHandle::new(
            "fade",
            min_display,
            Box::new(CountingDriver::new(open_ticks, close_ticks)),
        )
    }

    #[test]
    fn open_walks_through_opening_to_open() {
        let mut screen = handle(Duration::ZERO, 3, 1);
        assert!(screen.is_closed());

        screen.open();
        assert_eq!(screen.state(), ScreenState::Opening);

        screen.tick(DT);
        screen.tick(DT);
        assert_eq!(screen.state(), ScreenState::Opening);

        screen.tick(DT);
        assert!(screen.is_open());
    }

    #[test]
    fn close_respects_minimum_display_time() {
        // 100ms floor, one-tick animations.
        let mut screen = handle(Duration::from_millis(100), 1, 1);
        screen.open();
        screen.tick(DT);
        assert!(screen.is_open());

        screen.close();
        assert_eq!(screen.state(), ScreenState::Closing);

        // 6 ticks × 16ms = 96ms since opened: still inside the budget.
        for _ in 0..6 {
            screen.tick(DT);
            assert_eq!(screen.state(), ScreenState::Closing);
        }

        // 112ms since opened: the budget is spent, the animation runs.
        screen.tick(DT);
        assert!(screen.is_closed());
    }

    #[test]
    fn time_spent_open_counts_against_the_budget() {
        let mut screen = handle(Duration::from_millis(50), 1, 1);
        screen.open();
        screen.tick(DT);

        // Stay open well past the floor before closing.
        for _ in 0..10 {
            screen.tick(DT);
        }

        screen.close();
        screen.tick(DT);
        assert!(screen.is_closed());
    }

    #[test]
    fn observers_fire_in_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut screen = handle(Duration::ZERO, 1, 1);

        for tag in ["first", "second"] {
            let log = Arc::clone(&log);
            screen.subscribe(move |event| {
                log.lock().unwrap().push(format!("{}:{:?}", tag, event));
            });
        }

        screen.open();
        screen.tick(DT);
        screen.close();
        screen.tick(DT);

        let events = log.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                "first:WillOpen",
                "second:WillOpen",
                "first:Opened",
                "second:Opened",
                "first:WillClose",
                "second:WillClose",
                "first:Closed",
                "second:Closed",
            ]
        );
    }

    #[test]
    fn unsubscribe_removes_only_the_given_observer() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut screen = handle(Duration::ZERO, 1, 1);

        let kept_log = Arc::clone(&log);
        screen.subscribe(move |event| kept_log.lock().unwrap().push(format!("kept:{:?}", event)));
        let dropped_log = Arc::clone(&log);
        let dropped =
            screen.subscribe(move |event| dropped_log.lock().unwrap().push(format!("x:{:?}", event)));

        assert!(screen.unsubscribe(dropped));
        assert!(!screen.unsubscribe(dropped));

        screen.force_open();
        let events = log.lock().unwrap().clone();
        assert_eq!(events, vec!["kept:WillOpen", "kept:Opened"]);
    }

    #[test]
    fn force_variants_skip_animation_and_budget() {
        let mut screen = handle(Duration::from_secs(10), 100, 100);

        screen.force_open();
        assert!(screen.is_open());

        screen.force_close();
        assert!(screen.is_closed());
    }

    #[test]
    fn open_from_non_closed_state_is_ignored() {
        let mut screen = handle(Duration::ZERO, 2, 1);
        screen.open();
        screen.tick(DT);
        assert_eq!(screen.state(), ScreenState::Opening);

        // Misuse: a second open request mid-animation changes nothing.
        screen.open();
        assert_eq!(screen.state(), ScreenState::Opening);

        // Misuse: closing before fully open changes nothing.
        screen.close();
        assert_eq!(screen.state(), ScreenState::Opening);
    }

    #[test]
    fn percentage_is_clamped() {
        let mut screen = handle(Duration::ZERO, 1, 1);
        screen.set_load_percentage(250.0);
        screen.set_load_percentage(-10.0);
        // No panic and no state change; display values are advisory.
        assert!(screen.is_closed());
    }
}
