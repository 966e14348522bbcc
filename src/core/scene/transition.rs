//=========================================================================
// Transition Requests
//=========================================================================
//
// Request types for scene transitions, plus the queue scene content uses
// to schedule them.
//
// Content queues requests during updates; the director drains the queue
// at the tick boundary and hands each request to the navigation stack.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::ScenePayload;
use crate::core::loading_screen::ScreenConfigData;

//=== TransitionConfig ====================================================

/// Per-transition loading-screen selection and configuration.
pub struct TransitionConfig {
    /// Registry key of the loading screen to display.
    pub screen_id: String,

    /// Opaque configuration handed to the screen before it opens.
    pub data: Option<ScreenConfigData>,
}

impl TransitionConfig {
    pub fn new(screen_id: impl Into<String>) -> Self {
        Self {
            screen_id: screen_id.into(),
            data: None,
        }
    }

    /// Attaches opaque configuration data for the screen.
    pub fn with_data(mut self, data: ScreenConfigData) -> Self {
        self.data = Some(data);
        self
    }
}

//=== PushRequest =========================================================

/// Parameters for pushing a new scene onto the stack.
pub struct PushRequest {
    /// Loader key of the scene to load additively.
    pub scene_id: String,

    /// Opaque data delivered to the scene's controller at creation.
    pub payload: Option<ScenePayload>,

    /// If true, burying this frame later keeps its scene loaded.
    pub cached: bool,

    /// Loading screen shown while the transition runs.
    pub screen: TransitionConfig,
}

impl PushRequest {
    pub fn new(scene_id: impl Into<String>, screen_id: impl Into<String>) -> Self {
        Self {
            scene_id: scene_id.into(),
            payload: None,
            cached: false,
            screen: TransitionConfig::new(screen_id),
        }
    }

    pub fn with_payload(mut self, payload: ScenePayload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn cached(mut self, cached: bool) -> Self {
        self.cached = cached;
        self
    }

    pub fn with_screen_data(mut self, data: ScreenConfigData) -> Self {
        self.screen.data = Some(data);
        self
    }
}

//=== PopRequest ==========================================================

/// Parameters for popping the active scene off the stack.
pub struct PopRequest {
    /// Loading screen shown while the transition runs.
    pub screen: TransitionConfig,
}

impl PopRequest {
    pub fn new(screen_id: impl Into<String>) -> Self {
        Self {
            screen: TransitionConfig::new(screen_id),
        }
    }

    pub fn with_screen_data(mut self, data: ScreenConfigData) -> Self {
        self.screen.data = Some(data);
        self
    }
}

//=== TransitionRequest ===================================================

/// A queued stack operation.
///
/// Force-set is deliberately absent: it is the synchronous bootstrap
/// path and is invoked directly on the stack.
pub enum TransitionRequest {
    /// Load a scene and make it the new top frame.
    Push(PushRequest),

    /// Discard the top frame and reactivate the one beneath it.
    Pop(PopRequest),
}

//=== Transition Queue ====================================================

/// Queue for transition requests.
///
/// Content queues requests here during updates. The director drains the
/// queue at the next tick boundary.
pub struct TransitionQueue {
    queue: Vec<TransitionRequest>,
}

impl TransitionQueue {
    /// Creates a new empty transition queue.
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a request to be processed at the next tick boundary.
    pub fn push(&mut self, request: TransitionRequest) {
        self.queue.push(request);
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of queued requests.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Clears all queued requests.
    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Takes all requests from the queue, leaving it empty.
    ///
    /// Used by the director to process the queue without holding a
    /// borrow across the stack calls.
    pub fn take(&mut self) -> Vec<TransitionRequest> {
        std::mem::take(&mut self.queue)
    }
}

impl Default for TransitionQueue {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_empties_the_queue() {
        let mut queue = TransitionQueue::new();
        queue.push(TransitionRequest::Push(PushRequest::new("level1", "fade")));
        queue.push(TransitionRequest::Pop(PopRequest::new("fade")));
        assert_eq!(queue.len(), 2);

        let taken = queue.take();
        assert_eq!(taken.len(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn push_request_builder_sets_fields() {
        let request = PushRequest::new("level1", "fade")
            .cached(true)
            .with_payload(Box::new(3_u32))
            .with_screen_data(Box::new("dark"));

        assert_eq!(request.scene_id, "level1");
        assert_eq!(request.screen.screen_id, "fade");
        assert!(request.cached);
        assert!(request.payload.is_some());
        assert!(request.screen.data.is_some());
    }

    #[test]
    fn clear_discards_requests() {
        let mut queue = TransitionQueue::new();
        queue.push(TransitionRequest::Pop(PopRequest::new("fade")));
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.take().len(), 0);
    }
}
