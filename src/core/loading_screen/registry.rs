//=========================================================================
// Loading Screen Registry
//=========================================================================
//
// Keyed storage for long-lived loading screen handles.
//
// Handles are registered once and resolved by id for each transition;
// only their transient state resets between uses.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::warn;

//=== Internal Dependencies ===============================================

use super::LoadingScreenHandle;

//=== LoadingScreenRegistry ===============================================

/// Registry of loading screens available to transitions.
pub struct LoadingScreenRegistry {
    screens: HashMap<String, LoadingScreenHandle>,
}

impl LoadingScreenRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            screens: HashMap::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a handle under its own id.
    ///
    /// Registering a second handle with the same id replaces the first.
    pub fn register(&mut self, handle: LoadingScreenHandle) {
        let id = handle.id().to_string();
        if self.screens.insert(id.clone(), handle).is_some() {
            warn!(
                "Loading screen '{}' was already registered and has been replaced",
                id
            );
        }
    }

    //--- Resolution -------------------------------------------------------

    /// Looks up a handle by id.
    pub fn resolve(&mut self, id: &str) -> Option<&mut LoadingScreenHandle> {
        self.screens.get_mut(id)
    }

    /// Returns true if a handle with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.screens.contains_key(id)
    }

    /// Returns the number of registered handles.
    pub fn len(&self) -> usize {
        self.screens.len()
    }

    /// Returns true if no handles are registered.
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}

impl Default for LoadingScreenRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================
