use std::sync::{Mutex, MutexGuard, PoisonError};

use ch_core::ports::{HotkeyCallback, HotkeyError, HotkeyRegistrarPort};
use ch_core::HotkeySpec;
use tracing::{debug, info};

#[derive(Default)]
struct State {
    registered: Option<HotkeySpec>,
    callback: Option<HotkeyCallback>,
    taken: Vec<HotkeySpec>,
}

/// Hotkey registrar without OS integration.
///
/// Presses are delivered through [`InMemoryHotkeyRegistrar::trigger`], which
/// the host calls from whatever input source it has.
#[derive(Default)]
pub struct InMemoryHotkeyRegistrar {
    state: Mutex<State>,
}

impl InMemoryHotkeyRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend another application already owns `spec`.
    pub fn reserve(&self, spec: HotkeySpec) {
        self.lock().taken.push(spec);
    }

    pub fn registered(&self) -> Option<HotkeySpec> {
        self.lock().registered.clone()
    }

    /// Deliver one press. Returns `false` when nothing is registered.
    pub fn trigger(&self) -> bool {
        let callback = {
            let state = self.lock();
            if state.registered.is_none() {
                return false;
            }
            state.callback.clone()
        };
        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // State stays consistent across a panicking callback; it runs unlocked.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HotkeyRegistrarPort for InMemoryHotkeyRegistrar {
    fn register(&self, spec: &HotkeySpec) -> Result<(), HotkeyError> {
        let mut state = self.lock();
        if state.taken.contains(spec) {
            return Err(HotkeyError::Unavailable(spec.to_string()));
        }
        state.registered = Some(spec.clone());
        info!(hotkey = %spec, "Registered hotkey");
        Ok(())
    }

    fn unregister(&self) {
        if let Some(spec) = self.lock().registered.take() {
            debug!(hotkey = %spec, "Unregistered hotkey");
        }
    }

    fn on_triggered(&self, callback: HotkeyCallback) {
        self.lock().callback = Some(callback);
    }
}
