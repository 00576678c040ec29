//! Scripted operator keys

use crate::drivers::OperatorInput;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// Key state set by the test or the simulator.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    state: Arc<Mutex<InputState>>,
}

#[derive(Debug, Default)]
struct InputState {
    held: HashSet<char>,
    polls: usize,
}

impl ScriptedInput {
    /// No keys held
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `key` down
    pub fn press(&self, key: char) {
        self.state.lock().held.insert(key);
    }

    /// Release `key`
    pub fn release(&self, key: char) {
        self.state.lock().held.remove(&key);
    }

    /// Release every key
    pub fn release_all(&self) {
        self.state.lock().held.clear();
    }

    /// Currently held keys, sorted
    pub fn held(&self) -> Vec<char> {
        let mut keys: Vec<char> = self.state.lock().held.iter().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Number of key polls so far
    pub fn polls(&self) -> usize {
        self.state.lock().polls
    }
}

impl OperatorInput for ScriptedInput {
    fn is_key_pressed(&mut self, key: char) -> bool {
        let mut state = self.state.lock();
        state.polls += 1;
        state.held.contains(&key)
    }
}
