//! Operator input trait

/// Polled operator key state.
///
/// There is no queue: a press shorter than one control tick may be missed.
pub trait OperatorInput {
    /// Whether `key` is currently held down
    fn is_key_pressed(&mut self, key: char) -> bool;

    /// Whether any of `keys` is currently held down
    fn any_pressed(&mut self, keys: &[char]) -> bool {
        keys.iter().any(|&k| self.is_key_pressed(k))
    }
}
