//! Per-method display rotation.
//!
//! Each sampled method cycles through `len(pool) + 1` states: the original
//! label, then one state per position of its current permutation. Every advance
//! reshuffles the permutation and steps the cursor, so the original label is
//! revisited exactly once per full cycle and is never overwritten.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::TopicSet;
use crate::errors::JourneyError;
use crate::types::{Alternative, MethodLabel, MethodSlot};
use crate::utils::shuffled;

/// What a method is currently displaying.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationState {
    /// The method's own label.
    ShowingOriginal,
    /// The permutation element at this index.
    Showing(usize),
}

impl RotationState {
    /// Numeric cursor: `0` for the original label, `index + 1` otherwise.
    pub fn cursor(self) -> usize {
        match self {
            RotationState::ShowingOriginal => 0,
            RotationState::Showing(index) => index + 1,
        }
    }

    /// Next state in a cycle over `pool_len` alternatives.
    fn next(self, pool_len: usize) -> Self {
        let cursor = (self.cursor() + 1) % (pool_len + 1);
        match cursor {
            0 => RotationState::ShowingOriginal,
            step => RotationState::Showing(step - 1),
        }
    }
}

/// Rotation state for one sampled method.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MethodRotation {
    label: MethodLabel,
    pool: Vec<Alternative>,
    permutation: Vec<Alternative>,
    state: RotationState,
}

impl MethodRotation {
    /// Start at the original label with an unshuffled copy of `pool`.
    pub fn new(label: impl Into<MethodLabel>, pool: Vec<Alternative>) -> Self {
        Self {
            label: label.into(),
            permutation: pool.clone(),
            pool,
            state: RotationState::ShowingOriginal,
        }
    }

    /// The method's original label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Alternatives in source order.
    pub fn pool(&self) -> &[Alternative] {
        &self.pool
    }

    /// Alternatives in the order drawn by the most recent advance.
    pub fn permutation(&self) -> &[Alternative] {
        &self.permutation
    }

    /// Current rotation state.
    pub fn state(&self) -> RotationState {
        self.state
    }

    /// Reshuffle the permutation and step the cursor; both happen on every call.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.permutation = shuffled(&self.pool, rng);
        self.state = self.state.next(self.pool.len());
    }

    /// Text to display for the current state.
    pub fn current_text(&self) -> &str {
        match self.state {
            RotationState::Showing(index) => self
                .permutation
                .get(index)
                .map(String::as_str)
                .unwrap_or(&self.label),
            RotationState::ShowingOriginal => &self.label,
        }
    }
}

/// Rotation state for every method of the current derivation, addressed by slot.
///
/// Slots follow sampling order. Repeated labels get independent slots.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RotationEngine {
    slots: Vec<MethodRotation>,
}

impl RotationEngine {
    /// Initialize one rotation per sampled method of `topic`.
    ///
    /// Every sampled method needs an entry in `topic.pool` (possibly empty);
    /// a missing entry is `UnknownMethod`.
    pub fn new(topic: &TopicSet) -> Result<Self, JourneyError> {
        let slots = topic
            .methods
            .iter()
            .map(|label| {
                let pool = topic
                    .pool
                    .get(label)
                    .ok_or_else(|| JourneyError::UnknownMethod(label.clone()))?;
                Ok(MethodRotation::new(label.clone(), pool.clone()))
            })
            .collect::<Result<Vec<_>, JourneyError>>()?;
        Ok(Self { slots })
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the engine has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All rotations in slot order.
    pub fn rotations(&self) -> &[MethodRotation] {
        &self.slots
    }

    /// Rotation for `slot`.
    pub fn rotation(&self, slot: MethodSlot) -> Result<&MethodRotation, JourneyError> {
        self.slots.get(slot).ok_or_else(|| unknown_slot(slot))
    }

    /// Advance `slot` and return its new display text.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        slot: MethodSlot,
        rng: &mut R,
    ) -> Result<&str, JourneyError> {
        let rotation = self.slots.get_mut(slot).ok_or_else(|| unknown_slot(slot))?;
        rotation.advance(rng);
        Ok(rotation.current_text())
    }

    /// Current display text for `slot`.
    pub fn current_text(&self, slot: MethodSlot) -> Result<&str, JourneyError> {
        self.rotation(slot).map(MethodRotation::current_text)
    }

    /// First slot sampled with `label`.
    pub fn slot_of(&self, label: &str) -> Result<MethodSlot, JourneyError> {
        self.slots
            .iter()
            .position(|rotation| rotation.label == label)
            .ok_or_else(|| JourneyError::UnknownMethod(label.to_string()))
    }

    /// Advance the first slot sampled with `label`.
    pub fn advance_label<R: Rng + ?Sized>(
        &mut self,
        label: &str,
        rng: &mut R,
    ) -> Result<&str, JourneyError> {
        let slot = self.slot_of(label)?;
        self.advance(slot, rng)
    }

    /// Current display text of the first slot sampled with `label`.
    pub fn current_text_for(&self, label: &str) -> Result<&str, JourneyError> {
        self.current_text(self.slot_of(label)?)
    }

    /// Current display text of every slot, in slot order.
    pub fn displayed_texts(&self) -> Vec<&str> {
        self.slots.iter().map(MethodRotation::current_text).collect()
    }
}

fn unknown_slot(slot: MethodSlot) -> JourneyError {
    JourneyError::UnknownMethod(format!("slot #{slot}"))
}
