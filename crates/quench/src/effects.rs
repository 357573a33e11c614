use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};

///
/// Effects
///
/// Keyed one-shot effect primitive. Each slot remembers the identity of the
/// last value it fired for; `launch` runs its sequence only when the keying
/// value differs from that memory, so a sequence never re-fires for the same
/// pending value across frames. Retiring a slot clears the memory, which is
/// what lets an identical payload fire again after the field was consumed.
///
/// Slots share no state with each other, matching the per-field isolation of
/// the generated dispatcher.
///

#[derive(Debug, Default)]
pub struct Effects {
    slots: HashMap<&'static str, u64>,
}

impl Effects {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `sequence(value)` once for this value in `slot`.
    ///
    /// Calling again with an equal value is a no-op; a different value
    /// restarts the slot and fires again.
    pub fn launch<V: Hash>(
        &mut self,
        slot: &'static str,
        value: V,
        sequence: impl FnOnce(V),
    ) {
        let key = hash_key(&value);
        if self.slots.get(slot) == Some(&key) {
            return;
        }
        self.slots.insert(slot, key);
        sequence(value);
    }

    /// Forget a slot's key memory.
    ///
    /// The dispatcher calls this while the field is empty, so a later event
    /// carrying the same payload is seen as new.
    pub fn retire(&mut self, slot: &'static str) {
        self.slots.remove(slot);
    }
}

fn hash_key<V: Hash>(value: &V) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

///
/// TESTS
///
