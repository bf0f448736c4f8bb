//! Position ids.
//!
//! Hosts hand us ids as strings; the canvas keeps one `Copy` handle per
//! distinct string so selection snapshots and drag overrides can key on
//! identity without cloning.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Every id string seen by this process, host-supplied or minted.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Names one card position for as long as it exists.
///
/// A list index shifts when an earlier card is removed or the list is
/// reordered; the id does not. Two ids are equal iff their strings are.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionId(Spur);

impl PositionId {
    /// The id for a host-supplied string. Same string, same id.
    pub fn intern(s: &str) -> Self {
        PositionId(INTERNER.get_or_intern(s))
    }

    /// The string the host knows this position by.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Mint an id for a card added on the canvas: `pos_<n>`, skipping any
    /// name a loaded layout already uses.
    pub fn fresh() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        loop {
            let n = COUNTER.fetch_add(1, Ordering::Relaxed);
            let candidate = format!("pos_{n}");
            if INTERNER.get(&candidate).is_none() {
                return Self::intern(&candidate);
            }
        }
    }
}

impl fmt::Debug for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PositionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PositionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(PositionId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = PositionId::intern("past");
        let b = PositionId::intern("past");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "past");
    }

    #[test]
    fn fresh_ids_are_unique() {
        let a = PositionId::fresh();
        let b = PositionId::fresh();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("pos_"));
    }

    #[test]
    fn fresh_skips_taken_names() {
        // Whatever the counter is at, a pre-interned name is never reissued.
        let taken: Vec<PositionId> = (0..64)
            .map(|n| PositionId::intern(&format!("pos_{n}")))
            .collect();
        let fresh = PositionId::fresh();
        assert!(!taken.contains(&fresh));
    }

    #[test]
    fn host_string_is_the_wire_and_display_form() {
        let id = PositionId::intern("card-7");
        assert_eq!(id.to_string(), "card-7");
        assert_eq!(format!("{id:?}"), "#card-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"card-7\"");
        let back: PositionId = serde_json::from_str("\"card-7\"").unwrap();
        assert_eq!(back, id);
    }
}
