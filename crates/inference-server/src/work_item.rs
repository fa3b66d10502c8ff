//! Work Item and Batch data model (`spec.md` §3).

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use crate::event_box::EventBox;

/// The tuple of kwargs that must be identical across every item of one
/// model batch. Canonicalized as a sorted map so that structurally equal
/// JSON values hash and compare equal regardless of field insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeKey(BTreeMap<String, CanonicalValue>);

impl ShapeKey {
    pub fn new(fields: BTreeMap<String, Value>) -> Self {
        ShapeKey(fields.into_iter().map(|(k, v)| (k, CanonicalValue(v))).collect())
    }
}

/// `serde_json::Value` does not implement `Hash`; this wraps it with a
/// canonical-string-based `Hash`/`Eq` so `ShapeKey` can key a `HashMap`.
#[derive(Debug, Clone)]
struct CanonicalValue(Value);

impl PartialEq for CanonicalValue {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for CanonicalValue {}

impl std::hash::Hash for CanonicalValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // serde_json's Value serialization is deterministic for a given
        // logical value (object keys come from a BTreeMap upstream of here
        // in every construction path), so the canonical string is a sound
        // hash/eq witness.
        self.0.to_string().hash(state);
    }
}

/// Immutable record produced by the request layer (`spec.md` §3).
pub struct WorkItem {
    pub payload: Value,
    pub shape: ShapeKey,
    pub submitted_at: Instant,
    pub event_box: Arc<EventBox>,
}

impl WorkItem {
    pub fn new(payload: Value, shape: ShapeKey, event_box: Arc<EventBox>) -> Self {
        WorkItem {
            payload,
            shape,
            submitted_at: Instant::now(),
            event_box,
        }
    }
}

/// Transient grouping created by a worker (`spec.md` §3). All items share
/// `shape`; `items.len()` is always in `1..=batch_size`.
pub struct Batch {
    pub items: Vec<WorkItem>,
    pub shape: ShapeKey,
    pub started_at: Instant,
}

impl Batch {
    pub fn new(items: Vec<WorkItem>) -> Self {
        debug_assert!(!items.is_empty());
        let shape = items[0].shape.clone();
        debug_assert!(items.iter().all(|item| item.shape == shape));
        Batch {
            items,
            shape,
            started_at: Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_keys_are_order_independent() {
        let mut a = BTreeMap::new();
        a.insert("max_new_tokens".to_string(), serde_json::json!(4));
        a.insert("stop".to_string(), serde_json::json!(["]"]));

        let mut b = BTreeMap::new();
        b.insert("stop".to_string(), serde_json::json!(["]"]));
        b.insert("max_new_tokens".to_string(), serde_json::json!(4));

        assert_eq!(ShapeKey::new(a), ShapeKey::new(b));
    }

    #[test]
    fn shape_keys_differ_on_value() {
        let mut a = BTreeMap::new();
        a.insert("max_new_tokens".to_string(), serde_json::json!(4));
        let mut b = BTreeMap::new();
        b.insert("max_new_tokens".to_string(), serde_json::json!(8));
        assert_ne!(ShapeKey::new(a), ShapeKey::new(b));
    }
}
