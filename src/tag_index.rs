//! Per-node key index.
//!
//! A [`TagIndex`] maps every key to the ascending list of child slots whose
//! Leaf or Node carries that key. It is a cache of the child sequence: every
//! structural mutation of a [`crate::Node`] patches it in the same call, and
//! [`TagIndex::build`] recomputes it from scratch.

use std::collections::HashMap;

use crate::tree::Child;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    slots: HashMap<String, Vec<usize>>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the index for a child sequence.
    pub fn build(children: &[Child]) -> Self {
        let mut index = TagIndex::new();
        for (slot, child) in children.iter().enumerate() {
            if let Some(key) = child.key() {
                index.push(key, slot);
            }
        }
        index
    }

    /// Slots holding `key`, in document order. Empty when the key is absent.
    pub fn get(&self, key: &str) -> &[usize] {
        self.slots.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first(&self, key: &str) -> Option<usize> {
        self.get(key).first().copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// True when the index is exactly what [`TagIndex::build`] would produce.
    pub fn is_consistent_with(&self, children: &[Child]) -> bool {
        *self == TagIndex::build(children)
    }

    /// Record a slot appended after every slot already indexed.
    pub(crate) fn push(&mut self, key: &str, slot: usize) {
        match self.slots.get_mut(key) {
            Some(slots) => slots.push(slot),
            None => {
                self.slots.insert(key.to_string(), vec![slot]);
            }
        }
    }

    fn insert_sorted(&mut self, key: &str, slot: usize) {
        let slots = self.slots.entry(key.to_string()).or_default();
        if let Err(at) = slots.binary_search(&slot) {
            slots.insert(at, slot);
        }
    }

    fn remove_entry(&mut self, key: &str, slot: usize) {
        if let Some(slots) = self.slots.get_mut(key) {
            if let Ok(at) = slots.binary_search(&slot) {
                slots.remove(at);
            }
            if slots.is_empty() {
                self.slots.remove(key);
            }
        }
    }

    /// Forget `slot` (held by `key`, if keyed) and shift every later slot down
    /// by one, matching a removal from the child sequence.
    pub(crate) fn remove_slot(&mut self, key: Option<&str>, slot: usize) {
        if let Some(key) = key {
            self.remove_entry(key, slot);
        }
        for slots in self.slots.values_mut() {
            // Slots are ascending, so only the tail needs renumbering.
            let from = slots.partition_point(|&s| s <= slot);
            for s in &mut slots[from..] {
                *s -= 1;
            }
        }
    }

    /// Move `slot` from `old` to `new` after the child there was replaced.
    pub(crate) fn rekey(&mut self, slot: usize, old: Option<&str>, new: Option<&str>) {
        if old == new {
            return;
        }
        if let Some(old) = old {
            self.remove_entry(old, slot);
        }
        if let Some(new) = new {
            self.insert_sorted(new, slot);
        }
    }
}

#[test]
fn test_remove_slot_renumbers_later_slots() {
    let mut index = TagIndex::new();
    index.push("a", 0);
    index.push("b", 1);
    index.push("a", 2);
    index.push("c", 4);

    index.remove_slot(Some("b"), 1);

    assert_eq!(index.get("a"), &[0, 1]);
    assert!(!index.contains_key("b"));
    assert_eq!(index.get("c"), &[3]);
}

#[test]
fn test_rekey_keeps_slots_sorted() {
    let mut index = TagIndex::new();
    index.push("a", 0);
    index.push("b", 1);
    index.push("a", 2);

    index.rekey(1, Some("b"), Some("a"));

    assert_eq!(index.get("a"), &[0, 1, 2]);
    assert!(index.get("b").is_empty());
}

#[test]
fn test_first_and_keys() {
    let mut index = TagIndex::new();
    index.push("b", 0);
    index.push("a", 1);
    index.push("b", 2);

    assert_eq!(index.first("b"), Some(0));
    assert_eq!(index.first("a"), Some(1));
    assert_eq!(index.first("c"), None);

    let mut keys: Vec<&str> = index.keys().collect();
    keys.sort();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(index.len(), 2);
}
