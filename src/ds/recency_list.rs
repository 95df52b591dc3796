//! Doubly linked recency list backed by `SlotArena`.
//!
//! Nodes live in a [`SlotArena`] and link to each other by generational
//! [`SlotId`], so a node handle held by an index stays valid while the node is
//! live and stops resolving once it is removed. No raw pointers are involved.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, prev: None, next: Some(id_2) }  │
//!   │ id_2   │ { value: B, prev: Some(id_1), next: id_3 }  │
//!   │ id_3   │ { value: C, prev: Some(id_2), next: None }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   front ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── back
//!            oldest                   newest
//! ```
//!
//! The front holds the least recently touched node and the back the most
//! recently touched one; eviction pops from the front.
//!
//! ## Performance
//! - `push_back` / `pop_front`: O(1)
//! - `move_to_back` / `remove`: O(1)
//! - `iter`, `position`: O(n)

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Recency-ordered list with stable node handles.
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
    front: Option<SlotId>,
    back: Option<SlotId>,
}

impl<T> RecencyList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            front: None,
            back: None,
        }
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            front: None,
            back: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` is a live node of this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Value of the least recently touched node.
    pub fn front(&self) -> Option<&T> {
        self.front.and_then(|id| self.get(id))
    }

    pub fn front_id(&self) -> Option<SlotId> {
        self.front
    }

    /// Value of the most recently touched node.
    pub fn back(&self) -> Option<&T> {
        self.back.and_then(|id| self.get(id))
    }

    pub fn back_id(&self) -> Option<SlotId> {
        self.back
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Iterates values from front (oldest) to back (newest).
    pub fn iter(&self) -> RecencyIter<'_, T> {
        RecencyIter {
            list: self,
            current: self.front,
        }
    }

    /// Iterates node handles from front to back.
    pub fn iter_ids(&self) -> impl Iterator<Item = SlotId> + '_ {
        let mut current = self.front;
        std::iter::from_fn(move || {
            let id = current?;
            current = self.arena.get(id)?.next;
            Some(id)
        })
    }

    /// Zero-based distance of `id` from the front, if present.
    pub fn position(&self, id: SlotId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        self.iter_ids().position(|candidate| candidate == id)
    }

    /// Appends a node at the back and returns its handle.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: self.back,
            next: None,
        });
        match self.back.and_then(|back| self.arena.get_mut(back)) {
            Some(node) => node.next = Some(id),
            None => self.front = Some(id),
        }
        self.back = Some(id);
        id
    }

    /// Removes and returns the front (oldest) value.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.front?;
        self.remove(id)
    }

    /// Unlinks `id` and frees its slot; stale handles return `None`.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Moves a live node to the back; returns `false` for stale handles.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if Some(id) == self.back {
            return true;
        }
        self.detach(id);
        self.attach_back(id);
        true
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev.and_then(|prev_id| self.arena.get_mut(prev_id)) {
            Some(prev_node) => prev_node.next = next,
            None => self.front = next,
        }

        match next.and_then(|next_id| self.arena.get_mut(next_id)) {
            Some(next_node) => next_node.prev = prev,
            None => self.back = prev,
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }

        Some(())
    }

    fn attach_back(&mut self, id: SlotId) -> Option<()> {
        let old_back = self.back;
        let node = self.arena.get_mut(id)?;
        node.prev = old_back;
        node.next = None;

        match old_back.and_then(|back| self.arena.get_mut(back)) {
            Some(back_node) => back_node.next = Some(id),
            None => self.front = Some(id),
        }
        self.back = Some(id);
        Some(())
    }

    /// Walks the links front to back and checks them against the arena.
    pub fn check_links(&self) -> Result<(), InvariantError> {
        if self.front.is_none() || self.back.is_none() {
            if self.front.is_some() || self.back.is_some() || !self.is_empty() {
                return Err(InvariantError::new(
                    "recency list has a dangling front/back handle",
                ));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut current = self.front;
        let mut prev = None;

        while let Some(id) = current {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new("recency list links to a freed slot"))?;
            if node.prev != prev {
                return Err(InvariantError::new("recency list prev link is inconsistent"));
            }
            if node.next.is_none() && self.back != Some(id) {
                return Err(InvariantError::new("recency list back does not match last node"));
            }

            prev = Some(id);
            current = node.next;
            count += 1;
            if count > self.len() {
                return Err(InvariantError::new("cycle detected in recency list"));
            }
        }

        if count != self.len() {
            return Err(InvariantError::new(format!(
                "recency list reaches {count} nodes but arena holds {}",
                self.len()
            )));
        }
        Ok(())
    }
}

pub struct RecencyIter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for RecencyIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(list: &RecencyList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn recency_list_basic_ops() {
        let mut list = RecencyList::new();
        let a = list.push_back("a");
        let b = list.push_back("b");
        let c = list.push_back("c");

        assert_eq!(list.front(), Some(&"a"));
        assert_eq!(list.back(), Some(&"c"));
        assert_eq!(list.len(), 3);

        assert!(list.move_to_back(a));
        assert_eq!(list.front(), Some(&"b"));
        assert_eq!(list.back(), Some(&"a"));

        assert_eq!(list.remove(c), Some("c"));
        assert_eq!(list.len(), 2);

        assert_eq!(list.pop_front(), Some("b"));
        assert_eq!(list.pop_front(), Some("a"));
        assert!(list.is_empty());

        assert!(!list.contains(b));
        list.check_links().unwrap();
    }

    #[test]
    fn move_to_back_edges() {
        let mut list = RecencyList::new();
        let a = list.push_back("a");
        let b = list.push_back("b");
        let c = list.push_back("c");

        assert!(list.move_to_back(c));
        assert_eq!(values(&list), vec!["a", "b", "c"]);

        assert!(list.move_to_back(b));
        assert_eq!(values(&list), vec!["a", "c", "b"]);

        assert!(list.move_to_back(a));
        assert_eq!(values(&list), vec!["c", "b", "a"]);
        assert_eq!(list.front_id(), Some(c));
        assert_eq!(list.back_id(), Some(a));
        list.check_links().unwrap();
    }

    #[test]
    fn remove_middle_and_ends() {
        let mut list = RecencyList::new();
        let a = list.push_back("a");
        let b = list.push_back("b");
        let c = list.push_back("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(values(&list), vec!["a", "c"]);

        assert_eq!(list.remove(a), Some("a"));
        assert_eq!(list.front(), Some(&"c"));
        assert_eq!(list.back(), Some(&"c"));

        assert_eq!(list.remove(c), Some("c"));
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        list.check_links().unwrap();
    }

    #[test]
    fn stale_handle_is_rejected_after_slot_reuse() {
        let mut list = RecencyList::new();
        let a = list.push_back(1);
        list.pop_front();
        let b = list.push_back(2);

        assert_eq!(a.index(), b.index());
        assert!(!list.move_to_back(a));
        assert_eq!(list.remove(a), None);
        assert_eq!(list.get(b), Some(&2));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn position_counts_from_front() {
        let mut list = RecencyList::new();
        let a = list.push_back('a');
        let b = list.push_back('b');
        let c = list.push_back('c');

        assert_eq!(list.position(a), Some(0));
        assert_eq!(list.position(b), Some(1));
        assert_eq!(list.position(c), Some(2));

        list.move_to_back(a);
        assert_eq!(list.position(a), Some(2));

        list.remove(b);
        assert_eq!(list.position(b), None);
    }

    #[test]
    fn iter_ids_matches_iter() {
        let mut list = RecencyList::new();
        let ids: Vec<_> = (0..5).map(|i| list.push_back(i)).collect();
        assert_eq!(list.iter_ids().collect::<Vec<_>>(), ids);
        assert_eq!(values(&list), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn draining_resets_front_and_back() {
        let mut list = RecencyList::with_capacity(4);
        list.push_back(1);
        list.push_back(2);
        while list.pop_front().is_some() {}
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        list.check_links().unwrap();
    }

    #[test]
    fn links_hold_under_churn() {
        let mut list = RecencyList::new();
        let mut ids = Vec::new();
        for i in 0..32 {
            ids.push(list.push_back(i));
            if i % 3 == 0 {
                list.move_to_back(ids[i / 2]);
            }
            if i % 5 == 0 {
                list.pop_front();
            }
            list.check_links().unwrap();
        }
    }
}
