//! Circular doubly linked list anchored on a single sentinel node.
//!
//! Nodes live in a [`SlotArena`] and link to each other by [`NodeId`]. Slot 0
//! of a fresh arena is reserved for the sentinel: it carries no value, is never
//! removed and closes the ring, so `sentinel.next` is the head and
//! `sentinel.prev` is the tail. Every insertion and removal rewires exactly two
//! existing links, whether the list is empty, has one element or many.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬──────────────────────────────────────────┐
//!   │ NodeId │ Node { value, prev, next }               │
//!   ├────────┼──────────────────────────────────────────┤
//!   │ id_0   │ { value: None,    prev: id_3, next: id_1 }│  ◄── sentinel
//!   │ id_1   │ { value: Some(A), prev: id_0, next: id_2 }│
//!   │ id_2   │ { value: Some(B), prev: id_1, next: id_3 }│
//!   │ id_3   │ { value: Some(C), prev: id_2, next: id_0 }│
//!   └────────┴──────────────────────────────────────────┘
//!
//!        ┌──────────────────────────────────────────────┐
//!        ▼                                              │
//!   [sentinel] ◄──► [A] ◄──► [B] ◄──► [C] ◄─────────────┘
//!                   head              tail
//! ```
//!
//! Empty list: `sentinel.next == sentinel` (and `sentinel.prev == sentinel`).
//!
//! ## Handles
//!
//! Insertions return a [`NodeId`]. A handle is valid while its node is in the
//! list that issued it; after `remove`/`pop_*`/`clear`, or when passed to a
//! different list, it is rejected by every node-taking operation. Invalid handles never panic: inserts return `None`, removals
//! return `None`/`false` and moves return `false` without touching the ring.
//!
//! ## Performance
//! - `push_front` / `push_back` / `insert_before` / `insert_after`: O(1)
//! - `pop_front` / `pop_back` / `remove`: O(1)
//! - `move_to_front` / `move_to_back`: O(1)
//! - `search`, `iter`, `forward`, `backward`: O(n)
//! - `clear`: drops the arena in one go and re-seats the sentinel
//!
//! ## Example
//!
//! ```
//! use ringcache::ds::SentinelList;
//!
//! let mut list = SentinelList::new();
//! let a = list.push_back("a");
//! list.push_back("b");
//! list.push_front("z");
//!
//! assert!(list.move_to_back(a));
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["z", "b", "a"]);
//! assert_eq!(list.pop_front(), Some("z"));
//! ```

use std::fmt;
use std::iter::FusedIterator;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

/// Handle to a node in a [`SentinelList`].
pub type NodeId = SlotId;

#[derive(Debug)]
struct Node<T> {
    // `None` only for the sentinel.
    value: Option<T>,
    prev: NodeId,
    next: NodeId,
}

/// Sentinel-anchored circular doubly linked list with arena-backed nodes.
pub struct SentinelList<T> {
    arena: SlotArena<Node<T>>,
    sentinel: NodeId,
    len: usize,
}

impl<T> SentinelList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        let mut arena = SlotArena::new();
        let sentinel = seat_sentinel(&mut arena);
        Self {
            arena,
            sentinel,
            len: 0,
        }
    }

    /// Creates an empty list with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut arena = SlotArena::with_capacity(capacity.saturating_add(1));
        let sentinel = seat_sentinel(&mut arena);
        Self {
            arena,
            sentinel,
            len: 0,
        }
    }

    /// Returns the number of nodes in the list, not counting the sentinel.
    #[doc(alias = "size")]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the ring holds only the sentinel.
    pub fn is_empty(&self) -> bool {
        self.head_link() == self.sentinel
    }

    /// Returns `true` if `id` is a live, non-sentinel node of this list.
    pub fn contains(&self, id: NodeId) -> bool {
        self.is_valid(id)
    }

    /// Returns the value at the head.
    pub fn front(&self) -> Option<&T> {
        self.get(self.front_id()?)
    }

    /// Returns the handle of the head node.
    pub fn front_id(&self) -> Option<NodeId> {
        let head = self.head_link();
        (head != self.sentinel).then_some(head)
    }

    /// Returns the value at the tail.
    pub fn back(&self) -> Option<&T> {
        self.get(self.back_id()?)
    }

    /// Returns the handle of the tail node.
    pub fn back_id(&self) -> Option<NodeId> {
        let tail = self.tail_link();
        (tail != self.sentinel).then_some(tail)
    }

    /// Returns the value stored at `id`.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.arena.get(id).and_then(|node| node.value.as_ref())
    }

    /// Returns a mutable reference to the value stored at `id`.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.arena.get_mut(id).and_then(|node| node.value.as_mut())
    }

    /// Inserts `value` right before the sentinel (tail end).
    #[doc(alias = "push")]
    pub fn push_back(&mut self, value: T) -> NodeId {
        let tail = self.tail_link();
        self.link_between(value, tail, self.sentinel)
    }

    /// Inserts `value` right after the sentinel (head end).
    #[doc(alias = "unshift")]
    pub fn push_front(&mut self, value: T) -> NodeId {
        let head = self.head_link();
        self.link_between(value, self.sentinel, head)
    }

    /// Removes and returns the tail value.
    #[doc(alias = "pop")]
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.back_id()?;
        self.unlink(id)
    }

    /// Removes and returns the head value.
    #[doc(alias = "shift")]
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.front_id()?;
        self.unlink(id)
    }

    /// Inserts `value` immediately before `id`.
    ///
    /// Returns `None` if `id` is not a live node of this list.
    #[doc(alias = "before")]
    pub fn insert_before(&mut self, id: NodeId, value: T) -> Option<NodeId> {
        if !self.is_valid(id) {
            return None;
        }
        let (prev, _) = self.links(id)?;
        Some(self.link_between(value, prev, id))
    }

    /// Inserts `value` immediately after `id`.
    ///
    /// Returns `None` if `id` is not a live node of this list.
    #[doc(alias = "after")]
    pub fn insert_after(&mut self, id: NodeId, value: T) -> Option<NodeId> {
        if !self.is_valid(id) {
            return None;
        }
        let (_, next) = self.links(id)?;
        Some(self.link_between(value, id, next))
    }

    /// Unlinks the node `id` and returns its value.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.is_valid(id) {
            return None;
        }
        self.unlink(id)
    }

    /// Unlinks and drops the node `id`; returns whether a node was removed.
    pub fn delete(&mut self, id: NodeId) -> bool {
        self.remove(id).is_some()
    }

    /// Moves `id` right after the sentinel.
    ///
    /// Returns `false` if `id` is invalid. Already being the head is a
    /// successful no-op.
    #[doc(alias = "make_first")]
    pub fn move_to_front(&mut self, id: NodeId) -> bool {
        if !self.is_valid(id) {
            return false;
        }
        if self.head_link() == id {
            return true;
        }
        self.detach(id);
        let head = self.head_link();
        self.attach_between(id, self.sentinel, head);
        true
    }

    /// Moves `id` right before the sentinel.
    ///
    /// Returns `false` if `id` is invalid. Already being the tail is a
    /// successful no-op.
    #[doc(alias = "make_last")]
    pub fn move_to_back(&mut self, id: NodeId) -> bool {
        if !self.is_valid(id) {
            return false;
        }
        if self.tail_link() == id {
            return true;
        }
        self.detach(id);
        let tail = self.tail_link();
        self.attach_between(id, tail, self.sentinel);
        true
    }

    /// Returns the first node, scanning head to tail, whose value equals `value`.
    pub fn search(&self, value: &T) -> Option<NodeId>
    where
        T: PartialEq,
    {
        self.iter_entries()
            .find(|(_, candidate)| *candidate == value)
            .map(|(id, _)| id)
    }

    /// Calls `visit` on every value from head to tail.
    pub fn forward(&self, visit: impl FnMut(&T)) {
        self.iter().for_each(visit);
    }

    /// Calls `visit` on every value from tail to head.
    pub fn backward(&self, visit: impl FnMut(&T)) {
        self.iter().rev().for_each(visit);
    }

    /// Drops every node and restores the empty ring.
    #[doc(alias = "reset")]
    pub fn clear(&mut self) {
        self.arena.clear();
        self.sentinel = seat_sentinel(&mut self.arena);
        self.len = 0;
    }

    /// Returns an iterator over values from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            cursor: Cursor::new(self),
        }
    }

    /// Returns an iterator over node handles from head to tail.
    pub fn iter_ids(&self) -> IterIds<'_, T> {
        IterIds {
            cursor: Cursor::new(self),
        }
    }

    /// Returns an iterator over `(NodeId, &T)` from head to tail.
    pub fn iter_entries(&self) -> IterEntries<'_, T> {
        IterEntries {
            cursor: Cursor::new(self),
        }
    }

    /// Walks the ring and checks link symmetry, sentinel placement and the
    /// size counter.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let sentinel = self
            .arena
            .get(self.sentinel)
            .ok_or_else(|| InvariantError::new("sentinel slot missing"))?;
        if sentinel.value.is_some() {
            return Err(InvariantError::new("sentinel carries a value"));
        }
        if (self.len == 0) != (sentinel.next == self.sentinel) {
            return Err(InvariantError::new(format!(
                "len {} disagrees with sentinel emptiness",
                self.len
            )));
        }

        let mut count = 0usize;
        let mut prev = self.sentinel;
        let mut current = sentinel.next;
        while current != self.sentinel {
            let node = self
                .arena
                .get(current)
                .ok_or_else(|| InvariantError::new("ring links to a freed slot"))?;
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "node at slot {} has a stale prev link",
                    current.index()
                )));
            }
            if node.value.is_none() {
                return Err(InvariantError::new("second valueless node in ring"));
            }
            count += 1;
            if count > self.len {
                return Err(InvariantError::new("ring longer than len"));
            }
            prev = current;
            current = node.next;
        }

        if sentinel.prev != prev {
            return Err(InvariantError::new("sentinel prev is not the tail"));
        }
        if count != self.len {
            return Err(InvariantError::new(format!(
                "walked {} nodes but len is {}",
                count, self.len
            )));
        }
        if self.arena.len() != self.len + 1 {
            return Err(InvariantError::new("arena holds detached nodes"));
        }
        Ok(())
    }

    fn is_valid(&self, id: NodeId) -> bool {
        !self.is_empty() && id != self.sentinel && self.arena.contains(id)
    }

    fn links(&self, id: NodeId) -> Option<(NodeId, NodeId)> {
        self.arena.get(id).map(|node| (node.prev, node.next))
    }

    fn head_link(&self) -> NodeId {
        self.links(self.sentinel).map_or(self.sentinel, |(_, next)| next)
    }

    fn tail_link(&self) -> NodeId {
        self.links(self.sentinel).map_or(self.sentinel, |(prev, _)| prev)
    }

    fn set_next(&mut self, id: NodeId, next: NodeId) {
        if let Some(node) = self.arena.get_mut(id) {
            node.next = next;
        }
    }

    fn set_prev(&mut self, id: NodeId, prev: NodeId) {
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = prev;
        }
    }

    fn link_between(&mut self, value: T, prev: NodeId, next: NodeId) -> NodeId {
        let id = self.arena.insert(Node {
            value: Some(value),
            prev,
            next,
        });
        self.set_next(prev, id);
        self.set_prev(next, id);
        self.len += 1;
        id
    }

    fn unlink(&mut self, id: NodeId) -> Option<T> {
        self.detach(id)?;
        let node = self.arena.remove(id)?;
        self.len -= 1;
        node.value
    }

    fn detach(&mut self, id: NodeId) -> Option<()> {
        let (prev, next) = self.links(id)?;
        self.set_next(prev, next);
        self.set_prev(next, prev);
        Some(())
    }

    fn attach_between(&mut self, id: NodeId, prev: NodeId, next: NodeId) {
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = prev;
            node.next = next;
        }
        self.set_next(prev, id);
        self.set_prev(next, id);
    }
}

fn seat_sentinel<T>(arena: &mut SlotArena<Node<T>>) -> NodeId {
    // Arena id 0 is never issued; the links are overwritten below.
    let placeholder = SlotId::new(0, 0, 0);
    let id = arena.insert(Node {
        value: None,
        prev: placeholder,
        next: placeholder,
    });
    if let Some(node) = arena.get_mut(id) {
        node.prev = id;
        node.next = id;
    }
    id
}

impl<T> Default for SentinelList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SentinelList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for SentinelList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for SentinelList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a SentinelList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Walks the ring from both ends; `remaining` stops the two ends from crossing.
struct Cursor<'a, T> {
    list: &'a SentinelList<T>,
    front: NodeId,
    back: NodeId,
    remaining: usize,
}

impl<'a, T> Cursor<'a, T> {
    fn new(list: &'a SentinelList<T>) -> Self {
        Self {
            list,
            front: list.head_link(),
            back: list.tail_link(),
            remaining: list.len,
        }
    }

    fn next(&mut self) -> Option<(NodeId, &'a T)> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front;
        let node = self.list.arena.get(id)?;
        self.front = node.next;
        self.remaining -= 1;
        node.value.as_ref().map(|value| (id, value))
    }

    fn next_back(&mut self) -> Option<(NodeId, &'a T)> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back;
        let node = self.list.arena.get(id)?;
        self.back = node.prev;
        self.remaining -= 1;
        node.value.as_ref().map(|value| (id, value))
    }
}

/// Iterator over values from head to tail.
pub struct Iter<'a, T> {
    cursor: Cursor<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.cursor.remaining, Some(self.cursor.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.cursor.next_back().map(|(_, value)| value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator over node handles from head to tail.
pub struct IterIds<'a, T> {
    cursor: Cursor<'a, T>,
}

impl<T> Iterator for IterIds<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next().map(|(id, _)| id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.cursor.remaining, Some(self.cursor.remaining))
    }
}

impl<T> DoubleEndedIterator for IterIds<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.cursor.next_back().map(|(id, _)| id)
    }
}

impl<T> ExactSizeIterator for IterIds<'_, T> {}

/// Iterator over `(NodeId, &T)` pairs from head to tail.
pub struct IterEntries<'a, T> {
    cursor: Cursor<'a, T>,
}

impl<'a, T> Iterator for IterEntries<'a, T> {
    type Item = (NodeId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.cursor.remaining, Some(self.cursor.remaining))
    }
}

impl<T> DoubleEndedIterator for IterEntries<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.cursor.next_back()
    }
}

impl<T> ExactSizeIterator for IterEntries<'_, T> {}
