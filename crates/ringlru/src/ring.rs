//! Eviction ring: fixed-size circular doubly-linked list of slots
//!
//! Every slot is allocated at construction and linked by index into a single
//! cycle. Walking `next` from the head visits the occupied slots from most to
//! least recently used, then the free ones. `head.prev` is therefore always
//! the next slot to claim: a free slot until the ring fills, the tail after.

use crate::error::{Error, Result};

/// Position of a slot in the ring's backing array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SlotId(usize);

struct Slot<K> {
    key: Option<K>,
    prev: usize,
    next: usize,
}

/// Recency order over a preallocated set of slots
pub(crate) struct Ring<K> {
    slots: Box<[Slot<K>]>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<K> Ring<K> {
    /// Allocate `capacity` free slots linked into one cycle
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Ring capacity must be greater than 0");

        let slots = (0..capacity)
            .map(|i| Slot {
                key: None,
                prev: (i + capacity - 1) % capacity,
                next: (i + 1) % capacity,
            })
            .collect();

        Self {
            slots,
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    /// Bind the slot before head to `key` and make it the new head.
    ///
    /// Once the ring is full that slot is the tail, so its previous key is
    /// handed back to the caller for removal from the index.
    pub fn claim(&mut self, key: K) -> (SlotId, Option<K>) {
        let idx = self.slots[self.head].prev;
        let displaced = self.slots[idx].key.replace(key);
        self.head = idx;

        if displaced.is_some() {
            debug_assert_eq!(idx, self.tail);
            self.tail = self.slots[idx].prev;
        } else {
            if self.len == 0 {
                self.tail = idx;
            }
            self.len += 1;
        }

        (SlotId(idx), displaced)
    }

    /// Mark an occupied slot as most recently used
    pub fn move_to_front(&mut self, id: SlotId) {
        let idx = id.0;
        debug_assert!(self.slots[idx].key.is_some(), "moving a free slot");

        if idx == self.head {
            return;
        }

        if idx == self.tail {
            self.tail = self.slots[idx].prev;
        }

        let (prev, next) = (self.slots[idx].prev, self.slots[idx].next);
        self.slots[prev].next = next;
        self.slots[next].prev = prev;

        let head = self.head;
        let before = self.slots[head].prev;
        self.slots[idx].prev = before;
        self.slots[idx].next = head;
        self.slots[before].next = idx;
        self.slots[head].prev = idx;

        self.head = idx;
    }

    pub fn key(&self, id: SlotId) -> Option<&K> {
        self.slots.get(id.0).and_then(|slot| slot.key.as_ref())
    }

    /// Least recently used occupied slot
    pub fn tail(&self) -> Option<SlotId> {
        (self.len > 0).then_some(SlotId(self.tail))
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Occupied slots from head to tail
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            ring: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Verify the cycle and the occupied/free partition
    pub fn check_links(&self) -> Result<()> {
        let capacity = self.slots.len();

        for (idx, slot) in self.slots.iter().enumerate() {
            if self.slots[slot.prev].next != idx {
                return Err(Error::invariant(format!(
                    "slot {} is not the successor of its predecessor {}",
                    idx, slot.prev
                )));
            }
        }

        let mut seen = vec![false; capacity];
        let mut cursor = self.head;
        for step in 0..capacity {
            if std::mem::replace(&mut seen[cursor], true) {
                return Err(Error::invariant(format!(
                    "cycle closes after {} of {} slots",
                    step, capacity
                )));
            }

            let occupied = self.slots[cursor].key.is_some();
            if occupied != (step < self.len) {
                return Err(Error::invariant(format!(
                    "slot {} at position {} is {} but ring holds {} keys",
                    cursor,
                    step,
                    if occupied { "occupied" } else { "free" },
                    self.len
                )));
            }

            if self.len > 0 && step == self.len - 1 && cursor != self.tail {
                return Err(Error::invariant(format!(
                    "tail is slot {} but least recent slot is {}",
                    self.tail, cursor
                )));
            }

            cursor = self.slots[cursor].next;
        }

        if cursor != self.head {
            return Err(Error::invariant("walk from head does not return to head"));
        }

        Ok(())
    }
}

pub(crate) struct Iter<'a, K> {
    ring: &'a Ring<K>,
    cursor: usize,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = (SlotId, &'a K);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let idx = self.cursor;
        let slot = &self.ring.slots[idx];
        self.cursor = slot.next;
        self.remaining -= 1;
        slot.key.as_ref().map(|key| (SlotId(idx), key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
