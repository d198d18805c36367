//! LRU List Module
//!
//! Access-order list used for eviction, stored as a slab of slots linked by
//! index so that every reordering is O(1) and nodes are reused.

// == Slot ==
#[derive(Debug)]
struct Slot<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU List ==
/// Doubly linked list of values ordered by recency.
///
/// - Front = Most recently used
/// - Back = Least recently used
///
/// Each pushed value gets a stable handle (slot index) that remains valid
/// until the value is removed.
#[derive(Debug)]
pub struct LruList<T> {
    slots: Vec<Option<Slot<T>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for LruList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LruList<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates an empty list with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    // == Push Front ==
    /// Inserts a value as most recently used and returns its handle.
    pub fn push_front(&mut self, value: T) -> usize {
        let slot = Slot {
            value,
            prev: None,
            next: self.head,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(slot);
                idx
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        };

        match self.head {
            Some(head) => self.slot_mut(head).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
        self.len += 1;
        idx
    }

    // == Move To Front ==
    /// Marks the value at `idx` as most recently used.
    pub fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.unlink(idx);

        let old_head = self.head;
        {
            let slot = self.slot_mut(idx);
            slot.prev = None;
            slot.next = old_head;
        }
        match old_head {
            Some(head) => self.slot_mut(head).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    // == Remove ==
    /// Removes the value at `idx` and frees its slot.
    ///
    /// Returns None if the handle is not live.
    pub fn remove(&mut self, idx: usize) -> Option<T> {
        if !matches!(self.slots.get(idx), Some(Some(_))) {
            return None;
        }
        self.unlink(idx);
        let slot = self.slots[idx].take()?;
        self.free.push(idx);
        self.len -= 1;
        Some(slot.value)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used value.
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.remove(tail)
    }

    // == Peek ==
    /// Returns the least recently used value without reordering.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|idx| self.get(idx))
    }

    /// Returns the most recently used value without reordering.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|idx| self.get(idx))
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        self.slots.get(idx)?.as_ref().map(|slot| &slot.value)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.slots.get_mut(idx)?.as_mut().map(|slot| &mut slot.value)
    }

    // == Iteration ==
    /// Iterates from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every value and releases all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // Detaches `idx` from its neighbours; the slot itself is left in place.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let slot = self.slot_mut(idx);
            (slot.prev.take(), slot.next.take())
        };
        match prev {
            Some(prev) => self.slot_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.slot_mut(next).prev = prev,
            None => self.tail = prev,
        }
    }

    // Handles held by the list are always live; a dead handle here is a bug.
    fn slot_mut(&mut self, idx: usize) -> &mut Slot<T> {
        match self.slots.get_mut(idx) {
            Some(Some(slot)) => slot,
            _ => panic!("lru: dangling slot index {idx}"),
        }
    }
}

// == Iterator ==
/// Front-to-back iterator over an [`LruList`].
pub struct Iter<'a, T> {
    list: &'a LruList<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let list = self.list;
        let idx = self.cursor?;
        let slot = list.slots.get(idx)?.as_ref()?;
        self.cursor = slot.next;
        Some(&slot.value)
    }
}
