//! Fixed-capacity rolling window.
//!
//! Every history in the engine (frames, hip height, step intervals,
//! contact events) is one of these. Storage is allocated once; when the
//! window is full the oldest slot is overwritten in place.

/// Bounded FIFO ring buffer. Iteration is always oldest → newest.
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    /// Slot storage, grows up to `capacity` then stays fixed
    slots: Vec<T>,
    /// Index of the oldest element once the window has wrapped
    head: usize,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    /// A capacity of zero is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            head: 0,
            capacity,
        }
    }

    /// Push a value, evicting the oldest one when full.
    pub fn push(&mut self, value: T) {
        if self.slots.len() < self.capacity {
            self.slots.push(value);
        } else {
            self.slots[self.head] = value;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    /// i-th element counting from the oldest.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.slots.len() {
            return None;
        }
        Some(&self.slots[(self.head + index) % self.slots.len()])
    }

    /// Newest element.
    pub fn latest(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// i-th element counting back from the newest (0 = newest).
    pub fn back(&self, offset: usize) -> Option<&T> {
        self.len()
            .checked_sub(offset + 1)
            .and_then(|i| self.get(i))
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        (0..self.slots.len()).map(move |i| &self.slots[(self.head + i) % self.slots.len()])
    }

    /// The newest `n` elements (fewer if the window holds fewer), oldest first.
    pub fn last_n(&self, n: usize) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        let skip = self.len().saturating_sub(n);
        self.iter().skip(skip)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = 0;
    }
}

impl<T: Copy> RollingWindow<T> {
    /// Copy out in chronological order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().copied().collect()
    }
}
