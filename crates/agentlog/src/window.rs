/// Fixed-capacity ring keeping the most recent `capacity` items in arrival order.
///
/// A capacity of zero keeps nothing.
#[derive(Debug)]
pub struct EventRing<T> {
    slots: Vec<Option<T>>,
    start: usize,
    len: usize,
}

impl<T> EventRing<T> {
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            start: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append an item, evicting the oldest one when full
    pub fn push(&mut self, item: T) {
        let capacity = self.capacity();
        if capacity == 0 {
            return;
        }

        if self.len < capacity {
            let idx = (self.start + self.len) % capacity;
            self.slots[idx] = Some(item);
            self.len += 1;
        } else {
            self.slots[self.start] = Some(item);
            self.start = (self.start + 1) % capacity;
        }
    }

    /// Drain the ring, oldest first
    pub fn into_vec(mut self) -> Vec<T> {
        let capacity = self.capacity();
        let mut items = Vec::with_capacity(self.len);
        for offset in 0..self.len {
            let idx = (self.start + offset) % capacity;
            if let Some(item) = self.slots[idx].take() {
                items.push(item);
            }
        }
        items
    }
}
