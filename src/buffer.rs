use core::cell::RefCell;
use core::mem;

use critical_section::Mutex;

use crate::error::Full;

struct Ring<'a> {
    storage: &'a mut [u8],
    head: usize,
    length: usize,
}

impl<'a> Ring<'a> {
    const fn new(storage: &'a mut [u8]) -> Self {
        Ring {
            storage,
            head: 0,
            length: 0,
        }
    }

    fn bind(&mut self, storage: &'a mut [u8]) -> &'a mut [u8] {
        self.head = 0;
        self.length = 0;
        mem::replace(&mut self.storage, storage)
    }

    fn capacity(&self) -> usize {
        self.storage.len()
    }

    fn free_space(&self) -> usize {
        self.capacity() - self.length
    }

    // `index` is always below 2 * capacity, so one subtraction normalises it.
    fn wrap(&self, index: usize) -> usize {
        if index >= self.capacity() {
            index - self.capacity()
        } else {
            index
        }
    }

    fn pop_front(&mut self) -> Option<u8> {
        if self.length == 0 {
            return None;
        }
        let byte = self.storage[self.head];
        self.head = self.wrap(self.head + 1);
        self.length -= 1;
        Some(byte)
    }

    fn discard_front(&mut self, count: usize) {
        if count < self.length {
            self.head = self.wrap(self.head + count);
            self.length -= count;
        } else {
            self.length = 0;
        }
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        if offset >= self.length {
            return None;
        }
        Some(self.storage[self.wrap(self.head + offset)])
    }

    fn push_back(&mut self, byte: u8) -> Result<(), Full> {
        if self.length == self.capacity() {
            return Err(Full { free: 0 });
        }
        let tail = self.wrap(self.head + self.length);
        self.storage[tail] = byte;
        self.length += 1;
        Ok(())
    }

    fn push_back_slice(&mut self, bytes: &[u8]) -> Result<(), Full> {
        let free = self.free_space();
        if bytes.len() > free {
            return Err(Full { free });
        }

        // Copy up to the physical end of storage, then the rest from index 0
        let tail = self.wrap(self.head + self.length);
        let (first, rest) = bytes.split_at((self.capacity() - tail).min(bytes.len()));
        self.storage[tail..tail + first.len()].copy_from_slice(first);
        self.storage[..rest.len()].copy_from_slice(rest);

        self.length += bytes.len();
        Ok(())
    }

    fn flush(&mut self) {
        self.length = 0;
    }
}

/// Byte FIFO over caller-owned storage. Every method holds a critical section
/// for its whole body.
pub struct RingBuffer<'a> {
    ring: Mutex<RefCell<Ring<'a>>>,
}

impl<'a> RingBuffer<'a> {
    /// Unbound buffer, capacity 0. Every non-empty append fails until `init`.
    pub const fn new() -> Self {
        Self::with_storage(&mut [])
    }

    pub const fn with_storage(storage: &'a mut [u8]) -> Self {
        RingBuffer {
            ring: Mutex::new(RefCell::new(Ring::new(storage))),
        }
    }

    fn with_ring<R>(&self, f: impl FnOnce(&mut Ring<'a>) -> R) -> R {
        critical_section::with(|cs| f(&mut *self.ring.borrow_ref_mut(cs)))
    }

    /// Binds `storage` and empties the buffer. Returns the previous storage.
    pub fn init(&self, storage: &'a mut [u8]) -> &'a mut [u8] {
        let capacity = storage.len();
        let previous = self.with_ring(|ring| ring.bind(storage));
        log::trace!("ring buffer bound to {} byte(s)", capacity);
        previous
    }

    pub fn pop_front(&self) -> Option<u8> {
        self.with_ring(Ring::pop_front)
    }

    pub fn discard_front(&self, count: usize) {
        self.with_ring(|ring| ring.discard_front(count))
    }

    /// `None` unless `offset < len()`.
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.with_ring(|ring| ring.peek_at(offset))
    }

    pub fn push_back(&self, byte: u8) -> Result<(), Full> {
        self.with_ring(|ring| ring.push_back(byte))
            .inspect_err(|_| log::debug!("ring buffer full, dropped 1 byte"))
    }

    /// All or nothing. Interrupts stay masked for the whole copy.
    pub fn push_back_slice(&self, bytes: &[u8]) -> Result<(), Full> {
        self.with_ring(|ring| ring.push_back_slice(bytes))
            .inspect_err(|full| {
                log::debug!(
                    "ring buffer rejected {} byte(s), {} free",
                    bytes.len(),
                    full.free
                )
            })
    }

    pub fn free_space(&self) -> usize {
        self.with_ring(|ring| ring.free_space())
    }

    pub fn flush(&self) {
        self.with_ring(Ring::flush)
    }

    pub fn len(&self) -> usize {
        self.with_ring(|ring| ring.length)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.free_space() == 0
    }

    pub fn capacity(&self) -> usize {
        self.with_ring(|ring| ring.capacity())
    }
}

impl Default for RingBuffer<'_> {
    fn default() -> Self {
        Self::new()
    }
}
