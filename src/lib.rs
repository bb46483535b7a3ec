//! Byte ring buffer shared between an interrupt handler and the main loop.
//! On AVR the critical sections come from `avr-device`.
//!
//! ```
//! use byte_ring::{Full, RingBuffer};
//!
//! let mut storage = [0u8; 4];
//! let rx = RingBuffer::with_storage(&mut storage);
//!
//! rx.push_back_slice(b"AT\r").unwrap();
//! assert_eq!(rx.peek_at(1), Some(b'T'));
//! assert_eq!(rx.push_back_slice(b"OK"), Err(Full { free: 1 }));
//!
//! assert_eq!(rx.pop_front(), Some(b'A'));
//! rx.discard_front(2);
//! assert!(rx.is_empty());
//! ```

#![cfg_attr(not(test), no_std)]

mod buffer;
mod error;
pub mod serial;

pub use buffer::RingBuffer;
pub use error::Full;
