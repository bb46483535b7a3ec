//! `embedded-hal` serial traits over a shared [`RingBuffer`].

use core::convert::Infallible;

use embedded_hal::blocking;
use embedded_hal::serial::{Read, Write};
use nb::Error::WouldBlock;

use crate::RingBuffer;

impl Read<u8> for &RingBuffer<'_> {
    type Error = Infallible;

    fn read(&mut self) -> nb::Result<u8, Infallible> {
        self.pop_front().ok_or(WouldBlock)
    }
}

impl Write<u8> for &RingBuffer<'_> {
    type Error = Infallible;

    fn write(&mut self, word: u8) -> nb::Result<(), Infallible> {
        self.push_back(word).map_err(|_| WouldBlock)
    }

    // Nothing pending. Not `RingBuffer::flush`, which discards.
    fn flush(&mut self) -> nb::Result<(), Infallible> {
        Ok(())
    }
}

impl blocking::serial::write::Default<u8> for &RingBuffer<'_> {}
