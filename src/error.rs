/// Append rejected; `free` is the space there was at the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("ring buffer full: {free} byte(s) free")]
pub struct Full {
    pub free: usize,
}
