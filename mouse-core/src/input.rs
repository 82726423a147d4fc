//! Input source trait and error types.

use crate::types::PointerEvent;
use core::future::Future;
use ps2_proto::Ps2Error;

/// Error type for input operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Fault surfaced by the PS/2 protocol engine.
    Protocol(Ps2Error),
    /// Stream lost packet framing (sync bit missing).
    OutOfSync,
    /// Device gone / never initialized.
    Disconnected,
}

impl From<Ps2Error> for InputError {
    fn from(err: Ps2Error) -> Self {
        InputError::Protocol(err)
    }
}

/// Async trait for pointer input sources.
///
/// This trait abstracts the source of pointer motion, allowing different
/// implementations (the PS/2 port, a replayed trace, mocks) to be used
/// interchangeably.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap
/// allocation.
pub trait PointerSource {
    /// Wait for and receive the next pointer event.
    ///
    /// This is an async operation that yields while no data is
    /// available. Returns the decoded event or an error.
    fn receive(&mut self) -> impl Future<Output = Result<PointerEvent, InputError>>;

    /// Check if the input source is connected/ready.
    fn is_connected(&self) -> bool;
}
