//! Output sink trait and error types.

use crate::types::PointerEvent;
use core::future::Future;

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// USB/communication I/O error.
    Io,
    /// Device not ready (e.g., USB not enumerated).
    NotReady,
    /// Endpoint busy.
    Busy,
}

/// Async trait for pointer report sinks.
///
/// This trait abstracts the destination of pointer motion, enabling
/// different outputs (USB HID, BLE HID, a capture buffer in tests).
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap
/// allocation.
pub trait ReportSink {
    /// Send a pointer event to the output.
    ///
    /// May block until the previous report has been sent.
    fn send(&mut self, event: &PointerEvent) -> impl Future<Output = Result<(), OutputError>>;

    /// Check if the output is ready to accept data.
    fn is_ready(&self) -> bool;
}
