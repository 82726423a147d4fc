//! PS/2 pointing-device protocol engine.
//!
//! This crate speaks the PS/2 serial protocol at the single-bit level
//! over two open-collector lines (clock and data), with the device
//! driving the clock. It provides:
//!
//! - **Link abstraction**: [`LinkDriver`] - the electrical primitives
//!   (drive low, release to pull-up, float, read, busy-delay), so the
//!   engine runs identically against real GPIO pins and simulated links
//! - **Receive state machine**: [`FrameDecoder`] - reconstructs 11-bit
//!   frames (start, 8 data bits LSB-first, odd parity, stop) one clock
//!   falling edge at a time
//! - **Transmit/command protocol**: [`Ps2Port`] - the request-to-send
//!   host write with acknowledgement, synchronous response reads, and
//!   [`CommandPort::command`] transactions that suspend the receive path
//!   for their duration
//!
//! # Frame format
//!
//! ```text
//! start(0) | d0 d1 d2 d3 d4 d5 d6 d7 | parity(odd) | stop(1)
//! ```
//!
//! One bit is transferred per clock falling edge. Odd parity covers the
//! eight data bits plus the parity bit itself: their XOR must equal 1.
//!
//! # Command descriptors
//!
//! A [`Command`] is a 16-bit value: high nibble = argument bytes to send,
//! next nibble = response bytes to receive, low byte = opcode. The seven
//! opcodes this bridge uses are provided as associated constants
//! ([`Command::SETRES`], [`Command::GETINFO`], ...).
//!
//! # Error policy
//!
//! The protocol has no retransmission channel, so framing and parity
//! violations are absorbed where they occur: the state machine advances,
//! the assembled byte is still delivered, and the fault is surfaced as a
//! typed [`Ps2Error`] plus a [`FaultCounters`] tally for diagnostics.
//! A clock-wait that exhausts its 25 ms budget unblocks and proceeds.
//! The one hard failure is [`Ps2Error::Nack`]: a host write whose
//! acknowledgement byte was not `0xFA`.
//!
//! # Concurrency
//!
//! The asynchronous receive path ([`Ps2Port::on_clock_edge`]) and the
//! synchronous command path share the physical lines and must never
//! interleave. A command transaction enforces this itself: it disables
//! the receive gate and force-resets the frame decoder for its whole
//! duration.
//!
//! # No-std support
//!
//! `#![no_std]` by default with no heap allocation; the `std` feature
//! enables host testing.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod command;
pub mod error;
pub mod frame;
pub mod link;

// Re-export the protocol surface at the crate root for convenience
pub use command::{ByteSink, Command, CommandPort, Ps2Port, ACK};
pub use error::{FaultCounters, Ps2Error};
pub use frame::{BitOutcome, FrameDecoder};
pub use link::{Level, Line, LinkDriver};
