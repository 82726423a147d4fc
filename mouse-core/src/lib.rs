//! Platform-agnostic pointer types, packet assembly, and bridge traits.
//!
//! This crate provides the core abstractions for the pointer bridge
//! without any platform-specific dependencies. It can be used both in
//! embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`types`]: Core data structures ([`PointerEvent`], [`MouseButtons`])
//! - [`packet`]: Relative packet assembly ([`PacketAssembler`])
//! - [`filter`]: Delta smoothing ([`SimpleAverage`])
//! - [`input`]: Input source trait ([`PointerSource`])
//! - [`output`]: Report sink trait ([`ReportSink`])
//! - [`bridge`]: Orchestrates input-to-output flow ([`PointerBridge`])
//!
//! # Packet format
//!
//! Streaming devices emit 3-byte relative packets:
//!
//! ```text
//! byte 0: Yovf Xovf Ysign Xsign 1 Middle Right Left
//! byte 1: X delta (low 8 bits, sign bit in byte 0)
//! byte 2: Y delta (low 8 bits, sign bit in byte 0)
//! ```
//!
//! # Example
//!
//! ```rust
//! use mouse_core::{MouseButtons, PacketAssembler};
//!
//! let mut assembler = PacketAssembler::new();
//! assert!(assembler.push(0x09).is_none()); // flags: sync + left button
//! assert!(assembler.push(5).is_none());    // dx
//! let event = assembler.push(3).unwrap();  // dy completes the packet
//! assert!(event.buttons.contains(MouseButtons::LEFT));
//! assert_eq!(event.dx, 5);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod bridge;
pub mod filter;
pub mod input;
pub mod output;
pub mod packet;
pub mod types;

// Re-export main types at crate root
pub use bridge::{BridgeError, PointerBridge};
pub use filter::SimpleAverage;
pub use input::{InputError, PointerSource};
pub use output::{OutputError, ReportSink};
pub use packet::PacketAssembler;
pub use types::{clamp_delta, MouseButtons, PointerEvent};
