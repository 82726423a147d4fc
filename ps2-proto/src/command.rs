//! Synchronous transmit and command protocol.
//!
//! Everything here is host-initiated and blocking: the port busy-waits on
//! device-generated clock edges with a bounded budget per edge. The
//! asynchronous receive path is suspended for the whole of a command
//! transaction, because both paths share the same two lines and their bit
//! timing must never interleave.
//!
//! # Command descriptors
//!
//! A [`Command`] packs the opcode together with the transfer shape the
//! device protocol defines for it:
//!
//! ```text
//! bits 15..12  bytes to send (arguments after the opcode)
//! bits 11..8   bytes to receive (response)
//! bits  7..0   opcode, transmitted first
//! ```
//!
//! The counts are a contract with the caller: they must match what the
//! device actually expects for that opcode.
//!
//! # Example
//!
//! ```
//! use ps2_proto::Command;
//!
//! let cmd = Command::GETINFO;
//! assert_eq!(cmd.opcode(), 0xE9);
//! assert_eq!(cmd.bytes_to_send(), 0);
//! assert_eq!(cmd.bytes_to_receive(), 3);
//! ```

use crate::error::{FaultCounters, Ps2Error};
use crate::frame::FrameDecoder;
use crate::link::{Level, Line, LinkDriver};

/// Acknowledgement byte the device sends after a successful host write.
pub const ACK: u8 = 0xFA;

/// How long the clock is held low to request a host write, in µs.
const REQUEST_TO_SEND_US: u32 = 100;

/// Width of the host-ready clock pulse after a synchronous read, in µs.
const READY_PULSE_US: u32 = 50;

/// Budget for a single clock-edge wait, in µs (25 ms).
const CLOCK_WAIT_TIMEOUT_US: u32 = 25_000;

/// A command descriptor: opcode plus declared argument/response counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command(pub u16);

impl Command {
    /// Set 1:1 scaling. Also the first element of the Synaptics
    /// special-command sequences.
    pub const SETSCALE11: Self = Self(0x00E6);
    /// Set sample rate; one argument byte.
    pub const SETRATE: Self = Self(0x10F3);
    /// Enable streaming (data reporting).
    pub const ENABLE: Self = Self(0x00F4);
    /// Disable streaming.
    pub const DISABLE: Self = Self(0x00F5);
    /// Reset; responds with the BAT completion code and device id.
    pub const RESET_BAT: Self = Self(0x02FF);
    /// Set resolution; one argument byte. Carries the 2-bit payloads of
    /// Synaptics encoded transfers.
    pub const SETRES: Self = Self(0x10E8);
    /// Synaptics information query; three response bytes.
    pub const GETINFO: Self = Self(0x03E9);

    /// The opcode byte, transmitted first.
    #[inline]
    #[must_use]
    pub const fn opcode(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Number of argument bytes that follow the opcode.
    #[inline]
    #[must_use]
    pub const fn bytes_to_send(self) -> usize {
        ((self.0 >> 12) & 0x0F) as usize
    }

    /// Number of response bytes the device returns.
    #[inline]
    #[must_use]
    pub const fn bytes_to_receive(self) -> usize {
        ((self.0 >> 8) & 0x0F) as usize
    }
}

/// Receiver of bytes decoded on the asynchronous path.
///
/// Invoked synchronously from the clock-edge handler; implementations
/// must not block and must not re-enter the transmit path (the lines are
/// mid-frame when this runs).
pub trait ByteSink {
    fn byte_received(&mut self, byte: u8);
}

impl<F: FnMut(u8)> ByteSink for F {
    #[inline]
    fn byte_received(&mut self, byte: u8) {
        self(byte)
    }
}

/// The command seam the device layer programs against.
///
/// Implemented by [`Ps2Port`]; tests substitute a recording mock to
/// assert emitted command sequences.
pub trait CommandPort {
    /// Execute one command transaction: send the opcode, send `args`,
    /// read the declared number of response bytes into `response`.
    ///
    /// Exactly `command.bytes_to_receive()` bytes are read from the
    /// device regardless of `response.len()`; bytes past the end of the
    /// buffer are discarded. The transaction always runs to completion;
    /// the first error encountered is returned afterwards.
    fn command(
        &mut self,
        command: Command,
        args: &[u8],
        response: &mut [u8],
    ) -> Result<(), Ps2Error>;

    /// Reset the device, discarding the BAT completion code and id.
    fn reset(&mut self) -> Result<(), Ps2Error> {
        let mut bat = [0u8; 2];
        self.command(Command::RESET_BAT, &[], &mut bat)
    }

    /// Enable streaming mode.
    fn enable_reporting(&mut self) -> Result<(), Ps2Error> {
        self.command(Command::ENABLE, &[], &mut [])
    }

    /// Disable streaming mode.
    fn disable_reporting(&mut self) -> Result<(), Ps2Error> {
        self.command(Command::DISABLE, &[], &mut [])
    }
}

/// The protocol engine: owns the link, the receive decoder and the
/// registered byte sink.
///
/// One port per physical device. There are deliberately no globals; a
/// host test can run any number of ports against simulated links.
pub struct Ps2Port<L: LinkDriver, S: ByteSink> {
    link: L,
    sink: S,
    decoder: FrameDecoder,
    rx_enabled: bool,
    faults: FaultCounters,
}

impl<L: LinkDriver, S: ByteSink> Ps2Port<L, S> {
    /// Create a port over `link`, delivering asynchronously received
    /// bytes to `sink`. Reception stays off until [`begin`](Self::begin).
    pub fn new(link: L, sink: S) -> Self {
        Self {
            link,
            sink,
            decoder: FrameDecoder::new(),
            rx_enabled: false,
            faults: FaultCounters::default(),
        }
    }

    /// Release both lines to their pull-ups and arm the receive path.
    ///
    /// The caller is responsible for routing clock falling edges to
    /// [`on_clock_edge`](Self::on_clock_edge) from here on.
    pub fn begin(&mut self) {
        self.link.release_high(Line::Clock);
        self.link.release_high(Line::Data);
        self.decoder.reset();
        self.rx_enabled = true;
    }

    /// Access the underlying link (the firmware uses this to await edges).
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Mutable access to the underlying link.
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Mutable access to the registered byte sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Fault tallies accumulated so far.
    pub fn faults(&self) -> &FaultCounters {
        &self.faults
    }

    /// Return the accumulated fault tallies and reset them to zero.
    pub fn take_faults(&mut self) -> FaultCounters {
        core::mem::take(&mut self.faults)
    }

    /// Current position of the asynchronous frame decoder (0 = idle).
    pub fn rx_bit_index(&self) -> u8 {
        self.decoder.bit_index()
    }

    /// Whether the asynchronous receive path is armed.
    pub fn rx_enabled(&self) -> bool {
        self.rx_enabled
    }

    /// Handle one clock falling edge on the asynchronous receive path.
    ///
    /// Re-samples the clock first: a duplicate or jittery trigger where
    /// the clock is not actually low is ignored, which makes the handler
    /// idempotent. Completed bytes go to the sink; the framing fault for
    /// this edge, if any, is returned for the caller to log.
    pub fn on_clock_edge(&mut self) -> Option<Ps2Error> {
        if !self.rx_enabled {
            return None;
        }
        // The clock keeps its pull-up between frames; a plain read is
        // enough to reject a jittery trigger.
        if self.link.read(Line::Clock) != Level::Low {
            return None;
        }

        let bit = self.sample(Line::Data);
        let outcome = self.decoder.push_bit(bit);
        if let Some(fault) = outcome.fault {
            self.faults.record(fault);
        }
        if let Some(byte) = outcome.completed {
            self.sink.byte_received(byte);
        }
        outcome.fault
    }

    /// Write one byte to the device and collect its acknowledgement.
    ///
    /// Fails if and only if the acknowledgement byte is not [`ACK`].
    /// Clock-wait timeouts and a bad line-control bit are recorded and
    /// absorbed: with no retry path, forward progress beats stalling.
    pub fn write_byte(&mut self, data: u8) -> Result<(), Ps2Error> {
        // Request-to-send: clock low for 100 µs, data low, release clock.
        self.link.drive_low(Line::Clock);
        self.link.delay_us(REQUEST_TO_SEND_US);
        self.link.drive_low(Line::Data);
        self.link.release_high(Line::Clock);

        // Payload, LSB first. The device samples while the clock is low.
        let mut parity: u8 = 1;
        let mut rest = data;
        for _ in 0..8 {
            let bit = rest & 0x01;
            parity ^= bit;
            rest >>= 1;
            self.write_bit(Level::from_bit(bit));
        }

        // Parity, then stop (always 1, which also releases the line).
        self.write_bit(Level::from_bit(parity));
        self.write_bit(Level::High);

        // Line control: the device pulls data low on the next low phase.
        let wait = self.wait_clock(Level::Low);
        self.note(wait);
        let line_control = self.sample(Line::Data);
        let wait = self.wait_clock(Level::High);
        self.note(wait);
        if line_control != Level::Low {
            self.faults.record(Ps2Error::LineControl);
        }

        let ack = self.read_byte_sync();
        if ack != ACK {
            self.faults.record(Ps2Error::Nack);
            return Err(Ps2Error::Nack);
        }
        Ok(())
    }

    /// Drive one host-write bit through a full clock cycle.
    fn write_bit(&mut self, bit: Level) {
        let wait = self.wait_clock(Level::Low);
        self.note(wait);
        match bit {
            Level::Low => self.link.drive_low(Line::Data),
            // Open collector: a 1 is written by releasing the line.
            Level::High => self.link.release_high(Line::Data),
        }
        let wait = self.wait_clock(Level::High);
        self.note(wait);
    }

    /// Read one byte synchronously, bit by bit.
    ///
    /// Only used inside a write or command transaction to collect the
    /// acknowledgement and response bytes, never from outside code.
    /// Framing violations are recorded, the assembled byte is returned
    /// regardless.
    fn read_byte_sync(&mut self) -> u8 {
        let wait = self.wait_clock(Level::Low);
        self.note(wait);
        if self.sample(Line::Data) != Level::Low {
            self.faults.record(Ps2Error::StartBit);
        }
        let wait = self.wait_clock(Level::High);
        self.note(wait);

        let mut data: u8 = 0;
        let mut parity: u8 = 0;
        for i in 0..8 {
            let wait = self.wait_clock(Level::Low);
            self.note(wait);
            let bit = self.sample(Line::Data);
            let wait = self.wait_clock(Level::High);
            self.note(wait);

            data |= bit.bit() << i;
            parity ^= bit.bit();
        }

        let wait = self.wait_clock(Level::Low);
        self.note(wait);
        parity ^= self.sample(Line::Data).bit();
        let wait = self.wait_clock(Level::High);
        self.note(wait);
        if parity != 1 {
            self.faults.record(Ps2Error::Parity);
        }

        let wait = self.wait_clock(Level::Low);
        self.note(wait);
        if self.sample(Line::Data) != Level::High {
            self.faults.record(Ps2Error::StopBit);
        }

        // Pulse the clock low to signal host-ready-for-next-byte.
        self.link.drive_low(Line::Clock);
        self.link.delay_us(READY_PULSE_US);
        self.link.release_high(Line::Clock);

        data
    }

    /// Busy-wait until the clock reaches `level` or the budget runs out.
    ///
    /// Waiting for low keeps the pull-up engaged; waiting for high lets
    /// the line float. The bounded loop makes the 25 ms budget explicit;
    /// internal callers note the timeout and proceed anyway.
    fn wait_clock(&mut self, level: Level) -> Result<(), Ps2Error> {
        match level {
            Level::Low => self.link.release_high(Line::Clock),
            Level::High => self.link.float_input(Line::Clock),
        }

        for _ in 0..CLOCK_WAIT_TIMEOUT_US {
            if self.link.read(Line::Clock) == level {
                return Ok(());
            }
            self.link.delay_us(1);
        }
        Err(Ps2Error::ClockTimeout)
    }

    /// Sample a line as a plain input.
    fn sample(&mut self, line: Line) -> Level {
        self.link.float_input(line);
        self.link.read(line)
    }

    /// Record an absorbed clock-wait outcome.
    fn note(&mut self, wait: Result<(), Ps2Error>) {
        if let Err(fault) = wait {
            self.faults.record(fault);
        }
    }
}

impl<L: LinkDriver, S: ByteSink> CommandPort for Ps2Port<L, S> {
    fn command(
        &mut self,
        command: Command,
        args: &[u8],
        response: &mut [u8],
    ) -> Result<(), Ps2Error> {
        debug_assert_eq!(
            args.len(),
            command.bytes_to_send(),
            "argument count must match the command descriptor"
        );

        // Take the lines: suspend asynchronous reception and drop any
        // partially assembled frame, which would otherwise resume out of
        // phase after the transaction.
        self.rx_enabled = false;
        self.decoder.reset();

        let mut first_err = None;

        if let Err(e) = self.write_byte(command.opcode()) {
            first_err.get_or_insert(e);
        }
        for &arg in args {
            if let Err(e) = self.write_byte(arg) {
                first_err.get_or_insert(e);
            }
        }
        for i in 0..command.bytes_to_receive() {
            let byte = self.read_byte_sync();
            if let Some(slot) = response.get_mut(i) {
                *slot = byte;
            }
        }

        self.rx_enabled = true;

        match first_err {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }
}
