//! Protocol error taxonomy and fault accounting.

/// Protocol-level fault observed on the PS/2 link.
///
/// Most faults are absorbed where they occur (the protocol has no
/// retransmission channel), but every one of them is surfaced as a typed
/// value so callers can log or count them. Only [`Ps2Error::Nack`] is an
/// operation failure: a host write whose acknowledgement byte was not
/// `0xFA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ps2Error {
    /// Start bit of a frame was not low.
    StartBit,
    /// Accumulated odd parity over payload and parity bit was wrong.
    Parity,
    /// Stop bit of a frame was not high.
    StopBit,
    /// A clock-edge wait exhausted its budget.
    ClockTimeout,
    /// The device did not pull the line-control bit low after a write.
    LineControl,
    /// Acknowledgement byte after a write was not `ACK` (0xFA).
    Nack,
}

impl core::fmt::Display for Ps2Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Ps2Error::StartBit => write!(f, "start bit error"),
            Ps2Error::Parity => write!(f, "parity error"),
            Ps2Error::StopBit => write!(f, "stop bit error"),
            Ps2Error::ClockTimeout => write!(f, "clock wait timed out"),
            Ps2Error::LineControl => write!(f, "line control error"),
            Ps2Error::Nack => write!(f, "did not receive ACK"),
        }
    }
}

/// Running tallies of absorbed protocol faults.
///
/// The port records every fault here, including the ones it absorbs and
/// continues past. Diagnostics only; nothing in the protocol reads these
/// back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaultCounters {
    pub start_bit: u16,
    pub parity: u16,
    pub stop_bit: u16,
    pub clock_timeout: u16,
    pub line_control: u16,
    pub nack: u16,
}

impl FaultCounters {
    /// Record one occurrence of `fault`.
    pub fn record(&mut self, fault: Ps2Error) {
        let slot = match fault {
            Ps2Error::StartBit => &mut self.start_bit,
            Ps2Error::Parity => &mut self.parity,
            Ps2Error::StopBit => &mut self.stop_bit,
            Ps2Error::ClockTimeout => &mut self.clock_timeout,
            Ps2Error::LineControl => &mut self.line_control,
            Ps2Error::Nack => &mut self.nack,
        };
        *slot = slot.saturating_add(1);
    }

    /// Total number of faults recorded.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.start_bit as u32
            + self.parity as u32
            + self.stop_bit as u32
            + self.clock_timeout as u32
            + self.line_control as u32
            + self.nack as u32
    }
}
