//! PointerBridge: connects input sources to report sinks.

use crate::input::{InputError, PointerSource};
use crate::output::{OutputError, ReportSink};
use crate::types::PointerEvent;

/// A bridge that forwards pointer events from an input source to a
/// report sink.
///
/// This abstraction decouples the input and output implementations,
/// making the system more testable and flexible.
///
/// # Error Handling
///
/// On input errors, the bridge sends a neutral event so that stale
/// motion or stuck buttons never persist on the host side.
pub struct PointerBridge<I, O> {
    input: I,
    output: O,
}

impl<I: PointerSource, O: ReportSink> PointerBridge<I, O> {
    /// Create a new bridge from an input source and report sink.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    /// Run the bridge, forwarding pointer events indefinitely.
    ///
    /// This method never returns under normal operation.
    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.process_one().await;
        }
    }

    /// Process a single event and forward it to the output.
    ///
    /// Returns the result of the operation for testing purposes.
    pub async fn process_one(&mut self) -> Result<(), BridgeError> {
        match self.input.receive().await {
            Ok(event) => {
                self.output
                    .send(&event)
                    .await
                    .map_err(BridgeError::Output)?;
                Ok(())
            }
            Err(e) => {
                // Send a neutral event to prevent stale motion
                let _ = self.output.send(&PointerEvent::neutral()).await;
                Err(BridgeError::Input(e))
            }
        }
    }

    /// Get a reference to the input source.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Get a mutable reference to the input source.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Get a reference to the report sink.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the report sink.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Decompose the bridge into its input and output components.
    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }
}

/// Error type for bridge operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeError {
    /// Error from the input source.
    Input(InputError),
    /// Error from the report sink.
    Output(OutputError),
}
