//! Core error types and result handling
//!
//! Every fallible codec operation reports a distinct [`ModbusError`] variant
//! per failure condition. There are no panics and no implicit retries: a
//! malformed frame is a terminal failure for that single decode attempt, and
//! retry/backoff policy belongs to the transport layer.

use thiserror::Error;

/// Result type used throughout the crate.
pub type ModbusResult<T> = Result<T, ModbusError>;

/// Errors reported by the RTU codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModbusError {
    /// A required input was missing or unusable (e.g. decoding a response
    /// with no outstanding request).
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the input
        message: String,
    },

    /// A field value is outside the protocol-defined bounds (slave id,
    /// register quantity, byte count, or address span).
    #[error("value out of protocol range: {message}")]
    InvalidRange {
        /// Which field and why
        message: String,
    },

    /// The input frame is shorter than the declared header + payload + CRC.
    #[error("buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Bytes required
        needed: usize,
        /// Bytes actually available
        available: usize,
    },

    /// The caller-supplied output has insufficient capacity for the decoded
    /// payload.
    #[error("output too small: need room for {needed} registers, have {available}")]
    OutputTooSmall {
        /// Registers required
        needed: usize,
        /// Register slots actually available
        available: usize,
    },

    /// A response arrived from a different slave than the last request was
    /// addressed to.
    #[error("slave mismatch: expected {expected}, response from {actual}")]
    SlaveMismatch {
        /// Slave id of the last encoded request
        expected: u8,
        /// Slave id found in the response frame
        actual: u8,
    },

    /// A request is addressed to neither this device's identity nor the
    /// broadcast id.
    #[error("identity mismatch: device is {expected}, request addressed to {actual}")]
    IdentityMismatch {
        /// Configured device identity
        expected: u8,
        /// Slave id found in the request frame
        actual: u8,
    },

    /// The frame carries an unexpected function code.
    #[error("function mismatch: expected {expected:#04X}, got {actual:#04X}")]
    FunctionMismatch {
        /// Expected function code
        expected: u8,
        /// Function code found in the frame
        actual: u8,
    },

    /// CRC verification failed.
    #[error("CRC mismatch: computed {computed:#06X}, received {received:#06X}")]
    Integrity {
        /// CRC recomputed over the received header + payload
        computed: u16,
        /// CRC carried in the frame's trailing bytes
        received: u16,
    },
}

impl ModbusError {
    /// Create an invalid argument error.
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a range error.
    pub fn invalid_range<S: Into<String>>(message: S) -> Self {
        Self::InvalidRange {
            message: message.into(),
        }
    }
}
