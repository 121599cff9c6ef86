//! RTU frame envelope shared by the master and slave codecs
//!
//! Every Modbus RTU frame is a header, an optional payload, and a trailing
//! CRC16. This module holds what both codec sides share: the function code
//! enum, big-endian field access, and CRC placement/verification. New
//! function codes slot in as [`FunctionCode`] variants reusing the same
//! envelope rather than duplicating the encode/decode contract.
//!
//! All multi-byte fields are big-endian on the wire except the CRC, which
//! trails low byte first. Both are written with explicit byte-level accesses
//! so behavior is identical regardless of host byte order.

use crate::crc::crc16;
use crate::error::{ModbusError, ModbusResult};

/// Modbus slave/unit identifier
pub type SlaveId = u8;

/// Modbus function codes understood by this codec.
///
/// Only Read Holding Registers is currently supported; additional codes are
/// added here as new variants sharing the header-plus-CRC envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FunctionCode {
    /// Read Holding Registers (FC03)
    ReadHoldingRegisters = 0x03,
}

impl FunctionCode {
    /// Parse a raw function code byte.
    #[inline]
    pub fn from_u8(code: u8) -> Option<Self> {
        match code {
            0x03 => Some(Self::ReadHoldingRegisters),
            _ => None,
        }
    }

    /// Raw wire value.
    #[inline]
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Human-readable name.
    pub fn description(self) -> &'static str {
        match self {
            Self::ReadHoldingRegisters => "Read Holding Registers",
        }
    }
}

/// A decoded Read Holding Registers request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRequest {
    /// Addressed slave (may be the broadcast id 0)
    pub slave_id: SlaveId,
    /// First register address
    pub start_address: u16,
    /// Number of registers requested (1..=125)
    pub quantity: u16,
}

/// Read a big-endian u16 at `offset`.
///
/// Caller guarantees `offset + 1 < frame.len()`.
#[inline]
pub(crate) fn get_u16_be(frame: &[u8], offset: usize) -> u16 {
    u16::from(frame[offset]) << 8 | u16::from(frame[offset + 1])
}

/// Write a big-endian u16 at `offset`.
///
/// Caller guarantees `offset + 1 < frame.len()`.
#[inline]
pub(crate) fn put_u16_be(frame: &mut [u8], offset: usize, value: u16) {
    frame[offset] = (value >> 8) as u8;
    frame[offset + 1] = (value & 0xFF) as u8;
}

/// Compute the CRC over `frame[..payload_len]` and append it low byte first.
///
/// Caller guarantees capacity for the two CRC bytes.
#[inline]
pub(crate) fn append_crc(frame: &mut [u8], payload_len: usize) {
    let crc = crc16(&frame[..payload_len]);
    frame[payload_len] = (crc & 0xFF) as u8;
    frame[payload_len + 1] = (crc >> 8) as u8;
}

/// Verify the trailing CRC of `frame[..payload_len + 2]`.
///
/// Recomputes the CRC over `frame[..payload_len]` and compares it to the two
/// trailing bytes, read low byte first.
#[inline]
pub(crate) fn verify_crc(frame: &[u8], payload_len: usize) -> ModbusResult<()> {
    let computed = crc16(&frame[..payload_len]);
    let received = u16::from(frame[payload_len]) | u16::from(frame[payload_len + 1]) << 8;
    if computed != received {
        return Err(ModbusError::Integrity { computed, received });
    }
    Ok(())
}
