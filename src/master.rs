//! Master-side codec for Read Holding Registers
//!
//! A [`MasterCodec`] encodes request frames for an external transport to send
//! and decodes the response frames that come back. It remembers the slave id
//! of the most recently encoded request and rejects responses from anyone
//! else, modelling a single-outstanding-request session.
//!
//! The codec is a plain value owned by the caller; run one per session. It
//! never touches a transport and never allocates, reading and writing only
//! within caller-supplied buffers.
//!
//! # Example
//!
//! ```rust
//! use modbus_rtu_codec::MasterCodec;
//!
//! let mut master = MasterCodec::new();
//! let mut frame = [0u8; 8];
//! let len = master.encode_read_request(1, 0x0258, 2, &mut frame).unwrap();
//! assert_eq!(&frame[..len], &[0x01, 0x03, 0x02, 0x58, 0x00, 0x02, 0x44, 0x60]);
//! ```

use tracing::debug;

use crate::constants::{CRC_LEN, REQUEST_FRAME_LEN, REQUEST_HEADER_LEN, RESPONSE_HEADER_LEN};
use crate::error::{ModbusError, ModbusResult};
use crate::frame::{append_crc, get_u16_be, put_u16_be, verify_crc, FunctionCode, SlaveId};
use crate::validate::{valid_address_range, valid_byte_count, valid_quantity, valid_slave_id};

/// Requester-side codec session.
///
/// Tracks the slave id of the last encoded request so mismatched responses
/// are rejected. One outstanding request at a time; for concurrent sessions,
/// create one codec per session.
#[derive(Debug, Clone, Default)]
pub struct MasterCodec {
    /// Slave id of the most recently encoded request, if any
    last_request_slave: Option<SlaveId>,
}

impl MasterCodec {
    /// Create a codec with no request outstanding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Slave id of the last successfully encoded request.
    #[inline]
    pub fn last_request_slave(&self) -> Option<SlaveId> {
        self.last_request_slave
    }

    /// Encode a Read Holding Registers request into `out`.
    ///
    /// Writes the 6-byte header (slave id, function code, big-endian start
    /// address and quantity) followed by the CRC16 over those bytes, low
    /// byte first. On success the slave id is recorded for matching the
    /// next response, and the total frame length (8) is returned.
    ///
    /// Nothing is written on failure:
    /// - [`ModbusError::BufferTooSmall`] if `out` cannot hold the full frame
    /// - [`ModbusError::InvalidRange`] if quantity, slave id, or the address
    ///   span is outside protocol bounds
    pub fn encode_read_request(
        &mut self,
        slave_id: SlaveId,
        start_address: u16,
        quantity: u16,
        out: &mut [u8],
    ) -> ModbusResult<usize> {
        if out.len() < REQUEST_FRAME_LEN {
            return Err(ModbusError::BufferTooSmall {
                needed: REQUEST_FRAME_LEN,
                available: out.len(),
            });
        }

        if !valid_quantity(quantity) {
            return Err(ModbusError::invalid_range(format!(
                "quantity {} not in 1..=125",
                quantity
            )));
        }
        if !valid_slave_id(slave_id) {
            return Err(ModbusError::invalid_range(format!(
                "slave id {} exceeds 247",
                slave_id
            )));
        }
        if !valid_address_range(start_address, quantity) {
            return Err(ModbusError::invalid_range(format!(
                "address range {:#06X}+{} overflows the register space",
                start_address, quantity
            )));
        }

        out[0] = slave_id;
        out[1] = FunctionCode::ReadHoldingRegisters.to_u8();
        put_u16_be(out, 2, start_address);
        put_u16_be(out, 4, quantity);
        append_crc(out, REQUEST_HEADER_LEN);

        self.last_request_slave = Some(slave_id);

        debug!(
            "Encoded FC03 request: slave={}, addr={:#06X}, qty={}",
            slave_id, start_address, quantity
        );

        Ok(REQUEST_FRAME_LEN)
    }

    /// Decode a Read Holding Registers response from `frame` into
    /// `registers`.
    ///
    /// Validates in order: a request is outstanding
    /// ([`ModbusError::InvalidArgument`]), the header is present
    /// ([`ModbusError::BufferTooSmall`]), the slave id matches the last
    /// request ([`ModbusError::SlaveMismatch`]), the function code is 0x03
    /// ([`ModbusError::FunctionMismatch`]), the byte count is in range
    /// ([`ModbusError::InvalidRange`]), the frame covers
    /// header + payload + CRC ([`ModbusError::BufferTooSmall`]), `registers`
    /// has room ([`ModbusError::OutputTooSmall`]), and the trailing CRC
    /// matches ([`ModbusError::Integrity`]).
    ///
    /// On success the big-endian register pairs are converted to host values
    /// in `registers[..count]` and the register count is returned.
    pub fn decode_read_response(
        &self,
        frame: &[u8],
        registers: &mut [u16],
    ) -> ModbusResult<usize> {
        let expected_slave = self.last_request_slave.ok_or_else(|| {
            ModbusError::invalid_argument("no request outstanding for this session")
        })?;

        if frame.len() < RESPONSE_HEADER_LEN {
            return Err(ModbusError::BufferTooSmall {
                needed: RESPONSE_HEADER_LEN,
                available: frame.len(),
            });
        }

        let slave_id = frame[0];
        if slave_id != expected_slave {
            return Err(ModbusError::SlaveMismatch {
                expected: expected_slave,
                actual: slave_id,
            });
        }

        if frame[1] != FunctionCode::ReadHoldingRegisters.to_u8() {
            return Err(ModbusError::FunctionMismatch {
                expected: FunctionCode::ReadHoldingRegisters.to_u8(),
                actual: frame[1],
            });
        }

        let byte_count = frame[2];
        if !valid_byte_count(byte_count) {
            return Err(ModbusError::invalid_range(format!(
                "byte count {} not an even value in 2..=250",
                byte_count
            )));
        }

        let payload_len = RESPONSE_HEADER_LEN + byte_count as usize;
        let frame_len = payload_len + CRC_LEN;
        if frame.len() < frame_len {
            return Err(ModbusError::BufferTooSmall {
                needed: frame_len,
                available: frame.len(),
            });
        }

        let register_count = byte_count as usize / 2;
        if registers.len() < register_count {
            return Err(ModbusError::OutputTooSmall {
                needed: register_count,
                available: registers.len(),
            });
        }

        verify_crc(frame, payload_len)?;

        for (i, register) in registers[..register_count].iter_mut().enumerate() {
            *register = get_u16_be(frame, RESPONSE_HEADER_LEN + i * 2);
        }

        debug!(
            "Decoded FC03 response: slave={}, registers={}",
            slave_id, register_count
        );

        Ok(register_count)
    }
}
