//! Slave-side codec for Read Holding Registers
//!
//! A [`SlaveCodec`] owns the responder's device identity, decodes incoming
//! request frames against it, and encodes response frames carrying register
//! values supplied by the application's register store.
//!
//! Like the master side, this is a plain caller-owned value with no hidden
//! state: one codec per configured device identity. Requests addressed to
//! the broadcast id 0 are accepted regardless of the configured identity,
//! but the identity itself can never be 0.
//!
//! # Example
//!
//! ```rust
//! use modbus_rtu_codec::SlaveCodec;
//!
//! let slave = SlaveCodec::new(1).unwrap();
//! let request = [0x01, 0x03, 0x02, 0x58, 0x00, 0x02, 0x44, 0x60];
//! let decoded = slave.decode_read_request(&request).unwrap();
//! assert_eq!((decoded.start_address, decoded.quantity), (0x0258, 2));
//! ```

use tracing::debug;

use crate::constants::{BROADCAST_SLAVE_ID, CRC_LEN, REQUEST_FRAME_LEN, REQUEST_HEADER_LEN, RESPONSE_HEADER_LEN};
use crate::error::{ModbusError, ModbusResult};
use crate::frame::{append_crc, get_u16_be, put_u16_be, verify_crc, FunctionCode, ReadRequest, SlaveId};
use crate::validate::{valid_address_range, valid_quantity, valid_slave_id};

/// Responder-side codec session holding the device identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlaveCodec {
    /// This device's own slave id (1..=247)
    slave_id: SlaveId,
}

impl SlaveCodec {
    /// Create a codec with the given device identity.
    ///
    /// Returns [`ModbusError::InvalidArgument`] for ids above 247 or for the
    /// broadcast id 0, which is never a valid self-identity.
    pub fn new(slave_id: SlaveId) -> ModbusResult<Self> {
        let mut codec = Self { slave_id: 1 };
        codec.set_slave_id(slave_id)?;
        Ok(codec)
    }

    /// Reconfigure the device identity, with the same rules as [`Self::new`].
    pub fn set_slave_id(&mut self, slave_id: SlaveId) -> ModbusResult<()> {
        if !valid_slave_id(slave_id) || slave_id == BROADCAST_SLAVE_ID {
            return Err(ModbusError::invalid_argument(format!(
                "device identity {} not in 1..=247",
                slave_id
            )));
        }
        self.slave_id = slave_id;
        Ok(())
    }

    /// The configured device identity.
    #[inline]
    pub fn slave_id(&self) -> SlaveId {
        self.slave_id
    }

    /// Decode a Read Holding Registers request addressed to this device.
    ///
    /// Validates in order: the frame holds a full request
    /// ([`ModbusError::BufferTooSmall`]), all decoded fields pass the range
    /// checks ([`ModbusError::InvalidRange`]), the request is addressed to
    /// this device or to broadcast ([`ModbusError::IdentityMismatch`]), the
    /// function code is 0x03 ([`ModbusError::FunctionMismatch`]), and the
    /// trailing CRC matches ([`ModbusError::Integrity`]).
    pub fn decode_read_request(&self, frame: &[u8]) -> ModbusResult<ReadRequest> {
        if frame.len() < REQUEST_FRAME_LEN {
            return Err(ModbusError::BufferTooSmall {
                needed: REQUEST_FRAME_LEN,
                available: frame.len(),
            });
        }

        let slave_id = frame[0];
        let function_code = frame[1];
        let start_address = get_u16_be(frame, 2);
        let quantity = get_u16_be(frame, 4);

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

        if slave_id != self.slave_id && slave_id != BROADCAST_SLAVE_ID {
            return Err(ModbusError::IdentityMismatch {
                expected: self.slave_id,
                actual: slave_id,
            });
        }

        if function_code != FunctionCode::ReadHoldingRegisters.to_u8() {
            return Err(ModbusError::FunctionMismatch {
                expected: FunctionCode::ReadHoldingRegisters.to_u8(),
                actual: function_code,
            });
        }

        verify_crc(frame, REQUEST_HEADER_LEN)?;

        debug!(
            "Decoded FC03 request: slave={}, addr={:#06X}, qty={}",
            slave_id, start_address, quantity
        );

        Ok(ReadRequest {
            slave_id,
            start_address,
            quantity,
        })
    }

    /// Encode a Read Holding Registers response into `out`.
    ///
    /// The register count is taken from `registers.len()` and becomes the
    /// frame's byte count (2 bytes per register). Writes the 3-byte header,
    /// the registers in big-endian order, and the CRC16 low byte first.
    /// Returns the total frame length (5 + 2 × count).
    ///
    /// Nothing is written on failure:
    /// - [`ModbusError::InvalidRange`] if the register count is not 1..=125
    ///   or the slave id exceeds 247
    /// - [`ModbusError::BufferTooSmall`] if `out` cannot hold the frame
    pub fn encode_read_response(
        &self,
        slave_id: SlaveId,
        registers: &[u16],
        out: &mut [u8],
    ) -> ModbusResult<usize> {
        let quantity = registers.len();
        // length check stays in usize so oversized slices cannot wrap the cast
        if quantity == 0 || quantity > usize::from(crate::constants::MAX_READ_REGISTERS) {
            return Err(ModbusError::invalid_range(format!(
                "register count {} not in 1..=125",
                quantity
            )));
        }
        if !valid_slave_id(slave_id) {
            return Err(ModbusError::invalid_range(format!(
                "slave id {} exceeds 247",
                slave_id
            )));
        }

        let payload_len = RESPONSE_HEADER_LEN + quantity * 2;
        let frame_len = payload_len + CRC_LEN;
        if out.len() < frame_len {
            return Err(ModbusError::BufferTooSmall {
                needed: frame_len,
                available: out.len(),
            });
        }

        out[0] = slave_id;
        out[1] = FunctionCode::ReadHoldingRegisters.to_u8();
        out[2] = (quantity * 2) as u8;
        for (i, &register) in registers.iter().enumerate() {
            put_u16_be(out, RESPONSE_HEADER_LEN + i * 2, register);
        }
        append_crc(out, payload_len);

        debug!(
            "Encoded FC03 response: slave={}, registers={}, frame_len={}",
            slave_id, quantity, frame_len
        );

        Ok(frame_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn valid_request(slave_id: u8, addr: u16, qty: u16) -> [u8; 8] {
        let mut frame = [0u8; 8];
        frame[0] = slave_id;
        frame[1] = 0x03;
        frame[2] = (addr >> 8) as u8;
        frame[3] = (addr & 0xFF) as u8;
        frame[4] = (qty >> 8) as u8;
        frame[5] = (qty & 0xFF) as u8;
        let crc = crate::crc::crc16(&frame[..6]);
        frame[6] = (crc & 0xFF) as u8;
        frame[7] = (crc >> 8) as u8;
        frame
    }

    #[test]
    fn test_identity_configuration() {
        assert!(SlaveCodec::new(1).is_ok());
        assert!(SlaveCodec::new(247).is_ok());
        assert!(matches!(
            SlaveCodec::new(0),
            Err(ModbusError::InvalidArgument { .. })
        ));
        assert!(matches!(
            SlaveCodec::new(248),
            Err(ModbusError::InvalidArgument { .. })
        ));

        let mut codec = SlaveCodec::new(5).unwrap();
        assert_eq!(codec.slave_id(), 5);
        assert!(codec.set_slave_id(0).is_err());
        assert_eq!(codec.slave_id(), 5); // unchanged after rejection
        codec.set_slave_id(9).unwrap();
        assert_eq!(codec.slave_id(), 9);
    }

    #[test]
    fn test_decode_valid_request() {
        let slave = SlaveCodec::new(1).unwrap();
        let decoded = slave
            .decode_read_request(&valid_request(1, 0x0258, 2))
            .unwrap();
        assert_eq!(
            decoded,
            ReadRequest {
                slave_id: 1,
                start_address: 0x0258,
                quantity: 2
            }
        );
    }

    #[test]
    fn test_decode_accepts_broadcast_regardless_of_identity() {
        let slave = SlaveCodec::new(42).unwrap();
        let decoded = slave
            .decode_read_request(&valid_request(0, 0x0010, 4))
            .unwrap();
        assert_eq!(decoded.slave_id, 0);
        assert_eq!(decoded.quantity, 4);
    }

    #[test]
    fn test_decode_rejects_other_identity() {
        let slave = SlaveCodec::new(1).unwrap();
        assert_eq!(
            slave.decode_read_request(&valid_request(2, 0x0258, 2)),
            Err(ModbusError::IdentityMismatch {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_decode_short_frame() {
        let slave = SlaveCodec::new(1).unwrap();
        let frame = valid_request(1, 0x0258, 2);
        assert_eq!(
            slave.decode_read_request(&frame[..7]),
            Err(ModbusError::BufferTooSmall {
                needed: 8,
                available: 7
            })
        );
    }

    #[test]
    fn test_decode_out_of_range_fields() {
        let slave = SlaveCodec::new(1).unwrap();

        // quantity 0 and 126
        for qty in [0u16, 126] {
            assert!(matches!(
                slave.decode_read_request(&valid_request(1, 0, qty)),
                Err(ModbusError::InvalidRange { .. })
            ));
        }
        // slave id out of protocol range
        assert!(matches!(
            slave.decode_read_request(&valid_request(248, 0, 1)),
            Err(ModbusError::InvalidRange { .. })
        ));
        // address span past 0xFFFF
        assert!(matches!(
            slave.decode_read_request(&valid_request(1, 0xFFFF, 2)),
            Err(ModbusError::InvalidRange { .. })
        ));
        // span ending exactly at 0xFFFF is fine
        assert!(slave
            .decode_read_request(&valid_request(1, 0xFF84, 124))
            .is_ok());
    }

    #[test]
    fn test_decode_wrong_function_code() {
        let slave = SlaveCodec::new(1).unwrap();
        let mut frame = valid_request(1, 0x0258, 2);
        frame[1] = 0x04;
        // keep the CRC consistent so the function check is what trips
        let crc = crate::crc::crc16(&frame[..6]);
        frame[6] = (crc & 0xFF) as u8;
        frame[7] = (crc >> 8) as u8;
        assert_eq!(
            slave.decode_read_request(&frame),
            Err(ModbusError::FunctionMismatch {
                expected: 0x03,
                actual: 0x04
            })
        );
    }

    #[test]
    fn test_decode_bad_crc() {
        let slave = SlaveCodec::new(1).unwrap();
        let mut frame = valid_request(1, 0x0258, 2);
        frame[3] ^= 0xFF;
        assert!(matches!(
            slave.decode_read_request(&frame),
            Err(ModbusError::Integrity { .. })
        ));
    }

    #[test]
    fn test_decode_single_bit_flips_all_fail() {
        let slave = SlaveCodec::new(1).unwrap();
        let good = valid_request(1, 0x0258, 2);
        for byte in 0..good.len() {
            for bit in 0..8 {
                let mut frame = good;
                frame[byte] ^= 1 << bit;
                assert!(
                    slave.decode_read_request(&frame).is_err(),
                    "flip of byte {} bit {} went undetected",
                    byte,
                    bit
                );
            }
        }
    }

    #[test]
    fn test_encode_response_wire_format() {
        let slave = SlaveCodec::new(1).unwrap();
        let mut buf = [0u8; 16];
        let len = slave
            .encode_read_response(1, &[1000, 5000], &mut buf)
            .unwrap();
        assert_eq!(len, 9);
        assert_eq!(
            &buf[..len],
            &[0x01, 0x03, 0x04, 0x03, 0xE8, 0x13, 0x88, 0x77, 0x15]
        );
    }

    #[test]
    fn test_encode_response_rejects_bad_inputs() {
        let slave = SlaveCodec::new(1).unwrap();
        let mut buf = [0u8; 512];

        assert!(matches!(
            slave.encode_read_response(1, &[], &mut buf),
            Err(ModbusError::InvalidRange { .. })
        ));
        assert!(matches!(
            slave.encode_read_response(1, &[0u16; 126], &mut buf),
            Err(ModbusError::InvalidRange { .. })
        ));
        assert!(matches!(
            slave.encode_read_response(248, &[1], &mut buf),
            Err(ModbusError::InvalidRange { .. })
        ));

        let mut small = [0u8; 8];
        assert_eq!(
            slave.encode_read_response(1, &[1, 2], &mut small),
            Err(ModbusError::BufferTooSmall {
                needed: 9,
                available: 8
            })
        );
    }

    #[test]
    fn test_encode_max_quantity_response() {
        let slave = SlaveCodec::new(247).unwrap();
        let registers = [0xABCD_u16; 125];
        let mut buf = [0u8; 256];
        let len = slave
            .encode_read_response(247, &registers, &mut buf)
            .unwrap();
        assert_eq!(len, 255);
        assert_eq!(buf[2], 250);
    }

    proptest! {
        #[test]
        fn prop_request_roundtrip(
            slave_id in 1u8..=247,
            start in any::<u16>(),
            quantity in 1u16..=125,
        ) {
            prop_assume!(u32::from(start) + u32::from(quantity) - 1 <= 0xFFFF);

            let mut master = crate::master::MasterCodec::new();
            let mut frame = [0u8; 8];
            master
                .encode_read_request(slave_id, start, quantity, &mut frame)
                .unwrap();

            let slave = SlaveCodec::new(slave_id).unwrap();
            let decoded = slave.decode_read_request(&frame).unwrap();
            prop_assert_eq!(decoded.slave_id, slave_id);
            prop_assert_eq!(decoded.start_address, start);
            prop_assert_eq!(decoded.quantity, quantity);
        }
    }
}
