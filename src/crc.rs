//! CRC16 engine for Modbus RTU frame integrity
//!
//! Modbus RTU uses the reflected CRC16 with polynomial 0xA001 and initial
//! value 0xFFFF. On the wire the checksum trails the frame low byte first,
//! independent of host byte order; frame-level placement is handled in
//! [`crate::frame`].

use crc::{Crc, CRC_16_MODBUS};

/// Modbus CRC16 algorithm (poly 0xA001 reflected, init 0xFFFF, no xorout).
const CRC16_MODBUS: Crc<u16> = Crc::<u16>::new(&CRC_16_MODBUS);

/// Compute the Modbus CRC16 over a byte slice.
///
/// Deterministic and pure. An empty slice yields the initial value 0xFFFF,
/// which is the correct CRC of empty input under this algorithm rather than
/// an error sentinel.
///
/// # Example
///
/// ```rust
/// use modbus_rtu_codec::crc16;
///
/// assert_eq!(crc16(&[0x01, 0x03, 0x02, 0x58, 0x00, 0x02]), 0x6044);
/// assert_eq!(crc16(&[]), 0xFFFF);
/// ```
#[inline]
pub fn crc16(data: &[u8]) -> u16 {
    CRC16_MODBUS.checksum(data)
}
