//! Field range validation for Modbus RTU frames
//!
//! Independent pure predicates guarding every protocol-bounded field. The
//! codecs call these before touching any buffer; callers can also use them
//! to pre-validate application inputs.

use crate::constants::{MAX_READ_REGISTERS, MAX_RESPONSE_BYTE_COUNT, MAX_SLAVE_ID};

/// Check a register quantity for an FC03 read: 1..=125.
#[inline]
pub fn valid_quantity(quantity: u16) -> bool {
    (1..=MAX_READ_REGISTERS).contains(&quantity)
}

/// Check a response byte count: 2..=250 and even (two bytes per register).
#[inline]
pub fn valid_byte_count(byte_count: u8) -> bool {
    (2..=MAX_RESPONSE_BYTE_COUNT).contains(&byte_count) && byte_count % 2 == 0
}

/// Check a slave id: 0..=247.
///
/// The broadcast id 0 passes here; whether broadcast is acceptable is decided
/// by the caller (it is valid on a request, invalid as a device identity).
#[inline]
pub fn valid_slave_id(slave_id: u8) -> bool {
    slave_id <= MAX_SLAVE_ID
}

/// Check that a read of `quantity` registers starting at `start_address`
/// stays within the 16-bit register address space.
#[inline]
pub fn valid_address_range(start_address: u16, quantity: u16) -> bool {
    quantity != 0 && u32::from(start_address) + u32::from(quantity) - 1 <= 0xFFFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_bounds() {
        assert!(!valid_quantity(0));
        assert!(valid_quantity(1));
        assert!(valid_quantity(125));
        assert!(!valid_quantity(126));
        assert!(!valid_quantity(u16::MAX));
    }

    #[test]
    fn test_byte_count_bounds() {
        assert!(!valid_byte_count(0));
        assert!(!valid_byte_count(1));
        assert!(valid_byte_count(2));
        assert!(valid_byte_count(250));
        assert!(!valid_byte_count(251));
        assert!(!valid_byte_count(252));
    }

    #[test]
    fn test_byte_count_must_be_even() {
        assert!(!valid_byte_count(3));
        assert!(!valid_byte_count(249));
        assert!(valid_byte_count(248));
    }

    #[test]
    fn test_slave_id_bounds() {
        assert!(valid_slave_id(0)); // broadcast passes the range check
        assert!(valid_slave_id(1));
        assert!(valid_slave_id(247));
        assert!(!valid_slave_id(248));
        assert!(!valid_slave_id(255));
    }

    #[test]
    fn test_address_range() {
        assert!(valid_address_range(0, 1));
        assert!(valid_address_range(0xFFFF, 1));
        assert!(valid_address_range(0xFF80, 128)); // ends exactly at 0xFFFF
        assert!(!valid_address_range(0xFF80, 129)); // one past the end
        assert!(!valid_address_range(0xFFFF, 2));
        assert!(!valid_address_range(0, 0));
    }
}
