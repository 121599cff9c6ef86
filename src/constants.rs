//! Modbus RTU protocol constants based on official specification
//!
//! These constants are derived from the official Modbus specification:
//! - Maximum ADU size over RS485: 256 bytes
//! - Register limits are calculated to fit within the ADU size constraint

// ============================================================================
// Function Codes
// ============================================================================

/// Read Holding Registers (FC03), the only function code this codec speaks
pub const FC_READ_HOLDING_REGISTERS: u8 = 0x03;

// ============================================================================
// Addressing
// ============================================================================

/// Maximum valid slave id (1..=247 for unicast; 248..=255 reserved)
pub const MAX_SLAVE_ID: u8 = 247;

/// Broadcast slave id, addressed to all responders
///
/// A slave must accept requests carrying this id but must never configure
/// itself with it.
pub const BROADCAST_SLAVE_ID: u8 = 0;

// ============================================================================
// Register Limits
// ============================================================================

/// Maximum number of registers per FC03 read
///
/// Calculation for the response frame:
/// - Slave ID: 1 byte
/// - Function Code: 1 byte
/// - Byte Count: 1 byte
/// - Register Data: N × 2 bytes
/// - CRC: 2 bytes
/// - Total: 5 + (N × 2) ≤ 256
/// - Spec defines: N ≤ 125 (byte count fits in a single byte: 250)
pub const MAX_READ_REGISTERS: u16 = 125;

/// Maximum response byte count (2 bytes per register × 125 registers)
pub const MAX_RESPONSE_BYTE_COUNT: u8 = 250;

// ============================================================================
// Frame Layout
// ============================================================================

/// Request header length: slave id (1) + function code (1) + address (2) +
/// quantity (2)
pub const REQUEST_HEADER_LEN: usize = 6;

/// Total request frame length: header + CRC
pub const REQUEST_FRAME_LEN: usize = REQUEST_HEADER_LEN + CRC_LEN;

/// Response header length: slave id (1) + function code (1) + byte count (1)
pub const RESPONSE_HEADER_LEN: usize = 3;

/// Trailing CRC length
pub const CRC_LEN: usize = 2;

/// Largest possible response frame: header + max payload + CRC
pub const MAX_RESPONSE_FRAME_LEN: usize =
    RESPONSE_HEADER_LEN + MAX_RESPONSE_BYTE_COUNT as usize + CRC_LEN;
