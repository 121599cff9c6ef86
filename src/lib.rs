//! # Modbus RTU Codec - Read Holding Registers
//!
//! A wire-level codec for the Modbus RTU "Read Holding Registers" function
//! (FC03): encoding requests and responses into byte frames, decoding
//! received frames, and validating every field against protocol-defined
//! ranges and the CRC16 integrity checksum. Designed for embedded and
//! industrial-control endpoints acting as requester ("master") or responder
//! ("slave") over a byte-oriented transport.
//!
//! ## Features
//!
//! - **Zero allocation**: all frame bytes live in caller-supplied buffers;
//!   the codec only reads and writes within caller-specified bounds
//! - **Explicit sessions**: master and slave state are plain values owned by
//!   the caller, so multiple sessions never share hidden state
//! - **Portable serialization**: big-endian fields and the low-byte-first
//!   CRC are written byte by byte, identical on any host
//! - **Distinct errors**: every validation failure reports its own
//!   [`ModbusError`] variant
//!
//! ## Scope
//!
//! | Concern | Here? |
//! |---------|-------|
//! | FC03 request/response framing + CRC16 | ✅ |
//! | Field range validation | ✅ |
//! | Transport (serial/socket), retries, timeouts | ❌ external collaborator |
//! | Other function codes, transaction ids | ❌ |
//!
//! ## Quick Start
//!
//! ```rust
//! use modbus_rtu_codec::{MasterCodec, SlaveCodec};
//!
//! // Requester side: encode a read of 2 registers at 0x0258 from slave 1
//! let mut master = MasterCodec::new();
//! let mut request = [0u8; 8];
//! let len = master.encode_read_request(1, 0x0258, 2, &mut request).unwrap();
//!
//! // Responder side: decode the request, then answer with register values
//! let slave = SlaveCodec::new(1).unwrap();
//! let decoded = slave.decode_read_request(&request[..len]).unwrap();
//! assert_eq!(decoded.quantity, 2);
//!
//! let mut response = [0u8; 16];
//! let len = slave
//!     .encode_read_response(decoded.slave_id, &[1000, 5000], &mut response)
//!     .unwrap();
//!
//! // Back on the requester: recover the register values
//! let mut registers = [0u16; 2];
//! let count = master
//!     .decode_read_response(&response[..len], &mut registers)
//!     .unwrap();
//! assert_eq!(&registers[..count], &[1000, 5000]);
//! ```

// ============================================================================
// Core modules
// ============================================================================

/// Core error types and result handling
pub mod error;

/// Modbus protocol constants based on official specification
pub mod constants;

/// CRC16 engine for frame integrity
pub mod crc;

/// Field range validation predicates
pub mod validate;

/// Shared frame envelope: function codes, field access, CRC placement
pub mod frame;

/// Master (requester) codec
pub mod master;

/// Slave (responder) codec and device identity
pub mod slave;

// ============================================================================
// Re-exports for convenience
// ============================================================================

// === Error handling ===
pub use error::{ModbusError, ModbusResult};

// === Core types ===
pub use frame::{FunctionCode, ReadRequest, SlaveId};
pub use master::MasterCodec;
pub use slave::SlaveCodec;

// === CRC engine ===
pub use crc::crc16;

// === Field validation ===
pub use validate::{valid_address_range, valid_byte_count, valid_quantity, valid_slave_id};

// === Protocol limits (commonly needed constants) ===
pub use constants::{
    BROADCAST_SLAVE_ID, FC_READ_HOLDING_REGISTERS, MAX_READ_REGISTERS, MAX_RESPONSE_FRAME_LEN,
    MAX_SLAVE_ID, REQUEST_FRAME_LEN,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
