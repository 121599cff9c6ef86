//! Modbus RTU Codec Demo
//!
//! Walks one complete FC03 exchange through both codec sides:
//! - Master encodes a Read Holding Registers request
//! - Slave decodes the request and encodes a response
//! - Master decodes the response back to register values
//!
//! Usage: cargo run --bin demo

use modbus_rtu_codec::{MasterCodec, ModbusError, SlaveCodec, VERSION};

fn hex_dump(frame: &[u8]) -> String {
    frame
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> Result<(), ModbusError> {
    println!("🚀 Modbus RTU Codec v{} Demo", VERSION);
    println!("================================\n");

    let slave_id = 1;
    let start_address = 0x0258;
    let quantity = 2;

    // =========================================================================
    // Part 1: Master encodes a read request
    // =========================================================================
    println!("📤 Part 1: Encode Read Request");
    println!("-------------------------------");

    let mut master = MasterCodec::new();
    let mut request = [0u8; 8];
    let len = master.encode_read_request(slave_id, start_address, quantity, &mut request)?;
    println!(
        "  slave={}, addr={:#06X}, qty={} -> {} bytes",
        slave_id, start_address, quantity, len
    );
    println!("  frame: {}", hex_dump(&request[..len]));

    // =========================================================================
    // Part 2: Slave decodes the request
    // =========================================================================
    println!("\n📥 Part 2: Decode Read Request");
    println!("-------------------------------");

    let slave = SlaveCodec::new(slave_id)?;
    let decoded = slave.decode_read_request(&request[..len])?;
    println!(
        "  decoded: slave={}, addr={:#06X}, qty={}",
        decoded.slave_id, decoded.start_address, decoded.quantity
    );

    // =========================================================================
    // Part 3: Slave encodes a response from its register store
    // =========================================================================
    println!("\n📤 Part 3: Encode Read Response");
    println!("--------------------------------");

    let registers = [1000u16, 5000];
    let mut response = [0u8; 16];
    let len = slave.encode_read_response(decoded.slave_id, &registers, &mut response)?;
    println!("  registers: {:?} -> {} bytes", registers, len);
    println!("  frame: {}", hex_dump(&response[..len]));

    // =========================================================================
    // Part 4: Master decodes the response
    // =========================================================================
    println!("\n📥 Part 4: Decode Read Response");
    println!("--------------------------------");

    let mut values = [0u16; 2];
    let count = master.decode_read_response(&response[..len], &mut values)?;
    for (i, value) in values[..count].iter().enumerate() {
        println!("  reg[{}] = {} ({:#06X})", i, value, value);
    }

    // =========================================================================
    // Part 5: Corruption is detected
    // =========================================================================
    println!("\n🛡️  Part 5: Integrity Check");
    println!("----------------------------");

    let mut corrupted = response;
    corrupted[4] ^= 0x01;
    match master.decode_read_response(&corrupted[..len], &mut values) {
        Err(e) => println!("  corrupted frame rejected: {}", e),
        Ok(_) => println!("  unexpected: corrupted frame accepted"),
    }

    println!("\n🎉 Demo completed!");
    Ok(())
}
