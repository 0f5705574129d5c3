//! Command Table Tests

use std::collections::HashSet;

use pigwire::protocol::{Command, HeaderField, Packet, ResponseShape};

#[test]
fn test_core_opcodes() {
    assert_eq!(Command::SetMode.opcode(), 0);
    assert_eq!(Command::GetMode.opcode(), 1);
    assert_eq!(Command::SetPullUpDown.opcode(), 2);
    assert_eq!(Command::Read.opcode(), 3);
    assert_eq!(Command::Write.opcode(), 4);
    assert_eq!(Command::SetPwmDutyCycle.opcode(), 5);
    assert_eq!(Command::SetPwmRange.opcode(), 6);
    assert_eq!(Command::HardwareRevision.opcode(), 17);
    assert_eq!(Command::Version.opcode(), 26);
    assert_eq!(Command::I2cOpen.opcode(), 54);
    assert_eq!(Command::I2cReadByteData.opcode(), 61);
    assert_eq!(Command::I2cWriteByteData.opcode(), 62);
    assert_eq!(Command::I2cProcessCall.opcode(), 69);
    assert_eq!(Command::GetPwmDutyCycle.opcode(), 83);
}

#[test]
fn test_opcodes_are_unique() {
    let opcodes: HashSet<u32> = Command::ALL.iter().map(|c| c.opcode()).collect();
    assert_eq!(opcodes.len(), Command::ALL.len());
}

#[test]
fn test_from_opcode_inverts_opcode() {
    for &command in Command::ALL {
        assert_eq!(Command::from_opcode(command.opcode()), Some(command));
    }
    assert_eq!(Command::from_opcode(8), None);
    assert_eq!(Command::from_opcode(9999), None);
}

#[test]
fn test_mnemonics() {
    assert_eq!(Command::SetMode.mnemonic(), "MODES");
    assert_eq!(Command::Read.mnemonic(), "READ");
    assert_eq!(Command::I2cReadI2cBlockData.mnemonic(), "I2CRI");
    assert_eq!(Command::SerialDataAvailable.to_string(), "SERDA");
}

#[test]
fn test_extended_response_shapes() {
    let extended: Vec<Command> = Command::ALL
        .iter()
        .copied()
        .filter(|c| c.response_shape() == ResponseShape::Extended)
        .collect();

    assert_eq!(
        extended,
        vec![
            Command::I2cReadDevice,
            Command::I2cReadBlockData,
            Command::I2cReadI2cBlockData,
            Command::SpiRead,
            Command::SpiXfer,
            Command::SerialRead,
        ]
    );
}

#[test]
fn test_value_field_is_result_slot() {
    for &command in Command::ALL {
        assert_eq!(command.value_field(), HeaderField::Result);
    }

    let response = Packet::response(Command::Read.opcode(), 4, 0, 1);
    assert_eq!(response.field(Command::Read.value_field()), 1);
    assert_eq!(response.field(HeaderField::Param1), 4);
}

#[test]
fn test_unsigned_results() {
    let unsigned: Vec<Command> = Command::ALL
        .iter()
        .copied()
        .filter(|command| command.unsigned_result())
        .collect();

    assert_eq!(
        unsigned,
        vec![
            Command::ReadBank1,
            Command::ReadBank2,
            Command::Tick,
            Command::HardwareRevision,
        ]
    );
}

#[test]
fn test_request_records_command() {
    let packet = Packet::request(Command::Tick, 0, 0);
    assert_eq!(packet.command(), Some(Command::Tick));
    assert_eq!(packet.p3, 0);
    assert!(packet.extension.is_empty());
}
