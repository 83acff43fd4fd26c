use crate::constants::{
    CHECKSUM_OFFSET, END_OFFSET, FRAME_SIZE, LENGTH_OFFSET, PAYLOAD_OFFSET, RESERVED_OFFSET, START_OFFSET,
};
use crate::corrupt::Corruption;
use crate::display::{format_byte, format_length, hex_dump, status_line};
use crate::error::FrameValidationError;
use crate::packet::{Frame, FrameRaw};

#[test]
fn test_encode_hello_arduino() {
    let frame = Frame::encode("Hello Arduino!");

    assert_eq!(frame.start_byte, 0x02);
    assert_eq!(frame.length, 14);
    assert_eq!(frame.end_byte, 0x03);
    assert_eq!(frame.checksum, 0x1A);
    assert_eq!(frame.data(), b"Hello Arduino!");

    let validation = frame.validate();
    assert!(validation.valid);
    assert_eq!(validation.reason, "valid packet");
    assert_eq!(validation.error, None);
}

#[test]
fn test_corrupt_start_byte_scenario() {
    let mut frame = Frame::encode("Hello Arduino!");
    frame.corrupt(Corruption::StartByte);

    assert_eq!(frame.start_byte, 0xFF);
    let validation = frame.validate();
    assert!(!validation.valid);
    assert_eq!(validation.reason, "invalid start byte");
}

#[test]
fn test_checksum_mismatch_reason_format() {
    let mut frame = Frame::encode("Hello Arduino!");
    frame.checksum = 0x05;

    let validation = frame.validate();
    assert!(!validation.valid);
    assert_eq!(validation.reason, "checksum mismatch (expected: 1A, got: 05)");
    assert_eq!(
        validation.error,
        Some(FrameValidationError::ChecksumMismatch {
            expected: 0x1A,
            actual: 0x05
        })
    );
}

#[test]
fn test_checks_run_in_order() {
    // Everything is wrong, only the first failing check is reported
    let mut frame = Frame::encode("abc");
    frame.start_byte = 0x00;
    frame.end_byte = 0x00;
    frame.length = 40;
    assert_eq!(frame.check(), Err(FrameValidationError::InvalidStartByte));

    frame.start_byte = 0x02;
    assert_eq!(frame.check(), Err(FrameValidationError::InvalidEndByte));

    frame.end_byte = 0x03;
    assert_eq!(frame.check(), Err(FrameValidationError::LengthExceeded));
    assert_eq!(frame.validate().reason, "payload length exceeds maximum");
}

#[test]
fn test_oversized_length_checksum_does_not_panic() {
    let mut frame = Frame::encode("abc");
    frame.length = 0xFF;
    // Sum is clamped to the 32 payload bytes
    let _ = frame.calculate_checksum();
    assert_eq!(frame.data().len(), 32);
}

#[test]
fn test_wire_layout_offsets() {
    let frame = Frame::encode("Hi");
    let wire = frame.to_wire_bytes();

    assert_eq!(wire.len(), FRAME_SIZE);
    assert_eq!(wire[START_OFFSET], 0x02);
    assert_eq!(wire[LENGTH_OFFSET], 2);
    assert_eq!(&wire[PAYLOAD_OFFSET..PAYLOAD_OFFSET + 2], b"Hi");
    assert!(wire[PAYLOAD_OFFSET + 2..CHECKSUM_OFFSET].iter().all(|&b| b == 0));
    assert_eq!(wire[CHECKSUM_OFFSET], frame.checksum);
    assert_eq!(wire[END_OFFSET], 0x03);
    assert_eq!(wire[RESERVED_OFFSET], 0x00);
    assert_eq!(size_of::<FrameRaw>(), FRAME_SIZE);
}

#[test]
fn test_display_helpers() {
    assert_eq!(format_byte(0x02), "0x02");
    assert_eq!(format_byte(0xab), "0xAB");
    assert_eq!(format_length(14), "14 bytes");

    let dump = hex_dump(b"Hello Arduino!");
    assert_eq!(dump, "48 65 6C 6C 6F 20 41 72\n64 75 69 6E 6F 21");
    assert_eq!(hex_dump(&[]), "");

    let frame = Frame::encode("Hello Arduino!");
    assert_eq!(status_line(&frame.validate()), "VALID - valid packet");
    let mut bad = frame;
    bad.corrupt(Corruption::EndByte);
    assert_eq!(status_line(&bad.validate()), "INVALID - invalid end byte");
}

#[test]
fn test_frame_report() {
    let frame = Frame::encode("Hello Arduino!");
    let report = frame.to_string();
    println!("{}", report);

    assert!(report.contains("Start Byte: 0x02"));
    assert!(report.contains("Length:     14 bytes"));
    assert!(report.contains("  48 65 6C 6C 6F 20 41 72"));
    assert!(report.contains("Checksum:   0x1A"));
    assert!(report.contains("Total Size: 37 bytes"));

    assert!(Frame::encode("").to_string().contains("<empty>"));
}
