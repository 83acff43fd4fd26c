// Frame layout constants

/// Start-of-text sentinel (STX)
pub const START_BYTE: u8 = 0x02;

/// End-of-text sentinel (ETX)
pub const END_BYTE: u8 = 0x03;

/// Fixed payload capacity (32 bytes)
pub const MAX_PAYLOAD: usize = 32;

/// Single-byte fields outside the payload: start, length, checksum, end
pub const FRAME_OVERHEAD: usize = 4;

/// Size of one trailing reserved byte after the end byte, always written as zero
pub const RESERVED_SIZE: usize = 1;

/// Total on-wire size of a frame (37 bytes)
pub const FRAME_SIZE: usize = MAX_PAYLOAD + FRAME_OVERHEAD + RESERVED_SIZE;

/// Offset of the start byte
pub const START_OFFSET: usize = 0;

/// Offset of the length byte
pub const LENGTH_OFFSET: usize = 1;

/// Offset of the first payload byte
pub const PAYLOAD_OFFSET: usize = 2;

/// Offset of the checksum byte
pub const CHECKSUM_OFFSET: usize = PAYLOAD_OFFSET + MAX_PAYLOAD;

/// Offset of the end byte
pub const END_OFFSET: usize = CHECKSUM_OFFSET + 1;

/// Offset of the reserved trailing byte
pub const RESERVED_OFFSET: usize = END_OFFSET + 1;

/// Value written over a sentinel byte when simulating corruption
pub const CORRUPT_SENTINEL: u8 = 0xFF;

/// Payload bytes per line in a hex dump
pub const HEX_DUMP_WIDTH: usize = 8;
