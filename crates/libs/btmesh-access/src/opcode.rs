//! Variable-length opcode framing.
//!
//! The two most significant bits of the first octet select the length:
//!
//! ```text
//! 0xxxxxxx                      1 octet  (0x7F reserved)
//! 10xxxxxx xxxxxxxx             2 octets (SIG)
//! 11xxxxxx cccccccc cccccccc    3 octets (vendor, company ID little-endian)
//! ```
//!
//! Opcode values are the octets read big-endian, so a vendor opcode keeps its
//! company ID byte-swapped in the low 16 bits.

use crate::buffer::{InputBuffer, OutputBuffer};
use crate::error::{CodecError, ErrorKind};

const RESERVED: u8 = 0x7f;

/// Vendor opcode from its 6-bit operation and company identifier.
pub const fn vendor_opcode(operation: u8, company_id: u16) -> u32 {
    let [low, high] = company_id.to_le_bytes();
    ((0xc0 | (operation as u32 & 0x3f)) << 16) | ((low as u32) << 8) | high as u32
}

/// Company identifier of a vendor opcode.
pub fn company_id(opcode: u32) -> Option<u16> {
    (opcode_len(opcode) == Some(3)).then(|| u16::from_le_bytes([(opcode >> 8) as u8, opcode as u8]))
}

/// Encoded length of `opcode`, or `None` when it belongs to no length class.
pub fn opcode_len(opcode: u32) -> Option<usize> {
    match opcode {
        0x00..=0x7e => Some(1),
        0x8000..=0xbfff => Some(2),
        0xc0_0000..=0xff_ffff => Some(3),
        _ => None,
    }
}

pub fn decode_opcode(input: &mut InputBuffer<'_>) -> Result<u32, CodecError> {
    let offset = input.offset();
    let first = input.read_byte()?;

    match first >> 6 {
        0b00 | 0b01 if first == RESERVED => Err(ErrorKind::MalformedFraming { offset, octet: first }.into()),
        0b00 | 0b01 => Ok(u32::from(first)),
        0b10 => {
            let [second] = input.read_array::<1>()?;
            Ok(u32::from_be_bytes([0, 0, first, second]))
        }
        _ => {
            let [second, third] = input.read_array::<2>()?;
            Ok(u32::from_be_bytes([0, first, second, third]))
        }
    }
}

pub fn encode_opcode(opcode: u32, output: &mut OutputBuffer) -> Result<(), CodecError> {
    let len = opcode_len(opcode)
        .ok_or_else(|| ErrorKind::out_of_range(format!("0x{opcode:x}"), "no opcode length class"))?;
    output.write(&opcode.to_be_bytes()[4 - len..]);

    Ok(())
}
