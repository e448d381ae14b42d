use super::BlockCode;
use crate::matrix::BinaryMatrix;

// Hamming(7,4) with the classic power-of-two parity positions: the
// codeword occupies the low 7 bits of a byte-sized word as
// p1 p2 d1 p3 d2 d3 d4, data in the low 4 bits of the source byte.
const GENERATOR: [u8; 8] = [
    0,          //
    0b00001101, // p1 = d1 + d2 + d4
    0b00001011, // p2 = d1 + d3 + d4
    0b00001000, //
    0b00000111, // p3 = d2 + d3 + d4
    0b00000100, //
    0b00000010, //
    0b00000001, //
];

// Each syndrome bit checks the positions whose index carries that bit,
// so the syndrome spells out the flipped position directly.
const PARITY_CHECK: [u8; 8] = [
    0, //
    0, //
    0, //
    0, //
    0, //
    0b01010101, //
    0b00110011, //
    0b00001111, //
];

const DECODER: [u8; 8] = [
    0,          //
    0,          //
    0,          //
    0,          //
    0b00010000, //
    0b00000100, //
    0b00000010, //
    0b00000001, //
];

/// The Hamming(7,4) code, correcting a single bit error per codeword.
#[must_use]
pub fn hamming_7_4() -> BlockCode {
    let generator = BinaryMatrix::from_bytes(8, 8, &GENERATOR).expect("shape is static");
    let parity_check = BinaryMatrix::from_bytes(8, 8, &PARITY_CHECK).expect("shape is static");
    let decoder = BinaryMatrix::from_bytes(8, 8, &DECODER).expect("shape is static");
    BlockCode::new(generator, parity_check, decoder, 7, 1)
        .expect("hamming matrices are well formed")
}
