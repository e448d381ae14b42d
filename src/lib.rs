#![doc = include_str!("../README.md")]

mod error;

pub mod bitpack;
pub mod bits;
pub mod block;
pub mod combination;
pub mod convolutional;
pub mod crc;
pub mod matrix;
pub mod sequence;

pub use bitpack::{BitPacker, BitUnpacker};
pub use block::{BlockCode, Integrity};
pub use combination::BitmaskCombination;
pub use convolutional::{ConvolutionalCode, ConvolutionalEncoder, ViterbiDecoder};
pub use crc::{Crc, CrcParams};
pub use error::{Error, Result};
pub use matrix::BinaryMatrix;
pub use sequence::Sequence;

/// Convenient single import for the common types.
pub mod prelude {
    pub use crate::block::{golay, hamming_7_4, BlockCode, Integrity};
    pub use crate::convolutional::ConvolutionalCode;
    pub use crate::crc::Crc;
    pub use crate::error::{Error, Result};
    pub use crate::matrix::BinaryMatrix;
    pub use crate::sequence::Sequence;
}
