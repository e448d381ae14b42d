//! Convolutional coding: a streaming encoder with optional puncturing
//! and a fixed-depth streaming Viterbi decoder.
//!
//! A [`ConvolutionalCode`] describes the code (constraint length,
//! generator polynomials, puncturing matrix) and hands out encoder and
//! decoder sessions bound to caller-owned output buffers. The one-shot
//! [`ConvolutionalCode::encode`]/[`ConvolutionalCode::decode`] helpers
//! cover the common whole-buffer case.

mod decoder;
mod encoder;

pub use decoder::ViterbiDecoder;
pub use encoder::ConvolutionalEncoder;

use crate::sequence::Sequence;
use crate::{Error, Result};

/// Descriptor for a rate 1/n convolutional code.
///
/// Generator polynomials tap the shift register with bit i of the
/// polynomial on register position i; the newest input bit enters at
/// position K-1 and the register shifts right. Constants written in the
/// textbook oldest-tap-is-MSB convention convert via
/// [`crate::bits::reverse_bits_8`] (shifted right by one).
#[derive(Debug, Clone)]
pub struct ConvolutionalCode {
    constraint_len: u32,
    polynomials: Vec<u32>,
    puncturing: Sequence,
}

impl ConvolutionalCode {
    /// A code with constraint length `constraint_len` and one output bit
    /// per polynomial, unpunctured.
    pub fn new(constraint_len: u32, polynomials: &[u32]) -> Result<Self> {
        if !(2..=32).contains(&constraint_len) {
            return Err(Error::Config(format!(
                "constraint length must be 2..=32, got {constraint_len}"
            )));
        }
        if polynomials.len() < 2 {
            return Err(Error::Config(format!(
                "need at least two generator polynomials, got {}",
                polynomials.len()
            )));
        }
        for &p in polynomials {
            if constraint_len < 32 && p >> constraint_len != 0 {
                return Err(Error::Config(format!(
                    "polynomial {p:#x} wider than the {constraint_len}-bit register"
                )));
            }
        }
        Ok(ConvolutionalCode {
            constraint_len,
            polynomials: polynomials.to_vec(),
            puncturing: Sequence::all_ones(),
        })
    }

    /// Apply a puncturing matrix: output bits lined up with zero entries
    /// of the cyclic sequence are dropped.
    #[must_use]
    pub fn with_puncturing(mut self, puncturing: Sequence) -> Self {
        self.puncturing = puncturing;
        self
    }

    #[must_use]
    pub fn constraint_len(&self) -> u32 {
        self.constraint_len
    }

    #[must_use]
    pub fn polynomials(&self) -> &[u32] {
        &self.polynomials
    }

    #[must_use]
    pub fn puncturing(&self) -> &Sequence {
        &self.puncturing
    }

    /// Output bits per trellis step before puncturing.
    #[must_use]
    pub fn output_count(&self) -> u32 {
        self.polynomials.len() as u32
    }

    /// Bytes of encoder output produced for `input_len` input bytes,
    /// including the flush tail and puncturing.
    #[must_use]
    pub fn output_size(&self, input_len: usize) -> usize {
        let output_bits =
            (input_len * 8 + self.constraint_len as usize) * self.polynomials.len();
        let kept = output_bits * self.puncturing.non_zeroes();
        let punctured_bits = kept / self.puncturing.count()
            + usize::from(kept % self.puncturing.count() != 0);
        punctured_bits / 8 + usize::from(punctured_bits % 8 != 0)
    }

    /// Bytes of decoder output to reserve for `input_len` encoded bytes.
    ///
    /// The tail the encoder flushes decodes to (mostly zero) output too,
    /// so the reservation is slightly above `input_len / n`.
    #[must_use]
    pub fn decoded_size(&self, input_len: usize) -> usize {
        let n = self.polynomials.len();
        let tail_bits = self.constraint_len as usize * n;
        let tail_bytes = tail_bits / 8 + usize::from(tail_bits % 8 != 0);
        input_len.saturating_sub(tail_bytes) / n + tail_bytes
    }

    /// Start a streaming encode session writing into `output`.
    ///
    /// The buffer must hold [`Self::output_size`] bytes for the input
    /// that will be fed and, because punctured streams are OR-merged at
    /// byte granularity, must start zeroed.
    #[must_use]
    pub fn encoder<'a>(&self, output: &'a mut [u8]) -> ConvolutionalEncoder<'a> {
        ConvolutionalEncoder::new(self, output)
    }

    /// Start a streaming Viterbi decode session with the given traceback
    /// depth, writing into `output`. Depth must be at least 2; about
    /// five constraint lengths is a good choice. `output` must start
    /// zeroed (decoded bits are OR-merged).
    ///
    /// Punctured codes are refused: the decoder expects the full rate
    /// 1/n stream.
    pub fn viterbi<'a>(&self, depth: usize, output: &'a mut [u8]) -> Result<ViterbiDecoder<'a>> {
        if self.puncturing.zeroes() > 0 {
            return Err(Error::Config(
                "decoding punctured streams is not supported".into(),
            ));
        }
        ViterbiDecoder::new(self, depth, output)
    }

    /// Encode `input` in one go, returning the encoded bytes.
    #[must_use]
    pub fn encode(&self, input: &[u8]) -> Vec<u8> {
        let mut output = vec![0u8; self.output_size(input.len())];
        let mut enc = self.encoder(&mut output);
        enc.encode(input);
        enc.flush();
        output
    }

    /// Decode `input` in one go with the given traceback depth.
    ///
    /// Only valid for unpunctured codes (there is no puncturing-aware
    /// decoder). The returned buffer is [`Self::decoded_size`] bytes;
    /// the tail decodes to zero bits.
    pub fn decode(&self, input: &[u8], depth: usize) -> Result<Vec<u8>> {
        let mut output = vec![0u8; self.decoded_size(input.len())];
        let mut dec = self.viterbi(depth, &mut output)?;
        dec.decode(input);
        dec.flush();
        Ok(output)
    }
}
