use std::fmt;

use crate::bits::parity;
use crate::{Error, Result};

/// Bit-packed GF(2) matrix.
///
/// Rows and columns must both be multiples of 8. Storage is row-major,
/// one bit per matrix element, MSB-first within each row byte: bit
/// (r, c) lives in bit `7 - c % 8` of byte `r * cols/8 + c / 8`.
///
/// Supports matrix × vector and matrix × matrix products over GF(2)
/// (AND for multiply, XOR for add) and a fast in-place-tiled transpose.
/// Intended for block coders; the shapes involved are small and fixed
/// at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct BinaryMatrix {
    rows: usize,
    cols: usize,
    bytes: Vec<u8>,
}

fn check_dim(what: &str, n: usize) -> Result<()> {
    if n == 0 || n % 8 != 0 {
        return Err(Error::Config(format!(
            "{what} must be a positive multiple of 8, got {n}"
        )));
    }
    Ok(())
}

// Upper 32 bits of the 64-bit product of two 32-bit words. The scalar
// transpose below gathers diagonal bits through this multiply.
#[inline]
fn multiply_upper(i1: u32, i2: u32) -> u32 {
    ((u64::from(i1) * u64::from(i2)) >> 32) as u32
}

impl BinaryMatrix {
    /// An all-zero matrix of the given shape.
    pub fn zeroed(rows: usize, cols: usize) -> Result<Self> {
        check_dim("rows", rows)?;
        check_dim("cols", cols)?;
        Ok(BinaryMatrix {
            rows,
            cols,
            bytes: vec![0u8; rows * cols / 8],
        })
    }

    /// Build a matrix from exactly `rows * cols / 8` row-major bytes.
    pub fn from_bytes(rows: usize, cols: usize, bytes: &[u8]) -> Result<Self> {
        let mut m = Self::zeroed(rows, cols)?;
        if bytes.len() != m.bytes.len() {
            return Err(Error::Config(format!(
                "a {rows}x{cols} matrix needs {} bytes, got {}",
                m.bytes.len(),
                bytes.len()
            )));
        }
        m.bytes.copy_from_slice(bytes);
        Ok(m)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn byte_count(&self) -> usize {
        self.bytes.len()
    }

    /// The bytes of row `r`.
    #[must_use]
    pub fn row(&self, r: usize) -> &[u8] {
        let w = self.cols / 8;
        &self.bytes[r * w..(r + 1) * w]
    }

    pub fn set(&mut self, r: usize, c: usize, bit: u8) {
        assert!(bit <= 1, "a bit is 0 or 1");
        assert!(r < self.rows && c < self.cols);
        let addr = r * (self.cols / 8) + c / 8;
        let mask = 1u8 << (7 - c % 8);
        self.bytes[addr] &= !mask;
        if bit != 0 {
            self.bytes[addr] |= mask;
        }
    }

    #[must_use]
    pub fn get(&self, r: usize, c: usize) -> u8 {
        assert!(r < self.rows && c < self.cols);
        let addr = r * (self.cols / 8) + c / 8;
        (self.bytes[addr] >> (7 - c % 8)) & 1
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }

    /// Multiply by a column vector held in the low `cols` bits of `vec`,
    /// where vector bit `cols - 1 - k` corresponds to column k. The
    /// result is a column vector in the same convention, one bit per row.
    ///
    /// # Panics
    /// If the matrix is wider or taller than 64.
    #[must_use]
    pub fn mul_vec(&self, vec: u64) -> u64 {
        assert!(self.cols <= 64, "vector product limited to 64 columns");
        assert!(self.rows <= 64, "vector product limited to 64 rows");

        let mut result = 0u64;
        for r in 0..self.rows {
            let row = self.row(r);
            let mut p = 0u8;
            for (j, &b) in row.iter().enumerate() {
                // Vector byte j, most significant byte first.
                let v = (vec >> (self.cols - 8 * (j + 1))) as u8;
                p ^= parity(u32::from(b & v));
            }
            result = (result << 1) | u64::from(p);
        }
        result
    }

    /// GF(2) matrix product `self * other`.
    ///
    /// `other` is transposed first so each output bit reduces to a
    /// row-by-row AND-and-parity.
    pub fn mul(&self, other: &BinaryMatrix) -> Result<BinaryMatrix> {
        if self.cols != other.rows {
            return Err(Error::Config(format!(
                "cannot multiply {}x{} by {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }

        let mut result = BinaryMatrix::zeroed(self.rows, other.cols)?;
        let transposed = other.transpose();

        for i in 0..self.rows {
            let r1 = self.row(i);
            for j in 0..transposed.rows() {
                let r2 = transposed.row(j);
                let mut p = 0u8;
                for (a, b) in r1.iter().zip(r2) {
                    p ^= parity(u32::from(a & b));
                }
                result.set(i, j, p);
            }
        }

        Ok(result)
    }

    /// Transpose of the matrix.
    ///
    /// Works through 8x8 tiles held as a pair of 32-bit words; the bits
    /// of each output byte are gathered along a tile diagonal by the
    /// multiply-upper-32 trick, so a tile transposes in 16 multiplies
    /// instead of 64 single-bit moves.
    #[must_use]
    pub fn transpose(&self) -> BinaryMatrix {
        let mut result = BinaryMatrix {
            rows: self.cols,
            cols: self.rows,
            bytes: vec![0u8; self.bytes.len()],
        };

        let src_w = self.cols / 8;
        let dst_w = self.rows / 8;

        for row in (0..self.rows).step_by(8) {
            for col in (0..self.cols).step_by(8) {
                // Tile rows 0..4 packed MSB-down into x1, rows 4..8 into x0.
                let at = |i: usize| self.bytes[(row + i) * src_w + col / 8];
                let x1 = u32::from_be_bytes([at(0), at(1), at(2), at(3)]);
                let x0 = u32::from_be_bytes([at(4), at(5), at(6), at(7)]);

                for i in 0..8 {
                    let (y1, y0, sel, gather) = if i < 7 {
                        (x1, x0, 0x8080_8080u32 >> i, 0x0204_0810u32 << i)
                    } else {
                        (x1 << 7, x0 << 7, 0x8080_8080, 0x0204_0810)
                    };
                    let hi = (multiply_upper(y1 & sel, gather) & 0x0f) as u8;
                    let lo = (multiply_upper(y0 & sel, gather) & 0x0f) as u8;
                    result.bytes[(col + i) * dst_w + row / 8] = (hi << 4) | lo;
                }
            }
        }

        result
    }
}

impl fmt::Debug for BinaryMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BinaryMatrix {}x{}", self.rows, self.cols)?;
        for r in 0..self.rows {
            for b in self.row(r) {
                write!(f, "{b:08b}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
