//! Table-free, bit-serial cyclic redundancy checks.
//!
//! A [`Crc`] is configured from a [`CrcParams`] block (polynomial, init,
//! final xor, reflection flags) covering the common 16- and 32-bit
//! variants; the named constructors carry the standard parameter sets.

use crate::bits::{reverse_bits_32, reverse_bits_8};
use crate::{Error, Result};

/// The parameter block describing a CRC variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrcParams {
    /// Register width in bits; 16 or 32.
    pub width: u32,
    pub poly: u32,
    pub init: u32,
    pub xorout: u32,
    /// Bit-reverse each input byte before absorbing it.
    pub reflect_in: bool,
    /// Bit-reverse the register before the final xor.
    pub reflect_out: bool,
}

/// Bit-serial CRC engine.
#[derive(Debug, Clone)]
pub struct Crc {
    params: CrcParams,
}

impl Crc {
    pub fn new(params: CrcParams) -> Result<Self> {
        if params.width != 16 && params.width != 32 {
            return Err(Error::Config(format!(
                "CRC width must be 16 or 32, got {}",
                params.width
            )));
        }
        Ok(Crc { params })
    }

    /// CRC-16/BUYPASS (poly 0x8005, no reflection).
    #[must_use]
    pub fn crc16_buypass() -> Self {
        Crc {
            params: CrcParams {
                width: 16,
                poly: 0x8005,
                init: 0,
                xorout: 0,
                reflect_in: false,
                reflect_out: false,
            },
        }
    }

    /// CRC-16/ARC (poly 0x8005, reflected).
    #[must_use]
    pub fn crc16_arc() -> Self {
        Crc {
            params: CrcParams {
                width: 16,
                poly: 0x8005,
                init: 0,
                xorout: 0,
                reflect_in: true,
                reflect_out: true,
            },
        }
    }

    /// CRC-16/USB (poly 0x8005, reflected, inverted in and out).
    #[must_use]
    pub fn crc16_usb() -> Self {
        Crc {
            params: CrcParams {
                width: 16,
                poly: 0x8005,
                init: 0xffff,
                xorout: 0xffff,
                reflect_in: true,
                reflect_out: true,
            },
        }
    }

    /// CRC-32/ISO-HDLC, the ubiquitous zlib/ethernet CRC-32.
    #[must_use]
    pub fn crc32_iso_hdlc() -> Self {
        Crc {
            params: CrcParams {
                width: 32,
                poly: 0x04c1_1db7,
                init: 0xffff_ffff,
                xorout: 0xffff_ffff,
                reflect_in: true,
                reflect_out: true,
            },
        }
    }

    /// CRC-32/POSIX (cksum).
    #[must_use]
    pub fn crc32_posix() -> Self {
        Crc {
            params: CrcParams {
                width: 32,
                poly: 0x04c1_1db7,
                init: 0,
                xorout: 0xffff_ffff,
                reflect_in: false,
                reflect_out: false,
            },
        }
    }

    /// CRC-32C (Castagnoli).
    #[must_use]
    pub fn crc32c() -> Self {
        Crc {
            params: CrcParams {
                width: 32,
                poly: 0x1edc_6f41,
                init: 0xffff_ffff,
                xorout: 0xffff_ffff,
                reflect_in: true,
                reflect_out: true,
            },
        }
    }

    #[must_use]
    pub fn params(&self) -> &CrcParams {
        &self.params
    }

    /// Checksum of `dat`, in the low `width` bits of the result.
    ///
    /// An empty input yields 0 regardless of the configured init/xorout.
    #[must_use]
    pub fn checksum(&self, dat: &[u8]) -> u32 {
        if dat.is_empty() {
            return 0;
        }

        let p = &self.params;
        let width_mask = if p.width == 32 {
            u32::MAX
        } else {
            (1u32 << p.width) - 1
        };
        let top_bit = 1u32 << (p.width - 1);

        let mut out = p.init;
        for &byte in dat {
            let b = if p.reflect_in {
                reverse_bits_8(byte)
            } else {
                byte
            };
            out ^= u32::from(b) << (p.width - 8);
            for _ in 0..8 {
                let feedback = out & top_bit != 0;
                out = (out << 1) & width_mask;
                if feedback {
                    out ^= p.poly;
                }
            }
        }

        if p.reflect_out {
            out = reverse_bits_32(out) >> (32 - p.width);
        }

        (out ^ p.xorout) & width_mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The standard check input for CRC catalogues.
    const CHECK: &[u8] = b"123456789";

    #[test]
    fn known_check_values() {
        assert_eq!(Crc::crc16_buypass().checksum(CHECK), 0xfee8);
        assert_eq!(Crc::crc16_arc().checksum(CHECK), 0xbb3d);
        assert_eq!(Crc::crc16_usb().checksum(CHECK), 0xb4c8);
        assert_eq!(Crc::crc32_iso_hdlc().checksum(CHECK), 0xcbf4_3926);
        assert_eq!(Crc::crc32_posix().checksum(CHECK), 0x765e_7680);
        assert_eq!(Crc::crc32c().checksum(CHECK), 0xe306_9283);
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(Crc::crc32_iso_hdlc().checksum(&[]), 0);
        assert_eq!(Crc::crc16_usb().checksum(&[]), 0);
    }

    #[test]
    fn single_bit_change_changes_checksum() {
        let crc = Crc::crc32_iso_hdlc();
        let a = crc.checksum(b"hello world");
        let b = crc.checksum(b"hello worle");
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_odd_width() {
        let params = CrcParams {
            width: 24,
            poly: 0x864c_fb,
            init: 0,
            xorout: 0,
            reflect_in: false,
            reflect_out: false,
        };
        assert!(Crc::new(params).is_err());
    }
}
