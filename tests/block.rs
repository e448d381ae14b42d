use bitfec::block::{golay, hamming_7_4, Integrity};
use bitfec::BitmaskCombination;
use rand::Rng;

#[test]
fn golay_every_source_round_trips() {
    let code = golay();
    for source in 0u64..=0xfff {
        let cw = code.encode(source);
        let (integrity, data) = code.decode(cw);
        assert_eq!(integrity, Integrity::Ok, "source {source:#x}");
        assert_eq!(data, source, "source {source:#x}");
    }
}

#[test]
fn golay_corrects_every_single_bit_error() {
    let code = golay();
    for source in 0u64..=0xfff {
        let cw = code.encode(source);
        let mut masks = BitmaskCombination::new(24, 1).unwrap();
        loop {
            let mask = masks.next();
            if mask == 0 {
                break;
            }
            let (integrity, data) = code.decode(cw ^ mask);
            assert_eq!(integrity, Integrity::Corrected, "source {source:#x} mask {mask:#x}");
            assert_eq!(data, source, "source {source:#x} mask {mask:#x}");
        }
    }
}

// The full weight-2/3 sweeps over all 4096 sources take minutes; run a
// strided sample by default and keep the exhaustive version behind
// --ignored for release-mode runs.
fn golay_sweep(weight: u32, sources: impl Iterator<Item = u64>) {
    let code = golay();
    for source in sources {
        let cw = code.encode(source);
        let mut masks = BitmaskCombination::new(24, weight).unwrap();
        loop {
            let mask = masks.next();
            if mask == 0 {
                break;
            }
            let (integrity, data) = code.decode(cw ^ mask);
            assert_eq!(
                integrity,
                Integrity::Corrected,
                "source {source:#x} mask {mask:#06x}"
            );
            assert_eq!(data, source, "source {source:#x} mask {mask:#06x}");
        }
    }
}

#[test]
fn golay_corrects_double_errors_sampled() {
    golay_sweep(2, (0u64..=0xfff).step_by(127));
}

#[test]
fn golay_corrects_triple_errors_sampled() {
    golay_sweep(3, (0u64..=0xfff).step_by(1021));
}

#[test]
#[ignore = "exhaustive sweep, minutes in release mode"]
fn golay_corrects_double_errors_exhaustive() {
    golay_sweep(2, 0u64..=0xfff);
}

#[test]
#[ignore = "exhaustive sweep, minutes in release mode"]
fn golay_corrects_triple_errors_exhaustive() {
    golay_sweep(3, 0u64..=0xfff);
}

#[test]
fn golay_flags_quadruple_errors() {
    // Weight-4 patterns are outside every radius-3 sphere around a
    // codeword (minimum distance 8), so the sweep finds no matching
    // mask and the decoder must report the word uncorrectable.
    let code = golay();
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let source = rng.gen_range(0u64..=0xfff);
        let cw = code.encode(source);
        let mut mask = 0u64;
        while mask.count_ones() != 4 {
            mask |= 1 << rng.gen_range(0..24);
        }
        let (integrity, data) = code.decode(cw ^ mask);
        assert_eq!(integrity, Integrity::Uncorrectable, "mask {mask:#x}");
        assert_eq!(data, 0);
    }
}

#[test]
fn hamming_every_source_and_single_error() {
    let code = hamming_7_4();
    for source in 0u64..16 {
        let cw = code.encode(source);

        let (integrity, data) = code.decode(cw);
        assert_eq!(integrity, Integrity::Ok);
        assert_eq!(data, source);

        for bit in 0..7 {
            let (integrity, data) = code.decode(cw ^ (1 << bit));
            assert_eq!(integrity, Integrity::Corrected, "source {source} bit {bit}");
            assert_eq!(data, source, "source {source} bit {bit}");
        }
    }
}

#[test]
fn hamming_double_errors_miscorrect() {
    // Hamming(7,4) has distance 3: two flipped bits land within one bit
    // of a different codeword, so the decoder "corrects" to wrong data.
    // This pins the known limitation rather than the desired behavior.
    let code = hamming_7_4();
    let source = 0b1010u64;
    let cw = code.encode(source);
    let (integrity, data) = code.decode(cw ^ 0b11);
    assert!(integrity.ok());
    assert_ne!(data, source);
}
