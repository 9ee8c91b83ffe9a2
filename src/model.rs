//! Builds the per-context encoder/decoder symbol tables and the flat
//! reverse-lookup array `R` from a normalised frequency vector.
//!
//! `R` is the direct analogue of the teacher's `VecFrame<const RADIX,
//! T>(Vec<DecoderModelEntry>)` (`src/ans/model4decoder.rs`): a flat `Vec`
//! indexed by a state's low bits, giving O(1) symbol lookup during decode.

use crate::rans::{DecoderSymbol, EncoderSymbol};
use crate::TOTFREQ;

pub struct Model {
    pub encoder_symbols: [Option<EncoderSymbol>; 256],
    pub decoder_symbols: [DecoderSymbol; 256],
    /// Reverse lookup: for slot `v` in `[0, TOTFREQ)`, `r[v]` is the symbol
    /// whose cumulative interval contains `v`.
    pub r: Vec<u8>,
    /// Set when `r[TOTFREQ - 1]` had to be filled from `r[TOTFREQ - 2]`
    /// rather than from a symbol interval that actually reaches it. This
    /// crate's normaliser always produces frequencies summing to exactly
    /// `TOTFREQ - 1` (the `fsum += 1` in `freq::normalize`/`normalize_row`
    /// reserves the top slot), so this fallback fires for every model built
    /// from a normalised table, not just defensively. See `SPEC_FULL.md`
    /// §4.3/§7.3.
    pub last_slot_synthetic: bool,
}

impl Model {
    pub fn build(freqs: &[u16; 256]) -> Self {
        let mut encoder_symbols: [Option<EncoderSymbol>; 256] = [None; 256];
        let mut decoder_symbols = [DecoderSymbol::default(); 256];
        let mut r = vec![0u8; TOTFREQ];

        let mut cumul = 0u16;
        for s in 0..256 {
            let f = freqs[s];
            if f == 0 {
                continue;
            }
            encoder_symbols[s] = Some(EncoderSymbol::new(cumul, f));
            decoder_symbols[s] = DecoderSymbol { start: cumul, freq: f };

            for v in cumul..(cumul + f) {
                r[v as usize] = s as u8;
            }
            cumul += f;
        }

        let mut last_slot_synthetic = false;
        if TOTFREQ >= 2 && r[TOTFREQ - 1] == 0 && r[TOTFREQ - 2] != 0 {
            r[TOTFREQ - 1] = r[TOTFREQ - 2];
            last_slot_synthetic = true;
        }

        Self {
            encoder_symbols,
            decoder_symbols,
            r,
            last_slot_synthetic,
        }
    }
}
