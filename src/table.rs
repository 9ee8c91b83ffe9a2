//! Serialisation of normalised frequency vectors into the compact two-level
//! RLE format described in `SPEC_FULL.md` §4.4 / §6, grounded directly on
//! `examples/original_source/.../cram/rANS_static.c`'s table-writing and
//! table-reading loops.
//!
//! A present symbol always writes a frequency field. It only gets its own
//! index byte when it isn't already covered by an in-flight run; a run's
//! *second* member additionally writes a run-length byte counting how many
//! more symbols continue the run, but only once the slot immediately before
//! the run's start is itself absent — a quirk of the historical encoding:
//! the run-length is attached to the second symbol of a run, not the first.
//! The block ends with a 0x00 byte where the next symbol index would
//! otherwise be read.

use crate::error::RansError;
use crate::TOTFREQ;

pub fn write_rle_block(out: &mut Vec<u8>, freqs: &[u16; 256]) {
    let mut rle = 0usize;
    for s in 0..256 {
        if freqs[s] == 0 {
            continue;
        }
        if rle > 0 {
            rle -= 1;
        } else {
            out.push(s as u8);
            if s != 0 && freqs[s - 1] != 0 {
                let mut end = s + 1;
                while end < 256 && freqs[end] != 0 {
                    end += 1;
                }
                rle = end - (s + 1);
                out.push(rle as u8);
            }
        }
        write_freq(out, freqs[s]);
    }
    out.push(0);
}

fn write_freq(out: &mut Vec<u8>, f: u16) {
    if f < 128 {
        out.push(f as u8);
    } else {
        out.push(0x80 | ((f >> 8) as u8));
        out.push((f & 0xff) as u8);
    }
}

fn read_freq(input: &[u8], cursor: &mut usize, zero_means_totfreq: bool) -> Result<u16, RansError> {
    let b0 = *input.get(*cursor).ok_or(RansError::TruncatedStream)?;
    *cursor += 1;
    let f = if b0 & 0x80 == 0 {
        b0 as u16
    } else {
        let b1 = *input.get(*cursor).ok_or(RansError::TruncatedStream)?;
        *cursor += 1;
        (((b0 & 0x7f) as u16) << 8) | b1 as u16
    };
    if f == 0 && zero_means_totfreq {
        Ok(TOTFREQ as u16)
    } else {
        Ok(f)
    }
}

/// Parses one RLE block, terminated by a 0x00 byte in the symbol-index
/// position. `zero_means_totfreq` reinstates the order-1-only historical
/// escape where a literal zero frequency field is reinterpreted as
/// `TOTFREQ`; the frequency field is wide enough to write `TOTFREQ` directly,
/// so this crate's own encoder never relies on it, but a decoder must still
/// honour it for order-1 rows (see `SPEC_FULL.md` §9).
pub fn read_rle_block(
    input: &[u8],
    cursor: &mut usize,
    zero_means_totfreq: bool,
) -> Result<[u16; 256], RansError> {
    let mut out = [0u16; 256];
    let mut total: u32 = 0;
    let mut rle = 0usize;

    let mut s = *input.get(*cursor).ok_or(RansError::TruncatedStream)? as usize;
    *cursor += 1;

    loop {
        let f = read_freq(input, cursor, zero_means_totfreq)?;
        out[s] = f;
        total += f as u32;
        if total > TOTFREQ as u32 {
            return Err(RansError::TableOverrun);
        }

        let peek = *input.get(*cursor).ok_or(RansError::TruncatedStream)? as usize;
        let next = if rle == 0 && peek == s + 1 {
            *cursor += 1;
            rle = *input.get(*cursor).ok_or(RansError::TruncatedStream)? as usize;
            *cursor += 1;
            peek
        } else if rle > 0 {
            rle -= 1;
            s + 1
        } else {
            *cursor += 1;
            peek
        };

        if next > 255 {
            return Err(RansError::IndexOverflow);
        }
        s = next;
        if s == 0 {
            break;
        }
    }

    if total < TOTFREQ as u32 - 1 || total > TOTFREQ as u32 {
        return Err(RansError::TableOverrun);
    }

    Ok(out)
}
