//! Order-1 (previous-byte-conditioned) compress/decompress driver.
//!
//! Reuses the order-0 driver's round-robin interleaving skeleton (tail via
//! stream 0, then groups of four from the end backward via streams 3,2,1,0)
//! but looks up each symbol's encoder/decoder model by context — the
//! preceding byte in true source order, with context 0 for position 0. See
//! `DESIGN.md` "Order-1 interleaving strategy" for why this departs from the
//! reference's independent-slice design.
//!
//! The table of which contexts are present is itself RLE-coded the same way
//! as a per-symbol frequency row — grounded on `rans_compress_O1`/
//! `rans_uncompress_O1`'s outer `i`/`T[]` loop in
//! `examples/original_source/cram/rANS_static.c`, which applies the identical
//! run-length scheme to context indices that the inner loop applies to
//! symbol frequencies, as two separate but structurally identical loops.

use log::trace;

use crate::error::RansError;
use crate::freq::normalize_row;
use crate::model::Model;
use crate::rans::RansState;
use crate::table::{read_rle_block, write_rle_block};
use crate::{HEADER_LEN, TF_MASK, TF_SHIFT, TOTFREQ};

#[inline]
fn ctx_at(buf: &[u8], i: usize) -> u8 {
    if i == 0 {
        0
    } else {
        buf[i - 1]
    }
}

pub fn compress(input: &[u8]) -> Vec<u8> {
    assert!(!input.is_empty(), "cannot compress an empty buffer");
    assert!(input.len() >= 4, "order-1 requires at least 4 bytes");

    let mut raw = [[0u32; 256]; 256];
    let mut row_total = [0u64; 256];
    for i in 0..input.len() {
        let ctx = ctx_at(input, i) as usize;
        raw[ctx][input[i] as usize] += 1;
        row_total[ctx] += 1;
    }

    let mut models: [Option<Model>; 256] = std::array::from_fn(|_| None);

    let mut out = Vec::with_capacity(input.len() + TOTFREQ * 2);
    out.push(1u8);
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(&(input.len() as u32).to_le_bytes());

    let mut rle_ctx = 0usize;
    for ctx in 0..256 {
        if row_total[ctx] == 0 {
            continue;
        }
        if rle_ctx > 0 {
            rle_ctx -= 1;
        } else {
            out.push(ctx as u8);
            if ctx != 0 && row_total[ctx - 1] > 0 {
                let mut end = ctx + 1;
                while end < 256 && row_total[end] > 0 {
                    end += 1;
                }
                rle_ctx = end - (ctx + 1);
                out.push(rle_ctx as u8);
            }
        }

        let freqs = normalize_row(&raw[ctx], row_total[ctx], ctx);
        models[ctx] = Some(Model::build(&freqs));
        write_rle_block(&mut out, &freqs);
    }
    out.push(0);

    let payload = encode_interleaved(input, &models);
    out.extend_from_slice(&payload);

    let payload_len = (out.len() - HEADER_LEN) as u32;
    out[1..5].copy_from_slice(&payload_len.to_le_bytes());
    out
}

fn encode_interleaved(input: &[u8], models: &[Option<Model>; 256]) -> Vec<u8> {
    let n = input.len();
    let main_len = n - (n % 4);
    let mut states = [RansState::new(); 4];
    let mut buf: Vec<u8> = Vec::with_capacity(n);

    let sym_at = |i: usize| -> crate::rans::EncoderSymbol {
        let ctx = ctx_at(input, i) as usize;
        models[ctx]
            .as_ref()
            .expect("context observed during stats collection")
            .encoder_symbols[input[i] as usize]
            .expect("observed symbol has an entry in its context's model")
    };

    // Tail bytes share state 0, which is LIFO: push them in reverse source
    // order so the forward decode loop reconstructs true source order. Each
    // byte's context still depends on the preceding byte in *true* source
    // order, which is already known regardless of push order.
    for i in (main_len..n).rev() {
        let sym = sym_at(i);
        states[0].encode(&sym, &mut buf);
    }

    let mut i = main_len;
    while i > 0 {
        let s3 = sym_at(i - 1);
        states[3].encode(&s3, &mut buf);
        let s2 = sym_at(i - 2);
        states[2].encode(&s2, &mut buf);
        let s1 = sym_at(i - 3);
        states[1].encode(&s1, &mut buf);
        let s0 = sym_at(i - 4);
        states[0].encode(&s0, &mut buf);
        i -= 4;
    }

    states[3].flush(&mut buf);
    states[2].flush(&mut buf);
    states[1].flush(&mut buf);
    states[0].flush(&mut buf);

    buf.reverse();
    buf
}

pub fn decompress(table_and_payload: &[u8], out_size: u32) -> Result<Vec<u8>, RansError> {
    let mut cursor = 0usize;
    let mut models: [Option<Model>; 256] = std::array::from_fn(|_| None);

    let mut rle_ctx = 0usize;
    let mut ctx = *table_and_payload
        .get(cursor)
        .ok_or(RansError::TruncatedStream)? as usize;
    cursor += 1;

    loop {
        let freqs = read_rle_block(table_and_payload, &mut cursor, true)?;
        models[ctx] = Some(Model::build(&freqs));

        let peek = *table_and_payload
            .get(cursor)
            .ok_or(RansError::TruncatedStream)? as usize;
        let next = if rle_ctx == 0 && peek == ctx + 1 {
            cursor += 1;
            rle_ctx = *table_and_payload
                .get(cursor)
                .ok_or(RansError::TruncatedStream)? as usize;
            cursor += 1;
            peek
        } else if rle_ctx > 0 {
            rle_ctx -= 1;
            ctx + 1
        } else {
            cursor += 1;
            peek
        };

        if next > 255 {
            return Err(RansError::IndexOverflow);
        }
        ctx = next;
        if ctx == 0 {
            break;
        }
    }

    decode_interleaved(&table_and_payload[cursor..], out_size as usize, &models)
}

fn decode_interleaved(
    payload: &[u8],
    n: usize,
    models: &[Option<Model>; 256],
) -> Result<Vec<u8>, RansError> {
    if n > 0 && payload.len() < 16 {
        return Err(RansError::TruncatedStream);
    }
    let mut cursor = 0usize;
    let mut states = [
        RansState::init(payload, &mut cursor)?,
        RansState::init(payload, &mut cursor)?,
        RansState::init(payload, &mut cursor)?,
        RansState::init(payload, &mut cursor)?,
    ];

    let mut out = vec![0u8; n];
    let main_len = n - (n % 4);
    let mut i = 0usize;
    while i < main_len {
        for k in 0..4 {
            let pos = i + k;
            let ctx = ctx_at(&out, pos) as usize;
            let model = models[ctx].as_ref().ok_or(RansError::UnknownContext(ctx as u8))?;
            let slot = states[k].get_slot(TF_MASK);
            if model.last_slot_synthetic && slot as usize == TOTFREQ - 1 {
                trace!("order1 decode hit synthetic R[TOTFREQ-1] slot (ctx={})", ctx);
            }
            let sym = model.r[slot as usize];
            out[pos] = sym;
            states[k].decode_advance(&model.decoder_symbols[sym as usize], slot, TF_SHIFT);
            states[k].renormalize(payload, &mut cursor);
        }
        i += 4;
    }

    for pos in main_len..n {
        let ctx = ctx_at(&out, pos) as usize;
        let model = models[ctx].as_ref().ok_or(RansError::UnknownContext(ctx as u8))?;
        let slot = states[0].get_slot(TF_MASK);
        if model.last_slot_synthetic && slot as usize == TOTFREQ - 1 {
            trace!("order1 decode hit synthetic R[TOTFREQ-1] slot (ctx={})", ctx);
        }
        let sym = model.r[slot as usize];
        out[pos] = sym;
        states[0].decode_advance(&model.decoder_symbols[sym as usize], slot, TF_SHIFT);
        states[0].renormalize(payload, &mut cursor);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_alternating() {
        let input: Vec<u8> = (0..1000).map(|i| if i % 2 == 0 { b'A' } else { b'B' }).collect();
        let compressed = compress(&input);
        let out_size = u32::from_le_bytes(compressed[5..9].try_into().unwrap());
        let decoded = decompress(&compressed[HEADER_LEN..], out_size).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn round_trip_text_like() {
        let input = b"the quick brown fox jumps over the lazy dog the quick brown fox".repeat(20);
        let compressed = compress(&input);
        let out_size = u32::from_le_bytes(compressed[5..9].try_into().unwrap());
        let decoded = decompress(&compressed[HEADER_LEN..], out_size).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn round_trip_non_multiple_of_four() {
        let input: Vec<u8> = (0..257u32).map(|i| (i % 5) as u8).collect();
        let compressed = compress(&input);
        let out_size = u32::from_le_bytes(compressed[5..9].try_into().unwrap());
        let decoded = decompress(&compressed[HEADER_LEN..], out_size).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn round_trip_sparse_contexts() {
        let mut input = Vec::new();
        for _ in 0..50 {
            input.extend_from_slice(b"ab");
        }
        for _ in 0..50 {
            input.extend_from_slice(&[0xff, 0x01]);
        }
        let compressed = compress(&input);
        let out_size = u32::from_le_bytes(compressed[5..9].try_into().unwrap());
        let decoded = decompress(&compressed[HEADER_LEN..], out_size).unwrap();
        assert_eq!(decoded, input);
    }
}
