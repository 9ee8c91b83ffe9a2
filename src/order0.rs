//! Order-0 (single static byte distribution) compress/decompress driver.
//!
//! Grounded on `examples/original_source/cram/rANS_static.c`'s
//! `rans_compress_O0`/`rans_uncompress_O0`: tail bytes (`n % 4` of them) are
//! coded via stream 0, then the remaining bytes are coded in groups of four
//! from the end of the buffer backward, via streams 3, 2, 1, 0 in that order
//! within each group. Decoding mirrors this: the main round-robin loop runs
//! first, the tail loop runs last.
//!
//! A single rANS state is LIFO: decoding a state recovers symbols in the
//! reverse of the order they were pushed. The tail shares one state across
//! `n % 4` bytes, so the tail is pushed in reverse source order at encode
//! time — the forward tail decode loop then reconstructs true source order.

use log::trace;

use crate::error::RansError;
use crate::freq::normalize;
use crate::model::Model;
use crate::rans::RansState;
use crate::table::{read_rle_block, write_rle_block};
use crate::{HEADER_LEN, TF_MASK, TF_SHIFT, TOTFREQ};

pub fn compress(input: &[u8]) -> Vec<u8> {
    assert!(!input.is_empty(), "cannot compress an empty buffer");

    let mut raw = [0u32; 256];
    for &b in input {
        raw[b as usize] += 1;
    }
    let freqs = normalize(&raw, input.len() as u64, None);
    let model = Model::build(&freqs);

    let mut out = Vec::with_capacity(input.len() + TOTFREQ);
    out.push(0u8);
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(&(input.len() as u32).to_le_bytes());
    write_rle_block(&mut out, &freqs);

    let payload = encode_interleaved(input, &model);
    out.extend_from_slice(&payload);

    let payload_len = (out.len() - HEADER_LEN) as u32;
    out[1..5].copy_from_slice(&payload_len.to_le_bytes());
    out
}

fn encode_interleaved(input: &[u8], model: &Model) -> Vec<u8> {
    let n = input.len();
    let main_len = n - (n % 4);
    let mut states = [RansState::new(); 4];
    let mut buf: Vec<u8> = Vec::with_capacity(n);

    for i in (main_len..n).rev() {
        let sym = model.encoder_symbols[input[i] as usize].expect("observed symbol has an entry");
        states[0].encode(&sym, &mut buf);
    }

    let mut i = main_len;
    while i > 0 {
        let s3 = model.encoder_symbols[input[i - 1] as usize].unwrap();
        states[3].encode(&s3, &mut buf);
        let s2 = model.encoder_symbols[input[i - 2] as usize].unwrap();
        states[2].encode(&s2, &mut buf);
        let s1 = model.encoder_symbols[input[i - 3] as usize].unwrap();
        states[1].encode(&s1, &mut buf);
        let s0 = model.encoder_symbols[input[i - 4] as usize].unwrap();
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
    let freqs = read_rle_block(table_and_payload, &mut cursor, false)?;
    let model = Model::build(&freqs);
    decode_interleaved(&table_and_payload[cursor..], out_size as usize, &model)
}

fn decode_interleaved(payload: &[u8], n: usize, model: &Model) -> Result<Vec<u8>, RansError> {
    if payload.len() < 16 {
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
            let slot = states[k].get_slot(TF_MASK);
            if model.last_slot_synthetic && slot as usize == TOTFREQ - 1 {
                trace!("order0 decode hit synthetic R[TOTFREQ-1] slot");
            }
            let sym = model.r[slot as usize];
            out[i + k] = sym;
            states[k].decode_advance(&model.decoder_symbols[sym as usize], slot, TF_SHIFT);
            states[k].renormalize(payload, &mut cursor);
        }
        i += 4;
    }

    for byte in out.iter_mut().take(n).skip(main_len) {
        let slot = states[0].get_slot(TF_MASK);
        if model.last_slot_synthetic && slot as usize == TOTFREQ - 1 {
            trace!("order0 decode hit synthetic R[TOTFREQ-1] slot");
        }
        let sym = model.r[slot as usize];
        *byte = sym;
        states[0].decode_advance(&model.decoder_symbols[sym as usize], slot, TF_SHIFT);
        states[0].renormalize(payload, &mut cursor);
    }

    Ok(out)
}
