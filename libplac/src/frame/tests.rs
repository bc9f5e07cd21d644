//! Internal frame codec tests

use std::io::Cursor;

use super::decoder::unpack_codes;
use super::*;
use crate::core::{zigzag, FrameStats, PlacHeader};

fn encode_one(samples: &[u8; FRAME_SAMPLES]) -> (Vec<u8>, u8) {
    let mut out = Vec::new();
    let bits = FrameEncoder::new().encode_frame(samples, &mut out);
    (out, bits)
}

#[test]
fn test_bit_width_edges() {
    assert_eq!(bit_width(0), 0);
    assert_eq!(bit_width(1), 1);
    assert_eq!(bit_width(2), 2);
    assert_eq!(bit_width(3), 2);
    assert_eq!(bit_width(4), 3);
    assert_eq!(bit_width(127), 7);
    assert_eq!(bit_width(128), 8);
    assert_eq!(bit_width(255), 8);
}

#[test]
fn test_bit_width_is_minimal() {
    for max in 0..=255u8 {
        let bits = bit_width(max);
        assert!(bits <= MAX_BIT_WIDTH);
        assert!((max as u16) < (1u16 << bits), "{} does not fit {} bits", max, bits);
        if bits > 0 {
            assert!(
                (max as u16) >= (1u16 << (bits - 1)),
                "{} fits in fewer than {} bits",
                max,
                bits
            );
        }
    }
}

#[test]
fn test_silent_frame_is_one_byte() {
    let (out, bits) = encode_one(&[zigzag::SILENCE; FRAME_SAMPLES]);
    assert_eq!(bits, 0);
    assert_eq!(out, vec![0]);
}

#[test]
fn test_two_bit_frame_layout() {
    // 129 -> code 2 -> "10" repeated
    let (out, bits) = encode_one(&[129; FRAME_SAMPLES]);
    assert_eq!(bits, 2);
    assert_eq!(out.len(), encoded_frame_len(2));
    assert_eq!(out[0], 2);
    assert!(out[1..].iter().all(|&b| b == 0xaa));
}

#[test]
fn test_full_width_frame_layout() {
    let mut samples = [zigzag::SILENCE; FRAME_SAMPLES];
    samples[0] = 255;
    let (out, bits) = encode_one(&samples);
    assert_eq!(bits, 8);
    assert_eq!(out.len(), 33);
    assert_eq!(out[0], 254);
    assert_eq!(out[1], 254);
    assert!(out[2..].iter().all(|&b| b == 0));
}

#[test]
fn test_groups_are_byte_aligned() {
    // codes 0..8 in the first group, in 3 bits, then silence
    let mut samples = [zigzag::SILENCE; FRAME_SAMPLES];
    for (i, s) in samples.iter_mut().take(8).enumerate() {
        *s = zigzag::inverse(i as u8);
    }
    let (out, bits) = encode_one(&samples);
    assert_eq!(bits, 3);
    // 000 001 010 011 100 101 110 111
    assert_eq!(&out[1..4], &[0b0000_0101, 0b0011_1001, 0b0111_0111]);
    assert!(out[4..].iter().all(|&b| b == 0));
}

#[test]
fn test_unpack_keeps_low_bits_only() {
    let packed = [0xffu8; 4];
    let mut codes = [0u8; FRAME_SAMPLES];
    unpack_codes(&packed, 1, &mut codes);
    assert!(codes.iter().all(|&c| c == 1));
}

#[test]
fn test_decode_frame_roundtrip() {
    let mut samples = [0u8; FRAME_SAMPLES];
    for (i, s) in samples.iter_mut().enumerate() {
        *s = (i as u8).wrapping_mul(37).wrapping_add(11);
    }
    let (out, bits) = encode_one(&samples);

    let mut decoded = [0u8; FRAME_SAMPLES];
    let mut cursor = Cursor::new(out);
    let used = FrameDecoder::new()
        .decode_frame(&mut cursor, &mut decoded)
        .unwrap();

    assert_eq!(used, bits);
    assert_eq!(decoded, samples);
    assert_eq!(cursor.position() as usize, encoded_frame_len(bits));
}

#[test]
fn test_stream_counts_match_output() {
    let data: Vec<u8> = (0..100u32).map(|i| (128 + (i % 7) as i32 - 3) as u8).collect();
    let mut encoded = Vec::new();
    let mut stats = FrameStats::new();
    FrameEncoder::new()
        .encode_stream(&mut Cursor::new(&data), &mut encoded, 100, &mut stats)
        .unwrap();

    assert_eq!(stats.frames, 3);
    assert_eq!(stats.tail_len, 4);
    assert_eq!(stats.original_bytes, 100);
    assert_eq!(stats.compressed_bytes, encoded.len() as u64);
    assert_eq!(&encoded[encoded.len() - 4..], &data[96..]);

    let header = PlacHeader {
        original_data_size: 100,
        compressed_data_size: encoded.len() as u32,
        ..PlacHeader::placeholder()
    };
    let mut decoded = Vec::new();
    let mut stats = FrameStats::new();
    FrameDecoder::new()
        .decode_stream(&mut Cursor::new(&encoded), &mut decoded, &header, &mut stats)
        .unwrap();
    assert_eq!(decoded, data);
}
