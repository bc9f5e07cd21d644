//! Sample transform
//!
//! Maps offset-binary PCM bytes (128 = silence) onto zigzag codes of their
//! signed distance from silence: 128 -> 0, 127 -> 1, 129 -> 2, 126 -> 3, ...
//! Quiet passages end up as small codes, which keeps frame bit widths low.

/// value of a silent sample
pub const SILENCE: u8 = 128;

/// raw sample to zigzag code
#[inline]
pub fn forward(sample: u8) -> u8 {
    let d = sample.wrapping_sub(SILENCE) as i8;
    ((d << 1) ^ (d >> 7)) as u8
}

/// zigzag code back to raw sample
#[inline]
pub fn inverse(code: u8) -> u8 {
    let d = (code >> 1) ^ (code & 1).wrapping_neg();
    d.wrapping_add(SILENCE)
}

/// transform a block of samples in place
pub fn forward_in_place(samples: &mut [u8]) {
    for s in samples.iter_mut() {
        *s = forward(*s);
    }
}

/// undo `forward_in_place`
pub fn inverse_in_place(codes: &mut [u8]) {
    for c in codes.iter_mut() {
        *c = inverse(*c);
    }
}
