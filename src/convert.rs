// convert.rs - Destination-format plumbing: a writer that appends
// scalar values to UTF-8/16/32 output slices, plus standalone UTF-16 and
// UTF-32 run conversion.
//
// Writes are atomic per character: a multi-byte UTF-8 sequence or a
// surrogate pair is either written whole or not at all, so a full buffer
// never leaves a torn sequence at its end.

use crate::types::{
    is_surrogate, is_surrogate_high, is_surrogate_low, pair_from_scalar, scalar_from_pair,
    CodePoint, DestFormat, MAX_CODE_POINT, REPLACEMENT_CHARACTER,
};

// === Encoded lengths ===

#[inline]
pub(crate) fn utf8_len(ch: CodePoint) -> usize {
    match ch {
        0..=0x7F => 1,
        0x80..=0x7FF => 2,
        0x800..=0xFFFF => 3,
        _ => 4,
    }
}

#[inline]
pub(crate) fn utf16_len(ch: CodePoint) -> usize {
    if ch <= 0xFFFF {
        1
    } else {
        2
    }
}

/// Encode one scalar as UTF-8 into a fixed array, returning the byte
/// count used.
#[inline]
fn encode_utf8(ch: CodePoint) -> ([u8; 4], usize) {
    match utf8_len(ch) {
        1 => ([ch as u8, 0, 0, 0], 1),
        2 => ([0xC0 | (ch >> 6) as u8, 0x80 | (ch & 0x3F) as u8, 0, 0], 2),
        3 => (
            [
                0xE0 | (ch >> 12) as u8,
                0x80 | ((ch >> 6) & 0x3F) as u8,
                0x80 | (ch & 0x3F) as u8,
                0,
            ],
            3,
        ),
        _ => (
            [
                0xF0 | (ch >> 18) as u8,
                0x80 | ((ch >> 12) & 0x3F) as u8,
                0x80 | ((ch >> 6) & 0x3F) as u8,
                0x80 | (ch & 0x3F) as u8,
            ],
            4,
        ),
    }
}

// === Destination writer ===

/// Output slice in one of the three destination formats.
pub enum DestBuffer<'a> {
    Utf8(&'a mut [u8]),
    Utf16(&'a mut [u16]),
    Utf32(&'a mut [u32]),
}

/// Appends scalar values to a destination slice, tracking how many
/// destination units have been committed.
pub struct DestWriter<'a> {
    buffer: DestBuffer<'a>,
    filled: usize,
}

impl<'a> DestWriter<'a> {
    pub fn new(buffer: DestBuffer<'a>) -> DestWriter<'a> {
        DestWriter { buffer, filled: 0 }
    }

    pub fn format(&self) -> DestFormat {
        match self.buffer {
            DestBuffer::Utf8(_) => DestFormat::Utf8,
            DestBuffer::Utf16(_) => DestFormat::Utf16,
            DestBuffer::Utf32(_) => DestFormat::Utf32,
        }
    }

    /// Destination units committed so far (bytes for UTF-8, 16-bit
    /// units for UTF-16, scalars for UTF-32).
    pub fn filled(&self) -> usize {
        self.filled
    }

    fn remaining(&self) -> usize {
        match &self.buffer {
            DestBuffer::Utf8(buf) => buf.len() - self.filled,
            DestBuffer::Utf16(buf) => buf.len() - self.filled,
            DestBuffer::Utf32(buf) => buf.len() - self.filled,
        }
    }

    /// Destination units `ch` would occupy.
    pub(crate) fn units_for(&self, ch: CodePoint) -> usize {
        match self.buffer {
            DestBuffer::Utf8(_) => utf8_len(ch),
            DestBuffer::Utf16(_) => utf16_len(ch),
            DestBuffer::Utf32(_) => 1,
        }
    }

    /// Append one scalar. Returns `false` (committing nothing) when the
    /// encoded form does not fit.
    pub fn write_char(&mut self, ch: CodePoint) -> bool {
        if self.units_for(ch) > self.remaining() {
            return false;
        }
        match &mut self.buffer {
            DestBuffer::Utf8(buf) => {
                let (bytes, len) = encode_utf8(ch);
                buf[self.filled..self.filled + len].copy_from_slice(&bytes[..len]);
                self.filled += len;
            }
            DestBuffer::Utf16(buf) => {
                if ch <= 0xFFFF {
                    buf[self.filled] = ch as u16;
                    self.filled += 1;
                } else {
                    let (high, low) = pair_from_scalar(ch);
                    buf[self.filled] = high;
                    buf[self.filled + 1] = low;
                    self.filled += 2;
                }
            }
            DestBuffer::Utf32(buf) => {
                buf[self.filled] = ch;
                self.filled += 1;
            }
        }
        true
    }

    /// Append a whole run, all or nothing. Capacity is checked up front
    /// so a failed run commits no units.
    pub fn write_all(&mut self, chars: &[CodePoint]) -> bool {
        let needed: usize = chars.iter().map(|&ch| self.units_for(ch)).sum();
        if needed > self.remaining() {
            return false;
        }
        for &ch in chars {
            self.write_char(ch);
        }
        true
    }

    /// Append a raw 16-bit unit without validation. Only UTF-16
    /// destinations can carry an unpaired surrogate through.
    pub(crate) fn write_raw_unit(&mut self, unit: u16) -> bool {
        match &mut self.buffer {
            DestBuffer::Utf16(buf) => {
                if self.filled >= buf.len() {
                    return false;
                }
                buf[self.filled] = unit;
                self.filled += 1;
                true
            }
            _ => false,
        }
    }
}

// === Run conversion ===

/// Convert UTF-16 units to scalar values. Unpaired surrogates fail the
/// strict mode; with `lossy` they become U+FFFD. Returns the number of
/// scalars produced, or `None` on invalid input or a full destination.
pub fn utf16_to_utf32(src: &[u16], dst: &mut [u32], lossy: bool) -> Option<usize> {
    let mut produced = 0;
    let mut i = 0;
    while i < src.len() {
        let unit = src[i];
        let ch = if is_surrogate_high(unit) {
            match src.get(i + 1) {
                Some(&low) if is_surrogate_low(low) => {
                    i += 1;
                    scalar_from_pair(unit, low)
                }
                _ if lossy => REPLACEMENT_CHARACTER,
                _ => return None,
            }
        } else if is_surrogate_low(unit) {
            if !lossy {
                return None;
            }
            REPLACEMENT_CHARACTER
        } else {
            unit as u32
        };
        *dst.get_mut(produced)? = ch;
        produced += 1;
        i += 1;
    }
    Some(produced)
}

/// Convert scalar values to UTF-16 units. Surrogate code points and
/// values above U+10FFFF fail the strict mode; with `lossy` they become
/// U+FFFD. Returns the number of units produced, or `None` on invalid
/// input or a full destination.
pub fn utf32_to_utf16(src: &[u32], dst: &mut [u16], lossy: bool) -> Option<usize> {
    let mut produced = 0;
    for &ch in src {
        let ch = if ch > MAX_CODE_POINT || (ch <= 0xFFFF && is_surrogate(ch as u16)) {
            if !lossy {
                return None;
            }
            REPLACEMENT_CHARACTER
        } else {
            ch
        };
        if ch <= 0xFFFF {
            *dst.get_mut(produced)? = ch as u16;
            produced += 1;
        } else {
            if produced + 2 > dst.len() {
                return None;
            }
            let (high, low) = pair_from_scalar(ch);
            dst[produced] = high;
            dst[produced + 1] = low;
            produced += 2;
        }
    }
    Some(produced)
}
