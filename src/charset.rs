// charset.rs - Set membership engine.
//
// Whitespace and newline sets are synthesized from fixed range tests.
// The illegal set is stored with inverted polarity (the bitmap holds
// the "legal" complement) and planes 14..=16 are synthesized outright:
// in plane 14 only the tag characters 0x01 and 0x20..=0x7F (within-plane
// offsets) are legal, and in planes 15/16 only the trailing ..FFFE and
// ..FFFF code points are illegal. Everything else is a plain bitmap bit
// test: bit index = low 16 bits, byte = bit >> 3, mask = 1 << (bit & 7).

use crate::data::UnicodeData;
use crate::types::{plane_of, CharSet, CodePoint, PLANE_BITMAP_SIZE, PLANE_COUNT};

// === Synthesized range tests ===

/// Unicode `White_Space` code points answered without a bitmap.
#[inline]
pub(crate) fn is_whitespace(ch: CodePoint) -> bool {
    matches!(
        ch,
        0x0020 | 0x0009 | 0x00A0 | 0x1680 | 0x2000..=0x200B | 0x202F | 0x205F | 0x3000
    )
}

/// Line-boundary code points answered without a bitmap.
#[inline]
pub(crate) fn is_newline(ch: CodePoint) -> bool {
    matches!(ch, 0x000A..=0x000D | 0x0085 | 0x2028 | 0x2029)
}

/// Plane-14 tag block: within-plane 0x01 (language tag) and the tag
/// printables 0x20..=0x7F are the only legal code points there.
#[inline]
fn plane14_tag_legal(ch: CodePoint) -> bool {
    let within = ch & 0xFFFF;
    within == 0x01 || (0x20..=0x7F).contains(&within)
}

#[inline]
fn bitmap_bit(bitmap: &[u8], ch: CodePoint) -> bool {
    let bit = (ch & 0xFFFF) as usize;
    bitmap[bit >> 3] & (1 << (bit & 7)) != 0
}

#[inline]
fn set_bit(bitmap: &mut [u8], ch: CodePoint) {
    let bit = (ch & 0xFFFF) as usize;
    bitmap[bit >> 3] |= 1 << (bit & 7);
}

// === Fill states ===

/// Degenerate-plane report from `fill_bitmap`, letting callers skip
/// storage for planes that are entirely out or entirely in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitmapFill {
    /// No code point in the plane is a member.
    Empty,
    /// Every code point in the plane is a member.
    All,
    /// Mixed contents; the output buffer holds the bits.
    Filled,
}

fn classify(out: &[u8]) -> BitmapFill {
    if out.iter().all(|&b| b == 0) {
        BitmapFill::Empty
    } else if out.iter().all(|&b| b == 0xFF) {
        BitmapFill::All
    } else {
        BitmapFill::Filled
    }
}

fn invert(out: &mut [u8]) {
    for byte in out.iter_mut() {
        *byte = !*byte;
    }
}

// === Engine ===

impl UnicodeData {
    /// Is `ch` a member of the logical character set?
    ///
    /// Out-of-range or absent planes report non-membership, except for
    /// the illegal set where absence of legality data means illegal.
    pub fn is_member(&self, ch: CodePoint, set: CharSet) -> bool {
        match set.resolve_alias() {
            CharSet::Whitespace => is_whitespace(ch),
            CharSet::Newline => is_newline(ch),
            CharSet::WhitespaceAndNewline => is_whitespace(ch) || is_newline(ch),
            CharSet::Illegal => self.is_illegal(ch),
            CharSet::ControlAndFormat => {
                if plane_of(ch) == 14 {
                    // Tag characters are format characters.
                    plane14_tag_legal(ch)
                } else {
                    self.bitmap_member(ch, CharSet::ControlAndFormat)
                }
            }
            other => self.bitmap_member(ch, other),
        }
    }

    fn is_illegal(&self, ch: CodePoint) -> bool {
        match plane_of(ch) {
            14 => !plane14_tag_legal(ch),
            15 | 16 => (ch & 0xFFFF) >= 0xFFFE,
            plane if (plane as usize) < PLANE_COUNT => {
                let set = CharSet::Illegal
                    .bitmap_slot()
                    .and_then(|slot| self.bitmaps().and_then(|s| s.set(slot)));
                let Some(set) = set else {
                    // No legality data at all: cannot classify.
                    return false;
                };
                match set.plane(plane as usize) {
                    // Stored polarity is "legal"; invert.
                    Some(bitmap) => !bitmap_bit(bitmap, ch),
                    // A plane with no recorded legal characters.
                    None => true,
                }
            }
            _ => true,
        }
    }

    fn bitmap_member(&self, ch: CodePoint, set: CharSet) -> bool {
        let Some(slot) = set.bitmap_slot() else {
            return false;
        };
        let plane = plane_of(ch) as usize;
        if plane >= PLANE_COUNT {
            return false;
        }
        self.bitmaps()
            .and_then(|store| store.set(slot))
            .and_then(|set| set.plane(plane))
            .map(|bitmap| bitmap_bit(bitmap, ch))
            .unwrap_or(false)
    }

    /// Copy or synthesize one plane's 8192-byte membership bitmap into
    /// `out`, applying the same special-case logic as `is_member`.
    /// `inverted` complements the result before it is classified.
    pub fn fill_bitmap(
        &self,
        set: CharSet,
        plane: u32,
        out: &mut [u8; PLANE_BITMAP_SIZE],
        inverted: bool,
    ) -> BitmapFill {
        match set.resolve_alias() {
            CharSet::Whitespace => self.fill_synthesized(out, plane, is_whitespace, inverted),
            CharSet::Newline => self.fill_synthesized(out, plane, is_newline, inverted),
            CharSet::WhitespaceAndNewline => self.fill_synthesized(
                out,
                plane,
                |ch| is_whitespace(ch) || is_newline(ch),
                inverted,
            ),
            CharSet::Illegal => self.fill_illegal(out, plane, inverted),
            CharSet::ControlAndFormat if plane == 14 => {
                out.fill(0);
                set_bit(out, 0x01);
                for within in 0x20..=0x7F {
                    set_bit(out, within);
                }
                if inverted {
                    invert(out);
                }
                classify(out)
            }
            other => self.fill_stored(out, other, plane, inverted),
        }
    }

    fn fill_synthesized(
        &self,
        out: &mut [u8; PLANE_BITMAP_SIZE],
        plane: u32,
        member: impl Fn(CodePoint) -> bool,
        inverted: bool,
    ) -> BitmapFill {
        out.fill(0);
        if plane == 0 {
            // All synthesized members live in the BMP; enumerate the
            // candidate blocks rather than the whole plane.
            for ch in (0x0000..=0x3000).filter(|&ch| member(ch)) {
                set_bit(out, ch);
            }
        }
        if inverted {
            invert(out);
        }
        classify(out)
    }

    fn fill_illegal(
        &self,
        out: &mut [u8; PLANE_BITMAP_SIZE],
        plane: u32,
        inverted: bool,
    ) -> BitmapFill {
        match plane {
            14 => {
                out.fill(0xFF);
                let clear = |out: &mut [u8; PLANE_BITMAP_SIZE], within: u32| {
                    let bit = within as usize;
                    out[bit >> 3] &= !(1 << (bit & 7));
                };
                clear(out, 0x01);
                for within in 0x20..=0x7F {
                    clear(out, within);
                }
            }
            15 | 16 => {
                out.fill(0);
                set_bit(out, 0xFFFE);
                set_bit(out, 0xFFFF);
            }
            plane if (plane as usize) < PLANE_COUNT => {
                let set = CharSet::Illegal
                    .bitmap_slot()
                    .and_then(|slot| self.bitmaps().and_then(|store| store.set(slot)));
                let Some(set) = set else {
                    // No legality data at all: cannot classify.
                    out.fill(0);
                    if inverted {
                        invert(out);
                    }
                    return classify(out);
                };
                match set.plane(plane as usize) {
                    Some(bitmap) => {
                        // Stored polarity is "legal"; members of the
                        // illegal set are the complement.
                        for (dst, &src) in out.iter_mut().zip(bitmap) {
                            *dst = !src;
                        }
                    }
                    None => out.fill(0xFF),
                }
            }
            _ => out.fill(0xFF),
        }
        if inverted {
            invert(out);
        }
        classify(out)
    }

    fn fill_stored(
        &self,
        out: &mut [u8; PLANE_BITMAP_SIZE],
        set: CharSet,
        plane: u32,
        inverted: bool,
    ) -> BitmapFill {
        let stored = set.bitmap_slot().and_then(|slot| {
            self.bitmaps()
                .and_then(|store| store.set(slot))
                .and_then(|s| s.plane(plane as usize))
        });
        match stored {
            Some(bitmap) if (plane as usize) < PLANE_COUNT => {
                out.copy_from_slice(bitmap)
            }
            _ => out.fill(0),
        }
        if inverted {
            invert(out);
        }
        classify(out)
    }

    /// Number of planes a caller must iterate to cover this set.
    pub fn number_of_planes(&self, set: CharSet) -> u32 {
        match set.resolve_alias() {
            CharSet::Whitespace | CharSet::Newline | CharSet::WhitespaceAndNewline => 1,
            // Planes 14..=16 are synthesized even without stored data.
            CharSet::Illegal | CharSet::ControlAndFormat => PLANE_COUNT as u32,
            other => {
                let stored = other
                    .bitmap_slot()
                    .and_then(|slot| self.bitmaps().and_then(|store| store.set(slot)))
                    .map(|set| set.num_planes())
                    .unwrap_or(0);
                stored.max(1) as u32
            }
        }
    }
}
