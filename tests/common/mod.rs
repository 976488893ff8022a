// common/mod.rs - Shared fixture: builders for the three binary table
// resources and a curated miniature character database exercising every
// engine path (case tables, recursive decompositions, precompositions,
// combining classes, set bitmaps across planes).

#![allow(dead_code)]

use std::collections::BTreeMap;

use ucdb::prelude::*;

pub const PLANE_BITMAP_SIZE: usize = 8192;
const PAGE_SIZE: usize = 256;
const SET_COUNT: usize = 21;
const MAPPING_KIND_COUNT: usize = 7;

pub fn leak(bytes: Vec<u8>) -> &'static [u8] {
    Box::leak(bytes.into_boxed_slice())
}

// === Character-set bitmap building ===

#[derive(Default, Clone)]
pub struct SetBits {
    planes: BTreeMap<u32, Box<[u8; PLANE_BITMAP_SIZE]>>,
}

impl SetBits {
    pub fn new() -> SetBits {
        SetBits::default()
    }

    fn plane_mut(&mut self, plane: u32) -> &mut [u8; PLANE_BITMAP_SIZE] {
        self.planes
            .entry(plane)
            .or_insert_with(|| Box::new([0u8; PLANE_BITMAP_SIZE]))
    }

    pub fn set(&mut self, ch: u32) {
        let bit = (ch & 0xFFFF) as usize;
        self.plane_mut(ch >> 16)[bit >> 3] |= 1 << (bit & 7);
    }

    pub fn set_all(&mut self, chars: &[u32]) {
        for &ch in chars {
            self.set(ch);
        }
    }

    pub fn set_range(&mut self, lo: u32, hi: u32) {
        for ch in lo..=hi {
            self.set(ch);
        }
    }

    pub fn clear(&mut self, ch: u32) {
        let bit = (ch & 0xFFFF) as usize;
        self.plane_mut(ch >> 16)[bit >> 3] &= !(1 << (bit & 7));
    }

    pub fn fill_plane(&mut self, plane: u32, byte: u8) {
        self.plane_mut(plane).fill(byte);
    }
}

/// Assemble the character-sets resource from 21 set slots. Sets with
/// any stored plane always store plane 0 (the marker chain starts
/// there).
pub fn build_character_sets(sets: &[SetBits; SET_COUNT]) -> Vec<u8> {
    let mut payloads: Vec<Vec<u8>> = Vec::with_capacity(SET_COUNT);
    for set in sets.iter() {
        let mut payload = Vec::new();
        if !set.planes.is_empty() {
            let mut planes = set.planes.clone();
            planes
                .entry(0)
                .or_insert_with(|| Box::new([0u8; PLANE_BITMAP_SIZE]));
            let keys: Vec<u32> = planes.keys().copied().collect();
            for (i, key) in keys.iter().enumerate() {
                payload.extend_from_slice(&planes[key][..]);
                let marker = if i + 1 < keys.len() {
                    keys[i + 1]
                } else {
                    *key
                };
                payload.push(marker as u8);
            }
        }
        payloads.push(payload);
    }

    let mut blob = vec![16, 0, 0, 0]; // database version 16.0
    blob.extend(((SET_COUNT * 8) as u32).to_be_bytes());
    let mut offset = 0u32;
    for payload in &payloads {
        blob.extend(offset.to_be_bytes());
        blob.extend((payload.len() as u32).to_be_bytes());
        offset += payload.len() as u32;
    }
    for payload in &payloads {
        blob.extend(payload);
    }
    blob
}

// Set slot numbers inside the bitmap resource.
pub const SLOT_CONTROL_AND_FORMAT: usize = 0;
pub const SLOT_DECIMAL_DIGIT: usize = 1;
pub const SLOT_LETTER: usize = 2;
pub const SLOT_LOWERCASE: usize = 3;
pub const SLOT_UPPERCASE: usize = 4;
pub const SLOT_NON_BASE: usize = 5;
pub const SLOT_CANONICAL_DECOMPOSABLE: usize = 6;
pub const SLOT_COMPATIBILITY_DECOMPOSABLE: usize = 7;
pub const SLOT_ALPHANUMERIC: usize = 8;
pub const SLOT_PUNCTUATION: usize = 9;
pub const SLOT_LEGAL: usize = 10;
pub const SLOT_TITLECASE: usize = 11;
pub const SLOT_SYMBOL: usize = 12;
pub const SLOT_HFS_PLUS_DECOMPOSABLE: usize = 13;
pub const SLOT_STRONG_RTL: usize = 14;
pub const SLOT_CASE_IGNORABLE: usize = 15;
pub const SLOT_GRAPHEME_EXTEND: usize = 16;
pub const SLOT_HAS_NON_SELF_LOWER: usize = 17;
pub const SLOT_HAS_NON_SELF_UPPER: usize = 18;
pub const SLOT_HAS_NON_SELF_TITLE: usize = 19;
pub const SLOT_HAS_NON_SELF_FOLD: usize = 20;

// === Mapping resource building ===

/// Packed case/decomposition value: single-unit inline result.
pub fn inline_value(result: u32) -> u32 {
    (1 << 24) | result
}

/// Packed value pointing at `count` code units starting at extra
/// element `index`.
pub fn extra_value(index: usize, count: usize, non_bmp: bool, recursive: bool) -> u32 {
    let mut value = ((count as u32) << 24) | index as u32;
    if non_bmp {
        value |= 1 << 29;
    }
    if recursive {
        value |= 1 << 30;
    }
    value
}

/// Singleton mapping that must be re-decomposed (the replacement is
/// carried inline).
pub fn recursive_singleton(result: u32) -> u32 {
    (1 << 30) | (1 << 24) | result
}

/// Encode one mapping kind block. `pairs` must be sorted by key.
pub fn encode_kind(pairs: &[(u32, u32)], extra: &[u8]) -> Vec<u8> {
    let mut block = Vec::new();
    block.extend(((pairs.len() * 8) as u32).to_be_bytes());
    for &(key, value) in pairs {
        block.extend(key.to_be_bytes());
        block.extend(value.to_be_bytes());
    }
    block.extend((extra.len() as u32).to_be_bytes());
    block.extend(extra);
    block
}

pub fn code_point_extra(chars: &[u32]) -> Vec<u8> {
    let mut extra = Vec::with_capacity(chars.len() * 4);
    for &ch in chars {
        extra.extend(ch.to_be_bytes());
    }
    extra
}

/// Precompose primary value: byte offset and entry count into the
/// secondary area.
pub fn precompose_value(offset: usize, count: usize, non_bmp: bool) -> u32 {
    (offset as u32) | ((count as u32) << 16) | if non_bmp { 1 << 31 } else { 0 }
}

pub fn bmp_secondary(entries: &[(u16, u16)]) -> Vec<u8> {
    let mut out = Vec::new();
    for &(base, composed) in entries {
        out.extend(base.to_be_bytes());
        out.extend(composed.to_be_bytes());
    }
    out
}

pub fn supplementary_secondary(entries: &[(u32, u32)]) -> Vec<u8> {
    let mut out = Vec::new();
    for &(base, composed) in entries {
        out.extend(base.to_be_bytes());
        out.extend(composed.to_be_bytes());
    }
    out
}

/// Assemble the mappings resource from its seven kind blocks.
pub fn build_mappings(kinds: [Vec<u8>; MAPPING_KIND_COUNT]) -> Vec<u8> {
    let mut blob = vec![16, 0, 0, 0];
    blob.extend(((MAPPING_KIND_COUNT * 4) as u32).to_be_bytes());
    let mut offset = 0u32;
    for kind in &kinds {
        blob.extend(offset.to_be_bytes());
        offset += kind.len() as u32;
    }
    for kind in &kinds {
        blob.extend(kind);
    }
    blob
}

// === Property resource building ===

/// Build one property trie body. `values` carry per-code-point bytes
/// stored through value pages numbered from `min_page`; `literal_rows`
/// store a value directly in the index byte for a whole 256-point row
/// (keyed by any code point in that row).
pub fn build_property_trie(values: &[(u32, u8)], literal_rows: &[(u32, u8)], min_page: u8) -> Vec<u8> {
    #[derive(Default)]
    struct Plane {
        rows: BTreeMap<u8, Vec<(u8, u8)>>,
        literals: BTreeMap<u8, u8>,
    }
    let mut planes: BTreeMap<u32, Plane> = BTreeMap::new();
    for &(ch, value) in values {
        let plane = planes.entry(ch >> 16).or_default();
        plane
            .rows
            .entry(((ch >> 8) & 0xFF) as u8)
            .or_default()
            .push(((ch & 0xFF) as u8, value));
    }
    for &(ch, value) in literal_rows {
        planes
            .entry(ch >> 16)
            .or_default()
            .literals
            .insert(((ch >> 8) & 0xFF) as u8, value);
    }

    let plane_count = planes.keys().next_back().map(|&p| p + 1).unwrap_or(0);
    let mut sizes = vec![0u8; plane_count as usize];
    let mut data = Vec::new();
    for (&plane_index, plane) in &planes {
        let page_count = min_page as usize + plane.rows.len();
        let mut pages = vec![0u8; page_count * PAGE_SIZE];
        for (&row, &value) in &plane.literals {
            pages[row as usize] = value;
        }
        for (i, (&row, entries)) in plane.rows.iter().enumerate() {
            let page = min_page as usize + i;
            pages[row as usize] = page as u8;
            for &(low, value) in entries {
                pages[page * PAGE_SIZE + low as usize] = value;
            }
        }
        sizes[plane_index as usize] = page_count as u8;
        data.extend(pages);
    }

    let mut body = vec![plane_count as u8];
    body.extend(sizes);
    body.extend(data);
    body
}

/// Assemble the properties resource from the two trie bodies.
pub fn build_properties(combining: Vec<u8>, bidi: Vec<u8>) -> Vec<u8> {
    let mut blob = vec![16, 0, 0, 0];
    blob.extend(8u32.to_be_bytes());
    blob.extend((combining.len() as u32).to_be_bytes());
    blob.extend((bidi.len() as u32).to_be_bytes());
    blob.extend(combining);
    blob.extend(bidi);
    blob
}

// === Curated fixture ===

/// A miniature character database: a handful of Latin, Greek, Turkish,
/// and Deseret characters plus the combining marks and Hangul block
/// needed to exercise every engine path.
pub fn fixture_engine() -> UnicodeData {
    UnicodeData::new(StaticResources {
        character_sets: Some(leak(fixture_character_sets())),
        mappings: Some(leak(fixture_mappings())),
        properties: Some(leak(fixture_properties())),
    })
}

fn fixture_character_sets() -> Vec<u8> {
    let mut sets: [SetBits; SET_COUNT] = Default::default();

    sets[SLOT_CONTROL_AND_FORMAT].set_range(0x00, 0x1F);
    sets[SLOT_CONTROL_AND_FORMAT].set(0x7F);

    sets[SLOT_DECIMAL_DIGIT].set_range(0x30, 0x39);

    sets[SLOT_LETTER].set_all(&[
        0x41, 0x45, 0x49, 0x4A, 0x55, 0x5A, 0x61, 0x65, 0x66, 0x69, 0x6A, 0x75, 0x7A, 0xC5,
        0xC9, 0xCC, 0xDC, 0xDF, 0xE9, 0x128, 0x12E, 0x12F, 0x130, 0x131, 0x17D, 0x1C4, 0x1D5,
        0x212B, 0x391, 0x3A3, 0x3C2, 0x3C3, 0x5D0, 0xFB01, 0x10400, 0x10428,
    ]);

    sets[SLOT_LOWERCASE].set_all(&[
        0x61, 0x65, 0x66, 0x69, 0x6A, 0x75, 0x7A, 0xDF, 0xE9, 0x12F, 0x131, 0x3C2, 0x3C3,
        0x10428,
    ]);
    sets[SLOT_UPPERCASE].set_all(&[
        0x41, 0x45, 0x49, 0x4A, 0x55, 0x5A, 0xC5, 0xC9, 0xCC, 0xDC, 0x128, 0x12E, 0x130,
        0x17D, 0x1C4, 0x1D5, 0x212B, 0x391, 0x3A3, 0x10400,
    ]);

    sets[SLOT_NON_BASE].set_all(&[0x300, 0x301, 0x303, 0x304, 0x307, 0x308, 0x30A, 0x30C, 0x316, 0x344, 0x345]);

    sets[SLOT_CANONICAL_DECOMPOSABLE]
        .set_all(&[0xC5, 0xC9, 0xCC, 0xDC, 0xE9, 0x17D, 0x1D5, 0x212B, 0x344]);
    sets[SLOT_CANONICAL_DECOMPOSABLE].set_range(0xAC00, 0xD7A3);

    sets[SLOT_COMPATIBILITY_DECOMPOSABLE].set_all(&[0x1C4, 0xFB01]);

    sets[SLOT_ALPHANUMERIC].set_range(0x30, 0x39);
    sets[SLOT_ALPHANUMERIC].set_all(&[0x41, 0x45, 0x49, 0x55, 0x5A, 0x61, 0x65, 0x69, 0x75, 0x7A]);

    sets[SLOT_PUNCTUATION].set_all(&[0x21, 0x2C, 0x2E, 0x3F]);

    // Stored with legal polarity: planes 0 and 1 are legal except the
    // trailing and interchange noncharacters.
    sets[SLOT_LEGAL].fill_plane(0, 0xFF);
    for ch in 0xFDD0..=0xFDEF {
        sets[SLOT_LEGAL].clear(ch);
    }
    sets[SLOT_LEGAL].clear(0xFFFE);
    sets[SLOT_LEGAL].clear(0xFFFF);
    sets[SLOT_LEGAL].fill_plane(1, 0xFF);
    sets[SLOT_LEGAL].clear(0x1FFFE);
    sets[SLOT_LEGAL].clear(0x1FFFF);

    sets[SLOT_TITLECASE].set(0x1C5);

    sets[SLOT_SYMBOL].set_all(&[0x2B, 0x3C, 0x3D, 0x3E]);

    // HFS+ excludes the Ångström sign to keep round trips stable.
    sets[SLOT_HFS_PLUS_DECOMPOSABLE]
        .set_all(&[0xC5, 0xC9, 0xCC, 0xDC, 0xE9, 0x17D, 0x1D5, 0x344]);
    sets[SLOT_HFS_PLUS_DECOMPOSABLE].set_range(0xAC00, 0xD7A3);

    sets[SLOT_STRONG_RTL].set(0x5D0);

    sets[SLOT_CASE_IGNORABLE].set_all(&[0x27, 0x301, 0x307, 0x345]);

    sets[SLOT_GRAPHEME_EXTEND].set_all(&[0x300, 0x301, 0x304, 0x307, 0x308, 0x316, 0x345]);

    sets[SLOT_HAS_NON_SELF_LOWER].set_all(&[0x41, 0x45, 0x49, 0x4A, 0x55, 0x5A, 0xC9, 0x12E, 0x130, 0x17D, 0x391, 0x3A3, 0x10400]);
    sets[SLOT_HAS_NON_SELF_UPPER].set_all(&[0x61, 0x65, 0x69, 0x6A, 0x75, 0x7A, 0xDF, 0xE9, 0x12F, 0x3C2, 0x3C3, 0x10428]);
    sets[SLOT_HAS_NON_SELF_TITLE].set_all(&[0x61, 0xDF]);
    sets[SLOT_HAS_NON_SELF_FOLD].set_all(&[0x41, 0x45, 0x49, 0x55, 0x5A, 0xC9, 0x130, 0x391, 0x3A3, 0xDF, 0x10400]);

    build_character_sets(&sets)
}

fn fixture_mappings() -> Vec<u8> {
    // to-lower: İ carries its combining dot; 𐐀 lowers across planes.
    let lower_extra = code_point_extra(&[0x69, 0x307, 0x10428]);
    let to_lower = encode_kind(
        &[
            (0x41, inline_value(0x61)),
            (0x45, inline_value(0x65)),
            (0x49, inline_value(0x69)),
            (0x4A, inline_value(0x6A)),
            (0x55, inline_value(0x75)),
            (0x5A, inline_value(0x7A)),
            (0xC9, inline_value(0xE9)),
            (0x12E, inline_value(0x12F)),
            (0x130, extra_value(0, 2, false, false)),
            (0x17D, inline_value(0x17E)),
            (0x391, inline_value(0x3B1)),
            (0x3A3, inline_value(0x3C3)),
            (0x10400, extra_value(2, 2, true, false)),
        ],
        &lower_extra,
    );

    // to-upper: ß expands to SS; 𐐨 raises across planes.
    let upper_extra = code_point_extra(&[0x53, 0x53, 0x10400]);
    let to_upper = encode_kind(
        &[
            (0x61, inline_value(0x41)),
            (0x65, inline_value(0x45)),
            (0x69, inline_value(0x49)),
            (0x6A, inline_value(0x4A)),
            (0x75, inline_value(0x55)),
            (0x7A, inline_value(0x5A)),
            (0xDF, extra_value(0, 2, false, false)),
            (0xE9, inline_value(0xC9)),
            (0x12F, inline_value(0x12E)),
            (0x3C2, inline_value(0x3A3)),
            (0x3C3, inline_value(0x3A3)),
            (0x10428, extra_value(2, 2, true, false)),
        ],
        &upper_extra,
    );

    // to-title: only ß has a dedicated form (Ss); everything else
    // falls back to the uppercase table.
    let title_extra = code_point_extra(&[0x53, 0x73]);
    let to_title = encode_kind(&[(0xDF, extra_value(0, 2, false, false))], &title_extra);

    // case-fold: A is deliberately absent, exercising the retry
    // through the to-lower table.
    let fold_extra = code_point_extra(&[0x73, 0x73, 0x69, 0x307]);
    let case_fold = encode_kind(
        &[
            (0xDF, extra_value(0, 2, false, false)),
            (0x130, extra_value(2, 2, false, false)),
            (0x3A3, inline_value(0x3C3)),
        ],
        &fold_extra,
    );

    // canonical decompositions; Ǖ and Å (Ångström) re-expand their
    // first character.
    let canon_extra = code_point_extra(&[
        0x41, 0x30A, // 0: Å
        0x45, 0x301, // 2: É
        0x49, 0x300, // 4: Ì
        0x55, 0x308, // 6: Ü
        0x65, 0x301, // 8: é
        0x5A, 0x30C, // 10: Ž
        0xDC, 0x304, // 12: Ǖ (recursive head)
        0x308, 0x301, // 14: U+0344
    ]);
    let canonical = encode_kind(
        &[
            (0xC5, extra_value(0, 2, false, false)),
            (0xC9, extra_value(2, 2, false, false)),
            (0xCC, extra_value(4, 2, false, false)),
            (0xDC, extra_value(6, 2, false, false)),
            (0xE9, extra_value(8, 2, false, false)),
            (0x17D, extra_value(10, 2, false, false)),
            (0x1D5, extra_value(12, 2, false, true)),
            (0x344, extra_value(14, 2, false, false)),
            (0x212B, recursive_singleton(0xC5)),
        ],
        &canon_extra,
    );

    // canonical precompositions, primary-keyed by the combining mark.
    let mut secondary = Vec::new();
    let grave_offset = secondary.len();
    secondary.extend(bmp_secondary(&[(0x49, 0xCC)]));
    let acute_offset = secondary.len();
    secondary.extend(bmp_secondary(&[(0x45, 0xC9), (0x65, 0xE9)]));
    let diaeresis_offset = secondary.len();
    secondary.extend(bmp_secondary(&[(0x55, 0xDC)]));
    let macron_offset = secondary.len();
    secondary.extend(bmp_secondary(&[(0xDC, 0x1D5)]));
    let ring_offset = secondary.len();
    secondary.extend(bmp_secondary(&[(0x41, 0xC5)]));
    let stem_offset = secondary.len();
    secondary.extend(supplementary_secondary(&[(0x1D157, 0x1D15E)]));
    let precompose = encode_kind(
        &[
            (0x300, precompose_value(grave_offset, 1, false)),
            (0x301, precompose_value(acute_offset, 2, false)),
            (0x304, precompose_value(macron_offset, 1, false)),
            (0x308, precompose_value(diaeresis_offset, 1, false)),
            (0x30A, precompose_value(ring_offset, 1, false)),
            (0x1D165, precompose_value(stem_offset, 1, true)),
        ],
        &secondary,
    );

    // compatibility decompositions: ﬁ ligature and Ǆ, whose second
    // component decomposes canonically.
    let compat_extra = code_point_extra(&[0x66, 0x69, 0x44, 0x17D]);
    let compatibility = encode_kind(
        &[
            (0x1C4, extra_value(2, 2, false, false)),
            (0xFB01, extra_value(0, 2, false, false)),
        ],
        &compat_extra,
    );

    build_mappings([
        to_lower,
        to_upper,
        to_title,
        case_fold,
        canonical,
        precompose,
        compatibility,
    ])
}

fn fixture_properties() -> Vec<u8> {
    let combining = build_property_trie(
        &[
            (0x300, 230),
            (0x301, 230),
            (0x303, 230),
            (0x304, 230),
            (0x307, 230),
            (0x308, 230),
            (0x30A, 230),
            (0x30C, 230),
            (0x316, 220),
            (0x344, 230),
            (0x345, 240),
        ],
        &[],
        1,
    );
    // Bidi value pages must sit above the literal range.
    let bidi = build_property_trie(&[(0x660, 3)], &[(0x5D0, 2)], 19);
    build_properties(combining, bidi)
}
