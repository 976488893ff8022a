// precompose.rs - Canonical composition: (base, combining) -> composed.
//
// Two-stage search. The primary table is keyed by the combining
// character; its value points at a base-keyed secondary table inside the
// kind's extra area. Secondary entries are (u16, u16) pairs for BMP
// destinations and (u32, u32) pairs when any participant is above
// U+FFFF, both sorted by base. Hangul syllables compose arithmetically
// and are the caller's concern, not this table's.

use crate::data::UnicodeData;
use crate::mapping::MappingKind;
use crate::resource::{read_u16_at, read_u32_at};
use crate::types::CodePoint;

const BMP_ENTRY_SIZE: usize = 4;
const SUPPLEMENTARY_ENTRY_SIZE: usize = 8;

fn search_bmp(entries: &[u8], count: usize, base: CodePoint) -> Option<CodePoint> {
    let mut lo = 0usize;
    let mut hi = count;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let key = read_u16_at(entries, mid * BMP_ENTRY_SIZE)? as CodePoint;
        match key.cmp(&base) {
            std::cmp::Ordering::Less => lo = mid + 1,
            std::cmp::Ordering::Greater => hi = mid,
            std::cmp::Ordering::Equal => {
                return read_u16_at(entries, mid * BMP_ENTRY_SIZE + 2).map(CodePoint::from)
            }
        }
    }
    None
}

fn search_supplementary(entries: &[u8], count: usize, base: CodePoint) -> Option<CodePoint> {
    let mut lo = 0usize;
    let mut hi = count;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let key = read_u32_at(entries, mid * SUPPLEMENTARY_ENTRY_SIZE)?;
        match key.cmp(&base) {
            std::cmp::Ordering::Less => lo = mid + 1,
            std::cmp::Ordering::Greater => hi = mid,
            std::cmp::Ordering::Equal => {
                return read_u32_at(entries, mid * SUPPLEMENTARY_ENTRY_SIZE + 4)
            }
        }
    }
    None
}

impl UnicodeData {
    /// The canonical composition of `base` followed by `combining`, or
    /// `None` when the pair does not compose.
    pub fn precompose(&self, base: CodePoint, combining: CodePoint) -> Option<CodePoint> {
        let store = self.mappings()?;
        let table = store.table(MappingKind::CanonicalPrecompose);
        let raw = table.lookup(combining).filter(|&raw| raw != 0)?;

        let offset = (raw & 0xFFFF) as usize;
        let count = ((raw >> 16) & 0x7FFF) as usize;
        let non_bmp = raw & (1 << 31) != 0;

        let entry_size = if non_bmp {
            SUPPLEMENTARY_ENTRY_SIZE
        } else {
            BMP_ENTRY_SIZE
        };
        let entries = table.extra().get(offset..offset + count * entry_size)?;
        if non_bmp {
            search_supplementary(entries, count, base)
        } else {
            search_bmp(entries, count, base)
        }
    }
}
