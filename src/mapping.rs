// mapping.rs - Case and decomposition mapping store: seven sorted
// (key, value) pair tables plus their extra expansion areas, parsed
// zero-copy from the mappings resource.
//
// Values pack the result into 32 bits: bits 0..24 carry either the
// mapped code point (single-unit result) or an element index into the
// kind's extra array, bits 24..29 the output length in code units,
// bit 29 marks extra entries above U+FFFF, bit 30 marks a decomposition
// whose first character must itself be decomposed again. A raw value of
// 0 means the key has no mapping.

use crate::error::DataError;
use crate::resource::{read_u32_at, ByteReader, ResourceName};
use crate::types::CodePoint;

const PAIR_SIZE: usize = 8;

// === Kinds ===

/// The seven mapping tables, in resource directory order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MappingKind {
    ToLower = 0,
    ToUpper,
    ToTitle,
    CaseFold,
    CanonicalDecompose,
    CanonicalPrecompose,
    CompatibilityDecompose,
}

pub(crate) const MAPPING_KIND_COUNT: usize = 7;

// === Packed values ===

/// Decoded form of a packed mapping value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MappingValue {
    /// Mapped code point when `count == 1`, else an element index into
    /// the extra array.
    pub payload: u32,
    /// Output length in code units.
    pub count: usize,
    /// Extra entries are full code points above U+FFFF.
    pub non_bmp: bool,
    /// The first produced character decomposes further.
    pub recursive: bool,
}

impl MappingValue {
    pub(crate) fn decode(raw: u32) -> MappingValue {
        MappingValue {
            payload: raw & 0x00FF_FFFF,
            count: ((raw >> 24) & 0x1F) as usize,
            non_bmp: raw & (1 << 29) != 0,
            recursive: raw & (1 << 30) != 0,
        }
    }
}

// === Pair tables ===

/// One kind's sorted pair table and its extra expansion area.
#[derive(Debug)]
pub(crate) struct PairTable {
    pairs: &'static [u8],
    extra: &'static [u8],
}

impl PairTable {
    /// Binary search by key. Returns the raw packed value.
    pub(crate) fn lookup(&self, key: CodePoint) -> Option<u32> {
        let mut lo = 0usize;
        let mut hi = self.pairs.len() / PAIR_SIZE;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let entry = read_u32_at(self.pairs, mid * PAIR_SIZE)?;
            match entry.cmp(&key) {
                std::cmp::Ordering::Less => lo = mid + 1,
                std::cmp::Ordering::Greater => hi = mid,
                std::cmp::Ordering::Equal => {
                    return read_u32_at(self.pairs, mid * PAIR_SIZE + 4)
                }
            }
        }
        None
    }

    /// Element `index` of the extra code-point array.
    pub(crate) fn extra_code_point(&self, index: usize) -> Option<CodePoint> {
        read_u32_at(self.extra, index * 4)
    }

    /// The raw extra area (precompose keeps secondary tables here).
    pub(crate) fn extra(&self) -> &'static [u8] {
        self.extra
    }
}

// === Store ===

#[derive(Debug)]
pub struct MappingStore {
    tables: Vec<PairTable>,
}

impl MappingStore {
    pub(crate) fn parse(data: &'static [u8]) -> Result<MappingStore, DataError> {
        let resource = ResourceName::Mappings;
        let mut reader = ByteReader::new(data, resource);

        reader.skip(4)?; // version bytes, unused here
        let header_size = reader.read_u32()? as usize;
        if header_size % 4 != 0 {
            return Err(DataError::Malformed {
                resource,
                reason: "header size not a multiple of 4",
            });
        }
        let kind_count = header_size / 4;
        if kind_count < MAPPING_KIND_COUNT {
            return Err(DataError::Malformed {
                resource,
                reason: "fewer mapping kinds than the engine consumes",
            });
        }

        let mut offsets = Vec::with_capacity(kind_count);
        for _ in 0..kind_count {
            offsets.push(reader.read_u32()? as usize);
        }

        let body_base = reader.position();
        let body = reader.take(reader.remaining())?;

        let mut tables = Vec::with_capacity(MAPPING_KIND_COUNT);
        for &offset in offsets.iter().take(MAPPING_KIND_COUNT) {
            tables.push(Self::parse_kind(body, body_base, offset)?);
        }
        Ok(MappingStore { tables })
    }

    fn parse_kind(
        body: &'static [u8],
        body_base: usize,
        offset: usize,
    ) -> Result<PairTable, DataError> {
        let resource = ResourceName::Mappings;
        let truncated = |at: usize| DataError::Truncated {
            resource,
            offset: body_base + at,
        };

        let pair_bytes = read_u32_at(body, offset).ok_or_else(|| truncated(offset))? as usize;
        if pair_bytes % PAIR_SIZE != 0 {
            return Err(DataError::Malformed {
                resource,
                reason: "pair table not a whole number of entries",
            });
        }
        let pairs_start = offset + 4;
        let pairs = body
            .get(pairs_start..pairs_start + pair_bytes)
            .ok_or_else(|| truncated(pairs_start))?;

        let extra_len_at = pairs_start + pair_bytes;
        let extra_bytes =
            read_u32_at(body, extra_len_at).ok_or_else(|| truncated(extra_len_at))? as usize;
        let extra_start = extra_len_at + 4;
        let extra = body
            .get(extra_start..extra_start + extra_bytes)
            .ok_or_else(|| truncated(extra_start))?;

        Ok(PairTable { pairs, extra })
    }

    pub(crate) fn table(&self, kind: MappingKind) -> &PairTable {
        &self.tables[kind as usize]
    }
}
