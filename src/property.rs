// property.rs - Per-character property tables: canonical combining
// class and bidirectional category.
//
// Each property is a two-level trie per plane: the first 256-byte page
// indexes by the middle byte of the code point, remaining pages hold
// values indexed by `(index_byte << 8) | low_byte`. An index byte of 0
// (combining class) or a literal category value (bidi) answers without
// touching a value page, which keeps the common all-default rows to one
// byte of index each.

use crate::data::UnicodeData;
use crate::error::DataError;
use crate::resource::{ByteReader, ResourceName};
use crate::types::{plane_of, BidiCategory, CodePoint, BIDI_LITERAL_MAX, PLANE_COUNT};

const PAGE_SIZE: usize = 256;
const KIND_COUNT: usize = 2;

// === Per-property plane tries ===

#[derive(Debug)]
pub(crate) struct PropertyTable {
    planes: Vec<Option<&'static [u8]>>,
}

impl PropertyTable {
    fn parse(span: &'static [u8], resource: ResourceName) -> Result<PropertyTable, DataError> {
        let mut reader = ByteReader::new(span, resource);
        let plane_count = reader.read_u8()? as usize;
        if plane_count > PLANE_COUNT {
            return Err(DataError::Malformed {
                resource,
                reason: "property plane count out of range",
            });
        }
        let sizes = reader.take(plane_count)?;
        let mut planes = Vec::with_capacity(plane_count);
        for &pages in sizes {
            if pages == 0 {
                planes.push(None);
                continue;
            }
            planes.push(Some(reader.take(pages as usize * PAGE_SIZE)?));
        }
        Ok(PropertyTable { planes })
    }

    /// Raw property byte for `ch`, or `None` when the index page maps
    /// the row to the default.
    fn lookup(&self, ch: CodePoint, literal_max: u8) -> Option<u8> {
        let plane = self.planes.get(plane_of(ch) as usize).copied().flatten()?;
        let index_byte = plane[(ch as usize >> 8) & 0xFF];
        if index_byte <= literal_max {
            if index_byte == 0 && literal_max == 0 {
                return None;
            }
            return Some(index_byte);
        }
        plane
            .get(((index_byte as usize) << 8) | (ch as usize & 0xFF))
            .copied()
    }
}

// === Store ===

#[derive(Debug)]
pub struct PropertyStore {
    combining: PropertyTable,
    bidi: PropertyTable,
}

impl PropertyStore {
    pub(crate) fn parse(data: &'static [u8]) -> Result<PropertyStore, DataError> {
        let resource = ResourceName::Properties;
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
        if kind_count < KIND_COUNT {
            return Err(DataError::Malformed {
                resource,
                reason: "fewer property kinds than the engine consumes",
            });
        }

        let mut lengths = Vec::with_capacity(kind_count);
        for _ in 0..kind_count {
            lengths.push(reader.read_u32()? as usize);
        }

        let combining = PropertyTable::parse(reader.take(lengths[0])?, resource)?;
        let bidi = PropertyTable::parse(reader.take(lengths[1])?, resource)?;
        Ok(PropertyStore { combining, bidi })
    }

    pub(crate) fn combining_class(&self, ch: CodePoint) -> u8 {
        self.combining.lookup(ch, 0).unwrap_or(0)
    }

    pub(crate) fn bidi_category(&self, ch: CodePoint) -> BidiCategory {
        match self.bidi.lookup(ch, BIDI_LITERAL_MAX) {
            Some(value) => BidiCategory::from_byte(value),
            None => BidiCategory::LeftToRight,
        }
    }
}

// === Engine accessors ===

impl UnicodeData {
    /// Canonical combining class of `ch` (0 for starters and for any
    /// character outside the loaded tables).
    pub fn combining_class(&self, ch: CodePoint) -> u8 {
        self.properties()
            .map(|store| store.combining_class(ch))
            .unwrap_or(0)
    }

    /// Bidirectional category of `ch`, defaulting to left-to-right when
    /// the tables are absent or the character is not covered.
    pub fn bidi_category(&self, ch: CodePoint) -> BidiCategory {
        self.properties()
            .map(|store| store.bidi_category(ch))
            .unwrap_or(BidiCategory::LeftToRight)
    }
}
