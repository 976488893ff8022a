// resource.rs - Table loader: named binary resources and the
// bounds-checked big-endian cursor used to parse them.
//
// Pure data-layout concerns; no Unicode semantics live here.

use crate::error::DataError;

// === Resource names ===

/// The three binary resources consumed by the engine. Any other name is
/// a caller error and reported as "not found", never a crash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceName {
    /// Per-set, per-plane membership bitmaps.
    CharacterSets,
    /// Case and decomposition mapping tables.
    Mappings,
    /// Combining-class and bidi-category tables.
    Properties,
}

impl ResourceName {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceName::CharacterSets => "character-sets",
            ResourceName::Mappings => "mappings",
            ResourceName::Properties => "properties",
        }
    }
}

// === Resource provider ===

/// Source of the binary table resources, supplied by the embedding
/// environment. Returned spans must live for the process lifetime; the
/// stores keep zero-copy views into them and never free them.
pub trait ResourceProvider: Send + Sync {
    fn load(&self, name: ResourceName) -> Option<&'static [u8]>;
}

/// Provider over statically embedded (or leaked) byte spans.
#[derive(Default)]
pub struct StaticResources {
    pub character_sets: Option<&'static [u8]>,
    pub mappings: Option<&'static [u8]>,
    pub properties: Option<&'static [u8]>,
}

impl ResourceProvider for StaticResources {
    fn load(&self, name: ResourceName) -> Option<&'static [u8]> {
        match name {
            ResourceName::CharacterSets => self.character_sets,
            ResourceName::Mappings => self.mappings,
            ResourceName::Properties => self.properties,
        }
    }
}

// === Byte reader ===

/// Forward-only cursor over a resource span. All multi-byte reads are
/// big-endian; every read is bounds-checked and reports the failing
/// offset.
pub(crate) struct ByteReader {
    data: &'static [u8],
    pos: usize,
    resource: ResourceName,
}

impl ByteReader {
    pub(crate) fn new(data: &'static [u8], resource: ResourceName) -> ByteReader {
        ByteReader {
            data,
            pos: 0,
            resource,
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn truncated(&self) -> DataError {
        DataError::Truncated {
            resource: self.resource,
            offset: self.pos,
        }
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, DataError> {
        let byte = *self.data.get(self.pos).ok_or_else(|| self.truncated())?;
        self.pos += 1;
        Ok(byte)
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32, DataError> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Consume `len` bytes and return the span, still borrowing the
    /// original resource.
    pub(crate) fn take(&mut self, len: usize) -> Result<&'static [u8], DataError> {
        let end = self.pos.checked_add(len).ok_or_else(|| self.truncated())?;
        let span = self.data.get(self.pos..end).ok_or_else(|| self.truncated())?;
        self.pos = end;
        Ok(span)
    }

    pub(crate) fn skip(&mut self, len: usize) -> Result<(), DataError> {
        self.take(len).map(|_| ())
    }
}

// === Standalone big-endian reads ===
// For table views that index into an already-taken span.

#[inline]
pub(crate) fn read_u16_at(span: &[u8], offset: usize) -> Option<u16> {
    let bytes = span.get(offset..offset + 2)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

#[inline]
pub(crate) fn read_u32_at(span: &[u8], offset: usize) -> Option<u32> {
    let bytes = span.get(offset..offset + 4)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
