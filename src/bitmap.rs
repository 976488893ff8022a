// bitmap.rs - Bitmap set store: per-set, per-plane membership bitmaps
// parsed from the character-sets resource.
//
// Layout: 4 version bytes, a big-endian header size, then one
// (offset, size) pair per set slot. A set's payload is a run of
// 8193-byte segments: an 8192-byte plane bitmap plus a marker byte
// naming the next stored plane. The first segment is always plane 0 and
// the final marker names its own plane, so the logical plane count is
// the last payload byte + 1. Absent planes stay `None`; they are never
// materialized as all-zero allocations.

use crate::error::DataError;
use crate::resource::{ByteReader, ResourceName};
use crate::types::{BITMAP_SET_COUNT, PLANE_BITMAP_SIZE, PLANE_COUNT};

const SEGMENT_SIZE: usize = PLANE_BITMAP_SIZE + 1;

// === Per-set plane array ===

#[derive(Debug)]
pub(crate) struct BitmapSet {
    planes: Vec<Option<&'static [u8]>>,
}

impl BitmapSet {
    /// Logical plane count (highest populated plane + 1).
    pub(crate) fn num_planes(&self) -> usize {
        self.planes.len()
    }

    /// The 8192-byte bitmap for `plane`, or `None` when the plane is
    /// absent or out of range.
    pub(crate) fn plane(&self, plane: usize) -> Option<&'static [u8]> {
        self.planes.get(plane).copied().flatten()
    }
}

// === Store ===

#[derive(Debug)]
pub struct BitmapStore {
    version: String,
    sets: Vec<BitmapSet>,
}

impl BitmapStore {
    pub(crate) fn parse(data: &'static [u8]) -> Result<BitmapStore, DataError> {
        let resource = ResourceName::CharacterSets;
        let mut reader = ByteReader::new(data, resource);

        let version_bytes = reader.take(4)?;
        let version = format_version(version_bytes);

        let header_size = reader.read_u32()? as usize;
        if header_size % 8 != 0 {
            return Err(DataError::Malformed {
                resource,
                reason: "header size not a multiple of 8",
            });
        }
        let set_count = header_size / 8;
        if set_count < BITMAP_SET_COUNT {
            return Err(DataError::Malformed {
                resource,
                reason: "fewer set slots than the engine consumes",
            });
        }

        let mut directory = Vec::with_capacity(set_count);
        for _ in 0..set_count {
            let offset = reader.read_u32()? as usize;
            let size = reader.read_u32()? as usize;
            directory.push((offset, size));
        }

        let payload_base = reader.position();
        let payload = reader.take(reader.remaining())?;

        let mut sets = Vec::with_capacity(set_count);
        for (offset, size) in directory {
            sets.push(Self::parse_set(payload, payload_base, offset, size)?);
        }

        Ok(BitmapStore { version, sets })
    }

    fn parse_set(
        payload: &'static [u8],
        payload_base: usize,
        offset: usize,
        size: usize,
    ) -> Result<BitmapSet, DataError> {
        let resource = ResourceName::CharacterSets;
        if size == 0 {
            return Ok(BitmapSet { planes: Vec::new() });
        }
        if size % SEGMENT_SIZE != 0 {
            return Err(DataError::Malformed {
                resource,
                reason: "set payload not a whole number of plane segments",
            });
        }
        let span = payload
            .get(offset..offset + size)
            .ok_or(DataError::Truncated {
                resource,
                offset: payload_base + offset,
            })?;

        let stored = size / SEGMENT_SIZE;
        let num_planes = span[size - 1] as usize + 1;
        if num_planes > PLANE_COUNT || stored > num_planes {
            return Err(DataError::Malformed {
                resource,
                reason: "plane marker out of range",
            });
        }

        let mut planes: Vec<Option<&'static [u8]>> = vec![None; num_planes];
        let mut plane_index = 0;
        let mut pos = 0;
        for _ in 0..stored {
            if plane_index >= num_planes || planes[plane_index].is_some() {
                return Err(DataError::Malformed {
                    resource,
                    reason: "plane marker chain broken",
                });
            }
            planes[plane_index] = Some(&span[pos..pos + PLANE_BITMAP_SIZE]);
            pos += PLANE_BITMAP_SIZE;
            plane_index = span[pos] as usize;
            pos += 1;
        }

        Ok(BitmapSet { planes })
    }

    /// Dotted version string of the table snapshot the bitmaps were
    /// compiled from.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub(crate) fn set(&self, slot: usize) -> Option<&BitmapSet> {
        self.sets.get(slot)
    }
}

/// Format up to four numeric version components, dropping trailing
/// zeros but always keeping major.minor.
fn format_version(components: &[u8]) -> String {
    let mut last = components.len();
    while last > 2 && components[last - 1] == 0 {
        last -= 1;
    }
    components[..last]
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(".")
}
