// decompose.rs - Canonical and compatibility decomposition.
//
// Hangul syllables decompose arithmetically; everything else goes
// through the canonical mapping table, re-expanding the first produced
// character when the value carries the recursive flag. The streaming
// form consumes UTF-16, buffers combining-mark runs, and emits them in
// canonical combining-class order.

use smallvec::SmallVec;

use crate::convert::DestWriter;
use crate::data::UnicodeData;
use crate::mapping::{MappingKind, MappingValue, PairTable};
use crate::types::{
    is_hangul_syllable, is_surrogate, CharSet, CodePoint, CodeUnit, DestFormat,
    HANGUL_JAMO_L_START, HANGUL_JAMO_T_COUNT, HANGUL_JAMO_T_START, HANGUL_JAMO_V_COUNT,
    HANGUL_JAMO_V_START, HANGUL_SYLLABLE_START, MAX_DECOMPOSITION_LENGTH,
};

use crate::casemap::scalar_at;

type PendingBuffer = SmallVec<[CodePoint; MAX_DECOMPOSITION_LENGTH]>;

// === Hangul ===

/// Arithmetic decomposition of a precomposed Hangul syllable into two
/// or three jamo.
fn hangul_decompose(ch: CodePoint, out: &mut [CodePoint]) -> usize {
    let index = ch - HANGUL_SYLLABLE_START;
    let trailing = index % HANGUL_JAMO_T_COUNT;
    let needed = if trailing == 0 { 2 } else { 3 };
    if out.len() < needed {
        return 0;
    }
    out[0] = HANGUL_JAMO_L_START + index / (HANGUL_JAMO_V_COUNT * HANGUL_JAMO_T_COUNT);
    out[1] = HANGUL_JAMO_V_START + (index % (HANGUL_JAMO_V_COUNT * HANGUL_JAMO_T_COUNT))
        / HANGUL_JAMO_T_COUNT;
    if trailing != 0 {
        out[2] = HANGUL_JAMO_T_START + trailing;
    }
    needed
}

// === Table recursion ===

fn recursively_decompose(
    table: &PairTable,
    value: MappingValue,
    out: &mut [CodePoint],
    depth: usize,
) -> usize {
    // A well-formed table bottoms out long before the cap; hitting it
    // means a self-referential entry, reported as no decomposition.
    if depth == 0 {
        return 0;
    }
    if value.count == 0 || value.count > out.len() {
        return 0;
    }
    let first = if value.count == 1 {
        Some(value.payload)
    } else {
        table.extra_code_point(value.payload as usize)
    };
    let Some(first) = first else {
        return 0;
    };
    let tail = value.count - 1;

    let used = if value.recursive {
        match table.lookup(first).filter(|&raw| raw != 0) {
            Some(raw) => {
                let head_room = out.len() - tail;
                let n = recursively_decompose(
                    table,
                    MappingValue::decode(raw),
                    &mut out[..head_room],
                    depth - 1,
                );
                if n == 0 {
                    return 0;
                }
                n
            }
            None => {
                out[0] = first;
                1
            }
        }
    } else {
        out[0] = first;
        1
    };

    if used + tail > out.len() {
        return 0;
    }
    for k in 0..tail {
        let Some(ch) = table.extra_code_point(value.payload as usize + 1 + k) else {
            return 0;
        };
        out[used + k] = ch;
    }
    used + tail
}

// === Streaming status ===

/// Progress report from `decompose_run`. `consumed` counts source
/// UTF-16 units whose output is fully committed; `filled` counts
/// destination units written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecomposeStatus {
    pub consumed: usize,
    pub filled: usize,
    pub complete: bool,
}

// === Engine ===

impl UnicodeData {
    /// Fully decompose one character into `out`, returning the scalar
    /// count (0 when the character has no decomposition or does not
    /// fit).
    pub fn decompose_one(&self, ch: CodePoint, out: &mut [CodePoint]) -> usize {
        if is_hangul_syllable(ch) {
            return hangul_decompose(ch, out);
        }
        let Some(store) = self.mappings() else {
            return 0;
        };
        let table = store.table(MappingKind::CanonicalDecompose);
        let Some(raw) = table.lookup(ch).filter(|&raw| raw != 0) else {
            return 0;
        };
        recursively_decompose(table, MappingValue::decode(raw), out, MAX_DECOMPOSITION_LENGTH)
    }

    /// Stable sort of a buffered run by combining class, leaving the
    /// leading class-0 prefix in place.
    fn priority_sort(&self, chars: &mut [CodePoint]) {
        let start = chars
            .iter()
            .take_while(|&&ch| self.combining_class(ch) == 0)
            .count();
        chars[start..].sort_by_key(|&ch| self.combining_class(ch));
    }

    fn flush_pending(
        &self,
        pending: &mut PendingBuffer,
        writer: &mut DestWriter<'_>,
        needs_reorder: bool,
    ) -> bool {
        if pending.is_empty() {
            return true;
        }
        if needs_reorder && pending.len() > 1 {
            self.priority_sort(pending);
        }
        if !writer.write_all(pending) {
            return false;
        }
        pending.clear();
        true
    }

    /// Decompose a UTF-16 run into `writer`, optionally reordering
    /// combining marks into canonical class order and optionally using
    /// the narrower HFS+ decomposable set. Stops early on a full
    /// destination or (for non-UTF-16 destinations) an unpaired
    /// surrogate, reporting partial progress.
    pub fn decompose_run(
        &self,
        src: &[CodeUnit],
        writer: &mut DestWriter<'_>,
        needs_reorder: bool,
        hfs_plus: bool,
    ) -> DecomposeStatus {
        let set = if hfs_plus {
            CharSet::HfsPlusDecomposable
        } else {
            CharSet::CanonicalDecomposable
        };
        let mut pending = PendingBuffer::new();
        let mut committed = 0usize;
        let mut i = 0usize;
        let mut complete = true;

        while i < src.len() {
            let (ch, len) = scalar_at(src, i);

            // Unpaired surrogates carry through raw UTF-16 only.
            if len == 1 && is_surrogate(src[i]) {
                if !self.flush_pending(&mut pending, writer, needs_reorder) {
                    complete = false;
                    break;
                }
                committed = i;
                if writer.format() != DestFormat::Utf16 || !writer.write_raw_unit(src[i]) {
                    complete = false;
                    break;
                }
                i += 1;
                committed = i;
                continue;
            }

            // ASCII never decomposes and never reorders.
            if ch < 0x80 {
                if !self.flush_pending(&mut pending, writer, needs_reorder) {
                    complete = false;
                    break;
                }
                committed = i;
                if !writer.write_char(ch) {
                    complete = false;
                    break;
                }
                i += 1;
                committed = i;
                continue;
            }

            if needs_reorder && self.is_member(ch, CharSet::NonBase) {
                if pending.len() >= MAX_DECOMPOSITION_LENGTH {
                    if !self.flush_pending(&mut pending, writer, needs_reorder) {
                        complete = false;
                        break;
                    }
                    committed = i;
                }
                if self.is_member(ch, set) {
                    let mut buf = [0u32; MAX_DECOMPOSITION_LENGTH];
                    let n = self.decompose_one(ch, &mut buf);
                    if n == 0 {
                        pending.push(ch);
                    } else {
                        if pending.len() + n > MAX_DECOMPOSITION_LENGTH {
                            if !self.flush_pending(&mut pending, writer, needs_reorder) {
                                complete = false;
                                break;
                            }
                            committed = i;
                        }
                        pending.extend_from_slice(&buf[..n]);
                    }
                } else {
                    pending.push(ch);
                }
                i += len;
                continue;
            }

            // Base character: everything buffered so far is final.
            if !self.flush_pending(&mut pending, writer, needs_reorder) {
                complete = false;
                break;
            }
            committed = i;

            if self.is_member(ch, set) {
                let mut buf = [0u32; MAX_DECOMPOSITION_LENGTH];
                let n = self.decompose_one(ch, &mut buf);
                if n == 0 {
                    if !writer.write_char(ch) {
                        complete = false;
                        break;
                    }
                } else if needs_reorder {
                    // Trailing marks of the expansion still have to
                    // merge with any marks that follow in the source.
                    pending.extend_from_slice(&buf[..n]);
                    i += len;
                    continue;
                } else if !writer.write_all(&buf[..n]) {
                    complete = false;
                    break;
                }
            } else if !writer.write_char(ch) {
                complete = false;
                break;
            }
            i += len;
            committed = i;
        }

        if complete {
            if self.flush_pending(&mut pending, writer, needs_reorder) {
                committed = src.len();
            } else {
                complete = false;
            }
        }
        DecomposeStatus {
            consumed: committed,
            filled: writer.filled(),
            complete,
        }
    }

    fn compatibility_decompose_one(
        &self,
        ch: CodePoint,
        out: &mut [CodePoint],
        depth: usize,
    ) -> usize {
        if depth == 0 {
            return 0;
        }
        let Some(store) = self.mappings() else {
            return 0;
        };
        let table = store.table(MappingKind::CompatibilityDecompose);
        let Some(raw) = table.lookup(ch).filter(|&raw| raw != 0) else {
            return 0;
        };
        let value = MappingValue::decode(raw);

        let mut used = 0;
        for k in 0..value.count {
            let component = if value.count == 1 {
                value.payload
            } else {
                match table.extra_code_point(value.payload as usize + k) {
                    Some(component) => component,
                    None => return 0,
                }
            };
            let n = if self.is_member(component, CharSet::CompatibilityDecomposable) {
                self.compatibility_decompose_one(component, &mut out[used..], depth - 1)
            } else if self.is_member(component, CharSet::CanonicalDecomposable) {
                self.decompose_one(component, &mut out[used..])
            } else {
                if used >= out.len() {
                    return 0;
                }
                out[used] = component;
                used += 1;
                continue;
            };
            if n == 0 {
                return 0;
            }
            used += n;
        }
        used
    }

    /// In-place compatibility decomposition of `buffer[..len]`,
    /// shifting the tail as characters expand. Returns the new length,
    /// or 0 when an expansion does not fit.
    pub fn compatibility_decompose(&self, buffer: &mut [CodePoint], len: usize) -> usize {
        let mut used = len;
        let mut i = 0;
        while i < used {
            let ch = buffer[i];
            let mut expansion = [0u32; MAX_DECOMPOSITION_LENGTH];
            let n = if self.is_member(ch, CharSet::CompatibilityDecomposable) {
                match self.compatibility_decompose_one(ch, &mut expansion, MAX_DECOMPOSITION_LENGTH) {
                    0 => return 0,
                    n => n,
                }
            } else if self.is_member(ch, CharSet::CanonicalDecomposable) {
                self.decompose_one(ch, &mut expansion)
            } else {
                0
            };
            if n == 0 {
                i += 1;
                continue;
            }
            let new_used = used + n - 1;
            if new_used > buffer.len() {
                return 0;
            }
            buffer.copy_within(i + 1..used, i + n);
            buffer[i..i + n].copy_from_slice(&expansion[..n]);
            used = new_used;
            i += n;
        }
        used
    }
}
