// casemap.rs - Case mapping engine: table-driven full case conversion
// with the Greek final-sigma rule and the Lithuanian and Turkish/Azeri
// language overrides.
//
// Mapping precedence: final sigma, language override, "has non-self
// mapping" set gate + table search (titlecase falls back to the
// uppercase table), case-fold miss retried as to-lower, identity.
// Output is UTF-16 units; results that do not fit are truncated to
// whole units and a surrogate pair is never split.

use crate::data::UnicodeData;
use crate::mapping::{MappingKind, MappingValue, PairTable};
use crate::types::{
    is_surrogate_high, is_surrogate_low, pair_from_scalar, scalar_from_pair, CaseFlags, CaseOp,
    CharSet, CodePoint, CodeUnit, LangTag,
};

const GREEK_CAPITAL_SIGMA: CodePoint = 0x03A3;
const GREEK_SMALL_FINAL_SIGMA: CodePoint = 0x03C2;
const COMBINING_DOT_ABOVE: CodePoint = 0x0307;
const COMBINING_CLASS_ABOVE: u8 = 230;

// === UTF-16 scalar stepping ===

/// Scalar starting at `index` and the number of units it occupies. An
/// unpaired surrogate is returned as its own unit value.
pub(crate) fn scalar_at(buffer: &[CodeUnit], index: usize) -> (CodePoint, usize) {
    let unit = buffer[index];
    if is_surrogate_high(unit) {
        if let Some(&low) = buffer.get(index + 1) {
            if is_surrogate_low(low) {
                return (scalar_from_pair(unit, low), 2);
            }
        }
    }
    (unit as CodePoint, 1)
}

/// Scalar ending just before `index` and the index it starts at.
fn scalar_before(buffer: &[CodeUnit], index: usize) -> (CodePoint, usize) {
    let unit = buffer[index - 1];
    if is_surrogate_low(unit) && index >= 2 {
        let high = buffer[index - 2];
        if is_surrogate_high(high) {
            return (scalar_from_pair(high, unit), index - 2);
        }
    }
    (unit as CodePoint, index - 1)
}

// === Truncating emitters ===

fn emit_units(units: &[CodeUnit], out: &mut [CodeUnit]) -> usize {
    let n = units.len().min(out.len());
    out[..n].copy_from_slice(&units[..n]);
    n
}

fn emit_scalar(ch: CodePoint, out: &mut [CodeUnit]) -> usize {
    if ch <= 0xFFFF {
        emit_units(&[ch as CodeUnit], out)
    } else if out.len() >= 2 {
        let (high, low) = pair_from_scalar(ch);
        out[0] = high;
        out[1] = low;
        2
    } else {
        0
    }
}

fn emit_value(table: &PairTable, value: MappingValue, out: &mut [CodeUnit]) -> usize {
    if value.count == 1 {
        return emit_units(&[value.payload as CodeUnit], out);
    }
    let mut filled = 0;
    let mut element = value.payload as usize;
    let mut remaining = value.count;
    while remaining > 0 {
        let Some(ch) = table.extra_code_point(element) else {
            break;
        };
        element += 1;
        if value.non_bmp && ch > 0xFFFF {
            if filled + 2 > out.len() {
                break;
            }
            let (high, low) = pair_from_scalar(ch);
            out[filled] = high;
            out[filled + 1] = low;
            filled += 2;
            remaining = remaining.saturating_sub(2);
        } else {
            if filled >= out.len() {
                break;
            }
            out[filled] = ch as CodeUnit;
            filled += 1;
            remaining -= 1;
        }
    }
    filled
}

// === Engine ===

impl UnicodeData {
    /// Map one character under `op`, writing UTF-16 units into `out`
    /// and returning the unit count. Returns 0 when the character is
    /// dropped (Lithuanian/Turkish dot-above removal) or nothing fits.
    pub fn map_case(
        &self,
        ch: CodePoint,
        out: &mut [CodeUnit],
        op: CaseOp,
        flags: CaseFlags,
        lang: Option<LangTag>,
    ) -> usize {
        if flags.contains(CaseFlags::FINAL_SIGMA) && ch == GREEK_CAPITAL_SIGMA {
            let mapped = if op == CaseOp::ToLower {
                GREEK_SMALL_FINAL_SIGMA
            } else {
                GREEK_CAPITAL_SIGMA
            };
            return emit_units(&[mapped as CodeUnit], out);
        }

        if let Some(lang) = lang {
            let overridden = match lang {
                LangTag::LITHUANIAN => self.lithuanian_case(ch, out, op, flags),
                LangTag::TURKISH | LangTag::AZERI => self.turkic_case(ch, out, op, flags),
                _ => None,
            };
            if let Some(n) = overridden {
                return n;
            }
        }

        let mut op = op;
        loop {
            if self.is_member(ch, op.non_self_set()) {
                if let Some(n) = self.table_case(ch, out, op) {
                    return n;
                }
            }
            if op == CaseOp::CaseFold {
                // Characters without a dedicated fold use their
                // lowercase mapping.
                op = CaseOp::ToLower;
            } else {
                break;
            }
        }

        emit_scalar(ch, out)
    }

    fn table_case(&self, ch: CodePoint, out: &mut [CodeUnit], op: CaseOp) -> Option<usize> {
        let store = self.mappings()?;
        let kind = match op {
            CaseOp::ToLower => MappingKind::ToLower,
            CaseOp::ToUpper => MappingKind::ToUpper,
            CaseOp::ToTitle => MappingKind::ToTitle,
            CaseOp::CaseFold => MappingKind::CaseFold,
        };
        let table = store.table(kind);
        let found = match table.lookup(ch).filter(|&raw| raw != 0) {
            Some(raw) => Some((table, raw)),
            // Characters without a dedicated titlecase form use their
            // uppercase mapping.
            None if op == CaseOp::ToTitle => {
                let upper = store.table(MappingKind::ToUpper);
                upper.lookup(ch).filter(|&raw| raw != 0).map(|raw| (upper, raw))
            }
            None => None,
        };
        let (table, raw) = found?;
        Some(emit_value(table, MappingValue::decode(raw), out))
    }

    fn lithuanian_case(
        &self,
        ch: CodePoint,
        out: &mut [CodeUnit],
        op: CaseOp,
        flags: CaseFlags,
    ) -> Option<usize> {
        if ch == COMBINING_DOT_ABOVE && flags.contains(CaseFlags::AFTER_I) {
            // The dot is implicit on a lowercase soft-dotted base.
            return Some(if op == CaseOp::ToLower {
                0
            } else {
                emit_units(&[COMBINING_DOT_ABOVE as CodeUnit], out)
            });
        }
        if op == CaseOp::ToLower {
            if flags.contains(CaseFlags::MORE_ABOVE) {
                let lowered = match ch {
                    0x0049 => 0x0069,
                    0x004A => 0x006A,
                    0x012E => 0x012F,
                    _ => 0,
                };
                if lowered != 0 {
                    // An above mark follows: the lowercase form keeps
                    // an explicit dot.
                    return Some(emit_units(&[lowered, 0x0307], out));
                }
            }
            let expanded: &[CodeUnit] = match ch {
                0x00CC => &[0x0069, 0x0307, 0x0300],
                0x00CD => &[0x0069, 0x0307, 0x0301],
                0x0128 => &[0x0069, 0x0307, 0x0303],
                _ => return None,
            };
            return Some(emit_units(expanded, out));
        }
        None
    }

    fn turkic_case(
        &self,
        ch: CodePoint,
        out: &mut [CodeUnit],
        op: CaseOp,
        flags: CaseFlags,
    ) -> Option<usize> {
        let lowering = matches!(op, CaseOp::ToLower | CaseOp::CaseFold);
        if ch == 0x0049 || ch == 0x0131 {
            // Dotless pair: I lowercases to ı unless a combining dot
            // above follows, in which case the pair spells i.
            let mapped: CodeUnit = if lowering {
                if flags.contains(CaseFlags::MORE_ABOVE) {
                    0x0069
                } else {
                    0x0131
                }
            } else {
                0x0049
            };
            return Some(emit_units(&[mapped], out));
        }
        if ch == 0x0069 || ch == 0x0130 {
            // Dotted pair: i uppercases to İ.
            let mapped: CodeUnit = if lowering { 0x0069 } else { 0x0130 };
            return Some(emit_units(&[mapped], out));
        }
        if ch == COMBINING_DOT_ABOVE && flags.contains(CaseFlags::AFTER_I) {
            // The dot that turned I into i is consumed by the base.
            return Some(if lowering {
                0
            } else {
                emit_units(&[COMBINING_DOT_ABOVE as CodeUnit], out)
            });
        }
        None
    }

    /// Compute the contextual flags for the character at `index` of
    /// `buffer`, to be passed to `map_case`. `last` carries the flags
    /// computed for the preceding character, which is how the
    /// dot-above rules see their base.
    pub fn conditional_case_flags(
        &self,
        ch: CodePoint,
        buffer: &[CodeUnit],
        index: usize,
        op: CaseOp,
        lang: Option<LangTag>,
        last: CaseFlags,
    ) -> CaseFlags {
        if ch == GREEK_CAPITAL_SIGMA && op == CaseOp::ToLower && index > 0 {
            return if self.is_final_sigma(buffer, index) {
                CaseFlags::FINAL_SIGMA
            } else {
                CaseFlags::empty()
            };
        }
        match lang {
            Some(LangTag::LITHUANIAN) => self.lithuanian_flags(ch, buffer, index, op, last),
            Some(LangTag::TURKISH) | Some(LangTag::AZERI) => {
                self.turkic_flags(ch, buffer, index, op)
            }
            _ => CaseFlags::empty(),
        }
    }

    fn is_cased(&self, ch: CodePoint) -> bool {
        self.is_member(ch, CharSet::UppercaseLetter)
            || self.is_member(ch, CharSet::LowercaseLetter)
    }

    /// Final-sigma position: a cased character before (across
    /// case-ignorables), no cased character after.
    fn is_final_sigma(&self, buffer: &[CodeUnit], index: usize) -> bool {
        let mut i = index;
        let mut preceded = false;
        while i > 0 {
            let (ch, start) = scalar_before(buffer, i);
            if self.is_member(ch, CharSet::CaseIgnorable) {
                i = start;
                continue;
            }
            preceded = self.is_cased(ch);
            break;
        }
        if !preceded {
            return false;
        }
        let mut i = index + 1;
        while i < buffer.len() {
            let (ch, len) = scalar_at(buffer, i);
            if self.is_member(ch, CharSet::CaseIgnorable) {
                i += len;
                continue;
            }
            return !self.is_cased(ch);
        }
        true
    }

    /// Does a combining mark of class 230 follow before any base
    /// character? An explicit combining dot above answers no; the dot
    /// the rule would insert is already present.
    fn has_more_above(&self, buffer: &[CodeUnit], from: usize) -> bool {
        let mut i = from;
        while i < buffer.len() {
            let (ch, len) = scalar_at(buffer, i);
            if !self.is_member(ch, CharSet::NonBase) {
                return false;
            }
            if ch == COMBINING_DOT_ABOVE {
                return false;
            }
            if self.combining_class(ch) == COMBINING_CLASS_ABOVE {
                return true;
            }
            i += len;
        }
        false
    }

    /// Does a combining dot above follow before any other above mark
    /// or base character? The mirror of `follows_i`: intervening marks
    /// of other classes do not block the pair.
    fn dot_above_follows(&self, buffer: &[CodeUnit], from: usize) -> bool {
        let mut i = from;
        while i < buffer.len() {
            let (ch, len) = scalar_at(buffer, i);
            if ch == COMBINING_DOT_ABOVE {
                return true;
            }
            if !self.is_member(ch, CharSet::NonBase)
                || self.combining_class(ch) == COMBINING_CLASS_ABOVE
            {
                return false;
            }
            i += len;
        }
        false
    }

    /// Is the nearest preceding base character an I or i, with no
    /// intervening above mark?
    fn follows_i(&self, buffer: &[CodeUnit], index: usize) -> bool {
        let mut i = index;
        while i > 0 {
            let (ch, start) = scalar_before(buffer, i);
            if self.is_member(ch, CharSet::NonBase) {
                if self.combining_class(ch) == COMBINING_CLASS_ABOVE {
                    return false;
                }
                i = start;
                continue;
            }
            return ch == 0x0049 || ch == 0x0069;
        }
        false
    }

    fn lithuanian_flags(
        &self,
        ch: CodePoint,
        buffer: &[CodeUnit],
        index: usize,
        op: CaseOp,
        last: CaseFlags,
    ) -> CaseFlags {
        if ch == COMBINING_DOT_ABOVE && last.contains(CaseFlags::AFTER_I) {
            return CaseFlags::AFTER_I;
        }
        if op == CaseOp::ToLower && matches!(ch, 0x0049 | 0x004A | 0x012E) {
            return if self.has_more_above(buffer, index + 1) {
                CaseFlags::MORE_ABOVE
            } else {
                CaseFlags::empty()
            };
        }
        if ch == 0x0069 || ch == 0x006A {
            return CaseFlags::AFTER_I;
        }
        CaseFlags::empty()
    }

    fn turkic_flags(
        &self,
        ch: CodePoint,
        buffer: &[CodeUnit],
        index: usize,
        op: CaseOp,
    ) -> CaseFlags {
        if matches!(op, CaseOp::ToLower | CaseOp::CaseFold) && ch == 0x0049 {
            return if self.dot_above_follows(buffer, index + 1) {
                CaseFlags::MORE_ABOVE
            } else {
                CaseFlags::empty()
            };
        }
        if ch == COMBINING_DOT_ABOVE && self.follows_i(buffer, index) {
            return CaseFlags::AFTER_I;
        }
        CaseFlags::empty()
    }
}
