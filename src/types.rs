// types.rs - Public types, character-set identifiers, case-mapping
// operations and flags, and the fixed Unicode constants the engine is
// built around.

use bitflags::bitflags;

// === Scalar types ===

/// A 32-bit Unicode scalar value.
pub type CodePoint = u32;
/// A 16-bit UTF-16 storage unit.
pub type CodeUnit = u16;

// === Planes ===

/// Number of Unicode planes (0..=16).
pub const PLANE_COUNT: usize = 17;
/// Bytes in one per-plane bitmap: 65,536 bits, one per code point.
pub const PLANE_BITMAP_SIZE: usize = 8192;

#[inline]
pub fn plane_of(ch: CodePoint) -> u32 {
    ch >> 16
}

// === Well-known code points ===

pub const REPLACEMENT_CHARACTER: CodePoint = 0xFFFD;
pub const MAX_CODE_POINT: CodePoint = 0x10FFFF;

// === Surrogates ===

pub const SURROGATE_HIGH_START: CodeUnit = 0xD800;
pub const SURROGATE_HIGH_END: CodeUnit = 0xDBFF;
pub const SURROGATE_LOW_START: CodeUnit = 0xDC00;
pub const SURROGATE_LOW_END: CodeUnit = 0xDFFF;

#[inline]
pub fn is_surrogate_high(unit: CodeUnit) -> bool {
    (SURROGATE_HIGH_START..=SURROGATE_HIGH_END).contains(&unit)
}

#[inline]
pub fn is_surrogate_low(unit: CodeUnit) -> bool {
    (SURROGATE_LOW_START..=SURROGATE_LOW_END).contains(&unit)
}

#[inline]
pub fn is_surrogate(unit: CodeUnit) -> bool {
    is_surrogate_high(unit) || is_surrogate_low(unit)
}

/// Combine a surrogate pair into the scalar value it encodes.
#[inline]
pub fn scalar_from_pair(high: CodeUnit, low: CodeUnit) -> CodePoint {
    (((high as u32 - 0xD800) << 10) | (low as u32 - 0xDC00)) + 0x10000
}

/// Split a scalar above U+FFFF into its surrogate pair.
#[inline]
pub fn pair_from_scalar(ch: CodePoint) -> (CodeUnit, CodeUnit) {
    let v = ch - 0x10000;
    (((v >> 10) + 0xD800) as u16, ((v & 0x3FF) + 0xDC00) as u16)
}

// === Hangul syllable constants ===
// Arithmetic decomposition per the Unicode Hangul syllable algorithm.

pub const HANGUL_SYLLABLE_START: CodePoint = 0xAC00;
pub const HANGUL_JAMO_L_START: CodePoint = 0x1100;
pub const HANGUL_JAMO_V_START: CodePoint = 0x1161;
pub const HANGUL_JAMO_T_START: CodePoint = 0x11A7;
pub const HANGUL_JAMO_L_COUNT: u32 = 19;
pub const HANGUL_JAMO_V_COUNT: u32 = 21;
pub const HANGUL_JAMO_T_COUNT: u32 = 28;
pub const HANGUL_SYLLABLE_COUNT: u32 =
    HANGUL_JAMO_L_COUNT * HANGUL_JAMO_V_COUNT * HANGUL_JAMO_T_COUNT;
pub const HANGUL_SYLLABLE_END: CodePoint =
    HANGUL_SYLLABLE_START + HANGUL_SYLLABLE_COUNT - 1;

#[inline]
pub fn is_hangul_syllable(ch: CodePoint) -> bool {
    (HANGUL_SYLLABLE_START..=HANGUL_SYLLABLE_END).contains(&ch)
}

// === Character sets ===

/// Logical character sets answerable through `UnicodeData::is_member`.
///
/// Values below 100 match the external numbering used by embedding
/// layers; values from 100 up are internal sets consumed by the case and
/// decomposition engines. `Control` is a compatibility alias resolving
/// to the control-and-format bitmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum CharSet {
    Control = 1,
    Whitespace,
    WhitespaceAndNewline,
    DecimalDigit,
    Letter,
    LowercaseLetter,
    UppercaseLetter,
    NonBase,
    CanonicalDecomposable,
    AlphaNumeric,
    Punctuation,
    Illegal,
    TitlecaseLetter,
    SymbolAndOperator,
    Newline,

    ControlAndFormat = 100,
    CompatibilityDecomposable,
    HfsPlusDecomposable,
    StrongRightToLeft,
    CaseIgnorable,
    GraphemeExtend,
    HasNonSelfLowercase,
    HasNonSelfUppercase,
    HasNonSelfTitlecase,
    HasNonSelfCaseFolding,
}

/// Number of set slots stored in the bitmap resource.
pub const BITMAP_SET_COUNT: usize = 21;

impl CharSet {
    /// Resolve compatibility aliases to the set actually implemented.
    #[inline]
    pub fn resolve_alias(self) -> CharSet {
        match self {
            CharSet::Control => CharSet::ControlAndFormat,
            other => other,
        }
    }

    /// Slot index of this set inside the bitmap resource, or `None` for
    /// the synthesized whitespace/newline sets.
    pub fn bitmap_slot(self) -> Option<usize> {
        let slot = match self.resolve_alias() {
            CharSet::ControlAndFormat => 0,
            CharSet::DecimalDigit => 1,
            CharSet::Letter => 2,
            CharSet::LowercaseLetter => 3,
            CharSet::UppercaseLetter => 4,
            CharSet::NonBase => 5,
            CharSet::CanonicalDecomposable => 6,
            CharSet::CompatibilityDecomposable => 7,
            CharSet::AlphaNumeric => 8,
            CharSet::Punctuation => 9,
            // The illegal set is stored with inverted polarity: the
            // bitmap holds the complementary "legal" set.
            CharSet::Illegal => 10,
            CharSet::TitlecaseLetter => 11,
            CharSet::SymbolAndOperator => 12,
            CharSet::HfsPlusDecomposable => 13,
            CharSet::StrongRightToLeft => 14,
            CharSet::CaseIgnorable => 15,
            CharSet::GraphemeExtend => 16,
            CharSet::HasNonSelfLowercase => 17,
            CharSet::HasNonSelfUppercase => 18,
            CharSet::HasNonSelfTitlecase => 19,
            CharSet::HasNonSelfCaseFolding => 20,
            CharSet::Whitespace
            | CharSet::WhitespaceAndNewline
            | CharSet::Newline => return None,
            CharSet::Control => unreachable!("resolved above"),
        };
        Some(slot)
    }
}

// === Case mapping ===

/// The four case operations served by the mapping tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum CaseOp {
    ToLower = 0,
    ToUpper,
    ToTitle,
    CaseFold,
}

impl CaseOp {
    /// The "has non-self mapping" set gating a table search for this
    /// operation.
    #[inline]
    pub fn non_self_set(self) -> CharSet {
        match self {
            CaseOp::ToLower => CharSet::HasNonSelfLowercase,
            CaseOp::ToUpper => CharSet::HasNonSelfUppercase,
            CaseOp::ToTitle => CharSet::HasNonSelfTitlecase,
            CaseOp::CaseFold => CharSet::HasNonSelfCaseFolding,
        }
    }
}

bitflags! {
    /// Contextual flags feeding `map_case`, produced by
    /// `conditional_case_flags` from the surrounding text.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct CaseFlags: u32 {
        /// Greek capital sigma sits in word-final position.
        const FINAL_SIGMA = 1 << 0;
        /// The current character follows an "i"/"I" base.
        const AFTER_I = 1 << 1;
        /// A combining mark of class 230 (above) follows.
        const MORE_ABOVE = 1 << 2;
    }
}

/// A resolved 2-letter language tag. Only Lithuanian, Turkish, and
/// Azeri select conditional rules; any other tag behaves like `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LangTag(pub [u8; 2]);

impl LangTag {
    pub const LITHUANIAN: LangTag = LangTag(*b"lt");
    pub const TURKISH: LangTag = LangTag(*b"tr");
    pub const AZERI: LangTag = LangTag(*b"az");

    pub fn new(tag: &str) -> Option<LangTag> {
        let bytes = tag.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        Some(LangTag([
            bytes[0].to_ascii_lowercase(),
            bytes[1].to_ascii_lowercase(),
        ]))
    }
}

// === Bidi category ===

/// Per-character bidirectional category, as stored in the property
/// resource. Values through `Pdf` appear literally in index pages;
/// larger index bytes point into shared value pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum BidiCategory {
    OtherNeutral = 0,
    LeftToRight,
    RightToLeft,
    ArabicNumber,
    EuropeanNumber,
    ArabicLetter,
    NonSpacingMark,
    CommonSeparator,
    EuropeanSeparator,
    EuropeanTerminator,
    BoundaryNeutral,
    SegmentSeparator,
    Whitespace,
    ParagraphSeparator,
    RightToLeftOverride,
    RightToLeftEmbedding,
    LeftToRightOverride,
    LeftToRightEmbedding,
    Pdf,
}

impl BidiCategory {
    pub(crate) fn from_byte(value: u8) -> BidiCategory {
        match value {
            0 => BidiCategory::OtherNeutral,
            1 => BidiCategory::LeftToRight,
            2 => BidiCategory::RightToLeft,
            3 => BidiCategory::ArabicNumber,
            4 => BidiCategory::EuropeanNumber,
            5 => BidiCategory::ArabicLetter,
            6 => BidiCategory::NonSpacingMark,
            7 => BidiCategory::CommonSeparator,
            8 => BidiCategory::EuropeanSeparator,
            9 => BidiCategory::EuropeanTerminator,
            10 => BidiCategory::BoundaryNeutral,
            11 => BidiCategory::SegmentSeparator,
            12 => BidiCategory::Whitespace,
            13 => BidiCategory::ParagraphSeparator,
            14 => BidiCategory::RightToLeftOverride,
            15 => BidiCategory::RightToLeftEmbedding,
            16 => BidiCategory::LeftToRightOverride,
            17 => BidiCategory::LeftToRightEmbedding,
            _ => BidiCategory::Pdf,
        }
    }
}

/// Highest bidi category byte stored literally in an index page.
pub(crate) const BIDI_LITERAL_MAX: u8 = BidiCategory::Pdf as u8;

// === Destination formats ===

/// Output encoding for decomposition fill operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DestFormat {
    Utf8,
    Utf16,
    Utf32,
}

// === Decomposition limits ===

/// Upper bound on a full recursive decomposition expansion. Exceeding
/// it is reported as failure, never as an unbounded loop.
pub const MAX_DECOMPOSITION_LENGTH: usize = 32;
