// prelude.rs - Convenient re-exports for the common API surface.
//
//! # Prelude
//!
//! ```
//! use ucdb::prelude::*;
//!
//! let data = UnicodeData::new(StaticResources::default());
//! assert!(data.is_member(0x0009, CharSet::WhitespaceAndNewline));
//! ```

pub use crate::charset::BitmapFill;
pub use crate::convert::{utf16_to_utf32, utf32_to_utf16, DestBuffer, DestWriter};
pub use crate::data::UnicodeData;
pub use crate::decompose::DecomposeStatus;
pub use crate::error::DataError;
pub use crate::resource::{ResourceName, ResourceProvider, StaticResources};
pub use crate::types::{
    BidiCategory, CaseFlags, CaseOp, CharSet, CodePoint, CodeUnit, DestFormat, LangTag,
};
