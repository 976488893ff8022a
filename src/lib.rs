//! # ucdb
//!
//! Unicode character-database engine: character-set membership across
//! all 17 planes, full case mapping with locale-conditional rules,
//! canonical and compatibility decomposition, and canonical
//! precomposition, all driven by compact binary table resources.
//!
//! The engine owns no data of its own. The embedding environment hands
//! it three binary resources (character sets, mappings, properties)
//! through a [`ResourceProvider`](resource::ResourceProvider); each is
//! parsed lazily, exactly once, and queried lock-free from any number
//! of threads afterwards. A missing or malformed resource degrades the
//! dependent queries to identity/absent semantics instead of panicking.
//!
//! ## Quick Start
//!
//! Some behavior is synthesized and works with no resources at all:
//!
//! ```rust
//! use ucdb::prelude::*;
//!
//! let data = UnicodeData::new(StaticResources::default());
//!
//! // Whitespace and newline sets are built in.
//! assert!(data.is_member(0x0020, CharSet::Whitespace));
//! assert!(data.is_member(0x2028, CharSet::Newline));
//!
//! // So is the Turkish dotted/dotless i rule.
//! let mut out = [0u16; 4];
//! let n = data.map_case(
//!     0x0130, // İ
//!     &mut out,
//!     CaseOp::ToLower,
//!     CaseFlags::empty(),
//!     Some(LangTag::TURKISH),
//! );
//! assert_eq!(&out[..n], &[0x0069]);
//!
//! // And Hangul syllables decompose arithmetically.
//! let mut jamo = [0u32; 4];
//! let n = data.decompose_one(0xAC01, &mut jamo);
//! assert_eq!(&jamo[..n], &[0x1100, 0x1161, 0x11A8]);
//! ```
//!
//! Table-driven queries need the resources loaded:
//!
//! ```rust,no_run
//! use ucdb::prelude::*;
//!
//! # fn embedded_character_sets() -> &'static [u8] { &[] }
//! // Typically an `include_bytes!` of the compiled table resource.
//! let data = UnicodeData::new(StaticResources {
//!     character_sets: Some(embedded_character_sets()),
//!     ..StaticResources::default()
//! });
//! data.load_character_sets()?;
//! assert!(data.is_member('A' as u32, CharSet::UppercaseLetter));
//! # Ok::<(), DataError>(())
//! ```
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`types`] | Code point/unit types, set identifiers, case ops and flags, constants |
//! | [`error`] | Table loading/parsing errors |
//! | [`resource`] | Resource names, provider trait, big-endian cursor |
//! | [`bitmap`] | Per-set, per-plane membership bitmap store |
//! | [`charset`] | Set membership, plane bitmap fill, plane counts |
//! | [`property`] | Combining class and bidi category tables |
//! | [`mapping`] | Case/decomposition pair tables and packed values |
//! | [`casemap`] | Case mapping engine and conditional flags |
//! | [`decompose`] | Canonical/compatibility decomposition |
//! | [`precompose`] | Canonical composition |
//! | [`convert`] | UTF-8/16/32 destination writer and run conversion |
//! | [`data`] | The owning engine, one lazy store per resource |

pub mod bitmap;
pub mod casemap;
pub mod charset;
pub mod convert;
pub mod data;
pub mod decompose;
pub mod error;
pub mod mapping;
pub mod precompose;
pub mod prelude;
pub mod property;
pub mod resource;
pub mod types;
