// data.rs - The owning engine instance: one provider, three lazily
// built stores.
//
// Each store is parsed at most once behind its own OnceLock: the fast
// path is a lock-free read of the published result, the slow path
// parses under the lock and publishes. Once built, a store is read-only
// for the process lifetime, which is what makes concurrent readers safe
// without per-call locking.

use std::sync::OnceLock;

use crate::bitmap::BitmapStore;
use crate::error::DataError;
use crate::mapping::MappingStore;
use crate::property::PropertyStore;
use crate::resource::{ResourceName, ResourceProvider};

/// Unicode character-database engine.
///
/// Construct once at startup with the embedding environment's resource
/// provider; all query methods are callable from any number of threads.
/// A resource that fails to load stays failed for the life of the
/// engine, and the queries that depend on it degrade to their absent
/// semantics (no membership, identity mappings) instead of panicking.
pub struct UnicodeData {
    provider: Box<dyn ResourceProvider>,
    bitmaps: OnceLock<Result<BitmapStore, DataError>>,
    properties: OnceLock<Result<PropertyStore, DataError>>,
    mappings: OnceLock<Result<MappingStore, DataError>>,
}

impl UnicodeData {
    pub fn new(provider: impl ResourceProvider + 'static) -> UnicodeData {
        UnicodeData {
            provider: Box::new(provider),
            bitmaps: OnceLock::new(),
            properties: OnceLock::new(),
            mappings: OnceLock::new(),
        }
    }

    fn resource(&self, name: ResourceName) -> Result<&'static [u8], DataError> {
        self.provider.load(name).ok_or(DataError::NotFound(name))
    }

    /// Idempotent load of the character-set bitmaps. Returns the parse
    /// outcome; repeat calls never re-parse.
    pub fn load_character_sets(&self) -> Result<(), DataError> {
        self.bitmaps
            .get_or_init(|| {
                self.resource(ResourceName::CharacterSets)
                    .and_then(BitmapStore::parse)
            })
            .as_ref()
            .map(|_| ())
            .map_err(Clone::clone)
    }

    /// Idempotent load of the case/decomposition mapping tables.
    pub fn load_mappings(&self) -> Result<(), DataError> {
        self.mappings
            .get_or_init(|| {
                self.resource(ResourceName::Mappings).and_then(MappingStore::parse)
            })
            .as_ref()
            .map(|_| ())
            .map_err(Clone::clone)
    }

    /// Idempotent load of the combining-class/bidi property tables.
    pub fn load_properties(&self) -> Result<(), DataError> {
        self.properties
            .get_or_init(|| {
                self.resource(ResourceName::Properties)
                    .and_then(PropertyStore::parse)
            })
            .as_ref()
            .map(|_| ())
            .map_err(Clone::clone)
    }

    pub(crate) fn bitmaps(&self) -> Option<&BitmapStore> {
        let _ = self.load_character_sets();
        self.bitmaps.get().and_then(|r| r.as_ref().ok())
    }

    pub(crate) fn properties(&self) -> Option<&PropertyStore> {
        let _ = self.load_properties();
        self.properties.get().and_then(|r| r.as_ref().ok())
    }

    pub(crate) fn mappings(&self) -> Option<&MappingStore> {
        let _ = self.load_mappings();
        self.mappings.get().and_then(|r| r.as_ref().ok())
    }

    /// Version string of the character database the bitmaps were
    /// compiled from, once they have loaded.
    pub fn unicode_version(&self) -> Option<&str> {
        self.bitmaps().map(|store| store.version())
    }
}
