// error.rs - Error type for table loading and parsing.
//
// Query operations never surface these: a store that failed to load
// simply behaves as absent. The `load_*` methods expose the cause.

use std::fmt;

use crate::resource::ResourceName;

/// Error raised while locating or parsing a binary table resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// The named resource is not provided by the embedding environment.
    /// Permanent for the process lifetime.
    NotFound(ResourceName),
    /// The resource ended before a declared structure was complete.
    Truncated {
        resource: ResourceName,
        offset: usize,
    },
    /// A structural invariant of the encoding does not hold.
    Malformed {
        resource: ResourceName,
        reason: &'static str,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::NotFound(name) => {
                write!(f, "resource {} not found", name.as_str())
            }
            DataError::Truncated { resource, offset } => {
                write!(
                    f,
                    "resource {} truncated at byte {}",
                    resource.as_str(),
                    offset
                )
            }
            DataError::Malformed { resource, reason } => {
                write!(f, "resource {} malformed: {}", resource.as_str(), reason)
            }
        }
    }
}

impl std::error::Error for DataError {}
