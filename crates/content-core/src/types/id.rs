//! Newtype wrappers around integer identifiers.
//!
//! Using distinct types prevents accidentally passing a `RowId` where a
//! `FileId` is expected. Both serialize as bare integers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around `u32`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Return the inner integer value.
            pub fn get(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u32>().map(Self)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> u32 {
                id.0
            }
        }
    };
}

define_id!(
    /// Stable per-node identifier used for table rows and tree-index lookup.
    ///
    /// Assigned densely in traversal order while a tree is built.
    RowId
);

define_id!(
    /// Index of a file in the backing service's file list.
    FileId
);

impl FileId {
    /// Wire value used for folders, which are not addressable files.
    pub const FOLDER_SENTINEL: i64 = -1;
}
