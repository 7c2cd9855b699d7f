// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Opaque payload newtypes carried through the pipeline.
//!
//! Neither type is ever parsed by this crate — both are treated as opaque
//! UTF-8 byte strings, JSON in practice, owned by whichever producer built them.

use std::fmt;

macro_rules! define_payload {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new(payload: impl Into<String>) -> Self {
                Self(payload.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn as_bytes(&self) -> &[u8] {
                self.0.as_bytes()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

define_payload! {
    /// A redo record pulled from the engine or a bus. Immutable once produced.
    pub struct RedoRecord;
}

define_payload! {
    /// An "info" envelope returned by the engine's apply-with-info variant.
    pub struct InfoEnvelope;
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
