// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier newtypes for runs, targets, findings, and stored records

/// Define a newtype wrapper around `SmolStr` for an externally issued
/// identifier (scanning-service target/finding ids, ticket references).
///
/// Generates `new()`, `as_str()`, `Display`, `From<String>`, `From<&str>`,
/// `AsRef<str>`, and `Deref` implementations.
#[macro_export]
macro_rules! define_external_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub smol_str::SmolStr);

        impl $name {
            pub fn new(id: impl Into<smol_str::SmolStr>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_external_id! {
    /// Unit a finding belongs to (an application in the scanning service).
    pub struct TargetId;
}

define_external_id! {
    /// A single security issue record in the scanning service.
    pub struct FindingId;
}

define_external_id! {
    /// Scanning-service policy identifier for the optional allow-list.
    pub struct PolicyId;
}

define_external_id! {
    /// Reference to a created ticket (issue key in the ticketing system).
    pub struct TicketRef;
}

/// Identifier of one end-to-end import run.
///
/// Generated once per run launch and carried unchanged through every work
/// message and persisted record of that run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RunId(pub smol_str::SmolStr);

impl RunId {
    /// Generate a fresh random run identifier (UUID v4).
    pub fn generate() -> Self {
        Self(smol_str::SmolStr::new(uuid::Uuid::new_v4().to_string()))
    }

    pub fn from_string(id: impl Into<smol_str::SmolStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RunId {
    fn from(s: &str) -> Self {
        Self::from_string(s)
    }
}

/// Storage key for one outcome record.
///
/// Format is `out-{nanoid}`: 4 character prefix plus 19 character random
/// suffix, so the whole key fits `SmolStr` inline capacity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct OutcomeKey(pub smol_str::SmolStr);

impl OutcomeKey {
    pub const PREFIX: &'static str = "out-";

    /// Generate a new random outcome key
    pub fn generate() -> Self {
        Self(smol_str::SmolStr::new(format!("{}{}", Self::PREFIX, nanoid::nanoid!(19))))
    }

    pub fn from_string(id: impl Into<smol_str::SmolStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OutcomeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
