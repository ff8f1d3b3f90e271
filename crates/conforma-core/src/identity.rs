//! # Identifier Newtypes
//!
//! Each backend identifier is a distinct type: you cannot pass a
//! [`ThemeId`] where a [`RequirementId`] is expected.
//!
//! The backend is inconsistent about identifier encoding: catalog rows come
//! back with numeric ids, project rows with string ids. Every newtype here
//! deserializes from either a JSON string or a JSON integer and always
//! serializes as a string. Empty strings are rejected.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Declares an opaque identifier newtype and routes deserialization through
/// its validating constructor, so empty values are rejected at the boundary.
macro_rules! backend_id {
    ($(#[$meta:meta])* $ty:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $ty(String);

        impl $ty {
            /// Create an identifier, rejecting empty or whitespace-only input.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::EmptyIdentifier`] for empty input.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ValidationError::EmptyIdentifier { kind: $kind });
                }
                Ok(Self(value))
            }

            /// Access the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = deserializer.deserialize_any(StringOrInteger)?;
                Self::new(raw).map_err(de::Error::custom)
            }
        }
    };
}

/// Accepts a JSON string or integer and yields its string form.
struct StringOrInteger;

impl<'de> Visitor<'de> for StringOrInteger {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer identifier")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }
}

backend_id!(
    /// Identifier of a project, assigned by the backend at creation.
    ProjectId,
    "project"
);

backend_id!(
    /// Identifier of a theme, either a catalog definition or its
    /// per-project copy.
    ThemeId,
    "theme"
);

backend_id!(
    /// Identifier of a requirement, either a catalog definition or its
    /// per-project copy.
    RequirementId,
    "requirement"
);

backend_id!(
    /// Identifier of a law in the catalog.
    LawId,
    "law"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_string_ids() {
        let id: ProjectId = serde_json::from_str("\"6650f1c2a9\"").unwrap();
        assert_eq!(id.as_str(), "6650f1c2a9");
    }

    #[test]
    fn accepts_numeric_ids() {
        let id: LawId = serde_json::from_str("42").unwrap();
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn numeric_ids_serialize_as_strings() {
        let id: ThemeId = serde_json::from_str("7").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");
    }

    #[test]
    fn rejects_empty_string_on_deserialize() {
        let result: Result<RequirementId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_non_scalar_ids() {
        let result: Result<ThemeId, _> = serde_json::from_str("{\"id\": 1}");
        assert!(result.is_err());
    }

    #[test]
    fn new_rejects_whitespace() {
        assert_eq!(
            ThemeId::new("   ").unwrap_err(),
            ValidationError::EmptyIdentifier { kind: "theme" }
        );
    }

    #[test]
    fn from_str_round_trips_display() {
        let id: RequirementId = "req-9".parse().unwrap();
        assert_eq!(id.to_string(), "req-9");
    }
}
