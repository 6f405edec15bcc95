//! Identifier generation for the generate-identifier step
//!
//! The step never talks to `uuid` directly; it goes through an
//! [`IdentifierGenerator`] so callers can inject deterministic sequences.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;
use uuid::Uuid;

/// Failure reported by an identifier source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("identifier generation failed: {0}")]
pub struct IdentifierError(pub String);

/// Which kind of identifier to produce
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IdentifierVersion {
    /// Time ordered
    V1,
    /// Random
    #[default]
    V4,
}

// Anything other than "v1" selects a random identifier.
impl From<String> for IdentifierVersion {
    fn from(version: String) -> Self {
        if version == "v1" {
            IdentifierVersion::V1
        } else {
            IdentifierVersion::V4
        }
    }
}

impl From<IdentifierVersion> for String {
    fn from(version: IdentifierVersion) -> Self {
        match version {
            IdentifierVersion::V1 => "v1".to_string(),
            IdentifierVersion::V4 => "v4".to_string(),
        }
    }
}

/// Source of fresh identifiers shared by every row of a transformer.
///
/// Implementations are called from whichever thread runs the transform and
/// must never hand out the same value twice.
pub trait IdentifierGenerator: Send + Sync {
    /// A fresh time ordered identifier
    fn time_ordered(&self) -> Result<String, IdentifierError>;

    /// A fresh random identifier
    fn random(&self) -> Result<String, IdentifierError>;

    /// Dispatch on the configured version
    fn generate(&self, version: IdentifierVersion) -> Result<String, IdentifierError> {
        match version {
            IdentifierVersion::V1 => self.time_ordered(),
            IdentifierVersion::V4 => self.random(),
        }
    }
}

/// Default generator producing hyphenated UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

static NODE_ID: OnceLock<[u8; 6]> = OnceLock::new();

fn node_id() -> &'static [u8; 6] {
    NODE_ID.get_or_init(|| {
        let mut node: [u8; 6] = rand::random();
        // multicast bit marks a node id that is not a MAC address
        node[0] |= 0x01;
        node
    })
}

impl IdentifierGenerator for UuidGenerator {
    fn time_ordered(&self) -> Result<String, IdentifierError> {
        Ok(Uuid::now_v1(node_id()).hyphenated().to_string())
    }

    fn random(&self) -> Result<String, IdentifierError> {
        Ok(Uuid::new_v4().hyphenated().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uuid_versions() {
        let generator = UuidGenerator;

        let v1 = Uuid::parse_str(&generator.generate(IdentifierVersion::V1).unwrap()).unwrap();
        assert_eq!(v1.get_version_num(), 1);

        let v4 = Uuid::parse_str(&generator.generate(IdentifierVersion::V4).unwrap()).unwrap();
        assert_eq!(v4.get_version_num(), 4);
    }

    #[test]
    fn test_generated_values_are_unique() {
        let generator = UuidGenerator;
        let ids: HashSet<String> = (0..500)
            .map(|i| {
                let version = if i % 2 == 0 {
                    IdentifierVersion::V1
                } else {
                    IdentifierVersion::V4
                };
                generator.generate(version).unwrap()
            })
            .collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_version_names() {
        assert_eq!(IdentifierVersion::from("v1".to_string()), IdentifierVersion::V1);
        assert_eq!(IdentifierVersion::from("v4".to_string()), IdentifierVersion::V4);
        assert_eq!(IdentifierVersion::from("v7".to_string()), IdentifierVersion::V4);
        assert_eq!(IdentifierVersion::default(), IdentifierVersion::V4);
    }
}
