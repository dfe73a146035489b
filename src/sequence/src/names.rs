// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Resource names for sequences and their reports.
//!
//! Sequences use the `sequences/{sequence}` pattern, their reports use
//! `sequences/{sequence}/sequenceReport`.

use crate::{Error, Result};
use std::sync::atomic::{AtomicU64, Ordering};

/// The collection id for sequences.
pub const COLLECTION: &str = "sequences";

/// The singleton suffix for sequence reports.
pub const REPORT_SUFFIX: &str = "sequenceReport";

/// A parsed `sequences/{sequence}` resource name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SequenceName {
    id: String,
}

impl SequenceName {
    /// Parses a `sequences/{sequence}` name.
    ///
    /// # Example
    /// ```
    /// # use showcase_sequence::names::SequenceName;
    /// let name = SequenceName::parse("sequences/42")?;
    /// assert_eq!(name.id(), "42");
    /// assert!(SequenceName::parse("sequences/42/sequenceReport").is_err());
    /// # Ok::<(), showcase_sequence::Error>(())
    /// ```
    pub fn parse(name: &str) -> Result<Self> {
        let id = name
            .strip_prefix(COLLECTION)
            .and_then(|s| s.strip_prefix('/'))
            .ok_or_else(|| malformed(name, "sequences/{sequence}"))?;
        validate_id(id).map_err(|_| malformed(name, "sequences/{sequence}"))?;
        Ok(Self { id: id.to_string() })
    }

    /// Parses a `sequences/{sequence}/sequenceReport` name.
    ///
    /// # Example
    /// ```
    /// # use showcase_sequence::names::SequenceName;
    /// let name = SequenceName::parse_report("sequences/42/sequenceReport")?;
    /// assert_eq!(name.to_string(), "sequences/42");
    /// assert!(SequenceName::parse_report("sequences/42").is_err());
    /// # Ok::<(), showcase_sequence::Error>(())
    /// ```
    pub fn parse_report(name: &str) -> Result<Self> {
        const PATTERN: &str = "sequences/{sequence}/sequenceReport";
        let sequence = name
            .strip_suffix(REPORT_SUFFIX)
            .and_then(|s| s.strip_suffix('/'))
            .ok_or_else(|| malformed(name, PATTERN))?;
        Self::parse(sequence).map_err(|_| malformed(name, PATTERN))
    }

    /// The `{sequence}` component of the name.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The name of the report for this sequence.
    pub fn report_name(&self) -> String {
        format!("{self}/{REPORT_SUFFIX}")
    }
}

impl std::fmt::Display for SequenceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{COLLECTION}/{}", self.id)
    }
}

fn validate_id(id: &str) -> std::result::Result<(), ()> {
    let valid = |c: char| c.is_ascii_alphanumeric() || "-._~".contains(c);
    if id.is_empty() || !id.chars().all(valid) {
        return Err(());
    }
    Ok(())
}

fn malformed(name: &str, pattern: &str) -> Error {
    Error::InvalidArgument(format!(
        "malformed resource name {name:?}, expected the {pattern} pattern"
    ))
}

/// Generates sequence names that are unique for the lifetime of the process.
#[derive(Debug, Default)]
pub struct NameGenerator {
    next: AtomicU64,
}

impl NameGenerator {
    /// Returns a name that was never returned before by this generator.
    pub fn generate(&self) -> SequenceName {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        SequenceName { id: id.to_string() }
    }
}
