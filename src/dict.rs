//! Dictionary model and loading.
//! Loads dialect term pairs from a versioned JSON file, validates them,
//! and builds the immutable lookup structures used by translation and
//! word resolution.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{error, warn};

/// Compiled-in dictionary copy, used when the on-disk file is missing
/// or unreadable so the app can always start.
const BUILTIN_DICTIONARY: &str = include_str!("../dictionary/nghe_an.json");

/// On-disk dictionary file format.
#[derive(Debug, Deserialize)]
struct DictFile {
    version: u32,
    entries: Vec<RawEntry>,
}

/// An entry as authored in the data file, not yet validated.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEntry {
    pub dialect: String,
    pub standard: String,
}

/// A validated entry. Both sides are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DictEntry {
    pub dialect: String,
    pub standard: String,
}

/// Why a raw entry was excluded at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    EmptyDialect,
    EmptyStandard,
}

/// Report for a raw entry excluded from the active dictionary.
#[derive(Debug, Clone, Serialize)]
pub struct LoadDiagnostic {
    pub index: usize,
    pub dialect: String,
    pub standard: String,
    pub reason: RejectReason,
}

#[derive(Debug)]
pub enum DictError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for DictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DictError::Io(e) => write!(f, "dictionary IO error: {e}"),
            DictError::Parse(e) => write!(f, "dictionary parse error: {e}"),
        }
    }
}

impl From<std::io::Error> for DictError {
    fn from(e: std::io::Error) -> Self {
        DictError::Io(e)
    }
}

impl From<serde_json::Error> for DictError {
    fn from(e: serde_json::Error) -> Self {
        DictError::Parse(e)
    }
}

/// Immutable dialect dictionary.
///
/// `entries` holds the substitution order: descending key length (in
/// chars), ties broken by descending lexicographic order of the
/// case-folded key. `index` maps case-folded dialect terms to positions
/// in `entries`. No mutation API; reloading builds a fresh instance.
pub struct Dictionary {
    version: u32,
    entries: Vec<DictEntry>,
    index: HashMap<String, usize>,
}

impl Dictionary {
    /// Build a dictionary from raw pairs, excluding invalid ones.
    ///
    /// An entry with an empty side (after trimming) is rejected and
    /// reported; duplicate case-folded keys keep the last occurrence.
    /// Never fails: worst case the dictionary comes back empty.
    pub fn from_entries(raw: Vec<RawEntry>, version: u32) -> (Self, Vec<LoadDiagnostic>) {
        let mut diagnostics = Vec::new();
        let mut by_key: HashMap<String, DictEntry> = HashMap::new();

        for (index, entry) in raw.into_iter().enumerate() {
            let dialect = entry.dialect.trim();
            let standard = entry.standard.trim();
            let reason = if dialect.is_empty() {
                Some(RejectReason::EmptyDialect)
            } else if standard.is_empty() {
                Some(RejectReason::EmptyStandard)
            } else {
                None
            };
            if let Some(reason) = reason {
                warn!(
                    index,
                    dialect = %entry.dialect,
                    standard = %entry.standard,
                    ?reason,
                    "dictionary entry rejected"
                );
                diagnostics.push(LoadDiagnostic {
                    index,
                    dialect: entry.dialect,
                    standard: entry.standard,
                    reason,
                });
                continue;
            }
            by_key.insert(
                dialect.to_lowercase(),
                DictEntry {
                    dialect: dialect.to_string(),
                    standard: standard.to_string(),
                },
            );
        }

        // Char lengths are computed once up front so the sort does not
        // rescan every key per comparison.
        let mut keyed: Vec<(usize, String, DictEntry)> = by_key
            .into_iter()
            .map(|(key, entry)| (key.chars().count(), key, entry))
            .collect();
        keyed.sort_by(|(la, ka, _), (lb, kb, _)| lb.cmp(la).then_with(|| kb.cmp(ka)));

        let entries: Vec<DictEntry> = keyed.iter().map(|(_, _, e)| e.clone()).collect();
        let index = keyed
            .into_iter()
            .enumerate()
            .map(|(i, (_, key, _))| (key, i))
            .collect();

        (
            Self {
                version,
                entries,
                index,
            },
            diagnostics,
        )
    }

    /// Load and validate a dictionary from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<(Self, Vec<LoadDiagnostic>), DictError> {
        let content = std::fs::read_to_string(path)?;
        let file: DictFile = serde_json::from_str(&content)?;
        Ok(Self::from_entries(file.entries, file.version))
    }

    /// Build the dictionary from the compiled-in copy.
    pub fn builtin() -> (Self, Vec<LoadDiagnostic>) {
        match serde_json::from_str::<DictFile>(BUILTIN_DICTIONARY) {
            Ok(file) => Self::from_entries(file.entries, file.version),
            Err(e) => {
                // Only reachable if the embedded JSON itself is broken.
                error!(error = %e, "embedded dictionary is malformed");
                (
                    Self {
                        version: 0,
                        entries: Vec::new(),
                        index: HashMap::new(),
                    },
                    Vec::new(),
                )
            }
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in substitution order (longest key first).
    pub fn entries(&self) -> &[DictEntry] {
        &self.entries
    }

    /// Forward lookup. `folded_key` must already be trimmed and
    /// lower-cased.
    pub fn get(&self, folded_key: &str) -> Option<&str> {
        self.index
            .get(folded_key)
            .map(|&i| self.entries[i].standard.as_str())
    }
}
