// src/makes/catalog.rs
// =============================================================================
// The list of car makes the search endpoint knows about.
//
// Each entry pairs a display name with the code the site expects in
// `makeCodeList` (e.g. "Land Rover" -> "ROV"). A copy of the list is compiled
// into the binary from static/cars.json; --makes-file swaps in another file
// with the same shape:
//
//   [ { "name": "Acura", "code": "ACURA" }, ... ]
//
// Nothing here refreshes the list from the site. It's read-only reference data.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_MAKES: &str = include_str!("../../static/cars.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarMake {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone)]
pub struct MakeCatalog {
    makes: Vec<CarMake>,
}

impl MakeCatalog {
    // The list shipped with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_MAKES).context("built-in make list is invalid")
    }

    // Loads a make list from a JSON file on disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read make list {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("invalid make list {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let makes: Vec<CarMake> = serde_json::from_str(json)?;
        if makes.is_empty() {
            return Err(anyhow!("make list is empty"));
        }
        Ok(Self { makes })
    }

    // Looks a code up, ignoring ASCII case ("bmw" finds "BMW")
    //
    // Returns the catalog entry so callers send the canonical spelling
    pub fn find_by_code(&self, code: &str) -> Option<&CarMake> {
        self.makes
            .iter()
            .find(|make| make.code == code)
            .or_else(|| self.makes.iter().find(|make| make.code.eq_ignore_ascii_case(code)))
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.find_by_code(code).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CarMake> {
        self.makes.iter()
    }

    pub fn codes(&self) -> Vec<&str> {
        self.makes.iter().map(|make| make.code.as_str()).collect()
    }
}
