use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{Gender, Occasion, OutfitRecord},
};

/// Catalog compiled into the binary
const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

pub type OccasionIndex = HashMap<Occasion, Vec<OutfitRecord>>;

/// Read-only outfit catalog keyed by gender then occasion.
///
/// A (gender, occasion) pair that is present always has at least one
/// outfit; a missing pair means there is no data for it.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<Gender, OccasionIndex>,
}

impl Catalog {
    /// Loads the catalog from `path` when given, otherwise the built-in data
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }

    pub fn builtin() -> AppResult<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_path(path: &str) -> AppResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| AppError::Catalog(format!("Failed to read {}: {}", path, e)))?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> AppResult<Self> {
        let entries: HashMap<Gender, OccasionIndex> = serde_json::from_str(json)
            .map_err(|e| AppError::Catalog(format!("Invalid catalog JSON: {}", e)))?;
        Self::from_entries(entries)
    }

    /// Builds a catalog, rejecting empty occasion lists and item-less outfits
    pub fn from_entries(entries: HashMap<Gender, OccasionIndex>) -> AppResult<Self> {
        for (gender, occasions) in &entries {
            for (occasion, outfits) in occasions {
                if outfits.is_empty() {
                    return Err(AppError::Catalog(format!(
                        "Empty outfit list for {}/{}",
                        gender, occasion
                    )));
                }
                if outfits.iter().any(|outfit| outfit.items.is_empty()) {
                    return Err(AppError::Catalog(format!(
                        "Outfit without items in {}/{}",
                        gender, occasion
                    )));
                }
            }
        }

        let catalog = Self { entries };
        tracing::info!(
            genders = catalog.entries.len(),
            outfits = catalog.len(),
            "Outfit catalog loaded"
        );
        Ok(catalog)
    }

    /// Outfits for one bucket, empty when the pair has no data
    pub fn outfits(&self, gender: Gender, occasion: Occasion) -> &[OutfitRecord] {
        self.entries
            .get(&gender)
            .and_then(|occasions| occasions.get(&occasion))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Genders that have any data, in declaration order
    pub fn genders(&self) -> impl Iterator<Item = Gender> + '_ {
        Gender::ALL
            .into_iter()
            .filter(|gender| self.entries.contains_key(gender))
    }

    /// Total number of outfit records
    pub fn len(&self) -> usize {
        self.entries
            .values()
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
