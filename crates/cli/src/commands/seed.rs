//! Seed the menu from a YAML file.
//!
//! ```bash
//! ns-cli seed menu --file seeds/menu.yaml
//! ns-cli seed menu --file seeds/menu.yaml --clear
//! ```
//!
//! The file holds a single `items` list; each entry has the fields of a
//! new menu item (`name`, `price` and `category` are required). Items whose
//! name already exists on the menu are skipped, so reseeding is safe.

use std::collections::HashSet;
use std::path::Path;

use nosso_sushi_core::{MenuFilter, NewMenuItem, RecordStore, StoreError};
use serde::Deserialize;
use tracing::{error, info};

use super::{ConnectError, connect};

/// Parsed seed file.
#[derive(Debug, Deserialize)]
pub struct MenuSeed {
    pub items: Vec<NewMenuItem>,
}

/// What a seeding run did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub removed: usize,
    pub inserted: usize,
    pub skipped: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Could not read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0} validation errors found")]
    Invalid(usize),

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Problems that make a seed file unusable, one message per problem.
#[must_use]
pub fn validate(seed: &MenuSeed) -> Vec<String> {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for (index, item) in seed.items.iter().enumerate() {
        let name = item.name.trim();
        if name.is_empty() {
            errors.push(format!("item {} has no name", index + 1));
        } else if !names.insert(name.to_lowercase()) {
            errors.push(format!("duplicate item name: {name}"));
        }
        if !(0.0..=5.0).contains(&item.rating) {
            errors.push(format!("{name}: rating {} is outside 0-5", item.rating));
        }
    }
    errors
}

/// Insert the seed items, optionally deleting the existing menu first.
///
/// # Errors
///
/// Stops at the first store failure; items inserted before it remain.
pub async fn seed_menu<S: RecordStore>(
    store: &S,
    seed: MenuSeed,
    clear_existing: bool,
) -> Result<SeedReport, StoreError> {
    let mut report = SeedReport::default();
    let mut existing = store.list_menu_items(MenuFilter::default()).await?;

    if clear_existing {
        for item in &existing {
            store.delete_menu_item(item.id).await?;
        }
        report.removed = existing.len();
        existing.clear();
    }

    let mut known: HashSet<String> = existing
        .iter()
        .map(|item| item.name.trim().to_lowercase())
        .collect();

    for item in seed.items {
        if !known.insert(item.name.trim().to_lowercase()) {
            report.skipped += 1;
            continue;
        }
        store.create_menu_item(item).await?;
        report.inserted += 1;
    }
    Ok(report)
}

/// Read, validate and load a menu seed file.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed, fails validation,
/// or the database rejects a write.
pub async fn menu(file_path: &str, clear_existing: bool) -> Result<(), SeedError> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(SeedError::FileNotFound(file_path.to_owned()));
    }

    info!(path = %file_path, "Loading menu seed");
    let content = tokio::fs::read_to_string(path).await?;
    let seed: MenuSeed = serde_yaml::from_str(&content)?;
    info!(items = seed.items.len(), "Parsed seed file");

    let errors = validate(&seed);
    if !errors.is_empty() {
        error!("Seed validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(SeedError::Invalid(errors.len()));
    }

    let store = connect().await?;
    let report = seed_menu(&store, seed, clear_existing).await?;

    info!("Seeding complete!");
    info!("  Items removed: {}", report.removed);
    info!("  Items inserted: {}", report.inserted);
    info!("  Items skipped (already on the menu): {}", report.skipped);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nosso_sushi_core::{Category, MemoryStore, Money};

    use super::*;

    const MENU_YAML: &str = include_str!("../../../../seeds/menu.yaml");

    #[test]
    fn test_bundled_menu_parses_and_validates() {
        let seed: MenuSeed = serde_yaml::from_str(MENU_YAML).unwrap();
        assert_eq!(seed.items.len(), 13);
        assert!(validate(&seed).is_empty());

        let gyoza = seed.items.first().unwrap();
        assert_eq!(gyoza.name, "Gyoza Selection");
        assert_eq!(gyoza.price, Money::from_euros(8));
        assert_eq!(gyoza.category, Category::Starters);
        assert!(gyoza.is_active);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let seed: MenuSeed = serde_yaml::from_str(
            "items:\n  - {name: Pad Thai, price: 15, category: mains}\n  - {name: pad thai, price: 15, category: mains}\n",
        )
        .unwrap();
        assert_eq!(validate(&seed), vec!["duplicate item name: pad thai"]);
    }

    #[tokio::test]
    async fn test_reseeding_skips_known_items() {
        let store = MemoryStore::new();
        let first = seed_menu(&store, serde_yaml::from_str(MENU_YAML).unwrap(), false)
            .await
            .unwrap();
        assert_eq!(first.inserted, 13);

        let again = seed_menu(&store, serde_yaml::from_str(MENU_YAML).unwrap(), false)
            .await
            .unwrap();
        assert_eq!(again, SeedReport { removed: 0, inserted: 0, skipped: 13 });

        let cleared = seed_menu(&store, serde_yaml::from_str(MENU_YAML).unwrap(), true)
            .await
            .unwrap();
        assert_eq!(cleared.removed, 13);
        assert_eq!(cleared.inserted, 13);
    }
}
