//! Typed site settings.
//!
//! Settings are stored as JSON values under a [`SettingKey`]. Older rows may
//! hold the JSON document as a string instead of an object; [`decode`]
//! accepts both. Missing rows fall back to the type's default.

use core::fmt;
use core::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::{RecordStore, StoreError};

/// Key of a settings row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    HeroImages,
    RestaurantInfo,
    Hours,
    SocialLinks,
}

impl SettingKey {
    pub const ALL: [Self; 4] = [
        Self::HeroImages,
        Self::RestaurantInfo,
        Self::Hours,
        Self::SocialLinks,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HeroImages => "hero_images",
            Self::RestaurantInfo => "restaurant_info",
            Self::Hours => "hours",
            Self::SocialLinks => "social_links",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown setting key: {s}"))
    }
}

/// A value stored under a fixed key.
pub trait Setting: Serialize + DeserializeOwned + Default {
    const KEY: SettingKey;
}

/// Image URLs for the home page slider, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroImages(pub Vec<String>);

impl Setting for HeroImages {
    const KEY: SettingKey = SettingKey::HeroImages;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl Setting for RestaurantInfo {
    const KEY: SettingKey = SettingKey::RestaurantInfo;
}

/// Free-text opening hours, e.g. `lunch: "12:00 - 15:00"`,
/// `lunch_days: "Tue - Sun"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningHours {
    pub lunch: String,
    pub lunch_days: String,
    pub dinner: String,
    pub dinner_days: String,
    pub closed: String,
}

impl Setting for OpeningHours {
    const KEY: SettingKey = SettingKey::Hours;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub facebook: String,
    pub twitter: String,
    pub instagram: String,
}

impl Setting for SocialLinks {
    const KEY: SettingKey = SettingKey::SocialLinks;
}

/// A stored value that matches neither the typed shape nor a string
/// holding it.
#[derive(thiserror::Error, Debug)]
#[error("malformed {key} setting: {source}")]
pub struct SettingsError {
    pub key: SettingKey,
    #[source]
    pub source: serde_json::Error,
}

/// Decode a stored value, unwrapping stringified JSON.
///
/// # Errors
///
/// Returns `SettingsError` when the value does not have the shape of `T`.
pub fn decode<T: Setting>(value: Value) -> Result<T, SettingsError> {
    let result = match value {
        Value::Null => return Ok(T::default()),
        Value::String(raw) => serde_json::from_str(&raw),
        other => serde_json::from_value(other),
    };
    result.map_err(|source| SettingsError {
        key: T::KEY,
        source,
    })
}

/// Everything the settings screen edits, in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub hero_images: HeroImages,
    pub restaurant_info: RestaurantInfo,
    pub hours: OpeningHours,
    pub social_links: SocialLinks,
}

impl SiteSettings {
    /// Read all four settings.
    ///
    /// # Errors
    ///
    /// Propagates store failures; a malformed row is reported as
    /// `StoreError::DataCorruption`.
    pub async fn load<S: RecordStore>(store: &S) -> Result<Self, StoreError> {
        Ok(Self {
            hero_images: load_one(store).await?,
            restaurant_info: load_one(store).await?,
            hours: load_one(store).await?,
            social_links: load_one(store).await?,
        })
    }

    /// Upsert all four settings.
    ///
    /// # Errors
    ///
    /// Stops at the first store failure; earlier keys stay written.
    pub async fn save<S: RecordStore>(&self, store: &S) -> Result<(), StoreError> {
        save_one(store, &self.hero_images).await?;
        save_one(store, &self.restaurant_info).await?;
        save_one(store, &self.hours).await?;
        save_one(store, &self.social_links).await?;
        Ok(())
    }
}

async fn load_one<T: Setting, S: RecordStore>(store: &S) -> Result<T, StoreError> {
    match store.get_setting(T::KEY).await? {
        Some(value) => decode(value).map_err(|e| StoreError::DataCorruption(e.to_string())),
        None => Ok(T::default()),
    }
}

async fn save_one<T: Setting, S: RecordStore>(store: &S, setting: &T) -> Result<(), StoreError> {
    let value =
        serde_json::to_value(setting).map_err(|e| StoreError::Backend(e.to_string()))?;
    store.update_setting(T::KEY, value).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_decode_accepts_object_and_string() {
        let object = json!({"lunch": "12:00 - 15:00", "closed": "Monday"});
        let stringified = Value::String(object.to_string());

        let a: OpeningHours = decode(object).unwrap();
        let b: OpeningHours = decode(stringified).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.closed, "Monday");
        assert_eq!(a.dinner, "");
    }

    #[test]
    fn test_decode_stringified_array() {
        let images: HeroImages = decode(json!("[\"a.jpg\",\"b.jpg\"]")).unwrap();
        assert_eq!(images.0, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        let err = decode::<HeroImages>(json!({"not": "a list"})).unwrap_err();
        assert_eq!(err.key, SettingKey::HeroImages);
    }

    #[test]
    fn test_key_round_trip() {
        for key in SettingKey::ALL {
            assert_eq!(key.as_str().parse::<SettingKey>().unwrap(), key);
        }
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryStore::new();
        assert_eq!(SiteSettings::load(&store).await.unwrap(), SiteSettings::default());

        let settings = SiteSettings {
            hero_images: HeroImages(vec!["https://img.example/hero.jpg".to_owned()]),
            restaurant_info: RestaurantInfo {
                name: "Nosso Sushi Thai".to_owned(),
                address: "Rua da Gastronomia 123, 2870 Montijo".to_owned(),
                ..RestaurantInfo::default()
            },
            ..SiteSettings::default()
        };
        settings.save(&store).await.unwrap();
        assert_eq!(SiteSettings::load(&store).await.unwrap(), settings);
    }

    #[tokio::test]
    async fn test_load_reads_legacy_string_rows() {
        let store = MemoryStore::new();
        store
            .update_setting(
                SettingKey::SocialLinks,
                Value::String(r#"{"instagram":"@nossosushi"}"#.to_owned()),
            )
            .await
            .unwrap();
        let settings = SiteSettings::load(&store).await.unwrap();
        assert_eq!(settings.social_links.instagram, "@nossosushi");
    }
}
