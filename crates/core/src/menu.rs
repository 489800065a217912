//! Menu items as the admin maintains them and the ordering flow reads them.

use chrono::{DateTime, Utc};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::types::{MenuItemId, Money};

/// Menu section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Starters,
    Mains,
    Desserts,
    Drinks,
}

impl Category {
    pub const ALL: [Self; 4] = [Self::Starters, Self::Mains, Self::Desserts, Self::Drinks];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Starters => "starters",
            Self::Mains => "mains",
            Self::Desserts => "desserts",
            Self::Drinks => "drinks",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("invalid menu category: {s}"))
    }
}

/// A dish or drink on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category: Category,
    pub image: Option<String>,
    /// Average guest rating, 0.0 to 5.0.
    pub rating: f32,
    pub reviews_count: i32,
    pub ingredients: Vec<String>,
    /// Free-form line such as "240 kcal • 12g Protein".
    pub nutrition: Option<String>,
    pub benefits: Vec<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new menu item. The store assigns id and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    pub category: Category,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub reviews_count: i32,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub nutrition: Option<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

/// Partial update of a menu item; `None` leaves a field unchanged.
///
/// `image` and `nutrition` are doubly optional so an admin can clear them:
/// `Some(None)` removes the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default, with = "double_option")]
    pub image: Option<Option<String>>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub reviews_count: Option<i32>,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default, with = "double_option")]
    pub nutrition: Option<Option<String>>,
    #[serde(default)]
    pub benefits: Option<Vec<String>>,
    #[serde(default)]
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl MenuItemPatch {
    /// Apply the patch in place.
    pub fn apply_to(self, item: &mut MenuItem) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(image) = self.image {
            item.image = image;
        }
        if let Some(rating) = self.rating {
            item.rating = rating;
        }
        if let Some(reviews_count) = self.reviews_count {
            item.reviews_count = reviews_count;
        }
        if let Some(ingredients) = self.ingredients {
            item.ingredients = ingredients;
        }
        if let Some(nutrition) = self.nutrition {
            item.nutrition = nutrition;
        }
        if let Some(benefits) = self.benefits {
            item.benefits = benefits;
        }
        if let Some(sort_order) = self.sort_order {
            item.sort_order = sort_order;
        }
        if let Some(is_active) = self.is_active {
            item.is_active = is_active;
        }
    }
}

/// Menu listing filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuFilter {
    #[serde(default)]
    pub active_only: bool,
    #[serde(default)]
    pub category: Option<Category>,
}

impl MenuFilter {
    /// What the public menu shows.
    #[must_use]
    pub const fn active() -> Self {
        Self {
            active_only: true,
            category: None,
        }
    }

    #[must_use]
    pub const fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn matches(&self, item: &MenuItem) -> bool {
        (!self.active_only || item.is_active)
            && self.category.is_none_or(|c| c == item.category)
    }
}

/// Distinguishes a missing field from an explicit `null`.
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S, T>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
