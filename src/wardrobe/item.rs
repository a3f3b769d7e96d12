use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Kind of garment, used to group clothing buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClothingCategory {
    Tops,
    Bottoms,
    Dresses,
    Hats,
    Glasses,
    Accessories,
}

/// A garment image that can be overlaid on the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub category: ClothingCategory,
    pub image_path: PathBuf,
    /// Point in the image that is pinned to the body anchor (e.g. the neck)
    #[serde(default)]
    pub anchor_x: f64,
    #[serde(default)]
    pub anchor_y: f64,
}

impl ClothingItem {
    pub fn new(
        name: impl Into<String>,
        category: ClothingCategory,
        image_path: impl Into<PathBuf>,
        anchor_x: f64,
        anchor_y: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            image_path: image_path.into(),
            anchor_x,
            anchor_y,
        }
    }
}

/// All garments available in the fitting room
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClothingCatalog {
    items: Vec<ClothingItem>,
}

impl ClothingCatalog {
    pub fn new(items: Vec<ClothingItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ClothingItem] {
        &self.items
    }

    pub fn by_name(&self, name: &str) -> Option<&ClothingItem> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn by_id(&self, id: Uuid) -> Option<&ClothingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn in_category(&self, category: ClothingCategory) -> Vec<ClothingItem> {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
