//! Clothes currently worn by the user

use crate::wardrobe::item::{ClothingCategory, ClothingItem};
use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;

/// Manager shared between the clothing buttons and the renderer
pub type SharedClothingManager = Arc<Mutex<ClothingManager>>;

#[derive(Debug, Default)]
pub struct ClothingManager {
    chosen: Vec<ClothingItem>,
}

impl ClothingManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedClothingManager {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Put an item on. Returns false if it is already worn.
    pub fn choose(&mut self, item: ClothingItem) -> bool {
        if self.is_chosen(item.id) {
            return false;
        }
        tracing::info!("Trying on {} ({:?})", item.name, item.category);
        self.chosen.push(item);
        true
    }

    pub fn remove(&mut self, id: Uuid) -> Option<ClothingItem> {
        let index = self.chosen.iter().position(|item| item.id == id)?;
        Some(self.chosen.remove(index))
    }

    /// Take off everything in a category
    pub fn remove_category(&mut self, category: ClothingCategory) -> usize {
        let before = self.chosen.len();
        self.chosen.retain(|item| item.category != category);
        before - self.chosen.len()
    }

    pub fn clear(&mut self) {
        self.chosen.clear();
    }

    pub fn is_chosen(&self, id: Uuid) -> bool {
        self.chosen.iter().any(|item| item.id == id)
    }

    /// Chosen clothes in the order they were put on (draw order)
    pub fn chosen(&self) -> &[ClothingItem] {
        &self.chosen
    }
}
