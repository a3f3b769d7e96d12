//! View model behind a row of clothing buttons
//!
//! Holds the clothes shown for the current category and applies the
//! clothing command when one of the buttons is clicked.

use crate::wardrobe::item::ClothingItem;
use crate::wardrobe::manager::SharedClothingManager;

/// Callback invoked with the name of a property that changed
pub type PropertyChanged = Box<dyn FnMut(&str) + Send>;

pub struct ClothingButtonViewModel {
    clothes: Vec<ClothingItem>,
    manager: SharedClothingManager,
    property_changed: Option<PropertyChanged>,
}

impl ClothingButtonViewModel {
    pub fn new(manager: SharedClothingManager) -> Self {
        Self {
            clothes: Vec::new(),
            manager,
            property_changed: None,
        }
    }

    pub fn on_property_changed(&mut self, callback: impl FnMut(&str) + Send + 'static) {
        self.property_changed = Some(Box::new(callback));
    }

    pub fn clothes(&self) -> &[ClothingItem] {
        &self.clothes
    }

    /// Replace the clothes list. Returns false and stays silent if nothing changed.
    pub fn set_clothes(&mut self, clothes: Vec<ClothingItem>) -> bool {
        if self.clothes == clothes {
            return false;
        }
        self.clothes = clothes;
        if let Some(callback) = self.property_changed.as_mut() {
            callback("clothes");
        }
        true
    }

    /// Clothing command: put the clicked item on
    pub fn cloth_command(&self, item: &ClothingItem) -> bool {
        self.manager.lock().choose(item.clone())
    }

    pub fn manager(&self) -> &SharedClothingManager {
        &self.manager
    }
}
