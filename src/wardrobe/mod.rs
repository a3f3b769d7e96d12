//! Clothing catalog, chosen clothes and the clothing button view model

pub mod button;
pub mod item;
pub mod manager;

pub use button::ClothingButtonViewModel;
pub use item::{ClothingCatalog, ClothingCategory, ClothingItem};
pub use manager::{ClothingManager, SharedClothingManager};
