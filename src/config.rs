//! Fitting room configuration
//!
//! Stored as a single JSON file: dwell timing, cursor smoothing, the button
//! layout and the clothing catalog.

use crate::error::{FittingRoomError, Result};
use crate::gesture::DwellConfig;
use crate::input::{Bounds, RegionId, SmoothingConfig};
use crate::wardrobe::ClothingCatalog;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A clothing button on screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonLayout {
    pub id: RegionId,
    pub bounds: Bounds,
    /// Name of the catalog item this button puts on
    pub item: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FittingRoomConfig {
    pub dwell: DwellConfig,
    pub smoothing: SmoothingConfig,
    pub buttons: Vec<ButtonLayout>,
    pub catalog: ClothingCatalog,
}

impl FittingRoomConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;

        tracing::info!(
            "Loaded config from {:?}: {} buttons, {} catalog items",
            path,
            config.buttons.len(),
            config.catalog.len()
        );
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Check timing values and that every button points at a known item
    pub fn validate(&self) -> Result<()> {
        self.dwell.validate()?;

        if self.smoothing.enabled && self.smoothing.spring.mass <= 0.0 {
            return Err(FittingRoomError::ConfigurationError(
                "smoothing.spring.mass must be positive".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for button in &self.buttons {
            if !seen.insert(button.id) {
                return Err(FittingRoomError::ConfigurationError(format!(
                    "duplicate button id {}",
                    button.id
                )));
            }
            if button.bounds.width <= 0.0 || button.bounds.height <= 0.0 {
                return Err(FittingRoomError::ConfigurationError(format!(
                    "button {} has empty bounds",
                    button.id
                )));
            }
            if self.catalog.by_name(&button.item).is_none() {
                return Err(FittingRoomError::UnknownClothingItem(button.item.clone()));
            }
        }
        Ok(())
    }
}
