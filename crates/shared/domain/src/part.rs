use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static catalog entry for a physical part, consumed by the renderer and the cart.
///
/// The engine never inspects these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartRecord {
    pub asset_path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub texture_refs: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub material_params: BTreeMap<String, f32>,
}

impl PartRecord {
    #[must_use]
    pub fn new(asset_path: impl Into<String>) -> Self {
        Self {
            asset_path: asset_path.into(),
            texture_refs: Vec::new(),
            material_params: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn texture(mut self, texture: impl Into<String>) -> Self {
        self.texture_refs.push(texture.into());
        self
    }

    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: f32) -> Self {
        self.material_params.insert(name.into(), value);
        self
    }
}
