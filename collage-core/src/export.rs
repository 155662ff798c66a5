//! Flat placement records of the projected sprites, for consumers that lay the source images out themselves.

use crate::state::SpriteList;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub sprite_name: String,
    pub image_file_name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One record per sprite, back to front.
#[must_use]
pub fn records(sprites: &SpriteList) -> Vec<ExportRecord> {
    sprites
        .iter()
        .map(|sprite| ExportRecord {
            sprite_name: sprite.name.clone(),
            image_file_name: sprite.image.name().to_owned(),
            x: sprite.x,
            y: sprite.y,
            width: sprite.width,
            height: sprite.height(),
        })
        .collect()
}

/// # Errors
/// Only if serialization itself fails, which plain records never do.
pub fn to_json(sprites: &SpriteList) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&records(sprites))
}
