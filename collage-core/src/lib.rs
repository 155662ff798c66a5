pub mod actions;
pub mod asset;
pub mod autocrop;
pub mod editor;
pub mod export;
pub mod hit_test;
pub mod id;
pub mod paste;
pub mod pending;
pub mod projector;
pub mod queue;
pub mod raster;
pub mod render;
pub mod state;

pub use id::{SpriteID, UniqueID};
