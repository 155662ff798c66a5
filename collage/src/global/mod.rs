//! Global singletons.

pub mod hotkeys;
