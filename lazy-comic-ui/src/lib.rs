//! lazy-comic-ui - view components for the comic feed
//!
//! Pure views driven by props and callbacks; the app crate owns the loader
//! and feeds snapshots in.

pub mod components;
pub mod display_types;
pub mod styles;

pub use components::*;
pub use display_types::*;
