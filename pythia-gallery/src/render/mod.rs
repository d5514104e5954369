//! Gallery rendering
//!
//! - [`card`]: one card per cookbook
//! - [`controls`]: tag filter checkboxes
//! - [`gallery`]: controls + grid of cards

pub mod card;
pub mod controls;
pub mod gallery;

pub use card::render_card;
pub use controls::render_controls;
pub use gallery::assemble_gallery;
