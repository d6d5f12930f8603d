//! In-memory layout parameter store.
//!
//! Components implement [`crate::core::Target`] so rules and parameter checks
//! can read them; nothing here knows how the parameters are rendered.

mod container;
pub mod component;
pub mod parameter;
pub mod title;

pub use container::Canvas;
pub use component::CanvasComponent;
pub use parameter::ParameterDefinition;
pub use title::{CANVAS_TITLE, COLOR_PATTERNS, title_component};
