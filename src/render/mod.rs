//! Card rendering: colors, the scene display list, templates and rasterization

mod assets;
pub mod canvas;
mod color;
pub mod font;
pub mod scene;
pub mod templates;

pub use assets::AssetSet;
pub use canvas::{paint_scene, PaintError};
pub use color::{Gradient, Rgb};
pub use font::load_font;
pub use scene::Scene;
pub use templates::{CardProps, CardSummary};
