//! Module responsible for fitting & rendering caption text.
//!
//! The pipeline for a single caption is:
//! `fit` (which uses `wrap` and `TextMetrics`) → `layout` → `render`.

mod fit;
mod layout;
mod metrics;
mod render;
mod wrap;


pub use self::fit::{fit, FittedLine, FittedText};
pub use self::layout::{layout, Margins, PlacedLine};
pub use self::metrics::{check, TextMetrics, TextSize};
pub use self::render::{render, Style};
pub use self::wrap::wrap;
