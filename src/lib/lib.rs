//!
//! prawn  -- Meme captions, fitted and outlined
//!

             extern crate glob;
             extern crate image;
             extern crate itertools;
#[macro_use] extern crate lazy_static;
#[macro_use] extern crate log;
             extern crate lru_cache;
#[macro_use] extern crate maplit;
             extern crate mime;
             extern crate parking_lot;
             extern crate rusttype;
             extern crate serde;
#[macro_use] extern crate serde_derive;
             extern crate thiserror;


#[cfg(test)] #[macro_use] extern crate serde_json;
#[cfg(test)]              extern crate serde_test;
#[cfg(test)] #[macro_use] extern crate spectral;


mod canvas;
mod caption;
mod model;
mod resources;
mod text;
mod util;


pub use crate::canvas::{prepare, Canvas};
pub use crate::caption::*;
pub use crate::model::*;
pub use crate::resources::*;
pub use crate::text::{fit, layout, render, wrap,
                      FittedLine, FittedText, Margins, PlacedLine, Style, TextMetrics, TextSize};
pub use crate::util::cache::*;


#[cfg(test)]
mod testing;
