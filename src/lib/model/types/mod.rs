//! Module defining the model types.

mod caption;
mod color;
mod request;

pub use self::caption::{Caption, FontChoice, Slot, TextPosition};
pub use self::color::Color;
pub use self::request::{CaptionRequest, ImageSource,
                        Builder as CaptionRequestBuilder,
                        Error as CaptionRequestError};
