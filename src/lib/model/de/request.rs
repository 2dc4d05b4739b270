//! Deserializer for the CaptionRequest type.

use serde::de::{self, Deserialize};

use super::super::{CaptionRequest, FontChoice, ImageSource, TextPosition};


/// Shape of the request as it appears on the wire.
///
/// It's passed through `CaptionRequestBuilder` afterwards
/// so that deserialized requests are validated the same way as built ones.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCaptionRequest {
    image: ImageSource,
    #[serde(default)]
    top_text: Option<String>,
    #[serde(default)]
    bottom_text: Option<String>,
    #[serde(default)]
    position: Option<TextPosition>,
    #[serde(default)]
    font: Option<FontChoice>,
    #[serde(default, alias = "target_square_size")]
    target_size: Option<u32>,
}


impl<'de> Deserialize<'de> for CaptionRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: de::Deserializer<'de>
    {
        let raw = RawCaptionRequest::deserialize(deserializer)?;
        trace!("Decoded raw caption request for image {}", raw.image.name());

        let mut builder = CaptionRequest::builder(raw.image);
        if let Some(text) = raw.top_text {
            builder = builder.top_text(text);
        }
        if let Some(text) = raw.bottom_text {
            builder = builder.bottom_text(text);
        }
        if let Some(position) = raw.position {
            builder = builder.position(position);
        }
        if let Some(font) = raw.font {
            builder = builder.font(font);
        }
        if let Some(size) = raw.target_size {
            builder = builder.target_size(size);
        }
        builder.build().map_err(de::Error::custom)
    }
}
