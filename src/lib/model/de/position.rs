//! Deserializer for the TextPosition type.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Unexpected, Visitor};

use super::super::TextPosition;


const EXPECTING_MSG: &str = "text position: \"top\", \"bottom\", or \"both\"";


impl<'de> Deserialize<'de> for TextPosition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: de::Deserializer<'de>
    {
        deserializer.deserialize_str(TextPositionVisitor)
    }
}

struct TextPositionVisitor;
impl<'de> Visitor<'de> for TextPositionVisitor {
    type Value = TextPosition;

    fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", EXPECTING_MSG)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        TextPosition::from_str(v).map_err(|_| {
            warn!("Failed to parse text position `{}`", v);
            E::invalid_value(Unexpected::Str(v), &self)
        })
    }
}


impl FromStr for TextPosition {
    type Err = String;

    fn from_str(v: &str) -> Result<Self, Self::Err> {
        match v.trim().to_lowercase().as_str() {
            "top" => Ok(TextPosition::Top),
            "bottom" => Ok(TextPosition::Bottom),
            "both" | "all" => Ok(TextPosition::Both),
            _ => Err(v.to_owned()),
        }
    }
}
