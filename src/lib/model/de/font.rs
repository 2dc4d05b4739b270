//! Deserializer for the FontChoice type.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Unexpected, Visitor};

use super::super::FontChoice;


const EXPECTING_MSG: &str = "font name: \"classic\" (\"impact\") or \"unique\" (\"bubblegum\")";


impl<'de> Deserialize<'de> for FontChoice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: de::Deserializer<'de>
    {
        deserializer.deserialize_str(FontChoiceVisitor)
    }
}

struct FontChoiceVisitor;
impl<'de> Visitor<'de> for FontChoiceVisitor {
    type Value = FontChoice;

    fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", EXPECTING_MSG)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        FontChoice::from_str(v).map_err(|_| {
            warn!("Failed to parse font choice `{}`", v);
            E::invalid_value(Unexpected::Str(v), &self)
        })
    }
}


impl FromStr for FontChoice {
    type Err = String;

    fn from_str(v: &str) -> Result<Self, Self::Err> {
        // Accept both the user-facing style names and the font resource names.
        match v.trim().to_lowercase().as_str() {
            "classic" | "impact" => Ok(FontChoice::Classic),
            "unique" | "bubblegum" => Ok(FontChoice::Unique),
            _ => Err(v.to_owned()),
        }
    }
}
