//! Deserializers for data model types.

mod font;
mod position;
mod request;
