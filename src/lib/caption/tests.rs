//! Tests for the captioning engine.

use std::io;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use spectral::prelude::*;

use crate::model::{CaptionRequest, FontChoice, ImageSource, TextPosition};
use crate::resources::{FontLoader, Loader};
use crate::testing::{encode, font_directory};
use super::{CaptionError, Engine, OutputFormat};


/// Loader of generated "preset" images.
#[derive(Debug)]
struct GeneratedImages;

impl Loader for GeneratedImages {
    type Item = DynamicImage;
    type Err = io::Error;

    fn load(&self, name: &str) -> Result<DynamicImage, io::Error> {
        match name {
            "landscape" => Ok(gradient(60, 30)),
            _ => Err(io::Error::new(io::ErrorKind::NotFound, name.to_owned())),
        }
    }
}

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 4 % 256) as u8, (y * 4 % 256) as u8, 0x60])
    }))
}

fn engine() -> Engine<GeneratedImages, FontLoader> {
    Engine::with_loaders(GeneratedImages, FontLoader::new(font_directory()))
}

fn png_engine() -> Engine<GeneratedImages, FontLoader> {
    let engine = engine();
    engine.config_mut().output_format = OutputFormat::Png;
    engine
}

fn decode(bytes: &[u8]) -> RgbImage {
    image::load_from_memory(bytes).unwrap().to_rgb8()
}


#[test]
fn thread_safe() {
    fn assert_sync<T: Sync>() {}
    fn assert_send<T: Send>() {}

    assert_sync::<Engine>();
    assert_send::<Engine>();
}

#[test]
fn no_text_is_pixel_identical() {
    let source = gradient(40, 30);
    let request = CaptionRequest::builder(ImageSource::Bytes(encode(&source, ImageFormat::Png)))
        .top_text("").bottom_text("   ")
        .build().unwrap();
    let output = png_engine().caption(request).unwrap();
    assert_eq!(source.to_rgb8(), decode(&output));
}

#[test]
fn captions_change_the_image() {
    let source = gradient(200, 150);
    let request = CaptionRequest::builder(ImageSource::Bytes(encode(&source, ImageFormat::Png)))
        .top_text("one does not simply").bottom_text("caption an image")
        .build().unwrap();
    let output = png_engine().caption(request).unwrap();
    assert_eq!((200, 150), output.dimensions());
    let result = decode(&output);
    assert_eq!(source.to_rgb8().dimensions(), result.dimensions());
    assert_ne!(source.to_rgb8(), result);
}

#[test]
fn excluded_position_is_not_drawn() {
    let source = gradient(80, 60);
    let request = CaptionRequest::builder(ImageSource::Bytes(encode(&source, ImageFormat::Png)))
        .top_text("ignored")
        .position(TextPosition::Bottom)
        .build().unwrap();
    let output = png_engine().caption(request).unwrap();
    assert_eq!(source.to_rgb8(), decode(&output));
}

#[test]
fn preset_with_target_size() {
    let request = CaptionRequest::builder(ImageSource::Preset("landscape".into()))
        .bottom_text("such square")
        .font(FontChoice::Unique)
        .target_size(20)
        .build().unwrap();
    let output = engine().caption(request).unwrap();
    assert_eq!(OutputFormat::Jpeg, output.format());
    assert_eq!(mime::IMAGE_JPEG, output.mime_type());
    let decoded = image::load_from_memory_with_format(&output, ImageFormat::Jpeg).unwrap();
    assert_eq!((20, 20), (decoded.width(), decoded.height()));
}

#[test]
fn default_target_size() {
    let engine = engine();
    engine.config_mut().default_target_size = Some(16);
    let request = CaptionRequest::builder(ImageSource::Preset("landscape".into()))
        .build().unwrap();
    let output = engine.caption(request).unwrap();
    assert_eq!((16, 16), output.dimensions());
}

#[test]
fn preset_images_are_cached() {
    let engine = engine();
    let request = || CaptionRequest::builder(ImageSource::Preset("landscape".into()))
        .build().unwrap();
    engine.caption(request()).unwrap();
    engine.caption(request()).unwrap();
    let cache = engine.image_cache().unwrap();
    assert_eq!(1, cache.len());
    assert_eq!(1, cache.hits());
}

#[test]
fn unknown_preset() {
    let request = CaptionRequest::builder(ImageSource::Preset("portrait".into()))
        .top_text("hello").build().unwrap();
    match engine().caption(request) {
        Err(CaptionError::ImageLoad{ref name, ..}) => assert_eq!("portrait", name),
        r => panic!("expected CaptionError::ImageLoad, got {:?}", r.map(|o| o.dimensions())),
    }
}

#[test]
fn undecodable_bytes() {
    let request = CaptionRequest::builder(ImageSource::Bytes(b"GIF89a nope".to_vec()))
        .build().unwrap();
    match engine().caption(request) {
        Err(CaptionError::ImageLoad{..}) => {}
        r => panic!("expected CaptionError::ImageLoad, got {:?}", r.map(|o| o.dimensions())),
    }
}

#[test]
fn missing_font() {
    let engine = Engine::with_loaders(
        GeneratedImages, FontLoader::new(font_directory().join("nonexistent")));
    let request = CaptionRequest::builder(ImageSource::Preset("landscape".into()))
        .top_text("hello")
        .build().unwrap();
    match engine.caption(request) {
        Err(CaptionError::FontLoad{ref name, ..}) => assert_eq!("impact", name),
        r => panic!("expected CaptionError::FontLoad, got {:?}", r.map(|o| o.dimensions())),
    }
}

#[test]
fn missing_font_without_text() {
    let engine = Engine::with_loaders(
        GeneratedImages, FontLoader::new(font_directory().join("nonexistent")));
    let request = CaptionRequest::builder(ImageSource::Preset("landscape".into()))
        .build().unwrap();
    assert_that!(engine.caption(request).map(|o| o.dimensions())).is_ok();
}

#[test]
fn invalid_config() {
    let engine = engine();
    engine.config_mut().jpeg_quality = 0;
    let request = CaptionRequest::builder(ImageSource::Preset("landscape".into()))
        .build().unwrap();
    match engine.caption(request) {
        Err(CaptionError::Render(_)) => {}
        r => panic!("expected CaptionError::Render, got {:?}", r.map(|o| o.dimensions())),
    }
}

#[test]
fn preload_font() {
    let engine = engine();
    engine.preload_font("bubblegum").unwrap();
    assert_eq!(1, engine.font_cache().unwrap().len());
    assert_that!(engine.preload_font("comicsans")).is_err();
}

#[test]
fn raw_loaders_skip_preloading() {
    let engine = Engine::with_raw_loaders(GeneratedImages, FontLoader::new(font_directory()));
    assert_that!(engine.preload_image("landscape")).is_ok();
    assert_that!(engine.image_cache().is_none()).is_true();
}
