//! Module for handling command line arguments.

mod model;
mod parser;


use std::convert::TryFrom;
use std::env;
use std::ffi::OsString;

pub use self::model::{ArgsError, Options};
use self::parser::create_parser;


/// Parse command line arguments and return `Options` object.
#[inline]
pub fn parse() -> Result<Options, ArgsError> {
    parse_from_argv(env::args_os())
}

/// Parse application options from given array of arguments
/// (*all* arguments, including binary name).
#[inline]
pub fn parse_from_argv<I, T>(argv: I) -> Result<Options, ArgsError>
    where I: IntoIterator<Item=T>, T: Clone + Into<OsString>
{
    let parser = create_parser();
    let matches = parser.get_matches_from_safe(argv)?;
    Options::try_from(matches)
}


#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use prawn::{FontChoice, ImageSource, OutputFormat, TextPosition};
    use spectral::prelude::*;

    use crate::NAME;
    use super::{parse_from_argv, ArgsError};

    #[test]
    fn no_args() {
        assert_that!(parse_from_argv(Vec::<&str>::new())).is_err();
        assert_that!(parse_from_argv(vec![*NAME])).is_err();
    }

    #[test]
    fn just_image() {
        let opts = parse_from_argv(vec![*NAME, "cat.jpg"]).unwrap();
        assert_eq!(ImageSource::Path(PathBuf::from("cat.jpg")), opts.request.image);
        assert_eq!(None, opts.request.top_text);
        assert_eq!(None, opts.request.bottom_text);
        assert_eq!(TextPosition::Both, opts.request.position);
        assert_eq!(FontChoice::Classic, opts.request.font);
        assert_eq!(OutputFormat::Jpeg, opts.output_format);
        assert_eq!(None, opts.output_path);
        assert_eq!(0, opts.verbosity);
    }

    #[test]
    fn preset() {
        let opts = parse_from_argv(vec![*NAME, "@doge"]).unwrap();
        assert_eq!(ImageSource::Preset("doge".into()), opts.request.image);
    }

    #[test]
    fn empty_preset() {
        match parse_from_argv(vec![*NAME, "@"]) {
            Err(ArgsError::Request(_)) => {}
            r => panic!("expected ArgsError::Request, got {:?}", r),
        }
    }

    #[test]
    fn unsupported_image() {
        match parse_from_argv(vec![*NAME, "cat.gif"]) {
            Err(ArgsError::Image(ref path)) => assert_eq!(Path::new("cat.gif"), path),
            r => panic!("expected ArgsError::Image, got {:?}", r),
        }
    }

    #[test]
    fn captions() {
        let opts = parse_from_argv(vec![
            *NAME, "@doge", "--top", "such caption", "--bottom", "very text"]).unwrap();
        assert_eq!(Some("such caption"), opts.request.top_text.as_ref().map(|s| s.as_str()));
        assert_eq!(Some("very text"), opts.request.bottom_text.as_ref().map(|s| s.as_str()));
    }

    #[test]
    fn position_and_font() {
        let opts = parse_from_argv(vec![
            *NAME, "@doge", "--position", "bottom", "--font", "unique"]).unwrap();
        assert_eq!(TextPosition::Bottom, opts.request.position);
        assert_eq!(FontChoice::Unique, opts.request.font);
    }

    #[test]
    fn invalid_font() {
        match parse_from_argv(vec![*NAME, "@doge", "--font", "comic sans"]) {
            Err(ArgsError::Font(ref f)) => assert_eq!("comic sans", f),
            r => panic!("expected ArgsError::Font, got {:?}", r),
        }
    }

    #[test]
    fn invalid_position() {
        match parse_from_argv(vec![*NAME, "@doge", "--position", "middle"]) {
            Err(ArgsError::Position(_)) => {}
            r => panic!("expected ArgsError::Position, got {:?}", r),
        }
    }

    #[test]
    fn size() {
        let opts = parse_from_argv(vec![*NAME, "@doge", "--size", "512"]).unwrap();
        assert_eq!(Some(512), opts.request.target_size);

        assert_that!(parse_from_argv(vec![*NAME, "@doge", "--size", "big"])).is_err();
        assert_that!(parse_from_argv(vec![*NAME, "@doge", "--size", "0"])).is_err();
    }

    #[test]
    fn caption_too_long() {
        let text: String = "a".repeat(1000);
        match parse_from_argv(vec![*NAME, "@doge", "--top", &text]) {
            Err(ArgsError::Request(_)) => {}
            r => panic!("expected ArgsError::Request, got {:?}", r),
        }
    }

    #[test]
    fn png() {
        let opts = parse_from_argv(vec![*NAME, "@doge", "--png"]).unwrap();
        assert_eq!(OutputFormat::Png, opts.output_format);
    }

    #[test]
    fn directories() {
        let opts = parse_from_argv(vec![*NAME, "@doge"]).unwrap();
        assert_eq!(Path::new("data/images"), opts.image_directory);
        assert_eq!(Path::new("data/fonts"), opts.font_directory);

        let opts = parse_from_argv(vec![
            *NAME, "@doge", "--image-dir", "/srv/memes", "--font-dir", "/usr/share/fonts"]).unwrap();
        assert_eq!(Path::new("/srv/memes"), opts.image_directory);
        assert_eq!(Path::new("/usr/share/fonts"), opts.font_directory);
    }

    #[test]
    fn output() {
        let opts = parse_from_argv(vec![*NAME, "@doge", "-o", "meme.jpg"]).unwrap();
        assert_eq!(Some(PathBuf::from("meme.jpg")), opts.output_path);

        let opts = parse_from_argv(vec![*NAME, "@doge", "--output", "-"]).unwrap();
        assert_eq!(None, opts.output_path);
    }

    #[test]
    fn verbosity() {
        let opts = parse_from_argv(vec![*NAME, "@doge", "-vv"]).unwrap();
        assert_that!(opts.verbose()).is_true();
        assert_eq!(2, opts.verbosity);

        let opts = parse_from_argv(vec![*NAME, "@doge", "-q"]).unwrap();
        assert_that!(opts.quiet()).is_true();

        assert_that!(parse_from_argv(vec![*NAME, "@doge", "-v", "-q"])).is_err();
    }
}
