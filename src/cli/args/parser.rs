//! Module defining the command line argument parser.

use std::convert::TryFrom;
use std::path::PathBuf;

use clap::{self, AppSettings, Arg, ArgMatches};
use prawn::{is_supported_image, CaptionRequest, FontChoice, ImageSource, OutputFormat,
            TextPosition};

use crate::{NAME, VERSION};
use super::model::{ArgsError, Options};


impl<'a> TryFrom<ArgMatches<'a>> for Options {
    type Error = ArgsError;

    fn try_from(matches: ArgMatches<'a>) -> Result<Self, Self::Error> {
        let verbose_count = matches.occurrences_of(OPT_VERBOSE) as isize;
        let quiet_count = matches.occurrences_of(OPT_QUIET) as isize;
        let verbosity = verbose_count - quiet_count;

        let image = parse_image(matches.value_of(ARG_IMAGE).unwrap_or(""))?;
        let mut builder = CaptionRequest::builder(image);
        if let Some(text) = matches.value_of(OPT_TOP) {
            builder = builder.top_text(text);
        }
        if let Some(text) = matches.value_of(OPT_BOTTOM) {
            builder = builder.bottom_text(text);
        }
        if let Some(position) = matches.value_of(OPT_POSITION) {
            let position = position.parse::<TextPosition>().map_err(ArgsError::Position)?;
            builder = builder.position(position);
        }
        if let Some(font) = matches.value_of(OPT_FONT) {
            let font = font.parse::<FontChoice>().map_err(ArgsError::Font)?;
            builder = builder.font(font);
        }
        if let Some(size) = matches.value_of(OPT_SIZE) {
            let size = size.trim().parse::<u32>()
                .map_err(|_| ArgsError::Size(size.to_owned()))?;
            builder = builder.target_size(size);
        }
        let request = builder.build()?;

        let output_format = if matches.is_present(OPT_PNG) {
            OutputFormat::Png
        } else {
            OutputFormat::Jpeg
        };

        let image_directory = PathBuf::from(
            matches.value_of(OPT_IMAGE_DIR).unwrap_or(DEFAULT_IMAGE_DIR));
        let font_directory = PathBuf::from(
            matches.value_of(OPT_FONT_DIR).unwrap_or(DEFAULT_FONT_DIR));

        // Output path can be set explicit to stdout via `-`.
        let output_path = matches.value_of(OPT_OUTPUT)
            .map(|p| p.trim())
            .and_then(|p| if p == "-" { None } else { Some(p) })
            .map(PathBuf::from);

        Ok(Options{
            verbosity,
            request,
            output_format,
            image_directory,
            font_directory,
            output_path,
        })
    }
}

/// Interpret the IMAGE argument: either `@preset` or a path to an image file.
fn parse_image(arg: &str) -> Result<ImageSource, ArgsError> {
    let arg = arg.trim();
    if arg.starts_with('@') {
        return Ok(ImageSource::Preset(arg[1..].trim().to_owned()));
    }
    let path = PathBuf::from(arg);
    if !is_supported_image(&path) {
        return Err(ArgsError::Image(path));
    }
    Ok(ImageSource::Path(path))
}


// Parser definition

/// Type of the argument parser object
/// (which is called an "App" in clap's silly nomenclature).
pub type Parser<'p> = clap::App<'p, 'p>;


lazy_static! {
    static ref ABOUT: &'static str = option_env!("CARGO_PKG_DESCRIPTION").unwrap_or("");
}

const DEFAULT_IMAGE_DIR: &str = "data/images";
const DEFAULT_FONT_DIR: &str = "data/fonts";

const ARG_IMAGE: &str = "image";
const OPT_TOP: &str = "top";
const OPT_BOTTOM: &str = "bottom";
const OPT_POSITION: &str = "position";
const OPT_FONT: &str = "font";
const OPT_SIZE: &str = "size";
const OPT_PNG: &str = "png";
const OPT_IMAGE_DIR: &str = "image-dir";
const OPT_FONT_DIR: &str = "font-dir";
const OPT_OUTPUT: &str = "output";
const OPT_VERBOSE: &str = "verbose";
const OPT_QUIET: &str = "quiet";


/// Create the parser for application's command line.
pub fn create_parser<'p>() -> Parser<'p> {
    let mut parser = Parser::new(*NAME);
    if let Some(version) = *VERSION {
        parser = parser.version(version);
    }
    parser
        .about(*ABOUT)

        .setting(AppSettings::StrictUtf8)

        .setting(AppSettings::UnifiedHelpMessage)
        .setting(AppSettings::DontCollapseArgsInUsage)
        .setting(AppSettings::DeriveDisplayOrder)

        // Image to caption.
        .arg(Arg::with_name(ARG_IMAGE)
            .value_name("IMAGE")
            .required(true)
            .help("Image to put the captions on")
            .long_help(concat!(
                "The image to caption.\n\n",
                "Either a path to a PNG or JPEG file, or a name of the preset image ",
                "preceded by the `@` sign (e.g. @doge).")))

        // Captions.
        .arg(Arg::with_name(OPT_TOP)
            .long("top").short("t")
            .takes_value(true)
            .value_name("TEXT")
            .help("Text of the top caption"))
        .arg(Arg::with_name(OPT_BOTTOM)
            .long("bottom").short("b")
            .takes_value(true)
            .value_name("TEXT")
            .help("Text of the bottom caption"))
        .arg(Arg::with_name(OPT_POSITION)
            .long("position").short("p")
            .takes_value(true)
            .value_name("WHERE")
            .help("Which captions to render: top, bottom, or both"))
        .arg(Arg::with_name(OPT_FONT)
            .long("font").short("f")
            .takes_value(true)
            .value_name("FONT")
            .help("Caption font: classic (white) or unique (orange)"))

        // Image processing.
        .arg(Arg::with_name(OPT_SIZE)
            .long("size").short("s")
            .takes_value(true)
            .value_name("PIXELS")
            .help("Resize & crop the image to a square of given side"))
        .arg(Arg::with_name(OPT_PNG)
            .long("png")
            .help("Write the image as PNG rather than JPEG"))

        // Resource directories.
        .arg(Arg::with_name(OPT_IMAGE_DIR)
            .long("image-dir")
            .takes_value(true)
            .value_name("DIR")
            .help("Directory with the preset images")
            .default_value(DEFAULT_IMAGE_DIR))
        .arg(Arg::with_name(OPT_FONT_DIR)
            .long("font-dir")
            .takes_value(true)
            .value_name("DIR")
            .help("Directory with the caption fonts")
            .default_value(DEFAULT_FONT_DIR))

        // Output flags.
        .arg(Arg::with_name(OPT_OUTPUT)
            .long("output").short("o")
            .takes_value(true)
            .value_name("PATH")
            .required(false)
            .help("File to write the captioned image to")
            .long_help(concat!(
                "What file should the final image be written to.\n\n",
                "By default, or when this flag is set to `-` (single dash), the image is written ",
                "to standard output so it can be e.g. piped to the ImageMagick `display` program.")))

        // Verbosity flags.
        .arg(Arg::with_name(OPT_VERBOSE)
            .long("verbose").short("v")
            .multiple(true)
            .conflicts_with(OPT_QUIET)
            .help("Increase logging verbosity"))
        .arg(Arg::with_name(OPT_QUIET)
            .long("quiet").short("q")
            .multiple(true)
            .conflicts_with(OPT_VERBOSE)
            .help("Decrease logging verbosity"))

        .help_short("H")
        .version_short("V")
}
