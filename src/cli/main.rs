//!
//! prawnsh -- Meme captions in the shell
//!

             extern crate ansi_term;
             extern crate clap;
             extern crate exitcode;
             extern crate isatty;
#[macro_use] extern crate lazy_static;
             extern crate prawn;
             extern crate slog;
             extern crate slog_envlogger;
             extern crate slog_scope;
             extern crate slog_stdlog;
             extern crate thiserror;
#[macro_use] extern crate log;

#[cfg(test)] #[macro_use] extern crate spectral;


mod args;
mod logging;


use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::exit;

use prawn::{CaptionError, CaptionOutput, Engine};

use crate::args::{ArgsError, Options};


lazy_static! {
    /// Application / package name, as filled out by Cargo.
    static ref NAME: &'static str = option_env!("CARGO_PKG_NAME").unwrap_or("prawnsh");

    /// Application version, as filled out by Cargo.
    static ref VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");
}


fn main() {
    let opts = args::parse().unwrap_or_else(|e| {
        print_args_error(e);
        exit(exitcode::USAGE);
    });

    if let Err(e) = logging::init(opts.verbosity) {
        eprintln!("Failed to initialize logging: {}", e);
        exit(exitcode::SOFTWARE);
    }
    if cfg!(debug_assertions) {
        warn!("Debug mode! The program will likely be much slower.");
    }
    for (i, arg) in env::args().enumerate() {
        debug!("argv[{}] = {:?}", i, arg);
    }
    trace!("Options parsed from argv:\n{:#?}", opts);

    let output = caption(&opts).unwrap_or_else(|e| {
        error!("Error while captioning the image: {}", e);
        exit(exit_code(&e));
    });

    trace!("Writing {} bytes of {}...", output.len(), output.mime_type());
    let written = match opts.output_path.as_ref() {
        Some(path) => {
            // A failed write must not leave a truncated image at `path`.
            let partial = partial_path(path);
            trace!("Opening temporary output file {}...", partial.display());
            let file = fs::File::create(&partial).unwrap_or_else(|e| {
                error!("Failed to open output file {} for writing: {}", partial.display(), e);
                exit(exitcode::CANTCREAT);
            });
            debug!("File {} opened successfully", partial.display());
            save_output(output.bytes(), file, &partial, path)
        }
        None => {
            trace!("No --output given, using standard output");
            if isatty::stdout_isatty() {
                warn!("Standard output is a terminal.");
            }
            write_output(output.bytes(), io::stdout())
        }
    };
    if let Err(e) = written {
        error!("Failed to write the captioned image: {}", e);
        exit(exitcode::IOERR);
    }
}

/// Print an error that may occur while parsing arguments.
fn print_args_error(e: ArgsError) {
    match e {
        // In case of generic parse error,
        // message provided by the clap library will be the usage string.
        ArgsError::Parse(ref e) => eprintln!("{}", e.message),
        e => eprintln!("Failed to parse arguments: {}", e),
    }
}


/// Caption the image described by the options.
fn caption(opts: &Options) -> Result<CaptionOutput, CaptionError> {
    let engine = Engine::new(&opts.image_directory, &opts.font_directory);
    engine.config_mut().output_format = opts.output_format;

    trace!("Captioning {:#?}", opts.request);
    engine.caption(opts.request.clone())
}

/// Write the captioned image to the output.
fn write_output<W: Write>(bytes: &[u8], mut dest: W) -> io::Result<()> {
    dest.write_all(bytes)?;
    dest.flush()
}

/// Write the image to a temporary file and move it to `path` once complete.
/// On failure, the temporary file is removed.
fn save_output<W: Write>(bytes: &[u8], dest: W, partial: &Path, path: &Path) -> io::Result<()> {
    let result = write_output(bytes, dest).and_then(|()| {
        debug!("Moving {} to {}", partial.display(), path.display());
        fs::rename(partial, path)
    });
    if result.is_err() {
        if let Err(e) = fs::remove_file(partial) {
            warn!("Failed to remove temporary file {}: {}", partial.display(), e);
        }
    }
    result
}

/// Temporary file that the output is written to before it's moved to `path`.
fn partial_path(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".into());
    path.with_file_name(format!(".{}.part", name))
}

/// Exit code for the program when captioning fails with given error.
fn exit_code(error: &CaptionError) -> exitcode::ExitCode {
    match *error {
        CaptionError::ImageLoad{..} => exitcode::NOINPUT,
        CaptionError::FontLoad{..} => exitcode::OSFILE,
        CaptionError::Render(_) => exitcode::SOFTWARE,
        CaptionError::Encode(_) => exitcode::SOFTWARE,
    }
}


#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io::{self, Write};
    use std::path::{Path, PathBuf};
    use std::process;

    use spectral::prelude::*;
    use super::{partial_path, save_output};

    struct BrokenPipe;
    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"))
        }
        fn flush(&mut self) -> io::Result<()> { Ok(()) }
    }

    fn scratch_file(name: &str) -> PathBuf {
        env::temp_dir().join(format!("prawnsh-{}-{}.png", process::id(), name))
    }

    #[test]
    fn partial_path_is_a_hidden_sibling() {
        assert_eq!(Path::new("out/.meme.jpg.part"), partial_path(Path::new("out/meme.jpg")));
        assert_eq!(Path::new(".meme.png.part"), partial_path(Path::new("meme.png")));
    }

    #[test]
    fn save_moves_complete_file() {
        let path = scratch_file("complete");
        let partial = partial_path(&path);
        let file = fs::File::create(&partial).unwrap();

        assert_that!(save_output(b"image", file, &partial, &path)).is_ok();
        assert_eq!(b"image".to_vec(), fs::read(&path).unwrap());
        assert_that!(partial.exists()).is_false();
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn failed_write_leaves_nothing_behind() {
        let path = scratch_file("broken");
        let partial = partial_path(&path);
        fs::write(&partial, b"ima").unwrap();

        assert_that!(save_output(b"image", BrokenPipe, &partial, &path)).is_err();
        assert_that!(path.exists()).is_false();
        assert_that!(partial.exists()).is_false();
    }
}
