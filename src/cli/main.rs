//!
//! impacc -- Impact font captions in the shell
//!

             extern crate ansi_term;
#[macro_use] extern crate clap;
             extern crate conv;
#[macro_use] extern crate enum_derive;
             extern crate exitcode;
             extern crate impacc;
             extern crate isatty;
#[macro_use] extern crate lazy_static;
#[macro_use] extern crate macro_attr;
             extern crate serde_json;
#[macro_use] extern crate slog;
             extern crate slog_envlogger;
             extern crate slog_scope;
             extern crate slog_stdlog;
             extern crate time;

// `log` must be at the end of these declarations because we want to simultaneously:
// * use the standard `log` macros (which would be shadowed by `slog`)
// * be able to initialize the slog logger using slog macros like o!()
#[macro_use] extern crate log;

#[cfg(test)] #[macro_use] extern crate spectral;


mod args;
mod logging;


use std::env;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::exit;

use impacc::{BUNDLED_FONT, CaptionError, CaptionOutput, Config, Engine, EngineBuilder,
             FontError, format_for_path};

use args::{ArgsError, Options};


lazy_static! {
    /// Application / package name, as filled out by Cargo.
    static ref NAME: &'static str = option_env!("CARGO_PKG_NAME").unwrap_or("impacc");

    /// Application version, as filled out by Cargo.
    static ref VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");
}

/// Directory that fonts are loaded from unless --font-dir is given.
const DEFAULT_FONT_DIRECTORY: &'static str = "data/fonts";


fn main() {
    let opts = args::parse().unwrap_or_else(|e| {
        print_args_error(e).ok();
        exit(exitcode::USAGE);
    });

    let _guard = logging::init(opts.verbosity).unwrap_or_else(|e| {
        writeln!(&mut io::stderr(), "Failed to initialize logging: {}", e).ok();
        exit(exitcode::SOFTWARE);
    });
    if cfg!(debug_assertions) {
        warn!("Debug mode! The program will likely be much slower.");
    }
    for (i, arg) in env::args().enumerate() {
        debug!("argv[{}] = {:?}", i, arg);
    }
    trace!("Options parsed from argv:\n{:#?}", opts);

    let engine = create_engine(&opts);
    let input = read_input(&opts);

    let captioned = engine.caption_bytes(&input, &opts.top, &opts.bottom)
        .unwrap_or_else(|e| {
            error!("Failed to caption the image: {}", e);
            exit(exit_code(&e));
        });

    match opts.output_path.as_ref() {
        Some(path) => {
            check_extension(path, &captioned);
            trace!("Opening --output file {}...", path.display());
            let file = File::create(path).unwrap_or_else(|e| {
                error!("Failed to open output file {} for writing: {}", path.display(), e);
                exit(exitcode::CANTCREAT);
            });
            debug!("File {} opened successfully", path.display());
            write_output(captioned, file)
        }
        None => {
            trace!("No --output given, using standard output");
            if isatty::stdout_isatty() {
                warn!("Standard output is a terminal.");
            }
            write_output(captioned, io::stdout())
        }
    }.unwrap_or_else(|e| {
        error!("Failed to write the captioned image: {}", e);
        exit(exitcode::IOERR);
    });
}

/// Print an error that may occur while parsing arguments.
fn print_args_error(e: ArgsError) -> io::Result<()> {
    match e {
        ArgsError::Parse(ref e) =>
            // In case of generic parse error,
            // message provided by the clap library will be the usage string.
            writeln!(&mut io::stderr(), "{}", e.message),
        e => {
            writeln!(&mut io::stderr(), "Failed to parse arguments: {}", e)
        },
    }
}


/// Create the captioning engine, exiting the program if it's misconfigured.
///
/// If no --font has been given and the default one cannot be found,
/// the font bundled with the program is used instead.
fn create_engine(opts: &Options) -> Engine {
    let config = opts.overrides.apply(load_config(opts));
    debug!("Captioning configuration: {:?}", config);

    let font_directory = opts.font_directory.as_ref()
        .map(|d| d.as_path())
        .unwrap_or_else(|| Path::new(DEFAULT_FONT_DIRECTORY));
    let engine = build_engine(font_directory, opts.font.as_ref().map(|f| f.as_str()), config);

    match engine.preload_font() {
        Ok(()) => engine,
        Err(CaptionError::Font(ref name, FontError::Io(ref e)))
                if opts.font.is_none() && e.kind() == io::ErrorKind::NotFound => {
            warn!("Font `{}` not found in {}, using the bundled `{}` font instead",
                name, font_directory.display(), BUNDLED_FONT);
            let engine = build_engine(font_directory, Some(BUNDLED_FONT), config);
            engine.preload_font().unwrap_or_else(|e| {
                error!("{}", e);
                exit(exitcode::SOFTWARE);
            });
            engine
        }
        Err(e) => {
            error!("{} (font directory: {})", e, font_directory.display());
            exit(exitcode::UNAVAILABLE);
        }
    }
}

fn build_engine(font_directory: &Path, font: Option<&str>, config: Config) -> Engine {
    let mut builder = EngineBuilder::new()
        .font_directory(font_directory)
        .config(config);
    if let Some(font) = font {
        builder = builder.font(font);
    }
    builder.build().unwrap_or_else(|e| {
        error!("Invalid captioning options: {}", e);
        exit(exitcode::USAGE);
    })
}

/// Load the --config file, or return the default configuration if there's none.
fn load_config(opts: &Options) -> Config {
    let path = match opts.config_path {
        Some(ref p) => p,
        None => return Config::default(),
    };
    trace!("Reading configuration from {}...", path.display());
    let file = File::open(path).unwrap_or_else(|e| {
        error!("Failed to open config file {}: {}", path.display(), e);
        exit(exitcode::NOINPUT);
    });
    serde_json::from_reader(file).unwrap_or_else(|e| {
        error!("Invalid config file {}: {}", path.display(), e);
        exit(exitcode::CONFIG);
    })
}

/// Read the bytes of the source image.
fn read_input(opts: &Options) -> Vec<u8> {
    match opts.input_path.as_ref() {
        Some(path) => {
            trace!("Reading --input file {}...", path.display());
            fs::read(path).unwrap_or_else(|e| {
                error!("Failed to read input file {}: {}", path.display(), e);
                exit(exitcode::NOINPUT);
            })
        }
        None => {
            trace!("Reading the image from standard input");
            let mut bytes = vec![];
            io::stdin().read_to_end(&mut bytes).unwrap_or_else(|e| {
                error!("Failed to read standard input: {}", e);
                exit(exitcode::IOERR);
            });
            bytes
        }
    }
}

/// Warn if the output file's extension suggests a different format
/// than the one the image will actually be encoded in.
fn check_extension(path: &Path, output: &CaptionOutput) {
    match format_for_path(path) {
        Some(format) if format == output.format() => {}
        _ => warn!("Output file {} will contain a {:?} image{}",
            path.display(), output.format(),
            output.extension().map(|e| format!(" (expected .{} extension)", e))
                .unwrap_or_default()),
    }
}

/// Write the captioned image to the output.
fn write_output<W: Write>(output: CaptionOutput, mut writer: W) -> io::Result<()> {
    trace!("Writing {} bytes of {:?} image...", output.len(), output.format());
    writer.write_all(output.bytes())?;
    writer.flush()
}

/// Exit code corresponding to a captioning error.
fn exit_code(e: &CaptionError) -> i32 {
    match *e {
        CaptionError::Decode(_) | CaptionError::UnsupportedFormat(_) => exitcode::DATAERR,
        CaptionError::InvalidSize(_) => exitcode::DATAERR,
        CaptionError::Font(..) => exitcode::UNAVAILABLE,
        CaptionError::Render(_) | CaptionError::Encode(_) => exitcode::SOFTWARE,
    }
}
