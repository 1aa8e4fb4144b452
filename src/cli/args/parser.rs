//! Module defining the command line argument parser.

use std::path::PathBuf;
use std::str::FromStr;

use conv::TryFrom;
use clap::{self, AppSettings, Arg, ArgMatches};
use impacc::OutlineStrategy;

use super::super::{NAME, VERSION};
use super::model::{ArgsError, ConfigOverrides, Options};


impl<'a> TryFrom<ArgMatches<'a>> for Options {
    type Err = ArgsError;

    fn try_from(matches: ArgMatches<'a>) -> Result<Self, Self::Err> {
        let verbose_count = matches.occurrences_of(OPT_VERBOSE) as isize;
        let quiet_count = matches.occurrences_of(OPT_QUIET) as isize;
        let verbosity = verbose_count - quiet_count;

        // Both paths can be set explicitly to stdin/stdout via `-`.
        let input_path = path_value(&matches, OPT_INPUT);
        let output_path = path_value(&matches, OPT_OUTPUT);

        let top = matches.value_of(OPT_TOP).unwrap_or("").to_owned();
        let bottom = matches.value_of(OPT_BOTTOM).unwrap_or("").to_owned();

        let font = matches.value_of(OPT_FONT).map(|f| f.trim().to_owned());
        let font_directory = matches.value_of(OPT_FONT_DIR).map(PathBuf::from);
        let config_path = matches.value_of(OPT_CONFIG).map(PathBuf::from);

        let overrides = ConfigOverrides{
            outline_strategy: parse_value(&matches, OPT_OUTLINE)?,
            size_divisor: parse_value(&matches, OPT_SIZE_DIVISOR)?,
            outline_thickness: parse_value(&matches, OPT_THICKNESS)?,
            edge_margin: parse_value(&matches, OPT_MARGIN)?,
            fill_color: parse_value(&matches, OPT_COLOR)?,
            outline_color: parse_value(&matches, OPT_OUTLINE_COLOR)?,
        };

        Ok(Options{
            verbosity,
            input_path, output_path,
            top, bottom,
            font, font_directory,
            config_path, overrides,
        })
    }
}

/// Retrieve a path argument, treating `-` as its absence.
fn path_value(matches: &ArgMatches, name: &str) -> Option<PathBuf> {
    matches.value_of(name)
        .map(|p| p.trim())
        .and_then(|p| if p == "-" { None } else { Some(p) })
        .map(PathBuf::from)
}

/// Parse the value of an optional argument.
fn parse_value<T>(matches: &ArgMatches, name: &str) -> Result<Option<T>, ArgsError>
    where T: FromStr, ArgsError: From<T::Err>
{
    match matches.value_of(name) {
        Some(v) => Ok(Some(v.trim().parse()?)),
        None => Ok(None),
    }
}


// Parser definition

/// Type of the argument parser object
/// (which is called an "App" in clap's silly nomenclature).
pub type Parser<'p> = clap::App<'p, 'p>;


lazy_static! {
    static ref ABOUT: &'static str = option_env!("CARGO_PKG_DESCRIPTION").unwrap_or("");

    static ref OUTLINE_HELP: String = format!(
        "Technique of drawing the outline around caption text.\n\n\
         Possible values: {}.", OutlineStrategy::names().join(", "));
}

const OPT_INPUT: &'static str = "input";
const OPT_OUTPUT: &'static str = "output";
const OPT_TOP: &'static str = "top";
const OPT_BOTTOM: &'static str = "bottom";
const OPT_FONT: &'static str = "font";
const OPT_FONT_DIR: &'static str = "font-dir";
const OPT_CONFIG: &'static str = "config";
const OPT_OUTLINE: &'static str = "outline";
const OPT_SIZE_DIVISOR: &'static str = "size-divisor";
const OPT_THICKNESS: &'static str = "thickness";
const OPT_MARGIN: &'static str = "margin";
const OPT_COLOR: &'static str = "color";
const OPT_OUTLINE_COLOR: &'static str = "outline-color";
const OPT_VERBOSE: &'static str = "verbose";
const OPT_QUIET: &'static str = "quiet";


/// Create the parser for application's command line.
#[allow(unknown_lints, dangerous_implicit_autorefs)]
pub fn create_parser<'p>() -> Parser<'p> {
    let mut parser = Parser::new(*NAME);
    if let Some(version) = *VERSION {
        parser = parser.version(version);
    }
    parser
        .about(*ABOUT)
        .author(crate_authors!(", "))

        .setting(AppSettings::StrictUtf8)

        .setting(AppSettings::UnifiedHelpMessage)
        .setting(AppSettings::DontCollapseArgsInUsage)
        .setting(AppSettings::DeriveDisplayOrder)

        // Input & output.
        .arg(Arg::with_name(OPT_INPUT)
            .long("input").short("i")
            .value_name("PATH")
            .required(true)
            .help("Image file to caption")
            .long_help(concat!(
                "GIF, JPEG or PNG image to put the captions on.\n\n",
                "When set to `-` (single dash), the image is read from standard input.")))
        .arg(Arg::with_name(OPT_OUTPUT)
            .long("output").short("o")
            .value_name("PATH")
            .required(false)
            .help("File to write the captioned image to")
            .long_help(concat!(
                "What file should the final image be written to.\n\n",
                "The image is always encoded in the same format as the input. ",
                "By default, or when this flag is set to `-` (single dash), the image is written ",
                "to standard output so it can be e.g. piped to the ImageMagick `display` program.")))

        // Caption texts.
        .arg(Arg::with_name(OPT_TOP)
            .long("top").short("t")
            .value_name("TEXT")
            .allow_hyphen_values(true)
            .help("Text at the top of the image"))
        .arg(Arg::with_name(OPT_BOTTOM)
            .long("bottom").short("b")
            .value_name("TEXT")
            .allow_hyphen_values(true)
            .help("Text at the bottom of the image"))

        // Font.
        .arg(Arg::with_name(OPT_FONT)
            .long("font")
            .value_name("NAME")
            .help("Name of the font to use (default: Impact)")
            .long_help(concat!(
                "Name of the font to use, i.e. the name of its .ttf/.otf file in --font-dir.\n\n",
                "The Impact font is not shipped with the program. ",
                "When this flag is absent and no Impact.ttf can be found, ",
                "the bundled DejaVuSans-Bold font is used instead.")))
        .arg(Arg::with_name(OPT_FONT_DIR)
            .long("font-dir")
            .value_name("DIR")
            .help("Directory with .ttf/.otf font files (default: data/fonts)")
            .long_help(concat!(
                "Directory to load the --font from (default: data/fonts, ",
                "relative to the current directory).\n\n",
                "Put Impact.ttf there to get the classic look.")))

        // Rendering configuration.
        .arg(Arg::with_name(OPT_CONFIG)
            .long("config")
            .value_name("FILE")
            .help("JSON file with the captioning configuration")
            .long_help(concat!(
                "JSON file with the captioning configuration.\n\n",
                "Any of the other rendering flags override the values from this file.")))
        .arg(Arg::with_name(OPT_OUTLINE)
            .long("outline")
            .value_name("STRATEGY")
            .help("Technique of drawing the text outline")
            .long_help(OUTLINE_HELP.as_str()))
        .arg(Arg::with_name(OPT_SIZE_DIVISOR)
            .long("size-divisor")
            .value_name("N")
            .help("Ratio of image height to font size"))
        .arg(Arg::with_name(OPT_THICKNESS)
            .long("thickness")
            .value_name("PX")
            .help("Offset of the stamped outline, in pixels"))
        .arg(Arg::with_name(OPT_MARGIN)
            .long("margin")
            .value_name("PX")
            .help("Distance of captions from the image edges, in pixels"))
        .arg(Arg::with_name(OPT_COLOR)
            .long("color")
            .value_name("COLOR")
            .help("Color of the caption text"))
        .arg(Arg::with_name(OPT_OUTLINE_COLOR)
            .long("outline-color")
            .value_name("COLOR")
            .help("Color of the caption outline"))

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
