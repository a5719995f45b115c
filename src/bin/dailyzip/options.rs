use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context as _, Result};
use clap::ArgMatches;
use dailyzip::date::CalendarDate;
use dailyzip::solve::ValidationMode;
use dailyzip::Difficulty;

const DEFAULT_SIZE: usize = 6;
const DEFAULT_NUMBER_COUNT: usize = 8;
const DEFAULT_PATH: &str = "output";

#[derive(Clone)]
pub(crate) struct Options {
    output_path: Option<PathBuf>,
    source: Source,
    show_solution: bool,
    json: bool,
}

impl Options {
    pub fn from_args() -> Result<Self> {
        Self::from_arg_matches(&clap_app().get_matches())
    }

    fn from_arg_matches(matches: &ArgMatches<'_>) -> Result<Self> {
        let source = if let Some(path) = matches.value_of("input") {
            Source::File(File {
                path: path.into(),
                number_count: parse_optional(matches, "numbers")?,
                mode: if matches.is_present("connectivity") {
                    ValidationMode::Connectivity
                } else {
                    ValidationMode::CompletePath
                },
            })
        } else {
            let size = parse_optional(matches, "size")?.unwrap_or(DEFAULT_SIZE);
            let date = parse_optional(matches, "date")?.unwrap_or_else(CalendarDate::today);
            Source::Generate(Generate {
                rows: parse_optional(matches, "rows")?.unwrap_or(size),
                cols: parse_optional(matches, "cols")?.unwrap_or(size),
                number_count: parse_optional(matches, "numbers")?.unwrap_or(DEFAULT_NUMBER_COUNT),
                difficulty: parse_optional(matches, "difficulty")?
                    .unwrap_or_else(|| Difficulty::for_date(date)),
                date,
                seed: parse_optional(matches, "seed")?,
            })
        };
        let output_path = if matches.is_present("save_puzzle") {
            matches.value_of("output_path").map(PathBuf::from)
        } else {
            if matches.occurrences_of("output_path") != 0 {
                bail!("output path specified but nothing to save");
            }
            None
        };
        Ok(Self {
            output_path,
            source,
            show_solution: matches.is_present("show_solution"),
            json: matches.is_present("json"),
        })
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn show_solution(&self) -> bool {
        self.show_solution
    }

    pub fn json(&self) -> bool {
        self.json
    }
}

fn parse_optional<T>(matches: &ArgMatches<'_>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    matches
        .value_of(name)
        .map(|s| {
            s.parse::<T>()
                .with_context(|| format!("invalid value for --{}: \"{}\"", name, s))
        })
        .transpose()
}

#[derive(Clone)]
pub(crate) enum Source {
    File(File),
    Generate(Generate),
}

#[derive(Clone)]
pub(crate) struct File {
    pub path: PathBuf,
    /// defaults to the largest number in the grid
    pub number_count: Option<usize>,
    pub mode: ValidationMode,
}

#[derive(Clone)]
pub(crate) struct Generate {
    pub rows: usize,
    pub cols: usize,
    pub number_count: usize,
    pub difficulty: Difficulty,
    pub date: CalendarDate,
    /// overrides the date as the seed
    pub seed: Option<i64>,
}

fn clap_app() -> clap::App<'static, 'static> {
    use clap::{App, AppSettings, Arg, ArgGroup};

    App::new("dailyzip")
        .author("Cameron Steffen <cam.steffen94@gmail.com>")
        .about("Generate and validate daily path puzzles")
        .setting(AppSettings::ArgRequiredElseHelp)
        .group(
            ArgGroup::with_name("source")
                .args(&["generate", "input"])
                .required(true),
        )
        .arg(
            Arg::with_name("generate")
                .short("g")
                .long("generate")
                .help("generate a puzzle")
                .display_order(1),
        )
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .value_name("PATH")
                .help("validate a puzzle read from a file")
                .display_order(1),
        )
        .arg(
            Arg::with_name("size")
                .short("s")
                .long("size")
                .takes_value(true)
                .value_name("SIZE")
                .requires("generate")
                .help("set the width and height of the generated puzzle"),
        )
        .arg(
            Arg::with_name("rows")
                .long("rows")
                .takes_value(true)
                .value_name("ROWS")
                .requires("generate")
                .help("set the height of the generated puzzle"),
        )
        .arg(
            Arg::with_name("cols")
                .long("cols")
                .takes_value(true)
                .value_name("COLS")
                .requires("generate")
                .help("set the width of the generated puzzle"),
        )
        .arg(
            Arg::with_name("numbers")
                .short("n")
                .long("numbers")
                .takes_value(true)
                .value_name("COUNT")
                .help("the number of checkpoints"),
        )
        .arg(
            Arg::with_name("difficulty")
                .short("d")
                .long("difficulty")
                .takes_value(true)
                .possible_values(&["easy", "medium", "hard"])
                .case_insensitive(true)
                .requires("generate")
                .help("defaults to the difficulty of the weekday"),
        )
        .arg(
            Arg::with_name("date")
                .long("date")
                .takes_value(true)
                .value_name("YYYY-MM-DD")
                .requires("generate")
                .help("the day of the puzzle, defaults to today (UTC)"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .value_name("SEED")
                .requires("generate")
                .help("seed the generator with a number instead of the date"),
        )
        .arg(
            Arg::with_name("connectivity")
                .long("connectivity")
                .requires("input")
                .help("only check that consecutive numbers connect"),
        )
        .arg(
            Arg::with_name("show_solution")
                .long("show-solution")
                .help("print the order in which the solution visits each cell"),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .help("print JSON instead of text"),
        )
        .arg(
            Arg::with_name("save_puzzle")
                .long("save-puzzle")
                .help("save the puzzle and its solution to a folder"),
        )
        .arg(
            Arg::with_name("output_path")
                .long("output-path")
                .short("o")
                .takes_value(true)
                .help("directory to save files")
                .default_value(DEFAULT_PATH),
        )
}

#[cfg(test)]
mod tests {
    use super::{clap_app, Options, Source};
    use dailyzip::Difficulty;

    #[test]
    fn generate_defaults() {
        let matches = clap_app().get_matches_from(vec!["dailyzip", "-g", "--date", "2024-03-16"]);
        let options = Options::from_arg_matches(&matches).unwrap();
        match options.source() {
            Source::Generate(generate) => {
                assert_eq!((6, 6, 8), (generate.rows, generate.cols, generate.number_count));
                assert_eq!(Difficulty::Hard, generate.difficulty);
            }
            Source::File(_) => panic!("expected generate"),
        }
        assert_eq!(None, options.output_path());
    }

    #[test]
    fn output_path_needs_save() {
        let matches = clap_app().get_matches_from(vec!["dailyzip", "-g", "-o", "out"]);
        assert!(Options::from_arg_matches(&matches).is_err());
        let matches = clap_app().get_matches_from(vec!["dailyzip", "-g", "--save-puzzle"]);
        let options = Options::from_arg_matches(&matches).unwrap();
        assert_eq!(Some(std::path::Path::new("output")), options.output_path());
    }
}
