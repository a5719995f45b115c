#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

#[macro_use]
extern crate log;

use anyhow::{Context as _, Result};
use dailyzip::collections::Grid;
use dailyzip::puzzle::{complexity, Trace};
use dailyzip::random::Seed;
use dailyzip::solve::{find_complete_path, validate_with};
use dailyzip::{GenerateParams, Generator, Puzzle};

use crate::options::{Options, Source};
use crate::output::OutputDir;

mod options;
mod output;
mod puzzle_folder_builder;

fn main() -> Result<()> {
    env_logger::init();
    let options = Options::from_args()?;
    let output = options.output_path().map(OutputDir::create).transpose()?;
    match options.source() {
        Source::File(file) => run_validate(&options, file, output.as_ref()),
        Source::Generate(generate) => run_generate(&options, generate, output.as_ref()),
    }
}

fn run_validate(options: &Options, file: &options::File, output: Option<&OutputDir>) -> Result<()> {
    println!("Reading puzzle from \"{}\"", file.path.display());
    let puzzle = Puzzle::from_file(&file.path)
        .with_context(|| format!("Error reading puzzle from {}", file.path.display()))?;
    let number_count = file
        .number_count
        .unwrap_or_else(|| puzzle.max_value().map_or(0, |max| max as usize));
    let result = validate_with(&puzzle, number_count, file.mode);
    if options.json() {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", puzzle);
        if result.is_valid {
            println!("Puzzle is valid");
        } else {
            println!("Puzzle is not valid");
            for error in &result.errors {
                println!("  {}", error);
            }
        }
    }
    let trace = if options.show_solution() || output.is_some() {
        find_complete_path(&puzzle)
    } else {
        None
    };
    if options.show_solution() && !options.json() {
        match &trace {
            Some(trace) => print!("{}", solution_grid(&puzzle, trace)),
            None => println!("No solution found"),
        }
    }
    if let Some(output) = output {
        let folder = output.folder_builder()?;
        folder.write_puzzle(&puzzle)?;
        if let Some(trace) = &trace {
            folder.write_solution(&solution_grid(&puzzle, trace))?;
        }
        let path = output.save(folder)?;
        println!("Saved puzzle to {}", path.display());
    }
    Ok(())
}

fn run_generate(options: &Options, generate: &options::Generate, output: Option<&OutputDir>) -> Result<()> {
    let seed: Seed = generate.seed.map_or_else(|| generate.date.into(), Into::into);
    let params = GenerateParams::new(
        generate.rows,
        generate.cols,
        generate.number_count,
        generate.difficulty,
    )
    .with_seed(seed);
    info!("Generating puzzle with {:?}", params);
    let generated = Generator::new().generate(&params)?;
    let solution = solution_grid(&generated.puzzle, &generated.trace);
    if options.json() {
        println!("{}", serde_json::to_string_pretty(&generated)?);
    } else {
        println!(
            "{} puzzle for {} (seed {}, complexity {:.2})",
            generate.difficulty,
            generate.date,
            seed,
            complexity(&generated.puzzle)
        );
        print!("{}", generated.puzzle);
        if options.show_solution() {
            print!("{}", solution);
        }
    }
    if let Some(output) = output {
        let folder = output.folder_builder()?;
        folder.write_puzzle(&generated.puzzle)?;
        folder.write_solution(&solution)?;
        folder.write_json(&generated)?;
        let path = output.save(folder)?;
        println!("Saved puzzle to {}", path.display());
    }
    Ok(())
}

/// The 1-based step at which the trace visits each cell
fn solution_grid(puzzle: &Puzzle, trace: &Trace) -> Grid<usize> {
    let mut grid = Grid::with_dimensions(puzzle.rows(), puzzle.cols());
    for (i, &coord) in trace.iter().enumerate() {
        grid[coord] = i + 1;
    }
    grid
}
