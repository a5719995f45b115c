use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

use dailyzip::puzzle::Puzzle;
use dailyzip::solve::find_complete_path;
use dailyzip::validate;

#[test]
fn valid_grids() -> Result<()> {
    for path in grid_files("res/test/grids/valid")? {
        println!("Validating {}", path.display());
        let puzzle = Puzzle::from_file(&path)?;
        let max = puzzle.max_value().unwrap_or(0) as usize;
        let result = validate(&puzzle, max);
        assert!(result.is_valid, "{}: {:?}", path.display(), result.errors);
        assert!(result.errors.is_empty());

        let trace = find_complete_path(&puzzle).expect("no path");
        assert_eq!(puzzle.cell_count(), trace.len(), "{}", path.display());
        assert!(trace.windows(2).all(|w| w[0].is_adjacent(w[1])));
        let numbers: Vec<_> = trace.iter().filter_map(|&c| puzzle.value(c)).collect();
        let expected: Vec<_> = (1..=max as u32).collect();
        assert_eq!(expected, numbers, "{}", path.display());
    }
    Ok(())
}

#[test]
fn invalid_grids() -> Result<()> {
    for path in grid_files("res/test/grids/invalid")? {
        println!("Validating {}", path.display());
        let puzzle = Puzzle::from_file(&path)?;
        let max = puzzle.max_value().unwrap_or(0) as usize;
        let result = validate(&puzzle, max);
        assert!(!result.is_valid, "{} should be invalid", path.display());
        assert!(!result.errors.is_empty());
        assert!(find_complete_path(&puzzle).is_none());
    }
    Ok(())
}

#[test]
fn missing_number_is_reported() -> Result<()> {
    let puzzle = Puzzle::from_file(project_path("res/test/grids/invalid/3x3-missing-number"))?;
    let result = validate(&puzzle, 3);
    assert!(!result.has_all_numbers);
    assert!(!result.has_valid_path);
    assert_eq!(2, result.errors.len());
    Ok(())
}

#[test]
fn json_result() -> Result<()> {
    let puzzle = Puzzle::from_file(project_path("res/test/grids/valid/3x3-serpentine"))?;
    let json = serde_json::to_value(validate(&puzzle, 3))?;
    assert_eq!(
        serde_json::json!({
            "isValid": true,
            "hasAllNumbers": true,
            "hasValidPath": true,
            "errors": [],
        }),
        json
    );
    Ok(())
}

fn grid_files(dir: &str) -> Result<Vec<PathBuf>> {
    let mut files = fs::read_dir(project_path(dir))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    files.sort_unstable();
    assert!(!files.is_empty());
    Ok(files)
}

fn project_path(path: impl AsRef<Path>) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(path)
}
