use std::fs;
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

use dailyzip::collections::Grid;
use dailyzip::{GeneratedPuzzle, Puzzle};
use tempfile::TempDir;

/// Collects the files of one puzzle in a temporary folder until it is saved
pub struct PuzzleFolderBuilder {
    temp_dir: TempDir,
}

impl PuzzleFolderBuilder {
    /// Starts a hidden folder inside `dir`, so saving is a rename on one file system
    pub fn new_in(dir: &Path) -> io::Result<Self> {
        let temp_dir = tempfile::Builder::new().prefix(".puzzle").tempdir_in(dir)?;
        Ok(Self { temp_dir })
    }

    pub fn save<P: AsRef<Path>>(self, path: P) -> io::Result<()> {
        fs::rename(self.temp_dir.path(), path)
    }

    pub fn write_puzzle(&self, puzzle: &Puzzle) -> io::Result<()> {
        self.write_file("puzzle", puzzle.to_string().as_bytes())
    }

    pub fn write_solution(&self, solution: &Grid<usize>) -> io::Result<()> {
        self.write_file("solution", solution.to_string().as_bytes())
    }

    pub fn write_json(&self, generated: &GeneratedPuzzle) -> io::Result<()> {
        let json = serde_json::to_vec_pretty(generated)?;
        self.write_file("puzzle.json", &json)
    }

    fn write_file(&self, name: &str, contents: &[u8]) -> io::Result<()> {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path)?;
        file.write_all(contents)?;
        Ok(())
    }
}
