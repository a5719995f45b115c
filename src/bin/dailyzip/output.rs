use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::puzzle_folder_builder::PuzzleFolderBuilder;

/// Where saved puzzles go, one `puzzle_{n}` folder each
pub(crate) struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    pub fn create(root: &Path) -> Result<Self> {
        fs::create_dir_all(root).with_context(|| format!("Error creating output path: {}", root.display()))?;
        Ok(Self { root: root.into() })
    }

    pub fn folder_builder(&self) -> Result<PuzzleFolderBuilder> {
        PuzzleFolderBuilder::new_in(&self.root)
            .with_context(|| format!("Error creating a puzzle folder in {}", self.root.display()))
    }

    /// Moves a finished folder to the first free `puzzle_{n}`
    pub fn save(&self, folder: PuzzleFolderBuilder) -> Result<PathBuf> {
        let path = self.unused_path()?;
        folder
            .save(&path)
            .with_context(|| format!("Error saving puzzle to {}", path.display()))?;
        Ok(path)
    }

    fn unused_path(&self) -> Result<PathBuf> {
        (1..usize::MAX)
            .map(|n| self.root.join(format!("puzzle_{}", n)))
            .find(|path| !path.exists())
            .context("no free puzzle folder name")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use dailyzip::Puzzle;

    use super::OutputDir;

    #[test]
    fn skips_existing_folders() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("puzzle_1")).unwrap();
        let output = OutputDir::create(dir.path()).unwrap();
        let folder = output.folder_builder().unwrap();
        folder.write_puzzle(&Puzzle::empty(1, 1)).unwrap();
        let saved = output.save(folder).unwrap();
        assert_eq!(dir.path().join("puzzle_2"), saved);
        assert!(saved.join("puzzle").is_file());
        let saved = output.save(output.folder_builder().unwrap()).unwrap();
        assert_eq!(dir.path().join("puzzle_3"), saved);
    }

    #[test]
    fn creates_nested_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("a").join("b");
        OutputDir::create(&root).unwrap();
        assert!(root.is_dir());
    }
}
