//! Generate puzzles from a seed
//!
//! A generation builds a `DailyRng` from the seed, produces a full trace with the
//! strategy selected by the difficulty and writes the numbers onto the trace.
//! Seeded results are memoized by a `PuzzleCache`.

pub use self::cache::{CacheKey, LruCache, NoCache, PuzzleCache, DEFAULT_CACHE_CAPACITY};
pub use self::placement::place_checkpoints;

pub mod trace;

mod cache;
mod placement;

use rand::{thread_rng, Rng};
use serde::Serialize;

use crate::error::{ConfigurationError, GenerateError};
use crate::puzzle::{Difficulty, Puzzle, Trace, MAX_DIMENSION};
use crate::random::{DailyRng, Seed};

/// The requested puzzle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerateParams {
    pub rows: usize,
    pub cols: usize,
    pub number_count: usize,
    pub difficulty: Difficulty,
    /// Unseeded requests draw a fresh seed and are never cached
    pub seed: Option<Seed>,
}

impl GenerateParams {
    pub fn new(rows: usize, cols: usize, number_count: usize, difficulty: Difficulty) -> Self {
        Self {
            rows,
            cols,
            number_count,
            difficulty,
            seed: None,
        }
    }

    pub fn with_seed(self, seed: impl Into<Seed>) -> Self {
        Self {
            seed: Some(seed.into()),
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigurationError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.rows > MAX_DIMENSION || self.cols > MAX_DIMENSION {
            return Err(ConfigurationError::TooLarge {
                rows: self.rows,
                cols: self.cols,
                max: MAX_DIMENSION,
            });
        }
        if self.number_count == 0 {
            return Err(ConfigurationError::NoNumbers);
        }
        let cells = self.rows.checked_mul(self.cols).ok_or(ConfigurationError::TooLarge {
            rows: self.rows,
            cols: self.cols,
            max: MAX_DIMENSION,
        })?;
        if self.number_count > cells {
            return Err(ConfigurationError::TooManyNumbers {
                count: self.number_count,
                cells,
            });
        }
        Ok(())
    }

    fn cache_key(&self, seed: i64) -> CacheKey {
        CacheKey {
            rows: self.rows,
            cols: self.cols,
            number_count: self.number_count,
            difficulty: self.difficulty,
            seed,
        }
    }
}

/// A puzzle and the trace it was built from. The trace solves the puzzle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedPuzzle {
    #[serde(rename = "grid")]
    pub puzzle: Puzzle,
    pub trace: Trace,
}

/// Generates puzzles, remembering seeded results in a cache
#[derive(Debug, Default)]
pub struct Generator<C = LruCache> {
    cache: C,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: PuzzleCache> Generator<C> {
    pub fn with_cache(cache: C) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn generate(&mut self, params: &GenerateParams) -> Result<GeneratedPuzzle, GenerateError> {
        params.validate()?;
        let seed = match params.seed {
            Some(seed) => seed.normalize(),
            None => return generate_with_seed(params, random_seed()),
        };
        let key = params.cache_key(seed);
        if let Some(puzzle) = self.cache.get(&key) {
            info!("Puzzle cache hit for {:?}", key);
            return Ok(puzzle);
        }
        info!("Puzzle cache miss for {:?}", key);
        let generated = generate_with_seed(params, seed)?;
        self.cache.insert(key, generated.clone());
        Ok(generated)
    }
}

/// Generates a puzzle without a cache
pub fn generate(params: &GenerateParams) -> Result<GeneratedPuzzle, GenerateError> {
    params.validate()?;
    let seed = params.seed.map_or_else(random_seed, Seed::normalize);
    generate_with_seed(params, seed)
}

fn random_seed() -> i64 {
    i64::from(thread_rng().gen::<u32>())
}

fn generate_with_seed(params: &GenerateParams, seed: i64) -> Result<GeneratedPuzzle, GenerateError> {
    let GenerateParams {
        rows,
        cols,
        number_count,
        difficulty,
        ..
    } = *params;
    let mut rng = DailyRng::new(seed);
    let trace = trace::generate_trace(rows, cols, difficulty, &mut rng);
    let mut puzzle = Puzzle::empty(rows, cols);
    place_checkpoints(&mut puzzle, &trace, number_count, difficulty, &mut rng)?;
    info!(
        "Generated {}x{} {} puzzle with {} numbers (seed {})",
        rows, cols, difficulty, number_count, seed
    );
    debug!("Puzzle:\n{}", puzzle);
    Ok(GeneratedPuzzle { puzzle, trace })
}

#[cfg(test)]
mod tests {
    use super::{generate, GenerateParams, Generator};
    use crate::collections::grid::Coord;
    use crate::error::{ConfigurationError, GenerateError};
    use crate::generate::trace::is_full_trace;
    use crate::puzzle::Difficulty;

    #[test]
    fn cache_returns_copies() {
        let mut generator = Generator::new();
        let params = GenerateParams::new(4, 4, 5, Difficulty::Medium).with_seed(12);
        let mut first = generator.generate(&params).unwrap();
        first.puzzle.clear();
        first.trace.clear();
        let second = generator.generate(&params).unwrap();
        assert_eq!(1, generator.cache().len());
        assert_eq!(5, second.puzzle.checkpoints().len());
        assert!(is_full_trace(&second.trace, 4, 4));
    }

    #[test]
    fn cached_matches_uncached() {
        let mut generator = Generator::new();
        let params = GenerateParams::new(5, 6, 7, Difficulty::Hard).with_seed(-3);
        assert_eq!(generate(&params).unwrap(), generator.generate(&params).unwrap());
    }

    #[test]
    fn unseeded_is_not_cached() {
        let mut generator = Generator::new();
        let generated = generator
            .generate(&GenerateParams::new(3, 4, 4, Difficulty::Easy))
            .unwrap();
        assert!(generator.cache().is_empty());
        assert!(is_full_trace(&generated.trace, 3, 4));
    }

    #[test]
    fn invalid_params() {
        let error = generate(&GenerateParams::new(0, 4, 1, Difficulty::Easy)).unwrap_err();
        match error {
            GenerateError::Configuration(ConfigurationError::InvalidDimensions { rows: 0, cols: 4 }) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(generate(&GenerateParams::new(2, 2, 0, Difficulty::Easy)).is_err());
    }

    #[test]
    fn oversized_params() {
        let error = generate(&GenerateParams::new(65, 4, 1, Difficulty::Hard)).unwrap_err();
        match error {
            GenerateError::Configuration(ConfigurationError::TooLarge { rows: 65, cols: 4, max: 64 }) => {}
            other => panic!("unexpected {:?}", other),
        }
        let huge = GenerateParams::new(usize::MAX, usize::MAX, 1, Difficulty::Easy);
        assert!(huge.validate().is_err());
        assert!(GenerateParams::new(64, 64, 10, Difficulty::Easy).validate().is_ok());
    }

    #[test]
    fn single_cell() {
        let generated = generate(&GenerateParams::new(1, 1, 1, Difficulty::Hard).with_seed(0)).unwrap();
        assert_eq!(vec![Coord::new(0, 0)], generated.trace);
        assert_eq!(Some(1), generated.puzzle.value(Coord::new(0, 0)));
    }
}
