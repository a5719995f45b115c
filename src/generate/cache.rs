use linked_hash_map::LinkedHashMap;

use crate::generate::GeneratedPuzzle;
use crate::puzzle::Difficulty;

/// Number of puzzles kept by `LruCache::default()`
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

/// Everything that determines the output of a seeded generation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub rows: usize,
    pub cols: usize,
    pub number_count: usize,
    pub difficulty: Difficulty,
    pub seed: i64,
}

/// Storage for generated puzzles. Implementations hand out copies, never
/// references into their own state.
pub trait PuzzleCache {
    fn get(&mut self, key: &CacheKey) -> Option<GeneratedPuzzle>;

    fn insert(&mut self, key: CacheKey, puzzle: GeneratedPuzzle);
}

/// Keeps the most recently used puzzles up to a fixed capacity
#[derive(Debug)]
pub struct LruCache {
    capacity: usize,
    entries: LinkedHashMap<CacheKey, GeneratedPuzzle>,
}

impl LruCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: LinkedHashMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }
}

impl Default for LruCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl PuzzleCache for LruCache {
    fn get(&mut self, key: &CacheKey) -> Option<GeneratedPuzzle> {
        self.entries.get_refresh(key).map(|puzzle| puzzle.clone())
    }

    fn insert(&mut self, key: CacheKey, puzzle: GeneratedPuzzle) {
        if self.capacity == 0 {
            return;
        }
        self.entries.insert(key, puzzle);
        while self.entries.len() > self.capacity {
            if let Some((evicted, _)) = self.entries.pop_front() {
                debug!("Evicted {:?} from puzzle cache", evicted);
            }
        }
    }
}

/// Stores nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCache;

impl PuzzleCache for NoCache {
    fn get(&mut self, _key: &CacheKey) -> Option<GeneratedPuzzle> {
        None
    }

    fn insert(&mut self, _key: CacheKey, _puzzle: GeneratedPuzzle) {}
}
