//! Level library grouped by difficulty
//!
//! Scans a maps directory once, decoding every level file in parallel, and
//! serves level selection: listing, lookup by name, and a random pick from a
//! difficulty pool.

use crate::core::{Difficulty, Grid};
use crate::level::codec::LevelFile;
use crate::store::ProgressStore;
use crate::{Result, SokobanError};
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::time::Instant;

/// One decoded level file
#[derive(Debug, Clone)]
pub struct LevelEntry {
    pub path: PathBuf,
    pub grid: Arc<Grid>,
}

impl LevelEntry {
    pub fn name(&self) -> &str {
        self.grid.name()
    }
}

/// Levels found under one directory
#[derive(Debug, Default)]
pub struct LevelLibrary {
    pools: FxHashMap<Difficulty, Vec<LevelEntry>>,
    scan_time: std::time::Duration,
}

impl LevelLibrary {
    /// Load every `.xml` level below `dir`
    ///
    /// Checkpoint files are skipped. A missing directory is an empty library;
    /// any level that fails to decode fails the whole scan.
    pub async fn scan(dir: &Path) -> Result<Self> {
        let start = Instant::now();
        if !tokio::fs::try_exists(dir).await? {
            return Ok(LevelLibrary::default());
        }

        // jwalk blocks; keep it off the runtime threads
        let root = dir.to_path_buf();
        let paths = tokio::task::spawn_blocking(move || Self::level_paths(&root)).await??;

        let tasks: Vec<_> = paths
            .into_iter()
            .map(|path| tokio::spawn(async move { Self::load_entry(path).await }))
            .collect();

        let mut pools: FxHashMap<Difficulty, Vec<LevelEntry>> = FxHashMap::default();
        for task in tasks {
            let entry = task.await??;
            pools.entry(entry.grid.difficulty()).or_default().push(entry);
        }
        for pool in pools.values_mut() {
            pool.sort_by(|a, b| a.name().cmp(b.name()));
        }

        Ok(LevelLibrary {
            pools,
            scan_time: start.elapsed(),
        })
    }

    fn level_paths(root: &Path) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in jwalk::WalkDir::new(root).sort(true) {
            let entry =
                entry.map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
            let path = entry.path();
            let is_level = entry.file_type().is_file()
                && path.extension().is_some_and(|ext| ext == "xml")
                && !ProgressStore::is_checkpoint_file(&path);
            if is_level {
                paths.push(path);
            }
        }
        Ok(paths)
    }

    async fn load_entry(path: PathBuf) -> Result<LevelEntry> {
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(SokobanError::IoError)?;
        let grid = LevelFile::parse(&contents, &path)?;
        Ok(LevelEntry {
            path,
            grid: Arc::new(grid),
        })
    }

    pub fn len(&self) -> usize {
        self.pools.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How long the last scan took
    pub fn scan_time(&self) -> std::time::Duration {
        self.scan_time
    }

    /// Every level name, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.pools.values().flatten().map(LevelEntry::name).collect();
        names.sort_unstable();
        names
    }

    pub fn get(&self, name: &str) -> Option<&LevelEntry> {
        self.pools.values().flatten().find(|e| e.name() == name)
    }

    /// Levels of one difficulty, sorted by name
    pub fn pool(&self, difficulty: Difficulty) -> &[LevelEntry] {
        self.pools.get(&difficulty).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Uniform pick from a difficulty pool
    pub fn random<R: Rng + ?Sized>(&self, difficulty: Difficulty, rng: &mut R) -> Option<&LevelEntry> {
        self.pool(difficulty).choose(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::rows_from_letters;
    use crate::core::Biome;
    use crate::store::test_support::scratch_dir;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn write_level(dir: &Path, file: &str, name: &str, difficulty: Difficulty) {
        let grid = Grid::new(name, rows_from_letters(&["PBT"]), Biome::Grass, difficulty).unwrap();
        LevelFile::save(&dir.join(file), &grid).unwrap();
    }

    fn populated(tag: &str) -> PathBuf {
        let dir = scratch_dir(tag);
        write_level(&dir, "a.xml", "Alpha", Difficulty::Easy);
        write_level(&dir, "b.xml", "Bravo", Difficulty::Easy);
        write_level(&dir, "c.xml", "Charlie", Difficulty::Hard);
        write_level(&dir.join("nested"), "d.xml", "Delta", Difficulty::Easy);
        std::fs::write(dir.join("Alpha_save.xml"), "not a level").unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_scan_groups_by_difficulty() {
        let dir = populated("library-groups");
        let library = LevelLibrary::scan(&dir).await.unwrap();

        assert_eq!(library.len(), 4);
        assert_eq!(library.names(), vec!["Alpha", "Bravo", "Charlie", "Delta"]);
        let easy: Vec<_> = library.pool(Difficulty::Easy).iter().map(|e| e.name()).collect();
        assert_eq!(easy, vec!["Alpha", "Bravo", "Delta"]);
        assert_eq!(library.pool(Difficulty::Hard).len(), 1);
        assert!(library.pool(Difficulty::Medium).is_empty());
        assert_eq!(library.get("Charlie").unwrap().path, dir.join("c.xml"));
    }

    #[tokio::test]
    async fn test_random_pick_is_seeded() {
        let dir = populated("library-random");
        let library = LevelLibrary::scan(&dir).await.unwrap();

        let pick = |seed| {
            let mut rng = ChaCha12Rng::seed_from_u64(seed);
            library
                .random(Difficulty::Easy, &mut rng)
                .map(|e| e.name().to_string())
        };
        assert_eq!(pick(7), pick(7));
        assert!(pick(7).is_some());
        let mut rng = ChaCha12Rng::seed_from_u64(7);
        assert!(library.random(Difficulty::Medium, &mut rng).is_none());
    }

    #[tokio::test]
    async fn test_missing_directory_is_empty() {
        let dir = scratch_dir("library-missing").join("absent");
        let library = LevelLibrary::scan(&dir).await.unwrap();
        assert!(library.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_directory_is_an_error() {
        let file = scratch_dir("library-notdir").join("plain.txt");
        std::fs::write(&file, "not a directory").unwrap();

        let result = LevelLibrary::scan(&file.join("maps")).await;
        assert!(matches!(result, Err(SokobanError::IoError(_))), "got {result:?}");
    }

    #[tokio::test]
    async fn test_broken_level_fails_scan() {
        let dir = scratch_dir("library-broken");
        write_level(&dir, "ok.xml", "Fine", Difficulty::Easy);
        std::fs::write(dir.join("bad.xml"), "<SokobanLevel>").unwrap();

        match LevelLibrary::scan(&dir).await {
            Err(SokobanError::LevelLoad { path, .. }) => assert_eq!(path, dir.join("bad.xml")),
            other => panic!("expected a load error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unnamed_level_takes_file_stem() {
        let dir = scratch_dir("library-stem");
        std::fs::write(
            dir.join("Stemmed.xml"),
            r#"<SokobanLevel difficulty="Medium" biome="Rock">
  <LevelStructure width="3" height="1"><Row>TBP</Row></LevelStructure>
</SokobanLevel>"#,
        )
        .unwrap();
        let library = LevelLibrary::scan(&dir).await.unwrap();
        assert_eq!(library.pool(Difficulty::Medium)[0].name(), "Stemmed");
    }
}
