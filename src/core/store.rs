use std::path::PathBuf;

use super::error::Result;
use super::state::PetState;

/// Where a pet lives between runs.
pub trait StateStore {
    /// The saved pet, or `None` when there is nothing usable to load.
    fn load(&self) -> Option<PetState>;

    fn save(&mut self, state: &PetState) -> Result<()>;
}

/// JSON state file on disk.
///
/// An optional fallback file is read when the main one does not exist yet,
/// which is how saves from the working directory get picked up. Saves always
/// go to the main path.
pub struct FileStore {
    path: PathBuf,
    fallback: Option<PathBuf>,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path, fallback: None }
    }

    pub fn with_fallback(mut self, fallback: PathBuf) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn source(&self) -> &std::path::Path {
        match &self.fallback {
            Some(fallback) if !self.path.exists() && fallback.exists() => {
                tracing::info!("importing pet from {}", fallback.display());
                fallback
            }
            _ => &self.path,
        }
    }
}

impl StateStore for FileStore {
    /// Missing, unreadable and corrupt files all read as "no pet yet".
    fn load(&self) -> Option<PetState> {
        let source = self.source();
        let content = match std::fs::read_to_string(source) {
            Ok(content) => content,
            Err(e) => {
                tracing::info!("no saved pet at {} ({}), starting fresh", source.display(), e);
                return None;
            }
        };

        match PetState::from_json(&content) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::info!("discarding unreadable save {}: {}", source.display(), e);
                None
            }
        }
    }

    fn save(&mut self, state: &PetState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, state.to_json()?)?;
        Ok(())
    }
}

/// Keeps the pet in memory; used by tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub state: Option<PetState>,
    pub saves: usize,
}

impl StateStore for MemoryStore {
    fn load(&self) -> Option<PetState> {
        self.state
    }

    fn save(&mut self, state: &PetState) -> Result<()> {
        self.state = Some(*state);
        self.saves += 1;
        Ok(())
    }
}
