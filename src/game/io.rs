//! The game directory layout (§6). Generalizes the original's
//! process-wide `DEFAULT_GAMES_DIR` / `GamePaths` (`core/paths.py`) into an
//! explicit, threaded value per the Design Notes' "no global state"
//! directive — there is no environment-variable fallback here; the CLI
//! wires a `GamesRoot` explicitly (§1 AMBIENT).

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::game::error::StructuralError;
use crate::time::TurnCode;

/// The directory under which every game's subdirectory lives.
#[derive(Debug, Clone)]
pub struct GamesRoot(PathBuf);

impl GamesRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        GamesRoot(root.into())
    }

    pub fn game_dir(&self, game_id: &str) -> PathBuf {
        self.0.join(game_id)
    }

    pub fn reports_dir(&self, game_id: &str) -> PathBuf {
        self.game_dir(game_id).join("reports")
    }

    pub fn report_path(&self, game_id: &str, turn_code: &TurnCode) -> PathBuf {
        self.reports_dir(game_id)
            .join(format!("{turn_code}_report.json"))
    }

    pub fn game_meta_path(&self, game_id: &str) -> PathBuf {
        self.game_dir(game_id).join("game.json")
    }

    pub fn players_path(&self, game_id: &str) -> PathBuf {
        self.game_dir(game_id).join("players.json")
    }

    pub fn units_path(&self, game_id: &str) -> PathBuf {
        self.game_dir(game_id).join("units.json")
    }

    pub fn orders_path(&self, game_id: &str) -> PathBuf {
        self.game_dir(game_id).join("orders.json")
    }

    pub fn territory_state_path(&self, game_id: &str) -> PathBuf {
        self.game_dir(game_id).join("territory_state.json")
    }

    pub fn list_game_ids(&self) -> Result<Vec<String>, StructuralError> {
        ensure_dir(&self.0)?;
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.0).map_err(|source| StructuralError::Io {
            file: self.0.clone(),
            source,
        })? {
            let entry = entry.map_err(|source| StructuralError::Io {
                file: self.0.clone(),
                source,
            })?;
            if entry.path().is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    ids.push(name.to_string());
                }
            }
        }
        Ok(ids)
    }

    pub fn delete_game(&self, game_id: &str) -> Result<(), StructuralError> {
        let dir = self.game_dir(game_id);
        if !dir.is_dir() {
            return Err(StructuralError::MissingSaveFile(dir));
        }
        fs::remove_dir_all(&dir).map_err(|source| StructuralError::Io { file: dir, source })
    }
}

pub fn ensure_dir(path: &Path) -> Result<(), StructuralError> {
    fs::create_dir_all(path).map_err(|source| StructuralError::Io {
        file: path.to_path_buf(),
        source,
    })
}

/// Reads and deserializes one JSON file, surfacing a missing file distinctly
/// from a malformed one (§6 exit conditions).
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StructuralError> {
    if !path.is_file() {
        return Err(StructuralError::MissingSaveFile(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(|source| StructuralError::Io {
        file: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| StructuralError::MalformedJson {
        file: path.to_path_buf(),
        source,
    })
}

/// Writes a JSON file, creating its parent directory if necessary. No
/// partial writes are attempted beyond what `serde_json`/`fs::write`
/// already guarantee as a single buffered write (§7: "state files are
/// written after resolution succeeds").
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StructuralError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let bytes =
        serde_json::to_vec_pretty(value).map_err(|source| StructuralError::MalformedJson {
            file: path.to_path_buf(),
            source,
        })?;
    fs::write(path, bytes).map_err(|source| StructuralError::Io {
        file: path.to_path_buf(),
        source,
    })
}
