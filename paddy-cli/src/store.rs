//! Single-slot file persistence for the calculator state.
//!
//! The store owns one file and writes the versioned snapshot into it after
//! every mutating command; the most recent write wins. Loading never
//! fails: a missing slot starts fresh silently, and a corrupt or
//! version-mismatched slot is discarded with a log line. The user sees
//! the default state, not an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use paddy_core::CalculatorState;
use paddy_core::persistence;
use tracing::{debug, warn};

pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved state, falling back to the default state when the
    /// slot is missing, unreadable, or from another schema version.
    pub fn load(&self) -> CalculatorState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved state, starting fresh");
                return CalculatorState::default();
            }
            Err(error) => {
                warn!(path = %self.path.display(), %error, "could not read saved state, starting fresh");
                return CalculatorState::default();
            }
        };

        match persistence::restore(&raw) {
            Some(state) => state,
            None => {
                warn!(
                    path = %self.path.display(),
                    "saved state was unreadable or from another version, starting fresh",
                );
                CalculatorState::default()
            }
        }
    }

    /// Writes the versioned snapshot of `state` into the slot.
    pub fn save(
        &self,
        state: &CalculatorState,
    ) -> Result<()> {
        let json = persistence::snapshot(state)
            .to_json()
            .context("encoding calculator state")?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing state file '{}'", self.path.display()))
    }

    /// Removes the slot. Clearing an already-empty slot is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error)
                .with_context(|| format!("removing state file '{}'", self.path.display())),
        }
    }
}
