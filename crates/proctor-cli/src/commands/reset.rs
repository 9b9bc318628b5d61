//! The `proctor reset` command.
//!
//! Explicit reset: discards the persisted session so the next run starts at
//! intake. Works from any session state, including completed.

use std::path::PathBuf;

use anyhow::Result;

use proctor_core::store::{FileStore, SessionStore};
use proctor_delivery::config::load_config_from;

pub fn execute(state_dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let state_dir = state_dir.unwrap_or(config.state_dir);

    let store = FileStore::new(&state_dir);
    let existed = store.path().exists();
    store.clear()?;

    if existed {
        println!("Cleared persisted session.");
    } else {
        println!("No persisted session found.");
    }

    Ok(())
}
