//! Persisted session state: the bearer token and the logged-in user's
//! profile, kept together in `~/.tally/session.json` and cleared together
//! on logout.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use tally_api::UserProfile;

pub fn tally_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".tally"))
}

pub fn ensure_tally_home() -> Result<PathBuf> {
    let dir = tally_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

fn session_path() -> Result<PathBuf> {
    Ok(ensure_tally_home()?.join("session.json"))
}

pub fn load_session() -> Result<Session> {
    let p = session_path()?;
    if !p.exists() {
        return Ok(Session::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(serde_json::from_str(&s)?)
}

pub fn save_session(session: &Session) -> Result<()> {
    let p = session_path()?;
    let s = serde_json::to_string_pretty(session)?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

/// Logout: token and profile go away in one stroke.
pub fn clear_session() -> Result<()> {
    let p = session_path()?;
    if p.exists() {
        fs::remove_file(&p).with_context(|| format!("remove {}", p.display()))?;
    }
    Ok(())
}
