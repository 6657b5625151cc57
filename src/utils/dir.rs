use std::{env, io, path::PathBuf};

use anyhow::{anyhow, Result};

const APPLICATION_DIR: &str = "deepwork";

/// Resolves the state directory from environment variables given by `lookup`. Unset and empty
/// variables are skipped.
pub fn state_dir_from(lookup: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
    let mut path = if cfg!(windows) {
        PathBuf::from(var("APPDATA")?)
    } else {
        var("XDG_STATE_HOME").map(PathBuf::from).or_else(|| {
            var("HOME").map(|home| {
                let mut path = PathBuf::from(home);
                path.push(".local/state");
                path
            })
        })?
    };
    path.push(APPLICATION_DIR);
    Some(path)
}

/// Directory for logs and other state that shouldn't live next to the data file.
pub fn create_application_default_path() -> Result<PathBuf> {
    let path = state_dir_from(|name| env::var(name).ok())
        .ok_or_else(|| anyhow!("Couldn't find a state directory, set XDG_STATE_HOME or HOME"))?;

    match std::fs::create_dir_all(&path) {
        Ok(_) => Ok(path),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(path),
        Err(v) => Err(v.into()),
    }
}
