use std::{
    fs::{self, File},
    io::{self, ErrorKind, Read, Write},
    path::Path,
};

use fs4::fs_std::FileExt;
use tracing::debug;

/// Reads the whole file while holding a shared lock. Returns [None] when the file doesn't exist.
pub fn read_locked(path: &Path) -> Result<Option<String>, io::Error> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    FileExt::lock_shared(&file)?;
    let mut contents = String::new();
    let result = file.read_to_string(&mut contents);
    FileExt::unlock(&file)?;
    result?;

    debug!("Read {} bytes from {path:?}", contents.len());
    Ok(Some(contents))
}

/// Replaces contents of the file with `contents`. The file (and its parent directories) is
/// created if missing.
pub fn write_locked(path: &Path, contents: &[u8]) -> Result<(), io::Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    // Truncating only after the lock is taken so readers never see a half empty file.
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;

    file.lock_exclusive()?;
    let result = write_with_file(&mut file, contents);
    FileExt::unlock(&file)?;
    result?;

    debug!("Wrote {} bytes into {path:?}", contents.len());
    Ok(())
}

fn write_with_file(file: &mut File, contents: &[u8]) -> Result<(), io::Error> {
    file.set_len(0)?;
    file.write_all(contents)?;
    file.flush()?;
    file.sync_data()
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use super::{read_locked, write_locked};

    #[test]
    fn test_read_missing_file() -> Result<()> {
        let dir = tempdir()?;
        assert_eq!(read_locked(&dir.path().join("missing.json"))?, None);
        Ok(())
    }

    #[test]
    fn test_write_then_read() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("data.json");

        write_locked(&path, b"{\"hello\": 1}")?;

        assert_eq!(read_locked(&path)?.as_deref(), Some("{\"hello\": 1}"));
        Ok(())
    }

    #[test]
    fn test_rewrite_truncates_previous_contents() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("data.json");

        write_locked(&path, b"a very long line of previous contents")?;
        write_locked(&path, b"{}")?;

        assert_eq!(read_locked(&path)?.as_deref(), Some("{}"));
        Ok(())
    }

    #[test]
    fn test_write_creates_parent_dirs() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("deeper").join("data.json");

        write_locked(&path, b"{}")?;

        assert!(path.exists());
        Ok(())
    }
}
