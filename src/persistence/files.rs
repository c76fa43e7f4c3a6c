use crate::error::{StoreError, StoreResult};
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the data directory, both local and under the home directory
pub const DATA_DIR_NAME: &str = ".tasktally";

const PROJECTS_FILE: &str = "projects.json";
const SETTINGS_FILE: &str = "settings.json";
const TASK_FILE_SUFFIX: &str = "_tasks.json";

/// Layout of the collection files inside the data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The single file holding every project
    pub fn projects_file(&self) -> PathBuf {
        self.root.join(PROJECTS_FILE)
    }

    /// Per-project task file (`<project_id>_tasks.json`)
    pub fn task_file(&self, project_id: u64) -> PathBuf {
        self.root.join(format!("{}{}", project_id, TASK_FILE_SUFFIX))
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    /// Every task file currently in the data directory, sorted by name
    pub fn task_files(&self) -> StoreResult<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.root, e)),
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| StoreError::io(&self.root, e))?.path();

            if let Some(filename) = path.file_name().and_then(|n| n.to_str()) {
                if let Some(prefix) = filename.strip_suffix(TASK_FILE_SUFFIX) {
                    if !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()) {
                        files.push(path);
                    }
                }
            }
        }

        files.sort();
        Ok(files)
    }
}

/// Resolve the data directory: explicit path, then a local .tasktally found
/// walking up from the current directory, then ~/.tasktally
pub fn get_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }

    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_data_dir(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DATA_DIR_NAME))
}

/// Find local .tasktally directory by walking up the directory tree
fn find_local_data_dir(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let data_dir = current.join(DATA_DIR_NAME);
        if data_dir.is_dir() {
            return Some(data_dir);
        }

        current = current.parent()?;
    }
}

/// Resolve the data directory and make sure it exists
pub fn ensure_data_dir(explicit: Option<PathBuf>) -> Result<DataDir> {
    let dir = get_data_dir(explicit)?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(DataDir::new(dir))
}

/// Initialize a local .tasktally directory in the current directory
pub fn init_local_data_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let data_dir = current_dir.join(DATA_DIR_NAME);

    if data_dir.exists() {
        anyhow::bail!("Data directory already exists: {}", data_dir.display());
    }

    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create directory: {}", data_dir.display()))?;

    Ok(data_dir)
}

/// Atomically replace a file's content using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> StoreResult<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| StoreError::io(temp_file.path().to_path_buf(), e))?;

    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| StoreError::io(temp_file.path().to_path_buf(), e))?;

    temp_file
        .persist(path)
        .map_err(|e| StoreError::io(path, e.error))?;

    Ok(())
}

/// Read file content; a missing file yields None
pub fn read_file<P: AsRef<Path>>(path: P) -> StoreResult<Option<String>> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

/// Delete a file; deleting a missing file succeeds
pub fn remove_file<P: AsRef<Path>>(path: P) -> StoreResult<()> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_data_dir_explicit() {
        let dir = get_data_dir(Some(PathBuf::from("/tmp/tally-test"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/tally-test"));
    }

    #[test]
    fn test_find_local_data_dir_walks_up() {
        let temp_dir = tempfile::tempdir().unwrap();
        let data_dir = temp_dir.path().join(DATA_DIR_NAME);
        fs::create_dir_all(&data_dir).unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_local_data_dir(&nested), Some(data_dir));
    }

    #[test]
    fn test_data_dir_paths() {
        let dir = DataDir::new("/data");
        assert_eq!(dir.projects_file(), PathBuf::from("/data/projects.json"));
        assert_eq!(dir.task_file(12), PathBuf::from("/data/12_tasks.json"));
        assert_eq!(dir.settings_file(), PathBuf::from("/data/settings.json"));
    }

    #[test]
    fn test_task_files_only_matches_task_collections() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = DataDir::new(temp_dir.path());

        let names = [
            "2_tasks.json",
            "10_tasks.json",
            "projects.json",
            "x_tasks.json",
            "_tasks.json",
        ];
        for name in names {
            fs::write(temp_dir.path().join(name), "[]").unwrap();
        }

        let files = dir.task_files().unwrap();
        assert_eq!(files, vec![dir.task_file(10), dir.task_file(2)]);
    }

    #[test]
    fn test_task_files_missing_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = DataDir::new(temp_dir.path().join("absent"));
        assert!(dir.task_files().unwrap().is_empty());
    }

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.json");

        atomic_write(&test_file, "[1]").unwrap();
        atomic_write(&test_file, "[2]").unwrap();

        assert_eq!(read_file(&test_file).unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn test_read_nonexistent_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("nonexistent.json");

        assert_eq!(read_file(&test_file).unwrap(), None);
    }

    #[test]
    fn test_remove_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("gone.json");

        atomic_write(&test_file, "[]").unwrap();
        remove_file(&test_file).unwrap();
        assert!(!test_file.exists());

        // Second removal is a no-op
        remove_file(&test_file).unwrap();
    }
}
