//! Plain filesystem helpers behind the REPL's utility commands.

use crate::environment::is_executable;
use crate::error::FileError;
use std::{
    collections::BTreeSet,
    env,
    ffi::OsString,
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

const APP_SCAN_DIRS: usize = 10;
pub const APP_DISPLAY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub kind: EntryKind,
    /// `None` for directories and for files whose metadata could not be read.
    pub size: Option<u64>,
}

/// Entries of `dir`, sorted by name.
pub fn list_dir(dir: &Path) -> Result<Vec<FileEntry>, FileError> {
    let mut entries: Vec<FileEntry> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|entry| {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            if path.is_dir() {
                FileEntry {
                    name,
                    kind: EntryKind::Directory,
                    size: None,
                }
            } else {
                FileEntry {
                    name,
                    kind: EntryKind::File,
                    size: fs::metadata(&path).ok().map(|m| m.len()),
                }
            }
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

pub fn format_size(entry: &FileEntry) -> String {
    match (&entry.kind, entry.size) {
        (EntryKind::Directory, _) => "-".to_string(),
        (EntryKind::File, None) => "unknown".to_string(),
        (EntryKind::File, Some(size)) if size < 1024 => format!("{} bytes", size),
        (EntryKind::File, Some(size)) => format!("{:.1} KB", size as f64 / 1024.0),
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve `arg` to an existing directory without changing into it.
pub fn resolve_dir(arg: &str) -> Result<PathBuf, FileError> {
    let target = expand_tilde(arg.trim());
    match target.canonicalize() {
        Ok(path) if path.is_dir() => Ok(path),
        _ => Err(FileError::DirectoryNotFound(arg.trim().to_string())),
    }
}

pub fn change_dir(arg: &str) -> Result<PathBuf, FileError> {
    let target = resolve_dir(arg)?;
    env::set_current_dir(&target)?;
    Ok(target)
}

/// Executables on the first few search-path directories, sorted and
/// deduplicated.
pub fn list_apps(path_var: Option<OsString>) -> Vec<String> {
    let mut apps = BTreeSet::new();
    let Some(path_var) = path_var else {
        return Vec::new();
    };
    for dir in env::split_paths(&path_var).take(APP_SCAN_DIRS) {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if is_executable(&path) {
                apps.insert(entry.file_name().to_string_lossy().to_string());
            }
        }
    }
    apps.into_iter().collect()
}

/// Read a text file, decoding as Latin-1 when it is not valid UTF-8.
pub fn read_text(path: &Path) -> Result<String, FileError> {
    if !path.exists() {
        return Err(FileError::NotFound(path.display().to_string()));
    }
    if !path.is_file() {
        return Err(FileError::NotAFile(path.display().to_string()));
    }
    let bytes = fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Overwrite,
    Append,
}

impl WriteMode {
    pub fn verb(&self) -> &'static str {
        match self {
            WriteMode::Append => "appended to",
            WriteMode::Create | WriteMode::Overwrite => "written to",
        }
    }
}

/// Write `content`. Appending starts on a fresh line.
pub fn write_text(path: &Path, content: &str, mode: WriteMode) -> Result<(), FileError> {
    match mode {
        WriteMode::Create | WriteMode::Overwrite => fs::write(path, content)?,
        WriteMode::Append => {
            let mut file = OpenOptions::new().append(true).create(true).open(path)?;
            write!(file, "\n{}", content)?;
        }
    }
    Ok(())
}
