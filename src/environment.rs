//! Host facts handed to the model as situational context.
//!
//! Only the first few search-path directories, and the first few entries of
//! each, are scanned for tools. The result is a hint for the model, not an
//! inventory.

use std::{
    collections::HashSet,
    env,
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

const SCAN_DIRS: usize = 5;
const SCAN_ENTRIES_PER_DIR: usize = 20;
const SAMPLE_SIZE: usize = 10;

/// Well-known tools, in the order they are reported.
pub const COMMON_COMMANDS: &[&str] = &[
    "ls", "cd", "pwd", "cat", "grep", "find", "cp", "mv", "rm", "mkdir", "chmod", "chown", "ps",
    "top", "kill", "wget", "curl", "git", "nano", "vim",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentContext {
    pub os: String,
    pub current_dir: String,
    pub tools: Vec<String>,
}

/// Snapshot the host. Never fails; anything unreadable is left out.
pub fn probe() -> EnvironmentContext {
    let context = EnvironmentContext {
        os: os_description(),
        current_dir: env::current_dir()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|_| ".".to_string()),
        tools: sample_tools(env::var_os("PATH")),
    };
    tracing::debug!(os = %context.os, cwd = %context.current_dir, tools = ?context.tools, "environment probed");
    context
}

/// OS family plus kernel release, e.g. `Linux 6.8.0-45-generic`.
pub fn os_description() -> String {
    let family = os_family(env::consts::OS);
    match sysinfo::System::kernel_version() {
        Some(release) => format!("{} {}", family, release),
        None => family,
    }
}

fn os_family(os: &str) -> String {
    match os {
        "macos" | "ios" => "Darwin".to_string(),
        "freebsd" => "FreeBSD".to_string(),
        "openbsd" => "OpenBSD".to_string(),
        "netbsd" => "NetBSD".to_string(),
        other => capitalize(other),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Common tools found on `path_var`. With no search path at all the scan
/// cannot run, and the unfiltered head of [`COMMON_COMMANDS`] is returned.
pub fn sample_tools(path_var: Option<OsString>) -> Vec<String> {
    match path_var {
        Some(path_var) => sample_tools_in(env::split_paths(&path_var)),
        None => COMMON_COMMANDS
            .iter()
            .take(SAMPLE_SIZE)
            .map(|s| s.to_string())
            .collect(),
    }
}

pub fn sample_tools_in(dirs: impl IntoIterator<Item = PathBuf>) -> Vec<String> {
    let mut available = HashSet::new();

    for dir in dirs.into_iter().take(SCAN_DIRS) {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.take(SCAN_ENTRIES_PER_DIR).filter_map(|e| e.ok()) {
            let path = entry.path();
            if is_executable(&path) {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    available.insert(name.to_string());
                }
            }
        }
    }

    COMMON_COMMANDS
        .iter()
        .filter(|cmd| available.contains(**cmd))
        .take(SAMPLE_SIZE)
        .map(|s| s.to_string())
        .collect()
}

#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}
