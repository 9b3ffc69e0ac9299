//! Storage utilities for slowPad
//!
//! Platform directories, the in-window file browser and the recent-files
//! list.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

fn default_limit() -> usize {
    10
}

/// Recently opened or saved documents, newest first, at most `limit` long.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentFiles {
    pub files: Vec<PathBuf>,
    #[serde(default = "default_limit")]
    limit: usize,
}

impl Default for RecentFiles {
    fn default() -> Self {
        Self::new(default_limit())
    }
}

impl RecentFiles {
    pub fn new(limit: usize) -> Self {
        Self { files: Vec::new(), limit }
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        self.files.truncate(limit);
    }

    /// Move `path` to the front, dropping any older copy of it.
    pub fn add(&mut self, path: PathBuf) {
        if let Some(pos) = self.files.iter().position(|p| p == &path) {
            self.files.remove(pos);
        }
        self.files.insert(0, path);
        self.files.truncate(self.limit);
    }

    pub fn load(path: &Path) -> Result<Self> {
        let mut recent: Self = serde_json::from_slice(&std::fs::read(path)?)?;
        recent.files.truncate(recent.limit);
        Ok(recent)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }
}

/// Which files the browser lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFilter {
    /// `*.txt`
    Text,
    /// `*.*`
    All,
}

impl FileFilter {
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            FileFilter::All => true,
            FileFilter::Text => path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("txt")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_directory: bool,
}

impl FileEntry {
    /// Folders before files, then by case-insensitive name.
    fn listing_order(&self, other: &Self) -> Ordering {
        other
            .is_directory
            .cmp(&self.is_directory)
            .then_with(|| self.name.to_lowercase().cmp(&other.name.to_lowercase()))
    }
}

/// Directory listing behind the open and save dialogs.
///
/// A `..` entry leads the list whenever the directory has a parent. Hidden
/// entries are skipped and files must pass `filter`.
#[derive(Debug, Clone)]
pub struct FileBrowser {
    pub current_dir: PathBuf,
    pub entries: Vec<FileEntry>,
    pub selected_index: Option<usize>,
    pub filter: FileFilter,
}

impl FileBrowser {
    pub fn new(start_dir: PathBuf) -> Self {
        let mut browser = Self {
            current_dir: start_dir,
            entries: Vec::new(),
            selected_index: None,
            filter: FileFilter::Text,
        };
        browser.refresh();
        browser
    }

    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.set_filter(filter);
        self
    }

    pub fn set_filter(&mut self, filter: FileFilter) {
        self.filter = filter;
        self.refresh();
    }

    pub fn refresh(&mut self) {
        self.selected_index = None;
        self.entries = self
            .current_dir
            .parent()
            .map(|parent| FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_directory: true,
            })
            .into_iter()
            .collect();

        match self.list_current_dir() {
            Ok(mut listed) => {
                listed.sort_by(FileEntry::listing_order);
                self.entries.extend(listed);
            }
            Err(e) => {
                tracing::warn!(dir = %self.current_dir.display(), error = %e, "cannot list directory");
            }
        }
    }

    fn list_current_dir(&self) -> std::io::Result<Vec<FileEntry>> {
        let listed = std::fs::read_dir(&self.current_dir)?
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                let path = entry.path();
                let is_directory = path.is_dir();
                let visible = !name.starts_with('.') && (is_directory || self.filter.matches(&path));
                visible.then_some(FileEntry { name, path, is_directory })
            })
            .collect();
        Ok(listed)
    }

    pub fn navigate_to(&mut self, path: PathBuf) {
        if path.is_dir() {
            self.current_dir = path;
            self.refresh();
        }
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.selected_index.and_then(|i| self.entries.get(i))
    }

    /// Directory a save should land in: the selected folder if one is
    /// highlighted, otherwise the current one.
    pub fn save_directory(&self) -> PathBuf {
        match self.selected_entry() {
            Some(entry) if entry.is_directory && entry.name != ".." => entry.path.clone(),
            _ => self.current_dir.clone(),
        }
    }
}

/// Per-user config directory for `app_name`, or `.` when there is no home.
pub fn config_dir(app_name: &str) -> PathBuf {
    directories::ProjectDirs::from("co", "slowcomputer", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Where file dialogs start when no directory has been remembered.
pub fn documents_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(Path::to_path_buf))
        .or_else(|| directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}
