//! INI-style settings store
//!
//! A flat `[section]` → `key = value` file. Reads never fail: a missing
//! section or key yields the caller's default, and lines the parser does not
//! understand are skipped.
//!
//! Keys are case-insensitive and stored lower-case. Section names keep their
//! case. An indented line continues the value of the key above it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn new(name: &str) -> Self {
        Self { name: name.to_string(), entries: Vec::new() }
    }

    fn value(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn set(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

/// Ordered section → key → value mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigStore {
    sections: Vec<Section>,
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse INI text. Malformed lines are dropped, never reported.
    pub fn parse(text: &str) -> Self {
        let mut store = Self::new();
        let mut current: Option<usize> = None;
        let mut last_key: Option<String> = None;

        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        for raw in text.lines() {
            let line = raw.trim_end_matches('\r');
            let trimmed = line.trim();

            if trimmed.is_empty() {
                last_key = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indented = line.starts_with(|c: char| c.is_whitespace());
            if indented {
                if let (Some(idx), Some(key)) = (current, last_key.as_ref()) {
                    let section = &mut store.sections[idx];
                    if let Some(entry) = section.entries.iter_mut().find(|(k, _)| k == key) {
                        entry.1.push('\n');
                        entry.1.push_str(trimmed);
                    }
                    continue;
                }
            }

            if trimmed.starts_with('[') && trimmed.ends_with(']') && trimmed.len() > 2 {
                let name = trimmed[1..trimmed.len() - 1].trim();
                current = Some(store.section_index_or_insert(name));
                last_key = None;
                continue;
            }

            let Some(idx) = current else {
                // key before any header
                continue;
            };

            let delim = trimmed.find(|c| c == '=' || c == ':');
            let Some(pos) = delim else {
                last_key = None;
                continue;
            };
            let key = normalize_key(&trimmed[..pos]);
            if key.is_empty() {
                last_key = None;
                continue;
            }
            let value = trimmed[pos + 1..].trim().to_string();
            store.sections[idx].set(key.clone(), value);
            last_key = Some(key);
        }

        store
    }

    /// Load from disk. A missing file is created empty and yields an empty
    /// store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }
            }
            std::fs::write(path, "").map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "created empty config file");
            return Ok(Self::new());
        }

        let bytes = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// Overwrite `path` with the serialized store.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_string()).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    fn section_index_or_insert(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        }
    }

    /// Stored value, if any.
    pub fn value(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.value(&normalize_key(key))
    }

    /// Stored value or `default`.
    pub fn get(&self, section: &str, key: &str, default: &str) -> String {
        self.value(section, key).unwrap_or(default).to_string()
    }

    /// Parse the stored value, falling back to `default` when absent or
    /// unparseable.
    pub fn get_parsed<T: FromStr>(&self, section: &str, key: &str, default: T) -> T {
        self.value(section, key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Boolean flag. Accepts `1/0`, `true/false`, `yes/no`, `on/off`.
    pub fn get_flag(&self, section: &str, key: &str, default: bool) -> bool {
        match self.value(section, key).map(|v| v.trim().to_lowercase()) {
            Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
            Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
            _ => default,
        }
    }

    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        let idx = self.section_index_or_insert(section);
        self.sections[idx].set(normalize_key(key), value.into());
    }

    #[cfg(test)]
    fn has_section(&self, section: &str) -> bool {
        self.section(section).is_some()
    }

    #[cfg(test)]
    fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl fmt::Display for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "[{}]", section.name)?;
            for (key, value) in &section.entries {
                writeln!(f, "{} = {}", key, value.replace('\n', "\n\t"))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
