//! Typed view over the INI settings file
//!
//! Values are read once at startup with defaults, kept in typed fields while
//! the app runs, and written back into the store on shutdown. Keys this
//! module does not know about are left as they were.

use padcore::config::ConfigError;
use padcore::storage::config_dir;
use padcore::ConfigStore;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const APP_ID: &str = "slowpad";
pub const CONFIG_FILE_NAME: &str = "slowpad.ini";

const DISPLAY: &str = "Display";
const SETTING: &str = "Setting";
const FONT: &str = "Font";

/// Font families offered by the font dialog. Anything with "mono" or
/// "courier" in its name renders with egui's monospace family.
pub const FONT_FAMILIES: &[&str] = &[
    "Consolas",
    "Courier New",
    "DejaVu Sans Mono",
    "Liberation Mono",
    "Arial",
    "Helvetica",
    "Times New Roman",
    "Verdana",
];

pub const FONT_SIZES: &[u32] = &[8, 9, 10, 11, 12, 14, 16, 18, 20, 22, 24, 28, 36, 48, 72];

const MONOSPACE_FAMILIES: &[&str] = &["consolas", "lucida console", "menlo", "monaco", "fixedsys"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub width: i32,
    pub height: i32,
    pub x: i32,
    pub y: i32,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self { width: 800, height: 600, x: 0, y: 0 }
    }
}

/// Editor font. `size` is in points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSettings {
    pub family: String,
    pub size: u32,
    pub bold: bool,
    pub italic: bool,
    pub strikeout: bool,
    pub underline: bool,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            family: "Consolas".to_string(),
            size: 10,
            bold: false,
            italic: false,
            strikeout: false,
            underline: false,
        }
    }
}

impl FontSettings {
    pub fn is_monospace(&self) -> bool {
        let family = self.family.to_lowercase();
        family.contains("mono")
            || family.contains("courier")
            || MONOSPACE_FAMILIES.contains(&family.as_str())
    }

    /// Size in egui points, assuming 96 dpi.
    pub fn pixel_size(&self) -> f32 {
        self.size as f32 * 4.0 / 3.0
    }

    pub fn font_id(&self) -> egui::FontId {
        if self.is_monospace() {
            egui::FontId::monospace(self.pixel_size())
        } else {
            egui::FontId::proportional(self.pixel_size())
        }
    }
}

pub struct Settings {
    store: ConfigStore,
    path: PathBuf,
    pub window: WindowGeometry,
    /// Directory the file dialog starts in; empty means the documents dir
    pub last_dir: String,
    pub font: FontSettings,
}

impl Settings {
    pub fn default_path() -> PathBuf {
        config_dir(APP_ID).join(CONFIG_FILE_NAME)
    }

    /// Load settings from `path`. Failures fall back to defaults.
    pub fn load(path: PathBuf) -> Self {
        let store = match ConfigStore::load(&path) {
            Ok(store) => store,
            Err(e) => {
                warn!("using default settings: {}", e);
                ConfigStore::new()
            }
        };
        Self::from_store(store, path)
    }

    pub fn from_store(store: ConfigStore, path: PathBuf) -> Self {
        let defaults = WindowGeometry::default();
        let positive = |value: i32, default: i32| if value > 0 { value } else { default };
        let window = WindowGeometry {
            width: positive(store.get_parsed(DISPLAY, "width", defaults.width), defaults.width),
            height: positive(store.get_parsed(DISPLAY, "height", defaults.height), defaults.height),
            x: store.get_parsed(DISPLAY, "x", defaults.x),
            y: store.get_parsed(DISPLAY, "y", defaults.y),
        };

        let default_font = FontSettings::default();
        let family = store.get(FONT, "family", &default_font.family);
        let font = FontSettings {
            family: if family.trim().is_empty() { default_font.family } else { family },
            size: match store.get_parsed(FONT, "size", default_font.size) {
                0 => default_font.size,
                size => size,
            },
            bold: store.get_flag(FONT, "bold", false),
            italic: store.get_flag(FONT, "italic", false),
            strikeout: store.get_flag(FONT, "strikeout", false),
            underline: store.get_flag(FONT, "underline", false),
        };

        let last_dir = store.get(SETTING, "dir", "");

        Self { store, path, window, last_dir, font }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy the typed values into the store.
    pub fn write_back(&mut self) {
        let flag = |b: bool| if b { "1" } else { "0" };
        self.store.set(DISPLAY, "width", self.window.width.to_string());
        self.store.set(DISPLAY, "height", self.window.height.to_string());
        self.store.set(DISPLAY, "x", self.window.x.to_string());
        self.store.set(DISPLAY, "y", self.window.y.to_string());
        self.store.set(SETTING, "dir", self.last_dir.clone());
        self.store.set(FONT, "family", self.font.family.clone());
        self.store.set(FONT, "size", self.font.size.to_string());
        self.store.set(FONT, "bold", flag(self.font.bold));
        self.store.set(FONT, "italic", flag(self.font.italic));
        self.store.set(FONT, "strikeout", flag(self.font.strikeout));
        self.store.set(FONT, "underline", flag(self.font.underline));
    }

    /// Write back and rewrite the settings file.
    pub fn save(&mut self) -> Result<(), ConfigError> {
        self.write_back();
        self.store.save(&self.path)?;
        info!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    /// Remember the directory of a file the user opened or saved.
    pub fn remember_dir_of(&mut self, file: &Path) {
        if let Some(parent) = file.parent() {
            if !parent.as_os_str().is_empty() {
                self.last_dir = parent.to_string_lossy().to_string();
            }
        }
    }

    /// Directory the file dialog should start in, if one is remembered and
    /// still exists.
    pub fn start_dir(&self) -> Option<PathBuf> {
        let dir = PathBuf::from(&self.last_dir);
        if !self.last_dir.is_empty() && dir.is_dir() {
            Some(dir)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("slowpad-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn test_defaults_from_empty_store() {
        let settings = Settings::from_store(ConfigStore::new(), PathBuf::from("unused.ini"));
        assert_eq!(settings.window, WindowGeometry { width: 800, height: 600, x: 0, y: 0 });
        assert_eq!(settings.last_dir, "");
        assert_eq!(settings.font, FontSettings::default());
        assert_eq!(settings.font.family, "Consolas");
        assert_eq!(settings.font.size, 10);
    }

    #[test]
    fn test_reads_typed_values() {
        let store = ConfigStore::parse(
            "[Display]\nwidth = 1024\nheight = 700\nx = 10\ny = -5\n\n\
             [Setting]\ndir = /home/user/docs\n\n\
             [Font]\nfamily = Courier New\nsize = 14\nbold = 1\nunderline = true\n",
        );
        let settings = Settings::from_store(store, PathBuf::from("unused.ini"));
        assert_eq!(settings.window, WindowGeometry { width: 1024, height: 700, x: 10, y: -5 });
        assert_eq!(settings.last_dir, "/home/user/docs");
        assert_eq!(settings.font.family, "Courier New");
        assert_eq!(settings.font.size, 14);
        assert!(settings.font.bold);
        assert!(!settings.font.italic);
        assert!(settings.font.underline);
    }

    #[test]
    fn test_garbage_values_fall_back() {
        let store = ConfigStore::parse("[Display]\nwidth = wide\nheight = -3\n[Font]\nsize = 0\nfamily =\n");
        let settings = Settings::from_store(store, PathBuf::from("unused.ini"));
        assert_eq!(settings.window.width, 800);
        assert_eq!(settings.window.height, 600);
        assert_eq!(settings.font.size, 10);
        assert_eq!(settings.font.family, "Consolas");
    }

    #[test]
    fn test_save_and_reload() {
        let path = scratch("roundtrip.ini");
        let mut settings = Settings::load(path.clone());
        settings.window = WindowGeometry { width: 640, height: 480, x: 20, y: 30 };
        settings.font.size = 14;
        settings.font.italic = true;
        settings.last_dir = "/tmp".to_string();
        settings.save().unwrap();

        let reloaded = Settings::load(path.clone());
        assert_eq!(reloaded.window, WindowGeometry { width: 640, height: 480, x: 20, y: 30 });
        assert_eq!(reloaded.font.size, 14);
        assert!(reloaded.font.italic);
        assert_eq!(reloaded.last_dir, "/tmp");
        let store = ConfigStore::load(&path).unwrap();
        assert_eq!(store.get("Font", "size", "10"), "14");
    }

    #[test]
    fn test_unknown_keys_survive_save() {
        let path = scratch("unknown.ini");
        std::fs::write(&path, "[Plugins]\nspell = on\n[Font]\nsize = 12\n").unwrap();
        let mut settings = Settings::load(path.clone());
        settings.save().unwrap();

        let store = ConfigStore::load(&path).unwrap();
        assert_eq!(store.get("Plugins", "spell", ""), "on");
        assert_eq!(store.get("Font", "size", ""), "12");
    }

    #[test]
    fn test_remember_dir() {
        let mut settings = Settings::from_store(ConfigStore::new(), PathBuf::from("unused.ini"));
        settings.remember_dir_of(Path::new("/home/user/notes/todo.txt"));
        assert_eq!(settings.last_dir, "/home/user/notes");
        settings.remember_dir_of(Path::new("bare.txt"));
        assert_eq!(settings.last_dir, "/home/user/notes");
    }

    #[test]
    fn test_monospace_mapping() {
        let mut font = FontSettings::default();
        assert!(font.is_monospace());
        font.family = "Courier New".to_string();
        assert!(font.is_monospace());
        font.family = "Arial".to_string();
        assert!(!font.is_monospace());
        assert_eq!(font.font_id().family, egui::FontFamily::Proportional);
    }
}
