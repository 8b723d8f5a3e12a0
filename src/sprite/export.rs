//! Writing generated textures to disk
//!
//! Each surface becomes `<key>.png` in the output directory, and an
//! `index.json` lists every file with its key and dimensions.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use serde::{Deserialize, Serialize};

use super::registry::{RasterSurface, TextureKey, TextureRegistry};
use crate::core::Result;

pub const INDEX_VERSION: u32 = 1;
pub const INDEX_FILENAME: &str = "index.json";

/// Index file data (serialized as JSON for easy inspection)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportIndex {
    pub version: u32,
    pub entries: Vec<ExportEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportEntry {
    pub key: String,
    /// File path relative to the output directory
    pub path: String,
    pub width: u32,
    pub height: u32,
}

impl ExportIndex {
    /// Entry for a key, if it was exported
    pub fn entry(&self, key: TextureKey) -> Option<&ExportEntry> {
        let key = key.to_string();
        self.entries.iter().find(|e| e.key == key)
    }
}

fn file_name(key: TextureKey) -> String {
    format!("{}.png", key)
}

fn entry_for(surface: &RasterSurface) -> ExportEntry {
    ExportEntry {
        key: surface.key().to_string(),
        path: file_name(surface.key()),
        width: surface.width(),
        height: surface.height(),
    }
}

fn encode_png(surface: &RasterSurface) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    surface.image().write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

impl TextureRegistry {
    fn index_entries(&self) -> Vec<ExportEntry> {
        self.iter().map(entry_for).collect()
    }

    /// Write every surface plus the index (async)
    pub async fn save(&self, dir: &Path) -> Result<ExportIndex> {
        tokio::fs::create_dir_all(dir).await?;

        for surface in self.iter() {
            let path = dir.join(file_name(surface.key()));
            let bytes = encode_png(surface)?;
            tokio::fs::write(&path, bytes).await?;
            log::debug!("Wrote {}", path.display());
        }

        let index = ExportIndex { version: INDEX_VERSION, entries: self.index_entries() };
        let json = serde_json::to_string_pretty(&index)?;
        tokio::fs::write(index_path(dir), json).await?;
        log::info!("Exported {} textures to {}", index.entries.len(), dir.display());
        Ok(index)
    }

    /// Write every surface plus the index (sync)
    pub fn save_sync(&self, dir: &Path) -> Result<ExportIndex> {
        std::fs::create_dir_all(dir)?;

        for surface in self.iter() {
            let path = dir.join(file_name(surface.key()));
            surface.image().save_with_format(&path, ImageFormat::Png)?;
            log::debug!("Wrote {}", path.display());
        }

        let index = ExportIndex { version: INDEX_VERSION, entries: self.index_entries() };
        let json = serde_json::to_string_pretty(&index)?;
        std::fs::write(index_path(dir), json)?;
        log::info!("Exported {} textures to {}", index.entries.len(), dir.display());
        Ok(index)
    }
}

/// Read a previously written index
pub async fn load_index(dir: &Path) -> Result<ExportIndex> {
    let data = tokio::fs::read_to_string(index_path(dir)).await?;
    Ok(serde_json::from_str(&data)?)
}

/// Read a previously written index (sync)
pub fn load_index_sync(dir: &Path) -> Result<ExportIndex> {
    let data = std::fs::read_to_string(index_path(dir))?;
    Ok(serde_json::from_str(&data)?)
}

pub fn index_path(dir: &Path) -> PathBuf {
    dir.join(INDEX_FILENAME)
}
