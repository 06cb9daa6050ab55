use crate::draw::reference::encode_data_uri;
use crate::draw::state::PracticeStep;
use anyhow::{Context, Result};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

pub const UNKNOWN_PHOTO_ID: &str = "unknown";

/// Receives a finished image and performs the actual download.
pub trait ExportSink {
    fn deliver(&mut self, png: &[u8], filename: &str) -> Result<()>;
}

/// Writes exports into a folder, creating it on first use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&mut self, png: &[u8], filename: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create export folder {}", self.dir.display()))?;
        let path = self.dir.join(filename);
        fs::write(&path, png).with_context(|| format!("write export {}", path.display()))?;
        self.written.push(path);
        Ok(())
    }
}

/// Keeps exports as `data:` URLs, the form a browser link expects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataUrlSink {
    pub downloads: Vec<(String, String)>,
}

impl ExportSink for DataUrlSink {
    fn deliver(&mut self, png: &[u8], filename: &str) -> Result<()> {
        self.downloads
            .push((filename.to_owned(), encode_data_uri("image/png", png)));
        Ok(())
    }
}

pub fn export_filename(photo_id: Option<&str>, step: PracticeStep) -> String {
    let id = photo_id
        .filter(|id| !id.is_empty())
        .unwrap_or(UNKNOWN_PHOTO_ID);
    format!("photo_{}_step{}.png", id, step.number())
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)
        .context("encode png")?;
    Ok(bytes)
}
