use anyhow::{anyhow, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::RgbaImage;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceSource {
    DataUri(String),
    File(PathBuf),
}

/// The practice photo drawn over or beside. Only the source and its natural
/// size are known here; selection and storage belong to the photo provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePhoto {
    pub id: Option<String>,
    pub source: ReferenceSource,
    pub natural_width: u32,
    pub natural_height: u32,
}

impl ReferencePhoto {
    /// Reads the natural size by decoding the data URI once.
    pub fn from_data_uri(id: Option<String>, uri: impl Into<String>) -> Result<Self> {
        let uri = uri.into();
        let decoded = decode_data_uri(&uri)?;
        Ok(Self {
            id,
            natural_width: decoded.width(),
            natural_height: decoded.height(),
            source: ReferenceSource::DataUri(uri),
        })
    }

    pub fn from_path(id: Option<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (natural_width, natural_height) = image::image_dimensions(path)
            .with_context(|| format!("read reference image size {}", path.display()))?;
        Ok(Self {
            id,
            source: ReferenceSource::File(path.to_path_buf()),
            natural_width,
            natural_height,
        })
    }

    pub fn natural_size(&self) -> (u32, u32) {
        (self.natural_width, self.natural_height)
    }

    pub fn load(&self) -> Result<RgbaImage> {
        match &self.source {
            ReferenceSource::DataUri(uri) => decode_data_uri(uri),
            ReferenceSource::File(path) => Ok(image::open(path)
                .with_context(|| format!("open reference image {}", path.display()))?
                .to_rgba8()),
        }
    }
}

/// Supplies the photo currently being practiced.
pub trait PhotoProvider {
    fn current_photo(&self) -> Option<ReferencePhoto>;
}

pub fn decode_data_uri(uri: &str) -> Result<RgbaImage> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| anyhow!("reference source is not a data URI"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| anyhow!("data URI has no payload separator"))?;
    if !header.ends_with(";base64") {
        return Err(anyhow!("data URI is not base64 encoded: {header}"));
    }
    let bytes = STANDARD
        .decode(payload.trim())
        .context("decode base64 data URI payload")?;
    Ok(image::load_from_memory(&bytes)
        .context("decode reference image bytes")?
        .to_rgba8())
}

pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
