use crate::draw::settings::DrawSettings;
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

pub const DRAW_SETTINGS_FILE_NAME: &str = "gesdro_settings.json";

pub fn settings_path_from_exe_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(DRAW_SETTINGS_FILE_NAME))
}

pub fn resolve_settings_path() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    settings_path_from_exe_path(&exe_path)
}

pub fn load() -> Result<DrawSettings> {
    load_from_path(&resolve_settings_path()?)
}

pub fn save(settings: &DrawSettings) -> Result<PathBuf> {
    let path = resolve_settings_path()?;
    save_to_path(&path, settings)?;
    Ok(path)
}

pub fn load_from_path(path: &Path) -> Result<DrawSettings> {
    if !path.exists() {
        return Ok(DrawSettings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read draw settings file {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(DrawSettings::default());
    }

    let mut loaded: DrawSettings = serde_json::from_str(&content)
        .with_context(|| format!("deserialize draw settings file {}", path.display()))?;
    if loaded.sanitize() {
        tracing::warn!(path = %path.display(), "draw settings contained out-of-range values");
    }
    Ok(loaded)
}

pub fn save_to_path(path: &Path, settings: &DrawSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create draw settings parent folder {}", parent.display()))?;
    }

    let mut sanitized = settings.clone();
    sanitized.sanitize();
    let json = serde_json::to_string_pretty(&sanitized).context("serialize draw settings")?;
    std::fs::write(path, json)
        .with_context(|| format!("write draw settings file {}", path.display()))
}
