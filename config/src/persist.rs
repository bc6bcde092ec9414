//! Writing settings back to the config file.
//!
//! Edits go through `toml_edit` so comments and unrelated keys survive, and the
//! file is replaced atomically (temp file in the same directory, then rename).

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::{ThemePreset, config_path};

/// Persist `[theme] preset` to `~/.churn/config.toml`.
///
/// Creates the config file and parent directory if they don't exist.
pub fn persist_theme_preset(preset: ThemePreset) -> io::Result<()> {
    let Some(path) = config_path() else {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine config path",
        ));
    };
    persist_theme_preset_at(&path, preset)
}

pub fn persist_theme_preset_at(path: &Path, preset: ThemePreset) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
        restrict_permissions(parent, 0o700)?;
    }

    let content = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };

    let mut doc = content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let theme = doc
        .entry("theme")
        .or_insert_with(|| toml_edit::Item::Table(toml_edit::Table::new()));
    let Some(table) = theme.as_table_like_mut() else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "`theme` in config is not a table",
        ));
    };
    table.insert("preset", toml_edit::value(preset.as_str()));

    atomic_write(path, doc.to_string().as_bytes())?;
    restrict_permissions(path, 0o600)?;

    tracing::info!(path = %path.display(), preset = preset.as_str(), "Persisted theme preset");
    Ok(())
}

fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// Tighten group/other bits on paths we own. Leaves other users' files alone.
#[cfg(unix)]
fn restrict_permissions(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::{MetadataExt, PermissionsExt};

    let metadata = fs::metadata(path)?;
    // SAFETY: getuid has no preconditions and cannot fail.
    let our_uid = unsafe { libc::getuid() };
    if metadata.uid() == our_uid {
        let current = metadata.permissions().mode() & 0o777;
        if current & 0o077 != 0 {
            fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
        }
    }
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}
