// src/file.rs

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::config::consts::{INPUT_EXT, OUTPUT_SUFFIX};
use crate::data::CharacterRecord;
use crate::error::ExtractError;

/// Supplies one page per character slug.
pub trait Loader: Sync {
    fn load(&self, slug: &str) -> Result<String, ExtractError>;
}

/// Persists one finished record. Returns where it went.
pub trait Writer: Sync {
    fn write(&self, record: &CharacterRecord) -> Result<PathBuf, ExtractError>;
}

/// `<dir>/<slug>.html`
pub struct DirLoader {
    pub dir: PathBuf,
}

impl DirLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{slug}.{INPUT_EXT}"))
    }
}

impl Loader for DirLoader {
    fn load(&self, slug: &str) -> Result<String, ExtractError> {
        Ok(fs::read_to_string(self.path_for(slug))?)
    }
}

/// `<dir>/<slug>_frame_data_structured.json`
pub struct JsonDirWriter {
    pub dir: PathBuf,
}

impl JsonDirWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Writer for JsonDirWriter {
    fn write(&self, record: &CharacterRecord) -> Result<PathBuf, ExtractError> {
        ensure_directory(&self.dir)?;
        let path = output_path(&self.dir, &record.character);
        fs::write(&path, to_json(record)?)?;
        Ok(path)
    }
}

pub fn output_path(dir: &Path, slug: &str) -> PathBuf {
    dir.join(join!(slug, OUTPUT_SUFFIX))
}

/// Two-space indent, non-ASCII kept as is, `\n` line endings, trailing newline.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, ExtractError> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

/// Sorted stems of the `.html` files in `dir`.
pub fn list_slugs(dir: &Path) -> Result<Vec<String>, ExtractError> {
    let mut slugs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_html = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case(INPUT_EXT));
        if let (true, Some(stem)) = (is_html, path.file_stem().and_then(|s| s.to_str())) {
            slugs.push(s!(stem));
        }
    }
    slugs.sort();
    Ok(slugs)
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::assemble;

    #[test]
    fn json_format() {
        let rec = assemble("chunli", Vec::new());
        let text = to_json(&rec).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(!text.contains('\r'));
        assert!(text.contains("\"japanese\": \"春麗\""));
        assert!(text.starts_with("{\n  \"character\": \"chunli\",\n  \"character_name\""));
    }

    #[test]
    fn output_name() {
        assert_eq!(
            output_path(Path::new("out"), "ken"),
            Path::new("out").join("ken_frame_data_structured.json")
        );
    }
}
