//! Filesystem infrastructure: implements `FileWriter`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::FileWriter;

/// Production filesystem implementation of `FileWriter`.
pub struct LocalFs;

impl FileWriter for LocalFs {
    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        std::fs::write(path, contents).with_context(|| format!("cannot write {}", path.display()))
    }
}
