//! On-disk footprint library (`<name>.pretty` directory).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{KicadError, KicadResult};
use super::writer::{to_kicad_mod, WriteOptions};
use super::Footprint;

/// File extension of KiCad footprint files.
pub const FOOTPRINT_EXTENSION: &str = "kicad_mod";

/// A footprint library directory below an output root.
#[derive(Debug, Clone)]
pub struct FootprintLibrary {
    root: PathBuf,
    name: String,
}

impl FootprintLibrary {
    /// Creates a handle for library `name` under `root`. Nothing is touched on disk.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            name: name.into(),
        }
    }

    /// Library name, e.g. `Connector_Harwin`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the `.pretty` directory.
    #[must_use]
    pub fn directory(&self) -> PathBuf {
        self.root.join(format!("{}.pretty", self.name))
    }

    /// Path a footprint with the given name is written to.
    #[must_use]
    pub fn footprint_path(&self, footprint_name: &str) -> PathBuf {
        self.directory()
            .join(format!("{footprint_name}.{FOOTPRINT_EXTENSION}"))
    }

    /// Creates the `.pretty` directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`KicadError::CreateDir`] if the directory cannot be created.
    pub fn ensure_directory(&self) -> KicadResult<PathBuf> {
        let dir = self.directory();
        fs::create_dir_all(&dir).map_err(|e| KicadError::create_dir(&dir, e))?;
        Ok(dir)
    }

    /// Serialises `footprint` and writes it into the library, replacing any
    /// existing file of the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn write(&self, footprint: &Footprint, options: WriteOptions) -> KicadResult<PathBuf> {
        self.ensure_directory()?;
        let path = self.footprint_path(&footprint.name);
        let content = to_kicad_mod(footprint, options);
        write_file(&path, &content)?;
        debug!(path = %path.display(), bytes = content.len(), "Footprint written");
        Ok(path)
    }
}

fn write_file(path: &Path, content: &str) -> KicadResult<()> {
    fs::write(path, content).map_err(|e| KicadError::file_write(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_pretty_layout() {
        let lib = FootprintLibrary::new("/out", "Connector_Harwin");
        assert_eq!(lib.directory(), PathBuf::from("/out/Connector_Harwin.pretty"));
        assert_eq!(
            lib.footprint_path("Harwin_LTek-Male_02_P2.00mm_Vertical"),
            PathBuf::from("/out/Connector_Harwin.pretty/Harwin_LTek-Male_02_P2.00mm_Vertical.kicad_mod")
        );
    }

    #[test]
    fn write_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let lib = FootprintLibrary::new(tmp.path().join("nested"), "Connector_Test");
        let fp = Footprint::new("Test_FP");

        let path = lib.write(&fp, WriteOptions::default()).unwrap();

        assert!(path.exists());
        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("(module Test_FP (layer F.Cu)"));
    }

    #[test]
    fn write_into_file_path_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let lib = FootprintLibrary::new(&blocker, "Connector_Test");
        let err = lib
            .write(&Footprint::new("X"), WriteOptions::default())
            .unwrap_err();
        assert!(matches!(err, KicadError::CreateDir { .. }));
    }
}
