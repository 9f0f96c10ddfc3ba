use rand::distr::{Alphanumeric, SampleString};
use std::path::{Path, PathBuf};

use crate::error::TestError;

/// Test context owning an isolated data directory.
///
/// Each context creates a uniquely named directory below the system temp directory so
/// tests touching the file-backed state store can run in parallel without sharing
/// files. The directory and everything inside it is removed when the context drops.
pub struct TestContext {
    /// Root of the temporary data directory.
    dir: PathBuf,
}

impl TestContext {
    /// Creates a new context with an empty data directory.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with a freshly created directory
    /// - `Err(TestError::Io)` - Failed to create the directory
    pub fn new() -> Result<Self, TestError> {
        let suffix = Alphanumeric.sample_string(&mut rand::rng(), 12);
        let dir = std::env::temp_dir().join(format!("community-bot-test-{}", suffix));
        std::fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    /// Path of the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a file inside the data directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Writes `contents` to a file inside the data directory.
    ///
    /// # Arguments
    /// - `name` - File name relative to the data directory
    /// - `contents` - Raw file contents
    pub fn write(&self, name: &str, contents: &str) -> Result<(), TestError> {
        std::fs::write(self.path(name), contents)?;
        Ok(())
    }

    /// Reads a file inside the data directory.
    ///
    /// # Returns
    /// - `Ok(Some(String))` - File contents
    /// - `Ok(None)` - File does not exist
    /// - `Err(TestError::Io)` - Any other read failure
    pub fn read(&self, name: &str) -> Result<Option<String>, TestError> {
        match std::fs::read_to_string(self.path(name)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists the file names currently present in the data directory.
    pub fn files(&self) -> Result<Vec<String>, TestError> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_and_removes_directory() -> Result<(), TestError> {
        let dir = {
            let test = TestContext::new()?;
            test.write("marker.txt", "x")?;
            assert_eq!(test.read("marker.txt")?, Some("x".to_string()));
            assert_eq!(test.read("missing.txt")?, None);
            test.data_dir().to_path_buf()
        };

        assert!(!dir.exists());
        Ok(())
    }

    #[test]
    fn contexts_do_not_share_directories() -> Result<(), TestError> {
        let a = TestContext::new()?;
        let b = TestContext::new()?;
        assert_ne!(a.data_dir(), b.data_dir());
        Ok(())
    }
}
