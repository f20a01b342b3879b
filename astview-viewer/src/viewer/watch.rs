//! Modification polling for the source and rule files
//!
//! The event loop polls every tick; a changed modification time re-reads the
//! file and feeds the new text to the session's debouncer.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug)]
pub struct FileWatch {
    path: PathBuf,
    modified: Option<SystemTime>,
}

impl FileWatch {
    pub fn new(path: PathBuf) -> Self {
        FileWatch {
            path,
            modified: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file and remember its modification time
    pub fn read(&mut self) -> io::Result<String> {
        let text = fs::read_to_string(&self.path)?;
        self.modified = fs::metadata(&self.path).and_then(|m| m.modified()).ok();
        Ok(text)
    }

    /// The new contents if the file changed since the last read.
    ///
    /// A file that is briefly missing (editors replacing it on save) is not an
    /// error; it is picked up again once it reappears.
    pub fn poll(&mut self) -> io::Result<Option<String>> {
        let modified = match fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };
        if self.modified == Some(modified) {
            return Ok(None);
        }
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                self.modified = Some(modified);
                tracing::debug!(path = %self.path.display(), "file changed");
                Ok(Some(text))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn unchanged_file_polls_nothing() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "var a = 1;").expect("write");
        let mut watch = FileWatch::new(file.path().to_path_buf());
        assert_eq!(watch.read().expect("read"), "var a = 1;");
        assert_eq!(watch.poll().expect("poll"), None);
    }

    #[test]
    fn changed_modification_time_rereads() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        fs::write(file.path(), "one").expect("write");
        let mut watch = FileWatch::new(file.path().to_path_buf());
        watch.read().expect("read");

        fs::write(file.path(), "two").expect("write");
        let later = SystemTime::now() + Duration::from_secs(5);
        file.as_file().set_modified(later).expect("set mtime");
        assert_eq!(watch.poll().expect("poll"), Some("two".to_string()));
        assert_eq!(watch.poll().expect("poll"), None);
    }

    #[test]
    fn missing_file_is_not_an_error_while_polling() {
        let mut watch = FileWatch::new(PathBuf::from("/nonexistent/rule.js"));
        assert!(watch.read().is_err());
        assert_eq!(watch.poll().expect("poll"), None);
        assert_eq!(watch.path(), Path::new("/nonexistent/rule.js"));
    }
}
