use super::KeyValueStore;
use crate::error::{LeanLensError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const FILE_EXTENSION: &str = "json";

/// Directory-backed store: one file per key.
///
/// Key characters that are unsafe in file names are percent-escaped, so any
/// key maps to exactly one file inside the directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() {
            return Err(LeanLensError::Storage("empty key".to_string()));
        }
        Ok(self.dir.join(format!("{}.{}", encode_key(key), FILE_EXTENSION)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let Ok(path) = self.path_for(key) else {
            return Ok(None);
        };
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::write(path, value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let Ok(path) = self.path_for(key) else {
            return Ok(());
        };
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(key) = path.file_stem().and_then(|s| s.to_str()).and_then(decode_key) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '%' => out.push_str("%25"),
            ':' => out.push_str("%3A"),
            '/' => out.push_str("%2F"),
            '\\' => out.push_str("%5C"),
            '.' => out.push_str("%2E"),
            _ => out.push(c),
        }
    }
    out
}

fn decode_key(name: &str) -> Option<String> {
    let mut out = String::with_capacity(name.len());
    let mut rest = name;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let code = rest.get(pos + 1..pos + 3)?;
        out.push(match code {
            "25" => '%',
            "3A" => ':',
            "2F" => '/',
            "5C" => '\\',
            "2E" => '.',
            _ => return None,
        });
        rest = &rest[pos + 3..];
    }
    out.push_str(rest);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_encoding_round_trip() {
        for key in ["leanlens:process:abc", "a%b", "../escape", "x.y\\z"] {
            let encoded = encode_key(key);
            assert!(!encoded.contains(':') && !encoded.contains('/') && !encoded.contains('.'));
            assert_eq!(decode_key(&encoded).as_deref(), Some(key));
        }
        assert_eq!(decode_key("bad%ZZ"), None);
    }

    #[test]
    fn test_file_store_persists_between_instances() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("data")).unwrap();
        store.set("leanlens:process:p1", "{\"a\":1}").unwrap();

        let reopened = FileStore::open(dir.path().join("data")).unwrap();
        assert_eq!(
            reopened.get("leanlens:process:p1").unwrap(),
            Some("{\"a\":1}".to_string())
        );
        assert_eq!(reopened.keys().unwrap(), vec!["leanlens:process:p1".to_string()]);
    }

    #[test]
    fn test_missing_and_empty_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("leanlens:process:none").unwrap(), None);
        assert_eq!(store.get("").unwrap(), None);
        store.remove("leanlens:process:none").unwrap();
        assert!(store.set("", "x").is_err());
    }

    #[test]
    fn test_keys_ignore_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        store.set("k", "v").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["k".to_string()]);
    }
}
