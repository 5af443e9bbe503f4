use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;

/// Where serialized containers go. Keys are flat names; path policy belongs
/// to the sink, not the engine.
pub trait SaveSink {
    fn write(&mut self, key: &str, bytes: &[u8]) -> io::Result<()>;
    /// `Ok(None)` when no data exists under `key`.
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>>;
    fn exists(&self, key: &str) -> bool;
}

/// On-disk sink rooted at a directory. Parent directories are created on
/// first write.
#[derive(Debug, Clone)]
pub struct DiskSink {
    root: PathBuf,
}

impl DiskSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl SaveSink for DiskSink {
    fn write(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(path)?;
        file.write_all(bytes)
    }

    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn exists(&self, key: &str) -> bool {
        self.path_for(key).is_file()
    }
}

/// In-memory sink, the test double and the embeddable target.
#[derive(Debug, Default)]
pub struct MemorySink {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveSink for MemorySink {
    fn write(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
        self.blobs.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn exists(&self, key: &str) -> bool {
        self.blobs.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEST_DIR_SEQ: AtomicU64 = AtomicU64::new(0);

    fn temp_test_dir() -> PathBuf {
        let seq = TEST_DIR_SEQ.fetch_add(1, Ordering::Relaxed);
        let pid = std::process::id();
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("mochila_save_test_{pid}_{nonce}_{seq}"))
    }

    #[test]
    fn memory_sink_roundtrip_and_missing_key() {
        let mut sink = MemorySink::new();
        assert_eq!(sink.read("slot1").unwrap(), None);
        assert!(!sink.exists("slot1"));

        sink.write("slot1", b"payload").unwrap();
        assert!(sink.exists("slot1"));
        assert_eq!(sink.read("slot1").unwrap().as_deref(), Some(&b"payload"[..]));
    }

    #[test]
    fn disk_sink_creates_parents_and_roundtrips() {
        let base = temp_test_dir();
        let mut sink = DiskSink::new(base.join("saves"));

        assert_eq!(sink.read("level1.json").unwrap(), None);
        sink.write("level1.json", b"{}").unwrap();
        assert!(sink.exists("level1.json"));
        assert_eq!(sink.read("level1.json").unwrap().as_deref(), Some(&b"{}"[..]));

        std::fs::remove_dir_all(&base).unwrap();
    }
}
