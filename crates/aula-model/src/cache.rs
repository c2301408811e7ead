#![forbid(unsafe_code)]

//! Key-value cache with per-entry TTL.
//!
//! The dashboard persists small preferences (theme, last filters)
//! through an injected [`CacheStore`]. Entries carry an optional
//! time-to-live; an entry older than its TTL is removed on read and
//! reported absent.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `CacheError::Io` | File I/O failure | Returns error, no partial write |
//! | `CacheError::Serialization` | JSON encode failure | Returns error |
//! | `CacheError::Corruption` | Lock poisoned | Returns error |
//! | Corrupt entry on disk | Hand-edited or truncated file | Entry skipped, logged |
//! | Unknown file version | Older/newer build wrote it | Starts empty, logged |

use std::collections::HashMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    /// I/O error during file operations.
    Io(std::io::Error),
    /// Serialization or deserialization error.
    Serialization(String),
    /// Cache state is unusable (poisoned lock).
    Corruption(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Io(e) => write!(f, "I/O error: {e}"),
            CacheError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            CacheError::Corruption(msg) => write!(f, "cache corruption: {msg}"),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::Io(e) => Some(e),
            CacheError::Serialization(_) => None,
            CacheError::Corruption(_) => None,
        }
    }
}

impl From<std::io::Error> for CacheError {
    fn from(e: std::io::Error) -> Self {
        CacheError::Io(e)
    }
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

// ─────────────────────────────────────────────────────────────────────────────
// Entries
// ─────────────────────────────────────────────────────────────────────────────

/// A stored value with its timestamp and optional TTL.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The stored JSON value.
    pub value: Value,
    /// Milliseconds since the Unix epoch at store time.
    pub stored_at_ms: u64,
    /// Time-to-live in milliseconds; `None` never expires.
    pub ttl_ms: Option<u64>,
}

impl CacheEntry {
    /// Create an entry stamped with the current time.
    #[must_use]
    pub fn new(value: Value, ttl: Option<Duration>) -> Self {
        Self {
            value,
            stored_at_ms: now_ms(),
            ttl_ms: ttl.map(duration_ms),
        }
    }

    /// Whether the entry has outlived its TTL at `now_ms`.
    ///
    /// An entry exactly as old as its TTL is still alive; expiry is
    /// strictly greater. Entries without a TTL never expire.
    #[must_use]
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        match self.ttl_ms {
            Some(ttl) => now_ms.saturating_sub(self.stored_at_ms) > ttl,
            None => false,
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| duration_ms(d))
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

// ─────────────────────────────────────────────────────────────────────────────
// Cache Store Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Trait for pluggable cache backends.
///
/// Implementations must be thread-safe (`Send + Sync`); the store is
/// injected as `Box<dyn CacheStore>` where it is used.
///
/// # Implementation Notes
///
/// - `get` removes an expired entry and reports it absent.
/// - Writes should be atomic (write-then-rename pattern for files).
pub trait CacheStore: Send + Sync {
    /// Human-readable backend name for logging.
    fn name(&self) -> &str;

    /// Look up a value, treating expired entries as absent.
    fn get(&self, key: &str) -> CacheResult<Option<Value>>;

    /// Store a value with an optional TTL, replacing any prior entry.
    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> CacheResult<()>;

    /// Remove an entry if present.
    fn remove(&self, key: &str) -> CacheResult<()>;

    /// Remove everything.
    fn clear(&self) -> CacheResult<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory Cache (always available)
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory cache backend for testing and ephemeral use.
///
/// Entries are lost when the process exits.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    /// Create a new empty memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory cache pre-populated with entries.
    #[must_use]
    pub fn with_entries(entries: HashMap<String, CacheEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }
}

impl CacheStore for MemoryCache {
    fn name(&self) -> &str {
        "MemoryCache"
    }

    fn get(&self, key: &str) -> CacheResult<Option<Value>> {
        let now = now_ms();
        {
            let guard = self
                .entries
                .read()
                .map_err(|_| CacheError::Corruption("lock poisoned".into()))?;
            match guard.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired_at(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }
        // Expired: drop it so the map does not accumulate dead entries.
        let mut guard = self
            .entries
            .write()
            .map_err(|_| CacheError::Corruption("lock poisoned".into()))?;
        guard.remove(key);
        Ok(None)
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> CacheResult<()> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| CacheError::Corruption("lock poisoned".into()))?;
        guard.insert(key.to_string(), CacheEntry::new(value, ttl));
        Ok(())
    }

    fn remove(&self, key: &str) -> CacheResult<()> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| CacheError::Corruption("lock poisoned".into()))?;
        guard.remove(key);
        Ok(())
    }

    fn clear(&self) -> CacheResult<()> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| CacheError::Corruption("lock poisoned".into()))?;
        guard.clear();
        Ok(())
    }
}

impl fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.entries.read().map(|g| g.len()).unwrap_or(0);
        f.debug_struct("MemoryCache").field("entries", &count).finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Cache
// ─────────────────────────────────────────────────────────────────────────────

/// File format for the cache (JSON).
#[derive(Serialize, Deserialize)]
struct CacheFile {
    /// Format version for future migrations.
    format_version: u32,
    /// Map of key -> raw entry. Kept untyped on load so one corrupt
    /// entry does not poison the rest.
    entries: HashMap<String, Value>,
}

impl CacheFile {
    const FORMAT_VERSION: u32 = 1;

    fn new() -> Self {
        Self {
            format_version: Self::FORMAT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// File-based cache backend using a single JSON file.
///
/// # Atomic Writes
///
/// Writes use a temporary file + rename pattern:
/// 1. Write to `{path}.tmp`
/// 2. Flush and sync
/// 3. Rename `{path}.tmp` -> `{path}`
///
/// A file that fails to parse, or carries an unknown format version,
/// is treated as empty with a warning; the next write replaces it.
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    /// Create a file cache at the given path.
    ///
    /// The file does not need to exist; it is created on first write.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone();
        tmp.set_extension("json.tmp");
        tmp
    }

    fn load(&self) -> CacheResult<HashMap<String, CacheEntry>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        let cache_file: CacheFile = match serde_json::from_reader(reader) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "cache file unreadable, starting empty"
                );
                return Ok(HashMap::new());
            }
        };

        if cache_file.format_version != CacheFile::FORMAT_VERSION {
            tracing::warn!(
                stored = cache_file.format_version,
                expected = CacheFile::FORMAT_VERSION,
                "cache file format version mismatch, starting empty"
            );
            return Ok(HashMap::new());
        }

        let mut result = HashMap::new();
        for (key, raw) in cache_file.entries {
            match serde_json::from_value::<CacheEntry>(raw) {
                Ok(entry) => {
                    result.insert(key, entry);
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "corrupt cache entry, skipping");
                }
            }
        }

        Ok(result)
    }

    fn save(&self, entries: &HashMap<String, CacheEntry>) -> CacheResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut cache_file = CacheFile::new();
        for (key, entry) in entries {
            let raw = serde_json::to_value(entry).map_err(|e| {
                CacheError::Serialization(format!("failed to serialize cache entry: {e}"))
            })?;
            cache_file.entries.insert(key.clone(), raw);
        }

        let tmp_path = self.temp_path();
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &cache_file).map_err(|e| {
                CacheError::Serialization(format!("failed to serialize cache file: {e}"))
            })?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }

        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            entries = entries.len(),
            "saved cache file"
        );

        Ok(())
    }
}

impl CacheStore for FileCache {
    fn name(&self) -> &str {
        "FileCache"
    }

    fn get(&self, key: &str) -> CacheResult<Option<Value>> {
        let mut entries = self.load()?;
        let Some(entry) = entries.get(key) else {
            return Ok(None);
        };
        if entry.is_expired_at(now_ms()) {
            entries.remove(key);
            self.save(&entries)?;
            return Ok(None);
        }
        Ok(Some(entry.value.clone()))
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> CacheResult<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), CacheEntry::new(value, ttl));
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> CacheResult<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }

    fn clear(&self) -> CacheResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl fmt::Debug for FileCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileCache").field("path", &self.path).finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
