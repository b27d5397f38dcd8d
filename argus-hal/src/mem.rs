//! In-memory blob store backend
//!
//! Implements [`BlobStore`] over heapless tables for host-side tests and
//! the simulator. Mirrors the semantics of a flash-backed store:
//! namespaces are created on first read-write open, writes are staged
//! until commit, and fault-injection switches let tests exercise every
//! recovery path without real hardware.

use heapless::{String, Vec};

use crate::store::{BlobStore, NamespaceHandle, OpenMode, StoreError};

/// Maximum namespaces the backend can hold
const MAX_NAMESPACES: usize = 2;

/// Maximum keys per namespace
const MAX_ENTRIES: usize = 4;

/// Maximum namespace/key name length (NVS limit)
const MAX_NAME_LEN: usize = 15;

/// Maximum blob size in bytes
pub const MAX_BLOB_SIZE: usize = 1024;

#[derive(Debug, Clone)]
struct Entry {
    key: String<MAX_NAME_LEN>,
    data: Vec<u8, MAX_BLOB_SIZE>,
}

#[derive(Debug)]
struct Namespace {
    name: String<MAX_NAME_LEN>,
    entries: Vec<Entry, MAX_ENTRIES>,
}

/// In-memory [`BlobStore`] implementation
///
/// The `fail_*` switches are sticky: once set, the matching operation
/// keeps failing with [`StoreError::Storage`] until cleared.
/// [`fail_next_init`](MemStore::fail_next_init) is one-shot so tests can
/// drive the erase-and-retry recovery on startup.
#[derive(Debug, Default)]
pub struct MemStore {
    initialized: bool,
    namespaces: Vec<Namespace, MAX_NAMESPACES>,
    fail_init: Option<StoreError>,
    fail_opens: bool,
    fail_reads: bool,
    fail_writes: bool,
    fail_commits: bool,
    fail_erases: bool,
}

impl MemStore {
    /// Create an empty, uninitialized store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `init` call fail with `error`
    pub fn fail_next_init(&mut self, error: StoreError) {
        self.fail_init = Some(error);
    }

    /// Make `open` calls fail
    pub fn set_fail_opens(&mut self, fail: bool) {
        self.fail_opens = fail;
    }

    /// Make `read_blob` calls fail
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make `write_blob` calls fail
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Make `commit` calls fail
    pub fn set_fail_commits(&mut self, fail: bool) {
        self.fail_commits = fail;
    }

    /// Make erase operations fail
    pub fn set_fail_erases(&mut self, fail: bool) {
        self.fail_erases = fail;
    }

    /// Check whether a committed blob exists (for test verification)
    pub fn contains(&self, namespace: &str, key: &str) -> bool {
        self.namespace_index(namespace)
            .map(|i| {
                self.namespaces[i]
                    .entries
                    .iter()
                    .any(|e| e.key.as_str() == key)
            })
            .unwrap_or(false)
    }

    fn namespace_index(&self, name: &str) -> Option<usize> {
        self.namespaces.iter().position(|ns| ns.name.as_str() == name)
    }
}

impl BlobStore for MemStore {
    type Handle<'a> = MemNamespace<'a>;

    fn init(&mut self) -> Result<(), StoreError> {
        if let Some(error) = self.fail_init.take() {
            return Err(error);
        }
        self.initialized = true;
        Ok(())
    }

    fn erase_all(&mut self) -> Result<(), StoreError> {
        if self.fail_erases {
            return Err(StoreError::Storage);
        }
        self.namespaces.clear();
        self.initialized = false;
        Ok(())
    }

    fn open(&mut self, namespace: &str, mode: OpenMode) -> Result<MemNamespace<'_>, StoreError> {
        if !self.initialized {
            return Err(StoreError::NotInitialized);
        }
        if self.fail_opens {
            return Err(StoreError::Storage);
        }

        let index = match self.namespace_index(namespace) {
            Some(index) => index,
            None => match mode {
                OpenMode::ReadOnly => return Err(StoreError::NotFound),
                OpenMode::ReadWrite => {
                    let name =
                        String::try_from(namespace).map_err(|_| StoreError::KeyTooLong)?;
                    self.namespaces
                        .push(Namespace {
                            name,
                            entries: Vec::new(),
                        })
                        .map_err(|_| StoreError::Full)?;
                    self.namespaces.len() - 1
                }
            },
        };

        Ok(MemNamespace {
            namespace: &mut self.namespaces[index],
            mode,
            pending: Vec::new(),
            fail_reads: self.fail_reads,
            fail_writes: self.fail_writes,
            fail_commits: self.fail_commits,
            fail_erases: self.fail_erases,
        })
    }

    fn deinit(&mut self) {
        self.initialized = false;
    }
}

/// Scoped handle to one open [`MemStore`] namespace
///
/// Dropping the handle closes the namespace; uncommitted writes are lost,
/// which is exactly the atomicity the settings layer relies on.
#[derive(Debug)]
pub struct MemNamespace<'a> {
    namespace: &'a mut Namespace,
    mode: OpenMode,
    pending: Vec<Entry, MAX_ENTRIES>,
    fail_reads: bool,
    fail_writes: bool,
    fail_commits: bool,
    fail_erases: bool,
}

impl NamespaceHandle for MemNamespace<'_> {
    fn read_blob(&mut self, key: &str, buffer: &mut [u8]) -> Result<usize, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Storage);
        }
        let entry = self
            .namespace
            .entries
            .iter()
            .find(|e| e.key.as_str() == key)
            .ok_or(StoreError::NotFound)?;
        if buffer.len() < entry.data.len() {
            return Err(StoreError::BufferTooSmall);
        }
        buffer[..entry.data.len()].copy_from_slice(&entry.data);
        Ok(entry.data.len())
    }

    fn write_blob(&mut self, key: &str, data: &[u8]) -> Result<(), StoreError> {
        if self.mode == OpenMode::ReadOnly {
            return Err(StoreError::ReadOnly);
        }
        if self.fail_writes {
            return Err(StoreError::Storage);
        }
        let entry = Entry {
            key: String::try_from(key).map_err(|_| StoreError::KeyTooLong)?,
            data: Vec::from_slice(data).map_err(|_| StoreError::Full)?,
        };
        if let Some(slot) = self.pending.iter_mut().find(|e| e.key.as_str() == key) {
            *slot = entry;
        } else {
            self.pending.push(entry).map_err(|_| StoreError::Full)?;
        }
        Ok(())
    }

    fn erase_all(&mut self) -> Result<(), StoreError> {
        if self.mode == OpenMode::ReadOnly {
            return Err(StoreError::ReadOnly);
        }
        if self.fail_erases {
            return Err(StoreError::Storage);
        }
        self.namespace.entries.clear();
        self.pending.clear();
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        if self.fail_commits {
            return Err(StoreError::Storage);
        }
        while let Some(entry) = self.pending.pop() {
            if let Some(slot) = self
                .namespace
                .entries
                .iter_mut()
                .find(|e| e.key == entry.key)
            {
                *slot = entry;
            } else {
                self.namespace
                    .entries
                    .push(entry)
                    .map_err(|_| StoreError::Full)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_requires_init() {
        let mut store = MemStore::new();
        assert_eq!(
            store.open("settings", OpenMode::ReadWrite).err(),
            Some(StoreError::NotInitialized)
        );
    }

    #[test]
    fn test_read_only_open_of_missing_namespace() {
        let mut store = MemStore::new();
        store.init().unwrap();
        assert_eq!(
            store.open("settings", OpenMode::ReadOnly).err(),
            Some(StoreError::NotFound)
        );
    }

    #[test]
    fn test_write_commit_read() {
        let mut store = MemStore::new();
        store.init().unwrap();

        let mut handle = store.open("settings", OpenMode::ReadWrite).unwrap();
        handle.write_blob("blob", &[1, 2, 3]).unwrap();
        handle.commit().unwrap();
        drop(handle);

        let mut handle = store.open("settings", OpenMode::ReadOnly).unwrap();
        let mut buffer = [0u8; 8];
        let len = handle.read_blob("blob", &mut buffer).unwrap();
        assert_eq!(&buffer[..len], &[1, 2, 3]);
    }

    #[test]
    fn test_uncommitted_write_is_discarded() {
        let mut store = MemStore::new();
        store.init().unwrap();

        let mut handle = store.open("settings", OpenMode::ReadWrite).unwrap();
        handle.write_blob("blob", &[1, 2, 3]).unwrap();
        drop(handle);

        assert!(!store.contains("settings", "blob"));
    }

    #[test]
    fn test_write_through_read_only_handle() {
        let mut store = MemStore::new();
        store.init().unwrap();
        store.open("settings", OpenMode::ReadWrite).unwrap();

        let mut handle = store.open("settings", OpenMode::ReadOnly).unwrap();
        assert_eq!(
            handle.write_blob("blob", &[0]).err(),
            Some(StoreError::ReadOnly)
        );
    }

    #[test]
    fn test_erase_all_requires_reinit() {
        let mut store = MemStore::new();
        store.init().unwrap();
        store.erase_all().unwrap();
        assert_eq!(
            store.open("settings", OpenMode::ReadWrite).err(),
            Some(StoreError::NotInitialized)
        );
    }

    #[test]
    fn test_fail_next_init_is_one_shot() {
        let mut store = MemStore::new();
        store.fail_next_init(StoreError::NoFreePages);
        assert_eq!(store.init().err(), Some(StoreError::NoFreePages));
        assert!(store.init().is_ok());
    }
}
