//! Blob store abstractions
//!
//! Provides traits for namespaced key-value blob storage backed by flash.
//! The backend owns wear leveling and physical layout; callers see
//! namespaces, opaque blobs, and per-key atomic write+commit semantics.

/// Errors from blob store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// No free pages left in the storage partition; a full erase is
    /// required before the store can be initialized again
    NoFreePages,
    /// Storage partition was written by an incompatible store version
    IncompatibleVersion,
    /// Store is not initialized (or was deinitialized)
    NotInitialized,
    /// Namespace or key not found
    NotFound,
    /// Namespace or key name exceeds the backend's length limit
    KeyTooLong,
    /// Write attempted through a read-only handle
    ReadOnly,
    /// Caller's buffer is too small for the stored blob
    BufferTooSmall,
    /// Storage is full
    Full,
    /// Backend storage operation failed
    Storage,
}

/// Access mode for an open namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OpenMode {
    ReadOnly,
    ReadWrite,
}

/// Namespaced blob store
///
/// Backends provide persistent key-value storage organized into named
/// namespaces. Opening a namespace yields a scoped handle; dropping the
/// handle closes the namespace, so release is guaranteed on every exit
/// path of a read or write sequence.
pub trait BlobStore {
    /// Scoped handle to one open namespace
    type Handle<'a>: NamespaceHandle
    where
        Self: 'a;

    /// Initialize the backend
    ///
    /// Returns [`StoreError::NoFreePages`] or
    /// [`StoreError::IncompatibleVersion`] when the partition content is
    /// unusable; the caller may recover by calling [`erase_all`] and
    /// initializing again.
    ///
    /// [`erase_all`]: BlobStore::erase_all
    fn init(&mut self) -> Result<(), StoreError>;

    /// Erase the entire storage partition
    ///
    /// Destroys every namespace. The store must be initialized again
    /// before use.
    fn erase_all(&mut self) -> Result<(), StoreError>;

    /// Open a namespace
    ///
    /// In [`OpenMode::ReadOnly`] a namespace that was never written is
    /// reported as [`StoreError::NotFound`]. In [`OpenMode::ReadWrite`]
    /// the namespace is created on first open.
    fn open(&mut self, namespace: &str, mode: OpenMode) -> Result<Self::Handle<'_>, StoreError>;

    /// Release the backend
    ///
    /// Counterpart of [`init`](BlobStore::init); called once at process
    /// shutdown.
    fn deinit(&mut self);
}

/// Operations on one open namespace
///
/// Writes are staged until [`commit`](NamespaceHandle::commit); a handle
/// dropped without committing leaves the stored content unchanged.
pub trait NamespaceHandle {
    /// Read the blob stored under `key` into `buffer`
    ///
    /// Returns the number of bytes read.
    fn read_blob(&mut self, key: &str, buffer: &mut [u8]) -> Result<usize, StoreError>;

    /// Stage a blob write under `key`, replacing any previous value
    fn write_blob(&mut self, key: &str, data: &[u8]) -> Result<(), StoreError>;

    /// Erase every key in this namespace
    fn erase_all(&mut self) -> Result<(), StoreError>;

    /// Commit staged writes to persistent storage
    fn commit(&mut self) -> Result<(), StoreError>;
}
