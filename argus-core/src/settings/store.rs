//! Settings persistence and boot-time recovery
//!
//! [`SettingsStore`] owns the active [`SettingsRecord`] and mediates all
//! reads and writes against the backing blob store. Startup never hands
//! out a partial record: every load failure falls back to the compiled-in
//! defaults, which are immediately persisted so the next boot finds a
//! valid blob.

use argus_hal::{BlobStore, NamespaceHandle, OpenMode, StoreError};

use crate::settings::record::SettingsRecord;

/// Namespace under which settings are stored
pub const SETTINGS_NAMESPACE: &str = "settings";

/// Blob key within the namespace
pub const SETTINGS_KEY: &str = "settings";

/// Upper bound on the serialized record size
pub const MAX_RECORD_SIZE: usize = 1024;

/// Settings persistence errors
///
/// Only [`StoreInit`](SettingsError::StoreInit) ever escapes `startup`;
/// every other load-time failure is recovered locally by the
/// factory-reset fallback. Save-time failures are reported to the caller
/// and leave both the in-memory record and the on-flash copy unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Backing store could not be initialized; the store is unusable
    StoreInit(StoreError),
    /// Namespace could not be opened
    StoreOpen(StoreError),
    /// Blob missing or unreadable
    BlobRead(StoreError),
    /// Blob could not be written or committed
    BlobWrite(StoreError),
    /// Stored blob could not be decoded
    Decode,
    /// Record could not be encoded
    Encode,
    /// Stored layout fingerprint does not match this build
    SchemaMismatch { stored: u32, current: u32 },
}

/// Owner of the active settings record
///
/// Exactly one instance exists per process lifetime; collaborators read
/// and mutate the record through it and trigger persistence explicitly.
pub struct SettingsStore<S: BlobStore> {
    backend: S,
    record: SettingsRecord,
}

impl<S: BlobStore> SettingsStore<S> {
    /// Initialize the backing store and load the settings record
    ///
    /// A `NoFreePages` or `IncompatibleVersion` init failure is recovered
    /// by erasing the whole store and initializing again; any other init
    /// failure is fatal. Load failures (open, read, decode, fingerprint
    /// mismatch) trigger the factory-reset fallback: the record is
    /// restored to compiled-in defaults and persisted.
    pub fn startup(mut backend: S) -> Result<Self, SettingsError> {
        match backend.init() {
            Ok(()) => {}
            Err(e @ (StoreError::NoFreePages | StoreError::IncompatibleVersion)) => {
                warn!("blob store unusable ({:?}), erasing", e);
                backend.erase_all().map_err(SettingsError::StoreInit)?;
                backend.init().map_err(SettingsError::StoreInit)?;
            }
            Err(e) => return Err(SettingsError::StoreInit(e)),
        }

        match Self::load(&mut backend) {
            Ok(record) => {
                info!("settings loaded from flash");
                log_record(&record);
                Ok(Self { backend, record })
            }
            Err(e) => {
                warn!("settings load failed ({:?}), restoring defaults", e);
                let mut store = Self {
                    backend,
                    record: SettingsRecord::defaults(),
                };
                store.reset();
                if let Err(e) = store.save() {
                    error!("could not persist default settings: {:?}", e);
                }
                Ok(store)
            }
        }
    }

    fn load(backend: &mut S) -> Result<SettingsRecord, SettingsError> {
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let len = {
            let mut handle = backend
                .open(SETTINGS_NAMESPACE, OpenMode::ReadOnly)
                .map_err(SettingsError::StoreOpen)?;
            handle
                .read_blob(SETTINGS_KEY, &mut buffer)
                .map_err(SettingsError::BlobRead)?
        };

        let record: SettingsRecord =
            postcard::from_bytes(&buffer[..len]).map_err(|_| SettingsError::Decode)?;

        if record.schema_size != SettingsRecord::SCHEMA_SIZE {
            return Err(SettingsError::SchemaMismatch {
                stored: record.schema_size,
                current: SettingsRecord::SCHEMA_SIZE,
            });
        }
        Ok(record)
    }

    /// The active settings record
    pub fn record(&self) -> &SettingsRecord {
        &self.record
    }

    /// Mutable access to the active record
    ///
    /// Changes take effect in memory immediately but reach flash only on
    /// the next [`save`](SettingsStore::save).
    pub fn record_mut(&mut self) -> &mut SettingsRecord {
        &mut self.record
    }

    /// Direct access to the backing store
    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    /// Persist the record as a single committed blob
    ///
    /// Stamps the layout fingerprint first so the startup compatibility
    /// check stays correct across builds. On failure the previous
    /// on-flash copy is untouched and the caller may retry later.
    pub fn save(&mut self) -> Result<(), SettingsError> {
        self.record.schema_size = SettingsRecord::SCHEMA_SIZE;

        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let bytes =
            postcard::to_slice(&self.record, &mut buffer).map_err(|_| SettingsError::Encode)?;

        let result = Self::write(&mut self.backend, bytes);
        match &result {
            Ok(()) => {
                info!("settings saved");
                log_record(&self.record);
            }
            Err(e) => error!("could not save settings: {:?}", e),
        }
        result
    }

    fn write(backend: &mut S, bytes: &[u8]) -> Result<(), SettingsError> {
        let mut handle = backend
            .open(SETTINGS_NAMESPACE, OpenMode::ReadWrite)
            .map_err(SettingsError::StoreOpen)?;
        handle
            .write_blob(SETTINGS_KEY, bytes)
            .map_err(SettingsError::BlobWrite)?;
        handle.commit().map_err(SettingsError::BlobWrite)
    }

    /// Restore compiled-in defaults
    ///
    /// Stored keys are erased best-effort; an erase failure is logged and
    /// ignored since the next save overwrites the blob anyway.
    pub fn reset(&mut self) {
        info!("erasing stored settings");
        match self.backend.open(SETTINGS_NAMESPACE, OpenMode::ReadWrite) {
            Ok(mut handle) => {
                if let Err(e) = handle.erase_all() {
                    warn!("settings erase failed ({:?})", e);
                }
            }
            Err(e) => warn!("could not open settings namespace for erase ({:?})", e),
        }

        info!("restoring default settings");
        self.record = SettingsRecord::defaults();
    }

    /// Persist the record and release the backing store
    ///
    /// Returns the backend so a host harness can inspect it or bring the
    /// store back up. A failed final save is already reported by `save`;
    /// the previous on-flash record stays valid.
    pub fn shutdown(mut self) -> S {
        let _ = self.save();
        self.backend.deinit();
        self.backend
    }
}

/// Log every field of the active record
fn log_record(record: &SettingsRecord) {
    info!("  hostname={}", record.hostname());
    info!("  wifi_ssid={}", record.wifi_ssid());
    info!("  wifi_password={}", record.wifi_password());
    info!("  mdns_instance={}", record.mdns_instance());
    info!("  ntp_server={}", record.ntp_server());
    info!("  timezone={}", record.timezone());
    info!("  ota_url={}", record.ota_url());
    info!("  dhcp={}", record.dhcp);
    info!("  ip={}", record.ip);
    info!("  netmask={}", record.netmask);
    info!("  gateway={}", record.gateway);
    info!("  dns1={}", record.dns1);
    info!("  dns2={}", record.dns2);
}
