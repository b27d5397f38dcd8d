//! Settings record definition
//!
//! One fixed-shape record holds every persisted setting. Text fields are
//! bounded heapless strings; assignment truncates at a character boundary
//! and can never write past the declared capacity. The record is stored
//! in flash as postcard-serialized binary data.

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::net::Ipv4Addr;
use crate::settings::defaults;

/// Maximum Wi-Fi SSID length in bytes
pub const MAX_WIFI_SSID_LEN: usize = 32;

/// Maximum Wi-Fi password length in bytes
pub const MAX_WIFI_PASSWORD_LEN: usize = 64;

/// Maximum hostname length in bytes
pub const MAX_HOSTNAME_LEN: usize = 32;

/// Maximum mDNS instance name length in bytes
pub const MAX_MDNS_INSTANCE_LEN: usize = 32;

/// Maximum NTP server length in bytes
pub const MAX_NTP_SERVER_LEN: usize = 32;

/// Maximum timezone string length in bytes
pub const MAX_TIMEZONE_LEN: usize = 32;

/// Maximum OTA URL length in bytes
pub const MAX_OTA_URL_LEN: usize = 512;

/// The persisted settings record
///
/// `schema_size` is stamped with [`SettingsRecord::SCHEMA_SIZE`] on every
/// save and checked on load; a mismatch invalidates the whole blob. It is
/// a layout-compatibility fingerprint, not a semantic version -
/// `schema_version` is reserved for that and not currently checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettingsRecord {
    pub(crate) schema_size: u32,
    pub(crate) schema_version: u32,
    wifi_ssid: String<MAX_WIFI_SSID_LEN>,
    wifi_password: String<MAX_WIFI_PASSWORD_LEN>,
    hostname: String<MAX_HOSTNAME_LEN>,
    mdns_instance: String<MAX_MDNS_INSTANCE_LEN>,
    ntp_server: String<MAX_NTP_SERVER_LEN>,
    timezone: String<MAX_TIMEZONE_LEN>,
    ota_url: String<MAX_OTA_URL_LEN>,
    /// Dynamic addressing; the five address fields below only apply when
    /// this is false
    pub dhcp: bool,
    pub ip: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub gateway: Ipv4Addr,
    pub dns1: Ipv4Addr,
    pub dns2: Ipv4Addr,
}

impl SettingsRecord {
    /// Reserved schema version, stored but not checked on load
    pub const SCHEMA_VERSION: u32 = 1;

    /// Byte size of the in-memory record layout
    ///
    /// Used as a coarse compatibility fingerprint: a build that adds or
    /// removes fields changes this value, and blobs stamped with a
    /// different value are rejected wholesale.
    pub const SCHEMA_SIZE: u32 = core::mem::size_of::<SettingsRecord>() as u32;

    /// Create the compiled-in default record
    ///
    /// Text fields come from [`defaults`], `dhcp` is on, and all address
    /// fields are unspecified.
    pub fn defaults() -> Self {
        let mut record = Self {
            schema_size: Self::SCHEMA_SIZE,
            schema_version: Self::SCHEMA_VERSION,
            wifi_ssid: String::new(),
            wifi_password: String::new(),
            hostname: String::new(),
            mdns_instance: String::new(),
            ntp_server: String::new(),
            timezone: String::new(),
            ota_url: String::new(),
            dhcp: true,
            ip: Ipv4Addr::UNSPECIFIED,
            netmask: Ipv4Addr::UNSPECIFIED,
            gateway: Ipv4Addr::UNSPECIFIED,
            dns1: Ipv4Addr::UNSPECIFIED,
            dns2: Ipv4Addr::UNSPECIFIED,
        };
        record.set_wifi_ssid(defaults::WIFI_SSID);
        record.set_wifi_password(defaults::WIFI_PASSWORD);
        record.set_hostname(defaults::HOSTNAME);
        record.set_mdns_instance(defaults::MDNS_INSTANCE);
        record.set_ntp_server(defaults::NTP_SERVER);
        record.set_timezone(defaults::TIMEZONE);
        record.set_ota_url(defaults::OTA_URL);
        record
    }

    /// Stored layout fingerprint
    pub fn schema_size(&self) -> u32 {
        self.schema_size
    }

    /// Stored schema version
    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn wifi_ssid(&self) -> &str {
        &self.wifi_ssid
    }

    pub fn set_wifi_ssid(&mut self, value: &str) {
        self.wifi_ssid = bounded(value);
    }

    pub fn wifi_password(&self) -> &str {
        &self.wifi_password
    }

    pub fn set_wifi_password(&mut self, value: &str) {
        self.wifi_password = bounded(value);
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn set_hostname(&mut self, value: &str) {
        self.hostname = bounded(value);
    }

    pub fn mdns_instance(&self) -> &str {
        &self.mdns_instance
    }

    pub fn set_mdns_instance(&mut self, value: &str) {
        self.mdns_instance = bounded(value);
    }

    pub fn ntp_server(&self) -> &str {
        &self.ntp_server
    }

    pub fn set_ntp_server(&mut self, value: &str) {
        self.ntp_server = bounded(value);
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn set_timezone(&mut self, value: &str) {
        self.timezone = bounded(value);
    }

    pub fn ota_url(&self) -> &str {
        &self.ota_url
    }

    pub fn set_ota_url(&mut self, value: &str) {
        self.ota_url = bounded(value);
    }
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Copy `value` into a bounded string, truncating at a character boundary
/// so the result fits the capacity
fn bounded<const N: usize>(value: &str) -> String<N> {
    let mut end = value.len().min(N);
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = String::new();
    // Cannot fail: end <= N
    let _ = out.push_str(&value[..end]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let record = SettingsRecord::defaults();
        assert!(record.dhcp);
        assert_eq!(record.wifi_ssid(), defaults::WIFI_SSID);
        assert_eq!(record.hostname(), defaults::HOSTNAME);
        assert_eq!(record.ntp_server(), defaults::NTP_SERVER);
        assert!(record.ip.is_unspecified());
        assert!(record.gateway.is_unspecified());
        assert_eq!(record.schema_size(), SettingsRecord::SCHEMA_SIZE);
        assert_eq!(record.schema_version(), SettingsRecord::SCHEMA_VERSION);
    }

    #[test]
    fn test_setter_within_bounds() {
        let mut record = SettingsRecord::defaults();
        record.set_hostname("camera-01");
        assert_eq!(record.hostname(), "camera-01");
    }

    #[test]
    fn test_setter_truncates_long_value() {
        let mut record = SettingsRecord::defaults();
        let long = "0123456789012345678901234567890123456789";
        record.set_hostname(long);
        assert_eq!(record.hostname().len(), MAX_HOSTNAME_LEN);
        assert_eq!(record.hostname(), &long[..MAX_HOSTNAME_LEN]);
    }

    #[test]
    fn test_truncation_respects_char_boundary() {
        let mut record = SettingsRecord::defaults();
        // 11 ASCII bytes then multi-byte chars crossing the 32-byte cap
        record.set_hostname("weathervane-🦀🦀🦀🦀🦀🦀");
        assert!(record.hostname().len() <= MAX_HOSTNAME_LEN);
        assert!(record.hostname().is_char_boundary(record.hostname().len()));
    }

    #[test]
    fn test_empty_assignment() {
        let mut record = SettingsRecord::defaults();
        record.set_wifi_password("");
        assert_eq!(record.wifi_password(), "");
    }
}
