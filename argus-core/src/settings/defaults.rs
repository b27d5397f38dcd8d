//! Compiled-in default settings
//!
//! Each value can be overridden at build time through the matching
//! `ARGUS_*` environment variable, e.g.
//! `ARGUS_WIFI_SSID=workshop cargo build`. Values longer than the record's
//! field capacity are truncated on assignment like any other write.

/// Device hostname
pub const HOSTNAME: &str = match option_env!("ARGUS_HOSTNAME") {
    Some(value) => value,
    None => "argus",
};

/// Wi-Fi network name
pub const WIFI_SSID: &str = match option_env!("ARGUS_WIFI_SSID") {
    Some(value) => value,
    None => "argus",
};

/// Wi-Fi password
pub const WIFI_PASSWORD: &str = match option_env!("ARGUS_WIFI_PASSWORD") {
    Some(value) => value,
    None => "",
};

/// mDNS instance name
pub const MDNS_INSTANCE: &str = match option_env!("ARGUS_MDNS_INSTANCE") {
    Some(value) => value,
    None => "Argus",
};

/// NTP server
pub const NTP_SERVER: &str = match option_env!("ARGUS_NTP_SERVER") {
    Some(value) => value,
    None => "pool.ntp.org",
};

/// POSIX timezone string
pub const TIMEZONE: &str = match option_env!("ARGUS_TIMEZONE") {
    Some(value) => value,
    None => "UTC0",
};

/// Firmware upgrade URL
pub const OTA_URL: &str = match option_env!("ARGUS_OTA_URL") {
    Some(value) => value,
    None => "",
};
