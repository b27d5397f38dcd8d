//! Host-side persistence scenarios
//!
//! Drives the settings lifecycle end to end over the in-memory backend,
//! including simulated reboots (shutdown returns the backend, startup
//! brings it back up).

use argus_core::net::Ipv4Addr;
use argus_core::settings::record::MAX_HOSTNAME_LEN;
use argus_core::settings::{SettingsRecord, SettingsStore};
use argus_hal::mem::MemStore;
use proptest::prelude::*;

#[test]
fn provision_and_reboot_cycle() {
    // First boot: empty flash, defaults restored and persisted
    let mut store = SettingsStore::startup(MemStore::new()).unwrap();
    assert!(store.record().dhcp);

    // Provisioning flow configures a static address
    let record = store.record_mut();
    record.set_hostname("front-door");
    record.set_wifi_ssid("house-iot");
    record.set_wifi_password("correct horse");
    record.dhcp = false;
    record.ip = Ipv4Addr::new(10, 0, 0, 23);
    record.netmask = Ipv4Addr::new(255, 255, 255, 0);
    record.gateway = Ipv4Addr::new(10, 0, 0, 1);
    record.dns1 = Ipv4Addr::new(10, 0, 0, 1);
    store.save().unwrap();

    // Power cycle
    let store = SettingsStore::startup(store.shutdown()).unwrap();
    assert_eq!(store.record().hostname(), "front-door");
    assert_eq!(store.record().wifi_ssid(), "house-iot");
    assert!(!store.record().dhcp);
    assert_eq!(store.record().ip, Ipv4Addr::new(10, 0, 0, 23));

    // Factory reset, then another power cycle: defaults everywhere
    let mut store = store;
    store.reset();
    store.save().unwrap();
    let store = SettingsStore::startup(store.shutdown()).unwrap();
    assert_eq!(store.record(), &SettingsRecord::defaults());
    assert!(store.record().ip.is_unspecified());
}

proptest! {
    #[test]
    fn round_trip_any_record(
        hostname in "[a-zA-Z0-9._-]{0,32}",
        ssid in "[ -~]{0,32}",
        password in "[ -~]{0,64}",
        ntp in "[a-zA-Z0-9._-]{0,32}",
        timezone in "[A-Za-z0-9,+/._-]{0,32}",
        ota_url in "[ -~]{0,120}",
        dhcp in any::<bool>(),
        ip in any::<[u8; 4]>(),
        netmask in any::<[u8; 4]>(),
        gateway in any::<[u8; 4]>(),
        dns1 in any::<[u8; 4]>(),
        dns2 in any::<[u8; 4]>(),
    ) {
        let mut store = SettingsStore::startup(MemStore::new()).unwrap();
        let record = store.record_mut();
        record.set_hostname(&hostname);
        record.set_wifi_ssid(&ssid);
        record.set_wifi_password(&password);
        record.set_ntp_server(&ntp);
        record.set_timezone(&timezone);
        record.set_ota_url(&ota_url);
        record.dhcp = dhcp;
        record.ip = ip.into();
        record.netmask = netmask.into();
        record.gateway = gateway.into();
        record.dns1 = dns1.into();
        record.dns2 = dns2.into();
        store.save().unwrap();
        let saved = store.record().clone();

        let store = SettingsStore::startup(store.shutdown()).unwrap();
        prop_assert_eq!(store.record(), &saved);
    }

    #[test]
    fn truncation_never_overruns(value in ".{0,80}") {
        let mut record = SettingsRecord::defaults();
        record.set_hostname(&value);
        let stored = record.hostname();

        prop_assert!(stored.len() <= MAX_HOSTNAME_LEN);
        prop_assert!(value.starts_with(stored));
        // Whatever fits is kept whole; nothing shorter is silently lost
        if value.len() <= MAX_HOSTNAME_LEN {
            prop_assert_eq!(stored, value.as_str());
        }
    }
}
