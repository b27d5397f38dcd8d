//! Network value types

use serde::{Deserialize, Serialize};

/// An IPv4 address stored as four octets
///
/// The all-zero address means "unset"; static addressing fields keep this
/// value until a provisioning flow configures them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ipv4Addr([u8; 4]);

impl Ipv4Addr {
    /// The unspecified address, `0.0.0.0`
    pub const UNSPECIFIED: Self = Self([0; 4]);

    /// Create an address from its four octets
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self([a, b, c, d])
    }

    /// Get the four octets
    pub const fn octets(self) -> [u8; 4] {
        self.0
    }

    /// Check whether this is the unspecified address
    pub fn is_unspecified(self) -> bool {
        self.0 == [0; 4]
    }
}

impl From<[u8; 4]> for Ipv4Addr {
    fn from(octets: [u8; 4]) -> Self {
        Self(octets)
    }
}

impl core::fmt::Display for Ipv4Addr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unspecified() {
        assert!(Ipv4Addr::default().is_unspecified());
        assert_eq!(Ipv4Addr::default(), Ipv4Addr::UNSPECIFIED);
    }

    #[test]
    fn test_octets_round_trip() {
        let addr = Ipv4Addr::new(192, 168, 4, 1);
        assert_eq!(addr.octets(), [192, 168, 4, 1]);
        assert!(!addr.is_unspecified());
    }
}
