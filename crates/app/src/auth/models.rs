//! Caller identity models.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::uuids::TypedUuid;

/// Account marker: buyers, guests, vendors and admins share one id space.
#[derive(Debug)]
pub struct Account;

/// Account UUID
pub type AccountUuid = TypedUuid<Account>;

/// The role a caller acts under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallerRole {
    Buyer,
    Guest,
    Vendor,
    Admin,
}

impl CallerRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buyer => "buyer",
            Self::Guest => "guest",
            Self::Vendor => "vendor",
            Self::Admin => "admin",
        }
    }

    /// Vendors and admins operate the marketplace rather than shop on it.
    #[must_use]
    pub const fn is_operator(self) -> bool {
        matches!(self, Self::Vendor | Self::Admin)
    }
}

impl Display for CallerRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallerRole {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "buyer" => Ok(Self::Buyer),
            "guest" => Ok(Self::Guest),
            "vendor" => Ok(Self::Vendor),
            "admin" => Ok(Self::Admin),
            other => Err(other.to_string()),
        }
    }
}

/// Opaque identifier of an anonymous shopper's device.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceId(String);

impl DeviceId {
    /// Returns `None` for blank identifiers.
    #[must_use]
    pub fn new(value: &str) -> Option<Self> {
        let value = value.trim();

        (!value.is_empty()).then(|| Self(value.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DeviceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who a cart belongs to: a registered customer or an anonymous device.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OwnerKey {
    Customer(AccountUuid),
    Device(DeviceId),
}

impl Display for OwnerKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Customer(uuid) => write!(f, "customer:{uuid}"),
            Self::Device(device) => write!(f, "device:{device}"),
        }
    }
}

/// The authenticated identity a request runs on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub uuid: AccountUuid,
    pub role: CallerRole,
    pub device: Option<DeviceId>,
}

impl Caller {
    #[must_use]
    pub fn new(uuid: AccountUuid, role: CallerRole, device: Option<DeviceId>) -> Self {
        Self { uuid, role, device }
    }

    /// The key of the cart this caller shops with; `None` for operators.
    #[must_use]
    pub fn owner_key(&self) -> Option<OwnerKey> {
        match (self.role, &self.device) {
            (CallerRole::Buyer, _) | (CallerRole::Guest, None) => {
                Some(OwnerKey::Customer(self.uuid))
            }
            (CallerRole::Guest, Some(device)) => Some(OwnerKey::Device(device.clone())),
            (CallerRole::Vendor | CallerRole::Admin, _) => None,
        }
    }
}

/// Session row resolved from a bearer token hash.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSession {
    pub account_uuid: AccountUuid,
    pub role: String,
    pub device_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buyers_shop_with_their_account() {
        let uuid = AccountUuid::new();
        let caller = Caller::new(uuid, CallerRole::Buyer, DeviceId::new("phone-1"));

        assert_eq!(caller.owner_key(), Some(OwnerKey::Customer(uuid)));
    }

    #[test]
    fn guests_shop_with_their_device() {
        let device = DeviceId::new("phone-1");
        let caller = Caller::new(AccountUuid::new(), CallerRole::Guest, device.clone());

        assert_eq!(caller.owner_key(), device.map(OwnerKey::Device));
    }

    #[test]
    fn operators_do_not_own_carts() {
        for role in [CallerRole::Vendor, CallerRole::Admin] {
            let caller = Caller::new(AccountUuid::new(), role, None);

            assert!(caller.owner_key().is_none(), "{role} should not own a cart");
            assert!(role.is_operator());
        }
    }

    #[test]
    fn roles_parse_from_storage_strings() {
        assert_eq!("vendor".parse::<CallerRole>(), Ok(CallerRole::Vendor));
        assert_eq!("root".parse::<CallerRole>(), Err("root".to_string()));
        assert!(DeviceId::new("   ").is_none());
    }
}
