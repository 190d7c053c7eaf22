//! Identifiers for records owned by the catalogue, which lives outside this service.

use crate::uuids::TypedUuid;

/// Catalogue product marker.
#[derive(Debug)]
pub struct Product;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Vendor marker.
#[derive(Debug)]
pub struct Vendor;

/// Vendor UUID
pub type VendorUuid = TypedUuid<Vendor>;
