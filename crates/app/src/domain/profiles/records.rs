//! Profile Records

use crate::domain::regions::Region;

/// Delivery details a shopper keeps on file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub region: Region,
}
