//! Delivery regions.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegionError {
    #[error("state must not be blank")]
    BlankState,

    #[error("local government area must not be blank")]
    BlankLga,
}

/// A state and local government area pair.
///
/// Both parts are trimmed and lower-cased so lookups do not depend on how a
/// client capitalised the names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Region {
    state: String,
    lga: String,
}

impl Region {
    pub fn new(state: &str, lga: &str) -> Result<Self, RegionError> {
        let state = state.trim().to_lowercase();
        let lga = lga.trim().to_lowercase();

        if state.is_empty() {
            return Err(RegionError::BlankState);
        }

        if lga.is_empty() {
            return Err(RegionError::BlankLga);
        }

        Ok(Self { state, lga })
    }

    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    #[must_use]
    pub fn lga(&self) -> &str {
        &self.lga
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.state, self.lga)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_is_normalised() {
        let region = Region::new("  Lagos ", "IKEJA");

        assert_eq!(region, Region::new("lagos", "ikeja"));
        assert_eq!(region.map(|r| r.to_string()).ok().as_deref(), Some("lagos/ikeja"));
    }

    #[test]
    fn blank_parts_are_rejected() {
        assert_eq!(Region::new(" ", "ikeja"), Err(RegionError::BlankState));
        assert_eq!(Region::new("lagos", ""), Err(RegionError::BlankLga));
    }
}
