use crate::domain::errors::{DomainError, DomainResult};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

/// Opaque position inside a catalog listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogListCursor {
    pub offset: u64,
}

impl CatalogListCursor {
    pub fn new(offset: u64) -> Self {
        Self { offset }
    }

    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(format!("offset|{}", self.offset).as_bytes())
    }

    pub fn decode(token: &str) -> DomainResult<Self> {
        let invalid = || DomainError::Validation("invalid cursor token".into());
        let bytes = URL_SAFE_NO_PAD.decode(token).map_err(|_| invalid())?;
        let raw = String::from_utf8(bytes).map_err(|_| invalid())?;
        let offset = raw
            .strip_prefix("offset|")
            .ok_or_else(invalid)?
            .parse::<u64>()
            .map_err(|_| invalid())?;
        Ok(Self::new(offset))
    }
}
