// sandtable-core/src/domain/error/kind.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification of a failure, used for dispatch (display, logging level, retry advice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Validation,
    Network,
    Permission,
    BusinessLogic,
    NotFound,
    Conflict,
    ServerError,
    Timeout,
    RateLimit,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 9] = [
        Self::Validation,
        Self::Network,
        Self::Permission,
        Self::BusinessLogic,
        Self::NotFound,
        Self::Conflict,
        Self::ServerError,
        Self::Timeout,
        Self::RateLimit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION",
            Self::Network => "NETWORK",
            Self::Permission => "PERMISSION",
            Self::BusinessLogic => "BUSINESS_LOGIC",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::ServerError => "SERVER_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::RateLimit => "RATE_LIMIT",
        }
    }

    /// Kinds produced by the transport or the backend itself rather than by the request.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Network | Self::Timeout | Self::ServerError)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ErrorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("Unknown error type: {}", s))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display_and_parsing_consistency() -> anyhow::Result<()> {
        for kind in ErrorKind::ALL {
            let parsed = ErrorKind::from_str(&kind.to_string()).map_err(|e| anyhow::anyhow!(e))?;
            assert_eq!(parsed, kind);
        }
        assert_eq!(
            ErrorKind::from_str("business-logic").map_err(|e| anyhow::anyhow!(e))?,
            ErrorKind::BusinessLogic
        );
        assert!(ErrorKind::from_str("panic").is_err());
        Ok(())
    }

    #[test]
    fn test_serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorKind::RateLimit).unwrap();
        assert_eq!(json, "\"RATE_LIMIT\"");
    }
}
