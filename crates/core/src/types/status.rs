//! Flags and status enums for API entities.

use serde::{Deserialize, Serialize};

/// Whether a user may call administrator routes.
///
/// The API carries this flag as the strings `"true"` and `"false"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AdminFlag {
    /// Allowed on admin-only routes (product mutation).
    #[serde(rename = "true")]
    Admin,
    /// Regular customer.
    #[default]
    #[serde(rename = "false")]
    Regular,
}

impl AdminFlag {
    /// Whether the flag grants administrator privileges.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Wire representation (`"true"` / `"false"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "true",
            Self::Regular => "false",
        }
    }
}

impl std::fmt::Display for AdminFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdminFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true" => Ok(Self::Admin),
            "false" => Ok(Self::Regular),
            _ => Err(format!("invalid admin flag: {s}")),
        }
    }
}

/// Lifecycle of a cart.
///
/// A user holds at most one `Open` cart. Closing it either cancels the
/// order, which returns every line item to stock, or finishes it, which
/// keeps the stock already taken when the cart was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartStatus {
    Open,
    Canceled,
    Finished,
}

impl CartStatus {
    /// Whether closing a cart with this status puts its items back in stock.
    #[must_use]
    pub const fn restores_stock(self) -> bool {
        matches!(self, Self::Canceled)
    }

    /// Whether the cart still blocks a new cart or the owner's deletion.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Route segment under `/carrinhos` that closes a cart with this status.
    #[must_use]
    pub const fn closing_route(self) -> Option<&'static str> {
        match self {
            Self::Open => None,
            Self::Canceled => Some("cancelar-compra"),
            Self::Finished => Some("concluir-compra"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_flag_wire_format() {
        assert_eq!(serde_json::to_string(&AdminFlag::Admin).unwrap(), "\"true\"");
        let flag: AdminFlag = serde_json::from_str("\"false\"").unwrap();
        assert_eq!(flag, AdminFlag::Regular);
        assert!(serde_json::from_str::<AdminFlag>("true").is_err());
        assert!("yes".parse::<AdminFlag>().is_err());
    }

    #[test]
    fn test_cart_status_stock_rules() {
        assert!(CartStatus::Canceled.restores_stock());
        assert!(!CartStatus::Finished.restores_stock());
        assert!(CartStatus::Open.is_open());
        assert_eq!(CartStatus::Open.closing_route(), None);
        assert_eq!(
            CartStatus::Finished.closing_route(),
            Some("concluir-compra")
        );
    }
}
