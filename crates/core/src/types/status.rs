//! Status enums for orders and user roles.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Status transitions are server-authoritative; the client only mirrors the
/// value it last saw. Owner actions map onto transitions as: accept →
/// `Confirmed`, reject → `Rejected`, cooking done → `Delivering`, delivered
/// → `Delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Created, awaiting owner acceptance.
    #[default]
    Pending,
    /// Accepted by the owner.
    Confirmed,
    /// In the kitchen.
    Cooking,
    /// Out for delivery.
    Delivering,
    /// Delivered to the customer.
    Delivered,
    /// Cancelled by the customer before acceptance.
    Cancelled,
    /// Rejected by the owner.
    Rejected,
}

impl OrderStatus {
    /// Whether this status ends the order's lifecycle.
    ///
    /// Terminal orders may be optimistically removed from live views.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled | Self::Rejected)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cooking => "COOKING",
            Self::Delivering => "DELIVERING",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
            Self::Rejected => "REJECTED",
        };
        write!(f, "{s}")
    }
}

/// Account role attached to an authenticated profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Customer,
    Owner,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "CUSTOMER"),
            Self::Owner => write!(f, "OWNER"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CUSTOMER" => Ok(Self::Customer),
            "OWNER" => Ok(Self::Owner),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Rejected.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Cooking.is_terminal());
    }

    #[test]
    fn test_status_serde_screaming_snake() {
        let json = serde_json::to_string(&OrderStatus::Delivering).expect("serialize");
        assert_eq!(json, "\"DELIVERING\"");
        let back: OrderStatus = serde_json::from_str("\"REJECTED\"").expect("deserialize");
        assert_eq!(back, OrderStatus::Rejected);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("OWNER".parse::<UserRole>(), Ok(UserRole::Owner));
        assert!("ADMIN".parse::<UserRole>().is_err());
    }
}
