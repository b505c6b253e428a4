//! Status enums and the user role vocabulary.
//!
//! Every enum here mirrors a string the backend actually sends; the client
//! only requests transitions and displays the current value. Some wire
//! values are Portuguese (`ativo`, `em_falta`) - the serde renames keep the
//! wire contract intact.

use serde::{Deserialize, Serialize};

/// Order lifecycle status, driven entirely by backend transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Canceled,
    ReadyForPickup,
    /// Customer claims to have paid via PIX; store must confirm.
    AwaitingConfirmation,
    /// Customer will pay on pickup.
    PendingPayment,
}

impl OrderStatus {
    /// Human-readable label for display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
            Self::ReadyForPickup => "ready for pickup",
            Self::AwaitingConfirmation => "awaiting payment confirmation (PIX)",
            Self::PendingPayment => "awaiting payment on pickup",
        }
    }

    /// Wire value as the backend expects it in status-update requests.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
            Self::ReadyForPickup => "ready_for_pickup",
            Self::AwaitingConfirmation => "awaiting_confirmation",
            Self::PendingPayment => "pending_payment",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "canceled" => Ok(Self::Canceled),
            "ready_for_pickup" => Ok(Self::ReadyForPickup),
            "awaiting_confirmation" => Ok(Self::AwaitingConfirmation),
            "pending_payment" => Ok(Self::PendingPayment),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Payment method a customer can select for a pending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Pix,
    Cash,
}

/// Product visibility status. Wire values are Portuguese.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProductStatus {
    #[default]
    #[serde(rename = "ativo")]
    Active,
    #[serde(rename = "em_falta")]
    OutOfStock,
    #[serde(rename = "oculto")]
    Hidden,
}

impl ProductStatus {
    /// Wire value as the backend expects it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ativo",
            Self::OutOfStock => "em_falta",
            Self::Hidden => "oculto",
        }
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ativo" => Ok(Self::Active),
            "em_falta" => Ok(Self::OutOfStock),
            "oculto" => Ok(Self::Hidden),
            _ => Err(format!("invalid product status: {s}")),
        }
    }
}

/// Driver account status. Wire values are Portuguese.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DriverStatus {
    #[default]
    #[serde(rename = "ativo")]
    Active,
    #[serde(rename = "inativo")]
    Inactive,
}

impl DriverStatus {
    /// Wire value as the backend expects it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ativo",
            Self::Inactive => "inativo",
        }
    }
}

impl std::str::FromStr for DriverStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ativo" => Ok(Self::Active),
            "inativo" => Ok(Self::Inactive),
            _ => Err(format!("invalid driver status: {s}")),
        }
    }
}

/// Which first-purchase discount applies to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Platform-wide first-purchase discount.
    App,
    /// Store-specific first-purchase discount.
    Store,
}

/// Role attached to an authenticated user; gates which flows are reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Client,
    Store,
    Delivery,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client => write!(f, "client"),
            Self::Store => write!(f, "store"),
            Self::Delivery => write!(f, "delivery"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Self::Client),
            "store" => Ok(Self::Store),
            "delivery" => Ok(Self::Delivery),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_values() {
        let json = serde_json::to_string(&OrderStatus::ReadyForPickup).expect("serialize");
        assert_eq!(json, "\"ready_for_pickup\"");

        let status: OrderStatus =
            serde_json::from_str("\"awaiting_confirmation\"").expect("deserialize");
        assert_eq!(status, OrderStatus::AwaitingConfirmation);
    }

    #[test]
    fn test_order_status_parse_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Completed,
            OrderStatus::Canceled,
            OrderStatus::ReadyForPickup,
            OrderStatus::AwaitingConfirmation,
            OrderStatus::PendingPayment,
        ] {
            let parsed: OrderStatus = status.as_str().parse().expect("parse");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_order_status_rejects_unknown() {
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_product_status_portuguese_wire_values() {
        let json = serde_json::to_string(&ProductStatus::OutOfStock).expect("serialize");
        assert_eq!(json, "\"em_falta\"");

        let status: ProductStatus = serde_json::from_str("\"oculto\"").expect("deserialize");
        assert_eq!(status, ProductStatus::Hidden);
    }

    #[test]
    fn test_user_role_parse() {
        assert_eq!("store".parse::<UserRole>().expect("parse"), UserRole::Store);
        assert!("superuser".parse::<UserRole>().is_err());
    }
}
