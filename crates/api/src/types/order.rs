//! Order types for both the customer and the store views.

use chrono::{DateTime, Utc};
use feira_livre_core::{CompanyId, OrderId, OrderItemId, OrderStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Product, ProductVariation};

/// Store reference embedded in a customer's order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreRef {
    pub id: CompanyId,
    pub final_name: String,
}

/// Customer reference embedded in a store's order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRef {
    pub name: String,
}

/// One line of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product: Product,
    pub quantity: u32,
    pub price: Decimal,
    #[serde(default)]
    pub variations: Vec<ProductVariation>,
}

/// An order as seen by the customer (`GET /orders`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total: Decimal,
    pub store: StoreRef,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// An order as seen by the store (`GET /orders-store`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreOrder {
    pub id: OrderId,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total: Decimal,
    pub user: CustomerRef,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Envelope of both order-list endpoints.
#[derive(Debug, Deserialize)]
pub struct OrdersResponse<T> {
    #[serde(default = "Vec::new")]
    pub orders: Vec<T>,
}

/// Request body for the status-update endpoints.
#[derive(Debug, Serialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
}

/// Response of `GET /orders-driver/{id}/pix`.
///
/// `pix_code` is absent when the backend declined to issue a code.
#[derive(Debug, Clone, Deserialize)]
pub struct PixResponse {
    #[serde(default)]
    pub pix_code: Option<String>,
    /// Expiry as epoch seconds.
    #[serde(rename = "expira_em", default)]
    pub expires_at: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_deserializes() {
        let json = r#"{
            "id": 12,
            "code": "ABC123",
            "created_at": "2025-06-01T14:30:00.000000Z",
            "status": "pending",
            "total": "23.00",
            "store": {"id": 1, "final_name": "Padaria Sol"},
            "items": []
        }"#;
        let order: Order = serde_json::from_str(json).expect("deserialize");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, Decimal::new(2300, 2));
        assert_eq!(order.store.final_name, "Padaria Sol");
    }

    #[test]
    fn test_pix_response_without_code() {
        let response: PixResponse = serde_json::from_str("{}").expect("deserialize");
        assert!(response.pix_code.is_none());
        assert!(response.expires_at.is_none());
    }

    #[test]
    fn test_pix_response_wire_names() {
        let response: PixResponse =
            serde_json::from_str(r#"{"pix_code":"00020126...","expira_em":1750000000}"#)
                .expect("deserialize");
        assert_eq!(response.pix_code.as_deref(), Some("00020126..."));
        assert_eq!(response.expires_at, Some(1_750_000_000));
    }

    #[test]
    fn test_status_update_request_shape() {
        let body = serde_json::to_value(StatusUpdateRequest {
            status: OrderStatus::AwaitingConfirmation,
        })
        .expect("serialize");
        assert_eq!(body["status"], "awaiting_confirmation");
    }
}
