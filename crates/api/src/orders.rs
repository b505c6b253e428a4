//! Order listing and status transitions, for both roles.
//!
//! Status is owned by the backend; the client only requests transitions and
//! displays whatever the next list fetch returns. Confirming a payment does
//! not touch local PIX state.

use tracing::instrument;

use feira_livre_core::{OrderId, OrderStatus};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{Order, OrdersResponse, StatusUpdateRequest, StoreOrder};

impl ApiClient {
    /// List the customer's orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn orders(&self) -> Result<Vec<Order>, ApiError> {
        let response: OrdersResponse<Order> = self.get_json("/orders").await?;
        Ok(response.orders)
    }

    /// Request a status transition on one of the customer's orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<(), ApiError> {
        self.put_unit(
            &format!("/orders-client/{order}/status"),
            &StatusUpdateRequest { status },
        )
        .await
    }

    /// Customer claims to have paid a pending order via PIX; the store
    /// confirms it later.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn mark_paid_via_pix(&self, order: OrderId) -> Result<(), ApiError> {
        self.update_order_status(order, OrderStatus::AwaitingConfirmation)
            .await
    }

    /// Customer confirms a pickup order, to be paid at the counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn confirm_pickup(&self, order: OrderId) -> Result<(), ApiError> {
        self.update_order_status(order, OrderStatus::PendingPayment)
            .await
    }

    /// List the store's incoming orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn store_orders(&self) -> Result<Vec<StoreOrder>, ApiError> {
        let response: OrdersResponse<StoreOrder> = self.get_json("/orders-store").await?;
        Ok(response.orders)
    }

    /// Request a status transition on one of the store's orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn update_store_order_status(
        &self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<(), ApiError> {
        self.patch_unit(
            &format!("/orders-store/{order}/status"),
            &StatusUpdateRequest { status },
        )
        .await
    }
}
