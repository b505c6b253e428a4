//! Cart/quote reconciliation and checkout.
//!
//! The backend owns cart contents and all pricing. Every mutation here
//! issues one backend call and then unconditionally re-fetches the cart -
//! never an optimistic local edit - so the displayed subtotal, discount,
//! and total can't diverge from server-side computation. The only local
//! arithmetic is the quote merge: `total = (subtotal - discount) + fee`.

use rust_decimal::Decimal;
use tracing::instrument;

use feira_livre_core::{CartItemId, DiscountType, format_brl};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{
    Address, AddToCartRequest, CartItem, CartLine, CheckoutItem, CheckoutRequest, Company,
    DeliveryCalcRequest, DeliveryQuote,
};

impl ApiClient {
    /// Fetch the current cart with its company and discount fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn fetch_cart(&self) -> Result<crate::types::CartResponse, ApiError> {
        self.get_json("/cart").await
    }

    /// Add product selections to the cart.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` when `lines` is empty.
    #[instrument(skip(self, lines))]
    pub async fn add_to_cart(&self, lines: &[CartLine]) -> Result<(), ApiError> {
        if lines.is_empty() {
            return Err(ApiError::validation("Select products first"));
        }
        self.post_unit("/cart", &AddToCartRequest { products: lines })
            .await
    }

    /// Increment one cart item's quantity by one.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn increment_item(&self, id: CartItemId) -> Result<(), ApiError> {
        self.put_unit(&format!("/cart/items/{id}/increment"), &serde_json::json!({}))
            .await
    }

    /// Decrement one cart item's quantity by one.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn decrement_item(&self, id: CartItemId) -> Result<(), ApiError> {
        self.put_unit(&format!("/cart/items/{id}/decrement"), &serde_json::json!({}))
            .await
    }

    /// Remove one item from the cart entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn remove_item(&self, id: CartItemId) -> Result<(), ApiError> {
        self.delete_unit(&format!("/cart/items/{id}")).await
    }

    /// Ask the backend for the delivery fee and distance to an address.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn delivery_quote(&self, address_line: &str) -> Result<DeliveryQuote, ApiError> {
        self.post_json(
            "/delivery/calc",
            &DeliveryCalcRequest {
                address: address_line,
            },
        )
        .await
    }

    /// Submit the final order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, request))]
    pub async fn checkout(&self, request: &CheckoutRequest) -> Result<(), ApiError> {
        self.post_unit("/cart/checkout", request).await
    }
}

/// The displayed price breakdown, merged from the server-fetched cart and
/// the delivery quote.
///
/// Invariant: `total = (subtotal - discount) + delivery_fee`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub subtotal: Decimal,
    pub discount_percent: Decimal,
    pub discount_type: Option<DiscountType>,
    pub discount: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
}

impl Quote {
    /// Multi-line display rendering.
    #[must_use]
    pub fn display(&self) -> String {
        let mut out = format!("Subtotal: {}", format_brl(self.subtotal));
        if self.discount > Decimal::ZERO {
            let kind = match self.discount_type {
                Some(DiscountType::App) => "app",
                Some(DiscountType::Store) => "store",
                None => "",
            };
            out.push_str(&format!(
                "\nDiscount: -{} ({}% {kind})",
                format_brl(self.discount),
                self.discount_percent
            ));
        }
        out.push_str(&format!("\nDelivery: {}", format_brl(self.delivery_fee)));
        out.push_str(&format!("\nTotal: {}", format_brl(self.total)));
        out
    }
}

/// Client-side cart state, kept consistent with the server by re-fetching
/// after every mutation.
#[derive(Debug, Default)]
pub struct CartState {
    items: Vec<CartItem>,
    company: Option<Company>,
    selected_address: Option<Address>,
    delivery: Option<DeliveryQuote>,
}

impl CartState {
    /// Current cart lines.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The store the cart belongs to, when non-empty.
    #[must_use]
    pub fn company(&self) -> Option<&Company> {
        self.company.as_ref()
    }

    /// The address selected for delivery, if any.
    #[must_use]
    pub fn selected_address(&self) -> Option<&Address> {
        self.selected_address.as_ref()
    }

    /// The delivery quote for the selected address, if computed.
    #[must_use]
    pub fn delivery(&self) -> Option<&DeliveryQuote> {
        self.delivery.as_ref()
    }

    /// Replace local state with the server's cart.
    ///
    /// An empty cart also clears the selected address and delivery quote.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails; state keeps its last
    /// successfully fetched value.
    pub async fn refresh(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        let response = api.fetch_cart().await?;
        let items = response.cart.map(|cart| cart.items).unwrap_or_default();

        if items.is_empty() {
            self.items.clear();
            self.company = None;
            self.selected_address = None;
            self.delivery = None;
        } else {
            self.items = items;
            self.company = response.company;
        }
        Ok(())
    }

    /// Increment an item, refusing locally at the product's stock limit.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` at the stock limit (no request is
    /// issued), `ApiError::NotFound` for an unknown item, or the mutation's
    /// error after the re-fetch.
    pub async fn increment(&mut self, api: &ApiClient, id: CartItemId) -> Result<(), ApiError> {
        let item = self.item(id)?;
        if item.quantity >= item.product.stock_quantity {
            return Err(ApiError::validation("No more stock for this product"));
        }
        let mutation = api.increment_item(id).await;
        self.refetch_after(api, mutation).await
    }

    /// Decrement an item, refusing locally at quantity 1; removal is a
    /// distinct action.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` at quantity 1 (no request is issued),
    /// `ApiError::NotFound` for an unknown item, or the mutation's error
    /// after the re-fetch.
    pub async fn decrement(&mut self, api: &ApiClient, id: CartItemId) -> Result<(), ApiError> {
        let item = self.item(id)?;
        if item.quantity <= 1 {
            return Err(ApiError::validation(
                "Quantity cannot go below 1; remove the item instead",
            ));
        }
        let mutation = api.decrement_item(id).await;
        self.refetch_after(api, mutation).await
    }

    /// Remove an item from the cart.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown item, or the mutation's
    /// error after the re-fetch.
    pub async fn remove(&mut self, api: &ApiClient, id: CartItemId) -> Result<(), ApiError> {
        self.item(id)?;
        let mutation = api.remove_item(id).await;
        self.refetch_after(api, mutation).await
    }

    /// Select a delivery address and fetch its quote.
    ///
    /// A free-shipping store short-circuits to a zero fee without a network
    /// call. On failure the previous quote is discarded so a stale fee is
    /// never displayed against the new address.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` on an empty cart, or the quote
    /// request's error.
    pub async fn select_address(
        &mut self,
        api: &ApiClient,
        address: Address,
    ) -> Result<(), ApiError> {
        if self.is_empty() {
            return Err(ApiError::validation("Your cart is empty"));
        }

        let line = address.formatted_line();
        self.selected_address = Some(address);
        self.delivery = None;

        if self.company.as_ref().is_some_and(|c| c.free_shipping) {
            self.delivery = Some(DeliveryQuote::free());
            return Ok(());
        }

        let quote = api.delivery_quote(&line).await?;
        self.delivery = Some(quote);
        Ok(())
    }

    /// The displayed price breakdown for the current state.
    ///
    /// Subtotal and discount come from the server-fetched cart; only the
    /// delivery fee is merged in locally.
    #[must_use]
    pub fn quote(&self) -> Quote {
        let subtotal: Decimal = self.items.iter().map(|item| item.subtotal).sum();
        let (discount_percent, discount_type) = self
            .company
            .as_ref()
            .map_or((Decimal::ZERO, None), discount_fields);
        let discount = (subtotal * discount_percent / Decimal::ONE_HUNDRED).round_dp(2);
        let delivery_fee = self.delivery.map_or(Decimal::ZERO, |d| d.fee);

        Quote {
            subtotal,
            discount_percent,
            discount_type,
            discount,
            delivery_fee,
            total: (subtotal - discount) + delivery_fee,
        }
    }

    /// Submit the order.
    ///
    /// Preconditions checked locally, with no request issued on violation:
    /// non-empty cart and a selected address. On success local cart state is
    /// cleared; on failure it is preserved so the user can retry.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` on a violated precondition, or the
    /// checkout request's error.
    pub async fn checkout(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        if self.is_empty() {
            return Err(ApiError::validation("Your cart is empty"));
        }
        let Some(address) = &self.selected_address else {
            return Err(ApiError::validation(
                "Select a delivery address; add one to your profile if none is listed",
            ));
        };
        let Some(address_id) = address.id else {
            return Err(ApiError::validation("The selected address was never saved"));
        };

        let request = CheckoutRequest {
            address_id,
            total: self.quote().total,
            items: self
                .items
                .iter()
                .map(|item| CheckoutItem {
                    product_id: item.product.id,
                    quantity: item.quantity,
                    variation_ids: item.variations.iter().map(|v| v.id).collect(),
                })
                .collect(),
        };

        api.checkout(&request).await?;

        self.items.clear();
        self.company = None;
        self.selected_address = None;
        self.delivery = None;
        Ok(())
    }

    /// Find an item or refuse before any network call.
    fn item(&self, id: CartItemId) -> Result<&CartItem, ApiError> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("cart item {id}")))
    }

    /// Re-fetch after a mutation, unconditionally. The mutation's own error
    /// takes precedence over the re-fetch's.
    async fn refetch_after(
        &mut self,
        api: &ApiClient,
        mutation: Result<(), ApiError>,
    ) -> Result<(), ApiError> {
        let refetch = self.refresh(api).await;
        mutation?;
        refetch
    }
}

/// Discount percent and type from the company's first-purchase flags; the
/// platform-wide discount takes precedence over the store's.
fn discount_fields(company: &Company) -> (Decimal, Option<DiscountType>) {
    if company.first_purchase_discount_app {
        (
            company.first_purchase_discount_app_value.unwrap_or_default(),
            Some(DiscountType::App),
        )
    } else if company.first_purchase_discount_store {
        (
            company
                .first_purchase_discount_store_value
                .unwrap_or_default(),
            Some(DiscountType::Store),
        )
    } else {
        (Decimal::ZERO, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feira_livre_core::{CartItemId, CompanyId, ProductId};
    use crate::types::Product;

    fn product(id: i32, price: Decimal, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: None,
            price,
            stock_quantity: stock,
            company_id: CompanyId::new(1),
            category_id: None,
            category: None,
            status: feira_livre_core::ProductStatus::Active,
            images: Vec::new(),
            variations: Vec::new(),
        }
    }

    fn item(id: i32, quantity: u32, price: Decimal, stock: u32) -> CartItem {
        CartItem {
            id: CartItemId::new(id),
            product: product(id, price, stock),
            quantity,
            price,
            subtotal: price * Decimal::from(quantity),
            variations: Vec::new(),
            variation_key: None,
        }
    }

    fn company(store_discount: Option<Decimal>, app_discount: Option<Decimal>) -> Company {
        Company {
            id: CompanyId::new(1),
            legal_name: "Padaria Sol LTDA".to_string(),
            final_name: "Padaria Sol".to_string(),
            cnpj: "12345678000195".to_string(),
            phone: None,
            address: None,
            plan: None,
            email: None,
            category: None,
            status: None,
            logo: None,
            delivery_fee: None,
            delivery_radius: None,
            free_shipping: false,
            first_purchase_discount_store: store_discount.is_some(),
            first_purchase_discount_store_value: store_discount,
            first_purchase_discount_app: app_discount.is_some(),
            first_purchase_discount_app_value: app_discount,
        }
    }

    fn state(items: Vec<CartItem>, company: Option<Company>) -> CartState {
        CartState {
            items,
            company,
            selected_address: None,
            delivery: None,
        }
    }

    #[test]
    fn test_quote_scenario_store_discount() {
        // One item, qty 2 x 10.00, 10% store discount, fee 5.00
        let mut cart = state(
            vec![item(1, 2, Decimal::new(1000, 2), 10)],
            Some(company(Some(Decimal::new(10, 0)), None)),
        );
        cart.delivery = Some(DeliveryQuote {
            fee: Decimal::new(500, 2),
            distance: Decimal::new(32, 1),
        });

        let quote = cart.quote();
        assert_eq!(quote.subtotal, Decimal::new(2000, 2));
        assert_eq!(quote.discount, Decimal::new(200, 2));
        assert_eq!(quote.discount_type, Some(DiscountType::Store));
        assert_eq!(quote.total, Decimal::new(2300, 2));
    }

    #[test]
    fn test_quote_invariant_holds() {
        let mut cart = state(
            vec![
                item(1, 3, Decimal::new(750, 2), 10),
                item(2, 1, Decimal::new(1999, 2), 5),
            ],
            Some(company(None, Some(Decimal::new(5, 0)))),
        );
        cart.delivery = Some(DeliveryQuote {
            fee: Decimal::new(1234, 2),
            distance: Decimal::ONE,
        });

        let quote = cart.quote();
        assert_eq!(quote.total, (quote.subtotal - quote.discount) + quote.delivery_fee);
    }

    #[test]
    fn test_quote_app_discount_takes_precedence() {
        let cart = state(
            vec![item(1, 1, Decimal::new(1000, 2), 10)],
            Some(company(
                Some(Decimal::new(20, 0)),
                Some(Decimal::new(10, 0)),
            )),
        );
        let quote = cart.quote();
        assert_eq!(quote.discount_type, Some(DiscountType::App));
        assert_eq!(quote.discount_percent, Decimal::new(10, 0));
    }

    #[test]
    fn test_quote_empty_cart_is_zero() {
        let quote = state(Vec::new(), None).quote();
        assert_eq!(quote.subtotal, Decimal::ZERO);
        assert_eq!(quote.total, Decimal::ZERO);
        assert!(quote.discount_type.is_none());
    }

    #[tokio::test]
    async fn test_decrement_refused_at_quantity_one() {
        // Guard fires before any request, so a client pointing nowhere works
        let api = offline_client();
        let mut cart = state(vec![item(1, 1, Decimal::ONE, 10)], None);

        let err = cart
            .decrement(&api, CartItemId::new(1))
            .await
            .expect_err("must refuse");
        assert!(matches!(err, ApiError::Validation(_)));
        // State untouched
        assert_eq!(cart.items().first().expect("item").quantity, 1);
    }

    #[tokio::test]
    async fn test_increment_refused_at_stock_limit() {
        let api = offline_client();
        let mut cart = state(vec![item(1, 5, Decimal::ONE, 5)], None);

        let err = cart
            .increment(&api, CartItemId::new(1))
            .await
            .expect_err("must refuse");
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_mutation_on_unknown_item_is_not_found() {
        let api = offline_client();
        let mut cart = state(vec![item(1, 2, Decimal::ONE, 5)], None);

        let err = cart
            .remove(&api, CartItemId::new(99))
            .await
            .expect_err("must refuse");
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_checkout_refused_on_empty_cart() {
        let api = offline_client();
        let mut cart = CartState::default();

        let err = cart.checkout(&api).await.expect_err("must refuse");
        assert!(matches!(err, ApiError::Validation(ref msg) if msg.contains("empty")));
    }

    #[tokio::test]
    async fn test_checkout_refused_without_address() {
        let api = offline_client();
        let mut cart = state(vec![item(1, 2, Decimal::ONE, 5)], None);

        let err = cart.checkout(&api).await.expect_err("must refuse");
        assert!(matches!(err, ApiError::Validation(ref msg) if msg.contains("address")));
    }

    #[tokio::test]
    async fn test_select_address_refused_on_empty_cart() {
        let api = offline_client();
        let mut cart = CartState::default();
        let address = Address {
            id: Some(feira_livre_core::AddressId::new(1)),
            label: "Casa".to_string(),
            cep: "01310-100".to_string(),
            street: "Av. Paulista".to_string(),
            neighborhood: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            number: None,
            complement: None,
            note: None,
        };

        let err = cart
            .select_address(&api, address)
            .await
            .expect_err("must refuse");
        assert!(matches!(err, ApiError::Validation(_)));
    }

    /// A client whose base URL points nowhere; tests that reach the network
    /// would fail loudly instead of silently passing.
    fn offline_client() -> ApiClient {
        let config = crate::ApiConfig {
            base_url: url::Url::parse("http://127.0.0.1:9").expect("url"),
            session_path: std::path::PathBuf::from("/tmp/unused-session.json"),
        };
        ApiClient::new(&config).expect("client")
    }
}
