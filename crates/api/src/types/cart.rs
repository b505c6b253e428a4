//! Cart, delivery-quote, and checkout wire types.

use feira_livre_core::{AddressId, CartItemId, ProductId, VariationId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Company, Product, ProductVariation};

/// One line of the server-side cart.
///
/// `price` and `subtotal` are computed server-side; the client never derives
/// them beyond display formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product: Product,
    pub quantity: u32,
    pub price: Decimal,
    pub subtotal: Decimal,
    #[serde(default)]
    pub variations: Vec<ProductVariation>,
    #[serde(default)]
    pub variation_key: Option<String>,
}

/// Response of `GET /cart`. Both halves are absent for an empty cart.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartResponse {
    #[serde(default)]
    pub cart: Option<CartEnvelope>,
    #[serde(default)]
    pub company: Option<Company>,
}

/// The `cart` object inside [`CartResponse`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartEnvelope {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

/// A product selection being added to the cart (`POST /cart`).
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub id: ProductId,
    pub quantity: u32,
    pub variation_ids: Vec<VariationId>,
}

/// Request body of `POST /cart`.
#[derive(Debug, Serialize)]
pub struct AddToCartRequest<'a> {
    pub products: &'a [CartLine],
}

/// Request body of `POST /delivery/calc`.
#[derive(Debug, Serialize)]
pub struct DeliveryCalcRequest<'a> {
    /// The formatted single-line address, see [`super::Address::formatted_line`].
    pub address: &'a str,
}

/// Delivery fee and distance computed by the backend for one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DeliveryQuote {
    pub fee: Decimal,
    pub distance: Decimal,
}

impl DeliveryQuote {
    /// The quote a free-shipping store yields without a backend call.
    #[must_use]
    pub const fn free() -> Self {
        Self {
            fee: Decimal::ZERO,
            distance: Decimal::ZERO,
        }
    }
}

/// One line of a checkout request.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub variation_ids: Vec<VariationId>,
}

/// Request body of `POST /cart/checkout`.
#[derive(Debug, Serialize)]
pub struct CheckoutRequest {
    pub address_id: AddressId,
    pub total: Decimal,
    pub items: Vec<CheckoutItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cart_response() {
        let response: CartResponse = serde_json::from_str(r#"{"cart":null}"#).expect("deserialize");
        assert!(response.cart.is_none());
        assert!(response.company.is_none());
    }

    #[test]
    fn test_cart_response_with_items() {
        let json = r#"{
            "cart": {"items": [{
                "id": 9,
                "product": {
                    "id": 2, "name": "Pão francês", "price": "0.90",
                    "stock_quantity": 200, "company_id": 1
                },
                "quantity": 10,
                "price": "0.90",
                "subtotal": "9.00"
            }]},
            "company": {
                "id": 1, "legal_name": "Padaria Sol LTDA", "final_name": "Padaria Sol",
                "cnpj": "12345678000195", "free_shipping": true
            }
        }"#;
        let response: CartResponse = serde_json::from_str(json).expect("deserialize");
        let cart = response.cart.expect("cart");
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items.first().expect("item").subtotal, Decimal::new(900, 2));
        assert!(response.company.expect("company").free_shipping);
    }

    #[test]
    fn test_add_to_cart_request_shape() {
        let lines = vec![CartLine {
            id: ProductId::new(2),
            quantity: 3,
            variation_ids: vec![VariationId::new(7)],
        }];
        let body = serde_json::to_value(AddToCartRequest { products: &lines }).expect("serialize");
        assert_eq!(body["products"][0]["id"], 2);
        assert_eq!(body["products"][0]["variation_ids"][0], 7);
    }
}
