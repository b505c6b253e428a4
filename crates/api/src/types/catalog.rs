//! Companies, products, categories, banners, and the CEP lookup response.

use feira_livre_core::{
    BannerId, CategoryId, CompanyId, ProductId, ProductImageId, ProductStatus, VariationId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A store on the platform.
///
/// The discount flags drive the cart quote: at most one first-purchase
/// discount applies, the platform-wide one taking precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub legal_name: String,
    pub final_name: String,
    pub cnpj: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub delivery_fee: Option<Decimal>,
    #[serde(default)]
    pub delivery_radius: Option<Decimal>,
    #[serde(default)]
    pub free_shipping: bool,
    #[serde(default)]
    pub first_purchase_discount_store: bool,
    #[serde(default)]
    pub first_purchase_discount_store_value: Option<Decimal>,
    #[serde(default)]
    pub first_purchase_discount_app: bool,
    #[serde(default)]
    pub first_purchase_discount_app_value: Option<Decimal>,
}

/// A company together with its product listing (`/companies-with-products`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyWithProducts {
    #[serde(flatten)]
    pub company: Company,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A promotional banner, optionally targeting a single store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banner {
    #[serde(default)]
    pub id: Option<BannerId>,
    pub title: String,
    pub image_url: String,
    #[serde(default)]
    pub target_company_id: Option<CompanyId>,
}

/// A product as listed in catalogs, carts, and orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: u32,
    pub company_id: CompanyId,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub variations: Vec<ProductVariation>,
}

/// A stored product image path (relative to the backend's storage root).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: ProductImageId,
    pub product_id: ProductId,
    pub image_path: String,
}

/// A product variation (e.g. `type: "Tamanho", value: "P"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariation {
    pub id: VariationId,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

/// Address data returned by the CEP lookup endpoint (ViaCEP field names).
#[derive(Debug, Clone, Deserialize)]
pub struct CepAddress {
    #[serde(rename = "logradouro", default)]
    pub street: String,
    #[serde(rename = "bairro", default)]
    pub neighborhood: String,
    #[serde(rename = "localidade", default)]
    pub city: String,
    #[serde(rename = "uf", default)]
    pub state: String,
    /// Set by the lookup service when the CEP does not exist.
    #[serde(default)]
    pub erro: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_deserializes_with_string_and_number_money() {
        // Same field arrives as a string on some endpoints and a number on
        // others; both must parse.
        let json = r#"{
            "id": 1,
            "legal_name": "Mercearia Central LTDA",
            "final_name": "Mercearia Central",
            "cnpj": "12345678000195",
            "delivery_fee": "7.50",
            "free_shipping": false,
            "first_purchase_discount_app": true,
            "first_purchase_discount_app_value": 10
        }"#;
        let company: Company = serde_json::from_str(json).expect("deserialize");
        assert_eq!(company.delivery_fee, Some(Decimal::new(750, 2)));
        assert_eq!(
            company.first_purchase_discount_app_value,
            Some(Decimal::new(10, 0))
        );
        assert!(!company.first_purchase_discount_store);
    }

    #[test]
    fn test_variation_wire_rename() {
        let json = r#"{"id":4,"type":"Tamanho","value":"P"}"#;
        let variation: ProductVariation = serde_json::from_str(json).expect("deserialize");
        assert_eq!(variation.kind, "Tamanho");
    }

    #[test]
    fn test_cep_error_flag() {
        let found: CepAddress = serde_json::from_str(
            r#"{"logradouro":"Av. Paulista","bairro":"Bela Vista","localidade":"São Paulo","uf":"SP"}"#,
        )
        .expect("deserialize");
        assert!(!found.erro);

        let missing: CepAddress = serde_json::from_str(r#"{"erro":true}"#).expect("deserialize");
        assert!(missing.erro);
    }
}
