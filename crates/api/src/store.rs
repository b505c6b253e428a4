//! Store management: company profile, products, drivers.
//!
//! Product and company-profile writes are multipart (they may carry image
//! files); updates tunnel `PUT` through `POST` with `_method=PUT`, which is
//! what the backend expects for multipart bodies.

use std::path::PathBuf;

use reqwest::multipart::Form;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use feira_livre_core::{CategoryId, DriverId, DriverStatus, ProductId, ProductStatus};

use crate::auth::{file_part, is_strong_password};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{Company, Driver, Product};

/// Category selection on a product write: an existing category or a new one
/// created on the fly.
#[derive(Debug, Clone)]
pub enum CategoryChoice {
    Existing(CategoryId),
    New(String),
}

/// Fields of a product create/update.
#[derive(Debug, Default)]
pub struct ProductUpsert {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock_quantity: u32,
    pub status: ProductStatus,
    pub category: Option<CategoryChoice>,
    /// Image paths already stored on the backend to keep.
    pub existing_images: Vec<String>,
    /// New image files to upload.
    pub images: Vec<PathBuf>,
}

impl ProductUpsert {
    /// Build the multipart form; local validation first.
    async fn to_form(&self) -> Result<Form, ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::validation("Product name is required"));
        }

        let mut form = Form::new()
            .text("name", self.name.clone())
            .text("description", self.description.clone())
            .text("price", self.price.to_string())
            .text("stock_quantity", self.stock_quantity.to_string())
            .text("status", self.status.as_str());

        match &self.category {
            Some(CategoryChoice::New(name)) => form = form.text("category", name.clone()),
            Some(CategoryChoice::Existing(id)) => form = form.text("category_id", id.to_string()),
            None => {}
        }

        for path in &self.existing_images {
            form = form.text("existing_images[]", path.clone());
        }
        for path in &self.images {
            form = form.part("images[]", file_part(path).await?);
        }

        Ok(form)
    }
}

/// Fields of a driver create/update. Every field is required.
#[derive(Debug, Clone, Serialize)]
pub struct DriverUpsert {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub vehicle: String,
    pub plate: String,
    pub status: DriverStatus,
}

impl DriverUpsert {
    fn validate(&self) -> Result<(), ApiError> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password),
            ("phone", &self.phone),
            ("vehicle", &self.vehicle),
            ("plate", &self.plate),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ApiError::Validation(format!(
                    "The \"{field}\" field is required"
                )));
            }
        }
        if !is_strong_password(&self.password) {
            return Err(ApiError::validation(
                "Password must have at least 8 characters with uppercase, lowercase, digit, and symbol",
            ));
        }
        Ok(())
    }
}

/// One opening-hours row of the company profile.
#[derive(Debug, Clone)]
pub struct OpeningHour {
    pub day: String,
    pub open: String,
    pub close: String,
}

/// Company profile fields submitted via multipart `POST /companies/addInfo`.
#[derive(Debug, Default)]
pub struct CompanyInfoUpdate {
    pub final_name: String,
    pub phone: String,
    pub email: String,
    pub cep: String,
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub pix_key: String,
    pub pix_key_type: String,
    pub category: String,
    pub status: String,
    pub delivery_fee: Decimal,
    pub delivery_radius: Decimal,
    pub free_shipping: bool,
    pub first_purchase_discount_store: bool,
    pub first_purchase_discount_store_value: Option<Decimal>,
    pub first_purchase_discount_app: bool,
    pub first_purchase_discount_app_value: Option<Decimal>,
    pub opening_hours: Vec<OpeningHour>,
    pub logo: Option<PathBuf>,
}

impl CompanyInfoUpdate {
    async fn to_form(&self) -> Result<Form, ApiError> {
        let mut form = Form::new()
            .text("final_name", self.final_name.clone())
            .text("phone", self.phone.clone())
            .text("email", self.email.clone())
            .text("cep", self.cep.clone())
            .text("street", self.street.clone())
            .text("number", self.number.clone())
            .text("neighborhood", self.neighborhood.clone())
            .text("city", self.city.clone())
            .text("state", self.state.clone())
            .text("pix_key", self.pix_key.clone())
            .text("pix_key_type", self.pix_key_type.clone())
            .text("category", self.category.clone())
            .text("status", self.status.clone())
            .text("delivery_fee", self.delivery_fee.to_string())
            .text("delivery_radius", self.delivery_radius.to_string())
            .text("free_shipping", flag(self.free_shipping))
            .text(
                "first_purchase_discount_store",
                flag(self.first_purchase_discount_store),
            )
            .text(
                "first_purchase_discount_store_value",
                optional_decimal(self.first_purchase_discount_store_value),
            )
            .text(
                "first_purchase_discount_app",
                flag(self.first_purchase_discount_app),
            )
            .text(
                "first_purchase_discount_app_value",
                optional_decimal(self.first_purchase_discount_app_value),
            );

        for (index, hours) in self.opening_hours.iter().enumerate() {
            form = form
                .text(format!("opening_hours[{index}][day]"), hours.day.clone())
                .text(format!("opening_hours[{index}][open]"), hours.open.clone())
                .text(
                    format!("opening_hours[{index}][close]"),
                    hours.close.clone(),
                );
        }

        if let Some(logo) = &self.logo {
            form = form.part("logo", file_part(logo).await?);
        }

        Ok(form)
    }
}

/// Backend boolean encoding for multipart fields.
fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

fn optional_decimal(value: Option<Decimal>) -> String {
    value.map(|d| d.to_string()).unwrap_or_default()
}

impl ApiClient {
    /// Fetch the signed-in store's company record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn my_company(&self) -> Result<Company, ApiError> {
        self.get_json("/companies/me").await
    }

    /// Save the store's profile (multipart; may carry a logo file).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Io` if the logo cannot be read, or an API error.
    #[instrument(skip(self, info))]
    pub async fn update_company_info(&self, info: &CompanyInfoUpdate) -> Result<(), ApiError> {
        let form = info.to_form().await?;
        self.post_multipart_unit("/companies/addInfo", form).await
    }

    /// List the signed-in store's products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json("/products").await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` on a missing name, `ApiError::Io` if
    /// an image cannot be read, or an API error.
    #[instrument(skip(self, product))]
    pub async fn create_product(&self, product: &ProductUpsert) -> Result<(), ApiError> {
        let form = product.to_form().await?;
        self.post_multipart_unit("/products", form).await
    }

    /// Update a product (`PUT` tunneled over multipart `POST`).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` on a missing name, `ApiError::Io` if
    /// an image cannot be read, or an API error.
    #[instrument(skip(self, product))]
    pub async fn update_product(
        &self,
        id: ProductId,
        product: &ProductUpsert,
    ) -> Result<(), ApiError> {
        let form = product.to_form().await?;
        self.post_multipart_unit(&format!("/products/{id}?_method=PUT"), form)
            .await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        self.delete_unit(&format!("/products/{id}")).await
    }

    /// List the store's delivery drivers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn drivers(&self) -> Result<Vec<Driver>, ApiError> {
        self.get_json("/drivers").await
    }

    /// Register a driver.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` on a missing field or weak password,
    /// or an API error.
    #[instrument(skip(self, driver))]
    pub async fn create_driver(&self, driver: &DriverUpsert) -> Result<Driver, ApiError> {
        driver.validate()?;
        self.post_json("/drivers", driver).await
    }

    /// Update a driver.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` on a missing field or weak password,
    /// or an API error.
    #[instrument(skip(self, driver))]
    pub async fn update_driver(
        &self,
        id: DriverId,
        driver: &DriverUpsert,
    ) -> Result<Driver, ApiError> {
        driver.validate()?;
        self.put_json(&format!("/drivers/{id}"), driver).await
    }

    /// Remove a driver.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn delete_driver(&self, id: DriverId) -> Result<(), ApiError> {
        self.delete_unit(&format!("/drivers/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> DriverUpsert {
        DriverUpsert {
            name: "João".to_string(),
            email: "joao@example.com".to_string(),
            password: "s3nh@Forte".to_string(),
            phone: "11999990000".to_string(),
            vehicle: "Moto".to_string(),
            plate: "ABC1D23".to_string(),
            status: DriverStatus::Active,
        }
    }

    #[test]
    fn test_driver_validate_ok() {
        assert!(driver().validate().is_ok());
    }

    #[test]
    fn test_driver_validate_missing_field() {
        let mut d = driver();
        d.plate = "  ".to_string();
        let err = d.validate().expect_err("must refuse");
        assert!(matches!(err, ApiError::Validation(ref msg) if msg.contains("plate")));
    }

    #[test]
    fn test_driver_validate_weak_password() {
        let mut d = driver();
        d.password = "12345678".to_string();
        assert!(matches!(d.validate(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_driver_serializes_status_wire_value() {
        let body = serde_json::to_value(driver()).expect("serialize");
        assert_eq!(body["status"], "ativo");
    }

    #[tokio::test]
    async fn test_product_upsert_requires_name() {
        let upsert = ProductUpsert::default();
        assert!(matches!(
            upsert.to_form().await,
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_flag_encoding() {
        assert_eq!(flag(true), "1");
        assert_eq!(flag(false), "0");
    }
}
