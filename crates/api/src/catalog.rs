//! Customer-facing catalog: stores, categories, banners, CEP lookup.

use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{Banner, Category, CepAddress, CompanyWithProducts};

impl ApiClient {
    /// List stores together with their product catalogs.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn companies_with_products(&self) -> Result<Vec<CompanyWithProducts>, ApiError> {
        self.get_json("/companies-with-products").await
    }

    /// List product categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_json("/categories").await
    }

    /// List platform-wide promotional banners.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn banners(&self) -> Result<Vec<Banner>, ApiError> {
        self.get_json("/banners").await
    }

    /// List the banners targeting the signed-in store.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn company_banners(&self) -> Result<Vec<Banner>, ApiError> {
        self.get_json("/banners-company").await
    }

    /// Look up address fields for a CEP.
    ///
    /// Non-digits are stripped first; anything but 8 digits is refused
    /// locally. A CEP the lookup service doesn't know maps to `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` on a malformed CEP, `NotFound` for an
    /// unknown one, or the request's error.
    #[instrument(skip(self))]
    pub async fn cep(&self, cep: &str) -> Result<CepAddress, ApiError> {
        let digits: String = cep.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != 8 {
            return Err(ApiError::validation("CEP must have 8 digits"));
        }

        let address: CepAddress = self.get_json(&format!("/cep/{digits}")).await?;
        if address.erro {
            return Err(ApiError::NotFound(format!("CEP {digits}")));
        }
        Ok(address)
    }
}
