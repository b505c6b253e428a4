//! Platform administration: companies and banners.
//!
//! Company create/update carries the company record plus an embedded admin
//! account for the store owner. The CNPJ lookup hits BrasilAPI directly -
//! it is a public service, not part of the backend.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use feira_livre_core::{BannerId, CompanyId};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::Company;

const BRASILAPI_CNPJ_URL: &str = "https://brasilapi.com.br/api/cnpj/v1";

/// The store owner's account embedded in a company write.
#[derive(Debug, Clone, Serialize)]
pub struct AdminAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for company create/update.
#[derive(Debug, Serialize)]
pub struct CompanyPayload {
    pub cnpj: String,
    pub legal_name: String,
    pub final_name: String,
    pub phone: String,
    pub address: String,
    pub plan: String,
    pub admin: AdminAccount,
}

/// Request body for banner create/update.
#[derive(Debug, Serialize)]
pub struct BannerPayload {
    pub title: String,
    pub image_url: String,
    pub target_company_id: Option<CompanyId>,
}

impl BannerPayload {
    fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() || self.image_url.trim().is_empty() {
            return Err(ApiError::validation("Fill in title and image"));
        }
        Ok(())
    }
}

/// Company data returned by the BrasilAPI CNPJ lookup, reduced to the
/// fields the admin form prefills.
#[derive(Debug, Clone, Deserialize)]
pub struct CnpjInfo {
    #[serde(default)]
    pub razao_social: String,
    #[serde(default)]
    pub ddd_telefone_1: String,
    #[serde(default)]
    pub descricao_tipo_de_logradouro: String,
    #[serde(default)]
    pub logradouro: String,
    #[serde(default)]
    pub numero: String,
    #[serde(default)]
    pub bairro: String,
    #[serde(default)]
    pub municipio: String,
    #[serde(default)]
    pub uf: String,
    #[serde(default)]
    pub cep: String,
}

impl CnpjInfo {
    /// Single-line address in the format the company form stores.
    #[must_use]
    pub fn formatted_address(&self) -> String {
        format!(
            "{} {}, {} - {}, {} - {}, {}",
            self.descricao_tipo_de_logradouro,
            self.logradouro,
            self.numero,
            self.bairro,
            self.municipio,
            self.uf,
            self.cep
        )
    }
}

impl ApiClient {
    /// List all companies on the platform.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn companies(&self) -> Result<Vec<Company>, ApiError> {
        self.get_json("/companies").await
    }

    /// Register a company together with its owner account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, payload))]
    pub async fn create_company(&self, payload: &CompanyPayload) -> Result<(), ApiError> {
        self.post_unit("/companies", payload).await
    }

    /// Update a company.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, payload))]
    pub async fn update_company(
        &self,
        id: CompanyId,
        payload: &CompanyPayload,
    ) -> Result<(), ApiError> {
        self.put_unit(&format!("/companies/{id}"), payload).await
    }

    /// Remove a company.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn delete_company(&self, id: CompanyId) -> Result<(), ApiError> {
        self.delete_unit(&format!("/companies/{id}")).await
    }

    /// Create a banner.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` on a missing title or image, or an
    /// API error.
    #[instrument(skip(self, payload))]
    pub async fn create_banner(&self, payload: &BannerPayload) -> Result<(), ApiError> {
        payload.validate()?;
        self.post_unit("/banners", payload).await
    }

    /// Update a banner.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` on a missing title or image, or an
    /// API error.
    #[instrument(skip(self, payload))]
    pub async fn update_banner(
        &self,
        id: BannerId,
        payload: &BannerPayload,
    ) -> Result<(), ApiError> {
        payload.validate()?;
        self.put_unit(&format!("/banners/{id}"), payload).await
    }

    /// Remove a banner.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn delete_banner(&self, id: BannerId) -> Result<(), ApiError> {
        self.delete_unit(&format!("/banners/{id}")).await
    }
}

/// Look up a company by CNPJ on BrasilAPI.
///
/// Non-digits are stripped first; anything but 14 digits is refused
/// locally.
///
/// # Errors
///
/// Returns `ApiError::Validation` on a malformed CNPJ, `NotFound` for an
/// unknown one, or the request's error.
#[instrument]
pub async fn lookup_cnpj(cnpj: &str) -> Result<CnpjInfo, ApiError> {
    let digits: String = cnpj.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 14 {
        return Err(ApiError::validation("CNPJ must have 14 digits"));
    }

    let response = reqwest::get(format!("{BRASILAPI_CNPJ_URL}/{digits}")).await?;
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(format!("CNPJ {digits}")));
    }
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ApiError::Api {
            status: status.as_u16(),
            message: message.chars().take(200).collect(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Parse(format!("CNPJ lookup: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_payload_validation() {
        let payload = BannerPayload {
            title: "Promo".to_string(),
            image_url: String::new(),
            target_company_id: None,
        };
        assert!(matches!(payload.validate(), Err(ApiError::Validation(_))));

        let payload = BannerPayload {
            title: "Promo".to_string(),
            image_url: "https://cdn.example.com/promo.png".to_string(),
            target_company_id: Some(CompanyId::new(3)),
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_cnpj_info_formatted_address() {
        let info = CnpjInfo {
            razao_social: "Mercearia Central LTDA".to_string(),
            ddd_telefone_1: "1133334444".to_string(),
            descricao_tipo_de_logradouro: "Avenida".to_string(),
            logradouro: "Paulista".to_string(),
            numero: "1000".to_string(),
            bairro: "Bela Vista".to_string(),
            municipio: "São Paulo".to_string(),
            uf: "SP".to_string(),
            cep: "01310100".to_string(),
        };
        assert_eq!(
            info.formatted_address(),
            "Avenida Paulista, 1000 - Bela Vista, São Paulo - SP, 01310100"
        );
    }
}
