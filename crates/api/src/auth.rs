//! Authentication and profile endpoints.
//!
//! Local validation (required fields, password confirmation, password
//! strength) short-circuits before any network call; the backend re-checks
//! everything anyway.

use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use feira_livre_core::AddressId;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{Address, User};

/// Response of `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub access_token: String,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Request body of `POST /register`.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Debug, Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

/// Profile changes submitted via multipart `POST /clients/updateProfile`.
///
/// The photo, when present, is read from disk and uploaded as a file part.
/// Addresses are sent as indexed `addresses[i][field]` entries, new ones
/// without an `id`.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    pub photo: Option<PathBuf>,
    pub addresses: Vec<Address>,
}

/// Password policy: at least 8 characters with an uppercase letter, a
/// lowercase letter, a digit, and a symbol.
#[must_use]
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(char::is_uppercase)
        && password.chars().any(char::is_lowercase)
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric())
}

impl ApiClient {
    /// Sign in with email and password.
    ///
    /// A response missing either the user or the token is treated as an
    /// error rather than a partial login.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if a field is empty, or an API error
    /// on bad credentials.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ApiError::validation("Fill in all fields"));
        }
        self.post_json("/login", &LoginRequest { email, password })
            .await
    }

    /// Create a customer account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if a field is empty, the passwords
    /// don't match, or the password is too weak.
    #[instrument(skip(self, request))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        if request.name.trim().is_empty()
            || request.email.trim().is_empty()
            || request.password.is_empty()
            || request.password_confirmation.is_empty()
        {
            return Err(ApiError::validation("Fill in all fields"));
        }
        if request.password != request.password_confirmation {
            return Err(ApiError::validation("Passwords do not match"));
        }
        if !is_strong_password(&request.password) {
            return Err(ApiError::validation(
                "Password must have at least 8 characters with uppercase, lowercase, digit, and symbol",
            ));
        }
        self.post_unit("/register", request).await
    }

    /// Request a password-reset email.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        if email.trim().is_empty() {
            return Err(ApiError::validation("Fill in your email"));
        }
        self.post_unit("/forgot-password", &ForgotPasswordRequest { email })
            .await
    }

    /// Fetch the signed-in user's profile and saved addresses.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User, ApiError> {
        self.get_json("/clients/me").await
    }

    /// Save profile changes (multipart, `_method=PUT` tunneled over POST).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` on a weak or mismatched password pair,
    /// `ApiError::Io` if the photo cannot be read, or an API error.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError> {
        if let Some(password) = &update.password {
            if !is_strong_password(password) {
                return Err(ApiError::validation(
                    "Password must have at least 8 characters with uppercase, lowercase, digit, and symbol",
                ));
            }
            if update.password_confirmation.as_deref() != Some(password.as_str()) {
                return Err(ApiError::validation("Passwords do not match"));
            }
        }

        let mut form = Form::new()
            .text("name", update.name.clone())
            .text("email", update.email.clone())
            .text("_method", "PUT");

        if let (Some(password), Some(confirmation)) =
            (&update.password, &update.password_confirmation)
        {
            form = form
                .text("password", password.clone())
                .text("password_confirmation", confirmation.clone());
        }

        if let Some(photo) = &update.photo {
            form = form.part("photo", file_part(photo).await?);
        }

        for (index, address) in update.addresses.iter().enumerate() {
            form = address_fields(form, index, address);
        }

        self.post_multipart_unit("/clients/updateProfile", form)
            .await
    }

    /// Remove a saved address.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn delete_address(&self, id: AddressId) -> Result<(), ApiError> {
        self.delete_unit(&format!("/clients/addresses/{id}")).await
    }
}

/// Append one address as indexed multipart fields.
fn address_fields(mut form: Form, index: usize, address: &Address) -> Form {
    fn text(form: Form, index: usize, field: &str, value: String) -> Form {
        form.text(format!("addresses[{index}][{field}]"), value)
    }

    if let Some(id) = address.id {
        form = text(form, index, "id", id.to_string());
    }
    form = text(form, index, "label", address.label.clone());
    form = text(form, index, "cep", address.cep.clone());
    form = text(form, index, "street", address.street.clone());
    form = text(form, index, "neighborhood", address.neighborhood.clone());
    form = text(form, index, "city", address.city.clone());
    form = text(form, index, "state", address.state.clone());
    form = text(form, index, "number", address.number.clone().unwrap_or_default());
    form = text(
        form,
        index,
        "complement",
        address.complement.clone().unwrap_or_default(),
    );
    text(form, index, "note", address.note.clone().unwrap_or_default())
}

/// Build a file part from a local path, guessing the mime type by extension.
pub(crate) async fn file_part(path: &Path) -> Result<Part, ApiError> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime_for(path))?;
    Ok(part)
}

/// Mime type by file extension; the backend only accepts images here.
pub(crate) fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_password_accepted() {
        assert!(is_strong_password("s3nh@Forte"));
        assert!(is_strong_password("Abcdef1!"));
    }

    #[test]
    fn test_weak_passwords_rejected() {
        assert!(!is_strong_password("short1!"));
        assert!(!is_strong_password("alllowercase1!"));
        assert!(!is_strong_password("ALLUPPERCASE1!"));
        assert!(!is_strong_password("NoDigits!!"));
        assert!(!is_strong_password("NoSymbols123"));
    }

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(mime_for(Path::new("a/logo.PNG")), "image/png");
        assert_eq!(mime_for(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("noextension")), "image/jpeg");
    }

    #[test]
    fn test_login_response_requires_token() {
        let incomplete = r#"{"user":{"id":1,"name":"Ana","email":"a@b.com","role":"client"}}"#;
        assert!(serde_json::from_str::<LoginResponse>(incomplete).is_err());
    }
}
