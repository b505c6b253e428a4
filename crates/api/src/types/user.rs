//! User profile and address types.

use feira_livre_core::{AddressId, UserId, UserRole};
use serde::{Deserialize, Serialize};

/// An authenticated user, as returned by `/login` and `/clients/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub photo: Option<String>,
    /// Saved delivery addresses; only populated for customer accounts.
    #[serde(default)]
    pub addresses: Vec<Address>,
}

/// A saved delivery address.
///
/// Addresses being created locally have no `id` yet; the backend assigns one
/// when the profile is saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub id: Option<AddressId>,
    pub label: String,
    pub cep: String,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub complement: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl Address {
    /// Single-line rendering the delivery-fee endpoint expects:
    /// `street, number - neighborhood, city - state, cep`.
    #[must_use]
    pub fn formatted_line(&self) -> String {
        format!(
            "{}, {} - {}, {} - {}, {}",
            self.street,
            self.number.as_deref().unwrap_or(""),
            self.neighborhood,
            self.city,
            self.state,
            self.cep
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_address() -> Address {
        Address {
            id: Some(AddressId::new(1)),
            label: "Casa".to_string(),
            cep: "01310-100".to_string(),
            street: "Av. Paulista".to_string(),
            neighborhood: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            number: Some("1000".to_string()),
            complement: None,
            note: None,
        }
    }

    #[test]
    fn test_formatted_line() {
        assert_eq!(
            sample_address().formatted_line(),
            "Av. Paulista, 1000 - Bela Vista, São Paulo - SP, 01310-100"
        );
    }

    #[test]
    fn test_formatted_line_without_number() {
        let mut addr = sample_address();
        addr.number = None;
        assert_eq!(
            addr.formatted_line(),
            "Av. Paulista,  - Bela Vista, São Paulo - SP, 01310-100"
        );
    }

    #[test]
    fn test_user_deserializes_without_addresses() {
        let json = r#"{"id":3,"name":"Ana","email":"ana@example.com","role":"client"}"#;
        let user: User = serde_json::from_str(json).expect("deserialize");
        assert!(user.addresses.is_empty());
        assert_eq!(user.role, UserRole::Client);
    }
}
