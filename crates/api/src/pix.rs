//! PIX payment code lifecycle.
//!
//! Codes live only in memory, keyed by order id:
//! `no code -> requesting -> active(code, expires_at) -> expired`.
//! A 1-second tick calls [`PixWallet::sweep`]; entries whose expiry has
//! passed are deleted and never re-requested automatically - the user must
//! select PIX again for a fresh code.
//!
//! The backend's response shape for the code payload is inconsistent across
//! deployments, so [`display_text`] tries several known field names before
//! falling back to the raw string.

use std::collections::HashMap;

use serde_json::Value;
use tracing::instrument;

use feira_livre_core::OrderId;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::PixResponse;

impl ApiClient {
    /// Request a PIX code and expiry for an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn pix_code(&self, order: OrderId) -> Result<PixResponse, ApiError> {
        self.get_json(&format!("/orders-driver/{order}/pix")).await
    }
}

/// An active PIX code held for one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixCode {
    /// Raw code payload as the backend sent it.
    pub code: String,
    /// Expiry as epoch seconds.
    pub expires_at: i64,
}

impl PixCode {
    /// Seconds until expiry at `now`, or `None` once expired.
    #[must_use]
    pub const fn remaining(&self, now: i64) -> Option<i64> {
        let left = self.expires_at - now;
        if left > 0 { Some(left) } else { None }
    }
}

/// In-memory PIX codes, one per order.
#[derive(Debug, Default)]
pub struct PixWallet {
    codes: HashMap<OrderId, PixCode>,
}

impl PixWallet {
    /// The code held for an order, if any.
    #[must_use]
    pub fn code(&self, order: OrderId) -> Option<&PixCode> {
        self.codes.get(&order)
    }

    /// Number of codes currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether no codes are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Request a code for an order, unless one is already held.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` when the backend declines to issue a
    /// code, or the request's error.
    pub async fn request_code(
        &mut self,
        api: &ApiClient,
        order: OrderId,
    ) -> Result<&PixCode, ApiError> {
        if !self.codes.contains_key(&order) {
            let response = api.pix_code(order).await?;
            let (Some(code), Some(expires_at)) = (response.pix_code, response.expires_at) else {
                return Err(ApiError::NotFound(format!("no PIX code for order {order}")));
            };
            self.codes.insert(order, PixCode { code, expires_at });
        }
        // Just inserted or already present
        self.codes
            .get(&order)
            .ok_or_else(|| ApiError::NotFound(format!("no PIX code for order {order}")))
    }

    /// Delete every code whose expiry has passed; returns how many were
    /// removed. Called from the 1-second display tick.
    pub fn sweep(&mut self, now: i64) -> usize {
        let before = self.codes.len();
        self.codes.retain(|_, code| code.expires_at > now);
        before - self.codes.len()
    }

    /// Seconds until an order's code expires, or `None` when no live code
    /// is held.
    #[must_use]
    pub fn remaining(&self, order: OrderId, now: i64) -> Option<i64> {
        self.code(order).and_then(|code| code.remaining(now))
    }
}

/// Resolve the human-copyable string out of a raw code payload.
///
/// Known shapes, tried in order: a JSON object with one of `payload`,
/// `copy`, `copia`, `pix`, or `code` as a string; a JSON object with
/// `chave`/`valor`/`txid` fields (composed into one line); anything else
/// falls back to the raw string.
#[must_use]
pub fn display_text(raw: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(raw) else {
        return raw.to_string();
    };

    for key in ["payload", "copy", "copia", "pix", "code"] {
        if let Some(text) = value.get(key).and_then(Value::as_str) {
            return text.to_string();
        }
    }

    if ["chave", "valor", "txid"]
        .iter()
        .any(|key| value.get(*key).is_some())
    {
        return format!(
            "chave:{} valor:{} txid:{}",
            field_text(&value, "chave"),
            field_text(&value, "valor"),
            field_text(&value, "txid")
        );
    }

    raw.to_string()
}

/// Render one composed field; non-strings print their JSON form.
fn field_text(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "-".to_string(),
    }
}

/// Format a remaining-seconds value as `m:ss`; negatives clamp to `0:00`.
#[must_use]
pub fn format_remaining(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet_with(order: i32, code: &str, expires_at: i64) -> PixWallet {
        let mut wallet = PixWallet::default();
        wallet.codes.insert(
            OrderId::new(order),
            PixCode {
                code: code.to_string(),
                expires_at,
            },
        );
        wallet
    }

    #[test]
    fn test_sweep_removes_expired() {
        let now = 1_750_000_000;
        let mut wallet = wallet_with(1, "00020126...", now + 300);
        wallet.codes.insert(
            OrderId::new(2),
            PixCode {
                code: "other".to_string(),
                expires_at: now - 1,
            },
        );

        assert_eq!(wallet.sweep(now), 1);
        assert!(wallet.code(OrderId::new(1)).is_some());
        assert!(wallet.code(OrderId::new(2)).is_none());
    }

    #[test]
    fn test_sweep_removes_exactly_at_expiry() {
        // expires_at <= now must be gone after the next tick
        let now = 1_750_000_000;
        let mut wallet = wallet_with(1, "00020126...", now);
        assert_eq!(wallet.sweep(now), 1);
        assert!(wallet.is_empty());
    }

    #[test]
    fn test_code_gone_after_301_seconds() {
        let issued_at = 1_750_000_000;
        let mut wallet = wallet_with(1, "00020126...//pix", issued_at + 300);

        // Still live one tick before expiry
        assert_eq!(wallet.sweep(issued_at + 299), 0);
        assert_eq!(
            wallet.remaining(OrderId::new(1), issued_at + 299),
            Some(1)
        );

        assert_eq!(wallet.sweep(issued_at + 301), 1);
        assert!(wallet.code(OrderId::new(1)).is_none());
        assert_eq!(wallet.remaining(OrderId::new(1), issued_at + 301), None);
    }

    #[test]
    fn test_display_text_plain_string_passthrough() {
        let raw = "00020126580014br.gov.bcb.pix";
        assert_eq!(display_text(raw), raw);
    }

    #[test]
    fn test_display_text_payload_field() {
        assert_eq!(
            display_text(r#"{"payload":"00020126...","ttl":300}"#),
            "00020126..."
        );
    }

    #[test]
    fn test_display_text_fallback_order() {
        // `copy` wins over `code` because it comes first in the known list
        assert_eq!(
            display_text(r#"{"code":"second","copy":"first"}"#),
            "first"
        );
    }

    #[test]
    fn test_display_text_composed_chave_valor_txid() {
        assert_eq!(
            display_text(r#"{"chave":"a@b.com","valor":25.5,"txid":"T1"}"#),
            "chave:a@b.com valor:25.5 txid:T1"
        );
    }

    #[test]
    fn test_display_text_composed_with_missing_field() {
        assert_eq!(
            display_text(r#"{"chave":"a@b.com"}"#),
            "chave:a@b.com valor:- txid:-"
        );
    }

    #[test]
    fn test_display_text_unknown_object_falls_back_raw() {
        let raw = r#"{"foo":"bar"}"#;
        assert_eq!(display_text(raw), raw);
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(299), "4:59");
        assert_eq!(format_remaining(60), "1:00");
        assert_eq!(format_remaining(5), "0:05");
        assert_eq!(format_remaining(0), "0:00");
        assert_eq!(format_remaining(-10), "0:00");
    }

    #[test]
    fn test_pix_code_remaining() {
        let code = PixCode {
            code: "x".to_string(),
            expires_at: 100,
        };
        assert_eq!(code.remaining(95), Some(5));
        assert_eq!(code.remaining(100), None);
        assert_eq!(code.remaining(101), None);
    }
}
