//! Delivery driver types (store management).

use feira_livre_core::{DriverId, DriverStatus};
use serde::{Deserialize, Serialize};

/// A delivery driver attached to a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub vehicle: Option<String>,
    #[serde(default)]
    pub plate: Option<String>,
    #[serde(default)]
    pub status: DriverStatus,
}
