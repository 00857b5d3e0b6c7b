//! Admin Model

use serde::{Deserialize, Serialize};

/// Admin authentication response.
///
/// Admin tokens are independent of customer sessions and are never
/// written to the customer session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAuth {
    pub token: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
