//! Invoice Model

use serde::{Deserialize, Serialize};

/// Invoice summary shown in the customer dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    #[serde(rename = "invoiceId")]
    pub id: String,
    pub booking_id: String,
    pub amount: i64,
    #[serde(default)]
    pub issued_at: i64,
    pub download_url: String,
}
