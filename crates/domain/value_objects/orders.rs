use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::customer_info::CustomerInfo;

pub const ORDER_SUBJECT_PREFIX: &str = "New IPTV Subscription - ";
pub const UNSPECIFIED_PAYMENT_METHOD: &str = "unspecified";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitOrderModel {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub customer_info: Option<CustomerInfo>,
}

/// Result of an accepted order. Each write carries its own flag so callers
/// can tell a partial save from a full one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderReceipt {
    pub user_id: String,
    pub plan_id: String,
    pub customer_email: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub subscription_saved: bool,
    pub message_saved: bool,
}

impl OrderReceipt {
    pub fn saved_to_db(&self) -> bool {
        self.subscription_saved && self.message_saved
    }
}
