use serde::{Deserialize, Serialize};

pub const MISSING_PHONE_PLACEHOLDER: &str = "N/A";

/// Buyer profile sent with an order. It is never stored on its own; it is
/// folded into the operator notification message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl CustomerInfo {
    pub fn phone_or_placeholder(&self) -> &str {
        self.phone
            .as_deref()
            .map(str::trim)
            .filter(|phone| !phone.is_empty())
            .unwrap_or(MISSING_PHONE_PLACEHOLDER)
    }

    /// Plain-text order summary for the operator inbox.
    pub fn order_summary(&self, plan_id: &str, payment_method: &str) -> String {
        let mut summary = format!(
            "Name: {}\nEmail: {}\nPhone: {}\nPlan: {}\nPayment: {}",
            self.fullname,
            self.email,
            self.phone_or_placeholder(),
            plan_id,
            payment_method
        );

        if let Some(country) = self
            .country
            .as_deref()
            .map(str::trim)
            .filter(|country| !country.is_empty())
        {
            summary.push_str(&format!("\nCountry: {}", country));
        }

        summary
    }
}
