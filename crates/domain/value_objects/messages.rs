use serde::{Deserialize, Serialize};

/// Stored in place of a user id when the sender is anonymous.
pub const GUEST_USER_ID: &str = "guest";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMessageModel {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Outcome of a message submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageReceipt {
    pub user_id: String,
    pub saved_to_db: bool,
}
