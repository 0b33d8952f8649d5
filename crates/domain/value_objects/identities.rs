use serde::{Deserialize, Serialize};

pub const DEFAULT_USERNAME: &str = "User";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterModel {
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginModel {
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityDto {
    pub user_id: String,
    pub username: String,
}
