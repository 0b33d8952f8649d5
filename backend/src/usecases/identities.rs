//! Display/correlation identifiers for the storefront. Nothing here is a
//! credential: ids are not unique across identical seeds within one
//! millisecond, and login does not check a password.

use chrono::Utc;
use iptv_core::domain::value_objects::identities::{
    DEFAULT_USERNAME, IdentityDto, LoginModel, RegisterModel,
};
use tracing::info;

pub fn generate_user_id(seed: &str) -> String {
    user_id_at(seed, Utc::now().timestamp_millis())
}

fn user_id_at(seed: &str, epoch_millis: i64) -> String {
    format!("user_{}_{}", epoch_millis, sanitize_seed(seed))
}

/// Replaces `@`, `.` and each run of whitespace with `_`.
pub fn sanitize_seed(seed: &str) -> String {
    let mut sanitized = String::with_capacity(seed.len());
    let mut in_whitespace = false;

    for ch in seed.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                sanitized.push('_');
            }
            in_whitespace = true;
            continue;
        }

        in_whitespace = false;
        match ch {
            '@' | '.' => sanitized.push('_'),
            other => sanitized.push(other),
        }
    }

    sanitized
}

pub fn register(register_model: RegisterModel) -> IdentityDto {
    let user_id = generate_user_id(&register_model.email);
    let username = register_model
        .fullname
        .split_whitespace()
        .next()
        .unwrap_or(DEFAULT_USERNAME)
        .to_string();

    info!(%user_id, "identities: registration accepted");

    IdentityDto { user_id, username }
}

pub fn login(login_model: LoginModel) -> IdentityDto {
    let user_id = generate_user_id(&login_model.username);

    info!(%user_id, "identities: login accepted");

    IdentityDto {
        user_id,
        username: login_model.username,
    }
}
