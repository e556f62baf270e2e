use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::error::Result;
use crate::model::user::{Identity, ProfileUpdate, Role};

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    role: Role,
}

#[derive(Deserialize)]
pub struct LoginResponse {
    pub user: Identity,
    pub token: String,
}

/// Fields sent on registration; the backend fills in the rest.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

pub async fn login(api: &ApiClient, email: &str, role: Role) -> Result<LoginResponse> {
    api.post_json("/auth/login", &LoginBody { email, role }, None)
        .await
}

pub async fn register(api: &ApiClient, profile: &RegisterProfile) -> Result<()> {
    api.post_unit("/auth/register", profile, None).await
}

pub async fn update_profile(
    api: &ApiClient,
    update: &ProfileUpdate,
    token: Option<&str>,
) -> Result<()> {
    api.put_unit("/user/profile", update, token).await
}

pub async fn logout(api: &ApiClient, token: Option<&str>) -> Result<()> {
    api.post_unit("/auth/logout", &serde_json::json!({}), token)
        .await
}
