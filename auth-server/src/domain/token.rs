use serde::Serialize;
use utoipa::ToSchema;

/// Opaque id/refresh token pair handed back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub id_token: String,
    pub refresh_token: String,
}
