use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub store_name: String,
    pub username: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub store: StoreProfile,
}

#[derive(Serialize)]
pub struct StoreProfile {
    pub id: String,
    pub store_name: String,
    pub username: String,
}
