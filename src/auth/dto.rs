use serde::{Deserialize, Serialize};

/// Form body for POST /registro; wire names match the original forms.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "contrasena")]
    pub password: String,
}

/// JSON body for POST /login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(rename = "contrasena")]
    pub password: String,
}

/// Login success indicator; the token travels only in the cookie.
#[derive(Debug, Serialize)]
pub struct LoginOk {
    pub message: &'static str,
}
