use serde::Deserialize;

/// Body of `/access/ticket`. `data` is `null` when the login was refused.
#[derive(Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub data: Option<LoginResponseData>,
}

#[derive(Deserialize)]
pub struct LoginResponseData {
    #[serde(default)]
    pub ticket: Option<String>,
    #[serde(rename = "CSRFPreventionToken", default)]
    pub csrf_token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}
