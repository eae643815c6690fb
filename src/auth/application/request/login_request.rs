use crate::core::domain::model::proxmox_connection::ProxmoxConnection;
use url::form_urlencoded;

/// Credentials posted to `/access/ticket`.
pub struct LoginRequest<'a> {
    pub realm: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> LoginRequest<'a> {
    pub fn from_connection(connection: &'a ProxmoxConnection) -> Self {
        Self {
            realm: connection.realm().as_str(),
            username: connection.username().as_str(),
            password: connection.password().as_str(),
        }
    }

    /// Encodes the request as an `application/x-www-form-urlencoded` body.
    pub fn to_form(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("realm", self.realm)
            .append_pair("username", self.username)
            .append_pair("password", self.password)
            .finish()
    }
}
