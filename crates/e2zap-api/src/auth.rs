use secrecy::{ExposeSecret, SecretString};

/// HTTP basic-auth credentials for the set-top-box web interface.
///
/// The web interface either has authentication switched off entirely or
/// requires both a user and a password, so the pair is carried as one value.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Attach these credentials to an outgoing request.
    pub(crate) fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.basic_auth(&self.username, Some(self.password.expose_secret()))
    }
}
