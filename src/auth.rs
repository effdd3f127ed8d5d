use std::fmt;

#[derive(Clone, Default, Eq, PartialEq)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Parse.ly API credentials.
///
/// The API key identifies the site; the shared secret unlocks the
/// non-public endpoints. Both travel as query parameters on every request.
#[derive(Clone, Debug)]
pub struct Credentials {
    apikey: String,
    secret: Option<SecretString>,
}

impl Credentials {
    #[must_use]
    pub fn new(apikey: impl Into<String>) -> Self {
        Self {
            apikey: apikey.into(),
            secret: None,
        }
    }

    #[must_use]
    pub fn with_secret(apikey: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            apikey: apikey.into(),
            secret: Some(SecretString::new(secret)),
        }
    }

    #[must_use]
    pub fn apikey(&self) -> &str {
        &self.apikey
    }

    pub(crate) fn secrets(&self) -> impl Iterator<Item = &str> {
        self.secret.iter().map(SecretString::expose)
    }

    /// Credential pairs prepended to every request's query string.
    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("apikey".to_owned(), self.apikey.clone())];
        if let Some(secret) = &self.secret {
            pairs.push(("secret".to_owned(), secret.expose().to_owned()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_is_redacted_in_debug_output() {
        let creds = Credentials::with_secret("example.com", "hunter2");
        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[test]
    fn query_pairs_omit_missing_secret() {
        let creds = Credentials::new("example.com");
        assert_eq!(
            creds.query_pairs(),
            vec![("apikey".to_owned(), "example.com".to_owned())]
        );
    }
}
