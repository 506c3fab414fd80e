/// Supplies the upstream API key.
///
/// Consulted on every relay invocation, so a key added or removed while the
/// server runs takes effect on the next request.
pub trait CredentialProvider: Send + Sync {
    /// The key, or `None` when it is unset or empty.
    fn api_key(&self) -> Option<String>;
}
