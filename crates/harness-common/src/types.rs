/// a third party identity provider accepted by the identity pool
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FederatedProvider {
    Google,
    Apple,
}

impl FederatedProvider {
    /// the key under which the provider's token is passed to the identity pool
    #[must_use]
    pub const fn login_key(self) -> &'static str {
        match self {
            Self::Google => "accounts.google.com",
            Self::Apple => "appleid.apple.com",
        }
    }
}
