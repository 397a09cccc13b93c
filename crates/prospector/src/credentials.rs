//! Search API credentials.

/// Environment variable holding the Custom Search API key.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Environment variable holding the search-engine id (`cx`).
pub const CSE_ID_ENV: &str = "GOOGLE_CSE_ID";

/// Optional credentials; both values are needed for real searches.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: Option<String>,
    pub cse_id: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("cse_id", &self.cse_id)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Credentials {
    pub fn new(api_key: Option<String>, cse_id: Option<String>) -> Self {
        Self {
            api_key: non_blank(api_key),
            cse_id: non_blank(cse_id),
        }
    }

    /// No credentials: the engine runs in simulated mode.
    pub fn none() -> Self {
        Self::default()
    }

    /// Credentials read from `GOOGLE_API_KEY` / `GOOGLE_CSE_ID`.
    pub fn from_env() -> Self {
        Self::new(std::env::var(API_KEY_ENV).ok(), std::env::var(CSE_ID_ENV).ok())
    }

    /// Fill any missing value from the environment.
    pub fn or_env(self) -> Self {
        let env = Self::from_env();
        Self {
            api_key: self.api_key.or(env.api_key),
            cse_id: self.cse_id.or(env.cse_id),
        }
    }

    /// Both values, when both are present.
    pub fn pair(&self) -> Option<(&str, &str)> {
        match (&self.api_key, &self.cse_id) {
            (Some(key), Some(cx)) => Some((key.as_str(), cx.as_str())),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.pair().is_some()
    }
}
