use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Deployment profile of the backend, read from `DASHBOARD_ENV`.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Local development over plain HTTP.
    #[default]
    Development,
    /// Behind TLS; cookies are marked `Secure`.
    Production,
    /// Test runs.
    Testing,
}

impl Profile {
    /// Whether session cookies carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        matches!(self, Profile::Production)
    }
}

impl FromStr for Profile {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "default" => Ok(Profile::Development),
            "production" => Ok(Profile::Production),
            "testing" => Ok(Profile::Testing),
            _ => Err(()),
        }
    }
}

impl Display for Profile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Profile::Development => write!(f, "development"),
            Profile::Production => write!(f, "production"),
            Profile::Testing => write!(f, "testing"),
        }
    }
}
