use std::fmt;

#[derive(Debug)]
pub enum Error {
    Http(reqwest::Error),
    Json(serde_json::Error),
    Status(u16),
    Unauthorized,
    MissingToken,
    OverlappingMasks(&'static str),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) => write!(f, "http error: {err}"),
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::Status(code) => write!(f, "unexpected status code {code}"),
            Self::Unauthorized => write!(f, "token is invalid or expired"),
            Self::MissingToken => write!(f, "login response has no token"),
            Self::OverlappingMasks(table) => write!(f, "{table} has overlapping bit masks"),
        }
    }
}

impl std::error::Error for Error {}
