use std::fmt;

#[derive(Debug)]
pub enum Error {
    Hummingbird(hummingbird::Error),
    Io(std::io::Error),
    Json(serde_json::Error),
    MissingEnv(&'static str),
    InvalidEnv(&'static str, String),
    UnknownSwitch(String),
    MissingControlCode,
}

impl From<hummingbird::Error> for Error {
    fn from(err: hummingbird::Error) -> Self {
        Self::Hummingbird(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
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
            Self::Hummingbird(err) => write!(f, "hummingbird error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::MissingEnv(name) => write!(f, "set ENV variable {name}"),
            Self::InvalidEnv(name, value) => write!(f, "invalid value of {name}: {value}"),
            Self::UnknownSwitch(code) => write!(f, "unknown switch {code}"),
            Self::MissingControlCode => write!(f, "device has not reported its control code"),
        }
    }
}

impl std::error::Error for Error {}
