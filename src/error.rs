use std::convert::From;
use std::error;
use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum ErrorKind {
    DateParse,
    EventParse,
    ConfigParse,
    IOError(io::Error),
}

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            kind,
            message: Some(msg.to_owned()),
        }
    }

    pub fn with_msg(mut self, message: &str) -> Self {
        self.message = Some(message.to_owned());
        self
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            message: None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(io_error: io::Error) -> Error {
        Error::from(ErrorKind::IOError(io_error))
    }
}

impl From<toml::de::Error> for Error {
    fn from(toml_error: toml::de::Error) -> Error {
        Error::new(ErrorKind::ConfigParse, &toml_error.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {}", self.kind.as_str(), msg),
            None => write!(f, "{}", self.kind.as_str()),
        }
    }
}

impl error::Error for Error {}

impl ErrorKind {
    pub fn as_str(&self) -> String {
        match self {
            ErrorKind::DateParse => "invalid date format".to_owned(),
            ErrorKind::EventParse => "invalid event format".to_owned(),
            ErrorKind::ConfigParse => "invalid configuration".to_owned(),
            ErrorKind::IOError(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_message() {
        let err = Error::new(ErrorKind::DateParse, "'2024-13-01'");
        assert_eq!(err.to_string(), "invalid date format: '2024-13-01'");
    }

    #[test]
    fn display_without_message() {
        let err = Error::from(ErrorKind::EventParse);
        assert_eq!(err.to_string(), "invalid event format");
    }

    #[test]
    fn io_error_keeps_kind() {
        let err = Error::from(io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err.kind, ErrorKind::IOError(ref e) if e.kind() == io::ErrorKind::NotFound));
    }

    #[test]
    fn toml_error_is_config_parse() {
        let toml_err = toml::from_str::<toml::Value>("key = ").unwrap_err();
        let err = Error::from(toml_err);
        assert!(matches!(err.kind, ErrorKind::ConfigParse));
        assert!(err.message.is_some());
    }
}
