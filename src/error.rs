use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

/// HTTP method type, re-exported for use with error inspection.
pub use reqwest::Method;
/// HTTP status code type, re-exported for use with error inspection.
pub use reqwest::StatusCode;
use reqwest::header;

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// The [`crate::Config`] handed to [`crate::Client::new`] was incomplete or malformed
    Configuration,
    /// Network-level failure while talking to the Drip API (DNS, connect, TLS, timeout)
    Transport,
    /// A response body could not be interpreted as the requested JSON shape
    Decode,
    /// Internal error from dependencies
    Internal,
}

#[derive(Debug)]
pub struct Error {
    kind: Kind,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    backtrace: Backtrace,
}

impl Error {
    pub fn with_source<S: StdError + Send + Sync + 'static>(kind: Kind, source: S) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
            backtrace: Backtrace::capture(),
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    pub fn inner(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        let e = self.source.as_deref()?;
        e.downcast_ref::<E>()
    }

    /// Returns `true` if this error was raised because no API token was configured.
    #[must_use]
    pub fn is_missing_token(&self) -> bool {
        self.downcast_ref::<MissingToken>().is_some()
    }

    /// Returns `true` if this error was raised because no account id was configured.
    #[must_use]
    pub fn is_missing_account_id(&self) -> bool {
        self.downcast_ref::<MissingAccountId>().is_some()
    }

    pub fn invalid_host<S: Into<String>>(host: S) -> Self {
        InvalidHost { host: host.into() }.into()
    }

    pub fn undecodable<S: Into<String>>(status_code: StatusCode, reason: S) -> Self {
        Undecodable {
            status_code,
            reason: reason.into(),
        }
        .into()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(src) => write!(f, "{:?}: {}", self.kind, src),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

/// No API token was supplied, or it was blank.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingToken;

impl fmt::Display for MissingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "please provide an API token")
    }
}

impl StdError for MissingToken {}

impl From<MissingToken> for Error {
    fn from(err: MissingToken) -> Self {
        Error::with_source(Kind::Configuration, err)
    }
}

/// No account id was supplied, or it was blank.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingAccountId;

impl fmt::Display for MissingAccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "please provide an account ID")
    }
}

impl StdError for MissingAccountId {}

impl From<MissingAccountId> for Error {
    fn from(err: MissingAccountId) -> Self {
        Error::with_source(Kind::Configuration, err)
    }
}

/// The configured host cannot carry path segments (e.g. `mailto:` or `data:` URLs).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidHost {
    pub host: String,
}

impl fmt::Display for InvalidHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cannot be used as an API base URL", self.host)
    }
}

impl StdError for InvalidHost {}

impl From<InvalidHost> for Error {
    fn from(err: InvalidHost) -> Self {
        Error::with_source(Kind::Configuration, err)
    }
}

/// The server answered with a body that is not JSON, and the caller asked for JSON.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Undecodable {
    pub status_code: StatusCode,
    pub reason: String,
}

impl fmt::Display for Undecodable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "response with status {} is not valid JSON: {}",
            self.status_code, self.reason
        )
    }
}

impl StdError for Undecodable {}

impl From<Undecodable> for Error {
    fn from(err: Undecodable) -> Self {
        Error::with_source(Kind::Decode, err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            Error::with_source(Kind::Internal, e)
        } else {
            Error::with_source(Kind::Transport, e)
        }
    }
}

impl From<header::InvalidHeaderValue> for Error {
    fn from(e: header::InvalidHeaderValue) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::with_source(Kind::Decode, e)
    }
}

impl From<serde_html_form::ser::Error> for Error {
    fn from(e: serde_html_form::ser::Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}
