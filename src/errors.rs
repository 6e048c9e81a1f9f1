pub use anyhow::{anyhow, bail, Context, Error, Result};
pub use log::{debug, error, info, warn};

use crate::container::Format;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid or incomplete command line, rejected before any file is read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("expected input file")]
    MissingInput,
    #[error("expected password")]
    MissingPassword,
    #[error("expected inform to be pem or der, got {0:?}")]
    InvalidInform(String),
    #[error("warning days ({warn}) must be greater than critical days ({crit})")]
    ThresholdOrder { warn: i64, crit: i64 },
}

/// The container bytes can't be interpreted under the declared format.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("input is not a PKCS12 container: {0}")]
    Pkcs12Structure(#[source] openssl::error::ErrorStack),
    #[error("failed to decrypt PKCS12 container, wrong password?")]
    Pkcs12Decrypt(#[source] openssl::error::ErrorStack),
    #[error("no certificate found, or input is not in {0} format")]
    NoCertificate(Format),
    #[error("{0}, or input is not in DER format")]
    Der(String),
}

/// The leaf entry is not a well formed X.509 certificate.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse leaf certificate: {0}")]
    Certificate(#[source] openssl::error::ErrorStack),
    #[error("failed to read validity of leaf certificate: {0}")]
    Validity(#[source] openssl::error::ErrorStack),
    #[error("validity of leaf certificate is out of range: {0}")]
    OutOfRange(#[from] time::error::ComponentRange),
}

/// Anything that turns a check result into UNKNOWN.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
