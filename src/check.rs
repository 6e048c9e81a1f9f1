use crate::args::Thresholds;
use crate::cert;
use crate::config::ConfigFile;
use crate::container::{self, ContainerInput, Format};
use crate::errors::*;
use crate::expiry::{self, ExpiryPolicy, DEFAULT_CRIT_DAYS, DEFAULT_WARN_DAYS};
use crate::status::CheckResult;
use std::fs;
use std::path::PathBuf;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Password {
    Given(String),
    /// `-nopass`
    Disabled,
    Missing,
}

/// Which subcommand asked for the check, with its format specific arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Pkcs12(Password),
    X509 { inform: String },
}

/// Unvalidated arguments of one of the subcommands
#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub input: Option<PathBuf>,
    pub source: Source,
    pub thresholds: Thresholds,
}

impl CheckRequest {
    pub fn validate(self, config: &ConfigFile) -> Result<Check, ConfigError> {
        let path = self.input.ok_or(ConfigError::MissingInput)?;

        let (format, password) = match self.source {
            Source::Pkcs12(Password::Given(pass)) => (Format::Pkcs12, Some(pass)),
            Source::Pkcs12(Password::Disabled) => (Format::Pkcs12, None),
            Source::Pkcs12(Password::Missing) => match &config.pkcs12.password {
                Some(pass) => (Format::Pkcs12, Some(pass.clone())),
                None => return Err(ConfigError::MissingPassword),
            },
            Source::X509 { inform } => (parse_inform(&inform)?, None),
        };

        let warn = self
            .thresholds
            .warn
            .or(config.policy.warn)
            .unwrap_or(DEFAULT_WARN_DAYS);
        let crit = self
            .thresholds
            .crit
            .or(config.policy.crit)
            .unwrap_or(DEFAULT_CRIT_DAYS);
        let policy = ExpiryPolicy::new(warn, crit)?;

        Ok(Check {
            path,
            format,
            password,
            policy,
        })
    }
}

fn parse_inform(s: &str) -> Result<Format, ConfigError> {
    match s {
        "pem" => Ok(Format::Pem),
        "der" => Ok(Format::Der),
        _ => Err(ConfigError::InvalidInform(s.to_string())),
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Check {
    pub path: PathBuf,
    pub format: Format,
    pub password: Option<String>,
    pub policy: ExpiryPolicy,
}

impl std::fmt::Debug for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Check")
            .field("path", &self.path)
            .field("format", &self.format)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("policy", &self.policy)
            .finish()
    }
}

impl Check {
    pub fn run(&self, now: OffsetDateTime) -> CheckResult {
        debug!("Reading {} input from {:?}", self.format, self.path);
        match fs::read(&self.path) {
            Ok(bytes) => self.evaluate_bytes(&bytes, now),
            Err(source) => {
                let err = CheckError::Read {
                    path: self.path.clone(),
                    source,
                };
                warn!("Certificate check failed: {}", err);
                CheckResult::unknown(err)
            }
        }
    }

    pub fn evaluate_bytes(&self, bytes: &[u8], now: OffsetDateTime) -> CheckResult {
        match self.days_remaining(bytes, now) {
            Ok(eval) => CheckResult::expiry(eval.level, eval.days_remaining),
            Err(err) => {
                warn!("Certificate check failed: {}", err);
                CheckResult::unknown(err)
            }
        }
    }

    fn days_remaining(
        &self,
        bytes: &[u8],
        now: OffsetDateTime,
    ) -> Result<expiry::Evaluation, CheckError> {
        let input = ContainerInput {
            bytes,
            format: self.format,
            password: self.password.as_deref(),
        };
        let chain = container::decode(&input)?;
        let leaf = cert::extract_leaf(&chain)?;
        Ok(expiry::evaluate(&leaf, &self.policy, now))
    }
}
