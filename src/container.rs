use crate::errors::*;
use openssl::pkcs12::Pkcs12;
use std::fmt;
use x509_parser::prelude::{FromDer, X509Certificate};

const PEM_CERT_TAGS: &[&str] = &["CERTIFICATE", "X509 CERTIFICATE", "TRUSTED CERTIFICATE"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pkcs12,
    Pem,
    Der,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Pkcs12 => write!(f, "PKCS12"),
            Format::Pem => write!(f, "PEM"),
            Format::Der => write!(f, "DER"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ContainerInput<'a> {
    pub bytes: &'a [u8],
    pub format: Format,
    /// Only used for PKCS12, the empty string stands for "no password"
    pub password: Option<&'a str>,
}

/// DER encoded certificates in the order they appear in the container.
/// Never empty, the first entry is the leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedChain {
    certs: Vec<Vec<u8>>,
}

impl DecodedChain {
    pub fn new(certs: Vec<Vec<u8>>, format: Format) -> Result<DecodedChain, DecodeError> {
        if certs.is_empty() {
            return Err(DecodeError::NoCertificate(format));
        }
        Ok(DecodedChain { certs })
    }

    pub fn leaf(&self) -> &[u8] {
        &self.certs[0]
    }

    pub fn certs(&self) -> &[Vec<u8>] {
        &self.certs
    }
}

pub fn decode(input: &ContainerInput) -> Result<DecodedChain, DecodeError> {
    let certs = match input.format {
        Format::Pkcs12 => from_pkcs12(input.bytes, input.password.unwrap_or(""))?,
        Format::Pem => from_pem(input.bytes),
        Format::Der => split_der(input.bytes)?,
    };
    let chain = DecodedChain::new(certs, input.format)?;
    debug!(
        "Decoded {} certificate(s) from {} input",
        chain.certs().len(),
        input.format
    );
    Ok(chain)
}

fn from_pkcs12(bytes: &[u8], password: &str) -> Result<Vec<Vec<u8>>, DecodeError> {
    let bundle = Pkcs12::from_der(bytes).map_err(DecodeError::Pkcs12Structure)?;
    let parsed = bundle.parse2(password).map_err(DecodeError::Pkcs12Decrypt)?;

    if parsed.pkey.is_some() {
        debug!("Ignoring private key in PKCS12 container");
    }

    let mut certs = Vec::new();
    // without a matching key openssl hands back every cert in the ca stack
    let leaf = parsed.cert.into_iter();
    let ca = parsed.ca.into_iter().flatten();
    for cert in leaf.chain(ca) {
        let der = cert.to_der().map_err(DecodeError::Pkcs12Structure)?;
        certs.push(der);
    }
    Ok(certs)
}

fn from_pem(bytes: &[u8]) -> Vec<Vec<u8>> {
    let mut certs = Vec::new();
    for block in pem::parse_many(bytes) {
        if PEM_CERT_TAGS.contains(&block.tag.as_str()) {
            certs.push(block.contents);
        } else {
            debug!("Skipping non-certificate PEM block: {:?}", block.tag);
        }
    }
    certs
}

/// Split concatenated DER certificates, each parse hands back the bytes after it
fn split_der(mut bytes: &[u8]) -> Result<Vec<Vec<u8>>, DecodeError> {
    let mut certs = Vec::new();
    while !bytes.is_empty() {
        let (rest, _) =
            X509Certificate::from_der(bytes).map_err(|err| DecodeError::Der(err.to_string()))?;
        let (cert, _) = bytes.split_at(bytes.len() - rest.len());
        certs.push(cert.to_vec());
        bytes = rest;
    }
    Ok(certs)
}
