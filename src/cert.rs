use crate::container::DecodedChain;
use crate::errors::*;
use openssl::asn1::{Asn1Time, Asn1TimeRef};
use openssl::nid::Nid;
use openssl::x509::X509;
use time::OffsetDateTime;

const SECS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertInfo {
    pub subject: Option<String>,
    pub not_before: OffsetDateTime,
    pub not_after: OffsetDateTime,
    pub raw_len: usize,
}

impl CertInfo {
    pub fn from_der(der: &[u8]) -> Result<CertInfo, ParseError> {
        // load as x509
        let x509 = X509::from_der(der).map_err(ParseError::Certificate)?;

        let subject = x509
            .subject_name()
            .entries_by_nid(Nid::COMMONNAME)
            .next()
            .and_then(|cn| cn.data().as_utf8().ok())
            .map(|cn| cn.to_string());

        Ok(CertInfo {
            subject,
            not_before: to_datetime(x509.not_before())?,
            not_after: to_datetime(x509.not_after())?,
            raw_len: der.len(),
        })
    }
}

/// Parse the leaf of the chain, the other entries are never looked at
pub fn extract_leaf(chain: &DecodedChain) -> Result<CertInfo, ParseError> {
    let cert = CertInfo::from_der(chain.leaf())?;
    debug!(
        "Leaf certificate {:?} ({} bytes) is valid from {} until {}",
        cert.subject, cert.raw_len, cert.not_before, cert.not_after
    );
    Ok(cert)
}

// Asn1Time has no accessor for the timestamp, measure the distance from the epoch instead
fn to_datetime(t: &Asn1TimeRef) -> Result<OffsetDateTime, ParseError> {
    let epoch = Asn1Time::from_unix(0).map_err(ParseError::Validity)?;
    let diff = epoch.diff(t).map_err(ParseError::Validity)?;
    let secs = i64::from(diff.days) * SECS_PER_DAY + i64::from(diff.secs);
    let datetime = OffsetDateTime::from_unix_timestamp(secs)?;
    Ok(datetime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Format;
    use crate::testutil::{self, DAY, NOW};

    #[test]
    fn reads_validity_window() {
        let (_, cert) = testutil::cert_until("example.com", NOW + 10 * DAY + 42);
        let der = cert.to_der().unwrap();

        let info = CertInfo::from_der(&der).unwrap();
        assert_eq!(
            info,
            CertInfo {
                subject: Some("example.com".to_string()),
                not_before: OffsetDateTime::from_unix_timestamp(NOW - 365 * DAY).unwrap(),
                not_after: OffsetDateTime::from_unix_timestamp(NOW + 10 * DAY + 42).unwrap(),
                raw_len: der.len(),
            }
        );
    }

    #[test]
    fn reads_dates_before_epoch() {
        let (_, cert) = testutil::cert_until("old", -DAY - 1);
        let info = CertInfo::from_der(&cert.to_der().unwrap()).unwrap();
        assert_eq!(info.not_after.unix_timestamp(), -DAY - 1);
    }

    #[test]
    fn only_leaf_is_parsed() {
        let (_, leaf) = testutil::cert("leaf", 40);
        let mut certs = vec![leaf.to_der().unwrap()];
        certs.push(vec![0x30, 0x00]);
        let chain = DecodedChain::new(certs, Format::Der).unwrap();

        let info = extract_leaf(&chain).unwrap();
        assert_eq!(info.subject.as_deref(), Some("leaf"));
    }

    #[test]
    fn malformed_leaf() {
        let chain = DecodedChain::new(vec![vec![0x30, 0x03, 0x02, 0x01, 0x01]], Format::Der).unwrap();
        let err = extract_leaf(&chain).unwrap_err();
        assert!(matches!(err, ParseError::Certificate(_)));
    }
}
