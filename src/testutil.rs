//! Certificate fixtures generated on the fly, relative to a fixed clock.

use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::ec::{EcGroup, EcKey};
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkcs12::Pkcs12;
use openssl::pkey::{PKey, Private};
use openssl::stack::Stack;
use openssl::x509::{X509Builder, X509NameBuilder, X509};
use time::OffsetDateTime;

/// 2023-11-14T22:13:20Z
pub const NOW: i64 = 1_700_000_000;
pub const HOUR: i64 = 3600;
pub const DAY: i64 = 24 * HOUR;

pub fn now() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(NOW).unwrap()
}

/// Self signed certificate expiring `days` days (plus one hour) after `NOW`
pub fn cert(cn: &str, days: i64) -> (PKey<Private>, X509) {
    let not_after = if days < 0 {
        NOW + days * DAY - HOUR
    } else {
        NOW + days * DAY + HOUR
    };
    cert_until(cn, not_after)
}

/// Self signed certificate valid from a year before `NOW` until `not_after`
pub fn cert_until(cn: &str, not_after: i64) -> (PKey<Private>, X509) {
    let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1).unwrap();
    let key = PKey::from_ec_key(EcKey::generate(&group).unwrap()).unwrap();

    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_text("CN", cn).unwrap();
    let name = name.build();

    let serial = BigNum::from_u32(1).unwrap().to_asn1_integer().unwrap();

    let mut builder = X509Builder::new().unwrap();
    builder.set_version(2).unwrap();
    builder.set_serial_number(&serial).unwrap();
    builder.set_subject_name(&name).unwrap();
    builder.set_issuer_name(&name).unwrap();
    builder.set_pubkey(&key).unwrap();
    builder
        .set_not_before(&Asn1Time::from_unix(NOW - 365 * DAY).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::from_unix(not_after).unwrap())
        .unwrap();
    builder.sign(&key, MessageDigest::sha256()).unwrap();

    (key, builder.build())
}

pub fn pem_bundle(certs: &[&X509]) -> Vec<u8> {
    certs
        .iter()
        .flat_map(|cert| cert.to_pem().unwrap())
        .collect()
}

pub fn der_bundle(certs: &[&X509]) -> Vec<u8> {
    certs
        .iter()
        .flat_map(|cert| cert.to_der().unwrap())
        .collect()
}

pub fn pkcs12(key: &PKey<Private>, leaf: &X509, ca: &[&X509], password: &str) -> Vec<u8> {
    let mut builder = Pkcs12::builder();
    builder.name("chk-cert").pkey(key).cert(leaf);
    if !ca.is_empty() {
        let mut stack = Stack::new().unwrap();
        for cert in ca {
            stack.push((*cert).clone()).unwrap();
        }
        builder.ca(stack);
    }
    builder.build2(password).unwrap().to_der().unwrap()
}
