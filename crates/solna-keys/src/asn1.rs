#![forbid(unsafe_code)]

//! Small helpers on top of `yasna`.

use yasna::models::ObjectIdentifier;
use yasna::{ASN1Result, BERReaderSeq};

/// Dotted-decimal form of an object identifier, e.g. `1.2.840.113549.1.1.1`.
pub(crate) fn oid_to_string(oid: &ObjectIdentifier) -> String {
    oid.components()
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Read and discard any elements left in a SEQUENCE.
pub(crate) fn skip_remaining(r: &mut BERReaderSeq) -> ASN1Result<()> {
    while r.read_optional(|r| r.read_der())?.is_some() {}
    Ok(())
}
