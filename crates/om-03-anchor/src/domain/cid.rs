//! Structural CID validation.
//!
//! Two recognized families, distinguished by prefix:
//! - CIDv0: `Qm…`, base58btc-encoded sha2-256 multihash
//! - CIDv1: `b…`, lowercase base32 multibase
//!
//! Validation is structural only and performs no network call. Other
//! multibase prefixes (for example base58 CIDv1, `z…`) are rejected even
//! when parseable, so that every identifier this system emits or accepts
//! renders in one of the two canonical textual forms.

use cid::Cid;

/// Whether a string is a structurally valid CID in a recognized family.
pub fn is_valid_cid(value: &str) -> bool {
    let recognized_family = value.starts_with("Qm") || value.starts_with('b');
    recognized_family && Cid::try_from(value).is_ok()
}
