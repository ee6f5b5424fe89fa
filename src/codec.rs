//! The Base58 variant textual codec for [`RingSign`] (`SPEC_FULL.md` §4.7).
//!
//! Layout: `"1" ‖ B58(X) ‖ "+" ‖ B58(Y) ‖ "+" ‖ B58(Xp) ‖ "+" ‖ B58(Yp) ‖ "+"
//! ‖ (B58(Cⱼ) ‖ "&")* ‖ "+" ‖ (B58(Tⱼ) ‖ "&")*`. The leading `"1"` is a
//! literal version character, not a Base58Check version byte — there is no
//! checksum anywhere in this format.

use crate::error::{Error, Result};
use crate::signature::RingSign;

/// Encodes a minimal big-endian byte string as Base58. The empty byte string
/// (representing the integer zero) encodes to the empty string: `bs58`, like
/// Go's `Base58` type here, produces no leading `'1'` digits for an empty
/// input.
fn encode_field(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Decodes a Base58 field back to minimal big-endian bytes. An empty input
/// string decodes to the empty byte string (the integer zero), matching
/// `encode_field`'s treatment of zero.
fn decode_field(field: &str) -> Result<Vec<u8>> {
    if field.is_empty() {
        return Ok(Vec::new());
    }
    bs58::decode(field)
        .into_vec()
        .map_err(|_| Error::MalformedSignature)
}

impl RingSign {
    /// Encodes this signature as the Base58 variant string.
    pub fn to_base58(&self) -> String {
        let mut out = String::with_capacity(128);
        out.push('1');
        out.push_str(&encode_field(&self.x));
        out.push('+');
        out.push_str(&encode_field(&self.y));
        out.push('+');
        out.push_str(&encode_field(&self.xp));
        out.push('+');
        out.push_str(&encode_field(&self.yp));
        out.push('+');
        for c in &self.c {
            out.push_str(&encode_field(c));
            out.push('&');
        }
        out.push('+');
        for t in &self.t {
            out.push_str(&encode_field(t));
            out.push('&');
        }
        out
    }

    /// Decodes a Base58 variant string into a `RingSign`.
    ///
    /// This performs no range or on-curve validation — a successfully
    /// decoded `RingSign` is only *structurally* well formed (right field
    /// count, every Base58 chunk decodable). Pass it to
    /// [`crate::signature::verify`] to find out whether it's a valid
    /// signature.
    pub fn from_base58(s: &str) -> Result<Self> {
        let body = s.strip_prefix('1').ok_or(Error::MalformedSignature)?;

        let fields: Vec<&str> = body.split('+').collect();
        if fields.len() != 6 {
            return Err(Error::MalformedSignature);
        }

        let x = decode_field(fields[0])?;
        let y = decode_field(fields[1])?;
        let xp = decode_field(fields[2])?;
        let yp = decode_field(fields[3])?;
        let c = split_ampersand_terminated(fields[4])?;
        let t = split_ampersand_terminated(fields[5])?;

        Ok(RingSign { x, y, xp, yp, c, t })
    }
}

/// Splits an `"&"`-terminated list of Base58 fields (e.g. `"ab&cd&"`) into
/// decoded byte vectors, discarding the trailing empty element that
/// splitting on `"&"` leaves after the final terminator.
///
/// An empty field is rejected rather than treated as a zero-length array: a
/// `RingSign` always has at least one ring index (`sign`/`verify` reject an
/// empty ring outright), so a `C`/`T` chunk that decodes to nothing can only
/// mean a signature that never had a valid ring behind it. This mirrors the
/// reference implementation, where an empty chunk never appends anything to
/// `C`/`T`, leaving them `nil` and tripping its own trailing nil-check.
fn split_ampersand_terminated(field: &str) -> Result<Vec<Vec<u8>>> {
    if field.is_empty() {
        return Err(Error::MalformedSignature);
    }
    let mut parts: Vec<&str> = field.split('&').collect();
    if parts.last() != Some(&"") {
        return Err(Error::MalformedSignature);
    }
    parts.pop();
    parts.into_iter().map(decode_field).collect()
}
