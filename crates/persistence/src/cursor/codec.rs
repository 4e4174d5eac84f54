//! Cursor token codec.
//!
//! A token is the payload's canonical JSON followed by an 8-byte check tag
//! (the leading bytes of its SHA-256 digest), encoded as URL-safe base64
//! without padding. Decoding checks structure only; whether the cursor
//! belongs to the current request is decided by [`validate()`](super::validate()).

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::SortKey;
use super::payload::CursorPayload;
use crate::error::{CursorRejection, CursorResult, InvalidCursor, StorageResult};

/// The only payload version this build reads and writes.
pub const CURSOR_VERSION: u32 = 1;

/// Longest token accepted by [`decode`].
pub const MAX_CURSOR_TOKEN_LEN: usize = 4096;

/// Length of the check tag appended to the payload JSON.
const CHECK_TAG_LEN: usize = 8;

/// Encodes a payload into an opaque, URL-safe token.
///
/// Encoding is deterministic: equal payloads yield equal tokens.
pub fn encode<S, F>(payload: &CursorPayload<S, F>) -> StorageResult<String>
where
    S: Serialize,
    F: Serialize,
{
    let json = serde_json::to_vec(payload)?;
    Ok(URL_SAFE_NO_PAD.encode(seal(json)))
}

/// Decodes a token back into a payload.
///
/// Checks run in order: empty, length, base64url, check tag, JSON, version,
/// shape, and finally the sort value against its field's canonical form.
/// A token from a newer or older payload layout is reported as a version
/// mismatch.
pub fn decode<S, F>(token: &str) -> CursorResult<CursorPayload<S, F>>
where
    S: SortKey,
    F: DeserializeOwned,
{
    if token.is_empty() {
        return Err(CursorRejection::Empty.into());
    }

    if token.len() > MAX_CURSOR_TOKEN_LEN {
        return Err(CursorRejection::TooLong {
            len: token.len(),
            max: MAX_CURSOR_TOKEN_LEN,
        }
        .into());
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|_| InvalidCursor::new(CursorRejection::Encoding))?;

    let json = unseal(&bytes).ok_or(CursorRejection::Checksum)?;

    let value: Value =
        serde_json::from_slice(json).map_err(|_| InvalidCursor::new(CursorRejection::Json))?;

    match value.get("version") {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(found) if found == u64::from(CURSOR_VERSION) => {}
            Some(found) => {
                return Err(CursorRejection::UnsupportedVersion {
                    found,
                    expected: CURSOR_VERSION,
                }
                .into());
            }
            None => return Err(shape("version must be a non-negative integer")),
        },
        Some(_) => return Err(shape("version must be a non-negative integer")),
        None => return Err(shape("missing field `version`")),
    }

    let payload: CursorPayload<S, F> =
        serde_json::from_value(value).map_err(|e| shape(e.to_string()))?;

    if !payload.sort_field.value_kind().is_canonical(&payload.sort_value) {
        return Err(CursorRejection::SortValue.into());
    }

    Ok(payload)
}

fn check_tag(json: &[u8]) -> [u8; CHECK_TAG_LEN] {
    let digest = Sha256::digest(json);
    let mut tag = [0u8; CHECK_TAG_LEN];
    tag.copy_from_slice(&digest[..CHECK_TAG_LEN]);
    tag
}

/// Appends the check tag to `json`.
fn seal(mut json: Vec<u8>) -> Vec<u8> {
    let tag = check_tag(&json);
    json.extend_from_slice(&tag);
    json
}

/// Splits off and verifies the check tag, returning the JSON bytes.
fn unseal(bytes: &[u8]) -> Option<&[u8]> {
    let split = bytes.len().checked_sub(CHECK_TAG_LEN)?;
    let (json, tag) = bytes.split_at(split);
    (check_tag(json) == tag).then_some(json)
}

fn shape(message: impl Into<String>) -> InvalidCursor {
    InvalidCursor::new(CursorRejection::Shape {
        message: message.into(),
    })
}
