//! ROI payload validation and decoding.
//!
//! The submission endpoint receives the cropped region as a data URL
//! (`data:<mime>;base64,<payload>`). The base64 portion is length-checked
//! against [`MAX_ENCODED_BYTES`] before any decoding happens; nothing
//! oversized ever reaches the decoder or the queue.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of the base64 portion of the data URL, in bytes.
///
/// Base64 inflates its input by 4/3, so this bound also caps the decoded
/// image at well under 2 MiB.
pub const MAX_ENCODED_BYTES: usize = 2 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// The cropped region coordinates submitted alongside the image data.
///
/// The coordinates travel with the job for a future recognizer that wants
/// them; the stub processor ignores them. No range constraints are imposed
/// beyond being valid numbers.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RoiRegion {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

// ---------------------------------------------------------------------------
// Data URL decoding
// ---------------------------------------------------------------------------

/// Split a data URL into its header and base64 payload, validate the size
/// bound, and decode the payload.
///
/// Errors:
/// - [`CoreError::Validation`] if the string is not a data URL, has no
///   comma separator, or the encoded payload exceeds [`MAX_ENCODED_BYTES`].
/// - [`CoreError::Decode`] if the payload is not valid base64.
pub fn decode_data_url(image_data: &str) -> Result<Vec<u8>, CoreError> {
    let Some((header, encoded)) = image_data.split_once(',') else {
        return Err(CoreError::Validation(
            "image_data must be a data URL with a comma-separated payload".to_string(),
        ));
    };

    if !header.starts_with("data:") {
        return Err(CoreError::Validation(
            "image_data must start with a 'data:' header".to_string(),
        ));
    }

    if encoded.len() > MAX_ENCODED_BYTES {
        return Err(CoreError::Validation(format!(
            "ROI image too large: {} bytes encoded exceeds the {} byte limit",
            encoded.len(),
            MAX_ENCODED_BYTES
        )));
    }

    STANDARD
        .decode(encoded)
        .map_err(|e| CoreError::Decode(format!("image_data is not valid base64: {e}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_valid_data_url() {
        let decoded = decode_data_url("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(decoded, b"hello");
    }

    #[test]
    fn missing_comma_rejected() {
        let err = decode_data_url("data:image/png;base64").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn missing_data_prefix_rejected() {
        let err = decode_data_url("image/png;base64,aGVsbG8=").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn invalid_base64_rejected() {
        let err = decode_data_url("data:image/png;base64,not!!valid@@base64").unwrap_err();
        assert!(matches!(err, CoreError::Decode(_)));
    }

    #[test]
    fn oversized_payload_rejected_before_decode() {
        // One byte over the encoded limit. The payload is not even valid
        // base64, which proves the size gate fires first.
        let encoded = "!".repeat(MAX_ENCODED_BYTES + 1);
        let err = decode_data_url(&format!("data:image/png;base64,{encoded}")).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn payload_at_exact_limit_is_decoded() {
        // MAX_ENCODED_BYTES is divisible by 4, so a full-length run of 'A's
        // is valid base64.
        let encoded = "A".repeat(MAX_ENCODED_BYTES);
        let decoded = decode_data_url(&format!("data:image/png;base64,{encoded}")).unwrap();
        assert_eq!(decoded.len(), MAX_ENCODED_BYTES / 4 * 3);
    }

    #[test]
    fn empty_payload_decodes_to_empty() {
        let decoded = decode_data_url("data:image/png;base64,").unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn region_deserializes_from_json() {
        let region: RoiRegion =
            serde_json::from_str(r#"{"x": 0, "y": 0, "w": 10.5, "h": 10}"#).unwrap();
        assert_eq!(region.w, 10.5);
    }
}
