//! Decoding script files to text.
//!
//! Files are UTF-8 (with or without a byte-order mark) or use a legacy
//! Windows/ISO code page. Legacy code pages must be enabled once per process
//! with [`register_legacy_encodings`] before such a file is decoded; the call
//! is idempotent and may come from any thread.

use std::collections::HashMap;

use encoding_rs::Encoding;
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::error::EncodingError;

/// Code page assumed for non-UTF-8 input when the caller names none.
pub const DEFAULT_LEGACY_ENCODING: &str = "windows-1252";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

static LEGACY_ENCODINGS: OnceCell<HashMap<&'static str, &'static Encoding>> = OnceCell::new();

/// Enable the legacy code pages.
pub fn register_legacy_encodings() {
    LEGACY_ENCODINGS.get_or_init(|| {
        let encodings = [
            encoding_rs::WINDOWS_1250,
            encoding_rs::WINDOWS_1251,
            encoding_rs::WINDOWS_1252,
            encoding_rs::WINDOWS_1253,
            encoding_rs::WINDOWS_1254,
            encoding_rs::WINDOWS_1255,
            encoding_rs::WINDOWS_1256,
            encoding_rs::WINDOWS_1257,
            encoding_rs::WINDOWS_1258,
            encoding_rs::ISO_8859_2,
            encoding_rs::ISO_8859_5,
            encoding_rs::ISO_8859_15,
            encoding_rs::KOI8_R,
            encoding_rs::GBK,
            encoding_rs::BIG5,
            encoding_rs::SHIFT_JIS,
            encoding_rs::EUC_KR,
        ];
        debug!(count = encodings.len(), "registering legacy encodings");
        encodings.into_iter().map(|e| (e.name(), e)).collect()
    });
}

pub fn legacy_encodings_registered() -> bool {
    LEGACY_ENCODINGS.get().is_some()
}

/// Look up a registered legacy code page by any of its WHATWG labels
/// (`windows-1252`, `cp1252`, `latin1`, ...).
pub fn legacy_encoding(label: &str) -> Result<&'static Encoding, EncodingError> {
    let registry = LEGACY_ENCODINGS.get().ok_or(EncodingError::NotRegistered)?;
    Encoding::for_label(label.trim().as_bytes())
        .and_then(|encoding| registry.get(encoding.name()).copied())
        .ok_or_else(|| EncodingError::UnknownLabel(label.to_string()))
}

/// Decode the bytes of a script file.
///
/// A UTF-8 byte-order mark is stripped. Input that is valid UTF-8 is used as
/// is; anything else is decoded with the legacy code page `legacy_label`
/// (default [`DEFAULT_LEGACY_ENCODING`]).
pub fn decode_script(bytes: &[u8], legacy_label: Option<&str>) -> Result<String, EncodingError> {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return std::str::from_utf8(rest)
            .map(str::to_string)
            .map_err(|_| EncodingError::Malformed("UTF-8".to_string()));
    }
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }

    let encoding = legacy_encoding(legacy_label.unwrap_or(DEFAULT_LEGACY_ENCODING))?;
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(EncodingError::Malformed(encoding.name().to_string()));
    }
    Ok(text.into_owned())
}
