//! Data-URI materialisation: decode an embedded resource to a temp file.
//!
//! ## Why materialise at all?
//!
//! The rendering engine dereferences resources by path — it cannot read an
//! image out of a `data:` URI buried in an attribute we already rewrote.
//! Decoding to a uniquely named temp file gives the engine an ordinary file
//! to open, and handing the [`TempPath`] back to the resolver ties the
//! file's lifetime to the conversion (deleted on drop).

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io::Write;
use std::path::Path;
use tempfile::TempPath;
use tracing::{debug, warn};

/// Decode a `data:[mediatype][;base64],<payload>` URI into a temp file.
///
/// Payloads without a `;base64` marker are taken as literal text bytes.
/// That matches the observable behaviour of a round trip through
/// base64-encode-then-decode; a binary payload mislabelled as text will
/// come out corrupted, which is an accepted limitation rather than a
/// general-purpose decoder.
///
/// Returns `None` on any failure (malformed header, bad base64, I/O) —
/// the caller substitutes the original URI.
pub fn materialize(uri: &str, temp_dir: Option<&Path>) -> Option<TempPath> {
    let rest = uri.strip_prefix("data:")?;
    let Some((header, payload)) = rest.split_once(',') else {
        warn!("Malformed data URI: no comma separator");
        return None;
    };

    let is_base64 = header
        .split(';')
        .any(|part| part.eq_ignore_ascii_case("base64"));
    let media_type = header.split(';').next().unwrap_or("");

    let bytes: Vec<u8> = if is_base64 {
        match STANDARD.decode(payload.trim()) {
            Ok(b) => b,
            Err(e) => {
                warn!("Failed to decode base64 data URI payload: {e}");
                return None;
            }
        }
    } else {
        payload.as_bytes().to_vec()
    };

    let ext = extension_for_media_type(media_type);
    match write_temp(&bytes, ext, temp_dir) {
        Ok(path) => {
            debug!(
                "Materialized data URI ({media_type:?}, {} bytes) → {}",
                bytes.len(),
                path.display()
            );
            Some(path)
        }
        Err(e) => {
            warn!("Failed to write materialized data URI: {e}");
            None
        }
    }
}

/// Write bytes to a uniquely named temp file with the given extension.
pub(crate) fn write_temp(
    bytes: &[u8],
    ext: &str,
    temp_dir: Option<&Path>,
) -> std::io::Result<TempPath> {
    let suffix = format!(".{ext}");
    let mut builder = tempfile::Builder::new();
    builder.prefix("md2pdf-").suffix(suffix.as_str());
    let mut file = match temp_dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file.into_temp_path())
}

/// Map a declared media type to a file extension, defaulting to `bin`.
pub(crate) fn extension_for_media_type(media_type: &str) -> &'static str {
    match media_type.to_ascii_lowercase().as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/svg+xml" => "svg",
        "image/webp" => "webp",
        "image/bmp" => "bmp",
        "image/tiff" => "tif",
        _ => "bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_payload_roundtrips() {
        let original: &[u8] = &[0x89, b'P', b'N', b'G', 0x00, 0xFF, 0x10];
        let uri = format!("data:image/png;base64,{}", STANDARD.encode(original));
        let path = materialize(&uri, None).expect("should materialize");
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes, original);
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
    }

    #[test]
    fn plain_text_payload_materializes_verbatim() {
        let uri = "data:text/plain,hello world";
        let path = materialize(uri, None).expect("should materialize");
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "hello world");
    }

    #[test]
    fn unknown_media_type_gets_bin_extension() {
        let uri = "data:application/x-mystery;base64,AAAA";
        let path = materialize(uri, None).expect("should materialize");
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("bin"));
    }

    #[test]
    fn missing_comma_is_unresolved() {
        assert!(materialize("data:image/png;base64", None).is_none());
    }

    #[test]
    fn invalid_base64_is_unresolved() {
        assert!(materialize("data:image/png;base64,!!!not-base64!!!", None).is_none());
    }

    #[test]
    fn non_data_uri_is_unresolved() {
        assert!(materialize("https://example.com/a.png", None).is_none());
    }

    #[test]
    fn temp_file_deleted_on_drop() {
        let uri = "data:text/plain,ephemeral";
        let path = materialize(uri, None).unwrap();
        let location = path.to_path_buf();
        assert!(location.exists());
        drop(path);
        assert!(!location.exists(), "temp file should be cleaned up on drop");
    }

    #[test]
    fn respects_temp_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        let uri = "data:text/plain,placed";
        let path = materialize(uri, Some(dir.path())).unwrap();
        assert!(path.starts_with(dir.path()));
    }

    #[test]
    fn extension_mapping() {
        assert_eq!(extension_for_media_type("image/jpeg"), "jpg");
        assert_eq!(extension_for_media_type("IMAGE/PNG"), "png");
        assert_eq!(extension_for_media_type("image/svg+xml"), "svg");
        assert_eq!(extension_for_media_type(""), "bin");
    }
}
