//! The content-inclusion gate: binary detection followed by a two-stage decode.

use crate::options::BinaryDetection;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Number of leading bytes inspected for binary detection.
const SAMPLE_SIZE: usize = 8192;

pub(crate) fn is_binary(sample: &[u8], detection: BinaryDetection) -> bool {
    match detection {
        BinaryDetection::Simple => sample.contains(&0),
        BinaryDetection::Accurate => content_inspector::inspect(sample).is_binary(),
        BinaryDetection::None => false,
    }
}

/// Strict UTF-8 first, then lossy substitution. Always yields a string.
pub(crate) fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Reads `path` and returns its text, or `None` if the file looks binary.
///
/// Only I/O failures are errors; undecodable bytes never are.
pub(crate) fn read_text(path: &Path, detection: BinaryDetection) -> io::Result<Option<String>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut bytes = Vec::with_capacity(SAMPLE_SIZE);
    reader
        .by_ref()
        .take(SAMPLE_SIZE as u64)
        .read_to_end(&mut bytes)?;
    if is_binary(&bytes, detection) {
        #[cfg(feature = "logging")]
        tracing::debug!("Binary file detected: {}", path.display());
        return Ok(None);
    }
    reader.read_to_end(&mut bytes)?;
    Ok(Some(decode_text(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn valid_utf8_is_kept_exactly() {
        let text = "héllo\r\nwörld\n";
        assert_eq!(decode_text(text.as_bytes().to_vec()), text);
    }

    #[test]
    fn invalid_bytes_are_substituted() {
        let bytes = vec![b'a', 0xff, b'b'];
        assert_eq!(decode_text(bytes), "a\u{FFFD}b");
    }

    #[test]
    fn nul_byte_marks_binary_in_simple_mode() {
        assert!(is_binary(&[1, 0, 2], BinaryDetection::Simple));
        assert!(!is_binary(b"plain text", BinaryDetection::Simple));
        assert!(!is_binary(&[1, 0, 2], BinaryDetection::None));
    }

    #[test]
    fn accurate_mode_uses_content_inspector() {
        assert!(is_binary(b"\x00\x01\x02\x03", BinaryDetection::Accurate));
        assert!(!is_binary(b"fn main() {}\n", BinaryDetection::Accurate));
    }

    #[test]
    fn read_text_spans_beyond_the_sample() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("long.txt");
        let body = "x".repeat(SAMPLE_SIZE * 2 + 17);
        fs::write(&path, &body).unwrap();
        let text = read_text(&path, BinaryDetection::Simple).unwrap();
        assert_eq!(text.as_deref(), Some(body.as_str()));
    }

    #[test]
    fn multibyte_char_on_sample_boundary_survives() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("edge.txt");
        let mut body = "a".repeat(SAMPLE_SIZE - 1);
        body.push('é');
        body.push_str("tail");
        fs::write(&path, &body).unwrap();
        let text = read_text(&path, BinaryDetection::Simple).unwrap();
        assert_eq!(text.as_deref(), Some(body.as_str()));
    }

    #[test]
    fn binary_file_has_no_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        fs::write(&path, [0u8, 159, 146, 150]).unwrap();
        assert_eq!(read_text(&path, BinaryDetection::Simple).unwrap(), None);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        assert!(read_text(&dir.path().join("nope"), BinaryDetection::Simple).is_err());
    }
}
