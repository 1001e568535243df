//! OSC 52 clipboard writes. The terminal emulator, not the OS, sets the
//! clipboard, so this also works over SSH.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::io::{self, Write};

use super::backend::{ClipboardError, ClipboardResult};

pub fn copy(text: &str) -> ClipboardResult {
    write_sequence(&mut io::stdout(), text)
}

fn write_sequence<W: Write>(out: &mut W, text: &str) -> ClipboardResult {
    out.write_all(encode_osc52(text).as_bytes())
        .map_err(|_| ClipboardError::WriteError)?;
    out.flush().map_err(|_| ClipboardError::WriteError)
}

/// `ESC ] 52 ; c ; <base64> BEL`
pub fn encode_osc52(text: &str) -> String {
    let encoded = STANDARD.encode(text);
    format!("\x1b]52;c;{}\x07", encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_ascii() {
        assert_eq!(encode_osc52("loadUser"), "\x1b]52;c;bG9hZFVzZXI=\x07");
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode_osc52(""), "\x1b]52;c;\x07");
    }

    #[test]
    fn test_encode_unicode_roundtrips() {
        let sequence = encode_osc52("名前_sprout");
        let payload = sequence
            .strip_prefix("\x1b]52;c;")
            .and_then(|s| s.strip_suffix('\x07'))
            .unwrap();
        let decoded = STANDARD.decode(payload).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), "名前_sprout");
    }

    #[test]
    fn test_write_sequence_to_buffer() {
        let mut buffer = Vec::new();
        write_sequence(&mut buffer, "getUser").unwrap();
        assert_eq!(buffer, encode_osc52("getUser").into_bytes());
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_write_error() {
        assert_eq!(
            write_sequence(&mut FailingWriter, "x"),
            Err(ClipboardError::WriteError)
        );
    }
}
