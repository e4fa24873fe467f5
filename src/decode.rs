//! Best-effort text decoding for raw report bytes
//!
//! Reports arrive from a mix of tooling; UTF-8 is tried first, then
//! Windows-1252 (common for exports produced on Windows), then lossy UTF-8.
//! Decoding never fails outright.

pub fn decode_bytes(bytes: Vec<u8>) -> String {
    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, had_errors) = encoding_rs::WINDOWS_1252.decode(&bytes);
            if had_errors {
                // Last resort: substitute undecodable bytes
                String::from_utf8_lossy(&bytes).into_owned()
            } else {
                decoded.into_owned()
            }
        }
    }
}
