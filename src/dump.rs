//! Text renderings of an assembled image.

use std::fmt::Write as _;

pub const ROW: usize = 8;

/// `0x01 0x05 ...`
pub fn hex_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:#04x}")).collect::<Vec<_>>().join(" ")
}

/// Hex/ASCII view, eight bytes per row:
/// `<offset>  <hex bytes>  |<ascii>|`, one row per line.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut buf = String::new();
    for (i, chunk) in bytes.chunks(ROW).enumerate() {
        let hex = chunk.iter().map(|b| format!("{b:02x}")).collect::<Vec<_>>().join(" ");
        let ascii: String = chunk
            .iter()
            .map(|&b| if (0x20..=0x7e).contains(&b) { b as char } else { '.' })
            .collect();
        let _ = writeln!(buf, "{:04x}  {hex:<24}  |{ascii}|", i * ROW);
    }
    buf
}
