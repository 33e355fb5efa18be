use serde::Serialize;

use crate::decoder::{Decoded, Decoder};
use crate::unit::Unit;

pub fn fmt_decoded(d: &Decoded) -> String {
    let mut s = d.mnemonic.to_string();
    for op in &d.operands {
        s.push_str(&format!(" {op:#04x}"));
    }
    s
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisasmLine {
    pub addr: u32,
    pub bytes: Vec<u8>,
    pub text: String,
}

/// Linear sweep of `bytes` as code for `unit`. Bytes that do not decode are
/// emitted one at a time as `.byte` lines.
pub fn disassemble(bytes: &[u8], unit: Unit) -> Vec<DisasmLine> {
    let mut out = Vec::new();
    let mut pc = 0usize;
    while pc < bytes.len() {
        let (width, text) = match unit.decode(&bytes[pc..]) {
            Some(d) => (d.width(), fmt_decoded(&d)),
            None => (1, format!(".byte {:#04x}", bytes[pc])),
        };
        out.push(DisasmLine {
            addr: pc as u32,
            bytes: bytes[pc..pc + width].to_vec(),
            text,
        });
        pc += width;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_byte_falls_back() {
        let lines = disassemble(&[0x42, 0xFF], Unit::Cpu);
        assert_eq!(lines[0].text, ".byte 0x42");
        assert_eq!(lines[1].text, "HALT");
        assert_eq!(lines[1].addr, 1);
    }

    #[test]
    fn truncated_operands_fall_back() {
        let lines = disassemble(&[0x07, 0x01], Unit::Gpu);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, ".byte 0x07");
    }
}
