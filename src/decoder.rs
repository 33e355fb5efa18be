use serde::Serialize;

use crate::instructions::{table_for, InstructionTable};
use crate::unit::Unit;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded {
    pub unit: Unit,
    pub opcode: u8,
    pub mnemonic: &'static str,
    pub operands: Vec<u8>,
}

impl Decoded {
    /// Bytes consumed: opcode plus operands.
    pub fn width(&self) -> usize {
        1 + self.operands.len()
    }
}

pub trait Decoder {
    /// Decodes the instruction at the start of `bytes`. `None` when the
    /// opcode is unknown or its operands run past the end.
    fn decode(&self, bytes: &[u8]) -> Option<Decoded>;
}

impl Decoder for InstructionTable {
    fn decode(&self, bytes: &[u8]) -> Option<Decoded> {
        let (&opcode, rest) = bytes.split_first()?;
        let desc = self.by_opcode(opcode)?;
        let operands = rest.get(..desc.operands as usize)?.to_vec();
        Some(Decoded { unit: self.unit, opcode, mnemonic: desc.mnemonic, operands })
    }
}

impl Decoder for Unit {
    fn decode(&self, bytes: &[u8]) -> Option<Decoded> {
        table_for(*self).decode(bytes)
    }
}
