use crate::unit::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstrDesc {
    pub mnemonic: &'static str,
    pub opcode: u8,
    /// Operand bytes the unit consumes after the opcode. Only the decoder
    /// relies on this; the assembler sizes lines by their token count.
    pub operands: u8,
}

/// Immutable mnemonic → opcode mapping for one processing unit.
#[derive(Debug)]
pub struct InstructionTable {
    pub unit: Unit,
    pub entries: &'static [InstrDesc],
}

const fn desc(mnemonic: &'static str, opcode: u8, operands: u8) -> InstrDesc {
    InstrDesc { mnemonic, opcode, operands }
}

pub static CPU_TABLE: InstructionTable = InstructionTable {
    unit: Unit::Cpu,
    entries: &[
        desc("NOP", 0x00, 0),
        desc("LDA", 0x01, 1),
        desc("ADD", 0x02, 1),
        desc("SUB", 0x03, 1),
        desc("STA", 0x04, 1),
        desc("JMP", 0x05, 1),
        desc("JZ", 0x06, 1),
        desc("HALT", 0xFF, 0),
    ],
};

pub static GPU_TABLE: InstructionTable = InstructionTable {
    unit: Unit::Gpu,
    entries: &[
        desc("GNOP", 0x00, 0),
        desc("SETX", 0x01, 1),
        desc("SETY", 0x02, 1),
        desc("SETC", 0x03, 1),
        desc("PLOT", 0x04, 0),
        desc("CLEAR", 0x05, 0),
        desc("LINE", 0x06, 2),
        desc("RECT", 0x07, 2),
        desc("GHALT", 0xFF, 0),
    ],
};

pub fn table_for(unit: Unit) -> &'static InstructionTable {
    match unit {
        Unit::Cpu => &CPU_TABLE,
        Unit::Gpu => &GPU_TABLE,
    }
}

impl InstructionTable {
    /// Case-insensitive mnemonic lookup.
    pub fn lookup(&self, mnemonic: &str) -> Option<&'static InstrDesc> {
        self.entries
            .iter()
            .find(|d| d.mnemonic.eq_ignore_ascii_case(mnemonic))
    }

    pub fn opcode(&self, mnemonic: &str) -> Option<u8> {
        self.lookup(mnemonic).map(|d| d.opcode)
    }

    pub fn by_opcode(&self, opcode: u8) -> Option<&'static InstrDesc> {
        self.entries.iter().find(|d| d.opcode == opcode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_independent() {
        assert_eq!(table_for(Unit::Cpu).opcode("halt"), Some(0xFF));
        assert_eq!(table_for(Unit::Gpu).opcode("GHALT"), Some(0xFF));
        assert_eq!(table_for(Unit::Cpu).opcode("SETX"), None);
        assert_eq!(table_for(Unit::Gpu).opcode("LDA"), None);
    }

    #[test]
    fn opcodes_are_unique_per_table() {
        for table in [&CPU_TABLE, &GPU_TABLE] {
            for d in table.entries {
                assert_eq!(table.by_opcode(d.opcode), Some(d));
            }
        }
    }
}
