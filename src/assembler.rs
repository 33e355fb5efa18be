//! Two-pass assembler.
//!
//! Pass 1 ([`layout`]) strips comments, records mode directives, binds labels
//! to byte addresses and sizes every instruction line. Pass 2 ([`encode`])
//! turns the recorded lines into bytes, resolving label operands against the
//! symbol table built in pass 1. Both artifacts are plain data so each pass
//! can be driven and inspected on its own.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::instructions::table_for;
use crate::unit::Unit;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("Unknown directive: {0}")]
    UnknownDirective(String),
    #[error("Unknown {0} instruction: {1}")]
    UnknownInstruction(Unit, String),
    #[error("Operand value too large: {0}")]
    OperandOutOfRange(String),
    #[error("Unknown operand: {0}")]
    UnknownOperand(String),
}

/// Label name → byte address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymbolTable {
    symbols: HashMap<String, u32>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, returning the address it was previously bound to.
    pub fn define(&mut self, name: &str, addr: u32) -> Option<u32> {
        self.symbols.insert(name.to_string(), addr)
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.symbols.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols ordered by address, then name.
    pub fn sorted(&self) -> Vec<(&str, u32)> {
        let mut v: Vec<(&str, u32)> = self.symbols.iter().map(|(k, a)| (k.as_str(), *a)).collect();
        v.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)));
        v
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LineKind {
    /// Mode switch; occupies no bytes.
    Directive,
    Instruction(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramLine {
    /// Unit active for this line (the new unit for a directive).
    pub unit: Unit,
    pub kind: LineKind,
    /// Byte address of the first byte this line emits.
    pub addr: u32,
    /// 1-based line number in the assembly source.
    pub line: usize,
}

impl ProgramLine {
    pub fn is_directive(&self) -> bool {
        matches!(self.kind, LineKind::Directive)
    }

    pub fn text(&self) -> &str {
        match &self.kind {
            LineKind::Directive => self.unit.directive(),
            LineKind::Instruction(text) => text,
        }
    }

    /// Opcode byte plus one byte per operand token.
    pub fn size(&self) -> u32 {
        match &self.kind {
            LineKind::Directive => 0,
            LineKind::Instruction(text) => text.split_whitespace().count() as u32,
        }
    }
}

/// Output of pass 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub lines: Vec<ProgramLine>,
    pub symbols: SymbolTable,
}

impl Layout {
    pub fn instructions(&self) -> impl Iterator<Item = &ProgramLine> {
        self.lines.iter().filter(|l| !l.is_directive())
    }

    /// Total bytes pass 2 will emit.
    pub fn size(&self) -> u32 {
        self.lines.iter().map(ProgramLine::size).sum()
    }
}

/// Assembles `source` into bytes. Every call builds its own symbol table.
pub fn assemble(source: &str) -> Result<Vec<u8>, AsmError> {
    let layout = layout(source)?;
    encode(&layout)
}

/// Pass 1: address computation and symbol capture.
pub fn layout(source: &str) -> Result<Layout, AsmError> {
    let mut out = Layout::default();
    let mut addr: u32 = 0;
    let mut unit = Unit::Cpu;

    for (idx, raw) in source.split('\n').enumerate() {
        let line_no = idx + 1;
        let mut s = strip_comment(raw);
        if s.is_empty() {
            continue;
        }

        if let Some(name) = s.strip_prefix('.') {
            unit = match name.to_ascii_uppercase().as_str() {
                "CPU" => Unit::Cpu,
                "GPU" => Unit::Gpu,
                _ => return Err(AsmError::UnknownDirective(s.to_string())),
            };
            debug!(line = line_no, %unit, "mode directive");
            out.lines.push(ProgramLine { unit, kind: LineKind::Directive, addr, line: line_no });
            continue;
        }

        if let Some((label, rest)) = s.split_once(':') {
            let label = label.trim();
            if let Some(prev) = out.symbols.define(label, addr) {
                warn!(line = line_no, label, prev, addr, "label redefined");
            }
            if addr > u8::MAX as u32 {
                warn!(line = line_no, label, addr, "label address does not fit in one byte");
            }
            s = rest.trim();
            if s.is_empty() {
                continue;
            }
        }

        let pl = ProgramLine {
            unit,
            kind: LineKind::Instruction(s.to_string()),
            addr,
            line: line_no,
        };
        addr += pl.size();
        out.lines.push(pl);
    }

    debug!(lines = out.lines.len(), symbols = out.symbols.len(), size = addr, "layout done");
    Ok(out)
}

/// Pass 2: encoding.
pub fn encode(layout: &Layout) -> Result<Vec<u8>, AsmError> {
    let mut out = Vec::with_capacity(layout.size() as usize);
    for pl in &layout.lines {
        match &pl.kind {
            LineKind::Directive => debug!(line = pl.line, unit = %pl.unit, "switch unit"),
            LineKind::Instruction(text) => encode_instruction(pl.unit, text, &layout.symbols, &mut out)?,
        }
    }
    Ok(out)
}

/// Encodes one instruction line for `unit`, appending to `out`.
pub fn encode_instruction(
    unit: Unit,
    text: &str,
    symbols: &SymbolTable,
    out: &mut Vec<u8>,
) -> Result<(), AsmError> {
    let mut parts = text.split_whitespace();
    let Some(first) = parts.next() else { return Ok(()) };
    let mnemonic = first.to_ascii_uppercase();
    let opcode = table_for(unit)
        .opcode(&mnemonic)
        .ok_or_else(|| AsmError::UnknownInstruction(unit, mnemonic.clone()))?;
    out.push(opcode);

    for operand in parts {
        out.push(encode_operand(operand, symbols)?);
    }
    Ok(())
}

fn encode_operand(token: &str, symbols: &SymbolTable) -> Result<u8, AsmError> {
    if let Some(value) = parse_number(token) {
        return u8::try_from(value).map_err(|_| AsmError::OperandOutOfRange(token.to_string()));
    }
    match symbols.get(token) {
        // Single-byte operands; addresses past 0xFF wrap.
        Some(addr) => Ok(addr as u8),
        None => Err(AsmError::UnknownOperand(token.to_string())),
    }
}

/// Parses a decimal, `0x` hexadecimal or `0b` binary literal. Literals too
/// large for `u64` saturate so they still report as out of range.
pub fn parse_number(token: &str) -> Option<u64> {
    let (digits, radix) = if let Some(hex) = token.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(bin) = token.strip_prefix("0b") {
        (bin, 2)
    } else {
        (token, 10)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    Some(u64::from_str_radix(digits, radix).unwrap_or(u64::MAX))
}

fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(p) => line[..p].trim(),
        None => line.trim(),
    }
}
