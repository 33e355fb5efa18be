//! Lowering of the high-level drawing/compute language into assembly text.
//!
//! One statement per line. Unknown or malformed lines are dropped and
//! reported through [`Lowered::diagnostics`]; lowering itself never fails.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::unit::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Address of the first variable slot.
    pub variable_base: u8,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self { variable_base: 0x20 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// Line does not start with a known statement keyword.
    UnrecognizedStatement,
    /// Known keyword with the wrong operand shape.
    MalformedStatement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub line: usize,
    pub text: String,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub slot: usize,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Lowered {
    pub assembly: String,
    pub diagnostics: Vec<Diagnostic>,
    pub variables: HashMap<String, Variable>,
}

/// Lowers `source` with the default configuration.
pub fn compile(source: &str) -> String {
    Compiler::new(CompilerConfig::default()).lower(source).assembly
}

#[derive(Debug, Clone)]
pub struct Compiler {
    cfg: CompilerConfig,
}

enum Stmt<'a> {
    Unit(Unit),
    Var { name: &'a str, value: &'a str },
    SetPos { x: &'a str, y: &'a str },
    Clear,
    SetColor(&'a str),
    Rect { w: &'a str, h: &'a str },
}

impl Compiler {
    pub fn new(cfg: CompilerConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.cfg
    }

    pub fn lower(&self, source: &str) -> Lowered {
        let mut out: Vec<String> = Vec::new();
        let mut diagnostics = Vec::new();
        let mut variables: HashMap<String, Variable> = HashMap::new();
        let mut unit = Unit::Cpu;

        for (idx, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let stmt = match parse_stmt(line) {
                Ok(stmt) => stmt,
                Err(kind) => {
                    warn!(line = idx + 1, text = line, ?kind, "dropping statement");
                    diagnostics.push(Diagnostic { line: idx + 1, text: line.to_string(), kind });
                    continue;
                }
            };
            match stmt {
                Stmt::Unit(u) => {
                    unit = u;
                    out.push(u.directive().to_string());
                }
                Stmt::Var { name, value } => {
                    let next = variables.len();
                    let slot = variables
                        .entry(name.to_string())
                        .and_modify(|v| v.value = value.to_string())
                        .or_insert_with(|| Variable { slot: next, value: value.to_string() })
                        .slot;
                    // Slots past 0xFF still lower; the assembler rejects them.
                    let addr = usize::from(self.cfg.variable_base) + slot;
                    debug!(name, slot, addr, "variable");
                    out.push(format!("LDA {value}"));
                    out.push(format!("STA {addr:#x}"));
                }
                Stmt::SetPos { x, y } => {
                    out.push(format!("SETX {x}"));
                    out.push(format!("SETY {y}"));
                }
                Stmt::Clear => out.push("CLEAR".into()),
                Stmt::SetColor(c) => out.push(format!("SETC {c}")),
                Stmt::Rect { w, h } => out.push(format!("RECT {w} {h}")),
            }
        }

        out.push(unit.halt_mnemonic().to_string());
        Lowered { assembly: out.join("\n"), diagnostics, variables }
    }
}

fn parse_stmt(line: &str) -> Result<Stmt<'_>, DiagnosticKind> {
    use DiagnosticKind::*;
    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((k, r)) => (k, r.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let stmt = match (keyword, args.as_slice()) {
        ("compute", &[]) => Stmt::Unit(Unit::Cpu),
        ("draw", &[]) => Stmt::Unit(Unit::Gpu),
        ("clear", &[]) => Stmt::Clear,
        ("setpos", &[x, y]) => Stmt::SetPos { x, y },
        ("setcolor", &[c]) => Stmt::SetColor(c),
        ("rect", &[w, h]) => Stmt::Rect { w, h },
        ("var", _) => return parse_var(rest),
        ("compute" | "draw" | "clear" | "setpos" | "setcolor" | "rect", _) => {
            return Err(MalformedStatement)
        }
        _ => return Err(UnrecognizedStatement),
    };
    Ok(stmt)
}

// `<name> = <value>` after the `var` keyword, spaces around `=` optional.
fn parse_var(rest: &str) -> Result<Stmt<'_>, DiagnosticKind> {
    let (name, value) = rest.split_once('=').ok_or(DiagnosticKind::MalformedStatement)?;
    let (name, value) = (name.trim(), value.trim());
    let single = |s: &str| !s.is_empty() && !s.contains(char::is_whitespace);
    if !single(name) || !single(value) {
        return Err(DiagnosticKind::MalformedStatement);
    }
    Ok(Stmt::Var { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_forms() {
        assert!(matches!(parse_stmt("var x = 5"), Ok(Stmt::Var { name: "x", value: "5" })));
        assert!(matches!(parse_stmt("var x=5"), Ok(Stmt::Var { name: "x", value: "5" })));
        assert!(matches!(parse_stmt("var x 5"), Err(DiagnosticKind::MalformedStatement)));
        assert!(matches!(parse_stmt("var = 5"), Err(DiagnosticKind::MalformedStatement)));
        assert!(matches!(parse_stmt("var"), Err(DiagnosticKind::MalformedStatement)));
        assert!(matches!(parse_stmt("variable = 5"), Err(DiagnosticKind::UnrecognizedStatement)));
    }

    #[test]
    fn arity_is_checked() {
        assert!(matches!(parse_stmt("setpos 1"), Err(DiagnosticKind::MalformedStatement)));
        assert!(matches!(parse_stmt("clear now"), Err(DiagnosticKind::MalformedStatement)));
        assert!(matches!(parse_stmt("z = x + y"), Err(DiagnosticKind::UnrecognizedStatement)));
    }

    #[test]
    fn trailing_text_is_not_a_comment() {
        assert!(matches!(parse_stmt("clear # wipe"), Err(DiagnosticKind::MalformedStatement)));
        assert!(matches!(parse_stmt("# nothing"), Err(DiagnosticKind::UnrecognizedStatement)));
        assert!(matches!(parse_stmt("plot"), Err(DiagnosticKind::UnrecognizedStatement)));
    }
}
