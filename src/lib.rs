pub mod assembler;
pub mod compiler;
pub mod decoder;
pub mod disasm;
pub mod dump;
pub mod instructions;
pub mod pipeline;
pub mod unit;

pub use assembler::{assemble, AsmError, Layout, ProgramLine, SymbolTable};
pub use compiler::{compile, Compiler, CompilerConfig, Diagnostic, DiagnosticKind, Lowered};
pub use pipeline::{build, Build};
pub use unit::Unit;
