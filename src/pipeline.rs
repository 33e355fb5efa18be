use serde::Serialize;

use crate::assembler::{self, AsmError};
use crate::compiler::{Compiler, Diagnostic};

/// Result of running source text through both stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Build {
    pub assembly: String,
    pub bytes: Vec<u8>,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn build(compiler: &Compiler, source: &str) -> Result<Build, AsmError> {
    let lowered = compiler.lower(source);
    let bytes = assembler::assemble(&lowered.assembly)?;
    Ok(Build { assembly: lowered.assembly, bytes, diagnostics: lowered.diagnostics })
}
