use duocore_rs::assembler::layout;
use duocore_rs::{assemble, build, compile, AsmError, Compiler, CompilerConfig, Unit};
use pretty_assertions::assert_eq;

#[test]
fn compute_program_to_bytes() {
    let bytes = assemble(&compile("compute\nvar x = 5\n")).unwrap();
    assert_eq!(bytes, vec![0x01, 0x05, 0x04, 0x20, 0xFF]);
}

#[test]
fn draw_program_to_bytes() {
    let bytes = assemble(&compile("draw\nsetpos 10 20\nclear\n")).unwrap();
    assert_eq!(bytes, vec![0x01, 10, 0x02, 20, 0x05, 0xFF]);
}

#[test]
fn byte_count_matches_instruction_sizes() {
    let src = "compute\nvar a = 1\nvar b = 2\ndraw\nclear\nsetcolor 7\nsetpos 3 4\nrect 10 12\n";
    let asm = compile(src);
    let expected: usize = layout(&asm)
        .unwrap()
        .instructions()
        .map(|pl| pl.text().split_whitespace().count())
        .sum();
    assert_eq!(assemble(&asm).unwrap().len(), expected);
    assert_eq!(expected, 2 * 4 + 1 + 2 + 4 + 3 + 1);
}

#[test]
fn build_reports_diagnostics_and_bytes() {
    let out = build(&Compiler::new(CompilerConfig::default()), "draw\nline 1 2\nclear").unwrap();
    assert_eq!(out.assembly, ".GPU\nCLEAR\nGHALT");
    assert_eq!(out.bytes, vec![0x05, 0xFF]);
    assert_eq!(out.diagnostics.len(), 1);
}

#[test]
fn gpu_statement_in_cpu_section_fails_to_assemble() {
    let err = build(&Compiler::new(CompilerConfig::default()), "clear").unwrap_err();
    assert_eq!(err, AsmError::UnknownInstruction(Unit::Cpu, "CLEAR".into()));
}

#[test]
fn oversized_literal_surfaces_from_assembler() {
    let err = assemble(&compile("var x = 300")).unwrap_err();
    assert_eq!(err, AsmError::OperandOutOfRange("300".into()));
    assert_eq!(err.to_string(), "Operand value too large: 300");
}

#[test]
fn variable_slot_past_one_byte_fails_in_assembler() {
    let src: String = (0..0xE1).map(|i| format!("var v{i} = 1\n")).collect();
    let err = assemble(&compile(&src)).unwrap_err();
    assert_eq!(err, AsmError::OperandOutOfRange("0x100".into()));
}
