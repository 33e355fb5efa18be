use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Processing unit an instruction is assembled for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Unit {
    #[default]
    Cpu,
    Gpu,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown unit `{0}` (expected CPU or GPU)")]
pub struct ParseUnitError(pub String);

impl Unit {
    pub fn name(self) -> &'static str {
        match self {
            Unit::Cpu => "CPU",
            Unit::Gpu => "GPU",
        }
    }

    /// Mode directive line that switches the assembler to this unit.
    pub fn directive(self) -> &'static str {
        match self {
            Unit::Cpu => ".CPU",
            Unit::Gpu => ".GPU",
        }
    }

    /// Mnemonic that terminates a program section running on this unit.
    pub fn halt_mnemonic(self) -> &'static str {
        match self {
            Unit::Cpu => "HALT",
            Unit::Gpu => "GHALT",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Unit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CPU" => Ok(Unit::Cpu),
            "GPU" => Ok(Unit::Gpu),
            _ => Err(ParseUnitError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("cpu".parse::<Unit>().unwrap(), Unit::Cpu);
        assert_eq!("Gpu".parse::<Unit>().unwrap(), Unit::Gpu);
        assert!("tpu".parse::<Unit>().is_err());
    }

    #[test]
    fn halt_depends_on_unit() {
        assert_eq!(Unit::Cpu.halt_mnemonic(), "HALT");
        assert_eq!(Unit::Gpu.halt_mnemonic(), "GHALT");
        assert_eq!(Unit::default(), Unit::Cpu);
    }
}
