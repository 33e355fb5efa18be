use serde::Serialize;
use std::fmt::Write as _;

use duocore_rs::assembler::{encode, layout, AsmError, Layout};
use duocore_rs::Unit;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolKV {
    pub name: String,
    pub addr: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRow {
    pub line: usize,
    pub addr: u32,
    pub unit: Unit,
    pub bytes: Vec<u8>,
    pub source: String,
}

/// Everything the assembler knows about one source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub bytes: Vec<u8>,
    pub symbols: Vec<SymbolKV>,
    pub listing: Vec<ListingRow>,
}

impl Report {
    pub fn from_source(source: &str) -> Result<Self, AsmError> {
        let layout = layout(source)?;
        let bytes = encode(&layout)?;
        Ok(Self::from_parts(&layout, bytes))
    }

    fn from_parts(layout: &Layout, bytes: Vec<u8>) -> Self {
        let symbols = layout
            .symbols
            .sorted()
            .into_iter()
            .map(|(name, addr)| SymbolKV { name: name.to_string(), addr })
            .collect();
        let listing = layout
            .lines
            .iter()
            .map(|pl| {
                let start = pl.addr as usize;
                let end = start + pl.size() as usize;
                ListingRow {
                    line: pl.line,
                    addr: pl.addr,
                    unit: pl.unit,
                    bytes: bytes.get(start..end).map(<[u8]>::to_vec).unwrap_or_default(),
                    source: pl.text().to_string(),
                }
            })
            .collect();
        Self { bytes, symbols, listing }
    }

    pub fn render_symbols(&self) -> String {
        let mut buf = String::new();
        for s in &self.symbols {
            let _ = writeln!(buf, "{:#06x}  {}", s.addr, s.name);
        }
        buf
    }

    /// `<addr>: <bytes>  <unit> <source>`; directives show no bytes.
    pub fn render_listing(&self, show_bytes: bool) -> String {
        let mut buf = String::new();
        for row in &self.listing {
            let _ = write!(buf, "{:#06x}: ", row.addr);
            if show_bytes {
                let hex: Vec<String> = row.bytes.iter().map(|b| format!("{b:02x}")).collect();
                let _ = write!(buf, "{:<12}", hex.join(" "));
            }
            let _ = writeln!(buf, "{} {}", row.unit, row.source);
        }
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SRC: &str = "start: LDA 1\n.GPU\nloop: RECT 2 3\n.CPU\nJMP loop\n";

    #[test]
    fn listing_slices_bytes_per_line() {
        let r = Report::from_source(SRC).unwrap();
        assert_eq!(r.bytes, vec![0x01, 1, 0x07, 2, 3, 0x05, 2]);
        let per_line: Vec<Vec<u8>> = r.listing.iter().map(|row| row.bytes.clone()).collect();
        assert_eq!(
            per_line,
            vec![vec![0x01, 1], vec![], vec![0x07, 2, 3], vec![], vec![0x05, 2]]
        );
        assert_eq!(r.listing[2].unit, Unit::Gpu);
        assert_eq!(r.listing[2].line, 3);
    }

    #[test]
    fn symbols_sorted_by_address() {
        let r = Report::from_source(SRC).unwrap();
        assert_eq!(
            r.symbols,
            vec![
                SymbolKV { name: "start".into(), addr: 0 },
                SymbolKV { name: "loop".into(), addr: 2 },
            ]
        );
        assert_eq!(r.render_symbols(), "0x0000  start\n0x0002  loop\n");
    }

    #[test]
    fn listing_text() {
        let r = Report::from_source("NOP\n.GPU\nCLEAR").unwrap();
        assert_eq!(r.render_listing(false), "0x0000: CPU NOP\n0x0001: GPU .GPU\n0x0001: GPU CLEAR\n");
    }

    #[test]
    fn errors_propagate() {
        assert_eq!(
            Report::from_source("FOO").unwrap_err(),
            AsmError::UnknownInstruction(Unit::Cpu, "FOO".into())
        );
    }
}
