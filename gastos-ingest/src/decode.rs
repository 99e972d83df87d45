//! Statement file decoding.
//!
//! Bank exports are Windows-1252, not UTF-8; decoding them as anything else
//! garbles accented categories and vendors ("Alimentação").

use std::path::Path;

use encoding_rs::WINDOWS_1252;

use crate::error::{ImportError, Result};

/// Decode raw statement bytes as Windows-1252. No BOM sniffing.
pub fn decode_statement(bytes: &[u8]) -> Result<String> {
    WINDOWS_1252
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or(ImportError::Decode {
            encoding: WINDOWS_1252.name(),
        })
}

/// Read and decode a statement file.
pub fn read_statement_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_statement(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_decodes_latin_accents() {
        // "Alimentação" in Windows-1252
        let bytes = b"Alimenta\xe7\xe3o";
        assert_eq!(decode_statement(bytes).unwrap(), "Alimentação");
    }

    #[test]
    fn test_decodes_windows_specific_range() {
        // 0x80 is the euro sign in Windows-1252 but a C1 control in ISO-8859-1
        assert_eq!(decode_statement(b"\x80 10").unwrap(), "€ 10");
    }

    #[test]
    fn test_empty_input_is_ok() {
        assert_eq!(decode_statement(b"").unwrap(), "");
    }

    #[test]
    fn test_read_missing_file_is_structural_error() {
        let err = read_statement_file("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, ImportError::Read { .. }));
    }

    #[test]
    fn test_read_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"Data;x\n01/03/2024;Padaria S\xe3o Jo\xe3o\n").unwrap();
        let text = read_statement_file(f.path()).unwrap();
        assert!(text.contains("Padaria São João"));
    }
}
