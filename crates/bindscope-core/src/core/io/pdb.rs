use crate::core::io::traits::StructureFile;
use crate::core::models::atom::{Atom, infer_element};
use crate::core::models::builder::{BuildError, HetField, ResidueSlot, StructureBuilder};
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// ATOM/HETATM records must reach at least the end of the z coordinate (column 54).
const MIN_ATOM_RECORD_LEN: usize = 54;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("No model found in PDB input (no ATOM/HETATM records)")]
    NoModel,
    #[error("Inconsistent structure: {0}")]
    Build(#[from] BuildError),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn column_char(line: &str, index: usize) -> Option<char> {
    line.get(index..index + 1)
        .and_then(|s| s.chars().next())
        .filter(|c| !c.is_whitespace())
}

fn parse_coordinate(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

/// Reader and writer for the fixed-column PDB coordinate format.
///
/// Only the first model is read. Atoms are grouped into residues by heteroflag,
/// sequence number and insertion code, and into chains by chain identifier; a chain
/// identifier that re-appears after a `TER` continues the same chain.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error> {
        let mut builder = StructureBuilder::new();
        let mut atom_records = 0usize;

        let mut current_chain: Option<String> = None;
        let mut current_residue: Option<ResidueSlot> = None;

        for (line_num, line_res) in reader.split(b'\n').enumerate() {
            let raw = line_res?;
            let line = String::from_utf8_lossy(&raw);
            let line = line.trim_end_matches('\r');
            let line_num = line_num + 1;

            let record_type = slice_and_trim(line, 0, 6);
            match record_type {
                "ATOM" | "HETATM" => {}
                "ENDMDL" | "END" => break,
                _ => continue,
            }

            if line.len() < MIN_ATOM_RECORD_LEN {
                return Err(PdbError::Parse {
                    line: line_num,
                    kind: PdbParseErrorKind::LineTooShort,
                });
            }
            atom_records += 1;

            let hetero = record_type == "HETATM";
            let serial_str = slice_and_trim(line, 6, 11);
            let name_str = slice_and_trim(line, 12, 16);
            let res_name_str = slice_and_trim(line, 17, 20);
            let chain_id_str = line.get(21..22).unwrap_or(" ");
            let res_seq_str = slice_and_trim(line, 22, 26);
            let element_str = slice_and_trim(line, 76, 78);

            if name_str.is_empty() {
                return Err(PdbError::Parse {
                    line: line_num,
                    kind: PdbParseErrorKind::MissingRequiredField {
                        columns: "13-16".into(),
                    },
                });
            }
            // Serial numbers beyond 99999 are written in hybrid-36 by some tools; they
            // only label atoms, so fall back to the record index.
            let serial: usize = serial_str.parse().unwrap_or(atom_records);
            let res_seq: isize = res_seq_str.parse().map_err(|_| PdbError::Parse {
                line: line_num,
                kind: PdbParseErrorKind::InvalidInt {
                    columns: "23-26".into(),
                    value: res_seq_str.into(),
                },
            })?;
            let x = parse_coordinate(line, line_num, 30, 38)?;
            let y = parse_coordinate(line, line_num, 38, 46)?;
            let z = parse_coordinate(line, line_num, 46, 54)?;

            let element = if element_str.is_empty() {
                infer_element(name_str)
            } else {
                element_str.to_string()
            };
            let insertion_code = column_char(line, 26);

            if current_chain.as_deref() != Some(chain_id_str) {
                builder.start_chain(chain_id_str);
                current_chain = Some(chain_id_str.to_string());
                current_residue = None;
            }
            let residue_slot = (HetField::new(res_name_str, hetero), res_seq, insertion_code);
            if current_residue.as_ref() != Some(&residue_slot) {
                builder.start_residue(res_seq, insertion_code, res_name_str, hetero)?;
                current_residue = Some(residue_slot);
            }

            let mut atom = Atom::new(serial, name_str, &element, Point3::new(x, y, z));
            atom.alt_loc = column_char(line, 16);
            builder.add_atom(atom)?;
        }

        if atom_records == 0 {
            return Err(PdbError::NoModel);
        }
        Ok(builder.build())
    }

    fn write_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error> {
        for chain in structure.chains() {
            let chain_char = chain.id.chars().next().unwrap_or(' ');
            for residue in chain.residues() {
                let record_type = if residue.hetero { "HETATM" } else { "ATOM" };
                for atom in residue.atoms() {
                    let name_field = if atom.name.len() < 4 && atom.element.len() == 1 {
                        format!(" {:<3}", atom.name)
                    } else {
                        format!("{:<4}", atom.name)
                    };
                    writeln!(
                        writer,
                        "{:<6}{:>5} {}{}{:>3} {}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
                        record_type,
                        atom.serial,
                        name_field,
                        atom.alt_loc.unwrap_or(' '),
                        residue.name,
                        chain_char,
                        residue.seq,
                        residue.insertion_code.unwrap_or(' '),
                        atom.position.x,
                        atom.position.y,
                        atom.position.z,
                        1.0,
                        0.0,
                        atom.element
                    )?;
                }
            }
        }
        writeln!(writer, "END")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_COMPLEX: &str = "\
HEADER    TEST COMPLEX
ATOM      1  N   SER A  10      11.104   6.134  -6.504  1.00  0.00           N
ATOM      2  CA  SER A  10      11.639   6.071  -5.147  1.00  0.00           C
ATOM      3  OG  SER A  10      12.200   7.300  -4.700  1.00  0.00           O
TER
HETATM    4  C1  LIG B 401      14.000   8.000  -4.000  1.00  0.00           C
HETATM    5  O1  LIG B 401      14.500   9.000  -4.200  1.00  0.00           O
HETATM    6  O   HOH B 501      20.000  20.000  20.000  1.00  0.00           O
END
";

    fn read(text: &str) -> Result<Structure, PdbError> {
        PdbFile::read_from_str(text)
    }

    #[test]
    fn reads_chains_residues_and_atoms() {
        let s = read(SMALL_COMPLEX).unwrap();
        assert_eq!(s.chains().len(), 2);
        let labels: Vec<_> = s.residues().map(|r| r.label()).collect();
        assert_eq!(labels, ["A:SER:10", "B:LIG:401", "B:HOH:501"]);
        assert_eq!(s.atom_count(), 6);

        let og = &s.residues().next().unwrap().atoms()[2];
        assert_eq!(og.name, "OG");
        assert_eq!(og.element, "O");
        assert_eq!(og.serial, 3);
        assert!((og.position.x - 12.2).abs() < 1e-9);
    }

    #[test]
    fn heteroflag_follows_record_type() {
        let s = read(SMALL_COMPLEX).unwrap();
        let flags: Vec<_> = s.residues().map(|r| (r.name.clone(), r.hetero)).collect();
        assert_eq!(
            flags,
            [
                ("SER".to_string(), false),
                ("LIG".to_string(), true),
                ("HOH".to_string(), true)
            ]
        );
    }

    #[test]
    fn hetero_groups_sharing_a_number_are_separate_residues() {
        let text = "\
HETATM    1  O   HOH A 301      20.000  20.000  20.000  1.00  0.00           O
HETATM    2  O1  LIG A 301       3.000   0.000   0.000  1.00  0.00           O
HETATM    3  O   LIG A 301       4.000   0.000   0.000  1.00  0.00           O
END
";
        let s = read(text).unwrap();
        let rows: Vec<_> = s.residues().map(|r| (r.label(), r.atom_count())).collect();
        assert_eq!(
            rows,
            [("A:HOH:301".to_string(), 1), ("A:LIG:301".to_string(), 2)]
        );
    }

    #[test]
    fn empty_input_has_no_model() {
        assert!(matches!(read(""), Err(PdbError::NoModel)));
        assert!(matches!(read("HEADER ONLY\nEND\n"), Err(PdbError::NoModel)));
    }

    #[test]
    fn only_first_model_is_read() {
        let text = "\
MODEL        1
ATOM      1  CA  ALA A   1       0.000   0.000   0.000  1.00  0.00           C
ENDMDL
MODEL        2
ATOM      1  CA  ALA A   1       5.000   0.000   0.000  1.00  0.00           C
ATOM      2  CA  GLY A   2       9.000   0.000   0.000  1.00  0.00           C
ENDMDL
";
        let s = read(text).unwrap();
        assert_eq!(s.atom_count(), 1);
        assert_eq!(s.atoms().next().unwrap().position.x, 0.0);
    }

    #[test]
    fn missing_element_column_is_inferred_from_name() {
        let text = "ATOM      1  CA  ALA A   1       0.000   0.000   0.000\n";
        let s = read(text).unwrap();
        assert_eq!(s.atoms().next().unwrap().element, "C");
    }

    #[test]
    fn invalid_coordinate_reports_line_and_columns() {
        let text = "\
REMARK first line
ATOM      1  CA  ALA A   1       0.000    abc    0.000  1.00  0.00           C
";
        match read(text) {
            Err(PdbError::Parse {
                line,
                kind: PdbParseErrorKind::InvalidFloat { columns, value },
            }) => {
                assert_eq!(line, 2);
                assert_eq!(columns, "39-46");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn truncated_atom_record_is_rejected() {
        let text = "ATOM      1  CA  ALA A   1       0.000   0.000\n";
        assert!(matches!(
            read(text),
            Err(PdbError::Parse {
                line: 1,
                kind: PdbParseErrorKind::LineTooShort
            })
        ));
    }

    #[test]
    fn alternate_locations_keep_first_conformer() {
        let text = "\
ATOM      1  OG ASER A   5       1.000   0.000   0.000  0.60  0.00           O
ATOM      2  OG BSER A   5       2.000   0.000   0.000  0.40  0.00           O
";
        let s = read(text).unwrap();
        assert_eq!(s.atom_count(), 1);
        let og = s.atoms().next().unwrap();
        assert_eq!(og.alt_loc, Some('A'));
        assert_eq!(og.position.x, 1.0);
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let text = SMALL_COMPLEX.replace('\n', "\r\n");
        assert_eq!(read(&text).unwrap().atom_count(), 6);
    }

    #[test]
    fn written_structure_reads_back_identically() {
        let original = read(SMALL_COMPLEX).unwrap();
        let text = PdbFile::write_to_string(&original).unwrap();
        assert!(text.starts_with("ATOM      1  N   SER A  10"));
        assert!(text.trim_end().ends_with("END"));
        let reread = read(&text).unwrap();
        assert_eq!(reread, original);
    }
}
