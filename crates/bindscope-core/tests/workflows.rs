use bindscope::core::io::pdb::PdbFile;
use bindscope::core::io::traits::StructureFile;
use bindscope::core::models::atom::Atom;
use bindscope::core::models::builder::StructureBuilder;
use bindscope::engine::config::{DetectionRequest, EngineMode, LigandSelector};
use bindscope::engine::error::EngineError;
use bindscope::engine::external::record::BindingSiteReport;
use bindscope::engine::external::tool::{InteractionTool, ProcessTool, ToolError};
use bindscope::engine::interaction::{EngineKind, InteractionKind};
use bindscope::workflows::compare::{self, CompareOptions, ComplexInput};
use bindscope::workflows::{detect, inspect};
use nalgebra::Point3;
use std::collections::BTreeSet;
use std::path::Path;

struct UnavailableTool;

impl InteractionTool for UnavailableTool {
    fn analyze(&self, _: &Path) -> Result<BindingSiteReport, ToolError> {
        Err(ToolError::Unavailable {
            program: "plip-bridge".into(),
            reason: "not installed".into(),
        })
    }
}

struct Fixture {
    builder: StructureBuilder,
    serial: usize,
}

impl Fixture {
    fn new() -> Self {
        Self {
            builder: StructureBuilder::new(),
            serial: 0,
        }
    }

    fn chain(mut self, id: &str) -> Self {
        self.builder.start_chain(id);
        self
    }

    fn residue(mut self, seq: isize, name: &str, hetero: bool, atoms: &[(&str, &str, [f64; 3])]) -> Self {
        self.builder.start_residue(seq, None, name, hetero).unwrap();
        for (atom_name, element, [x, y, z]) in atoms {
            self.serial += 1;
            self.builder
                .add_atom(Atom::new(self.serial, atom_name, element, Point3::new(*x, *y, *z)))
                .unwrap();
        }
        self
    }

    fn ligand(self, seq: isize, name: &str, count: usize, origin: [f64; 3]) -> Self {
        let names: Vec<String> = (0..count).map(|i| format!("C{i}")).collect();
        let atoms: Vec<(&str, &str, [f64; 3])> = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.as_str(), "C", [origin[0] + 1.5 * i as f64, origin[1], origin[2]]))
            .collect();
        self.residue(seq, name, true, &atoms)
    }

    fn pdb(self) -> String {
        PdbFile::write_to_string(&self.builder.build()).unwrap()
    }
}

/// A serine whose backbone O sits 3.0 Å from one atom of a ten-atom ligand.
fn serine_scenario() -> String {
    let mut ligand: Vec<(String, &str, [f64; 3])> = vec![("O1".into(), "O", [3.0, 0.0, 0.0])];
    for i in 0..9 {
        ligand.push((format!("C{i}"), "C", [30.0 + 1.5 * i as f64, 0.0, 0.0]));
    }
    let ligand: Vec<(&str, &str, [f64; 3])> =
        ligand.iter().map(|(n, e, p)| (n.as_str(), *e, *p)).collect();

    Fixture::new()
        .chain("A")
        .residue(
            10,
            "SER",
            false,
            &[
                ("N", "N", [-12.0, 0.0, 0.0]),
                ("CA", "C", [-11.0, 0.0, 0.0]),
                ("C", "C", [-10.0, 0.0, 0.0]),
                ("O", "O", [0.0, 0.0, 0.0]),
                ("OG", "O", [-10.0, 5.0, 0.0]),
            ],
        )
        .chain("B")
        .residue(401, "LIG", true, &ligand)
        .pdb()
}

/// A small pocket lined by five residues around a ligand at the origin. `variant`
/// moves one residue away and another one in, so two variants share only part of the
/// pocket.
fn pocket(variant: bool) -> String {
    let far = [40.0, 40.0, 40.0];
    let (leu_pos, lys_pos) = if variant { (far, [0.0, 3.8, 0.0]) } else { ([0.0, 3.9, 0.0], far) };
    Fixture::new()
        .chain("A")
        .residue(5, "SER", false, &[("OG", "O", [0.0, 0.0, 3.1])])
        .residue(6, "LEU", false, &[("CD1", "C", leu_pos)])
        .residue(7, "PHE", false, &[("CZ", "C", [3.95, 0.0, 0.0])])
        .residue(8, "LYS", false, &[("NZ", "N", lys_pos)])
        .residue(9, "GLY", false, &[("CA", "C", [0.0, -3.7, 0.0])])
        .chain("L")
        .residue(1, "LIG", true, &[("O1", "O", [0.0, 0.0, 0.0])])
        .pdb()
}

fn heuristic_request() -> DetectionRequest {
    DetectionRequest {
        mode: EngineMode::ForcedHeuristic,
        ..DetectionRequest::default()
    }
}

#[test]
fn serine_oxygen_at_three_angstroms_is_one_hydrogen_bond() {
    let text = serine_scenario();
    let result = detect::run(&text, &heuristic_request(), &UnavailableTool).unwrap();

    assert_eq!(result.interaction_count, 1);
    let interaction = &result.interactions[0];
    assert_eq!(interaction.kind, InteractionKind::HydrogenBondLike);
    assert_eq!(interaction.receptor_chain, "A");
    assert_eq!(interaction.receptor_atom, "O");
    assert_eq!(interaction.ligand_resname, "LIG");
    assert_eq!(interaction.distance, 3.0);
    assert_eq!(result.ligand.name, "LIG");
    assert_eq!(result.ligand.chain.as_deref(), Some("B"));
}

#[test]
fn autodetect_prefers_twelve_atom_group_over_five() {
    let text = Fixture::new()
        .chain("A")
        .residue(1, "ALA", false, &[("CB", "C", [0.0, 0.0, 0.0])])
        .chain("B")
        .ligand(301, "SML", 5, [3.0, 0.0, 0.0])
        .chain("C")
        .ligand(401, "BIG", 12, [0.0, 3.5, 0.0])
        .pdb();
    let result = detect::run(&text, &heuristic_request(), &UnavailableTool).unwrap();
    assert_eq!(result.ligand.name, "BIG");
    assert_eq!(result.ligand.chain.as_deref(), Some("C"));
    assert_eq!(result.ligand.residues, ["C:BIG:401"]);
}

#[test]
fn interactions_are_sorted_by_distance() {
    let result = detect::run(&pocket(false), &heuristic_request(), &UnavailableTool).unwrap();
    assert!(result.interaction_count >= 4);
    assert!(
        result
            .interactions
            .windows(2)
            .all(|w| w[0].distance <= w[1].distance)
    );
}

#[test]
fn comparing_a_complex_with_itself_shares_every_signature() {
    let text = pocket(false);
    let options = CompareOptions {
        mode: EngineMode::ForcedHeuristic,
        ..CompareOptions::default()
    };
    let cmp = compare::run(
        ComplexInput::new(&text, LigandSelector::autodetect()),
        ComplexInput::new(&text, LigandSelector::autodetect()),
        &options,
        &UnavailableTool,
    )
    .unwrap();

    assert!(cmp.only_in_complex_1.is_empty());
    assert!(cmp.only_in_complex_2.is_empty());

    let detected = detect::run(&text, &heuristic_request(), &UnavailableTool).unwrap();
    let expected: BTreeSet<String> = detected
        .interactions
        .iter()
        .map(|i| i.signature_key())
        .collect();
    let shared: BTreeSet<String> = cmp.shared.iter().map(|r| r.signature_key.clone()).collect();
    assert_eq!(shared, expected);
}

#[test]
fn swapping_inputs_swaps_exclusive_signatures() {
    let (a, b) = (pocket(false), pocket(true));
    let options = CompareOptions {
        mode: EngineMode::ForcedHeuristic,
        ..CompareOptions::default()
    };
    let run = |x: &str, y: &str| {
        compare::run(
            ComplexInput::new(x, LigandSelector::by_name("LIG")),
            ComplexInput::new(y, LigandSelector::by_name("LIG")),
            &options,
            &UnavailableTool,
        )
        .unwrap()
    };
    let ab = run(&a, &b);
    let ba = run(&b, &a);

    assert!(!ab.only_in_complex_1.is_empty());
    assert!(!ab.only_in_complex_2.is_empty());
    assert_eq!(ab.only_in_complex_1, ba.only_in_complex_2);
    assert_eq!(ab.only_in_complex_2, ba.only_in_complex_1);
    assert_eq!(ab.shared, ba.shared);

    let leu = ab
        .only_in_complex_1
        .iter()
        .find(|r| r.receptor_resname == "LEU")
        .unwrap();
    assert_eq!(leu.signature_key, "close_contact|A|6|LEU");
    let lys = ab
        .only_in_complex_2
        .iter()
        .find(|r| r.receptor_resname == "LYS")
        .unwrap();
    assert_eq!(lys.interaction_type, InteractionKind::SaltBridgeLike);
}

#[test]
fn representatives_regroup_under_their_own_signature() {
    let text = pocket(false);
    let cmp = compare::run(
        ComplexInput::new(&text, LigandSelector::autodetect()),
        ComplexInput::new(&pocket(true), LigandSelector::autodetect()),
        &CompareOptions::default(),
        &UnavailableTool,
    )
    .unwrap();
    for (key, interaction) in cmp
        .example_interactions_complex_1
        .iter()
        .chain(&cmp.example_interactions_complex_2)
    {
        assert_eq!(&interaction.signature().key(), key);
    }
    assert_eq!(cmp.complex_1.engine_used, EngineKind::Heuristic);
    assert!(!cmp.complex_2.warnings.is_empty());
}

#[test]
fn unavailable_tool_falls_back_in_auto_and_fails_when_forced() {
    let text = serine_scenario();
    let result = detect::run(&text, &DetectionRequest::default(), &UnavailableTool).unwrap();
    assert_eq!(result.engine_used, EngineKind::Heuristic);
    assert!(!result.warnings.is_empty());

    let forced = DetectionRequest {
        mode: EngineMode::ForcedExternal,
        ..DetectionRequest::default()
    };
    assert!(matches!(
        detect::run(&text, &forced, &UnavailableTool),
        Err(EngineError::EngineUnavailable { .. })
    ));
}

#[test]
fn chain_as_ligand_with_forced_external_is_unsupported() {
    let request = DetectionRequest {
        selector: LigandSelector::chain("B"),
        mode: EngineMode::ForcedExternal,
        ..DetectionRequest::default()
    };
    assert!(matches!(
        detect::run(&serine_scenario(), &request, &UnavailableTool),
        Err(EngineError::UnsupportedSelector)
    ));
}

#[test]
fn empty_text_fails_to_parse_in_every_workflow() {
    assert!(matches!(
        detect::run("", &DetectionRequest::default(), &UnavailableTool),
        Err(EngineError::Parse { .. })
    ));
    assert!(matches!(inspect::run(""), Err(EngineError::Parse { .. })));
    assert!(matches!(
        compare::run(
            ComplexInput::new("", LigandSelector::autodetect()),
            ComplexInput::new(&pocket(false), LigandSelector::autodetect()),
            &CompareOptions::default(),
            &UnavailableTool,
        ),
        Err(EngineError::Parse { .. })
    ));
}

#[test]
fn compare_reports_first_error_when_both_sides_fail() {
    let result = compare::run(
        ComplexInput::new("", LigandSelector::autodetect()),
        ComplexInput::new(&pocket(false), LigandSelector::by_name("NOPE")),
        &CompareOptions::default(),
        &UnavailableTool,
    );
    assert!(matches!(result, Err(EngineError::Parse { .. })));
}

#[test]
fn inspect_classifies_receptor_and_ligand_chains() {
    let report = inspect::run(&pocket(false)).unwrap();
    let roles: Vec<_> = report
        .chains
        .iter()
        .map(|c| serde_json::to_value(c.role_hint).unwrap())
        .collect();
    assert_eq!(roles, ["protein_like", "ligand_like"]);
    assert_eq!(report.het_ligands.len(), 1);
    assert_eq!(report.het_ligands[0].resname, "LIG");
}

#[test]
fn ligand_numbered_like_a_water_is_still_detected() {
    let text = "\
ATOM      1  OG  SER A  10       0.000   0.000   0.000  1.00  0.00           O
HETATM    2  O   HOH A 301      20.000  20.000  20.000  1.00  0.00           O
HETATM    3  O1  LIG A 301       3.000   0.000   0.000  1.00  0.00           O
HETATM    4  C1  LIG A 301      30.000   0.000   0.000  1.00  0.00           C
END
";
    let report = inspect::run(text).unwrap();
    assert_eq!(report.het_ligands.len(), 1);
    assert_eq!(report.het_ligands[0].resname, "LIG");

    let result = detect::run(text, &heuristic_request(), &UnavailableTool).unwrap();
    assert_eq!(result.ligand.name, "LIG");
    assert_eq!(result.interaction_count, 1);
    assert_eq!(result.interactions[0].kind, InteractionKind::HydrogenBondLike);
    assert_eq!(result.interactions[0].ligand_atom, "O1");
}

#[cfg(unix)]
mod process_tool {
    use super::*;

    fn bridge(script: &str) -> ProcessTool {
        ProcessTool::new("sh", vec!["-c".into(), script.into(), "bridge".into()])
    }

    #[test]
    fn external_engine_reads_bridge_output() {
        let tool = bridge(
            r#"test -f "$1" || exit 3
echo '{"LIG:B:401": {"hbonds_ldon": [{"reschain": "A", "restype": "SER", "resnr": 10, "protatom": "O", "ligatom": "O1", "dist": 2.95}]}}'"#,
        );
        let request = DetectionRequest {
            mode: EngineMode::ForcedExternal,
            ..DetectionRequest::default()
        };
        let result = detect::run(&serine_scenario(), &request, &tool).unwrap();
        assert_eq!(result.engine_used, EngineKind::External);
        assert_eq!(result.ligand.residues, ["LIG:B:401"]);
        assert_eq!(result.interactions[0].kind, InteractionKind::HydrogenBond);
        assert_eq!(result.interactions[0].ligand_resseq, 401);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn bridge_without_backend_triggers_fallback() {
        let tool = bridge("echo 'plip is not installed' >&2; exit 127");
        let result = detect::run(&serine_scenario(), &DetectionRequest::default(), &tool).unwrap();
        assert_eq!(result.engine_used, EngineKind::Heuristic);
        assert_eq!(result.interaction_count, 1);
    }

    #[test]
    fn missing_program_triggers_fallback() {
        let tool = ProcessTool::new("bindscope-no-such-bridge", Vec::new());
        let result = detect::run(&serine_scenario(), &DetectionRequest::default(), &tool).unwrap();
        assert_eq!(result.engine_used, EngineKind::Heuristic);
    }
}
