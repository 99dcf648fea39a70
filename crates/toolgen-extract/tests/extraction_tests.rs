//! End-to-end extraction and validation tests.

use std::io::Write;
use tempfile::TempDir;
use toolgen_core::{BoundaryRule, InstructionSource};
use toolgen_extract::{Extractor, ScanOptions, SkipReason, Validator};

const FLOW_DOCUMENT: &str = include_str!("fixtures/SLASH_COMMANDS.md");

fn alpha_options() -> ScanOptions {
    ScanOptions {
        command_prefix: "cmd-".to_string(),
        ..ScanOptions::default()
    }
}

// ============================================================================
// Flow document
// ============================================================================

#[test]
fn test_flow_document_records_in_order() {
    let extractor = Extractor::default();
    let document = extractor.parse(FLOW_DOCUMENT);
    let extraction = extractor.extract(&document);

    let names: Vec<&str> = extraction.records.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["/flow-blueprint", "/flow-status", "/flow-task-add"]);

    assert_eq!(extraction.skipped.len(), 2);
    assert_eq!(extraction.skipped[0].name, "/flow-broken");
    assert!(matches!(
        extraction.skipped[0].reason,
        SkipReason::DecodeFailed { .. }
    ));
    assert_eq!(extraction.skipped[1].reason, SkipReason::MissingMetadata);
}

#[test]
fn test_flow_document_fields() {
    let extractor = Extractor::default();
    let extraction = extractor.extract(&extractor.parse(FLOW_DOCUMENT));

    let task_add = &extraction.records[2];
    assert_eq!(task_add.description(), "Add a task to the current phase");
    assert_eq!(task_add.category(), Some("structure"));
    assert_eq!(task_add.command_file(), Some("flow-task-add.md"));
    assert_eq!(task_add.parameters().len(), 3);
    assert_eq!(task_add.parameters()[2].type_name, "list[str] | None");
}

#[test]
fn test_nested_fences_and_headings_stay_in_instructions() {
    let document = Extractor::default().parse(FLOW_DOCUMENT);
    let instructions = document.instructions("/flow-blueprint").unwrap();

    assert!(instructions.contains("## Steps"));
    assert!(instructions.contains("```bash\nmkdir -p .flow\n```\n"));
    assert!(instructions.starts_with("---\ndescription: Create a new PLAN.md"));
}

#[test]
fn test_flow_document_validates() {
    let extractor = Extractor::default();
    let document = extractor.parse(FLOW_DOCUMENT);
    let extraction = extractor.extract(&document);

    let report = Validator::default().validate(&extraction.records, &document);
    assert_eq!(report.checked, 3);
    assert!(!report.has_errors(), "{:?}", report.issues);
}

#[test]
fn test_boundary_rules_differ_on_generic_headings() {
    let text = "## /flow-a\n<!-- MCP_METADATA\ncategory: x\nMCP_METADATA_END -->\n## Details\n---\ndescription: after heading\n---\n";

    let lenient = Extractor::default();
    let extraction = lenient.extract(&lenient.parse(text));
    assert_eq!(extraction.records[0].description(), "after heading");

    let strict = Extractor::new(ScanOptions {
        boundary: BoundaryRule::SameLevel,
        ..ScanOptions::default()
    });
    let extraction = strict.extract(&strict.parse(text));
    assert_eq!(
        extraction.records[0].description(),
        toolgen_core::DEFAULT_DESCRIPTION
    );
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_single_alpha_section() {
    let text = "## cmd-alpha\n<!-- MCP_METADATA\ncategory: x\nparameters: []\nMCP_METADATA_END -->\n---\ndescription: does alpha\n---\n```markdown\nstep 1\n```\n";

    let extractor = Extractor::new(alpha_options());
    let document = extractor.parse(text);
    let extraction = extractor.extract(&document);

    assert_eq!(extraction.records.len(), 1);
    let record = &extraction.records[0];
    assert_eq!(record.name(), "cmd-alpha");
    assert_eq!(record.description(), "does alpha");
    assert_eq!(document.instructions("cmd-alpha").as_deref(), Some("step 1\n"));
}

#[test]
fn test_undecodable_block_is_skipped() {
    let text = "## cmd-alpha\n<!-- MCP_METADATA\n: : :\n  - [\nMCP_METADATA_END -->\n## cmd-beta\n<!-- MCP_METADATA\ncategory: y\nMCP_METADATA_END -->\n";

    let extractor = Extractor::new(alpha_options());
    let extraction = extractor.extract(&extractor.parse(text));

    assert_eq!(extraction.records.len(), 1);
    assert_eq!(extraction.records[0].name(), "cmd-beta");
    assert_eq!(extraction.decode_failures(), 1);
    assert!(extraction.skipped[0].to_error().is_some());
}

#[test]
fn test_yaml_1_1_required_flag_is_decoded() {
    let text = "## cmd-alpha\n<!-- MCP_METADATA\nparameters:\n  - name: title\n    required: yes\n  - name: tags\n    required: no\n    default: None\nMCP_METADATA_END -->\n";

    let extractor = Extractor::new(alpha_options());
    let extraction = extractor.extract(&extractor.parse(text));

    assert!(extraction.skipped.is_empty());
    let params = extraction.records[0].parameters();
    assert!(params[0].required);
    assert!(!params[1].required);
}

#[test]
fn test_missing_instructions_fail_validation() {
    let text = "## cmd-alpha\n<!-- MCP_METADATA\ncategory: x\nMCP_METADATA_END -->\nno fenced block\n";

    let extractor = Extractor::new(alpha_options());
    let document = extractor.parse(text);
    let extraction = extractor.extract(&document);

    let err = Validator::default()
        .validate(&extraction.records, &document)
        .into_result()
        .unwrap_err();
    assert!(err.is_validation_failure());
}

#[test]
fn test_duplicate_names_retained() {
    let text = "## cmd-alpha\n<!-- MCP_METADATA\ncategory: first\nMCP_METADATA_END -->\n## cmd-alpha\n<!-- MCP_METADATA\ncategory: second\nMCP_METADATA_END -->\n";

    let extractor = Extractor::new(alpha_options());
    let extraction = extractor.extract(&extractor.parse(text));

    let categories: Vec<Option<&str>> = extraction.records.iter().map(|r| r.category()).collect();
    assert_eq!(categories, vec![Some("first"), Some("second")]);
}

#[test]
fn test_extract_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("SLASH_COMMANDS.md");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(FLOW_DOCUMENT.as_bytes()).unwrap();

    let (document, extraction) = Extractor::default().extract_file(&path).unwrap();
    assert_eq!(document.path(), Some(path.as_path()));
    assert_eq!(extraction.records.len(), 3);
}

#[test]
fn test_extraction_is_deterministic() {
    let extractor = Extractor::default();
    let first = extractor.extract(&extractor.parse(FLOW_DOCUMENT));
    let second = extractor.extract(&extractor.parse(FLOW_DOCUMENT));
    assert_eq!(first.records, second.records);
    assert_eq!(first.skipped, second.skipped);
}
