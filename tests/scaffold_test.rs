//! Tests for placeholder check-module generation.

use tempfile::TempDir;

use rsdiag::loader::from_text;
use rsdiag::scaffold::{scaffold_module, write_scaffold};
use rsdiag::ScaffoldError;

const SOURCE: &str = "\
Rootnode
    Subnode1
        Subnode11
    Subnode2
";

#[test]
fn given_loaded_tree_when_scaffolding_then_every_node_registered() {
    let root = from_text(SOURCE).unwrap();
    let module = scaffold_module(&root);

    for name in ["Rootnode", "Subnode1", "Subnode11", "Subnode2"] {
        assert!(
            module.contains(&format!("registry.register(\"{name}\"")),
            "missing registration for {name}"
        );
    }
    assert!(module.contains("pub fn register_checks(registry: &mut NodeRegistry)"));
    assert!(module.contains("Err(CheckError::NotImplemented)"));
}

#[test]
fn given_output_path_when_writing_then_file_created_once() {
    let temp = TempDir::new().unwrap();
    let root = from_text(SOURCE).unwrap();
    let path = temp.path().join("checks.rs");

    write_scaffold(&root, &path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("Rootnode"));

    // second write must refuse to clobber user edits
    let err = write_scaffold(&root, &path).unwrap_err();
    assert!(matches!(err, ScaffoldError::AlreadyExists(_)));
}

#[test]
fn given_nested_output_path_when_writing_then_directories_created() {
    let temp = TempDir::new().unwrap();
    let root = from_text(SOURCE).unwrap();
    let path = temp.path().join("generated").join("checks.rs");

    write_scaffold(&root, &path).unwrap();
    assert!(path.exists());
}
