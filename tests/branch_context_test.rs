//! Branch-context inheritance: entries flow strictly parent to child and
//! stay invisible outside the lineage that set them.

use rsdiag::{CheckContext, CheckError, ErrorKind, EvalStatus, Evaluator, NodeRegistry, TreeNode};

fn always_true(_ctx: &mut CheckContext<'_>) -> Result<bool, CheckError> {
    Ok(true)
}

fn sets_marker(ctx: &mut CheckContext<'_>) -> Result<bool, CheckError> {
    ctx.set_branch("marker", "from_setter");
    Ok(true)
}

fn reads_marker(ctx: &mut CheckContext<'_>) -> Result<bool, CheckError> {
    ctx.branch("marker")?;
    Ok(true)
}

/// Root -> Setter -> Reader (lineage: inherits the key)
///      -> Other  -> Cousin (outside lineage: read must fail)
fn lineage_tree() -> TreeNode {
    let mut root = TreeNode::new("Root");
    let mut setter = TreeNode::new("Setter");
    setter.add_child(TreeNode::new("Reader"));
    let mut other = TreeNode::new("Other");
    other.add_child(TreeNode::new("Cousin"));
    root.add_child(setter);
    root.add_child(other);
    root
}

fn lineage_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();
    registry.register("Root", always_true);
    registry.register("Setter", sets_marker);
    registry.register("Reader", reads_marker);
    registry.register("Other", always_true);
    registry.register("Cousin", reads_marker);
    registry
}

#[test]
fn test_descendant_reads_ancestor_entry() {
    let registry = lineage_registry();
    let mut root = lineage_tree();

    Evaluator::new(&registry).evaluate(&mut root);

    let reader = &root.children[0].children[0];
    assert_eq!(reader.status, EvalStatus::True);
    assert_eq!(reader.branch_value("marker"), Some("from_setter"));
}

#[test]
fn test_cousin_outside_lineage_fails_with_branch_key_unset() {
    let registry = lineage_registry();
    let mut root = lineage_tree();

    Evaluator::new(&registry).evaluate(&mut root);

    let cousin = &root.children[1].children[0];
    assert_eq!(cousin.status, EvalStatus::False);
    let record = cousin.error.as_ref().expect("branch read failure recorded");
    assert_eq!(record.kind, ErrorKind::BranchKeyUnset);
    assert!(record.message.contains("Cousin"));
    assert!(record.message.contains("marker"));
}

#[test]
fn test_branch_key_failure_is_ordinary_and_does_not_stop_walk() {
    let registry = lineage_registry();
    let mut root = lineage_tree();

    Evaluator::new(&registry).evaluate(&mut root);

    // every node was reached; only the cousin failed
    assert!(root.iter().all(|n| n.status != EvalStatus::Unevaluated));
    assert_eq!(root.iter().filter(|n| n.is_errored()).count(), 1);
}

#[test]
fn test_child_overwrite_shadows_only_its_own_subtree() {
    let mut registry = NodeRegistry::new();
    registry.register(
        "Root",
        |ctx: &mut CheckContext<'_>| -> Result<bool, CheckError> {
            ctx.set_branch("key", "parent");
            Ok(true)
        },
    );
    registry.register(
        "Overwriter",
        |ctx: &mut CheckContext<'_>| -> Result<bool, CheckError> {
            ctx.set_branch("key", "child");
            Ok(true)
        },
    );
    registry.register("Keeper", always_true);
    registry.register(
        "DeepReader",
        |ctx: &mut CheckContext<'_>| -> Result<bool, CheckError> {
            Ok(ctx.branch("key")? == "child")
        },
    );

    let mut root = TreeNode::new("Root");
    let mut overwriter = TreeNode::new("Overwriter");
    overwriter.add_child(TreeNode::new("DeepReader"));
    root.add_child(overwriter);
    root.add_child(TreeNode::new("Keeper"));

    Evaluator::new(&registry).evaluate(&mut root);

    // the overwriter's subtree sees the shadowed value
    assert_eq!(
        root.children[0].children[0].status,
        EvalStatus::True,
        "deep reader should see the overwritten value"
    );
    // the sibling still sees the parent's value
    assert_eq!(root.children[1].branch_value("key"), Some("parent"));
}
