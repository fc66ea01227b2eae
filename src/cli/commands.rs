use std::path::Path;

use anyhow::Result;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::loader;
use crate::node::TreeNode;
use crate::scaffold::write_scaffold;

pub fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Some(Commands::Tree { source_path }) => _tree(source_path),
        Some(Commands::Leaves { source_path }) => _leaves(source_path),
        Some(Commands::Check { source_path }) => _check(source_path),
        Some(Commands::Scaffold {
            source_path,
            output,
        }) => _scaffold(source_path, output),
        None => Ok(()),
    }
}

#[instrument]
fn _tree(source_path: &Path) -> Result<()> {
    let root = loader::load_file(source_path)?;
    println!("{}", to_tree_string(&root));
    Ok(())
}

#[instrument]
fn _leaves(source_path: &Path) -> Result<()> {
    let root = loader::load_file(source_path)?;
    for leaf in root.leaf_names() {
        println!("{}", leaf);
    }
    Ok(())
}

#[instrument]
fn _check(source_path: &Path) -> Result<()> {
    let root = loader::load_file(source_path)?;
    let node_count = root.iter().count();
    debug!(node_count, depth = root.depth(), "source is well formed");
    println!(
        "{}: {} nodes, depth {}",
        source_path.display(),
        node_count,
        root.depth()
    );
    Ok(())
}

#[instrument]
fn _scaffold(source_path: &Path, output: &Path) -> Result<()> {
    let root = loader::load_file(source_path)?;
    write_scaffold(&root, output)?;
    println!("wrote {}", output.display());
    Ok(())
}

fn to_tree_string(node: &TreeNode) -> Tree<String> {
    let leaves: Vec<_> = node.children.iter().map(to_tree_string).collect();
    Tree::new(node.name.clone()).with_leaves(leaves)
}
