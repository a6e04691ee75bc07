use generational_arena::Index;
use std::collections::HashSet;
use tracing::{debug, instrument};

use crate::arena::FamilyTree;
use crate::errors::{QueryOperand, TreeError, TreeResult};

fn resolve(tree: &FamilyTree, name: &str, operand: QueryOperand) -> TreeResult<Index> {
    tree.find(name).ok_or_else(|| TreeError::NodeNotFound {
        operand,
        name: name.to_string(),
    })
}

/// Finds the deepest node that is a strict ancestor of both `name1` and `name2`.
///
/// A node never counts as its own ancestor: for `A:B`, `B:C` the answer for
/// `("C", "B")` is `A`, not `B`. `Ok(None)` means the two chains share nothing,
/// which cannot happen for nodes of one builder-made tree.
#[instrument(level = "debug", skip(tree))]
pub fn most_recent_common_ancestor(
    tree: &FamilyTree,
    name1: &str,
    name2: &str,
) -> TreeResult<Option<Index>> {
    let node1 = resolve(tree, name1, QueryOperand::First)?;
    let node2 = resolve(tree, name2, QueryOperand::Second)?;
    let mrca = common_ancestor(tree, node1, node2);
    debug!("mrca of {:?} and {:?}: {:?}", name1, name2, mrca.and_then(|i| tree.name(i)));
    Ok(mrca)
}

/// First node of `node1`'s ancestor chain that also appears in `node2`'s.
pub fn common_ancestor(tree: &FamilyTree, node1: Index, node2: Index) -> Option<Index> {
    let ancestors_of_2: HashSet<Index> = tree.ancestor_chain(node2).into_iter().collect();
    tree.ancestor_chain(node1)
        .into_iter()
        .find(|candidate| ancestors_of_2.contains(candidate))
}

/// Ancestor chain of the node named `person`, nearest first.
#[instrument(level = "debug", skip(tree))]
pub fn ancestors_of(tree: &FamilyTree, person: &str) -> TreeResult<Vec<Index>> {
    let node = resolve(tree, person, QueryOperand::Subject)?;
    Ok(tree.ancestor_chain(node))
}
