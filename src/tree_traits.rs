//! Conversion of a `FamilyTree` into a `termtree` for connector-style output.

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::arena::FamilyTree;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for FamilyTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        match self.root().and_then(|root| self.get_node(root).map(|node| (root, node))) {
            Some((root_idx, root)) => {
                let mut tree = Tree::new(root.data.name.clone());

                fn build_tree(family: &FamilyTree, node_idx: Index, parent_tree: &mut Tree<String>) {
                    if let Some(node) = family.get_node(node_idx) {
                        for &child_idx in &node.children {
                            if let Some(child) = family.get_node(child_idx) {
                                let mut child_tree = Tree::new(child.data.name.clone());
                                build_tree(family, child_idx, &mut child_tree);
                                parent_tree.push(child_tree);
                            }
                        }
                    }
                }

                build_tree(self, root_idx, &mut tree);
                tree
            }
            None => Tree::new("Empty tree".to_string()),
        }
    }
}
