use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::errors::{TreeError, TreeResult};

/// Data payload for tree nodes representing family members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Label as declared in the input, used for lookup
    pub name: String,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Tree node in the arena-based family hierarchy.
#[derive(Debug)]
pub struct TreeNode {
    /// Family member data for this node
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root and detached nodes
    pub parent: Option<Index>,
    /// Indices of child nodes in declaration order
    pub children: Vec<Index>,
}

/// Arena-based family tree.
///
/// All nodes live in one generational arena owned by the tree; parent and
/// child links are plain indices into it. Ownership flows from the root down,
/// the `parent` index is only used to walk upwards.
///
/// A tree is built once (see [`crate::builder::TreeBuilder`]) and then read.
/// There is no removal or re-parenting.
#[derive(Debug)]
pub struct FamilyTree {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the root node, None until the first declaration is processed
    root: Option<Index>,
}

impl Default for FamilyTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FamilyTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Allocates a detached node: no parent, no children.
    #[instrument(level = "trace", skip(self))]
    pub fn create_node(&mut self, label: &str) -> Index {
        self.arena.insert(TreeNode {
            data: NodeData {
                name: label.to_string(),
            },
            parent: None,
            children: Vec::new(),
        })
    }

    /// Appends `child` to the children of `parent` and links it back.
    ///
    /// `child` must not be attached anywhere yet. This is only checked in
    /// debug builds; the builder always passes freshly created nodes.
    #[instrument(level = "trace", skip(self))]
    pub fn attach_child(&mut self, parent: Index, child: Index) -> TreeResult<()> {
        if !self.arena.contains(parent) {
            return Err(TreeError::InternalError(format!(
                "stale parent index: {:?}",
                parent
            )));
        }
        let child_node = self
            .arena
            .get_mut(child)
            .ok_or_else(|| TreeError::InternalError(format!("stale child index: {:?}", child)))?;
        debug_assert!(child_node.parent.is_none(), "child is already attached");
        child_node.parent = Some(parent);

        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.push(child);
        }
        Ok(())
    }

    /// Installs `idx` as the root. The root can be set exactly once.
    #[instrument(level = "trace", skip(self))]
    pub fn set_root(&mut self, idx: Index) -> TreeResult<()> {
        if self.root.is_some() {
            return Err(TreeError::InternalError("root is already set".to_string()));
        }
        if !self.arena.contains(idx) {
            return Err(TreeError::InternalError(format!("stale root index: {:?}", idx)));
        }
        self.root = Some(idx);
        Ok(())
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn name(&self, idx: Index) -> Option<&str> {
        self.arena.get(idx).map(|node| node.data.name.as_str())
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    /// Number of nodes, including any that were never attached.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order traversal from the root.
    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self, self.root)
    }

    /// Pre-order traversal of the subtree at `start`; depths are relative to `start`.
    pub fn iter_from(&self, start: Index) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self, Some(start))
    }

    /// Searches the subtree at `start` for a node named `wanted`.
    ///
    /// Pre-order: `start` itself first, then each child subtree in declaration
    /// order. With duplicate names the first node reached this way wins.
    #[instrument(level = "trace", skip(self))]
    pub fn find_by_name(&self, start: Index, wanted: &str) -> Option<Index> {
        self.iter_from(start)
            .find(|(_, node, _)| node.data.name == wanted)
            .map(|(idx, _, _)| idx)
    }

    /// [`FamilyTree::find_by_name`] starting at the root. Empty trees find nothing.
    #[instrument(level = "debug", skip(self))]
    pub fn find(&self, wanted: &str) -> Option<Index> {
        self.root.and_then(|root| self.find_by_name(root, wanted))
    }

    /// Strict ancestors of `idx`, nearest first, root last. Empty for the root.
    #[instrument(level = "trace", skip(self))]
    pub fn ancestor_chain(&self, idx: Index) -> Vec<Index> {
        let mut ancestors = Vec::new();
        let mut current = self.get_node(idx).and_then(|node| node.parent);
        while let Some(ancestor_idx) = current {
            ancestors.push(ancestor_idx);
            current = self.get_node(ancestor_idx).and_then(|node| node.parent);
        }
        ancestors
    }

    /// Distance from the root; the root has depth 0.
    pub fn depth_of(&self, idx: Index) -> usize {
        self.ancestor_chain(idx).len()
    }

    /// Number of levels in the tree, 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> usize {
        self.iter().map(|(_, _, depth)| depth + 1).max().unwrap_or(0)
    }

    /// Names of all nodes without children, in pre-order.
    pub fn leaf_names(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node, _)| node.children.is_empty())
            .map(|(_, node, _)| node.data.name.clone())
            .collect()
    }

    /// Indented dump of the subtree at `idx`, one line per node.
    ///
    /// Each line is indented by two spaces per level, starting at `depth`.
    pub fn render(&self, idx: Index, depth: usize) -> String {
        let mut out = String::new();
        for (_, node, rel_depth) in self.iter_from(idx) {
            out.push_str(&"  ".repeat(depth + rel_depth));
            out.push_str(&node.data.name);
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for FamilyTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Family Tree:\n\n")?;
        if let Some(root) = self.root {
            write!(f, "{}", self.render(root, 0))?;
        }
        Ok(())
    }
}

/// Stack-based pre-order iterator yielding `(index, node, depth)`.
pub struct PreOrderIterator<'a> {
    tree: &'a FamilyTree,
    stack: Vec<(Index, usize)>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a FamilyTree, start: Option<Index>) -> Self {
        let stack = start.map(|idx| vec![(idx, 0)]).unwrap_or_default();
        Self { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a TreeNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, depth)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((current_idx, node, depth));
            }
        }
        None
    }
}
