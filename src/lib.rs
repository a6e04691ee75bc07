//! Family trees from `PARENT:CHILD1,CHILD2,...` declaration lines, with
//! most-recent-common-ancestor queries.
//!
//! ```
//! use famtree::builder::TreeBuilder;
//! use famtree::query::most_recent_common_ancestor;
//!
//! let tree = TreeBuilder::build_from_lines(["A:B,C", "B:D,E", "C:F"]).unwrap();
//! let mrca = most_recent_common_ancestor(&tree, "D", "F").unwrap();
//! assert_eq!(mrca.and_then(|idx| tree.name(idx)), Some("A"));
//! ```

pub mod arena;
pub mod builder;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod query;
pub mod tree_traits;
pub mod util;

pub use arena::FamilyTree;
pub use builder::TreeBuilder;
pub use errors::{QueryOperand, TreeError, TreeResult};
