use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, instrument, trace};

use crate::arena::FamilyTree;
use crate::errors::{TreeError, TreeResult};

/// One parsed declaration line: `PARENT:CHILD1,CHILD2,...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// Everything before the first colon, untrimmed
    pub parent: &'a str,
    /// Comma-separated labels after the colon, each trimmed; empty tokens are kept
    pub children: Vec<&'a str>,
}

/// Splits a declaration line at its first colon. Returns `None` if there is no colon.
pub fn parse_declaration(line: &str) -> Option<Declaration<'_>> {
    let (parent, children) = line.split_once(':')?;
    Some(Declaration {
        parent,
        children: children.split(',').map(str::trim).collect(),
    })
}

/// Constructs a [`FamilyTree`] from declaration lines.
///
/// The first line names the root. Every later line must name a parent that
/// already exists in the tree; its children are appended in list order.
/// A failing line aborts the build, nodes from earlier lines stay in place.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: FamilyTree,
    lines_read: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a whole tree file. The file is closed on return, also on error.
    #[instrument(level = "debug")]
    pub fn build_from_file(path: &Path) -> TreeResult<FamilyTree> {
        let file = File::open(path)
            .map_err(|e| TreeError::io(format!("open {}", path.display()), e))?;
        let mut builder = Self::new();
        builder.add_reader(BufReader::new(file))?;
        debug!(nodes = builder.tree.len(), "built tree from {}", path.display());
        Ok(builder.finish())
    }

    pub fn build_from_lines<I, S>(lines: I) -> TreeResult<FamilyTree>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = Self::new();
        builder.add_lines(lines)?;
        Ok(builder.finish())
    }

    #[instrument(level = "debug", skip(self, reader))]
    pub fn add_reader<R: BufRead>(&mut self, reader: R) -> TreeResult<()> {
        for line in reader.lines() {
            let line = line
                .map_err(|e| TreeError::io(format!("read line {}", self.lines_read + 1), e))?;
            self.add_line(&line)?;
        }
        Ok(())
    }

    pub fn add_lines<I, S>(&mut self, lines: I) -> TreeResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.add_line(line.as_ref())?;
        }
        Ok(())
    }

    /// Applies one declaration line to the tree.
    #[instrument(level = "trace", skip(self))]
    pub fn add_line(&mut self, line: &str) -> TreeResult<()> {
        self.lines_read += 1;
        let line_no = self.lines_read;

        let declaration = parse_declaration(line).ok_or_else(|| TreeError::MalformedLine {
            line_no,
            line: line.to_string(),
        })?;

        let parent_idx = match self.tree.root() {
            None => {
                let root = self.tree.create_node(declaration.parent);
                self.tree.set_root(root)?;
                debug!("root: {:?}", declaration.parent);
                root
            }
            Some(_) => self.tree.find(declaration.parent).ok_or_else(|| {
                TreeError::ParentNotFound {
                    line_no,
                    parent: declaration.parent.to_string(),
                    line: line.to_string(),
                }
            })?,
        };

        for child in declaration.children {
            let child_idx = self.tree.create_node(child);
            self.tree.attach_child(parent_idx, child_idx)?;
            trace!("{:?} -> {:?}", declaration.parent, child);
        }
        Ok(())
    }

    /// Tree built so far; after a failed line this is the partial tree.
    pub fn tree(&self) -> &FamilyTree {
        &self.tree
    }

    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    pub fn finish(self) -> FamilyTree {
        self.tree
    }
}
