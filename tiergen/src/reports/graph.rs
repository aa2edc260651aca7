//! Graph command report data structures.

use super::output::{Output, Report};

/// The dependency graph of a resolved plan.
#[derive(Debug)]
pub struct GraphReport {
    /// Rendered adjacency list.
    pub graph: String,
    /// Components in dependency order.
    pub order: Vec<String>,
}

impl Report for GraphReport {
    fn render(&self, out: &mut dyn Output) {
        out.section("Dependency graph");
        out.preformatted(self.graph.trim_end());
        out.newline();

        out.section("Topological order");
        for (i, name) in self.order.iter().enumerate() {
            out.numbered_item(i + 1, name);
        }
    }
}
