//! Graph phase - orders components and rejects dependency cycles.

use eyre::Result;

use crate::{
    dependency::DependencyGraph,
    pipeline::{Diagnostic, Phase, PlanContext},
};

/// Phase that topologically sorts the resolved plan.
///
/// On a cycle every path found by
/// [`detect_cycles`](DependencyGraph::detect_cycles) becomes an error
/// diagnostic before the phase fails.
pub struct GraphPhase;

impl Phase for GraphPhase {
    fn name(&self) -> &'static str {
        "graph"
    }

    fn run(&self, ctx: &mut PlanContext) -> Result<()> {
        let sorted = {
            let graph = DependencyGraph::from_plan(&ctx.plan);
            graph
                .topological_sort()
                .map_err(|err| (err, graph.detect_cycles()))
        };

        match sorted {
            Ok(order) => {
                ctx.order = order;
                Ok(())
            }
            Err((err, cycles)) => {
                for cycle in &cycles {
                    let mut path = cycle.clone();
                    if let Some(first) = cycle.first() {
                        path.push(first.clone());
                    }
                    ctx.add_diagnostic(
                        Diagnostic::error(
                            self.name(),
                            format!("dependency cycle: {}", path.join(" -> ")),
                        )
                        .at(cycle.first().cloned().unwrap_or_default()),
                    );
                }
                Err(err.into())
            }
        }
    }
}
