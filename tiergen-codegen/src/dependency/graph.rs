use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use indexmap::IndexMap;
use thiserror::Error;
use tiergen_ir::{ComponentKind, Plan};

use super::{REPOSITORY_SUFFIX, USE_CASE_SUFFIX};
use crate::ComponentRef;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("circular dependency detected at '{node}'")]
    Cycle { node: String },
}

/// A component in the dependency graph.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    pub name: String,
    pub kind: ComponentKind,
    /// The plan entry this node was built from, if any.
    pub component: Option<ComponentRef<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Directed graph where an edge `A → B` means A needs B to exist first.
///
/// Nodes and edges keep insertion order, so output derived from the graph
/// is stable across runs.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph<'a> {
    nodes: IndexMap<String, Node<'a>>,
    edges: IndexMap<String, Vec<String>>,
}

impl<'a> DependencyGraph<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph of a resolved plan.
    ///
    /// Entities are keyed by their bare name, repositories and use-cases by
    /// their suffixed names (`OrderRepository`, `CreateOrderUseCase`).
    pub fn from_plan(plan: &'a Plan) -> Self {
        let mut graph = Self::new();

        for entity in &plan.entities {
            graph.insert(
                entity.name.clone(),
                ComponentKind::Entity,
                Some(ComponentRef::Entity(entity)),
            );
        }

        for repo in &plan.repositories {
            let name = repo.qualified_name();
            graph.insert(
                name.clone(),
                ComponentKind::Repository,
                Some(ComponentRef::Repository(repo)),
            );
            graph.add_edge(name, repo.entity.clone());
        }

        for use_case in &plan.use_cases {
            let name = use_case.qualified_name();
            graph.insert(
                name.clone(),
                ComponentKind::UseCase,
                Some(ComponentRef::UseCase(use_case)),
            );
            for dep in &use_case.dependencies {
                graph.add_edge(name.clone(), node_name(dep.kind, &dep.name));
            }
        }

        graph
    }

    /// Add a node that is not backed by a plan entry.
    pub fn add_node(&mut self, name: impl Into<String>, kind: ComponentKind) {
        self.insert(name.into(), kind, None);
    }

    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.edges.entry(from.into()).or_default().push(to.into());
    }

    fn insert(&mut self, name: String, kind: ComponentKind, component: Option<ComponentRef<'a>>) {
        self.nodes.insert(
            name.clone(),
            Node {
                name,
                kind,
                component,
            },
        );
    }

    pub fn node(&self, name: &str) -> Option<&Node<'a>> {
        self.nodes.get(name)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node<'a>> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Names `name` points at, in insertion order.
    pub fn dependencies_of(&self, name: &str) -> &[String] {
        self.edges.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Order nodes so every dependency precedes its dependents.
    ///
    /// Fails on the first cycle, naming the node where it was closed. Edge
    /// targets that are not nodes are traversed but left out of the result.
    pub fn topological_sort(&self) -> Result<Vec<String>, GraphError> {
        let mut marks = HashMap::new();
        let mut order = Vec::with_capacity(self.nodes.len());

        for name in self.nodes.keys() {
            self.visit(name, &mut marks, &mut order)?;
        }

        Ok(order)
    }

    fn visit<'g>(
        &'g self,
        name: &'g str,
        marks: &mut HashMap<&'g str, Mark>,
        order: &mut Vec<String>,
    ) -> Result<(), GraphError> {
        match marks.get(name) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::InProgress) => {
                return Err(GraphError::Cycle {
                    node: name.to_string(),
                });
            }
            None => {}
        }

        marks.insert(name, Mark::InProgress);
        for dep in self.dependencies_of(name) {
            self.visit(dep, marks, order)?;
        }
        marks.insert(name, Mark::Done);

        if self.nodes.contains_key(name) {
            order.push(name.to_string());
        }
        Ok(())
    }

    /// Every cycle reachable by a depth-first pass, as closed node paths.
    ///
    /// Each path lists nodes along existing edges; the last node has an
    /// edge back to the first. Never fails.
    pub fn detect_cycles(&self) -> Vec<Vec<String>> {
        let mut walk = CycleWalk::default();

        for name in self.nodes.keys() {
            if !walk.visited.contains(name.as_str()) {
                self.collect_cycles(name, &mut walk);
            }
        }

        walk.cycles
    }

    fn collect_cycles<'g>(&'g self, node: &'g str, walk: &mut CycleWalk<'g>) {
        walk.visited.insert(node);
        walk.on_stack.insert(node);
        walk.path.push(node);

        for next in self.dependencies_of(node) {
            if walk.on_stack.contains(next.as_str()) {
                let start = walk
                    .path
                    .iter()
                    .position(|n| *n == next.as_str())
                    .unwrap_or(0);
                walk.cycles
                    .push(walk.path[start..].iter().map(|n| n.to_string()).collect());
            } else if !walk.visited.contains(next.as_str()) {
                self.collect_cycles(next, walk);
            }
        }

        walk.path.pop();
        walk.on_stack.remove(node);
    }
}

#[derive(Default)]
struct CycleWalk<'g> {
    visited: HashSet<&'g str>,
    on_stack: HashSet<&'g str>,
    path: Vec<&'g str>,
    cycles: Vec<Vec<String>>,
}

/// The node a dependency on `name` points at.
///
/// Repositories and use-cases may be referenced with or without their suffix;
/// both resolve to the suffixed node name.
fn node_name(kind: ComponentKind, name: &str) -> String {
    let suffix = match kind {
        ComponentKind::Repository => REPOSITORY_SUFFIX,
        ComponentKind::UseCase => USE_CASE_SUFFIX,
        _ => return name.to_string(),
    };
    let base = name.strip_suffix(suffix).unwrap_or(name);
    format!("{base}{suffix}")
}

impl fmt::Display for DependencyGraph<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.nodes.values() {
            writeln!(f, "{} ({})", node.name, node.kind)?;
            for dep in self.dependencies_of(&node.name) {
                match self.nodes.get(dep) {
                    Some(target) => writeln!(f, "  -> {} ({})", dep, target.kind)?,
                    None => writeln!(f, "  -> {} (missing)", dep)?,
                }
            }
        }
        Ok(())
    }
}
