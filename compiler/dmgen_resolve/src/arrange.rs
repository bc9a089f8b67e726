//! Dependency order of emitted types.
//!
//! Depth-first topological sort over the eager references between emitted
//! types. The schema is not acyclic, but all of its cycles go through a
//! breakpoint identifier: every reference to a breakpoint must be lazy and is
//! left out of the graph, which makes the rest acyclic.

use dmgen_ir::visit::walk_code;
use dmgen_ir::{ensure_sufficient_stack, CodegenConfig, CodegenError, EmitMap, Ident, TypeRef};
use tracing::debug;

#[derive(Copy, Clone, PartialEq, Eq)]
enum Mark {
    Unvisited,
    /// On the current DFS path.
    Active,
    Done,
}

struct Sorter<'a> {
    emits: &'a EmitMap,
    /// Eager dependencies per ident index, in first-reference order.
    graph: Vec<Vec<Ident>>,
    marks: Vec<Mark>,
    sorted: Vec<Ident>,
}

/// Order every emitted identifier so that each one comes after everything
/// it references eagerly.
#[tracing::instrument(level = "debug", skip_all)]
pub fn arrange(emits: &EmitMap, config: &CodegenConfig) -> Result<Vec<Ident>, CodegenError> {
    let graph = build_graph(emits, config)?;
    let size = emits.idents().len();
    let mut sorter = Sorter {
        emits,
        graph,
        marks: vec![Mark::Unvisited; size],
        sorted: Vec::with_capacity(emits.len()),
    };
    for &ident in emits.idents_in_order() {
        sorter.visit(ident)?;
    }
    debug!(count = sorter.sorted.len(), "arranged");
    Ok(sorter.sorted)
}

fn build_graph(emits: &EmitMap, config: &CodegenConfig) -> Result<Vec<Vec<Ident>>, CodegenError> {
    let mut graph = vec![Vec::new(); emits.idents().len()];
    for (ident, code) in emits.iter() {
        let mut refs: Vec<(Ident, bool)> = Vec::new();
        walk_code(code, &mut |ty| {
            if let TypeRef::Local { id, lazy, .. } = ty {
                refs.push((*id, *lazy));
            }
        });

        let deps = &mut graph[ident.index()];
        for (target, lazy) in refs {
            let name = emits.name(target);
            if !emits.contains(target) {
                return Err(CodegenError::MissingEmission {
                    ident: name.to_owned(),
                });
            }
            if config.is_breakpoint(name) {
                if !lazy {
                    return Err(CodegenError::EagerBreakpointReference {
                        from: emits.name(ident).to_owned(),
                        to: name.to_owned(),
                    });
                }
            } else if !lazy && !deps.contains(&target) {
                deps.push(target);
            }
        }
    }
    Ok(graph)
}

impl Sorter<'_> {
    fn visit(&mut self, ident: Ident) -> Result<(), CodegenError> {
        match self.marks[ident.index()] {
            Mark::Done => return Ok(()),
            Mark::Active => {
                return Err(CodegenError::UnexpectedCycle {
                    ident: self.emits.name(ident).to_owned(),
                })
            }
            Mark::Unvisited => {}
        }

        self.marks[ident.index()] = Mark::Active;
        let deps = std::mem::take(&mut self.graph[ident.index()]);
        for &dep in &deps {
            ensure_sufficient_stack(|| self.visit(dep))?;
        }
        self.marks[ident.index()] = Mark::Done;
        self.sorted.push(ident);
        Ok(())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
