use std::collections::HashSet;

use crate::core::package::PackageId;
use crate::error::Result;
use crate::graph::DependencyGraph;
use crate::source::traits::MetadataSource;

#[derive(Debug)]
pub struct Collection {
    pub graph: DependencyGraph,
    pub missing: Vec<PackageId>,
}

/// Walk `root`'s declared dependencies depth-first to at most `max_depth`
/// levels.
///
/// The visited set is global to the walk: a package reached a second time
/// through a different parent still appears in that parent's edge list, but
/// its subtree is never expanded again. Depth-truncated packages are marked
/// visited without being queried, so they are indistinguishable from genuine
/// leaves. Unknown packages land in `missing` and stay leaves; only a
/// failure to invoke the source tool aborts the walk.
pub fn collect(
    source: &dyn MetadataSource,
    root: &PackageId,
    max_depth: usize,
) -> Result<Collection> {
    let mut graph = DependencyGraph::new(root.clone());
    let mut missing = Vec::new();
    let mut visited: HashSet<PackageId> = HashSet::new();
    let mut stack: Vec<(PackageId, usize)> = vec![(root.clone(), 0)];

    while let Some((package, depth)) = stack.pop() {
        if !visited.insert(package.clone()) {
            continue;
        }
        if depth >= max_depth {
            continue;
        }
        match source.lookup(&package)? {
            Some(deps) => {
                // reversed so the stack expands children in declaration order
                for dep in deps.iter().rev() {
                    stack.push((dep.clone(), depth + 1));
                }
                graph.edges.insert(package, deps);
            }
            None => missing.push(package),
        }
    }

    Ok(Collection { graph, missing })
}
