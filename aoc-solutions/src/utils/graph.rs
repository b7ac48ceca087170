//! Explicit graphs: adjacency lists, DAG path counting, disjoint sets

use std::collections::{HashMap, HashSet};

use super::dp_cache::{ClosureProblem, DpCache, HashMapBackend};
use super::search::{Pather, WeightedPather, flood_fill};

/// Directed graph over `0..n` with weighted edges.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyList {
    edges: Vec<Vec<(usize, u32)>>,
}

impl AdjacencyList {
    pub fn new(nodes: usize) -> Self {
        Self {
            edges: vec![Vec::new(); nodes],
        }
    }

    /// Add `a -> b`, growing the node set if either end is new.
    pub fn add_edge(&mut self, a: usize, b: usize, cost: u32) {
        let needed = a.max(b) + 1;
        if self.edges.len() < needed {
            self.edges.resize_with(needed, Vec::new);
        }
        self.edges[a].push((b, cost));
    }

    pub fn add_undirected_edge(&mut self, a: usize, b: usize, cost: u32) {
        self.add_edge(a, b, cost);
        self.add_edge(b, a, cost);
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self, node: usize) -> &[(usize, u32)] {
        self.edges.get(node).map_or(&[], Vec::as_slice)
    }
}

impl Pather for AdjacencyList {
    type Node = usize;

    fn successors(&self, node: usize, buf: &mut Vec<usize>) {
        buf.extend(self.edges(node).iter().map(|&(to, _)| to));
    }
}

impl WeightedPather for AdjacencyList {
    fn step_cost(&self, from: usize, to: usize) -> Option<u32> {
        // Parallel edges: the cheapest wins
        self.edges(from)
            .iter()
            .filter(|&&(n, _)| n == to)
            .map(|&(_, c)| c)
            .min()
    }
}

/// Sizes of the connected components, largest first.
///
/// Edges are followed in their stored direction, so pass a graph built with
/// [`AdjacencyList::add_undirected_edge`].
pub fn component_sizes(graph: &AdjacencyList) -> Vec<usize> {
    let mut seen = HashSet::new();
    let mut sizes = Vec::new();
    for node in 0..graph.len() {
        if seen.contains(&node) {
            continue;
        }
        let reach = flood_fill(graph, node);
        sizes.push(reach.len());
        seen.extend(reach.into_keys());
    }
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes
}

/// Number of distinct paths `from -> to` in a DAG given as successor lists.
///
/// Nodes without an entry are dead ends. A cycle reachable from `from`
/// overflows the stack.
pub fn count_paths<'a>(adjacency: &HashMap<&'a str, Vec<&'a str>>, from: &'a str, to: &'a str) -> u64 {
    let problem = ClosureProblem::new(
        |node: &&'a str| {
            if *node == to {
                Vec::new()
            } else {
                adjacency.get(node).cloned().unwrap_or_default()
            }
        },
        |node: &&'a str, deps: Vec<u64>| if *node == to { 1 } else { deps.iter().sum() },
    );
    DpCache::new(HashMapBackend::new(), problem).get(&from)
}

/// Disjoint sets over `0..n`.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    size: Vec<usize>,
    components: usize,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            size: vec![1; n],
            components: n,
        }
    }

    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets of `a` and `b`. Returns `false` if they were already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        let (big, small) = if self.rank[ra] >= self.rank[rb] { (ra, rb) } else { (rb, ra) };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        if self.rank[big] == self.rank[small] {
            self.rank[big] += 1;
        }
        self.components -= 1;
        true
    }

    /// Size of the set containing `x`.
    pub fn size(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.size[root]
    }

    pub fn components(&self) -> usize {
        self.components
    }

    /// Size of every set, largest first.
    pub fn set_sizes(&mut self) -> Vec<usize> {
        let roots: Vec<usize> = (0..self.parent.len())
            .filter(|&x| self.find(x) == x)
            .collect();
        let mut sizes: Vec<usize> = roots.into_iter().map(|root| self.size[root]).collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes
    }
}
