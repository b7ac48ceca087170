//! Graph search over anything that can list its neighbors
//!
//! [`bfs`], [`flood_fill`] and [`all_shortest_paths`] need a [`Pather`];
//! [`dijkstra`] and [`astar`] also need step costs from a [`WeightedPather`].

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

use super::grid::{DenseGrid, Grid, SparseGrid};
use super::heap::MinHeap;
use super::point::Point;

/// Neighbor enumeration.
pub trait Pather {
    type Node: Copy + Eq + Hash;

    /// Append the neighbors of `node` to `buf`. The caller clears `buf` first.
    fn successors(&self, node: Self::Node, buf: &mut Vec<Self::Node>);
}

/// Pather with non-negative edge costs.
pub trait WeightedPather: Pather {
    /// Cost of the edge `from -> to`, `None` if the edge is unusable.
    fn step_cost(&self, from: Self::Node, to: Self::Node) -> Option<u32>;
}

impl Pather for DenseGrid {
    type Node = Point;

    fn successors(&self, node: Point, buf: &mut Vec<Point>) {
        buf.extend(node.around(self.directions()).filter(|&n| self.is_valid(n)));
    }
}

impl WeightedPather for DenseGrid {
    fn step_cost(&self, from: Point, to: Point) -> Option<u32> {
        self.cost(from, to)
    }
}

impl Pather for SparseGrid {
    type Node = Point;

    fn successors(&self, node: Point, buf: &mut Vec<Point>) {
        buf.extend(node.around(self.directions()).filter(|&n| self.is_valid(n)));
    }
}

impl WeightedPather for SparseGrid {
    fn step_cost(&self, from: Point, to: Point) -> Option<u32> {
        self.cost(from, to)
    }
}

/// Outcome of a point-to-point search.
#[derive(Debug, Clone)]
pub struct PathResult<N> {
    /// Start to goal inclusive, `None` if the goal is unreachable
    pub path: Option<Vec<N>>,
    pub cost: u64,
    /// Nodes dequeued (settled, for the weighted searches)
    pub visited: usize,
    /// Best known distance of every node discovered
    pub distances: HashMap<N, u64>,
}

impl<N> PathResult<N> {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    fn trivial(start: N) -> Self
    where
        N: Eq + Hash + Copy,
    {
        Self {
            path: Some(vec![start]),
            cost: 0,
            visited: 0,
            distances: HashMap::from([(start, 0)]),
        }
    }
}

fn rebuild_path<N: Copy + Eq + Hash>(parents: &HashMap<N, N>, start: N, goal: N) -> Vec<N> {
    let mut path = vec![goal];
    let mut cur = goal;
    while cur != start {
        match parents.get(&cur) {
            Some(&prev) => {
                path.push(prev);
                cur = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Unweighted shortest path. Nodes are marked when first queued.
pub fn bfs<P: Pather>(pather: &P, start: P::Node, goal: P::Node) -> PathResult<P::Node> {
    if start == goal {
        return PathResult::trivial(start);
    }

    let mut queue = VecDeque::from([start]);
    let mut distances = HashMap::from([(start, 0u64)]);
    let mut parents = HashMap::new();
    let mut visited = 0;
    let mut buf = Vec::new();

    while let Some(cur) = queue.pop_front() {
        visited += 1;
        if cur == goal {
            log::trace!("bfs reached goal after dequeuing {} nodes", visited);
            return PathResult {
                path: Some(rebuild_path(&parents, start, goal)),
                cost: distances[&goal],
                visited,
                distances,
            };
        }

        let next = distances[&cur] + 1;
        buf.clear();
        pather.successors(cur, &mut buf);
        for &n in &buf {
            if let Entry::Vacant(slot) = distances.entry(n) {
                slot.insert(next);
                parents.insert(n, cur);
                queue.push_back(n);
            }
        }
    }

    PathResult {
        path: None,
        cost: 0,
        visited,
        distances,
    }
}

/// Cheapest path by summed step cost.
pub fn dijkstra<P: WeightedPather>(pather: &P, start: P::Node, goal: P::Node) -> PathResult<P::Node> {
    astar(pather, start, goal, |_, _| 0)
}

/// A* with heuristic `h(node, goal)`. Ties on `g + h` go to the smaller `h`.
///
/// `h` must never overestimate or the returned path may not be optimal.
pub fn astar<P, H>(pather: &P, start: P::Node, goal: P::Node, h: H) -> PathResult<P::Node>
where
    P: WeightedPather,
    H: Fn(P::Node, P::Node) -> u64,
{
    if start == goal {
        return PathResult::trivial(start);
    }

    let mut open: MinHeap<(P::Node, u64), (u64, u64)> = MinHeap::new();
    let mut distances = HashMap::from([(start, 0u64)]);
    let mut parents = HashMap::new();
    let mut settled = HashSet::new();
    let mut buf = Vec::new();

    let h0 = h(start, goal);
    open.push((start, 0), (h0, h0));

    while let Some((cur, g)) = open.pop_item() {
        if !settled.insert(cur) {
            continue;
        }
        if cur == goal {
            log::trace!("settled {} nodes, {} still queued", settled.len(), open.len());
            return PathResult {
                path: Some(rebuild_path(&parents, start, goal)),
                cost: g,
                visited: settled.len(),
                distances,
            };
        }

        buf.clear();
        pather.successors(cur, &mut buf);
        for &n in &buf {
            if settled.contains(&n) {
                continue;
            }
            let Some(step) = pather.step_cost(cur, n) else {
                continue;
            };
            let tentative = g + u64::from(step);
            if distances.get(&n).is_none_or(|&old| tentative < old) {
                distances.insert(n, tentative);
                parents.insert(n, cur);
                let hn = h(n, goal);
                open.push((n, tentative), (tentative + hn, hn));
            }
        }
    }

    log::debug!("search exhausted after settling {} nodes", settled.len());
    PathResult {
        path: None,
        cost: 0,
        visited: settled.len(),
        distances,
    }
}

/// A* on points guided by taxicab distance.
pub fn astar_manhattan<P>(pather: &P, start: Point, goal: Point) -> PathResult<Point>
where
    P: WeightedPather<Node = Point>,
{
    astar(pather, start, goal, Point::manhattan)
}

/// Straight-line distance rounded down.
pub fn euclidean_heuristic(from: Point, to: Point) -> u64 {
    from.euclidean(to).floor() as u64
}

/// Distance from `start` to every reachable node.
pub fn flood_fill<P: Pather>(pather: &P, start: P::Node) -> HashMap<P::Node, u64> {
    flood_fill_within(pather, start, u64::MAX)
}

/// Like [`flood_fill`] but stops expanding past `max_dist`.
pub fn flood_fill_within<P: Pather>(pather: &P, start: P::Node, max_dist: u64) -> HashMap<P::Node, u64> {
    let mut queue = VecDeque::from([start]);
    let mut distances = HashMap::from([(start, 0u64)]);
    let mut buf = Vec::new();

    while let Some(cur) = queue.pop_front() {
        let d = distances[&cur];
        if d >= max_dist {
            continue;
        }
        buf.clear();
        pather.successors(cur, &mut buf);
        for &n in &buf {
            if let Entry::Vacant(slot) = distances.entry(n) {
                slot.insert(d + 1);
                queue.push_back(n);
            }
        }
    }

    distances
}

/// Every minimum-length path from `start` to `goal`, in discovery order.
pub fn all_shortest_paths<P: Pather>(pather: &P, start: P::Node, goal: P::Node) -> Vec<Vec<P::Node>> {
    if start == goal {
        return vec![vec![start]];
    }

    let mut queue = VecDeque::from([vec![start]]);
    // Path length at which each node was last reached
    let mut reached: HashMap<P::Node, usize> = HashMap::from([(start, 0)]);
    let mut paths = Vec::new();
    let mut shortest: Option<usize> = None;
    let mut buf = Vec::new();

    while let Some(path) = queue.pop_front() {
        if shortest.is_some_and(|s| path.len() > s) {
            continue;
        }
        let Some(&cur) = path.last() else {
            continue;
        };
        if cur == goal {
            let best = *shortest.get_or_insert(path.len());
            if path.len() == best {
                paths.push(path);
            }
            continue;
        }

        buf.clear();
        pather.successors(cur, &mut buf);
        for &n in &buf {
            if reached.get(&n).is_none_or(|&d| d >= path.len()) {
                reached.insert(n, path.len());
                let mut next = path.clone();
                next.push(n);
                queue.push_back(next);
            }
        }
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::grid::{terrain_cost, BLOCKED};
    use crate::utils::point::Directions;
    use proptest::prelude::*;

    fn ring() -> DenseGrid {
        DenseGrid::from_text("...\n.#.\n...").unwrap()
    }

    #[test]
    fn test_bfs_around_blocked_centre() {
        let grid = ring();
        let result = bfs(&grid, Point::new(0, 0), Point::new(2, 2));

        assert!(result.found());
        assert_eq!(result.cost, 4);
        assert!(result.visited <= 8);
        let path = result.path.unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.first(), Some(&Point::new(0, 0)));
        assert_eq!(path.last(), Some(&Point::new(2, 2)));
        assert!(path.windows(2).all(|w| w[0].manhattan(w[1]) == 1));
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = ring();
        for result in [
            bfs(&grid, Point::new(1, 0), Point::new(1, 0)),
            dijkstra(&grid, Point::new(1, 0), Point::new(1, 0)),
            astar_manhattan(&grid, Point::new(1, 0), Point::new(1, 0)),
        ] {
            assert_eq!(result.path, Some(vec![Point::new(1, 0)]));
            assert_eq!(result.cost, 0);
        }
        assert_eq!(
            all_shortest_paths(&grid, Point::new(1, 0), Point::new(1, 0)),
            vec![vec![Point::new(1, 0)]]
        );
    }

    #[test]
    fn test_unreachable_goal() {
        let grid = DenseGrid::from_text("..#..\n..#..").unwrap();
        let result = bfs(&grid, Point::new(0, 0), Point::new(4, 1));
        assert!(!result.found());
        assert_eq!(result.visited, 4);
        assert_eq!(result.distances.len(), 4);

        let weighted = dijkstra(&grid, Point::new(0, 0), Point::new(4, 1));
        assert!(!weighted.found());
        assert_eq!(weighted.visited, 4);
    }

    #[test]
    fn test_dijkstra_prefers_cheap_terrain() {
        // Straight through the swamp costs 1 + 9, around it 4
        let grid = DenseGrid::from_text("...\n.~.\n...")
            .unwrap()
            .with_cost(terrain_cost(HashMap::from([(b'~', 9)])));
        let result = dijkstra(&grid, Point::new(1, 0), Point::new(1, 2));
        assert_eq!(result.cost, 4);
        assert!(!result.path.unwrap().contains(&Point::new(1, 1)));

        let guided = astar(&grid, Point::new(1, 0), Point::new(1, 2), euclidean_heuristic);
        assert_eq!(guided.cost, 4);
    }

    #[test]
    fn test_flood_fill_bounded_on_open_sparse_grid() {
        let grid = SparseGrid::new();
        let reach = flood_fill_within(&grid, Point::ZERO, 2);
        // Diamond of radius 2
        assert_eq!(reach.len(), 13);
        assert!(reach.values().all(|&d| d <= 2));

        let eight = SparseGrid::new().with_directions(Directions::Eight);
        assert_eq!(flood_fill_within(&eight, Point::ZERO, 1).len(), 9);
    }

    #[test]
    fn test_all_shortest_paths_counts_routes() {
        let grid = DenseGrid::new(3, 3, b'.');
        let paths = all_shortest_paths(&grid, Point::new(0, 0), Point::new(2, 2));
        // Monotone lattice paths in a 3x3 box: C(4, 2)
        assert_eq!(paths.len(), 6);
        assert!(paths.iter().all(|p| p.len() == 5));

        let blocked = ring();
        assert_eq!(all_shortest_paths(&blocked, Point::new(0, 0), Point::new(2, 2)).len(), 2);
    }

    /// Sparse twin of a `side`-square dense layout: background cells are
    /// left out and validity stops at the box edge.
    fn boxed_sparse(text: &str, side: i64) -> SparseGrid {
        SparseGrid::from_text(text, b'.').with_validity(move |grid, p| {
            (0..side).contains(&p.x) && (0..side).contains(&p.y) && grid.at(p) != Some(BLOCKED)
        })
    }

    #[test]
    fn test_sparse_ring_matches_dense() {
        let grid = boxed_sparse("...\n.#.\n...", 3);
        let result = bfs(&grid, Point::new(0, 0), Point::new(2, 2));
        assert_eq!(result.cost, 4);
        assert!(result.visited <= 8);
        assert!(!result.distances.contains_key(&Point::new(-1, 0)));

        assert_eq!(dijkstra(&grid, Point::new(0, 0), Point::new(2, 2)).cost, 4);
        assert_eq!(all_shortest_paths(&grid, Point::new(0, 0), Point::new(2, 2)).len(), 2);
        assert!(!bfs(&grid, Point::new(0, 0), Point::new(3, 0)).found());
    }

    #[test]
    fn test_sparse_terrain_cost() {
        let grid = boxed_sparse("...\n.~.\n...", 3).with_cost(terrain_cost(HashMap::from([(b'~', 9)])));
        let result = astar_manhattan(&grid, Point::new(1, 0), Point::new(1, 2));
        assert_eq!(result.cost, 4);
        assert!(!result.path.unwrap().contains(&Point::new(1, 1)));
    }

    fn arb_layout() -> impl Strategy<Value = (String, Point, Point)> {
        (
            prop::collection::vec(prop_oneof![3 => Just(b'.'), 1 => Just(BLOCKED), 1 => Just(b'~')], 49),
            0usize..49,
            0usize..49,
        )
            .prop_map(|(mut cells, s, g)| {
                cells[s] = b'.';
                cells[g] = b'.';
                let text: String = cells
                    .chunks(7)
                    .map(|row| String::from_utf8_lossy(row).into_owned() + "\n")
                    .collect();
                let at = |i: usize| Point::new((i % 7) as i64, (i / 7) as i64);
                (text, at(s), at(g))
            })
    }

    fn arb_grid() -> impl Strategy<Value = (DenseGrid, Point, Point)> {
        arb_layout().prop_map(|(text, s, g)| (DenseGrid::from_text(&text).unwrap(), s, g))
    }

    proptest! {
        #[test]
        fn prop_bfs_matches_dijkstra_on_unit_costs((grid, s, g) in arb_grid()) {
            let unweighted = bfs(&grid, s, g);
            let weighted = dijkstra(&grid, s, g);
            prop_assert_eq!(unweighted.found(), weighted.found());
            if unweighted.found() {
                prop_assert_eq!(unweighted.cost, weighted.cost);
            }
        }

        #[test]
        fn prop_astar_matches_dijkstra((grid, s, g) in arb_grid()) {
            let grid = grid.with_cost(terrain_cost(HashMap::from([(b'~', 3)])));
            let reference = dijkstra(&grid, s, g);
            let guided = astar_manhattan(&grid, s, g);
            prop_assert_eq!(reference.found(), guided.found());
            prop_assert_eq!(reference.cost, guided.cost);
            prop_assert!(guided.visited <= reference.visited);
        }

        #[test]
        fn prop_sparse_and_dense_backings_agree((text, s, g) in arb_layout()) {
            let swamp = || terrain_cost(HashMap::from([(b'~', 3)]));
            let dense = DenseGrid::from_text(&text).unwrap().with_cost(swamp());
            let sparse = boxed_sparse(&text, 7).with_cost(swamp());

            let (d, sp) = (bfs(&dense, s, g), bfs(&sparse, s, g));
            prop_assert_eq!(d.found(), sp.found());
            prop_assert_eq!(d.cost, sp.cost);

            let (d, sp) = (dijkstra(&dense, s, g), dijkstra(&sparse, s, g));
            prop_assert_eq!(d.found(), sp.found());
            prop_assert_eq!(d.cost, sp.cost);

            let (d, sp) = (astar_manhattan(&dense, s, g), astar_manhattan(&sparse, s, g));
            prop_assert_eq!(d.found(), sp.found());
            prop_assert_eq!(d.cost, sp.cost);

            prop_assert_eq!(
                all_shortest_paths(&dense, s, g).len(),
                all_shortest_paths(&sparse, s, g).len()
            );
        }

        #[test]
        fn prop_flood_fill_agrees_with_bfs((grid, s, _g) in arb_grid()) {
            let reach = flood_fill(&grid, s);
            for (&node, &d) in &reach {
                prop_assert_eq!(bfs(&grid, s, node).cost, d);
            }
        }
    }
}
