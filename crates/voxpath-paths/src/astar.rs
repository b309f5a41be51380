use std::sync::atomic::{AtomicBool, Ordering};

use voxpath_core::Point3;

use crate::SearchSpace;
use crate::search::SearchOutcome;
use crate::space::NO_PARENT;
use crate::traits::AstarPather;

impl SearchSpace {
    /// Compute the cheapest path from `from` to `to` using A*.
    ///
    /// The returned path excludes `from` and includes `to`; it is empty when
    /// `from == to`. Points outside the space's extent are unreachable. When
    /// `cancel` is given it is polled before each expansion.
    pub fn astar<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point3,
        to: Point3,
        cancel: Option<&AtomicBool>,
    ) -> SearchOutcome {
        let (Some(start_idx), Some(goal_idx)) = (self.extent.index(from), self.extent.index(to))
        else {
            return SearchOutcome::Unreachable;
        };

        let cur_gen = self.begin();

        if start_idx == goal_idx {
            return SearchOutcome::Found(Vec::new());
        }

        // Initialise the start node.
        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.h = pather.estimate(from, to);
            node.parent = NO_PARENT;
            node.generation = cur_gen;
            node.closed = false;
        }
        self.push_open(start_idx);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = 'search: loop {
            if cancel.is_some_and(|c| c.load(Ordering::Relaxed)) {
                break 'search SearchOutcome::Cancelled;
            }

            let Some(current) = self.open.pop() else {
                break 'search SearchOutcome::Unreachable;
            };

            let ci = current.idx;

            // Skip entries superseded by a cheaper push.
            if self.nodes[ci].closed {
                continue;
            }
            self.nodes[ci].closed = true;
            self.expanded += 1;

            if ci == goal_idx {
                break 'search SearchOutcome::Found(self.retrace(start_idx, goal_idx));
            }

            let current_g = self.nodes[ci].g;
            let current_point = self.extent.point(ci);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.extent.index(np) else {
                    continue;
                };
                let tentative_g = current_g + pather.cost(current_point, np);

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if n.closed || tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    n.closed = false;
                }

                n.g = tentative_g;
                n.h = pather.estimate(np, to);
                n.parent = ci;

                self.push_open(ni);
            }
        };

        self.nbuf = nbuf;
        log::trace!(
            "astar {} -> {}: {} expanded, {}",
            from,
            to,
            self.expanded,
            outcome.label()
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{octile, path_cost};
    use crate::neighbors::{SearchOptions, VoxelPather};
    use crate::traits::{Pather, WeightedPather};
    use rand::{RngExt, SeedableRng};
    use std::cmp::Reverse;
    use std::collections::BinaryHeap;
    use voxpath_core::{Extent3, GridIndex};

    /// Plain Dijkstra over the same pather, as a reference cost.
    fn reference_cost(pather: &VoxelPather<'_>, grid: &GridIndex, from: Point3, to: Point3) -> Option<i32> {
        let mut dist = vec![i32::MAX; grid.len()];
        let mut heap = BinaryHeap::new();
        let si = grid.index(from)?;
        dist[si] = 0;
        heap.push(Reverse((0, si)));
        let mut buf = Vec::new();
        while let Some(Reverse((d, i))) = heap.pop() {
            if d > dist[i] {
                continue;
            }
            let p = grid.point(i);
            if p == to {
                return Some(d);
            }
            buf.clear();
            pather.neighbors(p, &mut buf);
            for &n in &buf {
                let ni = grid.index(n)?;
                let nd = d + pather.cost(p, n);
                if nd < dist[ni] {
                    dist[ni] = nd;
                    heap.push(Reverse((nd, ni)));
                }
            }
        }
        None
    }

    #[test]
    fn open_plane_path_matches_octile() {
        let g = GridIndex::new(Extent3::new(5, 1, 5));
        let mut space = SearchSpace::new(g.extent());
        let pather = VoxelPather::new(&g, SearchOptions::default());
        let (from, to) = (Point3::new(0, 0, 0), Point3::new(4, 0, 4));

        let path = space.astar(&pather, from, to, None).into_path().unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.last(), Some(&to));
        assert_eq!(path_cost(from, &path), octile(from, to));
        assert_eq!(path_cost(from, &path), 56);
    }

    #[test]
    fn same_start_and_goal_is_empty_success() {
        let g = GridIndex::new(Extent3::new(3, 1, 3));
        let mut space = SearchSpace::new(g.extent());
        let pather = VoxelPather::new(&g, SearchOptions::default());
        let p = Point3::new(1, 0, 1);
        assert_eq!(space.astar(&pather, p, p, None), SearchOutcome::Found(Vec::new()));
    }

    #[test]
    fn off_grid_endpoints_are_unreachable() {
        let g = GridIndex::new(Extent3::new(3, 1, 3));
        let mut space = SearchSpace::new(g.extent());
        let pather = VoxelPather::new(&g, SearchOptions::default());
        let out = space.astar(&pather, Point3::ZERO, Point3::new(3, 0, 0), None);
        assert_eq!(out, SearchOutcome::Unreachable);
    }

    #[test]
    fn pre_cancelled_search_stops() {
        let g = GridIndex::new(Extent3::new(5, 1, 5));
        let mut space = SearchSpace::new(g.extent());
        let pather = VoxelPather::new(&g, SearchOptions::default());
        let cancel = AtomicBool::new(true);
        let out = space.astar(&pather, Point3::ZERO, Point3::new(4, 0, 4), Some(&cancel));
        assert_eq!(out, SearchOutcome::Cancelled);
        assert_eq!(space.expanded(), 0);
    }

    #[test]
    fn reused_space_gives_independent_results() {
        let mut g = GridIndex::new(Extent3::new(5, 1, 5));
        let mut space = SearchSpace::new(g.extent());
        let (from, to) = (Point3::ZERO, Point3::new(4, 0, 0));
        let first = {
            let pather = VoxelPather::new(&g, SearchOptions::default());
            space.astar(&pather, from, to, None).into_path().unwrap()
        };
        assert_eq!(path_cost(from, &first), 40);

        // Wall across x = 2 except at z = 4.
        for z in 0..4 {
            g.set_walkable(Point3::new(2, 0, z), false);
        }
        let pather = VoxelPather::new(&g, SearchOptions::default());
        let second = space.astar(&pather, from, to, None).into_path().unwrap();
        assert!(second.contains(&Point3::new(2, 0, 4)));
        assert_eq!(
            path_cost(from, &second),
            reference_cost(&pather, &g, from, to).unwrap()
        );
    }

    #[test]
    fn random_grids_match_reference_dijkstra() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let extent = Extent3::new(7, 3, 7);
        let mut space = SearchSpace::new(extent);
        for round in 0..60 {
            let grid = GridIndex::from_fn(extent, |c| {
                let r: f64 = rng.random();
                c.with_walkable(r >= 0.35)
            })
            .unwrap();
            let walkable: Vec<Point3> = grid.iter().filter(|c| c.walkable).map(|c| c.pos()).collect();
            if walkable.len() < 2 {
                continue;
            }
            let from = walkable[rng.random_range(0..walkable.len())];
            let to = walkable[rng.random_range(0..walkable.len())];
            let options = if round % 2 == 0 {
                SearchOptions::default()
            } else {
                SearchOptions::planar()
            };
            let pather = VoxelPather::new(&grid, options);

            let got = space.astar(&pather, from, to, None).into_path();
            let want = reference_cost(&pather, &grid, from, to);
            assert_eq!(
                got.as_ref().map(|p| path_cost(from, p)),
                want,
                "round {round}: {from} -> {to}"
            );
            if let Some(path) = got {
                // Every step must be a legal neighbor of the previous one.
                let mut prev = from;
                let mut buf = Vec::new();
                for &p in &path {
                    buf.clear();
                    pather.neighbors(prev, &mut buf);
                    assert!(buf.contains(&p), "round {round}: illegal step {prev} -> {p}");
                    prev = p;
                }
            }
        }
    }
}
