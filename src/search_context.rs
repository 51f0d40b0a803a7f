//! Per-cell bookkeeping for a single search and the A* loop running over it. The loop follows
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html),
//! but keys nodes by cell index into flat arrays instead of hashing them.
use log::{debug, warn};
use num_traits::{Bounded, SaturatingAdd, Zero};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost)
            && self.cost.eq(&other.cost)
            && self.index == other.index
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimated cost first, then the largest cost (deepest node), then the
        // smallest cell index so that equal entries always pop in the same order
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Search state for every cell of a grid. A g-score of `C::max_value()` means the cell has not
/// been reached yet.
#[derive(Clone, Debug)]
pub struct SearchContext<C> {
    g_score: Vec<C>,
    f_score: Vec<C>,
    visited: Vec<bool>,
    in_frontier: Vec<bool>,
    predecessor: Vec<Option<usize>>,
    expanded: usize,
}

impl<C> Default for SearchContext<C> {
    fn default() -> SearchContext<C> {
        SearchContext {
            g_score: Vec::new(),
            f_score: Vec::new(),
            visited: Vec::new(),
            in_frontier: Vec::new(),
            predecessor: Vec::new(),
            expanded: 0,
        }
    }
}

impl<C> SearchContext<C>
where
    C: Zero + Bounded + SaturatingAdd + Ord + Copy,
{
    pub fn new() -> SearchContext<C> {
        SearchContext::default()
    }

    /// Clears all state and sizes the arrays for `n_cells` cells, keeping the allocations.
    pub fn reset(&mut self, n_cells: usize) {
        debug!("Resetting search context for {} cells", n_cells);
        self.g_score.clear();
        self.g_score.resize(n_cells, C::max_value());
        self.f_score.clear();
        self.f_score.resize(n_cells, C::max_value());
        self.visited.clear();
        self.visited.resize(n_cells, false);
        self.in_frontier.clear();
        self.in_frontier.resize(n_cells, false);
        self.predecessor.clear();
        self.predecessor.resize(n_cells, None);
        self.expanded = 0;
    }

    pub fn g_score(&self, ix: usize) -> Option<C> {
        self.g_score
            .get(ix)
            .copied()
            .filter(|&g| g != C::max_value())
    }

    pub fn f_score(&self, ix: usize) -> Option<C> {
        self.f_score
            .get(ix)
            .copied()
            .filter(|&f| f != C::max_value())
    }

    pub fn visited(&self, ix: usize) -> bool {
        self.visited.get(ix).copied().unwrap_or(false)
    }

    pub fn predecessor(&self, ix: usize) -> Option<usize> {
        self.predecessor.get(ix).copied().flatten()
    }

    /// Number of nodes expanded by the last search.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Follows the predecessor links back from `end` and returns the indices from the start.
    fn reverse_path(&self, end: usize) -> Vec<usize> {
        let mut path: Vec<usize> =
            std::iter::successors(Some(end), |&ix| self.predecessor[ix]).collect();
        path.reverse();
        path
    }

    /// Runs A* from `start` over `n_cells` cells until `success` holds for a popped node. Returns
    /// the cell indices from start to goal together with the path cost, or [None] when the
    /// frontier runs empty.
    pub fn astar<FN, IN, FH, FS>(
        &mut self,
        n_cells: usize,
        start: usize,
        mut successors: FN,
        mut heuristic: FH,
        mut success: FS,
    ) -> Option<(Vec<usize>, C)>
    where
        FN: FnMut(usize) -> IN,
        IN: IntoIterator<Item = (usize, C)>,
        FH: FnMut(usize) -> C,
        FS: FnMut(usize) -> bool,
    {
        self.reset(n_cells);
        let mut to_see = BinaryHeap::new();
        let start_h = heuristic(start);
        self.g_score[start] = Zero::zero();
        self.f_score[start] = start_h;
        self.in_frontier[start] = true;
        to_see.push(SmallestCostHolder {
            estimated_cost: start_h,
            cost: Zero::zero(),
            index: start,
        });

        while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
            // An improved route pushes the node again, so older entries for it are skipped here.
            if self.visited[index] || cost > self.g_score[index] {
                continue;
            }
            self.in_frontier[index] = false;
            if success(index) {
                debug!("Goal reached after {} expansions", self.expanded);
                return Some((self.reverse_path(index), cost));
            }
            self.visited[index] = true;
            self.expanded += 1;

            for (successor, move_cost) in successors(index) {
                let new_cost = cost.saturating_add(&move_cost);
                if self.visited[successor] && new_cost >= self.g_score[successor] {
                    continue;
                }
                if !self.in_frontier[successor] || new_cost < self.g_score[successor] {
                    // Costs saturate so an oversized heuristic still orders the frontier.
                    let estimated_cost = new_cost.saturating_add(&heuristic(successor));
                    self.g_score[successor] = new_cost;
                    self.f_score[successor] = estimated_cost;
                    self.predecessor[successor] = Some(index);
                    self.visited[successor] = false;
                    self.in_frontier[successor] = true;
                    to_see.push(SmallestCostHolder {
                        estimated_cost,
                        cost: new_cost,
                        index: successor,
                    });
                }
            }
        }
        warn!(
            "Frontier exhausted after {} expansions without reaching the goal",
            self.expanded
        );
        None
    }
}
