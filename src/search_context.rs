//! Best-first search over an implicit graph, in the style of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html),
//! extended to remember *every* predecessor that reaches a node at its best cost. This is what
//! allows the set of nodes lying on any optimal path to be recovered after the search.
use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::debug;
use num_traits::Zero;
use smallvec::{smallvec, SmallVec};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;
use thiserror::Error;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Broken invariants between the frontier and the best-cost table. These indicate a bug, not bad
/// input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("frontier refers to node {0} which is missing from the cost table")]
    UnknownNode(usize),
    #[error("node {0} is recorded as a predecessor but is missing from the cost table")]
    MissingPredecessor(usize),
    #[error("predecessor chain starting at node {0} does not lead back to the start")]
    PredecessorCycle(usize),
}

/// Order in which frontier entries of equal priority are expanded. The costs found do not depend
/// on this; it only changes which of several optimal paths is reconstructed first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Entries pushed earlier are expanded first.
    #[default]
    Fifo,
    /// Entries pushed later are expanded first.
    Lifo,
}

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    rank: u64,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost)
            && self.cost.eq(&other.cost)
            && self.rank == other.rank
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per estimated cost, then favours the entry with the larger cost (the one
        // closer to a goal), then the higher rank.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => self
                .cost
                .cmp(&other.cost)
                .then_with(|| self.rank.cmp(&other.rank)),
            s => s,
        }
    }
}

/// Best known cost of a node and the indices of all nodes that reach it at that cost.
#[derive(Clone, Debug)]
struct Entry<C> {
    cost: C,
    predecessors: SmallVec<[usize; 2]>,
}

/// The goal nodes finalised by a search, all sharing the optimal cost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reached<C> {
    pub cost: C,
    pub goals: SmallVec<[usize; 4]>,
}

/// Owns the best-cost table and the frontier of one search. Each call to
/// [search](Self::search) starts from empty tables, so nothing found for one start or grid can
/// leak into the next.
pub struct SearchContext<N, C> {
    frontier: BinaryHeap<SmallestCostHolder<C>>,
    table: FxIndexMap<N, Entry<C>>,
    pushed: u64,
    pub tie_break: TieBreak,
}

impl<N, C> Default for SearchContext<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, C> SearchContext<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
{
    pub fn new() -> Self {
        SearchContext {
            frontier: BinaryHeap::new(),
            table: FxIndexMap::default(),
            pushed: 0,
            tie_break: TieBreak::default(),
        }
    }

    pub fn with_tie_break(tie_break: TieBreak) -> Self {
        SearchContext {
            tie_break,
            ..Self::new()
        }
    }

    fn clear(&mut self) {
        self.frontier.clear();
        self.table.clear();
        self.pushed = 0;
    }

    fn push(&mut self, index: usize, cost: C, estimated_cost: C) {
        let rank = match self.tie_break {
            TieBreak::Fifo => u64::MAX - self.pushed,
            TieBreak::Lifo => self.pushed,
        };
        self.pushed += 1;
        self.frontier.push(SmallestCostHolder {
            estimated_cost,
            cost,
            rank,
            index,
        });
    }

    /// Number of distinct nodes that were given a cost during the last search.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The node stored at `index` of the cost table.
    pub fn node(&self, index: usize) -> Option<&N> {
        self.table.get_index(index).map(|(node, _)| node)
    }

    /// The best known cost of `node` after the last search.
    pub fn cost_of(&self, node: &N) -> Option<C> {
        self.table.get(node).map(|entry| entry.cost)
    }

    /// Runs a best-first search from `start` and returns every goal node that is reached at the
    /// optimal cost, or [None] if no goal can be reached.
    ///
    /// The `heuristic` must be consistent (zero gives Dijkstra). A node is final once it is
    /// popped at its recorded cost; entries popped at a higher cost are stale and skipped. Goal
    /// nodes are not expanded. The search only stops once the frontier holds nothing that could
    /// still reach a goal at the optimal cost, so all equal-cost predecessors are recorded.
    pub fn search<FN, IN, FH, FS>(
        &mut self,
        start: &N,
        mut successors: FN,
        mut heuristic: FH,
        mut success: FS,
    ) -> Result<Option<Reached<C>>, SearchError>
    where
        FN: FnMut(&N) -> IN,
        IN: IntoIterator<Item = (N, C)>,
        FH: FnMut(&N) -> C,
        FS: FnMut(&N) -> bool,
    {
        self.clear();
        self.table.insert(
            start.clone(),
            Entry {
                cost: Zero::zero(),
                predecessors: SmallVec::new(),
            },
        );
        let h = heuristic(start);
        self.push(0, Zero::zero(), h);

        let mut reached: Option<Reached<C>> = None;
        let mut expanded = 0usize;
        while let Some(SmallestCostHolder {
            estimated_cost,
            cost,
            index,
            ..
        }) = self.frontier.pop()
        {
            if let Some(reached) = &reached {
                if estimated_cost > reached.cost {
                    break;
                }
            }
            let node = {
                let (node, entry) = self
                    .table
                    .get_index(index)
                    .ok_or(SearchError::UnknownNode(index))?;
                // We may have inserted a node several times into the binary heap if we found
                // a better way to access it. Ensure that we are currently dealing with the
                // best path and discard the others.
                if cost > entry.cost {
                    continue;
                }
                if success(node) {
                    match reached.as_mut() {
                        Some(found) => {
                            if found.cost == cost {
                                found.goals.push(index);
                            }
                        }
                        None => {
                            reached = Some(Reached {
                                cost,
                                goals: smallvec![index],
                            })
                        }
                    }
                    continue;
                }
                node.clone()
            };
            expanded += 1;

            for (successor, move_cost) in successors(&node) {
                let new_cost = cost + move_cost;
                let push = match self.table.entry(successor) {
                    Vacant(e) => {
                        let h = heuristic(e.key());
                        let n = e.index();
                        e.insert(Entry {
                            cost: new_cost,
                            predecessors: smallvec![index],
                        });
                        Some((n, h))
                    }
                    Occupied(mut e) => {
                        let best = e.get().cost;
                        if new_cost < best {
                            let h = heuristic(e.key());
                            let n = e.index();
                            let entry = e.get_mut();
                            entry.cost = new_cost;
                            entry.predecessors.clear();
                            entry.predecessors.push(index);
                            Some((n, h))
                        } else {
                            if new_cost == best && !e.get().predecessors.contains(&index) {
                                e.get_mut().predecessors.push(index);
                            }
                            None
                        }
                    }
                };
                if let Some((n, h)) = push {
                    self.push(n, new_cost, new_cost + h);
                }
            }
        }
        debug!(
            "Search expanded {} nodes and costed {} nodes",
            expanded,
            self.table.len()
        );
        Ok(reached)
    }

    /// Walks back from the node at `index` along the first recorded predecessor of every node and
    /// returns the path from the start to that node.
    pub fn reverse_path(&self, index: usize) -> Result<Vec<N>, SearchError> {
        let mut path = Vec::new();
        let mut current = Some(index);
        while let Some(i) = current {
            if path.len() > self.table.len() {
                return Err(SearchError::PredecessorCycle(index));
            }
            let (node, entry) = self
                .table
                .get_index(i)
                .ok_or(SearchError::MissingPredecessor(i))?;
            path.push(node.clone());
            current = entry.predecessors.first().copied();
        }
        path.reverse();
        Ok(path)
    }

    /// Collects every node from which one of `goals` is reached along recorded optimal
    /// predecessors, the goals themselves included. Uses an explicit work list, so the depth of
    /// the predecessor graph is not limited by the call stack.
    pub fn optimal_nodes(&self, goals: &[usize]) -> Result<Vec<N>, SearchError> {
        let mut visited: FxHashSet<usize> = FxHashSet::default();
        let mut stack: Vec<usize> = goals.to_vec();
        let mut nodes = Vec::new();
        while let Some(i) = stack.pop() {
            if !visited.insert(i) {
                continue;
            }
            let (node, entry) = self
                .table
                .get_index(i)
                .ok_or(SearchError::MissingPredecessor(i))?;
            nodes.push(node.clone());
            stack.extend(
                entry
                    .predecessors
                    .iter()
                    .copied()
                    .filter(|p| !visited.contains(p)),
            );
        }
        Ok(nodes)
    }
}
