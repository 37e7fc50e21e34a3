//! The best-first search over configurations.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::rc::Rc;

use ordered_float::OrderedFloat;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::configuration::Configuration;
use crate::estimate::Tally;
use crate::pour::Pour;

/// Per-node increment added to frontier scores so that equal scores still order, earlier-generated nodes first.
pub const DEFAULT_TIE_BREAK: f64 = 1e-6;

/// How often, in expanded configurations, progress is logged at debug level.
const PROGRESS_INTERVAL: usize = 10_000;

/// Reasons a [`Searcher`] may fail.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum SearchError {
    /// Every configuration reachable from the start was generated and none of them is solved.
    #[error("puzzle is unsolvable: exhausted all {explored} reachable configurations")]
    Unsolvable {
        /// Configurations taken off the frontier before it ran dry.
        explored: usize,
    },
    /// More configurations were generated than [`SearchOptions::node_budget`] allows.
    #[error("gave up after generating {generated} configurations")]
    BudgetExhausted {
        /// Configurations generated, one past the budget.
        generated: usize,
    },
}

/// Knobs for one search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchOptions {
    /// Counting rule for the heuristic and the goal test.
    pub tally: Tally,
    /// See [`DEFAULT_TIE_BREAK`]. Keep this well below 1 divided by the number of nodes the search may generate,
    /// or it starts overriding real cost differences.
    pub tie_break: f64,
    /// Upper bound on generated configurations; `None` searches until the frontier runs dry.
    pub node_budget: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            tally: Tally::default(),
            tie_break: DEFAULT_TIE_BREAK,
            node_budget: None,
        }
    }
}

impl SearchOptions {
    /// Use `tally` for the heuristic and the goal test.
    pub fn with_tally(mut self, tally: Tally) -> Self {
        self.tally = tally;
        self
    }

    /// Use `tie_break` as the per-node score increment.
    pub fn with_tie_break(mut self, tie_break: f64) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Give up once more than `node_budget` configurations have been generated.
    pub fn with_node_budget(mut self, node_budget: usize) -> Self {
        self.node_budget = Some(node_budget);
        self
    }
}

/// A sequence of pours leading from a start configuration to a solved one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Solution {
    /// Pours in the order they are made. Empty when the start was already solved.
    pub moves: Vec<Pour>,
    /// Configurations taken off the frontier.
    pub explored: usize,
    /// Configurations put on the frontier, not counting the start.
    pub generated: usize,
}

impl Solution {
    /// Apply [`Self::moves`] to `start` in order, returning the final configuration, or `None` if some pour is illegal.
    pub fn replay(&self, start: &Configuration) -> Option<Configuration> {
        self.moves.iter()
            .try_fold(start.as_start(), |configuration, pour| configuration.apply_pour(pour.source, pour.destination))
    }
}

struct SearchNode {
    configuration: Rc<Configuration>,
    cost: usize,
}

/// Heuristic best-first search from one start configuration.
///
/// The searcher owns everything the search mutates; it is consumed by [`Self::run`] and nothing survives between
/// searches.
///
/// # Internals
/// Every configuration the search reaches becomes a node of a directed tree whose edges run from a configuration to
/// the children generated when it was expanded, so a node's single incoming edge is its predecessor link.
/// The frontier is a min-heap of `(score, node)`.
///
/// A configuration is marked seen as soon as it is generated, not when it is expanded. A configuration is therefore
/// never reopened through a cheaper path: the search always terminates but the solution is not necessarily the shortest.
pub struct Searcher {
    options: SearchOptions,
    tree: DiGraph<SearchNode, ()>,
    frontier: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeIndex)>>,
    seen: HashSet<Rc<Configuration>>,
    explored: usize,
    generated: usize,
}

impl Searcher {
    /// Prepare a search from `start`. Any pour metadata on `start` is cleared.
    pub fn new(start: &Configuration, options: SearchOptions) -> Self {
        let start = Rc::new(start.as_start());
        let score = start.estimate(options.tally);

        let mut tree = DiGraph::new();
        let root = tree.add_node(SearchNode { configuration: Rc::clone(&start), cost: 0 });
        let mut frontier = BinaryHeap::new();
        frontier.push(Reverse((OrderedFloat(score), root)));
        let mut seen = HashSet::new();
        seen.insert(start);

        Self { options, tree, frontier, seen, explored: 0, generated: 0 }
    }

    /// Run the search to completion.
    ///
    /// Returns [`SearchError::Unsolvable`] when the frontier runs dry, or [`SearchError::BudgetExhausted`] when the
    /// node budget is exceeded first.
    pub fn run(mut self) -> Result<Solution, SearchError> {
        while let Some(Reverse((score, node))) = self.frontier.pop() {
            self.explored += 1;
            let configuration = Rc::clone(&self.tree[node].configuration);
            trace!(score = score.0, cost = self.tree[node].cost, "expanding\n{}", configuration);

            if configuration.is_solved(self.options.tally) {
                let moves = self.moves_to(node);
                info!(moves = moves.len(), explored = self.explored, generated = self.generated, "found solution");
                return Ok(Solution { moves, explored: self.explored, generated: self.generated });
            }

            if self.explored % PROGRESS_INTERVAL == 0 {
                debug!(explored = self.explored, generated = self.generated, frontier = self.frontier.len(), "searching");
            }

            let cost = self.tree[node].cost + 1;
            for child in configuration.successors() {
                if self.seen.contains(&child) {
                    continue;
                }

                self.generated += 1;
                if self.options.node_budget.is_some_and(|budget| self.generated > budget) {
                    debug!(generated = self.generated, "node budget exhausted");
                    return Err(SearchError::BudgetExhausted { generated: self.generated });
                }

                let score = cost as f64
                    + child.estimate(self.options.tally)
                    + self.generated as f64 * self.options.tie_break;
                let child = Rc::new(child);
                self.seen.insert(Rc::clone(&child));
                let index = self.tree.add_node(SearchNode { configuration: child, cost });
                self.tree.add_edge(node, index, ());
                self.frontier.push(Reverse((OrderedFloat(score), index)));
            }
        }

        warn!(explored = self.explored, "no solution exists");
        Err(SearchError::Unsolvable { explored: self.explored })
    }

    /// Walk predecessor links from `node` back to the start, collecting the pour that produced each configuration.
    fn moves_to(&self, node: NodeIndex) -> Vec<Pour> {
        let mut pours = Vec::new();
        let mut current = Some(node);
        while let Some(index) = current {
            pours.push(self.tree[index].configuration.last_pour());
            current = self.tree.neighbors_directed(index, Direction::Incoming).next();
        }

        // the start carries no pour
        pours.into_iter().rev().flatten().collect()
    }
}
