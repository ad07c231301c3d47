//! Breadth-first search over board configurations.
//!
//! Key properties:
//! - FIFO frontier, so the first time the goal is dequeued its path is shortest
//! - Boards enter the visited map exactly once, at first discovery
//! - Nodes live in an arena indexed by creation order, so backtracking
//!   resolves each parent in O(1)
//! - FxHashMap for the visited map

use std::collections::hash_map::Entry;
use std::collections::VecDeque;
use std::time::Instant;

use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::board::{Board, Move};

/// Number of configurations reachable from any start (half of 9!).
pub const REACHABLE_STATES: usize = 181_440;

/// A vertex of the search tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub board: Board,
    /// Creation order, starting at 0 for the root.
    pub index: usize,
    /// Index of the node whose expansion created this one. The root points
    /// at itself.
    pub parent_index: usize,
    /// Moves from the root.
    pub depth: usize,
    /// The move that produced this node, `None` for the root.
    pub last_move: Option<Move>,
}

impl Node {
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent_index == self.index
    }
}

/// Where the search stands after a [`Searcher::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// The frontier still has nodes to expand.
    Expanding,
    /// The goal was dequeued; holds the goal node's index.
    Found(usize),
    /// The frontier emptied without reaching the goal.
    Exhausted,
}

impl SearchState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SearchState::Expanding)
    }
}

/// Final outcome of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Node indices from start to goal.
    Found(Vec<usize>),
    /// The goal is not reachable from the start.
    Exhausted,
}

/// Breadth-first searcher for one `(start, goal)` pair.
///
/// All search state is owned here; two searchers never share anything.
pub struct Searcher {
    goal: Board,
    /// Every node created so far; `nodes[i].index == i`.
    nodes: Vec<Node>,
    /// Board -> index of the node that first reached it.
    visited: FxHashMap<Board, usize>,
    frontier: VecDeque<usize>,
    /// Dequeued node indices, in dequeue order.
    explored: Vec<usize>,
    state: SearchState,
    /// Deepest layer dequeued so far, for progress logging.
    current_depth: usize,
    started: Instant,
}

impl Searcher {
    pub fn new(start: Board, goal: Board) -> Self {
        let root = Node {
            board: start,
            index: 0,
            parent_index: 0,
            depth: 0,
            last_move: None,
        };

        Self {
            goal,
            nodes: vec![root],
            visited: FxHashMap::default(),
            frontier: VecDeque::from([0]),
            explored: Vec::new(),
            state: SearchState::Expanding,
            current_depth: 0,
            started: Instant::now(),
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Number of distinct boards discovered so far.
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Dequeues and expands one node.
    ///
    /// Once a terminal state is reached further calls return it unchanged.
    pub fn step(&mut self) -> SearchState {
        if self.state.is_terminal() {
            return self.state;
        }

        let Some(current_index) = self.frontier.pop_front() else {
            self.state = SearchState::Exhausted;
            return self.state;
        };
        let current = self.nodes[current_index];
        self.explored.push(current_index);

        if current.depth > self.current_depth {
            self.current_depth = current.depth;
            debug!(
                "Searching depth {} (frontier {}, visited {})",
                current.depth,
                self.frontier.len() + 1,
                self.visited.len()
            );
        }

        if current.board == self.goal {
            self.state = SearchState::Found(current_index);
            return self.state;
        }

        // only the root is unbound here; everything else was bound on enqueue
        self.visited.entry(current.board).or_insert(current_index);

        for (mv, next) in current.board.successors_with_moves() {
            // check-and-insert in one lookup so a board is never enqueued twice
            if let Entry::Vacant(slot) = self.visited.entry(next) {
                let index = self.nodes.len();
                slot.insert(index);
                self.nodes.push(Node {
                    board: next,
                    index,
                    parent_index: current_index,
                    depth: current.depth + 1,
                    last_move: Some(mv),
                });
                self.frontier.push_back(index);
            }
        }

        if self.frontier.is_empty() {
            self.state = SearchState::Exhausted;
        }
        self.state
    }

    /// Runs the search to completion.
    pub fn run(mut self) -> SearchReport {
        info!(
            "Searching from {} to {}",
            self.nodes[0].board.to_line(),
            self.goal.to_line()
        );

        while !self.step().is_terminal() {}

        let outcome = match self.state {
            SearchState::Found(goal_index) => {
                SearchOutcome::Found(reconstruct_path(&self.nodes, goal_index))
            }
            _ => SearchOutcome::Exhausted,
        };

        match &outcome {
            SearchOutcome::Found(path) => info!(
                "Found a {}-move solution after exploring {} states in {:.3}s",
                path.len() - 1,
                self.explored.len(),
                self.started.elapsed().as_secs_f64()
            ),
            SearchOutcome::Exhausted => info!(
                "Goal unreachable: exhausted {} states in {:.3}s",
                self.explored.len(),
                self.started.elapsed().as_secs_f64()
            ),
        }

        SearchReport {
            visited_len: self.visited.len(),
            nodes: self.nodes,
            explored: self.explored,
            outcome,
        }
    }
}

/// Follows parent links from `goal_index` back to the root.
///
/// Returns node indices ordered root first.
fn reconstruct_path(nodes: &[Node], goal_index: usize) -> Vec<usize> {
    let mut path = vec![goal_index];
    let mut current = &nodes[goal_index];

    while !current.is_root() {
        current = &nodes[current.parent_index];
        path.push(current.index);
    }

    path.reverse();
    path
}

/// Everything a finished search produced.
#[derive(Debug, Clone)]
pub struct SearchReport {
    nodes: Vec<Node>,
    explored: Vec<usize>,
    visited_len: usize,
    outcome: SearchOutcome,
}

impl SearchReport {
    pub fn outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Found(_))
    }

    /// Every node created, in creation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Dequeued nodes, in the order they were dequeued.
    pub fn explored(&self) -> impl Iterator<Item = &Node> + '_ {
        self.explored.iter().map(|&index| &self.nodes[index])
    }

    pub fn explored_len(&self) -> usize {
        self.explored.len()
    }

    /// Number of distinct boards the search discovered.
    pub fn visited_len(&self) -> usize {
        self.visited_len
    }

    /// Nodes from start to goal, or `None` if the goal is unreachable.
    pub fn path(&self) -> Option<Vec<&Node>> {
        match &self.outcome {
            SearchOutcome::Found(path) => Some(path.iter().map(|&i| &self.nodes[i]).collect()),
            SearchOutcome::Exhausted => None,
        }
    }

    /// Boards from start to goal.
    pub fn path_boards(&self) -> Option<Vec<Board>> {
        self.path()
            .map(|path| path.into_iter().map(|node| node.board).collect())
    }

    /// The blank's moves from start to goal.
    pub fn moves(&self) -> Option<Vec<Move>> {
        self.path()
            .map(|path| path.into_iter().filter_map(|node| node.last_move).collect())
    }

    /// Length of the solution in moves.
    pub fn move_count(&self) -> Option<usize> {
        match &self.outcome {
            SearchOutcome::Found(path) => Some(path.len() - 1),
            SearchOutcome::Exhausted => None,
        }
    }
}

/// Finds a shortest path from `start` to `goal`.
pub fn solve(start: Board, goal: Board) -> SearchReport {
    Searcher::new(start, goal).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    fn board(tiles: [u8; 9]) -> Board {
        Board::new(tiles).unwrap()
    }

    fn scenario_b_start() -> Board {
        board([1, 4, 7, 0, 2, 8, 3, 5, 6])
    }

    #[test]
    fn test_start_equals_goal() {
        let report = solve(Board::GOAL, Board::GOAL);

        assert_eq!(report.outcome(), &SearchOutcome::Found(vec![0]));
        assert_eq!(report.path_boards(), Some(vec![Board::GOAL]));
        assert_eq!(report.explored_len(), 1);
        assert_eq!(report.move_count(), Some(0));
        assert_eq!(report.moves(), Some(vec![]));
    }

    #[test]
    fn test_three_move_solution() {
        let report = solve(scenario_b_start(), Board::GOAL);

        assert_eq!(report.outcome(), &SearchOutcome::Found(vec![0, 1, 6, 14]));
        assert_eq!(report.moves(), Some(vec![Move::Down, Move::Right, Move::Down]));
        assert_eq!(report.explored_len(), 15);
        assert_eq!(report.nodes().len(), 24);
        assert_eq!(report.visited_len(), 24);

        let boards = report.path_boards().unwrap();
        assert_eq!(boards.first(), Some(&scenario_b_start()));
        assert_eq!(boards.last(), Some(&Board::GOAL));
    }

    #[test]
    fn test_opposite_parity_is_exhausted() {
        let start = board([8, 2, 3, 1, 6, 4, 7, 0, 5]);
        let report = solve(start, Board::GOAL);

        assert_eq!(report.outcome(), &SearchOutcome::Exhausted);
        assert!(report.path().is_none());
        assert_eq!(report.move_count(), None);
        assert_eq!(report.visited_len(), REACHABLE_STATES);
        assert_eq!(report.explored_len(), REACHABLE_STATES);
    }

    #[test]
    fn test_long_solution_is_optimal() {
        let start = board([2, 8, 3, 1, 6, 4, 7, 0, 5]);
        let report = solve(start, Board::GOAL);

        assert_eq!(report.move_count(), Some(27));
        assert!(report.visited_len() <= REACHABLE_STATES);
    }

    #[test]
    fn test_path_steps_are_single_moves() {
        let report = solve(board([2, 8, 3, 1, 6, 4, 7, 0, 5]), Board::GOAL);
        let path = report.path().unwrap();

        assert!(path[0].is_root());
        for pair in path.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            assert_eq!(next.parent_index, prev.index);
            assert_eq!(next.depth, prev.depth + 1);
            let mv = next.last_move.unwrap();
            assert_eq!(prev.board.apply_move(mv), Some(next.board));
        }
    }

    #[test]
    fn test_scrambles_solve_within_scramble_length() {
        // a walk of n moves can never need more than n moves to undo
        let walk = [
            Move::Up,
            Move::Left,
            Move::Up,
            Move::Left,
            Move::Down,
            Move::Right,
            Move::Down,
            Move::Left,
        ];
        let mut scrambled = Board::GOAL;
        for (steps, mv) in walk.into_iter().enumerate() {
            scrambled = scrambled.apply_move(mv).unwrap();
            let report = solve(scrambled, Board::GOAL);
            let moves = report.move_count().unwrap();
            assert!(moves <= steps + 1, "{moves} > {} for {scrambled:?}", steps + 1);
            // parity: every move changes the blank's colour
            assert_eq!(moves % 2, (steps + 1) % 2);
        }
    }

    #[test]
    fn test_single_move_away() {
        let start = Board::GOAL.apply_move(Move::Up).unwrap();
        let report = solve(start, Board::GOAL);

        assert_eq!(report.moves(), Some(vec![Move::Down]));
        assert_eq!(report.explored_len(), 3);
    }

    #[test]
    fn test_search_is_deterministic() {
        let first = solve(scenario_b_start(), Board::GOAL);
        let second = solve(scenario_b_start(), Board::GOAL);

        let explored = |report: &SearchReport| -> Vec<Node> { report.explored().copied().collect() };
        assert_eq!(explored(&first), explored(&second));
        assert_eq!(first.outcome(), second.outcome());
    }

    #[test]
    fn test_nodes_are_unique_and_indexed_in_creation_order() {
        let report = solve(board([8, 2, 3, 1, 6, 4, 7, 0, 5]), Board::GOAL);

        let mut seen = FxHashSet::default();
        for (i, node) in report.nodes().iter().enumerate() {
            assert_eq!(node.index, i);
            assert!(node.parent_index <= node.index);
            assert!(seen.insert(node.board), "{:?} created twice", node.board);
        }
    }

    #[test]
    fn test_explored_depths_never_decrease() {
        let report = solve(scenario_b_start(), Board::GOAL);
        let depths: Vec<usize> = report.explored().map(|node| node.depth).collect();
        assert!(depths.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_step_reports_terminal_state() {
        let start = Board::GOAL.apply_move(Move::Up).unwrap();
        let mut searcher = Searcher::new(start, Board::GOAL);

        assert_eq!(searcher.state(), SearchState::Expanding);
        assert_eq!(searcher.step(), SearchState::Expanding);
        // root expanded into Up, Down (the goal) and Left
        assert_eq!(searcher.frontier_len(), 3);
        assert_eq!(searcher.visited_len(), 4);

        assert_eq!(searcher.step(), SearchState::Expanding);
        assert_eq!(searcher.step(), SearchState::Found(2));
        assert_eq!(searcher.step(), SearchState::Found(2));
    }
}
