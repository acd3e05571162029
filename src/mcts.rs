//! Monte Carlo Tree Search (MCTS) with UCT selection.
//!
//! Each search iteration:
//! - descends from the root with UCT until it reaches a node that still has
//!   untried actions, and expands one of them into a new child
//! - evaluates the new leaf with a random playout (or scores it directly if
//!   the game is already over there)
//! - walks back up the parent chain adding the outcome to every node
//!
//! Outcomes are always measured from the root state's scoring side, which
//! every descendant state inherits, so all nodes share one viewpoint.
//!
//! Nodes live in an arena owned by [`SearchTree`]. Children are stored as
//! indices in creation order and the parent link is an index too; neither
//! keeps anything alive on its own.

use fastrand::Rng;

use crate::error::{GameError, Result};
use crate::playout::{Evaluator, RandomRollout};
use crate::rules::{apply_move, is_terminal, legal_moves, result};
use crate::state::{GameState, Move, Outcome};

/// Index of a node inside its [`SearchTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in the search tree.
#[derive(Clone, Debug)]
pub struct SearchNode {
    /// The game position at this node
    pub state: GameState,
    /// Node this one was expanded from (`None` at the root)
    pub parent: Option<NodeId>,
    /// Move that led here from the parent (`None` at the root)
    pub parent_action: Option<Move>,
    /// Expanded children, in expansion order
    pub children: Vec<NodeId>,
    /// Number of visits
    pub visits: u32,
    /// Playouts won by the scoring side
    pub wins: u32,
    /// Playouts lost by the scoring side
    pub losses: u32,
    /// Legal moves not yet expanded; drained from the end
    pub untried_actions: Vec<Move>,
    terminal: bool,
}

impl SearchNode {
    fn new(
        state: GameState,
        parent: Option<NodeId>,
        parent_action: Option<Move>,
    ) -> Result<Self> {
        let terminal = is_terminal(&state);
        let untried_actions = if terminal {
            Vec::new()
        } else {
            legal_moves(&state)?
        };
        Ok(Self {
            state,
            parent,
            parent_action,
            children: Vec::new(),
            visits: 0,
            wins: 0,
            losses: 0,
            untried_actions,
            terminal,
        })
    }

    /// Wins minus losses.
    #[inline]
    pub fn q(&self) -> i64 {
        i64::from(self.wins) - i64::from(self.losses)
    }

    /// Mean result per visit, or `None` if never visited.
    pub fn value(&self) -> Option<f64> {
        (self.visits > 0).then(|| self.q() as f64 / f64::from(self.visits))
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_actions.is_empty()
    }
}

/// A search tree rooted at one game state.
#[derive(Clone, Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    exploration: f64,
}

impl SearchTree {
    /// Create a tree holding only the root.
    ///
    /// A terminal root gets no untried actions.
    ///
    /// # Errors
    /// `InvalidConfig` if `exploration` is NaN, infinite or negative.
    pub fn new(root_state: GameState, exploration: f64) -> Result<Self> {
        if !exploration.is_finite() || exploration < 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "exploration constant must be finite and non-negative, got {exploration}"
            )));
        }
        let root = SearchNode::new(root_state, None, None)?;
        Ok(Self {
            nodes: vec![root],
            exploration,
        })
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn exploration(&self) -> f64 {
        self.exploration
    }

    /// Total number of nodes in the tree, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_terminal(&self, id: NodeId) -> bool {
        self.node(id).is_terminal()
    }

    pub fn is_fully_expanded(&self, id: NodeId) -> bool {
        self.node(id).is_fully_expanded()
    }

    /// Turn the last untried action of `id` into a new child.
    ///
    /// # Errors
    /// - `GameOver` if the node is terminal
    /// - `IllegalState` if every action has already been expanded
    pub fn expand(&mut self, id: NodeId) -> Result<NodeId> {
        let node = self.node_mut(id);
        if node.terminal {
            return Err(GameError::GameOver);
        }
        let action = node.untried_actions.pop().ok_or_else(|| {
            GameError::IllegalState(format!("node {} has no untried actions", id.index()))
        })?;
        let state = apply_move(&node.state, &action)?;
        let child = SearchNode::new(state, Some(id), Some(action))?;

        let child_id = NodeId(self.nodes.len());
        self.nodes.push(child);
        self.node_mut(id).children.push(child_id);
        Ok(child_id)
    }

    /// UCT score of `child` under `parent` with exploration constant `c`:
    /// `q/n + c * sqrt(2 ln N / n)`.
    ///
    /// # Errors
    /// `IllegalState` if either node has no visits or the score is not finite.
    pub fn uct_score(&self, parent: NodeId, child: NodeId, c: f64) -> Result<f64> {
        let p = self.node(parent);
        let ch = self.node(child);
        if ch.visits == 0 {
            return Err(GameError::IllegalState(format!(
                "child {} has zero visits",
                child.index()
            )));
        }
        if p.visits == 0 {
            return Err(GameError::IllegalState(format!(
                "parent {} has zero visits",
                parent.index()
            )));
        }
        let n = f64::from(ch.visits);
        let exploit = ch.q() as f64 / n;
        let explore = c * (2.0 * f64::from(p.visits).ln() / n).sqrt();
        let score = exploit + explore;
        if !score.is_finite() {
            return Err(GameError::IllegalState(format!(
                "child {} scored {score} with c = {c}",
                child.index()
            )));
        }
        Ok(score)
    }

    /// The child of `id` with the highest UCT score; the first one wins ties.
    ///
    /// # Errors
    /// `IllegalState` if `id` has no children or a child was never visited.
    pub fn best_child(&self, id: NodeId, c: f64) -> Result<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &child in self.children(id) {
            let score = self.uct_score(id, child, c)?;
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((child, score)),
            }
        }
        best.map(|(child, _)| child)
            .ok_or_else(|| GameError::IllegalState(format!("node {} has no children", id.index())))
    }

    /// Descend from `id` to the node to evaluate next.
    ///
    /// Expands the first node on the way that still has untried actions;
    /// stops early at a terminal node.
    pub fn tree_policy(&mut self, id: NodeId) -> Result<NodeId> {
        let mut current = id;
        while !self.is_terminal(current) {
            if !self.is_fully_expanded(current) {
                return self.expand(current);
            }
            current = self.best_child(current, self.exploration)?;
        }
        Ok(current)
    }

    /// Add one visit and `outcome` to `id` and every ancestor up to the root.
    pub fn backpropagate(&mut self, id: NodeId, outcome: Outcome) {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node_mut(node_id);
            node.visits += 1;
            match outcome {
                Outcome::Win => node.wins += 1,
                Outcome::Loss => node.losses += 1,
                Outcome::Draw => {}
            }
            current = node.parent;
        }
    }

    /// Run `simulations` select/expand/evaluate/backpropagate cycles from
    /// the root and return the root child with the best mean result.
    ///
    /// # Errors
    /// - `GameOver` if the root is terminal
    /// - `IllegalState` if no child was ever created (zero simulations)
    /// - anything the evaluator returns
    pub fn best_action<E: Evaluator>(
        &mut self,
        simulations: usize,
        evaluator: &mut E,
        rng: &mut Rng,
    ) -> Result<NodeId> {
        let root = self.root();
        if self.is_terminal(root) {
            return Err(GameError::GameOver);
        }

        for _ in 0..simulations {
            let leaf = self.tree_policy(root)?;
            let node = self.node(leaf);
            let outcome = if node.is_terminal() {
                result(&node.state)
            } else {
                evaluator.evaluate(&node.state, rng)?
            };
            self.backpropagate(leaf, outcome);
        }

        let best = self.best_child(root, 0.0)?;
        log::debug!(
            "search: {simulations} simulations, {} nodes, {} root children, best {} value {:.3}",
            self.node_count(),
            self.children(root).len(),
            self.node(best)
                .parent_action
                .as_ref()
                .map_or_else(|| "-".to_string(), Move::to_string),
            self.node(best).value().unwrap_or_default(),
        );
        Ok(best)
    }

    /// Log statistics for the root's children.
    pub fn dump_children(&self) {
        for &child in self.children(self.root()) {
            let node = self.node(child);
            log::debug!(
                "move {} v={} w={} l={} value={:.3}",
                node.parent_action
                    .as_ref()
                    .map_or_else(|| "-".to_string(), Move::to_string),
                node.visits,
                node.wins,
                node.losses,
                node.value().unwrap_or_default(),
            );
        }
    }
}

/// Search `state` with random playouts and return the chosen move.
pub fn search(
    state: &GameState,
    simulations: usize,
    exploration: f64,
    rng: &mut Rng,
) -> Result<Move> {
    let mut tree = SearchTree::new(state.clone(), exploration)?;
    let best = tree.best_action(simulations, &mut RandomRollout, rng)?;
    tree.dump_children();
    tree.node(best)
        .parent_action
        .clone()
        .ok_or_else(|| GameError::IllegalState("best child has no parent action".to_string()))
}
