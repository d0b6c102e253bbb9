use crate::{Action, ActionCatalog, WorldState};
use log::{debug, trace};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

/// Number of goal facts missing or unequal in `state`. Each mismatch
/// contributes exactly 1; an empty goal scores 0 everywhere.
///
/// Kept deliberately unweighted: with per-fact costs below 1.0 this is not
/// a strict lower bound, and the cost scales used by the shipped action set
/// account for that.
pub(crate) fn goal_mismatch(state: &WorldState, goal: &WorldState) -> f32 {
    goal.facts()
        .iter()
        .filter(|(key, value)| state.get(key.as_str()) != Some(*value))
        .count() as f32
}

/// A node in the search space: a state snapshot plus the bookkeeping to
/// reconstruct and price the path that produced it.
struct Node<C> {
    state: WorldState,
    /// Canonical dedup key of `state`, computed once.
    key: String,
    parent: Option<usize>,
    /// Action that led here from the parent.
    action: Option<Arc<Action<C>>>,
    /// Accumulated path cost from the root.
    g: f32,
    /// Estimated remaining cost to the goal.
    h: f32,
    /// Actions taken from the root.
    depth: usize,
}

impl<C> Node<C> {
    fn f(&self) -> f32 {
        self.g + self.h
    }
}

/// Frontier entry ordered by ascending `f`, then FIFO by discovery order,
/// so equal-cost plans resolve the same way on every run.
struct OpenEntry {
    f: f32,
    seq: u64,
    idx: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .partial_cmp(&other.f)
            .unwrap_or(Ordering::Equal)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Owns the transient state of one `plan()` invocation: the node arena,
/// the frontier, and the best-cost-per-state dedup map. Dropped wholesale
/// when the call returns.
struct SearchContext<C> {
    nodes: Vec<Node<C>>,
    open: BinaryHeap<Reverse<OpenEntry>>,
    /// Canonical state key -> (node index, best known g).
    best: HashMap<String, (usize, f32)>,
    next_seq: u64,
}

impl<C> SearchContext<C> {
    fn new(start: &WorldState, goal: &WorldState) -> Self {
        let root = Node {
            state: start.clone(),
            key: start.canonical_key(),
            parent: None,
            action: None,
            g: 0.0,
            h: goal_mismatch(start, goal),
            depth: 0,
        };

        let mut context = Self {
            nodes: Vec::new(),
            open: BinaryHeap::new(),
            best: HashMap::new(),
            next_seq: 0,
        };
        context.best.insert(root.key.clone(), (0, 0.0));
        context.nodes.push(root);
        context.push_open(0);
        context
    }

    fn push_open(&mut self, idx: usize) {
        let entry = OpenEntry {
            f: self.nodes[idx].f(),
            seq: self.next_seq,
            idx,
        };
        self.next_seq += 1;
        self.open.push(Reverse(entry));
    }

    /// Pops the lowest-`f` live frontier entry. Entries superseded by a
    /// cheaper rediscovery of the same state are skipped.
    fn pop_node(&mut self) -> Option<usize> {
        while let Some(Reverse(entry)) = self.open.pop() {
            let key = &self.nodes[entry.idx].key;
            if self.best.get(key).map(|&(idx, _)| idx) == Some(entry.idx) {
                return Some(entry.idx);
            }
        }
        None
    }

    /// Applies `action` to the parent's state and enqueues the successor,
    /// unless an equal state was already reached at equal or lower cost.
    fn try_add_successor(
        &mut self,
        parent_idx: usize,
        action: &Arc<Action<C>>,
        g: f32,
        goal: &WorldState,
    ) {
        let state = action.get_result_state(&self.nodes[parent_idx].state);
        let key = state.canonical_key();

        if let Some(&(_, best_g)) = self.best.get(&key) {
            if best_g <= g {
                return;
            }
        }

        let node = Node {
            h: goal_mismatch(&state, goal),
            depth: self.nodes[parent_idx].depth + 1,
            state,
            key: key.clone(),
            parent: Some(parent_idx),
            action: Some(Arc::clone(action)),
            g,
        };

        let idx = self.nodes.len();
        trace!(
            "discovered node {} via '{}' (g={:.2}, h={}, depth={})",
            idx,
            action.name,
            node.g,
            node.h,
            node.depth
        );
        self.nodes.push(node);
        self.best.insert(key, (idx, g));
        self.push_open(idx);
    }

    /// Walks the back-pointers from `idx` to the root and returns the
    /// actions in execution order.
    fn reconstruct_path(&self, idx: usize) -> Vec<Arc<Action<C>>> {
        let mut path = Vec::new();
        let mut current = idx;

        while let Some(node) = self.nodes.get(current) {
            if let Some(action) = &node.action {
                path.push(Arc::clone(action));
            }
            match node.parent {
                Some(parent) => current = parent,
                None => break,
            }
        }

        path.reverse();
        path
    }
}

/// Best-first search over the states reachable from `start` through the
/// catalog's actions. Returns the cheapest action sequence whose cumulative
/// effects satisfy `goal`, or an empty sequence when none exists within
/// `max_depth` actions.
pub(crate) fn find_plan<C>(
    ctx: &C,
    catalog: &ActionCatalog<C>,
    start: &WorldState,
    goal: &WorldState,
    max_depth: usize,
) -> Vec<Arc<Action<C>>> {
    if start.satisfies(goal) {
        debug!("goal already satisfied, returning empty plan");
        return Vec::new();
    }

    let mut search = SearchContext::new(start, goal);

    while let Some(idx) = search.pop_node() {
        if search.nodes[idx].state.satisfies(goal) {
            let plan = search.reconstruct_path(idx);
            debug!(
                "plan found: {} actions, cost {:.2}, {} states explored",
                plan.len(),
                search.nodes[idx].g,
                search.nodes.len()
            );
            return plan;
        }

        // Depth-bounded: the node still got its goal check above, but its
        // successors would exceed the bound.
        if search.nodes[idx].depth >= max_depth {
            continue;
        }

        for action in catalog.iter() {
            if !action.is_valid(&search.nodes[idx].state) {
                continue;
            }
            let g = search.nodes[idx].g + action.get_cost(ctx, &search.nodes[idx].state);
            search.try_add_successor(idx, action, g, goal);
        }
    }

    debug!(
        "no plan: frontier exhausted after {} states (depth bound {})",
        search.nodes.len(),
        max_depth
    );
    Vec::new()
}
