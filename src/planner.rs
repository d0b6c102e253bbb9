//! # The planner: from a situation and a desired outcome to a plan
//!
//! The [`Planner`] is the search engine at the core of the crate: given an
//! agent's current [`WorldState`](crate::WorldState), a goal (a partial
//! state), and an [`ActionCatalog`], it finds the lowest-cost ordered
//! sequence of actions whose cumulative effects satisfy the goal.
//!
//! Planning is a best-first graph search over world-state snapshots:
//!
//! 1. Path cost `g` accumulates each action's [`get_cost`](crate::Action::get_cost)
//!    evaluated in the state the action would be performed in, so dynamic
//!    costs steer the search away from (say) crossing open ground while the
//!    player is watching.
//! 2. The heuristic `h` counts goal facts not yet satisfied.
//! 3. The frontier pops nodes by ascending `f = g + h`; ties resolve
//!    first-in-first-out by discovery order, so identical inputs always
//!    produce identical plans.
//! 4. Reaching the same world state twice keeps only the cheaper path, and
//!    paths are cut off at the configured depth bound.
//!
//! "No plan" is an ordinary outcome, not an error: the planner returns an
//! empty sequence both when the goal is unreachable and when every route
//! exceeds the depth bound. The embedding agent is expected to substitute
//! its idle/default behavior.
//!
//! ## Basic usage
//!
//! ```
//! use tactician::{Action, ActionCatalog, Planner, WorldState};
//!
//! let mut catalog = ActionCatalog::new();
//!
//! let mut find_cover = Action::<()>::new("find_cover", 1.0).unwrap();
//! find_cover.effects.set("has_cover", true);
//! catalog.add_action(find_cover);
//!
//! let mut seek_cover = Action::<()>::new("seek_cover", 2.0).unwrap();
//! seek_cover.preconditions.set("has_cover", true);
//! seek_cover.preconditions.set("in_cover", false);
//! seek_cover.effects.set("in_cover", true);
//! catalog.add_action(seek_cover);
//!
//! let mut state = WorldState::new();
//! state.set("has_cover", false);
//! state.set("in_cover", false);
//!
//! let mut goal = WorldState::new();
//! goal.set("in_cover", true);
//!
//! let planner = Planner::new();
//! let plan = planner.plan(&(), &catalog, &state, &goal);
//!
//! let names: Vec<_> = plan.iter().map(|a| a.name.as_str()).collect();
//! assert_eq!(names, ["find_cover", "seek_cover"]);
//! ```

use crate::search::find_plan;
use crate::{Action, ActionCatalog, WorldState};
use std::sync::Arc;

/// An ordered sequence of action handles; the first element executes first.
pub type Plan<C> = Vec<Arc<Action<C>>>;

/// The search engine that turns a situation and a goal into a [`Plan`].
///
/// A `Planner` holds no search state between calls — every `plan()`
/// invocation is self-contained — so one instance can serve a single agent
/// or be shared across all of them. The only knob is the depth bound, the
/// maximum number of actions a plan may contain, which also bounds the
/// worst-case search cost.
///
/// Catalogs are passed into [`plan`](Planner::plan) explicitly; there is no
/// ambient registry.
#[derive(Debug, Clone)]
pub struct Planner {
    max_depth: usize,
}

impl Planner {
    /// Depth bound used by [`Planner::new`]: long enough for every behavior
    /// chain the shipped action set produces, short enough to keep a worst
    /// case search affordable mid-frame.
    pub const DEFAULT_MAX_DEPTH: usize = 10;

    /// Creates a planner with the default depth bound.
    pub fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Creates a planner with an explicit depth bound (the maximum number
    /// of actions in a returned plan; expected to be positive).
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// The configured depth bound.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Finds the lowest-cost action sequence that transforms `start` into a
    /// state satisfying `goal`.
    ///
    /// Returns an empty plan when `start` already satisfies `goal`, when no
    /// action sequence reaches the goal, or when every sequence that would
    /// is longer than the depth bound. Those last two are indistinguishable
    /// by design; callers react to an empty plan, not to its cause.
    ///
    /// The caller-supplied `start`, `goal`, catalog, and context are never
    /// mutated. Cost strategies are evaluated against intermediate search
    /// states and must stay deterministic for the duration of the call.
    ///
    /// # Examples
    ///
    /// ```
    /// use tactician::{ActionCatalog, Planner, WorldState};
    ///
    /// let planner = Planner::new();
    /// let catalog = ActionCatalog::<()>::new();
    ///
    /// // An empty goal is satisfied by any state: empty plan.
    /// let plan = planner.plan(&(), &catalog, &WorldState::new(), &WorldState::new());
    /// assert!(plan.is_empty());
    /// ```
    pub fn plan<C>(
        &self,
        ctx: &C,
        catalog: &ActionCatalog<C>,
        start: &WorldState,
        goal: &WorldState,
    ) -> Plan<C> {
        find_plan(ctx, catalog, start, goal, self.max_depth)
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Action;

    fn make_action(
        name: &str,
        cost: f32,
        pre: Vec<(&str, bool)>,
        eff: Vec<(&str, bool)>,
    ) -> Action<()> {
        let mut action = Action::new(name, cost).unwrap();
        for (k, v) in pre {
            action.preconditions.set(k, v);
        }
        for (k, v) in eff {
            action.effects.set(k, v);
        }
        action
    }

    fn names(plan: &Plan<()>) -> Vec<&str> {
        plan.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn test_empty_goal_yields_empty_plan() {
        let mut catalog = ActionCatalog::new();
        catalog.add_action(make_action("anything", 1.0, vec![], vec![("x", true)]));

        let mut state = WorldState::new();
        state.set("whatever", 3);

        let planner = Planner::new();
        assert!(planner
            .plan(&(), &catalog, &state, &WorldState::new())
            .is_empty());
        assert!(planner
            .plan(&(), &catalog, &WorldState::new(), &WorldState::new())
            .is_empty());
    }

    #[test]
    fn test_satisfied_goal_yields_empty_plan() {
        let mut catalog = ActionCatalog::new();
        catalog.add_action(make_action("noop", 1.0, vec![], vec![("done", true)]));

        let mut state = WorldState::new();
        state.set("done", true);

        let mut goal = WorldState::new();
        goal.set("done", true);

        let planner = Planner::new();
        assert!(planner.plan(&(), &catalog, &state, &goal).is_empty());
    }

    #[test]
    fn test_simple_chain() {
        // a -> b -> c
        let planner = Planner::new();
        let mut catalog = ActionCatalog::new();
        catalog.add_action(make_action("a", 1.0, vec![("start", true)], vec![("mid", true)]));
        catalog.add_action(make_action("b", 1.0, vec![("mid", true)], vec![("end", true)]));
        catalog.add_action(make_action("c", 1.0, vec![("end", true)], vec![("goal", true)]));

        let mut initial = WorldState::new();
        initial.set("start", true);
        initial.set("mid", false);
        initial.set("end", false);
        initial.set("goal", false);

        let mut goal = WorldState::new();
        goal.set("goal", true);

        let plan = planner.plan(&(), &catalog, &initial, &goal);
        assert_eq!(names(&plan), ["a", "b", "c"]);
    }

    #[test]
    fn test_unmet_precondition_blocks_only_route() {
        let planner = Planner::new();
        let mut catalog = ActionCatalog::new();
        catalog.add_action(make_action(
            "locked_door",
            1.0,
            vec![("prereq", true)],
            vec![("goal", true)],
        ));

        let mut initial = WorldState::new();
        initial.set("prereq", false);

        let mut goal = WorldState::new();
        goal.set("goal", true);

        assert!(planner.plan(&(), &catalog, &initial, &goal).is_empty());
    }

    #[test]
    fn test_cheaper_path_preferred() {
        let planner = Planner::new();
        let mut catalog = ActionCatalog::new();
        catalog.add_action(make_action("gold_plated", 10.0, vec![], vec![("goal", true)]));
        catalog.add_action(make_action("sensible", 1.0, vec![], vec![("goal", true)]));

        let mut goal = WorldState::new();
        goal.set("goal", true);

        let plan = planner.plan(&(), &catalog, &WorldState::new(), &goal);
        assert_eq!(names(&plan), ["sensible"]);
    }

    #[test]
    fn test_depth_bound_is_respected() {
        let mut catalog = ActionCatalog::new();
        catalog.add_action(make_action("s1", 1.0, vec![], vec![("a", true)]));
        catalog.add_action(make_action("s2", 1.0, vec![("a", true)], vec![("b", true)]));
        catalog.add_action(make_action("s3", 1.0, vec![("b", true)], vec![("c", true)]));
        catalog.add_action(make_action("s4", 1.0, vec![("c", true)], vec![("goal", true)]));

        let mut goal = WorldState::new();
        goal.set("goal", true);

        let shallow = Planner::with_max_depth(3);
        assert!(shallow
            .plan(&(), &catalog, &WorldState::new(), &goal)
            .is_empty());

        let deep = Planner::with_max_depth(4);
        let plan = deep.plan(&(), &catalog, &WorldState::new(), &goal);
        assert_eq!(names(&plan), ["s1", "s2", "s3", "s4"]);
    }

    #[test]
    fn test_plan_actions_are_catalog_handles() {
        let planner = Planner::new();
        let mut catalog = ActionCatalog::new();
        let handle = catalog.add_action(make_action("only", 1.0, vec![], vec![("goal", true)]));

        let mut goal = WorldState::new();
        goal.set("goal", true);

        let plan = planner.plan(&(), &catalog, &WorldState::new(), &goal);
        assert_eq!(plan.len(), 1);
        assert!(Arc::ptr_eq(&plan[0], &handle));
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let planner = Planner::new();
        let mut catalog = ActionCatalog::new();
        catalog.add_action(make_action("go", 1.0, vec![], vec![("goal", true)]));

        let mut initial = WorldState::new();
        initial.set("goal", false);
        let initial_before = initial.clone();

        let mut goal = WorldState::new();
        goal.set("goal", true);
        let goal_before = goal.clone();

        let _ = planner.plan(&(), &catalog, &initial, &goal);
        assert_eq!(initial, initial_before);
        assert_eq!(goal, goal_before);
    }
}
