//! # Actions: the edges of the planning graph
//!
//! An [`Action`] is a named unit of behavior an agent can perform:
//! preconditions that must hold for it to be selectable, effects applied to
//! the world state on success, and a cost the planner minimizes over.
//!
//! Actions are generic over an opaque context type `C` supplied by the
//! embedding application (an agent handle, timers, difficulty tuning — this
//! crate never looks inside it). The context is threaded through the cost
//! hook during planning and through the `execute`/`is_complete` hooks at
//! runtime.
//!
//! ## Cost strategies instead of subclasses
//!
//! Per-action cost logic is an *attached closure*, not a trait hierarchy:
//! the planner only depends on the `is_valid` / `get_result_state` /
//! `get_cost` capability set, so a single `Action` type with an optional
//! cost function covers every behavior.
//!
//! ```
//! use tactician::{Action, WorldState};
//!
//! // Flat-cost action: advancing through open ground.
//! let mut advance = Action::<()>::new("advance", 1.0).unwrap();
//! advance.effects.set("player_engaged", true);
//!
//! // Dynamic-cost action: ambushing is nearly free against a distracted
//! // target and prohibitive otherwise.
//! let mut ambush = Action::<()>::new("ambush", 100.0)
//!     .unwrap()
//!     .with_cost_fn(|_ctx, state| {
//!         if state.get("player_distracted") == Some(&true.into()) {
//!             0.1
//!         } else {
//!             100.0
//!         }
//!     });
//! ambush.effects.set("player_engaged", true);
//!
//! let mut state = WorldState::new();
//! state.set("player_distracted", true);
//! assert_eq!(ambush.get_cost(&(), &state), 0.1);
//! assert_eq!(advance.get_cost(&(), &state), 1.0);
//! ```

use crate::{GoapError, Result, WorldState};
use std::fmt;
use std::sync::Arc;

/// Cost strategy: scales an action's cost from the state it would be
/// performed in. Must be side-effect free and deterministic for a given
/// (context, state) pair within one planning call.
pub type CostFn<C> = Arc<dyn Fn(&C, &WorldState) -> f32 + Send + Sync>;

/// Runtime hook invoked by the execution layer (`execute` / `is_complete`).
pub type HookFn<C> = Arc<dyn Fn(&mut C) -> bool + Send + Sync>;

/// A named unit of behavior with preconditions, effects, and a cost.
///
/// Identity is by reference: plans hand back `Arc<Action<C>>` handles, and
/// two distinct instances never compare equal even with identical names.
///
/// # Examples
///
/// ```
/// use tactician::{Action, WorldState};
///
/// let mut seek_cover = Action::<()>::new("seek_cover", 2.0).unwrap();
/// seek_cover.preconditions.set("has_cover", true);
/// seek_cover.preconditions.set("in_cover", false);
/// seek_cover.effects.set("in_cover", true);
///
/// let mut state = WorldState::new();
/// state.set("has_cover", true);
/// state.set("in_cover", false);
/// assert!(seek_cover.is_valid(&state));
///
/// let after = seek_cover.get_result_state(&state);
/// assert_eq!(after.get("in_cover"), Some(&true.into()));
/// // The input state is untouched.
/// assert_eq!(state.get("in_cover"), Some(&false.into()));
/// ```
pub struct Action<C> {
    /// The name of the action. Non-empty; used for logs and plan readouts,
    /// never for identity.
    pub name: String,
    /// The base cost of performing this action.
    pub cost: f32,
    /// Facts that must hold for this action to be selectable.
    pub preconditions: WorldState,
    /// Facts overwritten when this action succeeds.
    pub effects: WorldState,
    cost_fn: Option<CostFn<C>>,
    execute_fn: Option<HookFn<C>>,
    is_complete_fn: Option<HookFn<C>>,
}

impl<C> Action<C> {
    /// Creates a new action with the given name and base cost.
    ///
    /// # Errors
    ///
    /// Returns [`GoapError::EmptyActionName`] for an empty name and
    /// [`GoapError::InvalidActionCost`] for a negative or non-finite cost.
    /// Zero cost is allowed; opportunistic actions legitimately approach it.
    ///
    /// ```
    /// use tactician::Action;
    ///
    /// assert!(Action::<()>::new("reload", 1.0).is_ok());
    /// assert!(Action::<()>::new("", 1.0).is_err());
    /// assert!(Action::<()>::new("reload", -1.0).is_err());
    /// ```
    pub fn new(name: impl Into<String>, cost: f32) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(GoapError::EmptyActionName);
        }
        if !cost.is_finite() || cost < 0.0 {
            return Err(GoapError::InvalidActionCost);
        }

        Ok(Self {
            name,
            cost,
            preconditions: WorldState::new(),
            effects: WorldState::new(),
            cost_fn: None,
            execute_fn: None,
            is_complete_fn: None,
        })
    }

    /// Attaches a cost strategy evaluated against the state the action
    /// would be performed in. Replaces the flat base cost during planning.
    pub fn with_cost_fn(mut self, f: impl Fn(&C, &WorldState) -> f32 + Send + Sync + 'static) -> Self {
        self.cost_fn = Some(Arc::new(f));
        self
    }

    /// Attaches the runtime `execute` hook dispatched by the execution
    /// layer when this action's turn in a plan comes up.
    pub fn with_execute(mut self, f: impl Fn(&mut C) -> bool + Send + Sync + 'static) -> Self {
        self.execute_fn = Some(Arc::new(f));
        self
    }

    /// Attaches the runtime `is_complete` hook polled by the execution
    /// layer each tick while this action is running.
    pub fn with_is_complete(mut self, f: impl Fn(&mut C) -> bool + Send + Sync + 'static) -> Self {
        self.is_complete_fn = Some(Arc::new(f));
        self
    }

    /// True iff every precondition is present in `state` with an equal
    /// value. Vacuously true for empty preconditions.
    pub fn is_valid(&self, state: &WorldState) -> bool {
        state.satisfies(&self.preconditions)
    }

    /// Returns a new state equal to `state` with every effect applied.
    /// The input state is never mutated.
    pub fn get_result_state(&self, state: &WorldState) -> WorldState {
        let mut result = state.clone();
        result.apply_effects(&self.effects);
        result
    }

    /// True iff **any** effect key/value pair matches the corresponding
    /// goal pair.
    ///
    /// This is a cheap relevance signal for tooling (e.g. the plan
    /// visualizer highlights goal-relevant actions with it). It is
    /// deliberately permissive and must not gate the search itself: an
    /// action whose effects only partially overlap a multi-key goal still
    /// "can satisfy" it here.
    ///
    /// ```
    /// use tactician::{Action, WorldState};
    ///
    /// let mut action = Action::<()>::new("fall_back", 1.0).unwrap();
    /// action.effects.set("in_cover", true);
    /// action.effects.set("player_engaged", false);
    ///
    /// let mut goal = WorldState::new();
    /// goal.set("in_cover", true);
    /// goal.set("weapon_loaded", true);
    ///
    /// // One of two goal facts matches an effect.
    /// assert!(action.can_satisfy_goal(&goal));
    /// ```
    pub fn can_satisfy_goal(&self, goal: &WorldState) -> bool {
        self.effects
            .facts()
            .iter()
            .any(|(key, value)| goal.get(key) == Some(value))
    }

    /// The cost of performing this action from `state`: the base cost, or
    /// the attached cost strategy's result if one is set.
    pub fn get_cost(&self, ctx: &C, state: &WorldState) -> f32 {
        match &self.cost_fn {
            Some(f) => f(ctx, state),
            None => self.cost,
        }
    }

    /// Begins executing this action at runtime. Invoked by the external
    /// execution layer when the action is dispatched from a plan; returns
    /// whether dispatch succeeded. Defaults to a no-op returning `true`.
    pub fn execute(&self, ctx: &mut C) -> bool {
        match &self.execute_fn {
            Some(f) => f(ctx),
            None => true,
        }
    }

    /// Polls whether this action has finished at runtime. Invoked by the
    /// external execution layer each tick; defaults to a no-op returning
    /// `true`, so an unconfigured action completes immediately.
    pub fn is_complete(&self, ctx: &mut C) -> bool {
        match &self.is_complete_fn {
            Some(f) => f(ctx),
            None => true,
        }
    }
}

impl<C> Clone for Action<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            cost: self.cost,
            preconditions: self.preconditions.clone(),
            effects: self.effects.clone(),
            cost_fn: self.cost_fn.clone(),
            execute_fn: self.execute_fn.clone(),
            is_complete_fn: self.is_complete_fn.clone(),
        }
    }
}

impl<C> fmt::Debug for Action<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("cost", &self.cost)
            .field("preconditions", &self.preconditions)
            .field("effects", &self.effects)
            .field("has_cost_fn", &self.cost_fn.is_some())
            .finish()
    }
}

impl<C> fmt::Display for Action<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
