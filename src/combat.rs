//! Concrete action set for shooter NPC combatants.
//!
//! This module supplies the behavior vocabulary the planner searches over
//! for a standard enemy soldier: the named facts its senses produce, the
//! [`CombatContext`] its cost hooks read, and a catalog of combat actions
//! with their preconditions, effects, and cost strategies.
//!
//! Fact values are produced upstream (cover evaluation, line of sight,
//! target memory, combat-state tracking) and consumed here as opaque
//! snapshot entries; nothing in this module knows how they are computed.

use crate::{Action, ActionCatalog, FactValue, Result, WorldState};

/// Names of the facts the combat action set reads and writes.
pub mod facts {
    /// The target is currently in line of sight.
    pub const PLAYER_VISIBLE: &str = "player_visible";
    /// The target is looking away or otherwise occupied.
    pub const PLAYER_DISTRACTED: &str = "player_distracted";
    /// This agent is actively fighting the target.
    pub const PLAYER_ENGAGED: &str = "player_engaged";
    /// The target is pinned by suppressing fire.
    pub const PLAYER_SUPPRESSED: &str = "player_suppressed";
    /// A usable cover point has been claimed.
    pub const HAS_COVER: &str = "has_cover";
    /// The agent is physically behind its cover point.
    pub const IN_COVER: &str = "in_cover";
    /// Incoming fire was registered this engagement.
    pub const UNDER_FIRE: &str = "under_fire";
    /// Health dropped below the retreat threshold.
    pub const HEALTH_LOW: &str = "health_low";
    /// The weapon has rounds chambered.
    pub const WEAPON_LOADED: &str = "weapon_loaded";
}

/// Per-agent tuning handle threaded through cost hooks.
///
/// The planner treats this as opaque; only the combat cost strategies read
/// it. Difficulty scaling happens upstream and lands here as a plain
/// multiplier.
#[derive(Debug, Clone)]
pub struct CombatContext {
    /// Scales down the cost of direct engagement; 1.0 is baseline, higher
    /// values make the agent pick a fight sooner.
    pub aggression: f32,
}

impl Default for CombatContext {
    fn default() -> Self {
        Self { aggression: 1.0 }
    }
}

fn holds(state: &WorldState, fact: &str) -> bool {
    state.get(fact) == Some(&FactValue::Bool(true))
}

/// Claim a reachable cover point. Crossing ground while the target watches
/// triples the price.
pub fn find_cover() -> Result<Action<CombatContext>> {
    let mut action = Action::new("find_cover", 1.0)?.with_cost_fn(|_ctx, state| {
        if holds(state, facts::PLAYER_VISIBLE) {
            3.0
        } else {
            1.0
        }
    });
    action.effects.set(facts::HAS_COVER, true);
    Ok(action)
}

/// Move into the claimed cover point.
pub fn seek_cover() -> Result<Action<CombatContext>> {
    let mut action = Action::new("seek_cover", 2.0)?;
    action.preconditions.set(facts::HAS_COVER, true);
    action.preconditions.set(facts::IN_COVER, false);
    action.effects.set(facts::IN_COVER, true);
    Ok(action)
}

/// Chamber a fresh magazine. Reloading exposed and in view is three times
/// as expensive as reloading safe.
pub fn reload_weapon() -> Result<Action<CombatContext>> {
    let mut action = Action::new("reload_weapon", 1.0)?.with_cost_fn(|_ctx, state| {
        if holds(state, facts::PLAYER_VISIBLE) && !holds(state, facts::IN_COVER) {
            3.0
        } else {
            1.0
        }
    });
    action.preconditions.set(facts::WEAPON_LOADED, false);
    action.effects.set(facts::WEAPON_LOADED, true);
    Ok(action)
}

/// Open fire on a visible target.
pub fn engage_player() -> Result<Action<CombatContext>> {
    let mut action = Action::new("engage_player", 1.0)?
        .with_cost_fn(|ctx: &CombatContext, _state| 1.0 / ctx.aggression.max(0.1));
    action.preconditions.set(facts::PLAYER_VISIBLE, true);
    action.preconditions.set(facts::WEAPON_LOADED, true);
    action.effects.set(facts::PLAYER_ENGAGED, true);
    Ok(action)
}

/// Strike while the target is looking the other way. Nearly free against a
/// distracted target, prohibitive against an alert one.
pub fn ambush_player() -> Result<Action<CombatContext>> {
    let mut action = Action::new("ambush_player", 100.0)?.with_cost_fn(|_ctx, state| {
        if holds(state, facts::PLAYER_VISIBLE) && holds(state, facts::PLAYER_DISTRACTED) {
            0.1
        } else {
            100.0
        }
    });
    action.preconditions.set(facts::PLAYER_VISIBLE, true);
    action.effects.set(facts::PLAYER_ENGAGED, true);
    Ok(action)
}

/// Empty the magazine at the target's position to pin them down.
pub fn suppressing_fire() -> Result<Action<CombatContext>> {
    let mut action = Action::new("suppressing_fire", 1.5)?;
    action.preconditions.set(facts::WEAPON_LOADED, true);
    action.preconditions.set(facts::PLAYER_VISIBLE, true);
    action.effects.set(facts::PLAYER_SUPPRESSED, true);
    action.effects.set(facts::WEAPON_LOADED, false);
    Ok(action)
}

/// Break contact and get behind cover when badly hurt. Cheaper while
/// rounds are already coming in.
pub fn fall_back() -> Result<Action<CombatContext>> {
    let mut action = Action::new("fall_back", 1.0)?.with_cost_fn(|_ctx, state| {
        if holds(state, facts::UNDER_FIRE) {
            0.5
        } else {
            1.0
        }
    });
    action.preconditions.set(facts::HEALTH_LOW, true);
    action.effects.set(facts::IN_COVER, true);
    action.effects.set(facts::PLAYER_ENGAGED, false);
    Ok(action)
}

/// Builds the full soldier action catalog.
///
/// Insertion order doubles as the tie-break preference among equal-cost
/// routes: safety moves first, then weapon handling, then engagement.
pub fn combat_catalog() -> Result<ActionCatalog<CombatContext>> {
    let mut catalog = ActionCatalog::new();
    catalog.add_action(find_cover()?);
    catalog.add_action(seek_cover()?);
    catalog.add_action(fall_back()?);
    catalog.add_action(reload_weapon()?);
    catalog.add_action(suppressing_fire()?);
    catalog.add_action(engage_player()?);
    catalog.add_action(ambush_player()?);
    Ok(catalog)
}
