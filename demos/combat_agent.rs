use tactician::combat::{self, facts, CombatContext};
use tactician::{Planner, Result, WorldState};

fn print_plan(title: &str, plan: &tactician::Plan<CombatContext>) {
    println!("{}", title);
    if plan.is_empty() {
        println!("  (no plan — agent falls back to idle behavior)");
        return;
    }
    for (i, action) in plan.iter().enumerate() {
        println!("  Step {}: {}", i + 1, action.name);
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let catalog = combat::combat_catalog()?;
    let planner = Planner::new();
    let mut ctx = CombatContext::default();

    // Scenario 1: the player walked past without noticing the agent.
    let mut state = WorldState::new();
    state.set(facts::PLAYER_VISIBLE, true);
    state.set(facts::PLAYER_DISTRACTED, true);
    state.set(facts::WEAPON_LOADED, true);

    let mut goal = WorldState::new();
    goal.set(facts::PLAYER_ENGAGED, true);

    let plan = planner.plan(&ctx, &catalog, &state, &goal);
    print_plan("Distracted target, loaded weapon:", &plan);

    // Drive the plan the way the execution layer would: dispatch, poll,
    // advance.
    for action in &plan {
        action.execute(&mut ctx);
        while !action.is_complete(&mut ctx) {}
    }

    // Scenario 2: alerted player, empty magazine, rounds incoming.
    let mut state = WorldState::new();
    state.set(facts::PLAYER_VISIBLE, true);
    state.set(facts::PLAYER_DISTRACTED, false);
    state.set(facts::WEAPON_LOADED, false);
    state.set(facts::IN_COVER, false);
    state.set(facts::HAS_COVER, false);
    state.set(facts::UNDER_FIRE, true);

    let mut goal = WorldState::new();
    goal.set(facts::PLAYER_SUPPRESSED, true);

    let plan = planner.plan(&ctx, &catalog, &state, &goal);
    print_plan("\nAlerted target, dry weapon, under fire:", &plan);

    // Scenario 3: badly wounded; the only sane goal is safety.
    let mut state = WorldState::new();
    state.set(facts::HEALTH_LOW, true);
    state.set(facts::UNDER_FIRE, true);
    state.set(facts::IN_COVER, false);

    let mut goal = WorldState::new();
    goal.set(facts::IN_COVER, true);

    let plan = planner.plan(&ctx, &catalog, &state, &goal);
    print_plan("\nWounded under fire:", &plan);

    Ok(())
}
