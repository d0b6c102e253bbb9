use tactician::combat::{self, facts, CombatContext};
use tactician::{PlanVisualizer, Planner, Result, WorldState};

fn main() -> Result<()> {
    env_logger::init();

    let catalog = combat::combat_catalog()?;
    let planner = Planner::new();
    let ctx = CombatContext::default();

    let mut state = WorldState::new();
    state.set(facts::HAS_COVER, false);
    state.set(facts::IN_COVER, false);
    state.set(facts::PLAYER_VISIBLE, true);

    let mut goal = WorldState::new();
    goal.set(facts::IN_COVER, true);

    let plan = planner.plan(&ctx, &catalog, &state, &goal);
    println!("Plan:");
    for (i, action) in plan.iter().enumerate() {
        println!("  Step {}: {}", i + 1, action.name);
    }

    let visualizer = PlanVisualizer::new();
    visualizer.visualize_plan(&catalog, &state, &goal, &plan, "combat_plan.dot")?;
    println!("\nWrote combat_plan.dot (render with: dot -Tpng combat_plan.dot -o combat_plan.png)");

    Ok(())
}
