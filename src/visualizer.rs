use crate::{ActionCatalog, Plan, Result, WorldState};
use std::fs::File;
use std::io::Write;
use std::sync::Arc;

/// Renders a planning episode as a Graphviz DOT file.
///
/// Development tooling: the graph shows the start state, the goal, every
/// catalog action with its costs and conditions, which actions are valid in
/// the start state, which are relevant to the goal (via the permissive
/// any-effect-matches check), and highlights the chosen plan.
pub struct PlanVisualizer;

impl PlanVisualizer {
    /// Create a new plan visualizer
    pub fn new() -> Self {
        Self
    }

    /// Generate a DOT file for a planning episode
    pub fn visualize_plan<C>(
        &self,
        catalog: &ActionCatalog<C>,
        current_state: &WorldState,
        goal_state: &WorldState,
        plan: &Plan<C>,
        filename: &str,
    ) -> Result<()> {
        let mut file = File::create(filename)?;

        writeln!(file, "digraph plan {{")?;
        writeln!(file, "    rankdir=LR;")?;
        writeln!(
            file,
            "    node [shape=box, style=filled, fillcolor=lightblue];"
        )?;
        writeln!(file, "    edge [fontsize=10];")?;

        writeln!(
            file,
            "    initial [label=\"Current State\\n{}\", fillcolor=lightgreen];",
            Self::state_label(current_state)
        )?;
        writeln!(
            file,
            "    goal [label=\"Goal\\n{}\", fillcolor=lightpink];",
            Self::state_label(goal_state)
        )?;

        for (i, action) in catalog.iter().enumerate() {
            writeln!(
                file,
                "    action_{} [label=\"{}\\nBase cost: {}\\nPre: {}\\nEff: {}\"];",
                i,
                action.name,
                action.cost,
                Self::state_label(&action.preconditions),
                Self::state_label(&action.effects)
            )?;
        }

        // Valid in the current state.
        for (i, action) in catalog.iter().enumerate() {
            if action.is_valid(current_state) {
                writeln!(file, "    initial -> action_{} [label=\"valid\"];", i)?;
            }
        }

        // Relevant to the goal: at least one effect matches a goal fact.
        // Deliberately permissive; partial overlap still counts.
        for (i, action) in catalog.iter().enumerate() {
            if action.can_satisfy_goal(goal_state) {
                writeln!(file, "    action_{} -> goal [label=\"relevant\"];", i)?;
            }
        }

        // Highlight the chosen plan.
        for step in plan {
            if let Some(idx) = catalog.iter().position(|a| Arc::ptr_eq(a, step)) {
                writeln!(file, "    action_{} [fillcolor=lightcoral];", idx)?;
            }
        }

        writeln!(file, "}}")?;

        Ok(())
    }

    fn state_label(state: &WorldState) -> String {
        let mut pairs: Vec<_> = state.facts().iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect::<Vec<_>>()
            .join("\\n")
    }
}

impl Default for PlanVisualizer {
    fn default() -> Self {
        Self::new()
    }
}
