//! Main simulation runner driving real sessions with the autopilot.
//!
//! Every run goes through `Session`, so results match real play. Statistics
//! are tracked externally from `TurnOutcome` values.

use super::autopilot::next_step;
use super::config::SimConfig;
use super::report::{RunOutcome, RunStats, SimReport};
use crate::core::session::{GamePhase, Session, TurnOutcome};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(config, rng);
        tracing::debug!(
            run = run_idx + 1,
            outcome = ?run.outcome,
            level = run.level_reached,
            turns = run.turns,
            "run finished"
        );

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {:?} on level {}, pilot level {}, {} turns, {} kills, {} items",
                run_idx + 1,
                config.num_runs,
                run.outcome,
                run.level_reached,
                run.pilot_level,
                run.turns,
                run.kills,
                run.items_collected
            );
        }

        all_runs.push(run);
    }

    SimReport::from_runs(all_runs)
}

/// Plays one campaign from level 1 until victory, death, or the turn limit.
pub fn simulate_single_run(config: &SimConfig, rng: ChaCha8Rng) -> RunStats {
    let mut session = Session::new(rng);
    session.start_new_game();

    let mut kills = 0;
    let mut items_collected = 0;
    let mut turns = 0;

    let outcome = loop {
        match session.phase() {
            GamePhase::Victory => break RunOutcome::Victory,
            GamePhase::Dead => break RunOutcome::Dead,
            GamePhase::Menu => break RunOutcome::TimedOut,
            GamePhase::Playing => {}
        }

        if turns >= config.max_turns_per_run {
            break RunOutcome::TimedOut;
        }

        let direction = session
            .level()
            .and_then(|level| next_step(level, session.player().position));
        let Some(direction) = direction else {
            tracing::warn!(level = session.level_number(), "autopilot has no reachable target");
            break RunOutcome::TimedOut;
        };

        match session.step(direction) {
            TurnOutcome::Attacked(result) if result.enemy_destroyed() => kills += 1,
            TurnOutcome::PickedUp { .. } => items_collected += 1,
            _ => {}
        }
        turns += 1;
    };

    RunStats {
        outcome,
        level_reached: session.level_number(),
        pilot_level: session.player().pilot.level,
        turns,
        kills,
        items_collected,
    }
}
