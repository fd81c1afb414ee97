//! Iteration driver: runs the search, logs progress and builds the report.

use std::fmt;
use std::time::{Duration, Instant};

use anyhow::Result;
use games_hanoi::{optimal_turns, State};
use mcts::{MctsSearch, SearchPath, SearchStats, UNSOLVED};
use tracing::{debug, info};

use crate::config::Config;

/// Outcome of a solver run, rendered as the program's stdout.
#[derive(Debug, Clone)]
pub struct Report {
    pub rings: u32,
    pub iterations: u32,
    pub elapsed: Duration,
    /// Path the finished tree prefers by UCT
    pub path: SearchPath<State>,
    /// Best total turn count any playout reached
    pub best_turns: Option<u32>,
    /// Shortest concrete solution seen
    pub best_solution: Option<SearchPath<State>>,
    pub stats: SearchStats,
    pub tree_size: usize,
}

impl Report {
    /// How far the best turn count is from `2^R - 1`, if it is above it.
    pub fn turns_above_optimal(&self) -> Option<u64> {
        let best = u64::from(self.best_turns?);
        best.checked_sub(optimal_turns(self.rings)).filter(|&gap| gap > 0)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Finished {} MCTS runs in {} ms.",
            self.iterations,
            self.elapsed.as_millis()
        )?;
        writeln!(f, "Resulting path by UCT:")?;
        for state in &self.path.states {
            writeln!(f, "{}", state)?;
        }
        writeln!(f, "{} turns total.", self.path.turns)?;

        if let Some(solution) = &self.best_solution {
            writeln!(f)?;
            writeln!(
                f,
                "Best solution found: {} turns (optimal {}).",
                solution.turns,
                optimal_turns(self.rings)
            )?;
            for state in &solution.states {
                writeln!(f, "{}", state)?;
            }
        }

        if let Some(gap) = self.turns_above_optimal() {
            writeln!(
                f,
                "Search settled {} turns above the optimal {}; try another seed or more iterations.",
                gap,
                optimal_turns(self.rings)
            )?;
        }
        Ok(())
    }
}

/// Drives an [`MctsSearch`] over the Hanoi puzzle one iteration at a time.
pub struct Solver {
    config: Config,
    search: MctsSearch<State>,
}

impl Solver {
    pub fn new(config: Config) -> Result<Self> {
        let root = State::new(config.rings)?;
        let search = MctsSearch::new(root, config.mcts_config())?;
        Ok(Self { config, search })
    }

    /// Run every configured iteration and collect the report.
    pub fn run(&mut self) -> Report {
        let start = Instant::now();
        let mut best = UNSOLVED;

        for i in 1..=self.config.iterations {
            let previous = best;
            best = self.search.run_iteration(best);

            if best < previous {
                debug!(iteration = i, best_turns = best, "Best turn count improved");
            }

            if self.config.log_interval > 0 && i % self.config.log_interval == 0 {
                info!(
                    iteration = i,
                    best_turns = best_label(best),
                    tree_size = self.search.tree().len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Search progress"
                );
            }
        }

        let elapsed = start.elapsed();
        let stats = self.search.stats().clone();
        info!(
            iterations = stats.iterations,
            dead_ends = stats.dead_end_playouts,
            improvements = stats.improvements,
            skipped_expansions = stats.skipped_expansions,
            tree_size = self.search.tree().len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Search finished"
        );

        Report {
            rings: self.config.rings,
            iterations: self.config.iterations,
            elapsed,
            path: self.search.extract_best_path(),
            best_turns: (best != UNSOLVED).then_some(best),
            best_solution: self.search.best_solution().cloned(),
            stats,
            tree_size: self.search.tree().len(),
        }
    }
}

fn best_label(best: u32) -> String {
    if best == UNSOLVED {
        "none".to_string()
    } else {
        best.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_hanoi::Move;

    fn config(rings: u32, iterations: u32) -> Config {
        Config {
            iterations,
            rings,
            exploration: std::f64::consts::SQRT_2,
            seed: 42,
            max_nodes: 0,
            random_tie_break: false,
            log_level: "info".into(),
            log_interval: 0,
        }
    }

    #[test]
    fn single_ring_is_solved_in_one_turn() {
        let mut solver = Solver::new(config(1, 10)).unwrap();
        let report = solver.run();

        assert_eq!(report.best_turns, Some(1));
        assert_eq!(report.stats.iterations, 10);
        let solution = report.best_solution.unwrap();
        assert_eq!(solution.turns, 1);
        assert!(solution.is_solved());
    }

    #[test]
    fn three_rings_reaches_optimum_or_reports_gap() {
        let mut solver = Solver::new(config(3, 5000)).unwrap();
        let report = solver.run();

        let best = report.best_turns.unwrap();
        assert!(best == 7 || best == 8);
        assert_eq!(report.best_solution.as_ref().map(|s| s.turns), Some(best));
        assert_eq!(report.turns_above_optimal(), (best == 8).then_some(1));
        assert!(report.tree_size > 1);
    }

    #[test]
    fn stalled_seed_reports_gap_above_optimal() {
        let mut cfg = config(3, 5000);
        cfg.seed = 1;
        let mut solver = Solver::new(cfg).unwrap();
        let report = solver.run();

        assert_eq!(report.best_turns, Some(8));
        assert_eq!(report.turns_above_optimal(), Some(1));
        assert!(report
            .to_string()
            .contains("Search settled 1 turns above the optimal 7"));
    }

    #[test]
    fn uct_path_starts_at_initial_state() {
        let mut solver = Solver::new(config(2, 50)).unwrap();
        let report = solver.run();

        assert_eq!(report.path.states[0], State::new(2).unwrap());
        assert_eq!(report.path.turns as usize, report.path.states.len() - 1);
    }

    #[test]
    fn new_rejects_invalid_rings() {
        assert!(Solver::new(config(0, 10)).is_err());
    }

    #[test]
    fn report_renders_summary_lines() {
        let root = State::new(1).unwrap();
        let solved = root.with_move(Move::new(0, 2));
        let report = Report {
            rings: 1,
            iterations: 3,
            elapsed: Duration::from_millis(12),
            path: SearchPath {
                states: vec![root.clone(), solved.clone()],
                turns: 1,
            },
            best_turns: Some(1),
            best_solution: Some(SearchPath {
                states: vec![root, solved],
                turns: 1,
            }),
            stats: SearchStats::default(),
            tree_size: 3,
        };

        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Finished 3 MCTS runs in 12 ms.");
        assert_eq!(lines[1], "Resulting path by UCT:");
        assert_eq!(lines[2], "[1] [] []");
        assert_eq!(lines[3], "[] [] [1]");
        assert_eq!(lines[4], "1 turns total.");
        assert!(text.contains("Best solution found: 1 turns (optimal 1)."));
        assert!(!text.contains("Search settled"));
    }

    #[test]
    fn report_omits_solution_when_none_found() {
        let report = Report {
            rings: 2,
            iterations: 1,
            elapsed: Duration::ZERO,
            path: SearchPath {
                states: vec![State::new(2).unwrap()],
                turns: 0,
            },
            best_turns: None,
            best_solution: None,
            stats: SearchStats::default(),
            tree_size: 1,
        };

        let text = report.to_string();
        assert!(text.contains("0 turns total."));
        assert!(!text.contains("Best solution"));
    }

    #[test]
    fn best_label_formats_sentinel() {
        assert_eq!(best_label(UNSOLVED), "none");
        assert_eq!(best_label(7), "7");
    }
}
