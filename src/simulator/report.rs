//! Simulation report generation.

use serde::Serialize;
use std::collections::BTreeMap;

/// How a simulated campaign ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunOutcome {
    Victory,
    Dead,
    TimedOut,
}

/// Statistics for one simulated campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub outcome: RunOutcome,
    pub level_reached: u32,
    pub pilot_level: u32,
    pub turns: u64,
    pub kills: u32,
    pub items_collected: u32,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub victories: u32,
    pub deaths: u32,
    pub timeouts: u32,

    pub win_rate: f64,
    pub avg_level_reached: f64,
    pub avg_pilot_level: f64,
    pub avg_turns: f64,
    pub avg_kills: f64,
    pub avg_items_collected: f64,

    /// Dungeon level -> number of runs that died there
    pub deaths_per_level: BTreeMap<u32, u32>,

    pub runs: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let count =
            |outcome: RunOutcome| runs.iter().filter(|r| r.outcome == outcome).count() as u32;
        let victories = count(RunOutcome::Victory);
        let deaths = count(RunOutcome::Dead);
        let timeouts = count(RunOutcome::TimedOut);

        let divisor = num_runs.max(1) as f64;
        let mean = |f: fn(&RunStats) -> f64| runs.iter().map(f).sum::<f64>() / divisor;

        let mut deaths_per_level = BTreeMap::new();
        for run in runs.iter().filter(|r| r.outcome == RunOutcome::Dead) {
            *deaths_per_level.entry(run.level_reached).or_insert(0) += 1;
        }

        Self {
            num_runs,
            victories,
            deaths,
            timeouts,
            win_rate: victories as f64 / divisor,
            avg_level_reached: mean(|r| r.level_reached as f64),
            avg_pilot_level: mean(|r| r.pilot_level as f64),
            avg_turns: mean(|r| r.turns as f64),
            avg_kills: mean(|r| r.kills as f64),
            avg_items_collected: mean(|r| r.items_collected as f64),
            deaths_per_level,
            runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} victories, {} destroyed, {} timed out\n\n",
            self.num_runs, self.victories, self.deaths, self.timeouts
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Win Rate:            {:.1}%\n", self.win_rate * 100.0));
        report.push_str(&format!("  Avg Level Reached:   {:.1}\n", self.avg_level_reached));
        report.push_str(&format!("  Avg Pilot Level:     {:.1}\n", self.avg_pilot_level));
        report.push_str(&format!("  Avg Turns:           {:.0}\n", self.avg_turns));
        report.push_str(&format!("  Avg Kills:           {:.1}\n", self.avg_kills));
        report.push_str(&format!("  Avg Items Collected: {:.1}\n\n", self.avg_items_collected));

        report.push_str("── DEATHS BY LEVEL ──────────────────────────────────────────────\n");
        if self.deaths_per_level.is_empty() {
            report.push_str("  No deaths\n");
        }
        for (level, deaths) in &self.deaths_per_level {
            let pct = (*deaths as f64 / self.num_runs.max(1) as f64) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  Level {:2}: {:>3} {:>5.1}% {}\n", level, deaths, pct, bar));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(outcome: RunOutcome, level_reached: u32) -> RunStats {
        RunStats {
            outcome,
            level_reached,
            pilot_level: 3,
            turns: 400,
            kills: 12,
            items_collected: 4,
        }
    }

    #[test]
    fn test_report_generation() {
        let report = SimReport::from_runs(vec![
            run(RunOutcome::Victory, 20),
            run(RunOutcome::Dead, 5),
            run(RunOutcome::Dead, 5),
            run(RunOutcome::TimedOut, 10),
        ]);
        assert_eq!(report.num_runs, 4);
        assert_eq!(report.victories, 1);
        assert_eq!(report.deaths, 2);
        assert_eq!(report.timeouts, 1);
        assert!((report.win_rate - 0.25).abs() < 1e-9);
        assert!((report.avg_level_reached - 10.0).abs() < 1e-9);
        assert_eq!(report.deaths_per_level.get(&5), Some(&2));
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(Vec::new());
        assert_eq!(report.num_runs, 0);
        assert_eq!(report.win_rate, 0.0);
        assert!(report.to_text().contains("No deaths"));
    }

    #[test]
    fn test_json_report() {
        let report = SimReport::from_runs(vec![run(RunOutcome::Dead, 7)]);
        let json = report.to_json().expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["deaths"], 1);
        assert_eq!(value["deaths_per_level"]["7"], 1);
        assert_eq!(value["runs"][0]["outcome"], "Dead");
    }
}
