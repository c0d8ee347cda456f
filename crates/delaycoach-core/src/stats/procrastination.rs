//! Procrastination archetype classification.
//!
//! Aggregate statistics are computed once over the full task and check-in
//! collections, then matched against [`ARCHETYPE_RULES`], an ordered decision
//! list evaluated top to bottom. The first predicate that holds decides the
//! archetype; the last row always matches. Row order carries meaning: a
//! crisis sprinter who also writes long notes is still a crisis sprinter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::task::{CheckIn, Mood, Task};
use crate::time;

const LAST_MINUTE_DAYS: i64 = 2;
const SPRINT_DELTA: i32 = 20;
const LONG_NOTE_CHARS: usize = 50;
const SCATTER_MIN_TASKS: usize = 5;
const SCATTER_SPREAD: usize = 5;

/// Aggregates over a user's full history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorStats {
    pub task_count: usize,
    pub check_in_count: usize,
    /// Mean progress delta, 0 when there are no check-ins
    pub avg_progress_delta: f64,
    /// Check-ins per task, 0 when there are no tasks
    pub check_in_frequency: f64,
    pub zero_progress_count: usize,
    /// Any note longer than 50 characters
    pub has_long_notes: bool,
    /// Ids of tasks due within 2 days that have a check-in above +20
    pub last_minute_task_ids: Vec<String>,
    /// Per-task check-in counts in task order; only present above five tasks
    pub check_in_distribution: Option<Vec<usize>>,
    pub mood_counts: BTreeMap<Mood, usize>,
}

impl BehaviorStats {
    pub fn compute(tasks: &[Task], check_ins: &[CheckIn], now: DateTime<Utc>) -> Self {
        let check_in_count = check_ins.len();
        let avg_progress_delta = if check_in_count > 0 {
            check_ins.iter().map(|c| f64::from(c.progress_delta)).sum::<f64>()
                / check_in_count as f64
        } else {
            0.0
        };
        let check_in_frequency = if tasks.is_empty() {
            0.0
        } else {
            check_in_count as f64 / tasks.len() as f64
        };

        let mut per_task: HashMap<&str, Vec<&CheckIn>> = HashMap::new();
        for check_in in check_ins {
            per_task.entry(check_in.task_id.as_str()).or_default().push(check_in);
        }

        let last_minute_task_ids = tasks
            .iter()
            .filter(|t| {
                time::whole_days_until_due(t.due_date, now) <= LAST_MINUTE_DAYS
                    && per_task
                        .get(t.id.as_str())
                        .is_some_and(|cs| cs.iter().any(|c| c.progress_delta > SPRINT_DELTA))
            })
            .map(|t| t.id.clone())
            .collect();

        let check_in_distribution = (tasks.len() > SCATTER_MIN_TASKS).then(|| {
            tasks
                .iter()
                .map(|t| per_task.get(t.id.as_str()).map_or(0, Vec::len))
                .collect()
        });

        let mut mood_counts = BTreeMap::new();
        for check_in in check_ins {
            *mood_counts.entry(check_in.mood).or_insert(0) += 1;
        }

        Self {
            task_count: tasks.len(),
            check_in_count,
            avg_progress_delta,
            check_in_frequency,
            zero_progress_count: check_ins.iter().filter(|c| c.progress_delta == 0).count(),
            has_long_notes: check_ins.iter().any(|c| c.note_len() > LONG_NOTE_CHARS),
            last_minute_task_ids,
            check_in_distribution,
            mood_counts,
        }
    }

    /// Spread between the most and least checked-in task.
    pub fn distribution_spread(&self) -> Option<usize> {
        let dist = self.check_in_distribution.as_ref()?;
        let max = dist.iter().max()?;
        let min = dist.iter().min()?;
        Some(max - min)
    }
}

/// Behavioral archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Archetype {
    GettingStarted,
    CrisisSprinter,
    Perfectionist,
    Avoidant,
    Scattered,
    Balanced,
}

impl Archetype {
    pub fn name(&self) -> &'static str {
        match self {
            Archetype::GettingStarted => "Getting Started",
            Archetype::CrisisSprinter => "Crisis Sprinter",
            Archetype::Perfectionist => "Perfectionist",
            Archetype::Avoidant => "Avoidant",
            Archetype::Scattered => "Scattered",
            Archetype::Balanced => "Balanced",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Archetype::GettingStarted => "Add some tasks to get personalized insights.",
            Archetype::CrisisSprinter => {
                "You always sprint at the last second. High stress, high risk."
            }
            Archetype::Perfectionist => "You're polishing nothing. Draft first, refine later.",
            Archetype::Avoidant => "Rare check-ins and zero progress. Avoidance is the enemy.",
            Archetype::Scattered => "Many tasks, uneven attention. Focus wins.",
            Archetype::Balanced => "Good balance of consistency and progress. Keep it up.",
        }
    }

    pub fn tips(&self) -> [&'static str; 3] {
        match self {
            Archetype::GettingStarted => [
                "Add your first task",
                "Do regular check-ins",
                "Track your progress",
            ],
            Archetype::CrisisSprinter => [
                "Start tasks within 24 hours of creation",
                "Do smaller daily check-ins instead of weekly",
                "Aim for +5% daily instead of +30% weekly",
            ],
            Archetype::Perfectionist => [
                "Set a timer: 25 min drafting, no editing",
                "Aim for completion, not perfection",
                "Revise only after finishing the first draft",
            ],
            Archetype::Avoidant => [
                "Check in daily, even if progress is small",
                "Break tasks into 15-minute chunks",
                "Just show up and do 1 sentence",
            ],
            Archetype::Scattered => [
                "Work on max 3 tasks per week",
                "Complete one before starting another",
                "Use priority to decide what to focus on",
            ],
            Archetype::Balanced => [
                "Maintain your current check-in rhythm",
                "Increase progress per session by 2-5%",
                "Celebrate small wins to stay motivated",
            ],
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the decision list.
pub struct ArchetypeRule {
    pub archetype: Archetype,
    pub matches: fn(&BehaviorStats) -> bool,
}

/// Ordered decision list; first match wins, last row always matches.
pub const ARCHETYPE_RULES: &[ArchetypeRule] = &[
    ArchetypeRule {
        archetype: Archetype::GettingStarted,
        matches: has_no_tasks,
    },
    ArchetypeRule {
        archetype: Archetype::CrisisSprinter,
        matches: sprints_at_deadline,
    },
    ArchetypeRule {
        archetype: Archetype::Perfectionist,
        matches: polishes_in_small_steps,
    },
    ArchetypeRule {
        archetype: Archetype::Avoidant,
        matches: avoids_progress,
    },
    ArchetypeRule {
        archetype: Archetype::Scattered,
        matches: spreads_attention_unevenly,
    },
    ArchetypeRule {
        archetype: Archetype::Balanced,
        matches: always,
    },
];

fn has_no_tasks(s: &BehaviorStats) -> bool {
    s.task_count == 0
}

fn sprints_at_deadline(s: &BehaviorStats) -> bool {
    s.last_minute_task_ids.len() as f64 >= s.task_count as f64 * 0.5
}

fn polishes_in_small_steps(s: &BehaviorStats) -> bool {
    s.check_in_frequency > 2.0 && s.avg_progress_delta < 8.0 && s.has_long_notes
}

fn avoids_progress(s: &BehaviorStats) -> bool {
    s.check_in_frequency < 1.0 || s.zero_progress_count as f64 > s.check_in_count as f64 * 0.6
}

fn spreads_attention_unevenly(s: &BehaviorStats) -> bool {
    s.task_count > SCATTER_MIN_TASKS
        && s.distribution_spread().is_some_and(|spread| spread > SCATTER_SPREAD)
}

fn always(_: &BehaviorStats) -> bool {
    true
}

/// Walk the decision list.
pub fn classify(stats: &BehaviorStats) -> Archetype {
    ARCHETYPE_RULES
        .iter()
        .find(|rule| (rule.matches)(stats))
        .map_or(Archetype::Balanced, |rule| rule.archetype)
}

/// Archetype plus its fixed guidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcrastinationProfile {
    pub archetype: Archetype,
    #[serde(rename = "type")]
    pub type_name: String,
    pub description: String,
    pub tips: Vec<String>,
}

impl From<Archetype> for ProcrastinationProfile {
    fn from(archetype: Archetype) -> Self {
        Self {
            archetype,
            type_name: archetype.name().to_string(),
            description: archetype.description().to_string(),
            tips: archetype.tips().iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Classify a full history into a procrastination profile.
pub fn get_procrastination_type(
    tasks: &[Task],
    check_ins: &[CheckIn],
    now: DateTime<Utc>,
) -> ProcrastinationProfile {
    let stats = BehaviorStats::compute(tasks, check_ins, now);
    let archetype = classify(&stats);
    tracing::debug!(
        archetype = %archetype,
        tasks = stats.task_count,
        check_ins = stats.check_in_count,
        "classified procrastination profile"
    );
    archetype.into()
}
