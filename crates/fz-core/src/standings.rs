//! Group-stage standings.
//!
//! Tables are rebuilt from scratch on every call:
//!
//! 1. Discover each group's teams from every scheduled match, in order of
//!    first appearance (`team_a` before `team_b`).
//! 2. Fold in every match that has a result.
//! 3. Derive goal difference once all goals are counted.
//! 4. Stable sort by points, goal difference, then goals scored, all
//!    descending. Teams level on all three keep discovery order.
//!
//! Head-to-head, disciplinary points and drawing of lots are not applied.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::fixture::{Match, Outcome};
use crate::types::{GroupId, Stage, TeamName};

/// Points awarded for a win.
pub const POINTS_FOR_WIN: u32 = 3;

/// Points awarded to each side for a draw.
pub const POINTS_FOR_DRAW: u32 = 1;

/// Places per group that advance to the knockout stage.
pub const QUALIFYING_PLACES: usize = 2;

/// Ranked tables keyed by group.
pub type Standings = BTreeMap<GroupId, Vec<TeamStat>>;

/// One team's aggregate group-stage record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamStat {
    pub team: TeamName,
    pub group: GroupId,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
}

impl TeamStat {
    const fn new(team: TeamName, group: GroupId) -> Self {
        Self {
            team,
            group,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }

    /// Counters saturate at `u32::MAX` rather than wrap.
    fn record(&mut self, scored: u32, conceded: u32) {
        self.played = self.played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => {
                self.won = self.won.saturating_add(1);
                self.points = self.points.saturating_add(POINTS_FOR_WIN);
            }
            std::cmp::Ordering::Equal => {
                self.drawn = self.drawn.saturating_add(1);
                self.points = self.points.saturating_add(POINTS_FOR_DRAW);
            }
            std::cmp::Ordering::Less => self.lost = self.lost.saturating_add(1),
        }
    }
}

/// Teams of one group in discovery order, with an index by name.
#[derive(Default)]
struct GroupTable {
    teams: Vec<TeamStat>,
    index: HashMap<TeamName, usize>,
}

impl GroupTable {
    fn slot(&mut self, team: &TeamName, group: &GroupId) -> usize {
        if let Some(&slot) = self.index.get(team) {
            return slot;
        }
        let slot = self.teams.len();
        self.teams.push(TeamStat::new(team.clone(), group.clone()));
        self.index.insert(team.clone(), slot);
        slot
    }
}

/// Builds ranked tables for every group with at least one scheduled match.
///
/// Matches outside the group stage are ignored.
pub fn aggregate(group_matches: &[Match]) -> Standings {
    let mut tables: BTreeMap<GroupId, GroupTable> = BTreeMap::new();

    for m in group_matches {
        if m.stage != Stage::Group {
            tracing::debug!(id = m.id, stage = %m.stage, "ignoring non-group match in standings");
            continue;
        }
        let Some(group) = &m.group else {
            tracing::warn!(id = m.id, "group match without group letter");
            continue;
        };

        let table = tables.entry(group.clone()).or_default();
        let a = table.slot(&m.team_a, group);
        let b = table.slot(&m.team_b, group);

        if let Some(result) = m.result {
            table.teams[a].record(result.score_a, result.score_b);
            table.teams[b].record(result.score_b, result.score_a);
        }
    }

    tables
        .into_iter()
        .map(|(group, table)| {
            let mut teams = table.teams;
            for stat in &mut teams {
                stat.goal_difference =
                    i64::from(stat.goals_for) - i64::from(stat.goals_against);
            }
            rank(&mut teams);
            (group, teams)
        })
        .collect()
}

/// Stable sort by points, goal difference, goals for (all descending).
fn rank(teams: &mut [TeamStat]) {
    teams.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_difference.cmp(&a.goal_difference))
            .then_with(|| b.goals_for.cmp(&a.goals_for))
    });
}

/// The rows of a ranked table that advance to the knockout stage.
pub fn qualifiers(table: &[TeamStat]) -> &[TeamStat] {
    &table[..table.len().min(QUALIFYING_PLACES)]
}

/// Result counts for a group: (decisive, drawn).
pub fn result_counts<'a>(matches: impl IntoIterator<Item = &'a Match>) -> (u32, u32) {
    matches
        .into_iter()
        .filter_map(|m| m.result)
        .fold((0, 0), |(decisive, drawn), result| match result.outcome() {
            Outcome::Draw => (decisive, drawn + 1),
            Outcome::TeamA | Outcome::TeamB => (decisive + 1, drawn),
        })
}
