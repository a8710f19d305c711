//! Knockout bracket partitioned by round.
//!
//! The data service lists knockout matches in bracket-slot order, so each
//! round keeps input order as-is. No re-seeding is done and no check is made
//! that a round's participants won the previous round.

use serde::Serialize;

use crate::fixture::Match;
use crate::types::Stage;

/// Knockout matches grouped by stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Bracket {
    pub round_of_16: Vec<Match>,
    pub quarter_final: Vec<Match>,
    pub semi_final: Vec<Match>,
    #[serde(rename = "final")]
    pub finals: Vec<Match>,
}

impl Bracket {
    /// Matches of one knockout stage. Empty for [`Stage::Group`].
    pub fn round(&self, stage: Stage) -> &[Match] {
        match stage {
            Stage::Group => &[],
            Stage::RoundOf16 => &self.round_of_16,
            Stage::QuarterFinal => &self.quarter_final,
            Stage::SemiFinal => &self.semi_final,
            Stage::Final => &self.finals,
        }
    }

    /// Rounds in progression order, including empty ones.
    pub fn rounds(&self) -> impl Iterator<Item = (Stage, &[Match])> {
        Stage::KNOCKOUT
            .into_iter()
            .map(move |stage| (stage, self.round(stage)))
    }

    pub fn is_empty(&self) -> bool {
        self.rounds().all(|(_, matches)| matches.is_empty())
    }
}

/// Partitions knockout matches by stage. Group-stage matches are ignored.
pub fn assemble(knockout_matches: &[Match]) -> Bracket {
    let mut bracket = Bracket::default();
    for m in knockout_matches {
        let round = match m.stage {
            Stage::Group => continue,
            Stage::RoundOf16 => &mut bracket.round_of_16,
            Stage::QuarterFinal => &mut bracket.quarter_final,
            Stage::SemiFinal => &mut bracket.semi_final,
            Stage::Final => &mut bracket.finals,
        };
        round.push(m.clone());
    }
    bracket
}
