use core_types::{Match, WinType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Historical record between two teams over completed matches.
///
/// Invariant: `wins_a + wins_b + no_results == total_matches`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub team_a: Uuid,
    pub team_b: Uuid,
    pub total_matches: i64,
    pub wins_a: i64,
    pub wins_b: i64,
    pub no_results: i64,
    /// Winner ids of the most recent meetings, newest first; `None` entries
    /// are no-results.
    pub recent_results: Vec<Option<Uuid>>,
}

const RECENT_FORM_WINDOW: usize = 5;

/// Computes the head-to-head record from completed matches between the two
/// sides. `matches` must be ordered newest first and contain only fixtures
/// involving both `team_a` and `team_b`.
pub fn head_to_head(team_a: Uuid, team_b: Uuid, matches: &[Match]) -> HeadToHead {
    let mut record = HeadToHead {
        team_a,
        team_b,
        total_matches: 0,
        wins_a: 0,
        wins_b: 0,
        no_results: 0,
        recent_results: Vec::new(),
    };

    for m in matches {
        record.total_matches += 1;
        let decided = m.winner_id.filter(|_| m.win_type != Some(WinType::NoResult));
        match decided {
            Some(w) if w == team_a => record.wins_a += 1,
            Some(w) if w == team_b => record.wins_b += 1,
            _ => record.no_results += 1,
        }
        if record.recent_results.len() < RECENT_FORM_WINDOW {
            record.recent_results.push(decided);
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_types::MatchStatus;
    use pretty_assertions::assert_eq;

    fn fixture(team1: Uuid, team2: Uuid, winner: Option<Uuid>) -> Match {
        Match {
            id: Uuid::new_v4(),
            series_id: Uuid::new_v4(),
            team1_id: team1,
            team2_id: team2,
            stadium_id: Uuid::new_v4(),
            scheduled_at: Utc::now(),
            status: MatchStatus::Completed,
            toss_winner_id: Some(team1),
            toss_decision: None,
            winner_id: winner,
            win_type: winner.map(|_| WinType::Runs).or(Some(WinType::NoResult)),
            win_margin: winner.map(|_| 12),
            innings: 2,
            target: None,
            current_runs: 0,
            current_wickets: 0,
            balls_bowled: 0,
        }
    }

    #[test]
    fn counts_are_symmetric() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let matches = vec![
            fixture(a, b, Some(a)),
            fixture(b, a, Some(b)),
            fixture(a, b, None),
            fixture(a, b, Some(a)),
        ];
        let record = head_to_head(a, b, &matches);
        assert_eq!(record.wins_a, 2);
        assert_eq!(record.wins_b, 1);
        assert_eq!(record.no_results, 1);
        assert_eq!(
            record.wins_a + record.wins_b + record.no_results,
            record.total_matches
        );
    }

    #[test]
    fn recent_form_is_capped() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let matches: Vec<Match> = (0..8).map(|_| fixture(a, b, Some(a))).collect();
        let record = head_to_head(a, b, &matches);
        assert_eq!(record.recent_results.len(), 5);
        assert_eq!(record.total_matches, 8);
    }

    #[test]
    fn split_pair_is_one_one() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let matches = vec![fixture(a, b, Some(a)), fixture(b, a, Some(b))];
        let record = head_to_head(a, b, &matches);
        assert_eq!((record.wins_a, record.wins_b), (1, 1));
    }
}
