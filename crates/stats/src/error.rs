use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Match {match_id} references team {team_id} with no known name")]
    UnknownTeam { match_id: Uuid, team_id: Uuid },

    #[error("Match {match_id} has identical teams on both sides")]
    IdenticalTeams { match_id: Uuid },
}
