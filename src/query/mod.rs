//! Pure query operations over a game snapshot.
//!
//! Every function here is a read over an immutable snapshot slice; no
//! locking, no I/O. Records whose `Day` cannot be parsed are skipped by
//! date-based filters rather than failing the query. Caller-supplied date
//! strings, by contrast, must parse or the query fails with
//! [`AppError::MalformedDateInput`].
//!
//! Day comparisons use calendar dates in UTC: both "now" and each record's
//! `Day` are truncated to `YYYY-MM-DD` before comparison, so the
//! time-of-day part of `DateTime` never affects membership.

pub mod weekly;

pub use weekly::{week_window, weekly_game_count};

use crate::error::AppError;
use crate::models::{Game, Team};
use chrono::NaiveDate;
use tracing::debug;

/// Parses a caller-supplied `YYYY-MM-DD` date string.
pub fn parse_query_date(input: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::malformed_date(input))
}

/// Full snapshot in source order.
pub fn list_all(games: &[Game]) -> Vec<Game> {
    games.to_vec()
}

/// Games that have not gone final yet.
pub fn list_upcoming(games: &[Game]) -> Vec<Game> {
    games.iter().filter(|g| !g.is_closed).cloned().collect()
}

/// Games whose day falls inside `[start, end]` inclusive, optionally
/// restricted to games involving the named team (exact, case-sensitive).
pub fn list_by_date_range(
    games: &[Game],
    start_date: &str,
    end_date: &str,
    team: Option<&str>,
) -> Result<Vec<Game>, AppError> {
    let start = parse_query_date(start_date)?;
    let end = parse_query_date(end_date)?;

    let matches: Vec<Game> = games
        .iter()
        .filter(|game| {
            let Some(day) = game.day_date() else {
                return false;
            };
            let in_range = start <= day && day <= end;
            let team_match = team.is_none_or(|name| game.involves_team(name));
            in_range && team_match
        })
        .cloned()
        .collect();

    debug!(
        "Date range query [{}, {}] team={:?}: {} of {} games matched",
        start,
        end,
        team,
        matches.len(),
        games.len()
    );

    Ok(matches)
}

/// Games played on the given calendar day.
pub fn games_on_day(games: &[Game], day: NaiveDate) -> Vec<Game> {
    games
        .iter()
        .filter(|game| game.day_date() == Some(day))
        .cloned()
        .collect()
}

/// Finds the canonical team for a name by scanning the snapshot in order.
///
/// The id is taken from the matching side's `HomeTeamID`/`AwayTeamID`
/// field of the first record involving the team. Scan order follows the
/// snapshot, so the result is stable for a given snapshot.
pub fn find_team(games: &[Game], name: &str) -> Option<Team> {
    games.iter().find_map(|game| {
        if game.home_team.name == name {
            Some(Team {
                team_id: game.home_team_id,
                name: name.to_string(),
            })
        } else if game.away_team.name == name {
            Some(Team {
                team_id: game.away_team_id,
                name: name.to_string(),
            })
        } else {
            None
        }
    })
}
