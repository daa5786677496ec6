//! Shared builders for constructing model values in tests.
//!
//! Kept in the library (not `tests/`) so both unit tests and integration
//! tests can use the same helpers.

use crate::models::{Customer, Game, Team};

/// Builds a canonical game on the given day between two named teams.
/// Ids are derived from the name lengths, which is enough for tests that
/// only look at names and days.
pub fn make_game(game_id: i32, day: &str, home: &str, away: &str) -> Game {
    Game {
        game_id,
        season: 2024,
        season_type: 1,
        status: Some("Scheduled".to_string()),
        day: Some(day.to_string()),
        date_time: Some(format!("{day}T19:00:00")),
        updated: None,
        is_closed: false,
        home_team: Team {
            team_id: home.len() as i32,
            name: home.to_string(),
        },
        away_team: Team {
            team_id: away.len() as i32,
            name: away.to_string(),
        },
        home_team_id: home.len() as i32,
        away_team_id: away.len() as i32,
        home_team_score: None,
        away_team_score: None,
        stadium_id: None,
        global_game_id: None,
        global_home_team_id: None,
        global_away_team_id: None,
        game_end_date_time: None,
        neutral_venue: None,
        date_time_utc: None,
    }
}

/// Builds a finished game with a final score.
pub fn make_closed_game(
    game_id: i32,
    day: &str,
    home: &str,
    away: &str,
    home_score: i32,
    away_score: i32,
) -> Game {
    let mut game = make_game(game_id, day, home, away);
    game.is_closed = true;
    game.status = Some("Final".to_string());
    game.home_team_score = Some(home_score);
    game.away_team_score = Some(away_score);
    game
}

/// Builds an active customer on the given plan with no backend quota.
pub fn make_customer(name: &str, plan: &str) -> Customer {
    Customer::new(name, plan)
}
