//! Weekly per-team game aggregation.
//!
//! Weeks are Monday–Sunday windows anchored to the first Monday on or
//! after January 1 of the target year. A game between two teams counts
//! once for each side, so a single game raises two team counters.

use crate::models::{Game, GameOpponent, TeamGameCount};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashMap;
use tracing::debug;

/// Computes the inclusive `[start, end]` window for the given week.
///
/// Week 1 starts on the first Monday on or after January 1; if January 1
/// is itself a Monday, week 1 starts on January 1. Returns `None` only
/// when the year is outside the representable calendar range.
pub fn week_window(week_number: i32, year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    // num_days_from_sunday: Sunday = 0 .. Saturday = 6
    let days_to_monday = (8 - jan_first.weekday().num_days_from_sunday() as i64) % 7;
    let week_one_start = jan_first.checked_add_signed(Duration::days(days_to_monday))?;

    let start = week_one_start.checked_add_signed(Duration::days((week_number as i64 - 1) * 7))?;
    let end = start.checked_add_signed(Duration::days(6))?;
    Some((start, end))
}

/// Counts games per team inside the given week.
///
/// Output is sorted descending by game count; teams with equal counts
/// keep first-encountered order. Records without a parseable day are
/// skipped. An unrepresentable year yields an empty result.
pub fn weekly_game_count(games: &[Game], week_number: i32, year: i32) -> Vec<TeamGameCount> {
    let Some((start, end)) = week_window(week_number, year) else {
        debug!("Week {} of year {} is not representable", week_number, year);
        return Vec::new();
    };

    debug!(
        "Counting games for week {} of {}: window [{}, {}]",
        week_number, year, start, end
    );

    let mut counts: Vec<TeamGameCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    fn slot(
        counts: &mut Vec<TeamGameCount>,
        index: &mut HashMap<String, usize>,
        name: &str,
    ) -> usize {
        *index.entry(name.to_string()).or_insert_with(|| {
            counts.push(TeamGameCount::new(name));
            counts.len() - 1
        })
    }

    for game in games {
        let Some(day) = game.day_date() else {
            continue;
        };
        if day < start || day > end {
            continue;
        }

        let game_date = day.format("%Y-%m-%d").to_string();
        let home = game.home_team.name.clone();
        let away = game.away_team.name.clone();

        // One game raises both counters, even if a data error makes the
        // names collide (the shared counter then rises by two)
        let home_idx = slot(&mut counts, &mut index, &home);
        counts[home_idx].game_count += 1;
        counts[home_idx].home_games.push(GameOpponent {
            opponent: away.clone(),
            game_date: game_date.clone(),
        });

        let away_idx = slot(&mut counts, &mut index, &away);
        counts[away_idx].game_count += 1;
        counts[away_idx].away_games.push(GameOpponent {
            opponent: home,
            game_date,
        });
    }

    // Stable sort keeps first-encountered order on ties
    counts.sort_by(|a, b| b.game_count.cmp(&a.game_count));
    counts
}
