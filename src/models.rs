//! Data model for the schedule dataset and the customers consuming it.
//!
//! The wire shape (`RawGame`) mirrors the upstream JSON exactly, including
//! its PascalCase keys and the polymorphic home/away team field that may be
//! a bare name string or an already-structured `{TeamID, Name}` object.
//! Normalization happens once, at ingestion: queries only ever see the
//! canonical [`Game`] with [`Team`] values on both sides.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical team reference used throughout the query layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "TeamID", default)]
    pub team_id: i32,
    #[serde(rename = "Name", default)]
    pub name: String,
}

/// Polymorphic team field as it appears in the source dataset.
///
/// Older dataset revisions carry a bare team name; newer ones embed a
/// structured team object. Both normalize to [`Team`] via [`TeamRef::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamRef {
    Structured(Team),
    Name(String),
}

impl TeamRef {
    /// Normalizes this reference into a canonical [`Team`].
    ///
    /// A structured reference carrying a non-empty name is returned
    /// unchanged, so normalization is idempotent. Anything else becomes
    /// `{team_id: fallback_id, name: <string form>}`.
    pub fn normalize(&self, fallback_id: i32) -> Team {
        match self {
            TeamRef::Structured(team) if !team.name.is_empty() => team.clone(),
            TeamRef::Structured(team) => Team {
                team_id: fallback_id,
                name: team.name.clone(),
            },
            TeamRef::Name(name) => Team {
                team_id: fallback_id,
                name: name.clone(),
            },
        }
    }
}

impl From<Team> for TeamRef {
    fn from(team: Team) -> Self {
        TeamRef::Structured(team)
    }
}

/// One game record exactly as the dataset serves it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGame {
    #[serde(rename = "GameID")]
    pub game_id: i32,
    #[serde(rename = "Season", default)]
    pub season: i32,
    #[serde(rename = "SeasonType", default)]
    pub season_type: i32,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
    #[serde(rename = "Day", default)]
    pub day: Option<String>,
    #[serde(rename = "DateTime", default)]
    pub date_time: Option<String>,
    #[serde(rename = "Updated", default)]
    pub updated: Option<String>,
    #[serde(rename = "IsClosed", default)]
    pub is_closed: bool,
    #[serde(rename = "HomeTeam")]
    pub home_team: TeamRef,
    #[serde(rename = "AwayTeam")]
    pub away_team: TeamRef,
    #[serde(rename = "HomeTeamID", default)]
    pub home_team_id: i32,
    #[serde(rename = "AwayTeamID", default)]
    pub away_team_id: i32,
    #[serde(rename = "HomeTeamScore", default)]
    pub home_team_score: Option<i32>,
    #[serde(rename = "AwayTeamScore", default)]
    pub away_team_score: Option<i32>,
    #[serde(rename = "StadiumID", default)]
    pub stadium_id: Option<i32>,
    #[serde(rename = "GlobalGameID", default)]
    pub global_game_id: Option<i64>,
    #[serde(rename = "GlobalHomeTeamID", default)]
    pub global_home_team_id: Option<i64>,
    #[serde(rename = "GlobalAwayTeamID", default)]
    pub global_away_team_id: Option<i64>,
    #[serde(rename = "GameEndDateTime", default)]
    pub game_end_date_time: Option<String>,
    #[serde(rename = "NeutralVenue", default)]
    pub neutral_venue: Option<bool>,
    #[serde(rename = "DateTimeUTC", default)]
    pub date_time_utc: Option<String>,
}

impl RawGame {
    /// Resolves both team references into canonical teams, producing the
    /// [`Game`] shape the query layer works with.
    pub fn resolve(self) -> Game {
        let home_team = self.home_team.normalize(self.home_team_id);
        let away_team = self.away_team.normalize(self.away_team_id);
        Game {
            game_id: self.game_id,
            season: self.season,
            season_type: self.season_type,
            status: self.status,
            day: self.day,
            date_time: self.date_time,
            updated: self.updated,
            is_closed: self.is_closed,
            home_team,
            away_team,
            home_team_id: self.home_team_id,
            away_team_id: self.away_team_id,
            home_team_score: self.home_team_score,
            away_team_score: self.away_team_score,
            stadium_id: self.stadium_id,
            global_game_id: self.global_game_id,
            global_home_team_id: self.global_home_team_id,
            global_away_team_id: self.global_away_team_id,
            game_end_date_time: self.game_end_date_time,
            neutral_venue: self.neutral_venue,
            date_time_utc: self.date_time_utc,
        }
    }
}

/// A game record with both team references normalized.
///
/// Serializes back out with the dataset's original PascalCase keys so the
/// transport layer can hand records to clients unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Game {
    #[serde(rename = "GameID")]
    pub game_id: i32,
    #[serde(rename = "Season")]
    pub season: i32,
    #[serde(rename = "SeasonType")]
    pub season_type: i32,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Day")]
    pub day: Option<String>,
    #[serde(rename = "DateTime")]
    pub date_time: Option<String>,
    #[serde(rename = "Updated")]
    pub updated: Option<String>,
    #[serde(rename = "IsClosed")]
    pub is_closed: bool,
    #[serde(rename = "HomeTeam")]
    pub home_team: Team,
    #[serde(rename = "AwayTeam")]
    pub away_team: Team,
    #[serde(rename = "HomeTeamID")]
    pub home_team_id: i32,
    #[serde(rename = "AwayTeamID")]
    pub away_team_id: i32,
    #[serde(rename = "HomeTeamScore")]
    pub home_team_score: Option<i32>,
    #[serde(rename = "AwayTeamScore")]
    pub away_team_score: Option<i32>,
    #[serde(rename = "StadiumID")]
    pub stadium_id: Option<i32>,
    #[serde(rename = "GlobalGameID")]
    pub global_game_id: Option<i64>,
    #[serde(rename = "GlobalHomeTeamID")]
    pub global_home_team_id: Option<i64>,
    #[serde(rename = "GlobalAwayTeamID")]
    pub global_away_team_id: Option<i64>,
    #[serde(rename = "GameEndDateTime")]
    pub game_end_date_time: Option<String>,
    #[serde(rename = "NeutralVenue")]
    pub neutral_venue: Option<bool>,
    #[serde(rename = "DateTimeUTC")]
    pub date_time_utc: Option<String>,
}

impl Game {
    /// Returns the game's calendar day, truncating any time-of-day part.
    ///
    /// The dataset writes `Day` either as a plain date or a full timestamp;
    /// only the leading `YYYY-MM-DD` is significant. Returns `None` when the
    /// field is missing or unparseable, so a single malformed record can be
    /// skipped instead of failing a whole query.
    pub fn day_date(&self) -> Option<NaiveDate> {
        let day = self.day.as_deref()?;
        let date_part = day.get(..10).unwrap_or(day);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }

    /// True if the given name matches the home or away team exactly.
    pub fn involves_team(&self, name: &str) -> bool {
        self.home_team.name == name || self.away_team.name == name
    }
}

/// Per-team opponent entry inside a weekly aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOpponent {
    pub opponent: String,
    #[serde(rename = "gameDate")]
    pub game_date: String,
}

/// Weekly per-team game count with home/away splits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamGameCount {
    #[serde(rename = "teamName")]
    pub team_name: String,
    #[serde(rename = "gameCount")]
    pub game_count: u32,
    #[serde(rename = "homeGames")]
    pub home_games: Vec<GameOpponent>,
    #[serde(rename = "awayGames")]
    pub away_games: Vec<GameOpponent>,
}

impl TeamGameCount {
    pub fn new(team_name: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            game_count: 0,
            home_games: Vec::new(),
            away_games: Vec::new(),
        }
    }
}

/// A resolved API consumer, produced fresh per request by the auth gate.
///
/// `remaining` mirrors the credential backend's live quota counter at
/// resolution time; it is read by the rate limiter but never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub plan: String,
    pub active: bool,
    #[serde(default, rename = "ownerId", skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<i64>,
    #[serde(default, rename = "expiresAt", skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

impl Customer {
    pub fn new(name: impl Into<String>, plan: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plan: plan.into(),
            active: true,
            owner_id: None,
            remaining: None,
            expires_at: None,
        }
    }
}
