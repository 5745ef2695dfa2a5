//! Synthetic three-gameweek season shared by the simulator tests.

use footbot_engine::{ClubId, ElementId, MatchResult, Player, Position};

use crate::{
    aggregate::Prediction,
    provider::{GameweekData, SeasonDataset},
};

const NUM_PLAYERS: u32 = 30;

/// Which end of the element range the predictions made at a gameweek favour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Preference {
    High,
    Low,
}

fn position(element: u32) -> Position {
    match element {
        1..=4 => Position::Keeper,
        5..=12 => Position::Defender,
        13..=22 => Position::Midfielder,
        _ => Position::Forward,
    }
}

fn score(element: u32, preference: Preference) -> f64 {
    match preference {
        Preference::High => f64::from(element) / 10.0,
        Preference::Low => f64::from(NUM_PLAYERS + 1 - element) / 10.0,
    }
}

/// Thirty players priced at 50, two per club, everyone playing 90 minutes.
///
/// Predictions made at gameweek `t` cover `t..=3` and follow `preferences[t - 1]`.
pub(crate) fn dataset(preferences: [Preference; 3]) -> SeasonDataset {
    let mut dataset = SeasonDataset::new("test");
    for (made_at, preference) in (1..).zip(preferences) {
        let players = (1..=NUM_PLAYERS)
            .map(|e| {
                #[expect(clippy::cast_possible_truncation)]
                let club = ClubId(((e - 1) % 20 + 1) as u8);
                Player::new(ElementId(e), position(e), club, 50)
            })
            .collect();
        let predictions = (made_at..=3)
            .flat_map(|event| {
                (1..=NUM_PLAYERS).map(move |e| Prediction {
                    event,
                    element: ElementId(e),
                    score: score(e, preference),
                })
            })
            .collect();
        let results = (1..=NUM_PLAYERS)
            .map(|e| {
                #[expect(clippy::cast_possible_wrap)]
                let points = (e % 5) as i32 + 1;
                (ElementId(e), MatchResult { minutes: 90, points })
            })
            .collect();
        dataset.gameweeks.insert(
            made_at,
            GameweekData {
                players,
                predictions,
                results,
            },
        );
    }
    dataset
}
