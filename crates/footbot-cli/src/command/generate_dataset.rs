use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Context as _;
use footbot_engine::{ClubId, ElementId, MatchResult, NUM_CLUBS, Player, Position};
use footbot_season::{GameweekData, Prediction, SeasonDataset};
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg64;

use crate::util::Output;

/// Position of the `i`-th generated player, in the 2:5:5:3 ratio of a squad.
const POSITION_CYCLE: [Position; 15] = [
    Position::Keeper,
    Position::Keeper,
    Position::Defender,
    Position::Defender,
    Position::Defender,
    Position::Defender,
    Position::Defender,
    Position::Midfielder,
    Position::Midfielder,
    Position::Midfielder,
    Position::Midfielder,
    Position::Midfielder,
    Position::Forward,
    Position::Forward,
    Position::Forward,
];

const MIN_PRICE: f64 = 40.0;
const MAX_PRICE: f64 = 130.0;
const POINTS_STD_DEV: f64 = 2.5;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateDatasetArg {
    /// Season label
    #[arg(long, default_value = "synthetic")]
    season: String,
    /// Number of players in the pool
    #[arg(long, default_value_t = 300)]
    num_players: u32,
    /// Number of gameweeks
    #[arg(long, default_value_t = 38)]
    gameweeks: u32,
    /// Gameweeks covered by each round of predictions, the current one included
    #[arg(long, default_value_t = 4)]
    prediction_horizon: u32,
    /// Standard deviation of the prediction error
    #[arg(long, default_value_t = 1.5)]
    prediction_noise: f64,
    /// Random seed
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

/// A generated player and the hidden traits their results are drawn from.
#[derive(Debug, Clone)]
struct SyntheticPlayer {
    player: Player,
    /// Expected points per played gameweek.
    ability: f64,
    /// Probability of playing in a gameweek.
    availability: f64,
}

impl SyntheticPlayer {
    #[expect(clippy::cast_possible_truncation)]
    fn random<R>(index: u32, rng: &mut R) -> Self
    where
        R: Rng,
    {
        let position = POSITION_CYCLE[index as usize % POSITION_CYCLE.len()];
        let club = ClubId((index % u32::from(NUM_CLUBS)) as u8 + 1);
        let quality: f64 = rng.random();
        let price = (MIN_PRICE + quality * (MAX_PRICE - MIN_PRICE)).round() as i64;
        let ability = match position {
            Position::Keeper => 2.0 + 2.5 * quality,
            Position::Defender => 2.0 + 3.0 * quality,
            Position::Midfielder | Position::Forward => 2.0 + 5.0 * quality,
        };
        Self {
            player: Player::new(ElementId(index + 1), position, club, price),
            ability,
            availability: rng.random_range(0.6..0.98),
        }
    }

    /// Drifts the price by one step in the direction of recent form.
    fn update_price<R>(&mut self, last_points: i32, rng: &mut R)
    where
        R: Rng,
    {
        if !rng.random_bool(0.2) {
            return;
        }
        #[expect(clippy::cast_possible_truncation)]
        let (min, max) = (MIN_PRICE as i64, MAX_PRICE as i64);
        let step = if f64::from(last_points) > self.ability {
            1
        } else {
            -1
        };
        self.player.price = (self.player.price + step).clamp(min, max);
    }

    #[expect(clippy::cast_possible_truncation)]
    fn play<R>(&self, points: &Normal<f64>, rng: &mut R) -> MatchResult
    where
        R: Rng,
    {
        if !rng.random_bool(self.availability) {
            return MatchResult::default();
        }
        let minutes = if rng.random_bool(0.8) {
            90
        } else {
            rng.random_range(1..90)
        };
        let points = (self.ability + points.sample(rng)).round().max(-2.0) as i32;
        MatchResult { minutes, points }
    }
}

pub(crate) fn run(arg: &GenerateDatasetArg) -> anyhow::Result<()> {
    eprintln!(
        "Generating {} gameweeks for {} players (seed {})...",
        arg.gameweeks, arg.num_players, arg.seed
    );
    let dataset = generate(arg)?;
    let total_predictions = dataset
        .gameweeks
        .values()
        .map(|g| g.predictions.len())
        .sum::<usize>();
    eprintln!("Generated {total_predictions} predictions.");

    Output::save_json(&dataset, arg.output.clone())?;
    Ok(())
}

fn generate(arg: &GenerateDatasetArg) -> anyhow::Result<SeasonDataset> {
    let GenerateDatasetArg {
        season,
        num_players,
        gameweeks,
        prediction_horizon,
        prediction_noise,
        seed,
        output: _,
    } = arg;
    anyhow::ensure!(*gameweeks > 0, "At least one gameweek is required");
    anyhow::ensure!(*prediction_horizon > 0, "Prediction horizon must be positive");

    let mut rng = Pcg64::seed_from_u64(*seed);
    let noise = Normal::new(0.0, *prediction_noise).context("Invalid prediction noise")?;
    let points_noise = Normal::new(0.0, POINTS_STD_DEV).context("Invalid points noise")?;

    let mut players = (0..*num_players)
        .map(|i| SyntheticPlayer::random(i, &mut rng))
        .collect::<Vec<_>>();

    let mut dataset = SeasonDataset::new(season.clone());
    for event in 1..=*gameweeks {
        let last_predicted = (event + prediction_horizon - 1).min(*gameweeks);
        let predictions = players
            .iter()
            .flat_map(|p| (event..=last_predicted).map(move |target| (p, target)))
            .map(|(p, target)| Prediction {
                event: target,
                element: p.player.element,
                score: p.availability * p.ability + noise.sample(&mut rng),
            })
            .collect::<Vec<_>>();
        let results = players
            .iter()
            .map(|p| (p.player.element, p.play(&points_noise, &mut rng)))
            .collect::<BTreeMap<_, _>>();

        dataset.gameweeks.insert(
            event,
            GameweekData {
                players: players.iter().map(|p| p.player.clone()).collect(),
                predictions,
                results: results.clone(),
            },
        );
        for p in &mut players {
            let points = results
                .get(&p.player.element)
                .map_or(0, |r| r.points);
            p.update_price(points, &mut rng);
        }
    }

    Ok(dataset)
}
