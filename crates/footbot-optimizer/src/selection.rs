//! Squad selection as a 0/1 linear program.
//!
//! Every pool player `i` gets four binary variables: `fᵢ` (first team), `bᵢ` (bench),
//! `cᵢ` (captain) and `vᵢ` (vice-captain). With `sᵢ` the predicted score and `E` the
//! existing squad, the program is
//!
//! ```text
//! maximize   Σ sᵢ·(w_f·fᵢ + w_b·bᵢ + w_c·cᵢ + w_v·vᵢ) − penalty·(15 − Σ_{i∈E} (fᵢ + bᵢ))
//!
//! subject to Σ priceᵢ·(fᵢ + bᵢ) ≤ budget
//!            Σ_{i∈club} (fᵢ + bᵢ) ≤ 3                     for every club
//!            Σ_{i∈pos} (fᵢ + bᵢ) = quota(pos)             for every position
//!            min(pos) ≤ Σ_{i∈pos} fᵢ ≤ max(pos)           for every position
//!            Σ fᵢ = 11,  Σ bᵢ = 4,  fᵢ + bᵢ ≤ 1
//!            Σ cᵢ = 1,  Σ vᵢ = 1,  cᵢ + vᵢ ≤ 1
//!            cᵢ ≤ fᵢ + bᵢ,  vᵢ ≤ fᵢ + bᵢ
//!            Σ_{i∈E} (fᵢ + bᵢ) ≥ 15 − transfer_limit       when E is not empty
//! ```
//!
//! The penalty term is a constant plus `penalty` per kept player, so it stays linear.
//! Owned players must already carry their selling price in the pool.

use std::collections::{BTreeSet, HashSet};

use footbot_engine::{
    BENCH_SIZE, Captaincy, ClubId, ElementId, FIRST_TEAM_SIZE, Lineup, MAX_PLAYERS_PER_CLUB,
    Player, Position, Price, SQUAD_SIZE, first_team_bounds, squad_quota,
};
use serde::{Deserialize, Serialize};

use crate::{
    SelectionError,
    program::{BinaryProgram, Comparison, LinearExpr, Solution, VarId},
    solver::{SolveError, Solver},
};

const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Objective weights for the four roles.
///
/// `first_team + bench` and `captain + vice` must each sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub first_team: f64,
    pub bench: f64,
    pub captain: f64,
    pub vice: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            first_team: 0.9,
            bench: 0.1,
            captain: 0.9,
            vice: 0.1,
        }
    }
}

impl ScoringWeights {
    pub fn validate(&self) -> Result<(), SelectionError> {
        let all = [self.first_team, self.bench, self.captain, self.vice];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(SelectionError::InvalidArgument(format!(
                "scoring weights must be non-negative, got {all:?}"
            )));
        }
        if (self.first_team + self.bench - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(SelectionError::InvalidArgument(format!(
                "first team and bench factors must sum to 1, got {} + {}",
                self.first_team, self.bench
            )));
        }
        if (self.captain + self.vice - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(SelectionError::InvalidArgument(format!(
                "captain and vice factors must sum to 1, got {} + {}",
                self.captain, self.vice
            )));
        }
        Ok(())
    }
}

/// Everything besides the pool that shapes one selection.
#[derive(Debug, Clone, Copy)]
pub struct SelectionParams<'a> {
    /// Currently owned elements; empty when building from scratch.
    pub existing_squad: &'a [ElementId],
    pub budget: Price,
    pub weights: ScoringWeights,
    /// Objective cost per transfer.
    pub transfer_penalty: f64,
    /// Most transfers allowed (ignored when building from scratch).
    pub transfer_limit: usize,
}

impl<'a> SelectionParams<'a> {
    /// From-scratch selection with default weights and no penalty.
    #[must_use]
    pub fn from_scratch(budget: Price) -> Self {
        Self {
            existing_squad: &[],
            budget,
            weights: ScoringWeights::default(),
            transfer_penalty: 0.0,
            transfer_limit: SQUAD_SIZE,
        }
    }

    #[must_use]
    pub fn with_existing_squad(mut self, existing_squad: &'a [ElementId]) -> Self {
        self.existing_squad = existing_squad;
        self
    }

    fn validate(&self, players: &[Player]) -> Result<(), SelectionError> {
        self.weights.validate()?;
        if self.budget <= 0 {
            return Err(SelectionError::InvalidArgument(format!(
                "budget must be positive, got {}",
                self.budget
            )));
        }
        if !self.transfer_penalty.is_finite() || self.transfer_penalty < 0.0 {
            return Err(SelectionError::InvalidArgument(format!(
                "transfer penalty must be non-negative, got {}",
                self.transfer_penalty
            )));
        }
        if self.transfer_limit > SQUAD_SIZE {
            return Err(SelectionError::InvalidArgument(format!(
                "transfer limit must be within 0..={SQUAD_SIZE}, got {}",
                self.transfer_limit
            )));
        }
        if !self.existing_squad.is_empty() {
            if self.existing_squad.len() != SQUAD_SIZE {
                return Err(SelectionError::InvalidArgument(format!(
                    "existing squad must be empty or have {SQUAD_SIZE} players, got {}",
                    self.existing_squad.len()
                )));
            }
            let distinct = self.existing_squad.iter().collect::<HashSet<_>>();
            if distinct.len() != SQUAD_SIZE {
                return Err(SelectionError::InvalidArgument(
                    "existing squad contains duplicate players".into(),
                ));
            }
            let pool = players.iter().map(|p| p.element).collect::<HashSet<_>>();
            if let Some(missing) = self.existing_squad.iter().find(|&&e| !pool.contains(&e)) {
                return Err(SelectionError::InvalidArgument(format!(
                    "existing squad player {missing} is not in the pool"
                )));
            }
        }
        Ok(())
    }
}

/// Players entering and leaving the squad, both sorted by element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfers {
    pub transfers_in: Vec<ElementId>,
    pub transfers_out: Vec<ElementId>,
}

impl Transfers {
    /// Differences between `old` and `new`. An empty `old` means everything comes in.
    #[must_use]
    pub fn between(old: &[ElementId], new: &[ElementId]) -> Self {
        let old = old.iter().copied().collect::<BTreeSet<_>>();
        let new = new.iter().copied().collect::<BTreeSet<_>>();
        Self {
            transfers_in: new.difference(&old).copied().collect(),
            transfers_out: old.difference(&new).copied().collect(),
        }
    }

    /// Number of players brought in.
    #[must_use]
    pub fn count(&self) -> usize {
        self.transfers_in.len()
    }
}

/// Result of one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadSelection {
    pub lineup: Lineup,
    pub captaincy: Captaincy,
    pub transfers: Transfers,
    /// Objective value, transfer penalty included.
    pub objective: f64,
}

#[derive(Debug, Clone, Copy)]
struct PlayerVars {
    first_team: VarId,
    bench: VarId,
    captain: VarId,
    vice: VarId,
}

/// Builds the selection program. Returns it with the per-player variables in pool order.
#[expect(clippy::cast_precision_loss, clippy::too_many_lines)]
fn build_program(players: &[Player], params: &SelectionParams<'_>) -> (BinaryProgram, Vec<PlayerVars>) {
    let mut program = BinaryProgram::new();
    let vars = players
        .iter()
        .map(|p| PlayerVars {
            first_team: program.add_var(format!("first_team[{}]", p.element)),
            bench: program.add_var(format!("bench[{}]", p.element)),
            captain: program.add_var(format!("captain[{}]", p.element)),
            vice: program.add_var(format!("vice[{}]", p.element)),
        })
        .collect::<Vec<_>>();

    let selected = |indices: &mut dyn Iterator<Item = usize>, coefficient: &dyn Fn(usize) -> f64| {
        indices
            .flat_map(|i| {
                let c = coefficient(i);
                [(vars[i].first_team, c), (vars[i].bench, c)]
            })
            .collect::<LinearExpr>()
    };
    let all = || 0..players.len();

    let budget = params.budget as f64;
    let cost = selected(&mut all(), &|i| players[i].price as f64);
    program.constrain("budget", cost, Comparison::Le, budget);

    let clubs = players.iter().map(|p| p.club).collect::<BTreeSet<ClubId>>();
    for club in clubs {
        let members = selected(&mut all().filter(|&i| players[i].club == club), &|_| 1.0);
        program.constrain(
            format!("club[{club}]"),
            members,
            Comparison::Le,
            MAX_PLAYERS_PER_CLUB as f64,
        );
    }

    for position in Position::ALL {
        let in_position = || all().filter(move |&i| players[i].position == position);
        program.constrain(
            format!("squad[{position}]"),
            selected(&mut in_position(), &|_| 1.0),
            Comparison::Eq,
            squad_quota(position) as f64,
        );
        let (min, max) = first_team_bounds(position);
        let starters = in_position()
            .map(|i| (vars[i].first_team, 1.0))
            .collect::<LinearExpr>();
        program.constrain(
            format!("first_team_min[{position}]"),
            starters.clone(),
            Comparison::Ge,
            min as f64,
        );
        program.constrain(
            format!("first_team_max[{position}]"),
            starters,
            Comparison::Le,
            max as f64,
        );
    }

    let sum_of = |pick: fn(&PlayerVars) -> VarId| {
        vars.iter()
            .map(|v| (pick(v), 1.0))
            .collect::<LinearExpr>()
    };
    program.constrain("first_team_size", sum_of(|v| v.first_team), Comparison::Eq, FIRST_TEAM_SIZE as f64);
    program.constrain("bench_size", sum_of(|v| v.bench), Comparison::Eq, BENCH_SIZE as f64);
    program.constrain("one_captain", sum_of(|v| v.captain), Comparison::Eq, 1.0);
    program.constrain("one_vice", sum_of(|v| v.vice), Comparison::Eq, 1.0);

    for (player, v) in players.iter().zip(&vars) {
        let e = player.element;
        program.constrain(
            format!("disjoint[{e}]"),
            LinearExpr::from_iter([(v.first_team, 1.0), (v.bench, 1.0)]),
            Comparison::Le,
            1.0,
        );
        program.constrain(
            format!("distinct_captains[{e}]"),
            LinearExpr::from_iter([(v.captain, 1.0), (v.vice, 1.0)]),
            Comparison::Le,
            1.0,
        );
        for (role, var) in [("captain", v.captain), ("vice", v.vice)] {
            program.constrain(
                format!("{role}_selected[{e}]"),
                LinearExpr::from_iter([(var, 1.0), (v.first_team, -1.0), (v.bench, -1.0)]),
                Comparison::Le,
                0.0,
            );
        }
    }

    let weights = params.weights;
    let mut objective = players
        .iter()
        .zip(&vars)
        .flat_map(|(p, v)| {
            let s = p.predicted_score;
            [
                (v.first_team, weights.first_team * s),
                (v.bench, weights.bench * s),
                (v.captain, weights.captain * s),
                (v.vice, weights.vice * s),
            ]
        })
        .collect::<LinearExpr>();

    if !params.existing_squad.is_empty() {
        let owned = params.existing_squad.iter().copied().collect::<HashSet<_>>();
        let owned = &owned;
        let existing = || all().filter(move |&i| owned.contains(&players[i].element));
        program.constrain(
            "transfer_limit",
            selected(&mut existing(), &|_| 1.0),
            Comparison::Ge,
            (SQUAD_SIZE - params.transfer_limit) as f64,
        );
        objective.extend(
            selected(&mut existing(), &|_| params.transfer_penalty)
                .terms()
                .iter()
                .copied(),
        );
        objective.add_constant(-params.transfer_penalty * SQUAD_SIZE as f64);
    }
    program.set_objective(objective);

    (program, vars)
}

/// Turns a solver assignment back into a lineup, checking it against the rules.
fn decode(
    players: &[Player],
    vars: &[PlayerVars],
    solution: &Solution,
) -> Result<(Lineup, Captaincy), SelectionError> {
    let chosen = |pick: fn(&PlayerVars) -> VarId| {
        players
            .iter()
            .zip(vars)
            .filter(move |(_, v)| solution.value(pick(v)))
            .map(|(p, _)| p)
    };
    let first_team = chosen(|v| v.first_team).map(|p| p.element);

    // keeper first, then by predicted score; sort_by is stable so ties keep pool order
    let mut bench = chosen(|v| v.bench).collect::<Vec<_>>();
    bench.sort_by(|a, b| {
        b.position
            .is_keeper()
            .cmp(&a.position.is_keeper())
            .then_with(|| b.predicted_score.total_cmp(&a.predicted_score))
    });

    let invalid = |reason: String| SelectionError::Solver(SolveError::Failure(reason));
    let lineup = Lineup::new(first_team, bench.iter().map(|p| p.element))
        .map_err(|e| invalid(format!("solver returned an invalid lineup: {e}")))?;
    lineup
        .validate(players)
        .map_err(|e| invalid(format!("solver returned an invalid lineup: {e}")))?;

    let single = |pick: fn(&PlayerVars) -> VarId, role: &str| {
        let mut found = chosen(pick).map(|p| p.element);
        match (found.next(), found.next()) {
            (Some(element), None) => Ok(element),
            _ => Err(invalid(format!("solver returned no unique {role}"))),
        }
    };
    let captain = single(|v| v.captain, "captain")?;
    let vice = single(|v| v.vice, "vice-captain")?;
    Ok((lineup, Captaincy::new(captain, vice)))
}

/// Selects a squad, lineup and captaincy from `players`.
///
/// `players` must already carry selling prices for owned players and the score to
/// maximize in `predicted_score`.
pub fn select_squad<S>(
    players: &[Player],
    params: &SelectionParams<'_>,
    solver: &S,
) -> Result<SquadSelection, SelectionError>
where
    S: Solver + ?Sized,
{
    params.validate(players)?;

    let (program, vars) = build_program(players, params);
    log::debug!(
        "solving selection: {} players, {} variables, {} constraints",
        players.len(),
        program.num_vars(),
        program.constraints().len()
    );
    let solution = solver.solve(&program)?;
    if !program.is_satisfied_by(&solution) {
        let violated = program.violations(&solution).collect::<Vec<_>>().join(", ");
        return Err(SelectionError::Solver(SolveError::Failure(format!(
            "solution violates constraints: {violated}"
        ))));
    }

    let (lineup, captaincy) = decode(players, &vars, &solution)?;
    let squad = lineup.squad();
    let transfers = Transfers::between(params.existing_squad, squad.elements());
    let objective = program.objective_value(&solution);
    log::info!(
        "selected squad: objective {objective:.2}, captain {}, {} transfer(s)",
        captaincy
            .captain
            .map_or_else(|| "-".to_owned(), |c| c.to_string()),
        transfers.count()
    );
    log::debug!(
        "transfers in {:?}, out {:?}",
        transfers.transfers_in,
        transfers.transfers_out
    );

    Ok(SquadSelection {
        lineup,
        captaincy,
        transfers,
        objective,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::MicroLpSolver;

    /// 20 players on distinct clubs, price 40 each.
    ///
    /// keepers 1..=3, defenders 4..=9, midfielders 10..=15, forwards 16..=20.
    fn pool() -> Vec<Player> {
        let table: [(Position, f64); 20] = [
            (Position::Keeper, 4.0),
            (Position::Keeper, 5.0),
            (Position::Keeper, 6.0),
            (Position::Defender, 4.0),
            (Position::Defender, 5.0),
            (Position::Defender, 5.0),
            (Position::Defender, 6.0),
            (Position::Defender, 6.0),
            (Position::Defender, 6.0),
            (Position::Midfielder, 4.0),
            (Position::Midfielder, 5.0),
            (Position::Midfielder, 6.0),
            (Position::Midfielder, 6.0),
            (Position::Midfielder, 6.0),
            (Position::Midfielder, 6.0),
            (Position::Forward, 4.0),
            (Position::Forward, 6.0),
            (Position::Forward, 6.5),
            (Position::Forward, 7.0),
            (Position::Forward, 3.0),
        ];
        table
            .iter()
            .zip(1..)
            .map(|(&(position, score), i)| {
                Player::new(ElementId(i), position, ClubId(u8::try_from(i).unwrap()), 40)
                    .with_predicted_score(score)
            })
            .collect()
    }

    fn ids(elements: &[u32]) -> Vec<ElementId> {
        elements.iter().copied().map(ElementId).collect()
    }

    fn sorted(elements: &[ElementId]) -> Vec<ElementId> {
        let mut elements = elements.to_vec();
        elements.sort();
        elements
    }

    /// Optimal squad from scratch with forward 19 swapped for forward 16.
    fn weakened_squad() -> Vec<ElementId> {
        ids(&[2, 3, 5, 6, 7, 8, 9, 11, 12, 13, 14, 15, 16, 17, 18])
    }

    fn assert_rules_hold(selection: &SquadSelection, players: &[Player], budget: Price) {
        selection.lineup.validate(players).unwrap();
        let prices = footbot_engine::PriceTable::from_players(players);
        let cost = footbot_engine::team_value(&selection.lineup.squad(), &prices).unwrap();
        assert!(cost <= budget);
        let squad = selection.lineup.squad();
        let captain = selection.captaincy.captain.unwrap();
        let vice = selection.captaincy.vice.unwrap();
        assert_ne!(captain, vice);
        assert!(squad.contains(captain));
        assert!(squad.contains(vice));
    }

    mod from_scratch {
        use super::*;

        #[test]
        fn test_picks_top_scorers() {
            let players = pool();
            let selection =
                select_squad(&players, &SelectionParams::from_scratch(600), &MicroLpSolver).unwrap();
            assert_rules_hold(&selection, &players, 600);
            assert_eq!(
                sorted(selection.lineup.first_team()),
                ids(&[3, 7, 8, 9, 12, 13, 14, 15, 17, 18, 19])
            );
            assert_eq!(selection.lineup.bench(), ids(&[2, 5, 6, 11]));
            assert_eq!(selection.captaincy, Captaincy::new(ElementId(19), ElementId(18)));
            assert_eq!(selection.transfers.count(), 15);
            assert!(selection.transfers.transfers_out.is_empty());
        }

        #[test]
        fn test_is_deterministic() {
            let players = pool();
            let params = SelectionParams::from_scratch(600);
            let first = select_squad(&players, &params, &MicroLpSolver).unwrap();
            let second = select_squad(&players, &params, &MicroLpSolver).unwrap();
            assert_eq!(first.lineup.squad(), second.lineup.squad());
            assert_eq!(first.captaincy, second.captaincy);
        }

        #[test]
        fn test_budget_forces_cheaper_keeper() {
            let mut players = pool();
            players[2].price = 41;
            let selection =
                select_squad(&players, &SelectionParams::from_scratch(600), &MicroLpSolver).unwrap();
            assert_rules_hold(&selection, &players, 600);
            let squad = selection.lineup.squad();
            assert!(!squad.contains(ElementId(3)));
            assert!(squad.contains(ElementId(1)));
            assert!(selection.lineup.first_team().contains(&ElementId(2)));
            assert_eq!(selection.lineup.bench()[0], ElementId(1));
        }

        #[test]
        fn test_club_cap() {
            let mut players = pool();
            for p in &mut players[11..15] {
                p.club = ClubId(1);
            }
            let selection =
                select_squad(&players, &SelectionParams::from_scratch(600), &MicroLpSolver).unwrap();
            assert_rules_hold(&selection, &players, 600);
            let from_club = selection
                .lineup
                .squad()
                .iter()
                .filter(|&e| players.iter().any(|p| p.element == e && p.club == ClubId(1)))
                .count();
            assert_eq!(from_club, 3);
            assert_eq!(selection.captaincy.captain, Some(ElementId(19)));
        }

        #[test]
        fn test_infeasible_budget() {
            let players = pool();
            assert_eq!(
                select_squad(&players, &SelectionParams::from_scratch(599), &MicroLpSolver),
                Err(SelectionError::Infeasible)
            );
        }
    }

    mod with_existing_squad {
        use std::collections::HashMap;

        use super::*;

        #[test]
        fn test_makes_best_transfer() {
            let players = pool();
            let existing = weakened_squad();
            let params = SelectionParams {
                transfer_limit: 1,
                ..SelectionParams::from_scratch(600).with_existing_squad(&existing)
            };
            let selection = select_squad(&players, &params, &MicroLpSolver).unwrap();
            assert_rules_hold(&selection, &players, 600);
            assert_eq!(
                selection.transfers,
                Transfers {
                    transfers_in: ids(&[19]),
                    transfers_out: ids(&[16]),
                }
            );
            assert_eq!(selection.captaincy.captain, Some(ElementId(19)));
        }

        #[test]
        fn test_zero_limit_keeps_squad() {
            let players = pool();
            let existing = weakened_squad();
            let params = SelectionParams {
                transfer_limit: 0,
                ..SelectionParams::from_scratch(600).with_existing_squad(&existing)
            };
            let selection = select_squad(&players, &params, &MicroLpSolver).unwrap();
            assert_eq!(sorted(selection.lineup.squad().elements()), existing);
            assert_eq!(selection.transfers, Transfers::default());
            assert_eq!(selection.captaincy.captain, Some(ElementId(18)));
            // the weak forward sits on the bench behind the spare keeper
            assert_eq!(selection.lineup.bench()[0], ElementId(2));
            assert!(selection.lineup.bench().contains(&ElementId(16)));
        }

        #[test]
        fn test_penalty_outweighs_small_gain() {
            // swapping 16 for 19 gains 2.4 in the objective
            let players = pool();
            let existing = weakened_squad();
            let with_penalty = |transfer_penalty| SelectionParams {
                transfer_penalty,
                transfer_limit: 15,
                ..SelectionParams::from_scratch(600).with_existing_squad(&existing)
            };

            let cheap = select_squad(&players, &with_penalty(2.0), &MicroLpSolver).unwrap();
            assert_eq!(cheap.transfers.transfers_in, ids(&[19]));
            assert!((cheap.objective - (selection_score(&cheap, &players) - 2.0)).abs() < 1e-6);

            let costly = select_squad(&players, &with_penalty(3.0), &MicroLpSolver).unwrap();
            assert_eq!(costly.transfers, Transfers::default());
            assert!((costly.objective - selection_score(&costly, &players)).abs() < 1e-6);
        }

        /// Objective without the transfer penalty.
        fn selection_score(selection: &SquadSelection, players: &[Player]) -> f64 {
            let weights = ScoringWeights::default();
            let scores = players
                .iter()
                .map(|p| (p.element, p.predicted_score))
                .collect::<HashMap<_, _>>();
            let sum = |elements: &[ElementId]| elements.iter().map(|e| scores[e]).sum::<f64>();
            weights.first_team * sum(selection.lineup.first_team())
                + weights.bench * sum(selection.lineup.bench())
                + weights.captain * scores[&selection.captaincy.captain.unwrap()]
                + weights.vice * scores[&selection.captaincy.vice.unwrap()]
        }
    }

    mod arguments {
        use super::*;

        fn rejects(params: &SelectionParams<'_>) {
            let result = select_squad(&pool(), params, &MicroLpSolver);
            assert!(
                matches!(result, Err(SelectionError::InvalidArgument(_))),
                "{result:?}"
            );
        }

        #[test]
        fn test_weights() {
            for weights in [
                ScoringWeights { first_team: 0.5, bench: 0.4, ..ScoringWeights::default() },
                ScoringWeights { captain: 1.2, vice: -0.2, ..ScoringWeights::default() },
                ScoringWeights { first_team: f64::NAN, ..ScoringWeights::default() },
            ] {
                rejects(&SelectionParams { weights, ..SelectionParams::from_scratch(600) });
            }
            assert_eq!(ScoringWeights::default().validate(), Ok(()));
        }

        #[test]
        fn test_budget_penalty_and_limit() {
            rejects(&SelectionParams::from_scratch(0));
            rejects(&SelectionParams { transfer_penalty: -1.0, ..SelectionParams::from_scratch(600) });
            rejects(&SelectionParams { transfer_limit: 16, ..SelectionParams::from_scratch(600) });
        }

        #[test]
        fn test_existing_squad_shape() {
            let short = ids(&[1, 2, 3]);
            rejects(&SelectionParams::from_scratch(600).with_existing_squad(&short));

            let mut duplicated = weakened_squad();
            duplicated[0] = duplicated[1];
            rejects(&SelectionParams::from_scratch(600).with_existing_squad(&duplicated));

            let mut unknown = weakened_squad();
            unknown[0] = ElementId(99);
            rejects(&SelectionParams::from_scratch(600).with_existing_squad(&unknown));
        }
    }

    mod solver_errors {
        use super::*;

        #[derive(Debug)]
        struct Fixed(Result<Solution, SolveError>);

        impl Solver for Fixed {
            fn solve(&self, _program: &BinaryProgram) -> Result<Solution, SolveError> {
                self.0.clone()
            }
        }

        #[test]
        fn test_errors_are_mapped() {
            let players = pool();
            let params = SelectionParams::from_scratch(600);
            assert_eq!(
                select_squad(&players, &params, &Fixed(Err(SolveError::Infeasible))),
                Err(SelectionError::Infeasible)
            );
            assert_eq!(
                select_squad(&players, &params, &Fixed(Err(SolveError::Timeout))),
                Err(SelectionError::Solver(SolveError::Timeout))
            );
        }

        #[test]
        fn test_bogus_solution_is_rejected() {
            let players = pool();
            let result = select_squad(
                &players,
                &SelectionParams::from_scratch(600),
                &Fixed(Ok(Solution::new(vec![true; 80]))),
            );
            assert!(matches!(
                result,
                Err(SelectionError::Solver(SolveError::Failure(_)))
            ));
        }

        #[test]
        fn test_dyn_solver() {
            let solver: Box<dyn Solver> = Box::new(MicroLpSolver);
            let selection =
                select_squad(&pool(), &SelectionParams::from_scratch(600), solver.as_ref()).unwrap();
            assert_eq!(selection.captaincy.captain, Some(ElementId(19)));
        }
    }
}
