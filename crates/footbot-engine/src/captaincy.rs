use crate::{player::Player, squad::Captaincy};

/// Hands the armband to the vice-captain when the captain did not play.
///
/// Minutes are looked up in `first_team`, which should already reflect substitutions.
/// A captain or vice who is not in it counts as not having played, even one who was
/// picked on the bench and played there: bench points never count, so neither does
/// their armband. A promoted vice leaves the vice slot empty, and if neither played the
/// gameweek has no captain.
#[must_use]
pub fn resolve_captaincy(captaincy: Captaincy, first_team: &[Player]) -> Captaincy {
    let played = |element| {
        first_team
            .iter()
            .find(|p| Some(p.element) == element)
            .is_some_and(|p| p.minutes_played() > 0)
    };
    if played(captaincy.captain) {
        captaincy
    } else if played(captaincy.vice) {
        Captaincy {
            captain: captaincy.vice,
            vice: None,
        }
    } else {
        Captaincy::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{ClubId, ElementId, MatchResult, Position};

    fn first_team(minutes: &[(u32, u32)]) -> Vec<Player> {
        minutes
            .iter()
            .map(|&(element, minutes)| {
                let mut p = Player::new(ElementId(element), Position::Midfielder, ClubId(1), 50);
                p.result = Some(MatchResult { minutes, points: 1 });
                p
            })
            .collect()
    }

    #[test]
    fn test_captain_played() {
        let team = first_team(&[(1, 90), (2, 90)]);
        let captaincy = Captaincy::new(ElementId(1), ElementId(2));
        assert_eq!(resolve_captaincy(captaincy, &team), captaincy);
    }

    #[test]
    fn test_vice_promoted() {
        let team = first_team(&[(1, 0), (2, 30)]);
        let resolved = resolve_captaincy(Captaincy::new(ElementId(1), ElementId(2)), &team);
        assert_eq!(
            resolved,
            Captaincy {
                captain: Some(ElementId(2)),
                vice: None
            }
        );
    }

    #[test]
    fn test_neither_played() {
        let team = first_team(&[(1, 0), (2, 0)]);
        let resolved = resolve_captaincy(Captaincy::new(ElementId(1), ElementId(2)), &team);
        assert_eq!(resolved, Captaincy::none());
    }

    #[test]
    fn test_substituted_out_captain_counts_as_absent() {
        // captain 1 was benched by substitution, vice 2 played
        let team = first_team(&[(2, 90), (3, 90)]);
        let resolved = resolve_captaincy(Captaincy::new(ElementId(1), ElementId(2)), &team);
        assert_eq!(resolved.captain, Some(ElementId(2)));

        // vice on the bench is not eligible either
        let team = first_team(&[(3, 90)]);
        let resolved = resolve_captaincy(Captaincy::new(ElementId(1), ElementId(2)), &team);
        assert_eq!(resolved, Captaincy::none());
    }

    #[test]
    fn test_benched_captain_who_played_hands_over() {
        // captain 1 sat on the bench and played, but bench points do not count
        let bench = first_team(&[(1, 90)]);
        assert!(bench[0].minutes_played() > 0);
        let team = first_team(&[(2, 90), (3, 90)]);
        let resolved = resolve_captaincy(Captaincy::new(ElementId(1), ElementId(2)), &team);
        assert_eq!(
            resolved,
            Captaincy {
                captain: Some(ElementId(2)),
                vice: None
            }
        );
    }
}
