//! Four-team knockout bracket: seeding from the league table and two-legged
//! semifinal resolution.

use uuid::Uuid;

use crate::dao::models::{PlayoffMatchEntity, PlayoffRound, StandingEntity};

/// Number of ranked teams required to seed the bracket.
pub const BRACKET_SIZE: usize = 4;

/// Outcome of a two-legged tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieOutcome {
    /// A winner could be derived from the two legs.
    Decided {
        /// Team advancing to the final.
        winner: Uuid,
        /// Team dropping to the third-place match.
        loser: Uuid,
    },
    /// Aggregate and away goals are level and no shootout was recorded; the
    /// bracket stays unresolved until a penalty entry arrives.
    Undetermined,
}

/// Seed the bracket from the top of the ranked table: rank 1 hosts rank 4 in
/// the first semifinal, rank 2 hosts rank 3 in the second, return legs
/// reversed. Third place and final are created with participants unset.
///
/// Callers must pass at least [`BRACKET_SIZE`] ranked lines.
pub fn seed_bracket(top: &[StandingEntity]) -> Vec<PlayoffMatchEntity> {
    let first = top[0].team_id;
    let second = top[1].team_id;
    let third = top[2].team_id;
    let fourth = top[3].team_id;

    vec![
        PlayoffMatchEntity::seeded(PlayoffRound::Semi1Leg1, first, fourth),
        PlayoffMatchEntity::seeded(PlayoffRound::Semi1Leg2, fourth, first),
        PlayoffMatchEntity::seeded(PlayoffRound::Semi2Leg1, second, third),
        PlayoffMatchEntity::seeded(PlayoffRound::Semi2Leg2, third, second),
        PlayoffMatchEntity::unset(PlayoffRound::ThirdPlace),
        PlayoffMatchEntity::unset(PlayoffRound::Final),
    ]
}

/// Resolve a two-legged semifinal where `leg2` reverses the home/away roles of
/// `leg1`.
///
/// Fallback order: aggregate score, then a penalty shootout recorded on the
/// second leg, then away goals (the first leg's away side travelled first, so
/// its tally is `leg2.away_score` against `leg1.away_score`), and finally
/// [`TieOutcome::Undetermined`] when everything is level.
pub fn resolve_two_legged_tie(
    leg1: &PlayoffMatchEntity,
    leg2: &PlayoffMatchEntity,
) -> TieOutcome {
    let (Some(team_a), Some(team_b)) = (leg1.home_team_id, leg1.away_team_id) else {
        return TieOutcome::Undetermined;
    };

    let a_total = u16::from(leg1.home_score) + u16::from(leg2.away_score);
    let b_total = u16::from(leg1.away_score) + u16::from(leg2.home_score);

    if a_total != b_total {
        return if a_total > b_total {
            TieOutcome::Decided {
                winner: team_a,
                loser: team_b,
            }
        } else {
            TieOutcome::Decided {
                winner: team_b,
                loser: team_a,
            }
        };
    }

    // Shootouts are only ever recorded on the return leg.
    if leg2.penalties {
        if let Some(winner) = leg2.penalty_winner_id {
            let loser = if winner == team_a { team_b } else { team_a };
            return TieOutcome::Decided { winner, loser };
        }
    }

    if leg2.away_score > leg1.away_score {
        TieOutcome::Decided {
            winner: team_a,
            loser: team_b,
        }
    } else if leg1.away_score > leg2.away_score {
        TieOutcome::Decided {
            winner: team_b,
            loser: team_a,
        }
    } else {
        TieOutcome::Undetermined
    }
}

/// Resolve a semifinal from the bracket rows, or `None` while either leg is
/// missing or unplayed.
fn semifinal_outcome(
    playoffs: &[PlayoffMatchEntity],
    leg1_round: PlayoffRound,
    leg2_round: PlayoffRound,
) -> Option<TieOutcome> {
    let leg1 = playoffs
        .iter()
        .find(|p| p.round == leg1_round && p.played)?;
    let leg2 = playoffs
        .iter()
        .find(|p| p.round == leg2_round && p.played)?;
    Some(resolve_two_legged_tie(leg1, leg2))
}

/// Re-run the bracket advancement check.
///
/// Once both semifinals resolve, the final receives the winners and the
/// third-place match the losers (first semifinal at home in both). The check
/// runs after every leg save and overwrites the same participants, so calling
/// it redundantly is safe. Returns whether the final pairings are set.
pub fn advance_bracket(playoffs: &mut [PlayoffMatchEntity]) -> bool {
    let semi_1 = semifinal_outcome(playoffs, PlayoffRound::Semi1Leg1, PlayoffRound::Semi1Leg2);
    let semi_2 = semifinal_outcome(playoffs, PlayoffRound::Semi2Leg1, PlayoffRound::Semi2Leg2);

    let (
        Some(TieOutcome::Decided {
            winner: winner_1,
            loser: loser_1,
        }),
        Some(TieOutcome::Decided {
            winner: winner_2,
            loser: loser_2,
        }),
    ) = (semi_1, semi_2)
    else {
        return false;
    };

    for slot in playoffs.iter_mut() {
        match slot.round {
            PlayoffRound::Final => {
                slot.home_team_id = Some(winner_1);
                slot.away_team_id = Some(winner_2);
            }
            PlayoffRound::ThirdPlace => {
                slot.home_team_id = Some(loser_1);
                slot.away_team_id = Some(loser_2);
            }
            _ => {}
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standings(ids: &[Uuid]) -> Vec<StandingEntity> {
        ids.iter()
            .enumerate()
            .map(|(index, &team_id)| {
                let mut line = StandingEntity::zeroed(team_id);
                line.position = index as u32 + 1;
                line
            })
            .collect()
    }

    fn played_leg(round: PlayoffRound, home: Uuid, away: Uuid, score: (u8, u8)) -> PlayoffMatchEntity {
        let mut leg = PlayoffMatchEntity::seeded(round, home, away);
        leg.home_score = score.0;
        leg.away_score = score.1;
        leg.played = true;
        leg
    }

    #[test]
    fn seeding_pairs_first_with_fourth_and_second_with_third() {
        let ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let bracket = seed_bracket(&standings(&ids));

        let by_round = |round: PlayoffRound| bracket.iter().find(|p| p.round == round).unwrap();

        let semi_1 = by_round(PlayoffRound::Semi1Leg1);
        assert_eq!(semi_1.home_team_id, Some(ids[0]));
        assert_eq!(semi_1.away_team_id, Some(ids[3]));

        let semi_1_return = by_round(PlayoffRound::Semi1Leg2);
        assert_eq!(semi_1_return.home_team_id, Some(ids[3]));
        assert_eq!(semi_1_return.away_team_id, Some(ids[0]));

        let semi_2 = by_round(PlayoffRound::Semi2Leg1);
        assert_eq!(semi_2.home_team_id, Some(ids[1]));
        assert_eq!(semi_2.away_team_id, Some(ids[2]));

        assert_eq!(by_round(PlayoffRound::Final).home_team_id, None);
        assert_eq!(by_round(PlayoffRound::ThirdPlace).home_team_id, None);
    }

    #[test]
    fn aggregate_score_decides_outright() {
        let team_a = Uuid::new_v4();
        let team_b = Uuid::new_v4();
        // 2-1 then 0-1 away win: A totals 3, B totals 1.
        let leg1 = played_leg(PlayoffRound::Semi1Leg1, team_a, team_b, (2, 1));
        let leg2 = played_leg(PlayoffRound::Semi1Leg2, team_b, team_a, (0, 1));

        assert_eq!(
            resolve_two_legged_tie(&leg1, &leg2),
            TieOutcome::Decided {
                winner: team_a,
                loser: team_b
            }
        );
    }

    #[test]
    fn level_aggregate_and_away_goals_is_undetermined() {
        let team_a = Uuid::new_v4();
        let team_b = Uuid::new_v4();
        let leg1 = played_leg(PlayoffRound::Semi1Leg1, team_a, team_b, (1, 1));
        let leg2 = played_leg(PlayoffRound::Semi1Leg2, team_b, team_a, (1, 1));

        assert_eq!(resolve_two_legged_tie(&leg1, &leg2), TieOutcome::Undetermined);
    }

    #[test]
    fn recorded_shootout_breaks_a_level_tie() {
        let team_a = Uuid::new_v4();
        let team_b = Uuid::new_v4();
        let leg1 = played_leg(PlayoffRound::Semi1Leg1, team_a, team_b, (1, 1));
        let mut leg2 = played_leg(PlayoffRound::Semi1Leg2, team_b, team_a, (1, 1));
        leg2.penalties = true;
        leg2.penalty_winner_id = Some(team_b);

        assert_eq!(
            resolve_two_legged_tie(&leg1, &leg2),
            TieOutcome::Decided {
                winner: team_b,
                loser: team_a
            }
        );
    }

    #[test]
    fn away_goals_decide_before_giving_up() {
        let team_a = Uuid::new_v4();
        let team_b = Uuid::new_v4();
        // Aggregate 2-2 but A scored away in the return leg while B did not.
        let leg1 = played_leg(PlayoffRound::Semi1Leg1, team_a, team_b, (2, 0));
        let leg2 = played_leg(PlayoffRound::Semi1Leg2, team_b, team_a, (0, 2));

        assert_eq!(
            resolve_two_legged_tie(&leg1, &leg2),
            TieOutcome::Decided {
                winner: team_a,
                loser: team_b
            }
        );
    }

    #[test]
    fn bracket_fills_final_and_third_place_once_both_semis_resolve() {
        let ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let mut bracket = seed_bracket(&standings(&ids));

        let record = |bracket: &mut [PlayoffMatchEntity], round: PlayoffRound, score: (u8, u8)| {
            let slot = bracket.iter_mut().find(|p| p.round == round).unwrap();
            slot.home_score = score.0;
            slot.away_score = score.1;
            slot.played = true;
        };

        record(&mut bracket, PlayoffRound::Semi1Leg1, (2, 0));
        record(&mut bracket, PlayoffRound::Semi1Leg2, (1, 1));
        assert!(!advance_bracket(&mut bracket), "one semifinal is not enough");

        record(&mut bracket, PlayoffRound::Semi2Leg1, (0, 1));
        record(&mut bracket, PlayoffRound::Semi2Leg2, (2, 0));
        assert!(advance_bracket(&mut bracket));

        // Semi 1: rank 1 wins 3-1 on aggregate. Semi 2: rank 3 wins 3-0.
        let final_match = bracket.iter().find(|p| p.round == PlayoffRound::Final).unwrap();
        assert_eq!(final_match.home_team_id, Some(ids[0]));
        assert_eq!(final_match.away_team_id, Some(ids[2]));

        let third = bracket
            .iter()
            .find(|p| p.round == PlayoffRound::ThirdPlace)
            .unwrap();
        assert_eq!(third.home_team_id, Some(ids[3]));
        assert_eq!(third.away_team_id, Some(ids[1]));

        // Redundant re-runs keep the same pairings.
        assert!(advance_bracket(&mut bracket));
        let final_match = bracket.iter().find(|p| p.round == PlayoffRound::Final).unwrap();
        assert_eq!(final_match.home_team_id, Some(ids[0]));
    }

    #[test]
    fn undetermined_semifinal_leaves_the_bracket_unresolved() {
        let ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let mut bracket = seed_bracket(&standings(&ids));

        for (round, score) in [
            (PlayoffRound::Semi1Leg1, (1, 1)),
            (PlayoffRound::Semi1Leg2, (1, 1)),
            (PlayoffRound::Semi2Leg1, (2, 0)),
            (PlayoffRound::Semi2Leg2, (0, 1)),
        ] {
            let slot = bracket.iter_mut().find(|p| p.round == round).unwrap();
            slot.home_score = score.0;
            slot.away_score = score.1;
            slot.played = true;
        }

        assert!(!advance_bracket(&mut bracket));
        let final_match = bracket.iter().find(|p| p.round == PlayoffRound::Final).unwrap();
        assert_eq!(final_match.home_team_id, None);
    }
}
