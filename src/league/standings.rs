//! Standings computation: per-team aggregation over validated results and the
//! global re-ranking pass.

use uuid::Uuid;

use crate::dao::models::{MatchEntity, ResultEntity, StandingEntity};
use crate::league::League;

/// Recompute the table line for one team from the validated results it
/// appears in, as home or away.
///
/// Idempotent and side-effect free; the caller decides where the line lands.
pub fn team_line(
    team_id: Uuid,
    matches: &[MatchEntity],
    results: &[ResultEntity],
) -> StandingEntity {
    let mut line = StandingEntity::zeroed(team_id);

    for result in results.iter().filter(|result| result.validated) {
        let Some(fixture) = matches.iter().find(|m| m.id == result.match_id) else {
            continue;
        };

        // Home role counts home_score as goals for; the away role mirrors it.
        let (scored, conceded) = if fixture.home_team_id == team_id {
            (result.home_score, result.away_score)
        } else if fixture.away_team_id == team_id {
            (result.away_score, result.home_score)
        } else {
            continue;
        };

        line.played += 1;
        line.goals_for += u32::from(scored);
        line.goals_against += u32::from(conceded);
        if scored > conceded {
            line.won += 1;
        } else if scored == conceded {
            line.drawn += 1;
        } else {
            line.lost += 1;
        }
    }

    line.goal_difference = i64::from(line.goals_for) - i64::from(line.goals_against);
    line.points = line.won * 3 + line.drawn;
    line
}

/// Sort the table by points, then goal difference, then goals scored (all
/// descending) and assign 1-based positions.
///
/// The sort is stable, so teams tied on every criterion keep their relative
/// order. Returns how many lines actually moved, since unchanged positions
/// need no write.
pub fn rank(standings: &mut [StandingEntity]) -> usize {
    standings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
    });

    let mut moved = 0;
    for (index, line) in standings.iter_mut().enumerate() {
        let position = index as u32 + 1;
        if line.position != position {
            line.position = position;
            moved += 1;
        }
    }
    moved
}

/// Full rebuild of every table line from the validated result set, followed by
/// the ranking pass. Safe to call redundantly; the output depends only on the
/// stored matches and results.
pub fn recompute_all(league: &mut League) -> usize {
    let lines: Vec<StandingEntity> = league
        .standings
        .iter()
        .map(|line| team_line(line.team_id, &league.matches, &league.results))
        .collect();

    league.standings = lines;
    rank(&mut league.standings)
}

/// Make sure a team has a table line, creating a zeroed one when missing.
pub fn ensure_line(league: &mut League, team_id: Uuid) {
    if league.standing_for(team_id).is_none() {
        league.standings.push(StandingEntity::zeroed(team_id));
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use crate::dao::models::{Phase, TeamEntity};

    use super::*;

    fn team(name: &str) -> TeamEntity {
        TeamEntity {
            id: Uuid::new_v4(),
            name: name.into(),
            player_name: name.into(),
            gamer_alias: name.to_lowercase(),
            contact: None,
            logo_url: None,
            active: true,
            created_at: SystemTime::now(),
        }
    }

    fn league_with_teams(count: usize) -> (League, Vec<Uuid>) {
        let mut league = League::default();
        let mut ids = Vec::new();
        for index in 0..count {
            let entry = team(&format!("Team {index}"));
            ids.push(entry.id);
            league.standings.push(StandingEntity::zeroed(entry.id));
            league.teams.insert(entry.id, entry);
        }
        (league, ids)
    }

    fn record(league: &mut League, home: Uuid, away: Uuid, score: (u8, u8), validated: bool) {
        let fixture = MatchEntity {
            id: Uuid::new_v4(),
            home_team_id: home,
            away_team_id: away,
            matchday: 1,
            phase: Phase::FirstLeg,
            played: true,
            played_at: Some(SystemTime::now()),
        };
        league.results.push(ResultEntity {
            id: Uuid::new_v4(),
            match_id: fixture.id,
            home_score: score.0,
            away_score: score.1,
            validated,
            validated_by: validated.then(|| "admin".into()),
            recorded_at: SystemTime::now(),
            updated_at: SystemTime::now(),
        });
        league.matches.push(fixture);
    }

    #[test]
    fn home_and_away_roles_are_symmetric() {
        let (mut league, ids) = league_with_teams(2);
        record(&mut league, ids[0], ids[1], (3, 1), true);
        record(&mut league, ids[1], ids[0], (2, 2), true);
        recompute_all(&mut league);

        let first = league.standing_for(ids[0]).unwrap();
        assert_eq!(first.played, 2);
        assert_eq!(first.won, 1);
        assert_eq!(first.drawn, 1);
        assert_eq!(first.lost, 0);
        assert_eq!(first.goals_for, 5);
        assert_eq!(first.goals_against, 3);
        assert_eq!(first.goal_difference, 2);
        assert_eq!(first.points, 4);

        let second = league.standing_for(ids[1]).unwrap();
        assert_eq!(second.points, 1);
        assert_eq!(second.goal_difference, -2);
    }

    #[test]
    fn unvalidated_results_do_not_count() {
        let (mut league, ids) = league_with_teams(2);
        record(&mut league, ids[0], ids[1], (4, 0), false);
        recompute_all(&mut league);

        assert_eq!(league.standing_for(ids[0]).unwrap().played, 0);
        assert_eq!(league.standing_for(ids[1]).unwrap().played, 0);
    }

    #[test]
    fn points_and_played_invariants_hold() {
        let (mut league, ids) = league_with_teams(4);
        record(&mut league, ids[0], ids[1], (2, 0), true);
        record(&mut league, ids[2], ids[3], (1, 1), true);
        record(&mut league, ids[1], ids[2], (0, 3), true);
        record(&mut league, ids[3], ids[0], (2, 2), true);
        recompute_all(&mut league);

        for line in &league.standings {
            assert_eq!(line.points, line.won * 3 + line.drawn);
            assert_eq!(line.played, line.won + line.drawn + line.lost);
        }
    }

    #[test]
    fn ranking_orders_by_points_then_difference_then_goals() {
        let (mut league, ids) = league_with_teams(3);
        // ids[0]: win 1-0 (3 pts, +1, 1 gf); ids[1]: win 4-2 (3 pts, +2);
        // ids[2]: two losses.
        record(&mut league, ids[0], ids[2], (1, 0), true);
        record(&mut league, ids[1], ids[2], (4, 2), true);
        recompute_all(&mut league);

        let order: Vec<Uuid> = league.standings.iter().map(|s| s.team_id).collect();
        assert_eq!(order, vec![ids[1], ids[0], ids[2]]);
        let positions: Vec<u32> = league.standings.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn recompute_is_idempotent() {
        let (mut league, ids) = league_with_teams(3);
        record(&mut league, ids[0], ids[1], (2, 1), true);
        record(&mut league, ids[1], ids[2], (0, 0), true);

        recompute_all(&mut league);
        let first_pass = league.standings.clone();
        let moved = recompute_all(&mut league);

        assert_eq!(league.standings, first_pass);
        assert_eq!(moved, 0, "second pass must not move any line");
    }

    #[test]
    fn deleting_a_result_retracts_it_completely() {
        let (mut league, ids) = league_with_teams(3);
        record(&mut league, ids[0], ids[1], (2, 1), true);
        recompute_all(&mut league);
        let baseline = league.standings.clone();

        record(&mut league, ids[1], ids[2], (5, 0), true);
        recompute_all(&mut league);
        assert_ne!(league.standings, baseline);

        let extra = league.results.pop().unwrap();
        league.matches.retain(|m| m.id != extra.match_id);
        recompute_all(&mut league);
        assert_eq!(league.standings, baseline);
    }
}
