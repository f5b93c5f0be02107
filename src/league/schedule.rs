//! Double round-robin fixture generation using the circle method.

use uuid::Uuid;

use crate::dao::models::Phase;

/// Fixture produced by the generator before it is persisted as a match row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixture {
    /// Team playing at home.
    pub home: Uuid,
    /// Team playing away.
    pub away: Uuid,
    /// 1-based matchday index within the phase.
    pub matchday: u32,
    /// Phase the fixture belongs to.
    pub phase: Phase,
}

/// Build a complete double round-robin over `team_ids`.
///
/// Every unordered pair meets exactly once per phase; the second phase mirrors
/// the first with home and away swapped and the same matchday numbers. With an
/// odd team count a bye slot is inserted and its pairings are dropped, so each
/// matchday is one fixture short. Callers control draw order by shuffling
/// `team_ids` beforehand; the pairing structure itself is deterministic.
///
/// Returns an empty schedule for fewer than two teams.
pub fn double_round_robin(team_ids: &[Uuid]) -> Vec<Fixture> {
    if team_ids.len() < 2 {
        return Vec::new();
    }

    // The circle method works over an even slot count; `None` is the bye.
    let mut slots: Vec<Option<Uuid>> = team_ids.iter().copied().map(Some).collect();
    if slots.len() % 2 != 0 {
        slots.push(None);
    }

    let n = slots.len();
    let matchdays = n - 1;
    let per_day = n / 2;

    let mut fixtures = Vec::with_capacity(team_ids.len() * (team_ids.len() - 1));
    for matchday in 1..=matchdays as u32 {
        for i in 0..per_day {
            if let (Some(home), Some(away)) = (slots[i], slots[n - 1 - i]) {
                fixtures.push(Fixture {
                    home,
                    away,
                    matchday,
                    phase: Phase::FirstLeg,
                });
            }
        }

        // Fix the first slot and rotate the rest by one: last becomes second.
        slots[1..].rotate_right(1);
    }

    let second_phase: Vec<Fixture> = fixtures
        .iter()
        .map(|fixture| Fixture {
            home: fixture.away,
            away: fixture.home,
            matchday: fixture.matchday,
            phase: Phase::SecondLeg,
        })
        .collect();
    fixtures.extend(second_phase);

    fixtures
}
