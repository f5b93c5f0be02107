//! Result entry and validation. Every mutation that can change the set of
//! validated results recomputes the standings synchronously in the same
//! snapshot write, so the table a reader sees is never stale.

use std::time::SystemTime;

use tracing::info;
use uuid::Uuid;

use crate::{
    config::AdminIdentity,
    dao::models::ResultEntity,
    dto::{admin::RecordResultRequest, common::ResultSummary},
    error::ServiceError,
    league::standings,
    state::SharedState,
};

/// Record or overwrite the result of a fixture on behalf of `validator`.
///
/// Marks the fixture played. Standings are rebuilt when the saved result is
/// validated, and also when it overwrites a previously validated score with an
/// unvalidated one, which retracts it from the table.
pub async fn record_result(
    state: &SharedState,
    match_id: Uuid,
    request: RecordResultRequest,
    validator: &AdminIdentity,
) -> Result<ResultSummary, ServiceError> {
    let validator_name = validator.name.clone();

    let summary = state
        .mutate(move |league| {
            if league.match_by_id(match_id).is_none() {
                return Err(ServiceError::NotFound(format!(
                    "match `{match_id}` not found"
                )));
            }

            let now = SystemTime::now();
            let validated_by = request.validated.then(|| validator_name.clone());
            let previously_validated = league
                .result_for_match(match_id)
                .is_some_and(|result| result.validated);

            let result_id = match league.results.iter().position(|r| r.match_id == match_id) {
                Some(index) => {
                    let result = &mut league.results[index];
                    result.home_score = request.home_score;
                    result.away_score = request.away_score;
                    result.validated = request.validated;
                    result.validated_by = validated_by;
                    result.updated_at = now;
                    result.id
                }
                None => {
                    let result = ResultEntity {
                        id: Uuid::new_v4(),
                        match_id,
                        home_score: request.home_score,
                        away_score: request.away_score,
                        validated: request.validated,
                        validated_by,
                        recorded_at: now,
                        updated_at: now,
                    };
                    let id = result.id;
                    league.results.push(result);
                    id
                }
            };

            let fixture = league
                .match_by_id_mut(match_id)
                .expect("fixture checked above");
            fixture.played = true;
            fixture.played_at = Some(now);

            if request.validated || previously_validated {
                standings::recompute_all(league);
            }

            let result = league.result_by_id(result_id).expect("result just saved");
            ResultSummary::from_league(league, result)
                .ok_or_else(|| ServiceError::InvalidState("fixture vanished during save".into()))
        })
        .await?;

    info!(
        home = %summary.home_team,
        away = %summary.away_team,
        score = format!("{}-{}", summary.home_score, summary.away_score),
        validated = summary.validated,
        "result recorded"
    );
    Ok(summary)
}

/// Validate a pending result on behalf of `validator` and rebuild the table.
pub async fn validate_result(
    state: &SharedState,
    result_id: Uuid,
    validator: &AdminIdentity,
) -> Result<ResultSummary, ServiceError> {
    let validator_name = validator.name.clone();

    let summary = state
        .mutate(move |league| {
            let result = league
                .result_by_id_mut(result_id)
                .ok_or_else(|| ServiceError::NotFound(format!("result `{result_id}` not found")))?;

            result.validated = true;
            result.validated_by = Some(validator_name);
            result.updated_at = SystemTime::now();

            standings::recompute_all(league);

            let result = league.result_by_id(result_id).expect("result exists");
            ResultSummary::from_league(league, result)
                .ok_or_else(|| ServiceError::InvalidState("fixture vanished during save".into()))
        })
        .await?;

    info!(result = %result_id, by = %validator.name, "result validated");
    Ok(summary)
}

/// Delete a result and rebuild the table, retracting the score whether or not
/// it had been validated. The fixture returns to the unplayed pool.
pub async fn delete_result(state: &SharedState, result_id: Uuid) -> Result<(), ServiceError> {
    state
        .mutate(|league| {
            let index = league
                .results
                .iter()
                .position(|r| r.id == result_id)
                .ok_or_else(|| ServiceError::NotFound(format!("result `{result_id}` not found")))?;
            let removed = league.results.remove(index);

            if let Some(fixture) = league.match_by_id_mut(removed.match_id) {
                fixture.played = false;
                fixture.played_at = None;
            }

            standings::recompute_all(league);
            Ok(())
        })
        .await?;

    info!(result = %result_id, "result deleted and standings rebuilt");
    Ok(())
}
