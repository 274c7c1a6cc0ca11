use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use aria_coach::CoachOutcome;
use aria_types::{FormAnalysisRequest, MealPlanRequest, PlateauRequest, WorkoutPlanRequest};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const MAX_FRAMES: usize = 8;

/// `{value, fallback, error?}` with status 200 either way
fn respond<T: Serialize>(outcome: CoachOutcome<T>) -> Response {
    Json(outcome.to_response()).into_response()
}

pub async fn workout_plan(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<WorkoutPlanRequest>,
) -> ApiResult<Response> {
    if req.goal.trim().is_empty() {
        return Err(ApiError::BadRequest("goal must not be empty".to_string()));
    }
    if !(1..=7).contains(&req.days_per_week) {
        return Err(ApiError::BadRequest("days_per_week must be between 1 and 7".to_string()));
    }
    Ok(respond(state.coach.generate_workout_plan(&user_id, &req).await))
}

pub async fn meal_plan(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<MealPlanRequest>,
) -> ApiResult<Response> {
    if req.calories == 0 || req.meals_per_day == 0 {
        return Err(ApiError::BadRequest(
            "calories and meals_per_day must be positive".to_string(),
        ));
    }
    Ok(respond(state.coach.generate_meal_plan(&user_id, &req).await))
}

pub async fn motivation(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Response {
    respond(state.coach.get_motivation(&user_id).await)
}

pub async fn progress(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Response {
    respond(state.coach.analyze_progress(&user_id).await)
}

pub async fn plateau(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<PlateauRequest>,
) -> ApiResult<Response> {
    if req.exercise.trim().is_empty() {
        return Err(ApiError::BadRequest("exercise must not be empty".to_string()));
    }
    Ok(respond(state.coach.get_plateau_advice(&user_id, &req).await))
}

pub async fn form_analysis(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<FormAnalysisRequest>,
) -> ApiResult<Response> {
    if req.frames.is_empty() || req.frames.len() > MAX_FRAMES {
        return Err(ApiError::BadRequest(format!(
            "between 1 and {} frames are required",
            MAX_FRAMES
        )));
    }
    Ok(respond(state.coach.analyze_form(&user_id, &req).await))
}
