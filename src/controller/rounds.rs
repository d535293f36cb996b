use actix_web::web::{self, Data};
use actix_web::HttpResponse;
use serde::Deserialize;
use serde_json::{json, Value};
use sql_middleware::middleware::ConfigAndPool;

use crate::model::{self, NewRound};

pub async fn create_round(body: web::Json<NewRound>, abc: Data<ConfigAndPool>) -> HttpResponse {
    match model::create_round(abc.get_ref(), body.into_inner()).await {
        Ok(round_id) => HttpResponse::Created()
            .json(json!({"roundId": round_id, "message": "Round created successfully!"})),
        Err(e) => {
            eprintln!("Error creating round: {e}");
            HttpResponse::InternalServerError().json(json!({"message": "Failed to create round."}))
        }
    }
}

#[derive(Deserialize)]
pub struct ScoreUpdateRequest {
    #[serde(rename = "roundId")]
    pub round_id: Value,
    #[serde(rename = "playerGhin")]
    pub player_ghin: String,
    #[serde(rename = "holeNumber")]
    pub hole_number: Value,
    pub score: Option<Value>,
}

// Identifiers arrive as a JSON number or a numeric string.
fn coerce_i64(value: &Value) -> Result<i64, ()> {
    match value {
        Value::Number(n) => n.as_i64().ok_or(()),
        Value::String(s) => s.trim().parse().map_err(|_| ()),
        _ => Err(()),
    }
}

// Scores additionally allow an empty string (clear) or null (clear).
fn coerce_score(value: Option<&Value>) -> Result<Option<i64>, ()> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(v) => coerce_i64(v).map(Some),
    }
}

pub async fn update_score(
    body: web::Json<ScoreUpdateRequest>,
    abc: Data<ConfigAndPool>,
) -> HttpResponse {
    let (Ok(round_id), Ok(hole_number)) = (
        coerce_i64(&body.round_id),
        coerce_i64(&body.hole_number),
    ) else {
        return HttpResponse::BadRequest()
            .json(json!({"message": "Invalid round or hole value."}));
    };
    let Ok(score) = coerce_score(body.score.as_ref()) else {
        return HttpResponse::BadRequest().json(json!({"message": "Invalid score value."}));
    };

    match model::update_score(abc.get_ref(), round_id, &body.player_ghin, hole_number, score)
    .await
    {
        Ok(true) => HttpResponse::Ok().json(json!({"message": "Score updated successfully."})),
        Ok(false) => HttpResponse::NotFound().json(json!({"message": "Score entry not found."})),
        Err(e) => {
            eprintln!("Error updating score: {e}");
            HttpResponse::InternalServerError().json(json!({"message": "Failed to update score."}))
        }
    }
}

pub async fn round_detail(path: web::Path<i64>, abc: Data<ConfigAndPool>) -> HttpResponse {
    let round_id = path.into_inner();
    match model::get_round_detail(abc.get_ref(), round_id).await {
        Ok(slots) if slots.is_empty() => {
            HttpResponse::NotFound().json(json!({"message": "Round not found."}))
        }
        Ok(slots) => HttpResponse::Ok().json(slots),
        Err(e) => {
            eprintln!("Error fetching data for round {round_id}: {e}");
            HttpResponse::InternalServerError()
                .json(json!({"message": "Failed to fetch round data."}))
        }
    }
}
