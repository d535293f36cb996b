use actix_web::web::{self, Data};
use actix_web::HttpResponse;
use serde::Deserialize;
use serde_json::{json, Value};
use sql_middleware::middleware::ConfigAndPool;

use crate::model;

pub async fn list_golfers(abc: Data<ConfigAndPool>) -> HttpResponse {
    match model::get_golfers(abc.get_ref()).await {
        Ok(golfers) => HttpResponse::Ok().json(golfers),
        Err(e) => {
            eprintln!("Error fetching golfers: {e}");
            HttpResponse::InternalServerError().json(json!({"message": "Error fetching golfers."}))
        }
    }
}

#[derive(Deserialize)]
pub struct GuestGolferRequest {
    #[serde(rename = "playerName")]
    pub player_name: Option<String>,
    #[serde(rename = "handicapIndex")]
    pub handicap_index: Option<Value>,
}

// Accepts a JSON number or a numeric string.
fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub async fn add_guest_golfer(
    body: web::Json<GuestGolferRequest>,
    abc: Data<ConfigAndPool>,
) -> HttpResponse {
    let name = body
        .player_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let (Some(name), Some(handicap_raw)) = (name, body.handicap_index.as_ref()) else {
        return HttpResponse::BadRequest()
            .json(json!({"message": "Player name and handicap are required."}));
    };
    let Some(handicap_index) = coerce_f64(handicap_raw) else {
        return HttpResponse::BadRequest().json(json!({"message": "Invalid handicap index."}));
    };

    match model::insert_guest_golfer(abc.get_ref(), name, handicap_index).await {
        Ok(golfer) => HttpResponse::Created().json(golfer),
        Err(e) => {
            eprintln!("Error adding new golfer: {e}");
            HttpResponse::InternalServerError()
                .json(json!({"message": "Failed to add new golfer."}))
        }
    }
}

pub async fn toggle_regular(path: web::Path<String>, abc: Data<ConfigAndPool>) -> HttpResponse {
    let ghin = path.into_inner();
    match model::toggle_regular(abc.get_ref(), &ghin).await {
        Ok(Some(is_regular)) => HttpResponse::Ok().json(json!({"is_regular": is_regular})),
        Ok(None) => HttpResponse::NotFound().json(json!({"message": "Golfer not found."})),
        Err(e) => {
            eprintln!("Error toggling regular status for GHIN {ghin}: {e}");
            HttpResponse::InternalServerError()
                .json(json!({"message": "Error updating golfer status."}))
        }
    }
}
