use std::collections::HashMap;

use actix_multipart::Multipart;
use actix_web::web::Data;
use actix_web::HttpResponse;
use futures::StreamExt;
use serde_json::json;
use sql_middleware::middleware::ConfigAndPool;

use crate::model;

// Decodes the uploaded bytes as CSV with trimmed headers; each row becomes an
// unordered column-name -> raw-text map. Nothing is written to disk.
fn decode_rows(bytes: &[u8]) -> Result<Vec<HashMap<String, String>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);
    reader.deserialize::<HashMap<String, String>>().collect()
}

pub async fn upload_golfers(mut payload: Multipart, abc: Data<ConfigAndPool>) -> HttpResponse {
    let mut file_bytes: Option<Vec<u8>> = None;
    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) => {
                return HttpResponse::BadRequest()
                    .json(json!({"message": format!("Malformed upload: {e}")}));
            }
        };
        let mut buffer = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(bytes) => buffer.extend_from_slice(&bytes),
                Err(e) => {
                    return HttpResponse::BadRequest()
                        .json(json!({"message": format!("Malformed upload: {e}")}));
                }
            }
        }
        file_bytes = Some(buffer);
        break;
    }

    let Some(bytes) = file_bytes else {
        return HttpResponse::BadRequest().json(json!({"message": "No file uploaded."}));
    };

    let rows = match decode_rows(&bytes) {
        Ok(rows) => rows,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(json!({"message": format!("Could not parse CSV: {e}")}));
        }
    };

    match model::import_golfers(abc.get_ref(), rows).await {
        Ok(summary) => HttpResponse::Ok().json(json!({
            "message": format!(
                "Import complete. Imported {} golfers. Skipped {} rows.",
                summary.imported, summary.skipped
            )
        })),
        Err(e) => {
            eprintln!("Error importing golfers: {e}");
            HttpResponse::InternalServerError()
                .json(json!({"message": "A major error occurred during import."}))
        }
    }
}
