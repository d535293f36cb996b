use std::collections::HashMap;

use actix_web::web::Data;
use actix_web::{test, web, App};
use serde_json::Value;

use clubhouse::controller::import::upload_golfers;
use clubhouse::model::{get_golfers, import_golfers};

mod common;

fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn valid_row(ghin: &str, name: &str, hi: &str) -> HashMap<String, String> {
    row(&[
        ("GHIN", ghin),
        ("Name", name),
        ("HI", hi),
        ("Blue", "11.0"),
        ("Gold", ""),
        ("Black", "+1.2"),
        ("White", "not a number"),
        ("Green", "9.9"),
    ])
}

#[tokio::test]
async fn batch_tolerates_bad_rows() -> Result<(), Box<dyn std::error::Error>> {
    let config_and_pool = common::setup_test_db("").await?;

    let mut rows: Vec<HashMap<String, String>> = (1..=9)
        .map(|i| valid_row(&format!("100{i}"), &format!("Golfer {i}"), "10.2"))
        .collect();
    // Name missing: rejected, but the batch keeps going.
    rows.insert(4, row(&[("GHIN", "9999"), ("Name", ""), ("HI", "4.0")]));

    let summary = import_golfers(&config_and_pool, rows).await?;
    assert_eq!(summary.imported, 9);
    assert_eq!(summary.skipped, 1);

    let golfers = get_golfers(&config_and_pool).await?;
    assert_eq!(golfers.len(), 9);
    assert!(golfers.iter().all(|g| g.ghin_number != "9999"));

    // Tee values follow the same normalization rules as the index.
    let first = &golfers[0];
    assert_eq!(first.handicap_index, Some(10.2));
    assert_eq!(first.ph_blue, Some(11.0));
    assert_eq!(first.ph_gold, None);
    assert_eq!(first.ph_black, Some(-1.2));
    assert_eq!(first.ph_white, None);
    assert_eq!(first.ph_green, Some(9.9));
    Ok(())
}

#[tokio::test]
async fn reimport_overwrites_in_place() -> Result<(), Box<dyn std::error::Error>> {
    let config_and_pool = common::setup_test_db("").await?;

    let rows = vec![
        valid_row("2001", "Alice Adams", "+2.0"),
        valid_row("2002", "Bob Brown", "8.0"),
    ];
    let summary = import_golfers(&config_and_pool, rows).await?;
    assert_eq!(summary.imported, 2);

    let golfers = get_golfers(&config_and_pool).await?;
    let alice = golfers.iter().find(|g| g.ghin_number == "2001").unwrap();
    assert_eq!(alice.handicap_index, Some(-2.0));

    let rows = vec![
        valid_row("2001", "Alice Adams-Smith", "3.05"),
        valid_row("2002", "Bob Brown", "8.0"),
    ];
    let summary = import_golfers(&config_and_pool, rows).await?;
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.skipped, 0);

    let golfers = get_golfers(&config_and_pool).await?;
    assert_eq!(golfers.len(), 2, "upsert must not duplicate keys");
    let alice = golfers.iter().find(|g| g.ghin_number == "2001").unwrap();
    assert_eq!(alice.player_name, "Alice Adams-Smith");
    assert_eq!(alice.handicap_index, Some(3.1));
    Ok(())
}

#[tokio::test]
async fn upload_endpoint_decodes_multipart_csv() -> Result<(), Box<dyn std::error::Error>> {
    let config_and_pool = common::setup_test_db("").await?;

    let app = test::init_service(
        App::new()
            .app_data(Data::new(config_and_pool.clone()))
            .route("/api/upload", web::post().to(upload_golfers)),
    )
    .await;

    let csv = "GHIN, Name ,HI,Blue,Gold,Black,White,Green\n\
               3001,Carol Clark,12.4,13.0,,,,\n\
               3002,Dave Dunn,+1.0,,,,,\n\
               ,No Ghin,5.0,,,,,\n";
    let boundary = "----clubhouse-test-boundary";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"golfers.csv\"\r\nContent-Type: text/csv\r\n\r\n{csv}\r\n--{boundary}--\r\n"
    );

    let req = test::TestRequest::post()
        .uri("/api/upload")
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let message = body.get("message").and_then(Value::as_str).unwrap();
    assert!(message.contains("Imported 2 golfers"), "{message}");
    assert!(message.contains("Skipped 1 rows"), "{message}");

    let golfers = get_golfers(&config_and_pool).await?;
    assert_eq!(golfers.len(), 2);
    let dave = golfers.iter().find(|g| g.ghin_number == "3002").unwrap();
    assert_eq!(dave.handicap_index, Some(-1.0));
    Ok(())
}

#[tokio::test]
async fn upload_endpoint_rejects_empty_body() -> Result<(), Box<dyn std::error::Error>> {
    let config_and_pool = common::setup_test_db("").await?;

    let app = test::init_service(
        App::new()
            .app_data(Data::new(config_and_pool))
            .route("/api/upload", web::post().to(upload_golfers)),
    )
    .await;

    let boundary = "----clubhouse-test-boundary";
    let body = format!("--{boundary}--\r\n");
    let req = test::TestRequest::post()
        .uri("/api/upload")
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    Ok(())
}
