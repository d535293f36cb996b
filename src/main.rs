use deadpool_postgres::{ManagerConfig, RecyclingMethod};

use clubhouse::args;
use clubhouse::controller::{games, golfers, import, rounds};
use clubhouse::live::{hub::RoundHub, socket};
use sql_middleware::middleware::{AsyncDatabaseExecutor, ConfigAndPool, DatabaseType};

use actix_web::web::Data;
use actix_web::{web, App, HttpResponse, HttpServer};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = args::args_checks();

    let config_and_pool: ConfigAndPool;
    if args.db_type == DatabaseType::Postgres {
        let mut postgres_config = deadpool_postgres::Config::new();
        postgres_config.dbname = Some(args.db_name.clone());
        postgres_config.host = args.db_host.clone();
        postgres_config.port = args.db_port;
        postgres_config.user = args.db_user.clone();
        postgres_config.password = args.db_password.clone();
        if args
            .db_host
            .as_deref()
            .is_some_and(args::ssl_required)
        {
            postgres_config.ssl_mode = Some(deadpool_postgres::SslMode::Require);
        }
        postgres_config.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        config_and_pool = ConfigAndPool::new_postgres(postgres_config).await?;
    } else {
        match ConfigAndPool::new_sqlite(args.db_name.clone()).await {
            Ok(cap) => {
                config_and_pool = cap;
            }
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    if args.db_startup_script.is_some() {
        let script = args.combined_sql_script.clone();
        let mut conn = config_and_pool.get_connection().await?;
        conn.execute_batch(&script).await?;
    }

    let hub = Data::new(RoundHub::new());
    let port = args.port;

    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(config_and_pool.clone()))
            .app_data(hub.clone())
            .route("/api/upload", web::post().to(import::upload_golfers))
            .route("/api/golfers", web::get().to(golfers::list_golfers))
            .route("/api/golfers", web::post().to(golfers::add_guest_golfer))
            .route(
                "/api/golfers/{ghin}/toggle-regular",
                web::put().to(golfers::toggle_regular),
            )
            .route("/api/games", web::post().to(games::create_game))
            .route("/api/rounds", web::post().to(rounds::create_round))
            .route("/api/rounds/{round_id}", web::get().to(rounds::round_detail))
            .route("/api/scores", web::post().to(rounds::update_score))
            .route("/ws", web::get().to(socket::ws_entry))
            .route("/health", web::get().to(HttpResponse::Ok))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await?;
    Ok(())
}
