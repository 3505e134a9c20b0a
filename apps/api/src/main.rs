use actix_web::{web, App, HttpServer};
use taskdeck::config::AppConfig;
use taskdeck::middleware::cors::cors_middleware;
use taskdeck::middleware::request_id::AssignRequestId;
use taskdeck::middleware::request_log::RequestLog;
use taskdeck::routes;
use taskdeck::state::app_state::AppState;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    println!(
        "🚀 Starting Taskdeck API on http://{}:{}",
        config.host, config.port
    );

    let state = AppState::in_memory(config.security.clone());

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(RequestLog)
            .wrap(AssignRequestId)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
