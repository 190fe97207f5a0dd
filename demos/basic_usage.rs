//! Basic usage example for logrelay-actix
//!
//! Expects a collector listening on 127.0.0.1:24224 (any TCP sink that reads
//! JSON lines will do):
//!
//! ```bash
//! nc -lk 24224 &
//! cargo run --example basic_usage
//! ```

use actix_web::{web, App, HttpResponse, HttpServer};
use logrelay_actix::{Logger, LoggerConfig};

async fn index() -> HttpResponse {
    HttpResponse::Ok().body("Hello from logrelay!")
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "example-app"
    }))
}

async fn boom() -> actix_web::Result<HttpResponse> {
    Err(actix_web::error::ErrorInternalServerError("simulated failure"))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let logger = Logger::new(LoggerConfig::new("127.0.0.1", 24224, "demo"))
        .await
        .expect("no collector on 127.0.0.1:24224 - start one first");

    println!("Starting example server on http://0.0.0.0:8080");
    println!("Records go to the collector under tags 'demo' and 'demo.panic'");
    println!("\nTry these endpoints:");
    println!("  GET http://localhost:8080/");
    println!("  GET http://localhost:8080/health");
    println!("  GET http://localhost:8080/boom   (emits a demo.panic record)");

    HttpServer::new(move || {
        App::new()
            // Panic logger innermost, request logger outermost
            .wrap(logger.panic_logger())
            .wrap(logger.request_logger())
            .service(web::resource("/").route(web::get().to(index)))
            .service(web::resource("/health").route(web::get().to(health)))
            .service(web::resource("/boom").route(web::get().to(boom)))
    })
    .bind("0.0.0.0:8080")?
    .run()
    .await
}
