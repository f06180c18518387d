use std::env;
use std::sync::Mutex;

use actix_web::{web, App, HttpServer};
use log::info;
use vesta::config::ServerConfig;
use vesta::http::server::{add_stock, get_l1_data, get_order, info, order};
use vesta::http::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = ServerConfig::from_args(env::args().skip(1))?;

    let app_state = Mutex::new(AppState::with_symbols(&config.name, &config.symbols));
    let exchange_state = web::Data::new(app_state);

    info!(
        "SERVER: {} listening on {}:{}",
        config.name, config.address, config.port
    );
    HttpServer::new(move || {
        App::new()
            .app_data(exchange_state.clone())
            .service(info)
            .service(add_stock)
            .service(order)
            .service(get_order)
            .service(get_l1_data)
    })
    .bind((config.address, config.port))?
    .run()
    .await?;
    Ok(())
}
