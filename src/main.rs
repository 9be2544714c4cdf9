use std::env;

use actix::{Addr, SyncArbiter};
use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use dotenv::dotenv;

use services::db_utils::{get_db_pool, AppState, PgActor};

mod schema;
mod services;
mod types;

fn init_pg_db() -> Addr<PgActor> {
    let db_url = env::var("PG_DATABASE_URL").expect("PG_DATABASE_URL must be set");
    let pool: Pool<ConnectionManager<PgConnection>> =
        get_db_pool(&db_url).expect("failed to initialize postgres pool");

    SyncArbiter::start(5, move || PgActor(pool.clone()))
}

fn init_redis_db() -> redis::Client {
    let db_uri = env::var("REDIS_DATABASE_URI").expect("REDIS_DATABASE_URI must be set");

    redis::Client::open(db_uri).expect("failed to open redis client")
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let pg_db = init_pg_db();
    let redis_db = init_redis_db();
    let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8000".to_owned());

    log::info!("iniciando servidor em {bind_address}");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(Data::new(AppState { pg_db: pg_db.clone(), redis_db: redis_db.clone() }))
            .service(services::home_page)
            .service(
                web::scope("/carrinhos")
                    .service(services::carrinho_route::listar_carrinhos)
                    .service(services::carrinho_route::criar_carrinho)
                    .service(services::carrinho_route::adicionar_item)
                    .service(services::carrinho_route::atualizar_item)
                    .service(services::carrinho_route::remover_item)
                    .service(services::carrinho_route::cancelar_pedido)
                    .service(services::carrinho_route::detalhe_carrinho)
                    .service(services::carrinho_route::atualizar_carrinho)
                    .service(services::carrinho_route::excluir_carrinho)
            )
            .service(
                web::scope("/mesas")
                    .service(services::mesa_route::listar_mesas)
                    .service(services::mesa_route::criar_mesa)
                    .service(services::mesa_route::adicionar_item)
                    .service(services::mesa_route::remover_item)
                    .service(services::mesa_route::cancelar_pedido)
                    .service(services::mesa_route::detalhe_mesa)
                    .service(services::mesa_route::atualizar_mesa)
                    .service(services::mesa_route::excluir_mesa)
            )
            .service(
                web::scope("/pedidos")
                    .service(services::pedido_route::listar_pedidos)
                    .service(services::pedido_route::criar_do_carrinho)
                    .service(services::pedido_route::atualizar_status)
                    .service(services::pedido_route::confirmar_recebimento)
                    .service(services::pedido_route::detalhe_pedido)
                    .service(services::pedido_route::excluir_pedido)
            )
            .service(
                web::scope("/produtos")
                    .service(services::produto_route::listar_produtos)
                    .service(services::produto_route::criar_produto)
                    .service(services::produto_route::detalhe_produto)
            )
            .service(
                web::scope("/estoques")
                    .service(services::estoque_route::listar_estoques)
            )
            .service(
                web::scope("/test")
                    .service(services::test_route::healthcheck)
            )
    })
    .bind(bind_address)?
    .run()
    .await
}
