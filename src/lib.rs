pub mod catalog;
pub mod content;
pub mod db;
pub mod enhance;
pub mod extract;
pub mod generate;
pub mod handlers;
pub mod manage;
pub mod models;
pub mod names;
pub mod rejections;
pub mod selector;

use axum::Router;

#[derive(Clone)]
pub struct AppState {
    pub db: db::Db,
    pub generators: generate::GeneratorPool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::content::routes())
        .merge(handlers::progress::routes())
        .merge(handlers::admin::routes())
        .with_state(state)
}
