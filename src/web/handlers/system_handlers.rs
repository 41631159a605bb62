// src/web/handlers/system_handlers.rs
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;

use crate::web::page::INDEX_HTML;
use crate::web::types::TextResponse;

pub async fn index_handler() -> RawHtml<&'static str> {
    RawHtml(INDEX_HTML)
}

pub async fn health_handler() -> Json<TextResponse> {
    crate::app_log!(debug, "Health check");
    Json(TextResponse::success("OK".to_string()))
}
