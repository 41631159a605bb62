// src/web/mod.rs

pub mod handlers;
pub mod page;
pub mod types;

pub use handlers::*;
pub use types::*;

use anyhow::Result;
use rocket::data::{Limits, ToByteUnit};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::figment::Figment;
use rocket::form::Form;
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};

use crate::app_log;
use crate::pipeline::ResumeAssistant;

const MAX_UPLOAD_MIB: u64 = 10;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new("Access-Control-Allow-Methods", "POST, GET, OPTIONS"));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/")]
pub async fn index() -> RawHtml<&'static str> {
    handlers::index_handler().await
}

#[get("/occupations")]
pub async fn list_occupations(
    assistant: &State<ResumeAssistant>,
) -> Result<Json<DataResponse<Vec<String>>>, ApiError> {
    handlers::list_occupations_handler(assistant).await
}

#[get("/occupations/<occupation>/skills")]
pub async fn occupation_skills(
    occupation: String,
    assistant: &State<ResumeAssistant>,
) -> Result<Json<DataResponse<OccupationSkills>>, ApiError> {
    handlers::occupation_skills_handler(occupation, assistant).await
}

#[post("/ask", data = "<form>")]
pub async fn ask(
    form: Form<AskForm<'_>>,
    assistant: &State<ResumeAssistant>,
) -> Result<Json<DataResponse<AskData>>, ApiError> {
    handlers::ask_handler(form, assistant).await
}

#[get("/health")]
pub async fn health() -> Json<TextResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec!["Send the form as multipart/form-data".to_string()],
    ))
}

#[rocket::catch(413)]
pub fn payload_too_large() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        format!("File size exceeds {}MB limit", MAX_UPLOAD_MIB),
        "FILE_TOO_LARGE".to_string(),
        vec![format!("Use a smaller file size (max {}MB)", MAX_UPLOAD_MIB)],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Form fields could not be read".to_string(),
        "INVALID_FORM".to_string(),
        vec!["Check the resume, occupation and question fields".to_string()],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec!["Try again in a few moments".to_string()],
    ))
}

/// Rocket settings: bind address, port and the upload limits.
pub fn server_figment(port: u16) -> Figment {
    let limits = Limits::default()
        .limit("file", MAX_UPLOAD_MIB.mebibytes())
        .limit("data-form", (MAX_UPLOAD_MIB + 1).mebibytes());

    rocket::Config::figment()
        .merge(("address", "0.0.0.0"))
        .merge(("port", port))
        .merge(("limits", limits))
}

pub fn build_rocket(assistant: ResumeAssistant, figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(Cors)
        .manage(assistant)
        .mount("/", routes![index])
        .register(
            "/api",
            catchers![bad_request, payload_too_large, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![list_occupations, occupation_skills, ask, health, options],
        )
}

// Main server start function
pub async fn start_web_server(assistant: ResumeAssistant, port: u16) -> Result<()> {
    if let Err(e) = assistant.reference_data().await {
        app_log!(warn, "Reference data not loaded at startup: {}", e);
    }

    app_log!(info, "Starting Resume Assistant on http://0.0.0.0:{}", port);

    build_rocket(assistant, server_figment(port))
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket failed: {}", e))?;

    Ok(())
}
