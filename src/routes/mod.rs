use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::{info, warn};

use crate::models::{
    AppState, ChatRequest, ChatResponse, CheckRequest, HintRequest, HintResponse, MessageResponse,
    ResultResponse,
};

/// HTTP handler for the index page
pub async fn index() -> impl Responder {
    HttpResponse::Ok().body("Akinator server")
}

pub async fn initialize(app_state: web::Data<AppState>) -> impl Responder {
    info!("POST /initialize");
    let message = app_state.session.lock().await.start().await;
    HttpResponse::Ok().json(MessageResponse { message })
}

pub async fn chat(app_state: web::Data<AppState>, body: web::Json<ChatRequest>) -> impl Responder {
    info!("POST /chat");
    let response = app_state.session.lock().await.answer_question(&body.message).await;
    HttpResponse::Ok().json(ChatResponse { response })
}

pub async fn check(app_state: web::Data<AppState>, body: web::Json<CheckRequest>) -> impl Responder {
    info!("POST /check");
    let result = app_state.session.lock().await.guess(&body.answer);
    HttpResponse::Ok().json(ResultResponse { result })
}

/// A request without a body asks for a medium hint; a body that is present must parse.
pub async fn hint(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    body: Option<web::Json<HintRequest>>,
) -> impl Responder {
    let request = match body {
        Some(body) => body.into_inner(),
        None if has_body(&req) => {
            warn!("POST /hint with malformed body");
            return HttpResponse::BadRequest().finish();
        }
        None => HintRequest::default(),
    };
    info!("POST /hint level={}", request.level);
    let hint = app_state.session.lock().await.hint(&request.level).await;
    HttpResponse::Ok().json(HintResponse { hint })
}

pub async fn give_up(app_state: web::Data<AppState>) -> impl Responder {
    info!("POST /give_up");
    let result = app_state.session.lock().await.forfeit();
    HttpResponse::Ok().json(ResultResponse { result })
}

pub async fn status(app_state: web::Data<AppState>) -> impl Responder {
    let snapshot = app_state.session.lock().await.snapshot();
    HttpResponse::Ok().json(snapshot)
}

fn has_body(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .is_some_and(|len| len > 0)
}

/// Configure the HTTP routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/initialize").route(web::post().to(initialize)))
        .service(web::resource("/chat").route(web::post().to(chat)))
        .service(web::resource("/check").route(web::post().to(check)))
        .service(web::resource("/hint").route(web::post().to(hint)))
        .service(web::resource("/give_up").route(web::post().to(give_up)))
        .service(web::resource("/status").route(web::get().to(status)))
        .service(web::resource("/").route(web::get().to(index)));
}
