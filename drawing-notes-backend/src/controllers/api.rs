//! JSON API over the same session state as the page.

use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, Responder};
use drawing_notes_types::{
    ApiResponse, ContactRequest, GeneratedNotes, NoteView, SelectionState, ToggleRequest,
};
use serde::Deserialize;

use super::{generate, note_views, submit_contact, SessionHandle};
use crate::compose::{filter, CategoryFilter};
use crate::selection::{NoticeLevel, Selection};
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/notes").route(web::get().to(list_notes)));
    cfg.service(web::resource("/api/categories").route(web::get().to(list_categories)));
    cfg.service(web::resource("/api/selection/toggle").route(web::post().to(toggle)));
    cfg.service(web::resource("/api/selection/clear").route(web::post().to(clear)));
    cfg.service(web::resource("/api/generated").route(web::get().to(generated)));
    cfg.service(web::resource("/api/contact").route(web::post().to(contact)));
}

fn selection_state(selection: &Selection) -> SelectionState {
    SelectionState {
        selected: selection.ids().iter().copied().collect(),
        generation: selection.generation(),
    }
}

#[derive(Debug, Deserialize)]
struct NotesQuery {
    category: Option<String>,
}

/// Notes in the requested category, flagged with the caller's selection
async fn list_notes(
    data: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<NotesQuery>,
) -> impl Responder {
    let session = SessionHandle::from_request(&data, &req);
    let category = query
        .category
        .as_deref()
        .map(CategoryFilter::parse)
        .unwrap_or_default();

    let selection = data.sessions.with_session(session.id, |s| s.selection.clone());
    let notes: Vec<NoteView> = note_views(&filter(&data.catalog, &category), &selection);

    session.respond(StatusCode::OK).json(ApiResponse::ok(notes))
}

async fn list_categories(data: web::Data<AppState>) -> impl Responder {
    let categories = data.catalog.categories(&data.category_order);
    actix_web::HttpResponse::Ok().json(ApiResponse::ok(categories))
}

async fn toggle(
    data: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<ToggleRequest>,
) -> impl Responder {
    let session = SessionHandle::from_request(&data, &req);

    if !data.catalog.contains(body.id) {
        return session
            .respond(StatusCode::BAD_REQUEST)
            .json(ApiResponse::<SelectionState>::err(format!("Unknown note id {}", body.id)));
    }

    let state = data.sessions.with_session(session.id, |s| {
        s.selection.toggle(body.id, body.checked);
        selection_state(&s.selection)
    });

    session.respond(StatusCode::OK).json(ApiResponse::ok(state))
}

async fn clear(data: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let session = SessionHandle::from_request(&data, &req);
    let state = data.sessions.with_session(session.id, |s| {
        s.selection.clear();
        selection_state(&s.selection)
    });
    session.respond(StatusCode::OK).json(ApiResponse::ok(state))
}

async fn generated(data: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let session = SessionHandle::from_request(&data, &req);
    let selection = data.sessions.with_session(session.id, |s| s.selection.clone());
    let (text, summary) = generate(&data, &selection);

    session.respond(StatusCode::OK).json(ApiResponse::ok(GeneratedNotes {
        text,
        summary,
        generation: selection.generation(),
    }))
}

async fn contact(
    data: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<ContactRequest>,
) -> impl Responder {
    let session = SessionHandle::from_request(&data, &req);
    let result = submit_contact(&data, session.id, &body.name, &body.email).await;

    // Upstream failures map to 502; validation outcomes are ordinary answers
    let status = if result.level == NoticeLevel::Error {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    session.respond(status).json(ApiResponse::ok(result))
}
