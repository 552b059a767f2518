//! The HTML page and its form posts.
//!
//! Every form post mutates the session and redirects back to `/`, which
//! re-renders the whole page from the session state.

use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;

use super::{generate, note_views, submit_contact, SessionHandle};
use crate::compose::{filter, CategoryFilter};
use crate::selection::{Notice, NoticeLevel};
use crate::views::{render_page, PageModel};
use crate::AppState;

pub const EXPORT_FILE_NAME: &str = "drawing_notes.txt";

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)));
    cfg.service(web::resource("/selection/toggle").route(web::post().to(toggle)));
    cfg.service(web::resource("/selection/clear").route(web::post().to(clear)));
    cfg.service(web::resource("/contact").route(web::post().to(contact)));
    cfg.service(web::resource(format!("/export/{}", EXPORT_FILE_NAME)).route(web::get().to(export)));
}

fn redirect_home(session: &SessionHandle) -> HttpResponse {
    session
        .respond(StatusCode::SEE_OTHER)
        .insert_header((header::LOCATION, "/"))
        .finish()
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    category: Option<String>,
}

/// Render the page. `?category=` changes the session's filter.
async fn index(
    data: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> impl Responder {
    let session = SessionHandle::from_request(&data, &req);
    let categories = data.catalog.categories(&data.category_order);

    let (selection, category, notice) = data.sessions.with_session(session.id, |s| {
        if let Some(raw) = &query.category {
            // Categories not in the catalog fall back to All
            s.category = match CategoryFilter::parse(raw) {
                CategoryFilter::Only(c) if !categories.contains(&c) => CategoryFilter::All,
                parsed => parsed,
            };
        }
        (s.selection.clone(), s.category.clone(), s.notice.take())
    });

    let notes = note_views(&filter(&data.catalog, &category), &selection);
    let (generated, summary) = generate(&data, &selection);

    let html = render_page(&PageModel {
        categories: &categories,
        active_category: category.as_str(),
        notes: &notes,
        generated: &generated,
        summary: &summary,
        generation: selection.generation(),
        notice: notice.as_ref(),
        leads_configured: data.leads.is_configured(),
    });

    session
        .respond(StatusCode::OK)
        .content_type("text/html; charset=utf-8")
        .body(html)
}

#[derive(Debug, Deserialize)]
struct ToggleForm {
    id: usize,
    checked: bool,
}

async fn toggle(
    data: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<ToggleForm>,
) -> impl Responder {
    let session = SessionHandle::from_request(&data, &req);

    if !data.catalog.contains(form.id) {
        log::warn!("[SESSIONS] Toggle for unknown note id {}", form.id);
        data.sessions.set_notice(
            session.id,
            Notice::new(NoticeLevel::Error, format!("Unknown note {}", form.id)),
        );
    } else {
        data.sessions
            .with_session(session.id, |s| s.selection.toggle(form.id, form.checked));
    }

    redirect_home(&session)
}

async fn clear(data: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let session = SessionHandle::from_request(&data, &req);
    data.sessions.with_session(session.id, |s| s.selection.clear());
    redirect_home(&session)
}

#[derive(Debug, Deserialize)]
struct ContactForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

async fn contact(
    data: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<ContactForm>,
) -> impl Responder {
    let session = SessionHandle::from_request(&data, &req);
    let result = submit_contact(&data, session.id, &form.name, &form.email).await;

    data.sessions
        .set_notice(session.id, Notice::new(result.level, result.message));

    redirect_home(&session)
}

/// Download the generated text exactly as shown on the page.
async fn export(data: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let session = SessionHandle::from_request(&data, &req);
    let selection = data.sessions.with_session(session.id, |s| s.selection.clone());
    let (text, summary) = generate(&data, &selection);

    if summary.count == 0 {
        return session
            .respond(StatusCode::NOT_FOUND)
            .content_type("text/plain; charset=utf-8")
            .body("No notes selected");
    }

    session
        .respond(StatusCode::OK)
        .content_type("text/plain; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
        ))
        .body(text)
}
