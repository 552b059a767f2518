//! Server-rendered page.
//!
//! `render_page` is a pure function of a `PageModel`; handlers rebuild the
//! model from session state on every request and render it again.

use drawing_notes_types::{GenerationSummary, NoteView};
use std::fmt::Write;

use crate::selection::{checkbox_key, Notice};

pub const PAGE_TITLE: &str = "Drawing Notes Generator";
pub const EMPTY_OUTPUT_HINT: &str = "👈 Select notes from the left panel";

pub struct PageModel<'a> {
    pub categories: &'a [String],
    pub active_category: &'a str,
    pub notes: &'a [NoteView],
    pub generated: &'a str,
    pub summary: &'a GenerationSummary,
    pub generation: u64,
    pub notice: Option<&'a Notice>,
    pub leads_configured: bool,
}

pub fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const STYLE: &str = r#"
body { font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; margin: 1rem 2rem; }
h1 { font-size: 2rem; margin: 0 0 .5rem; }
.columns { display: flex; gap: 2rem; }
.left { flex: 1; } .right { flex: 1.5; }
.note-list { height: 560px; overflow-y: auto; border: 1px solid #ddd; padding: .5rem; }
.note-list form { margin: .25rem 0; }
.flag { color: #b8860b; font-size: .85em; }
textarea { width: 100%; height: 500px; font-family: 'Courier New', monospace; font-size: 13px;
  background: #003559; color: #fff; border: 2px solid #006DAA; border-radius: 5px; padding: 12px; box-sizing: border-box; }
.actions { display: flex; gap: 10px; margin-top: 10px; align-items: center; }
.button { background: #1BA099; color: #fff; padding: 8px 16px; border: none; border-radius: 5px; cursor: pointer; text-decoration: none; }
.notice { padding: .5rem 1rem; border-radius: 5px; margin-bottom: .5rem; }
.notice.info { background: #e7f1fb; } .notice.success { background: #e3f6ea; }
.notice.warning { background: #fff4d6; } .notice.error { background: #fde2e1; }
"#;

const COPY_SCRIPT: &str = r#"
function copyNotes() {
  const text = document.getElementById('generated').value;
  const msg = document.getElementById('copyMessage');
  navigator.clipboard.writeText(text).then(
    () => { msg.textContent = '✅ Copied!'; setTimeout(() => msg.textContent = '', 2000); },
    () => { msg.textContent = '❌ Copy failed'; });
}
"#;

pub fn render_page(model: &PageModel) -> String {
    let mut html = String::with_capacity(8 * 1024);
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n<script>{}</script>\n</head>\n<body>\n<h1>📐 {}</h1>\n<hr>\n",
        PAGE_TITLE, STYLE, COPY_SCRIPT, PAGE_TITLE
    );

    if let Some(notice) = model.notice {
        let _ = writeln!(
            html,
            "<div class=\"notice {}\">{}</div>",
            notice.level.as_str(),
            html_escape(&notice.message)
        );
    }

    html.push_str("<div class=\"columns\">\n");
    render_selection_panel(&mut html, model);
    render_output_panel(&mut html, model);
    html.push_str("</div>\n<hr>\n");

    if model.leads_configured {
        render_contact_form(&mut html);
    }

    html.push_str("<small>🔧 Atlantis Prototyping - Drawing Notes Generator</small>\n</body>\n</html>\n");
    html
}

fn render_selection_panel(html: &mut String, model: &PageModel) {
    html.push_str("<div class=\"left\">\n<h3>Select Notes</h3>\n");

    html.push_str("<form method=\"get\" action=\"/\">\n<label for=\"category\">Filter by type:</label>\n");
    html.push_str("<select id=\"category\" name=\"category\" onchange=\"this.form.submit()\">\n");
    let options = std::iter::once("All").chain(model.categories.iter().map(String::as_str));
    for option in options {
        let selected = if option == model.active_category { " selected" } else { "" };
        let escaped = html_escape(option);
        let _ = writeln!(html, "<option value=\"{}\"{}>{}</option>", escaped, selected, escaped);
    }
    html.push_str("</select>\n<noscript><button type=\"submit\">Apply</button></noscript>\n</form>\n");

    html.push_str("<div class=\"note-list\">\n");
    for note in model.notes {
        let key = checkbox_key(note.id, model.generation);
        let _ = write!(
            html,
            "<form method=\"post\" action=\"/selection/toggle\">\
<input type=\"hidden\" name=\"id\" value=\"{id}\">\
<input type=\"hidden\" name=\"checked\" value=\"{next}\">\
<input type=\"checkbox\" id=\"{key}\" autocomplete=\"off\" onchange=\"this.form.submit()\"{checked}>\
<label for=\"{key}\"><b>{name}</b> ({note_type})</label>",
            id = note.id,
            next = !note.selected,
            key = key,
            checked = if note.selected { " checked" } else { "" },
            name = html_escape(&note.name),
            note_type = html_escape(&note.note_type),
        );
        if note.needs_editing {
            html.push_str(" <span class=\"flag\">✏️ needs editing</span>");
        }
        html.push_str("<noscript><button type=\"submit\">Toggle</button></noscript></form>\n");
    }
    html.push_str("</div>\n</div>\n");
}

fn render_output_panel(html: &mut String, model: &PageModel) {
    html.push_str("<div class=\"right\">\n<h3>Generated Notes</h3>\n");

    if model.summary.count == 0 {
        let _ = writeln!(
            html,
            "<textarea id=\"generated\" readonly style=\"text-align:center;padding-top:230px;font-size:16px\">\n{}</textarea>",
            html_escape(EMPTY_OUTPUT_HINT)
        );
        html.push_str("</div>\n");
        return;
    }

    if model.summary.any_placeholder {
        html.push_str(
            "<div class=\"notice warning\">Some selected notes contain [specify ...] placeholders that still need editing.</div>\n",
        );
    }

    // Newline after the opening tag keeps a leading newline in the text intact
    let _ = writeln!(
        html,
        "<textarea id=\"generated\">\n{}</textarea>",
        html_escape(model.generated)
    );
    html.push_str(
        "<div class=\"actions\">\
<button class=\"button\" type=\"button\" onclick=\"copyNotes()\">📋 Copy to Clipboard</button>\
<a class=\"button\" href=\"/export/drawing_notes.txt\" download>💾 Download as TXT</a>\
<form method=\"post\" action=\"/selection/clear\"><button class=\"button\" type=\"submit\">🗑️ Clear All</button></form>\
<span id=\"copyMessage\"></span></div>\n",
    );
    html.push_str("</div>\n");
}

fn render_contact_form(html: &mut String) {
    html.push_str(
        "<h3>Stay in touch</h3>\n\
<form method=\"post\" action=\"/contact\">\
<input type=\"text\" name=\"name\" placeholder=\"Name\"> \
<input type=\"text\" name=\"email\" placeholder=\"Email\"> \
<button class=\"button\" type=\"submit\">Submit</button></form>\n<hr>\n",
    );
}
