// crates/tasklist-web/src/page.rs
// ============================================================================
// Module: List Page
// Description: HTML rendering for the to-do list.
// Purpose: Render items, pending flashes, and the action forms.
// Dependencies: tasklist-core
// ============================================================================

//! ## Overview
//! The list page is a single HTML document with one form per action. Every
//! piece of dynamic text passes through [`escape_html`] before it is written.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tasklist_core::FlashMessage;
use tasklist_core::MAX_DESCRIPTION_BYTES;
use tasklist_core::ToDoItem;

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Page title.
const TITLE: &str = "To-Do List";

/// Renders the list page.
///
/// `maxlength` on the description input counts characters, so the form also
/// states the byte limit the server enforces.
#[must_use]
pub fn render_list_page(items: &[ToDoItem], flashes: &[FlashMessage]) -> String {
    let mut html = String::with_capacity(1024 + items.len() * 512);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{TITLE}</title>\n</head>\n<body>\n<h1>{TITLE}</h1>\n"));
    if !flashes.is_empty() {
        html.push_str("<ul class=\"flashes\">\n");
        for flash in flashes {
            html.push_str(&format!(
                "<li class=\"flash flash-{}\">{}</li>\n",
                flash.level.as_str(),
                escape_html(&flash.text)
            ));
        }
        html.push_str("</ul>\n");
    }
    html.push_str(&format!(
        "<form method=\"post\" action=\"/post\">\n<input type=\"text\" name=\"description\" \
         maxlength=\"{MAX_DESCRIPTION_BYTES}\" required>\n<button type=\"submit\">Add</button>\n\
         <small class=\"hint\">Up to {MAX_DESCRIPTION_BYTES} bytes; accented letters and \
         symbols count as more than one.</small>\n</form>\n"
    ));
    if items.is_empty() {
        html.push_str("<p class=\"empty\">Nothing to do.</p>\n");
    } else {
        html.push_str("<ul class=\"items\">\n");
        for item in items {
            render_item(&mut html, item);
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// Renders one item row with its toggle and delete forms.
fn render_item(html: &mut String, item: &ToDoItem) {
    let id = item.id;
    let (state, next, label) = if item.completed {
        ("completed", "false", "Mark not done")
    } else {
        ("pending", "true", "Mark done")
    };
    html.push_str(&format!(
        "<li class=\"item {state}\" id=\"item-{id}\">\n<span class=\"description\">{}</span>\n",
        escape_html(item.description.as_str())
    ));
    html.push_str(&format!(
        "<form method=\"post\" action=\"/patch\">\n<input type=\"hidden\" name=\"id\" \
         value=\"{id}\">\n<input type=\"hidden\" name=\"completed\" value=\"{next}\">\n<button \
         type=\"submit\">{label}</button>\n</form>\n"
    ));
    html.push_str(&format!(
        "<form method=\"post\" action=\"/delete\">\n<input type=\"hidden\" name=\"id\" \
         value=\"{id}\">\n<button type=\"submit\">Delete</button>\n</form>\n</li>\n"
    ));
}

/// Escapes text for HTML element content and quoted attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

// ============================================================================
// SECTION: Tests
// ============================================================================
