use maud::{html, Markup, DOCTYPE};
use serde_json::json;

use crate::middleware::{Flash, FlashKind};

/// Per-request data the layout needs besides the page body.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub title: String,
    pub is_authenticated: bool,
    pub csrf: String,
    pub flash: Option<Flash>,
}

pub fn layout(page: &Page, content: Markup) -> Markup {
    let hx_headers = json!({ "X-CSRF-Token": page.csrf }).to_string();

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (page.title) " | Mission Log" }
                script src="https://unpkg.com/htmx.org@1.9.12" {}
            }
            body hx-headers=(hx_headers) {
                nav .navbar {
                    a .brand href="/" { "Mission Log" }
                    @if page.is_authenticated {
                        a href="/dashboard" { "Dashboard" }
                        a href="/dashboard/posts" { "Logs" }
                        a href="/logout" { "Logout" }
                    } @else {
                        a href="/login" { "Login" }
                        a href="/register" { "Register" }
                    }
                }
                div #flash {
                    @if let Some(flash) = &page.flash {
                        (flash_body(&flash.message, flash.kind))
                    }
                }
                main { (content) }
            }
        }
    }
}

/// Out-of-band replacement for the `#flash` container, appended to HTMX
/// fragment responses.
pub fn flash_message(message: &str, kind: FlashKind) -> Markup {
    html! {
        div #flash hx-swap-oob="true" {
            (flash_body(message, kind))
        }
    }
}

fn flash_body(message: &str, kind: FlashKind) -> Markup {
    html! {
        div class={ "alert alert-" (kind.as_str()) } role="alert" { (message) }
    }
}
