//! HTML rendering. Every function returns `maud::Markup`, which axum can
//! send directly.

mod layout;
mod pages;
mod posts;

pub use layout::{flash_message, layout, Page};
pub use pages::{dashboard, index, login, register};
pub use posts::{edit_post_form, post_item, post_list, posts_page};

use maud::{html, Markup};

pub(crate) fn csrf_field(csrf: &str) -> Markup {
    html! {
        input type="hidden" name="_csrf" value=(csrf);
    }
}
