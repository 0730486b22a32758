use maud::{html, Markup};

use super::csrf_field;
use crate::pb::Post;

pub fn posts_page(posts: &[Post], query: &str, csrf: &str) -> Markup {
    html! {
        section .posts {
            h1 { "Mission Logs" }
            form .new-post method="post" action="/dashboard/posts" {
                (csrf_field(csrf))
                input type="text" name="title" placeholder="Log title" required;
                textarea name="content" placeholder="Log entry" {}
                label { input type="checkbox" name="public"; " Public" }
                button type="submit" { "Record Log" }
            }
            input .search type="search" name="q" value=(query) placeholder="Search logs"
                hx-get="/dashboard/posts"
                hx-trigger="input changed delay:300ms, search"
                hx-target="#post-list"
                hx-swap="innerHTML";
            div #post-list {
                (post_list(posts, csrf))
            }
        }
    }
}

pub fn post_list(posts: &[Post], csrf: &str) -> Markup {
    html! {
        @if posts.is_empty() {
            p .empty { "No mission logs found." }
        } @else {
            @for post in posts {
                (post_item(post, csrf))
            }
        }
    }
}

/// Card for one post. Its id (`post-{id}`) is the HTMX swap target for
/// toggle and delete.
pub fn post_item(post: &Post, csrf: &str) -> Markup {
    let dom_id = format!("post-{}", post.id);
    let target = format!("#{}", dom_id);
    let url = format!("/dashboard/posts/{}", post.id);

    html! {
        article .post id=(dom_id) {
            header {
                h3 { (post.title) }
                @if post.public {
                    span .badge.badge-public { "PUBLIC" }
                } @else {
                    span .badge.badge-private { "PRIVATE" }
                }
            }
            p .content { (post.content) }
            footer {
                time datetime=(post.created) { (post.created_display()) }
                button type="button"
                    hx-post={ "/api/posts/" (post.id) "/toggle" }
                    hx-target=(target)
                    hx-swap="outerHTML" { "Toggle visibility" }
                a href={ (url) "/edit" } { "Edit" }
                form method="post" action=(url)
                    hx-delete=(url)
                    hx-target=(target)
                    hx-swap="outerHTML"
                    hx-confirm="Purge this log?" {
                    input type="hidden" name="_method" value="DELETE";
                    (csrf_field(csrf))
                    button type="submit" { "Purge" }
                }
            }
        }
    }
}

pub fn edit_post_form(post: &Post, csrf: &str) -> Markup {
    html! {
        section .edit-post {
            h1 { "Edit Log" }
            form method="post" action={ "/dashboard/posts/" (post.id) } {
                input type="hidden" name="_method" value="PUT";
                (csrf_field(csrf))
                label for="title" { "Title" }
                input #title type="text" name="title" value=(post.title) required;
                label for="content" { "Content" }
                textarea #content name="content" { (post.content) }
                label { input type="checkbox" name="public" checked[post.public]; " Public" }
                button type="submit" { "Update Log" }
                a href="/dashboard/posts" { "Cancel" }
            }
        }
    }
}
