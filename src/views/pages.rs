use maud::{html, Markup};

use super::csrf_field;

pub fn index(is_authenticated: bool) -> Markup {
    html! {
        section .hero {
            h1 { "Launch Your " span .accent { "Full-Stack Mission" } }
            p {
                "Server-rendered pages, HTMX interactions and a backend that "
                "handles accounts and records. Keep a log of every mission."
            }
            @if is_authenticated {
                a .button href="/dashboard" { "Open Command Center" }
            }
        }
        section .features {
            article { h3 { "Secure Sessions" } p { "Tokens stay in an HttpOnly cookie." } }
            article { h3 { "Live Updates" } p { "Toggle and purge logs without a reload." } }
            article { h3 { "Search" } p { "Filter your logs as you type." } }
        }
        @if !is_authenticated {
            section .cta {
                h2 { "Ready to Launch?" }
                a .button href="/register" { "Create an account" }
                a href="/login" { "Log in" }
            }
        }
    }
}

pub fn login(error: &str, email: &str, registered: bool, csrf: &str) -> Markup {
    html! {
        section .auth-card {
            h1 { "Login" }
            @if registered {
                div .alert.alert-success role="status" { "Registration successful. Please log in." }
            }
            @if !error.is_empty() {
                div .alert.alert-error role="alert" { (error) }
            }
            form method="post" action="/login" {
                (csrf_field(csrf))
                label for="email" { "Email" }
                input #email type="email" name="email" value=(email) required;
                label for="password" { "Password" }
                input #password type="password" name="password" required;
                button type="submit" { "Login" }
            }
            p { "No account yet? " a href="/register" { "Register" } }
        }
    }
}

pub fn register(error: &str, email: &str, name: &str, csrf: &str) -> Markup {
    html! {
        section .auth-card {
            h1 { "Register" }
            @if !error.is_empty() {
                div .alert.alert-error role="alert" { (error) }
            }
            form method="post" action="/register" {
                (csrf_field(csrf))
                label for="name" { "Name" }
                input #name type="text" name="name" value=(name) required;
                label for="email" { "Email" }
                input #email type="email" name="email" value=(email) required;
                label for="password" { "Password" }
                input #password type="password" name="password" minlength="8" required;
                label for="passwordConfirm" { "Confirm password" }
                input #passwordConfirm type="password" name="passwordConfirm" minlength="8" required;
                button type="submit" { "Register" }
            }
            p { "Already registered? " a href="/login" { "Login" } }
        }
    }
}

pub fn dashboard(user_name: &str, user_email: &str, post_count: usize, csrf: &str) -> Markup {
    html! {
        section .dashboard {
            h1 { "Command Center" }
            p .welcome { "Welcome aboard, " strong { "Commander " (user_name) } }
            dl .profile {
                dt { "Email" }
                dd { (user_email) }
                dt { "Mission logs" }
                dd #post-count { (post_count) }
            }
            a .button href="/dashboard/posts" { "View all logs" }
        }
        section .quick-log {
            h2 { "New transmission" }
            form method="post" action="/dashboard/posts" {
                (csrf_field(csrf))
                input type="text" name="title" placeholder="Log title" required;
                textarea name="content" placeholder="What happened?" {}
                label { input type="checkbox" name="public"; " Public" }
                button .terminal type="submit" { "EXECUTE_TRANSMISSION" }
            }
        }
    }
}
