use std::sync::Arc;

use axum::{extract::State, response::Html};
use maud::{DOCTYPE, Markup, html};

use crate::handlers::AppState;

pub const TITLE: &str = "Quiz Bank API";

/// A link shown on the landing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub url: String,
    pub text: &'static str,
    pub description: &'static str,
}

/// Landing page links: the API docs always, the companion UI only when it
/// answered the liveness probe.
pub fn buttons(companion_online: bool, companion_link: &str) -> Vec<Button> {
    let mut buttons = vec![
        Button {
            url: "/docs/".to_string(),
            text: "Swagger UI",
            description: "Interactive API documentation with Swagger UI",
        },
        Button {
            url: "/redoc".to_string(),
            text: "ReDoc",
            description: "Alternative API documentation with ReDoc",
        },
        Button {
            url: "/openapi.json".to_string(),
            text: "OpenAPI Schema",
            description: "OpenAPI specification of every endpoint in JSON format",
        },
    ];

    if companion_online {
        buttons.push(Button {
            url: companion_link.to_string(),
            text: "Quiz UI",
            description: "Interactive front end to browse and add questions",
        });
    }

    buttons
}

fn render(buttons: &[Button], companion_online: bool) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (TITLE) }
            }
            body {
                h1 { (TITLE) }
                p { "Random quiz questions filtered by category and test type." }
                ul {
                    @for button in buttons {
                        li {
                            a href=(button.url) { (button.text) }
                            ": " (button.description)
                        }
                    }
                }
                @if !companion_online {
                    p { "The quiz UI is currently offline." }
                }
            }
        }
    }
}

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let online = state.probe.is_online().await;
    tracing::debug!("Companion UI at {} online: {}", state.probe.url(), online);
    let buttons = buttons(online, &state.companion_link);
    Html(render(&buttons, online).into_string())
}
