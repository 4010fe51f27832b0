use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub users_online: u32,
    pub sessions_today: u32,
    pub cpu_load: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub last_message: String,
}

impl StatsSummary {
    pub fn fixture() -> Self {
        Self {
            users_online: 42,
            sessions_today: 1234,
            cpu_load: 0.23,
        }
    }
}

impl Bookmark {
    pub fn fixtures() -> Vec<Self> {
        vec![
            Self {
                id: "t1".into(),
                title: "Project roadmap discussion".into(),
                tags: vec!["intro".into()],
                last_message: "Let's prioritize the authentication features for the next sprint."
                    .into(),
            },
            Self {
                id: "y1".into(),
                title: "Database Schema Design".into(),
                tags: vec!["design".into()],
                last_message: "Let's add indexes to improve query performance on these tables."
                    .into(),
            },
        ]
    }
}

/// Read-only fixtures under `/api/mock`.
pub fn mock_router() -> Router {
    Router::new()
        .route(
            "/api/mock/stats/summary",
            get(|| async { Json(StatsSummary::fixture()) }),
        )
        .route(
            "/api/mock/bookmarks",
            get(|| async { Json(Bookmark::fixtures()) }),
        )
}
