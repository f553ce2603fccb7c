use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

/// Stand-in for the remote character API. Serves `total_pages` pages of
/// five characters each, plus the character and episode records the
/// detail view joins.
#[derive(Clone)]
pub struct TestUpstream {
    base_url: String,
    total_pages: u32,
}

impl TestUpstream {
    pub async fn spawn(total_pages: u32) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind upstream");
        let base_url = format!("http://{}", listener.local_addr().expect("upstream addr"));
        let upstream = Self {
            base_url,
            total_pages,
        };

        let app = Router::new()
            .route("/character", get(character_page))
            .route("/character/{id}", get(character_record))
            .route("/episode/{id}", get(episode_record))
            .with_state(upstream.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        upstream
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

// Names descend as ids ascend so a name sort inverts fetch order.
fn character_json(upstream: &TestUpstream, id: u64) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("Unit {:02}", 60 - id),
        "status": if id % 2 == 1 { "Alive" } else { "Dead" },
        "species": "Human",
        "gender": "unknown",
        "origin": { "name": "Earth" },
        "location": { "name": "Citadel" },
        "image": format!("{}/avatar/{}.jpeg", upstream.base_url, id),
        "episode": [
            format!("{}/episode/1", upstream.base_url),
            format!("{}/episode/2", upstream.base_url),
        ],
        "created": "2017-11-04T18:48:46.250Z"
    })
}

async fn character_page(
    State(upstream): State<TestUpstream>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let page = params
        .get("page")
        .and_then(|value| value.parse::<u32>().ok())
        .unwrap_or(1);
    if page == 0 || page > upstream.total_pages {
        return StatusCode::NOT_FOUND.into_response();
    }

    let next = if page < upstream.total_pages {
        json!(format!(
            "{}/character?page={}&count=5",
            upstream.base_url,
            page + 1
        ))
    } else {
        serde_json::Value::Null
    };
    let first_id = u64::from(page - 1) * 5 + 1;
    let results: Vec<_> = (first_id..first_id + 5)
        .map(|id| character_json(&upstream, id))
        .collect();
    Json(json!({ "info": { "next": next }, "results": results })).into_response()
}

async fn character_record(State(upstream): State<TestUpstream>, Path(id): Path<u64>) -> Response {
    if id == 0 {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(character_json(&upstream, id)).into_response()
}

async fn episode_record(State(_upstream): State<TestUpstream>, Path(id): Path<u64>) -> Response {
    if id == 0 {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!({
        "id": id,
        "name": format!("Episode {}", id),
        "air_date": "December 2, 2013",
        "episode": format!("S01E{:02}", id),
    }))
    .into_response()
}
