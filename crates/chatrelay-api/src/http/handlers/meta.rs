//! Service metadata endpoints: `/`, `/docs`, `/health`.

use axum::Json;
use serde::Serialize;
use serde_json::{Value, json};

/// One row of the `/docs` endpoint listing.
#[derive(Debug, Serialize)]
pub struct EndpointDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub summary: &'static str,
}

const ENDPOINTS: &[EndpointDoc] = &[
    EndpointDoc {
        method: "GET",
        path: "/",
        summary: "Service banner",
    },
    EndpointDoc {
        method: "GET",
        path: "/docs",
        summary: "This endpoint listing",
    },
    EndpointDoc {
        method: "GET",
        path: "/health",
        summary: "Liveness probe",
    },
    EndpointDoc {
        method: "POST",
        path: "/chat",
        summary: "Send {message, session_id?}; returns {response, session_id}",
    },
    EndpointDoc {
        method: "GET",
        path: "/history/{session_id}",
        summary: "Stored messages of a session, oldest first",
    },
];

/// GET / - Service banner.
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Chat API çalışıyor!",
        "docs": "/docs",
    }))
}

/// GET /docs - Endpoint listing.
pub async fn docs() -> Json<Value> {
    Json(json!({
        "title": "Chat API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Session-scoped chat relay in front of an OpenAI-compatible completion service",
        "endpoints": ENDPOINTS,
    }))
}

/// GET /health - Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
