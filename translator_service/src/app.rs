// Copyright (c) 2024-present Sonatype, Inc. All rights reserved.
// "Sonatype" is a trademark of Sonatype, Inc.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::endpoints::{
    demo::{
        account_endpoint, create_account_endpoint, events_endpoint, internal_endpoint,
        inventory_endpoint, panic_endpoint, search_endpoint, session_endpoint,
        unexpected_endpoint, upload_endpoint,
    },
    status::status_endpoint,
};
use crate::state::AppState;
use crate::translate::{handle_panic, translate_failures};

pub(crate) fn router(app_state: AppState) -> Router {
    let demo_endpoints = Router::new()
        .route("/session", get(session_endpoint))
        .route("/accounts", post(create_account_endpoint))
        .route("/accounts/:account_id", get(account_endpoint))
        .route("/events", get(events_endpoint))
        .route("/search", get(search_endpoint))
        .route("/uploads", post(upload_endpoint))
        .route("/internal", get(internal_endpoint))
        .route("/inventory/:sku", get(inventory_endpoint))
        .route("/unexpected", get(unexpected_endpoint))
        .route("/panic", get(panic_endpoint));

    Router::new()
        .route("/status", get(status_endpoint))
        .nest("/demo", demo_endpoints)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            translate_failures,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
