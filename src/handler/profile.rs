// Profile handlers
// Serves the home view and the witcher stats JSON endpoint

use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::config::AppState;
use crate::http;
use crate::render;

/// GET / renders the profile singleton into the home view
pub fn serve_profile(state: &Arc<AppState>, is_head: bool) -> Response<Full<Bytes>> {
    http::build_html_response(render::render_profile(&state.profile), is_head)
}

/// GET /witcher/stats returns equipment, toxicity and quest summary as JSON
///
/// The shape is fixed regardless of session state.
pub fn serve_stats(state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let inventory = &state.profile.inventory;
    let payload = serde_json::json!({
        "equipment": {
            "swords": inventory.swords,
            "armor": inventory.armor,
            "alchemy": inventory.alchemy,
        },
        "toxicity": state.profile.stats.toxicity,
        "active_quests": state.profile.active_quests,
    });

    http::json_response(StatusCode::OK, &payload)
}
