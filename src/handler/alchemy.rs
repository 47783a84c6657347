// Alchemy filter handler
// GET /alchemy with optional `type` and `toxicity` query parameters

use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Deserialize;

use crate::config::AppState;
use crate::http;
use crate::model::AlchemyItem;

#[derive(Debug, Default, Deserialize)]
struct AlchemyQuery {
    #[serde(rename = "type")]
    kind: Option<String>,
    toxicity: Option<i64>,
}

/// GET /alchemy lists the items surviving both filters, in stored order
pub fn filter_items(query: Option<&str>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let params: AlchemyQuery = match serde_urlencoded::from_str(query.unwrap_or("")) {
        Ok(p) => p,
        Err(_) => {
            return http::build_bad_request_response("toxicity", "toxicity must be an integer")
        }
    };

    let names: Vec<&str> = apply_filters(&state.alchemy_items, &params)
        .map(|item| item.name.as_str())
        .collect();

    http::json_response(StatusCode::OK, &names)
}

/// Apply the type-equality and toxicity-threshold predicates
///
/// An empty `type` value and a `toxicity` of 0 are both treated as
/// absent filters.
fn apply_filters<'a>(
    items: &'a [AlchemyItem],
    params: &'a AlchemyQuery,
) -> impl Iterator<Item = &'a AlchemyItem> {
    let kind = params.kind.as_deref().filter(|k| !k.is_empty());
    let threshold = params.toxicity.filter(|t| *t != 0);

    items.iter().filter(move |item| {
        kind.map_or(true, |k| item.kind == k) && threshold.map_or(true, |t| item.toxicity >= t)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_alchemy_items;

    fn names(params: &AlchemyQuery) -> Vec<String> {
        let items = default_alchemy_items();
        apply_filters(&items, params)
            .map(|i| i.name.clone())
            .collect()
    }

    #[test]
    fn test_no_filters_returns_all_in_order() {
        let all = names(&AlchemyQuery::default());
        assert_eq!(
            all,
            vec![
                "Black Blood",
                "Golden Oriole",
                "Tiger",
                "Dragon's Dream",
                "Moon Dust"
            ]
        );
    }

    #[test]
    fn test_type_filter_alone() {
        let params = AlchemyQuery {
            kind: Some("bomb".to_string()),
            toxicity: None,
        };
        assert_eq!(names(&params), vec!["Dragon's Dream", "Moon Dust"]);
    }

    #[test]
    fn test_type_and_toxicity_combined() {
        let params = AlchemyQuery {
            kind: Some("potion".to_string()),
            toxicity: Some(35),
        };
        assert_eq!(names(&params), vec!["Black Blood", "Tiger"]);
    }

    #[test]
    fn test_toxicity_zero_behaves_as_absent() {
        let zero = AlchemyQuery {
            kind: None,
            toxicity: Some(0),
        };
        assert_eq!(names(&zero), names(&AlchemyQuery::default()));
    }

    #[test]
    fn test_empty_type_behaves_as_absent() {
        let empty = AlchemyQuery {
            kind: Some(String::new()),
            toxicity: None,
        };
        assert_eq!(names(&empty), names(&AlchemyQuery::default()));
    }

    #[test]
    fn test_unmatched_type_returns_empty() {
        let params = AlchemyQuery {
            kind: Some("oil".to_string()),
            toxicity: None,
        };
        assert!(names(&params).is_empty());
    }
}
