// Contract board handlers
// Master-gated board view and CSV report download

use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::AppState;
use crate::guard;
use crate::http;
use crate::model::{total_gold, Contract};
use crate::render;
use crate::session::Session;

const REPORT_FILENAME: &str = "contracts_report.csv";

/// GET /contracts renders the contract board with the reward total
pub fn serve_board(
    session: Option<&Session>,
    state: &Arc<AppState>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    if let Err(denied) = guard::require_rank(session, &state.config.session.master_rank) {
        return denied;
    }

    let html = render::render_contracts(&state.contracts, total_gold(&state.contracts));
    http::build_html_response(html, is_head)
}

/// GET /contracts/report downloads the contract board as a CSV attachment
pub fn serve_report(session: Option<&Session>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    if let Err(denied) = guard::require_rank(session, &state.config.session.master_rank) {
        return denied;
    }

    http::build_csv_attachment(render_csv(&state.contracts), REPORT_FILENAME)
}

/// Build the CSV document: header row plus one row per contract, stored order
fn render_csv(contracts: &[Contract]) -> String {
    let mut out = String::from("Monster,Reward,Date\n");
    for contract in contracts {
        out.push_str(&format!(
            "{},{},{}\n",
            csv_field(&contract.monster),
            contract.reward,
            csv_field(&contract.date),
        ));
    }
    out
}

/// Quote a CSV field when it contains a delimiter, quote, or newline
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_contracts;

    #[test]
    fn test_csv_has_header_plus_row_per_contract() {
        let contracts = default_contracts();
        let csv = render_csv(&contracts);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), contracts.len() + 1);
        assert_eq!(lines[0], "Monster,Reward,Date");
        assert_eq!(lines[1], "Striga,500,2023-10-15");
    }

    #[test]
    fn test_csv_reward_column_sums_to_total_gold() {
        let contracts = default_contracts();
        let csv = render_csv(&contracts);
        let sum: i64 = csv
            .lines()
            .skip(1)
            .map(|line| line.split(',').nth(1).unwrap().parse::<i64>().unwrap())
            .sum();
        assert_eq!(sum, total_gold(&contracts));
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("Striga"), "Striga");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
