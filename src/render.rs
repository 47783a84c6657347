// View rendering module
// Builds the portal's HTML documents from a view context, no template files

use crate::model::{Contract, Profile, Review};

/// Wrap a view body in the shared document shell
fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
</head>
<body>
<nav><a href="/">Profile</a> | <a href="/quests">Quests</a> | <a href="/contracts">Contracts</a> | <a href="/login">Login</a></nav>
{body}
</body>
</html>"#
    )
}

/// Escape special characters for HTML text content
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Profile view: the character record shown on the home page
pub fn render_profile(profile: &Profile) -> String {
    let signs = profile
        .signs
        .iter()
        .map(|s| format!("<li>{}</li>", escape_html(s)))
        .collect::<Vec<_>>()
        .join("\n");
    let alchemy = profile
        .inventory
        .alchemy
        .iter()
        .map(|s| format!("<li>{}</li>", escape_html(s)))
        .collect::<Vec<_>>()
        .join("\n");
    let quests = profile
        .active_quests
        .iter()
        .map(|s| format!("<li>{}</li>", escape_html(s)))
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        r#"<h1>{name}</h1>
<p>School of the {school}</p>
<h2>Signs</h2>
<ul>
{signs}
</ul>
<h2>Stats</h2>
<table>
<tr><td>Toxicity</td><td>{toxicity}</td></tr>
<tr><td>Health</td><td>{health}</td></tr>
<tr><td>Stamina</td><td>{stamina}</td></tr>
<tr><td>Attack power</td><td>{attack_power}</td></tr>
</table>
<h2>Inventory</h2>
<p>Steel sword: {steel}<br>Silver sword: {silver}<br>Armor: {armor}</p>
<h3>Alchemy</h3>
<ul>
{alchemy}
</ul>
<h2>Active quests</h2>
<ul>
{quests}
</ul>"#,
        name = escape_html(&profile.name),
        school = escape_html(&profile.school),
        toxicity = profile.stats.toxicity,
        health = profile.stats.health,
        stamina = profile.stats.stamina,
        attack_power = profile.stats.attack_power,
        steel = escape_html(&profile.inventory.swords.steel),
        silver = escape_html(&profile.inventory.swords.silver),
        armor = escape_html(&profile.inventory.armor),
    );

    page(&profile.name, &body)
}

/// Login form view
pub fn render_login() -> String {
    let body = r#"<h1>Guild login</h1>
<form method="post" action="/login">
    <label>School: <input type="text" name="school" required></label><br>
    <label>Rank: <input type="text" name="rank" placeholder="Novice"></label><br>
    <button type="submit">Enter</button>
</form>"#;

    page("Login", body)
}

/// Contracts view: the contract board plus the total reward
pub fn render_contracts(contracts: &[Contract], total_gold: i64) -> String {
    let rows = contracts
        .iter()
        .map(|c| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&c.monster),
                c.reward,
                escape_html(&c.date),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        r#"<h1>Contract board</h1>
<table>
<tr><th>Monster</th><th>Reward</th><th>Date</th></tr>
{rows}
</table>
<p>Total gold: {total_gold}</p>
<p><a href="/contracts/report">Download CSV report</a></p>"#
    );

    page("Contracts", &body)
}

/// Quests view: submitted reviews plus the submission form
pub fn render_quests(reviews: &[Review]) -> String {
    let entries = if reviews.is_empty() {
        "<p>No reviews yet.</p>".to_string()
    } else {
        let items = reviews
            .iter()
            .map(|r| {
                format!(
                    "<li><strong>{}</strong> - {}/5 by {}<br>{}</li>",
                    escape_html(&r.quest),
                    r.rating,
                    escape_html(&r.author),
                    escape_html(&r.comment),
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("<ul>\n{items}\n</ul>")
    };

    let body = format!(
        r#"<h1>Quest reviews</h1>
{entries}
<h2>Leave a review</h2>
<form method="post" action="/quests">
    <label>Quest: <input type="text" name="quest" required></label><br>
    <label>Rating: <input type="number" name="rating" required></label><br>
    <label>Comment: <textarea name="comment"></textarea></label><br>
    <button type="submit">Submit</button>
</form>"#
    );

    page("Quests", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model;

    #[test]
    fn test_render_profile_contains_record_fields() {
        let html = render_profile(&model::default_profile());
        assert!(html.contains("Geralt of Rivia"));
        assert!(html.contains("School of the Wolf"));
        assert!(html.contains("75"));
        assert!(html.contains("Aerondight"));
        assert!(html.contains("Find Ciri"));
    }

    #[test]
    fn test_render_contracts_lists_every_row_and_total() {
        let contracts = model::default_contracts();
        let html = render_contracts(&contracts, model::total_gold(&contracts));
        for contract in &contracts {
            assert!(html.contains(&contract.monster));
        }
        assert!(html.contains("Total gold: 1000"));
    }

    #[test]
    fn test_render_quests_escapes_user_content() {
        let reviews = vec![model::Review {
            quest: "<script>alert(1)</script>".to_string(),
            rating: 1,
            comment: "a & b".to_string(),
            author: "Anonymous".to_string(),
        }];
        let html = render_quests(&reviews);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn test_render_quests_empty_state() {
        let html = render_quests(&[]);
        assert!(html.contains("No reviews yet."));
    }
}
