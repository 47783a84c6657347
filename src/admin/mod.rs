// Admin console module
// Operator operations invoked outside the request/response cycle

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::config::AppState;
use crate::model::Monster;

/// Prompt the operator and read one trimmed line from stdin
fn prompt(label: &str) -> Result<String, String> {
    print!("{label}: ");
    io::stdout()
        .flush()
        .map_err(|e| format!("Failed to flush prompt: {e}"))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| format!("Failed to read input: {e}"))?;
    Ok(line.trim().to_string())
}

fn prompt_required(label: &str) -> Result<String, String> {
    let value = prompt(label)?;
    if value.is_empty() {
        return Err(format!("{label} must not be empty"));
    }
    Ok(value)
}

/// Add a monster to the bestiary and persist the full collection
pub fn add_monster(state: &mut AppState) -> Result<(), String> {
    let name = prompt_required("Monster name")?;
    let kind = prompt_required("Monster type")?;
    let weakness = prompt_required("Weakness")?;

    state.bestiary.push(Monster {
        name: name.clone(),
        kind,
        weakness,
    });
    state.bestiary_store.save(&state.bestiary)?;

    println!("Monster {name} added to the bestiary!");
    Ok(())
}

/// Remove all bestiary entries with an exact name match and persist
pub fn remove_monster(state: &mut AppState) -> Result<(), String> {
    let name = prompt("Monster name to remove")?;

    let removed = remove_by_name(&mut state.bestiary, &name);
    state.bestiary_store.save(&state.bestiary)?;

    if removed == 0 {
        println!("No monster named {name} in the bestiary.");
    } else {
        println!("Monster {name} removed from the bestiary ({removed} entries).");
    }
    Ok(())
}

/// List all bestiary entries with an exact weakness match; read-only
pub fn find_monsters(state: &AppState) -> Result<(), String> {
    let weakness = prompt("Weakness (e.g. Silver/Igni)")?;

    let found = matching_monsters(&state.bestiary, &weakness);
    println!("Found {} monsters:", found.len());
    for monster in found {
        println!("- {} ({})", monster.name, monster.kind);
    }
    Ok(())
}

/// Exact-weakness lookup over the bestiary, preserving stored order
fn matching_monsters<'a>(bestiary: &'a [Monster], weakness: &str) -> Vec<&'a Monster> {
    bestiary.iter().filter(|m| m.weakness == weakness).collect()
}

/// Drop every entry with an exact name match, returning the removed count
fn remove_by_name(bestiary: &mut Vec<Monster>, name: &str) -> usize {
    let before = bestiary.len();
    bestiary.retain(|m| m.name != name);
    before - bestiary.len()
}

/// Write a starter config.toml; refuses to overwrite an existing file
pub fn init_config(path: &str) -> Result<(), String> {
    if Path::new(path).exists() {
        return Err(format!("{path} already exists; not overwriting"));
    }

    let starter = toml::toml! {
        [server]
        host = "127.0.0.1"
        port = 8080

        [logging]
        level = "info"
        access_log = true
        access_log_format = "combined"

        [performance]
        keep_alive_timeout = 75
        read_timeout = 30
        write_timeout = 30

        [http]
        server_name = "Witcher-Portal/1.0"
        enable_cors = false
        max_body_size = 65536

        [session]
        secret = "change-me"
        cookie_name = "guild_session"
        kaer_morhen_school = "Wolf"
        master_rank = "Master"

        [storage]
        data_dir = "data"
    };

    let content = toml::to_string_pretty(&starter)
        .map_err(|e| format!("Failed to serialize starter config: {e}"))?;
    std::fs::write(path, content).map_err(|e| format!("Failed to write {path}: {e}"))?;

    println!("Wrote starter configuration to {path}");
    println!("Set session.secret before serving.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_bestiary;

    #[test]
    fn test_matching_monsters_exact_weakness() {
        let bestiary = default_bestiary();
        let silver = matching_monsters(&bestiary, "Silver");
        let names: Vec<&str> = silver.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Striga", "Drowner"]);
    }

    #[test]
    fn test_matching_monsters_is_idempotent() {
        let bestiary = default_bestiary();
        let first: Vec<String> = matching_monsters(&bestiary, "Igni")
            .iter()
            .map(|m| m.name.clone())
            .collect();
        let second: Vec<String> = matching_monsters(&bestiary, "Igni")
            .iter()
            .map(|m| m.name.clone())
            .collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["Draconid"]);
    }

    #[test]
    fn test_matching_monsters_no_match() {
        let bestiary = default_bestiary();
        assert!(matching_monsters(&bestiary, "Yrden").is_empty());
        assert!(matching_monsters(&bestiary, "silver").is_empty());
    }

    #[test]
    fn test_remove_by_name_drops_exact_matches_only() {
        let mut bestiary = default_bestiary();
        assert_eq!(remove_by_name(&mut bestiary, "Drowner"), 1);
        assert_eq!(bestiary.len(), 2);
        assert_eq!(remove_by_name(&mut bestiary, "drowner"), 0);
        assert_eq!(remove_by_name(&mut bestiary, "Drowner"), 0);
    }
}
