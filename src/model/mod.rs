// Domain model module
// Defines the guild portal's record types and the built-in mock data sets

use serde::{Deserialize, Serialize};

/// The single character record displayed on the home view
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub name: String,
    pub school: String,
    pub signs: Vec<String>,
    pub stats: Stats,
    pub inventory: Inventory,
    pub active_quests: Vec<String>,
}

/// Character stats (all four fields are plain integers)
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub toxicity: i64,
    pub health: i64,
    pub stamina: i64,
    pub attack_power: i64,
}

/// Carried equipment
#[derive(Debug, Clone, Serialize)]
pub struct Inventory {
    pub swords: SwordSet,
    pub armor: String,
    pub alchemy: Vec<String>,
}

/// The two named blades every witcher carries
#[derive(Debug, Clone, Serialize)]
pub struct SwordSet {
    pub steel: String,
    pub silver: String,
}

/// A craftable alchemy recipe with a toxicity cost
///
/// `kind` is "potion" or "bomb"; serialized as `type` to match the
/// original data shape.
#[derive(Debug, Clone, Serialize)]
pub struct AlchemyItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub toxicity: i64,
}

/// A bestiary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub weakness: String,
}

/// A job record tying a monster name to a reward and a date
///
/// The monster name is not validated against the bestiary.
#[derive(Debug, Clone, Serialize)]
pub struct Contract {
    pub monster: String,
    pub reward: i64,
    pub date: String,
}

/// A user-submitted quest review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub quest: String,
    pub rating: i64,
    pub comment: String,
    pub author: String,
}

/// Built-in character profile
pub fn default_profile() -> Profile {
    Profile {
        name: "Geralt of Rivia".to_string(),
        school: "Wolf".to_string(),
        signs: ["Igni", "Aard", "Quen", "Axii", "Yrden"]
            .iter()
            .map(ToString::to_string)
            .collect(),
        stats: Stats {
            toxicity: 75,
            health: 100,
            stamina: 85,
            attack_power: 90,
        },
        inventory: Inventory {
            swords: SwordSet {
                steel: "Mirror-alloy blade".to_string(),
                silver: "Aerondight".to_string(),
            },
            armor: "Wolf School armor".to_string(),
            alchemy: ["Black Blood", "Golden Oriole", "Tiger"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        },
        active_quests: vec![
            "Slay the beast of Beauclair".to_string(),
            "Find Ciri".to_string(),
        ],
    }
}

/// Built-in alchemy recipe list (never mutated at runtime)
pub fn default_alchemy_items() -> Vec<AlchemyItem> {
    [
        ("Black Blood", "potion", 40),
        ("Golden Oriole", "potion", 30),
        ("Tiger", "potion", 50),
        ("Dragon's Dream", "bomb", 20),
        ("Moon Dust", "bomb", 15),
    ]
    .iter()
    .map(|(name, kind, toxicity)| AlchemyItem {
        name: (*name).to_string(),
        kind: (*kind).to_string(),
        toxicity: *toxicity,
    })
    .collect()
}

/// Built-in bestiary
///
/// Takes precedence over whatever the bestiary file contains at startup;
/// the file is only the write target of the admin operations.
pub fn default_bestiary() -> Vec<Monster> {
    [
        ("Striga", "cursed", "Silver"),
        ("Draconid", "draconid", "Igni"),
        ("Drowner", "necrophage", "Silver"),
    ]
    .iter()
    .map(|(name, kind, weakness)| Monster {
        name: (*name).to_string(),
        kind: (*kind).to_string(),
        weakness: (*weakness).to_string(),
    })
    .collect()
}

/// Built-in contract board (never mutated at runtime)
pub fn default_contracts() -> Vec<Contract> {
    [
        ("Striga", 500, "2023-10-15"),
        ("Draconid", 300, "2023-10-20"),
        ("Drowner", 200, "2023-10-25"),
    ]
    .iter()
    .map(|(monster, reward, date)| Contract {
        monster: (*monster).to_string(),
        reward: *reward,
        date: (*date).to_string(),
    })
    .collect()
}

/// Sum of all contract rewards, shown on the contracts view
pub fn total_gold(contracts: &[Contract]) -> i64 {
    contracts.iter().map(|c| c.reward).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_gold_default_contracts() {
        let contracts = default_contracts();
        assert_eq!(total_gold(&contracts), 1000);
    }

    #[test]
    fn test_total_gold_empty() {
        assert_eq!(total_gold(&[]), 0);
    }

    #[test]
    fn test_alchemy_item_serializes_kind_as_type() {
        let items = default_alchemy_items();
        let json = serde_json::to_value(&items[0]).unwrap();
        assert_eq!(json["type"], "potion");
        assert_eq!(json["name"], "Black Blood");
        assert_eq!(json["toxicity"], 40);
    }

    #[test]
    fn test_monster_json_round_trip() {
        let bestiary = default_bestiary();
        let json = serde_json::to_string(&bestiary).unwrap();
        let back: Vec<Monster> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bestiary);
    }
}
