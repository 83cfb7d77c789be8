use std::collections::BTreeMap;
use std::path::Path;

use outfitter_core::{Category, ItemId, WardrobeItem};
use serde::Serialize;

use super::{load_wardrobe, CommandResult};

const COMMAND: &str = "inspect";

#[derive(Debug, Serialize)]
pub struct WardrobeSummary {
    pub total: usize,
    pub categories: BTreeMap<String, usize>,
    pub formalities: BTreeMap<&'static str, usize>,
    /// Items without a season are counted under `any`.
    pub seasons: BTreeMap<&'static str, usize>,
    pub unusable: Vec<UnusableItem>,
}

#[derive(Debug, Serialize)]
pub struct UnusableItem {
    pub id: ItemId,
    pub category: String,
    pub reason: &'static str,
}

pub fn run(path: &Path) -> CommandResult {
    let wardrobe = match load_wardrobe(path) {
        Ok(wardrobe) => wardrobe,
        Err(error) => return CommandResult::from_error(COMMAND, &error),
    };

    let summary = summarize(&wardrobe);
    let message = format!(
        "{} item(s) across {} categor{}; {} unusable",
        summary.total,
        summary.categories.len(),
        if summary.categories.len() == 1 { "y" } else { "ies" },
        summary.unusable.len()
    );

    match serde_json::to_value(&summary) {
        Ok(data) => CommandResult::success_with_data(COMMAND, message, Some(data)),
        Err(error) => CommandResult::failure(COMMAND, "serialization", error.to_string(), 1),
    }
}

pub fn summarize(wardrobe: &[WardrobeItem]) -> WardrobeSummary {
    let mut categories = BTreeMap::new();
    let mut formalities = BTreeMap::new();
    let mut seasons = BTreeMap::new();
    let mut unusable = Vec::new();

    for item in wardrobe {
        *categories.entry(item.category.as_str().to_string()).or_insert(0) += 1;
        *formalities.entry(item.formality.as_str()).or_insert(0) += 1;
        *seasons.entry(item.season.map_or("any", |season| season.as_str())).or_insert(0) += 1;

        let reason = if !item.category.is_recognized() {
            Some("unrecognized_category")
        } else if item.category == Category::Dress {
            // No occasion requires a dress slot.
            Some("not_required_by_any_occasion")
        } else {
            None
        };
        if let Some(reason) = reason {
            unusable.push(UnusableItem {
                id: item.id,
                category: item.category.as_str().to_string(),
                reason,
            });
        }
    }

    WardrobeSummary { total: wardrobe.len(), categories, formalities, seasons, unusable }
}
