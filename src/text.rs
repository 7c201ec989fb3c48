//! Text cleanup for dataset strings
//!
//! Game text carries markup the terminal cannot show: `<br>` line breaks and
//! glyphs from the Unicode private use area (U+E000..U+F8FF) that only the
//! game font can draw.

use regex::Regex;
use std::sync::LazyLock;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("line break pattern is valid"));

/// Placeholder shown for items without a name
pub const UNNAMED: &str = "???";

/// Label used when a source has no name
pub const UNKNOWN_SOURCE: &str = "Unknown source";

const fn is_private_use(c: char) -> bool {
    matches!(c, '\u{E000}'..='\u{F8FF}')
}

/// Strip private use area glyphs and surrounding whitespace
#[must_use]
pub fn clean_game_text(text: &str) -> String {
    text.chars()
        .filter(|&c| !is_private_use(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Clean an item description for display
///
/// `<br>`, `<br/>` and `<br />` (any case) become newlines before the glyph
/// cleanup runs.
#[must_use]
pub fn clean_description(text: &str) -> String {
    clean_game_text(&LINE_BREAK.replace_all(text, "\n"))
}

/// Display name for a source name from the dataset
#[must_use]
pub fn translate_source_name(name: Option<&str>) -> String {
    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return UNKNOWN_SOURCE.to_string();
    };

    match name {
        "Mog Station Item" => "Mog Station".to_string(),
        "Craftable" => "Crafting".to_string(),
        _ if name.contains("Subaquatic Voyages") => {
            clean_game_text(&name.replace("Subaquatic Voyages", "Voyages"))
        }
        _ => clean_game_text(name),
    }
}

/// Icon id for a shop currency, keyed by cost item name
///
/// The dataset names currencies in Traditional Chinese; the English names
/// are accepted as aliases. Unknown currencies use the gil icon.
#[must_use]
pub fn currency_icon_id(item_name: &str) -> u32 {
    match item_name {
        "亞拉戈神典石:詩學" | "亞拉戈神典石:美學" => 65086,
        "Allagan Tomestone of Poetics" | "Allagan Tomestone of Aesthetics" => 65086,
        "紫色工匠票據" | "Purple Crafters' Scrip" => 65073,
        "紫色採集票據" | "Purple Gatherers' Scrip" => 65074,
        "橙色工匠票據" | "Orange Crafters' Scrip" => 65028,
        "橙色採集票據" | "Orange Gatherers' Scrip" => 65029,
        "軍票" | "Company Seals" | "Storm Seal" | "Serpent Seal" | "Flame Seal" => 65005,
        "同盟徽章" | "怪物狩獵的戰利品" | "精英怪物狩獵的戰利品" => 65034,
        "Allied Seal" | "Centurio Seal" | "Sack of Nuts" => 65034,
        "金碟遊樂場幣" | "MGP" | "Gold Saucer Point" => 65025,
        "狼印戰績" | "Wolf Mark" => 65019,
        "蠻族貨幣" => 65016,
        "開拓工房印記" | "Seafarer's Cowrie" | "Islander's Cowrie" => 65096,
        "雙色寶石" | "Bicolor Gemstone" => 65071,
        _ => 65002,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_game_text_strips_private_use_glyphs() {
        assert_eq!(clean_game_text("\u{E0BB}Chocobo Stable "), "Chocobo Stable");
        assert_eq!(clean_game_text("plain"), "plain");
    }

    #[test]
    fn test_clean_description_converts_line_breaks() {
        assert_eq!(clean_description("one<br>two<BR/>three<br />four"), "one\ntwo\nthree\nfour");
    }

    #[test]
    fn test_translate_source_name() {
        assert_eq!(translate_source_name(None), UNKNOWN_SOURCE);
        assert_eq!(translate_source_name(Some("")), UNKNOWN_SOURCE);
        assert_eq!(translate_source_name(Some("Mog Station Item")), "Mog Station");
        assert_eq!(translate_source_name(Some("Craftable")), "Crafting");
        assert_eq!(
            translate_source_name(Some("Subaquatic Voyages: Deep-sea Site")),
            "Voyages: Deep-sea Site"
        );
        assert_eq!(translate_source_name(Some("\u{E03C}Hunt Billmaster")), "Hunt Billmaster");
    }

    #[test]
    fn test_currency_icon_defaults_to_gil() {
        assert_eq!(currency_icon_id("Gil"), 65002);
        assert_eq!(currency_icon_id("Wolf Mark"), 65019);
        assert_eq!(currency_icon_id("something else"), 65002);
    }

    #[test]
    fn test_currency_icon_uses_dataset_names() {
        assert_eq!(currency_icon_id("金幣"), 65002);
        assert_eq!(currency_icon_id("軍票"), 65005);
        assert_eq!(currency_icon_id("橙色工匠票據"), 65028);
        assert_eq!(currency_icon_id("亞拉戈神典石:詩學"), 65086);
        assert_eq!(currency_icon_id("蠻族貨幣"), 65016);
    }
}
