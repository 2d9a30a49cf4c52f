//! 素材・色の対話式選択

use crate::error::{Result, RoofAiError};
use dialoguer::Select;
use roof_ai_common::{ui_text, ColorOption, Language, RoofOption, ROOF_COLORS, ROOF_MATERIALS};

/// 一覧表示用の素材ラベル
pub fn material_label(option: &RoofOption, language: Language) -> String {
    format!(
        "{:<16} {}",
        option.display_name(language),
        option.display_description(language)
    )
}

/// 一覧表示用の色ラベル
pub fn color_label(option: &ColorOption, language: Language) -> String {
    format!("{:<20} {}", option.display_name(language), option.hex)
}

fn pick(prompt: &str, items: &[String], default: usize) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(|e| RoofAiError::Prompt(e.to_string()))
}

/// 素材を選ぶ（既定は現在の選択）
pub fn select_material_interactive(current: &str, language: Language) -> Result<&'static RoofOption> {
    let items: Vec<String> = ROOF_MATERIALS
        .iter()
        .map(|m| material_label(m, language))
        .collect();
    let default = ROOF_MATERIALS.iter().position(|m| m.id == current).unwrap_or(0);

    let index = pick(ui_text(language).material_select, &items, default)?;
    Ok(&ROOF_MATERIALS[index])
}

/// 色を選ぶ（既定は現在の選択）
pub fn select_color_interactive(current: &str, language: Language) -> Result<&'static ColorOption> {
    let items: Vec<String> = ROOF_COLORS
        .iter()
        .map(|c| color_label(c, language))
        .collect();
    let default = ROOF_COLORS.iter().position(|c| c.id == current).unwrap_or(0);

    let index = pick(ui_text(language).color_grade, &items, default)?;
    Ok(&ROOF_COLORS[index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use roof_ai_common::catalog;

    #[test]
    fn test_labels_are_localized() {
        let metal = catalog::find_material("metal-roof").unwrap();
        assert!(material_label(metal, Language::En).starts_with("Metal Roof"));

        let charcoal = catalog::find_color("charcoal").unwrap();
        let label = color_label(charcoal, Language::Es);
        assert!(label.starts_with("Negro Carbón"));
        assert!(label.ends_with("#2D2D2D"));
    }
}
