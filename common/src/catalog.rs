//! 屋根材・カラーのカタログ
//!
//! 実行時に変更されない参照データ。表示名は言語ごとに持つ。

use crate::error::{Error, Result};
use crate::types::Language;

/// 屋根材
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoofOption {
    pub id: &'static str,
    pub name: &'static str,
    pub name_es: &'static str,
    pub description: &'static str,
    pub description_es: &'static str,
}

/// 屋根カラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorOption {
    pub id: &'static str,
    pub name: &'static str,
    pub name_es: &'static str,
    pub hex: &'static str,
}

impl RoofOption {
    pub fn display_name(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.name,
            Language::Es => self.name_es,
        }
    }

    pub fn display_description(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.description,
            Language::Es => self.description_es,
        }
    }

    /// カード下部に出す短いID（"tile-roof" → "TILE"）
    pub fn short_code(&self) -> String {
        self.id
            .split('-')
            .next()
            .unwrap_or(self.id)
            .to_uppercase()
    }
}

impl ColorOption {
    pub fn display_name(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.name,
            Language::Es => self.name_es,
        }
    }
}

pub const ROOF_MATERIALS: &[RoofOption] = &[
    RoofOption {
        id: "tile-roof",
        name: "Tile Roof",
        name_es: "Teja",
        description: "Classic durability with distinctive style.",
        description_es: "Durabilidad clásica con estilo distintivo.",
    },
    RoofOption {
        id: "metal-roof",
        name: "Metal Roof",
        name_es: "Metal",
        description: "Sleek, modern, and energy efficient.",
        description_es: "Elegante, moderno y energéticamente eficiente.",
    },
    RoofOption {
        id: "concrete-roof",
        name: "Concrete Roof",
        name_es: "Concreto",
        description: "Versatile strength mimicking other styles.",
        description_es: "Resistencia versátil que imita otros estilos.",
    },
    RoofOption {
        id: "shingle-roof",
        name: "Shingle Roof",
        name_es: "Tejas de Asfalto",
        description: "Traditional, affordable, and popular.",
        description_es: "Tradicional, económico y popular.",
    },
    RoofOption {
        id: "slate-roof",
        name: "Slate Roof",
        name_es: "Pizarra",
        description: "Premium natural stone elegance.",
        description_es: "Elegancia de piedra natural premium.",
    },
    RoofOption {
        id: "wood-shake-roof",
        name: "Wood Shake Roof",
        name_es: "Madera",
        description: "Rustic natural beauty.",
        description_es: "Belleza natural rústica.",
    },
];

pub const ROOF_COLORS: &[ColorOption] = &[
    // ニュートラル
    ColorOption { id: "arctic-white", name: "Arctic White", name_es: "Blanco Ártico", hex: "#e2e8f0" },
    ColorOption { id: "pewter-gray", name: "Pewter Gray", name_es: "Gris Peltre", hex: "#94a3b8" },
    ColorOption { id: "slate-grey", name: "Slate Grey", name_es: "Gris Pizarra", hex: "#525b68" },
    ColorOption { id: "charcoal", name: "Charcoal Black", name_es: "Negro Carbón", hex: "#2D2D2D" },
    // ブルー・グリーン
    ColorOption { id: "midnight-blue", name: "Midnight Blue", name_es: "Azul Medianoche", hex: "#1e3a8a" },
    ColorOption { id: "navy-blue", name: "Navy Blue", name_es: "Azul Marino", hex: "#28334a" },
    ColorOption { id: "forest-green", name: "Forest Green", name_es: "Verde Bosque", hex: "#2d4531" },
    ColorOption { id: "moss-green", name: "Moss Green", name_es: "Verde Musgo", hex: "#4d7c0f" },
    // レッド・カッパー
    ColorOption { id: "classic-red", name: "Classic Red", name_es: "Rojo Clásico", hex: "#8B0000" },
    ColorOption { id: "terracotta", name: "Terracotta Red", name_es: "Rojo Terracota", hex: "#b55845" },
    ColorOption { id: "burnt-sienna", name: "Burnt Sienna", name_es: "Siena Tostado", hex: "#9a3412" },
    ColorOption { id: "copper", name: "Classic Copper", name_es: "Cobre Clásico", hex: "#b45309" },
    ColorOption { id: "aged-copper", name: "Aged Copper", name_es: "Cobre Envejecido", hex: "#0d9488" },
    // アース系
    ColorOption { id: "sand-tan", name: "Sand Tan", name_es: "Arena", hex: "#d1bfa3" },
    ColorOption { id: "golden-cedar", name: "Golden Cedar", name_es: "Cedro Dorado", hex: "#ca8a04" },
    ColorOption { id: "weathered-wood", name: "Weathered Wood", name_es: "Madera Envejecida", hex: "#6d5645" },
    ColorOption { id: "mission-brown", name: "Mission Brown", name_es: "Marrón Misión", hex: "#451a03" },
];

pub fn default_material() -> &'static RoofOption {
    &ROOF_MATERIALS[0]
}

pub fn default_color() -> &'static ColorOption {
    &ROOF_COLORS[0]
}

pub fn find_material(id: &str) -> Option<&'static RoofOption> {
    ROOF_MATERIALS.iter().find(|m| m.id == id)
}

pub fn find_color(id: &str) -> Option<&'static ColorOption> {
    ROOF_COLORS.iter().find(|c| c.id == id)
}

/// IDから屋根材を取得（存在しなければ UnknownOption）
pub fn material(id: &str) -> Result<&'static RoofOption> {
    find_material(id).ok_or_else(|| Error::UnknownOption(format!("material '{}'", id)))
}

/// IDからカラーを取得（存在しなければ UnknownOption）
pub fn color(id: &str) -> Result<&'static ColorOption> {
    find_color(id).ok_or_else(|| Error::UnknownOption(format!("color '{}'", id)))
}
