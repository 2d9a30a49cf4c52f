//! プロンプト生成モジュール
//!
//! CLIとWeb(WASM)で共有されるプロンプト生成ロジック:
//! - build_analysis_prompt: 建築様式の解析用プロンプト
//! - build_insight_prompt: 屋根材の機能的メリット解説用プロンプト
//! - build_roof_edit_prompt: 屋根の差し替え画像生成用プロンプト
//! - fallback_insight: インサイト取得失敗時の定型文

use crate::types::Language;

/// 建築様式解析プロンプト
///
/// 回答言語は `language` に従う。JSON形式はレスポンススキーマ側でも強制する。
pub fn build_analysis_prompt(language: Language) -> String {
    let lang_instruction = match language {
        Language::Es => "IMPORTANT: Respond in Spanish. The values for style, recommendations, and reasoning must be in Spanish.",
        Language::En => "Respond in English.",
    };

    format!(
        r#"Analyze this image of a house.
1. Identify the architectural style (e.g., Colonial, Modern, Ranch, etc.).
2. Suggest 3 types of roofing materials that would best complement this specific house style and color palette.
3. Provide a brief reasoning for these recommendations.

{lang_instruction}
Return the response in JSON format."#
    )
}

/// 屋根材インサイトプロンプト
///
/// 見た目ではなく機能面（耐候性・省エネ・耐久性）に限定し、
/// 読み上げやすい40〜60語に収めさせる。
pub fn build_insight_prompt(style: &str, material_name: &str, language: Language) -> String {
    let lang_instruction = match language {
        Language::Es => "CRITICAL: Write the response in Spanish.",
        Language::En => "CRITICAL: Write the response in English.",
    };

    format!(
        r#"You are an expert building scientist and roofing consultant.
Provide a detailed technical breakdown of the benefits of {material_name} roofing for a {style} house.

CRITICAL INSTRUCTION: Focus ONLY on functional advantages. Do NOT discuss aesthetics or visual style.

Include specific details on:
1. Weather resistance (e.g., wind uplift ratings, leak prevention mechanisms).
2. Energy performance (e.g., thermal mass, UV reflectivity, insulation value).
3. Longevity and maintenance.

Start directly with the benefits.
Use professional, engaging language.
{lang_instruction}
Keep the response between 40-60 words to ensure it is concise enough to be read aloud clearly."#
    )
}

/// 屋根差し替えプロンプト
///
/// 画像編集モデルは英語指示の方が安定するため、UI言語に関係なく常に英語で組み立てる。
/// 素材名・色名もカタログの英語名を渡すこと。
pub fn build_roof_edit_prompt(material_name: &str, color_name: &str, style: &str) -> String {
    format!(
        r#"Edit this image of a {style} house.
Replace the existing roof with a {color_name} {material_name} roof.

CRITICAL INSTRUCTIONS:
- ONLY change the roof. Do not change the walls, windows, sky, or landscaping.
- Maintain the exact perspective, lighting, and shadows of the original photo.
- The new roof texture must be photorealistic and high resolution.
- Ensure the roof edges blend naturally with the existing structure."#
    )
}

/// インサイトがフォールバックになった理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// レスポンスは返ったがテキストが空
    EmptyResponse,
    /// 通信・API エラー
    RequestFailed,
}

/// インサイト取得に失敗したときの定型文
pub fn fallback_insight(material_name: &str, language: Language, reason: FallbackReason) -> String {
    match (reason, language) {
        (FallbackReason::EmptyResponse, Language::Es) => format!(
            "{material_name} ofrece una protección superior contra la intemperie y propiedades de eficiencia energética que reducen los costos a largo plazo."
        ),
        (FallbackReason::EmptyResponse, Language::En) => format!(
            "{material_name} offers superior weather protection and energy efficiency properties that reduce long-term costs."
        ),
        (FallbackReason::RequestFailed, Language::Es) => format!(
            "{material_name} es conocido por su durabilidad excepcional y capacidad de prevención de fugas."
        ),
        (FallbackReason::RequestFailed, Language::En) => format!(
            "{material_name} is known for its exceptional durability and leak prevention capabilities."
        ),
    }
}
