use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoofAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`roof-ai config --set-api-key YOUR_KEY` か環境変数 GEMINI_API_KEY で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("対話入力エラー: {0}")]
    Prompt(String),

    #[error("書き出しエラー: {0}")]
    Export(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] roof_ai_common::Error),
}

pub type Result<T> = std::result::Result<T, RoofAiError>;
