//! エラー型定義
//!
//! ゲートウェイ・ワークフロー・アップロード受付で共有されるエラー分類。
//! インサイト取得の失敗はここに現れない（フォールバック文で吸収する）。

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 解析レスポンスが空・不正JSON、または通信失敗
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// 生成レスポンスに画像が含まれない、または通信失敗
    #[error("Generation error: {0}")]
    Generation(String),

    /// 画像以外のファイル、サイズ超過など受付時の検証エラー
    #[error("Validation error: {0}")]
    Validation(String),

    /// カタログに存在しない素材・色ID
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    /// 現在の状態では許可されない操作
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// レスポンス本文からJSONを取り出せない
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
