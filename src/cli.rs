use clap::{Parser, Subcommand};
use roof_ai_common::Language;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roof-ai")]
#[command(about = "屋根材AIビジュアライザー（様式解析・素材インサイト・屋根の再レンダリング）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 表示言語 (en/es)。省略時は設定ファイルの値
    #[arg(long, global = true, value_parser = parse_language)]
    pub lang: Option<Language>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 住宅写真の建築様式と推奨屋根材を解析
    Analyze {
        /// 住宅写真のパス
        #[arg(required = true)]
        image: PathBuf,

        /// 解析結果JSONの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 屋根材の機能的メリットを解説（読み上げ付き）
    Insight {
        /// 住宅写真のパス
        #[arg(required = true)]
        image: PathBuf,

        /// 素材ID（例: metal-roof）
        #[arg(short, long)]
        material: Option<String>,

        /// 建築様式（省略時は解析して求める）
        #[arg(short, long)]
        style: Option<String>,

        /// 読み上げを無効化
        #[arg(long)]
        no_voice: bool,
    },

    /// 屋根だけを差し替えた画像を生成
    Render {
        /// 住宅写真のパス
        #[arg(required = true)]
        image: PathBuf,

        /// 素材ID（例: metal-roof）
        #[arg(short, long)]
        material: Option<String>,

        /// 色ID（例: charcoal）
        #[arg(short, long)]
        color: Option<String>,

        /// 建築様式（省略時は "standard"）
        #[arg(short, long)]
        style: Option<String>,

        /// 出力ディレクトリ
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// 解析から生成・書き出しまで一括実行
    Run {
        /// 住宅写真のパス
        #[arg(required = true)]
        image: PathBuf,

        /// 素材ID（省略時は対話選択）
        #[arg(short, long)]
        material: Option<String>,

        /// 色ID（省略時は対話選択）
        #[arg(short, long)]
        color: Option<String>,

        /// 出力ディレクトリ
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// 読み上げを無効化
        #[arg(long)]
        no_voice: bool,

        /// リビールのフレームも書き出す（fps, 1-120）
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=120))]
        reveal_fps: Option<u32>,
    },

    /// 生成画像からリビールのフレーム連番を書き出す
    Reveal {
        /// 生成画像のパス
        #[arg(required = true)]
        image: PathBuf,

        /// 出力ディレクトリ
        #[arg(short, long, default_value = "reveal")]
        output: PathBuf,

        /// フレームレート（1-120）
        #[arg(long, default_value = "12", value_parser = clap::value_parser!(u32).range(1..=120))]
        fps: u32,
    },

    /// 選択できる素材と色の一覧
    Catalog,

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 既定の表示言語を設定 (en/es)
        #[arg(long, value_parser = parse_language)]
        set_language: Option<Language>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

pub fn parse_language(s: &str) -> Result<Language, String> {
    Language::parse(s).ok_or_else(|| format!("Unknown language: {}. Use en or es", s))
}
