//! roof-ai-rust
//!
//! 屋根材AIビジュアライザーのCLI側。共通ロジックは roof_ai_common にある。

pub mod cli;
pub mod config;
pub mod debounce;
pub mod error;
pub mod export;
pub mod gateway;
pub mod intake;
pub mod logging;
pub mod picker;
pub mod reveal;
pub mod session;
pub mod speech;
