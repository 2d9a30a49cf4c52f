//! ログ初期化
//!
//! RUST_LOG があればそれを優先し、なければ --verbose で debug に上げる。

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "roof_ai_rust=debug,roof_ai_common=debug,warn"
    } else {
        "roof_ai_rust=info,warn"
    }
}

pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(verbose)
        .with_writer(std::io::stderr);

    // 二重初期化（テスト等）は無視
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();

    tracing::debug!("logging initialized (verbose={})", verbose);
}
