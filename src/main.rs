use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use roof_ai_common::{catalog, ui_text, AnalysisResult, RoofAi, UiText, ROOF_COLORS, ROOF_MATERIALS};
use roof_ai_rust::{cli, config, export, gateway, intake, logging, picker, reveal, session, speech};
use cli::{Cli, Commands};
use config::Config;
use gateway::GeminiClient;
use session::Session;
use speech::ConsoleSpeech;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = Config::load().context("設定ファイルの読み込みに失敗しました")?;
    let language = cli.lang.unwrap_or(config.language);
    let text = ui_text(language);

    match cli.command {
        Commands::Analyze { image, output } => {
            println!("🏠 roof-ai - 様式解析\n");

            let payload = intake::load_image(&image)?;
            let client = GeminiClient::from_config(&config)?;

            let spinner = start_spinner(text.analyzing);
            let result = client.analyze_image(&payload, language).await;
            spinner.finish_and_clear();

            let analysis = result?;
            print_analysis(&analysis, text);

            if let Some(output) = output {
                let json = serde_json::to_string_pretty(&analysis)?;
                std::fs::write(&output, json)?;
                println!("\n✔ 結果を保存: {}", output.display());
            }
        }

        Commands::Insight { image, material, style, no_voice } => {
            println!("🎙 roof-ai - 素材インサイト\n");

            let payload = intake::load_image(&image)?;
            let client = GeminiClient::from_config(&config)?;
            let material = match material {
                Some(id) => catalog::material(&id)?,
                None => picker::select_material_interactive(catalog::default_material().id, language)?,
            };

            let mut session = Session::new(client, ConsoleSpeech::new(), language);
            if no_voice {
                session.toggle_audio();
            }

            let insight = match style {
                Some(style) => {
                    let spinner = start_spinner(text.scanning);
                    let text = session
                        .ai()
                        .get_material_insight(&payload, &style, material.display_name(language), language)
                        .await;
                    spinner.finish_and_clear();
                    Some(text)
                }
                None => {
                    let spinner = start_spinner(text.analyzing);
                    session.upload(payload).await?;
                    spinner.finish_and_clear();
                    report_error(session.workflow().error_message());

                    session.select_material(material.id)?;
                    let spinner = start_spinner(text.scanning);
                    let text = session.fetch_insight().await;
                    spinner.finish_and_clear();
                    text
                }
            };

            match insight {
                Some(insight) if no_voice => println!("{}: {}", text.ai_consultant, insight),
                Some(_) => {}
                None => println!("{}", text.awaiting_select),
            }
        }

        Commands::Render { image, material, color, style, output } => {
            println!("🎨 roof-ai - 屋根の再レンダリング\n");

            let payload = intake::load_image(&image)?;
            let client = GeminiClient::from_config(&config)?;
            let material = catalog::material(material.as_deref().unwrap_or(catalog::default_material().id))?;
            let color = catalog::color(color.as_deref().unwrap_or(catalog::default_color().id))?;
            let style = style.unwrap_or_else(|| roof_ai_common::workflow::FALLBACK_STYLE.to_string());

            let spinner = start_spinner(text.processing);
            let result = client
                .generate_roof_image(&payload, material.name, color.name, &style)
                .await;
            spinner.finish_and_clear();

            let generated = result?;
            let path = export::save_render(&generated, &output)?;
            println!("✔ {}: {}", text.export, path.display());
        }

        Commands::Run { image, material, color, output, no_voice, reveal_fps } => {
            println!("🚀 roof-ai - 一括処理\n");

            let payload = intake::load_image(&image)?;
            let client = GeminiClient::from_config(&config)?;
            let mut session = Session::new(client, ConsoleSpeech::new(), language);
            if no_voice {
                session.toggle_audio();
            }

            // 1. 解析
            println!("[1/4] {}", text.analyzing);
            let spinner = start_spinner(text.scanning);
            session.upload(payload).await?;
            spinner.finish_and_clear();
            match session.workflow().analysis() {
                Some(analysis) => print_analysis(analysis, text),
                None => report_error(session.workflow().error_message()),
            }
            println!();

            // 2. 素材・色の選択
            println!("[2/4] {} / {}", text.material_select, text.color_grade);
            let material = match material {
                Some(id) => catalog::material(&id)?,
                None => picker::select_material_interactive(session.workflow().material().id, language)?,
            };
            session.select_material(material.id)?;
            let color = match color {
                Some(id) => catalog::color(&id)?,
                None => picker::select_color_interactive(session.workflow().color().id, language)?,
            };
            session.select_color(color.id)?;
            println!(
                "✔ {} / {}\n",
                material.display_name(language),
                color.display_name(language)
            );

            // 3. インサイト
            println!("[3/4] {}", text.ai_consultant);
            if let Some(insight) = session.settle_insight().await {
                if no_voice {
                    println!("{}", insight);
                }
            }
            println!();

            // 4. 生成・書き出し
            println!("[4/4] {}", text.initiate_render);
            let spinner = start_spinner(text.processing);
            let generated = session.generate().await;
            spinner.finish_and_clear();

            let render_path = match session.workflow().generated() {
                Some(image) if generated => {
                    let path = export::save_render(image, &output)?;
                    println!("✔ {}: {}", text.export, path.display());
                    Some(path)
                }
                _ => {
                    report_error(session.workflow().error_message());
                    None
                }
            };

            if let (Some(fps), Some(path)) = (reveal_fps, render_path.as_ref()) {
                write_reveal(path, &output.join("reveal"), fps).await?;
            }

            let report = export::RunReport::from_workflow(session.workflow(), render_path.as_deref());
            let report_path = report.save(&output)?;
            println!("✔ {}: {}", text.analysis_log, report_path.display());

            println!("\n✅ 完了");
        }

        Commands::Reveal { image, output, fps } => {
            println!("✨ roof-ai - リビール\n");
            write_reveal(&image, &output, fps).await?;
        }

        Commands::Catalog => {
            println!("{}:", text.material_select);
            for option in ROOF_MATERIALS {
                println!("  {:<18} {}", option.id, picker::material_label(option, language));
            }
            println!("\n{}:", text.color_grade);
            for option in ROOF_COLORS {
                println!("  {:<18} {}", option.id, picker::color_label(option, language));
            }
        }

        Commands::Config { set_api_key, set_language, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if let Some(language) = set_language {
                config.language = language;
                config.save()?;
                println!("✔ 表示言語を設定しました: {}", language);
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!("  APIベースURL: {}", config.api_base_url);
                println!("  解析モデル: {}", config.analysis_model);
                println!("  画像モデル: {}", config.image_model);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  表示言語: {}", config.language);
                println!(
                    "  APIキー: {}",
                    config.masked_api_key().unwrap_or_else(|| "未設定".to_string())
                );
            }
        }
    }

    Ok(())
}

fn start_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn print_analysis(analysis: &AnalysisResult, text: &UiText) {
    println!("✔ {}: {}", text.arch_style, analysis.style);
    println!("  {}: {}", text.mat_matrix, analysis.recommendations.join(", "));
    println!("  {}: {}", text.ai_reasoning, analysis.reasoning);
}

fn report_error(message: Option<&str>) {
    if let Some(message) = message {
        println!("⚠ {}", message);
    }
}

/// 生成画像からリビールのフレームを書き出す（Ctrl-C で中止）
async fn write_reveal(image: &Path, output: &Path, fps: u32) -> anyhow::Result<()> {
    let payload = intake::load_image(image)?;
    let decoded = intake::decode_image(&payload)?;

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            flag.store(true, Ordering::Relaxed);
        }
    });

    let bar = ProgressBar::new(reveal::frame_times(fps).len() as u64);
    let output_dir: PathBuf = output.to_path_buf();
    let progress = bar.clone();
    let frames = tokio::task::spawn_blocking(move || {
        reveal::render_frames(&decoded, fps, &output_dir, &cancel, || progress.inc(1))
    })
    .await??;
    bar.finish_and_clear();
    watcher.abort();

    println!("✔ {}フレームを書き出し: {}", frames.len(), output.display());
    Ok(())
}
