//! リビールのフレーム書き出し
//!
//! 生成画像を縮小→最近傍拡大し、ぼかしとコントラストを掛けたPNG連番にする。
//! フレームは rayon で並列に描き、中止フラグは各フレームの開始時に見る。

use crate::error::{Result, RoofAiError};
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use rayon::prelude::*;
use roof_ai_common::reveal::{scaled_size, RevealFrame, REVEAL_DURATION_MS};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

pub const DEFAULT_FPS: u32 = 12;

/// fps に応じた各フレームの経過時間(ms)。最後は必ず完了時刻
pub fn frame_times(fps: u32) -> Vec<f64> {
    let fps = fps.max(1);
    let step = 1000.0 / fps as f64;
    let count = (REVEAL_DURATION_MS / step).ceil() as usize;

    let mut times: Vec<f64> = (0..count)
        .map(|i| i as f64 * step)
        .filter(|t| *t < REVEAL_DURATION_MS)
        .collect();
    times.push(REVEAL_DURATION_MS);
    times
}

/// 縮小してから最近傍で元のサイズへ戻す（平滑化なし）
pub fn pixelate(image: &RgbaImage, factor: f64) -> RgbaImage {
    let (width, height) = image.dimensions();
    let (small_w, small_h) = scaled_size(width, height, factor);
    let small = imageops::resize(image, small_w, small_h, FilterType::Nearest);
    imageops::resize(&small, width, height, FilterType::Nearest)
}

/// 1フレームを描画する
pub fn render_frame(image: &DynamicImage, frame: &RevealFrame) -> RgbaImage {
    let rgba = image.to_rgba8();
    if frame.done {
        return rgba;
    }

    let mut out = pixelate(&rgba, frame.factor);
    if frame.filter.blur_px > 0.0 {
        out = imageops::blur(&out, frame.filter.blur_px as f32);
    }
    if frame.filter.contrast != 1.0 {
        out = imageops::contrast(&out, ((frame.filter.contrast - 1.0) * 100.0) as f32);
    }
    out
}

pub fn frame_file_name(index: usize) -> String {
    format!("reveal_{:04}.png", index)
}

/// フレーム連番を書き出す。中止された場合は書けた分だけ返す
pub fn render_frames<F>(
    image: &DynamicImage,
    fps: u32,
    output_dir: &Path,
    cancel: &AtomicBool,
    on_frame: F,
) -> Result<Vec<PathBuf>>
where
    F: Fn() + Sync,
{
    std::fs::create_dir_all(output_dir)?;

    let written: Vec<Option<PathBuf>> = frame_times(fps)
        .into_par_iter()
        .enumerate()
        .map(|(index, elapsed)| -> Result<Option<PathBuf>> {
            if cancel.load(Ordering::Relaxed) {
                return Ok(None);
            }
            let frame = render_frame(image, &RevealFrame::at(elapsed));
            let path = output_dir.join(frame_file_name(index));
            frame
                .save(&path)
                .map_err(|e| RoofAiError::Export(format!("{}: {}", path.display(), e)))?;
            on_frame();
            Ok(Some(path))
        })
        .collect::<Result<_>>()?;

    Ok(written.into_iter().flatten().collect())
}
