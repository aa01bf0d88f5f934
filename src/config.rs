use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gait: GaitConfig,
    #[serde(default)]
    pub windows: WindowConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GaitConfig {
    /// 解析を有効にするか（false なら start/process_frame は何もしない）
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// 身長（cm）: 正規化座標 → cm 換算に使う
    #[serde(default = "default_body_height_cm")]
    pub body_height_cm: f64,
    /// これ未満の信頼度のフレームは捨てる
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
}

fn default_enabled() -> bool { true }
fn default_body_height_cm() -> f64 { 175.0 }
fn default_min_confidence() -> f64 { 0.4 }

impl Default for GaitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            body_height_cm: default_body_height_cm(),
            min_confidence: default_min_confidence(),
        }
    }
}

/// ローリングウィンドウの容量（30fps で 150 ≒ 5秒）
#[derive(Debug, Deserialize, Clone)]
pub struct WindowConfig {
    #[serde(default = "default_window_capacity")]
    pub frames: usize,
    #[serde(default = "default_window_capacity")]
    pub hip_history: usize,
    /// 片足ごとの接地間隔履歴
    #[serde(default = "default_window_capacity")]
    pub step_intervals: usize,
    #[serde(default = "default_window_capacity")]
    pub contact_events: usize,
}

fn default_window_capacity() -> usize { 150 }

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            frames: default_window_capacity(),
            hip_history: default_window_capacity(),
            step_intervals: default_window_capacity(),
            contact_events: default_window_capacity(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProgressConfig {
    /// 何フレームごとに進捗を配信するか（30fps で 15 ≒ 0.5秒）
    #[serde(default = "default_progress_interval")]
    pub interval_frames: u64,
    /// broadcast チャネルの容量
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_progress_interval() -> u64 { 15 }
fn default_channel_capacity() -> usize { 16 }

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            interval_frames: default_progress_interval(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// 読めなければデフォルト設定
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "config not loaded, using defaults"
                );
                Self::default()
            }
        }
    }
}
