//! Replay a running session through the gait analyzer.
//!
//! Usage: gait_replay [frames.jsonl]
//!
//! Each input line is one `PoseFrame` as JSON. Without an argument, 300
//! synthetic frames (about 10 s at 30 fps) are used. Progress snapshots are
//! printed as they arrive; the final result is printed as pretty JSON.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use apexrun_gait::export::{feature_vector, InjuryRiskRequest};
use apexrun_gait::synthetic::SyntheticGait;
use apexrun_gait::{Config, FrameStatus, PoseFrame, SessionController};

const CONFIG_PATH: &str = "config.toml";
const SYNTHETIC_FRAMES: usize = 300;

#[derive(Default)]
struct Tally {
    accepted: u64,
    rejected: u64,
    ignored: u64,
}

impl Tally {
    fn record(&mut self, status: FrameStatus) {
        match status {
            FrameStatus::Accepted => self.accepted += 1,
            FrameStatus::Rejected(_) => self.rejected += 1,
            FrameStatus::Ignored => self.ignored += 1,
        }
    }
}

async fn replay_file(
    controller: &mut SessionController,
    path: &str,
    tally: &mut Tally,
) -> Result<()> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("failed to open {path}"))?;
    let mut lines = BufReader::new(file).lines();
    let mut line_no = 0usize;
    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }
        let frame: PoseFrame = serde_json::from_str(&line)
            .with_context(|| format!("{path}:{line_no}: invalid frame"))?;
        tally.record(controller.process_frame(frame));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::load_or_default(CONFIG_PATH);
    let mut controller = SessionController::new(config);

    let mut progress = controller.subscribe();
    let printer = tokio::spawn(async move {
        let mut count = 0usize;
        while let Some(p) = progress.next().await {
            count += 1;
            println!(
                "[progress] frames={} t={:.1}s score={:.0} cadence={:.0}spm gct={:.0}ms osc={:.1}cm lean={:.1}° hip_drop={:.1}° arms={:.0}% strike={}",
                p.frames_processed,
                p.elapsed_sec,
                p.form_score,
                p.cadence_spm,
                p.ground_contact_time_ms,
                p.vertical_oscillation_cm,
                p.forward_lean_deg,
                p.hip_drop_deg,
                p.arm_symmetry_pct,
                p.foot_strike,
            );
        }
        count
    });

    if !controller.start() {
        anyhow::bail!("gait analysis is disabled in {CONFIG_PATH}");
    }

    let mut tally = Tally::default();
    match std::env::args().nth(1) {
        Some(path) => replay_file(&mut controller, &path, &mut tally).await?,
        None => {
            tracing::info!(frames = SYNTHETIC_FRAMES, "no input file, replaying synthetic run");
            for frame in SyntheticGait::default().frames(SYNTHETIC_FRAMES) {
                tally.record(controller.process_frame(frame));
            }
        }
    }

    let result = controller.stop();
    let snapshots = printer.await.context("progress printer panicked")?;
    eprintln!(
        "[replay] accepted={} rejected={} ignored={} snapshots={}",
        tally.accepted, tally.rejected, tally.ignored, snapshots
    );

    match result {
        Some(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            let request = InjuryRiskRequest::from(&result);
            println!("[export] injury-risk request: {}", request.to_json()?);
            println!("[export] features: {:?}", feature_vector(&result));
        }
        None => {
            eprintln!("[replay] not enough frames for a result");
        }
    }
    Ok(())
}
