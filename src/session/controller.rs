use crate::config::Config;
use crate::error::FrameRejection;
use crate::gait::GaitEngine;
use crate::pose::PoseFrame;
use crate::scoring::{form_score, FormScorer};
use crate::session::progress::{GaitProgress, ProgressHub, ProgressSubscription};
use crate::session::result::GaitSessionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Analyzing,
}

/// `process_frame` の結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStatus {
    /// 解析中でない（または無効化されている）
    Ignored,
    Rejected(FrameRejection),
    Accepted,
}

/// 1本の走行セッションの開始・フレーム投入・終了を管理する
///
/// フレームは呼び出し側スレッドで同期的に処理する。途中経過は
/// `subscribe()` で得た購読側へ broadcast され、`stop()`/`reset()` で
/// チャネルが閉じられる。
pub struct SessionController {
    config: Config,
    state: SessionState,
    engine: Option<GaitEngine>,
    progress: ProgressHub,
}

impl SessionController {
    pub fn new(config: Config) -> Self {
        let progress = ProgressHub::new(config.progress.channel_capacity);
        Self {
            config,
            state: SessionState::Idle,
            engine: None,
            progress,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_analyzing(&self) -> bool {
        self.state == SessionState::Analyzing
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 新しいセッションを開始。無効化されていれば何もせず false
    pub fn start(&mut self) -> bool {
        if !self.config.gait.enabled {
            tracing::debug!("gait analysis disabled, start ignored");
            return false;
        }
        if self.is_analyzing() {
            // 前セッションの購読者には終了を通知し、新セッションの配信は届けない
            self.progress.close();
            tracing::info!("restarting gait session, previous data discarded");
        }
        self.engine = Some(GaitEngine::new(&self.config.gait, &self.config.windows));
        self.progress.open();
        self.state = SessionState::Analyzing;
        tracing::info!(
            body_height_cm = self.config.gait.body_height_cm,
            min_confidence = self.config.gait.min_confidence,
            "gait session started"
        );
        true
    }

    pub fn process_frame(&mut self, frame: PoseFrame) -> FrameStatus {
        if !self.config.gait.enabled || !self.is_analyzing() {
            return FrameStatus::Ignored;
        }
        let Some(engine) = self.engine.as_mut() else {
            return FrameStatus::Ignored;
        };

        match engine.process(frame) {
            Ok(events) => {
                for e in &events {
                    tracing::trace!(foot = ?e.foot, timestamp_ms = e.timestamp_ms, "foot landed");
                }
            }
            Err(reason) => {
                tracing::debug!(%reason, "frame rejected");
                return FrameStatus::Rejected(reason);
            }
        }

        let interval = self.config.progress.interval_frames.max(1);
        let accepted = engine.ingest().accepted_count();
        if engine.has_enough_data() && accepted % interval == 0 {
            let snapshot = progress_of(engine);
            let reached = self.progress.publish(snapshot);
            tracing::trace!(accepted, reached, "progress published");
        }
        FrameStatus::Accepted
    }

    /// セッションを終了して最終結果を返す。データ不足なら None
    pub fn stop(&mut self) -> Option<GaitSessionResult> {
        self.state = SessionState::Idle;
        self.progress.close();
        let engine = self.engine.take()?;

        let ingest = engine.ingest();
        if !engine.has_enough_data() {
            tracing::info!(
                frames = ingest.accepted_count(),
                "gait session stopped without enough data"
            );
            return None;
        }

        let metrics = engine.metrics();
        let result = GaitSessionResult::new(
            &metrics,
            FormScorer::assess(&metrics),
            ingest.accepted_count(),
            ingest.average_confidence(),
            ingest.elapsed_secs(),
        );
        tracing::info!(
            frames = result.frames_analyzed,
            form_score = result.form_score,
            cadence_spm = result.cadence_spm,
            "gait session finished"
        );
        Some(result)
    }

    /// 全データ破棄。チャネルも閉じる
    pub fn reset(&mut self) {
        self.engine = None;
        self.progress.close();
        self.state = SessionState::Idle;
    }

    /// 現在のチャネルを購読する（アイドル中なら先に開く）
    pub fn subscribe(&mut self) -> ProgressSubscription {
        self.progress.subscribe()
    }

    /// 解析中かつデータ十分なときの途中経過
    pub fn snapshot(&self) -> Option<GaitProgress> {
        if !self.is_analyzing() {
            return None;
        }
        let engine = self.engine.as_ref()?;
        engine.has_enough_data().then(|| progress_of(engine))
    }

    pub fn has_enough_data(&self) -> bool {
        self.engine.as_ref().is_some_and(GaitEngine::has_enough_data)
    }

    pub fn frames_processed(&self) -> u64 {
        self.engine.as_ref().map_or(0, |e| e.ingest().accepted_count())
    }
}

fn progress_of(engine: &GaitEngine) -> GaitProgress {
    let metrics = engine.metrics();
    let ingest = engine.ingest();
    GaitProgress::from_metrics(
        &metrics,
        form_score(&metrics),
        ingest.accepted_count(),
        ingest.elapsed_secs(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Landmark;
    use crate::session::progress::Closed;
    use crate::synthetic::SyntheticGait;

    fn run(controller: &mut SessionController, count: usize) {
        for frame in SyntheticGait::default().frames(count) {
            assert_eq!(controller.process_frame(frame), FrameStatus::Accepted);
        }
    }

    #[test]
    fn test_ignored_when_idle() {
        let mut c = SessionController::new(Config::default());
        let frame = SyntheticGait::default().frame(0);
        assert_eq!(c.process_frame(frame), FrameStatus::Ignored);
        assert_eq!(c.frames_processed(), 0);
    }

    #[test]
    fn test_disabled_is_noop() {
        let mut config = Config::default();
        config.gait.enabled = false;
        let mut c = SessionController::new(config);
        assert!(!c.start());
        assert_eq!(c.state(), SessionState::Idle);
        assert_eq!(c.process_frame(SyntheticGait::default().frame(0)), FrameStatus::Ignored);
        assert!(c.stop().is_none());
    }

    #[test]
    fn test_rejection_reported() {
        let mut c = SessionController::new(Config::default());
        c.start();
        let bad = PoseFrame::new(vec![Landmark::default(); 12], 0, 0.9);
        assert_eq!(c.process_frame(bad), FrameStatus::Rejected(FrameRejection::LandmarkCount(12)));
        let dim = PoseFrame::new(vec![Landmark::default(); 33], 0, 0.1);
        assert!(matches!(
            c.process_frame(dim),
            FrameStatus::Rejected(FrameRejection::LowConfidence { .. })
        ));
        assert_eq!(c.frames_processed(), 0);
    }

    #[test]
    fn test_stop_before_threshold() {
        let mut c = SessionController::new(Config::default());
        c.start();
        run(&mut c, 29);
        assert!(!c.has_enough_data());
        assert!(c.snapshot().is_none());
        assert!(c.stop().is_none());
        assert_eq!(c.state(), SessionState::Idle);
    }

    #[test]
    fn test_progress_every_fifteen_frames() {
        let mut c = SessionController::new(Config::default());
        let mut sub = c.subscribe();
        c.start();
        run(&mut c, 100);

        let mut seen = Vec::new();
        while let Ok(Some(p)) = sub.try_next() {
            seen.push(p.frames_processed);
        }
        assert_eq!(seen, vec![30, 45, 60, 75, 90]);

        let result = c.stop().unwrap();
        assert_eq!(result.frames_analyzed, 100);
        assert_eq!(sub.try_next(), Err(Closed));
    }

    #[test]
    fn test_snapshot_matches_counter() {
        let mut c = SessionController::new(Config::default());
        c.start();
        run(&mut c, 40);
        let snap = c.snapshot().unwrap();
        assert_eq!(snap.frames_processed, 40);
        assert!((0.0..=100.0).contains(&snap.form_score));
    }

    #[test]
    fn test_restart_discards_previous() {
        let mut c = SessionController::new(Config::default());
        let mut old = c.subscribe();
        c.start();
        run(&mut c, 60);
        assert!(c.start());
        assert_eq!(c.frames_processed(), 0);
        assert!(!c.has_enough_data());

        let mut fresh = c.subscribe();
        run(&mut c, 30);

        let mut seen = Vec::new();
        while let Ok(Some(p)) = old.try_next() {
            seen.push(p.frames_processed);
        }
        assert_eq!(seen, vec![30, 45, 60]);
        assert_eq!(old.try_next(), Err(Closed));
        assert_eq!(fresh.try_next().unwrap().map(|p| p.frames_processed), Some(30));

        c.reset();
        assert_eq!(c.state(), SessionState::Idle);
        assert!(c.stop().is_none());
    }
}
