//! Live progress snapshots and their broadcast channel.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

use crate::gait::{FootStrike, GaitMetrics};

/// 解析途中のスナップショット
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaitProgress {
    pub form_score: f64,
    pub cadence_spm: f64,
    pub ground_contact_time_ms: f64,
    pub vertical_oscillation_cm: f64,
    pub forward_lean_deg: f64,
    pub hip_drop_deg: f64,
    pub arm_symmetry_pct: f64,
    pub foot_strike: FootStrike,
    pub frames_processed: u64,
    pub elapsed_sec: f64,
}

impl GaitProgress {
    pub fn from_metrics(
        m: &GaitMetrics,
        form_score: f64,
        frames_processed: u64,
        elapsed_sec: f64,
    ) -> Self {
        Self {
            form_score,
            cadence_spm: m.cadence_spm,
            ground_contact_time_ms: m.ground_contact_time_ms,
            vertical_oscillation_cm: m.vertical_oscillation_cm,
            forward_lean_deg: m.forward_lean_deg,
            hip_drop_deg: m.hip_drop_deg,
            arm_symmetry_pct: m.arm_symmetry_pct(),
            foot_strike: m.foot_strike,
            frames_processed,
            elapsed_sec,
        }
    }
}

/// Owns the sending half. Dropping the sender is how the session end is
/// signalled to subscribers.
pub struct ProgressHub {
    capacity: usize,
    tx: Option<broadcast::Sender<GaitProgress>>,
}

impl ProgressHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            tx: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.tx.is_some()
    }

    /// 閉じていれば新しいチャネルを開く
    pub fn open(&mut self) -> &broadcast::Sender<GaitProgress> {
        let capacity = self.capacity;
        self.tx.get_or_insert_with(|| broadcast::channel(capacity).0)
    }

    pub fn close(&mut self) {
        self.tx = None;
    }

    pub fn subscribe(&mut self) -> ProgressSubscription {
        ProgressSubscription {
            rx: self.open().subscribe(),
        }
    }

    /// Returns the number of receivers reached. No receivers is not an error.
    pub fn publish(&self, progress: GaitProgress) -> usize {
        match &self.tx {
            Some(tx) => tx.send(progress).unwrap_or(0),
            None => 0,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.as_ref().map_or(0, |tx| tx.receiver_count())
    }
}

/// Receiving end handed to consumers.
///
/// A subscriber that falls more than the channel capacity behind skips the
/// missed snapshots and continues with the oldest retained one.
pub struct ProgressSubscription {
    rx: broadcast::Receiver<GaitProgress>,
}

impl ProgressSubscription {
    /// Next snapshot, or `None` once the session has ended and the backlog is drained.
    pub async fn next(&mut self) -> Option<GaitProgress> {
        loop {
            match self.rx.recv().await {
                Ok(p) => return Some(p),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "progress subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant. `Ok(None)` means nothing pending yet.
    pub fn try_next(&mut self) -> Result<Option<GaitProgress>, Closed> {
        loop {
            match self.rx.try_recv() {
                Ok(p) => return Ok(Some(p)),
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Closed) => return Err(Closed),
            }
        }
    }
}

/// The session ended and every pending snapshot has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("progress channel closed")]
pub struct Closed;

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(n: u64) -> GaitProgress {
        GaitProgress::from_metrics(&GaitMetrics::default(), 40.0, n, n as f64 / 30.0)
    }

    #[test]
    fn test_publish_without_subscribers() {
        let mut hub = ProgressHub::new(4);
        assert_eq!(hub.publish(progress(1)), 0);
        hub.open();
        assert_eq!(hub.publish(progress(1)), 0);
    }

    #[test]
    fn test_subscribe_opens_channel() {
        let mut hub = ProgressHub::new(4);
        assert!(!hub.is_open());
        let mut sub = hub.subscribe();
        assert!(hub.is_open());
        assert_eq!(hub.subscriber_count(), 1);
        assert_eq!(hub.publish(progress(15)), 1);
        assert_eq!(sub.try_next().unwrap().unwrap().frames_processed, 15);
        assert_eq!(sub.try_next().unwrap(), None);
    }

    #[test]
    fn test_close_drains_then_ends() {
        let mut hub = ProgressHub::new(4);
        let mut sub = hub.subscribe();
        hub.publish(progress(15));
        hub.close();
        assert!(sub.try_next().unwrap().is_some());
        assert_eq!(sub.try_next(), Err(Closed));
    }

    #[test]
    fn test_lagging_subscriber_skips() {
        let mut hub = ProgressHub::new(2);
        let mut sub = hub.subscribe();
        for n in 1..=5 {
            hub.publish(progress(n));
        }
        // 容量 2 なので最後の 2 件だけ残る
        assert_eq!(sub.try_next().unwrap().unwrap().frames_processed, 4);
        assert_eq!(sub.try_next().unwrap().unwrap().frames_processed, 5);
    }

    #[tokio::test]
    async fn test_async_next_until_closed() {
        let mut hub = ProgressHub::new(4);
        let mut sub = hub.subscribe();
        hub.publish(progress(15));
        hub.publish(progress(30));
        hub.close();
        assert_eq!(sub.next().await.map(|p| p.frames_processed), Some(15));
        assert_eq!(sub.next().await.map(|p| p.frames_processed), Some(30));
        assert_eq!(sub.next().await, None);
    }
}
