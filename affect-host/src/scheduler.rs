//! Background decay for hosts that run on tokio.
//!
//! Game loops with their own frame clock should prefer
//! [`DecaySystem`](crate::systems::DecaySystem). The scheduler is for
//! servers and tools where nothing else ticks the engine.

use std::sync::Arc;
use std::time::Duration;

use affect_core::AppraisalEngine;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, trace, warn};

/// An engine shared between the game thread and the scheduler.
pub type SharedEngine = Arc<Mutex<AppraisalEngine>>;

/// Wrap an engine for sharing.
#[must_use]
pub fn shared(engine: AppraisalEngine) -> SharedEngine {
    Arc::new(Mutex::new(engine))
}

/// Handle to a running decay task.
///
/// Each tick decays the engine by the time measured on the tokio clock
/// since the previous tick. Dropping the handle stops the task as well.
#[derive(Debug)]
pub struct DecayScheduler {
    stop: oneshot::Sender<()>,
    task: JoinHandle<u64>,
}

impl DecayScheduler {
    /// Start decaying `engine` every `period`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(engine: SharedEngine, period: Duration) -> Self {
        let (stop, mut stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;
            let mut last = Instant::now();
            let mut ticks = 0_u64;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let now = Instant::now();
                        let elapsed = u64::try_from(now.duration_since(last).as_millis()).unwrap_or(u64::MAX);
                        last = now;
                        let removed = engine.lock().decay_elapsed(elapsed);
                        ticks += 1;
                        trace!(elapsed_ms = elapsed, removed, "Scheduled decay");
                    }
                    _ = &mut stopped => break,
                }
            }
            debug!(ticks, "Decay scheduler stopped");
            ticks
        });
        debug!(period_ms = period.as_millis(), "Decay scheduler started");
        Self { stop, task }
    }

    /// Stop the task and wait for it. Returns the number of decay passes run.
    pub async fn stop(self) -> u64 {
        let _ = self.stop.send(());
        match self.task.await {
            Ok(ticks) => ticks,
            Err(e) => {
                warn!(error = %e, "Decay scheduler task failed");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use affect_core::EmotionKind;

    fn frightened_villager() -> AppraisalEngine {
        let mut engine = AppraisalEngine::new();
        engine.create_agent("villager").expect("agent");
        engine
            .create_goal_for_agent("villager", "village destroyed", -0.9, false)
            .expect("goal");
        engine
            .appraise_belief(0.6, Some("villager"), &["village destroyed"], &[1.0], false)
            .expect("appraise");
        engine
    }

    fn fear(engine: &SharedEngine) -> f64 {
        engine.lock().agents()[0].intensity_of(EmotionKind::Fear)
    }

    #[tokio::test(start_paused = true)]
    async fn decays_on_each_period() {
        let engine = shared(frightened_villager());
        let before = fear(&engine);

        let scheduler = DecayScheduler::start(Arc::clone(&engine), Duration::from_millis(500));
        tokio::time::sleep(Duration::from_millis(1_050)).await;
        let ticks = scheduler.stop().await;

        assert_eq!(ticks, 2);
        assert!((fear(&engine) - before * 0.8).abs() < 1e-9);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_the_task() {
        let engine = shared(frightened_villager());
        let scheduler = DecayScheduler::start(Arc::clone(&engine), Duration::from_millis(100));
        drop(scheduler);
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(Arc::strong_count(&engine), 1);
    }
}
