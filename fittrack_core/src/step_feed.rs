//! Accelerometer-driven step feed.
//!
//! A [`MotionSensor`] fans samples out to its subscribers. Each
//! [`SensorSubscription`] is a guard: dropping it removes the listener from
//! the sensor, whichever way the owning scope exits. [`StepFeed`] turns the
//! samples of one subscription into [`Command::IncrementSteps`] whenever the
//! acceleration magnitude crosses the step threshold.
//!
//! The detector is deliberately crude (one threshold, no filtering); it stands
//! in for a real pedometer.

use crate::store::Command;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Sampling interval used when none is configured
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_millis(1000);

/// Magnitude (in g) above which a sample counts as a step
pub const DEFAULT_STEP_THRESHOLD: f64 = 1.2;

/// One accelerometer reading, in g
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl MotionSample {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    senders: HashMap<u64, mpsc::UnboundedSender<MotionSample>>,
}

fn lock(listeners: &Mutex<Listeners>) -> MutexGuard<'_, Listeners> {
    listeners.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Source of motion samples shared by all subscribers
#[derive(Clone)]
pub struct MotionSensor {
    listeners: Arc<Mutex<Listeners>>,
    update_interval: Duration,
}

impl MotionSensor {
    pub fn new(update_interval: Duration) -> Self {
        Self {
            listeners: Arc::default(),
            update_interval,
        }
    }

    /// How often a driving source should publish
    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Register a listener; it stays registered until the guard is dropped
    pub fn subscribe(&self) -> SensorSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut listeners = lock(&self.listeners);
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.senders.insert(id, tx);

        tracing::debug!("Motion listener {} subscribed", id);

        SensorSubscription {
            id,
            receiver: rx,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Deliver a sample to every listener; returns how many received it
    pub fn publish(&self, sample: MotionSample) -> usize {
        let mut listeners = lock(&self.listeners);
        listeners
            .senders
            .retain(|id, tx| match tx.send(sample) {
                Ok(()) => true,
                Err(_) => {
                    tracing::debug!("Motion listener {} went away", id);
                    false
                }
            });
        listeners.senders.len()
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).senders.len()
    }
}

impl Default for MotionSensor {
    fn default() -> Self {
        Self::new(DEFAULT_UPDATE_INTERVAL)
    }
}

/// Registration of one listener on a [`MotionSensor`]
pub struct SensorSubscription {
    id: u64,
    receiver: mpsc::UnboundedReceiver<MotionSample>,
    listeners: Weak<Mutex<Listeners>>,
}

impl SensorSubscription {
    /// Wait for the next sample; `None` once the sensor is gone
    pub async fn recv(&mut self) -> Option<MotionSample> {
        self.receiver.recv().await
    }

    /// Next sample if one is already queued
    pub fn try_recv(&mut self) -> Option<MotionSample> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for SensorSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            lock(&listeners).senders.remove(&self.id);
            tracing::debug!("Motion listener {} unsubscribed", self.id);
        }
    }
}

/// Threshold step detector
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepDetector {
    pub threshold: f64,
}

impl StepDetector {
    pub fn is_step(&self, sample: &MotionSample) -> bool {
        sample.magnitude() > self.threshold
    }
}

impl Default for StepDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_STEP_THRESHOLD,
        }
    }
}

/// Step commands from one sensor subscription
pub struct StepFeed {
    subscription: SensorSubscription,
    detector: StepDetector,
}

impl StepFeed {
    /// Subscribe to `sensor`; the subscription lives as long as the feed
    pub fn start(sensor: &MotionSensor, detector: StepDetector) -> Self {
        Self {
            subscription: sensor.subscribe(),
            detector,
        }
    }

    /// Wait for the next detected step; `None` once the sensor is gone
    pub async fn next_command(&mut self) -> Option<Command> {
        while let Some(sample) = self.subscription.recv().await {
            if self.detector.is_step(&sample) {
                return Some(Command::IncrementSteps(1));
            }
        }
        None
    }

    /// Steps detected in the samples queued so far
    pub fn drain(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        while let Some(sample) = self.subscription.try_recv() {
            if self.detector.is_step(&sample) {
                commands.push(Command::IncrementSteps(1));
            }
        }
        commands
    }
}

/// Replays a fixed sample sequence into a sensor at its update interval
pub struct SimulatedAccelerometer;

impl SimulatedAccelerometer {
    /// Publish `samples` one per tick, then finish
    pub fn spawn(sensor: MotionSensor, samples: Vec<MotionSample>) -> JoinHandle<usize> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(sensor.update_interval());
            let mut published = 0;
            for sample in samples {
                ticker.tick().await;
                sensor.publish(sample);
                published += 1;
            }
            tracing::debug!("Simulated accelerometer published {} samples", published);
            published
        })
    }

    /// `ticks` samples alternating a stride (1.5 g) and standing still (1.0 g)
    pub fn walking_pattern(ticks: usize) -> Vec<MotionSample> {
        (0..ticks)
            .map(|i| {
                if i % 2 == 0 {
                    MotionSample::new(0.3, 0.4, 1.4)
                } else {
                    MotionSample::new(0.0, 0.0, 1.0)
                }
            })
            .collect()
    }
}
