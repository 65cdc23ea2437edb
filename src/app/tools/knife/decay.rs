//! Zeitgesteuertes Abklingen der Knife-Spur.
//!
//! `DecayClock` übersetzt die vom Host gemeldete Zeit in feste Ticks,
//! `StrokeDecay` entscheidet pro Tick, wie viele alte Samples verschwinden.

use super::trail::StrokeTrail;
use crate::shared::options::{DECAY_INTERVAL_MS, DECAY_PATIENCE_TICKS, DECAY_TRIM_PER_TICK};
use std::time::Duration;

/// Tick-Takt auf dem Thread des Hosts. Angebrochene Intervalle werden
/// in den nächsten Aufruf übertragen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecayClock {
    interval: Duration,
    carried: Duration,
    running: bool,
}

impl Default for DecayClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(DECAY_INTERVAL_MS))
    }
}

impl DecayClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            carried: Duration::ZERO,
            running: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.max(Duration::from_millis(1));
    }

    pub fn start(&mut self) {
        self.running = true;
        self.carried = Duration::ZERO;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.carried = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Meldet vergangene Zeit; gibt die Anzahl fälliger Ticks zurück.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        self.carried += elapsed;
        let due = self.carried.as_nanos() / self.interval.as_nanos();
        let due = u32::try_from(due).unwrap_or(u32::MAX);
        self.carried -= self.interval.saturating_mul(due);
        due
    }
}

/// Tick-Zähler mit Geduld: erst nach `patience` Ticks wird gekürzt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrokeDecay {
    counter: u32,
    patience: u32,
    trim_per_tick: usize,
}

impl Default for StrokeDecay {
    fn default() -> Self {
        Self::new(DECAY_PATIENCE_TICKS, DECAY_TRIM_PER_TICK)
    }
}

impl StrokeDecay {
    pub fn new(patience: u32, trim_per_tick: usize) -> Self {
        Self {
            counter: 0,
            patience,
            trim_per_tick,
        }
    }

    /// Setzt den Zähler zurück (Gesten-Start).
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Ein Tick: Zähler erhöhen, nach Ablauf der Geduld die ältesten
    /// Samples entfernen. Gibt die Anzahl entfernter Samples zurück.
    pub fn tick(&mut self, trail: &mut StrokeTrail) -> usize {
        self.counter = self.counter.saturating_add(1);
        if self.counter > self.patience && !trail.is_empty() {
            trail.trim_oldest(self.trim_per_tick)
        } else {
            0
        }
    }

    /// Ist die Geduld abgelaufen?
    pub fn is_exhausted(&self) -> bool {
        self.counter > self.patience
    }
}
