//! Fixed-cadence tick pacing for hosts.
//!
//! The driver only decides *when* to call [`Controller::tick`]; the host supplies
//! the clock. Late wakeups produce a single tick with the current timestamp,
//! since gravity is measured against absolute time anyway.

use crate::controller::Controller;
use crate::types::StepEvent;

#[derive(Debug, Clone, Copy)]
pub struct Driver {
    tick_ms: u64,
    next_tick_ms: Option<u64>,
}

impl Driver {
    pub fn new(tick_ms: u32) -> Self {
        Self {
            tick_ms: tick_ms.max(1) as u64,
            next_tick_ms: None,
        }
    }

    pub fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    /// Milliseconds the host may wait for input before the next tick is due
    pub fn wait_budget(&self, now_ms: u64) -> u64 {
        match self.next_tick_ms {
            Some(due) => due.saturating_sub(now_ms),
            None => 0,
        }
    }

    /// Tick the controller if a tick is due.
    pub fn pump(&mut self, controller: &mut Controller, now_ms: u64) -> Option<StepEvent> {
        if let Some(due) = self.next_tick_ms {
            if now_ms < due {
                return None;
            }
        }
        self.next_tick_ms = Some(now_ms + self.tick_ms);
        Some(controller.tick(now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    #[test]
    fn test_first_pump_ticks_immediately() {
        let mut controller = Controller::new(&EngineConfig::default(), 3);
        controller.start(0);
        let mut driver = Driver::new(16);

        assert_eq!(driver.wait_budget(0), 0);
        assert!(driver.pump(&mut controller, 0).is_some());
        assert_eq!(driver.wait_budget(0), 16);
        assert_eq!(driver.wait_budget(10), 6);
        assert!(driver.pump(&mut controller, 10).is_none());
        assert!(driver.pump(&mut controller, 16).is_some());
    }

    #[test]
    fn test_gravity_through_driver() {
        let mut controller = Controller::new(&EngineConfig::default(), 3);
        controller.start(0);
        let y0 = controller.snapshot().active.map(|a| a.y);
        let mut driver = Driver::new(16);

        let mut moved = false;
        let mut now = 0;
        while now <= 1100 {
            if let Some(event) = driver.pump(&mut controller, now) {
                moved |= event.moved;
            }
            now += 4;
        }

        assert!(moved);
        let y1 = controller.snapshot().active.map(|a| a.y);
        assert_eq!(y1, y0.map(|y| y + 1));
    }

    #[test]
    fn test_zero_cadence_is_clamped() {
        assert_eq!(Driver::new(0).tick_ms(), 1);
    }
}
