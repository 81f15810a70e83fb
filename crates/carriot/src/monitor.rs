use crate::config::MonitorConfig;
use crate::history::History;
use carriot_link::{DemoEntry, MovementEntry, ObstacleEntry, Operation};

/// Result of one round of history reads. `None` marks a read that failed; the board
/// keeps what it had for that list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitorSnapshot {
    pub movements: Option<Vec<MovementEntry>>,
    pub obstacles: Option<Vec<ObstacleEntry>>,
    pub demos: Option<Vec<DemoEntry>>,
}

/// Recorded activity of one vehicle: movements and obstacles (newest first, with a
/// card for the latest of each) and the stored demos.
#[derive(Debug, Clone)]
pub struct MonitorBoard {
    device_id: u32,
    pub movements: History<MovementEntry>,
    pub obstacles: History<ObstacleEntry>,
    pub demos: History<DemoEntry>,
}

impl MonitorBoard {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            device_id: config.device_id,
            movements: History::with_placeholder(config.capacity, "Loading..."),
            obstacles: History::with_placeholder(config.capacity, "Loading..."),
            demos: History::with_placeholder(config.capacity, "Waiting for demos..."),
        }
    }

    pub fn device_id(&self) -> u32 {
        self.device_id
    }

    /// Returns whether the device changed; the lists then belong to the old device
    /// and are cleared.
    pub fn reconfigure(&mut self, config: &MonitorConfig) -> bool {
        self.movements.set_capacity(config.capacity);
        self.obstacles.set_capacity(config.capacity);
        self.demos.set_capacity(config.capacity);
        if self.device_id == config.device_id {
            return false;
        }
        self.device_id = config.device_id;
        self.movements.replace([]);
        self.obstacles.replace([]);
        true
    }

    pub fn apply(&mut self, snapshot: MonitorSnapshot) {
        if let Some(movements) = snapshot.movements {
            self.movements.replace(movements);
        }
        if let Some(obstacles) = snapshot.obstacles {
            self.obstacles.replace(obstacles);
        }
        if let Some(demos) = snapshot.demos {
            self.demos.replace(demos);
        }
    }

    pub fn movement_card(&self) -> String {
        match self.movements.latest() {
            Some(entry) => {
                let icon = Operation::resolve(&entry.operation)
                    .map(|op| op.icon())
                    .unwrap_or("⏱️");
                format!(
                    "{} {}\nVel: {}",
                    icon,
                    entry.operation_text(),
                    entry.speed_text()
                )
            }
            None => "⏱️ ---\nVel: --".to_string(),
        }
    }

    pub fn obstacle_card(&self) -> String {
        match self.obstacles.latest() {
            Some(entry) => format!(
                "⚠️ {}\nCarro ID: {} | {}",
                entry.text(),
                self.device_id,
                entry.time()
            ),
            None => format!("✅ No obstacles\nCarro ID: {}", self.device_id),
        }
    }
}
