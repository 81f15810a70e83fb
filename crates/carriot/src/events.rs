use crate::monitor::MonitorSnapshot;
use carriot_link::{CommandId, MovementRecord};

#[derive(Debug, Clone)]
pub enum AppEvent {
    Show,
    Hide,
    Stop,
    CommandSent(MovementRecord),
    CommandFailed { action: CommandId, reason: String },
    MonitorLoaded(MonitorSnapshot),
    ConfigReload,
}
