mod scheduler;
mod session;

pub use scheduler::{BreakScheduler, PendingBreak, PostponeKind, TickOutcome};
pub use session::{ActiveBreak, BreakSession, HistoryEntry, SchedulerPhase};
