//! Clock task: the one deferred chain that drives ticks and computer replies

use std::sync::Arc;
use std::time::Duration;

use crate::state::{Deferred, ServerState, Table};

/// Interval between countdown ticks
pub const TICK: Duration = Duration::from_secs(1);

/// Replace the pending chain with one that starts at `next`
pub fn arm(state: &Arc<ServerState>, next: Deferred) {
    if next == Deferred::Idle {
        state.scheduler.cancel();
        return;
    }
    state.scheduler.schedule(drive(state.clone(), next));
}

/// Sleep, apply one transition under the table lock, repeat until idle
async fn drive(state: Arc<ServerState>, mut next: Deferred) {
    loop {
        next = match next {
            Deferred::Idle => return,
            Deferred::Tick(token) => {
                tokio::time::sleep(TICK).await;
                with_table(&state, |table| table.on_tick(token))
            }
            Deferred::ComputerReply(token) => {
                let delay = state
                    .table()
                    .as_ref()
                    .map(|table| table.config.computer_delay_ms)
                    .unwrap_or_default();
                tokio::time::sleep(Duration::from_millis(delay)).await;
                with_table(&state, |table| table.computer_reply(token))
            }
        };
    }
}

/// Run one transition with the lock held; the guard never crosses an await
fn with_table(state: &ServerState, f: impl FnOnce(&mut Table) -> Deferred) -> Deferred {
    match state.table().as_mut() {
        Some(table) => f(table),
        None => Deferred::Idle,
    }
}
