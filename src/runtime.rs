//! Tokio integration for the completed-change timer.
//!
//! [`TokioClock`] reads tokio's clock, so paused-time tests advance it along
//! with timers. [`settle`] sleeps until the pending delivery is due and
//! delivers it.

use tokio::time::{sleep_until, Instant as TokioInstant};

use std::time::Instant;

use crate::clock::Clock;
use crate::convert::ColorConverter;
use crate::shell::ColorShell;

/// Clock backed by [`tokio::time::Instant`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        TokioInstant::now().into_std()
    }
}

/// Waits for the pending completed change, if any, and delivers it.
///
/// Returns `true` if a delivery happened. Returns immediately when nothing
/// is pending.
pub async fn settle<E, C: ColorConverter>(shell: &mut ColorShell<E, C>) -> bool {
    let Some(deadline) = shell.next_deadline() else {
        return false;
    };
    sleep_until(TokioInstant::from_std(deadline)).await;
    shell.poll()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::ColorDescription;
    use crate::dispatch::Listeners;
    use crate::state::ColorState;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_settle_delivers_last_edit() {
        let delivered = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&delivered);
        let listeners = Listeners::new().on_change_complete(move |state: &ColorState, _: Option<&()>| {
            sink.borrow_mut().push(state.hex());
        });
        let mut shell = ColorShell::builder()
            .listeners(listeners)
            .clock(TokioClock)
            .debounce_window(Duration::from_millis(100))
            .build()
            .unwrap();

        shell.handle_change(&ColorDescription::hex("#ff0000"), ());
        tokio::time::advance(Duration::from_millis(50)).await;
        shell.handle_change(&ColorDescription::hex("#0000ff"), ());

        assert!(settle(&mut shell).await);
        assert_eq!(*delivered.borrow(), vec!["#0000ff".to_string()]);
        assert!(!settle(&mut shell).await);
    }
}
