//! Client-side search over the rendered rows.

use super::render::no_results_row;
use super::scheduler::Scheduler;
use super::surface::TableBody;
use crate::consts::dashboard_consts::table::NO_RESULTS_ROW_ID;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Result of one filter pass.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FilterOutcome {
    pub visible: usize,
    pub hidden: usize,
    /// Whether the synthetic "no results" row is now present.
    pub no_results: bool,
}

/// Shows rows whose name contains `term`, case-insensitively, and hides the
/// rest.
///
/// A non-empty term matching nothing leaves exactly one "no results" row in
/// the table; any other outcome removes it.
pub fn apply_filter(table: &dyn TableBody, term: &str) -> FilterOutcome {
    let needle = term.to_lowercase();
    let mut outcome = FilterOutcome::default();

    for row in table.rows() {
        if row.id.as_deref() == Some(NO_RESULTS_ROW_ID) {
            continue;
        }
        let matches = row.name.to_lowercase().contains(&needle);
        table.set_visible(row.index, matches);
        if matches {
            outcome.visible += 1;
        } else {
            outcome.hidden += 1;
        }
    }

    // Dropped first so the row always carries the latest term.
    table.remove(NO_RESULTS_ROW_ID);
    if !term.is_empty() && outcome.visible == 0 {
        table.append(no_results_row(term));
        outcome.no_results = true;
    }

    outcome
}

/// Runs only the last of a burst of calls, once `delay` has passed without a
/// newer one.
#[derive(Clone)]
pub struct Debouncer {
    scheduler: Rc<dyn Scheduler>,
    delay: Duration,
    token: Rc<Cell<u64>>,
}

impl Debouncer {
    pub fn new(scheduler: Rc<dyn Scheduler>, delay: Duration) -> Self {
        Self {
            scheduler,
            delay,
            token: Rc::new(Cell::new(0)),
        }
    }

    /// Schedules `action`, superseding any call still waiting.
    pub fn call(&self, action: impl FnOnce() + 'static) {
        let mine = self.token.get() + 1;
        self.token.set(mine);

        let token = Rc::clone(&self.token);
        let wait = self.scheduler.sleep(self.delay);
        self.scheduler.spawn(Box::pin(async move {
            wait.await;
            if token.get() == mine {
                action();
            }
        }));
    }

    /// Drops the pending call, if any.
    pub fn cancel(&self) {
        self.token.set(self.token.get() + 1);
    }
}
