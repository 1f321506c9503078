// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_STATUS_QUERY_RETRIES: u32 = 3;

/// How the poller waits for task finality.
///
/// `max_query_retries` bounds the retries of a single *status query* (which
/// is idempotent and safe to repeat); it never applies to submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    /// Pause between consecutive status queries.
    pub interval: Duration,
    /// Local give-up deadline. `None` polls until the task reaches a
    /// terminal state. The on-chain task is unaffected by a local timeout.
    pub timeout: Option<Duration>,
    /// Extra attempts for a transiently failing status query before the
    /// error is surfaced.
    pub max_query_retries: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            timeout: None,
            max_query_retries: DEFAULT_STATUS_QUERY_RETRIES,
        }
    }
}

impl PollPolicy {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}
