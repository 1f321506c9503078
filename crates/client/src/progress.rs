// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use tokio::sync::mpsc;
use tracing::debug;
use umbra_types::LifecycleNotice;

/// Destination for ordered lifecycle progress notices.
///
/// A dropped receiver never fails the lifecycle; notices are then only
/// traced. `disabled` sinks skip the channel entirely.
#[derive(Debug, Clone)]
pub struct ProgressSink {
    tx: Option<mpsc::UnboundedSender<LifecycleNotice>>,
}

impl ProgressSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<LifecycleNotice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn emit(&self, notice: LifecycleNotice) {
        debug!(notice = %notice, "lifecycle progress");
        if let Some(tx) = &self.tx {
            let _ = tx.send(notice);
        }
    }
}
