// Streamio Core - Native core for the Streamio streaming-catalog client
// Copyright (C) 2025 Streamio contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Cooperative cancellation for in-flight transfers.

use tokio::sync::watch;

/// Create a linked handle/token pair. The handle side cancels; the token
/// side is observed by the transfer loop.
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

/// Caller-side cancel switch. Dropping the handle without cancelling
/// lets the transfer run to completion.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        // receivers may already be gone; nothing to do then
        let _ = self.tx.send(true);
    }
}

/// Transfer-side view of the cancel switch.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// A token that can never fire, for callers without a cancel UI.
    pub fn noop() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve when cancelled. Pends forever if the handle was dropped
    /// without cancelling, which is what a `select!` arm wants.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow() {
                return;
            }
            if self.rx.changed().await.is_err() {
                // sender dropped, cancellation can no longer happen
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancel_fires_token() {
        let (handle, mut token) = cancel_pair();
        assert!(!token.is_cancelled());

        handle.cancel();
        assert!(token.is_cancelled());
        // resolves immediately once cancelled
        tokio::time::timeout(Duration::from_secs(1), token.cancelled())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_dropped_handle_never_fires() {
        let (handle, mut token) = cancel_pair();
        drop(handle);

        assert!(!token.is_cancelled());
        let waited = tokio::time::timeout(Duration::from_millis(50), token.cancelled()).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_noop_token_never_fires() {
        let mut token = CancelToken::noop();
        assert!(!token.is_cancelled());
        let waited = tokio::time::timeout(Duration::from_millis(50), token.cancelled()).await;
        assert!(waited.is_err());
    }
}
