// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Replayable single-value notification handles
//!
//! A [`Subscribable`] is the read side of a one-shot broadcast: it is resolved
//! with at most one value, any number of listeners can observe it (by cloning
//! the handle), and listeners that arrive after resolution still see the value.
//! The matching [`Publisher`] is consumed by [`Publisher::send`], so a handle
//! can never be resolved twice. Dropping the publisher without sending closes
//! the handle without a value.
//!
//! # Examples
//!
//! ```rust
//! use tokenattr::Subscribable;
//!
//! let (publisher, handle) = Subscribable::pending();
//! let listener = handle.clone();
//!
//! publisher.send(7u32);
//! assert_eq!(handle.value(), Some(7));
//! assert_eq!(listener.value(), Some(7));
//! assert!(Subscribable::resolved_with(7u32).is_resolved());
//! ```

use tokio::sync::watch;

/// Read side of a replayable single-value broadcast.
///
/// Cloning creates another listener on the same handle.
#[derive(Debug, Clone)]
pub struct Subscribable<T> {
    receiver: watch::Receiver<Option<T>>,
}

/// Write side of a [`Subscribable`].
#[derive(Debug)]
pub struct Publisher<T> {
    sender: watch::Sender<Option<T>>,
}

impl<T: Clone> Subscribable<T> {
    /// Creates an unresolved handle and its publisher.
    #[must_use]
    pub fn pending() -> (Publisher<T>, Self) {
        let (sender, receiver) = watch::channel(None);
        (Publisher { sender }, Self { receiver })
    }

    /// Creates a handle that is already resolved with `value`.
    #[must_use]
    pub fn resolved_with(value: T) -> Self {
        let (publisher, handle) = Self::pending();
        publisher.send(value);
        handle
    }

    /// The resolved value, if any. Never waits.
    #[must_use]
    pub fn value(&self) -> Option<T> {
        self.receiver.borrow().clone()
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.receiver.borrow().is_some()
    }

    /// `true` once the publisher is gone.
    ///
    /// A closed handle that is not resolved will never be.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.receiver.has_changed().is_err()
    }

    /// Waits for the value.
    ///
    /// Returns immediately if the handle is already resolved, and `None` if the
    /// publisher was dropped without sending.
    pub async fn resolved(&self) -> Option<T> {
        let mut receiver = self.receiver.clone();
        let resolved = receiver
            .wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|value| value.clone());
        resolved
    }
}

impl<T> Publisher<T> {
    /// Resolves the handle, waking every listener.
    ///
    /// The value is stored even if no listener is currently waiting, so later
    /// listeners still observe it.
    pub fn send(self, value: T) {
        self.sender.send_replace(Some(value));
    }

    /// `true` if every handle for this publisher has been dropped.
    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        self.sender.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_pending_has_no_value() {
        let (_publisher, handle) = Subscribable::<u32>::pending();
        assert_eq!(handle.value(), None);
        assert!(!handle.is_resolved());
        assert!(!handle.is_closed());
    }

    #[test]
    fn test_late_listener_sees_value() {
        let handle = Subscribable::resolved_with("done".to_string());
        let late = handle.clone();
        assert_eq!(late.value().as_deref(), Some("done"));
        assert!(late.is_resolved());
    }

    #[tokio::test]
    async fn test_all_listeners_wake_on_send() {
        let (publisher, handle) = Subscribable::pending();
        let waiters: Vec<_> = (0..4)
            .map(|_| {
                let listener = handle.clone();
                tokio::spawn(async move { listener.resolved().await })
            })
            .collect();

        tokio::time::sleep(Duration::from_millis(10)).await;
        publisher.send(42u64);

        for waiter in waiters {
            assert_eq!(waiter.await.unwrap(), Some(42));
        }
    }

    #[tokio::test]
    async fn test_dropped_publisher_closes_without_value() {
        let (publisher, handle) = Subscribable::<u64>::pending();
        drop(publisher);

        assert!(handle.is_closed());
        assert!(!handle.is_resolved());
        assert_eq!(handle.resolved().await, None);
    }

    #[tokio::test]
    async fn test_value_survives_publisher_drop() {
        let (publisher, handle) = Subscribable::pending();
        publisher.send(1u8);

        assert!(handle.is_closed());
        assert_eq!(handle.resolved().await, Some(1));
    }

    #[test]
    fn test_publisher_notices_abandoned_handles() {
        let (publisher, handle) = Subscribable::<u8>::pending();
        let listener = handle.clone();
        drop(handle);
        assert!(!publisher.is_abandoned());
        drop(listener);
        assert!(publisher.is_abandoned());
    }
}
