//! # Forks and the acquisition protocol.
//!
//! Forks form a ring: philosopher `id` (1-based) has its left fork at index `id - 1`
//! and its right fork at index `id % n`. Each fork is an exclusive async lock.
//!
//! ## Deadlock avoidance
//! Odd philosophers take left then right, even philosophers right then left.
//! Around the ring at least one pair of neighbours competes for the same *first*
//! fork, so the circular wait cannot close.
//!
//! ```text
//!             fork0
//!        P1 ─────── P5          P1 (odd):  fork0 → fork1
//!   fork1 │           │ fork4   P2 (even): fork2 → fork1
//!        P2           P4        ...
//!          \ fork2   / fork3
//!              P3
//! ```
//!
//! ## Rules
//! - Acquisition waits are cancellable by the table's halt token.
//! - Forks are released in reverse acquisition order.
//! - A single philosopher owns one fork as both left and right; it must never try
//!   to acquire "both" (it would wait on itself).

use tokio::sync::{Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;

/// Exclusive fork lock.
#[derive(Debug)]
pub struct Fork {
    index: usize,
    lock: Mutex<()>,
}

/// Proof that a fork is held; releases it on drop.
#[derive(Debug)]
pub struct ForkGuard<'a> {
    index: usize,
    _guard: MutexGuard<'a, ()>,
}

impl ForkGuard<'_> {
    /// Ring index of the held fork.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Fork {
    /// Creates a free fork at `index`.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            lock: Mutex::new(()),
        }
    }

    /// Ring index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Waits for the fork; returns `None` if `halt` fires first.
    pub async fn acquire(&self, halt: &CancellationToken) -> Option<ForkGuard<'_>> {
        if halt.is_cancelled() {
            return None;
        }
        tokio::select! {
            guard = self.lock.lock() => Some(ForkGuard { index: self.index, _guard: guard }),
            _ = halt.cancelled() => None,
        }
    }

    /// Takes the fork only if it is free right now.
    pub fn try_acquire(&self) -> Option<ForkGuard<'_>> {
        self.lock.try_lock().ok().map(|guard| ForkGuard {
            index: self.index,
            _guard: guard,
        })
    }
}

/// Which fork a philosopher reaches for first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Left fork, then right fork (odd ids).
    LeftFirst,
    /// Right fork, then left fork (even ids).
    RightFirst,
}

impl Order {
    /// Order used by philosopher `id`.
    pub fn for_philosopher(id: usize) -> Self {
        if id % 2 == 0 {
            Order::RightFirst
        } else {
            Order::LeftFirst
        }
    }
}

/// Both forks of one philosopher, held in acquisition order.
#[derive(Debug)]
pub struct HeldForks<'a> {
    first: ForkGuard<'a>,
    second: ForkGuard<'a>,
}

impl HeldForks<'_> {
    /// Indices of the held forks in acquisition order.
    pub fn indices(&self) -> (usize, usize) {
        (self.first.index(), self.second.index())
    }

    /// Releases both forks in reverse acquisition order.
    pub fn release(self) {
        let Self { first, second } = self;
        drop(second);
        drop(first);
    }
}

/// Acquires `left` and `right` in `order`.
///
/// `on_taken` runs right after each single acquisition (two calls on success).
/// Returns `None` if `halt` fires while waiting; a fork already taken is released.
pub async fn acquire_both<'a>(
    left: &'a Fork,
    right: &'a Fork,
    order: Order,
    halt: &CancellationToken,
    mut on_taken: impl FnMut(&Fork),
) -> Option<HeldForks<'a>> {
    let (a, b) = match order {
        Order::LeftFirst => (left, right),
        Order::RightFirst => (right, left),
    };

    let first = a.acquire(halt).await?;
    on_taken(a);
    let second = b.acquire(halt).await?;
    on_taken(b);

    Some(HeldForks { first, second })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn parity_decides_order() {
        assert_eq!(Order::for_philosopher(1), Order::LeftFirst);
        assert_eq!(Order::for_philosopher(2), Order::RightFirst);
        assert_eq!(Order::for_philosopher(5), Order::LeftFirst);
    }

    #[tokio::test]
    async fn acquires_in_order_and_reports_each_fork() {
        let left = Fork::new(1);
        let right = Fork::new(2);
        let halt = CancellationToken::new();
        let mut taken = Vec::new();

        let held = acquire_both(&left, &right, Order::RightFirst, &halt, |f| {
            taken.push(f.index())
        })
        .await
        .unwrap();

        assert_eq!(taken, vec![2, 1]);
        assert_eq!(held.indices(), (2, 1));
        assert!(left.try_acquire().is_none());
        assert!(right.try_acquire().is_none());

        held.release();
        assert!(left.try_acquire().is_some());
        assert!(right.try_acquire().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn halt_releases_the_first_fork() {
        let left = Fork::new(0);
        let right = Fork::new(1);
        let halt = CancellationToken::new();

        let blocker = right.try_acquire().unwrap();
        let canceller = {
            let halt = halt.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                halt.cancel();
            })
        };

        let mut taken = Vec::new();
        let held = acquire_both(&left, &right, Order::LeftFirst, &halt, |f| {
            taken.push(f.index())
        })
        .await;

        assert!(held.is_none());
        assert_eq!(taken, vec![0]);
        assert!(left.try_acquire().is_some());
        drop(blocker);
        canceller.await.unwrap();
    }

    #[tokio::test]
    async fn halted_token_never_acquires() {
        let fork = Fork::new(0);
        let halt = CancellationToken::new();
        halt.cancel();
        assert!(fork.acquire(&halt).await.is_none());
        assert!(fork.try_acquire().is_some());
    }
}
