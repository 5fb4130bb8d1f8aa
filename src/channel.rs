//! Bounded queue between the configuration layer and the renderer.
//!
//! Built on `critical-section` and `heapless::Deque`, so senders may live in
//! interrupt handlers or other tasks while the renderer drains the queue
//! from its control loop without ever blocking.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Value handed back when the channel is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// Error returned when trying to receive from an empty channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Fixed-capacity multi-producer channel guarded by a critical section
pub struct Channel<T, const SIZE: usize> {
    queue: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    /// Create an empty channel; usable in a `static`
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Sending half; any number of senders may coexist
    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    /// Receiving half, owned by the renderer
    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    /// Queue a value behind the ones already waiting
    ///
    /// Returns `Err(TrySendError(value))` when all `SIZE` slots are taken.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        critical_section::with(|cs| {
            self.queue
                .borrow(cs)
                .borrow_mut()
                .push_back(value)
                .map_err(TrySendError)
        })
    }

    /// Take the oldest value
    ///
    /// Returns `Err(TryReceiveError)` if nothing is queued.
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        critical_section::with(|cs| {
            self.queue
                .borrow(cs)
                .borrow_mut()
                .pop_front()
                .ok_or(TryReceiveError)
        })
    }

    /// Number of queued values
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.queue.borrow(cs).borrow().len())
    }

    /// `true` when nothing is queued
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending handle for a [`Channel`]
///
/// Just a shared reference, so it can be copied into every task or
/// interrupt handler that produces intents.
#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    /// Queue a value without blocking
    ///
    /// Returns `Err(TrySendError(value))` if the channel is full, handing the
    /// value back to the caller.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(value)
    }
}

/// Receiving handle for a [`Channel`]
///
/// A copyable reference like [`Sender`]. Several receivers would compete for
/// values, so the renderer keeps the only one.
#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Receiver<'_, T, SIZE> {
    /// Take the oldest queued value
    ///
    /// Returns `Err(TryReceiveError)` if the channel is empty.
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        self.channel.try_receive()
    }

    /// Receive at most `SIZE` values queued so far
    ///
    /// Bounding the drain keeps a chatty sender from starving the frame.
    pub fn drain(&self) -> impl Iterator<Item = T> + '_ {
        (0..SIZE).map_while(|_| self.try_receive().ok())
    }
}
