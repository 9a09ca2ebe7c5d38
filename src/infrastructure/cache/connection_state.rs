//! Connectivity state shared between the cache client and its reconnect task.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Where the cache client stands with its backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// A handshake is in flight.
    Connecting,
    /// Commands may be issued.
    Ready,
    /// The last command or handshake failed; a reconnect is pending.
    Degraded,
}

impl ConnectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Ready => "ready",
            Self::Degraded => "degraded",
        }
    }

    fn to_u8(self) -> u8 {
        match self {
            Self::Connecting => 0,
            Self::Ready => 1,
            Self::Degraded => 2,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Connecting,
            1 => Self::Ready,
            _ => Self::Degraded,
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lock-free cell holding a [`ConnectionState`]; read-many, write-rare.
#[derive(Debug)]
pub struct StateCell(AtomicU8);

impl StateCell {
    pub fn new(initial: ConnectionState) -> Self {
        Self(AtomicU8::new(initial.to_u8()))
    }

    pub fn get(&self) -> ConnectionState {
        ConnectionState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Stores `next` and returns the previous state.
    pub fn set(&self, next: ConnectionState) -> ConnectionState {
        ConnectionState::from_u8(self.0.swap(next.to_u8(), Ordering::AcqRel))
    }

    /// Moves `Ready -> Degraded`. Returns `true` if this call made the transition.
    pub fn degrade_if_ready(&self) -> bool {
        self.0
            .compare_exchange(
                ConnectionState::Ready.to_u8(),
                ConnectionState::Degraded.to_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    pub fn is_ready(&self) -> bool {
        self.get() == ConnectionState::Ready
    }
}
