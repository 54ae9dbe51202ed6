//! Ctrl+C routing. At the REPL prompt an interrupt ends the session;
//! anywhere else it is recorded and the current step polls for it.

use std::sync::{
    atomic::{AtomicBool, AtomicU8, Ordering},
    Arc,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Phase {
    Idle = 0,
    AwaitingModel = 1,
    Confirming = 2,
    /// A child process owns the terminal and gets SIGINT itself.
    Executing = 3,
    Input = 4,
}

impl Phase {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => Phase::AwaitingModel,
            2 => Phase::Confirming,
            3 => Phase::Executing,
            4 => Phase::Input,
            _ => Phase::Idle,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    phase: AtomicU8,
    pending: AtomicBool,
}

#[derive(Debug, Clone, Default)]
pub struct Interrupts {
    inner: Arc<Inner>,
}

impl Interrupts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the process-wide Ctrl+C handler. `on_idle` runs when the
    /// interrupt arrives while no request is in flight.
    pub fn install<F>(&self, on_idle: F) -> Result<(), ctrlc::Error>
    where
        F: Fn() + Send + 'static,
    {
        let interrupts = self.clone();
        ctrlc::set_handler(move || {
            if !interrupts.signal() {
                on_idle();
            }
        })
    }

    /// Record an interrupt. Returns `false` when the session is idle and
    /// nothing was recorded.
    pub fn signal(&self) -> bool {
        let phase = self.phase();
        if phase == Phase::Idle {
            return false;
        }
        tracing::debug!(?phase, "interrupt received");
        self.inner.pending.store(true, Ordering::SeqCst);
        true
    }

    pub fn take(&self) -> bool {
        self.inner.pending.swap(false, Ordering::SeqCst)
    }

    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.inner.phase.load(Ordering::SeqCst))
    }

    /// Enter `phase` until the guard drops. Stale interrupts from an earlier
    /// phase are discarded.
    pub fn enter(&self, phase: Phase) -> PhaseGuard {
        self.inner.pending.store(false, Ordering::SeqCst);
        self.inner.phase.store(phase as u8, Ordering::SeqCst);
        PhaseGuard {
            interrupts: self.clone(),
        }
    }
}

#[must_use = "the phase ends when the guard is dropped"]
#[derive(Debug)]
pub struct PhaseGuard {
    interrupts: Interrupts,
}

impl Drop for PhaseGuard {
    fn drop(&mut self) {
        self.interrupts
            .inner
            .phase
            .store(Phase::Idle as u8, Ordering::SeqCst);
    }
}
