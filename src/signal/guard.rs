use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

// Empty input means every catchable signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalSet(Vec<Signal>);

impl SignalSet {
    pub fn terminatable() -> Self {
        SignalSet(
            Signal::iterator()
                .filter(|s| !matches!(s, Signal::SIGKILL | Signal::SIGSTOP))
                .collect(),
        )
    }

    #[cfg(test)]
    pub(crate) fn from_raw(signum: i32) -> nix::Result<Self> {
        Signal::try_from(signum).map(SignalSet::from)
    }

    pub fn iter(&self) -> impl Iterator<Item = Signal> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, signal: Signal) -> bool {
        self.0.contains(&signal)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SignalSet {
    fn default() -> Self {
        SignalSet::terminatable()
    }
}

impl From<Signal> for SignalSet {
    fn from(signal: Signal) -> Self {
        SignalSet(vec![signal])
    }
}

impl From<Vec<Signal>> for SignalSet {
    fn from(signals: Vec<Signal>) -> Self {
        if signals.is_empty() {
            return SignalSet::terminatable();
        }
        let mut unique = Vec::with_capacity(signals.len());
        for signal in signals {
            if !unique.contains(&signal) {
                unique.push(signal);
            }
        }
        SignalSet(unique)
    }
}

impl From<&[Signal]> for SignalSet {
    fn from(signals: &[Signal]) -> Self {
        SignalSet::from(signals.to_vec())
    }
}

impl<const N: usize> From<[Signal; N]> for SignalSet {
    fn from(signals: [Signal; N]) -> Self {
        SignalSet::from(signals.to_vec())
    }
}

/// Prior dispositions are put back on drop, last installed first, so guards nest.
#[must_use = "dropping the guard restores the previous dispositions"]
pub struct SignalGuard {
    saved: Vec<(Signal, SigAction)>,
}

impl SignalGuard {
    pub fn enter(handler: SigHandler, signals: impl Into<SignalSet>) -> nix::Result<Self> {
        let action = SigAction::new(handler, SaFlags::SA_RESTART, SigSet::empty());
        let mut guard = SignalGuard { saved: Vec::new() };
        for signal in signals.into().iter() {
            // SAFETY: handlers passed in here only store to atomics.
            let prior = unsafe { sigaction(signal, &action) }?;
            guard.saved.push((signal, prior));
        }
        Ok(guard)
    }

    pub fn ignore(signals: impl Into<SignalSet>) -> nix::Result<Self> {
        SignalGuard::enter(SigHandler::SigIgn, signals)
    }
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        while let Some((signal, prior)) = self.saved.pop() {
            // SAFETY: reinstalls exactly what sigaction handed back on entry.
            if let Err(err) = unsafe { sigaction(signal, &prior) } {
                tracing::warn!("restore disposition of {}: {}", signal, err);
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn current_handler(signal: Signal) -> nix::Result<SigHandler> {
    let probe = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
    // SAFETY: the original action is reinstalled immediately.
    let current = unsafe { sigaction(signal, &probe) }?;
    unsafe { sigaction(signal, &current) }?;
    Ok(current.handler())
}
