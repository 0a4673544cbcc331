use std::ffi::c_int;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

use nix::sys::signal::{SigHandler, Signal};

use crate::error::{BackupError, Result};
use crate::signal::guard::SignalGuard;

pub const TERMINATION_SIGNALS: [Signal; 3] = [Signal::SIGTERM, Signal::SIGHUP, Signal::SIGINT];

static PENDING: AtomicI32 = AtomicI32::new(0);
static MASK_DEPTH: AtomicUsize = AtomicUsize::new(0);

extern "C" fn record_signal(signum: c_int) {
    PENDING.store(signum, Ordering::SeqCst);
}

pub fn install() -> Result<SignalGuard> {
    PENDING.store(0, Ordering::SeqCst);
    Ok(SignalGuard::enter(
        SigHandler::Handler(record_signal),
        TERMINATION_SIGNALS,
    )?)
}

#[must_use = "dropping the mask lets termination signals through again"]
pub struct Mask {
    _guard: SignalGuard,
}

impl Drop for Mask {
    fn drop(&mut self) {
        MASK_DEPTH.fetch_sub(1, Ordering::SeqCst);
    }
}

pub fn mask() -> Result<Mask> {
    let guard = SignalGuard::ignore(TERMINATION_SIGNALS)?;
    MASK_DEPTH.fetch_add(1, Ordering::SeqCst);
    Ok(Mask { _guard: guard })
}

pub fn checkpoint() -> Result<()> {
    match PENDING.swap(0, Ordering::SeqCst) {
        0 => Ok(()),
        signum => Err(BackupError::Interrupted(signum)),
    }
}

/// Signal recorded since the last checkpoint, left in place for it. Always
/// `None` while a mask is held, so masked work is never cut short.
pub fn pending() -> Option<i32> {
    if MASK_DEPTH.load(Ordering::SeqCst) > 0 {
        return None;
    }
    match PENDING.load(Ordering::SeqCst) {
        0 => None,
        signum => Some(signum),
    }
}

pub fn guarded<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    let _mask = mask()?;
    f()
}

// Fields drop in declaration order: the whole-run mask goes before the bridge.
pub struct RunSignals {
    _quiet: Option<Mask>,
    _bridge: SignalGuard,
}

pub fn protect_run(no_interruptions: bool) -> Result<RunSignals> {
    let bridge = install()?;
    let quiet = if no_interruptions { Some(mask()?) } else { None };
    Ok(RunSignals {
        _quiet: quiet,
        _bridge: bridge,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::guard::current_handler;
    use crate::util::testing::process_lock;
    use nix::sys::signal::raise;

    #[test]
    fn signal_outside_mask_interrupts_at_checkpoint() {
        let _lock = process_lock();
        let _bridge = install().unwrap();
        checkpoint().unwrap();
        raise(Signal::SIGTERM).unwrap();
        assert_eq!(pending(), Some(Signal::SIGTERM as i32));
        match checkpoint() {
            Err(BackupError::Interrupted(signum)) => assert_eq!(signum, Signal::SIGTERM as i32),
            other => panic!("expected interruption, got {:?}", other),
        }
        assert_eq!(pending(), None);
        checkpoint().unwrap();
    }

    #[test]
    fn signal_inside_mask_is_dropped() {
        let _lock = process_lock();
        let _bridge = install().unwrap();
        let result = guarded(|| {
            raise(Signal::SIGINT).map_err(BackupError::from)?;
            checkpoint()?;
            Ok(7)
        });
        assert_eq!(result.unwrap(), 7);
        checkpoint().unwrap();
    }

    #[test]
    fn mask_restores_bridge_handler() {
        let _lock = process_lock();
        let _bridge = install().unwrap();
        {
            let _mask = mask().unwrap();
        }
        raise(Signal::SIGHUP).unwrap();
        assert!(matches!(checkpoint(), Err(BackupError::Interrupted(_))));
    }

    #[test]
    fn earlier_signal_is_hidden_while_masked() {
        let _lock = process_lock();
        let _bridge = install().unwrap();
        raise(Signal::SIGTERM).unwrap();
        {
            let _mask = mask().unwrap();
            assert_eq!(pending(), None);
        }
        assert_eq!(pending(), Some(Signal::SIGTERM as i32));
        assert!(checkpoint().is_err());
    }

    #[test]
    fn whole_run_mask_survives_nested_masks() {
        let _lock = process_lock();
        {
            let _signals = protect_run(true).unwrap();
            assert_eq!(current_handler(Signal::SIGTERM).unwrap(), SigHandler::SigIgn);
            guarded(|| Ok(())).unwrap();
            assert_eq!(current_handler(Signal::SIGTERM).unwrap(), SigHandler::SigIgn);
            raise(Signal::SIGTERM).unwrap();
            assert_eq!(pending(), None);
            checkpoint().unwrap();
        }
        let _bridge = install().unwrap();
        raise(Signal::SIGINT).unwrap();
        assert_eq!(pending(), Some(Signal::SIGINT as i32));
        checkpoint().unwrap_err();
    }

    #[test]
    fn interruptible_run_installs_bridge_only() {
        let _lock = process_lock();
        let _signals = protect_run(false).unwrap();
        assert!(matches!(
            current_handler(Signal::SIGHUP).unwrap(),
            SigHandler::Handler(_)
        ));
        raise(Signal::SIGHUP).unwrap();
        assert_eq!(pending(), Some(Signal::SIGHUP as i32));
        checkpoint().unwrap_err();
    }
}
