//! Per-field-kind decode timing, compiled in with the `decode_profile` feature.
//!
//! Every decoded node adds one call and its elapsed wall time to a table owned by the
//! calling thread, keyed by [`FieldKind`]. Group and Repeated entries are inclusive of
//! their children. Without the feature the entry points still exist, record nothing and
//! report an empty table.

use crate::field::FieldKind;
use std::collections::HashMap;

/// Accumulated cost of one field kind on the current thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindProfile {
    pub calls: u64,
    pub nanos: u64,
}

impl KindProfile {
    pub fn mean_nanos(&self) -> u64 {
        self.nanos.checked_div(self.calls).unwrap_or(0)
    }
}

#[cfg(feature = "decode_profile")]
mod table {
    use super::KindProfile;
    use crate::field::FieldKind;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::time::Instant;

    thread_local! {
        static KINDS: RefCell<HashMap<FieldKind, KindProfile>> = RefCell::new(HashMap::new());
    }

    pub(crate) fn clear() {
        KINDS.with(|t| t.borrow_mut().clear());
    }

    pub(crate) fn snapshot() -> HashMap<FieldKind, KindProfile> {
        KINDS.with(|t| t.borrow().clone())
    }

    /// Times one node decode; the entry is updated when the guard goes out of scope,
    /// whether the rule succeeded or not.
    pub(crate) struct ProfileGuard {
        kind: FieldKind,
        started: Instant,
    }

    impl ProfileGuard {
        pub(crate) fn new(kind: FieldKind) -> Self {
            ProfileGuard { kind, started: Instant::now() }
        }
    }

    impl Drop for ProfileGuard {
        fn drop(&mut self) {
            let nanos = u64::try_from(self.started.elapsed().as_nanos()).unwrap_or(u64::MAX);
            KINDS.with(|t| {
                let mut table = t.borrow_mut();
                let entry = table.entry(self.kind).or_default();
                entry.calls += 1;
                entry.nanos = entry.nanos.saturating_add(nanos);
            });
        }
    }
}

#[cfg(feature = "decode_profile")]
pub(crate) use table::ProfileGuard;

/// Clears the calling thread's table.
pub fn reset_decode_profile() {
    #[cfg(feature = "decode_profile")]
    table::clear();
}

/// Copy of the calling thread's table. Empty unless the `decode_profile` feature is on.
pub fn get_decode_profile() -> HashMap<FieldKind, KindProfile> {
    #[cfg(feature = "decode_profile")]
    let kinds = table::snapshot();
    #[cfg(not(feature = "decode_profile"))]
    let kinds = HashMap::new();
    kinds
}
