use core::{
    ffi::c_void,
    ptr,
    sync::atomic::{AtomicBool, AtomicPtr, Ordering},
};

use super::binding::{Binding, Thunk};

/// One entry of a pool's slot table.
///
/// `thunk` doubles as the allocation marker: the slot is bound iff it is
/// non-null. `claimed` is taken before the binding is written so racing
/// allocators never share a slot.
pub struct Slot {
    claimed: AtomicBool,
    thunk: AtomicPtr<()>,
    func: AtomicPtr<()>,
    arg: AtomicPtr<c_void>,
}

impl Slot {
    pub const fn new() -> Self {
        Self {
            claimed: AtomicBool::new(false),
            thunk: AtomicPtr::new(ptr::null_mut()),
            func: AtomicPtr::new(ptr::null_mut()),
            arg: AtomicPtr::new(ptr::null_mut()),
        }
    }

    pub fn is_bound(&self) -> bool {
        !self.thunk.load(Ordering::Acquire).is_null()
    }

    pub(super) fn try_claim(&self) -> bool {
        self.claimed
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    pub(super) fn bind(&self, binding: Binding) {
        let (thunk, func, arg) = binding.into_parts();
        self.func.store(func.cast_mut(), Ordering::Relaxed);
        self.arg.store(arg, Ordering::Relaxed);
        self.thunk.store(thunk as *mut (), Ordering::Release);
    }

    /// Unbinds the slot. A slot with nothing bound is left alone, so a stale
    /// free cannot release a claim another allocator is still filling in.
    pub(super) fn clear(&self) {
        let thunk = self.thunk.swap(ptr::null_mut(), Ordering::AcqRel);
        if thunk.is_null() {
            return;
        }
        self.func.store(ptr::null_mut(), Ordering::Relaxed);
        self.arg.store(ptr::null_mut(), Ordering::Relaxed);
        self.claimed.store(false, Ordering::Release);
    }

    /// Forwards to the bound function, if any. Runs in interrupt context.
    #[inline(always)]
    pub(super) fn fire(&self) {
        let thunk = self.thunk.load(Ordering::Acquire);
        if thunk.is_null() {
            return;
        }
        let func = self.func.load(Ordering::Relaxed);
        if func.is_null() {
            return;
        }
        let arg = self.arg.load(Ordering::Relaxed);
        // SAFETY: only `bind` stores into `thunk`, and it stores a `Thunk`.
        let thunk = unsafe { core::mem::transmute::<*mut (), Thunk>(thunk) };
        // SAFETY: `func` and `arg` were stored alongside `thunk` by the same
        // `Binding`, whose constructor checked they match the thunk.
        unsafe { thunk(func, arg) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::AtomicUsize;

    static HITS: AtomicUsize = AtomicUsize::new(0);

    fn hit(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn empty_slot_fires_nothing() {
        let slot = Slot::new();
        assert!(!slot.is_bound());
        slot.fire();
    }

    #[test]
    fn claim_is_exclusive_until_cleared() {
        let slot = Slot::new();
        assert!(slot.try_claim());
        assert!(!slot.try_claim());
        slot.bind(Binding::func(hit, &HITS));
        slot.clear();
        assert!(slot.try_claim());
    }

    #[test]
    fn stale_clear_keeps_pending_claim() {
        let slot = Slot::new();
        assert!(slot.try_claim());

        // Free of an old gate lands between claim and bind.
        slot.clear();
        assert!(!slot.try_claim());

        slot.bind(Binding::func(hit, &HITS));
        assert!(slot.is_bound());
        slot.clear();
        assert!(!slot.is_bound());
        assert!(slot.try_claim());
    }

    #[test]
    fn cleared_slot_stops_forwarding() {
        let slot = Slot::new();
        assert!(slot.try_claim());
        slot.bind(Binding::func(hit, &HITS));
        assert!(slot.is_bound());

        slot.fire();
        assert_eq!(HITS.load(Ordering::SeqCst), 1);

        slot.clear();
        assert!(!slot.is_bound());
        slot.fire();
        assert_eq!(HITS.load(Ordering::SeqCst), 1);
    }
}
