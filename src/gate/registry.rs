use super::{slot::Slot, Gate};

/// Upper bound on the capacity of a single pool.
pub const MAX_CAPACITY: usize = 64;

/// Ties a family of trampolines to the slot table of one pool.
///
/// Implemented by [`gate_pool!`](crate::gate_pool); each pool gets its own
/// zero-sized tag, so trampolines of different pools are distinct functions.
pub trait PoolTag: 'static {
    fn slots() -> &'static [Slot];
}

#[inline(never)]
extern "C" fn trampoline<P: PoolTag, const I: usize>() {
    if let Some(slot) = P::slots().get(I) {
        slot.fire();
    }
}

macro_rules! trampolines {
    ($tag:ty; $($idx:literal)*) => {
        [$(trampoline::<$tag, $idx> as Gate),*]
    };
}

/// Addresses of the first `N` trampolines of pool `P`, in slot order.
pub const fn registry<P: PoolTag, const N: usize>() -> [Gate; N] {
    assert!(N > 0 && N <= MAX_CAPACITY, "gate pool capacity out of range");

    let all: [Gate; MAX_CAPACITY] = trampolines!(P;
        0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15
        16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31
        32 33 34 35 36 37 38 39 40 41 42 43 44 45 46 47
        48 49 50 51 52 53 54 55 56 57 58 59 60 61 62 63
    );

    let mut gates = [all[0]; N];
    let mut i = 1;
    while i < N {
        gates[i] = all[i];
        i += 1;
    }
    gates
}
