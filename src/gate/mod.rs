//! Zero-argument gates that forward to a bound (function, argument) pair.
//!
//! Interrupt attach APIs that only accept `extern "C" fn()` can be handed a
//! [`Gate`]; when the interrupt fires the gate calls whatever is bound to it.
//! Gates come from a fixed pool of generated trampolines, so no allocation
//! happens and the pool can run out.
//!
//! Protocol for callers: attach the gate only after allocation succeeded, and
//! detach it from the interrupt source before freeing it.

use core::ffi::c_void;

pub use binding::{Binding, VoidFn};
pub use pool::GatePool;
pub use registry::{registry, PoolTag, MAX_CAPACITY};
pub use slot::Slot;

mod binding;
mod pool;
mod registry;
mod slot;

/// Address of a trampoline, suitable as a raw interrupt handler.
pub type Gate = extern "C" fn();

/// Capacity of [`GATES`].
pub const DEFAULT_CAPACITY: usize = 30;

/// Declares a static [`GatePool`] with its own trampolines.
///
/// ```ignore
/// irq_gate::gate_pool! {
///     /// Gates for the EXTI lines.
///     pub static EXTI_GATES: 16;
/// }
/// ```
#[macro_export]
macro_rules! gate_pool {
    ($(#[$attr:meta])* $vis:vis static $name:ident: $cap:expr;) => {
        $(#[$attr])*
        $vis static $name: $crate::gate::GatePool<{ $cap }> = {
            struct Tag;

            impl $crate::gate::PoolTag for Tag {
                fn slots() -> &'static [$crate::gate::Slot] {
                    $name.slots()
                }
            }

            unsafe {
                $crate::gate::GatePool::from_registry(
                    $crate::gate::registry::<Tag, { $cap }>(),
                )
            }
        };
    };
}

crate::gate_pool! {
    /// Process-wide pool behind the free-function API.
    pub static GATES: DEFAULT_CAPACITY;
}

/// Binds `func(arg)` to a gate of [`GATES`]. `None` when the pool is full.
///
/// # Safety
/// See [`Binding::void`].
pub unsafe fn allocate_void_gate(func: VoidFn, arg: *mut c_void) -> Option<Gate> {
    GATES.allocate_void(func, arg)
}

/// Binds a function taking `&T` to a gate of [`GATES`].
///
/// The argument is shared and `'static`. Handlers that mutate their target,
/// or whose target is not `'static`, go through [`allocate_method_gate`] with
/// a `fn(&mut T)` instead.
pub fn allocate_func_gate<T: Sync>(func: fn(&T), arg: &'static T) -> Option<Gate> {
    GATES.allocate_func(func, arg)
}

/// Binds a `&mut self` method and its receiver to a gate of [`GATES`].
///
/// # Safety
/// See [`Binding::method`].
pub unsafe fn allocate_method_gate<T>(
    method: fn(&mut T),
    receiver: *mut T,
) -> Option<Gate> {
    GATES.allocate_method(method, receiver)
}

pub fn free_gate(gate: Option<Gate>) {
    GATES.free(gate)
}
