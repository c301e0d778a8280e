#![cfg_attr(not(test), no_std)]

#[cfg(feature = "HALT")]
pub use panic_halt as _;
#[cfg(feature = "RTT")]
pub use panic_probe as _;
#[cfg(feature = "QEMU")]
pub use panic_semihosting as _;

pub mod dbg;
pub mod error;
pub mod gate;

pub use error::{GateErr, Result};
pub use gate::{
    allocate_func_gate, allocate_method_gate, allocate_void_gate, free_gate,
    Binding, Gate, GatePool, VoidFn, DEFAULT_CAPACITY, GATES, MAX_CAPACITY,
};
