//! Debug output routed to whichever probe backend is enabled.
//!
//! With neither `RTT` nor `QEMU` the macros still type-check their arguments
//! but emit nothing.

#[doc(hidden)]
#[macro_export]
macro_rules! __dbg_init {
    () => {
        #[cfg(feature = "RTT")]
        rtt_target::rtt_init_print!();
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __dbg_println {
    ($($arg:tt)*) => {
        #[cfg(feature = "RTT")]
        rtt_target::rprintln!($($arg)*);

        #[cfg(feature = "QEMU")]
        cortex_m_semihosting::hprintln!($($arg)*);

        #[cfg(not(any(feature = "RTT", feature = "QEMU")))]
        let _ = ::core::format_args!($($arg)*);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __dbg_exit {
    () => {
        #[cfg(feature = "QEMU")]
        cortex_m_semihosting::debug::exit(
            cortex_m_semihosting::debug::EXIT_SUCCESS,
        );
    };
}

pub use crate::{
    __dbg_exit as exit, __dbg_init as init, __dbg_println as println,
};
