//! Type-erased (function, argument) pairs.
//!
//! A [`Binding`] keeps the caller's function pointer in its original type and
//! pairs it with a dispatch thunk monomorphized for that type. The thunk is
//! the only code that turns the erased pointer back into a callable, and it
//! turns it back into exactly the type it came from.

use core::ffi::c_void;

/// Function bound through the untyped entry point.
pub type VoidFn = unsafe fn(*mut c_void);

pub(crate) type Thunk = unsafe fn(*const (), *mut c_void);

#[derive(Clone, Copy)]
pub struct Binding {
    thunk: Thunk,
    func: *const (),
    arg: *mut c_void,
}

unsafe fn call_void(func: *const (), arg: *mut c_void) {
    let func = core::mem::transmute::<*const (), VoidFn>(func);
    func(arg)
}

unsafe fn call_func<T>(func: *const (), arg: *mut c_void) {
    let func = core::mem::transmute::<*const (), fn(&T)>(func);
    func(&*arg.cast::<T>())
}

unsafe fn call_method<T>(func: *const (), arg: *mut c_void) {
    let method = core::mem::transmute::<*const (), fn(&mut T)>(func);
    method(&mut *arg.cast::<T>())
}

impl Binding {
    /// Binds `func` to an untyped argument.
    ///
    /// # Safety
    /// `func(arg)` must be sound to call from interrupt context for as long
    /// as the binding stays in a pool.
    pub unsafe fn void(func: VoidFn, arg: *mut c_void) -> Self {
        Self {
            thunk: call_void,
            func: func as *const (),
            arg,
        }
    }

    /// Binds a function taking a shared reference.
    pub fn func<T: Sync>(func: fn(&T), arg: &'static T) -> Self {
        Self {
            thunk: call_func::<T>,
            func: func as *const (),
            arg: (arg as *const T).cast_mut().cast(),
        }
    }

    /// Binds an argument-less `&mut self` method to its receiver.
    ///
    /// # Safety
    /// `receiver` must stay valid until the gate is freed, and nothing else
    /// may hold a reference to it while the gate can fire.
    pub unsafe fn method<T>(method: fn(&mut T), receiver: *mut T) -> Self {
        Self {
            thunk: call_method::<T>,
            func: method as *const (),
            arg: receiver.cast(),
        }
    }

    pub(crate) fn into_parts(self) -> (Thunk, *const (), *mut c_void) {
        (self.thunk, self.func, self.arg)
    }

    #[cfg(test)]
    unsafe fn invoke(&self) {
        (self.thunk)(self.func, self.arg)
    }
}
