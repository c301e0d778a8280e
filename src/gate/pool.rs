use core::ffi::c_void;

use super::{binding::Binding, slot::Slot, Gate, VoidFn};
use crate::{
    dbg,
    error::{GateErr, Result},
};

const FREE: Slot = Slot::new();

/// A fixed set of `N` gates and the slots they forward through.
///
/// Declare pools with [`gate_pool!`](crate::gate_pool); the trampolines of a
/// pool are generated against its static, so a pool cannot be built at
/// runtime.
pub struct GatePool<const N: usize> {
    slots: [Slot; N],
    gates: [Gate; N],
}

impl<const N: usize> GatePool<N> {
    /// # Safety
    /// `gates` must be the registry generated for this very pool, so that
    /// `gates[i]` forwards through `slots[i]`.
    #[doc(hidden)]
    pub const unsafe fn from_registry(gates: [Gate; N]) -> Self {
        Self {
            slots: [FREE; N],
            gates,
        }
    }

    #[doc(hidden)]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of slots currently bound.
    pub fn allocated(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_bound()).count()
    }

    /// Binds `binding` to the lowest free slot and returns its gate.
    pub fn bind(&self, binding: Binding) -> Result<Gate> {
        for (idx, slot) in self.slots.iter().enumerate() {
            if slot.try_claim() {
                slot.bind(binding);
                dbg::println!("gate {} bound", idx);
                return Ok(self.gates[idx]);
            }
        }
        dbg::println!("gate pool exhausted ({} slots)", N);
        Err(GateErr::PoolExhausted)
    }

    /// Releases the slot behind `gate`.
    pub fn unbind(&self, gate: Gate) -> Result<()> {
        let idx = self.index_of(gate).ok_or(GateErr::UnknownGate)?;
        self.slots[idx].clear();
        dbg::println!("gate {} freed", idx);
        Ok(())
    }

    pub fn allocate(&self, binding: Binding) -> Option<Gate> {
        self.bind(binding).ok()
    }

    /// # Safety
    /// See [`Binding::void`].
    pub unsafe fn allocate_void(
        &self,
        func: VoidFn,
        arg: *mut c_void,
    ) -> Option<Gate> {
        self.allocate(Binding::void(func, arg))
    }

    /// Binds a function taking `&T` to a shared `'static` argument. For
    /// handlers that need `&mut T` or a non-static receiver, use
    /// [`allocate_method`](Self::allocate_method).
    pub fn allocate_func<T: Sync>(
        &self,
        func: fn(&T),
        arg: &'static T,
    ) -> Option<Gate> {
        self.allocate(Binding::func(func, arg))
    }

    /// # Safety
    /// See [`Binding::method`].
    pub unsafe fn allocate_method<T>(
        &self,
        method: fn(&mut T),
        receiver: *mut T,
    ) -> Option<Gate> {
        self.allocate(Binding::method(method, receiver))
    }

    /// Releases `gate`. `None` and gates from other pools are ignored.
    pub fn free(&self, gate: Option<Gate>) {
        if let Some(gate) = gate {
            self.unbind(gate).ok();
        }
    }

    pub fn index_of(&self, gate: Gate) -> Option<usize> {
        self.gates.iter().position(|g| *g as usize == gate as usize)
    }

    pub fn is_bound(&self, gate: Gate) -> bool {
        self.index_of(gate)
            .map_or(false, |idx| self.slots[idx].is_bound())
    }

    /// Snapshot of the gates bound right now, in slot order.
    pub fn bound_gates(&self) -> heapless::Vec<Gate, N> {
        let mut out = heapless::Vec::new();
        for (slot, gate) in self.slots.iter().zip(self.gates.iter()) {
            if slot.is_bound() {
                out.push(*gate).ok();
            }
        }
        out
    }
}
