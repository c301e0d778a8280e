use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateErr {
    /// Every slot of the pool is bound.
    PoolExhausted = -1,
    /// The gate was not produced by this pool.
    UnknownGate = -2,
}

pub type Result<T> = core::result::Result<T, GateErr>;

impl fmt::Display for GateErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateErr::PoolExhausted => f.write_str("gate pool exhausted"),
            GateErr::UnknownGate => f.write_str("gate not owned by pool"),
        }
    }
}
