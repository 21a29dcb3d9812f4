//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler of an operation.
///
/// Commands, queries and infrastructure backends all speak this single
/// shape: a service is nothing more than the set of operations its
/// backends can execute.
pub trait Handler<Op = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided operation.
    fn execute(
        &self,
        op: Op,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
