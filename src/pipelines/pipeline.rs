//! Pipeline trait.
use crate::error::Error;

/// This trait is implemented for each Pipeline,
/// and is generic over the return type so that
/// a pipeline can return a report.
pub trait Pipeline<T> {
    fn run(&self) -> Result<T, Error>;
}
