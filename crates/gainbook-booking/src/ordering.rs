//! Acquisition ordering.

use gainbook_core::{Acquisition, Method};

/// Reorder acquisitions for the given method.
///
/// - `Fifo` keeps the input order, which is assumed to be chronological.
/// - `Hifo` sorts by total lot cost basis, highest first. The sort is stable
///   so lots with equal cost basis keep their input order.
///
/// Note that `Hifo` compares whole-lot cost basis, not cost per unit: a large
/// cheap lot can outrank a small expensive one. Callers wanting per-unit
/// ordering need lots of equal size.
#[must_use]
pub fn order_acquisitions(mut acquisitions: Vec<Acquisition>, method: Method) -> Vec<Acquisition> {
    match method {
        Method::Fifo => {}
        Method::Hifo => acquisitions.sort_by(|a, b| b.cost_basis.cmp(&a.cost_basis)),
    }
    acquisitions
}
