//! Ordering by editor-assigned rank

use crate::catalog::types::Category;

/// Something with an optional numeric rank
pub trait Ranked {
    fn rank(&self) -> Option<f64>;
}

impl Ranked for Category {
    fn rank(&self) -> Option<f64> {
        Some(self.order)
    }
}

/// Sort ascending by rank, treating a missing rank as 0
///
/// Items of equal rank keep their input order. The input is not modified.
pub fn order_by_rank<T: Ranked + Clone>(items: &[T]) -> Vec<T> {
    let mut ordered = items.to_vec();
    ordered.sort_by(|a, b| a.rank().unwrap_or(0.0).total_cmp(&b.rank().unwrap_or(0.0)));
    ordered
}
