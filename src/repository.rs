use crate::types::Order;
use std::collections::BTreeSet;

/// The validated orders of the current upload.
///
/// Only ever replaced as a whole; every derived view is recomputed on call.
#[derive(Debug, Clone, Default)]
pub struct OrderRepository {
    orders: Vec<Order>,
}

impl OrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current collection. Nothing from a previous load survives.
    pub fn load(&mut self, orders: Vec<Order>) {
        self.orders = orders;
    }

    pub fn clear(&mut self) {
        self.orders.clear();
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Distinct years, most recent first.
    pub fn years(&self) -> Vec<i32> {
        let mut years = self.year_axis();
        years.reverse();
        years
    }

    /// Distinct years in ascending order; the x axis of the comparison chart.
    pub fn year_axis(&self) -> Vec<i32> {
        let set: BTreeSet<i32> = self.orders.iter().map(|o| o.year).collect();
        set.into_iter().collect()
    }

    /// Distinct location keys, sorted on the whole `"city, state"` string.
    pub fn locations(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.orders.iter().map(|o| o.location_key.as_str()).collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Initial comparison pair: the first two locations, or the only one
    /// twice. `None` disables the comparison.
    pub fn default_pair(&self) -> Option<(String, String)> {
        let locations = self.locations();
        match locations.as_slice() {
            [] => None,
            [only] => Some((only.clone(), only.clone())),
            [first, second, ..] => Some((first.clone(), second.clone())),
        }
    }
}
