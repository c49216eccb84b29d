use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::VecDeque;

use crate::constants::CHART_CAPACITY;

/// Rolling window of (label, price) points, oldest first.
///
/// Labels and prices are stored as pairs, so they can never drift apart.
#[derive(Clone, Debug)]
pub struct ChartBuffer {
    points: VecDeque<(String, Decimal)>,
    capacity: usize,
}

impl Default for ChartBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartBuffer {
    pub fn new() -> Self {
        Self::with_capacity(CHART_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a point, dropping the oldest once the window is full.
    pub fn push(&mut self, label: impl Into<String>, price: Decimal) {
        self.points.push_back((label.into(), price));
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|(label, _)| label.as_str()).collect()
    }

    pub fn prices(&self) -> Vec<Decimal> {
        self.points.iter().map(|(_, price)| *price).collect()
    }

    /// `(index, price)` pairs for plotting.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, (_, price))| (i as f64, price.to_f64().unwrap_or_default()))
            .collect()
    }

    /// Lowest and highest price in the window.
    pub fn bounds(&self) -> Option<(Decimal, Decimal)> {
        let mut prices = self.points.iter().map(|(_, price)| *price);
        let first = prices.next()?;
        Some(prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}
