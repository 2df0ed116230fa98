//! Order-book snapshot and top-level selection.
//!
//! Sizes are always stored as non-negative magnitudes. The only place a sign
//! flip happens is [`mirrored_depth`], which exists purely so a depth chart can
//! draw asks below the axis; its consumers must display `size.abs()`.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderBookLevel {
    pub price: f64,
    pub size: f64,
}

impl OrderBookLevel {
    pub fn new(price: f64, size: f64) -> Self {
        Self { price, size }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookSide {
    Bid,
    Ask,
}

/// How asks are ranked when picking the top levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AskRanking {
    /// Smallest resting size first.
    #[default]
    SmallestSize,
    /// Largest resting size first, same as bids.
    LargestSize,
}

/// Point-in-time view of the book. Bids descend by price, asks ascend by price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    pub bids: Vec<OrderBookLevel>,
    pub asks: Vec<OrderBookLevel>,
}

impl OrderBookSnapshot {
    /// Builds a snapshot, sorting each side into book order and clamping
    /// negative sizes to their magnitude.
    pub fn new(bids: Vec<OrderBookLevel>, asks: Vec<OrderBookLevel>) -> Self {
        let normalise = |levels: Vec<OrderBookLevel>| -> Vec<OrderBookLevel> {
            levels
                .into_iter()
                .map(|l| OrderBookLevel::new(l.price, l.size.abs()))
                .collect()
        };

        let mut bids = normalise(bids);
        let mut asks = normalise(asks);
        bids.sort_by(|a, b| b.price.total_cmp(&a.price));
        asks.sort_by(|a, b| a.price.total_cmp(&b.price));
        Self { bids, asks }
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

/// The `n` largest bids by size, largest first. Equal sizes: higher price first.
pub fn top_bid_levels(book: &OrderBookSnapshot, n: usize) -> Vec<OrderBookLevel> {
    book.bids
        .iter()
        .copied()
        .sorted_by(largest_first)
        .take(n)
        .collect()
}

/// The `n` smallest asks by size, smallest first. Equal sizes: lower price first.
pub fn top_ask_levels(book: &OrderBookSnapshot, n: usize) -> Vec<OrderBookLevel> {
    book.asks
        .iter()
        .copied()
        .sorted_by(|a, b| a.size.total_cmp(&b.size).then(a.price.total_cmp(&b.price)))
        .take(n)
        .collect()
}

/// Top asks under the chosen ranking.
pub fn top_ask_levels_ranked(
    book: &OrderBookSnapshot,
    n: usize,
    ranking: AskRanking,
) -> Vec<OrderBookLevel> {
    match ranking {
        AskRanking::SmallestSize => top_ask_levels(book, n),
        AskRanking::LargestSize => book
            .asks
            .iter()
            .copied()
            // Equal sizes: the ask nearer the spread wins
            .sorted_by(|a, b| b.size.total_cmp(&a.size).then(a.price.total_cmp(&b.price)))
            .take(n)
            .collect(),
    }
}

fn largest_first(a: &OrderBookLevel, b: &OrderBookLevel) -> Ordering {
    b.size.total_cmp(&a.size).then(b.price.total_cmp(&a.price))
}

/// Signed depth for a mirrored chart: bids positive, asks negated.
pub fn mirrored_depth(book: &OrderBookSnapshot) -> Vec<(BookSide, [f64; 2])> {
    let bids = book
        .bids
        .iter()
        .map(|l| (BookSide::Bid, [l.price, l.size]));
    let asks = book
        .asks
        .iter()
        .map(|l| (BookSide::Ask, [l.price, -l.size]));
    bids.chain(asks).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> OrderBookSnapshot {
        OrderBookSnapshot::new(
            vec![
                OrderBookLevel::new(100.0, 5.0),
                OrderBookLevel::new(99.5, 12.0),
                OrderBookLevel::new(99.0, 1.0),
                OrderBookLevel::new(98.5, 30.0),
                OrderBookLevel::new(98.0, 12.0),
            ],
            vec![
                OrderBookLevel::new(100.5, 7.0),
                OrderBookLevel::new(101.0, 0.5),
                OrderBookLevel::new(101.5, 40.0),
                OrderBookLevel::new(102.0, 2.0),
                OrderBookLevel::new(102.5, 0.5),
            ],
        )
    }

    #[test]
    fn snapshot_sorts_each_side_into_book_order() {
        let snapshot = OrderBookSnapshot::new(
            vec![OrderBookLevel::new(1.0, 1.0), OrderBookLevel::new(3.0, 1.0)],
            vec![OrderBookLevel::new(9.0, 1.0), OrderBookLevel::new(4.0, -2.0)],
        );
        assert_eq!(snapshot.bids[0].price, 3.0);
        assert_eq!(snapshot.asks[0].price, 4.0);
        assert_eq!(snapshot.asks[0].size, 2.0);
    }

    #[test]
    fn top_bids_are_largest_sizes_descending() {
        let top = top_bid_levels(&book(), 3);
        let sizes: Vec<f64> = top.iter().map(|l| l.size).collect();
        assert_eq!(sizes, vec![30.0, 12.0, 12.0]);
        // Equal sizes: higher price first
        assert_eq!(top[1].price, 99.5);
        assert_eq!(top[2].price, 98.0);
    }

    #[test]
    fn top_asks_are_smallest_sizes_ascending() {
        let top = top_ask_levels(&book(), 3);
        let sizes: Vec<f64> = top.iter().map(|l| l.size).collect();
        assert_eq!(sizes, vec![0.5, 0.5, 2.0]);
        assert_eq!(top[0].price, 101.0);
        assert_eq!(top[1].price, 102.5);
    }

    #[test]
    fn largest_ask_ranking_mirrors_bid_rule() {
        let top = top_ask_levels_ranked(&book(), 2, AskRanking::LargestSize);
        assert_eq!(top[0], OrderBookLevel::new(101.5, 40.0));
        assert_eq!(top[1], OrderBookLevel::new(100.5, 7.0));
        assert_eq!(
            top_ask_levels_ranked(&book(), 3, AskRanking::SmallestSize),
            top_ask_levels(&book(), 3)
        );
    }

    #[test]
    fn selection_is_reproducible_for_identical_snapshots() {
        assert_eq!(top_bid_levels(&book(), 4), top_bid_levels(&book(), 4));
        assert_eq!(top_ask_levels(&book(), 4), top_ask_levels(&book(), 4));
    }

    #[test]
    fn short_or_empty_books_return_what_exists() {
        let empty = OrderBookSnapshot::default();
        assert!(top_bid_levels(&empty, 3).is_empty());
        assert!(top_ask_levels(&empty, 3).is_empty());
        assert_eq!(top_bid_levels(&book(), 50).len(), 5);
    }

    #[test]
    fn mirrored_depth_negates_only_asks_and_leaves_book_untouched() {
        let book = book();
        let depth = mirrored_depth(&book);
        assert!(
            depth
                .iter()
                .filter(|(side, _)| *side == BookSide::Bid)
                .all(|(_, [_, size])| *size > 0.0)
        );
        assert!(
            depth
                .iter()
                .filter(|(side, _)| *side == BookSide::Ask)
                .all(|(_, [_, size])| *size < 0.0)
        );
        assert!(book.asks.iter().all(|l| l.size >= 0.0));
        assert!(top_ask_levels(&book, 5).iter().all(|l| l.size >= 0.0));
    }
}
