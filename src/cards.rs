//! Card trade-in combinatorics.
//!
//! A set of exactly `k` cards is tradeable when, ignoring jokers and
//! wildcard placeholders, the remaining categories are all equal or all
//! distinct, and jokers plus placeholders fill the rest. A set may hold at
//! most one joker. The checks work on category counts only, so they do not
//! depend on hand order.

use itertools::Itertools;

use crate::board::card::{Card, CardKind, CardSelection};

/// Category counts of a group of cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Tally {
    jokers: usize,
    wildcards: usize,
    /// Count per ordinary category, index `category - 1`.
    types: Vec<usize>,
}

impl Tally {
    fn of<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Self {
        let mut tally = Tally::default();
        for card in cards {
            match card.kind {
                CardKind::Joker => tally.jokers += 1,
                CardKind::Wildcard => tally.wildcards += 1,
                CardKind::Type(c) => {
                    let i = c.saturating_sub(1) as usize;
                    if tally.types.len() <= i {
                        tally.types.resize(i + 1, 0);
                    }
                    tally.types[i] += 1;
                }
            }
        }
        tally
    }

    fn most_common(&self) -> usize {
        self.types.iter().copied().max().unwrap_or(0)
    }

    fn distinct(&self) -> usize {
        self.types.iter().filter(|&&n| n > 0).count()
    }
}

/// True iff `cards` is exactly one tradeable set of size `k`.
pub fn is_tradeable(cards: &[Card], k: usize) -> bool {
    if cards.len() != k || k == 0 {
        return false;
    }
    let tally = Tally::of(cards);
    if tally.jokers > 1 {
        return false;
    }
    let fill = tally.jokers + tally.wildcards;
    fill == k || tally.most_common() + fill == k || tally.distinct() + fill == k
}

/// True iff some size-`k` subset of `hand` is tradeable.
pub fn could_trade_in(hand: &[Card], k: usize) -> bool {
    if hand.len() < k || k == 0 {
        return false;
    }
    let tally = Tally::of(hand);
    let fill = tally.jokers.min(1) + tally.wildcards;
    fill >= k || tally.most_common() + fill >= k || tally.distinct() + fill >= k
}

/// The cards picked by `selection`, or `None` if it names a slot past the
/// end of the hand.
pub fn selected<'a>(hand: &'a [Card], selection: CardSelection) -> Option<Vec<&'a Card>> {
    if !selection.fits(hand.len()) {
        return None;
    }
    Some(selection.slots().map(|i| &hand[i]).collect())
}

/// True iff `selection` picks a tradeable set from `hand`.
pub fn is_tradeable_selection(hand: &[Card], selection: CardSelection, k: usize) -> bool {
    match selected(hand, selection) {
        Some(cards) => {
            let cards: Vec<Card> = cards.into_iter().copied().collect();
            is_tradeable(&cards, k)
        }
        None => false,
    }
}

/// Every tradeable selection of `k` slots from `hand`, in lexicographic
/// slot order.
pub fn tradeable_sets(hand: &[Card], k: usize) -> Vec<CardSelection> {
    if !could_trade_in(hand, k) {
        return Vec::new();
    }
    (0..hand.len())
        .combinations(k)
        .filter(|slots| {
            let cards: Vec<Card> = slots.iter().map(|&i| hand[i]).collect();
            is_tradeable(&cards, k)
        })
        .map(CardSelection::from_slots)
        .collect()
}

/// Splits `hand` into the cards kept and the cards traded by `selection`.
pub fn split_hand(hand: &[Card], selection: CardSelection) -> (Vec<Card>, Vec<Card>) {
    let (traded, kept): (Vec<(usize, &Card)>, Vec<(usize, &Card)>) =
        hand.iter().enumerate().partition(|(i, _)| selection.contains(*i));
    (
        kept.into_iter().map(|(_, c)| *c).collect(),
        traded.into_iter().map(|(_, c)| *c).collect(),
    )
}
