//! Winner selection for a single sealed-bid auction.

use sealed_types::{AuctionParameters, Bid, BidPool, MatchOutcome};

/// Select the winner (or no-match outcome) for a pool of opened bids.
///
/// Ranking is price descending with ties broken by earlier timestamp. The
/// sort is stable, so bids tied on both price and timestamp keep their
/// input order as the final tie-break and the same pool always yields the
/// same winner. The first ranked bid at or above the reserve price wins;
/// the boundary is inclusive. `amount` does not participate (single-unit,
/// highest-price-wins semantics).
///
/// Pure and total: never fails for a valid pool.
pub fn select_winner(pool: &BidPool, params: &AuctionParameters) -> MatchOutcome {
    if pool.is_empty() {
        return MatchOutcome::NoBids;
    }

    let mut ranked: Vec<&Bid> = pool.iter().collect();
    ranked.sort_by(|a, b| {
        b.price
            .total_cmp(&a.price)
            .then_with(|| a.timestamp.cmp(&b.timestamp))
    });

    match ranked.iter().find(|bid| bid.price >= params.reserve_price) {
        Some(winner) => MatchOutcome::Matched {
            bidder: winner.bidder.clone(),
            price: winner.price,
        },
        None => MatchOutcome::ReserveNotMet {
            highest_price: ranked[0].price,
        },
    }
}
