//! Trailing P/E and P/B figures from a fundamentals snapshot

use crate::common::math::{round2, safe_ratio};
use crate::models::indicators::{FundamentalsSnapshot, ValuationRatios};

/// Derive valuation figures from a snapshot.
///
/// Recomputed P/E is `price / eps` and recomputed P/B is `price / book value`;
/// each is unknown when an operand is unknown or the divisor is zero, without
/// affecting the other figures. Vendor figures pass through unchanged.
pub fn valuation_ratios(snapshot: &FundamentalsSnapshot) -> ValuationRatios {
    let price = snapshot.current_price;

    ValuationRatios {
        vendor_pe: snapshot.vendor_pe,
        recomputed_pe: safe_ratio(price, snapshot.trailing_eps).map(round2),
        vendor_pb: snapshot.vendor_pb,
        recomputed_pb: safe_ratio(price, snapshot.book_value_per_share).map(round2),
        price,
        eps: snapshot.trailing_eps,
        book_value: snapshot.book_value_per_share,
    }
}
