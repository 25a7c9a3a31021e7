use hrc_schemas::{RoutingError, Side, SymbolExposure};

/// Applies one fill to a symbol's exposure. `Buy` adds to long and pushes
/// net positive; `Sell` adds to short and pushes net negative. Pure
/// function over a plain struct, same clamped arithmetic style used
/// elsewhere in this crate for positions/marks.
pub fn apply_fill(
    exposure: &mut SymbolExposure,
    side: Side,
    lots: f64,
    now: i64,
) -> Result<(), RoutingError> {
    if lots <= 0.0 {
        return Err(RoutingError::invalid("ApplyFill", "lots must be positive"));
    }
    match side {
        Side::Buy => exposure.long_lots += lots,
        Side::Sell => exposure.short_lots += lots,
    }
    exposure.last_updated = now;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_then_sell_keeps_invariants() {
        let mut e = SymbolExposure::default();
        apply_fill(&mut e, Side::Buy, 10.0, 1).unwrap();
        apply_fill(&mut e, Side::Sell, 4.0, 2).unwrap();
        assert_eq!(e.long_lots, 10.0);
        assert_eq!(e.short_lots, 4.0);
        assert_eq!(e.net(), 6.0);
        assert_eq!(e.gross(), 14.0);
        assert!(e.gross() >= e.net().abs());
    }

    #[test]
    fn non_positive_lots_rejected() {
        let mut e = SymbolExposure::default();
        assert!(apply_fill(&mut e, Side::Buy, 0.0, 1).is_err());
        assert!(apply_fill(&mut e, Side::Buy, -1.0, 1).is_err());
    }
}
