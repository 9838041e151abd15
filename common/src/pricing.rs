use rust_decimal::Decimal;

/// Sales tax applied on top of the commissioned cost, as a multiplier (18%).
pub const TAX_MULTIPLIER: Decimal = Decimal::from_parts(118, 0, 0, false, 2);

/// Commission bracket a sending cost falls into.
///
/// Lower bounds are inclusive and upper bounds exclusive. The first five
/// brackets add a flat fee; the last two scale the cost by a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommissionTier {
    /// [0, 20): +3
    UpTo20,
    /// [20, 100): +8
    UpTo100,
    /// [100, 300): +17
    UpTo300,
    /// [300, 500): +20
    UpTo500,
    /// [500, 1000): +50
    UpTo1000,
    /// [1000, 10000): x1.05
    UpTo10000,
    /// [10000, ∞): x1.03
    Bulk,
}

impl CommissionTier {
    /// Bracket for a given sending cost.
    pub fn for_send_cost(send_cost: i64) -> Self {
        match send_cost {
            i64::MIN..=19 => CommissionTier::UpTo20,
            20..=99 => CommissionTier::UpTo100,
            100..=299 => CommissionTier::UpTo300,
            300..=499 => CommissionTier::UpTo500,
            500..=999 => CommissionTier::UpTo1000,
            1000..=9999 => CommissionTier::UpTo10000,
            _ => CommissionTier::Bulk,
        }
    }

    /// Flat fee added by this bracket, if it is a flat-fee bracket.
    pub fn flat_fee(self) -> Option<i64> {
        match self {
            CommissionTier::UpTo20 => Some(3),
            CommissionTier::UpTo100 => Some(8),
            CommissionTier::UpTo300 => Some(17),
            CommissionTier::UpTo500 => Some(20),
            CommissionTier::UpTo1000 => Some(50),
            CommissionTier::UpTo10000 | CommissionTier::Bulk => None,
        }
    }

    /// Multiplier applied by this bracket, if it is a percentage bracket.
    pub fn rate(self) -> Option<Decimal> {
        match self {
            CommissionTier::UpTo10000 => Some(Decimal::new(105, 2)),
            CommissionTier::Bulk => Some(Decimal::new(103, 2)),
            _ => None,
        }
    }

    /// Cost after commission, before tax.
    pub fn apply(self, send_cost: i64) -> Decimal {
        let cost = Decimal::from(send_cost);
        match (self.flat_fee(), self.rate()) {
            (Some(fee), _) => cost + Decimal::from(fee),
            (None, Some(rate)) => cost * rate,
            (None, None) => cost,
        }
    }
}

/// Sending cost plus the commission of its bracket.
pub fn commissioned_cost(send_cost: i64) -> Decimal {
    CommissionTier::for_send_cost(send_cost).apply(send_cost)
}

/// Final price charged for a shipment: commissioned cost times tax.
pub fn total_cost(send_cost: i64) -> Decimal {
    commissioned_cost(send_cost) * TAX_MULTIPLIER
}
