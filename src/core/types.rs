/// Monetary amount in minor currency units (cents).
///
/// All balances and prices are integers; the ledger is the only component
/// that checks and applies balance deltas.
pub type Money = i64;
