/// CSV export of the savings projection.
pub mod export;
