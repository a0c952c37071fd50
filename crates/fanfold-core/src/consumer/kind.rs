use derive_more::Display;

///
/// AggregateKind
///
/// Aggregation selector carried by consumers so failures and metrics can
/// name the aggregation they came from. Strict and nullable variants of one
/// aggregation share a kind.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum AggregateKind {
    #[display("all")]
    All,
    #[display("any")]
    Any,
    #[display("average")]
    Average,
    #[display("collect")]
    Collect,
    #[display("count")]
    Count,
    #[display("custom")]
    Custom,
    #[display("first")]
    First,
    #[display("fold")]
    Fold,
    #[display("last")]
    Last,
    #[display("max")]
    Max,
    #[display("max_by")]
    MaxBy,
    #[display("maximums_by")]
    MaximumsBy,
    #[display("min")]
    Min,
    #[display("min_by")]
    MinBy,
    #[display("minimums_by")]
    MinimumsBy,
    #[display("reduce")]
    Reduce,
    #[display("sum")]
    Sum,
}

impl AggregateKind {
    /// Return whether this kind fails on an empty source in its strict form.
    #[must_use]
    pub const fn requires_elements(self) -> bool {
        matches!(
            self,
            Self::Average
                | Self::First
                | Self::Last
                | Self::Max
                | Self::MaxBy
                | Self::Min
                | Self::MinBy
                | Self::Reduce
        )
    }
}
