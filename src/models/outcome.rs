use strum_macros::Display;

/// What a ledger mutation did. Mutations never fail; inputs that cannot be
/// applied leave the state untouched and say why.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Applied,
    /// A sell removed the holding. `clamped` is set when more shares were
    /// requested than were owned.
    Closed { clamped: bool },
    NoOp(NoOpReason),
}

impl Outcome {
    pub fn changed_state(&self) -> bool {
        !matches!(self, Outcome::NoOp(_))
    }
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum NoOpReason {
    #[strum(to_string = "no holding with that code")]
    UnknownHolding,
    #[strum(to_string = "fund is already on the watchlist")]
    AlreadyWatching,
    #[strum(to_string = "fund is not on the watchlist")]
    NotWatching,
    #[strum(to_string = "figures are too large to record")]
    OutOfRange,
}
