/// Stock operations handled inside the catalog actor. Because the actor
/// processes one message at a time, `Reserve` is a check-and-decrement that no
/// concurrent checkout can race past.
#[derive(Debug, Clone)]
pub enum StockAction {
    Check,
    Reserve(u32),
    Release(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum StockActionResult {
    Level(u32),
    Reserved,
    /// The reservation would have driven stock negative; nothing was applied.
    Insufficient { available: u32 },
    Released,
}
