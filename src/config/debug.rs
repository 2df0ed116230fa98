//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet.

pub struct DebugFlags {
    /// Emit UI interaction logs (pair edits, interval changes, fetch clicks).
    pub print_ui_interactions: bool,
    /// Emit per-run timing and series sizes once a report completes.
    pub print_report_timings: bool,
    /// Emit the raw order-book level counts returned by the exchange.
    pub print_order_book_depth: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_ui_interactions: true,
    print_report_timings: true,
    print_order_book_depth: false,
};
