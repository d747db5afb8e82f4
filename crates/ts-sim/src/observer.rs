//! Simulation observer trait for progress reporting and data collection.

use ts_core::Tick;

use crate::RenderFrame;

/// Callbacks invoked by [`Sim`][crate::Sim] while it steps.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_frame(&mut self, frame: &RenderFrame) {
///         println!("{}: {} vehicles", frame.caption(), frame.visible_count());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the start of every step, before the clock is consulted.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called for every produced frame whose tick is a multiple of
    /// `config.output_interval_ticks`.
    fn on_frame(&mut self, _frame: &RenderFrame) {}

    /// Called once when a [`run_ticks`][crate::Sim::run_ticks] batch ends.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
