//! Sink trait decoupling the tree walk from what is done with the events.

use crate::syntax::events::SyntaxEvent;
use std::ops::ControlFlow;

/// Accepts lowered syntax events.
pub trait SyntaxSink {
    /// Called for every event in source order. Returning `Break` stops the walk.
    fn on_event(&mut self, event: SyntaxEvent) -> ControlFlow<()>;
}

impl SyntaxSink for Vec<SyntaxEvent> {
    fn on_event(&mut self, event: SyntaxEvent) -> ControlFlow<()> {
        self.push(event);
        ControlFlow::Continue(())
    }
}
