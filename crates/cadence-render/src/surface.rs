//! Render surface that only counts clears

use cadence_core::Color;
use cadence_runtime::RenderSurface;
use std::cell::Cell;
use std::rc::Rc;

/// Stand-in for a graphics context. Clones share the clear counter.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    clears: Rc<Cell<u64>>,
    last_color: Rc<Cell<Option<Color>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clears(&self) -> u64 {
        self.clears.get()
    }

    pub fn last_color(&self) -> Option<Color> {
        self.last_color.get()
    }
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.clears.set(self.clears.get() + 1);
        self.last_color.set(Some(color));
    }
}
