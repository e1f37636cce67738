/// Cached position and size on the scroll axis.
///
/// Offsets are relative to the owning list's origin. `bottom == top + height` holds for
/// every value produced by this type's constructors and shift helpers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coords {
    pub top: u64,
    pub bottom: u64,
    pub width: u32,
    pub height: u64,
}

impl Coords {
    pub fn new(top: u64, width: u32, height: u64) -> Self {
        Self {
            top,
            bottom: top.saturating_add(height),
            width,
            height,
        }
    }

    /// `top + bottom`, i.e. twice the midpoint. Keeps midpoint comparisons exact.
    pub fn midpoint2(&self) -> u64 {
        self.top.saturating_add(self.bottom)
    }

    pub fn shift_down(&mut self, dy: u64) {
        self.top = self.top.saturating_add(dy);
        self.bottom = self.bottom.saturating_add(dy);
    }

    pub fn shift_up(&mut self, dy: u64) {
        debug_assert!(self.top >= dy, "shift_up past the list origin");
        self.top = self.top.saturating_sub(dy);
        self.bottom = self.bottom.saturating_sub(dy);
    }

    pub fn is_consistent(&self) -> bool {
        self.bottom >= self.top && self.bottom - self.top == self.height
    }
}
