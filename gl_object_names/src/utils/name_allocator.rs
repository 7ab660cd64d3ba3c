/// Hands out monotonically increasing, non-zero `u32` names.
///
/// Unlike a recycling slot allocator, a freed name is never handed out again
/// by the same allocator: a name the application just deleted may still be
/// referenced by calls it has queued, so reuse would silently alias objects.
/// The counter only restarts on `reset()` (full table teardown).
///
/// # Example
///
/// ```ignore
/// let mut alloc = NameAllocator::new();
/// let a = alloc.alloc();                  // Some(1)
/// let b = alloc.alloc_with(|n| n == 2);   // Some(3), 2 is taken
/// ```
pub struct NameAllocator {
    next_id: u64,
    issued: u32,
}

impl NameAllocator {
    /// Create a new allocator; the first name is 1 (0 is the default object)
    pub fn new() -> Self {
        Self {
            next_id: 1,
            issued: 0,
        }
    }

    /// Allocate the next name
    ///
    /// Returns None once the 32-bit name space is exhausted.
    pub fn alloc(&mut self) -> Option<u32> {
        self.alloc_with(|_| false)
    }

    /// Allocate the next name for which `is_taken` returns false
    ///
    /// Names skipped because they are taken are consumed, not revisited.
    pub fn alloc_with(&mut self, mut is_taken: impl FnMut(u32) -> bool) -> Option<u32> {
        while self.next_id <= u32::MAX as u64 {
            let id = self.next_id as u32;
            self.next_id += 1;
            if !is_taken(id) {
                self.issued += 1;
                return Some(id);
            }
        }
        None
    }

    /// Highest name ever considered (0 if nothing was allocated)
    pub fn high_water_mark(&self) -> u32 {
        (self.next_id - 1) as u32
    }

    /// Number of names issued since creation or the last reset
    pub fn issued(&self) -> u32 {
        self.issued
    }

    /// Whether no name was ever issued
    pub fn is_pristine(&self) -> bool {
        self.issued == 0
    }

    /// Restart from name 1 (only valid once every issued name is dead)
    pub fn reset(&mut self) {
        self.next_id = 1;
        self.issued = 0;
    }

    #[cfg(test)]
    pub(crate) fn set_next_for_testing(&mut self, next_id: u64) {
        self.next_id = next_id;
    }
}

impl Default for NameAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "name_allocator_tests.rs"]
mod tests;
