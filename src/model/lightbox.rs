//! Full-screen single-image viewer state and the page scroll lock it holds
//! while open.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Page-scoped flag that suppresses scrolling of the underlying panes while
/// a modal is on screen. Engage and release are idempotent booleans rather
/// than a counter, so rapid or nested open/close sequences can never leave
/// the flag stuck.
#[derive(Clone, Debug, Default)]
pub struct ScrollLock {
    engaged: Arc<AtomicBool>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged.load(Ordering::Relaxed)
    }

    /// Engage the lock and return a guard whose drop releases it.
    pub fn engage(&self) -> ScrollGuard {
        self.engaged.store(true, Ordering::Relaxed);
        ScrollGuard { engaged: self.engaged.clone() }
    }

    pub fn release(&self) {
        self.engaged.store(false, Ordering::Relaxed);
    }
}

/// RAII handle for an engaged [`ScrollLock`]. Dropping it restores
/// scrolling unconditionally, covering teardown paths that never call
/// an explicit close.
#[derive(Debug)]
pub struct ScrollGuard {
    engaged: Arc<AtomicBool>,
}

impl Drop for ScrollGuard {
    fn drop(&mut self) {
        self.engaged.store(false, Ordering::Relaxed);
    }
}

/// Immutable view of the lightbox for rendering.
#[derive(Clone, Copy, Debug, Default)]
pub struct LightboxView {
    pub is_open: bool,
    pub current_index: usize,
}

/// Modal single-image viewer over the active collection's image list.
/// The viewer does not own the list; navigation takes the current length
/// so a shrunken list can never be indexed out of range here.
#[derive(Debug)]
pub struct Lightbox {
    is_open: bool,
    current_index: usize,
    lock: ScrollLock,
    guard: Option<ScrollGuard>,
}

impl Lightbox {
    pub fn new(lock: ScrollLock) -> Self {
        Self { is_open: false, current_index: 0, lock, guard: None }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn view(&self) -> LightboxView {
        LightboxView { is_open: self.is_open, current_index: self.current_index }
    }

    /// Open at `index`. An explicit index always overrides the resumed
    /// position from a previous viewing.
    pub fn open(&mut self, index: usize) {
        self.current_index = index;
        self.is_open = true;
        if self.guard.is_none() {
            self.guard = Some(self.lock.engage());
        }
    }

    /// Close the viewer. Deliberately keeps `current_index`, so reopening
    /// without an explicit index resumes at the last-viewed position.
    pub fn close(&mut self) {
        self.is_open = false;
        self.guard = None;
        self.lock.release();
    }

    /// Advance with cyclic wraparound; no-op on an empty list.
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.current_index = if self.current_index + 1 >= len { 0 } else { self.current_index + 1 };
    }

    /// Retreat with cyclic wraparound; no-op on an empty list.
    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.current_index = if self.current_index == 0 { len - 1 } else { self.current_index - 1 };
    }
}

impl Drop for Lightbox {
    fn drop(&mut self) {
        self.lock.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lightbox() -> (Lightbox, ScrollLock) {
        let lock = ScrollLock::new();
        (Lightbox::new(lock.clone()), lock)
    }

    #[test]
    fn next_wraps_at_last_index() {
        let (mut lb, _lock) = lightbox();
        lb.open(2);
        lb.next(3);
        assert_eq!(lb.current_index(), 0);
    }

    #[test]
    fn previous_wraps_at_index_zero() {
        let (mut lb, _lock) = lightbox();
        lb.open(0);
        lb.previous(3);
        assert_eq!(lb.current_index(), 2);
    }

    #[test]
    fn navigation_is_a_noop_on_empty_list() {
        let (mut lb, _lock) = lightbox();
        lb.next(0);
        lb.previous(0);
        assert_eq!(lb.current_index(), 0);
    }

    #[test]
    fn reopening_without_an_index_resumes_last_position() {
        let (mut lb, _lock) = lightbox();
        lb.open(2);
        lb.close();
        assert_eq!(lb.current_index(), 2);
        // An explicit index overrides the resumed position.
        lb.open(1);
        assert_eq!(lb.current_index(), 1);
    }

    #[test]
    fn scroll_lock_tracks_open_state() {
        let (mut lb, lock) = lightbox();
        assert!(!lock.is_engaged());
        lb.open(0);
        assert!(lock.is_engaged());
        lb.close();
        assert!(!lock.is_engaged());
    }

    #[test]
    fn rapid_open_close_sequences_end_released() {
        let (mut lb, lock) = lightbox();
        lb.open(0);
        lb.open(1);
        lb.close();
        lb.close();
        assert!(!lock.is_engaged());
        lb.open(0);
        lb.close();
        lb.open(2);
        lb.close();
        assert!(!lock.is_engaged());
    }

    #[test]
    fn dropping_the_viewer_releases_the_lock() {
        let lock = ScrollLock::new();
        {
            let mut lb = Lightbox::new(lock.clone());
            lb.open(4);
            assert!(lock.is_engaged());
        }
        assert!(!lock.is_engaged());
    }
}
