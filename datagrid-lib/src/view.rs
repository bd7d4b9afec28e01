//! Notifications from the grid to the rendering layer.

/// Receives structural change notifications.
///
/// The rendering layer queries cell values, attributes, row labels and
/// captions on demand; these callbacks only tell it the shape changed.
pub trait GridView {
    fn rows_appended(&mut self, count: usize);

    fn rows_removed(&mut self, at: usize, count: usize);

    fn cols_appended(&mut self, count: usize);

    fn cols_removed(&mut self, at: usize, count: usize);

    /// Everything may have changed; repaint.
    fn refresh(&mut self) {}
}

/// A view that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl GridView for NullView {
    fn rows_appended(&mut self, _count: usize) {}

    fn rows_removed(&mut self, _at: usize, _count: usize) {}

    fn cols_appended(&mut self, _count: usize) {}

    fn cols_removed(&mut self, _at: usize, _count: usize) {}
}
