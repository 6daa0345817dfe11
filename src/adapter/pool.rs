use super::row_view::{RowShape, RowView, SlotId, ROW_SHAPE_COUNT};

/// Views kept per shape once they scroll off screen.
pub const MAX_SCRAP_PER_SHAPE: usize = 16;

/// Recycling facility for `RowView`s, keyed by row shape.
#[derive(Debug)]
pub struct RowPool {
    scrap: [Vec<RowView>; ROW_SHAPE_COUNT],
    next_slot: u64,
    allocated: usize,
}

impl Default for RowPool {
    fn default() -> Self {
        Self::new()
    }
}

impl RowPool {
    pub fn new() -> Self {
        Self {
            scrap: [Vec::new(), Vec::new()],
            next_slot: 0,
            allocated: 0,
        }
    }

    /// A view of `shape`, reusing `recycled` when it was built for that shape.
    ///
    /// A recycled view of the other shape goes back to scrap rather than
    /// being rebound across shapes.
    pub fn obtain(&mut self, shape: RowShape, recycled: Option<RowView>) -> RowView {
        if let Some(view) = recycled {
            if view.shape() == shape {
                return view;
            }
            self.recycle(view);
        }

        if let Some(view) = self.scrap[shape.index()].pop() {
            return view;
        }

        self.allocate(shape)
    }

    /// Hand a view back for reuse. Its binding is cleared.
    pub fn recycle(&mut self, mut view: RowView) {
        view.unbind();
        let heap = &mut self.scrap[view.shape().index()];
        if heap.len() < MAX_SCRAP_PER_SHAPE {
            heap.push(view);
        }
    }

    /// Views waiting in scrap for `shape`.
    pub fn scrap_len(&self, shape: RowShape) -> usize {
        self.scrap[shape.index()].len()
    }

    /// Views created by this pool so far.
    pub fn allocated(&self) -> usize {
        self.allocated
    }

    fn allocate(&mut self, shape: RowShape) -> RowView {
        let image = self.next_slot_id();
        let background = self.next_slot_id();
        self.allocated += 1;
        tracing::trace!(?shape, allocated = self.allocated, "Allocated row view");
        RowView::new(shape, image, background)
    }

    fn next_slot_id(&mut self) -> SlotId {
        let id = SlotId(self.next_slot);
        self.next_slot += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obtain_reuses_compatible_view() {
        let mut pool = RowPool::new();
        let view = pool.obtain(RowShape::Minimal, None);
        let id = view.image.id();
        let again = pool.obtain(RowShape::Minimal, Some(view));
        assert_eq!(again.image.id(), id);
        assert_eq!(pool.allocated(), 1);
    }

    #[test]
    fn test_obtain_never_crosses_shapes() {
        let mut pool = RowPool::new();
        let minimal = pool.obtain(RowShape::Minimal, None);
        let extended = pool.obtain(RowShape::Extended, Some(minimal));
        assert_eq!(extended.shape(), RowShape::Extended);
        assert_eq!(pool.scrap_len(RowShape::Minimal), 1);
        assert_eq!(pool.allocated(), 2);
    }

    #[test]
    fn test_scrap_is_reused_before_allocating() {
        let mut pool = RowPool::new();
        let view = pool.obtain(RowShape::Extended, None);
        pool.recycle(view);
        let _ = pool.obtain(RowShape::Extended, None);
        assert_eq!(pool.allocated(), 1);
        assert_eq!(pool.scrap_len(RowShape::Extended), 0);
    }

    #[test]
    fn test_recycle_unbinds_and_caps_scrap() {
        let mut pool = RowPool::new();
        let views: Vec<_> = (0..MAX_SCRAP_PER_SHAPE + 4)
            .map(|i| {
                let mut v = pool.obtain(RowShape::Minimal, None);
                v.bind_to(i);
                v
            })
            .collect();
        for v in views {
            pool.recycle(v);
        }
        assert_eq!(pool.scrap_len(RowShape::Minimal), MAX_SCRAP_PER_SHAPE);
        let v = pool.obtain(RowShape::Minimal, None);
        assert_eq!(v.bound_position(), None);
    }

    #[test]
    fn test_slot_ids_are_unique() {
        let mut pool = RowPool::new();
        let a = pool.obtain(RowShape::Minimal, None);
        let b = pool.obtain(RowShape::Minimal, None);
        let ids = [a.image.id(), a.background.id(), b.image.id(), b.background.id()];
        for (i, x) in ids.iter().enumerate() {
            for y in &ids[i + 1..] {
                assert_ne!(x, y);
            }
        }
    }
}
