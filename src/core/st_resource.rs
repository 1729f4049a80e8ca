//! Shared handle to a resource owned by a single thread.
//!
//! Any number of readers or one writer may hold it at a time. Breaking that rule is a
//! programming defect and panics.

use std::{
    cell::{Ref, RefCell, RefMut},
    rc::Rc,
};

/// A single-threaded, reference-counted resource with interior mutability.
///
/// `StResource` lets several owners on one thread share a value of type `T`
/// while keeping a single-writer discipline: any number of readers, or exactly
/// one writer, never both. It uses `Rc<RefCell<T>>` internally.
///
/// # Type Parameters
/// - `T`: The type of the contained resource
///
/// # Examples
///
/// ## Basic Usage
/// ```
/// use voxel_sandbox::core::StResource;
///
/// // Create a new single-threaded counter
/// let counter = StResource::new(0);
///
/// // Modify the counter value
/// *counter.get_mut() += 1;
///
/// // Read the counter value
/// assert_eq!(*counter.get(), 1);
/// ```
///
/// ## Cloning and Shared Ownership
/// ```
/// use voxel_sandbox::core::StResource;
///
/// let resource = StResource::new(vec![1, 2, 3]);
/// let clone1 = resource.clone();
/// let clone2 = resource.clone();
///
/// // All clones share the same underlying data
/// clone1.get_mut().push(4);
/// assert_eq!(resource.get().len(), 4);
/// assert_eq!(clone2.get().len(), 4);
/// ```
///
/// # Panics
/// - Panics if a read guard is alive while trying to acquire a write guard
/// - Panics if a write guard is alive while trying to acquire any guard
///
/// Either case means a reader could observe a half-finished mutation, which
/// is a bug in the caller rather than a runtime condition.
///
/// # Performance Considerations
/// - No atomic operations or OS locks
/// - Not thread-safe - do not use across thread boundaries
pub struct StResource<T> {
    resource: Rc<RefCell<T>>,
}

impl<T> StResource<T> {
    /// Creates a new `StResource` containing the given value.
    ///
    /// # Arguments
    /// * `resource` - The value to be stored in the resource
    pub fn new(resource: T) -> Self {
        Self {
            resource: Rc::new(RefCell::new(resource)),
        }
    }

    /// Returns a read-only guard that allows reading the contained value.
    ///
    /// # Panics
    /// Panics if a write guard is currently held.
    pub fn get(&self) -> Ref<'_, T> {
        self.resource.borrow()
    }

    /// Returns a mutable guard that allows modifying the contained value.
    ///
    /// # Panics
    /// Panics if any other guard is currently held.
    pub fn get_mut(&self) -> RefMut<'_, T> {
        self.resource.borrow_mut()
    }

    /// Whether a write guard could be taken right now.
    pub fn is_free(&self) -> bool {
        self.resource.try_borrow_mut().is_ok()
    }
}

impl<T> Clone for StResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_value() {
        let a = StResource::new(String::from("stone"));
        let b = a.clone();
        b.get_mut().push_str("-brick");
        assert_eq!(&*a.get(), "stone-brick");
    }

    #[test]
    fn readers_block_writers() {
        let resource = StResource::new(1);
        let reader = resource.get();
        assert!(!resource.is_free());
        drop(reader);
        assert!(resource.is_free());
    }

    #[test]
    #[should_panic]
    fn writing_while_reading_is_a_bug() {
        let resource = StResource::new(1);
        let _reader = resource.get();
        let _writer = resource.get_mut();
    }
}
