use crate::util::Error;
use std::{
    fmt,
    hash::{Hash, Hasher},
    iter::Enumerate,
    marker::PhantomData,
    slice::{Iter, IterMut},
};

/// A reference to one occupancy of a pool slot.
///
/// The epoch is bumped every time the slot is spawned into, so a handle taken before the
/// slot was recycled no longer resolves.
pub struct Handle<T> {
    index: usize,
    epoch: usize,
    marker: PhantomData<T>,
}

// FIXME: https://github.com/rust-lang/rust/issues/26925
impl<T> Copy for Handle<T> {}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Handle<T> {
        *self
    }
}

impl<T> PartialEq for Handle<T> {
    #[inline]
    fn eq(&self, rhs: &Handle<T>) -> bool {
        self.index == rhs.index && self.epoch == rhs.epoch
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.epoch.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}@{})", self.index, self.epoch)
    }
}

impl<T> Handle<T> {
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn epoch(&self) -> usize {
        self.epoch
    }
}

#[derive(Debug)]
struct Slot<T> {
    epoch: usize,
    active: bool,
    data: T,
}

/// A fixed-capacity pool of reusable entities.
///
/// Slots are handed out round-robin: spawning always takes the slot after the previous spawn,
/// whether or not it is still in use. If more than `capacity` entities need to be alive at
/// once the oldest ones get overwritten. That is counted in [`EntityPool::overwrites`] but
/// never refused, so spawning is O(1) and never allocates.
#[derive(Debug)]
pub struct EntityPool<T> {
    slots: Vec<Slot<T>>,
    cursor: Option<usize>,
    active: usize,
    overwrites: usize,
}

impl<T: Default> EntityPool<T> {
    pub fn new(capacity: usize) -> Result<EntityPool<T>, Error> {
        EntityPool::from_fn(capacity, |_| T::default())
    }
}

impl<T> EntityPool<T> {
    /// Build a pool whose slots are pre-filled by `factory(slot_index)`.
    ///
    /// Every slot starts inactive.
    pub fn from_fn<F: FnMut(usize) -> T>(
        capacity: usize,
        mut factory: F,
    ) -> Result<EntityPool<T>, Error> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        let slots = (0..capacity)
            .map(|index| Slot {
                epoch: 0,
                active: false,
                data: factory(index),
            })
            .collect();
        Ok(EntityPool {
            slots,
            cursor: None,
            active: 0,
            overwrites: 0,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.active
    }

    /// How many spawns have landed on a slot that was still active.
    #[inline]
    pub fn overwrites(&self) -> usize {
        self.overwrites
    }

    /// The slot the next spawn will use.
    #[inline]
    pub fn next_index(&self) -> usize {
        match self.cursor {
            Some(cursor) => (cursor + 1) % self.slots.len(),
            None => 0,
        }
    }

    #[inline]
    pub fn spawn(&mut self, value: T) -> Handle<T> {
        self.spawn_with(|data, _| *data = value)
    }

    /// Activate the next slot and let `configure` set it up in place.
    ///
    /// The callback also receives the new handle, which lets you hand it to something that
    /// will report back later (see `engine::Completions`).
    pub fn spawn_with<F: FnOnce(&mut T, Handle<T>)>(&mut self, configure: F) -> Handle<T> {
        let index = self.next_index();
        let capacity = self.slots.len();
        self.cursor = Some(index);

        let slot = &mut self.slots[index];
        if slot.active {
            self.overwrites += 1;
            log::debug!(
                "Pool of {} is exhausted, overwriting live slot {} (epoch {})",
                capacity,
                index,
                slot.epoch
            );
        } else {
            slot.active = true;
            self.active += 1;
        }
        slot.epoch += 1;
        let handle = Handle {
            index,
            epoch: slot.epoch,
            marker: PhantomData,
        };
        configure(&mut slot.data, handle);
        handle
    }

    /// Mark a slot inactive. Returns whether it was active.
    pub fn deactivate(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) if slot.active => {
                slot.active = false;
                self.active -= 1;
                true
            }
            _ => false,
        }
    }

    /// Like [`EntityPool::deactivate`] but only if the handle is still current.
    pub fn deactivate_handle(&mut self, handle: Handle<T>) -> bool {
        if self.is_current(handle) {
            self.deactivate(handle.index)
        } else {
            false
        }
    }

    /// Deactivate every active entity matching `expired`, returning how many were recycled.
    pub fn recycle_where<F: FnMut(&T) -> bool>(&mut self, mut expired: F) -> usize {
        let mut recycled = 0;
        for slot in self.slots.iter_mut() {
            if slot.active && expired(&slot.data) {
                slot.active = false;
                recycled += 1;
            }
        }
        self.active -= recycled;
        recycled
    }

    /// Deactivate everything. Epochs keep counting so old handles stay stale.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.active = false;
        }
        self.active = 0;
    }

    #[inline]
    pub fn is_active(&self, index: usize) -> bool {
        self.slots.get(index).map_or(false, |slot| slot.active)
    }

    #[inline]
    pub fn is_current(&self, handle: Handle<T>) -> bool {
        self.slots
            .get(handle.index)
            .map_or(false, |slot| slot.active && slot.epoch == handle.epoch)
    }

    /// The handle of whatever currently occupies an active slot.
    #[inline]
    pub fn handle_at(&self, index: usize) -> Option<Handle<T>> {
        self.slots.get(index).filter(|slot| slot.active).map(|slot| Handle {
            index,
            epoch: slot.epoch,
            marker: PhantomData,
        })
    }

    #[inline]
    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        if self.is_current(handle) {
            Some(&self.slots[handle.index].data)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        if self.is_current(handle) {
            Some(&mut self.slots[handle.index].data)
        } else {
            None
        }
    }

    /// Access the data in an active slot by index.
    #[inline]
    pub fn slot(&self, index: usize) -> Option<&T> {
        self.slots
            .get(index)
            .filter(|slot| slot.active)
            .map(|slot| &slot.data)
    }

    #[inline]
    pub fn for_each_active<F: FnMut(Handle<T>, &T)>(&self, mut visitor: F) {
        for (handle, data) in self.iter_active() {
            visitor(handle, data);
        }
    }

    #[inline]
    pub fn iter_active(&self) -> ActiveIter<T> {
        ActiveIter {
            inner: self.slots.iter().enumerate(),
        }
    }

    #[inline]
    pub fn iter_active_mut(&mut self) -> ActiveIterMut<T> {
        ActiveIterMut {
            inner: self.slots.iter_mut().enumerate(),
        }
    }
}

pub struct ActiveIter<'a, T: 'a> {
    inner: Enumerate<Iter<'a, Slot<T>>>,
}

impl<'a, T> Iterator for ActiveIter<'a, T> {
    type Item = (Handle<T>, &'a T);

    #[inline]
    fn next(&mut self) -> Option<(Handle<T>, &'a T)> {
        loop {
            let (index, slot) = self.inner.next()?;
            if slot.active {
                let handle = Handle {
                    index,
                    epoch: slot.epoch,
                    marker: PhantomData,
                };
                return Some((handle, &slot.data));
            }
        }
    }
}

pub struct ActiveIterMut<'a, T: 'a> {
    inner: Enumerate<IterMut<'a, Slot<T>>>,
}

impl<'a, T> Iterator for ActiveIterMut<'a, T> {
    type Item = (Handle<T>, &'a mut T);

    #[inline]
    fn next(&mut self) -> Option<(Handle<T>, &'a mut T)> {
        loop {
            let (index, slot) = self.inner.next()?;
            if slot.active {
                let handle = Handle {
                    index,
                    epoch: slot.epoch,
                    marker: PhantomData,
                };
                return Some((handle, &mut slot.data));
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rejects_zero_capacity() {
        assert_eq!(
            Err(Error::ZeroCapacity),
            EntityPool::<u32>::new(0).map(|_| ())
        );
    }

    #[test]
    fn spawns_within_capacity_are_distinct() {
        for capacity in 1..=8 {
            for count in 0..=capacity {
                let mut pool = EntityPool::<u32>::new(capacity).unwrap();
                let indices: HashSet<usize> = (0..count)
                    .map(|i| pool.spawn(i as u32).index())
                    .collect();
                assert_eq!(count, indices.len());
                assert_eq!(count, pool.active_count());
                assert!(indices.iter().all(|&index| pool.is_active(index)));
                assert_eq!(0, pool.overwrites());
            }
        }
    }

    #[test]
    fn spawns_past_capacity_wrap_around() {
        let capacity = 5;
        let mut pool = EntityPool::<u32>::new(capacity).unwrap();
        let indices: Vec<usize> = (0..17).map(|i| pool.spawn(i).index()).collect();
        for k in capacity..indices.len() {
            assert_eq!(indices[k - capacity], indices[k]);
        }
        assert_eq!(17 - capacity, pool.overwrites());
        assert_eq!(capacity, pool.active_count());
    }

    #[test]
    fn spawning_into_a_free_slot_is_not_an_overwrite() {
        let mut pool = EntityPool::<u32>::new(2).unwrap();
        let a = pool.spawn(1);
        pool.spawn(2);
        assert!(pool.deactivate(a.index()));
        let c = pool.spawn(3);
        assert_eq!(a.index(), c.index());
        assert_eq!(0, pool.overwrites());
        assert_eq!(Some(&3), pool.get(c));
    }

    #[test]
    fn stale_handles_do_not_resolve() {
        let mut pool = EntityPool::<u32>::new(1).unwrap();
        let first = pool.spawn(1);
        let second = pool.spawn(2);
        assert_eq!(first.index(), second.index());
        assert_ne!(first, second);
        assert_eq!(None, pool.get(first));
        assert!(!pool.deactivate_handle(first));
        assert!(pool.is_active(0));
        assert!(pool.deactivate_handle(second));
        assert!(!pool.is_active(0));
    }

    #[test]
    fn deactivate_is_idempotent() {
        let mut pool = EntityPool::<u32>::new(3).unwrap();
        let handle = pool.spawn(1);
        assert!(pool.deactivate(handle.index()));
        assert!(!pool.deactivate(handle.index()));
        assert!(!pool.deactivate(99));
        assert_eq!(0, pool.active_count());
    }

    #[test]
    fn iterates_active_only() {
        let mut pool = EntityPool::<u32>::new(4).unwrap();
        for i in 0..4 {
            pool.spawn(i * 10);
        }
        pool.deactivate(1);
        pool.deactivate(3);

        let seen: Vec<u32> = pool.iter_active().map(|(_, value)| *value).collect();
        assert_eq!(vec![0, 20], seen);
        // Restartable
        assert_eq!(2, pool.iter_active().count());

        for (_, value) in pool.iter_active_mut() {
            *value += 1;
        }
        let mut visited = Vec::new();
        pool.for_each_active(|handle, value| visited.push((handle.index(), *value)));
        assert_eq!(vec![(0, 1), (2, 21)], visited);
    }

    #[test]
    fn recycles_by_predicate() {
        let mut pool = EntityPool::<u32>::new(6).unwrap();
        for i in 0..6 {
            pool.spawn(i);
        }
        assert_eq!(3, pool.recycle_where(|value| value % 2 == 1));
        assert_eq!(3, pool.active_count());
        assert_eq!(None, pool.slot(1));
        assert_eq!(Some(&2), pool.slot(2));
    }

    #[test]
    fn spawn_with_sees_its_own_handle() {
        let mut pool = EntityPool::from_fn(3, |index| (index, None)).unwrap();
        let handle = pool.spawn_with(|data, handle| data.1 = Some(handle.epoch()));
        assert_eq!(Some(&(0, Some(1))), pool.get(handle));
        pool.clear();
        assert_eq!(0, pool.active_count());
        assert_eq!(None, pool.handle_at(0));
        assert_eq!(1, pool.next_index());
    }
}
