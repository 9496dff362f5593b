use crate::{
    collections::{EntityPool, Handle},
    math::Rect,
};

/// Anything with axis-aligned bounds that can take part in a sweep.
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    #[inline]
    fn bounds(&self) -> Rect {
        *self
    }
}

/// One overlapping pair found by [`sweep`].
#[derive(Debug)]
pub struct Contact<A, B> {
    pub first: Handle<A>,
    pub second: Handle<B>,
}

/// What the caller wants done with a contact.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    Keep,
    DeactivateFirst,
    DeactivateSecond,
    DeactivateBoth,
}

impl Resolution {
    #[inline]
    fn first(self) -> bool {
        matches!(self, Resolution::DeactivateFirst | Resolution::DeactivateBoth)
    }

    #[inline]
    fn second(self) -> bool {
        matches!(self, Resolution::DeactivateSecond | Resolution::DeactivateBoth)
    }
}

/// Test every active entity of `first` against every active entity of `second`.
///
/// This is a plain O(n·m) sweep. Pools here hold tens of entities so there is no
/// broad-phase. Liveness is checked again before each test, so once an entity is
/// deactivated by a resolution it takes no further part in this sweep. Every overlapping
/// pair reports at most one contact per call. Returns the number of contacts.
pub fn sweep<A, B, F>(
    first: &mut EntityPool<A>,
    second: &mut EntityPool<B>,
    mut on_contact: F,
) -> usize
where
    A: Bounded,
    B: Bounded,
    F: FnMut(Contact<A, B>) -> Resolution,
{
    let mut contacts = 0;
    for i in 0..first.capacity() {
        let (a, a_bounds) = match first.handle_at(i).zip(first.slot(i)) {
            Some((handle, entity)) => (handle, entity.bounds()),
            None => continue,
        };
        for j in 0..second.capacity() {
            let b = match second.handle_at(j) {
                Some(handle) => handle,
                None => continue,
            };
            let hit = second
                .slot(j)
                .map_or(false, |entity| a_bounds.intersects(&entity.bounds()));
            if !hit {
                continue;
            }
            contacts += 1;
            let resolution = on_contact(Contact {
                first: a,
                second: b,
            });
            if resolution.second() {
                second.deactivate(j);
            }
            if resolution.first() {
                first.deactivate(i);
                break;
            }
        }
    }
    contacts
}

/// Test a single body against every active entity of a pool.
///
/// `on_contact` returns whether to deactivate the pooled entity.
pub fn sweep_against<T, F>(body: &Rect, pool: &mut EntityPool<T>, mut on_contact: F) -> usize
where
    T: Bounded,
    F: FnMut(Handle<T>) -> bool,
{
    let mut contacts = 0;
    for i in 0..pool.capacity() {
        let handle = match pool.handle_at(i) {
            Some(handle) => handle,
            None => continue,
        };
        let hit = pool
            .slot(i)
            .map_or(false, |entity| body.intersects(&entity.bounds()));
        if hit {
            contacts += 1;
            if on_contact(handle) {
                pool.deactivate(i);
            }
        }
    }
    contacts
}
