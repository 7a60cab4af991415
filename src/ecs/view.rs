//! Intersection queries over component stores
//!
//! A view materializes, at construction time, the set of entities present in
//! every one of its stores. The smallest store drives the intersection so
//! cost is bounded by the rarest component, and the matched set is sorted by
//! id so iteration order is deterministic across runs.
//!
//! `for_each` makes one forward pass with live mutable references and may be
//! called again on the same view. Algorithms that need indexed random access
//! to the matched set (pairwise collision tests, flock neighbor lookups)
//! call `into_packed` once and index into the result instead of re-querying
//! per element.

use std::collections::{HashMap, HashSet};

use super::{ComponentStore, EntityId};

const MISSING: &str = "view entity is missing a matched component";

/// Single-store view. Matched set is every entity in the store.
pub struct View1<'w, A> {
    a: &'w mut ComponentStore<A>,
    matched: Vec<EntityId>,
}

impl<'w, A> View1<'w, A> {
    pub fn new(a: &'w mut ComponentStore<A>) -> Self {
        let mut matched: Vec<EntityId> = a.entities().collect();
        matched.sort_unstable();
        Self { a, matched }
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.matched
    }

    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    pub fn for_each(&mut self, mut f: impl FnMut(EntityId, &mut A)) {
        for &id in &self.matched {
            let a = self.a.get_mut(id).expect(MISSING);
            f(id, a);
        }
    }

    pub fn into_packed(self) -> Vec<(EntityId, &'w mut A)> {
        let Self { a, matched } = self;
        let wanted: HashSet<EntityId> = matched.iter().copied().collect();
        let mut a_refs: HashMap<EntityId, &'w mut A> = a
            .iter_mut()
            .filter(|(id, _)| wanted.contains(id))
            .collect();
        matched
            .into_iter()
            .map(|id| {
                let a = a_refs.remove(&id).expect(MISSING);
                (id, a)
            })
            .collect()
    }
}

/// Two-store intersection view.
pub struct View2<'w, A, B> {
    a: &'w mut ComponentStore<A>,
    b: &'w mut ComponentStore<B>,
    matched: Vec<EntityId>,
}

impl<'w, A, B> View2<'w, A, B> {
    pub fn new(a: &'w mut ComponentStore<A>, b: &'w mut ComponentStore<B>) -> Self {
        let mut matched: Vec<EntityId> = if a.len() <= b.len() {
            a.entities().filter(|id| b.has(*id)).collect()
        } else {
            b.entities().filter(|id| a.has(*id)).collect()
        };
        matched.sort_unstable();
        Self { a, b, matched }
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.matched
    }

    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    pub fn for_each(&mut self, mut f: impl FnMut(EntityId, &mut A, &mut B)) {
        for &id in &self.matched {
            let a = self.a.get_mut(id).expect(MISSING);
            let b = self.b.get_mut(id).expect(MISSING);
            f(id, a, b);
        }
    }

    pub fn into_packed(self) -> Vec<(EntityId, &'w mut A, &'w mut B)> {
        let Self { a, b, matched } = self;
        let wanted: HashSet<EntityId> = matched.iter().copied().collect();
        let mut a_refs: HashMap<EntityId, &'w mut A> = a
            .iter_mut()
            .filter(|(id, _)| wanted.contains(id))
            .collect();
        let mut b_refs: HashMap<EntityId, &'w mut B> = b
            .iter_mut()
            .filter(|(id, _)| wanted.contains(id))
            .collect();
        matched
            .into_iter()
            .map(|id| {
                let a = a_refs.remove(&id).expect(MISSING);
                let b = b_refs.remove(&id).expect(MISSING);
                (id, a, b)
            })
            .collect()
    }
}

/// Three-store intersection view.
pub struct View3<'w, A, B, C> {
    a: &'w mut ComponentStore<A>,
    b: &'w mut ComponentStore<B>,
    c: &'w mut ComponentStore<C>,
    matched: Vec<EntityId>,
}

impl<'w, A, B, C> View3<'w, A, B, C> {
    pub fn new(
        a: &'w mut ComponentStore<A>,
        b: &'w mut ComponentStore<B>,
        c: &'w mut ComponentStore<C>,
    ) -> Self {
        let smallest = a.len().min(b.len()).min(c.len());
        let mut matched: Vec<EntityId> = if a.len() == smallest {
            a.entities().filter(|id| b.has(*id) && c.has(*id)).collect()
        } else if b.len() == smallest {
            b.entities().filter(|id| a.has(*id) && c.has(*id)).collect()
        } else {
            c.entities().filter(|id| a.has(*id) && b.has(*id)).collect()
        };
        matched.sort_unstable();
        Self { a, b, c, matched }
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.matched
    }

    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    pub fn for_each(&mut self, mut f: impl FnMut(EntityId, &mut A, &mut B, &mut C)) {
        for &id in &self.matched {
            let a = self.a.get_mut(id).expect(MISSING);
            let b = self.b.get_mut(id).expect(MISSING);
            let c = self.c.get_mut(id).expect(MISSING);
            f(id, a, b, c);
        }
    }

    pub fn into_packed(self) -> Vec<(EntityId, &'w mut A, &'w mut B, &'w mut C)> {
        let Self { a, b, c, matched } = self;
        let wanted: HashSet<EntityId> = matched.iter().copied().collect();
        let mut a_refs: HashMap<EntityId, &'w mut A> = a
            .iter_mut()
            .filter(|(id, _)| wanted.contains(id))
            .collect();
        let mut b_refs: HashMap<EntityId, &'w mut B> = b
            .iter_mut()
            .filter(|(id, _)| wanted.contains(id))
            .collect();
        let mut c_refs: HashMap<EntityId, &'w mut C> = c
            .iter_mut()
            .filter(|(id, _)| wanted.contains(id))
            .collect();
        matched
            .into_iter()
            .map(|id| {
                let a = a_refs.remove(&id).expect(MISSING);
                let b = b_refs.remove(&id).expect(MISSING);
                let c = c_refs.remove(&id).expect(MISSING);
                (id, a, b, c)
            })
            .collect()
    }
}
