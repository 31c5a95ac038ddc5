//! Shrinking view of an instance used by the greedy rules.

use std::cmp::Ordering;

use stableset_core::{Instance, Objective, VertexId};

/// Non-negative ratio `num / den` compared without floating point.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Ratio {
    num: Objective,
    den: Objective,
}

impl Ratio {
    /// A zero denominator is treated as one; it only occurs with a zero
    /// numerator.
    pub(crate) fn new(num: Objective, den: Objective) -> Self {
        Self {
            num,
            den: den.max(1),
        }
    }

    pub(crate) fn compare(self, other: Self) -> Ordering {
        self.num
            .saturating_mul(other.den)
            .cmp(&other.num.saturating_mul(self.den))
    }
}

/// Vertices still available to a greedy rule, with their residual degrees.
#[derive(Debug)]
pub(crate) struct Residual<'a> {
    instance: &'a Instance,
    alive: Vec<bool>,
    degree: Vec<usize>,
}

impl<'a> Residual<'a> {
    pub(crate) fn new(instance: &'a Instance) -> Self {
        let n = instance.number_of_vertices();
        let degree = (0..n)
            .map(|v| instance.degree(VertexId::new(v)))
            .collect();
        Self {
            instance,
            alive: vec![true; n],
            degree,
        }
    }

    pub(crate) fn is_alive(&self, vertex: VertexId) -> bool {
        self.alive.get(vertex.get()).copied().unwrap_or(false)
    }

    pub(crate) fn degree(&self, vertex: VertexId) -> usize {
        self.degree.get(vertex.get()).copied().unwrap_or(0)
    }

    pub(crate) fn weight(&self, vertex: VertexId) -> Objective {
        self.instance.weight(vertex).map_or(0, Objective::from)
    }

    pub(crate) fn alive_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(v, _)| VertexId::new(v))
    }

    /// Weight of `vertex` plus its alive neighbours.
    pub(crate) fn closed_neighborhood_weight(&self, vertex: VertexId) -> Objective {
        self.instance
            .neighbors(vertex)
            .iter()
            .filter(|&&u| self.is_alive(u))
            .map(|&u| self.weight(u))
            .sum::<Objective>()
            .saturating_add(self.weight(vertex))
    }

    pub(crate) fn remove(&mut self, vertex: VertexId) {
        let Some(slot) = self.alive.get_mut(vertex.get()) else {
            return;
        };
        if !*slot {
            return;
        }
        *slot = false;
        let instance = self.instance;
        for &u in instance.neighbors(vertex) {
            if self.is_alive(u)
                && let Some(d) = self.degree.get_mut(u.get())
            {
                *d = d.saturating_sub(1);
            }
        }
    }

    pub(crate) fn remove_closed_neighborhood(&mut self, vertex: VertexId) {
        self.remove(vertex);
        let instance = self.instance;
        for &u in instance.neighbors(vertex) {
            self.remove(u);
        }
    }

    /// The alive vertex whose ratio is largest; ties go to the lowest id.
    pub(crate) fn argmax<F>(&self, mut ratio: F) -> Option<VertexId>
    where
        F: FnMut(&Self, VertexId) -> Ratio,
    {
        let mut best: Option<(VertexId, Ratio)> = None;
        for v in self.alive_vertices() {
            let candidate = ratio(self, v);
            let replace = best.is_none_or(|(_, current)| candidate.compare(current).is_gt());
            if replace {
                best = Some((v, candidate));
            }
        }
        best.map(|(v, _)| v)
    }
}
