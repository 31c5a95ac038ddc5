//! Greedy rules and the weighted swap local search.

use log::debug;
use stableset_core::{Instance, Objective, VertexId};

use crate::residual::{Ratio, Residual};

/// Select `argmax w(v) / (deg(v) + 1)` and delete its closed neighbourhood
/// until no vertex is left.
pub(crate) fn gwmin(instance: &Instance) -> Vec<VertexId> {
    select_until_empty(instance, |residual, v| {
        Ratio::new(residual.weight(v), width(residual.degree(v)).saturating_add(1))
    })
}

/// Select `argmax w(v) / w(N[v])` and delete its closed neighbourhood until
/// no vertex is left.
pub(crate) fn gwmin2(instance: &Instance) -> Vec<VertexId> {
    select_until_empty(instance, |residual, v| {
        Ratio::new(residual.weight(v), residual.closed_neighborhood_weight(v))
    })
}

/// Delete `argmin w(v) / (deg(v) (deg(v) + 1))` among vertices that still
/// have an edge, until none does; the survivors are stable.
pub(crate) fn gwmax(instance: &Instance) -> Vec<VertexId> {
    let mut residual = Residual::new(instance);
    loop {
        let mut worst: Option<(VertexId, Ratio)> = None;
        for v in residual.alive_vertices() {
            let degree = width(residual.degree(v));
            if degree == 0 {
                continue;
            }
            let candidate = Ratio::new(
                residual.weight(v),
                degree.saturating_mul(degree.saturating_add(1)),
            );
            if worst.is_none_or(|(_, current)| candidate.compare(current).is_lt()) {
                worst = Some((v, candidate));
            }
        }
        let Some((v, _)) = worst else {
            break;
        };
        residual.remove(v);
    }
    residual.alive_vertices().collect()
}

/// Best of the three greedy rules, improved by [`local_search`].
pub(crate) fn strong(instance: &Instance, rounds: usize) -> Vec<VertexId> {
    let candidates = [gwmin(instance), gwmax(instance), gwmin2(instance)];
    let best = candidates
        .into_iter()
        .max_by_key(|vertices| instance.weight_of(vertices))
        .unwrap_or_default();
    local_search(instance, &best, rounds)
}

/// Repeatedly insert any vertex whose weight exceeds the weight of its
/// selected neighbours, evicting those neighbours.
///
/// Each insertion strictly increases the objective, so the search ends after
/// at most `rounds` passes or when a pass finds no improving move.
pub(crate) fn local_search(
    instance: &Instance,
    start: &[VertexId],
    rounds: usize,
) -> Vec<VertexId> {
    let mut selected = vec![false; instance.number_of_vertices()];
    for v in start {
        if let Some(slot) = selected.get_mut(v.get()) {
            *slot = true;
        }
    }
    let is_selected =
        |selected: &[bool], v: VertexId| selected.get(v.get()).copied().unwrap_or(false);

    let mut passes = 0;
    while passes < rounds {
        passes += 1;
        let mut improved = false;
        for index in 0..instance.number_of_vertices() {
            let v = VertexId::new(index);
            if is_selected(&selected, v) {
                continue;
            }
            let evicted: Objective = instance
                .neighbors(v)
                .iter()
                .filter(|&&u| is_selected(&selected, u))
                .filter_map(|&u| instance.weight(u))
                .map(Objective::from)
                .sum();
            let gain = instance
                .weight(v)
                .map_or(0, Objective::from)
                .saturating_sub(evicted);
            if gain <= 0 {
                continue;
            }
            for &u in instance.neighbors(v) {
                if let Some(slot) = selected.get_mut(u.get()) {
                    *slot = false;
                }
            }
            if let Some(slot) = selected.get_mut(index) {
                *slot = true;
            }
            improved = true;
        }
        if !improved {
            break;
        }
    }
    debug!("local search finished after {passes} passes");

    selected
        .iter()
        .enumerate()
        .filter(|&(_, &chosen)| chosen)
        .map(|(v, _)| VertexId::new(v))
        .collect()
}

fn select_until_empty<F>(instance: &Instance, mut ratio: F) -> Vec<VertexId>
where
    F: FnMut(&Residual<'_>, VertexId) -> Ratio,
{
    let mut residual = Residual::new(instance);
    let mut selected = Vec::new();
    while let Some(v) = residual.argmax(&mut ratio) {
        selected.push(v);
        residual.remove_closed_neighborhood(v);
    }
    selected.sort_unstable();
    selected
}

fn width(degree: usize) -> Objective {
    Objective::try_from(degree).unwrap_or(Objective::MAX)
}
