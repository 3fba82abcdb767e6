//! Synthetic contact network: fully-connected households plus random
//! community edges.

use tti_core::{NodeId, SimRng};

pub struct Population {
    /// Adjacency lists, symmetric, no self-loops.
    pub contacts:   Vec<Vec<NodeId>>,
    /// Consecutive blocks of `household_size` nodes.
    pub households: Vec<Vec<NodeId>>,
}

/// Build a population of `nodes` people.
///
/// Each household is a clique; on top of that, `nodes × community_degree / 2`
/// random community edges are drawn (duplicates and self-loops rejected).
pub fn build_population(
    nodes:            usize,
    household_size:   usize,
    community_degree: f64,
    rng:              &mut SimRng,
) -> Population {
    let household_size = household_size.max(1);
    let mut contacts: Vec<Vec<NodeId>> = vec![Vec::new(); nodes];

    let households: Vec<Vec<NodeId>> = NodeId::all(nodes)
        .collect::<Vec<_>>()
        .chunks(household_size)
        .map(<[NodeId]>::to_vec)
        .collect();

    for members in &households {
        for &a in members {
            for &b in members {
                if a != b {
                    contacts[a.index()].push(b);
                }
            }
        }
    }

    if nodes > 1 {
        let target = (nodes as f64 * community_degree / 2.0).round() as usize;
        let mut added = 0;
        let mut attempts = 0;
        while added < target && attempts < target * 20 {
            attempts += 1;
            let a = NodeId(rng.gen_range(0..nodes as u32));
            let b = NodeId(rng.gen_range(0..nodes as u32));
            if a == b || contacts[a.index()].contains(&b) {
                continue;
            }
            contacts[a.index()].push(b);
            contacts[b.index()].push(a);
            added += 1;
        }
    }

    Population { contacts, households }
}
