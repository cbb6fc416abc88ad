use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;

use crate::{
    distribute::distribute_within_circle,
    model::{Anchor, Restroom},
};

/// Share of a building's radius that restrooms are spread over, keeping them
/// clear of the outline.
pub const PLACEMENT_SCALE: f64 = 0.6;

#[derive(Debug, Default, PartialEq)]
pub struct Summary {
    /// Records that were given coordinates.
    pub modified: usize,
    /// Buildings with restrooms but no usable center, and how many restrooms each.
    pub unmatched: BTreeMap<String, usize>,
    /// Records without a building.
    pub unlabelled: usize,
}

/// Building to anchor lookup. Later entries replace earlier ones.
pub fn centers(anchors: &[Anchor]) -> HashMap<&str, &Anchor> {
    anchors.iter().map(|x| (&*x.building, x)).collect()
}

/// Indices of each building's restrooms, in file order.
pub fn groups(restrooms: &[Restroom]) -> HashMap<String, Vec<usize>> {
    restrooms
        .iter()
        .enumerate()
        .filter_map(|(i, x)| Some((x.building()?.to_string(), i)))
        .into_group_map()
}

/// Places every restroom whose building has a center. The i-th restroom of a
/// building gets the i-th generated point; others are left as they are.
pub fn apply(anchors: &[Anchor], restrooms: &mut [Restroom]) -> Summary {
    let centers = centers(anchors);
    let groups = groups(restrooms);

    let mut summary = Summary {
        unlabelled: restrooms.len() - groups.values().map(Vec::len).sum::<usize>(),
        ..Default::default()
    };
    for (building, members) in groups {
        let Some(anchor) = centers.get(&*building) else {
            summary.unmatched.insert(building, members.len());
            continue;
        };

        let points = distribute_within_circle(
            anchor.center.lat,
            anchor.center.lng,
            anchor.radius * PLACEMENT_SCALE,
            members.len(),
        );
        for (i, (lat, lng)) in members.into_iter().zip(points) {
            restrooms[i].set_point(lat, lng);
            summary.modified += 1;
        }
    }

    summary
}
