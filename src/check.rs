use std::fmt;

use geo::HaversineDistance;

use crate::{
    merge::centers,
    model::{Anchor, Restroom},
};

pub enum Finding {
    /// Placed farther from the building center than its radius.
    Outside {
        index: usize,
        building: String,
        distance: f64,
        radius: f64,
    },
    /// Building has a center but the record has no coordinates yet.
    Unplaced { index: usize, building: String },
}

#[derive(Default)]
pub struct Report {
    pub checked: usize,
    pub findings: Vec<Finding>,
}

pub fn run(anchors: &[Anchor], restrooms: &[Restroom]) -> Report {
    let centers = centers(anchors);
    let mut report = Report::default();

    for (index, restroom) in restrooms.iter().enumerate() {
        let Some(anchor) = restroom.building().and_then(|x| centers.get(x)) else {
            continue;
        };
        let building = anchor.building.clone();

        let Some(point) = restroom.point() else {
            report.findings.push(Finding::Unplaced { index, building });
            continue;
        };

        report.checked += 1;
        let distance = point.haversine_distance(&anchor.center.point());
        if distance > anchor.radius {
            report.findings.push(Finding::Outside {
                index,
                building,
                distance,
                radius: anchor.radius,
            });
        }
    }

    report
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outside {
                index,
                building,
                distance,
                radius,
            } => write!(
                f,
                "- #{index} ({building}) is {distance:.01}m from center, radius {radius:.01}m"
            ),
            Self::Unplaced { index, building } => {
                write!(f, "- #{index} ({building}) has no coordinates")
            }
        }
    }
}
