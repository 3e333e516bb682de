use serde::Serialize;

use citypath_compute::{RunStats, ShortestPaths};
use citypath_core::{NodeIndex, SsspError};
use citypath_ingest::Region;

/// One destination in the route report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Destination {
    pub index: NodeIndex,
    pub city: String,
    /// `None` when the city cannot be reached from the start.
    pub distance: Option<f64>,
    pub path: Option<Vec<String>>,
}

/// Everything printed after a run, in city names rather than indices.
#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    pub region: String,
    pub start: String,
    pub destinations: Vec<Destination>,
    pub stats: RunStats,
}

impl RouteReport {
    pub fn build(
        region: &Region,
        paths: &ShortestPaths,
        destinations: &[NodeIndex],
        stats: RunStats,
    ) -> Result<Self, SsspError> {
        let destinations = destinations
            .iter()
            .map(|&index| {
                let path = match paths.path_to(index) {
                    Ok(nodes) => Some(
                        nodes
                            .into_iter()
                            .map(|n| region.cities[n].clone())
                            .collect(),
                    ),
                    Err(SsspError::Unreachable { .. }) => None,
                    Err(e) => return Err(e),
                };
                Ok(Destination {
                    index,
                    city: region.cities[index].clone(),
                    distance: paths.distance(index),
                    path,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            region: region.name.clone(),
            start: region.cities[paths.source].clone(),
            destinations,
            stats,
        })
    }

    pub fn unreachable_count(&self) -> usize {
        self.destinations
            .iter()
            .filter(|d| d.distance.is_none())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citypath_compute::ParallelDijkstra;
    use citypath_ingest::parse_region;

    fn region() -> Region {
        parse_region(
            "Goa",
            "Goa,Panaji,Margao,Vasco,Canacona\n\
             Panaji,0,33,-1,-1\n\
             Margao,33,0,29,-1\n\
             Vasco,-1,29,0,-1\n\
             Canacona,-1,-1,-1,0\n"
                .as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn names_paths_and_marks_unreachable() {
        let region = region();
        let graph = region.graph_from(0).unwrap();
        let (sp, stats) = ParallelDijkstra::with_workers(2)
            .run_with_stats(&graph)
            .unwrap();

        let report = RouteReport::build(&region, &sp, &[2, 3], stats).unwrap();
        assert_eq!(report.start, "Panaji");
        assert_eq!(report.destinations[0].distance, Some(62.0));
        assert_eq!(
            report.destinations[0].path.as_deref(),
            Some(&["Panaji".to_string(), "Margao".to_string(), "Vasco".to_string()][..])
        );
        assert_eq!(report.destinations[1].city, "Canacona");
        assert_eq!(report.destinations[1].path, None);
        assert_eq!(report.unreachable_count(), 1);
    }

    #[test]
    fn serializes_unreachable_as_null() {
        let region = region();
        let graph = region.graph_from(3).unwrap();
        let (sp, stats) = ParallelDijkstra::with_workers(1)
            .run_with_stats(&graph)
            .unwrap();

        let report = RouteReport::build(&region, &sp, &[0], stats).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["start"], "Canacona");
        assert!(json["destinations"][0]["distance"].is_null());
        assert!(json["destinations"][0]["path"].is_null());
        assert_eq!(json["stats"]["workers"], 1);
    }
}
