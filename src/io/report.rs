//! Serializable run reports.
//!
//! Reports speak the input's language: request ids instead of request
//! indices and 1-based location numbers.

use serde::Serialize;

use crate::distance::Time;
use crate::evaluation::Schedule;
use crate::models::{Problem, Solution, VirtualNode};
use crate::reduction::DerivedMatrix;

/// A served request on a truck's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitReport {
    /// External request id.
    pub request: usize,
    /// Arrival at the pickup.
    pub start: Time,
    /// Departure from the drop.
    pub end: Time,
}

/// One truck's route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruckReport {
    /// Truck index, in input order.
    pub truck: usize,
    /// 1-based depot location.
    pub depot: usize,
    /// External request ids in service order.
    pub requests: Vec<usize>,
    /// Route cost from the derived matrix.
    pub cost: Time,
    /// Route cost plus time spent inside jobs.
    pub working_time: Time,
    /// Timeline of the route.
    pub visits: Vec<VisitReport>,
}

/// Result of a solving run.
///
/// # Examples
///
/// ```
/// use u_drayage::io::{parse_problem, Report};
/// use u_drayage::optimizer::{LocalSearchOptimizer, RouteOptimizer};
/// use u_drayage::reduction::reduce;
///
/// let problem = parse_problem(
///     "L 2 E 4  1 1 0  1 2 3  2 1 4  2 2 0  TRAILER 1 0  TRUCKS 1  T 1
///      R 5 20 1 P 0 2 D 0  #",
/// )
/// .unwrap();
/// let derived = reduce(&problem);
/// let solution = LocalSearchOptimizer.solve(&derived).unwrap();
///
/// let report = Report::new("local-search", &problem, &derived, &solution);
/// assert_eq!(report.total_cost, 4);
/// assert_eq!(report.trucks[0].requests, vec![5]);
/// assert_eq!(report.trucks[0].depot, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Strategy that produced the solution.
    pub strategy: String,
    /// Sum of route costs.
    pub total_cost: Time,
    /// Sum of truck working times.
    pub total_working_time: Time,
    /// Latest truck return.
    pub makespan: Time,
    /// One entry per truck.
    pub trucks: Vec<TruckReport>,
}

impl Report {
    /// Builds a report for `solution`, which must be valid for `derived`,
    /// the reduction of `problem`.
    pub fn new(strategy: &str, problem: &Problem, derived: &DerivedMatrix, solution: &Solution) -> Self {
        let schedule = Schedule::build(problem, derived, solution);
        let request_id = |index: usize| problem.request(index).id();

        let trucks = solution
            .routes()
            .iter()
            .zip(schedule.trucks())
            .map(|(route, timeline)| TruckReport {
                truck: route.truck(),
                depot: problem.fleet().truck_depot(route.truck()) + 1,
                requests: route.requests().iter().map(|&r| request_id(r)).collect(),
                cost: route.cost(),
                working_time: timeline.working_time,
                visits: timeline
                    .visits
                    .iter()
                    .map(|visit| VisitReport {
                        request: request_id(visit.request),
                        start: visit.start,
                        end: visit.end,
                    })
                    .collect(),
            })
            .collect();

        Self {
            strategy: strategy.to_string(),
            total_cost: solution.total_cost(),
            total_working_time: schedule.total_working_time(),
            makespan: schedule.makespan(),
            trucks,
        }
    }
}

/// Label of a derived-matrix row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeLabel {
    /// A request node, by external id.
    Request {
        /// External request id.
        id: usize,
    },
    /// A truck's depot node.
    Depot {
        /// Truck index.
        truck: usize,
        /// 1-based depot location.
        location: usize,
    },
}

/// The derived matrix with labelled nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixReport {
    /// One label per row/column.
    pub nodes: Vec<NodeLabel>,
    /// Matrix rows.
    pub rows: Vec<Vec<Time>>,
}

impl MatrixReport {
    /// Labels `derived`, the reduction of `problem`.
    pub fn new(problem: &Problem, derived: &DerivedMatrix) -> Self {
        let nodes = (0..derived.dimension())
            .map(|index| match derived.node(index) {
                VirtualNode::Request(r) => NodeLabel::Request {
                    id: problem.request(r).id(),
                },
                VirtualNode::Depot(truck) => NodeLabel::Depot {
                    truck,
                    location: problem.fleet().truck_depot(truck) + 1,
                },
            })
            .collect();
        let rows = derived.rows().map(<[Time]>::to_vec).collect();
        Self { nodes, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::TravelTimeMatrix;
    use crate::evaluation::RouteEvaluator;
    use crate::models::{ContainerSize, Fleet, Request};
    use crate::reduction::reduce;

    fn problem() -> Problem {
        let distances = TravelTimeMatrix::from_rows(&[
            vec![0, 2, 9],
            vec![3, 0, 6],
            vec![8, 5, 0],
        ])
        .expect("square");
        let fleet = Fleet::new(0, 10).with_trucks([1, 2]);
        let requests = vec![
            Request::new(30, ContainerSize::FortyFt, 1, 2).with_durations(1, 2),
            Request::new(40, ContainerSize::TwentyFt, 2, 1).with_drop_trailer(true),
        ];
        Problem::new(distances, fleet, requests).expect("valid")
    }

    #[test]
    fn test_report_uses_external_ids() {
        let problem = problem();
        let derived = reduce(&problem);
        let solution = RouteEvaluator::new(&derived).build_solution(vec![vec![1, 0], vec![]]);
        let report = Report::new("manual", &problem, &derived, &solution);

        assert_eq!(report.strategy, "manual");
        assert_eq!(report.trucks.len(), 2);
        assert_eq!(report.trucks[0].requests, vec![40, 30]);
        assert_eq!(report.trucks[0].depot, 2);
        assert_eq!(report.trucks[1].depot, 3);
        assert!(report.trucks[1].requests.is_empty());
        assert_eq!(report.trucks[0].visits[1].request, 30);
        assert_eq!(report.total_cost, solution.total_cost());
        assert!(report.total_working_time >= report.total_cost);
    }

    #[test]
    fn test_report_json_shape() {
        let problem = problem();
        let derived = reduce(&problem);
        let solution = RouteEvaluator::new(&derived).build_solution(vec![vec![0], vec![1]]);
        let json = serde_json::to_value(Report::new("x", &problem, &derived, &solution))
            .expect("serializable");
        assert_eq!(json["trucks"][1]["requests"][0], 40);
        assert!(json["total_working_time"].is_i64());
    }

    #[test]
    fn test_matrix_report_labels() {
        let problem = problem();
        let derived = reduce(&problem);
        let report = MatrixReport::new(&problem, &derived);

        assert_eq!(report.rows.len(), 4);
        assert!(report.rows.iter().all(|row| row.len() == 4));
        assert_eq!(report.nodes[0], NodeLabel::Request { id: 30 });
        assert_eq!(
            report.nodes[3],
            NodeLabel::Depot {
                truck: 1,
                location: 3
            }
        );
        assert_eq!(report.rows[2][0], derived.get(2, 0));

        let json = serde_json::to_value(&report).expect("serializable");
        assert_eq!(json["nodes"][2]["kind"], "depot");
        assert_eq!(json["nodes"][1]["id"], 40);
    }
}
