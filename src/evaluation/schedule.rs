//! Working-time timeline of a solution.

use serde::Serialize;

use crate::distance::Time;
use crate::models::{Problem, Solution};
use crate::reduction::DerivedMatrix;

/// One served request on a truck's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Visit {
    /// Request index.
    pub request: usize,
    /// Arrival at the pickup, ready to load.
    pub start: Time,
    /// Departure from the drop after unloading.
    pub end: Time,
}

/// Timeline of one truck, starting at time 0 at its depot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruckSchedule {
    /// Truck index.
    pub truck: usize,
    /// Visits in service order.
    pub visits: Vec<Visit>,
    /// Time the truck is back at its depot.
    pub working_time: Time,
}

/// Per-truck timelines: derived-matrix legs between jobs plus the time
/// spent inside each job (handling at both ends and the loaded leg).
///
/// # Examples
///
/// ```
/// use u_drayage::distance::TravelTimeMatrix;
/// use u_drayage::evaluation::{RouteEvaluator, Schedule};
/// use u_drayage::models::{ContainerSize, Fleet, Problem, Request};
/// use u_drayage::reduction::reduce;
///
/// let distances = TravelTimeMatrix::from_rows(&[vec![0, 2], vec![3, 0]]).unwrap();
/// let fleet = Fleet::new(0, 0).with_truck(0);
/// let request = Request::new(1, ContainerSize::TwentyFt, 0, 1).with_durations(4, 5);
/// let problem = Problem::new(distances, fleet, vec![request]).unwrap();
/// let derived = reduce(&problem);
///
/// let solution = RouteEvaluator::new(&derived).build_solution(vec![vec![0]]);
/// let schedule = Schedule::build(&problem, &derived, &solution);
/// // leave at 0, load 4, drive 2, unload 5, drive home 3
/// assert_eq!(schedule.trucks()[0].visits[0].end, 11);
/// assert_eq!(schedule.total_working_time(), 14);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    trucks: Vec<TruckSchedule>,
}

impl Schedule {
    /// Builds the timeline of every route in `solution`.
    ///
    /// `solution` must be valid for `derived`, which must be the reduction
    /// of `problem`.
    pub fn build(problem: &Problem, derived: &DerivedMatrix, solution: &Solution) -> Self {
        let trucks = solution
            .routes()
            .iter()
            .map(|route| {
                let depot = derived.depot_node(route.truck());
                let mut time = 0;
                let mut prev = depot;
                let mut visits = Vec::with_capacity(route.len());

                for &request in route.requests() {
                    time += derived.get(prev, request);
                    let start = time;
                    time += problem.job_duration(request);
                    visits.push(Visit {
                        request,
                        start,
                        end: time,
                    });
                    prev = request;
                }
                time += derived.get(prev, depot);

                TruckSchedule {
                    truck: route.truck(),
                    visits,
                    working_time: time,
                }
            })
            .collect();

        Self { trucks }
    }

    /// Timelines, one per route.
    pub fn trucks(&self) -> &[TruckSchedule] {
        &self.trucks
    }

    /// Sum of working times over all trucks.
    pub fn total_working_time(&self) -> Time {
        self.trucks.iter().map(|t| t.working_time).sum()
    }

    /// Latest return time over all trucks.
    pub fn makespan(&self) -> Time {
        self.trucks.iter().map(|t| t.working_time).max().unwrap_or(0)
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
            vec![0, 3, 4, 6],
            vec![3, 0, 2, 5],
            vec![4, 2, 0, 1],
            vec![6, 5, 1, 0],
        ])
        .expect("square");
        let fleet = Fleet::new(3, 10).with_trucks([0, 0]);
        let requests = vec![
            Request::new(1, ContainerSize::TwentyFt, 1, 2).with_durations(5, 5),
            Request::new(2, ContainerSize::FortyFt, 2, 1)
                .with_pickup_trailer(true)
                .with_durations(2, 3),
        ];
        Problem::new(distances, fleet, requests).expect("valid")
    }

    #[test]
    fn test_working_time_is_cost_plus_jobs() {
        let problem = problem();
        let derived = reduce(&problem);
        let solution = RouteEvaluator::new(&derived).build_solution(vec![vec![0, 1], vec![]]);
        let schedule = Schedule::build(&problem, &derived, &solution);
        let jobs = problem.job_duration(0) + problem.job_duration(1);
        assert_eq!(schedule.total_working_time(), solution.total_cost() + jobs);
        assert_eq!(schedule.trucks()[1].working_time, 0);
    }

    #[test]
    fn test_visit_times() {
        let problem = problem();
        let derived = reduce(&problem);
        let solution = RouteEvaluator::new(&derived).build_solution(vec![vec![0, 1], vec![]]);
        let schedule = Schedule::build(&problem, &derived, &solution);
        let visits = &schedule.trucks()[0].visits;
        // depot 0 → pickup 1 = 3; job = 5 + d(1, 2) + 5 = 12
        assert_eq!(visits[0], Visit { request: 0, start: 3, end: 15 });
        // drop 2 → trailer depot 3 → pickup 2 = 1 + 1, no handling; job = 2 + 2 + 3
        assert_eq!(visits[1], Visit { request: 1, start: 17, end: 24 });
        assert_eq!(schedule.makespan(), schedule.trucks()[0].working_time);
    }
}
