//! Whitespace-token parser for drayage instances.
//!
//! # Format
//!
//! ```text
//! <label> N <label> <label>
//! u v d            (N² directed edges, 1-based u and v)
//! <label> <trailer depot> <trailer handling time>
//! <label> D
//! <label> <truck depot>          (D lines)
//! <marker> id size pickup action duration drop action duration
//! ...
//! #
//! ```
//!
//! Line breaks carry no meaning; only the token order does. The pickup
//! action `PICKUP_CONTAINER_TRAILER` and the drop action
//! `DROP_CONTAINER_TRAILER` mark trailer requirements, any other action
//! token leaves them unset. Everything after the `#` terminator is ignored.

use std::str::{FromStr, SplitWhitespace};

use tracing::{debug, warn};

use crate::distance::{Time, TravelTimeMatrix};
use crate::error::{DrayageError, Result};
use crate::models::{ContainerSize, Fleet, Problem, Request};

const TERMINATOR: &str = "#";
const PICKUP_WITH_TRAILER: &str = "PICKUP_CONTAINER_TRAILER";
const DROP_WITH_TRAILER: &str = "DROP_CONTAINER_TRAILER";

/// Parses and validates a drayage instance.
///
/// # Errors
///
/// - [`DrayageError::MalformedInput`] for a missing or non-numeric token
///   before the request list, a `0` location index or an unknown
///   container size.
/// - [`DrayageError::IndexOutOfRange`] for a location index above N.
/// - [`DrayageError::IncompleteRequestList`] if the input ends before `#`.
/// - Any validation error of [`Problem::new`].
///
/// # Examples
///
/// ```
/// use u_drayage::io::parse_problem;
///
/// let input = "
///     LOCATIONS 2 EDGES 4
///     1 1 0   1 2 5
///     2 1 6   2 2 0
///     TRAILER 1 3
///     TRUCKS 1
///     T1 1
///     R 10 40 2 PICKUP_CONTAINER_TRAILER 4 1 DROP_CONTAINER 2
///     ##
/// ";
/// let problem = parse_problem(input).unwrap();
/// assert_eq!(problem.num_locations(), 2);
/// assert_eq!(problem.fleet().truck_depots(), &[0]);
///
/// let request = problem.request(0);
/// assert_eq!(request.id(), 10);
/// assert_eq!((request.pickup(), request.drop_location()), (1, 0));
/// assert!(request.pickup_requires_trailer());
/// assert!(!request.drop_requires_trailer());
/// ```
pub fn parse_problem(input: &str) -> Result<Problem> {
    let mut tokens = Tokens::new(input);

    tokens.skip("locations label")?;
    let size: usize = tokens.number("location count")?;
    tokens.skip("edge label")?;
    tokens.skip("edge count")?;
    let distances = parse_matrix(&mut tokens, size)?;

    tokens.skip("trailer label")?;
    let trailer_depot = tokens.location("trailer depot", size)?;
    let handling_time: Time = tokens.number("trailer handling time")?;
    let mut fleet = Fleet::new(trailer_depot, handling_time);

    tokens.skip("trucks label")?;
    let num_trucks: usize = tokens.number("truck count")?;
    for _ in 0..num_trucks {
        tokens.skip("truck label")?;
        fleet = fleet.with_truck(tokens.location("truck depot", size)?);
    }

    tokens.enter_request_list();
    let mut requests = Vec::new();
    while tokens.next("request marker")? != TERMINATOR {
        requests.push(parse_request(&mut tokens, size)?);
    }

    debug!(
        locations = size,
        trucks = num_trucks,
        requests = requests.len(),
        "parsed instance"
    );
    Problem::new(distances, fleet, requests)
}

fn parse_matrix(tokens: &mut Tokens<'_>, size: usize) -> Result<TravelTimeMatrix> {
    let entries = size
        .checked_mul(size)
        .ok_or_else(|| DrayageError::MalformedInput(format!("location count {size} is too large")))?;

    // Collect first so the matrix is only allocated once the input has
    // proven it really holds N² triples.
    let mut triples = Vec::new();
    for _ in 0..entries {
        let from = tokens.location("matrix row", size)?;
        let to = tokens.location("matrix column", size)?;
        let time: Time = tokens.number("travel time")?;
        triples.push((from, to, time));
    }

    let mut matrix = TravelTimeMatrix::new(size);
    let mut seen = vec![false; entries];
    for (from, to, time) in triples {
        let slot = from * size + to;
        if seen[slot] {
            warn!(
                from = from + 1,
                to = to + 1,
                time,
                "travel time given twice; keeping the later value"
            );
        }
        seen[slot] = true;
        matrix.set(from, to, time);
    }
    Ok(matrix)
}

fn parse_request(tokens: &mut Tokens<'_>, size: usize) -> Result<Request> {
    let id: usize = tokens.number("request id")?;
    let feet: u32 = tokens.number("container size")?;
    let container = ContainerSize::from_feet(feet).ok_or_else(|| {
        DrayageError::MalformedInput(format!("container size {feet} for request {id}, expected 20 or 40"))
    })?;

    let pickup = tokens.location("pickup", size)?;
    let pickup_action = tokens.next("pickup action")?;
    let pickup_duration: Time = tokens.number("pickup duration")?;

    let drop = tokens.location("drop", size)?;
    let drop_action = tokens.next("drop action")?;
    let drop_duration: Time = tokens.number("drop duration")?;

    Ok(Request::new(id, container, pickup, drop)
        .with_pickup_trailer(pickup_action == PICKUP_WITH_TRAILER)
        .with_drop_trailer(drop_action == DROP_WITH_TRAILER)
        .with_durations(pickup_duration, drop_duration))
}

/// Token cursor that knows which section it is reading.
struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
    consumed: usize,
    in_request_list: bool,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_whitespace(),
            consumed: 0,
            in_request_list: false,
        }
    }

    fn enter_request_list(&mut self) {
        self.in_request_list = true;
    }

    fn next(&mut self, what: &str) -> Result<&'a str> {
        match self.inner.next() {
            Some(token) => {
                self.consumed += 1;
                Ok(token)
            }
            None if self.in_request_list => Err(DrayageError::IncompleteRequestList),
            None => Err(DrayageError::MalformedInput(format!(
                "input ended after {} tokens, expected {what}",
                self.consumed
            ))),
        }
    }

    fn skip(&mut self, what: &str) -> Result<()> {
        self.next(what).map(|_| ())
    }

    fn number<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let token = self.next(what)?;
        token.parse().map_err(|_| {
            DrayageError::MalformedInput(format!(
                "expected {what} at token {}, found `{token}`",
                self.consumed
            ))
        })
    }

    /// Reads a 1-based location index and returns it 0-based.
    fn location(&mut self, role: &'static str, size: usize) -> Result<usize> {
        let index: usize = self.number(role)?;
        match index {
            0 => Err(DrayageError::MalformedInput(format!(
                "{role} location at token {} is 0, indices are 1-based",
                self.consumed
            ))),
            i if i > size => Err(DrayageError::IndexOutOfRange {
                role,
                index: i - 1,
                size,
            }),
            i => Ok(i - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduction::reduce;

    /// Three locations, trailer depot 1, one truck at 3, one request from
    /// 2 to 2 that leaves a trailer behind.
    const WORKED: &str = "
        LOCATIONS 3 EDGES 9
        1 1 0  1 2 0  1 3 4
        2 1 3  2 2 0  2 3 0
        3 1 0  3 2 7  3 3 0
        TRAILER 1 5
        TRUCKS 1
        T1 3
        REQ 7 20 2 PICKUP_CONTAINER 0 2 DROP_CONTAINER_TRAILER 0
        #
    ";

    fn header(trucks: &str) -> String {
        format!("L 2 E 4\n1 1 0\n1 2 1\n2 1 2\n2 2 0\nTRAILER 1 5\n{trucks}\n")
    }

    #[test]
    fn test_parse_worked_example() {
        let problem = parse_problem(WORKED).expect("valid");
        assert_eq!(problem.num_locations(), 3);
        assert_eq!(problem.fleet().trailer_depot(), 0);
        assert_eq!(problem.fleet().trailer_handling_time(), 5);
        assert_eq!(problem.distances().get(1, 0), 3);
        assert_eq!(problem.distances().get(0, 2), 4);
        assert_eq!(problem.distances().get(2, 1), 7);

        let request = problem.request(0);
        assert_eq!(request.id(), 7);
        assert_eq!(request.size(), ContainerSize::TwentyFt);
        assert!(!request.pickup_requires_trailer());
        assert!(request.drop_requires_trailer());

        let derived = reduce(&problem);
        assert_eq!(derived.get(1, 0), 7);
        assert_eq!(derived.get(0, 1), 12);
    }

    #[test]
    fn test_parse_multiple_trucks_and_requests() {
        let input = header("TRUCKS 2\nA 2\nB 2")
            + "R 1 40 1 PICKUP_CONTAINER_TRAILER 3 2 X 4\n"
            + "R 2 20 2 PICKUP 0 1 DROP_CONTAINER_TRAILER 1\n#";
        let problem = parse_problem(&input).expect("valid");
        assert_eq!(problem.fleet().truck_depots(), &[1, 1]);
        assert_eq!(problem.num_requests(), 2);
        assert_eq!(problem.request(0).size(), ContainerSize::FortyFt);
        assert_eq!(problem.request(0).pickup_duration(), 3);
        assert_eq!(problem.request(0).drop_duration(), 4);
        assert!(problem.request(0).pickup_requires_trailer());
        assert!(!problem.request(0).drop_requires_trailer());
        assert!(problem.request(1).drop_requires_trailer());
    }

    #[test]
    fn test_parse_no_requests() {
        let problem = parse_problem(&(header("TRUCKS 1\nA 1") + "#")).expect("valid");
        assert_eq!(problem.num_requests(), 0);
        assert_eq!(problem.num_trucks(), 1);
    }

    #[test]
    fn test_parse_ignores_tokens_after_terminator() {
        let input = header("TRUCKS 1\nA 1") + "# anything 1 2 3";
        assert!(parse_problem(&input).is_ok());
    }

    #[test]
    fn test_parse_missing_terminator() {
        let input = header("TRUCKS 1\nA 1") + "R 1 20 1 P 0 2 D 0";
        assert_eq!(parse_problem(&input), Err(DrayageError::IncompleteRequestList));

        let truncated = header("TRUCKS 1\nA 1") + "R 1 20 1 P";
        assert_eq!(parse_problem(&truncated), Err(DrayageError::IncompleteRequestList));

        let empty = header("TRUCKS 1\nA 1");
        assert_eq!(parse_problem(&empty), Err(DrayageError::IncompleteRequestList));
    }

    #[test]
    fn test_parse_truncated_matrix() {
        let err = parse_problem("L 2 E 4\n1 1 0\n1 2").expect_err("truncated");
        assert!(matches!(err, DrayageError::MalformedInput(_)));
    }

    #[test]
    fn test_parse_truncated_fleet() {
        let input = "L 1 E 1\n1 1 0\nTRAILER 1 5\nTRUCKS 2\nA 1";
        assert!(matches!(
            parse_problem(input),
            Err(DrayageError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_parse_non_numeric() {
        let err = parse_problem("L two E 4").expect_err("not a number");
        assert!(matches!(err, DrayageError::MalformedInput(msg) if msg.contains("`two`")));
    }

    #[test]
    fn test_parse_zero_index() {
        let err = parse_problem("L 1 E 1\n0 1 5").expect_err("0 is not 1-based");
        assert!(matches!(err, DrayageError::MalformedInput(_)));
    }

    #[test]
    fn test_parse_index_out_of_range() {
        let input = header("TRUCKS 1\nA 3") + "#";
        assert_eq!(
            parse_problem(&input),
            Err(DrayageError::IndexOutOfRange {
                role: "truck depot",
                index: 2,
                size: 2
            })
        );

        let input = header("TRUCKS 1\nA 1") + "R 1 20 1 P 0 9 D 0\n#";
        assert_eq!(
            parse_problem(&input),
            Err(DrayageError::IndexOutOfRange {
                role: "drop",
                index: 8,
                size: 2
            })
        );
    }

    #[test]
    fn test_parse_bad_container_size() {
        let input = header("TRUCKS 1\nA 1") + "R 1 30 1 P 0 2 D 0\n#";
        assert!(matches!(
            parse_problem(&input),
            Err(DrayageError::MalformedInput(msg)) if msg.contains("30")
        ));
    }

    #[test]
    fn test_parse_repeated_entry_overwrites() {
        let input = "L 2 E 4\n1 2 4\n1 2 9\n2 1 2\n2 2 0\nTRAILER 1 0\nTRUCKS 0\n#";
        let problem = parse_problem(input).expect("valid");
        assert_eq!(problem.distances().get(0, 1), 9);
        // (1, 1) never given
        assert_eq!(problem.distances().get(0, 0), 0);
    }

    #[test]
    fn test_parse_rejects_negative_time() {
        let input = "L 1 E 1\n1 1 -3\nTRAILER 1 0\nTRUCKS 0\n#";
        assert!(matches!(
            parse_problem(input),
            Err(DrayageError::NegativeTime(_))
        ));
    }

    #[test]
    fn test_parse_rejects_oversized_time() {
        // half of i64::MAX plus one: a trailer detour would overflow
        let input = "L 2 E 4\n1 1 0\n1 2 4611686018427387904\n2 1 1\n2 2 0\n\
                     TRAILER 1 5\nTRUCKS 1\nT1 1\n\
                     R 1 20 1 PICKUP 0 2 DROP_CONTAINER_TRAILER 0\n\
                     R 2 20 2 PICKUP 0 1 DROP 0\n#";
        assert_eq!(
            parse_problem(input),
            Err(DrayageError::TimeTooLarge {
                role: "travel time",
                limit: crate::distance::MAX_TIME
            })
        );
    }

    #[test]
    fn test_parse_duplicate_ids() {
        let input = header("TRUCKS 1\nA 1") + "R 1 20 1 P 0 2 D 0\nR 1 20 2 P 0 1 D 0\n#";
        assert_eq!(parse_problem(&input), Err(DrayageError::DuplicateRequest(1)));
    }
}
