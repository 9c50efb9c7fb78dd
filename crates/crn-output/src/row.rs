//! Plain data row type consumed by output sinks.

/// Species values of one trajectory at one output time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryRow<'a> {
    pub trajectory: u32,
    pub time:       f64,
    /// One value per species, in network order.
    pub values:     &'a [f64],
}
