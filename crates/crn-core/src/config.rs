//! Run configuration and the single-dash argument grammar.
//!
//! # Grammar
//!
//! | flag        | value        | effect                                       |
//! |-------------|--------------|----------------------------------------------|
//! | `-s <int>`  | `i64`        | sets `random_seed`, clears `seed_from_wall_clock` |
//! | `-e <f64>`  | `f64`        | sets `end_time`                              |
//! | `-i <f64>`  | `f64`        | sets `increment`                             |
//! | `-tr <u32>` | `u32`        | sets `trajectory_count`                      |
//! | `-ti <u32>` | `u32`        | sets `timestep_count`                        |
//!
//! A token is a flag if it starts with `-` and is longer than one character.
//! The flag is keyed on its first letter (and on its third character for
//! `-t`), and its value is the next token, which is consumed and never
//! re-scanned as a flag.  Unrecognised flags are ignored.  A flag with no
//! following token is ignored.  A value that does not parse is reported as
//! [`CrnError::MalformedArgument`].

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{CrnError, CrnResult, Timeline};

/// Parameters of one simulation run.
///
/// Mutated only while scanning arguments; treat it as frozen once
/// [`RunConfig::parse_args`] has returned.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Number of independent trajectories.  Default 0.
    pub trajectory_count: u32,

    /// Number of output steps over `[0, end_time]`.  Default 0.
    pub timestep_count: u32,

    /// Simulated end time.  Must be finite and positive.  Default 100.0.
    pub end_time: f64,

    /// Integration step size.  0 means "derive from `end_time / timestep_count`".
    pub increment: f64,

    /// Master seed.  Meaningful once resolved (see [`with_resolved_seed`][Self::with_resolved_seed]).
    pub random_seed: i64,

    /// `true` until an explicit `-s` flag is seen.
    pub seed_from_wall_clock: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            trajectory_count:     0,
            timestep_count:       0,
            end_time:             100.0,
            increment:            0.0,
            random_seed:          0,
            seed_from_wall_clock: true,
        }
    }
}

impl RunConfig {
    /// Scan `args` (program name excluded) into a configuration.
    ///
    /// Does not resolve the wall-clock seed; call
    /// [`with_resolved_seed`][Self::with_resolved_seed] afterwards.
    pub fn parse_args<I, S>(args: I) -> CrnResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        let mut tokens = args.into_iter();

        while let Some(token) = tokens.next() {
            let flag = token.as_ref();
            if flag.len() <= 1 || !flag.starts_with('-') {
                continue;
            }
            let Some(value) = tokens.next() else {
                log::debug!("flag {flag} has no value; ignored");
                break;
            };
            config.apply(flag, value.as_ref())?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse and resolve the seed in one step.
    pub fn from_args<I, S>(args: I) -> CrnResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::parse_args(args)?.with_resolved_seed())
    }

    fn apply(&mut self, flag: &str, value: &str) -> CrnResult<()> {
        let mut chars = flag.chars().skip(1);
        match (chars.next(), chars.next()) {
            (Some('s'), _) => {
                self.random_seed = parse_value(flag, value, "integer")?;
                self.seed_from_wall_clock = false;
            }
            (Some('e'), _) => self.end_time = parse_value(flag, value, "number")?,
            (Some('i'), _) => self.increment = parse_value(flag, value, "number")?,
            (Some('t'), Some('r')) => {
                self.trajectory_count = parse_value(flag, value, "unsigned integer")?;
            }
            (Some('t'), Some('i')) => {
                self.timestep_count = parse_value(flag, value, "unsigned integer")?;
            }
            _ => log::debug!("ignoring unrecognised flag {flag}"),
        }
        Ok(())
    }

    /// Check the numeric invariants of the configuration.
    pub fn validate(&self) -> CrnResult<()> {
        if !(self.end_time.is_finite() && self.end_time > 0.0) {
            return Err(CrnError::Config(format!(
                "end time must be finite and positive, got {}",
                self.end_time
            )));
        }
        if !(self.increment.is_finite() && self.increment >= 0.0) {
            return Err(CrnError::Config(format!(
                "increment must be finite and non-negative, got {}",
                self.increment
            )));
        }
        Ok(())
    }

    /// If no explicit seed was given, take one from the wall clock.
    ///
    /// The clock seed is not cryptographically secure; it only varies runs
    /// from one invocation to the next.
    pub fn with_resolved_seed(mut self) -> Self {
        if self.seed_from_wall_clock {
            self.random_seed = wall_clock_seed();
            log::info!("seeded from wall clock: {}", self.random_seed);
        }
        self
    }

    /// Step size handed to the solver: `increment` when positive, otherwise
    /// `end_time / timestep_count`.
    pub fn resolved_increment(&self) -> CrnResult<f64> {
        if self.increment > 0.0 {
            Ok(self.increment)
        } else if self.timestep_count > 0 {
            Ok(self.end_time / self.timestep_count as f64)
        } else {
            Err(CrnError::Config(
                "cannot derive increment: both increment and timestep count are zero".into(),
            ))
        }
    }

    /// The output sampling grid for this run.
    ///
    /// Fails with [`CrnError::Config`] when the grid would exceed
    /// [`MAX_OUTPUT_STEPS`][crate::MAX_OUTPUT_STEPS] steps.
    pub fn timeline(&self) -> CrnResult<Timeline> {
        let steps = if self.timestep_count > 0 {
            self.timestep_count as f64
        } else {
            (self.end_time / self.resolved_increment()?).round().max(1.0)
        };
        Timeline::try_uniform(self.end_time, steps)
    }

    /// Seed as the unsigned value consumed by [`TrajectoryRng`][crate::TrajectoryRng].
    #[inline]
    pub fn seed_u64(&self) -> u64 {
        self.random_seed as u64
    }
}

fn parse_value<T: FromStr>(flag: &str, value: &str, expected: &'static str) -> CrnResult<T> {
    value.trim().parse().map_err(|_| CrnError::MalformedArgument {
        flag:  flag.to_owned(),
        value: value.to_owned(),
        expected,
    })
}

/// Seconds since the Unix epoch.  A clock before 1970 yields 0.
pub fn wall_clock_seed() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
