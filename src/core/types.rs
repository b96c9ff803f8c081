/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Simulated time, in ticks since the start of a run
pub type Tick = u64;

/// Priority level (numerically smaller is more urgent)
pub type Priority = u32;

/// Stable index of a record inside a [`ProcessTable`](crate::process::ProcessTable)
pub type Slot = usize;

/// Common result type for simulation operations
pub type SimulationResult<T> = Result<T, super::errors::SimulationError>;

/// Upper bound on simulated time for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeCap {
    /// Run until every record terminates
    #[default]
    Unbounded,
    /// Stop once the clock reaches this tick
    At(Tick),
}

impl TimeCap {
    /// Interpret a raw CLI value: zero means no limit
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: Tick) -> Self {
        if raw == 0 {
            Self::Unbounded
        } else {
            Self::At(raw)
        }
    }

    /// Whether the clock has reached the cap
    ///
    /// # Performance
    /// Hot path - checked before every tick
    #[inline(always)]
    #[must_use]
    pub const fn reached(&self, now: Tick) -> bool {
        match self {
            Self::Unbounded => false,
            Self::At(cap) => now >= *cap,
        }
    }

    /// Clamp a fast-forward target so it never jumps past the cap
    #[inline]
    #[must_use]
    pub fn clamp(&self, target: Tick) -> Tick {
        match self {
            Self::Unbounded => target,
            Self::At(cap) => target.min(*cap),
        }
    }

    /// Raw form used in configuration files (0 = unbounded)
    #[inline]
    #[must_use]
    pub const fn as_raw(&self) -> Tick {
        match self {
            Self::Unbounded => 0,
            Self::At(cap) => *cap,
        }
    }
}

impl serde::Serialize for TimeCap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.as_raw())
    }
}

impl<'de> serde::Deserialize<'de> for TimeCap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <Tick as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self::from_raw(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_cap_raw_zero_is_unbounded() {
        assert_eq!(TimeCap::from_raw(0), TimeCap::Unbounded);
        assert_eq!(TimeCap::from_raw(7), TimeCap::At(7));
        assert_eq!(TimeCap::At(7).as_raw(), 7);
    }

    #[test]
    fn test_time_cap_reached_and_clamp() {
        let cap = TimeCap::At(10);
        assert!(!cap.reached(9));
        assert!(cap.reached(10));
        assert_eq!(cap.clamp(25), 10);
        assert_eq!(cap.clamp(4), 4);

        assert!(!TimeCap::Unbounded.reached(u64::MAX));
        assert_eq!(TimeCap::Unbounded.clamp(25), 25);
    }

    #[test]
    fn test_time_cap_serde() {
        let json = serde_json::to_string(&TimeCap::At(42)).unwrap();
        assert_eq!(json, "42");
        let parsed: TimeCap = serde_json::from_str("0").unwrap();
        assert_eq!(parsed, TimeCap::Unbounded);
    }
}
