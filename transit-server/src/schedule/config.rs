//! How many arrivals each view asks the projector for.

/// Arrival limits used by the different views of a route.
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Arrivals listed for a single stop's detail view.
    pub default_limit: usize,

    /// Arrivals shown in the "next bus" summary.
    pub next_arrival_limit: usize,

    /// Arrivals shown inline per stop on a route board.
    pub board_limit: usize,

    /// Upper bound on any limit a client asks for.
    pub max_limit: usize,
}

impl ProjectionConfig {
    /// Create a new configuration with the given limits.
    pub fn new(
        default_limit: usize,
        next_arrival_limit: usize,
        board_limit: usize,
        max_limit: usize,
    ) -> Self {
        Self {
            default_limit,
            next_arrival_limit,
            board_limit,
            max_limit,
        }
    }

    /// Clamp a client-supplied limit, falling back to `default`.
    ///
    /// Zero passes through untouched so the projector can reject it.
    pub fn clamp(&self, requested: Option<usize>, default: usize) -> usize {
        requested.unwrap_or(default).min(self.max_limit)
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            next_arrival_limit: 1,
            board_limit: 6,
            max_limit: 50,
        }
    }
}
