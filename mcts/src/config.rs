//! Search configuration parameters.

/// Configuration for a Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Wall-clock budget per search in milliseconds.
    ///
    /// Checked at iteration boundaries only, so a single slow iteration may
    /// overrun it.
    pub time_budget_ms: u64,

    /// Iterations to run even after the time budget is spent.
    ///
    /// With `time_budget_ms` set to 0 this makes the search run a fixed,
    /// reproducible number of iterations, which is what the deterministic
    /// tests do.
    pub min_iterations: u32,

    /// Exploration constant `C` of the UCT formula.
    /// Higher values favor exploration, lower values exploitation.
    pub exploration_c: f32,

    /// Visits a leaf must accumulate before an expansion is spent on it.
    /// Until then the leaf itself is the playout origin.
    pub expansion_visit_threshold: u32,

    /// Visits a node needs before UCT replaces uniform-random child
    /// selection. The UCT exploration term carries no signal while
    /// `ln(visits)` is still 0 or 1.
    pub min_visits_for_uct: u32,

    /// Seed of the per-search RNG used for the random selection phase.
    /// Searches with equal seeds, configuration and deterministic game
    /// hooks produce identical results.
    pub rng_seed: u64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: 500,
            min_iterations: 0,
            exploration_c: 0.5,
            expansion_visit_threshold: 5,
            min_visits_for_uct: 5,
            rng_seed: 42,
        }
    }
}

impl MctsConfig {
    /// Create a deterministic config for testing: no wall-clock dependence,
    /// a fixed iteration count instead.
    pub fn for_testing() -> Self {
        Self {
            time_budget_ms: 0,
            min_iterations: 1_000,
            ..Self::default()
        }
    }

    /// Builder pattern: set the time budget in milliseconds.
    pub fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.time_budget_ms = ms;
        self
    }

    /// Builder pattern: set the minimum number of iterations.
    pub fn with_min_iterations(mut self, n: u32) -> Self {
        self.min_iterations = n;
        self
    }

    /// Builder pattern: set the UCT exploration constant.
    pub fn with_exploration_c(mut self, c: f32) -> Self {
        self.exploration_c = c;
        self
    }

    /// Builder pattern: set the expansion visit threshold.
    pub fn with_expansion_visit_threshold(mut self, visits: u32) -> Self {
        self.expansion_visit_threshold = visits;
        self
    }

    /// Builder pattern: set the visit count below which child selection is
    /// uniform-random.
    pub fn with_min_visits_for_uct(mut self, visits: u32) -> Self {
        self.min_visits_for_uct = visits;
        self
    }

    /// Builder pattern: set the RNG seed.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }
}
