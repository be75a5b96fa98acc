//! Configuration and system parameters for SpGEMM

/// Execution backend for the data-parallel primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Plain loops on the calling thread
    Sequential,
    /// Rayon's global thread pool
    Parallel,
}

/// How the intermediate triplet stream is materialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionStrategy {
    /// Walk each A entry and its B row slice, appending triplets
    NestedLoop,
    /// Derive owner segments and gather locations with scans, then gather
    Scan,
    /// NestedLoop on the sequential backend, Scan on the parallel one
    Auto,
}

impl ExpansionStrategy {
    /// Resolves `Auto` for a sequential or parallel backend
    pub fn resolve(self, parallel: bool) -> Self {
        match self {
            ExpansionStrategy::Auto if parallel => ExpansionStrategy::Scan,
            ExpansionStrategy::Auto => ExpansionStrategy::NestedLoop,
            strategy => strategy,
        }
    }
}

/// System parameters for performance tuning
#[derive(Debug, Clone)]
pub struct SystemParameters {
    /// Number of workers the parallel primitives split their input for
    pub n_threads: usize,
    /// Inputs shorter than this are processed as a single chunk
    pub min_chunk_len: usize,
}

impl Default for SystemParameters {
    fn default() -> Self {
        Self {
            n_threads: num_cpus::get(), // Use all available cores
            min_chunk_len: 4096,
        }
    }
}

/// Configuration for a sparse multiplication
#[derive(Debug, Clone)]
pub struct SpgemmConfig {
    /// Execution backend
    pub backend: Backend,

    /// Expansion strategy; see [`ExpansionStrategy::resolve`]
    pub expansion: ExpansionStrategy,

    /// Check index bounds of both operands and the row order of B
    pub validate: bool,

    /// Upper bound on the number of intermediate triplets
    /// If None, only the index type and the address space limit it
    pub max_intermediate: Option<usize>,

    /// System parameters for performance tuning
    pub system_params: SystemParameters,
}

impl Default for SpgemmConfig {
    fn default() -> Self {
        let system_params = SystemParameters::default();
        let backend = if system_params.n_threads > 1 {
            Backend::Parallel
        } else {
            Backend::Sequential
        };
        Self {
            backend,
            expansion: ExpansionStrategy::Auto,
            validate: true,
            max_intermediate: None,
            system_params,
        }
    }
}

impl SpgemmConfig {
    /// Single-threaded configuration
    pub fn sequential() -> Self {
        Self {
            backend: Backend::Sequential,
            ..Self::default()
        }
    }

    /// Multi-threaded configuration
    pub fn parallel() -> Self {
        Self {
            backend: Backend::Parallel,
            ..Self::default()
        }
    }

    /// Sets the execution backend
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Sets the expansion strategy
    pub fn with_expansion(mut self, expansion: ExpansionStrategy) -> Self {
        self.expansion = expansion;
        self
    }

    /// Enables or disables operand validation
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Caps the number of intermediate triplets
    pub fn with_max_intermediate(mut self, limit: usize) -> Self {
        self.max_intermediate = Some(limit);
        self
    }

    /// Sets the system parameters
    pub fn with_system_params(mut self, system_params: SystemParameters) -> Self {
        self.system_params = system_params;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_resolution() {
        assert_eq!(ExpansionStrategy::Auto.resolve(false), ExpansionStrategy::NestedLoop);
        assert_eq!(ExpansionStrategy::Auto.resolve(true), ExpansionStrategy::Scan);
        assert_eq!(ExpansionStrategy::NestedLoop.resolve(true), ExpansionStrategy::NestedLoop);
        assert_eq!(ExpansionStrategy::Scan.resolve(false), ExpansionStrategy::Scan);
    }

    #[test]
    fn test_builders() {
        let config = SpgemmConfig::sequential()
            .with_expansion(ExpansionStrategy::Scan)
            .with_validation(false)
            .with_max_intermediate(10);

        assert_eq!(config.backend, Backend::Sequential);
        assert_eq!(config.expansion, ExpansionStrategy::Scan);
        assert!(!config.validate);
        assert_eq!(config.max_intermediate, Some(10));
        assert!(config.system_params.n_threads >= 1);
    }
}
