//! Engine configuration.

/// Settings passed to every validator through the [`Context`](crate::Context).
///
/// # Example
///
/// ```rust
/// use formguard::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_file_size_unit(1000)
///     .with_reject_imprecise_numbers(true);
///
/// assert_eq!(config.file_size_unit(), 1000);
/// assert!(config.reject_imprecise_numbers());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    file_size_unit: u64,
    reject_imprecise_numbers: bool,
}

impl EngineConfig {
    /// Default number of bytes per file size unit (KiB).
    pub const DEFAULT_FILE_SIZE_UNIT: u64 = 1024;

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            file_size_unit: Self::DEFAULT_FILE_SIZE_UNIT,
            reject_imprecise_numbers: false,
        }
    }

    /// Sets the number of bytes per unit used by file size rules.
    ///
    /// A unit of zero is treated as one byte.
    pub fn with_file_size_unit(mut self, bytes: u64) -> Self {
        self.file_size_unit = bytes.max(1);
        self
    }

    /// Makes numeric rules fail when a value cannot be represented exactly as `f64`.
    ///
    /// Disabled by default: imprecise values are compared after rounding and
    /// a warning is logged.
    pub fn with_reject_imprecise_numbers(mut self, reject: bool) -> Self {
        self.reject_imprecise_numbers = reject;
        self
    }

    pub fn file_size_unit(&self) -> u64 {
        self.file_size_unit
    }

    pub fn reject_imprecise_numbers(&self) -> bool {
        self.reject_imprecise_numbers
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
