//! Option exercise style definitions.

/// Option exercise style.
///
/// Defines when the holder may take the payoff.
///
/// # Variants
/// - `European`: Exercise only at expiry
/// - `American`: Exercise at any lattice node before expiry
///
/// # Examples
/// ```
/// use pricer_models::instruments::ExerciseStyle;
///
/// assert!(ExerciseStyle::American.allows_early_exercise());
/// assert!(!ExerciseStyle::European.allows_early_exercise());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExerciseStyle {
    /// European style: exercise only at expiry.
    #[default]
    European,

    /// American style: exercise at any time before expiry.
    American,
}

impl ExerciseStyle {
    /// Returns whether this is a European exercise style.
    #[inline]
    pub fn is_european(&self) -> bool {
        matches!(self, ExerciseStyle::European)
    }

    /// Returns whether this is an American exercise style.
    #[inline]
    pub fn is_american(&self) -> bool {
        matches!(self, ExerciseStyle::American)
    }

    /// Returns whether interior nodes compare continuation against
    /// immediate exercise.
    #[inline]
    pub fn allows_early_exercise(&self) -> bool {
        self.is_american()
    }

    /// Human-readable name used in reports and logs.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            ExerciseStyle::European => "European",
            ExerciseStyle::American => "American",
        }
    }
}
