//! Action space description.

use tether_core::SpecError;

/// Describes an action space: continuous or multi-branch discrete.
///
/// Exactly one family applies per behavior; the enum makes the
/// "both or neither" misconfiguration unrepresentable. Value-level
/// validation (positive sizes, non-empty branch lists) lives in the
/// [`continuous`](ActionSpec::continuous) and
/// [`discrete`](ActionSpec::discrete) constructors.
///
/// Constructed once at environment-connection time; immutable
/// thereafter.
///
/// # Examples
///
/// ```
/// use tether_spec::ActionSpec;
///
/// let cont = ActionSpec::continuous(3).unwrap();
/// assert_eq!(cont.action_size(), 3);
/// assert_eq!(cont.flattened_size(), 3);
/// assert!(cont.discrete_branches().is_none());
///
/// let disc = ActionSpec::discrete(vec![3, 3, 3, 2]).unwrap();
/// assert_eq!(disc.action_size(), 4);
/// assert_eq!(disc.flattened_size(), 11);
/// assert_eq!(disc.discrete_branches(), Some(&[3, 3, 3, 2][..]));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionSpec {
    /// A vector of unbounded real-valued action components.
    Continuous {
        /// Number of action components.
        size: usize,
    },
    /// Independent discrete sub-actions, one categorical choice per
    /// branch (e.g., move vs. jump).
    Discrete {
        /// Per-branch action cardinalities, in branch order.
        branches: Vec<usize>,
    },
}

impl ActionSpec {
    /// Declare a continuous action space of `size` components.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::ZeroContinuousSize`] if `size` is zero.
    pub fn continuous(size: usize) -> Result<Self, SpecError> {
        if size == 0 {
            return Err(SpecError::ZeroContinuousSize);
        }
        Ok(Self::Continuous { size })
    }

    /// Declare a discrete action space with the given per-branch
    /// cardinalities.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::NoBranches`] for an empty list and
    /// [`SpecError::ZeroBranchCardinality`] if any branch has zero
    /// actions.
    pub fn discrete(branches: Vec<usize>) -> Result<Self, SpecError> {
        if branches.is_empty() {
            return Err(SpecError::NoBranches);
        }
        for (branch, &size) in branches.iter().enumerate() {
            if size == 0 {
                return Err(SpecError::ZeroBranchCardinality { branch });
            }
        }
        Ok(Self::Discrete { branches })
    }

    /// Returns `true` for the continuous family.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::Continuous { .. })
    }

    /// Returns `true` for the discrete family.
    pub fn is_discrete(&self) -> bool {
        matches!(self, Self::Discrete { .. })
    }

    /// Number of action columns: the component count (continuous) or
    /// the number of branches (discrete).
    pub fn action_size(&self) -> usize {
        match self {
            Self::Continuous { size } => *size,
            Self::Discrete { branches } => branches.len(),
        }
    }

    /// Width of the flat per-row mask/logit layout: the component
    /// count (continuous) or the sum of branch cardinalities
    /// (discrete).
    pub fn flattened_size(&self) -> usize {
        match self {
            Self::Continuous { size } => *size,
            Self::Discrete { branches } => branches.iter().sum(),
        }
    }

    /// Per-branch cardinalities, or `None` for continuous spaces.
    pub fn discrete_branches(&self) -> Option<&[usize]> {
        match self {
            Self::Continuous { .. } => None,
            Self::Discrete { branches } => Some(branches),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuous_rejects_zero_size() {
        assert_eq!(
            ActionSpec::continuous(0).unwrap_err(),
            SpecError::ZeroContinuousSize
        );
    }

    #[test]
    fn discrete_rejects_empty_branch_list() {
        assert_eq!(
            ActionSpec::discrete(vec![]).unwrap_err(),
            SpecError::NoBranches
        );
    }

    #[test]
    fn discrete_rejects_zero_cardinality_branch() {
        assert_eq!(
            ActionSpec::discrete(vec![3, 0, 2]).unwrap_err(),
            SpecError::ZeroBranchCardinality { branch: 1 }
        );
    }

    #[test]
    fn derived_sizes_continuous() {
        let spec = ActionSpec::continuous(5).unwrap();
        assert!(spec.is_continuous());
        assert!(!spec.is_discrete());
        assert_eq!(spec.action_size(), 5);
        assert_eq!(spec.flattened_size(), 5);
        assert!(spec.discrete_branches().is_none());
    }

    #[test]
    fn derived_sizes_discrete() {
        let spec = ActionSpec::discrete(vec![3]).unwrap();
        assert_eq!(spec.action_size(), 1);
        assert_eq!(spec.flattened_size(), 3);
        assert_eq!(spec.discrete_branches(), Some(&[3][..]));

        let spec = ActionSpec::discrete(vec![10, 20, 30]).unwrap();
        assert_eq!(spec.action_size(), 3);
        assert_eq!(spec.flattened_size(), 60);
    }
}
