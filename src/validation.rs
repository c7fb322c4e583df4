//! Input validation for workloads.
//!
//! Checks structural integrity of process records before simulation.
//! Detects:
//! - Non-positive burst times (a zero-length process would never be
//!   picked to completion by the preemptive simulator)
//! - Negative arrival times
//! - Duplicate IDs
//! - Workloads whose latest possible completion time does not fit in
//!   [`Ticks`]

use crate::models::{Process, Ticks};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A process needs no CPU time or a negative amount.
    NonPositiveBurst,
    /// A process arrives before t=0.
    NegativeArrival,
    /// Two processes share the same ID.
    DuplicateId,
    /// Latest arrival plus total burst exceeds the representable time range.
    TimeOverflow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a workload.
///
/// Checks:
/// 1. Every `burst_time` is > 0
/// 2. Every `arrival_time` is >= 0
/// 3. No duplicate process IDs
/// 4. Latest arrival + total burst fits in [`Ticks`]
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_workload(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for p in processes {
        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process {} has non-positive burst time {}", p.id, p.burst_time),
            ));
        }

        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!(
                    "Process {} has negative arrival time {}",
                    p.id, p.arrival_time
                ),
            ));
        }

        if !ids.insert(p.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", p.id),
            ));
        }
    }

    let last_arrival = processes.iter().map(|p| p.arrival_time).max().unwrap_or(0);
    let end = processes
        .iter()
        .try_fold(last_arrival, |acc, p| acc.checked_add(p.burst_time.max(0)));
    if end.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            format!(
                "Workload cannot finish before t={}: latest arrival {last_arrival} plus total burst overflows",
                Ticks::MAX
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_workload() -> Vec<Process> {
        vec![
            Process::new(1, 0, 5),
            Process::new(2, 1, 2),
            Process::new(3, 2, 1),
        ]
    }

    #[test]
    fn test_valid_workload() {
        assert!(validate_workload(&sample_workload()).is_ok());
    }

    #[test]
    fn test_empty_workload_is_valid() {
        assert!(validate_workload(&[]).is_ok());
    }

    #[test]
    fn test_zero_burst() {
        let processes = vec![Process::new(1, 0, 0)];
        let errors = validate_workload(&processes).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::NonPositiveBurst);
    }

    #[test]
    fn test_negative_burst() {
        let processes = vec![Process::new(1, 0, -3)];
        let errors = validate_workload(&processes).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveBurst && e.message.contains("-3")));
    }

    #[test]
    fn test_negative_arrival() {
        let processes = vec![Process::new(1, -1, 4)];
        let errors = validate_workload(&processes).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativeArrival);
    }

    #[test]
    fn test_duplicate_id() {
        let processes = vec![Process::new(1, 0, 4), Process::new(1, 2, 3)];
        let errors = validate_workload(&processes).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_time_overflow() {
        let processes = vec![Process::new(1, Ticks::MAX - 1, 5)];
        let errors = validate_workload(&processes).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::TimeOverflow);

        let bursts = vec![Process::new(1, 0, Ticks::MAX), Process::new(2, 0, 1)];
        let errors = validate_workload(&bursts).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::TimeOverflow);

        let fits = vec![Process::new(1, Ticks::MAX - 5, 5)];
        assert!(validate_workload(&fits).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let processes = vec![Process::new(1, -2, 0), Process::new(1, 0, 3)];
        let errors = validate_workload(&processes).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
