//! Input validation for simulation runs.
//!
//! Turns raw form cells into [`ProcessSpec`]s and re-checks typed input
//! before the engine sees it. Detects:
//! - Empty input
//! - Missing, non-numeric, negative, or leading-zero fields
//! - Zero burst times
//! - Priorities outside `1..=5`
//! - A zero total burst (undefined throughput)
//! - Runs that could not finish within [`MAX_TICKS`]
//!
//! Every problem is reported, not only the first one.

use serde::{Deserialize, Serialize};

use crate::models::{
    tick_horizon, ProcessId, ProcessSpec, MAX_PRIORITY, MAX_TICKS, MIN_PRIORITY,
};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
    /// Offending process, if the error is tied to one row.
    pub process: Option<ProcessId>,
    /// Offending field within that row.
    pub field: Option<ProcessField>,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// No processes supplied.
    EmptyInput,
    /// Missing, negative, non-integer, or malformed numeric field.
    InvalidField,
    /// Priority outside `1..=5`.
    PriorityOutOfRange,
    /// Total burst time of zero.
    DegenerateAggregate,
}

/// Input columns of a process row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessField {
    /// Arrival time.
    Arrival,
    /// Burst time.
    Burst,
    /// Priority.
    Priority,
}

impl ProcessField {
    fn label(self) -> &'static str {
        match self {
            Self::Arrival => "arrival time",
            Self::Burst => "burst time",
            Self::Priority => "priority",
        }
    }
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            process: None,
            field: None,
        }
    }

    fn at(mut self, process: ProcessId, field: ProcessField) -> Self {
        self.process = Some(process);
        self.field = Some(field);
        self
    }
}

/// Raw text cells of one input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRow<'a> {
    /// Arrival time cell.
    pub arrival: &'a str,
    /// Burst time cell.
    pub burst: &'a str,
    /// Priority cell.
    pub priority: &'a str,
}

impl<'a> RawRow<'a> {
    /// Creates a raw row.
    pub fn new(arrival: &'a str, burst: &'a str, priority: &'a str) -> Self {
        Self {
            arrival,
            burst,
            priority,
        }
    }
}

/// Parses one row (0-based `index`) of the input table.
///
/// # Rules
/// 1. Every cell must be filled.
/// 2. Only the digits 0-9 are allowed (rejects signs, decimals, spaces).
/// 3. Arrival and burst must not have a leading zero when multi-digit.
/// 4. Arrival and burst must not exceed [`MAX_TICKS`].
/// 5. Burst must be positive.
/// 6. Priority must lie in `1..=5`.
pub fn parse_row(index: usize, row: RawRow<'_>) -> Result<ProcessSpec, Vec<ValidationError>> {
    let id = ProcessId::from_index(index);
    let mut errors = Vec::new();

    let arrival = parse_field(id, ProcessField::Arrival, row.arrival, true, &mut errors);
    let burst = parse_field(id, ProcessField::Burst, row.burst, true, &mut errors);
    let priority = parse_field(id, ProcessField::Priority, row.priority, false, &mut errors);

    if burst == Some(0) {
        errors.push(
            ValidationError::new(
                ValidationErrorKind::InvalidField,
                format!("Burst time for {id} must be greater than zero."),
            )
            .at(id, ProcessField::Burst),
        );
    }

    let priority = priority.and_then(|p| match u8::try_from(p) {
        Ok(p) if (MIN_PRIORITY..=MAX_PRIORITY).contains(&p) => Some(p),
        _ => {
            errors.push(priority_error(id));
            None
        }
    });

    match (arrival, burst, priority) {
        (Some(arrival), Some(burst), Some(priority)) if errors.is_empty() => {
            Ok(ProcessSpec::new(arrival, burst, priority))
        }
        _ => Err(errors),
    }
}

/// Parses a whole input table, collecting errors from every row.
pub fn parse_table(rows: &[RawRow<'_>]) -> Result<Vec<ProcessSpec>, Vec<ValidationError>> {
    if rows.is_empty() {
        return Err(vec![empty_input_error()]);
    }

    let mut specs = Vec::with_capacity(rows.len());
    let mut errors = Vec::new();
    for (i, &row) in rows.iter().enumerate() {
        match parse_row(i, row) {
            Ok(spec) => specs.push(spec),
            Err(mut row_errors) => errors.append(&mut row_errors),
        }
    }

    if errors.is_empty() {
        errors.extend(horizon_error(&specs));
    }
    if errors.is_empty() {
        Ok(specs)
    } else {
        Err(errors)
    }
}

/// Validates typed input before a simulation run.
///
/// Checks:
/// 1. At least one process
/// 2. Every burst time is positive
/// 3. Every priority is within `1..=5`
/// 4. The total burst time is positive
/// 5. Arrivals and bursts fit within [`MAX_TICKS`], alone and as
///    `max(arrival) + Σburst`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(specs: &[ProcessSpec]) -> ValidationResult {
    if specs.is_empty() {
        return Err(vec![empty_input_error()]);
    }

    let mut errors = Vec::new();
    for (i, spec) in specs.iter().enumerate() {
        let id = ProcessId::from_index(i);
        if spec.burst_time == 0 {
            errors.push(
                ValidationError::new(
                    ValidationErrorKind::InvalidField,
                    format!("Burst time for {id} must be greater than zero."),
                )
                .at(id, ProcessField::Burst),
            );
        }
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&spec.priority) {
            errors.push(priority_error(id));
        }
        if spec.arrival_time > MAX_TICKS {
            errors.push(ceiling_error(id, ProcessField::Arrival, spec.arrival_time));
        }
        if spec.burst_time > MAX_TICKS {
            errors.push(ceiling_error(id, ProcessField::Burst, spec.burst_time));
        }
    }

    if specs.iter().all(|s| s.burst_time == 0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::DegenerateAggregate,
            "Total burst time is zero; throughput is undefined.",
        ));
    }
    if errors.is_empty() {
        errors.extend(horizon_error(specs));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn parse_field(
    id: ProcessId,
    field: ProcessField,
    raw: &str,
    reject_leading_zero: bool,
    errors: &mut Vec<ValidationError>,
) -> Option<u64> {
    let invalid = |message: String| {
        ValidationError::new(ValidationErrorKind::InvalidField, message).at(id, field)
    };

    if raw.is_empty() {
        errors.push(invalid(format!(
            "All fields must be filled ({} of {id} is empty).",
            field.label()
        )));
        return None;
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        errors.push(invalid(format!(
            "Negative values and special characters are not allowed ({} of {id}: '{raw}').",
            field.label()
        )));
        return None;
    }
    if reject_leading_zero && raw.len() > 1 && raw.starts_with('0') {
        errors.push(invalid(format!(
            "Leading zeros are not allowed for multi-digit {}s ({id}: '{raw}').",
            field.label()
        )));
        return None;
    }
    match raw.parse::<u64>() {
        Ok(value) if field != ProcessField::Priority && value > MAX_TICKS => {
            errors.push(ceiling_error(id, field, value));
            None
        }
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(invalid(format!(
                "The {} of {id} is too large ('{raw}').",
                field.label()
            )));
            None
        }
    }
}

/// Rejects input whose run could not finish within [`MAX_TICKS`].
fn horizon_error(specs: &[ProcessSpec]) -> Option<ValidationError> {
    match tick_horizon(specs.iter().copied()) {
        Some(horizon) if horizon <= MAX_TICKS => None,
        horizon => {
            let reach = horizon.map_or_else(|| "beyond u64".to_string(), |h| h.to_string());
            Some(ValidationError::new(
                ValidationErrorKind::InvalidField,
                format!(
                    "Latest arrival plus total burst time ({reach}) exceeds the \
                     {MAX_TICKS}-tick simulation limit."
                ),
            ))
        }
    }
}

fn ceiling_error(id: ProcessId, field: ProcessField, value: u64) -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::InvalidField,
        format!(
            "The {} of {id} ({value}) exceeds the {MAX_TICKS}-tick simulation limit.",
            field.label()
        ),
    )
    .at(id, field)
}

fn priority_error(id: ProcessId) -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::PriorityOutOfRange,
        format!("Priority for {id} must be between {MIN_PRIORITY} and {MAX_PRIORITY}."),
    )
    .at(id, ProcessField::Priority)
}

fn empty_input_error() -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::EmptyInput,
        "At least one process is required.",
    )
}
