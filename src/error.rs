use std::fmt;

use crate::sim::RawRecord;

/// Everything that can stop a run before the first dispatch.
///
/// All checks happen up front, so a run either produces a full report or
/// one of these and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    InvalidInput(InputError),
    InvalidParameter(ParameterError),
    EmptyInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A line of the textual input is not four integers.
    Malformed { line: usize, text: String },
    DuplicatePid { record: RawRecord },
    NegativeArrival { record: RawRecord },
    NonPositiveBurst { record: RawRecord },
    TooManyProcesses { record: RawRecord, max: usize },
    /// Latest arrival plus total burst no longer fits the clock.
    HorizonOverflow { record: RawRecord },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    NonPositiveQuantum(i64),
    QuantumOutOfRange(String),
    UnknownAlgorithm(String),
}

impl InputError {
    /// The record that failed validation, if the failure got that far.
    pub fn record(&self) -> Option<&RawRecord> {
        match self {
            Self::Malformed { .. } => None,
            Self::DuplicatePid { record }
            | Self::NegativeArrival { record }
            | Self::NonPositiveBurst { record }
            | Self::TooManyProcesses { record, .. }
            | Self::HorizonOverflow { record } => Some(record),
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::InvalidParameter(err) => write!(f, "invalid parameter: {err}"),
            Self::EmptyInput => write!(f, "no processes to schedule"),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { line, text } => {
                write!(f, "line {line}: expected `pid arrival burst priority`, got {text:?}")
            }
            Self::DuplicatePid { record } => write!(f, "pid {} appears twice ({record})", record.pid),
            Self::NegativeArrival { record } => {
                write!(f, "arrival time must be >= 0 ({record})")
            }
            Self::NonPositiveBurst { record } => write!(f, "burst time must be > 0 ({record})"),
            Self::TooManyProcesses { record, max } => {
                write!(f, "more than {max} processes, first rejected: {record}")
            }
            Self::HorizonOverflow { record } => {
                write!(f, "schedule length overflows the clock at {record}")
            }
        }
    }
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveQuantum(q) => write!(f, "time quantum must be positive, got {q}"),
            Self::QuantumOutOfRange(q) => write!(f, "time quantum {q} is out of range"),
            Self::UnknownAlgorithm(spec) => write!(
                f,
                "unknown scheduler {spec:?}; expected F, R<quantum> or C<quantum>"
            ),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::InvalidParameter(err) => Some(err),
            Self::EmptyInput => None,
        }
    }
}

impl std::error::Error for InputError {}

impl std::error::Error for ParameterError {}

impl From<InputError> for SimError {
    fn from(err: InputError) -> Self {
        Self::InvalidInput(err)
    }
}

impl From<ParameterError> for SimError {
    fn from(err: ParameterError) -> Self {
        Self::InvalidParameter(err)
    }
}
