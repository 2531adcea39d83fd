use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

// Backend ids are positive integers serialized as JSON numbers.
macro_rules! backend_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            #[doc = concat!("Creates a new `", stringify!($name), "`")]
            #[must_use]
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the underlying u64 value
            #[must_use]
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map($name::new)
                    .map_err(|_| ParseIdError {
                        kind: stringify!($name),
                    })
            }
        }
    };
}

backend_id!(
    /// Unique identifier for a course
    CourseId
);
backend_id!(
    /// Unique identifier for an internship program
    InternshipId
);
backend_id!(
    /// Unique identifier for a weekly course assignment
    AssignmentId
);
backend_id!(
    /// Unique identifier for an assigned task (internship or course task)
    TaskId
);
backend_id!(
    /// Unique identifier for a quiz
    QuizId
);
backend_id!(
    /// Unique identifier for a quiz question
    QuestionId
);
backend_id!(
    /// Unique identifier for an assignment or task submission
    SubmissionId
);
backend_id!(
    /// Unique identifier for a course resource
    ResourceId
);
backend_id!(
    /// Unique identifier for a user (mentor, trainer, student)
    UserId
);

// ─── Tests ─────────────────────────────────────────────────────────────────────
