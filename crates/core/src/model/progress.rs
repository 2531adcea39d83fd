use serde::Deserialize;

use crate::certificate::CertificateCandidate;
use crate::model::course::CourseDashboard;
use crate::model::ids::{CourseId, InternshipId};
use crate::model::wire::{null_as_default, optional_text};

//
// ─── ENROLLMENT ────────────────────────────────────────────────────────────────
//

/// An intern's enrollment in an internship program (`GET /api/enrollments`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Enrollment {
    pub id: InternshipId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub intern_name: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub mentor_name: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub progress: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks_completed: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks_total: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub can_generate_certificate: bool,
    #[serde(default, deserialize_with = "optional_text")]
    pub certificate_url: Option<String>,
}

impl CertificateCandidate for Enrollment {
    fn progress_percent(&self) -> f64 {
        self.progress
    }

    fn server_marked_eligible(&self) -> bool {
        self.can_generate_certificate
    }
}

//
// ─── STUDENT PROGRESS ──────────────────────────────────────────────────────────
//

/// One row of `GET /api/student/progress`: a course or an internship.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProgressEntry {
    #[serde(default)]
    pub course_id: Option<CourseId>,
    #[serde(default)]
    pub internship_id: Option<InternshipId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub course: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub progress: f64,
    #[serde(default, deserialize_with = "optional_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks_completed: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_tasks: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub can_generate_certificate: bool,
    #[serde(default, deserialize_with = "optional_text")]
    pub certificate_url: Option<String>,
}

/// Mean completion across entries, rounded and capped at 100.
///
/// Returns `None` for an empty list so callers can leave the bar untouched.
#[must_use]
pub fn average_progress(entries: &[ProgressEntry]) -> Option<u8> {
    if entries.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let mean = entries.iter().map(|entry| entry.progress).sum::<f64>() / entries.len() as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = mean.round().clamp(0.0, 100.0) as u8;
    Some(rounded)
}

//
// ─── INTERN STATS ──────────────────────────────────────────────────────────────
//

/// Aggregate counters for the intern dashboard (`GET /api/intern/stats`).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct InternStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks_completed: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks_pending: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overall_progress: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub internships_enrolled: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks_done_today: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_streak: u32,
    #[serde(default, deserialize_with = "optional_text")]
    pub mentor_name: Option<String>,
}

//
// ─── STUDENT DASHBOARD ─────────────────────────────────────────────────────────
//

/// Payload of `GET /api/student/dashboard`.
///
/// Older backends return the bare course list instead of the wrapper object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StudentDashboard {
    pub courses: Vec<CourseDashboard>,
    pub study_streak: Option<u32>,
    pub overall_grade: Option<String>,
}

impl<'de> Deserialize<'de> for StudentDashboard {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wrapped {
            #[serde(default, deserialize_with = "null_as_default")]
            courses: Vec<CourseDashboard>,
            #[serde(default)]
            study_streak: Option<u32>,
            #[serde(default, deserialize_with = "optional_text")]
            overall_grade: Option<String>,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Shape {
            List(Vec<CourseDashboard>),
            Wrapped(Wrapped),
        }

        Ok(match Shape::deserialize(deserializer)? {
            Shape::List(courses) => StudentDashboard {
                courses,
                ..StudentDashboard::default()
            },
            Shape::Wrapped(wrapped) => StudentDashboard {
                courses: wrapped.courses,
                study_streak: wrapped.study_streak,
                overall_grade: wrapped.overall_grade,
            },
        })
    }
}

impl StudentDashboard {
    /// Outstanding assignments, quizzes and tasks across all courses.
    ///
    /// Uses the server's summary counters rather than counting list items.
    #[must_use]
    pub fn pending_count(&self) -> u32 {
        self.courses.iter().map(CourseDashboard::pending_count).sum()
    }
}
