use serde::Deserialize;

use crate::certificate::CertificateCandidate;
use crate::model::ids::{CourseId, InternshipId, ResourceId, UserId};
use crate::model::task::{Assignment, CourseTask};
use crate::model::wire::{null_as_default, optional_text};

//
// ─── CATALOGUE ─────────────────────────────────────────────────────────────────
//

/// Public course listing (`GET /api/courses`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Course {
    pub id: CourseId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub status: Option<String>,
}

/// Public internship listing (`GET /api/internships`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Internship {
    pub id: InternshipId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub intern_name: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub mentor_name: Option<String>,
}

/// Courses the student can still enroll in, preserving catalogue order.
#[must_use]
pub fn enrollable_courses<'a>(catalogue: &'a [Course], enrolled: &[Course]) -> Vec<&'a Course> {
    catalogue
        .iter()
        .filter(|course| enrolled.iter().all(|mine| mine.id != course.id))
        .collect()
}

//
// ─── COURSE DASHBOARD ──────────────────────────────────────────────────────────
//

/// One course (or internship) section of the student dashboard.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CourseDashboard {
    #[serde(default)]
    pub course_id: Option<CourseId>,
    #[serde(default)]
    pub internship_id: Option<InternshipId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub course: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub progress: f64,
    #[serde(default, deserialize_with = "optional_text")]
    pub rank: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assignments: Vec<Assignment>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks: Vec<CourseTask>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub can_generate_certificate: bool,
    #[serde(default, deserialize_with = "optional_text")]
    pub certificate_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_assignments: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assignments_completed: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pending_quizzes_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_tasks: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks_completed: u32,
}

impl CourseDashboard {
    #[must_use]
    pub fn pending_count(&self) -> u32 {
        self.total_assignments.saturating_sub(self.assignments_completed)
            + self.pending_quizzes_count
            + self.total_tasks.saturating_sub(self.tasks_completed)
    }

    #[must_use]
    pub fn has_work_items(&self) -> bool {
        !self.assignments.is_empty() || !self.tasks.is_empty()
    }
}

impl CertificateCandidate for CourseDashboard {
    fn progress_percent(&self) -> f64 {
        self.progress
    }

    fn server_marked_eligible(&self) -> bool {
        self.can_generate_certificate
    }
}

//
// ─── RESOURCES & MENTORS ───────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Pdf,
    Video,
    Link,
    Other,
}

impl ResourceKind {
    #[must_use]
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim() {
            "PDF" => ResourceKind::Pdf,
            "Video" => ResourceKind::Video,
            "Link" => ResourceKind::Link,
            _ => ResourceKind::Other,
        }
    }
}

/// Course material (`GET /api/student/course/{id}/resources`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind_label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

impl Resource {
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        ResourceKind::from_wire(&self.kind_label)
    }

    /// True when the url can be opened as-is.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.url.starts_with("http") || self.url.starts_with("//")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Mentor {
    pub id: UserId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub expertise: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: u64, name: &str) -> Course {
        Course {
            id: CourseId::new(id),
            name: name.to_owned(),
            date: None,
            duration: None,
            status: None,
        }
    }

    #[test]
    fn enrollable_courses_skip_enrolled_ids() {
        let catalogue = vec![course(1, "Rust"), course(2, "Go"), course(3, "SQL")];
        let enrolled = vec![course(2, "Go")];
        let open = enrollable_courses(&catalogue, &enrolled);
        let names: Vec<_> = open.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "SQL"]);
    }

    #[test]
    fn pending_count_never_goes_negative() {
        let raw = r#"{
            "course": "Rust",
            "total_assignments": 2,
            "assignments_completed": 5,
            "pending_quizzes_count": 1,
            "total_tasks": 3,
            "tasks_completed": 1
        }"#;
        let dashboard: CourseDashboard = serde_json::from_str(raw).unwrap();
        assert_eq!(dashboard.pending_count(), 3);
        assert!(!dashboard.has_work_items());
    }

    #[test]
    fn resource_kind_and_absoluteness() {
        let resource: Resource = serde_json::from_str(
            r#"{"id": 1, "title": "Slides", "type": "PDF", "url": "uploads/slides.pdf"}"#,
        )
        .unwrap();
        assert_eq!(resource.kind(), ResourceKind::Pdf);
        assert!(!resource.is_absolute());
    }
}
