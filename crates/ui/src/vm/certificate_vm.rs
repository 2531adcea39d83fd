use lms_core::certificate::{CertificateAffordance, CertificateGate};
use lms_core::model::{CourseDashboard, CourseId, Enrollment, InternshipId};

/// What the certificate button acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CertificateTarget {
    Course(CourseId),
    Internship(InternshipId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CertificateEntryVm {
    pub name: String,
    pub target: Option<CertificateTarget>,
    pub affordance: CertificateAffordance,
}

impl CertificateEntryVm {
    #[must_use]
    pub fn button_label(&self) -> &'static str {
        match self.affordance {
            CertificateAffordance::Download { .. } => "Download Certificate",
            CertificateAffordance::Generate => "Generate Certificate",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CertificatePanelVm {
    Hidden,
    Locked { hint: &'static str },
    Unlocked(Vec<CertificateEntryVm>),
}

impl CertificatePanelVm {
    #[must_use]
    pub fn for_courses(courses: &[CourseDashboard]) -> Self {
        Self::from_gate(
            CertificateGate::evaluate(courses),
            "Complete all assignments and quizzes for a course to unlock its certificate.",
            |course| CertificateEntryVm {
                name: course.course.clone(),
                target: course.course_id.map(CertificateTarget::Course),
                affordance: CertificateAffordance::for_url(course.certificate_url.as_deref()),
            },
        )
    }

    #[must_use]
    pub fn for_enrollments(enrollments: &[Enrollment]) -> Self {
        Self::from_gate(
            CertificateGate::evaluate(enrollments),
            "Complete all tasks in an internship to unlock its certificate.",
            |enrollment| CertificateEntryVm {
                name: enrollment.intern_name.clone(),
                target: Some(CertificateTarget::Internship(enrollment.id)),
                affordance: CertificateAffordance::for_url(
                    enrollment.certificate_url.as_deref(),
                ),
            },
        )
    }

    fn from_gate<T>(
        gate: CertificateGate<'_, T>,
        hint: &'static str,
        entry: impl Fn(&T) -> CertificateEntryVm,
    ) -> Self {
        match gate {
            CertificateGate::Hidden => CertificatePanelVm::Hidden,
            CertificateGate::Locked => CertificatePanelVm::Locked { hint },
            CertificateGate::Unlocked(items) => {
                CertificatePanelVm::Unlocked(items.into_iter().map(entry).collect())
            }
        }
    }

    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        matches!(self, CertificatePanelVm::Unlocked(_))
    }
}
