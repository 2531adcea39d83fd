use crate::model::InternStats;

/// Something a completion certificate can be issued for.
pub trait CertificateCandidate {
    /// Completion percentage as reported by the server.
    fn progress_percent(&self) -> f64;

    fn server_marked_eligible(&self) -> bool;

    fn is_certificate_eligible(&self) -> bool {
        self.server_marked_eligible() || self.progress_percent() >= 100.0
    }
}

/// Visibility of the certificate panel.
#[derive(Debug, Clone, PartialEq)]
pub enum CertificateGate<'a, T> {
    /// Nothing enrolled; the panel is not shown.
    Hidden,
    /// Enrolled, but nothing finished yet.
    Locked,
    Unlocked(Vec<&'a T>),
}

impl<'a, T: CertificateCandidate> CertificateGate<'a, T> {
    #[must_use]
    pub fn evaluate(enrollments: &'a [T]) -> Self {
        if enrollments.is_empty() {
            return CertificateGate::Hidden;
        }
        let eligible: Vec<&T> = enrollments
            .iter()
            .filter(|entry| entry.is_certificate_eligible())
            .collect();
        if eligible.is_empty() {
            CertificateGate::Locked
        } else {
            CertificateGate::Unlocked(eligible)
        }
    }

    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        matches!(self, CertificateGate::Unlocked(_))
    }
}

/// What the panel offers for one eligible entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateAffordance {
    Download { url: String },
    Generate,
}

impl CertificateAffordance {
    #[must_use]
    pub fn for_url(certificate_url: Option<&str>) -> Self {
        match certificate_url {
            Some(url) if !url.trim().is_empty() => CertificateAffordance::Download {
                url: url.to_owned(),
            },
            _ => CertificateAffordance::Generate,
        }
    }
}

/// Certificate button state on the intern stats card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsGate {
    Unlocked,
    Locked { remaining: u32 },
}

impl StatsGate {
    #[must_use]
    pub fn from_stats(stats: &InternStats) -> Self {
        if stats.tasks_pending == 0 && stats.tasks_completed > 0 {
            StatsGate::Unlocked
        } else {
            StatsGate::Locked {
                remaining: stats.tasks_pending,
            }
        }
    }
}
