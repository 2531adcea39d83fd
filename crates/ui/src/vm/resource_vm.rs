use lms_core::model::{Mentor, ResourceKind};
use services::ResolvedResource;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceVm {
    pub title: String,
    pub kind: &'static str,
    pub icon: &'static str,
    pub url: String,
}

impl From<&ResolvedResource> for ResourceVm {
    fn from(item: &ResolvedResource) -> Self {
        let (kind, icon) = match item.resource.kind() {
            ResourceKind::Pdf => ("PDF", "icon-pdf"),
            ResourceKind::Video => ("Video", "icon-video"),
            ResourceKind::Link => ("Link", "icon-link"),
            ResourceKind::Other => ("File", "icon-file"),
        };
        Self {
            title: item.resource.title.clone(),
            kind,
            icon,
            url: item.url.to_string(),
        }
    }
}

#[must_use]
pub fn map_resources(items: &[ResolvedResource]) -> Vec<ResourceVm> {
    items.iter().map(ResourceVm::from).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MentorVm {
    pub name: String,
    pub initial: String,
    pub detail: String,
}

impl From<&Mentor> for MentorVm {
    fn from(mentor: &Mentor) -> Self {
        let detail = [mentor.expertise.as_deref(), mentor.email.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" · ");
        Self {
            name: mentor.name.clone(),
            initial: mentor
                .name
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect())
                .unwrap_or_default(),
            detail,
        }
    }
}
