mod routing;
mod service;

use std::sync::Arc;

use crate::moderation::ModerationService;
use crate::testing::{MemoryInquiries, MemoryProperties, MemoryUsers};

pub(super) fn build_service() -> (
    Arc<ModerationService<MemoryUsers, MemoryProperties, MemoryInquiries>>,
    Arc<MemoryUsers>,
    Arc<MemoryProperties>,
    Arc<MemoryInquiries>,
) {
    let users = Arc::new(MemoryUsers::default());
    let properties = Arc::new(MemoryProperties::default());
    let inquiries = Arc::new(MemoryInquiries::default());
    let service = Arc::new(ModerationService::new(
        users.clone(),
        properties.clone(),
        inquiries.clone(),
    ));
    (service, users, properties, inquiries)
}
