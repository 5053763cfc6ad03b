mod service;

use std::sync::Arc;

use crate::inquiries::InquiryService;
use crate::testing::{MemoryInquiries, MemoryProperties, MemoryUsers};

pub(super) fn build_service() -> (
    Arc<InquiryService<MemoryInquiries, MemoryProperties>>,
    Arc<MemoryInquiries>,
    Arc<MemoryProperties>,
    Arc<MemoryUsers>,
) {
    let inquiries = Arc::new(MemoryInquiries::default());
    let properties = Arc::new(MemoryProperties::default());
    let users = Arc::new(MemoryUsers::default());
    let service = Arc::new(InquiryService::new(inquiries.clone(), properties.clone()));
    (service, inquiries, properties, users)
}
