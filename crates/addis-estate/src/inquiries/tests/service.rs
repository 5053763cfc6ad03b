use super::*;
use crate::accounts::{Role, UserRepository};
use crate::inquiries::{InquiryError, InquiryId, InquiryStatus, NewInquiry, Priority};
use crate::listings::{ListingStatus, PropertyId, PropertyRepository};
use crate::pagination::PageSpec;
use crate::testing::{property, user};

fn new_inquiry(property: PropertyId) -> NewInquiry {
    NewInquiry {
        property,
        subject: "Is this still available?".to_string(),
        message: "I would like to arrange a viewing this week.".to_string(),
        priority: None,
    }
}

#[test]
fn creation_snapshots_owner_and_contact() {
    let (service, _, properties, users) = build_service();
    let owner = users
        .insert(user(Role::Seller, "owner@x.com", "+251911111111"))
        .expect("owner stored");
    let buyer = users
        .insert(user(Role::Buyer, "buyer@x.com", "+251922222222"))
        .expect("buyer stored");
    let listing = properties
        .insert(property(&owner.id, ListingStatus::Approved, "Bole apartment", 0))
        .expect("listing stored");

    let inquiry = service
        .create(&buyer, new_inquiry(listing.id))
        .expect("creation succeeds");

    assert_eq!(inquiry.status, InquiryStatus::Pending);
    assert_eq!(inquiry.property_owner, owner.id);
    assert_eq!(inquiry.inquirer, buyer.id);
    assert_eq!(inquiry.inquirer_contact.email, "buyer@x.com");
    assert_eq!(inquiry.inquirer_contact.phone, "+251922222222");
    assert_eq!(inquiry.priority, Priority::Medium);
    assert!(inquiry.response.is_none());
    assert!(!inquiry.is_read);
}

#[test]
fn owners_cannot_inquire_on_their_own_listings() {
    let (service, _, properties, users) = build_service();
    let owner = users
        .insert(user(Role::Seller, "owner@x.com", "+251911111111"))
        .expect("owner stored");
    let listing = properties
        .insert(property(&owner.id, ListingStatus::Approved, "Bole apartment", 0))
        .expect("listing stored");

    assert!(matches!(
        service.create(&owner, new_inquiry(listing.id)),
        Err(InquiryError::OwnProperty)
    ));
}

#[test]
fn creation_requires_an_existing_listing() {
    let (service, _, _, users) = build_service();
    let buyer = users
        .insert(user(Role::Buyer, "buyer@x.com", "+251922222222"))
        .expect("buyer stored");

    assert!(matches!(
        service.create(&buyer, new_inquiry(PropertyId::new())),
        Err(InquiryError::PropertyNotFound)
    ));
}

#[test]
fn only_the_denormalized_owner_may_respond() {
    let (service, _, properties, users) = build_service();
    let owner = users
        .insert(user(Role::Seller, "owner@x.com", "+251911111111"))
        .expect("owner stored");
    let buyer = users
        .insert(user(Role::Buyer, "buyer@x.com", "+251922222222"))
        .expect("buyer stored");
    let outsider = users
        .insert(user(Role::Agent, "agent@x.com", "+251933333333"))
        .expect("outsider stored");
    let listing = properties
        .insert(property(&owner.id, ListingStatus::Approved, "Bole apartment", 0))
        .expect("listing stored");

    let inquiry = service
        .create(&buyer, new_inquiry(listing.id))
        .expect("creation succeeds");

    for wrong in [&buyer.id, &outsider.id] {
        assert!(matches!(
            service.respond(wrong, &inquiry.id, "Sure, come by."),
            Err(InquiryError::NotResponder)
        ));
    }

    let responded = service
        .respond(&owner.id, &inquiry.id, "Sure, come by.")
        .expect("response succeeds");
    assert_eq!(responded.status, InquiryStatus::Responded);
    let response = responded.response.expect("response recorded");
    assert_eq!(response.message, "Sure, come by.");
    assert_eq!(response.responded_by, owner.id);
    assert!(responded.is_read);

    // Non-owners stay locked out even after the status change.
    assert!(matches!(
        service.respond(&buyer.id, &inquiry.id, "Still me."),
        Err(InquiryError::NotResponder)
    ));
}

#[test]
fn responding_to_a_missing_inquiry_is_not_found() {
    let (service, _, _, users) = build_service();
    let owner = users
        .insert(user(Role::Seller, "owner@x.com", "+251911111111"))
        .expect("owner stored");

    assert!(matches!(
        service.respond(&owner.id, &InquiryId::new(), "Hello?"),
        Err(InquiryError::NotFound)
    ));
}

#[test]
fn received_and_sent_listings_are_scoped_and_filterable() {
    let (service, _, properties, users) = build_service();
    let owner = users
        .insert(user(Role::Seller, "owner@x.com", "+251911111111"))
        .expect("owner stored");
    let buyer = users
        .insert(user(Role::Buyer, "buyer@x.com", "+251922222222"))
        .expect("buyer stored");
    let other_owner = users
        .insert(user(Role::Landlord, "landlord@x.com", "+251933333333"))
        .expect("other owner stored");

    let listing = properties
        .insert(property(&owner.id, ListingStatus::Approved, "Bole apartment", 0))
        .expect("listing stored");
    let other_listing = properties
        .insert(property(&other_owner.id, ListingStatus::Approved, "CMC villa", 0))
        .expect("listing stored");

    let first = service
        .create(&buyer, new_inquiry(listing.id))
        .expect("creation succeeds");
    service
        .create(&buyer, new_inquiry(other_listing.id))
        .expect("creation succeeds");

    let spec = PageSpec::new(None, None, 10);

    let received = service
        .received(&owner.id, None, &spec)
        .expect("listing succeeds");
    assert_eq!(received.total, 1);
    assert_eq!(received.items[0].inquiry.property, listing.id);
    let summary = received.items[0]
        .property_summary
        .as_ref()
        .expect("summary populated");
    assert_eq!(summary.title, "Bole apartment");

    let sent = service.sent(&buyer.id, &spec).expect("listing succeeds");
    assert_eq!(sent.total, 2);

    // Status filter narrows the received view.
    service
        .respond(&owner.id, &first.id, "Responded.")
        .expect("response succeeds");
    let pending_only = service
        .received(&owner.id, Some(InquiryStatus::Pending), &spec)
        .expect("listing succeeds");
    assert_eq!(pending_only.total, 0);
    let responded_only = service
        .received(&owner.id, Some(InquiryStatus::Responded), &spec)
        .expect("listing succeeds");
    assert_eq!(responded_only.total, 1);
}
