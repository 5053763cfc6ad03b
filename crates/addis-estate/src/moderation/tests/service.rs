use super::*;
use crate::accounts::{Role, UserFilter, UserRepository};
use crate::listings::{ListingFilter, ListingQuery, ListingStatus, PropertyRepository};
use crate::moderation::{ModerationError, DEFAULT_REJECTION_REASON};
use crate::pagination::PageSpec;
use crate::testing::{property, user};

#[test]
fn approving_a_property_stamps_the_approver() {
    let (service, users, properties, _) = build_service();
    let admin = users
        .insert(user(Role::Admin, "admin@x.com", "+251900000000"))
        .expect("admin stored");
    let seller = users
        .insert(user(Role::Seller, "seller@x.com", "+251911111111"))
        .expect("seller stored");
    let listing = properties
        .insert(property(&seller.id, ListingStatus::Pending, "Bole apartment", 0))
        .expect("listing stored");

    let approved = service
        .approve_property(&admin.id, &listing.id)
        .expect("approval succeeds");

    assert_eq!(approved.status, ListingStatus::Approved);
    assert_eq!(approved.approved_by, Some(admin.id));
    assert!(approved.approved_at.is_some());
    assert!(approved.rejection_reason.is_none());
}

#[test]
fn re_approval_is_idempotent_and_restamps() {
    let (service, users, properties, _) = build_service();
    let first_admin = users
        .insert(user(Role::Admin, "admin@x.com", "+251900000000"))
        .expect("admin stored");
    let second_admin = users
        .insert(user(Role::Admin, "admin2@x.com", "+251900000001"))
        .expect("admin stored");
    let seller = users
        .insert(user(Role::Seller, "seller@x.com", "+251911111111"))
        .expect("seller stored");
    let listing = properties
        .insert(property(&seller.id, ListingStatus::Pending, "Bole apartment", 0))
        .expect("listing stored");

    service
        .approve_property(&first_admin.id, &listing.id)
        .expect("first approval succeeds");
    let again = service
        .approve_property(&second_admin.id, &listing.id)
        .expect("second approval succeeds");

    assert_eq!(again.status, ListingStatus::Approved);
    assert_eq!(again.approved_by, Some(second_admin.id));
}

#[test]
fn rejection_records_a_reason_and_clears_approval_stamps() {
    let (service, users, properties, _) = build_service();
    let admin = users
        .insert(user(Role::Admin, "admin@x.com", "+251900000000"))
        .expect("admin stored");
    let seller = users
        .insert(user(Role::Seller, "seller@x.com", "+251911111111"))
        .expect("seller stored");
    let listing = properties
        .insert(property(&seller.id, ListingStatus::Pending, "Bole apartment", 0))
        .expect("listing stored");

    let rejected = service
        .reject_property(&listing.id, Some("Photos are misleading".to_string()))
        .expect("rejection succeeds");
    assert_eq!(rejected.status, ListingStatus::Rejected);
    assert_eq!(
        rejected.rejection_reason.as_deref(),
        Some("Photos are misleading")
    );

    // Approve then reject without a reason: default message, stamps cleared.
    service
        .approve_property(&admin.id, &listing.id)
        .expect("approval succeeds");
    let re_rejected = service
        .reject_property(&listing.id, None)
        .expect("rejection succeeds");
    assert_eq!(
        re_rejected.rejection_reason.as_deref(),
        Some(DEFAULT_REJECTION_REASON)
    );
    assert!(re_rejected.approved_by.is_none());
    assert!(re_rejected.approved_at.is_none());
}

#[test]
fn rejected_listings_never_reach_the_public_surface() {
    let (service, users, properties, _) = build_service();
    let seller = users
        .insert(user(Role::Seller, "seller@x.com", "+251911111111"))
        .expect("seller stored");
    let listing = properties
        .insert(property(&seller.id, ListingStatus::Pending, "Bole apartment", 0))
        .expect("listing stored");

    service
        .reject_property(&listing.id, None)
        .expect("rejection succeeds");

    let (filter, sort, spec) =
        ListingFilter::public(&ListingQuery::default()).expect("envelope builds");
    let visible = properties.search(&filter, sort, &spec).expect("search");
    assert_eq!(visible.total, 0);
}

#[test]
fn user_approval_sets_both_flags_and_reject_reverses() {
    let (service, users, _, _) = build_service();
    let seller = users
        .insert(user(Role::Seller, "seller@x.com", "+251911111111"))
        .expect("seller stored");
    assert!(!seller.is_approved);

    let approved = service.approve_user(&seller.id).expect("approval succeeds");
    assert!(approved.is_approved);
    assert!(approved.is_verified);

    let rejected = service.reject_user(&seller.id).expect("rejection succeeds");
    assert!(!rejected.is_approved);

    // The reverse transition is repeatable at any time.
    let re_approved = service.approve_user(&seller.id).expect("approval succeeds");
    assert!(re_approved.is_approved);
}

#[test]
fn admin_accounts_cannot_be_deleted() {
    let (service, users, _, _) = build_service();
    let admin = users
        .insert(user(Role::Admin, "admin@x.com", "+251900000000"))
        .expect("admin stored");

    assert!(matches!(
        service.delete_user(&admin.id),
        Err(ModerationError::AdminUndeletable)
    ));
    // No deletion occurred.
    assert!(users.fetch(&admin.id).expect("fetch succeeds").is_some());

    let buyer = users
        .insert(user(Role::Buyer, "buyer@x.com", "+251911111111"))
        .expect("buyer stored");
    service.delete_user(&buyer.id).expect("deletion succeeds");
    assert!(users.fetch(&buyer.id).expect("fetch succeeds").is_none());

    assert!(matches!(
        service.delete_user(&buyer.id),
        Err(ModerationError::UserNotFound)
    ));
}

#[test]
fn dashboard_aggregates_counts_across_stores() {
    let (service, users, properties, _) = build_service();
    let seller = users
        .insert(user(Role::Seller, "seller@x.com", "+251911111111"))
        .expect("seller stored");
    users
        .insert(user(Role::Buyer, "buyer@x.com", "+251922222222"))
        .expect("buyer stored");

    properties
        .insert(property(&seller.id, ListingStatus::Pending, "Pending", 0))
        .expect("stored");
    properties
        .insert(property(&seller.id, ListingStatus::Approved, "Approved", 1))
        .expect("stored");
    properties
        .insert(property(&seller.id, ListingStatus::Rejected, "Rejected", 2))
        .expect("stored");

    let summary = service.dashboard().expect("dashboard builds");
    assert_eq!(summary.users.total, 2);
    assert_eq!(summary.users.pending_approval, 1);
    assert_eq!(summary.properties.total, 3);
    assert_eq!(summary.properties.pending, 1);
    assert_eq!(summary.properties.approved, 1);
    assert_eq!(summary.properties.rejected, 1);
    assert_eq!(summary.inquiries.total, 0);
}

#[test]
fn admin_listing_views_span_all_statuses() {
    let (service, users, properties, _) = build_service();
    let seller = users
        .insert(user(Role::Seller, "seller@x.com", "+251911111111"))
        .expect("seller stored");

    properties
        .insert(property(&seller.id, ListingStatus::Pending, "Pending", 0))
        .expect("stored");
    properties
        .insert(property(&seller.id, ListingStatus::Rejected, "Rejected", 1))
        .expect("stored");

    let (filter, sort, spec) =
        ListingFilter::admin(&ListingQuery::default()).expect("envelope builds");
    let all = service
        .list_properties(&filter, sort, &spec)
        .expect("listing succeeds");
    assert_eq!(all.total, 2);
    let contact = all.items[0].owner_contact.as_ref().expect("owner populated");
    assert_eq!(contact.email, "seller@x.com");

    let mut pending_query = ListingQuery::default();
    pending_query.status = Some("pending".to_string());
    let (filter, sort, spec) = ListingFilter::admin(&pending_query).expect("envelope builds");
    let pending = service
        .list_properties(&filter, sort, &spec)
        .expect("listing succeeds");
    assert_eq!(pending.total, 1);
    assert_eq!(pending.items[0].listing.title, "Pending");
}

#[test]
fn user_listing_filters_by_role_and_approval() {
    let (service, users, _, _) = build_service();
    users
        .insert(user(Role::Buyer, "buyer@x.com", "+251911111111"))
        .expect("stored");
    users
        .insert(user(Role::Seller, "seller@x.com", "+251922222222"))
        .expect("stored");
    users
        .insert(user(Role::Seller, "seller2@x.com", "+251933333333"))
        .expect("stored");

    let spec = PageSpec::new(None, None, 10);

    let sellers = service
        .list_users(
            &UserFilter {
                role: Some(Role::Seller),
                approved: None,
            },
            &spec,
        )
        .expect("listing succeeds");
    assert_eq!(sellers.total, 2);

    let unapproved = service
        .list_users(
            &UserFilter {
                role: None,
                approved: Some(false),
            },
            &spec,
        )
        .expect("listing succeeds");
    assert_eq!(unapproved.total, 2);

    let everyone = service
        .list_users(&UserFilter::default(), &spec)
        .expect("listing succeeds");
    assert_eq!(everyone.total, 3);
}
