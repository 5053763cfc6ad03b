use std::sync::Arc;

use crate::infra::{
    InMemoryInquiryRepository, InMemoryPropertyRepository, InMemoryUserRepository,
};
use addis_estate::accounts::{
    AccountError, AccountService, RegisterRequest, Role, User, UserId, UserRepository,
};
use addis_estate::auth::{AuthGuard, TokenAuthority};
use addis_estate::error::ApiError;
use addis_estate::inquiries::{InquiryService, NewInquiry};
use addis_estate::listings::{
    Area, AreaUnit, Category, Currency, Features, ListingError, ListingService, Location,
    NewListing, PropertyKind,
};
use addis_estate::moderation::ModerationService;

/// Walk the marketplace lifecycle end to end against in-memory stores:
/// registration approval flags, the listing moderation queue, public view
/// counting, and inquiry messaging.
pub(crate) fn run_demo() -> Result<(), ApiError> {
    let users = Arc::new(InMemoryUserRepository::default());
    let properties = Arc::new(InMemoryPropertyRepository::default());
    let inquiries = Arc::new(InMemoryInquiryRepository::default());
    let tokens = Arc::new(TokenAuthority::new("demo-secret", 1));
    let guard = AuthGuard::new(users.clone(), tokens.clone());

    let accounts = AccountService::new(users.clone(), tokens);
    let listings = ListingService::new(properties.clone(), users.clone());
    let messaging = InquiryService::new(inquiries.clone(), properties.clone());
    let moderation = ModerationService::new(users.clone(), properties.clone(), inquiries.clone());

    println!("Marketplace lifecycle demo");

    let buyer = accounts
        .register(register_request(
            Role::Buyer,
            "buyer@demo.et",
            "+251911000001",
        ))?
        .user;
    println!(
        "- Registered buyer {} -> approved immediately: {}",
        buyer.email, buyer.is_approved
    );

    let seller = accounts
        .register(register_request(
            Role::Seller,
            "seller@demo.et",
            "+251911000002",
        ))?
        .user;
    println!(
        "- Registered seller {} -> approved immediately: {}",
        seller.email, seller.is_approved
    );

    let (admin, _) = accounts.seed_admin("admin@demo.et", "+251911000000", "admin123")?;
    println!("- Seeded admin {}", admin.email);

    // The approval gate blocks the seller until the admin acts.
    let seller_record = fetch_user(&users, &seller.id)?;
    match guard.require_approved(&seller_record) {
        Err(err) => println!("- Seller listing attempt blocked: {err}"),
        Ok(()) => println!("- Unexpected: seller already approved"),
    }

    let approved = moderation.approve_user(&seller.id)?;
    println!(
        "- Admin approved seller -> isApproved={} isVerified={}",
        approved.is_approved, approved.is_verified
    );

    let listing = listings.create(&approved, demo_listing())?;
    println!(
        "- Seller created listing '{}' -> status {}",
        listing.title,
        listing.status.label()
    );

    match listings.public_listing(&listing.id) {
        Err(ListingError::NotFound) => {
            println!("- Public fetch before moderation: hidden (not found)")
        }
        Err(err) => println!("- Public fetch failed unexpectedly: {err}"),
        Ok(_) => println!("- Unexpected: pending listing publicly visible"),
    }

    let moderated = moderation.approve_property(&admin.id, &listing.id)?;
    println!(
        "- Admin approved listing at {}",
        moderated
            .approved_at
            .map(|at| at.to_rfc3339())
            .unwrap_or_default()
    );

    let first = listings.public_listing(&listing.id)?;
    let second = listings.public_listing(&listing.id)?;
    println!(
        "- Public fetches count views: {} then {}",
        first.listing.views, second.listing.views
    );

    let buyer_record = fetch_user(&users, &buyer.id)?;
    let inquiry = messaging.create(
        &buyer_record,
        NewInquiry {
            property: listing.id,
            subject: "Viewing request".to_string(),
            message: "Could I see the apartment on Saturday morning?".to_string(),
            priority: None,
        },
    )?;
    println!(
        "- Buyer sent inquiry '{}' -> status {}",
        inquiry.subject,
        inquiry.status.label()
    );

    let responded = messaging.respond(&seller.id, &inquiry.id, "Saturday at ten works.")?;
    println!("- Owner responded -> status {}", responded.status.label());

    let summary = moderation.dashboard()?;
    println!(
        "- Dashboard: {} users ({} pending), {} listings ({} approved), {} inquiries",
        summary.users.total,
        summary.users.pending_approval,
        summary.properties.total,
        summary.properties.approved,
        summary.inquiries.total
    );

    Ok(())
}

fn fetch_user(users: &InMemoryUserRepository, id: &UserId) -> Result<User, ApiError> {
    users
        .fetch(id)?
        .ok_or(ApiError::Account(AccountError::NotFound))
}

fn register_request(role: Role, email: &str, phone: &str) -> RegisterRequest {
    RegisterRequest {
        first_name: "Demo".to_string(),
        last_name: "Account".to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        password: "secret123".to_string(),
        role: Some(role),
        address: None,
    }
}

fn demo_listing() -> NewListing {
    NewListing {
        title: "Bole two-bedroom apartment".to_string(),
        description: "Well-lit two bedroom apartment close to the ring road".to_string(),
        category: Category::ApartmentSale,
        kind: PropertyKind::Apartment,
        price: 4_500_000,
        currency: Currency::Etb,
        area: Area {
            size: 85.0,
            unit: AreaUnit::Sqm,
        },
        location: Location {
            city: "Addis Ababa".to_string(),
            subcity: "Bole".to_string(),
            woreda: None,
            kebele: None,
            coordinates: None,
        },
        features: Features {
            bedrooms: Some(2),
            bathrooms: Some(1),
            parking: true,
            furnished: false,
            garden: false,
            security: true,
        },
    }
}
