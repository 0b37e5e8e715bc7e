//! The admin console's listing catalog.
//!
//! One entry per listing screen, carrying the REST path, envelope key, and
//! searchable fields for that screen. Every record is identified by the
//! backend's `_id` field.

use crate::resource::ResourceSpec;

/// All registered listing names, in sidebar order.
pub const NAMES: &[&str] = &[
    "users",
    "dating-users",
    "events",
    "services",
    "sales",
    "boosts",
    "datings",
];

/// Look up a listing by its CLI name.
pub fn find(name: &str) -> Option<ResourceSpec> {
    match name {
        "users" => Some(users()),
        "dating-users" => Some(dating_users()),
        "events" => Some(events()),
        "services" => Some(services()),
        "sales" => Some(sales()),
        "boosts" => Some(boosts()),
        "datings" => Some(datings()),
        _ => None,
    }
}

/// Platform users, searchable by name, email, and phone.
pub fn users() -> ResourceSpec {
    ResourceSpec::new("user", "users", "_id")
        .and_then(|s| s.with_filter_fields(["firstname", "lastname", "email", "phone"]))
        .expect("static spec is valid")
}

/// The dating-profile view over the same user resource.
pub fn dating_users() -> ResourceSpec {
    ResourceSpec::new("user", "users", "_id")
        .and_then(|s| s.with_filter_fields(["firstname", "lastname", "email", "phone"]))
        .expect("static spec is valid")
}

/// Events, searchable by name and location fields.
pub fn events() -> ResourceSpec {
    ResourceSpec::new("event", "events", "_id")
        .and_then(|s| s.with_filter_fields(["name", "address", "city_state", "zipcode"]))
        .expect("static spec is valid")
}

/// Service offerings, searchable by text and category name.
pub fn services() -> ResourceSpec {
    ResourceSpec::new("service", "services", "_id")
        .and_then(|s| {
            s.with_filter_fields(["title", "description", "address", "category.name", "zipcode"])
        })
        .expect("static spec is valid")
}

/// Sale listings, same searchable shape as services.
pub fn sales() -> ResourceSpec {
    ResourceSpec::new("sale", "sales", "_id")
        .and_then(|s| {
            s.with_filter_fields(["title", "description", "address", "category.name", "zipcode"])
        })
        .expect("static spec is valid")
}

/// Paid promotions over sale listings.
pub fn boosts() -> ResourceSpec {
    ResourceSpec::new("boost", "boosts", "_id")
        .and_then(|s| {
            s.with_filter_fields(["title", "description", "address", "category.name", "zipcode"])
        })
        .expect("static spec is valid")
}

/// Matched dating pairs, searchable by name and location fields.
pub fn datings() -> ResourceSpec {
    ResourceSpec::new("dating", "datings", "_id")
        .and_then(|s| s.with_filter_fields(["name", "address", "city_state", "zipcode"]))
        .expect("static spec is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_name_resolves() {
        for name in NAMES {
            assert!(find(name).is_some(), "catalog entry missing for {name}");
        }
        assert!(find("widgets").is_none());
    }

    #[test]
    fn every_listing_is_searchable() {
        for name in NAMES {
            let spec = find(name).unwrap();
            assert!(
                !spec.filter_fields().is_empty(),
                "{name} has no filter fields"
            );
        }
    }
}
