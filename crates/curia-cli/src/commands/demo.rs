//! Demo command implementation.
//!
//! Runs any listing command against a freshly seeded in-memory backend, so
//! the console can be explored without a server or credentials. State lives
//! for one invocation only.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::json;

use curia_core::traits::Backend;
use curia_core::{Credentials, Record, catalog};
use curia_mem::MemBackend;

use super::{delete, list, update};

const DEMO_EMAIL: &str = "admin@demo.local";
const DEMO_PASSWORD: &str = "demo-password";

#[derive(Args, Debug)]
pub struct DemoArgs {
    #[command(subcommand)]
    pub command: DemoSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DemoSubcommand {
    /// List a seeded collection
    List(list::ListArgs),

    /// Delete a seeded record after confirmation
    Delete(delete::DeleteArgs),

    /// Update fields on a seeded record
    Update(update::UpdateArgs),
}

pub async fn run(args: DemoArgs) -> Result<()> {
    let backend = seeded_backend()?;
    let session = backend
        .login(Credentials::new(DEMO_EMAIL, DEMO_PASSWORD))
        .await
        .context("Failed to log in to the demo backend")?;

    match args.command {
        DemoSubcommand::List(args) => list::execute(&args, &session).await,
        DemoSubcommand::Delete(args) => delete::execute(&args, &session).await,
        DemoSubcommand::Update(args) => update::execute(&args, &session).await,
    }
}

fn seeded_backend() -> Result<MemBackend> {
    let backend = MemBackend::new();
    backend.create_account(DEMO_EMAIL, DEMO_PASSWORD)?;

    let to_records = |values: Vec<serde_json::Value>| -> Result<Vec<Record>> {
        values
            .into_iter()
            .map(|v| Ok(Record::new(v)?))
            .collect()
    };

    let first_names = [
        "Ada", "Grace", "Edsger", "Barbara", "Alan", "Radia", "Donald", "Frances", "Tony",
        "Margaret", "Dennis", "Katherine",
    ];
    let users = first_names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            json!({
                "_id": format!("u{}", i + 1),
                "firstname": name,
                "lastname": "Example",
                "email": format!("{}@example.com", name.to_lowercase()),
                "phone": format!("555-01{:02}", i + 1),
                "profileType": if i % 3 == 0 { "dating" } else { "standard" },
                "status": "active",
            })
        })
        .collect();

    let events = vec![
        json!({ "_id": "e1", "name": "Harborview Picnic", "address": "12 Pier Rd",
                "city_state": "Portland, OR", "zipcode": "97201" }),
        json!({ "_id": "e2", "name": "Winter Market", "address": "400 Elm St",
                "city_state": "Burlington, VT", "zipcode": "05401" }),
        json!({ "_id": "e3", "name": "Rooftop Cinema", "address": "78 High St",
                "city_state": "Austin, TX", "zipcode": "78701" }),
        json!({ "_id": "e4", "name": "Spring Regatta", "address": "1 Marina Way",
                "city_state": "Annapolis, MD", "zipcode": "21401" }),
    ];

    let services = vec![
        json!({ "_id": "s1", "title": "Lawn care", "description": "Weekly mowing and edging",
                "address": "North side", "category": { "name": "Garden" }, "zipcode": "97201" }),
        json!({ "_id": "s2", "title": "Dog walking", "description": "Mid-day walks",
                "address": "Downtown", "category": { "name": "Pets" }, "zipcode": "97204" }),
        json!({ "_id": "s3", "title": "House painting", "description": "Interior and exterior",
                "address": "Citywide", "category": { "name": "Home" }, "zipcode": "97210" }),
    ];

    let sales = vec![
        json!({ "_id": "sa1", "title": "Road bike", "description": "54cm, recently tuned",
                "address": "Pickup only", "category": { "name": "Sports" }, "zipcode": "97202" }),
        json!({ "_id": "sa2", "title": "Bookshelf", "description": "Solid oak, five shelves",
                "address": "Pickup only", "category": { "name": "Furniture" }, "zipcode": "97209" }),
        json!({ "_id": "sa3", "title": "Espresso machine", "description": "Lightly used",
                "address": "Will ship", "category": { "name": "Kitchen" }, "zipcode": "97214" }),
    ];

    let boosts = vec![
        json!({ "_id": "b1", "title": "Road bike", "description": "Front-page placement",
                "address": "Pickup only", "category": { "name": "Sports" }, "zipcode": "97202" }),
        json!({ "_id": "b2", "title": "Espresso machine", "description": "Category spotlight",
                "address": "Will ship", "category": { "name": "Kitchen" }, "zipcode": "97214" }),
    ];

    let datings = vec![
        json!({ "_id": "d1", "name": "Ada & Alan", "address": "Riverside Cafe",
                "city_state": "Portland, OR", "zipcode": "97201", "type": "match" }),
        json!({ "_id": "d2", "name": "Grace & Dennis", "address": "Old Town Library",
                "city_state": "Portland, OR", "zipcode": "97209", "type": "like" }),
        json!({ "_id": "d3", "name": "Barbara & Tony", "address": "Hilltop Park",
                "city_state": "Austin, TX", "zipcode": "78701", "type": "match" }),
    ];

    backend.seed(&catalog::users(), to_records(users)?)?;
    backend.seed(&catalog::events(), to_records(events)?)?;
    backend.seed(&catalog::services(), to_records(services)?)?;
    backend.seed(&catalog::sales(), to_records(sales)?)?;
    backend.seed(&catalog::boosts(), to_records(boosts)?)?;
    backend.seed(&catalog::datings(), to_records(datings)?)?;

    Ok(backend)
}
