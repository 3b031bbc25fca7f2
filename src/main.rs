use std::sync::Arc;

use actix_web::web;
use log::{error, info};

use auction_market::clock::SystemClock;
use auction_market::config::Settings;
use auction_market::domain::{Bid, Category, Product, User};
use auction_market::persistence::json_file::{read_snapshot, write_snapshot, Snapshot};
use auction_market::persistence::MemoryStore;
use auction_market::services::Marketplace;
use auction_market::web::app::run_app;

const SETTINGS_FILE: &str = "settings.json";
const SNAPSHOT_FILE: &str = "market.json";

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    std::env::set_var("RUST_LOG", "actix_web=info,auction_market=info");
    env_logger::init();

    let settings = Settings::from_file_or_default(SETTINGS_FILE);

    let users = Arc::new(MemoryStore::<User>::new());
    let products = Arc::new(MemoryStore::<Product>::new());
    let categories = Arc::new(MemoryStore::<Category>::new());
    let bids = Arc::new(MemoryStore::<Bid>::new());

    match read_snapshot(SNAPSHOT_FILE) {
        Ok(snapshot) => {
            info!("loading snapshot from {}", SNAPSHOT_FILE);
            load_or_log(&users, snapshot.users);
            load_or_log(&categories, snapshot.categories);
            load_or_log(&products, snapshot.products);
            load_or_log(&bids, snapshot.bids);
        }
        Err(err) => info!("starting with an empty market: {}", err),
    }

    let market = Marketplace::new(
        &settings,
        Arc::new(SystemClock),
        users.clone(),
        products.clone(),
        categories.clone(),
        bids.clone(),
    );

    run_app(web::Data::new(market), 8080).await?;

    let snapshot = Snapshot {
        users: users.rows().unwrap_or_default(),
        categories: categories.rows().unwrap_or_default(),
        products: products.rows().unwrap_or_default(),
        bids: bids.rows().unwrap_or_default(),
    };

    if let Err(err) = write_snapshot(SNAPSHOT_FILE, &snapshot) {
        error!("failed to write snapshot: {}", err);
    }

    Ok(())
}

fn load_or_log<T: auction_market::persistence::Entity>(
    store: &MemoryStore<T>,
    rows: Vec<T>,
) {
    if let Err(err) = store.load(rows) {
        error!("failed to load snapshot rows: {}", err);
    }
}
