use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use auction_market::clock::ManualClock;
use auction_market::config::Settings;
use auction_market::domain::{Bid, Category, Product, Role, User, UNSAVED};
use auction_market::money::{Amount, Currency};
use auction_market::persistence::MemoryStore;
use auction_market::services::Marketplace;
// See https://users.rust-lang.org/t/sharing-code-and-macros-in-tests-directory/3098/7

// Sample data for tests
pub fn sample_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 7, 1, 8, 0, 0).unwrap()
}

pub fn sample_starts_at() -> DateTime<Utc> {
    sample_now()
}

pub fn sample_ends_at() -> DateTime<Utc> {
    sample_now() + Duration::days(23)
}

pub fn sample_bid_time() -> DateTime<Utc> {
    sample_now() + Duration::days(1)
}

pub fn ron(value: i64) -> Amount {
    Amount::new(Currency::RON, value)
}

pub fn eur(value: i64) -> Amount {
    Amount::new(Currency::EUR, value)
}

pub fn valentina() -> User {
    User {
        id: UNSAVED,
        name: "Valentina".to_string(),
        role: Role::Offerer,
        score: 100.0,
    }
}

pub fn andrei() -> User {
    User {
        id: UNSAVED,
        name: "Andrei".to_string(),
        role: Role::Bidder,
        score: 100.0,
    }
}

pub fn bogdan() -> User {
    User {
        id: UNSAVED,
        name: "Bogdan".to_string(),
        role: Role::Bidder,
        score: 100.0,
    }
}

pub fn haine() -> Category {
    Category::new("Haine")
}

pub fn bluza() -> Product {
    listing("Bluza", "Bluza marca Zara, Marimea M", ron(10))
}

pub fn listing(name: &str, description: &str, price: Amount) -> Product {
    Product {
        id: UNSAVED,
        name: name.to_string(),
        description: description.to_string(),
        owner: valentina(),
        category: haine(),
        starts_at: sample_starts_at(),
        ends_at: sample_ends_at(),
        price,
        active: true,
    }
}

pub fn bid_on(product: &Product, bidder: User, amount: Amount) -> Bid {
    Bid::new(bidder, product.clone(), amount, sample_bid_time())
}

// A marketplace over in-memory stores with a controllable clock.
pub struct TestMarket {
    pub market: Marketplace,
    pub clock: Arc<ManualClock>,
    pub users: Arc<MemoryStore<User>>,
    pub products: Arc<MemoryStore<Product>>,
    pub categories: Arc<MemoryStore<Category>>,
    pub bids: Arc<MemoryStore<Bid>>,
}

pub fn test_market() -> TestMarket {
    test_market_with(Settings::default())
}

pub fn test_market_with(settings: Settings) -> TestMarket {
    let clock = Arc::new(ManualClock::new(sample_now()));
    let users = Arc::new(MemoryStore::<User>::new());
    let products = Arc::new(MemoryStore::<Product>::new());
    let categories = Arc::new(MemoryStore::<Category>::new());
    let bids = Arc::new(MemoryStore::<Bid>::new());

    let market = Marketplace::new(
        &settings,
        clock.clone(),
        users.clone(),
        products.clone(),
        categories.clone(),
        bids.clone(),
    );

    TestMarket {
        market,
        clock,
        users,
        products,
        categories,
        bids,
    }
}
