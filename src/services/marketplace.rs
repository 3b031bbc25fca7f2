// src/services/marketplace.rs
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use log::{info, warn};
use thiserror::Error;

use crate::clock::Clock;
use crate::config::Settings;
use crate::domain::{Bid, Category, Product, ProductId, Role, User, UNSAVED};
use crate::persistence::Store;
use crate::similarity::DuplicateDetector;
use super::{BidService, CategoryService, ProductService, ServiceError, UserService};

/// Outcomes of the orchestrated use cases. Authorization failures are
/// ordinary results here, on the same footing as validation failures.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("only offerers can manage listings")]
    NotAnOfferer,

    #[error("only bidders can place bids")]
    NotABidder,

    #[error("the listing belongs to another user")]
    NotTheOwner,

    #[error("you cannot bid on your own listing")]
    SelfBid,

    #[error("active listing limit reached")]
    TooManyActiveListings,

    #[error("the bidding window has closed")]
    ListingClosed,

    #[error("no category named {0:?}")]
    UnknownCategory(String),

    #[error("no listing with id {0}")]
    UnknownListing(ProductId),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Composes the entity services into the user-facing marketplace
/// operations. Role and ownership checks live here and nowhere else; the
/// services below only know validation and persistence.
pub struct Marketplace {
    users: UserService,
    products: ProductService,
    categories: CategoryService,
    bids: BidService,
    max_active_listings: usize,
    clock: Arc<dyn Clock>,
    bid_locks: Mutex<HashMap<ProductId, Arc<Mutex<()>>>>,
}

impl Marketplace {
    pub fn new(
        settings: &Settings,
        clock: Arc<dyn Clock>,
        user_store: Arc<dyn Store<User>>,
        product_store: Arc<dyn Store<Product>>,
        category_store: Arc<dyn Store<Category>>,
        bid_store: Arc<dyn Store<Bid>>,
    ) -> Self {
        Marketplace {
            users: UserService::new(user_store, settings.default_score),
            products: ProductService::new(
                product_store.clone(),
                DuplicateDetector::new(settings.duplicate_distance),
                clock.clone(),
            ),
            categories: CategoryService::new(category_store, product_store),
            bids: BidService::new(bid_store, clock.clone()),
            max_active_listings: settings.max_active_listings,
            clock,
            bid_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn listing(&self, id: ProductId) -> Result<Option<Product>, MarketError> {
        Ok(self.products.get(id)?)
    }

    /// An offerer puts a product up for bidding. The user and the category
    /// are created on first use; the listing itself goes through the full
    /// insert validation and the near-duplicate scan.
    pub fn list_for_bid(
        &self,
        user: &User,
        mut product: Product,
        category: Category,
    ) -> Result<Product, MarketError> {
        if user.role != Role::Offerer {
            warn!("{:?} tried to list a product without the offerer role", user.name);
            return Err(MarketError::NotAnOfferer);
        }

        let active = self.products.active_listings(&user.name)?;
        if active >= self.max_active_listings {
            warn!(
                "{:?} already has {} biddable listings",
                user.name, active
            );
            return Err(MarketError::TooManyActiveListings);
        }

        let owner = self.ensure_user(user)?;
        let category = self.ensure_category(category)?;

        product.owner = owner;
        product.category = category.as_link();
        self.products.add(&mut product)?;
        Ok(product)
    }

    /// The named category's immediate children and its directly-filed
    /// listings, as two independent lists.
    pub fn browse(&self, category_name: &str) -> Result<(Vec<Category>, Vec<Product>), MarketError> {
        let missing = |err| match err {
            ServiceError::NotFound => MarketError::UnknownCategory(category_name.to_string()),
            other => MarketError::Service(other),
        };

        let children = self.categories.children_of(category_name).map_err(missing)?;
        let products = self.categories.products_of(category_name).map_err(missing)?;
        Ok((children, products))
    }

    /// The owner takes a listing off the market; the flag is forced off
    /// regardless of the window.
    pub fn close_listing(&self, user: &User, product: &mut Product) -> Result<(), MarketError> {
        self.check_owner(user, product)?;

        product.active = false;
        self.products.update(product)?;
        info!("listing {:?} closed by {:?}", product.name, user.name);
        Ok(())
    }

    /// The owner reworks a listing: name, description, window and price are
    /// taken from `changes`, then the update is validated and persisted.
    pub fn edit_listing(
        &self,
        user: &User,
        product: &mut Product,
        changes: &Product,
    ) -> Result<(), MarketError> {
        self.check_owner(user, product)?;

        product.name = changes.name.clone();
        product.description = changes.description.clone();
        product.starts_at = changes.starts_at;
        product.ends_at = changes.ends_at;
        product.price = changes.price;

        self.products.update(product)?;
        info!("listing {:?} edited by {:?}", product.name, user.name);
        Ok(())
    }

    /// A bidder offers a price on someone else's listing. The sequence
    /// read-validate-write runs under a per-listing lock and against the
    /// persisted row, so two racing bids are applied one after the other and
    /// the later one has to beat the earlier one's price.
    pub fn place_bid(
        &self,
        user: &User,
        product: &mut Product,
        mut bid: Bid,
    ) -> Result<Bid, MarketError> {
        if user.role != Role::Bidder {
            warn!("{:?} tried to bid without the bidder role", user.name);
            return Err(MarketError::NotABidder);
        }

        if user.name == product.owner.name {
            warn!("{:?} tried to bid on their own listing", user.name);
            return Err(MarketError::SelfBid);
        }

        let lock = self.bid_lock(product.id);
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut current = if product.id == UNSAVED {
            product.clone()
        } else {
            self.products
                .get(product.id)?
                .ok_or(MarketError::UnknownListing(product.id))?
        };

        if !current.check_and_expire(self.clock.now()) {
            if current.id != UNSAVED {
                self.products.update(&current)?;
            }
            *product = current;
            info!("late bid on {:?} by {:?}", product.name, user.name);
            return Err(MarketError::ListingClosed);
        }

        bid.bidder = user.clone();
        bid.product = current.clone();
        self.bids.add(&mut bid)?;

        current.price = bid.amount;
        self.products.update(&current)?;
        *product = current;
        Ok(bid)
    }

    fn check_owner(&self, user: &User, product: &Product) -> Result<(), MarketError> {
        if user.role != Role::Offerer {
            warn!("{:?} tried to manage a listing without the offerer role", user.name);
            return Err(MarketError::NotAnOfferer);
        }
        if user.name != product.owner.name {
            warn!(
                "{:?} tried to manage {:?}, owned by {:?}",
                user.name, product.name, product.owner.name
            );
            return Err(MarketError::NotTheOwner);
        }
        Ok(())
    }

    fn ensure_user(&self, user: &User) -> Result<User, MarketError> {
        if let Some(existing) = self.users.find_by_name(&user.name)? {
            return Ok(existing);
        }

        let mut created = self.users.new_user(&user.name, user.role);
        self.users.add(&mut created)?;
        Ok(created)
    }

    fn ensure_category(&self, mut category: Category) -> Result<Category, MarketError> {
        if let Some(existing) = self.categories.find_by_name(&category.name)? {
            return Ok(existing);
        }

        self.categories.add(&mut category)?;
        Ok(category)
    }

    fn bid_lock(&self, id: ProductId) -> Arc<Mutex<()>> {
        let mut locks = self
            .bid_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.entry(id).or_default().clone()
    }
}
