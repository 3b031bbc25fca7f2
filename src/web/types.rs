use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Bid, Category, CategoryId, Product, ProductId, User, UNSAVED};
use crate::money::{Amount, AmountValue, Currency};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListingRequest {
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "startsAt")]
    pub starts_at: DateTime<Utc>,
    #[serde(rename = "endsAt")]
    pub ends_at: DateTime<Utc>,
    pub price: AmountValue,
    pub currency: Option<Currency>,
}

impl ListingRequest {
    pub fn to_product(&self, owner: User) -> Product {
        let currency = self.currency.unwrap_or(Currency::EUR);

        Product {
            id: UNSAVED,
            name: self.name.clone(),
            description: self.description.clone(),
            owner,
            category: Category::new(self.category.as_str()),
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            price: Amount::new(currency, self.price),
            active: true,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EditListingRequest {
    pub name: String,
    pub description: String,
    #[serde(rename = "startsAt")]
    pub starts_at: DateTime<Utc>,
    #[serde(rename = "endsAt")]
    pub ends_at: DateTime<Utc>,
    pub price: AmountValue,
    pub currency: Option<Currency>,
}

impl EditListingRequest {
    /// The edited listing, with the fields an owner may change copied over
    /// the current one.
    pub fn apply_to(&self, current: &Product) -> Product {
        let currency = self.currency.unwrap_or_else(|| current.price.currency());

        Product {
            name: self.name.clone(),
            description: self.description.clone(),
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            price: Amount::new(currency, self.price),
            ..current.clone()
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BidRequest {
    pub amount: AmountValue,
    pub currency: Option<Currency>,
}

#[derive(Debug, Serialize)]
pub struct ListingItem {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub owner: String,
    pub category: String,
    #[serde(rename = "startsAt")]
    pub starts_at: DateTime<Utc>,
    #[serde(rename = "endsAt")]
    pub ends_at: DateTime<Utc>,
    pub price: Amount,
    pub active: bool,
}

impl From<&Product> for ListingItem {
    fn from(product: &Product) -> Self {
        ListingItem {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            owner: product.owner.name.clone(),
            category: product.category.name.clone(),
            starts_at: product.starts_at,
            ends_at: product.ends_at,
            price: product.price,
            active: product.active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryItem {
    pub id: CategoryId,
    pub name: String,
}

impl From<&Category> for CategoryItem {
    fn from(category: &Category) -> Self {
        CategoryItem {
            id: category.id,
            name: category.name.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BrowseResponse {
    pub categories: Vec<CategoryItem>,
    pub listings: Vec<ListingItem>,
}

#[derive(Debug, Serialize)]
pub struct BidItem {
    pub id: i64,
    #[serde(rename = "placedAt")]
    pub placed_at: DateTime<Utc>,
    pub bidder: String,
    pub amount: Amount,
}

impl From<&Bid> for BidItem {
    fn from(bid: &Bid) -> Self {
        BidItem {
            id: bid.id,
            placed_at: bid.placed_at,
            bidder: bid.bidder.name.clone(),
            amount: bid.amount,
        }
    }
}
