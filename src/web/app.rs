use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Result};
use actix_web::middleware::Logger;
use base64::{Engine as _, engine::general_purpose};
use log::info;
use serde_json::Value;

use crate::domain::{Bid, Category, ProductId, Role, User, UNSAVED};
use crate::money::Amount;
use crate::services::{MarketError, Marketplace, ServiceError};
use super::types::{
    ApiError, BidItem, BidRequest, BrowseResponse, CategoryItem, EditListingRequest,
    ListingItem, ListingRequest,
};

// Read x-jwt-payload header and extract user information
fn get_auth_user(req: &HttpRequest) -> Option<User> {
    let auth_header = req.headers().get("x-jwt-payload")?;
    let auth_str = auth_header.to_str().ok()?;

    // Decode base64
    let decoded = general_purpose::STANDARD.decode(auth_str).ok()?;
    let json_str = String::from_utf8(decoded).ok()?;

    // Parse JSON
    let json: Value = serde_json::from_str(&json_str).ok()?;

    let name = json.get("name")?.as_str()?;
    let role = match json.get("role")?.as_str()? {
        "Bidder" => Role::Bidder,
        "Offerer" => Role::Offerer,
        _ => return None,
    };

    Some(User {
        id: UNSAVED,
        name: name.to_string(),
        role,
        score: 0.0,
    })
}

// Middleware to require authentication
async fn with_auth<F>(req: HttpRequest, f: F) -> Result<HttpResponse>
where
    F: FnOnce(User) -> Result<HttpResponse>,
{
    match get_auth_user(&req) {
        Some(user) => f(user),
        None => Ok(HttpResponse::Unauthorized().body("Unauthorized")),
    }
}

fn error_response(err: MarketError) -> HttpResponse {
    let body = ApiError {
        message: err.to_string(),
    };

    match err {
        MarketError::NotAnOfferer
        | MarketError::NotABidder
        | MarketError::NotTheOwner
        | MarketError::SelfBid => HttpResponse::Forbidden().json(body),

        MarketError::UnknownCategory(_) | MarketError::UnknownListing(_) => {
            HttpResponse::NotFound().json(body)
        }

        MarketError::Service(ServiceError::NotFound) => HttpResponse::NotFound().json(body),

        MarketError::Service(ServiceError::Store(_)) => {
            HttpResponse::InternalServerError().json(body)
        }

        _ => HttpResponse::BadRequest().json(body),
    }
}

fn not_found(id: ProductId) -> HttpResponse {
    HttpResponse::NotFound().json(ApiError {
        message: format!("no listing with id {}", id),
    })
}

// Offer a product for bidding
async fn create_listing(
    req: HttpRequest,
    body: web::Json<ListingRequest>,
    data: web::Data<Marketplace>,
) -> Result<HttpResponse> {
    with_auth(req, |user| {
        let product = body.to_product(user.clone());
        let category = Category::new(body.category.as_str());

        match data.list_for_bid(&user, product, category) {
            Ok(product) => Ok(HttpResponse::Ok().json(ListingItem::from(&product))),
            Err(err) => Ok(error_response(err)),
        }
    })
    .await
}

// Get a listing by ID
async fn get_listing(
    path: web::Path<ProductId>,
    data: web::Data<Marketplace>,
) -> Result<HttpResponse> {
    let id = path.into_inner();

    match data.listing(id) {
        Ok(Some(product)) => Ok(HttpResponse::Ok().json(ListingItem::from(&product))),
        Ok(None) => Ok(not_found(id)),
        Err(err) => Ok(error_response(err)),
    }
}

// A category's sub-categories and direct listings
async fn browse_category(
    path: web::Path<String>,
    data: web::Data<Marketplace>,
) -> Result<HttpResponse> {
    let name = path.into_inner();

    match data.browse(&name) {
        Ok((categories, listings)) => Ok(HttpResponse::Ok().json(BrowseResponse {
            categories: categories.iter().map(CategoryItem::from).collect(),
            listings: listings.iter().map(ListingItem::from).collect(),
        })),
        Err(err) => Ok(error_response(err)),
    }
}

// The owner takes a listing off the market
async fn close_listing(
    req: HttpRequest,
    path: web::Path<ProductId>,
    data: web::Data<Marketplace>,
) -> Result<HttpResponse> {
    let id = path.into_inner();

    with_auth(req, |user| {
        let mut product = match data.listing(id) {
            Ok(Some(product)) => product,
            Ok(None) => return Ok(not_found(id)),
            Err(err) => return Ok(error_response(err)),
        };

        match data.close_listing(&user, &mut product) {
            Ok(()) => Ok(HttpResponse::Ok().json(ListingItem::from(&product))),
            Err(err) => Ok(error_response(err)),
        }
    })
    .await
}

// The owner reworks a listing
async fn update_listing(
    req: HttpRequest,
    path: web::Path<ProductId>,
    body: web::Json<EditListingRequest>,
    data: web::Data<Marketplace>,
) -> Result<HttpResponse> {
    let id = path.into_inner();

    with_auth(req, |user| {
        let mut product = match data.listing(id) {
            Ok(Some(product)) => product,
            Ok(None) => return Ok(not_found(id)),
            Err(err) => return Ok(error_response(err)),
        };

        let changes = body.apply_to(&product);
        match data.edit_listing(&user, &mut product, &changes) {
            Ok(()) => Ok(HttpResponse::Ok().json(ListingItem::from(&product))),
            Err(err) => Ok(error_response(err)),
        }
    })
    .await
}

// Place a bid on a listing
async fn place_bid(
    req: HttpRequest,
    path: web::Path<ProductId>,
    body: web::Json<BidRequest>,
    data: web::Data<Marketplace>,
) -> Result<HttpResponse> {
    let id = path.into_inner();

    with_auth(req, |user| {
        let mut product = match data.listing(id) {
            Ok(Some(product)) => product,
            Ok(None) => return Ok(not_found(id)),
            Err(err) => return Ok(error_response(err)),
        };

        let currency = body.currency.unwrap_or_else(|| product.price.currency());
        let amount = Amount::new(currency, body.amount);
        let bid = Bid::new(user.clone(), product.clone(), amount, data.now());

        match data.place_bid(&user, &mut product, bid) {
            Ok(bid) => Ok(HttpResponse::Ok().json(BidItem::from(&bid))),
            Err(err) => Ok(error_response(err)),
        }
    })
    .await
}

// Configure routes
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .route("/listings", web::post().to(create_listing))
            .route("/listings/{id}", web::get().to(get_listing))
            .route("/listings/{id}", web::put().to(update_listing))
            .route("/listings/{id}/close", web::post().to(close_listing))
            .route("/listings/{id}/bids", web::post().to(place_bid))
            .route("/categories/{name}", web::get().to(browse_category)),
    );
}

// Main application
pub async fn run_app(market: web::Data<Marketplace>, port: u16) -> std::io::Result<()> {
    info!("Starting server on port {}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(market.clone())
            .wrap(Logger::default())
            .configure(configure_app)
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
