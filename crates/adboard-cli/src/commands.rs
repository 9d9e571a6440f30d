//! Subcommand handlers. Auth failures are printed as recoverable messages;
//! only storage and network problems propagate as errors.

use anyhow::Context;
use clap::Args;

use adboard_auth::{AuthStore, JsonFileStorage, NewUser};
use adboard_catalog::composer::resolve_page;
use adboard_catalog::CatalogClient;
use adboard_core::filter::{BrandFilter, CategoryFilter, FilterState, SortOrder};
use adboard_core::{format_category_name, AppConfig};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Free-text search over title and description
    #[arg(long, short = 'q')]
    pub search: Option<String>,
    /// Category slug (as printed by `adboard categories`)
    #[arg(long)]
    pub category: Option<String>,
    /// Exact brand name (as printed by `adboard brands`)
    #[arg(long)]
    pub brand: Option<String>,
    /// Only items currently in stock
    #[arg(long)]
    pub in_stock: bool,
    /// Price sort: `lowest` or `highest`
    #[arg(long)]
    pub sort: Option<String>,
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Build the filter from a shareable query string instead of flags
    #[arg(long)]
    pub from_url: Option<String>,
    /// Print the shareable query string for this filter and exit
    #[arg(long)]
    pub as_url: bool,
}

impl ListArgs {
    fn filter(&self) -> FilterState {
        let mut filter = match &self.from_url {
            Some(query) => FilterState::parse_query_str(query),
            None => {
                let mut filter = FilterState::new();
                if let Some(search) = &self.search {
                    filter.set_search(search.clone());
                }
                if let Some(category) = &self.category {
                    filter.set_category(CategoryFilter::Only(category.clone()));
                }
                if let Some(brand) = &self.brand {
                    filter.set_brand(BrandFilter::Only(brand.clone()));
                }
                filter.set_only_in_stock(self.in_stock);
                if let Some(sort) = &self.sort {
                    filter.set_sort(SortOrder::parse_param(sort));
                }
                filter
            }
        };
        filter.set_page(self.page);
        filter
    }
}

fn open_auth(config: &AppConfig) -> anyhow::Result<AuthStore<JsonFileStorage>> {
    AuthStore::open(JsonFileStorage::new(config.credentials_path.clone()))
        .context("opening credential store")
}

/// Prints a login hint and returns `false` when no session is active.
fn require_session(config: &AppConfig) -> anyhow::Result<bool> {
    let store = open_auth(config)?;
    if store.is_authenticated() {
        Ok(true)
    } else {
        println!("not logged in — run `adboard login` first");
        Ok(false)
    }
}

pub async fn list(config: &AppConfig, args: &ListArgs) -> anyhow::Result<()> {
    let filter = args.filter();
    if args.as_url {
        println!("?{}", filter.to_query_string());
        return Ok(());
    }
    if !require_session(config)? {
        return Ok(());
    }

    let client = CatalogClient::from_config(config)?;
    let page = resolve_page(&client, &filter, config.page_size).await?;

    if page.items.is_empty() {
        println!("no matching items");
        return Ok(());
    }
    for item in &page.items {
        let brand = item.brand.as_deref().unwrap_or("-");
        println!(
            "{:>5}  {:<40}  {:>8.2}  {:<16}  {:<20}  {}",
            item.id,
            item.title,
            item.price,
            brand,
            format_category_name(&item.category),
            item.availability_status
        );
    }
    println!(
        "page {} of {} — {} matching items",
        filter.page(),
        page.total_pages(),
        page.total
    );
    Ok(())
}

pub async fn show(config: &AppConfig, id: i64) -> anyhow::Result<()> {
    if !require_session(config)? {
        return Ok(());
    }

    let client = CatalogClient::from_config(config)?;
    let item = client.get_item(id).await?;

    println!("{}  (#{})", item.title, item.id);
    println!("  price:        {:.2} ({}% off)", item.price, item.discount_percentage);
    println!("  rating:       {:.2}", item.rating);
    println!(
        "  category:     {}",
        format_category_name(&item.category)
    );
    if let Some(brand) = &item.brand {
        println!("  brand:        {brand}");
    }
    println!("  availability: {} ({} in stock)", item.availability_status, item.stock);
    if !item.tags.is_empty() {
        println!("  tags:         {}", item.tags.join(", "));
    }
    if !item.description.is_empty() {
        println!("\n{}", item.description);
    }
    if !item.reviews.is_empty() {
        println!("\nreviews:");
        for review in &item.reviews {
            println!("  {:.1}/5  {} — {}", review.rating, review.comment, review.reviewer_name);
        }
    }
    Ok(())
}

pub async fn categories(config: &AppConfig) -> anyhow::Result<()> {
    let client = CatalogClient::from_config(config)?;
    for slug in client.categories().await? {
        println!("{slug:<24}  {}", format_category_name(&slug));
    }
    Ok(())
}

pub async fn brands(config: &AppConfig) -> anyhow::Result<()> {
    let client = CatalogClient::from_config(config)?;
    for brand in client.brands().await? {
        println!("{brand}");
    }
    Ok(())
}

pub fn register(
    config: &AppConfig,
    name: String,
    email: String,
    password: String,
) -> anyhow::Result<()> {
    let mut store = open_auth(config)?;
    if store.register(NewUser {
        name,
        email: email.clone(),
        password,
    })? {
        println!("registered {email} — run `adboard login` to start a session");
    } else {
        println!("an account with this email already exists");
    }
    Ok(())
}

pub fn login(config: &AppConfig, email: &str, password: &str) -> anyhow::Result<()> {
    let mut store = open_auth(config)?;
    if store.login(email, password)? {
        println!("logged in as {email}");
    } else {
        println!("invalid email or password");
    }
    Ok(())
}

pub fn logout(config: &AppConfig) -> anyhow::Result<()> {
    let mut store = open_auth(config)?;
    store.logout()?;
    println!("logged out");
    Ok(())
}

pub fn whoami(config: &AppConfig) -> anyhow::Result<()> {
    let store = open_auth(config)?;
    match store.current_user() {
        Some(user) => println!("{} <{}>", user.name, user.email),
        None => println!("not logged in"),
    }
    Ok(())
}
