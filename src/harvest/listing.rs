use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use tracing::{debug, info};

use crate::harvest::error::HarvestError;

#[derive(Debug, Deserialize)]
struct ListingResponse {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    items: Vec<ListingItem>,
}

/// Identifiers arrive as strings or numbers depending on the listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ListingId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingId::Number(n) => write!(f, "{}", n),
            ListingId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One car listing and the photo set attached to it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListingItem {
    pub car_id: ListingId,
    pub photo: ListingId,
    pub pic_number: u32,
}

impl ListingItem {
    /// Photo URLs for indices `1..=pic_number`
    pub fn image_urls(&self, template: &str) -> Vec<String> {
        (1..=self.pic_number)
            .map(|index| image_url(template, &self.photo, &self.car_id, index))
            .collect()
    }
}

/// Fill the photo URL template; the same inputs always give the same URL
pub fn image_url(
    template: &str,
    photo: &impl fmt::Display,
    car_id: &impl fmt::Display,
    index: u32,
) -> String {
    template
        .replace("{photo}", &photo.to_string())
        .replace("{car_id}", &car_id.to_string())
        .replace("{index}", &index.to_string())
}

/// Walks the paginated listing API
pub struct ListingClient {
    client: Client,
    listing_url: String,
    image_url: String,
}

impl ListingClient {
    pub fn new(client: Client, listing_url: &str, image_url: &str) -> Self {
        Self {
            client,
            listing_url: listing_url.to_string(),
            image_url: image_url.to_string(),
        }
    }

    fn page_url(&self, page: u32) -> String {
        self.listing_url.replace("{page}", &page.to_string())
    }

    /// Fetch the listings on one page
    pub async fn fetch_page(&self, page: u32) -> Result<Vec<ListingItem>, HarvestError> {
        let url = self.page_url(page);
        debug!("Fetching listing page {}: {}", page, url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::Status { url, status });
        }

        let listing: ListingResponse = response.json().await?;
        Ok(listing.data.items)
    }

    /// Collect the photo URLs of pages `0..pages`, fetched one page at a time
    pub async fn collect_image_urls(&self, pages: u32) -> Result<Vec<String>, HarvestError> {
        let mut image_urls = Vec::new();

        for page in 0..pages {
            for item in self.fetch_page(page).await? {
                let urls = item.image_urls(&self.image_url);
                info!("Car ID {}: {} images", item.car_id, urls.len());
                for url in &urls {
                    debug!("{}", url);
                }
                image_urls.extend(urls);
            }
        }

        info!(
            "Collected {} image URLs from {} pages",
            image_urls.len(),
            pages
        );
        Ok(image_urls)
    }
}
