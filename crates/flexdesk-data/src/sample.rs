// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use flexdesk_app::{Asset, AssetId, Listing, ListingId, ListingStatus, SellingMode};
use time::{Date, Month};

use crate::RecordSource;

/// Compiled-in rows shown when no data files are configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleSource;

impl RecordSource for SampleSource {
    fn name(&self) -> String {
        "sample data".to_owned()
    }

    fn listings(&self) -> anyhow::Result<Vec<Listing>> {
        Ok(sample_listings())
    }

    fn assets(&self) -> anyhow::Result<Vec<Asset>> {
        Ok(sample_assets())
    }
}

fn october(day: u8) -> Date {
    Date::from_calendar_date(2025, Month::October, day).unwrap_or(Date::MIN)
}

fn asset(
    id: i64,
    title: &str,
    location: &str,
    mode: SellingMode,
    status: ListingStatus,
    price: i64,
    day: u8,
) -> Asset {
    Asset {
        id: AssetId::new(id),
        title: title.to_owned(),
        location: location.to_owned(),
        selling_mode: mode,
        status,
        price,
        creation_date: october(day),
    }
}

type ListingRow = (
    i64,
    &'static str,
    i64,
    &'static str,
    SellingMode,
    &'static str,
    u8,
    ListingStatus,
);

const LISTINGS: [ListingRow; 10] = {
    use ListingStatus::{Active, Pending, Sold};
    use SellingMode::{Auction, DirectSale};
    [
        (3, "John Doe", 1000, "Lagos", Auction, "Used iPhone 12", 12, Active),
        (556, "Jane Smith", 2500, "Abuja", DirectSale, "MacBook Pro M3", 11, Active),
        (88, "Mike Johnson", 800, "Lagos", Auction, "Samsung Galaxy S24", 10, Sold),
        (89, "Sarah Wilson", 1500, "Port Harcourt", DirectSale, "Dell XPS 13", 9, Active),
        (8, "David Brown", 300, "Kano", Auction, "AirPods Pro", 8, Pending),
        (9, "Lisa Davis", 2000, "Lagos", DirectSale, "Sony WH-1000XM5", 7, Active),
        (97, "Tom Anderson", 350, "Abuja", Auction, "Nintendo Switch OLED", 6, Sold),
        (4, "Emma Taylor", 1800, "Lagos", DirectSale, "Canon EOS R6", 5, Active),
        (76, "Chris Martin", 550, "Ibadan", Auction, "Google Pixel 8", 4, Pending),
        (78, "Anna White", 1400, "Lagos", DirectSale, "Surface Pro 9", 3, Active),
    ]
};

pub fn sample_listings() -> Vec<Listing> {
    LISTINGS
        .into_iter()
        .map(
            |(id, seller, price, location, mode, title, day, status)| Listing {
                id: ListingId::new(id),
                seller_name: seller.to_owned(),
                asking_price: price,
                location: location.to_owned(),
                selling_mode: mode,
                ad_title: title.to_owned(),
                creation_date: october(day),
                status,
            },
        )
        .collect()
}

pub fn sample_assets() -> Vec<Asset> {
    use ListingStatus::{Active, Pending, Sold};
    use SellingMode::{Auction, DirectSale};

    vec![
        asset(1, "iPhone 15 Pro", "Lagos", Auction, Active, 850_000, 15),
        asset(2, "MacBook Pro M3", "Abuja", DirectSale, Active, 2_500_000, 14),
        asset(3, "Samsung Galaxy S24", "Lagos", Auction, Sold, 650_000, 14),
        asset(4, "Dell XPS 13", "Port Harcourt", DirectSale, Active, 1_200_000, 13),
        asset(5, "iPad Air", "Kano", Auction, Pending, 450_000, 12),
        asset(6, "Sony WH-1000XM5", "Lagos", DirectSale, Active, 280_000, 11),
        asset(7, "Nintendo Switch OLED", "Abuja", Auction, Sold, 350_000, 10),
        asset(8, "Canon EOS R6", "Lagos", DirectSale, Active, 1_800_000, 9),
        asset(9, "AirPods Pro", "Ibadan", Auction, Pending, 150_000, 8),
        asset(10, "iMac 24-inch", "Lagos", DirectSale, Active, 3_200_000, 7),
        asset(11, "Google Pixel 8", "Abuja", Auction, Sold, 550_000, 6),
        asset(12, "Surface Pro 9", "Port Harcourt", DirectSale, Active, 1_400_000, 5),
    ]
}
