// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use flexdesk_app::{
    Asset, AssetId, Listing, ListingId, ListingStatus, RecordSet, SellingMode,
};
use serde::Serialize;
use std::path::PathBuf;
use time::{Date, Duration, Month};

const FIRST_NAMES: [&str; 14] = [
    "Adaeze", "Bright", "Chinedu", "Damilola", "Emeka", "Funke", "Ifeoma", "Kelechi", "Ngozi",
    "Segun", "Tobi", "Uche", "Yemi", "Zainab",
];
const LAST_NAMES: [&str; 12] = [
    "Adebayo", "Azu", "Bello", "Eze", "Nwosu", "Ogunleye", "Okafor", "Okeke", "Olawale", "Onyeka",
    "Sani", "Usman",
];

const LOCATIONS: [&str; 5] = ["Lagos", "Abuja", "Port Harcourt", "Kano", "Ibadan"];

const PRODUCTS: [&str; 16] = [
    "iPhone 15 Pro",
    "MacBook Pro M3",
    "Samsung Galaxy S24",
    "Dell XPS 13",
    "iPad Air",
    "Sony WH-1000XM5",
    "Nintendo Switch OLED",
    "Canon EOS R6",
    "AirPods Pro",
    "iMac 24-inch",
    "Google Pixel 8",
    "Surface Pro 9",
    "HP Spectre x360",
    "Tecno Camon 20",
    "Infinix Note 30",
    "LG OLED C3",
];
const CONDITIONS: [&str; 4] = ["New", "Used", "Refurbished", "Open Box"];

const REFERENCE_YEAR: i32 = 2025;

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator for marketplace listings and dashboard assets.
#[derive(Debug, Clone)]
pub struct MarketFaker {
    rng: DeterministicRng,
    next_id: i64,
}

impl MarketFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            next_id: 1,
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn listing(&mut self) -> Listing {
        let id = self.take_id();
        Listing {
            id: ListingId::new(id),
            seller_name: format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES)),
            asking_price: self.price(100, 5_000, 50),
            location: self.pick(&LOCATIONS).to_owned(),
            selling_mode: self.selling_mode(),
            ad_title: format!("{} {}", self.pick(&CONDITIONS), self.pick(&PRODUCTS)),
            creation_date: self.date_in_october(),
            status: self.status(),
        }
    }

    pub fn asset(&mut self) -> Asset {
        let id = self.take_id();
        Asset {
            id: AssetId::new(id),
            title: self.pick(&PRODUCTS).to_owned(),
            location: self.pick(&LOCATIONS).to_owned(),
            selling_mode: self.selling_mode(),
            status: self.status(),
            price: self.price(50_000, 3_500_000, 10_000),
            creation_date: self.date_in_october(),
        }
    }

    pub fn listings(&mut self, count: usize) -> Vec<Listing> {
        (0..count).map(|_| self.listing()).collect()
    }

    pub fn assets(&mut self, count: usize) -> Vec<Asset> {
        (0..count).map(|_| self.asset()).collect()
    }

    pub fn date_in_october(&mut self) -> Date {
        fixture_date(1) + Duration::days(self.rng.int_n(31) as i64)
    }

    fn take_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn price(&mut self, min: i64, max: i64, step: i64) -> i64 {
        let steps = ((max - min) / step) as usize + 1;
        min + self.rng.int_n(steps) as i64 * step
    }

    fn selling_mode(&mut self) -> SellingMode {
        SellingMode::ALL[self.rng.int_n(SellingMode::ALL.len())]
    }

    fn status(&mut self) -> ListingStatus {
        ListingStatus::ALL[self.rng.int_n(ListingStatus::ALL.len())]
    }
}

pub fn listing_set(seed: u64, count: usize) -> RecordSet {
    RecordSet::from_rows(&MarketFaker::new(seed).listings(count))
}

pub fn asset_set(seed: u64, count: usize) -> RecordSet {
    RecordSet::from_rows(&MarketFaker::new(seed).assets(count))
}

/// Day of October in the fixture year.
pub fn fixture_date(day: u8) -> Date {
    Date::from_calendar_date(REFERENCE_YEAR, Month::October, day.clamp(1, 31))
        .unwrap_or(Date::MIN)
}

pub fn temp_json_path(name: &str) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join(name);
    Ok((dir, path))
}

/// Writes `rows` as a pretty JSON array into a fresh temp dir.
pub fn write_json_fixture<T: Serialize>(
    name: &str,
    rows: &[T],
) -> Result<(tempfile::TempDir, PathBuf)> {
    let (dir, path) = temp_json_path(name)?;
    let body = serde_json::to_string_pretty(rows).context("encode fixture rows")?;
    std::fs::write(&path, body).with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}

pub fn locations() -> &'static [&'static str] {
    &LOCATIONS
}

pub fn products() -> &'static [&'static str] {
    &PRODUCTS
}
