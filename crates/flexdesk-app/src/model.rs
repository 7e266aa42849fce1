// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::Date;

use crate::ids::*;
use crate::record::{FieldSpec, FieldValue, Record, Schema, TableRow};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SellingMode {
    Auction,
    #[serde(rename = "Direct Sale")]
    DirectSale,
}

impl SellingMode {
    pub const ALL: [Self; 2] = [Self::Auction, Self::DirectSale];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auction => "Auction",
            Self::DirectSale => "Direct Sale",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Auction" => Some(Self::Auction),
            "Direct Sale" => Some(Self::DirectSale),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingStatus {
    Active,
    Sold,
    Pending,
}

impl ListingStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Sold, Self::Pending];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Sold => "Sold",
            Self::Pending => "Pending",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Active" => Some(Self::Active),
            "Sold" => Some(Self::Sold),
            "Pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageKind {
    Dashboard,
    Marketplace,
    DeliveryDetails,
}

impl PageKind {
    pub const ALL: [Self; 3] = [Self::Dashboard, Self::Marketplace, Self::DeliveryDetails];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Marketplace => "Marketplace",
            Self::DeliveryDetails => "Delivery Details",
        }
    }

    pub const fn href(self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Marketplace => "/listings/marketplace",
            Self::DeliveryDetails => "/delivery-details",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Marketplace => "marketplace",
            Self::DeliveryDetails => "delivery-details",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dashboard" => Some(Self::Dashboard),
            "marketplace" => Some(Self::Marketplace),
            "delivery-details" => Some(Self::DeliveryDetails),
            _ => None,
        }
    }

    pub fn from_href(href: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.href() == href)
    }

    pub const fn has_table(self) -> bool {
        matches!(self, Self::Dashboard | Self::Marketplace)
    }
}

/// One marketplace ad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    pub seller_name: String,
    pub asking_price: i64,
    pub location: String,
    pub selling_mode: SellingMode,
    pub ad_title: String,
    #[serde(with = "iso_date")]
    pub creation_date: Date,
    pub status: ListingStatus,
}

impl TableRow for Listing {
    fn schema() -> Schema {
        Schema::new(vec![
            FieldSpec::integer("id", "Ad ID"),
            FieldSpec::text("seller_name", "Seller Name").searchable(),
            FieldSpec::integer("asking_price", "Asking Price").currency(),
            FieldSpec::enumeration("location", "Item Location"),
            FieldSpec::enumeration("selling_mode", "Selling Mode"),
            FieldSpec::text("ad_title", "Ad Title").searchable(),
            FieldSpec::date("creation_date", "Creation Date"),
            FieldSpec::enumeration("status", "Status"),
        ])
        .with_date_field("creation_date")
    }

    fn to_record(&self) -> Record {
        Record::new(vec![
            FieldValue::Integer(self.id.get()),
            FieldValue::Text(self.seller_name.clone()),
            FieldValue::Integer(self.asking_price),
            FieldValue::Text(self.location.clone()),
            FieldValue::Text(self.selling_mode.as_str().to_owned()),
            FieldValue::Text(self.ad_title.clone()),
            FieldValue::Date(self.creation_date),
            FieldValue::Text(self.status.as_str().to_owned()),
        ])
    }
}

/// One row of the dashboard asset table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: AssetId,
    pub title: String,
    pub location: String,
    pub selling_mode: SellingMode,
    pub status: ListingStatus,
    pub price: i64,
    #[serde(with = "iso_date")]
    pub creation_date: Date,
}

impl TableRow for Asset {
    fn schema() -> Schema {
        Schema::new(vec![
            FieldSpec::text("title", "Title").searchable(),
            FieldSpec::enumeration("location", "Location"),
            FieldSpec::enumeration("selling_mode", "Selling Mode"),
            FieldSpec::enumeration("status", "Status"),
            FieldSpec::integer("price", "Price").currency(),
            FieldSpec::date("creation_date", "Creation Date"),
        ])
        .with_date_field("creation_date")
    }

    fn to_record(&self) -> Record {
        Record::new(vec![
            FieldValue::Text(self.title.clone()),
            FieldValue::Text(self.location.clone()),
            FieldValue::Text(self.selling_mode.as_str().to_owned()),
            FieldValue::Text(self.status.as_str().to_owned()),
            FieldValue::Integer(self.price),
            FieldValue::Date(self.creation_date),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub change: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewStat {
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailItem {
    pub label: String,
    pub value: String,
}

impl DetailItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyCard {
    pub role: String,
    pub name: String,
    pub rating: f64,
    pub details: Vec<DetailItem>,
}

impl PartyCard {
    /// Avatar fallback: first two characters, upper-cased.
    pub fn initials(&self) -> String {
        self.name.chars().take(2).collect::<String>().to_uppercase()
    }

    /// Filled stars out of five.
    pub fn filled_stars(&self) -> usize {
        self.rating.round().clamp(0.0, 5.0) as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactCard {
    pub name: String,
    pub address: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryDetail {
    pub sell_ad_id: String,
    pub ad_status: ListingStatus,
    pub views: u32,
    pub seller: PartyCard,
    pub buyer: PartyCard,
    pub dispatch: Vec<DetailItem>,
    pub pickup_contact: ContactCard,
    pub package: Vec<DetailItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub text: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub name: String,
    pub role: String,
    pub email: String,
}
