// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use flexdesk_app::{
    AdminProfile, ContactCard, DeliveryDetail, DetailItem, ListingStatus, Notification,
    OverviewStat, PartyCard, StatCard,
};

fn stat(title: &str, value: &str, change: &str, href: &str) -> StatCard {
    StatCard {
        title: title.to_owned(),
        value: value.to_owned(),
        change: change.to_owned(),
        href: href.to_owned(),
    }
}

fn overview(title: &str, value: &str) -> OverviewStat {
    OverviewStat {
        title: title.to_owned(),
        value: value.to_owned(),
    }
}

pub fn dashboard_stats() -> Vec<StatCard> {
    vec![
        stat(
            "Total Revenue",
            "₦45,231.89",
            "+20.1% from last month",
            "/delivery-details",
        ),
        stat(
            "Subscriptions",
            "+2350",
            "+180.1% from last month",
            "/users/all",
        ),
        stat("Sales", "+12,234", "+19% from last month", "/delivery-details"),
        stat("Active Now", "+573", "+201 since last hour", "/delivery-details"),
    ]
}

pub fn marketplace_overview() -> Vec<OverviewStat> {
    vec![
        overview("Total created", "107"),
        overview("Total active", "70"),
        overview("Total Sold with Payment Protection", "27"),
        overview("Total Sold w/o Payment Protection", "10"),
    ]
}

pub fn delivery_detail() -> DeliveryDetail {
    DeliveryDetail {
        sell_ad_id: "AD-1258".to_owned(),
        ad_status: ListingStatus::Active,
        views: 25,
        seller: PartyCard {
            role: "Seller".to_owned(),
            name: "Bright Azu - Sender".to_owned(),
            rating: 4.6,
            details: vec![DetailItem::new("Dispatch Details", "")],
        },
        buyer: PartyCard {
            role: "Buyer".to_owned(),
            name: "Bright Azu - Receiver".to_owned(),
            rating: 4.6,
            details: vec![
                DetailItem::new("Purchase Date", "25th Aug 2025"),
                DetailItem::new("Purchase mode", "Purchase Protection"),
                DetailItem::new("Linked Delivery Job", "PP-5698"),
            ],
        },
        dispatch: vec![
            DetailItem::new("Created at", "25th Aug 2025"),
            DetailItem::new("Ad Expiry date", "25th Aug 2027"),
            DetailItem::new("Pickup Type", "From Sender's location"),
            DetailItem::new("Delivery Type", "PP, Direct Contact"),
        ],
        pickup_contact: ContactCard {
            name: "Adebayo Ojoba".to_owned(),
            address: "24 Akonwonjo Road, Egbeda, Alimoso".to_owned(),
            phone: "+2348037456908".to_owned(),
        },
        package: vec![
            DetailItem::new("Title", "New Samsung Galaxy S10"),
            DetailItem::new("Category", "Electronics"),
            DetailItem::new(
                "Product category",
                "Multi Category (Petroleum/Liquids/Chemicals/Agricultural Produce)",
            ),
            DetailItem::new("Package Weight", "5kg"),
            DetailItem::new("Monetary Worth of Package", "60,000"),
            DetailItem::new("Pickup preference", "No Vehicle"),
            DetailItem::new("Delivery Fee Invoice Recipient", "Sender"),
        ],
    }
}

pub fn notifications() -> Vec<Notification> {
    [
        ("New message received", "2 min ago"),
        ("Server update scheduled", "1 hour ago"),
    ]
    .into_iter()
    .map(|(text, time)| Notification {
        text: text.to_owned(),
        time: time.to_owned(),
    })
    .collect()
}

pub fn admin_profile() -> AdminProfile {
    AdminProfile {
        name: "e6rhrdfbrdsb ergeteb".to_owned(),
        role: "ADMIN".to_owned(),
        email: "admin@example.com".to_owned(),
    }
}
