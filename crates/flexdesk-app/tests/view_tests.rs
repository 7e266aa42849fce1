// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use flexdesk_app::{
    Constraint, DateRange, FieldValue, FilterCriteria, PageState, RecordSet, SortDirection,
    SortSpec, TableView, ViewCommand, ViewEvent, apply_filters, apply_sort, paginate,
};
use flexdesk_testkit::{MarketFaker, asset_set, fixture_date, listing_set};

fn busy_criteria() -> FilterCriteria {
    let mut criteria = FilterCriteria {
        search: "pro".to_owned(),
        window: DateRange::between(fixture_date(5), fixture_date(25)),
        ..FilterCriteria::default()
    };
    criteria.fields.insert(
        "asking_price",
        Constraint::Range {
            min: Some(500.0),
            max: Some(4_000.0),
        },
    );
    criteria
        .fields
        .insert("location", Constraint::Equals("Lagos".to_owned()));
    criteria
}

fn value(set: &RecordSet, row: usize, key: &str) -> FieldValue {
    set.get(row, key).cloned().unwrap_or(FieldValue::Integer(-1))
}

#[test]
fn filtered_rows_are_an_ordered_subset_satisfying_every_constraint() {
    let set = listing_set(11, 400);
    let criteria = busy_criteria();
    let rows = apply_filters(&set, &criteria);

    assert!(!rows.is_empty());
    assert!(rows.windows(2).all(|pair| pair[0] < pair[1]));
    for row in &rows {
        let title = value(&set, *row, "ad_title").display().to_lowercase();
        let seller = value(&set, *row, "seller_name").display().to_lowercase();
        assert!(title.contains("pro") || seller.contains("pro"));

        let price = value(&set, *row, "asking_price").as_number().unwrap_or(-1.0);
        assert!((500.0..=4_000.0).contains(&price), "row {row} price {price}");

        assert_eq!(value(&set, *row, "location").as_text(), Some("Lagos"));

        let date = value(&set, *row, "creation_date").as_date();
        assert!(date.is_some_and(|date| criteria.window.contains(date)));
    }
}

#[test]
fn empty_criteria_is_identity() {
    let set = asset_set(3, 37);
    assert_eq!(
        apply_filters(&set, &FilterCriteria::default()),
        (0..37).collect::<Vec<_>>()
    );
}

#[test]
fn sort_is_stable_and_toggle_round_trips() {
    let set = listing_set(21, 120);
    let all = (0..set.len()).collect::<Vec<_>>();

    let asc = apply_sort(&set, all.clone(), Some(&SortSpec::asc("location")));
    for pair in asc.windows(2) {
        let left = value(&set, pair[0], "location");
        let right = value(&set, pair[1], "location");
        assert!(left.cmp_value(&right).is_le());
        if left == right {
            assert!(pair[0] < pair[1], "equal keys keep load order");
        }
    }

    let mut view = TableView::new("marketplace", set, 10).expect("valid page size");
    view.dispatch(ViewCommand::SortBy("location"));
    let first = view.filtered_rows().to_vec();
    view.dispatch(ViewCommand::SortBy("location"));
    assert_eq!(
        view.state().sort.map(|sort| sort.direction),
        Some(SortDirection::Desc)
    );
    view.dispatch(ViewCommand::SortBy("location"));
    assert_eq!(view.filtered_rows(), first.as_slice());
    assert_eq!(first, asc);
}

#[test]
fn pages_concatenate_to_the_whole_sequence() {
    let rows = (0..53).collect::<Vec<usize>>();
    for page_size in [1, 5, 10, 20, 53, 100] {
        let first = paginate(&rows, PageState::first(page_size));
        let mut joined = Vec::new();
        for page in 1..=first.total_pages {
            let slice = paginate(&rows, PageState { page, page_size });
            assert!(slice.items.len() <= page_size);
            joined.extend(slice.items);
        }
        assert_eq!(joined, rows, "page size {page_size}");
    }
}

#[test]
fn reset_restores_unfiltered_unsorted_first_page() -> Result<()> {
    let set = listing_set(4, 60);
    let mut view = TableView::new("marketplace", set, 5)?;
    view.dispatch(ViewCommand::SetSearch("used".to_owned()));
    view.dispatch(ViewCommand::SortBy("asking_price"));
    view.dispatch(ViewCommand::SetWindow(DateRange::between(
        fixture_date(1),
        fixture_date(15),
    )));
    view.dispatch(ViewCommand::NextPage);

    let events = view.dispatch(ViewCommand::Reset);
    assert_eq!(events, vec![ViewEvent::Reset]);
    assert_eq!(view.filtered_rows(), (0..60).collect::<Vec<_>>().as_slice());
    assert_eq!(view.state().page, PageState::first(5));
    assert_eq!(view.state().sort, None);
    Ok(())
}

#[test]
fn window_needs_both_endpoints() -> Result<()> {
    let set = asset_set(8, 40);
    let mut view = TableView::new("dashboard", set, 5)?;

    let events = view.dispatch(ViewCommand::SetWindowText {
        from: "2025-10-10".to_owned(),
        to: String::new(),
    });
    assert_eq!(events, vec![ViewEvent::FiltersChanged { matched: 40 }]);

    let events = view.dispatch(ViewCommand::SetWindowText {
        from: "10/10/2025".to_owned(),
        to: "2025-10-20".to_owned(),
    });
    let [ViewEvent::FiltersChanged { matched }] = events.as_slice() else {
        panic!("unexpected events {events:?}");
    };
    assert!(*matched < 40);
    for record in view.page_records() {
        let date = record.value(5).and_then(FieldValue::as_date);
        assert!(date.is_some_and(|date| date >= fixture_date(10) && date <= fixture_date(20)));
    }
    Ok(())
}

#[test]
fn rejected_bound_keeps_the_valid_one() -> Result<()> {
    let rows = MarketFaker::new(2).listings(80);
    let mut view = TableView::new("marketplace", RecordSet::from_rows(&rows), 10)?;

    let events = view.dispatch(ViewCommand::SetRangeText {
        field: "asking_price",
        min: "₦2,000".to_owned(),
        max: "lots".to_owned(),
    });
    assert!(matches!(
        events.as_slice(),
        [ViewEvent::InputRejected(_), ViewEvent::FiltersChanged { .. }]
    ));

    let expected = rows
        .iter()
        .filter(|listing| listing.asking_price >= 2_000)
        .count();
    assert_eq!(view.filtered_count(), expected);
    Ok(())
}

#[test]
fn enum_options_follow_load_order() -> Result<()> {
    let rows = MarketFaker::new(6).listings(30);
    let view = TableView::new("marketplace", RecordSet::from_rows(&rows), 10)?;

    let mut expected: Vec<String> = Vec::new();
    for listing in &rows {
        if !expected.contains(&listing.location) {
            expected.push(listing.location.clone());
        }
    }
    assert_eq!(view.enum_options("location"), expected);
    Ok(())
}
