//! Desk-level tests: form submission, page views, overview, login.

use channel_desk_core::{
    config::DeskConfig,
    desk::{Desk, PageView},
    form::FormFields,
    overview::{ChartKind, DeskTotals},
    page::Page,
    record::Collection,
    session::{GateState, SessionRegistry},
};
use tempfile::TempDir;

fn build() -> (TempDir, Desk) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let desk = Desk::build(DeskConfig::for_data_dir(dir.path().join("data"))).expect("build desk");
    (dir, desk)
}

fn fields(pairs: &[(&str, &str)]) -> FormFields {
    pairs.iter().copied().collect()
}

fn submit(desk: &Desk, page: Page, pairs: &[(&str, &str)]) {
    desk.submit(page, &fields(pairs))
        .unwrap_or_else(|e| panic!("submit to {} failed: {e}", page.slug()));
}

/// Valid submissions grow the page's collection by exactly one row.
#[test]
fn valid_submission_appends_one_row() {
    let (_dir, desk) = build();
    submit(&desk, Page::Products, &[
        ("name", "Starter plan"),
        ("channel", "Acme"),
        ("start_date", "2024-01-01"),
        ("end_date", "2024-12-31"),
    ]);
    let submission = desk
        .submit(Page::Products, &fields(&[
            ("name", "Pro plan"),
            ("channel", "Globex"),
            ("start_date", "2024-02-01"),
            ("end_date", "2025-01-31"),
        ]))
        .unwrap();

    assert_eq!(submission.table.len(), 2);
    assert_eq!(
        submission.table.rows[1],
        vec!["Pro plan", "Globex", "2024-02-01", "2025-01-31"]
    );

    let PageView::Collection { collection, table } = desk.view(Page::Products).unwrap() else {
        panic!("products page should list a collection");
    };
    assert_eq!(collection, Collection::Products);
    assert_eq!(table, submission.table);
}

/// A rejected form leaves the collection exactly as it was.
#[test]
fn rejected_submission_touches_nothing() {
    let (_dir, desk) = build();
    submit(&desk, Page::Payments, &[("channel", "Acme"), ("amount", "50"), ("date", "2024-03-01")]);
    let path = desk.store.path_of(Collection::Payments);
    let before = std::fs::read_to_string(&path).unwrap();

    let err = desk
        .submit(Page::Payments, &fields(&[("channel", "Acme"), ("amount", "-1"), ("date", "2024-03-02")]))
        .unwrap_err();
    assert!(err.is_user_input());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

/// The overview page has no form.
#[test]
fn overview_rejects_submissions() {
    let (_dir, desk) = build();
    let err = desk.submit(Page::Overview, &FormFields::default()).unwrap_err();
    assert!(!err.is_user_input());
}

/// With no data at all the overview renders empty charts and zero totals.
#[test]
fn overview_of_empty_desk() {
    let (_dir, desk) = build();
    let PageView::Overview(overview) = desk.view(Page::Overview).unwrap() else {
        panic!("expected the overview");
    };
    assert!(overview.revenue_trend.is_empty());
    assert!(overview.collections.is_empty());
    assert_eq!(overview.totals, DeskTotals::default());
}

/// Charts and totals reflect every collection.
#[test]
fn overview_aggregates_collections() {
    let (_dir, desk) = build();
    submit(&desk, Page::Channels, &[("name", "Acme"), ("contact", "Jane"), ("phone", "555-0100")]);
    submit(&desk, Page::Channels, &[("name", "Globex"), ("contact", "Hank"), ("phone", "555-0199")]);
    submit(&desk, Page::Flows, &[("channel", "Acme"), ("date", "2024-01-01"), ("revenue_amount", "100")]);
    submit(&desk, Page::Flows, &[("channel", "Acme"), ("date", "2024-01-02"), ("revenue_amount", "300")]);
    submit(&desk, Page::Payments, &[("channel", "Acme"), ("amount", "40"), ("date", "2024-02-01")]);
    submit(&desk, Page::Payments, &[("channel", "Globex"), ("amount", "25"), ("date", "2024-02-02")]);
    submit(&desk, Page::Payments, &[("channel", "Acme"), ("amount", "10"), ("date", "2024-02-03")]);
    submit(&desk, Page::Settlements, &[("channel", "Acme"), ("period", "2024-01"), ("amount", "70"), ("status", "pending")]);
    submit(&desk, Page::Settlements, &[("channel", "Globex"), ("period", "2024-01"), ("amount", "30"), ("status", "settled")]);

    let PageView::Overview(overview) = desk.view(Page::Overview).unwrap() else {
        panic!("expected the overview");
    };

    assert_eq!(overview.revenue_trend.kind, ChartKind::Line);
    assert_eq!(
        overview.revenue_trend.points,
        vec![("2024-01-01".to_string(), 100.0), ("2024-01-02".to_string(), 300.0)]
    );
    assert_eq!(overview.collections.kind, ChartKind::Bar);
    assert_eq!(
        overview.collections.points,
        vec![("Acme".to_string(), 50.0), ("Globex".to_string(), 25.0)]
    );

    let totals = &overview.totals;
    assert_eq!(totals.channels, 2);
    assert_eq!(totals.products, 0);
    assert_eq!(totals.revenue, 400.0);
    assert_eq!(totals.share, 100.0 * 0.3 + 300.0 * 0.3);
    assert_eq!(totals.collected, 75.0);
    assert_eq!(totals.settlement_pending, 70.0);
    assert_eq!(totals.settlement_settled, 30.0);
}

/// A malformed source file fails the overview render.
#[test]
fn overview_fails_on_non_numeric_amount() {
    let (_dir, desk) = build();
    std::fs::write(
        desk.store.path_of(Collection::Payments),
        "channel,amount,date\nAcme,lots,2024-01-01\n",
    )
    .unwrap();
    assert!(desk.view(Page::Overview).is_err());
}

/// Login goes through the per-session context, one session at a time.
#[test]
fn login_unlocks_only_the_submitting_session() {
    let (_dir, desk) = build();
    let registry = SessionRegistry::new();
    let alice = registry.resume(None);
    let bob = registry.resume(None);

    let (alice, unlocked) = registry.update(&alice, |s| desk.login(s, "letmein"));
    assert!(!unlocked);
    assert_eq!(alice.gate, GateState::Retry);
    let (alice, unlocked) = registry.update(&alice, |s| desk.login(s, "admin123"));
    assert!(unlocked);

    assert!(registry.get(alice.id).unwrap().is_unlocked());
    assert_eq!(registry.get(bob.id), None);
    let (bob, unlocked) = registry.update(&bob, |s| desk.login(s, ""));
    assert!(!unlocked);
    assert_eq!(bob.gate, GateState::Retry);
}
