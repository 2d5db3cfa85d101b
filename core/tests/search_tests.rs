use fts_core::directive::*;
use fts_core::{search_accounts, search_directives, FullTextIndex};
use std::collections::BTreeSet;
use time::macros::date;

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn search_words() {
    let fts = FullTextIndex::build(vec![
        ("some words", "data1"),
        ("more words", "data2"),
        ("something else", "data3"),
    ]);
    assert_eq!(fts.search("words"), vec![&"data1", &"data2"]);
    assert_eq!(fts.search("some"), vec![&"data1"]);
    assert_eq!(fts.search("more words"), vec![&"data2"]);
    assert_eq!(fts.search("something else"), vec![&"data3"]);
    assert_eq!(fts.search("WORDS"), fts.search("words"));
    assert!(fts.search("...").is_empty());
}

#[test]
fn search_accounts_by_component() {
    let accounts = ["Assets:Test", "Assets:Bank:Test", "Expenses:Stuff", "Liabilities:Credit"];
    let fts = search_accounts(&accounts);
    assert_eq!(fts.search("Assets"), vec![&"Assets:Test", &"Assets:Bank:Test"]);
    assert_eq!(fts.search("Test"), vec![&"Assets:Test", &"Assets:Bank:Test"]);
    assert_eq!(fts.search("Stuff"), vec![&"Expenses:Stuff"]);
    assert_eq!(fts.search("Liabilities"), vec![&"Liabilities:Credit"]);
    assert_eq!(fts.search("assets:bank:test"), vec![&"Assets:Bank:Test"]);
    assert!(fts.search("Income").is_empty());
}

fn assert_hits(directives: &[Directive], query: &str, expected: usize) {
    let fts = search_directives(directives);
    let hits = fts.search(query);
    assert_eq!(hits.len(), expected, "query {query:?}");
    for hit in hits {
        assert!(directives.iter().any(|d| std::ptr::eq(d, *hit)), "hit must be the caller's directive");
    }
}

#[test]
fn search_close_and_commodity() {
    let close = [Directive::Close(Close { date: date!(2024 - 01 - 01), meta: None, account: "Assets:Test".into() })];
    assert_hits(&close, "Assets:Test", 1);
    assert_hits(&close, "Assets", 0);

    let commodity =
        [Directive::Commodity(Commodity { date: date!(2024 - 01 - 01), meta: None, currency: "USD".into() })];
    assert_hits(&commodity, "USD", 1);
    assert_hits(&commodity, "CAD", 0);
}

#[test]
fn search_document() {
    let d = [Directive::Document(Document {
        date: date!(2024 - 01 - 01),
        meta: None,
        account: "Assets:Test".into(),
        filename: "test/file.jpg".into(),
        tags: set(&["tag1"]),
        links: set(&["link1"]),
    })];
    assert_hits(&d, "Assets:Test", 1);
    assert_hits(&d, "file.jpg", 1);
    assert_hits(&d, "tag1", 1);
    assert_hits(&d, "link1", 1);
    assert_hits(&d, "link", 0);
}

#[test]
fn search_event_note_query() {
    let event = [Directive::Event(Event {
        date: date!(2024 - 01 - 01),
        meta: None,
        event_type: "test".into(),
        description: "some kind of event".into(),
    })];
    assert_hits(&event, "test", 1);
    assert_hits(&event, "some kind", 1);
    assert_hits(&event, "events", 0);

    let note = [Directive::Note(Note {
        date: date!(2024 - 01 - 01),
        meta: None,
        account: "Assets:Test".into(),
        comment: "A test comment".into(),
    })];
    assert_hits(&note, "Assets:Test", 1);
    assert_hits(&note, "a test", 1);
    assert_hits(&note, "comments", 0);

    let query = [Directive::Query(Query {
        date: date!(2024 - 01 - 01),
        meta: None,
        name: "Test query".into(),
        query_string: "SELECT *".into(),
    })];
    assert_hits(&query, "query", 1);
    assert_hits(&query, "SELECT", 1);
    assert_hits(&query, "queries", 0);
}

#[test]
fn search_open_pad_price() {
    let open = [Directive::Open(Open {
        date: date!(2024 - 01 - 01),
        meta: None,
        account: "Assets:Test".into(),
        currencies: vec!["USD".into(), "CAD".into()],
        booking: None,
    })];
    assert_hits(&open, "Assets:Test", 1);
    assert_hits(&open, "USD", 1);
    assert_hits(&open, "EUR", 0);

    let pad = [Directive::Pad(Pad {
        date: date!(2024 - 01 - 01),
        meta: None,
        account: "Assets:Test".into(),
        source_account: "Assets:Test1".into(),
    })];
    assert_hits(&pad, "Assets:Test", 1);
    assert_hits(&pad, "Assets:Test1", 1);
    assert_hits(&pad, "Assets", 0);

    let price = [Directive::Price(Price {
        date: date!(2024 - 01 - 01),
        meta: None,
        currency: "USD".into(),
        amount: Amount { number: None, currency: None },
    })];
    assert_hits(&price, "USD", 1);
    assert_hits(&price, "EUR", 0);
}

#[test]
fn search_balance_and_custom() {
    let balance = [Directive::Balance(Balance {
        date: date!(2024 - 01 - 01),
        meta: None,
        account: "Assets:Test".into(),
        amount: Amount { number: Some(serde_json::Number::from(10)), currency: Some("USD".into()) },
    })];
    assert_hits(&balance, "Assets:Test", 1);
    assert_hits(&balance, "USD", 1);
    assert_hits(&balance, "EUR", 0);
    assert_hits(&balance, "10", 0);

    let custom = [Directive::Custom(Custom {
        date: date!(2024 - 01 - 01),
        meta: None,
        custom_type: "budget".into(),
        values: vec![serde_json::json!("Expenses:Food"), serde_json::json!("monthly"), serde_json::json!(250)],
    })];
    assert_hits(&custom, "budget", 1);
    assert_hits(&custom, "Expenses:Food", 1);
    assert_hits(&custom, "budget monthly", 1);
    assert_hits(&custom, "250", 0);
}

#[test]
fn search_transaction() {
    let txn = [Directive::Transaction(Transaction {
        date: date!(2024 - 01 - 01),
        meta: None,
        flag: "*".into(),
        payee: Some("The Store".into()),
        narration: "Bought some things".into(),
        tags: set(&["tag1"]),
        links: set(&["link1"]),
        postings: vec![],
    })];
    assert_hits(&txn, "store", 1);
    assert_hits(&txn, "things", 1);
    assert_hits(&txn, "link1", 1);
    assert_hits(&txn, "tag1", 1);
    assert_hits(&txn, "Bought some more things", 0);
}

#[test]
fn results_follow_ledger_order() {
    let ledger = vec![
        Directive::Note(Note { date: date!(2024 - 02 - 01), meta: None, account: "Assets:Cash".into(), comment: "counted cash".into() }),
        Directive::Commodity(Commodity { date: date!(2024 - 01 - 01), meta: None, currency: "EUR".into() }),
        Directive::Note(Note { date: date!(2024 - 01 - 15), meta: None, account: "Assets:Bank".into(), comment: "cash deposit".into() }),
    ];
    let fts = search_directives(&ledger);
    let hits = fts.search("cash");
    assert_eq!(hits.len(), 2);
    assert!(std::ptr::eq(*hits[0], &ledger[0]));
    assert!(std::ptr::eq(*hits[1], &ledger[2]));
}
