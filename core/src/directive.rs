//! Ledger directives and the text each one contributes to the full-text index.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use time::Date;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    pub number: Option<serde_json::Number>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub account: String,
    #[serde(default)]
    pub units: Option<Amount>,
    #[serde(default)]
    pub flag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Open {
    pub date: Date,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    pub account: String,
    #[serde(default)]
    pub currencies: Vec<String>,
    #[serde(default)]
    pub booking: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Close {
    pub date: Date,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    pub account: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commodity {
    pub date: Date,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    pub date: Date,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    pub account: String,
    pub source_account: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub date: Date,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    pub account: String,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: Date,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    pub flag: String,
    #[serde(default)]
    pub payee: Option<String>,
    #[serde(default)]
    pub narration: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub links: BTreeSet<String>,
    #[serde(default)]
    pub postings: Vec<Posting>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub date: Date,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    pub account: String,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub date: Date,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    #[serde(rename = "type")]
    pub event_type: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub date: Date,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    pub name: String,
    pub query_string: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub date: Date,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    pub currency: String,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub date: Date,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    pub account: String,
    pub filename: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub links: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Custom {
    pub date: Date,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    #[serde(rename = "type")]
    pub custom_type: String,
    #[serde(default)]
    pub values: Vec<serde_json::Value>,
}

/// A single ledger entry. The set of kinds is closed; every kind has an explicit
/// rule for which of its fields become searchable text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Directive {
    Open(Open),
    Close(Close),
    Commodity(Commodity),
    Pad(Pad),
    Balance(Balance),
    Transaction(Transaction),
    Note(Note),
    Event(Event),
    Query(Query),
    Price(Price),
    Document(Document),
    Custom(Custom),
}

impl Directive {
    pub fn date(&self) -> Date {
        match self {
            Directive::Open(d) => d.date,
            Directive::Close(d) => d.date,
            Directive::Commodity(d) => d.date,
            Directive::Pad(d) => d.date,
            Directive::Balance(d) => d.date,
            Directive::Transaction(d) => d.date,
            Directive::Note(d) => d.date,
            Directive::Event(d) => d.date,
            Directive::Query(d) => d.date,
            Directive::Price(d) => d.date,
            Directive::Document(d) => d.date,
            Directive::Custom(d) => d.date,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Directive::Open(_) => "open",
            Directive::Close(_) => "close",
            Directive::Commodity(_) => "commodity",
            Directive::Pad(_) => "pad",
            Directive::Balance(_) => "balance",
            Directive::Transaction(_) => "transaction",
            Directive::Note(_) => "note",
            Directive::Event(_) => "event",
            Directive::Query(_) => "query",
            Directive::Price(_) => "price",
            Directive::Document(_) => "document",
            Directive::Custom(_) => "custom",
        }
    }

    /// Accounts named by this directive, in field order.
    pub fn accounts(&self) -> Vec<&str> {
        match self {
            Directive::Open(d) => vec![d.account.as_str()],
            Directive::Close(d) => vec![d.account.as_str()],
            Directive::Pad(d) => vec![d.account.as_str(), d.source_account.as_str()],
            Directive::Balance(d) => vec![d.account.as_str()],
            Directive::Transaction(d) => d.postings.iter().map(|p| p.account.as_str()).collect(),
            Directive::Note(d) => vec![d.account.as_str()],
            Directive::Document(d) => vec![d.account.as_str()],
            Directive::Commodity(_)
            | Directive::Event(_)
            | Directive::Query(_)
            | Directive::Price(_)
            | Directive::Custom(_) => Vec::new(),
        }
    }

    /// The text fed to the tokenizer when this directive is indexed.
    pub fn searchable_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        match self {
            Directive::Open(d) => {
                parts.push(&d.account);
                parts.extend(d.currencies.iter().map(String::as_str));
            }
            Directive::Close(d) => parts.push(&d.account),
            Directive::Commodity(d) => parts.push(&d.currency),
            Directive::Pad(d) => {
                parts.push(&d.account);
                parts.push(&d.source_account);
            }
            Directive::Balance(d) => {
                parts.push(&d.account);
                parts.extend(d.amount.currency.as_deref());
            }
            Directive::Transaction(d) => {
                parts.extend(d.payee.as_deref());
                parts.push(&d.narration);
                parts.extend(d.tags.iter().map(String::as_str));
                parts.extend(d.links.iter().map(String::as_str));
                parts.extend(d.postings.iter().map(|p| p.account.as_str()));
            }
            Directive::Note(d) => {
                parts.push(&d.account);
                parts.push(&d.comment);
            }
            Directive::Event(d) => {
                parts.push(&d.event_type);
                parts.push(&d.description);
            }
            Directive::Query(d) => {
                parts.push(&d.name);
                parts.push(&d.query_string);
            }
            Directive::Price(d) => {
                parts.push(&d.currency);
                parts.extend(d.amount.currency.as_deref());
            }
            Directive::Document(d) => {
                parts.push(&d.account);
                parts.push(&d.filename);
                // so a bare file name matches a stored path
                if let Some(base) = Path::new(&d.filename).file_name().and_then(|s| s.to_str()) {
                    if base != d.filename {
                        parts.push(base);
                    }
                }
                parts.extend(d.tags.iter().map(String::as_str));
                parts.extend(d.links.iter().map(String::as_str));
            }
            Directive::Custom(d) => {
                parts.push(&d.custom_type);
                parts.extend(d.values.iter().filter_map(|v| v.as_str()));
            }
        }
        parts.join(" ")
    }
}
