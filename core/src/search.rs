use crate::directive::Directive;
use crate::index::FullTextIndex;

/// Index account names against themselves.
///
/// Each name is indexed whole and split into its `:` components, so `Assets`
/// finds `Assets:Bank` here while `Assets:Bank` remains one token everywhere else.
pub fn search_accounts<S: AsRef<str>>(accounts: &[S]) -> FullTextIndex<&str> {
    FullTextIndex::build(accounts.iter().map(|account| {
        let name = account.as_ref();
        (format!("{} {}", name, name.replace(':', " ")), name)
    }))
}

/// Index directives by their per-kind searchable text; hits borrow the caller's directives.
pub fn search_directives(directives: &[Directive]) -> FullTextIndex<&Directive> {
    FullTextIndex::build(directives.iter().map(|d| (d.searchable_text(), d)))
}
