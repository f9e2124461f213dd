use std::sync::Arc;

use chrono::Local;
use rand::Rng;

use crate::models::{Transaction, TransactionInput};

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// In-memory transaction collection, newest first.
///
/// Every mutation builds a fresh collection and swaps it in, so a snapshot
/// returned by [`TransactionStore::list`] is never modified afterwards and
/// `Arc::ptr_eq` against the current snapshot tells whether anything changed.
#[derive(Debug, Clone)]
pub struct TransactionStore {
    items: Arc<[Transaction]>,
}

impl Default for TransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionStore {
    pub fn new() -> Self {
        Self {
            items: Arc::from(Vec::new()),
        }
    }

    /// Insert a new record at the front. A missing date means today.
    pub fn add(&mut self, input: TransactionInput) -> Transaction {
        let txn = Transaction {
            id: self.fresh_id(),
            date: input.date.unwrap_or_else(|| Local::now().date_naive()),
            title: input.title,
            amount: input.amount,
            category: input.category,
            txn_type: input.txn_type,
        };

        let mut next = Vec::with_capacity(self.items.len() + 1);
        next.push(txn.clone());
        next.extend(self.items.iter().cloned());
        self.items = next.into();

        tracing::info!(
            id = %txn.id,
            category = %txn.category,
            txn_type = %txn.txn_type,
            "transaction added"
        );
        txn
    }

    /// Replace every editable field of the record with `id`. A missing date
    /// keeps the stored one. Returns false, changing nothing, when no record
    /// has that id.
    pub fn update(&mut self, id: &str, input: TransactionInput) -> bool {
        if !self.items.iter().any(|t| t.id == id) {
            tracing::debug!(id, "update ignored: no such transaction");
            return false;
        }

        let next: Vec<Transaction> = self
            .items
            .iter()
            .map(|t| {
                if t.id == id {
                    Transaction {
                        id: t.id.clone(),
                        date: input.date.unwrap_or(t.date),
                        title: input.title.clone(),
                        amount: input.amount,
                        category: input.category,
                        txn_type: input.txn_type,
                    }
                } else {
                    t.clone()
                }
            })
            .collect();
        self.items = next.into();

        tracing::info!(id, "transaction updated");
        true
    }

    /// Drop the record with `id`. Returns false when there was none.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        let next: Vec<Transaction> = self.items.iter().filter(|t| t.id != id).cloned().collect();
        if next.len() == before {
            tracing::debug!(id, "remove ignored: no such transaction");
            return false;
        }
        self.items = next.into();
        tracing::info!(id, "transaction removed");
        true
    }

    /// Current records, newest first.
    pub fn list(&self) -> Arc<[Transaction]> {
        Arc::clone(&self.items)
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn fresh_id(&self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let id: String = (0..ID_LEN)
                .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
                .collect();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, TxnType};
    use chrono::NaiveDate;

    fn input(title: &str, amount: f64) -> TransactionInput {
        TransactionInput {
            title: title.to_string(),
            amount,
            category: Category::Other,
            txn_type: TxnType::Expense,
            date: NaiveDate::from_ymd_opt(2025, 3, 1),
        }
    }

    #[test]
    fn add_prepends_newest_first() {
        let mut store = TransactionStore::new();
        store.add(input("first", 1.0));
        store.add(input("second", 2.0));
        store.add(input("third", 3.0));
        let titles: Vec<String> = store.list().iter().map(|t| t.title.clone()).collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[test]
    fn add_assigns_unique_base36_ids() {
        let mut store = TransactionStore::new();
        for i in 0..200 {
            store.add(input("t", i as f64));
        }
        let snapshot = store.list();
        let mut ids: Vec<&str> = snapshot.iter().map(|t| t.id.as_str()).collect();
        assert!(ids
            .iter()
            .all(|id| id.len() == 9 && id.bytes().all(|b| ID_ALPHABET.contains(&b))));
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn add_without_date_uses_today() {
        let mut store = TransactionStore::new();
        let mut inp = input("now", 1.0);
        inp.date = None;
        let txn = store.add(inp);
        assert_eq!(txn.date, Local::now().date_naive());
    }

    #[test]
    fn update_replaces_fields_and_keeps_id_and_position() {
        let mut store = TransactionStore::new();
        let a = store.add(input("a", 1.0));
        store.add(input("b", 2.0));

        let changed = store.update(
            &a.id,
            TransactionInput {
                title: "a2".into(),
                amount: 9.5,
                category: Category::Housing,
                txn_type: TxnType::Income,
                date: NaiveDate::from_ymd_opt(2025, 4, 2),
            },
        );
        assert!(changed);

        let list = store.list();
        assert_eq!(list[1].id, a.id);
        assert_eq!(list[1].title, "a2");
        assert_eq!(list[1].amount, 9.5);
        assert_eq!(list[1].category, Category::Housing);
        assert_eq!(list[1].txn_type, TxnType::Income);
        assert_eq!(list[1].date, NaiveDate::from_ymd_opt(2025, 4, 2).unwrap());
        assert_eq!(list[0].title, "b");
    }

    #[test]
    fn update_without_date_keeps_stored_date() {
        let mut store = TransactionStore::new();
        let a = store.add(input("a", 1.0));
        let mut inp = input("a", 2.0);
        inp.date = None;
        store.update(&a.id, inp);
        assert_eq!(store.get(&a.id).unwrap().date, a.date);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut store = TransactionStore::new();
        store.add(input("a", 1.0));
        let before = store.list();
        assert!(!store.update("missing", input("x", 5.0)));
        assert!(!store.remove("missing"));
        assert!(Arc::ptr_eq(&before, &store.list()));
    }

    #[test]
    fn remove_then_update_stays_absent() {
        let mut store = TransactionStore::new();
        let a = store.add(input("a", 1.0));
        assert!(store.remove(&a.id));
        assert!(!store.update(&a.id, input("back", 1.0)));
        assert!(store.get(&a.id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn snapshots_are_not_mutated() {
        let mut store = TransactionStore::new();
        let a = store.add(input("a", 1.0));
        let snapshot = store.list();
        store.add(input("b", 2.0));
        store.update(&a.id, input("changed", 3.0));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].title, "a");
        assert!(!Arc::ptr_eq(&snapshot, &store.list()));
    }

    #[test]
    fn length_tracks_adds_minus_removes() {
        let mut store = TransactionStore::new();
        let ids: Vec<String> = (0..5).map(|i| store.add(input("t", i as f64)).id).collect();
        store.remove(&ids[1]);
        store.remove(&ids[3]);
        assert_eq!(store.len(), 3);
        let remaining: Vec<String> = store.list().iter().map(|t| t.id.clone()).collect();
        assert_eq!(remaining, vec![ids[4].clone(), ids[2].clone(), ids[0].clone()]);
    }
}
