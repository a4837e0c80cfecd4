//! In-memory watch lists shared by the command handlers and the alert monitor.
//!
//! Layout is `user -> [(symbol, [target])]`, kept in insertion order for display.
//! Every operation takes the one store-wide lock for its whole duration, so a
//! concurrent `add` and `remove_target` on the same key never interleave.
//! An entry whose target list becomes empty is deleted in the same critical section.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::{Symbol, SymbolWatch, Target, TargetId, UserId, WatchEntry};

type UserWatches = Vec<(Symbol, Vec<Target>)>;

#[derive(Default)]
pub struct AlertStore {
    inner: Mutex<HashMap<UserId, UserWatches>>,
    next_id: AtomicU64,
}

impl AlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<UserId, UserWatches>> {
        // Every critical section leaves the map consistent, so a panic elsewhere is safe to ignore.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `price` to the (user, symbol) entry, creating it if needed.
    pub fn add(&self, user: UserId, symbol: &Symbol, price: f64) -> TargetId {
        let id = TargetId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let target = Target { id, price };

        let mut map = self.lock();
        let watches = map.entry(user).or_default();
        match watches.iter_mut().find(|(s, _)| s == symbol) {
            Some((_, targets)) => targets.push(target),
            None => watches.push((symbol.clone(), vec![target])),
        }
        id
    }

    /// Drops the whole (user, symbol) entry. Returns how many targets were pending.
    pub fn remove_all(&self, user: UserId, symbol: &Symbol) -> usize {
        let mut map = self.lock();
        let Some(watches) = map.get_mut(&user) else {
            return 0;
        };

        let removed = match watches.iter().position(|(s, _)| s == symbol) {
            Some(idx) => watches.remove(idx).1.len(),
            None => 0,
        };

        if watches.is_empty() {
            map.remove(&user);
        }
        removed
    }

    /// Removes one target. Returns false if it was already gone.
    pub fn remove_target(&self, user: UserId, symbol: &Symbol, target: TargetId) -> bool {
        let mut map = self.lock();
        let Some(watches) = map.get_mut(&user) else {
            return false;
        };
        let Some(idx) = watches.iter().position(|(s, _)| s == symbol) else {
            return false;
        };

        let targets = &mut watches[idx].1;
        let before = targets.len();
        targets.retain(|t| t.id != target);
        let removed = targets.len() != before;

        if targets.is_empty() {
            watches.remove(idx);
        }
        if watches.is_empty() {
            map.remove(&user);
        }
        removed
    }

    /// Point-in-time copy of one user's watches.
    pub fn list_for(&self, user: UserId) -> Vec<WatchEntry> {
        let map = self.lock();
        map.get(&user)
            .map(|watches| {
                watches
                    .iter()
                    .map(|(symbol, targets)| WatchEntry {
                        owner: user,
                        symbol: symbol.clone(),
                        targets: targets.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn total_for(&self, user: UserId) -> usize {
        let map = self.lock();
        map.get(&user)
            .map(|w| w.iter().map(|(_, t)| t.len()).sum())
            .unwrap_or(0)
    }

    /// Groups every pending target by symbol, one item per distinct symbol.
    ///
    /// The grouping is captured under the lock and handed out afterwards, so
    /// callers can await on each item without blocking writers.
    pub fn for_each_symbol(&self) -> std::vec::IntoIter<SymbolWatch> {
        let mut grouped: Vec<SymbolWatch> = Vec::new();
        let mut index: HashMap<Symbol, usize> = HashMap::new();

        {
            let map = self.lock();
            for (user, watches) in map.iter() {
                for (symbol, targets) in watches {
                    let slot = *index.entry(symbol.clone()).or_insert_with(|| {
                        grouped.push(SymbolWatch {
                            symbol: symbol.clone(),
                            watchers: Vec::new(),
                        });
                        grouped.len() - 1
                    });
                    grouped[slot]
                        .watchers
                        .extend(targets.iter().map(|t| (*user, *t)));
                }
            }
        }

        grouped.into_iter()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn symbol_count(&self) -> usize {
        let map = self.lock();
        let mut seen: Vec<&Symbol> = map.values().flatten().map(|(s, _)| s).collect();
        seen.sort();
        seen.dedup();
        seen.len()
    }
}
