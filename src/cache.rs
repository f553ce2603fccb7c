use std::collections::BTreeMap;

use crate::error::FetchError;
use crate::models::{Character, CharacterPage};

#[derive(Debug, Clone)]
pub(crate) enum PageSlot {
    Pending,
    Cached(CharacterPage),
    Failed(FetchError),
}

// Pages are keyed by 1-based index, admitted strictly in order, and never
// evicted. At most one fetch may be outstanding per index.
#[derive(Default)]
pub(crate) struct PageCache {
    slots: BTreeMap<u32, PageSlot>,
    last_page: Option<u32>,
}

impl PageCache {
    /// Returns true after moving the slot to Pending; the caller must settle
    /// it with `complete` or `fail`. Cached and Pending slots absorb the
    /// request, as do gaps and pages beyond the end of the collection.
    pub(crate) fn begin(&mut self, page: u32) -> bool {
        if page == 0 {
            return false;
        }
        if let Some(last) = self.last_page {
            if page > last {
                return false;
            }
        }
        match self.slots.get(&page) {
            Some(PageSlot::Pending) | Some(PageSlot::Cached(_)) => false,
            Some(PageSlot::Failed(_)) | None => {
                if page > 1 && !self.is_cached(page - 1) {
                    return false;
                }
                self.slots.insert(page, PageSlot::Pending);
                true
            }
        }
    }

    pub(crate) fn complete(&mut self, page: u32, result: CharacterPage) {
        if result.next_page.is_none() {
            self.last_page = Some(page);
        }
        self.slots.insert(page, PageSlot::Cached(result));
    }

    pub(crate) fn fail(&mut self, page: u32, error: FetchError) {
        self.slots.insert(page, PageSlot::Failed(error));
    }

    /// Successor of the highest cached page, or 1 on an empty cache. `None`
    /// once the collection end has been seen.
    pub(crate) fn next_target(&self) -> Option<u32> {
        let next = self.highest_cached().map(|page| page + 1).unwrap_or(1);
        match self.last_page {
            Some(last) if next > last => None,
            _ => Some(next),
        }
    }

    pub(crate) fn flattened(&self) -> Vec<Character> {
        self.slots
            .values()
            .filter_map(|slot| match slot {
                PageSlot::Cached(page) => Some(page.characters.iter().cloned()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots
            .values()
            .map(|slot| match slot {
                PageSlot::Cached(page) => page.characters.len(),
                _ => 0,
            })
            .sum()
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.slots
            .values()
            .any(|slot| matches!(slot, PageSlot::Pending))
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.last_page.is_some()
    }

    // Lowest failed page wins the aggregate error flag.
    pub(crate) fn failure(&self) -> Option<(u32, &FetchError)> {
        self.slots.iter().find_map(|(page, slot)| match slot {
            PageSlot::Failed(error) => Some((*page, error)),
            _ => None,
        })
    }

    fn highest_cached(&self) -> Option<u32> {
        self.slots
            .iter()
            .rev()
            .find_map(|(page, slot)| matches!(slot, PageSlot::Cached(_)).then_some(*page))
    }

    fn is_cached(&self, page: u32) -> bool {
        matches!(self.slots.get(&page), Some(PageSlot::Cached(_)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::LocationRef;

    fn character(id: u64) -> Character {
        Character {
            id,
            name: format!("Unit {:02}", id),
            status: "Alive".to_string(),
            species: "Human".to_string(),
            gender: "Male".to_string(),
            origin: LocationRef {
                name: "Earth".to_string(),
            },
            location: LocationRef {
                name: "Earth".to_string(),
            },
            image: format!("https://example.test/avatar/{}.jpeg", id),
            episode: Vec::new(),
            created: Utc.with_ymd_and_hms(2017, 11, 4, 18, 48, 46).unwrap(),
        }
    }

    fn page(index: u32, next_page: Option<u32>) -> CharacterPage {
        let first_id = u64::from(index - 1) * 5 + 1;
        CharacterPage {
            characters: (first_id..first_id + 5).map(character).collect(),
            next_page,
        }
    }

    fn network_error(page: u32) -> FetchError {
        FetchError::Network {
            url: format!("https://example.test/api/character?page={}", page),
            detail: "HTTP 500 Internal Server Error".to_string(),
        }
    }

    #[test]
    fn pending_page_absorbs_repeat_requests() {
        let mut cache = PageCache::default();
        assert!(cache.begin(1));
        assert!(!cache.begin(1));
        assert!(cache.is_loading());

        cache.complete(1, page(1, Some(2)));
        assert!(!cache.begin(1));
        assert!(!cache.is_loading());
    }

    #[test]
    fn pages_are_admitted_only_in_order() {
        let mut cache = PageCache::default();
        assert!(!cache.begin(2));
        assert!(!cache.begin(0));

        assert!(cache.begin(1));
        cache.complete(1, page(1, Some(2)));

        assert!(!cache.begin(3));
        assert!(cache.begin(2));
    }

    #[test]
    fn next_target_walks_the_successor() {
        let mut cache = PageCache::default();
        assert_eq!(cache.next_target(), Some(1));

        assert!(cache.begin(1));
        assert_eq!(cache.next_target(), Some(1));

        cache.complete(1, page(1, Some(2)));
        assert_eq!(cache.next_target(), Some(2));
    }

    #[test]
    fn exhaustion_stops_all_admission() {
        let mut cache = PageCache::default();
        assert!(cache.begin(1));
        cache.complete(1, page(1, Some(2)));
        assert!(cache.begin(2));
        cache.complete(2, page(2, None));

        assert!(cache.is_exhausted());
        assert_eq!(cache.next_target(), None);
        assert!(!cache.begin(3));
        assert_eq!(cache.len(), 10);
    }

    #[test]
    fn failed_page_pins_the_cursor_until_retried() {
        let mut cache = PageCache::default();
        assert!(cache.begin(1));
        cache.complete(1, page(1, Some(2)));
        assert!(cache.begin(2));
        cache.complete(2, page(2, Some(3)));

        assert!(cache.begin(3));
        cache.fail(3, network_error(3));
        assert_eq!(cache.next_target(), Some(3));
        let (failed_page, _) = cache.failure().expect("recorded failure");
        assert_eq!(failed_page, 3);
        assert_eq!(cache.len(), 10);

        assert!(cache.begin(3));
        cache.complete(3, page(3, Some(4)));
        assert!(cache.failure().is_none());
        assert_eq!(cache.next_target(), Some(4));
    }

    #[test]
    fn flattened_grows_monotonically_in_page_order() {
        let mut cache = PageCache::default();
        assert!(cache.begin(1));
        cache.complete(1, page(1, Some(2)));
        let first = cache.flattened();
        assert_eq!(
            first.iter().map(|entity| entity.id).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );

        assert!(cache.begin(2));
        cache.complete(2, page(2, Some(3)));
        let second = cache.flattened();
        assert!(second.len() >= first.len());
        assert_eq!(&second[..first.len()], &first[..]);
        assert_eq!(
            second.iter().map(|entity| entity.id).collect::<Vec<_>>(),
            (1..=10).collect::<Vec<_>>()
        );
    }
}
