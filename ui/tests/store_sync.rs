//! End-to-end store behavior with the real watchlist payload: several
//! independently bound consumers over one store, cross-tab events, and
//! failure paths.

use api::entry::WatchlistEntry;
use api::media::MediaKind;
use api::media::WatchStatus;
use api::watchlist::Watchlist;
use chrono::TimeZone;
use chrono::Utc;
use std::cell::RefCell;
use std::rc::Rc;
use ui::store::MemoryBackend;
use ui::store::SlotStore;

const SLOT: &str = "binge-list-items";

fn entry(id: &str, title: &str) -> WatchlistEntry {
    WatchlistEntry::new(
        id,
        title,
        MediaKind::Movie,
        WatchStatus::Planned,
        Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
    )
}

fn list_with(entries: &[WatchlistEntry]) -> Watchlist {
    let mut list = Watchlist::new();
    for e in entries {
        list.add(e.clone(), e.added_at).unwrap();
    }
    list
}

#[test]
fn two_views_of_the_same_slot_stay_in_lockstep() {
    let store = SlotStore::new(Box::new(MemoryBackend::new()));

    // First "component" mounts: empty list.
    assert!(store.read::<Watchlist>(SLOT, Watchlist::new()).is_empty());
    let first_seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = first_seen.clone();
    let _first = store.subscribe::<Watchlist, _>(SLOT, move |list| {
        sink.borrow_mut().push(list.len());
    });

    // A second, independently mounted view appears later.
    let second_seen: Rc<RefCell<Vec<Watchlist>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = second_seen.clone();
    let _second = store.subscribe::<Watchlist, _>(SLOT, move |list| {
        sink.borrow_mut().push(list);
    });

    // One write; both views observe the same one-element list, no reload.
    let list = list_with(&[entry("1", "X")]);
    store.write(SLOT, &list).unwrap();

    assert_eq!(*first_seen.borrow(), vec![0, 1]);
    let second = second_seen.borrow();
    assert_eq!(second.last().unwrap().len(), 1);
    assert_eq!(second.last().unwrap().entries()[0].title, "X");
}

#[test]
fn watchlist_round_trips_through_the_store_byte_for_byte() {
    let store = SlotStore::new(Box::new(MemoryBackend::new()));

    let mut fancy = entry("7", "Stalker");
    fancy.status = WatchStatus::Finished;
    fancy.finished_at = Some(Utc.with_ymd_and_hms(2026, 8, 3, 21, 30, 0).unwrap());
    fancy.rating = api::rating::Rating::new(10).ok();
    fancy.genres = vec!["Sci-Fi".into(), "Drama".into()];
    fancy.note = Some("slow cinema night".into());
    let list = list_with(&[fancy]);

    store.write(SLOT, &list).unwrap();
    assert_eq!(store.read::<Watchlist>(SLOT, Watchlist::new()), list);
}

#[test]
fn a_fresh_store_over_the_same_backend_sees_persisted_state() {
    // Same backend instance handed to a second store simulates a reload.
    let mut backend = MemoryBackend::new();
    {
        let raw = serde_json::to_string(&list_with(&[entry("1", "X")])).unwrap();
        use ui::store::StorageBackend;
        backend.store(SLOT, &raw).unwrap();
    }
    let store = SlotStore::new(Box::new(backend));
    let list = store.read::<Watchlist>(SLOT, Watchlist::new());
    assert_eq!(list.len(), 1);
}

#[test]
fn cross_tab_garbage_never_clobbers_local_state() {
    let store = SlotStore::new(Box::new(MemoryBackend::new()));
    let list = list_with(&[entry("1", "X")]);
    store.write(SLOT, &list).unwrap();

    store.apply_external(SLOT, Some("][ bogus"));

    assert_eq!(store.read::<Watchlist>(SLOT, Watchlist::new()), list);
}

#[test]
fn cross_tab_updates_win_whole_value() {
    let store = SlotStore::new(Box::new(MemoryBackend::new()));
    store.write(SLOT, &list_with(&[entry("1", "Mine")])).unwrap();

    let other_tab = serde_json::to_string(&list_with(&[entry("2", "Theirs")])).unwrap();
    store.apply_external(SLOT, Some(&other_tab));

    let list = store.read::<Watchlist>(SLOT, Watchlist::new());
    assert_eq!(list.len(), 1);
    assert_eq!(list.entries()[0].title, "Theirs");
}

#[test]
fn quota_failures_keep_the_readable_value() {
    let store = SlotStore::new(Box::new(MemoryBackend::with_quota(256)));
    let small = list_with(&[entry("1", "X")]);
    store.write(SLOT, &small).unwrap();

    let big: Vec<WatchlistEntry> = (0..50)
        .map(|i| entry(&i.to_string(), "A title long enough to overflow the quota"))
        .collect();
    assert!(store.write(SLOT, &list_with(&big)).is_err());

    assert_eq!(store.read::<Watchlist>(SLOT, Watchlist::new()), small);
}
