use pagemark_core::{
    ContinuationToken, Page, PageSize, Pageable, Timestamp,
    order::compare_pageables,
    session::Paginator,
    source::MemorySource,
};
use proptest::prelude::*;
use std::{cmp::Ordering, collections::HashSet};

// Walks never need more than this many pages for the sizes generated here.
const PAGE_CAP: usize = 10_000;

///
/// Row
///

#[derive(Clone, Debug, Eq, PartialEq)]
struct Row {
    id: String,
    modified: Timestamp,
}

impl Pageable for Row {
    fn id(&self) -> &str {
        &self.id
    }

    fn timestamp(&self) -> Timestamp {
        self.modified
    }
}

///
/// Write
///
/// One storage write applied between two page requests.
///

#[derive(Clone, Debug)]
enum Write {
    Touch(usize),
    Insert,
    Remove(usize),
    Idle,
}

fn write() -> impl Strategy<Value = Write> {
    prop_oneof![
        any::<usize>().prop_map(Write::Touch),
        Just(Write::Insert),
        any::<usize>().prop_map(Write::Remove),
        Just(Write::Idle),
    ]
}

fn seed(timestamps: &[Timestamp]) -> MemorySource<Row> {
    timestamps
        .iter()
        .enumerate()
        .map(|(index, modified)| Row {
            id: format!("r{index:02}"),
            modified: *modified,
        })
        .collect()
}

// Writes stamp rows at or above the current maximum, so timestamps never decrease.
fn apply(source: &MemorySource<Row>, write: Write, bump: bool, inserted: &mut usize) {
    let clock = source.max_timestamp().unwrap_or(0) + u64::from(bump);
    let rows = source.snapshot();

    match write {
        Write::Touch(pick) if !rows.is_empty() => {
            let id = rows[pick % rows.len()].id.clone();
            source.upsert(Row { id, modified: clock });
        }
        Write::Insert => {
            source.insert(Row {
                id: format!("n{inserted:02}"),
                modified: clock,
            });
            *inserted += 1;
        }
        Write::Remove(pick) if !rows.is_empty() => {
            source.remove(&rows[pick % rows.len()].id);
        }
        _ => {}
    }
}

fn fetch(
    paginator: &Paginator<&MemorySource<Row>>,
    token: Option<&ContinuationToken>,
    page_size: PageSize,
) -> Page<Row> {
    paginator
        .fetch_page(token, page_size)
        .expect("memory source never fails")
}

fn is_canonical(rows: &[Row]) -> bool {
    rows.windows(2)
        .all(|pair| compare_pageables(&pair[0], &pair[1]) == Ordering::Less)
}

proptest! {
    #[test]
    fn static_walk_delivers_every_row_once_in_order(
        timestamps in prop::collection::vec(0u64..6, 0..40),
        page_size in 1u32..7,
    ) {
        let source = seed(&timestamps);
        let paginator = Paginator::new(&source);
        let page_size = PageSize::new(page_size).expect("non-zero page size");

        let mut delivered = Vec::new();
        let mut token = None;
        for _ in 0..PAGE_CAP {
            let page = fetch(&paginator, token.as_ref(), page_size);
            prop_assert!(is_canonical(page.entities()));
            prop_assert_eq!(page.has_next(), page.len() == page_size.get() as usize);

            let has_next = page.has_next();
            let (entities, next, _) = page.into_parts();
            delivered.extend(entities);
            token = next;

            if !has_next {
                break;
            }
        }

        prop_assert_eq!(&delivered, &source.snapshot());

        // Re-requesting the tail is empty and keeps the token.
        let tail = fetch(&paginator, token.as_ref(), page_size);
        prop_assert!(tail.is_empty());
        prop_assert!(!tail.has_next());
        prop_assert_eq!(tail.token(), token.as_ref());
    }

    #[test]
    fn monotonic_writes_never_lose_a_row(
        timestamps in prop::collection::vec(0u64..6, 0..40),
        page_size in 1u32..7,
        writes in prop::collection::vec((write(), any::<bool>()), 0..16),
    ) {
        let source = seed(&timestamps);
        let paginator = Paginator::new(&source);
        let page_size = PageSize::new(page_size).expect("non-zero page size");

        let mut delivered = HashSet::new();
        let mut pending = writes.into_iter();
        let mut inserted = 0;
        let mut token = None;
        let mut finished = false;

        for _ in 0..PAGE_CAP {
            let page = fetch(&paginator, token.as_ref(), page_size);
            prop_assert!(is_canonical(page.entities()));
            for row in page.entities() {
                delivered.insert((row.id.clone(), row.modified));
            }

            if !page.has_next() {
                finished = true;
                break;
            }
            token = page.token().copied();

            if let Some((write, bump)) = pending.next() {
                apply(&source, write, bump, &mut inserted);
            }
        }
        prop_assert!(finished);

        // Duplicates are allowed; omissions are not.
        for row in source.snapshot() {
            prop_assert!(
                delivered.contains(&(row.id.clone(), row.modified)),
                "row {:?} was never delivered",
                row
            );
        }
    }
}
