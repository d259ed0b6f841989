//! Behavioural coverage for adding and removing favourite books.

use std::cell::RefCell;

use folio_core::{Book, CatalogError, CatalogReader, FavouriteStore, MemoryCatalog};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

const READER: u64 = 10;
const STRANGER: u64 = 99;

#[fixture]
fn catalog() -> RefCell<MemoryCatalog> {
    RefCell::new(MemoryCatalog::default())
}

#[fixture]
fn outcome() -> RefCell<Option<Result<(), CatalogError>>> {
    RefCell::new(None)
}

fn book(id: u64, title: &str) -> Book {
    Book::new(id, title).unwrap_or_else(|err| panic!("valid book {id}: {err}"))
}

fn recorded(outcome: &RefCell<Option<Result<(), CatalogError>>>) -> Result<(), CatalogError> {
    outcome
        .borrow_mut()
        .take()
        .unwrap_or_else(|| panic!("a favourite request must be recorded"))
}

#[given("a catalogue where the reader already likes book 1")]
fn catalogue_with_reader(catalog: &RefCell<MemoryCatalog>) {
    *catalog.borrow_mut() = MemoryCatalog::with_books([
        book(1, "Dune"),
        book(2, "Dune Messiah"),
        book(3, "Cooking 101"),
    ])
    .with_profile(READER, [1]);
}

#[when("the reader adds book 2 to their favourites")]
fn add_book_two(
    catalog: &RefCell<MemoryCatalog>,
    outcome: &RefCell<Option<Result<(), CatalogError>>>,
) {
    *outcome.borrow_mut() = Some(catalog.borrow_mut().add_favourite(READER, 2));
}

#[when("the reader adds book 1 to their favourites")]
fn add_book_one(
    catalog: &RefCell<MemoryCatalog>,
    outcome: &RefCell<Option<Result<(), CatalogError>>>,
) {
    *outcome.borrow_mut() = Some(catalog.borrow_mut().add_favourite(READER, 1));
}

#[when("the reader removes book 3 from their favourites")]
fn remove_book_three(
    catalog: &RefCell<MemoryCatalog>,
    outcome: &RefCell<Option<Result<(), CatalogError>>>,
) {
    *outcome.borrow_mut() = Some(catalog.borrow_mut().remove_favourite(READER, 3));
}

#[when("a user without a profile adds book 1 to their favourites")]
fn stranger_adds_book(
    catalog: &RefCell<MemoryCatalog>,
    outcome: &RefCell<Option<Result<(), CatalogError>>>,
) {
    *outcome.borrow_mut() = Some(catalog.borrow_mut().add_favourite(STRANGER, 1));
}

#[then("the reader's favourites are books 1 and 2")]
fn favourites_are_one_and_two(
    catalog: &RefCell<MemoryCatalog>,
    outcome: &RefCell<Option<Result<(), CatalogError>>>,
) {
    if let Err(err) = recorded(outcome) {
        panic!("adding a favourite should succeed, got {err}");
    }
    let ids: Vec<u64> = catalog
        .borrow()
        .list_favourites(READER)
        .unwrap_or_else(|err| panic!("list favourites: {err}"))
        .iter()
        .map(|book| book.id)
        .collect();
    assert_eq!(ids, vec![1, 2]);
}

#[then("the request is rejected as a conflict")]
fn rejected_as_conflict(outcome: &RefCell<Option<Result<(), CatalogError>>>) {
    match recorded(outcome) {
        Err(CatalogError::AlreadyFavourite { user_id, book_id }) => {
            assert_eq!((user_id, book_id), (READER, 1));
        }
        other => panic!("expected a conflict, got {other:?}"),
    }
}

#[then("the request is rejected because the book is not a favourite")]
fn rejected_as_not_favourite(outcome: &RefCell<Option<Result<(), CatalogError>>>) {
    match recorded(outcome) {
        Err(CatalogError::NotFavourite { book_id, .. }) => assert_eq!(book_id, 3),
        other => panic!("expected NotFavourite, got {other:?}"),
    }
}

#[then("the request is rejected because the profile is missing")]
fn rejected_as_missing_profile(outcome: &RefCell<Option<Result<(), CatalogError>>>) {
    match recorded(outcome) {
        Err(CatalogError::ProfileNotFound { user_id }) => assert_eq!(user_id, STRANGER),
        other => panic!("expected ProfileNotFound, got {other:?}"),
    }
}

#[scenario(path = "tests/features/favourites.feature", index = 0)]
fn adding_new_favourite(
    catalog: RefCell<MemoryCatalog>,
    outcome: RefCell<Option<Result<(), CatalogError>>>,
) {
    let _ = (catalog, outcome);
}

#[scenario(path = "tests/features/favourites.feature", index = 1)]
fn adding_duplicate_favourite(
    catalog: RefCell<MemoryCatalog>,
    outcome: RefCell<Option<Result<(), CatalogError>>>,
) {
    let _ = (catalog, outcome);
}

#[scenario(path = "tests/features/favourites.feature", index = 2)]
fn removing_non_favourite(
    catalog: RefCell<MemoryCatalog>,
    outcome: RefCell<Option<Result<(), CatalogError>>>,
) {
    let _ = (catalog, outcome);
}

#[scenario(path = "tests/features/favourites.feature", index = 3)]
fn missing_profile(
    catalog: RefCell<MemoryCatalog>,
    outcome: RefCell<Option<Result<(), CatalogError>>>,
) {
    let _ = (catalog, outcome);
}
