use userdesk::domain::types::{HashedPassword, UserEmail, UserId, UserName};
use userdesk::domain::user::{NewUser, User};
use userdesk::repository::{DieselRepository, UserListQuery, UserReader, UserWriter};

mod common;

fn new_user(name: &str) -> NewUser {
    let local = name.to_lowercase().replace(|c: char| !c.is_ascii_alphanumeric(), "");
    NewUser::new(
        UserName::new(name).unwrap(),
        UserEmail::new(format!("{local}@example.com")).unwrap(),
        HashedPassword::new("$argon2id$v=19$stub").unwrap(),
    )
}

fn names(users: &[User]) -> Vec<&str> {
    users.iter().map(|user| user.name.as_str()).collect()
}

#[test]
fn test_create_and_get_user() {
    let test_db = common::TestDb::new("test_create_and_get_user.db");
    let repo = DieselRepository::new(test_db.pool());

    let created = repo.create_user(&new_user("Ann")).unwrap();
    assert_eq!(created.name.as_str(), "Ann");
    assert_eq!(created.email.as_str(), "ann@example.com");

    let fetched = repo.get_user_by_id(created.id).unwrap();
    assert_eq!(fetched, Some(created));

    let missing = repo.get_user_by_id(UserId::new(999).unwrap()).unwrap();
    assert_eq!(missing, None);
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let test_db = common::TestDb::new("test_search_is_case_insensitive_substring.db");
    let repo = DieselRepository::new(test_db.pool());
    for name in ["Ann", "Bob", "Joanne", "Carl"] {
        repo.create_user(&new_user(name)).unwrap();
    }

    let (total, users) = repo
        .list_users(UserListQuery::new().search("ann").paginate(1, 10))
        .unwrap();

    assert_eq!(total, 2);
    assert_eq!(names(&users), vec!["Ann", "Joanne"]);

    let (total, users) = repo.list_users(UserListQuery::new().search("ZED")).unwrap();
    assert_eq!(total, 0);
    assert!(users.is_empty());
}

#[test]
fn test_search_treats_wildcards_literally() {
    let test_db = common::TestDb::new("test_search_treats_wildcards_literally.db");
    let repo = DieselRepository::new(test_db.pool());
    for name in ["100% Ann", "Ann_B", "Annxb", "Plain"] {
        repo.create_user(&new_user(name)).unwrap();
    }

    let (total, users) = repo.list_users(UserListQuery::new().search("%")).unwrap();
    assert_eq!(total, 1);
    assert_eq!(names(&users), vec!["100% Ann"]);

    let (total, users) = repo.list_users(UserListQuery::new().search("n_b")).unwrap();
    assert_eq!(total, 1);
    assert_eq!(names(&users), vec!["Ann_B"]);
}

#[test]
fn test_pages_partition_the_listing_in_id_order() {
    let test_db = common::TestDb::new("test_pages_partition_the_listing_in_id_order.db");
    let repo = DieselRepository::new(test_db.pool());

    let mut created = Vec::new();
    for i in 1..=23 {
        created.push(repo.create_user(&new_user(&format!("User {i:02}"))).unwrap());
    }

    let mut seen = Vec::new();
    for page in 1..=3 {
        let (total, users) = repo
            .list_users(UserListQuery::new().paginate(page, 10))
            .unwrap();
        assert_eq!(total, 23);
        let expected: Vec<UserId> = created
            .iter()
            .skip((page - 1) * 10)
            .take(10)
            .map(|user| user.id)
            .collect();
        let ids: Vec<UserId> = users.iter().map(|user| user.id).collect();
        assert_eq!(ids, expected);
        seen.extend(ids);
    }

    let all: Vec<UserId> = created.iter().map(|user| user.id).collect();
    assert_eq!(seen, all);

    let (total, past_end) = repo
        .list_users(UserListQuery::new().paginate(4, 10))
        .unwrap();
    assert_eq!(total, 23);
    assert!(past_end.is_empty());
}

#[test]
fn test_huge_page_returns_no_items() {
    let test_db = common::TestDb::new("test_huge_page_returns_no_items.db");
    let repo = DieselRepository::new(test_db.pool());
    repo.create_user(&new_user("Ann")).unwrap();

    for page in [1_000_000_000_000_000_000, usize::MAX] {
        let (total, users) = repo
            .list_users(UserListQuery::new().paginate(page, 10))
            .unwrap();
        assert_eq!(total, 1);
        assert!(users.is_empty(), "page {page} returned {users:?}");
    }
}

#[test]
fn test_filtered_pages_cover_every_match_once() {
    let test_db = common::TestDb::new("test_filtered_pages_cover_every_match_once.db");
    let repo = DieselRepository::new(test_db.pool());
    for i in 1..=15 {
        repo.create_user(&new_user(&format!("Ann {i:02}"))).unwrap();
        repo.create_user(&new_user(&format!("Bob {i:02}"))).unwrap();
    }

    let (total, first) = repo
        .list_users(UserListQuery::new().search("ann").paginate(1, 10))
        .unwrap();
    let (_, second) = repo
        .list_users(UserListQuery::new().search("ann").paginate(2, 10))
        .unwrap();

    assert_eq!(total, 15);
    assert_eq!(first.len(), 10);
    assert_eq!(second.len(), 5);
    assert!(
        first
            .iter()
            .chain(second.iter())
            .all(|user| user.name.as_str().starts_with("Ann"))
    );
}

#[test]
fn test_listing_is_repeatable() {
    let test_db = common::TestDb::new("test_listing_is_repeatable.db");
    let repo = DieselRepository::new(test_db.pool());
    for name in ["Ann", "Bob", "Joanne"] {
        repo.create_user(&new_user(name)).unwrap();
    }

    let query = UserListQuery::new().search("an").paginate(1, 10);
    let first = repo.list_users(query.clone()).unwrap();
    let second = repo.list_users(query).unwrap();

    assert_eq!(first, second);
}
