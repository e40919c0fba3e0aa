use room_inventory::{Directory, Post};
use std::collections::HashSet;

fn ana() -> Post {
    Post::new("PC100", "Ana", "Ruiz")
}

#[test]
fn test_valid_prefixes_create_empty_directories() {
    for prefix in ["IC", "ICX", "ICXY", " ab ", "\tz9\t", "ñá"] {
        let directory = Directory::create(prefix).unwrap();
        assert_eq!(directory.count(), 0, "prefix {:?}", prefix);
    }
}

#[test]
fn test_invalid_prefixes_are_rejected() {
    for prefix in ["", "  ", "A", "  B  ", "ABCDE", "ABCDEFGH"] {
        assert!(
            Directory::create(prefix).unwrap_err().is_validation(),
            "prefix {:?}",
            prefix
        );
    }
}

#[test]
fn test_prefix_is_upper_cased_without_locale() {
    assert_eq!(Directory::create("ñá").unwrap().prefix(), "ÑÁ");
    assert_eq!(Directory::create("ix").unwrap().prefix(), "IX");
}

#[test]
fn test_second_add_with_same_code_is_rejected() {
    let mut directory = Directory::create("IC").unwrap();

    assert!(directory.add("IC01", ana()).is_ok());
    assert!(directory
        .add("IC01", Post::new("PC200", "Bea", "Soto"))
        .is_err());
    assert_eq!(directory.count(), 1);
}

#[test]
fn test_lower_case_code_is_stored_upper_case() {
    let mut directory = Directory::create("IC").unwrap();
    directory.add("ic05", ana()).unwrap();

    let codes: Vec<&str> = directory.codes().collect();
    assert_eq!(codes, vec!["IC05"]);
}

#[test]
fn test_round_trip_single_entry() {
    let mut directory = Directory::create("IC").unwrap();
    directory.add("IC01", ana()).unwrap();

    let rebuilt = Directory::create_from_lines(&directory.to_interchange_lines()).unwrap();

    assert_eq!(rebuilt.prefix(), "IC");
    assert_eq!(rebuilt.count(), 1);
    assert_eq!(rebuilt.get("IC01"), Some(&ana()));
}

#[test]
fn test_round_trip_many_entries() {
    let mut directory = Directory::create("lab").unwrap();
    for i in 0..50 {
        directory
            .add(
                &format!(" lab{:03} ", i),
                Post::new(format!(" M{} ", i), "Nombre Compuesto", " De la Fuente "),
            )
            .unwrap();
    }

    let lines = directory.to_interchange_lines();
    assert_eq!(lines.len(), 51);

    let rebuilt = Directory::create_from_lines(&lines).unwrap();
    assert_eq!(rebuilt, directory);
    assert_eq!(
        rebuilt.get("LAB007").unwrap(),
        &Post::new("M7", "Nombre Compuesto", "De la Fuente")
    );
}

#[test]
fn test_corrupt_line_is_skipped() {
    let directory = Directory::create_from_lines(&[
        "IC",
        "IC01##PC1##Ana##Ruiz",
        "garbage-no-delimiters",
        "IC02##PC2##Bea##Soto",
    ])
    .unwrap();

    let codes: HashSet<&str> = directory.codes().collect();
    assert_eq!(codes, HashSet::from(["IC01", "IC02"]));
}

#[test]
fn test_display_and_interchange_cover_the_same_posts() {
    let directory = Directory::create_from_lines(&[
        "IC",
        "IC01##PC1##Ana##Ruiz",
        "IC02##PC2##Bea##Soto",
    ])
    .unwrap();

    let display: HashSet<String> = directory.to_display_lines().into_iter().collect();
    assert_eq!(
        display,
        HashSet::from([
            "IC01 – PC1 (Ana Ruiz)".to_string(),
            "IC02 – PC2 (Bea Soto)".to_string()
        ])
    );
    assert_eq!(directory.to_interchange_lines().len(), display.len() + 1);
}
