use directory_portal::pagination::Paginator;

fn items(n: usize) -> Vec<usize> {
    (1..=n).collect()
}

#[test]
fn test_seven_items_split_into_two_pages() {
    let paginator = Paginator::new(5);

    let page = paginator.get_page(items(7), 1);
    assert_eq!(page.items, vec![1, 2, 3, 4, 5]);
    assert_eq!(page.total, 7);
    assert_eq!(page.num_pages, 2);
    assert!(page.has_next());
    assert!(!page.has_previous());

    let page = paginator.get_page(items(7), 2);
    assert_eq!(page.items, vec![6, 7]);
    assert!(!page.has_next());
    assert!(page.has_previous());
}

#[test]
fn test_overflow_clamps_to_last_page() {
    let paginator = Paginator::new(5);
    let page = paginator.get_page(items(7), 999);
    assert_eq!(page.number, 2);
    assert_eq!(page.items, vec![6, 7]);
}

#[test]
fn test_underflow_clamps_to_first_page() {
    let paginator = Paginator::new(5);
    let page = paginator.get_page(items(7), 0);
    assert_eq!(page.number, 1);
    assert_eq!(page.items, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_empty_set_has_one_empty_page() {
    let paginator = Paginator::new(5);
    let page = paginator.get_page(items(0), 1);
    assert_eq!(page.number, 1);
    assert_eq!(page.num_pages, 1);
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
    assert!(!page.has_next());
    assert!(!page.has_previous());
}

#[test]
fn test_exact_multiple_has_no_phantom_page() {
    let paginator = Paginator::new(5);
    let page = paginator.get_page(items(10), 3);
    assert_eq!(page.num_pages, 2);
    assert_eq!(page.number, 2);
}

#[test]
fn test_parse_page_number_garbage_means_first_page() {
    assert_eq!(Paginator::parse_page_number(None), 1);
    assert_eq!(Paginator::parse_page_number(Some("abc")), 1);
    assert_eq!(Paginator::parse_page_number(Some("-3")), 1);
    assert_eq!(Paginator::parse_page_number(Some("0")), 1);
    assert_eq!(Paginator::parse_page_number(Some("4")), 4);
}
