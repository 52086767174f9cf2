use chrono::Utc;
use directory_portal::{
    InMemoryRepository,
    models::{Car, CreateCarRequest, DemoCategory, PublicUser, UpdateCarRequest, User},
    repository::Repository,
};

fn user(id: i64, email: &str, name: &str) -> User {
    User {
        id,
        email: email.to_string(),
        name: name.to_string(),
        is_active: true,
        is_staff: false,
        is_superuser: false,
        date_joined: Utc::now(),
        last_login: None,
    }
}

fn car(id: i64, transmission: &str, is_available: bool) -> Car {
    let now = Utc::now();
    Car {
        id,
        name: format!("Car {id}"),
        transmission: transmission.to_string(),
        is_available,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_list_users_orders_by_id_ascending() {
    let repo = InMemoryRepository::new();
    repo.insert_user(user(9, "c@example.com", "C"));
    repo.insert_user(user(1, "a@example.com", "A"));
    repo.insert_user(user(4, "b@example.com", "B"));

    let users = repo.list_users().await;
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 4, 9]);
}

#[tokio::test]
async fn test_get_user_projection_hits_and_misses() {
    let repo = InMemoryRepository::new();
    repo.insert_user(user(1, "a@example.com", "A"));

    assert_eq!(
        repo.get_user_projection(1).await,
        Some(PublicUser {
            id: 1,
            email: "a@example.com".to_string(),
            name: "A".to_string(),
        })
    );
    assert_eq!(repo.get_user_projection(2).await, None);
}

#[tokio::test]
async fn test_available_listing_never_mutates_state() {
    let repo = InMemoryRepository::new();
    repo.insert_car(car(1, "manual", true));
    repo.insert_car(car(2, "automatic", false));

    let first = repo.list_available_cars(&[]).await;
    let second = repo.list_available_cars(&[]).await;
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(repo.list_all_cars().await.len(), 2);
}

#[tokio::test]
async fn test_transmission_filter_is_a_set() {
    let repo = InMemoryRepository::new();
    repo.insert_car(car(1, "manual", true));
    repo.insert_car(car(2, "automatic", true));
    repo.insert_car(car(3, "manual", true));

    let manual = repo
        .list_available_cars(&["manual".to_string()])
        .await;
    assert_eq!(manual.len(), 2);

    let both = repo
        .list_available_cars(&["manual".to_string(), "automatic".to_string()])
        .await;
    assert_eq!(both.len(), 3);
}

#[tokio::test]
async fn test_create_assigns_sequential_ids() {
    let repo = InMemoryRepository::new();

    let first = repo
        .create_car(CreateCarRequest {
            name: "One".to_string(),
            transmission: "manual".to_string(),
            is_available: true,
        })
        .await
        .expect("create");
    let second = repo
        .create_car(CreateCarRequest {
            name: "Two".to_string(),
            transmission: "automatic".to_string(),
            is_available: true,
        })
        .await
        .expect("create");

    assert!(second.id > first.id);
}

#[tokio::test]
async fn test_demo_categories_order_by_id_regardless_of_seed_order() {
    let repo = InMemoryRepository::new();
    repo.insert_demo_category(DemoCategory {
        id: 9,
        name: "Wheels".to_string(),
        description: String::new(),
    });
    repo.insert_demo_category(DemoCategory {
        id: 1,
        name: "Engines".to_string(),
        description: String::new(),
    });

    let ids: Vec<i64> = repo
        .list_demo_categories()
        .await
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec![1, 9]);
}

#[tokio::test]
async fn test_update_is_partial_and_misses_return_none() {
    let repo = InMemoryRepository::new();
    repo.insert_car(car(1, "manual", true));

    let updated = repo
        .update_car(
            1,
            UpdateCarRequest {
                is_available: Some(false),
                ..Default::default()
            },
        )
        .await
        .expect("update");
    assert!(!updated.is_available);
    assert_eq!(updated.transmission, "manual");

    assert!(
        repo.update_car(99, UpdateCarRequest::default())
            .await
            .is_none()
    );
}
