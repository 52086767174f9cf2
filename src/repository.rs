use crate::models::{Car, CreateCarRequest, DemoCategory, DemoItem, PublicUser, UpdateCarRequest, User};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, query_builder::QueryBuilder};
use std::sync::{Arc, RwLock};

/// Repository Trait
///
/// Defines the abstract contract for all persistence operations, allowing the
/// handlers to interact with the data layer without knowing the specific
/// implementation (Postgres in deployment, in-memory for tests and demos).
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn Repository>`) safely shareable across Axum's task boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- User Directory ---
    // Every user projected to {id, email, name}, ordered by id ascending.
    // No pagination; callers slice as needed.
    async fn list_users(&self) -> Vec<PublicUser>;
    // Single projected record, or None when the id is unknown.
    async fn get_user_projection(&self, id: i64) -> Option<PublicUser>;
    // Full identity record including the authorization flags. Used by the
    // auth extractor, never serialized to clients.
    async fn get_user(&self, id: i64) -> Option<User>;

    // --- Catalog ---
    // Public listing: only `is_available = true`, optionally restricted to a
    // transmission set, ordered by id for deterministic pages.
    async fn list_available_cars(&self, transmissions: &[String]) -> Vec<Car>;
    // Admin access: every car regardless of availability.
    async fn list_all_cars(&self) -> Vec<Car>;
    async fn create_car(&self, req: CreateCarRequest) -> Option<Car>;
    // Partial update; returns None when the id is unknown.
    async fn update_car(&self, id: i64, req: UpdateCarRequest) -> Option<Car>;

    // --- Demo Content ---
    async fn list_demo_categories(&self) -> Vec<DemoCategory>;
    async fn list_demo_items(&self) -> Vec<DemoItem>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the
/// application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The concrete implementation of the `Repository` trait, backed by the
/// PostgreSQL database.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_PROJECTION: &str = "SELECT id, email, name FROM users";
const CAR_COLUMNS: &str = "id, name, transmission, is_available, created_at, updated_at";

#[async_trait]
impl Repository for PostgresRepository {
    /// list_users
    ///
    /// The projection is applied in SQL so flags and timestamps never leave
    /// the database. Ordering by id keeps listings deterministic.
    async fn list_users(&self) -> Vec<PublicUser> {
        let query = format!("{USER_PROJECTION} ORDER BY id ASC");
        match sqlx::query_as::<_, PublicUser>(&query).fetch_all(&self.pool).await {
            Ok(users) => users,
            Err(e) => {
                tracing::error!("list_users error: {:?}", e);
                vec![]
            }
        }
    }

    async fn get_user_projection(&self, id: i64) -> Option<PublicUser> {
        let query = format!("{USER_PROJECTION} WHERE id = $1");
        sqlx::query_as::<_, PublicUser>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_user_projection error: {:?}", e);
                None
            })
    }

    /// get_user
    ///
    /// Retrieves the full record needed for authentication and authorization.
    async fn get_user(&self, id: i64) -> Option<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, name, is_active, is_staff, is_superuser, date_joined, last_login \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("get_user error: {:?}", e);
            None
        })
    }

    /// list_available_cars
    ///
    /// Implements the transmission filter with QueryBuilder for safe
    /// parameterization. **Security**: strictly enforces
    /// `WHERE is_available = true` in the base query.
    async fn list_available_cars(&self, transmissions: &[String]) -> Vec<Car> {
        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(format!(
            "SELECT {CAR_COLUMNS} FROM cars WHERE is_available = true"
        ));

        if !transmissions.is_empty() {
            builder.push(" AND transmission = ANY(");
            builder.push_bind(transmissions.to_vec());
            builder.push(")");
        }

        builder.push(" ORDER BY id ASC");

        match builder.build_query_as::<Car>().fetch_all(&self.pool).await {
            Ok(cars) => cars,
            Err(e) => {
                tracing::error!("list_available_cars error: {:?}", e);
                vec![]
            }
        }
    }

    /// list_all_cars
    ///
    /// Administrative listing: hidden stock first so it is reviewed, then id.
    async fn list_all_cars(&self) -> Vec<Car> {
        let query = format!("SELECT {CAR_COLUMNS} FROM cars ORDER BY is_available ASC, id ASC");
        match sqlx::query_as::<_, Car>(&query).fetch_all(&self.pool).await {
            Ok(cars) => cars,
            Err(e) => {
                tracing::error!("list_all_cars error: {:?}", e);
                vec![]
            }
        }
    }

    async fn create_car(&self, req: CreateCarRequest) -> Option<Car> {
        let query = format!(
            "INSERT INTO cars (name, transmission, is_available, created_at, updated_at) \
             VALUES ($1, $2, $3, NOW(), NOW()) RETURNING {CAR_COLUMNS}"
        );
        sqlx::query_as::<_, Car>(&query)
            .bind(req.name)
            .bind(req.transmission)
            .bind(req.is_available)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("create_car error: {:?}", e);
                None
            })
    }

    /// update_car
    ///
    /// Uses the PostgreSQL `COALESCE` function to handle `Option<T>` fields,
    /// only updating a column if the corresponding field in `req` is `Some`.
    async fn update_car(&self, id: i64, req: UpdateCarRequest) -> Option<Car> {
        let query = format!(
            "UPDATE cars \
             SET name = COALESCE($2, name), \
                 transmission = COALESCE($3, transmission), \
                 is_available = COALESCE($4, is_available), \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING {CAR_COLUMNS}"
        );
        sqlx::query_as::<_, Car>(&query)
            .bind(id)
            .bind(req.name)
            .bind(req.transmission)
            .bind(req.is_available)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("update_car error: {:?}", e);
                None
            })
    }

    async fn list_demo_categories(&self) -> Vec<DemoCategory> {
        match sqlx::query_as::<_, DemoCategory>(
            "SELECT id, name, description FROM demo_categories ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        {
            Ok(categories) => categories,
            Err(e) => {
                tracing::error!("list_demo_categories error: {:?}", e);
                vec![]
            }
        }
    }

    /// list_demo_items
    ///
    /// Ordered by title, matching the record's default admin ordering.
    async fn list_demo_items(&self) -> Vec<DemoItem> {
        match sqlx::query_as::<_, DemoItem>(
            "SELECT id, title, subtitle, content, status, is_active, rating, published_on, \
                    publish_time, last_reviewed_at, attachment, tags, metadata, category_id, \
                    address, location \
             FROM demo_items ORDER BY title ASC",
        )
        .fetch_all(&self.pool)
        .await
        {
            Ok(items) => items,
            Err(e) => {
                tracing::error!("list_demo_items error: {:?}", e);
                vec![]
            }
        }
    }
}

/// InMemoryRepository
///
/// A lock-guarded in-memory implementation of the `Repository` trait. Backs
/// the integration tests (no database required) and doubles as seed storage
/// for local demos. Ids are assigned sequentially, mirroring the serial
/// primary keys of the Postgres schema.
#[derive(Default)]
pub struct InMemoryRepository {
    inner: RwLock<InMemoryStore>,
}

#[derive(Default)]
struct InMemoryStore {
    users: Vec<User>,
    cars: Vec<Car>,
    categories: Vec<DemoCategory>,
    items: Vec<DemoItem>,
    next_car_id: i64,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a user record. Intended for test setup; ids are caller-chosen so
    /// tests can assert on exact ordering.
    pub fn insert_user(&self, user: User) {
        let mut store = self.inner.write().expect("repository lock poisoned");
        store.users.push(user);
        store.users.sort_by_key(|u| u.id);
    }

    pub fn insert_car(&self, car: Car) {
        let mut store = self.inner.write().expect("repository lock poisoned");
        store.next_car_id = store.next_car_id.max(car.id);
        store.cars.push(car);
        store.cars.sort_by_key(|c| c.id);
    }

    pub fn insert_demo_category(&self, category: DemoCategory) {
        let mut store = self.inner.write().expect("repository lock poisoned");
        store.categories.push(category);
        store.categories.sort_by_key(|c| c.id);
    }

    pub fn insert_demo_item(&self, item: DemoItem) {
        let mut store = self.inner.write().expect("repository lock poisoned");
        store.items.push(item);
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn list_users(&self) -> Vec<PublicUser> {
        let store = self.inner.read().expect("repository lock poisoned");
        store.users.iter().map(PublicUser::from).collect()
    }

    async fn get_user_projection(&self, id: i64) -> Option<PublicUser> {
        let store = self.inner.read().expect("repository lock poisoned");
        store.users.iter().find(|u| u.id == id).map(PublicUser::from)
    }

    async fn get_user(&self, id: i64) -> Option<User> {
        let store = self.inner.read().expect("repository lock poisoned");
        store.users.iter().find(|u| u.id == id).cloned()
    }

    async fn list_available_cars(&self, transmissions: &[String]) -> Vec<Car> {
        let store = self.inner.read().expect("repository lock poisoned");
        store
            .cars
            .iter()
            .filter(|c| c.is_available)
            .filter(|c| transmissions.is_empty() || transmissions.contains(&c.transmission))
            .cloned()
            .collect()
    }

    async fn list_all_cars(&self) -> Vec<Car> {
        let store = self.inner.read().expect("repository lock poisoned");
        let mut cars = store.cars.clone();
        cars.sort_by_key(|c| (c.is_available, c.id));
        cars
    }

    async fn create_car(&self, req: CreateCarRequest) -> Option<Car> {
        let mut store = self.inner.write().expect("repository lock poisoned");
        store.next_car_id += 1;
        let now = Utc::now();
        let car = Car {
            id: store.next_car_id,
            name: req.name,
            transmission: req.transmission,
            is_available: req.is_available,
            created_at: now,
            updated_at: now,
        };
        store.cars.push(car.clone());
        Some(car)
    }

    async fn update_car(&self, id: i64, req: UpdateCarRequest) -> Option<Car> {
        let mut store = self.inner.write().expect("repository lock poisoned");
        let car = store.cars.iter_mut().find(|c| c.id == id)?;
        if let Some(name) = req.name {
            car.name = name;
        }
        if let Some(transmission) = req.transmission {
            car.transmission = transmission;
        }
        if let Some(is_available) = req.is_available {
            car.is_available = is_available;
        }
        car.updated_at = Utc::now();
        Some(car.clone())
    }

    async fn list_demo_categories(&self) -> Vec<DemoCategory> {
        let store = self.inner.read().expect("repository lock poisoned");
        store.categories.clone()
    }

    async fn list_demo_items(&self) -> Vec<DemoItem> {
        let store = self.inner.read().expect("repository lock poisoned");
        let mut items = store.items.clone();
        items.sort_by(|a, b| a.title.cmp(&b.title));
        items
    }
}
