//! `PostgreSQL` record store.
//!
//! Queries are built at runtime with `sqlx::query_as` into private row
//! types, then converted into domain records. Conversion failures surface as
//! `StoreError::DataCorruption`.
//!
//! The schema lives in `crates/core/migrations/`; run it with
//! [`PgRecordStore::migrate`] or `ns-cli migrate`.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;

use super::{RecordStore, StoreError, StoreResult};
use crate::menu::{Category, MenuFilter, MenuItem, MenuItemPatch, NewMenuItem};
use crate::order::{NewOrder, Order, OrderItem, PersistedOrderType};
use crate::records::{AdminAccount, Contact, NewAdmin, NewContact, Review};
use crate::reservation::{NewReservation, Reservation};
use crate::settings::SettingKey;
use crate::types::{
    AdminUserId, ContactId, Email, MenuItemId, Money, OrderId, OrderStatus, ReservationId,
    ReservationStatus, ReviewId,
};

/// Postgres unique-violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Self::Conflict(db.message().to_owned())
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                Self::DataCorruption(err.to_string())
            }
            _ => Self::Backend(err.to_string()),
        }
    }
}

fn corrupt(what: &str, err: impl std::fmt::Display) -> StoreError {
    StoreError::DataCorruption(format!("invalid {what} in database: {err}"))
}

fn money(what: &str, amount: Decimal) -> StoreResult<Money> {
    Money::new(amount).map_err(|e| corrupt(what, e))
}

fn email(raw: &str) -> StoreResult<Email> {
    Email::parse(raw).map_err(|e| corrupt("email", e))
}

// =============================================================================
// Row types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct MenuItemRow {
    id: i32,
    name: String,
    description: String,
    price: Decimal,
    category: String,
    image: Option<String>,
    rating: f32,
    reviews_count: i32,
    ingredients: Vec<String>,
    nutrition: Option<String>,
    benefits: Vec<String>,
    sort_order: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<MenuItemRow> for MenuItem {
    type Error = StoreError;

    fn try_from(row: MenuItemRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MenuItemId::new(row.id),
            name: row.name,
            description: row.description,
            price: money("menu price", row.price)?,
            category: row
                .category
                .parse::<Category>()
                .map_err(|e| corrupt("category", e))?,
            image: row.image,
            rating: row.rating,
            reviews_count: row.reviews_count,
            ingredients: row.ingredients,
            nutrition: row.nutrition,
            benefits: row.benefits,
            sort_order: row.sort_order,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    customer_name: String,
    customer_phone: String,
    customer_address: Option<String>,
    order_type: String,
    items: Json<Vec<OrderItem>>,
    subtotal: Decimal,
    tax: Decimal,
    total: Decimal,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = StoreError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: OrderId::new(row.id),
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            customer_address: row.customer_address,
            order_type: row
                .order_type
                .parse::<PersistedOrderType>()
                .map_err(|e| corrupt("order type", e))?,
            items: row.items.0,
            subtotal: money("subtotal", row.subtotal)?,
            tax: money("tax", row.tax)?,
            total: money("total", row.total)?,
            status: row
                .status
                .parse::<OrderStatus>()
                .map_err(|e| corrupt("order status", e))?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReservationRow {
    id: i32,
    name: String,
    email: String,
    phone: String,
    date: NaiveDate,
    time: NaiveTime,
    guests: i16,
    occasion: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = StoreError;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ReservationId::new(row.id),
            name: row.name,
            email: email(&row.email)?,
            phone: row.phone,
            date: row.date,
            time: row.time,
            guests: u8::try_from(row.guests).map_err(|e| corrupt("guest count", e))?,
            occasion: row.occasion,
            status: row
                .status
                .parse::<ReservationStatus>()
                .map_err(|e| corrupt("reservation status", e))?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: i32,
    name: String,
    dish: String,
    rating: i16,
    text: String,
    image: Option<String>,
    is_visible: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = StoreError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ReviewId::new(row.id),
            name: row.name,
            dish: row.dish,
            rating: u8::try_from(row.rating).map_err(|e| corrupt("review rating", e))?,
            text: row.text,
            image: row.image,
            is_visible: row.is_visible,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ContactRow {
    id: i32,
    name: String,
    email: String,
    phone: Option<String>,
    subject: String,
    message: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for Contact {
    type Error = StoreError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ContactId::new(row.id),
            name: row.name,
            email: email(&row.email)?,
            phone: row.phone,
            subject: row.subject,
            message: row.message,
            is_read: row.is_read,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: i32,
    email: String,
    name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdminRow> for AdminAccount {
    type Error = StoreError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AdminUserId::new(row.id),
            email: email(&row.email)?,
            name: row.name,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

fn convert_all<R, T>(rows: Vec<R>) -> StoreResult<Vec<T>>
where
    T: TryFrom<R, Error = StoreError>,
{
    rows.into_iter().map(T::try_from).collect()
}

const MENU_COLUMNS: &str = "id, name, description, price, category, image, rating, \
     reviews_count, ingredients, nutrition, benefits, sort_order, is_active, created_at";
const ORDER_COLUMNS: &str = "id, customer_name, customer_phone, customer_address, order_type, \
     items, subtotal, tax, total, status, created_at";
const RESERVATION_COLUMNS: &str =
    "id, name, email, phone, date, time, guests, occasion, status, created_at";
const REVIEW_COLUMNS: &str = "id, name, dish, rating, text, image, is_visible, created_at";
const CONTACT_COLUMNS: &str =
    "id, name, email, phone, subject, message, is_read, created_at";

// =============================================================================
// Store
// =============================================================================

/// Record store over a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending migrations from `crates/core/migrations`.
    ///
    /// # Errors
    ///
    /// Returns the migrator's error if a migration fails to apply.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

impl RecordStore for PgRecordStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_menu_items(&self, filter: MenuFilter) -> StoreResult<Vec<MenuItem>> {
        let sql = format!(
            "SELECT {MENU_COLUMNS} FROM menu_items \
             WHERE ($1 = FALSE OR is_active) AND ($2::TEXT IS NULL OR category = $2) \
             ORDER BY sort_order, id"
        );
        let rows: Vec<MenuItemRow> = sqlx::query_as(&sql)
            .bind(filter.active_only)
            .bind(filter.category.map(|c| c.as_str()))
            .fetch_all(&self.pool)
            .await?;
        convert_all(rows)
    }

    #[instrument(skip(self))]
    async fn get_menu_item(&self, id: MenuItemId) -> StoreResult<Option<MenuItem>> {
        let sql = format!("SELECT {MENU_COLUMNS} FROM menu_items WHERE id = $1");
        let row: Option<MenuItemRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(TryInto::try_into).transpose()
    }

    #[instrument(skip(self, item), fields(name = %item.name))]
    async fn create_menu_item(&self, item: NewMenuItem) -> StoreResult<MenuItem> {
        let sql = format!(
            "INSERT INTO menu_items (name, description, price, category, image, rating, \
             reviews_count, ingredients, nutrition, benefits, sort_order, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {MENU_COLUMNS}"
        );
        let row: MenuItemRow = sqlx::query_as(&sql)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.price.amount())
            .bind(item.category.as_str())
            .bind(&item.image)
            .bind(item.rating)
            .bind(item.reviews_count)
            .bind(&item.ingredients)
            .bind(&item.nutrition)
            .bind(&item.benefits)
            .bind(item.sort_order)
            .bind(item.is_active)
            .fetch_one(&self.pool)
            .await?;
        row.try_into()
    }

    #[instrument(skip(self, patch))]
    async fn update_menu_item(&self, id: MenuItemId, patch: MenuItemPatch) -> StoreResult<MenuItem> {
        let mut tx = self.pool.begin().await?;

        let select = format!("SELECT {MENU_COLUMNS} FROM menu_items WHERE id = $1 FOR UPDATE");
        let row: Option<MenuItemRow> = sqlx::query_as(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let mut item: MenuItem = row
            .ok_or_else(|| StoreError::not_found("menu item", id))?
            .try_into()?;
        patch.apply_to(&mut item);

        let update = format!(
            "UPDATE menu_items SET name = $2, description = $3, price = $4, category = $5, \
             image = $6, rating = $7, reviews_count = $8, ingredients = $9, nutrition = $10, \
             benefits = $11, sort_order = $12, is_active = $13 \
             WHERE id = $1 RETURNING {MENU_COLUMNS}"
        );
        let row: MenuItemRow = sqlx::query_as(&update)
            .bind(id)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.price.amount())
            .bind(item.category.as_str())
            .bind(&item.image)
            .bind(item.rating)
            .bind(item.reviews_count)
            .bind(&item.ingredients)
            .bind(&item.nutrition)
            .bind(&item.benefits)
            .bind(item.sort_order)
            .bind(item.is_active)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        row.try_into()
    }

    #[instrument(skip(self))]
    async fn delete_menu_item(&self, id: MenuItemId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("menu item", id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_orders(&self, status: Option<OrderStatus>) -> StoreResult<Vec<Order>> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY created_at DESC, id DESC"
        );
        let rows: Vec<OrderRow> = sqlx::query_as(&sql)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await?;
        convert_all(rows)
    }

    #[instrument(skip(self))]
    async fn get_order(&self, id: OrderId) -> StoreResult<Option<Order>> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");
        let row: Option<OrderRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(TryInto::try_into).transpose()
    }

    #[instrument(skip(self, order), fields(total = %order.total()))]
    async fn create_order(&self, order: NewOrder) -> StoreResult<Order> {
        let sql = format!(
            "INSERT INTO orders (customer_name, customer_phone, customer_address, order_type, \
             items, subtotal, tax, total, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {ORDER_COLUMNS}"
        );
        let row: OrderRow = sqlx::query_as(&sql)
            .bind(order.customer_name())
            .bind(order.customer_phone())
            .bind(order.customer_address())
            .bind(order.order_type().as_str())
            .bind(Json(order.items()))
            .bind(order.subtotal().amount())
            .bind(order.tax().amount())
            .bind(order.total().amount())
            .bind(order.status().as_str())
            .fetch_one(&self.pool)
            .await?;
        row.try_into()
    }

    #[instrument(skip(self))]
    async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> StoreResult<Order> {
        let sql = format!("UPDATE orders SET status = $2 WHERE id = $1 RETURNING {ORDER_COLUMNS}");
        let row: Option<OrderRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or_else(|| StoreError::not_found("order", id))?
            .try_into()
    }

    #[instrument(skip(self))]
    async fn list_reservations(
        &self,
        status: Option<ReservationStatus>,
    ) -> StoreResult<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY created_at DESC, id DESC"
        );
        let rows: Vec<ReservationRow> = sqlx::query_as(&sql)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await?;
        convert_all(rows)
    }

    #[instrument(skip(self))]
    async fn get_reservation(&self, id: ReservationId) -> StoreResult<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1");
        let row: Option<ReservationRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(TryInto::try_into).transpose()
    }

    #[instrument(skip(self, reservation), fields(date = %reservation.date, guests = reservation.guests))]
    async fn create_reservation(&self, reservation: NewReservation) -> StoreResult<Reservation> {
        let sql = format!(
            "INSERT INTO reservations (name, email, phone, date, time, guests, occasion, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {RESERVATION_COLUMNS}"
        );
        let row: ReservationRow = sqlx::query_as(&sql)
            .bind(&reservation.name)
            .bind(reservation.email.as_str())
            .bind(&reservation.phone)
            .bind(reservation.date)
            .bind(reservation.time)
            .bind(i16::from(reservation.guests))
            .bind(&reservation.occasion)
            .bind(ReservationStatus::Pending.as_str())
            .fetch_one(&self.pool)
            .await?;
        row.try_into()
    }

    #[instrument(skip(self))]
    async fn update_reservation_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> StoreResult<Reservation> {
        let sql = format!(
            "UPDATE reservations SET status = $2 WHERE id = $1 RETURNING {RESERVATION_COLUMNS}"
        );
        let row: Option<ReservationRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or_else(|| StoreError::not_found("reservation", id))?
            .try_into()
    }

    #[instrument(skip(self))]
    async fn list_reviews(&self, visible_only: bool) -> StoreResult<Vec<Review>> {
        let sql = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews \
             WHERE ($1 = FALSE OR is_visible) \
             ORDER BY created_at DESC, id DESC"
        );
        let rows: Vec<ReviewRow> = sqlx::query_as(&sql)
            .bind(visible_only)
            .fetch_all(&self.pool)
            .await?;
        convert_all(rows)
    }

    #[instrument(skip(self))]
    async fn set_review_visibility(&self, id: ReviewId, is_visible: bool) -> StoreResult<Review> {
        let sql =
            format!("UPDATE reviews SET is_visible = $2 WHERE id = $1 RETURNING {REVIEW_COLUMNS}");
        let row: Option<ReviewRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(is_visible)
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or_else(|| StoreError::not_found("review", id))?
            .try_into()
    }

    #[instrument(skip(self))]
    async fn delete_review(&self, id: ReviewId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("review", id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        let sql = format!("SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY created_at DESC, id DESC");
        let rows: Vec<ContactRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        convert_all(rows)
    }

    #[instrument(skip(self, contact), fields(subject = %contact.subject))]
    async fn create_contact(&self, contact: NewContact) -> StoreResult<Contact> {
        let sql = format!(
            "INSERT INTO contacts (name, email, phone, subject, message, is_read) \
             VALUES ($1, $2, $3, $4, $5, FALSE) \
             RETURNING {CONTACT_COLUMNS}"
        );
        let row: ContactRow = sqlx::query_as(&sql)
            .bind(&contact.name)
            .bind(contact.email.as_str())
            .bind(&contact.phone)
            .bind(&contact.subject)
            .bind(&contact.message)
            .fetch_one(&self.pool)
            .await?;
        row.try_into()
    }

    #[instrument(skip(self))]
    async fn mark_contact_read(&self, id: ContactId, is_read: bool) -> StoreResult<Contact> {
        let sql =
            format!("UPDATE contacts SET is_read = $2 WHERE id = $1 RETURNING {CONTACT_COLUMNS}");
        let row: Option<ContactRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(is_read)
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or_else(|| StoreError::not_found("contact", id))?
            .try_into()
    }

    #[instrument(skip(self))]
    async fn get_setting(&self, key: SettingKey) -> StoreResult<Option<Value>> {
        let value: Option<Value> =
            sqlx::query_scalar("SELECT value FROM site_settings WHERE key = $1")
                .bind(key.as_str())
                .fetch_optional(&self.pool)
                .await?;
        Ok(value)
    }

    #[instrument(skip(self, value))]
    async fn update_setting(&self, key: SettingKey, value: Value) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO site_settings (key, value, updated_at) VALUES ($1, $2, NOW()) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()",
        )
        .bind(key.as_str())
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_admin_by_email(&self, email: &Email) -> StoreResult<Option<AdminAccount>> {
        let row: Option<AdminRow> = sqlx::query_as(
            "SELECT id, email, name, password_hash, created_at FROM admin_user \
             WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(TryInto::try_into).transpose()
    }

    #[instrument(skip(self, admin), fields(email = %admin.email))]
    async fn create_admin(&self, admin: NewAdmin) -> StoreResult<AdminAccount> {
        let row: AdminRow = sqlx::query_as(
            "INSERT INTO admin_user (email, name, password_hash) VALUES ($1, $2, $3) \
             RETURNING id, email, name, password_hash, created_at",
        )
        .bind(admin.email.as_str())
        .bind(&admin.name)
        .bind(&admin.password_hash)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }
}
