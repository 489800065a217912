//! In-process record store.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;

use super::{RecordStore, StoreError, StoreResult};
use crate::menu::{MenuFilter, MenuItem, MenuItemPatch, NewMenuItem};
use crate::order::{NewOrder, Order};
use crate::records::{AdminAccount, Contact, NewAdmin, NewContact, Review};
use crate::reservation::{NewReservation, Reservation};
use crate::settings::SettingKey;
use crate::types::{
    AdminUserId, ContactId, Email, MenuItemId, OrderId, OrderStatus, ReservationId,
    ReservationStatus, ReviewId,
};

#[derive(Debug, Default)]
struct Tables {
    menu: Vec<MenuItem>,
    orders: Vec<Order>,
    reservations: Vec<Reservation>,
    reviews: Vec<Review>,
    contacts: Vec<Contact>,
    settings: HashMap<SettingKey, Value>,
    admins: Vec<AdminAccount>,
    last_id: HashMap<&'static str, i32>,
}

impl Tables {
    fn next_id(&mut self, collection: &'static str) -> i32 {
        let id = self.last_id.entry(collection).or_insert(0);
        *id += 1;
        *id
    }
}

/// Record store backed by in-memory tables.
///
/// Ids start at 1 per collection. [`fail_next_writes`](Self::fail_next_writes)
/// makes the next writes fail with `StoreError::Backend`, for exercising
/// failure paths. Clones share the same tables, so one store can back
/// several routers.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    failing_writes: Arc<AtomicU32>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` write operations fail.
    pub fn fail_next_writes(&self, count: u32) {
        self.failing_writes.store(count, Ordering::SeqCst);
    }

    /// Insert a review directly. Reviews have no public create operation.
    ///
    /// # Errors
    ///
    /// Fails only if the store lock is poisoned.
    pub fn insert_review(
        &self,
        name: &str,
        dish: &str,
        rating: u8,
        text: &str,
        is_visible: bool,
    ) -> StoreResult<Review> {
        let mut tables = self.tables()?;
        let review = Review {
            id: ReviewId::new(tables.next_id("review")),
            name: name.to_owned(),
            dish: dish.to_owned(),
            rating,
            text: text.to_owned(),
            image: None,
            is_visible,
            created_at: Utc::now(),
        };
        tables.reviews.push(review.clone());
        Ok(review)
    }

    fn tables(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_owned()))
    }

    /// Lock for a write, consuming one injected failure if any are pending.
    fn tables_for_write(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        let injected = self
            .failing_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            return Err(StoreError::Backend("injected write failure".to_owned()));
        }
        self.tables()
    }
}

fn newest_first<T: Clone>(rows: &[T], created: impl Fn(&T) -> chrono::DateTime<Utc>) -> Vec<T> {
    // Rows are kept in insertion order; reversing first breaks timestamp ties
    // by id.
    let mut rows = rows.to_vec();
    rows.reverse();
    rows.sort_by_key(|row| std::cmp::Reverse(created(row)));
    rows
}

impl RecordStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        self.tables().map(drop)
    }

    async fn list_menu_items(&self, filter: MenuFilter) -> StoreResult<Vec<MenuItem>> {
        let tables = self.tables()?;
        let mut items: Vec<MenuItem> = tables
            .menu
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();
        items.sort_by_key(|item| (item.sort_order, item.id));
        Ok(items)
    }

    async fn get_menu_item(&self, id: MenuItemId) -> StoreResult<Option<MenuItem>> {
        let tables = self.tables()?;
        Ok(tables.menu.iter().find(|item| item.id == id).cloned())
    }

    async fn create_menu_item(&self, item: NewMenuItem) -> StoreResult<MenuItem> {
        let mut tables = self.tables_for_write()?;
        let created = MenuItem {
            id: MenuItemId::new(tables.next_id("menu_item")),
            name: item.name,
            description: item.description,
            price: item.price,
            category: item.category,
            image: item.image,
            rating: item.rating,
            reviews_count: item.reviews_count,
            ingredients: item.ingredients,
            nutrition: item.nutrition,
            benefits: item.benefits,
            sort_order: item.sort_order,
            is_active: item.is_active,
            created_at: Utc::now(),
        };
        tables.menu.push(created.clone());
        Ok(created)
    }

    async fn update_menu_item(&self, id: MenuItemId, patch: MenuItemPatch) -> StoreResult<MenuItem> {
        let mut tables = self.tables_for_write()?;
        let item = tables
            .menu
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| StoreError::not_found("menu item", id))?;
        patch.apply_to(item);
        Ok(item.clone())
    }

    async fn delete_menu_item(&self, id: MenuItemId) -> StoreResult<()> {
        let mut tables = self.tables_for_write()?;
        let before = tables.menu.len();
        tables.menu.retain(|item| item.id != id);
        if tables.menu.len() == before {
            return Err(StoreError::not_found("menu item", id));
        }
        Ok(())
    }

    async fn list_orders(&self, status: Option<OrderStatus>) -> StoreResult<Vec<Order>> {
        let tables = self.tables()?;
        let mut orders = newest_first(&tables.orders, |o| o.created_at);
        orders.retain(|o| status.is_none_or(|s| s == o.status));
        Ok(orders)
    }

    async fn get_order(&self, id: OrderId) -> StoreResult<Option<Order>> {
        let tables = self.tables()?;
        Ok(tables.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn create_order(&self, order: NewOrder) -> StoreResult<Order> {
        let mut tables = self.tables_for_write()?;
        let id = OrderId::new(tables.next_id("order"));
        let created = order.into_order(id, Utc::now());
        tables.orders.push(created.clone());
        Ok(created)
    }

    async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> StoreResult<Order> {
        let mut tables = self.tables_for_write()?;
        let order = tables
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| StoreError::not_found("order", id))?;
        order.status = status;
        Ok(order.clone())
    }

    async fn list_reservations(
        &self,
        status: Option<ReservationStatus>,
    ) -> StoreResult<Vec<Reservation>> {
        let tables = self.tables()?;
        let mut reservations = newest_first(&tables.reservations, |r| r.created_at);
        reservations.retain(|r| status.is_none_or(|s| s == r.status));
        Ok(reservations)
    }

    async fn get_reservation(&self, id: ReservationId) -> StoreResult<Option<Reservation>> {
        let tables = self.tables()?;
        Ok(tables.reservations.iter().find(|r| r.id == id).cloned())
    }

    async fn create_reservation(&self, reservation: NewReservation) -> StoreResult<Reservation> {
        let mut tables = self.tables_for_write()?;
        let id = ReservationId::new(tables.next_id("reservation"));
        let created = reservation.into_reservation(id, Utc::now());
        tables.reservations.push(created.clone());
        Ok(created)
    }

    async fn update_reservation_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> StoreResult<Reservation> {
        let mut tables = self.tables_for_write()?;
        let reservation = tables
            .reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::not_found("reservation", id))?;
        reservation.status = status;
        Ok(reservation.clone())
    }

    async fn list_reviews(&self, visible_only: bool) -> StoreResult<Vec<Review>> {
        let tables = self.tables()?;
        let mut reviews = newest_first(&tables.reviews, |r| r.created_at);
        reviews.retain(|r| !visible_only || r.is_visible);
        Ok(reviews)
    }

    async fn set_review_visibility(&self, id: ReviewId, is_visible: bool) -> StoreResult<Review> {
        let mut tables = self.tables_for_write()?;
        let review = tables
            .reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::not_found("review", id))?;
        review.is_visible = is_visible;
        Ok(review.clone())
    }

    async fn delete_review(&self, id: ReviewId) -> StoreResult<()> {
        let mut tables = self.tables_for_write()?;
        let before = tables.reviews.len();
        tables.reviews.retain(|r| r.id != id);
        if tables.reviews.len() == before {
            return Err(StoreError::not_found("review", id));
        }
        Ok(())
    }

    async fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        let tables = self.tables()?;
        Ok(newest_first(&tables.contacts, |c| c.created_at))
    }

    async fn create_contact(&self, contact: NewContact) -> StoreResult<Contact> {
        let mut tables = self.tables_for_write()?;
        let id = ContactId::new(tables.next_id("contact"));
        let created = contact.into_contact(id, Utc::now());
        tables.contacts.push(created.clone());
        Ok(created)
    }

    async fn mark_contact_read(&self, id: ContactId, is_read: bool) -> StoreResult<Contact> {
        let mut tables = self.tables_for_write()?;
        let contact = tables
            .contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("contact", id))?;
        contact.is_read = is_read;
        Ok(contact.clone())
    }

    async fn get_setting(&self, key: SettingKey) -> StoreResult<Option<Value>> {
        let tables = self.tables()?;
        Ok(tables.settings.get(&key).cloned())
    }

    async fn update_setting(&self, key: SettingKey, value: Value) -> StoreResult<()> {
        let mut tables = self.tables_for_write()?;
        tables.settings.insert(key, value);
        Ok(())
    }

    async fn find_admin_by_email(&self, email: &Email) -> StoreResult<Option<AdminAccount>> {
        let tables = self.tables()?;
        Ok(tables
            .admins
            .iter()
            .find(|a| a.email.as_str().eq_ignore_ascii_case(email.as_str()))
            .cloned())
    }

    async fn create_admin(&self, admin: NewAdmin) -> StoreResult<AdminAccount> {
        let mut tables = self.tables_for_write()?;
        if tables
            .admins
            .iter()
            .any(|a| a.email.as_str().eq_ignore_ascii_case(admin.email.as_str()))
        {
            return Err(StoreError::Conflict(format!(
                "admin {} already exists",
                admin.email
            )));
        }
        let created = AdminAccount {
            id: AdminUserId::new(tables.next_id("admin_user")),
            email: admin.email,
            name: admin.name,
            password_hash: admin.password_hash,
            created_at: Utc::now(),
        };
        tables.admins.push(created.clone());
        Ok(created)
    }
}
