//! Persistence boundary.
//!
//! [`RecordStore`] is the only way the ordering flow and the admin reach
//! stored records. Two implementations ship: [`MemoryStore`] for tests and
//! local runs, and `PgRecordStore` (feature `postgres`) for production.
//!
//! Stores do not retry. Status updates overwrite whatever is stored; the
//! caller decides whether the move is allowed before calling.

use core::future::Future;

use serde_json::Value;

use crate::menu::{MenuFilter, MenuItem, MenuItemPatch, NewMenuItem};
use crate::order::{NewOrder, Order};
use crate::records::{AdminAccount, Contact, NewAdmin, NewContact, Review};
use crate::reservation::{NewReservation, Reservation};
use crate::settings::SettingKey;
use crate::types::{
    ContactId, Email, MenuItemId, OrderId, OrderStatus, ReservationId, ReservationStatus, ReviewId,
};

mod memory;
#[cfg(feature = "postgres")]
mod postgres;

pub use memory::MemoryStore;
#[cfg(feature = "postgres")]
pub use postgres::PgRecordStore;

/// Errors from a record store.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend failed or could not be reached.
    #[error("store backend error: {0}")]
    Backend(String),

    #[error("{collection} {id} not found")]
    NotFound { collection: &'static str, id: i32 },

    /// A uniqueness or integrity constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A stored row could not be read back into its domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

impl StoreError {
    pub(crate) fn not_found(collection: &'static str, id: impl Into<i32>) -> Self {
        Self::NotFound {
            collection,
            id: id.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed collections of menu items, orders, reservations, reviews,
/// contacts, settings and admin accounts.
///
/// Lists are newest first except the menu, which is ordered by
/// `sort_order` and then id.
pub trait RecordStore: Send + Sync {
    /// Cheap round trip used by readiness probes.
    fn ping(&self) -> impl Future<Output = StoreResult<()>> + Send;

    // Menu

    fn list_menu_items(
        &self,
        filter: MenuFilter,
    ) -> impl Future<Output = StoreResult<Vec<MenuItem>>> + Send;

    fn get_menu_item(
        &self,
        id: MenuItemId,
    ) -> impl Future<Output = StoreResult<Option<MenuItem>>> + Send;

    fn create_menu_item(
        &self,
        item: NewMenuItem,
    ) -> impl Future<Output = StoreResult<MenuItem>> + Send;

    fn update_menu_item(
        &self,
        id: MenuItemId,
        patch: MenuItemPatch,
    ) -> impl Future<Output = StoreResult<MenuItem>> + Send;

    fn delete_menu_item(&self, id: MenuItemId) -> impl Future<Output = StoreResult<()>> + Send;

    // Orders

    fn list_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> impl Future<Output = StoreResult<Vec<Order>>> + Send;

    fn get_order(&self, id: OrderId) -> impl Future<Output = StoreResult<Option<Order>>> + Send;

    /// Persist a new order with status `new`.
    fn create_order(&self, order: NewOrder) -> impl Future<Output = StoreResult<Order>> + Send;

    fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> impl Future<Output = StoreResult<Order>> + Send;

    // Reservations

    fn list_reservations(
        &self,
        status: Option<ReservationStatus>,
    ) -> impl Future<Output = StoreResult<Vec<Reservation>>> + Send;

    fn get_reservation(
        &self,
        id: ReservationId,
    ) -> impl Future<Output = StoreResult<Option<Reservation>>> + Send;

    /// Persist a booking request as `pending`.
    fn create_reservation(
        &self,
        reservation: NewReservation,
    ) -> impl Future<Output = StoreResult<Reservation>> + Send;

    fn update_reservation_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> impl Future<Output = StoreResult<Reservation>> + Send;

    // Reviews

    fn list_reviews(
        &self,
        visible_only: bool,
    ) -> impl Future<Output = StoreResult<Vec<Review>>> + Send;

    fn set_review_visibility(
        &self,
        id: ReviewId,
        is_visible: bool,
    ) -> impl Future<Output = StoreResult<Review>> + Send;

    fn delete_review(&self, id: ReviewId) -> impl Future<Output = StoreResult<()>> + Send;

    // Contacts

    fn list_contacts(&self) -> impl Future<Output = StoreResult<Vec<Contact>>> + Send;

    /// Persist a contact message as unread.
    fn create_contact(
        &self,
        contact: NewContact,
    ) -> impl Future<Output = StoreResult<Contact>> + Send;

    fn mark_contact_read(
        &self,
        id: ContactId,
        is_read: bool,
    ) -> impl Future<Output = StoreResult<Contact>> + Send;

    // Settings

    fn get_setting(
        &self,
        key: SettingKey,
    ) -> impl Future<Output = StoreResult<Option<Value>>> + Send;

    /// Insert or replace the value under `key`.
    fn update_setting(
        &self,
        key: SettingKey,
        value: Value,
    ) -> impl Future<Output = StoreResult<()>> + Send;

    // Admin accounts

    fn find_admin_by_email(
        &self,
        email: &Email,
    ) -> impl Future<Output = StoreResult<Option<AdminAccount>>> + Send;

    /// Fails with `StoreError::Conflict` if the email is taken.
    fn create_admin(&self, admin: NewAdmin)
    -> impl Future<Output = StoreResult<AdminAccount>> + Send;
}
