//! Nosso Sushi Core - ordering domain and record store.
//!
//! This crate is shared by every Nosso Sushi component:
//! - `storefront` - Public menu, cart, checkout, reservations and contact API
//! - `admin` - Restaurant management API
//! - `cli` - Migrations, admin accounts and menu seeding
//!
//! # Architecture
//!
//! The domain modules are pure: the [`cart`] engine, checkout [`validate`],
//! the order and reservation [`lifecycle`]s and [`dashboard`] figures do no
//! I/O. Persistence sits behind the [`RecordStore`] trait in [`store`];
//! [`MemoryStore`] is always available and `PgRecordStore` is compiled with
//! the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Ids, money, email and status values
//! - [`menu`] - Menu items, patches and listing filters
//! - [`cart`] - Cart lines and derived totals
//! - [`checkout`] - Customer details, validation and order placement
//! - [`order`] - Placed orders
//! - [`reservation`] - Table bookings
//! - [`records`] - Reviews, contact messages and admin accounts
//! - [`settings`] - Typed site settings
//! - [`lifecycle`] - Status transitions
//! - [`dashboard`] - Admin overview figures
//! - [`store`] - The record store trait and its implementations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod dashboard;
pub mod lifecycle;
pub mod menu;
pub mod order;
pub mod records;
pub mod reservation;
pub mod settings;
pub mod store;
pub mod types;

pub use cart::{Cart, CartLine};
pub use checkout::{
    Checkout, CheckoutError, CheckoutField, CheckoutPhase, CustomerInfo, PROCESSING_TIMEOUT,
    PlacedOrder, SUCCESS_DISPLAY, validate,
};
pub use dashboard::DashboardStats;
pub use lifecycle::TransitionError;
pub use menu::{Category, MenuFilter, MenuItem, MenuItemPatch, NewMenuItem};
pub use order::{NewOrder, Order, OrderItem, OrderType, PersistedOrderType};
pub use records::{AdminAccount, Contact, ContactError, NewAdmin, NewContact, Review};
pub use reservation::{NewReservation, Reservation, ReservationError};
pub use settings::{
    HeroImages, OpeningHours, RestaurantInfo, SettingKey, SiteSettings, SocialLinks,
};
pub use store::{MemoryStore, RecordStore, StoreError, StoreResult};
#[cfg(feature = "postgres")]
pub use store::PgRecordStore;
pub use types::*;
