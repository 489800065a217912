//! Cart and checkout handlers.
//!
//! The cart lives in the visitor's session (see [`CheckoutSession`]). Every
//! cart mutation answers with the full [`CartView`] so the client never
//! computes totals itself.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use nosso_sushi_core::{
    Checkout, CheckoutPhase, CustomerInfo, MenuItemId, Money, PlacedOrder, RecordStore,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::CheckoutSession;
use crate::state::AppState;

/// One cart line as the drawer shows it.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub menu_item_id: MenuItemId,
    pub name: String,
    pub price: Money,
    pub quantity: u32,
    pub line_total: Money,
    pub image: Option<String>,
}

/// The cart drawer: lines, derived totals, the guest's details and the
/// placement phase.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub customer: CustomerInfo,
    pub phase: CheckoutPhase,
    pub can_checkout: bool,
}

impl CartView {
    fn of(checkout: &Checkout) -> Self {
        let now = Utc::now();
        let cart = &checkout.cart;
        Self {
            lines: cart
                .lines()
                .iter()
                .map(|line| CartLineView {
                    menu_item_id: line.item.id,
                    name: line.item.name.clone(),
                    price: line.item.price,
                    quantity: line.quantity,
                    line_total: line.line_total(),
                    image: line.item.image.clone(),
                })
                .collect(),
            item_count: cart.item_count(),
            subtotal: cart.subtotal(),
            tax: cart.tax(),
            total: cart.total(),
            customer: checkout.customer.clone(),
            phase: checkout.phase_at(now),
            can_checkout: checkout.can_submit(now),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddItem {
    pub menu_item_id: MenuItemId,
}

#[derive(Debug, Deserialize)]
pub struct QuantityDelta {
    pub delta: i32,
}

#[instrument(skip(session))]
pub async fn show(session: CheckoutSession) -> Json<CartView> {
    Json(CartView::of(&session.checkout))
}

/// Add one unit of an active menu item.
#[instrument(skip(state, session))]
pub async fn add<S: RecordStore>(
    State(state): State<AppState<S>>,
    mut session: CheckoutSession,
    Json(body): Json<AddItem>,
) -> Result<Json<CartView>> {
    let item = state
        .store()
        .get_menu_item(body.menu_item_id)
        .await?
        .filter(|item| item.is_active)
        .ok_or_else(|| AppError::NotFound(format!("menu item {}", body.menu_item_id)))?;

    session.checkout.cart.add_item(&item);
    session.save().await?;
    Ok(Json(CartView::of(&session.checkout)))
}

/// Change a line's quantity; it never drops below one.
#[instrument(skip(session))]
pub async fn change_quantity(
    Path(id): Path<MenuItemId>,
    mut session: CheckoutSession,
    Json(body): Json<QuantityDelta>,
) -> Result<Json<CartView>> {
    if session.checkout.cart.line(id).is_none() {
        return Err(AppError::NotFound(format!("cart line {id}")));
    }
    session.checkout.cart.set_quantity_delta(id, body.delta);
    session.save().await?;
    Ok(Json(CartView::of(&session.checkout)))
}

#[instrument(skip(session))]
pub async fn remove(
    Path(id): Path<MenuItemId>,
    mut session: CheckoutSession,
) -> Result<Json<CartView>> {
    session.checkout.cart.remove_item(id);
    session.save().await?;
    Ok(Json(CartView::of(&session.checkout)))
}

#[instrument(skip(session))]
pub async fn clear(mut session: CheckoutSession) -> Result<Json<CartView>> {
    session.checkout.cart.clear();
    session.save().await?;
    Ok(Json(CartView::of(&session.checkout)))
}

/// Replace the guest's details. Validation happens at checkout.
#[instrument(skip(session, customer))]
pub async fn update_customer(
    mut session: CheckoutSession,
    Json(customer): Json<CustomerInfo>,
) -> Result<Json<CartView>> {
    session.checkout.customer = customer;
    session.save().await?;
    Ok(Json(CartView::of(&session.checkout)))
}

/// Place the order.
///
/// The processing phase is written to the session store before the order is
/// sent, so a second submission from the same visitor gets a 409. On success
/// the cart and contact fields are cleared. On any failure the cart is left
/// as it was so the guest can fix and retry.
#[instrument(skip(state, session))]
pub async fn checkout<S: RecordStore>(
    State(state): State<AppState<S>>,
    mut session: CheckoutSession,
) -> Result<(StatusCode, Json<PlacedOrder>)> {
    let order = session.checkout.begin_placement(Utc::now())?;
    if let Err(err) = session.persist().await {
        session.checkout.cancel_placement();
        session.save().await?;
        return Err(err);
    }

    let outcome = state.store().create_order(order).await;
    let placed = session.checkout.finish_placement(outcome, Utc::now());

    // Once the store has answered, a session write failure is only logged.
    if let Err(err) = session.persist().await {
        tracing::error!(error = %err, "could not store checkout state after placement");
    }

    let placed = placed?;
    tracing::info!(order_id = %placed.order_id, "checkout completed");
    Ok((StatusCode::CREATED, Json(placed)))
}
